//! Defect annotation surface for pizza quality control.
//!
//! The library holds the parts that do not depend on a UI toolkit:
//! coordinate mapping ([`geometry`]), the shape model ([`shape`]), the
//! drawing state machine ([`surface`]), a backend-neutral renderer
//! ([`render`]) and polygon fill triangulation ([`tessellate`]). The
//! `defect-annotate` binary hosts them in an egui window.

pub mod category;
pub mod config;
pub mod geometry;
pub mod render;
pub mod shape;
pub mod surface;
pub mod tessellate;

pub use config::{AppConfig, SurfaceSettings};
pub use geometry::{Point, ScreenRect, SurfaceGeometry};
pub use render::{DisplayList, DrawCommand, Renderer};
pub use shape::{Shape, ShapeError, ShapeId, ShapeList, ToolKind};
pub use surface::{AnnotationSurface, InProgress, PointerInput, SurfaceEvent, SurfaceMessage};
