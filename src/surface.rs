//! The annotation surface: pointer handling and shape accumulation.
//!
//! The surface owns only the in-progress shape and the active tool/category.
//! Committed shapes go into a [`ShapeList`] supplied by the host on every
//! call, so the host stays free to hold, log or replace the list.

use crate::category;
use crate::config::SurfaceSettings;
use crate::geometry::{Point, SurfaceGeometry};
use crate::shape::{ShapeError, ShapeId, ShapeList, ToolKind};

/// One pointer event in displayed coordinates, with the geometry that was
/// current when it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub position: (f32, f32),
    pub geometry: SurfaceGeometry,
    /// Shift held: the click asks for a zoom view instead of drawing.
    pub shift: bool,
}

impl PointerInput {
    pub fn new(position: (f32, f32), geometry: SurfaceGeometry) -> Self {
        Self {
            position,
            geometry,
            shift: false,
        }
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    fn native(&self) -> Option<Point> {
        self.geometry.to_native(self.position)
    }

    /// Drags may leave the image; their corners stay on it.
    fn native_clamped(&self) -> Option<Point> {
        self.geometry.to_native_clamped(self.position)
    }
}

#[derive(Debug, Clone)]
pub enum SurfaceMessage {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(PointerInput),
    DoubleClick,
    Cancel,
    SetTool(ToolKind),
    SetCategory(String),
    Delete(ShapeId),
    ClearAll,
}

/// Something the host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Committed(ShapeId),
    Removed(ShapeId),
    Cleared,
    /// A shift-click asked for a full-size view of the image.
    ZoomRequested,
}

#[derive(Debug, Clone, PartialEq)]
enum DrawState {
    Idle,
    DrawingRectangle { anchor: Point, cursor: Option<Point> },
    DrawingPolygon { points: Vec<Point> },
}

/// Read-only view of the shape being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct InProgress<'a> {
    pub tool: ToolKind,
    pub category: &'a str,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone)]
pub struct AnnotationSurface {
    tool: ToolKind,
    category: String,
    state: DrawState,
    close_radius: f32,
}

impl Default for AnnotationSurface {
    fn default() -> Self {
        Self::new(&SurfaceSettings::default())
    }
}

impl AnnotationSurface {
    pub fn new(settings: &SurfaceSettings) -> Self {
        Self {
            tool: ToolKind::Rectangle,
            category: category::DEFAULT_CATEGORY.to_string(),
            state: DrawState::Idle,
            close_radius: settings.close_radius,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_drawing(&self) -> bool {
        self.state != DrawState::Idle
    }

    pub fn in_progress(&self) -> Option<InProgress<'_>> {
        let points: Vec<Point> = match &self.state {
            DrawState::Idle => return None,
            DrawState::DrawingRectangle { anchor, cursor } => {
                std::iter::once(*anchor).chain(*cursor).collect()
            }
            DrawState::DrawingPolygon { points } => points.clone(),
        };
        Some(InProgress {
            tool: self.tool,
            category: &self.category,
            points,
        })
    }

    pub fn update(&mut self, msg: SurfaceMessage, shapes: &mut ShapeList) -> Option<SurfaceEvent> {
        match msg {
            SurfaceMessage::PointerDown(input) => self.pointer_down(input, shapes),
            SurfaceMessage::PointerMove(input) => {
                self.pointer_move(input);
                None
            }
            SurfaceMessage::PointerUp(input) => self.pointer_up(input, shapes),
            SurfaceMessage::DoubleClick => self.double_click(shapes),
            SurfaceMessage::Cancel => {
                self.cancel();
                None
            }
            SurfaceMessage::SetTool(tool) => {
                self.set_tool(tool);
                None
            }
            SurfaceMessage::SetCategory(category) => {
                self.set_category(category);
                None
            }
            SurfaceMessage::Delete(id) => shapes.remove(id).map(|shape| {
                log::info!("Deleted {:?} annotation {}", shape.tool(), id);
                SurfaceEvent::Removed(id)
            }),
            SurfaceMessage::ClearAll => {
                let count = shapes.len();
                shapes.clear();
                log::info!("Cleared {} annotations", count);
                Some(SurfaceEvent::Cleared)
            }
        }
    }

    /// Switching tools abandons whatever was being drawn.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            self.cancel();
            self.tool = tool;
            log::debug!("Annotation tool: {:?}", tool);
        }
    }

    /// The category in effect at commit time is the one recorded.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        log::debug!("Category: {}", self.category);
    }

    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("Drawing cancelled");
        }
        self.state = DrawState::Idle;
    }

    pub fn pointer_down(&mut self, input: PointerInput, shapes: &mut ShapeList) -> Option<SurfaceEvent> {
        if input.shift {
            log::debug!("Zoom view requested");
            return Some(SurfaceEvent::ZoomRequested);
        }
        let p = input.native()?;

        match self.tool {
            ToolKind::Point => self.commit(shapes, vec![p]),
            ToolKind::Rectangle => {
                self.state = DrawState::DrawingRectangle {
                    anchor: p,
                    cursor: None,
                };
                log::debug!("Started box at ({:.1}, {:.1})", p.x, p.y);
                None
            }
            ToolKind::Polygon => {
                let mut points = match std::mem::replace(&mut self.state, DrawState::Idle) {
                    DrawState::DrawingPolygon { points } => points,
                    _ => Vec::new(),
                };
                if points.len() > 2 && points[0].distance_to(&p) < self.close_radius {
                    return self.commit(shapes, points);
                }
                points.push(p);
                log::debug!(
                    "Added polygon point at ({:.1}, {:.1}), total: {}",
                    p.x,
                    p.y,
                    points.len()
                );
                self.state = DrawState::DrawingPolygon { points };
                None
            }
        }
    }

    /// Updates the live corner of a box being dragged. Preview only.
    pub fn pointer_move(&mut self, input: PointerInput) {
        if let DrawState::DrawingRectangle { cursor, .. } = &mut self.state {
            if let Some(p) = input.native_clamped() {
                *cursor = Some(p);
            }
        }
    }

    pub fn pointer_up(&mut self, input: PointerInput, shapes: &mut ShapeList) -> Option<SurfaceEvent> {
        let DrawState::DrawingRectangle { anchor, cursor } = self.state else {
            return None;
        };
        self.state = DrawState::Idle;
        // An unmappable release falls back to the last previewed corner.
        let end = input.native_clamped().or(cursor)?;
        self.commit(shapes, vec![anchor, end])
    }

    /// Finishes a polygon with its accumulated points, if it has more than two.
    pub fn double_click(&mut self, shapes: &mut ShapeList) -> Option<SurfaceEvent> {
        match &self.state {
            DrawState::DrawingPolygon { points } if points.len() > 2 => {
                let points = points.clone();
                self.state = DrawState::Idle;
                self.commit(shapes, points)
            }
            DrawState::DrawingPolygon { points } => {
                log::debug!("Polygon needs at least 3 points, currently has {}", points.len());
                None
            }
            _ => None,
        }
    }

    fn commit(&mut self, shapes: &mut ShapeList, points: Vec<Point>) -> Option<SurfaceEvent> {
        self.state = DrawState::Idle;
        match shapes.commit(&self.category, self.tool, points) {
            Ok(id) => {
                log::info!(
                    "Created {:?} annotation {} (category={})",
                    self.tool,
                    id,
                    self.category
                );
                Some(SurfaceEvent::Committed(id))
            }
            Err(e @ ShapeError::IdsExhausted) => {
                log::warn!("Dropped {:?} annotation: {}", self.tool, e);
                None
            }
            Err(e) => {
                log::debug!("Ignored commit: {}", e);
                None
            }
        }
    }
}
