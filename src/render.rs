//! Backend-neutral rendering of the annotation layer.
//!
//! [`Renderer::render`] turns the committed shapes plus the optional
//! in-progress shape into a fresh [`DisplayList`] in native image coordinates.
//! Nothing is patched incrementally: every state change produces a complete
//! list, and a backend draws it over a cleared layer.

use crate::category::{self, Rgb};
use crate::config::SurfaceSettings;
use crate::geometry::{NativeRect, Point};
use crate::shape::{Shape, ToolKind};
use crate::surface::InProgress;

/// A color and the alpha it is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: u8,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Self { color, alpha: 0xff }
    }

    pub fn translucent(color: Rgb, alpha: u8) -> Self {
        Self { color, alpha }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed { dash: f32, gap: f32 },
}

/// Outline settings. Every command carries its own, so a dash pattern used
/// for one shape cannot carry over to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub paint: Paint,
    pub style: LineStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: NativeRect,
        fill: Paint,
        stroke: Stroke,
    },
    /// Polyline through `points`; `closed` adds the edge back to the first point.
    Path {
        points: Vec<Point>,
        closed: bool,
        fill: Option<Paint>,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
}

impl DrawCommand {
    pub fn stroke(&self) -> Option<&Stroke> {
        match self {
            DrawCommand::Rect { stroke, .. }
            | DrawCommand::Path { stroke, .. }
            | DrawCommand::Line { stroke, .. } => Some(stroke),
            DrawCommand::Circle { stroke, .. } => stroke.as_ref(),
        }
    }
}

/// Draw commands in painting order, first to last.
pub type DisplayList = Vec<DrawCommand>;

#[derive(Clone, Debug, PartialEq)]
pub struct Renderer {
    outline_width: f32,
    fill_alpha: u8,
    marker_radius: f32,
    crosshair_half_length: f32,
    crosshair_width: f32,
    vertex_radius: f32,
    dash: LineStyle,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&SurfaceSettings::default())
    }
}

impl Renderer {
    pub fn new(settings: &SurfaceSettings) -> Self {
        Self {
            outline_width: settings.outline_width,
            fill_alpha: settings.fill_alpha,
            marker_radius: settings.marker_radius,
            crosshair_half_length: settings.crosshair_half_length,
            crosshair_width: settings.crosshair_width,
            vertex_radius: settings.vertex_radius,
            dash: LineStyle::Dashed {
                dash: settings.dash_length,
                gap: settings.dash_gap,
            },
        }
    }

    pub fn render(&self, shapes: &[Shape], in_progress: Option<&InProgress<'_>>) -> DisplayList {
        let mut list = DisplayList::new();
        for shape in shapes {
            self.committed(&mut list, shape);
        }
        if let Some(draft) = in_progress {
            self.draft(&mut list, draft);
        }
        list
    }

    fn outline(&self, color: Rgb, style: LineStyle) -> Stroke {
        Stroke {
            width: self.outline_width,
            paint: Paint::solid(color),
            style,
        }
    }

    fn fill(&self, color: Rgb) -> Paint {
        Paint::translucent(color, self.fill_alpha)
    }

    fn committed(&self, list: &mut DisplayList, shape: &Shape) {
        let color = shape.color();
        let stroke = self.outline(color, LineStyle::Solid);
        match (shape.tool(), shape.points()) {
            (ToolKind::Rectangle, [a, b]) => list.push(DrawCommand::Rect {
                rect: NativeRect::from_corners(*a, *b),
                fill: self.fill(color),
                stroke,
            }),
            (ToolKind::Polygon, points) => list.push(DrawCommand::Path {
                points: points.to_vec(),
                closed: true,
                fill: Some(self.fill(color)),
                stroke,
            }),
            (ToolKind::Point, [p]) => {
                list.push(DrawCommand::Circle {
                    center: *p,
                    radius: self.marker_radius,
                    fill: self.fill(color),
                    stroke: Some(stroke),
                });
                self.crosshair(list, *p);
            }
            // Shape guarantees the counts above.
            _ => {}
        }
    }

    fn crosshair(&self, list: &mut DisplayList, p: Point) {
        let stroke = Stroke {
            width: self.crosshair_width,
            paint: Paint::solid(Rgb::WHITE),
            style: LineStyle::Solid,
        };
        let h = self.crosshair_half_length;
        list.push(DrawCommand::Line {
            from: Point::new(p.x - h, p.y),
            to: Point::new(p.x + h, p.y),
            stroke,
        });
        list.push(DrawCommand::Line {
            from: Point::new(p.x, p.y - h),
            to: Point::new(p.x, p.y + h),
            stroke,
        });
    }

    fn draft(&self, list: &mut DisplayList, draft: &InProgress<'_>) {
        let color = category::color_for(draft.category);
        let stroke = self.outline(color, self.dash);
        match (draft.tool, draft.points.as_slice()) {
            (ToolKind::Rectangle, [a, b]) => list.push(DrawCommand::Rect {
                rect: NativeRect::from_corners(*a, *b),
                fill: self.fill(color),
                stroke,
            }),
            (ToolKind::Polygon, points) if !points.is_empty() => {
                let closed = points.len() > 2;
                list.push(DrawCommand::Path {
                    points: points.to_vec(),
                    closed,
                    fill: closed.then(|| self.fill(color)),
                    stroke,
                });
                for p in points {
                    list.push(DrawCommand::Circle {
                        center: *p,
                        radius: self.vertex_radius,
                        fill: Paint::solid(color),
                        stroke: None,
                    });
                }
            }
            // A box anchor without a second corner has nothing to show yet.
            _ => {}
        }
    }
}
