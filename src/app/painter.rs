use defect_annotate::category::Rgb;
use defect_annotate::geometry::{Point, SurfaceGeometry};
use defect_annotate::render::{DrawCommand, LineStyle, Paint, Stroke};
use defect_annotate::tessellate::{self, Triangles};
use eframe::egui;

fn color32(paint: Paint) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(paint.color.r, paint.color.g, paint.color.b, paint.alpha)
}

pub fn solid(color: Rgb) -> egui::Color32 {
    color32(Paint::solid(color))
}

/// Draws a display list onto the image area described by `geometry`.
///
/// Native widths and radii are scaled with the image. Nothing is drawn if the
/// geometry cannot map points.
pub fn paint_display_list(painter: &egui::Painter, geometry: &SurfaceGeometry, list: &[DrawCommand]) {
    let Some(scale) = geometry.display_per_native() else {
        return;
    };
    let to_screen = |p: &Point| -> egui::Pos2 {
        let (x, y) = geometry.to_display(*p).unwrap_or((p.x, p.y));
        egui::pos2(x, y)
    };
    let stroke_of = |s: &Stroke| egui::Stroke::new(s.width * scale, color32(s.paint));

    for cmd in list {
        match cmd {
            DrawCommand::Rect { rect, fill, stroke } => {
                let screen = egui::Rect::from_two_pos(to_screen(&rect.min), to_screen(&rect.max));
                painter.rect_filled(screen, 0.0, color32(*fill));
                outline(
                    painter,
                    &[
                        screen.left_top(),
                        screen.right_top(),
                        screen.right_bottom(),
                        screen.left_bottom(),
                    ],
                    true,
                    stroke_of(stroke),
                    stroke.style,
                    scale,
                );
            }
            DrawCommand::Path {
                points,
                closed,
                fill,
                stroke,
            } => {
                if let Some(fill) = fill {
                    match tessellate::fill_polygon(points) {
                        Ok(triangles) => {
                            let mesh = fill_mesh(&triangles, color32(*fill), &to_screen);
                            painter.add(egui::Shape::mesh(mesh));
                        }
                        Err(e) => log::debug!("Skipped polygon fill: {:?}", e),
                    }
                }
                let screen: Vec<egui::Pos2> = points.iter().map(to_screen).collect();
                outline(painter, &screen, *closed, stroke_of(stroke), stroke.style, scale);
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let c = to_screen(center);
                let r = radius * scale;
                painter.circle_filled(c, r, color32(*fill));
                if let Some(stroke) = stroke {
                    painter.circle_stroke(c, r, stroke_of(stroke));
                }
            }
            DrawCommand::Line { from, to, stroke } => {
                painter.line_segment([to_screen(from), to_screen(to)], stroke_of(stroke));
            }
        }
    }
}

/// Triangulation happens in native space. The display mapping is affine, so
/// mapping the vertices afterwards keeps the triangles valid.
fn fill_mesh(
    triangles: &Triangles,
    color: egui::Color32,
    to_screen: impl Fn(&Point) -> egui::Pos2,
) -> egui::epaint::Mesh {
    let mut mesh = egui::epaint::Mesh::default();
    for v in &triangles.vertices {
        mesh.colored_vertex(to_screen(v), color);
    }
    mesh.indices.extend_from_slice(&triangles.indices);
    mesh
}

fn outline(
    painter: &egui::Painter,
    points: &[egui::Pos2],
    closed: bool,
    stroke: egui::Stroke,
    style: LineStyle,
    scale: f32,
) {
    if points.len() < 2 {
        return;
    }
    match style {
        LineStyle::Solid if closed => {
            painter.add(egui::Shape::closed_line(points.to_vec(), stroke));
        }
        LineStyle::Solid => {
            painter.add(egui::Shape::line(points.to_vec(), stroke));
        }
        LineStyle::Dashed { dash, gap } => {
            let mut path = points.to_vec();
            if closed {
                path.push(points[0]);
            }
            painter.extend(egui::Shape::dashed_line(
                &path,
                stroke,
                dash * scale,
                gap * scale,
            ));
        }
    }
}
