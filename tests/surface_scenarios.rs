//! End-to-end drawing scenarios through the public message API.

use defect_annotate::geometry::{Point, ScreenRect, SurfaceGeometry};
use defect_annotate::render::{DrawCommand, LineStyle, Renderer};
use defect_annotate::shape::{ShapeList, ToolKind};
use defect_annotate::surface::{AnnotationSurface, PointerInput, SurfaceEvent, SurfaceMessage};

fn native_geometry() -> SurfaceGeometry {
    SurfaceGeometry::new(ScreenRect::new(0.0, 0.0, 800.0, 600.0), 800.0, 600.0)
}

fn at(x: f32, y: f32) -> PointerInput {
    PointerInput::new((x, y), native_geometry())
}

fn setup(tool: ToolKind, category: &str) -> (AnnotationSurface, ShapeList) {
    let mut surface = AnnotationSurface::default();
    let mut shapes = ShapeList::new();
    surface.update(SurfaceMessage::SetTool(tool), &mut shapes);
    surface.update(SurfaceMessage::SetCategory(category.to_string()), &mut shapes);
    (surface, shapes)
}

fn coords(shapes: &ShapeList, index: usize) -> Vec<(f32, f32)> {
    shapes.as_slice()[index]
        .points()
        .iter()
        .map(|p| (p.x, p.y))
        .collect()
}

#[test]
fn point_click_creates_burnt_marker() {
    let (mut surface, mut shapes) = setup(ToolKind::Point, "burnt");
    surface.update(SurfaceMessage::PointerDown(at(100.0, 100.0)), &mut shapes);

    assert_eq!(shapes.len(), 1);
    let shape = &shapes.as_slice()[0];
    assert_eq!(shape.points(), &[Point::new(100.0, 100.0)]);
    assert_eq!(shape.color().to_hex(), "#ef4444");
}

#[test]
fn rectangle_drag_commits_anchor_and_release_point() {
    let (mut surface, mut shapes) = setup(ToolKind::Rectangle, "undercooked");
    surface.update(SurfaceMessage::PointerDown(at(50.0, 50.0)), &mut shapes);
    surface.update(SurfaceMessage::PointerMove(at(150.0, 50.0)), &mut shapes);
    assert!(shapes.is_empty());
    surface.update(SurfaceMessage::PointerUp(at(150.0, 150.0)), &mut shapes);

    assert_eq!(shapes.len(), 1);
    assert_eq!(coords(&shapes, 0), vec![(50.0, 50.0), (150.0, 150.0)]);
    assert!(!surface.is_drawing());
}

#[test]
fn rectangle_release_without_press_is_ignored() {
    let (mut surface, mut shapes) = setup(ToolKind::Rectangle, "burnt");
    let event = surface.update(SurfaceMessage::PointerUp(at(150.0, 150.0)), &mut shapes);
    assert_eq!(event, None);
    assert!(shapes.is_empty());
}

#[test]
fn rectangle_released_off_image_stays_inside_it() {
    let (mut surface, mut shapes) = setup(ToolKind::Rectangle, "burnt");
    surface.update(SurfaceMessage::PointerDown(at(700.0, 500.0)), &mut shapes);
    surface.update(SurfaceMessage::PointerMove(at(900.0, 650.0)), &mut shapes);
    surface.update(SurfaceMessage::PointerUp(at(1000.0, -20.0)), &mut shapes);

    assert_eq!(coords(&shapes, 0), vec![(700.0, 500.0), (800.0, 0.0)]);
}

#[test]
fn polygon_closes_near_first_point_without_extra_vertex() {
    let (mut surface, mut shapes) = setup(ToolKind::Polygon, "missing_topping");
    for (x, y) in [(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (5.0, 5.0)] {
        surface.update(SurfaceMessage::PointerDown(at(x, y)), &mut shapes);
    }

    assert_eq!(shapes.len(), 1);
    assert_eq!(coords(&shapes, 0), vec![(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]);
    assert!(surface.in_progress().is_none());
}

#[test]
fn polygon_double_click_needs_three_points() {
    let (mut surface, mut shapes) = setup(ToolKind::Polygon, "burnt");
    surface.update(SurfaceMessage::PointerDown(at(0.0, 0.0)), &mut shapes);
    surface.update(SurfaceMessage::PointerDown(at(100.0, 0.0)), &mut shapes);
    assert_eq!(surface.update(SurfaceMessage::DoubleClick, &mut shapes), None);
    assert!(shapes.is_empty());

    surface.update(SurfaceMessage::PointerDown(at(100.0, 100.0)), &mut shapes);
    let event = surface.update(SurfaceMessage::DoubleClick, &mut shapes);
    assert!(matches!(event, Some(SurfaceEvent::Committed(_))));
    assert_eq!(coords(&shapes, 0).len(), 3);
}

#[test]
fn shift_click_never_touches_shapes() {
    for tool in ToolKind::ALL {
        let (mut surface, mut shapes) = setup(tool, "burnt");
        let event = surface.update(
            SurfaceMessage::PointerDown(at(10.0, 10.0).with_shift(true)),
            &mut shapes,
        );
        surface.update(SurfaceMessage::PointerUp(at(90.0, 90.0)), &mut shapes);
        surface.update(SurfaceMessage::DoubleClick, &mut shapes);

        assert_eq!(event, Some(SurfaceEvent::ZoomRequested));
        assert!(shapes.is_empty(), "{:?} created a shape on shift-click", tool);
    }
}

#[test]
fn delete_removes_only_that_shape() {
    let (mut surface, mut shapes) = setup(ToolKind::Point, "burnt");
    let mut ids = Vec::new();
    for x in [10.0, 20.0, 30.0] {
        if let Some(SurfaceEvent::Committed(id)) =
            surface.update(SurfaceMessage::PointerDown(at(x, 10.0)), &mut shapes)
        {
            ids.push(id);
        }
    }
    assert_eq!(ids.len(), 3);

    surface.update(SurfaceMessage::Delete(ids[1]), &mut shapes);
    let left: Vec<_> = shapes.iter().map(|s| s.id()).collect();
    assert_eq!(left, vec![ids[0], ids[2]]);
}

#[test]
fn zoomed_clicks_store_native_coordinates() {
    // An 800x600 image shown at half size, scrolled so it starts at (40, 30).
    let half = SurfaceGeometry::new(ScreenRect::new(40.0, 30.0, 400.0, 300.0), 800.0, 600.0);
    let (mut surface, mut shapes) = setup(ToolKind::Rectangle, "uneven_cheese");
    surface.update(
        SurfaceMessage::PointerDown(PointerInput::new((90.0, 80.0), half)),
        &mut shapes,
    );

    // The view is zoomed to 200% between press and release.
    let double = SurfaceGeometry::new(ScreenRect::new(40.0, 30.0, 1600.0, 1200.0), 800.0, 600.0);
    surface.update(
        SurfaceMessage::PointerUp(PointerInput::new((440.0, 430.0), double)),
        &mut shapes,
    );

    assert_eq!(coords(&shapes, 0), vec![(100.0, 100.0), (200.0, 200.0)]);
}

#[test]
fn render_shows_draft_dashed_over_committed_solid() {
    let (mut surface, mut shapes) = setup(ToolKind::Polygon, "bubble_defect");
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
        surface.update(SurfaceMessage::PointerDown(at(x, y)), &mut shapes);
    }
    surface.update(SurfaceMessage::DoubleClick, &mut shapes);
    surface.update(SurfaceMessage::PointerDown(at(300.0, 300.0)), &mut shapes);

    let renderer = Renderer::default();
    let list = renderer.render(shapes.as_slice(), surface.in_progress().as_ref());

    let DrawCommand::Path { closed, stroke, .. } = &list[0] else {
        panic!("expected committed polygon first");
    };
    assert!(*closed);
    assert_eq!(stroke.style, LineStyle::Solid);

    let DrawCommand::Path { closed, stroke, fill, .. } = &list[1] else {
        panic!("expected draft polygon second");
    };
    assert!(!*closed);
    assert!(fill.is_none());
    assert!(matches!(stroke.style, LineStyle::Dashed { .. }));
}
