//! Triangulation of polygon interiors, for backends that can only fill
//! triangles or convex shapes.

use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, TessellationError, VertexBuffers,
};

use crate::geometry::Point;

/// An indexed triangle list in the same space as the input points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangles {
    pub vertices: Vec<Point>,
    /// Three indices into `vertices` per triangle.
    pub indices: Vec<u32>,
}

impl Triangles {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    /// Total covered area.
    pub fn area(&self) -> f32 {
        self.iter()
            .map(|[a, b, c]| 0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs())
            .sum()
    }
}

/// Triangulates the interior of the closed polygon through `points`.
///
/// Concave outlines are handled exactly. Self-intersecting outlines use the
/// non-zero winding rule. Fewer than three points give no triangles.
pub fn fill_polygon(points: &[Point]) -> Result<Triangles, TessellationError> {
    let [first, rest @ ..] = points else {
        return Ok(Triangles::default());
    };
    if rest.len() < 2 {
        return Ok(Triangles::default());
    }

    let mut builder = Path::builder();
    builder.begin(point(first.x, first.y));
    for p in rest {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(true);
    let path = builder.build();

    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    FillTessellator::new().tessellate_path(
        &path,
        &FillOptions::non_zero(),
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
            let p = vertex.position();
            Point::new(p.x, p.y)
        }),
    )?;

    Ok(Triangles {
        vertices: buffers.vertices,
        indices: buffers.indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f32, f32)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_l_shape_stays_inside_outline() {
        // 100x100 square with the 60x60 lower-right quadrant cut away.
        let l_shape = pts(&[
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 40.0),
            (40.0, 40.0),
            (40.0, 100.0),
            (0.0, 100.0),
        ]);
        let triangles = fill_polygon(&l_shape).unwrap();

        assert!(!triangles.is_empty());
        assert!((triangles.area() - 6400.0).abs() < 0.5);
        for [a, b, c] in triangles.iter() {
            let cx = (a.x + b.x + c.x) / 3.0;
            let cy = (a.y + b.y + c.y) / 3.0;
            assert!(
                !(cx > 40.0 && cy > 40.0),
                "triangle centered at ({}, {}) covers the notch",
                cx,
                cy
            );
        }
    }

    #[test]
    fn test_convex_polygon_area() {
        let triangle = pts(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)]);
        let triangles = fill_polygon(&triangle).unwrap();
        assert_eq!(triangles.indices.len(), 3);
        assert!((triangles.area() - 1250.0).abs() < 0.01);
    }

    #[test]
    fn test_too_few_points_give_nothing() {
        assert!(fill_polygon(&[]).unwrap().is_empty());
        assert!(fill_polygon(&pts(&[(0.0, 0.0), (10.0, 10.0)])).unwrap().is_empty());
    }
}
