//! Committed annotation shapes and the caller-owned list that holds them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{self, Rgb};
use crate::geometry::{NativeRect, Point};

/// Drawing tool, which is also the kind of shape it produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[serde(rename = "box")]
    Rectangle,
    Polygon,
    Point,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Rectangle, ToolKind::Polygon, ToolKind::Point];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Rectangle => "Box",
            ToolKind::Polygon => "Polygon",
            ToolKind::Point => "Point",
        }
    }

    /// Whether a committed shape of this kind may hold `count` points.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            ToolKind::Rectangle => count == 2,
            ToolKind::Polygon => count >= 3,
            ToolKind::Point => count == 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("{tool:?} shape cannot have {count} point(s)")]
    WrongPointCount { tool: ToolKind, count: usize },

    #[error("point ({x}, {y}) is not finite")]
    NonFinitePoint { x: f32, y: f32 },

    #[error("shape id {0} is used more than once")]
    DuplicateId(ShapeId),

    #[error("no shape ids left to assign")]
    IdsExhausted,
}

/// A committed annotation.
///
/// Fields are private so a `Shape` always satisfies its tool's point-count
/// rule, including shapes read back from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRecord", into = "ShapeRecord")]
pub struct Shape {
    id: ShapeId,
    category: String,
    tool: ToolKind,
    points: Vec<Point>,
}

impl Shape {
    pub fn new(
        id: ShapeId,
        category: impl Into<String>,
        tool: ToolKind,
        points: Vec<Point>,
    ) -> Result<Self, ShapeError> {
        if !tool.accepts(points.len()) {
            return Err(ShapeError::WrongPointCount {
                tool,
                count: points.len(),
            });
        }
        if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(ShapeError::NonFinitePoint { x: p.x, y: p.y });
        }
        Ok(Self {
            id,
            category: category.into(),
            tool,
            points,
        })
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Rgb {
        category::color_for(&self.category)
    }

    /// Normalized extent for rectangles; `None` for other kinds.
    pub fn rect(&self) -> Option<NativeRect> {
        match (self.tool, self.points.as_slice()) {
            (ToolKind::Rectangle, [a, b]) => Some(NativeRect::from_corners(*a, *b)),
            _ => None,
        }
    }
}

/// Wire form of a shape. `color` is written for readers of the log and
/// ignored when reading.
#[derive(Serialize, Deserialize)]
struct ShapeRecord {
    id: ShapeId,
    #[serde(rename = "defectType")]
    category: String,
    tool: ToolKind,
    points: Vec<Point>,
    #[serde(default)]
    color: String,
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = ShapeError;

    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        Shape::new(record.id, record.category, record.tool, record.points)
    }
}

impl From<Shape> for ShapeRecord {
    fn from(shape: Shape) -> Self {
        let color = shape.color().to_hex();
        Self {
            id: shape.id,
            category: shape.category,
            tool: shape.tool,
            points: shape.points,
            color,
        }
    }
}

/// The ordered list of committed shapes.
///
/// Owned by whoever hosts the surface. The list also hands out shape ids so
/// ids stay unique even when the host swaps the whole list.
#[derive(Debug, Clone)]
pub struct ShapeList {
    shapes: Vec<Shape>,
    next_id: u64,
}

impl Default for ShapeList {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeList {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a shape with a fresh id and appends it.
    pub fn commit(
        &mut self,
        category: &str,
        tool: ToolKind,
        points: Vec<Point>,
    ) -> Result<ShapeId, ShapeError> {
        let id = ShapeId(self.next_id);
        let next_id = self.next_id.checked_add(1).ok_or(ShapeError::IdsExhausted)?;
        let shape = Shape::new(id, category, tool, points)?;
        self.next_id = next_id;
        self.shapes.push(shape);
        Ok(id)
    }

    /// Removes exactly the shape with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Replaces the whole list. Ids in `shapes` must be unique and leave room
    /// for at least one more id. On error the list is left untouched.
    pub fn replace(&mut self, shapes: Vec<Shape>) -> Result<(), ShapeError> {
        let mut ids: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(ShapeError::DuplicateId(w[0]));
        }
        if let Some(max) = ids.last() {
            let after = max.0.checked_add(1).ok_or(ShapeError::IdsExhausted)?;
            self.next_id = self.next_id.max(after);
        }
        self.shapes = shapes;
        Ok(())
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.shapes)
    }
}
