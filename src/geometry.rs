//! Coordinate frames for the annotation surface.
//!
//! Stored points always live in native image-pixel space. The surface is shown
//! on screen inside a displayed box whose size depends on layout and zoom, so
//! every pointer event is mapped back into the native frame using the geometry
//! that was current when the event happened.

use serde::{Deserialize, Serialize};

/// A point in native image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An on-screen rectangle in displayed coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_usable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Axis-aligned rectangle in native space, normalized so `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeRect {
    pub min: Point,
    pub max: Point,
}

impl NativeRect {
    /// Spans two corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Where the surface sits on screen and how many native pixels it covers.
///
/// `pixel_width`/`pixel_height` are the image's natural resolution, which is
/// also the resolution of the drawing surface. `bounds` is the surface's
/// displayed bounding box, which already includes any zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub bounds: ScreenRect,
    pub pixel_width: f32,
    pub pixel_height: f32,
}

impl SurfaceGeometry {
    pub fn new(bounds: ScreenRect, pixel_width: f32, pixel_height: f32) -> Self {
        Self {
            bounds,
            pixel_width,
            pixel_height,
        }
    }

    /// Lays out an image of the given natural size inside `available_width`.
    ///
    /// The image is fit to the available width (never upscaled) and then
    /// scaled by `zoom_percent / 100`, anchored at `origin`.
    pub fn layout(
        origin: (f32, f32),
        available_width: f32,
        natural_size: (f32, f32),
        zoom_percent: f32,
    ) -> Self {
        let (natural_w, natural_h) = natural_size;
        let fit = if natural_w > 0.0 && available_width > 0.0 {
            (available_width / natural_w).min(1.0)
        } else {
            1.0
        };
        let scale = fit * zoom_percent / 100.0;
        Self {
            bounds: ScreenRect::new(origin.0, origin.1, natural_w * scale, natural_h * scale),
            pixel_width: natural_w,
            pixel_height: natural_h,
        }
    }

    fn is_usable(&self) -> bool {
        self.bounds.is_usable()
            && self.pixel_width.is_finite()
            && self.pixel_height.is_finite()
            && self.pixel_width > 0.0
            && self.pixel_height > 0.0
    }

    /// Horizontal and vertical native-pixels-per-displayed-pixel ratios.
    pub fn scale(&self) -> Option<(f32, f32)> {
        if !self.is_usable() {
            return None;
        }
        Some((
            self.pixel_width / self.bounds.width,
            self.pixel_height / self.bounds.height,
        ))
    }

    /// Maps a displayed position into native image-pixel space.
    ///
    /// Returns `None` for a zero-sized or non-finite geometry, or a
    /// non-finite position.
    pub fn to_native(&self, displayed: (f32, f32)) -> Option<Point> {
        let (sx, sy) = self.scale()?;
        let p = Point::new(
            (displayed.0 - self.bounds.left) * sx,
            (displayed.1 - self.bounds.top) * sy,
        );
        p.is_finite().then_some(p)
    }

    /// Like [`SurfaceGeometry::to_native`], but pulls positions outside the
    /// displayed box onto its nearest edge.
    pub fn to_native_clamped(&self, displayed: (f32, f32)) -> Option<Point> {
        let p = self.to_native(displayed)?;
        Some(Point::new(
            p.x.clamp(0.0, self.pixel_width),
            p.y.clamp(0.0, self.pixel_height),
        ))
    }

    /// Maps a native point back into displayed coordinates.
    pub fn to_display(&self, native: Point) -> Option<(f32, f32)> {
        let (sx, sy) = self.scale()?;
        Some((
            self.bounds.left + native.x / sx,
            self.bounds.top + native.y / sy,
        ))
    }

    /// Displayed pixels per native pixel, averaged over both axes.
    ///
    /// Used to scale native-space stroke widths and radii for display.
    pub fn display_per_native(&self) -> Option<f32> {
        let (sx, sy) = self.scale()?;
        Some(0.5 * (1.0 / sx + 1.0 / sy))
    }
}
