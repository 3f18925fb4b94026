//! Center-based rectangles in device pixels.
//!
//! Hosts report shape bounds in points (1/72 inch) and layer bounds as a
//! top-left origin plus size. Everything here converts into the one form the
//! fit solver consumes: a center point and a size, in device pixels.

/// Units per inch of the point coordinate space vector shapes are measured in.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Axis-aligned rectangle. `x` and `y` are the CENTER, not the top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rect from its center and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rect from its top-left corner and size.
    pub fn from_origin(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            x: left + width / 2.0,
            y: top + height / 2.0,
            width,
            height,
        }
    }

    /// Create a rect from its four edges.
    ///
    /// Edges given in the wrong order produce a negative size, which
    /// [`is_valid`](Self::is_valid) rejects.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::from_origin(left, top, right - left, bottom - top)
    }

    /// Convert a rect measured in points into device pixels at `dpi`.
    ///
    /// Every field scales by `dpi / 72`, so the center moves with the size.
    pub fn from_points(rect: Rect, dpi: f64) -> Self {
        let k = dpi / POINTS_PER_INCH;
        Self {
            x: rect.x * k,
            y: rect.y * k,
            width: rect.width * k,
            height: rect.height * k,
        }
    }

    /// Whether both dimensions are strictly positive and finite, and the
    /// center is finite.
    ///
    /// NaN fails this check, so a rect built from garbage never reaches a division.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.x.is_finite()
            && self.y.is_finite()
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Width over height. Meaningless for invalid rects.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}
