//! Aspect-preserving fit of a source box into a reference rectangle.
//!
//! The fit scales uniformly by whichever axis ratio is smaller, so the scaled
//! source never exceeds the target on either axis, and moves the transform
//! center onto the target's center.
//!
//! # Example
//!
//! ```
//! use maskfit::{Axis, Rect, fit};
//!
//! let f = fit(
//!     Rect::new(0.0, 0.0, 100.0, 50.0),
//!     Rect::new(10.0, 20.0, 200.0, 200.0),
//! )
//! .unwrap();
//!
//! // 200/100 = 2.0 beats 200/50 = 4.0 → width binds.
//! assert_eq!(f.scale, 2.0);
//! assert_eq!(f.binding_axis(), Axis::Horizontal);
//! assert_eq!((f.center_x, f.center_y), (10.0, 20.0));
//! ```

use core::fmt;

use num_traits::Float;

use crate::geometry::Rect;
use crate::params::TransformParameters;

/// Which axis limited a fit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The width ratio was smaller (or equal); the fitted width matches the target.
    Horizontal,
    /// The height ratio was smaller; the fitted height matches the target.
    Vertical,
}

/// Result of [`fit`]: a uniform scale and the new transform center.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fit {
    /// Applies to both axes.
    pub scale: f64,
    pub center_x: f64,
    pub center_y: f64,
    ratio_w: f64,
    ratio_h: f64,
}

impl Fit {
    /// Which axis bound the fit.
    pub fn binding_axis(&self) -> Axis {
        if self.ratio_w <= self.ratio_h {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Size of `source` after scaling by this fit.
    pub fn fitted_size(&self, source: Rect) -> (f64, f64) {
        (source.width * self.scale, source.height * self.scale)
    }

    /// Write the fit into a copy of `params`.
    ///
    /// Center and both scales are replaced and the aspect lock is switched on;
    /// rotation, shear and perspective carry over unchanged.
    pub fn apply(&self, params: &TransformParameters) -> TransformParameters {
        params
            .with_center(self.center_x, self.center_y)
            .with_uniform_scale(self.scale)
            .with_keep_aspect_ratio(true)
    }
}

/// Fit `source` inside `target`, preserving aspect ratio, centered on `target`.
///
/// Both rectangles must be in the same unit; convert shape bounds with
/// [`Rect::from_points`] first.
pub fn fit(source: Rect, target: Rect) -> Result<Fit, InvalidGeometry> {
    if !source.is_valid() {
        return Err(InvalidGeometry::Source);
    }
    if !target.is_valid() {
        return Err(InvalidGeometry::Target);
    }

    let ratio_w = target.width / source.width;
    let ratio_h = target.height / source.height;
    Ok(Fit {
        scale: Float::min(ratio_w, ratio_h),
        center_x: target.x,
        center_y: target.y,
        ratio_w,
        ratio_h,
    })
}

/// A rectangle with no usable extent was passed to [`fit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidGeometry {
    /// Source bounds have a zero, negative or non-finite size, or a non-finite center.
    Source,
    /// Target rectangle has a zero, negative or non-finite size, or a non-finite center.
    Target,
}

impl fmt::Display for InvalidGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source bounds have no positive extent"),
            Self::Target => f.write_str("target rectangle has no positive extent"),
        }
    }
}

impl core::error::Error for InvalidGeometry {}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // ── Scale selection ─────────────────────────────────────────────────

    #[test]
    fn wide_source_binds_on_width() {
        let f = fit(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rect::new(10.0, 20.0, 200.0, 200.0),
        )
        .unwrap();
        assert_eq!(f.scale, 2.0);
        assert_eq!(f.center_x, 10.0);
        assert_eq!(f.center_y, 20.0);
        assert_eq!(f.binding_axis(), Axis::Horizontal);
    }

    #[test]
    fn tall_source_binds_on_height() {
        // 500×1000 into 400×300 → 0.8 vs 0.3 → 0.3
        let f = fit(
            Rect::new(0.0, 0.0, 500.0, 1000.0),
            Rect::new(0.0, 0.0, 400.0, 300.0),
        )
        .unwrap();
        assert!((f.scale - 0.3).abs() < EPS);
        assert_eq!(f.binding_axis(), Axis::Vertical);
        let (w, h) = f.fitted_size(Rect::new(0.0, 0.0, 500.0, 1000.0));
        assert!((w - 150.0).abs() < EPS);
        assert!((h - 300.0).abs() < EPS);
    }

    #[test]
    fn same_aspect_fills_exactly() {
        let source = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let f = fit(source, Rect::new(0.0, 0.0, 400.0, 200.0)).unwrap();
        assert_eq!(f.scale, 0.4);
        assert_eq!(f.fitted_size(source), (400.0, 200.0));
        assert_eq!(f.binding_axis(), Axis::Horizontal);
    }

    #[test]
    fn source_center_is_ignored() {
        let a = fit(
            Rect::new(-500.0, 900.0, 100.0, 50.0),
            Rect::new(3.0, 4.0, 50.0, 50.0),
        )
        .unwrap();
        let b = fit(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rect::new(3.0, 4.0, 50.0, 50.0),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    // ── Apply ───────────────────────────────────────────────────────────

    #[test]
    fn apply_replaces_center_and_scale_only() {
        let before = TransformParameters::IDENTITY
            .with_center(1.0, 2.0)
            .with_scale(7.0, 9.0)
            .with_rotation(1.0, 2.0, 3.0)
            .with_shear(0.1, 0.2);
        let f = fit(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rect::new(10.0, 20.0, 200.0, 200.0),
        )
        .unwrap();
        let after = f.apply(&before);
        assert_eq!((after.center_x, after.center_y), (10.0, 20.0));
        assert_eq!((after.scale_x, after.scale_y), (2.0, 2.0));
        assert!(after.keep_aspect_ratio);
        assert_eq!(
            (after.rotation_x, after.rotation_y, after.rotation_z),
            (1.0, 2.0, 3.0)
        );
        assert_eq!((after.shear_x, after.shear_y), (0.1, 0.2));
        // Input untouched.
        assert_eq!(before.scale_x, 7.0);
    }

    // ── Error cases ─────────────────────────────────────────────────────

    #[test]
    fn zero_source_errors() {
        assert_eq!(
            fit(
                Rect::new(0.0, 0.0, 0.0, 50.0),
                Rect::new(0.0, 0.0, 100.0, 100.0)
            ),
            Err(InvalidGeometry::Source)
        );
    }

    #[test]
    fn negative_target_errors() {
        assert_eq!(
            fit(
                Rect::new(0.0, 0.0, 10.0, 50.0),
                Rect::new(0.0, 0.0, 100.0, -1.0)
            ),
            Err(InvalidGeometry::Target)
        );
    }

    #[test]
    fn nan_source_errors() {
        assert_eq!(
            fit(
                Rect::new(0.0, 0.0, f64::NAN, 50.0),
                Rect::new(0.0, 0.0, 100.0, 100.0)
            ),
            Err(InvalidGeometry::Source)
        );
    }

    #[test]
    fn non_finite_center_errors() {
        let ok = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            fit(ok, Rect::new(f64::NAN, 0.0, 10.0, 10.0)),
            Err(InvalidGeometry::Target)
        );
        assert_eq!(
            fit(ok, Rect::new(0.0, f64::INFINITY, 10.0, 10.0)),
            Err(InvalidGeometry::Target)
        );
        assert_eq!(
            fit(Rect::new(f64::NEG_INFINITY, 0.0, 10.0, 10.0), ok),
            Err(InvalidGeometry::Source)
        );
    }

    #[test]
    fn source_checked_before_target() {
        assert_eq!(
            fit(Rect::default(), Rect::default()),
            Err(InvalidGeometry::Source)
        );
    }
}
