//! Inverse of a transform parameter record.
//!
//! Each field is inverted on its own:
//!
//! | field | inverse |
//! |---|---|
//! | `scale_x`, `scale_y` | `1 / s`, or `1` when `s == 0` |
//! | `rotation_*`, `shear_*` | negated |
//! | `center_x`, `center_y` | unchanged |
//! | `keep_aspect_ratio` | unchanged |
//! | `perspective` | 3×3 inverse, or dropped when `|det| <= 1e-6` |
//!
//! The center is kept as-is rather than solved for the origin displacement
//! that scale and rotation introduce. Callers that stack a mask with its
//! inverse get the content back only up to that offset.
//!
//! A nonzero scale too small to have a finite reciprocal (subnormal, below
//! about `5.6e-309`) inverts to `±inf`, and inverting that gives `0`, so
//! double inversion restores only scales whose reciprocal is finite.

use num_traits::Float;

use crate::params::{Perspective, TransformParameters};

/// Perspective matrices with `|det|` at or below this are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-6;

/// The transform that undoes `params`. See the module docs for the per-field rules.
pub fn invert(params: &TransformParameters) -> TransformParameters {
    TransformParameters {
        center_x: params.center_x,
        center_y: params.center_y,
        scale_x: invert_scale(params.scale_x),
        scale_y: invert_scale(params.scale_y),
        keep_aspect_ratio: params.keep_aspect_ratio,
        rotation_x: -params.rotation_x,
        rotation_y: -params.rotation_y,
        rotation_z: -params.rotation_z,
        shear_x: -params.shear_x,
        shear_y: -params.shear_y,
        perspective: params.perspective.and_then(|m| m.inverse()),
    }
}

/// Zero scale collapses the content; there is nothing to un-collapse, so
/// identity stands in.
fn invert_scale(s: f64) -> f64 {
    if s == 0.0 { 1.0 } else { 1.0 / s }
}

impl TransformParameters {
    /// Same as [`invert`].
    pub fn inverse(&self) -> Self {
        invert(self)
    }
}

impl Perspective {
    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        self.m11 * (self.m22 * self.m33 - self.m23 * self.m32)
            - self.m12 * (self.m21 * self.m33 - self.m23 * self.m31)
            + self.m13 * (self.m21 * self.m32 - self.m22 * self.m31)
    }

    /// Matrix inverse via the adjugate, or `None` when `|det| <= SINGULAR_EPSILON`.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        // NaN entries fail the comparison and land here too.
        if !(Float::abs(det) > SINGULAR_EPSILON) {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Self {
            m11: (self.m22 * self.m33 - self.m23 * self.m32) * inv_det,
            m12: (self.m13 * self.m32 - self.m12 * self.m33) * inv_det,
            m13: (self.m12 * self.m23 - self.m13 * self.m22) * inv_det,
            m21: (self.m23 * self.m31 - self.m21 * self.m33) * inv_det,
            m22: (self.m11 * self.m33 - self.m13 * self.m31) * inv_det,
            m23: (self.m13 * self.m21 - self.m11 * self.m23) * inv_det,
            m31: (self.m21 * self.m32 - self.m22 * self.m31) * inv_det,
            m32: (self.m12 * self.m31 - self.m11 * self.m32) * inv_det,
            m33: (self.m11 * self.m22 - self.m12 * self.m21) * inv_det,
        })
    }
}
