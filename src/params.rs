//! Transform parameter record and perspective matrix.
//!
//! [`TransformParameters`] is the complete state of one transform mask as the
//! host stores it. It is plain value data: every operation in this crate takes
//! a record by reference and returns a new one.

use num_traits::Float;

/// Full state of one geometric transform.
///
/// Angles are carried in whatever unit the host stores them in; nothing in
/// this crate converts or wraps them.
///
/// # Example
///
/// ```
/// use maskfit::TransformParameters;
///
/// let p = TransformParameters::IDENTITY
///     .with_center(320.0, 240.0)
///     .with_scale(2.0, 4.0)
///     .with_rotation(0.0, 0.0, 30.0);
///
/// assert_eq!(p.scale_y, 4.0);
/// assert!(p.is_affine());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformParameters {
    /// Horizontal center of the transformed content.
    pub center_x: f64,
    /// Vertical center of the transformed content.
    pub center_y: f64,
    /// Horizontal scale factor. `1` leaves the width unchanged; negative mirrors.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Host-side aspect lock. Carried through, never interpreted as geometry.
    pub keep_aspect_ratio: bool,
    /// Tilt about the horizontal axis.
    pub rotation_x: f64,
    /// Tilt about the vertical axis.
    pub rotation_y: f64,
    /// In-plane rotation.
    pub rotation_z: f64,
    /// Horizontal shear factor.
    pub shear_x: f64,
    /// Vertical shear factor.
    pub shear_y: f64,
    /// Flattened perspective component. `None` for a purely affine transform.
    pub perspective: Option<Perspective>,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformParameters {
    /// No translation, unit scale, no rotation or shear, no perspective.
    pub const IDENTITY: Self = Self {
        center_x: 0.0,
        center_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        keep_aspect_ratio: false,
        rotation_x: 0.0,
        rotation_y: 0.0,
        rotation_z: 0.0,
        shear_x: 0.0,
        shear_y: 0.0,
        perspective: None,
    };

    /// Set the transform center.
    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center_x = x;
        self.center_y = y;
        self
    }

    /// Set per-axis scale.
    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    /// Set the same scale on both axes.
    pub fn with_uniform_scale(self, scale: f64) -> Self {
        self.with_scale(scale, scale)
    }

    /// Set all three rotation angles.
    pub fn with_rotation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation_x = x;
        self.rotation_y = y;
        self.rotation_z = z;
        self
    }

    /// Set both shear factors.
    pub fn with_shear(mut self, x: f64, y: f64) -> Self {
        self.shear_x = x;
        self.shear_y = y;
        self
    }

    /// Set the aspect lock flag.
    pub fn with_keep_aspect_ratio(mut self, keep: bool) -> Self {
        self.keep_aspect_ratio = keep;
        self
    }

    /// Set or clear the perspective component.
    pub fn with_perspective(mut self, perspective: Option<Perspective>) -> Self {
        self.perspective = perspective;
        self
    }

    /// Whether the record has no perspective component.
    pub fn is_affine(&self) -> bool {
        self.perspective.is_none()
    }
}

/// Row-major 3×3 projective matrix.
///
/// Maps a point `(x, y)` to `((m11·x + m12·y + m13) / w, (m21·x + m22·y + m23) / w)`
/// with `w = m31·x + m32·y + m33`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perspective {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
}

impl Default for Perspective {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Perspective {
    pub const IDENTITY: Self = Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Build from rows.
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [[m11, m12, m13], [m21, m22, m23], [m31, m32, m33]] = rows;
        Self {
            m11,
            m12,
            m13,
            m21,
            m22,
            m23,
            m31,
            m32,
            m33,
        }
    }

    pub const fn to_rows(self) -> [[f64; 3]; 3] {
        [
            [self.m11, self.m12, self.m13],
            [self.m21, self.m22, self.m23],
            [self.m31, self.m32, self.m33],
        ]
    }

    /// Compose two matrices: apply `self` first, then `next`.
    ///
    /// Equivalent to the matrix product `next · self`.
    pub fn then(self, next: Self) -> Self {
        let a = next.to_rows();
        let b = self.to_rows();
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Self::from_rows(out)
    }

    /// Map a point through the matrix.
    ///
    /// Returns `None` when the point lands on the line at infinity.
    pub fn map_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let w = self.m31 * x + self.m32 * y + self.m33;
        if Float::abs(w) <= f64::EPSILON {
            return None;
        }
        Some((
            (self.m11 * x + self.m12 * y + self.m13) / w,
            (self.m21 * x + self.m22 * y + self.m23) / w,
        ))
    }

    /// Entry-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        let a = self.to_rows();
        let b = other.to_rows();
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(p, q)| Float::abs(p - q) <= eps)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TransformParameters ─────────────────────────────────────────────

    #[test]
    fn default_is_identity() {
        assert_eq!(TransformParameters::default(), TransformParameters::IDENTITY);
        assert!(TransformParameters::IDENTITY.is_affine());
    }

    #[test]
    fn builders_leave_other_fields_alone() {
        let p = TransformParameters::IDENTITY
            .with_center(5.0, 6.0)
            .with_shear(0.25, -0.5)
            .with_keep_aspect_ratio(true);
        assert_eq!((p.center_x, p.center_y), (5.0, 6.0));
        assert_eq!((p.shear_x, p.shear_y), (0.25, -0.5));
        assert!(p.keep_aspect_ratio);
        assert_eq!((p.scale_x, p.scale_y), (1.0, 1.0));
        assert_eq!(p.rotation_z, 0.0);
    }

    #[test]
    fn uniform_scale() {
        let p = TransformParameters::IDENTITY.with_uniform_scale(3.0);
        assert_eq!((p.scale_x, p.scale_y), (3.0, 3.0));
    }

    #[test]
    fn perspective_makes_non_affine() {
        let p = TransformParameters::IDENTITY.with_perspective(Some(Perspective::IDENTITY));
        assert!(!p.is_affine());
        assert!(p.with_perspective(None).is_affine());
    }

    // ── Perspective ─────────────────────────────────────────────────────

    #[test]
    fn rows_round_trip() {
        let rows = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]];
        let m = Perspective::from_rows(rows);
        assert_eq!(m.m12, 2.0);
        assert_eq!(m.m31, 7.0);
        assert_eq!(m.to_rows(), rows);
    }

    #[test]
    fn then_identity_is_noop() {
        let m = Perspective::from_rows([[2.0, 0.5, 3.0], [0.0, 1.5, -4.0], [0.001, 0.0, 1.0]]);
        assert_eq!(m.then(Perspective::IDENTITY), m);
        assert_eq!(Perspective::IDENTITY.then(m), m);
    }

    #[test]
    fn then_applies_self_first() {
        let scale = Perspective::from_rows([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]]);
        let shift = Perspective::from_rows([[1.0, 0.0, 10.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        // scale then shift: (1, 1) → (2, 2) → (12, 2)
        assert_eq!(scale.then(shift).map_point(1.0, 1.0), Some((12.0, 2.0)));
        // shift then scale: (1, 1) → (11, 1) → (22, 2)
        assert_eq!(shift.then(scale).map_point(1.0, 1.0), Some((22.0, 2.0)));
    }

    #[test]
    fn map_point_projective_divide() {
        let m = Perspective::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        assert_eq!(m.map_point(4.0, 6.0), Some((2.0, 3.0)));
    }

    #[test]
    fn map_point_at_infinity() {
        let m = Perspective::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(m.map_point(0.0, 5.0), None);
    }

    #[test]
    fn approx_eq_tolerance() {
        let mut m = Perspective::IDENTITY;
        m.m23 = 1e-9;
        assert!(m.approx_eq(&Perspective::IDENTITY, 1e-6));
        assert!(!m.approx_eq(&Perspective::IDENTITY, 1e-12));
        assert!(!m.is_identity());
    }
}
