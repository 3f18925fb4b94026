//! Named field access on [`TransformParameters`].

use crate::params::{Perspective, TransformParameters};

/// One serializable field of a transform parameter record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CenterX,
    CenterY,
    ScaleX,
    ScaleY,
    /// Stored as `0` or `1`.
    KeepAspectRatio,
    RotationX,
    RotationY,
    RotationZ,
    ShearX,
    ShearY,
    M11,
    M12,
    M13,
    M21,
    M22,
    M23,
    M31,
    M32,
    M33,
}

impl Field {
    /// Every field, in emission order.
    pub const ALL: [Self; 19] = [
        Self::CenterX,
        Self::CenterY,
        Self::ScaleX,
        Self::ScaleY,
        Self::KeepAspectRatio,
        Self::RotationX,
        Self::RotationY,
        Self::RotationZ,
        Self::ShearX,
        Self::ShearY,
        Self::M11,
        Self::M12,
        Self::M13,
        Self::M21,
        Self::M22,
        Self::M23,
        Self::M31,
        Self::M32,
        Self::M33,
    ];

    /// Canonical key name.
    pub const fn key(self) -> &'static str {
        match self {
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
            Self::ScaleX => "scale_x",
            Self::ScaleY => "scale_y",
            Self::KeepAspectRatio => "keep_aspect_ratio",
            Self::RotationX => "rotation_x",
            Self::RotationY => "rotation_y",
            Self::RotationZ => "rotation_z",
            Self::ShearX => "shear_x",
            Self::ShearY => "shear_y",
            Self::M11 => "m11",
            Self::M12 => "m12",
            Self::M13 => "m13",
            Self::M21 => "m21",
            Self::M22 => "m22",
            Self::M23 => "m23",
            Self::M31 => "m31",
            Self::M32 => "m32",
            Self::M33 => "m33",
        }
    }

    /// Look up a field by canonical key. Expects lowercase input.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Whether this is one of the nine perspective matrix entries.
    pub const fn is_perspective(self) -> bool {
        matches!(
            self,
            Self::M11
                | Self::M12
                | Self::M13
                | Self::M21
                | Self::M22
                | Self::M23
                | Self::M31
                | Self::M32
                | Self::M33
        )
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

fn entry(m: &Perspective, field: Field) -> Option<f64> {
    Some(match field {
        Field::M11 => m.m11,
        Field::M12 => m.m12,
        Field::M13 => m.m13,
        Field::M21 => m.m21,
        Field::M22 => m.m22,
        Field::M23 => m.m23,
        Field::M31 => m.m31,
        Field::M32 => m.m32,
        Field::M33 => m.m33,
        _ => return None,
    })
}

fn entry_mut(m: &mut Perspective, field: Field) -> Option<&mut f64> {
    Some(match field {
        Field::M11 => &mut m.m11,
        Field::M12 => &mut m.m12,
        Field::M13 => &mut m.m13,
        Field::M21 => &mut m.m21,
        Field::M22 => &mut m.m22,
        Field::M23 => &mut m.m23,
        Field::M31 => &mut m.m31,
        Field::M32 => &mut m.m32,
        Field::M33 => &mut m.m33,
        _ => return None,
    })
}

impl TransformParameters {
    /// Read a field as a number.
    ///
    /// The aspect lock reads as `0.0` or `1.0`. Matrix entries read as `None`
    /// when the record has no perspective component.
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::CenterX => Some(self.center_x),
            Field::CenterY => Some(self.center_y),
            Field::ScaleX => Some(self.scale_x),
            Field::ScaleY => Some(self.scale_y),
            Field::KeepAspectRatio => Some(if self.keep_aspect_ratio { 1.0 } else { 0.0 }),
            Field::RotationX => Some(self.rotation_x),
            Field::RotationY => Some(self.rotation_y),
            Field::RotationZ => Some(self.rotation_z),
            Field::ShearX => Some(self.shear_x),
            Field::ShearY => Some(self.shear_y),
            _ => self.perspective.as_ref().and_then(|m| entry(m, field)),
        }
    }

    /// Copy of the record with one field replaced.
    ///
    /// Any nonzero value sets the aspect lock. Setting a matrix entry on an
    /// affine record starts from the identity matrix.
    pub fn with_field(mut self, field: Field, value: f64) -> Self {
        match field {
            Field::CenterX => self.center_x = value,
            Field::CenterY => self.center_y = value,
            Field::ScaleX => self.scale_x = value,
            Field::ScaleY => self.scale_y = value,
            Field::KeepAspectRatio => self.keep_aspect_ratio = value != 0.0,
            Field::RotationX => self.rotation_x = value,
            Field::RotationY => self.rotation_y = value,
            Field::RotationZ => self.rotation_z = value,
            Field::ShearX => self.shear_x = value,
            Field::ShearY => self.shear_y = value,
            _ => {
                let m = self.perspective.get_or_insert(Perspective::IDENTITY);
                if let Some(slot) = entry_mut(m, field) {
                    *slot = value;
                }
            }
        }
        self
    }
}
