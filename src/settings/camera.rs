//! Camera lens settings.

use serde::{Deserialize, Serialize};

/// Camera projection. Exactly one kind is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraKind {
    #[default]
    Pinhole,
    /// Depth of field.
    Thinlens,
    Spherical,
    Fisheye,
}

impl CameraKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraKind::Pinhole => "pinhole",
            CameraKind::Thinlens => "thinlens",
            CameraKind::Spherical => "spherical",
            CameraKind::Fisheye => "fisheye",
        }
    }

    /// Pick a kind from independent toggles, highest priority first:
    /// depth of field, spherical, fisheye.
    pub fn from_flags(dof: bool, spherical: bool, fisheye: bool) -> Self {
        if dof {
            CameraKind::Thinlens
        } else if spherical {
            CameraKind::Spherical
        } else if fisheye {
            CameraKind::Fisheye
        } else {
            CameraKind::Pinhole
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub kind: CameraKind,
    /// Aperture radius for depth of field.
    pub dof_radius: f32,
    /// Aperture blade count; 0 gives a round aperture.
    pub lens_sides: u32,
    pub lens_rotation: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            kind: CameraKind::Pinhole,
            dof_radius: 1.0,
            lens_sides: 6,
            lens_rotation: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_priority() {
        assert_eq!(CameraKind::from_flags(true, true, true), CameraKind::Thinlens);
        assert_eq!(CameraKind::from_flags(false, true, true), CameraKind::Spherical);
        assert_eq!(CameraKind::from_flags(false, false, true), CameraKind::Fisheye);
        assert_eq!(CameraKind::from_flags(false, false, false), CameraKind::Pinhole);
    }
}
