//! Lamp conversion, image based lighting, sun and infinite plane settings.

use crate::types::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    /// Multiplier applied to lamp energy.
    pub lamp_multiplier: f32,
    /// Multiplier applied to mesh light and area lamp radiance.
    pub meshlight_multiplier: f32,
    /// Samples for spherical lights and mesh lights.
    pub samples: u32,
    /// Emit an `ibl` light from the `ibllight` texture.
    pub ibl: bool,
    pub ibl_importance_sampling: bool,
    pub ibl_samples: u32,
    /// Export lamp types the renderer lacks as point lights.
    pub convert_unsupported: bool,
    /// Export sun lamps as a sun-sky light.
    pub import_sun: bool,
    pub sun_turbidity: f32,
    pub sun_samples: u32,
    /// Add a ground plane at z = 0.
    pub infinite_plane: bool,
    pub plane_color: Color,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            lamp_multiplier: 100.0,
            meshlight_multiplier: 100.0,
            samples: 16,
            ibl: false,
            ibl_importance_sampling: false,
            ibl_samples: 16,
            convert_unsupported: false,
            import_sun: false,
            sun_turbidity: 6.0,
            sun_samples: 128,
            infinite_plane: false,
            plane_color: [1.0, 1.0, 1.0],
        }
    }
}
