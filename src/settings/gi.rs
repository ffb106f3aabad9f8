//! Caustics, global illumination engines and view overrides.

use crate::types::Color;
use serde::{Deserialize, Serialize};

/// Photon map type used for caustic photons.
pub const CAUSTICS_MAP: &str = "kd";
/// Photon map type used for irradiance-cache global photons.
pub const GLOBAL_MAP: &str = "grid";

/// The global illumination engine. At most one engine is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GiEngine {
    #[default]
    None,
    InstantGi,
    IrradianceCache,
    PathTracing,
    AmbientOcclusion,
    FakeAmbient,
}

/// Photon emission parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotonMap {
    pub photons: u32,
    pub estimate: u32,
    pub radius: f32,
}

impl Default for PhotonMap {
    fn default() -> Self {
        Self {
            photons: 1_000_000,
            estimate: 100,
            radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstantGiSettings {
    pub samples: u32,
    pub sets: u32,
    pub bias: f32,
    pub bias_samples: u32,
}

impl Default for InstantGiSettings {
    fn default() -> Self {
        Self {
            samples: 64,
            sets: 1,
            bias: 0.01,
            bias_samples: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrradianceCacheSettings {
    pub samples: u32,
    pub tolerance: f32,
    pub spacing_min: f32,
    pub spacing_max: f32,
    /// Use a global photon map for secondary bounces instead of path tracing.
    pub use_global_photons: bool,
    pub global_photons: PhotonMap,
}

impl Default for IrradianceCacheSettings {
    fn default() -> Self {
        Self {
            samples: 512,
            tolerance: 0.01,
            spacing_min: 0.05,
            spacing_max: 5.0,
            use_global_photons: false,
            global_photons: PhotonMap::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathTracingSettings {
    pub samples: u32,
}

impl Default for PathTracingSettings {
    fn default() -> Self {
        Self { samples: 32 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientOcclusionSettings {
    pub bright: Color,
    pub dark: Color,
    pub samples: u32,
    pub distance: f32,
}

impl Default for AmbientOcclusionSettings {
    fn default() -> Self {
        Self {
            bright: [1.0, 1.0, 1.0],
            dark: [0.0, 0.0, 0.0],
            samples: 32,
            distance: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeAmbientSettings {
    pub sky: Color,
    pub ground: Color,
}

impl Default for FakeAmbientSettings {
    fn default() -> Self {
        Self {
            sky: [1.0, 0.95, 0.65],
            ground: [0.5, 0.8, 1.0],
        }
    }
}

/// Debug shader overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOverrides {
    /// Show only caustic photons.
    pub caustics: bool,
    /// Show only global photons.
    pub globals: bool,
    /// Show only indirect irradiance.
    pub gi: bool,
}

/// Caustics and global illumination settings.
///
/// Parameters of every engine are kept even when another engine is active so
/// that switching engines back and forth does not lose them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GiSettings {
    pub caustics: bool,
    pub caustic_photons: PhotonMap,
    pub engine: GiEngine,
    pub instant_gi: InstantGiSettings,
    pub irradiance_cache: IrradianceCacheSettings,
    pub path_tracing: PathTracingSettings,
    pub ambient_occlusion: AmbientOcclusionSettings,
    pub fake_ambient: FakeAmbientSettings,
    pub view: ViewOverrides,
}

impl GiSettings {
    /// Check whether the irradiance cache is active and uses global photons.
    pub fn uses_global_photons(&self) -> bool {
        self.engine == GiEngine::IrradianceCache && self.irradiance_cache.use_global_photons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_photons_require_irradiance_cache() {
        let mut gi = GiSettings::default();
        gi.irradiance_cache.use_global_photons = true;
        assert!(!gi.uses_global_photons());
        gi.engine = GiEngine::IrradianceCache;
        assert!(gi.uses_global_photons());
    }

    #[test]
    fn test_engine_json_names() {
        let gi: GiSettings = serde_json::from_str(r#"{"engine": "path-tracing"}"#).unwrap();
        assert_eq!(gi.engine, GiEngine::PathTracing);
        assert_eq!(gi.path_tracing.samples, 32);
    }
}
