//! Exporter settings.
//!
//! [`ExportSettings`] gathers every option of the exporter in one value. The
//! mutually exclusive choices (camera projection, GI engine) are enums, so
//! only the cross-group dependencies need [`ExportSettings::validate`].

pub mod camera;
pub mod config;
pub mod gi;
pub mod lights;
pub mod output;
pub mod persist;
pub mod render;

pub use camera::{CameraKind, CameraSettings};
pub use config::RendererConfig;
pub use gi::{GiEngine, GiSettings, PhotonMap};
pub use lights::LightSettings;
pub use output::{BackgroundSource, BucketOrder, ImageFilter, OutputSettings, TraceDepths};
pub use render::{ImageFormat, QuickOption, RenderSettings};

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All exporter settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output: OutputSettings,
    pub gi: GiSettings,
    pub lights: LightSettings,
    pub camera: CameraSettings,
    pub render: RenderSettings,
}

impl ExportSettings {
    /// Check the dependency rules between options.
    pub fn validate(&self) -> Result<()> {
        let gi = &self.gi;
        if gi.irradiance_cache.use_global_photons && gi.engine != GiEngine::IrradianceCache {
            return Err(ExportError::InvalidSettings(
                "global photons require the irradiance cache engine".to_string(),
            ));
        }
        if gi.view.caustics && !gi.caustics {
            return Err(ExportError::InvalidSettings(
                "caustics override requires caustics".to_string(),
            ));
        }
        if gi.view.globals && !gi.uses_global_photons() {
            return Err(ExportError::InvalidSettings(
                "globals override requires global photons".to_string(),
            ));
        }
        if gi.view.gi && gi.engine == GiEngine::None {
            return Err(ExportError::InvalidSettings(
                "GI override requires a GI engine".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: ExportSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
