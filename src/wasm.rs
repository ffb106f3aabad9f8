//! WASM bindings for sunflow-export.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use crate::settings::persist;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Result of exporting a scene.
#[wasm_bindgen]
pub struct ExportResult {
    text: String,
    shader_count: usize,
    object_count: usize,
}

#[wasm_bindgen]
impl ExportResult {
    /// The scene description text.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn shader_count(&self) -> usize {
        self.shader_count
    }

    #[wasm_bindgen(getter)]
    pub fn object_count(&self) -> usize {
        self.object_count
    }
}

/// Export a scene snapshot given as JSON.
///
/// Settings are read from `settings_json` when given, otherwise from the
/// scene's persisted properties.
#[wasm_bindgen]
pub fn export_scene_json(
    scene_json: &str,
    settings_json: Option<String>,
) -> Result<ExportResult, JsError> {
    let scene = crate::load_scene_from_str(scene_json)
        .map_err(|e| JsError::new(&format!("Invalid scene: {}", e)))?;

    let settings = match settings_json {
        Some(json) => crate::ExportSettings::from_json(&json)
            .map_err(|e| JsError::new(&format!("Invalid settings: {}", e)))?,
        None => persist::load_from_scene(&scene),
    };

    let resolved =
        crate::resolve_scene(&scene, &settings).map_err(|e| JsError::new(&e.to_string()))?;
    let document = crate::export_frame(&resolved, &settings, crate::FrameLayout::Inline)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(ExportResult {
        text: document.main,
        shader_count: resolved.shaders.len(),
        object_count: resolved.objects.len(),
    })
}

/// Default export settings as JSON, for building a settings form.
#[wasm_bindgen]
pub fn default_settings_json() -> Result<String, JsError> {
    serde_json::to_string_pretty(&crate::ExportSettings::default())
        .map_err(|e| JsError::new(&e.to_string()))
}
