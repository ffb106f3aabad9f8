//! Scene snapshot loading from JSON files.

use super::Scene;
use crate::error::Result;
use std::path::Path;

/// Load a scene snapshot from a JSON file.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Load a scene snapshot from a JSON string.
pub fn load_from_str(json: &str) -> Result<Scene> {
    let scene: Scene = serde_json::from_str(json)?;
    log::debug!(
        "Loaded scene '{}': {} objects, {} materials, {} textures",
        scene.name,
        scene.objects.len(),
        scene.materials.len(),
        scene.textures.len()
    );
    Ok(scene)
}
