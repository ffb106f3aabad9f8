//! # Sunflow Export
//!
//! A Rust library for exporting 3D scene snapshots to Sunflow scene
//! description (`.sc`) files.
//!
//! ## Overview
//!
//! This library takes a scene snapshot (objects, materials, lamps and a
//! camera, usually loaded from JSON) and a set of export settings, and
//! produces the text the Sunflow renderer parses. Materials are mapped to
//! shaders by their name prefix, lamps to the closest Sunflow light, and
//! meshes to triangle meshes, mesh lights, particles or hair.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sunflow_export::{load_scene, export_scene, ExportSettings};
//!
//! // Load a scene snapshot
//! let scene = load_scene("path/to/scene.json")?;
//!
//! // Export it as a single document
//! let text = export_scene(&scene, &ExportSettings::default())?;
//! ```
//!
//! ## Files and Animation
//!
//! [`export_files`] writes the renderer's file layout: a scene file that
//! includes a separate geometry file, or a build script plus one file per
//! frame when animation is enabled. Any host that can step through frames
//! implements [`SceneHost`]:
//!
//! ```ignore
//! use sunflow_export::{export_files, ExportSettings};
//!
//! let written = export_files(&mut my_host, &settings, "renders/room")?;
//! ```

pub mod error;
pub mod types;
pub mod scene;
pub mod settings;
pub mod resolver;
pub mod mesher;
pub mod export;
pub mod render;

// Re-export main types for convenience
pub use error::{ExportError, Result};
pub use types::{Color, Transform};
pub use scene::{Material, MeshData, Object, ObjectData, Scene, SceneHost, Texture};
pub use settings::{ExportSettings, RendererConfig};
pub use resolver::{resolve_scene, ResolvedObject, ResolvedScene};
pub use mesher::{Mesher, MesherConfig, TriangleMesh};
pub use export::{export_files, export_frame, export_scene, FrameLayout, SceneDocument};
pub use render::RenderCommand;

/// Load a scene snapshot from a JSON file.
pub fn load_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene> {
    scene::loader::load_from_path(path)
}

/// Load a scene snapshot from a JSON string.
pub fn load_scene_from_str(json: &str) -> Result<Scene> {
    scene::loader::load_from_str(json)
}

#[cfg(feature = "wasm")]
pub mod wasm;
