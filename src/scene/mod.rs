//! Immutable snapshot of the host scene graph.
//!
//! The exporter never reads host state directly: the host (or a JSON dump of
//! it) provides a [`Scene`] snapshot, and animation export goes through the
//! [`SceneHost`] trait to step the host's current frame.

pub mod loader;
pub mod material;
pub mod mesh;
pub mod object;
pub mod properties;

pub use material::{Material, MaterialModes, Texture, TextureKind, TextureSlot};
pub use mesh::{Face, MeshData, MeshVertex, ParticleData, ParticleSystem};
pub use object::{
    CameraData, DupliGroup, DupliInstance, EmptyData, LampData, LampKind, Object, ObjectData,
};
pub use properties::{PropertyMap, PropertyValue};

use crate::error::Result;
use crate::types::Color;
use serde::{Deserialize, Serialize};

/// Global render settings of the host scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
    /// Render size percentage applied to `width` and `height`.
    #[serde(default = "default_percent")]
    pub size_percent: u32,
    #[serde(default = "default_frame")]
    pub start_frame: i32,
    #[serde(default = "default_frame")]
    pub end_frame: i32,
    #[serde(default = "default_frame")]
    pub current_frame: i32,
}

fn default_percent() -> u32 {
    100
}

fn default_frame() -> i32 {
    1
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            size_percent: default_percent(),
            start_frame: default_frame(),
            end_frame: default_frame(),
            current_frame: default_frame(),
        }
    }

    /// Output resolution after applying the size percentage.
    pub fn resolution(&self) -> (u32, u32) {
        let scale = |v: u32| (v as u64 * self.size_percent as u64 / 100) as u32;
        (scale(self.width), scale(self.height))
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// World (environment) settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    #[serde(default)]
    pub horizon_color: Color,
}

/// A complete scene snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub render: RenderContext,
    /// Active scene layers.
    #[serde(default = "default_layers")]
    pub layers: Vec<u32>,
    #[serde(default)]
    pub world: World,
    /// Name of the active camera object.
    #[serde(default)]
    pub camera: Option<String>,
    #[serde(default)]
    pub objects: Vec<Object>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    /// Scene-level custom properties.
    #[serde(default)]
    pub properties: PropertyMap,
}

fn default_layers() -> Vec<u32> {
    vec![1]
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: default_layers(),
            ..Default::default()
        }
    }

    /// Get an object by name.
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Get a mutable object by name.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Get a material by name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Get a texture by name.
    pub fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.iter().find(|t| t.name == name)
    }

    /// Get the active camera object.
    pub fn camera_object(&self) -> Option<&Object> {
        self.camera.as_deref().and_then(|name| self.object(name))
    }

    /// Iterate over objects that take part in the export.
    pub fn exported_objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter().filter(|o| o.is_exported(&self.layers))
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn add_texture(&mut self, texture: Texture) {
        self.textures.push(texture);
    }
}

/// A host that can be stepped through frames and snapshotted.
pub trait SceneHost {
    /// The host's current frame.
    fn current_frame(&self) -> i32;

    /// Move the host to `frame`, re-evaluating animated data.
    fn set_current_frame(&mut self, frame: i32) -> Result<()>;

    /// Take a snapshot of the scene at the current frame.
    fn snapshot(&self) -> Result<Scene>;
}

/// A static snapshot acts as a host whose data is the same at every frame.
impl SceneHost for Scene {
    fn current_frame(&self) -> i32 {
        self.render.current_frame
    }

    fn set_current_frame(&mut self, frame: i32) -> Result<()> {
        self.render.current_frame = frame;
        Ok(())
    }

    fn snapshot(&self) -> Result<Scene> {
        Ok(self.clone())
    }
}
