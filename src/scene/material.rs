//! Materials, texture slots and textures as the host stores them.

use crate::types::Color;
use serde::{Deserialize, Serialize};

/// Number of texture channels a material exposes to the exporter.
pub const TEXTURE_SLOTS: usize = 4;

/// Channel assignments, by slot index.
pub mod slot {
    /// Diffuse color / image.
    pub const DIFFUSE: usize = 0;
    /// Bump or normal map.
    pub const BUMP: usize = 1;
    /// Specular image (uber shaders).
    pub const SPECULAR: usize = 2;
    /// Procedural noise.
    pub const PROCEDURAL: usize = 3;
}

/// Ray-tracing mode flags of a material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialModes {
    #[serde(default)]
    pub ray_mirror: bool,
    #[serde(default)]
    pub ray_transparency: bool,
}

/// A host material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Reference count; unreferenced materials are not exported.
    #[serde(default = "default_users")]
    pub users: u32,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default = "default_color")]
    pub spec_color: Color,
    /// Specular hardness (phong exponent).
    #[serde(default = "default_hardness")]
    pub hardness: u32,
    /// Mirror reflection amount, 0..1.
    #[serde(default)]
    pub ray_mirror: f32,
    /// Index of refraction.
    #[serde(default = "default_ior")]
    pub ior: f32,
    #[serde(default)]
    pub modes: MaterialModes,
    /// Texture channels; missing trailing slots count as empty.
    #[serde(default)]
    pub textures: Vec<Option<TextureSlot>>,
}

fn default_users() -> u32 {
    1
}

fn default_color() -> Color {
    [0.8, 0.8, 0.8]
}

fn default_hardness() -> u32 {
    50
}

fn default_ior() -> f32 {
    1.0
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: default_users(),
            color: default_color(),
            spec_color: [1.0, 1.0, 1.0],
            hardness: default_hardness(),
            ray_mirror: 0.0,
            ior: default_ior(),
            modes: MaterialModes::default(),
            textures: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_spec_color(mut self, color: Color) -> Self {
        self.spec_color = color;
        self
    }

    pub fn with_modes(mut self, modes: MaterialModes) -> Self {
        self.modes = modes;
        self
    }

    /// Bind a texture slot, growing the slot list as needed.
    pub fn with_slot(mut self, index: usize, slot: TextureSlot) -> Self {
        if self.textures.len() <= index {
            self.textures.resize(index + 1, None);
        }
        self.textures[index] = Some(slot);
        self
    }

    /// Get the texture slot at `index`, if bound.
    pub fn slot(&self, index: usize) -> Option<&TextureSlot> {
        self.textures.get(index).and_then(|s| s.as_ref())
    }
}

/// A texture bound to a material channel, with its blend factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSlot {
    /// Name of the texture in [`Scene::textures`](super::Scene::textures).
    pub texture: String,
    /// Color blend factor.
    #[serde(default = "one")]
    pub color_factor: f32,
    /// Value blend factor (specular intensity for image slots).
    #[serde(default = "one")]
    pub var_factor: f32,
    /// Normal perturbation factor.
    #[serde(default = "half")]
    pub normal_factor: f32,
    /// Normal map-to direction, `1.0` or `-1.0`.
    #[serde(default = "one")]
    pub normal_direction: f32,
}

fn one() -> f32 {
    1.0
}

fn half() -> f32 {
    0.5
}

impl TextureSlot {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            color_factor: one(),
            var_factor: one(),
            normal_factor: half(),
            normal_direction: one(),
        }
    }
}

/// What a texture samples from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextureKind {
    /// An image texture; `image` is its file name, or `None` when no image
    /// has been assigned yet.
    Image {
        #[serde(default)]
        image: Option<String>,
    },
    /// Any procedural texture (clouds, noise, ...).
    Procedural {
        #[serde(default)]
        kind: String,
    },
}

/// A host texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    #[serde(default = "default_users")]
    pub users: u32,
    pub kind: TextureKind,
    /// UV repeat factors.
    #[serde(default = "default_repeat")]
    pub repeat: [f32; 2],
}

fn default_repeat() -> [f32; 2] {
    [1.0, 1.0]
}

impl Texture {
    pub fn image(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: default_users(),
            kind: TextureKind::Image {
                image: Some(file.into()),
            },
            repeat: default_repeat(),
        }
    }

    pub fn procedural(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: default_users(),
            kind: TextureKind::Procedural { kind: kind.into() },
            repeat: default_repeat(),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, TextureKind::Image { .. })
    }

    /// The image file name, if this is an image texture with an image.
    pub fn image_file(&self) -> Option<&str> {
        match &self.kind {
            TextureKind::Image { image } => image.as_deref(),
            TextureKind::Procedural { .. } => None,
        }
    }
}
