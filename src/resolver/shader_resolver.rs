//! Material to shader classification.
//!
//! The shader family is chosen by material name prefix (`sfdif`, `sfshi`,
//! ...). An image in the diffuse slot replaces the base color and restricts
//! the family to the ones that accept a texture.

use super::bound_texture;
use crate::error::Result;
use crate::scene::material::slot;
use crate::scene::{Material, Scene, TextureSlot};
use crate::types::Color;

/// Name of the fallback shader every export declares.
pub const DEFAULT_SHADER: &str = "def";

/// Shader family selected by a material name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderFamily {
    Uber,
    Diffuse,
    Shiny,
    AmbientOcclusion,
    Phong,
    Ward,
    Mirror,
    Glass,
    Constant,
}

impl ShaderFamily {
    const PREFIXES: [(&'static str, ShaderFamily); 9] = [
        ("sfube", ShaderFamily::Uber),
        ("sfdif", ShaderFamily::Diffuse),
        ("sfshi", ShaderFamily::Shiny),
        ("sfamb", ShaderFamily::AmbientOcclusion),
        ("sfpho", ShaderFamily::Phong),
        ("sfwar", ShaderFamily::Ward),
        ("sfmir", ShaderFamily::Mirror),
        ("sfgla", ShaderFamily::Glass),
        ("sfcon", ShaderFamily::Constant),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, family)| *family)
    }
}

/// A color channel fed either by a color or by an image file.
#[derive(Debug, Clone, PartialEq)]
pub enum Channel {
    Color(Color),
    Texture(String),
}

/// An image blended over a base color.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendedTexture {
    pub image: String,
    pub blend: f32,
}

/// What a shader block contains.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderKind {
    Uber {
        diff: Color,
        diff_texture: Option<BlendedTexture>,
        spec: Color,
        spec_texture: Option<BlendedTexture>,
    },
    Diffuse {
        diff: Channel,
    },
    Shiny {
        diff: Channel,
        refl: f32,
    },
    AmbientOcclusion {
        bright: Channel,
        dark: Color,
    },
    Phong {
        diff: Channel,
        spec: Color,
        hardness: u32,
    },
    Ward {
        diff: Channel,
        spec: Color,
    },
    Mirror {
        refl: Color,
    },
    Glass {
        eta: f32,
        color: Color,
        absorption_color: Color,
    },
    Constant {
        color: Color,
    },
}

/// A shader declared for one material.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    pub material: String,
    pub kind: ShaderKind,
}

impl Shader {
    /// The shader name other blocks reference.
    pub fn name(&self) -> String {
        shader_name(&self.material)
    }
}

/// Shader name declared for a material.
pub fn shader_name(material: &str) -> String {
    format!("{}.shader", material)
}

/// Resolves materials to shaders.
pub struct ShaderResolver<'a> {
    scene: &'a Scene,
}

impl<'a> ShaderResolver<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Resolve a material's shader. Materials without users have none.
    pub fn resolve(&self, material: &Material) -> Result<Option<Shader>> {
        if material.users == 0 {
            log::debug!("Skipping unused material {}", material.name);
            return Ok(None);
        }

        let family = ShaderFamily::from_name(&material.name);
        let kind = if family == Some(ShaderFamily::Uber) {
            self.uber(material)?
        } else {
            let diffuse = bound_texture(self.scene, material, slot::DIFFUSE)?
                .filter(|(_, texture)| texture.is_image());
            match diffuse {
                Some((_, texture)) => match texture.image_file() {
                    Some(image) => textured(material, family, image.to_string()),
                    None => {
                        log::warn!(
                            "Material {} has an image texture with no image, using a white diffuse shader",
                            material.name
                        );
                        ShaderKind::Diffuse {
                            diff: Channel::Color([1.0, 1.0, 1.0]),
                        }
                    }
                },
                None => untextured(material, family),
            }
        };

        Ok(Some(Shader {
            material: material.name.clone(),
            kind,
        }))
    }

    fn uber(&self, material: &Material) -> Result<ShaderKind> {
        let diff_texture = self
            .slot_image(material, slot::DIFFUSE)?
            .map(|(image, slot)| BlendedTexture {
                image,
                blend: slot.color_factor,
            });
        let spec_texture = self
            .slot_image(material, slot::SPECULAR)?
            .map(|(image, slot)| BlendedTexture {
                image,
                blend: slot.var_factor * 0.1,
            });

        Ok(ShaderKind::Uber {
            diff: material.color,
            diff_texture,
            spec: material.spec_color,
            spec_texture,
        })
    }

    fn slot_image<'m>(
        &'m self,
        material: &'m Material,
        index: usize,
    ) -> Result<Option<(String, &'m TextureSlot)>> {
        Ok(bound_texture(self.scene, material, index)?
            .and_then(|(slot, texture)| texture.image_file().map(|image| (image.to_string(), slot))))
    }
}

fn textured(material: &Material, family: Option<ShaderFamily>, image: String) -> ShaderKind {
    let diff = Channel::Texture(image);
    match family {
        Some(ShaderFamily::AmbientOcclusion) => ShaderKind::AmbientOcclusion {
            bright: diff,
            dark: material.spec_color,
        },
        Some(ShaderFamily::Phong) => ShaderKind::Phong {
            diff,
            spec: material.spec_color,
            hardness: material.hardness,
        },
        Some(ShaderFamily::Ward) => ShaderKind::Ward {
            diff,
            spec: material.spec_color,
        },
        Some(ShaderFamily::Shiny) if material.modes.ray_mirror => ShaderKind::Shiny {
            diff,
            refl: material.ray_mirror,
        },
        _ => ShaderKind::Diffuse { diff },
    }
}

fn untextured(material: &Material, family: Option<ShaderFamily>) -> ShaderKind {
    let color = material.color;
    match family {
        Some(ShaderFamily::Shiny) if material.modes.ray_mirror => ShaderKind::Shiny {
            diff: Channel::Color(color),
            refl: material.ray_mirror,
        },
        Some(ShaderFamily::AmbientOcclusion) => ShaderKind::AmbientOcclusion {
            bright: Channel::Color(color),
            dark: material.spec_color,
        },
        Some(ShaderFamily::Phong) => ShaderKind::Phong {
            diff: Channel::Color(color),
            spec: material.spec_color,
            hardness: material.hardness,
        },
        Some(ShaderFamily::Ward) => ShaderKind::Ward {
            diff: Channel::Color(color),
            spec: material.spec_color,
        },
        Some(ShaderFamily::Mirror) if material.modes.ray_mirror => {
            ShaderKind::Mirror { refl: color }
        }
        Some(ShaderFamily::Glass) if material.modes.ray_transparency => ShaderKind::Glass {
            eta: material.ior,
            color,
            absorption_color: material.spec_color,
        },
        Some(ShaderFamily::Constant) => ShaderKind::Constant { color },
        _ => ShaderKind::Diffuse {
            diff: Channel::Color(color),
        },
    }
}
