//! Bump, normal map and procedural noise modifiers.

use super::bound_texture;
use crate::error::Result;
use crate::scene::material::slot;
use crate::scene::{Material, Scene};
use std::collections::HashSet;

/// Scale applied to bump heights.
const BUMP_SCALE: f32 = -0.001;

#[derive(Debug, Clone, PartialEq)]
pub enum ModifierKind {
    Bump { image: String, scale: f32 },
    NormalMap { image: String },
    Perlin { scale: f32 },
}

/// A modifier declaration, named after its texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub name: String,
    pub kind: ModifierKind,
}

/// Resolves the modifier slots of materials.
pub struct ModifierResolver<'a> {
    scene: &'a Scene,
}

impl<'a> ModifierResolver<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Modifiers a material declares, bump slot first. The first entry is
    /// the one the material's geometry references.
    pub fn resolve(&self, material: &Material) -> Result<Vec<Modifier>> {
        let mut modifiers = Vec::new();

        if let Some((texture_slot, texture)) = bound_texture(self.scene, material, slot::BUMP)? {
            let name = &texture.name;
            let is_bump = name.starts_with("bump");
            if (is_bump || name.starts_with("normal")) && texture.is_image() {
                match texture.image_file() {
                    Some(image) => {
                        let image = image.to_string();
                        let kind = if is_bump {
                            ModifierKind::Bump {
                                image,
                                scale: texture_slot.normal_factor
                                    * texture_slot.normal_direction
                                    * BUMP_SCALE,
                            }
                        } else {
                            ModifierKind::NormalMap { image }
                        };
                        modifiers.push(Modifier {
                            name: name.clone(),
                            kind,
                        });
                    }
                    None => log::warn!(
                        "Texture {} of material {} has no image, skipping its modifier",
                        name,
                        material.name
                    ),
                }
            }
        }

        if let Some((texture_slot, texture)) =
            bound_texture(self.scene, material, slot::PROCEDURAL)?
        {
            if texture.name.starts_with("perlin") && !texture.is_image() {
                modifiers.push(Modifier {
                    name: texture.name.clone(),
                    kind: ModifierKind::Perlin {
                        scale: texture_slot.normal_factor,
                    },
                });
            }
        }

        Ok(modifiers)
    }
}

/// Modifier declarations in first-seen order, at most one per name.
#[derive(Debug, Default)]
pub struct ModifierSet {
    seen: HashSet<String>,
    modifiers: Vec<Modifier>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a modifier unless one with the same name was already added.
    pub fn insert(&mut self, modifier: Modifier) -> bool {
        if !self.seen.insert(modifier.name.clone()) {
            return false;
        }
        self.modifiers.push(modifier);
        true
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn into_vec(self) -> Vec<Modifier> {
        self.modifiers
    }
}
