//! Mesh, particle and instance resolution.
//!
//! Mesh objects named `meshlight*` become emissive mesh lights. Other meshes
//! become geometry: a particle or hair object when they carry a particle
//! system, a raw point cloud when named `particleob*`, and a triangle mesh
//! otherwise.

use super::shader_resolver::DEFAULT_SHADER;
use crate::error::{ExportError, Result};
use crate::mesher::{Mesher, MesherConfig, TriangleMesh};
use crate::scene::material::slot;
use crate::scene::{EmptyData, MeshData, Object, ObjectData, ParticleData, Scene};
use crate::settings::ExportSettings;
use crate::types::{Color, Transform};
use std::collections::HashMap;

/// Name prefix of meshes exported as mesh lights.
pub const MESHLIGHT_PREFIX: &str = "meshlight";
/// Name prefix of meshes exported as their bare vertices.
pub const PARTICLE_OBJECT_PREFIX: &str = "particleob";

/// Shader and modifier names a piece of geometry references for one of
/// its materials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialBinding {
    pub shader: String,
    pub modifier: Option<String>,
}

impl MaterialBinding {
    /// Binding to the built-in fallback shader.
    pub fn default_shader() -> Self {
        Self {
            shader: DEFAULT_SHADER.to_string(),
            modifier: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryKind {
    TriangleMesh(TriangleMesh),
    /// World-space particle locations.
    Particles(Vec<[f32; 3]>),
    /// Hair strands, each exactly `segments + 1` points long.
    Hair {
        segments: u32,
        strands: Vec<Vec<[f32; 3]>>,
    },
    /// The mesh's own world-space vertices written as particles.
    PointCloud(Vec<[f32; 3]>),
}

/// A geometry object with its material bindings, in mesh material order.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub name: String,
    pub bindings: Vec<MaterialBinding>,
    pub kind: GeometryKind,
}

/// An emissive triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshLight {
    pub name: String,
    /// Emitted color; `None` emits plain white.
    pub emit: Option<Color>,
    pub radiance: f32,
    pub samples: u32,
    pub mesh: TriangleMesh,
}

/// One member of a duplication group, placed with the placeholder's
/// transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub name: String,
    pub geometry: String,
    pub transform: Transform,
    pub bindings: Vec<MaterialBinding>,
}

/// Resolves mesh-carrying and empty objects.
pub struct GeometryResolver<'a> {
    scene: &'a Scene,
    settings: &'a ExportSettings,
    bindings: &'a HashMap<String, MaterialBinding>,
}

impl<'a> GeometryResolver<'a> {
    pub fn new(
        scene: &'a Scene,
        settings: &'a ExportSettings,
        bindings: &'a HashMap<String, MaterialBinding>,
    ) -> Self {
        Self {
            scene,
            settings,
            bindings,
        }
    }

    /// Bindings for every material slot of a mesh.
    pub fn bindings_for(&self, object: &str, mesh: &MeshData) -> Result<Vec<MaterialBinding>> {
        mesh.materials
            .iter()
            .map(|name| {
                let material = self.scene.material(name).ok_or_else(|| {
                    ExportError::InvalidScene(format!(
                        "{} references unknown material {}",
                        object, name
                    ))
                })?;
                Ok(match self.bindings.get(&material.name) {
                    Some(binding) => binding.clone(),
                    None => {
                        log::warn!(
                            "Material {} of {} has no users, using the default shader",
                            name,
                            object
                        );
                        MaterialBinding::default_shader()
                    }
                })
            })
            .collect()
    }

    /// Resolve a mesh light. Empty meshes resolve to nothing.
    pub fn resolve_mesh_light(&self, object: &Object, mesh: &MeshData) -> Result<Option<MeshLight>> {
        if mesh.vertices.is_empty() {
            log::debug!("Skipping empty mesh light {}", object.name);
            return Ok(None);
        }

        let emit = match mesh.materials.first() {
            Some(name) => Some(
                self.scene
                    .material(name)
                    .ok_or_else(|| {
                        ExportError::InvalidScene(format!(
                            "{} references unknown material {}",
                            object.name, name
                        ))
                    })?
                    .color,
            ),
            None => None,
        };

        let mesh = Mesher::new(MesherConfig::positions_only()).mesh(
            &object.name,
            mesh,
            &object.transform(),
        )?;
        log::info!("Resolved mesh light {}", object.name);
        Ok(Some(MeshLight {
            name: object.name.clone(),
            emit,
            radiance: self.settings.lights.meshlight_multiplier,
            samples: self.settings.lights.samples,
            mesh,
        }))
    }

    /// Resolve a mesh or surface into geometry. Empty meshes resolve to
    /// nothing.
    pub fn resolve_geometry(&self, object: &Object, mesh: &MeshData) -> Result<Option<Geometry>> {
        if mesh.vertices.is_empty() {
            log::debug!("Skipping empty mesh {}", object.name);
            return Ok(None);
        }

        let bindings = self.bindings_for(&object.name, mesh)?;
        let transform = object.transform();

        let kind = match particle_geometry(object, mesh) {
            Some(kind) => kind,
            None if object.name.starts_with(PARTICLE_OBJECT_PREFIX) => GeometryKind::PointCloud(
                mesh.vertices.iter().map(|v| transform.point(v.co)).collect(),
            ),
            None => {
                let config = MesherConfig::default().with_uv_repeat(self.uv_repeat(mesh));
                GeometryKind::TriangleMesh(Mesher::new(config).mesh(&object.name, mesh, &transform)?)
            }
        };

        log::info!("Resolved geometry {}", object.name);
        Ok(Some(Geometry {
            name: object.name.clone(),
            bindings,
            kind,
        }))
    }

    /// Expand an empty's duplication group into instances.
    pub fn resolve_instances(&self, object: &Object, empty: &EmptyData) -> Result<Vec<Instance>> {
        let Some(group) = &empty.dupli_group else {
            return Ok(Vec::new());
        };

        let transform = object.transform();
        let mut instances = Vec::with_capacity(group.instances.len());
        for member in &group.instances {
            let Some(member_object) = self.scene.object(&member.object) else {
                log::warn!(
                    "Group {} of {} references unknown object {}, skipping it",
                    group.name,
                    object.name,
                    member.object
                );
                continue;
            };
            let bindings = match member_object.data.mesh() {
                Some(mesh) => self.bindings_for(&member_object.name, mesh)?,
                None => Vec::new(),
            };
            instances.push(Instance {
                name: format!("{}_{}", object.name, member_object.name),
                geometry: member_object.name.clone(),
                transform,
                bindings,
            });
        }

        log::info!(
            "Resolved {} instances of group {} for {}",
            instances.len(),
            group.name,
            object.name
        );
        Ok(instances)
    }

    /// Repeat factors of the first material's diffuse slot texture, if any.
    fn uv_repeat(&self, mesh: &MeshData) -> [f32; 2] {
        mesh.materials
            .first()
            .and_then(|name| self.scene.material(name))
            .and_then(|material| material.slot(slot::DIFFUSE))
            .and_then(|bound| self.scene.texture(&bound.texture))
            .map_or([1.0, 1.0], |texture| texture.repeat)
    }
}

/// Geometry of a mesh's particle system, when it yields one.
fn particle_geometry(object: &Object, mesh: &MeshData) -> Option<GeometryKind> {
    let system = mesh.particles.as_ref()?;
    match &system.data {
        ParticleData::Points(points) => Some(GeometryKind::Particles(points.clone())),
        ParticleData::Strands(strands) if strands.len() > 1 && system.lifetime >= 2 => {
            let length = system.lifetime as usize;
            let strands: Vec<Vec<[f32; 3]>> = strands
                .iter()
                .filter_map(|strand| {
                    let last = *strand.last()?;
                    let mut points: Vec<[f32; 3]> = strand.iter().copied().take(length).collect();
                    points.resize(length, last);
                    Some(points)
                })
                .collect();
            if strands.len() < 2 {
                log::warn!("Hair of {} has fewer than two non-empty strands", object.name);
                return None;
            }
            Some(GeometryKind::Hair {
                segments: system.lifetime - 1,
                strands,
            })
        }
        ParticleData::Strands(_) => {
            log::warn!(
                "Particle system of {} has too few strands or points for hair, exporting the mesh",
                object.name
            );
            None
        }
    }
}

/// Check whether an object is exported as a mesh light.
pub fn is_mesh_light(object: &Object) -> bool {
    matches!(object.data, ObjectData::Mesh(_) | ObjectData::Surface(_))
        && object.name.starts_with(MESHLIGHT_PREFIX)
}
