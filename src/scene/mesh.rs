//! Mesh topology and particle data as the host evaluates it.

use serde::{Deserialize, Serialize};

/// A mesh vertex in object-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshVertex {
    pub co: [f32; 3],
    #[serde(default = "default_normal")]
    pub no: [f32; 3],
}

fn default_normal() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}

impl MeshVertex {
    pub fn new(co: [f32; 3], no: [f32; 3]) -> Self {
        Self { co, no }
    }
}

/// A triangle or quad face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Vertex indices, in winding order.
    pub verts: Vec<u32>,
    #[serde(default)]
    pub smooth: bool,
    /// Index into [`MeshData::materials`].
    #[serde(default)]
    pub material: usize,
    /// Per-corner UV coordinates, one per vertex.
    #[serde(default)]
    pub uv: Option<Vec<[f32; 2]>>,
}

impl Face {
    pub fn tri(a: u32, b: u32, c: u32) -> Self {
        Self {
            verts: vec![a, b, c],
            smooth: false,
            material: 0,
            uv: None,
        }
    }

    pub fn quad(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self {
            verts: vec![a, b, c, d],
            smooth: false,
            material: 0,
            uv: None,
        }
    }

    pub fn smooth(mut self) -> Self {
        self.smooth = true;
        self
    }

    pub fn with_material(mut self, material: usize) -> Self {
        self.material = material;
        self
    }

    pub fn with_uv(mut self, uv: Vec<[f32; 2]>) -> Self {
        self.uv = Some(uv);
        self
    }
}

/// Particle data yielded by a particle system for the exported frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleData {
    /// One location per particle.
    Points(Vec<[f32; 3]>),
    /// One polyline per particle (hair and static strand systems).
    Strands(Vec<Vec<[f32; 3]>>),
}

/// A particle system bound to a mesh object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSystem {
    /// Particle lifetime in frames; strand systems use it as the number of
    /// points per strand.
    pub lifetime: u32,
    pub data: ParticleData,
}

/// Geometry of a mesh or surface object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    #[serde(default)]
    pub vertices: Vec<MeshVertex>,
    #[serde(default)]
    pub faces: Vec<Face>,
    /// Material names, indexed by [`Face::material`].
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub particles: Option<ParticleSystem>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, co: [f32; 3], no: [f32; 3]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::new(co, no));
        index
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn with_material(mut self, name: impl Into<String>) -> Self {
        self.materials.push(name.into());
        self
    }

    pub fn with_particles(mut self, particles: ParticleSystem) -> Self {
        self.particles = Some(particles);
        self
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
