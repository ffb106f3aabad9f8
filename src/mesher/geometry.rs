//! Triangle mesh geometry types.

/// How normals are written for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalMode {
    /// Every face is flat: no normals.
    None,
    /// Every face is smooth: one normal per vertex.
    Vertex,
    /// Mixed shading: three normals per triangle.
    FaceVarying,
}

/// Per-mesh normal data matching a [`NormalMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normals {
    None,
    Vertex(Vec<[f32; 3]>),
    /// One entry per triangle, one normal per corner.
    FaceVarying(Vec<[[f32; 3]; 3]>),
}

impl Normals {
    pub fn mode(&self) -> NormalMode {
        match self {
            Normals::None => NormalMode::None,
            Normals::Vertex(_) => NormalMode::Vertex,
            Normals::FaceVarying(_) => NormalMode::FaceVarying,
        }
    }
}

/// A world-space triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub points: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
    pub normals: Normals,
    /// Face-varying UVs, one entry per triangle.
    pub uvs: Option<Vec<[[f32; 2]; 3]>>,
    /// Material index of the face each triangle came from.
    pub face_materials: Vec<usize>,
}

impl TriangleMesh {
    pub fn new(points: Vec<[f32; 3]>) -> Self {
        Self {
            points,
            triangles: Vec::new(),
            normals: Normals::None,
            uvs: None,
            face_materials: Vec::new(),
        }
    }

    /// Add a triangle by vertex indices.
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32, material: usize) {
        self.triangles.push([i0, i1, i2]);
        self.face_materials.push(material);
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Split a polygon corner list into triangles with the fixed 0-1-2 / 0-2-3
/// diagonal. Returns corner positions (not vertex indices).
pub fn triangulate(corners: usize) -> &'static [[usize; 3]] {
    match corners {
        3 => &[[0, 1, 2]],
        4 => &[[0, 1, 2], [0, 2, 3]],
        _ => &[],
    }
}

/// Unit face normal of a planar polygon using Newell's method, which also
/// gives a sensible average for slightly non-planar quads.
pub fn face_normal(corners: &[[f32; 3]]) -> [f32; 3] {
    let mut n = glam::Vec3::ZERO;
    for (i, a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        n.x += (a[1] - b[1]) * (a[2] + b[2]);
        n.y += (a[2] - b[2]) * (a[0] + b[0]);
        n.z += (a[0] - b[0]) * (a[1] + b[1]);
    }
    n.normalize_or_zero().to_array()
}
