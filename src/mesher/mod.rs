//! World-space triangle mesh preparation.
//!
//! Converts host mesh data (object-local vertices, triangle and quad faces)
//! into the triangle lists, normals and UVs the geometry blocks are written
//! from.

pub mod geometry;

pub use geometry::{face_normal, triangulate, NormalMode, Normals, TriangleMesh};

use crate::error::{ExportError, Result};
use crate::scene::{Face, MeshData};
use crate::types::Transform;

/// Mesh preparation options.
#[derive(Debug, Clone)]
pub struct MesherConfig {
    /// Compute normals for the mesh.
    pub normals: bool,
    /// Compute face-varying UVs when every face carries them.
    pub uvs: bool,
    /// UV repeat factors applied to every coordinate.
    pub uv_repeat: [f32; 2],
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            normals: true,
            uvs: true,
            uv_repeat: [1.0, 1.0],
        }
    }
}

impl MesherConfig {
    /// Configuration for emissive meshes, which carry points and triangles only.
    pub fn positions_only() -> Self {
        Self {
            normals: false,
            uvs: false,
            ..Default::default()
        }
    }

    pub fn with_uv_repeat(mut self, repeat: [f32; 2]) -> Self {
        self.uv_repeat = repeat;
        self
    }
}

/// Turns [`MeshData`] into [`TriangleMesh`]es.
pub struct Mesher {
    config: MesherConfig,
}

impl Mesher {
    pub fn new(config: MesherConfig) -> Self {
        Self { config }
    }

    /// Triangulate `mesh` and move it to world space with `transform`.
    ///
    /// Faces that are neither triangles nor quads are skipped with a warning;
    /// out-of-range vertex indices and UV lists that do not match the face are
    /// errors.
    pub fn mesh(&self, name: &str, mesh: &MeshData, transform: &Transform) -> Result<TriangleMesh> {
        let points: Vec<[f32; 3]> = mesh.vertices.iter().map(|v| transform.point(v.co)).collect();
        let faces = self.valid_faces(name, mesh)?;

        let mut output = TriangleMesh::new(points);
        for face in &faces {
            for [a, b, c] in triangulate(face.verts.len()) {
                output.add_triangle(face.verts[*a], face.verts[*b], face.verts[*c], face.material);
            }
        }

        if self.config.normals {
            output.normals = self.normals(mesh, &faces, &output.points, transform);
        }
        if self.config.uvs {
            output.uvs = self.uvs(name, &faces);
        }

        log::debug!(
            "Meshed {}: {} points, {} triangles, normals {:?}",
            name,
            output.vertex_count(),
            output.triangle_count(),
            output.normals.mode()
        );
        Ok(output)
    }

    fn valid_faces<'m>(&self, name: &str, mesh: &'m MeshData) -> Result<Vec<&'m Face>> {
        let vertex_count = mesh.vertex_count();
        let mut faces = Vec::with_capacity(mesh.faces.len());
        for (i, face) in mesh.faces.iter().enumerate() {
            if let Some(index) = face.verts.iter().find(|v| **v as usize >= vertex_count) {
                return Err(ExportError::InvalidScene(format!(
                    "face {} of {} references vertex {} of {}",
                    i, name, index, vertex_count
                )));
            }
            if let Some(uv) = &face.uv {
                if uv.len() != face.verts.len() {
                    return Err(ExportError::InvalidScene(format!(
                        "face {} of {} has {} UVs for {} vertices",
                        i,
                        name,
                        uv.len(),
                        face.verts.len()
                    )));
                }
            }
            match face.verts.len() {
                3 | 4 => faces.push(face),
                n => log::warn!("Skipping face {} of {} with {} vertices", i, name, n),
            }
        }
        Ok(faces)
    }

    fn normals(
        &self,
        mesh: &MeshData,
        faces: &[&Face],
        points: &[[f32; 3]],
        transform: &Transform,
    ) -> Normals {
        let all_flat = faces.iter().all(|f| !f.smooth);
        let all_smooth = faces.iter().all(|f| f.smooth);

        if all_flat {
            return Normals::None;
        }

        let vertex_normals: Vec<[f32; 3]> =
            mesh.vertices.iter().map(|v| transform.normal(v.no)).collect();
        if all_smooth {
            return Normals::Vertex(vertex_normals);
        }

        let mut corners = Vec::new();
        for face in faces {
            let flat = if face.smooth {
                None
            } else {
                let world: Vec<[f32; 3]> = face.verts.iter().map(|v| points[*v as usize]).collect();
                Some(face_normal(&world))
            };
            for &tri in triangulate(face.verts.len()) {
                corners.push(tri.map(|corner| match flat {
                    Some(n) => n,
                    None => vertex_normals[face.verts[corner] as usize],
                }));
            }
        }
        Normals::FaceVarying(corners)
    }

    fn uvs(&self, name: &str, faces: &[&Face]) -> Option<Vec<[[f32; 2]; 3]>> {
        let with_uv = faces.iter().filter(|f| f.uv.is_some()).count();
        if with_uv == 0 {
            return None;
        }
        if with_uv != faces.len() {
            log::warn!(
                "Only {} of {} faces of {} have UVs, writing none",
                with_uv,
                faces.len(),
                name
            );
            return None;
        }

        let [tx, ty] = self.config.uv_repeat;
        let mut uvs = Vec::new();
        for face in faces {
            let Some(face_uv) = &face.uv else { continue };
            for &tri in triangulate(face.verts.len()) {
                uvs.push(tri.map(|corner| {
                    let [u, v] = face_uv[corner];
                    [tx * u, ty * v]
                }));
            }
        }
        Some(uvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IDENTITY;

    fn quad_mesh() -> MeshData {
        let mut mesh = MeshData::new();
        mesh.add_vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_vertex([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_vertex([1.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_vertex([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        mesh
    }

    fn mesher() -> Mesher {
        Mesher::new(MesherConfig::default())
    }

    #[test]
    fn test_quad_splits_on_fixed_diagonal() {
        let mut mesh = quad_mesh();
        mesh.add_face(Face::quad(0, 1, 2, 3));
        let out = mesher().mesh("quad", &mesh, &Transform::default()).unwrap();
        assert_eq!(out.triangles, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(out.normals, Normals::None);
        assert_eq!(out.uvs, None);
    }

    #[test]
    fn test_triangle_count_formula() {
        let mut mesh = quad_mesh();
        mesh.add_face(Face::quad(0, 1, 2, 3));
        mesh.add_face(Face::tri(0, 1, 2));
        mesh.add_face(Face::quad(3, 2, 1, 0));
        let out = mesher().mesh("mixed", &mesh, &Transform::default()).unwrap();
        assert_eq!(out.triangle_count(), 2 * 2 + 1);
        assert_eq!(out.face_materials.len(), out.triangle_count());
    }

    #[test]
    fn test_points_are_world_space() {
        let mut mesh = quad_mesh();
        mesh.add_face(Face::quad(0, 1, 2, 3));
        let mut m = IDENTITY;
        m[3] = [10.0, 0.0, -1.0, 1.0];
        let out = mesher().mesh("moved", &mesh, &Transform::from_cols(&m)).unwrap();
        assert_eq!(out.points[0], [10.0, 0.0, -1.0]);
        assert_eq!(out.points[2], [11.0, 1.0, -1.0]);
    }

    #[test]
    fn test_all_smooth_uses_vertex_normals() {
        let mut mesh = quad_mesh();
        mesh.add_face(Face::quad(0, 1, 2, 3).smooth());
        let out = mesher().mesh("smooth", &mesh, &Transform::default()).unwrap();
        match out.normals {
            Normals::Vertex(n) => assert_eq!(n.len(), 4),
            other => panic!("expected vertex normals, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_shading_is_face_varying() {
        let mut mesh = quad_mesh();
        mesh.vertices[2].no = [0.0, 1.0, 0.0];
        mesh.add_face(Face::tri(0, 1, 2).smooth());
        mesh.add_face(Face::quad(0, 1, 2, 3));
        let out = mesher().mesh("mixed", &mesh, &Transform::default()).unwrap();
        let Normals::FaceVarying(corners) = out.normals else {
            panic!("expected face-varying normals");
        };
        assert_eq!(corners.len(), 3);
        // Smooth triangle keeps per-vertex normals.
        assert_eq!(corners[0][2], [0.0, 1.0, 0.0]);
        // Flat quad repeats its face normal on both halves.
        for tri in &corners[1..] {
            assert_eq!(*tri, [[0.0, 0.0, 1.0]; 3]);
        }
    }

    #[test]
    fn test_uvs_scaled_by_repeat() {
        let mut mesh = quad_mesh();
        mesh.add_face(
            Face::quad(0, 1, 2, 3).with_uv(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        );
        let config = MesherConfig::default().with_uv_repeat([2.0, 3.0]);
        let out = Mesher::new(config).mesh("uv", &mesh, &Transform::default()).unwrap();
        let uvs = out.uvs.unwrap();
        assert_eq!(uvs[0], [[0.0, 0.0], [2.0, 0.0], [2.0, 3.0]]);
        assert_eq!(uvs[1], [[0.0, 0.0], [2.0, 3.0], [0.0, 3.0]]);
    }

    #[test]
    fn test_partial_uvs_are_dropped() {
        let mut mesh = quad_mesh();
        mesh.add_face(Face::tri(0, 1, 2).with_uv(vec![[0.0, 0.0]; 3]));
        mesh.add_face(Face::tri(0, 2, 3));
        let out = mesher().mesh("partial", &mesh, &Transform::default()).unwrap();
        assert_eq!(out.uvs, None);
    }

    #[test]
    fn test_bad_faces() {
        let mut mesh = quad_mesh();
        mesh.add_face(Face {
            verts: vec![0, 1, 2, 3, 0],
            smooth: false,
            material: 0,
            uv: None,
        });
        let out = mesher().mesh("ngon", &mesh, &Transform::default()).unwrap();
        assert_eq!(out.triangle_count(), 0);

        mesh.add_face(Face::tri(0, 1, 9));
        assert!(matches!(
            mesher().mesh("broken", &mesh, &Transform::default()),
            Err(ExportError::InvalidScene(_))
        ));

        let mut mesh = quad_mesh();
        mesh.add_face(Face::tri(0, 1, 2).with_uv(vec![[0.0, 0.0]; 2]));
        assert!(mesher().mesh("uv", &mesh, &Transform::default()).is_err());
    }

    #[test]
    fn test_positions_only_config() {
        let mut mesh = quad_mesh();
        mesh.add_face(
            Face::quad(0, 1, 2, 3).smooth().with_uv(vec![[0.0, 0.0]; 4]),
        );
        let out = Mesher::new(MesherConfig::positions_only())
            .mesh("light", &mesh, &Transform::default())
            .unwrap();
        assert_eq!(out.normals, Normals::None);
        assert_eq!(out.uvs, None);
    }
}
