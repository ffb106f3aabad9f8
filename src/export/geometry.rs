//! Object and instance blocks.

use crate::mesher::{Normals, TriangleMesh};
use crate::resolver::{Geometry, GeometryKind, Instance, MaterialBinding, DEFAULT_SHADER};
use crate::types::{Fixed, Scalars};
use std::fmt::{self, Write};

/// Radius of every exported particle.
const PARTICLE_RADIUS: &str = "0.05";
/// Width of every exported hair strand.
const HAIR_WIDTH: &str = ".01";

/// Write the shader and modifier references of an object or instance.
///
/// A single binding is written inline. Several bindings are written as
/// lists indexed by the `face_shaders` entries, with `"None"` standing in
/// for a material without a modifier.
pub fn write_bindings(out: &mut String, bindings: &[MaterialBinding]) -> fmt::Result {
    match bindings {
        [] => writeln!(out, "\tshader {}", DEFAULT_SHADER),
        [binding] => {
            writeln!(out, "\tshader \"{}\"", binding.shader)?;
            if let Some(modifier) = &binding.modifier {
                writeln!(out, "\tmodifier \"{}\"", modifier)?;
            }
            Ok(())
        }
        _ => {
            writeln!(out, "\tshaders {}", bindings.len())?;
            for binding in bindings {
                writeln!(out, "\t\t\"{}\"", binding.shader)?;
            }
            writeln!(out, "\tmodifiers {}", bindings.len())?;
            for binding in bindings {
                writeln!(out, "\t\t\"{}\"", binding.modifier.as_deref().unwrap_or("None"))?;
            }
            Ok(())
        }
    }
}

pub fn write_geometry(out: &mut String, geometry: &Geometry) -> fmt::Result {
    write!(out, "\n\nobject {{\n")?;
    write_bindings(out, &geometry.bindings)?;

    match &geometry.kind {
        GeometryKind::TriangleMesh(mesh) => {
            log::info!("Exporting mesh {}", geometry.name);
            write_mesh(out, &geometry.name, mesh, geometry.bindings.len() > 1)
        }
        GeometryKind::Particles(points) => {
            log::info!("Exporting particles of {}", geometry.name);
            write_particles(out, &geometry.name, points)
        }
        GeometryKind::PointCloud(points) => {
            log::info!("Exporting particle object {}", geometry.name);
            write_particles(out, &geometry.name, points)
        }
        GeometryKind::Hair { segments, strands } => {
            log::info!("Exporting hair object {}", geometry.name);
            writeln!(out, "\ttype hair")?;
            writeln!(out, "\tname \"{}\"", geometry.name)?;
            writeln!(out, "\tsegments {}", segments)?;
            writeln!(out, "\twidth {}", HAIR_WIDTH)?;
            let points: usize = strands.iter().map(Vec::len).sum();
            writeln!(out, "\tpoints {}", points * 3)?;
            for strand in strands {
                let flat: Vec<f32> = strand.iter().flatten().copied().collect();
                writeln!(out, "\t\t{}", Fixed::p6(&flat))?;
            }
            writeln!(out, "}}")
        }
    }
}

fn write_mesh(out: &mut String, name: &str, mesh: &TriangleMesh, face_shaders: bool) -> fmt::Result {
    writeln!(out, "\ttype generic-mesh")?;
    writeln!(out, "\tname \"{}\"", name)?;
    writeln!(out, "\tpoints {}", mesh.vertex_count())?;
    for point in &mesh.points {
        writeln!(out, "\t\t{}", Fixed::p6(point))?;
    }
    writeln!(out, "\ttriangles {}", mesh.triangle_count())?;
    for [a, b, c] in &mesh.triangles {
        writeln!(out, "\t\t{} {} {}", a, b, c)?;
    }

    match &mesh.normals {
        Normals::None => writeln!(out, "\tnormals none")?,
        Normals::Vertex(normals) => {
            writeln!(out, "\tnormals vertex")?;
            for normal in normals {
                writeln!(out, "\t\t{}", Fixed::p6(normal))?;
            }
        }
        Normals::FaceVarying(normals) => {
            writeln!(out, "\tnormals facevarying")?;
            for corners in normals {
                let flat: Vec<f32> = corners.iter().flatten().copied().collect();
                writeln!(out, "\t\t{}", Fixed::p6(&flat))?;
            }
        }
    }

    match &mesh.uvs {
        Some(uvs) => {
            writeln!(out, "\tuvs facevarying")?;
            for corners in uvs {
                let flat: Vec<f32> = corners.iter().flatten().copied().collect();
                writeln!(out, "\t\t{}", Fixed::p6(&flat))?;
            }
        }
        None => writeln!(out, "\tuvs none")?,
    }

    if face_shaders {
        writeln!(out, "\tface_shaders")?;
        for material in &mesh.face_materials {
            writeln!(out, "\t\t{}", material)?;
        }
    }
    writeln!(out, "}}")
}

fn write_particles(out: &mut String, name: &str, points: &[[f32; 3]]) -> fmt::Result {
    writeln!(out, "\ttype particles")?;
    writeln!(out, "\tname \"{}\"", name)?;
    writeln!(out, "\tpoints {}", points.len())?;
    for point in points {
        writeln!(out, "\t\t{}", Fixed::p6(point))?;
    }
    writeln!(out, "\tradius {}\n}}", PARTICLE_RADIUS)
}

pub fn write_instances(out: &mut String, instances: &[Instance]) -> fmt::Result {
    for instance in instances {
        log::info!("Exporting instance {}", instance.name);
        write!(out, "\n\ninstance {{\n")?;
        writeln!(out, "\tname {} ", instance.name)?;
        writeln!(out, "\tgeometry {} ", instance.geometry)?;
        writeln!(
            out,
            "\ttransform col {} ",
            Scalars(&instance.transform.to_cols_array())
        )?;
        write_bindings(out, &instance.bindings)?;
        writeln!(out, "}}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Transform;

    fn binding(shader: &str, modifier: Option<&str>) -> MaterialBinding {
        MaterialBinding {
            shader: shader.to_string(),
            modifier: modifier.map(str::to_string),
        }
    }

    fn quad() -> TriangleMesh {
        let mut mesh = TriangleMesh::new(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        mesh.add_triangle(0, 1, 2, 0);
        mesh.add_triangle(0, 2, 3, 1);
        mesh
    }

    fn geometry(kind: GeometryKind, bindings: Vec<MaterialBinding>) -> String {
        let mut out = String::new();
        write_geometry(
            &mut out,
            &Geometry {
                name: "Cube".to_string(),
                bindings,
                kind,
            },
        )
        .unwrap();
        out
    }

    #[test]
    fn test_binding_forms() {
        let mut out = String::new();
        write_bindings(&mut out, &[]).unwrap();
        assert_eq!(out, "\tshader def\n");

        let mut out = String::new();
        write_bindings(&mut out, &[binding("red.shader", Some("bump_wall"))]).unwrap();
        assert_eq!(out, "\tshader \"red.shader\"\n\tmodifier \"bump_wall\"\n");

        let mut out = String::new();
        write_bindings(
            &mut out,
            &[binding("red.shader", None), binding("blue.shader", Some("perlin_a"))],
        )
        .unwrap();
        assert_eq!(
            out,
            "\tshaders 2\n\t\t\"red.shader\"\n\t\t\"blue.shader\"\n\
             \tmodifiers 2\n\t\t\"None\"\n\t\t\"perlin_a\"\n"
        );
    }

    #[test]
    fn test_flat_mesh_block() {
        let out = geometry(
            GeometryKind::TriangleMesh(quad()),
            vec![binding("red.shader", None)],
        );
        assert_eq!(
            out,
            "\n\nobject {\n\tshader \"red.shader\"\n\ttype generic-mesh\n\tname \"Cube\"\n\
             \tpoints 4\n\t\t0.000000 0.000000 0.000000\n\t\t1.000000 0.000000 0.000000\n\
             \t\t1.000000 1.000000 0.000000\n\t\t0.000000 1.000000 0.000000\n\
             \ttriangles 2\n\t\t0 1 2\n\t\t0 2 3\n\tnormals none\n\tuvs none\n}\n"
        );
    }

    #[test]
    fn test_smooth_mesh_with_uvs() {
        let mut mesh = quad();
        mesh.normals = Normals::Vertex(vec![[0.0, 0.0, 1.0]; 4]);
        mesh.uvs = Some(vec![[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]; 2]);
        let out = geometry(GeometryKind::TriangleMesh(mesh), vec![]);
        assert!(out.contains(
            "\tnormals vertex\n\t\t0.000000 0.000000 1.000000\n\t\t0.000000 0.000000 1.000000\n"
        ));
        assert!(out.contains(
            "\tuvs facevarying\n\t\t0.000000 0.000000 1.000000 0.000000 1.000000 1.000000\n"
        ));
        assert!(!out.contains("face_shaders"));
    }

    #[test]
    fn test_facevarying_normals_and_face_shaders() {
        let mut mesh = quad();
        mesh.normals = Normals::FaceVarying(vec![[[0.0, 0.0, 1.0]; 3]; 2]);
        let out = geometry(
            GeometryKind::TriangleMesh(mesh),
            vec![binding("red.shader", None), binding("blue.shader", None)],
        );
        assert!(out.contains(
            "\tnormals facevarying\n\t\t0.000000 0.000000 1.000000 0.000000 0.000000 1.000000 \
             0.000000 0.000000 1.000000\n"
        ));
        assert!(out.ends_with("\tuvs none\n\tface_shaders\n\t\t0\n\t\t1\n}\n"));
    }

    #[test]
    fn test_particles_block() {
        let out = geometry(
            GeometryKind::Particles(vec![[1.0, 2.0, 3.0]]),
            vec![],
        );
        assert_eq!(
            out,
            "\n\nobject {\n\tshader def\n\ttype particles\n\tname \"Cube\"\n\tpoints 1\n\
             \t\t1.000000 2.000000 3.000000\n\tradius 0.05\n}\n"
        );
    }

    #[test]
    fn test_hair_block() {
        let strand = vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let out = geometry(
            GeometryKind::Hair {
                segments: 1,
                strands: vec![strand.clone(), strand],
            },
            vec![],
        );
        assert!(out.contains("\ttype hair\n\tname \"Cube\"\n\tsegments 1\n\twidth .01\n\tpoints 12\n"));
        assert!(out.ends_with(
            "\t\t0.000000 0.000000 0.000000 0.000000 0.000000 1.000000\n\
             \t\t0.000000 0.000000 0.000000 0.000000 0.000000 1.000000\n}\n"
        ));
    }

    #[test]
    fn test_instance_block() {
        let instance = Instance {
            name: "Group_Tree".to_string(),
            geometry: "Tree".to_string(),
            transform: Transform::default(),
            bindings: vec![binding("bark.shader", None)],
        };
        let mut out = String::new();
        write_instances(&mut out, &[instance]).unwrap();
        assert_eq!(
            out,
            "\n\ninstance {\n\tname Group_Tree \n\tgeometry Tree \n\
             \ttransform col 1.0 0.0 0.0 0.0 0.0 1.0 0.0 0.0 0.0 0.0 1.0 0.0 0.0 0.0 0.0 1.0 \n\
             \tshader \"bark.shader\"\n}\n"
        );
    }
}
