//! Light blocks: lamps, mesh lights and the image based light.

use crate::resolver::{Light, LightKind, MeshLight};
use crate::settings::LightSettings;
use crate::types::{Fixed, Scalar, Srgb};
use std::fmt::{self, Write};

pub fn write_light(out: &mut String, light: &Light) -> fmt::Result {
    log::info!("Exporting light {}", light.name);
    match &light.kind {
        LightKind::Point {
            color,
            power,
            position,
        } => {
            write!(out, "\n\nlight {{\n\ttype point\n")?;
            writeln!(out, "\tcolor {}", Srgb(*color))?;
            writeln!(out, "\tpower {}", Scalar(*power))?;
            writeln!(out, "\tp {}", Fixed::p6(position))?;
        }
        LightKind::SunSky {
            direction,
            turbidity,
            samples,
        } => {
            write!(out, "\nlight {{\n\ttype sunsky\n\tup 0 0 1\n\teast 0 1 0\n")?;
            writeln!(out, "\tsundir {}", Fixed::p6(direction))?;
            writeln!(out, "\tturbidity {}", Scalar(*turbidity))?;
            writeln!(out, "\tsamples {}", samples)?;
        }
        LightKind::Directional {
            source,
            target,
            radius,
            color,
        } => {
            write!(out, "\n\nlight {{\n\ttype directional\n")?;
            writeln!(out, "\tsource {}", Fixed::p6(source))?;
            writeln!(out, "\ttarget {}", Fixed::p6(target))?;
            writeln!(out, "\tradius {}", Scalar(*radius))?;
            writeln!(out, "\temit {}", Srgb(*color))?;
        }
        LightKind::Spherical {
            color,
            radiance,
            center,
            radius,
            samples,
        } => {
            write!(out, "\n\nlight {{\n\ttype spherical\n")?;
            writeln!(out, "\tcolor {}", Srgb(*color))?;
            writeln!(out, "\tradiance {}", Scalar(*radiance))?;
            writeln!(out, "\tcenter {}", Fixed::p6(center))?;
            writeln!(out, "\tradius {}", Scalar(*radius))?;
            writeln!(out, "\tsamples {}", samples)?;
        }
    }
    write!(out, "}}")
}

pub fn write_mesh_light(out: &mut String, light: &MeshLight) -> fmt::Result {
    log::info!("Exporting mesh light {}", light.name);
    write!(out, "\n\nlight {{\n\ttype meshlight\n\tname \"{}\"\n", light.name)?;
    match &light.emit {
        Some(color) => writeln!(out, "\temit {}", Srgb(*color))?,
        None => writeln!(out, "\temit 1 1 1")?,
    }
    writeln!(out, "\tradiance {}", Scalar(light.radiance))?;
    writeln!(out, "\tsamples {}", light.samples)?;

    let mesh = &light.mesh;
    writeln!(out, "\tpoints {}", mesh.vertex_count())?;
    for point in &mesh.points {
        writeln!(out, "\t\t{}", Fixed::p6(point))?;
    }
    writeln!(out, "\ttriangles {}", mesh.triangle_count())?;
    for [a, b, c] in &mesh.triangles {
        writeln!(out, "\t\t{} {} {}", a, b, c)?;
    }
    write!(out, "}}")
}

/// Write the image based light block. `lock false` turns importance
/// sampling on.
pub fn write_ibl(out: &mut String, image: &str, lights: &LightSettings) -> fmt::Result {
    log::info!("Exporting image based light from {}", image);
    write!(out, "\n\nlight {{\n\ttype ibl\n")?;
    writeln!(out, "\timage \"{}\"", image)?;
    write!(out, "\tcenter 1 0 0\n\tup 0 0 1\n")?;
    writeln!(out, "\tlock {}", !lights.ibl_importance_sampling)?;
    writeln!(out, "\tsamples {}", lights.ibl_samples)?;
    write!(out, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::TriangleMesh;

    #[test]
    fn test_point_light_block() {
        let light = Light {
            name: "Lamp".to_string(),
            kind: LightKind::Point {
                color: [1.0, 1.0, 1.0],
                power: 200.0,
                position: [1.0, 2.0, 3.0],
            },
        };
        let mut out = String::new();
        write_light(&mut out, &light).unwrap();
        assert_eq!(
            out,
            "\n\nlight {\n\ttype point\n\tcolor { \"sRGB nonlinear\" 1.000 1.000 1.000 }\n\
             \tpower 200.0\n\tp 1.000000 2.000000 3.000000\n}"
        );
    }

    #[test]
    fn test_sunsky_block() {
        let light = Light {
            name: "Sun".to_string(),
            kind: LightKind::SunSky {
                direction: [0.0, 0.0, 1.0],
                turbidity: 6.0,
                samples: 128,
            },
        };
        let mut out = String::new();
        write_light(&mut out, &light).unwrap();
        assert_eq!(
            out,
            "\nlight {\n\ttype sunsky\n\tup 0 0 1\n\teast 0 1 0\n\
             \tsundir 0.000000 0.000000 1.000000\n\tturbidity 6.0\n\tsamples 128\n}"
        );
    }

    #[test]
    fn test_quad_mesh_light() {
        let mut mesh = TriangleMesh::new(vec![
            [-1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, -1.0, 0.0],
            [-1.0, -1.0, 0.0],
        ]);
        mesh.add_triangle(0, 1, 2, 0);
        mesh.add_triangle(0, 2, 3, 0);
        let light = MeshLight {
            name: "Area".to_string(),
            emit: None,
            radiance: 100.0,
            samples: 16,
            mesh,
        };

        let mut out = String::new();
        write_mesh_light(&mut out, &light).unwrap();
        assert!(out.starts_with(
            "\n\nlight {\n\ttype meshlight\n\tname \"Area\"\n\temit 1 1 1\n\tradiance 100.0\n\tsamples 16\n"
        ));
        assert!(out.contains("\tpoints 4\n\t\t-1.000000 1.000000 0.000000\n"));
        assert!(out.ends_with("\ttriangles 2\n\t\t0 1 2\n\t\t0 2 3\n}"));
    }

    #[test]
    fn test_ibl_lock_inverts_importance_sampling() {
        let mut lights = LightSettings::default();
        let mut out = String::new();
        write_ibl(&mut out, "sky.hdr", &lights).unwrap();
        assert!(out.contains("\timage \"sky.hdr\"\n\tcenter 1 0 0\n\tup 0 0 1\n\tlock true\n\tsamples 16\n}"));

        lights.ibl_importance_sampling = true;
        let mut out = String::new();
        write_ibl(&mut out, "sky.hdr", &lights).unwrap();
        assert!(out.contains("\tlock false\n"));
    }
}
