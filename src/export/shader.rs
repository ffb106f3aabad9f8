//! Shader blocks.

use crate::resolver::{Channel, Shader, ShaderKind, DEFAULT_SHADER};
use crate::settings::LightSettings;
use crate::types::{Fixed, Scalar, Scalars, Srgb};
use std::fmt::{self, Write};

/// Write the infinite plane (when enabled), the default shader and every
/// material shader, in that order.
pub fn write_shaders(out: &mut String, shaders: &[Shader], lights: &LightSettings) -> fmt::Result {
    if lights.infinite_plane {
        write!(
            out,
            "\n\nshader {{\n\tname iplane\n\ttype diffuse\n\tdiff {} \n}}",
            Scalars(&lights.plane_color)
        )?;
        write!(
            out,
            "\n\nobject {{\n\tshader iplane\n\ttype plane\n\tp 0 0 0\n\tn 0 0 1\n}}\n"
        )?;
    }

    write!(
        out,
        "\n\nshader {{\n\tname {}\n\ttype diffuse\n\tdiff 1 1 1\n}}",
        DEFAULT_SHADER
    )?;

    for shader in shaders {
        log::info!("Exporting shader {}", shader.name());
        write_shader(out, shader)?;
    }
    Ok(())
}

/// Write one material shader block.
pub fn write_shader(out: &mut String, shader: &Shader) -> fmt::Result {
    write!(out, "\n\nshader {{\n\tname \"{}\"\n", shader.name())?;

    match &shader.kind {
        ShaderKind::Uber {
            diff,
            diff_texture,
            spec,
            spec_texture,
        } => {
            writeln!(out, "\ttype uber")?;
            writeln!(out, "\tdiff {}", Fixed::p3(diff))?;
            match diff_texture {
                Some(texture) => {
                    writeln!(out, "\tdiff.texture \"{}\"", texture.image)?;
                    writeln!(out, "\tdiff.blend {}", Scalar(texture.blend))?;
                }
                None => writeln!(out, "\tdiff.blend 0.0")?,
            }
            writeln!(out, "\tspec {}", Fixed::p3(spec))?;
            match spec_texture {
                Some(texture) => {
                    writeln!(out, "\tspec.texture \"{}\"", texture.image)?;
                    writeln!(out, "\tspec.blend {}", Scalar(texture.blend))?;
                }
                None => writeln!(out, "\tspec.blend 0.0")?,
            }
            write!(out, "\tglossy .1\n\tsamples 4")?;
        }
        ShaderKind::Diffuse { diff } => {
            writeln!(out, "\ttype diffuse")?;
            write_channel(out, "diff", diff)?;
        }
        ShaderKind::Shiny { diff, refl } => {
            writeln!(out, "\ttype shiny")?;
            write_channel(out, "diff", diff)?;
            write!(out, "\n\trefl {}", Fixed::p2(&[*refl]))?;
        }
        ShaderKind::AmbientOcclusion { bright, dark } => {
            writeln!(out, "\ttype amb-occ")?;
            match bright {
                Channel::Color(color) => writeln!(out, "\tbright {}", Fixed::p3(color))?,
                Channel::Texture(image) => writeln!(out, "\ttexture \"{}\"", image)?,
            }
            writeln!(out, "\tdark {}", Fixed::p3(dark))?;
            write!(out, "\tsamples 32\n\tdist 3.0")?;
        }
        ShaderKind::Phong {
            diff,
            spec,
            hardness,
        } => {
            writeln!(out, "\ttype phong")?;
            write_channel(out, "diff", diff)?;
            writeln!(out)?;
            writeln!(out, "\tspec {} {}", Srgb(*spec), hardness)?;
            write!(out, "\tsamples 4")?;
        }
        ShaderKind::Ward { diff, spec } => {
            writeln!(out, "\ttype ward")?;
            write_channel(out, "diff", diff)?;
            writeln!(out)?;
            writeln!(out, "\tspec {}", Srgb(*spec))?;
            write!(out, "\trough .2 .01\n\tsamples 4")?;
        }
        ShaderKind::Mirror { refl } => {
            writeln!(out, "\ttype mirror")?;
            write!(out, "\trefl {}", Srgb(*refl))?;
        }
        ShaderKind::Glass {
            eta,
            color,
            absorption_color,
        } => {
            writeln!(out, "\ttype glass")?;
            writeln!(out, "\teta {}", Scalar(*eta))?;
            writeln!(out, "\tcolor {}", Srgb(*color))?;
            writeln!(out, "\tabsorbtion.distance 5.0")?;
            write!(out, "\tabsorbtion.color {}", Srgb(*absorption_color))?;
        }
        ShaderKind::Constant { color } => {
            writeln!(out, "\ttype constant")?;
            write!(out, "\tcolor {}", Srgb(*color))?;
        }
    }

    write!(out, "\n}}")
}

/// A color channel is written as `<name> <color>`, an image channel as
/// `texture "<file>"`. Neither ends the line.
fn write_channel(out: &mut String, name: &str, channel: &Channel) -> fmt::Result {
    match channel {
        Channel::Color(color) => write!(out, "\t{} {}", name, Srgb(*color)),
        Channel::Texture(image) => write!(out, "\ttexture \"{}\"", image),
    }
}
