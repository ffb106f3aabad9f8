//! Modifier blocks.

use crate::resolver::{Modifier, ModifierKind};
use crate::types::Scalar;
use std::fmt::{self, Write};

pub fn write_modifiers(out: &mut String, modifiers: &[Modifier]) -> fmt::Result {
    for modifier in modifiers {
        log::info!("Exporting modifier {}", modifier.name);
        write!(out, "\n\nmodifier {{\n\tname {}\n", modifier.name)?;
        match &modifier.kind {
            ModifierKind::Bump { image, scale } => {
                writeln!(out, "\ttype bump")?;
                writeln!(out, "\ttexture \"{}\"", image)?;
                writeln!(out, "\tscale {} \n}}", Scalar(*scale))?;
            }
            ModifierKind::NormalMap { image } => {
                writeln!(out, "\ttype normalmap")?;
                write!(out, "\ttexture \"{}\"\n}}", image)?;
            }
            ModifierKind::Perlin { scale } => {
                write!(out, "\ttype perlin\n\tfunction 0\n\tsize 1\n")?;
                writeln!(out, "\tscale {}\n}}", Scalar(*scale))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_blocks() {
        let modifiers = [
            Modifier {
                name: "bump_wall".to_string(),
                kind: ModifierKind::Bump {
                    image: "wall.png".to_string(),
                    scale: -0.0005,
                },
            },
            Modifier {
                name: "normal_tiles".to_string(),
                kind: ModifierKind::NormalMap {
                    image: "tiles.png".to_string(),
                },
            },
            Modifier {
                name: "perlin_noise".to_string(),
                kind: ModifierKind::Perlin { scale: 0.5 },
            },
        ];
        let mut out = String::new();
        write_modifiers(&mut out, &modifiers).unwrap();
        assert_eq!(
            out,
            "\n\nmodifier {\n\tname bump_wall\n\ttype bump\n\ttexture \"wall.png\"\n\tscale -0.0005 \n}\n\
             \n\nmodifier {\n\tname normal_tiles\n\ttype normalmap\n\ttexture \"tiles.png\"\n}\
             \n\nmodifier {\n\tname perlin_noise\n\ttype perlin\n\tfunction 0\n\tsize 1\n\tscale 0.5\n}\n"
        );
    }
}
