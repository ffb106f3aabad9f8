//! Camera block.

use crate::resolver::Camera;
use crate::settings::CameraKind;
use crate::types::{Fixed, Scalar};
use std::fmt::{self, Write};

pub fn write_camera(out: &mut String, camera: &Camera) -> fmt::Result {
    log::info!("Exporting camera {}", camera.name);
    write!(out, "\n\ncamera {{\n")?;
    writeln!(out, "\ttype   {}", camera.kind.as_str())?;
    writeln!(out, "\teye    {}", Fixed::p6(&camera.eye))?;
    writeln!(out, "\ttarget {}", Fixed::p6(&camera.target))?;
    writeln!(out, "\tup     {}", Fixed::p6(&camera.up))?;

    match camera.kind {
        CameraKind::Pinhole | CameraKind::Thinlens => {
            writeln!(out, "\tfov    {} ", Scalar(camera.fov))?;
            writeln!(out, "\taspect {} ", Scalar(camera.aspect))?;
        }
        CameraKind::Spherical | CameraKind::Fisheye => {}
    }
    if let Some(lens) = &camera.lens {
        writeln!(out, "\tfdist {} ", Scalar(lens.focus_distance))?;
        writeln!(out, "\tlensr {} ", Scalar(lens.radius))?;
        writeln!(out, "\tsides {} ", lens.sides)?;
        writeln!(out, "\trotation {} ", Scalar(lens.rotation))?;
    }
    write!(out, "}}")
}
