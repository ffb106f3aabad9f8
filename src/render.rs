//! Renderer command line.
//!
//! The exporter does not render. It builds the shell command that starts
//! the renderer on an exported scene, from the installation config and the
//! render options.

use crate::error::Result;
use crate::export::files::destination;
use crate::settings::{ImageFormat, RendererConfig, RenderSettings};
use crate::types::Scalar;
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// A ready-to-run renderer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand {
    line: String,
}

impl RenderCommand {
    /// Build the command for `scene_path`. `frames` is the inclusive frame
    /// range rendered in animation mode.
    pub fn new<P: AsRef<Path>>(
        config: &RendererConfig,
        render: &RenderSettings,
        scene_path: P,
        frames: (i32, i32),
    ) -> Self {
        let dest = destination(scene_path).display().to_string();
        let ext = render.format.extension();
        let exec = format!(
            "{}java -server -Xmx{}M -jar \"{}sunflow.jar\"",
            config.java_path, config.memory_mb, config.sunflow_path
        );

        let line = if render.animation {
            format!(
                "{} -anim {} {} -o \"{}.#.{}\" \"{}.java\"",
                exec, frames.0, frames.1, dest, ext, dest
            )
        } else {
            format!(
                "{} {}-o \"{}.{}\" \"{}.sc\"",
                exec,
                options(config, render),
                dest,
                ext,
                dest
            )
        };
        Self { line }
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Run the command through the platform shell and wait for it.
    pub fn run(&self) -> Result<ExitStatus> {
        log::info!("Running {}", self.line);
        let status = if cfg!(windows) {
            Command::new("cmd").args(["/C", &self.line]).status()?
        } else {
            Command::new("sh").args(["-c", &self.line]).status()?
        };
        Ok(status)
    }
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Single frame options, each followed by a space.
fn options(config: &RendererConfig, render: &RenderSettings) -> String {
    let mut options = String::new();
    // Only the png writer can show the preview window.
    if render.nogui || render.format != ImageFormat::Png {
        options.push_str("-nogui ");
    }
    if config.threads > 0 {
        options.push_str(&format!("-threads {} ", config.threads));
    }
    if render.smallmesh {
        options.push_str("-smallmesh ");
    }
    if render.nogi {
        options.push_str("-nogi ");
    }
    if render.nocaustics {
        options.push_str("-nocaustics ");
    }
    options.push_str(render.quick.flags());
    if render.quick_ambocc {
        options.push_str(&format!("-quick_ambocc {} ", Scalar(render.quick_ambocc_distance)));
    }
    if render.ipr {
        options.push_str("-ipr ");
    }
    options
}
