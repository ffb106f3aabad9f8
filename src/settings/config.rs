//! Renderer installation config file.
//!
//! The file holds four plain lines, without escaping:
//!
//! ```text
//! <sunflow install dir>
//! <java heap size in MB>
//! <render threads>
//! <java install dir>
//! ```
//!
//! Both directories are used as raw prefixes, so they normally end with a
//! path separator (or are empty to rely on `PATH`).

use crate::error::{ExportError, Result};
use std::fmt;
use std::path::Path;

/// Conventional name of the config file.
pub const CONFIG_FILE_NAME: &str = "path2sf.cfg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    pub sunflow_path: String,
    pub memory_mb: u32,
    pub threads: u32,
    pub java_path: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            sunflow_path: String::new(),
            memory_mb: 1024,
            threads: 0,
            java_path: String::new(),
        }
    }
}

impl RendererConfig {
    /// Parse the four-line config text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
        let mut next = |what: &str| {
            lines
                .next()
                .map(str::to_string)
                .ok_or_else(|| ExportError::Config(format!("missing {} line", what)))
        };

        let sunflow_path = next("sunflow path")?;
        let memory = next("memory")?;
        let threads = next("threads")?;
        let java_path = next("java path")?;

        Ok(Self {
            sunflow_path,
            memory_mb: parse_number(&memory, "memory")?,
            threads: parse_number(&threads, "threads")?,
            java_path,
        })
    }

    /// Read the config file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExportError::NotConfigured(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Write the config file to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }
}

fn parse_number(value: &str, what: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| ExportError::Config(format!("{} is not a number: '{}'", what, value)))
}

impl fmt::Display for RendererConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sunflow_path)?;
        writeln!(f, "{}", self.memory_mb)?;
        writeln!(f, "{}", self.threads)?;
        write!(f, "{}", self.java_path)
    }
}
