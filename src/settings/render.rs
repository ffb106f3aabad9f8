//! Renderer invocation options.

use serde::{Deserialize, Serialize};

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Tga,
    Hdr,
    Exr,
    Igi,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Png,
        ImageFormat::Tga,
        ImageFormat::Hdr,
        ImageFormat::Exr,
        ImageFormat::Igi,
    ];

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Tga => "tga",
            ImageFormat::Hdr => "hdr",
            ImageFormat::Exr => "exr",
            ImageFormat::Igi => "igi",
        }
    }

    pub fn index(&self) -> i64 {
        Self::ALL.iter().position(|f| f == self).map_or(1, |i| i as i64 + 1)
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index - 1).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Quick preview override passed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickOption {
    #[default]
    None,
    Uvs,
    Normals,
    Id,
    Prims,
    Gray,
    Wire,
}

impl QuickOption {
    pub const ALL: [QuickOption; 7] = [
        QuickOption::None,
        QuickOption::Uvs,
        QuickOption::Normals,
        QuickOption::Id,
        QuickOption::Prims,
        QuickOption::Gray,
        QuickOption::Wire,
    ];

    /// Command-line flags, each followed by a space.
    pub fn flags(&self) -> &'static str {
        match self {
            QuickOption::None => "",
            QuickOption::Uvs => "-quick_uvs ",
            QuickOption::Normals => "-quick_normals ",
            QuickOption::Id => "-quick_id ",
            QuickOption::Prims => "-quick_prims ",
            QuickOption::Gray => "-quick_gray ",
            QuickOption::Wire => "-quick_wire -aa 2 3 -filter mitchell ",
        }
    }

    pub fn index(&self) -> i64 {
        Self::ALL.iter().position(|q| q == self).map_or(1, |i| i as i64 + 1)
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index - 1).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub format: ImageFormat,
    pub quick: QuickOption,
    pub quick_ambocc: bool,
    pub quick_ambocc_distance: f32,
    pub nogui: bool,
    pub smallmesh: bool,
    pub nogi: bool,
    pub nocaustics: bool,
    pub ipr: bool,
    /// Export and render the scene's whole frame range.
    pub animation: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            quick: QuickOption::None,
            quick_ambocc: false,
            quick_ambocc_distance: 0.5,
            nogui: false,
            smallmesh: false,
            nogi: false,
            nocaustics: false,
            ipr: false,
            animation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_option_round_trips_index() {
        for option in QuickOption::ALL {
            assert_eq!(QuickOption::from_index(option.index()), Some(option));
        }
        assert_eq!(QuickOption::Wire.flags(), "-quick_wire -aa 2 3 -filter mitchell ");
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ImageFormat::from_index(3).unwrap().extension(), "hdr");
    }
}
