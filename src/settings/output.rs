//! Image, anti-aliasing, trace-depth, background and bucket settings.

use crate::types::Color;
use serde::{Deserialize, Serialize};

/// Pixel reconstruction filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFilter {
    #[default]
    Box,
    Gaussian,
    Mitchell,
    Triangle,
    CatmullRom,
    BlackmanHarris,
    Sinc,
    Lanczos,
}

impl ImageFilter {
    /// All filters, in the order the exporter has always listed them.
    pub const ALL: [ImageFilter; 8] = [
        ImageFilter::Box,
        ImageFilter::Gaussian,
        ImageFilter::Mitchell,
        ImageFilter::Triangle,
        ImageFilter::CatmullRom,
        ImageFilter::BlackmanHarris,
        ImageFilter::Sinc,
        ImageFilter::Lanczos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFilter::Box => "box",
            ImageFilter::Gaussian => "gaussian",
            ImageFilter::Mitchell => "mitchell",
            ImageFilter::Triangle => "triangle",
            ImageFilter::CatmullRom => "catmull-rom",
            ImageFilter::BlackmanHarris => "blackman-harris",
            ImageFilter::Sinc => "sinc",
            ImageFilter::Lanczos => "lanczos",
        }
    }

    /// 1-based position in [`ImageFilter::ALL`].
    pub fn index(&self) -> i64 {
        Self::ALL.iter().position(|f| f == self).map_or(1, |i| i as i64 + 1)
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index - 1).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Tile traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketOrder {
    #[default]
    Hilbert,
    Spiral,
    Column,
    Row,
    Diagonal,
    Random,
}

impl BucketOrder {
    pub const ALL: [BucketOrder; 6] = [
        BucketOrder::Hilbert,
        BucketOrder::Spiral,
        BucketOrder::Column,
        BucketOrder::Row,
        BucketOrder::Diagonal,
        BucketOrder::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketOrder::Hilbert => "hilbert",
            BucketOrder::Spiral => "spiral",
            BucketOrder::Column => "column",
            BucketOrder::Row => "row",
            BucketOrder::Diagonal => "diagonal",
            BucketOrder::Random => "random",
        }
    }

    /// 1-based position in [`BucketOrder::ALL`].
    pub fn index(&self) -> i64 {
        Self::ALL.iter().position(|o| o == self).map_or(1, |i| i as i64 + 1)
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index - 1).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Where the background color comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundSource {
    /// No background block.
    None,
    /// The world's horizon color.
    #[default]
    World,
    /// [`OutputSettings::background_color`].
    Custom,
}

/// Maximum ray depths per bounce type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceDepths {
    pub diff: u32,
    pub refl: u32,
    pub refr: u32,
}

impl Default for TraceDepths {
    fn default() -> Self {
        Self {
            diff: 1,
            refl: 4,
            refr: 4,
        }
    }
}

/// Settings written to the `image`, `trace-depths`, `background` and `bucket`
/// blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub min_aa: i32,
    pub max_aa: i32,
    pub samples: u32,
    pub filter: ImageFilter,
    pub jitter: bool,
    pub depths: TraceDepths,
    pub background: BackgroundSource,
    pub background_color: Color,
    pub bucket_size: u32,
    pub bucket_order: BucketOrder,
    pub reverse_bucket: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            min_aa: 0,
            max_aa: 2,
            samples: 1,
            filter: ImageFilter::Box,
            jitter: false,
            depths: TraceDepths::default(),
            background: BackgroundSource::World,
            background_color: [0.0, 0.0, 0.0],
            bucket_size: 64,
            bucket_order: BucketOrder::Hilbert,
            reverse_bucket: false,
        }
    }
}
