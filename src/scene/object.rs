//! Scene objects: meshes, lamps, cameras and instancing empties.

use super::{MeshData, PropertyMap};
use crate::types::{Color, MatrixCols, Transform, IDENTITY};
use serde::{Deserialize, Serialize};

/// A positioned scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    /// World matrix, column-major.
    #[serde(default = "identity")]
    pub matrix: MatrixCols,
    /// Layers the object lives on; the first one decides visibility.
    #[serde(default = "default_layers")]
    pub layers: Vec<u32>,
    #[serde(default = "default_users")]
    pub users: u32,
    #[serde(default)]
    pub properties: PropertyMap,
    pub data: ObjectData,
}

fn identity() -> MatrixCols {
    IDENTITY
}

fn default_layers() -> Vec<u32> {
    vec![1]
}

fn default_users() -> u32 {
    1
}

impl Object {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            matrix: IDENTITY,
            layers: default_layers(),
            users: default_users(),
            properties: PropertyMap::new(),
            data,
        }
    }

    pub fn with_matrix(mut self, matrix: MatrixCols) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_layers(mut self, layers: Vec<u32>) -> Self {
        self.layers = layers;
        self
    }

    pub fn transform(&self) -> Transform {
        Transform::from_cols(&self.matrix)
    }

    /// Check if the object takes part in an export over `active_layers`.
    pub fn is_exported(&self, active_layers: &[u32]) -> bool {
        self.users > 0
            && self
                .layers
                .first()
                .is_some_and(|layer| active_layers.contains(layer))
    }
}

/// Type-specific object data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    Mesh(MeshData),
    /// A curve/NURBS surface, already tessellated by the host.
    Surface(MeshData),
    Lamp(LampData),
    Camera(CameraData),
    Empty(EmptyData),
}

impl ObjectData {
    /// Get the mesh data of mesh and surface objects.
    pub fn mesh(&self) -> Option<&MeshData> {
        match self {
            ObjectData::Mesh(mesh) | ObjectData::Surface(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Lamp type as the host enumerates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LampKind {
    Point,
    Sun,
    Spot,
    Hemi,
    Area,
    /// Any lamp type without a renderer counterpart.
    Unsupported,
}

impl LampKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LampKind::Point => "point",
            LampKind::Sun => "sun",
            LampKind::Spot => "spot",
            LampKind::Hemi => "hemi",
            LampKind::Area => "area",
            LampKind::Unsupported => "unsupported",
        }
    }
}

impl From<String> for LampKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "point" | "lamp" => LampKind::Point,
            "sun" => LampKind::Sun,
            "spot" => LampKind::Spot,
            "hemi" => LampKind::Hemi,
            "area" => LampKind::Area,
            _ => LampKind::Unsupported,
        }
    }
}

impl From<LampKind> for String {
    fn from(kind: LampKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Lamp data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LampData {
    pub kind: LampKind,
    #[serde(default = "white")]
    pub color: Color,
    #[serde(default = "one")]
    pub energy: f32,
    /// Falloff distance.
    #[serde(default = "default_distance")]
    pub distance: f32,
    /// Full spot cone angle in degrees.
    #[serde(default = "default_spot_size")]
    pub spot_size: f32,
    #[serde(default = "one")]
    pub area_size_x: f32,
    /// `None` for square area lamps.
    #[serde(default)]
    pub area_size_y: Option<f32>,
}

fn white() -> Color {
    [1.0, 1.0, 1.0]
}

fn one() -> f32 {
    1.0
}

fn default_distance() -> f32 {
    20.0
}

fn default_spot_size() -> f32 {
    45.0
}

impl LampData {
    pub fn new(kind: LampKind) -> Self {
        Self {
            kind,
            color: white(),
            energy: one(),
            distance: default_distance(),
            spot_size: default_spot_size(),
            area_size_x: one(),
            area_size_y: None,
        }
    }

    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Camera lens data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraData {
    /// Focal length in millimetres.
    #[serde(default = "default_lens")]
    pub lens: f32,
    /// Focus distance used by depth of field.
    #[serde(default)]
    pub dof_distance: f32,
    /// Sensor width in millimetres.
    #[serde(default = "default_sensor")]
    pub sensor_width: f32,
}

fn default_lens() -> f32 {
    35.0
}

fn default_sensor() -> f32 {
    32.0
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            lens: default_lens(),
            dof_distance: 0.0,
            sensor_width: default_sensor(),
        }
    }
}

/// One member of a duplication group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DupliInstance {
    /// Name of the member object.
    pub object: String,
    /// The member's per-instance world matrix.
    #[serde(default = "identity")]
    pub matrix: MatrixCols,
}

/// A duplication group referenced by an empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DupliGroup {
    pub name: String,
    #[serde(default)]
    pub instances: Vec<DupliInstance>,
}

/// Placeholder data of an empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyData {
    #[serde(default)]
    pub dupli_group: Option<DupliGroup>,
}
