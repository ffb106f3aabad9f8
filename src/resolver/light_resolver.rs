//! Lamp to light conversion.
//!
//! Every lamp becomes exactly one light. Spots are approximated by a
//! cylindrical directional light whose radius covers the cone at the lamp's
//! falloff distance, and area lamps become a two-triangle mesh light.

use super::geometry_resolver::MeshLight;
use super::ResolvedObject;
use crate::mesher::TriangleMesh;
use crate::scene::{LampData, LampKind, Object};
use crate::settings::LightSettings;
use crate::types::{Color, Transform};
use std::f32::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Point {
        color: Color,
        power: f32,
        position: [f32; 3],
    },
    SunSky {
        direction: [f32; 3],
        turbidity: f32,
        samples: u32,
    },
    Directional {
        source: [f32; 3],
        target: [f32; 3],
        radius: f32,
        color: Color,
    },
    Spherical {
        color: Color,
        radiance: f32,
        center: [f32; 3],
        radius: f32,
        samples: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
}

/// Converts lamps with the light settings of one export.
pub struct LightResolver<'a> {
    settings: &'a LightSettings,
}

impl<'a> LightResolver<'a> {
    pub fn new(settings: &'a LightSettings) -> Self {
        Self { settings }
    }

    /// Resolve a lamp object. Unsupported lamps resolve to nothing unless
    /// conversion to point lights is enabled.
    pub fn resolve(&self, object: &Object, lamp: &LampData) -> Option<ResolvedObject> {
        let transform = object.transform();
        let origin = transform.point([0.0, 0.0, 0.0]);
        let power = lamp.energy * self.settings.lamp_multiplier;
        let point = || LightKind::Point {
            color: lamp.color,
            power,
            position: origin,
        };

        let kind = match lamp.kind {
            LampKind::Point => point(),
            LampKind::Sun if self.settings.import_sun => LightKind::SunSky {
                direction: transform.inverse_z_row(),
                turbidity: self.settings.sun_turbidity,
                samples: self.settings.sun_samples,
            },
            LampKind::Sun => point(),
            LampKind::Spot => {
                let angle = lamp.spot_size * PI / 360.0;
                LightKind::Directional {
                    source: origin,
                    target: transform.point([0.0, 0.0, -1.0]),
                    radius: lamp.distance / angle.cos() * angle.sin(),
                    color: lamp.color,
                }
            }
            LampKind::Hemi => LightKind::Spherical {
                color: lamp.color,
                radiance: power,
                center: origin,
                radius: lamp.distance,
                samples: self.settings.samples,
            },
            LampKind::Area => {
                return Some(ResolvedObject::MeshLight(
                    self.area(object, lamp, &transform),
                ))
            }
            LampKind::Unsupported if self.settings.convert_unsupported => {
                log::info!("Converting unsupported lamp {} to a point light", object.name);
                point()
            }
            LampKind::Unsupported => {
                log::warn!("Skipping unsupported lamp {}", object.name);
                return None;
            }
        };

        Some(ResolvedObject::Light(Light {
            name: object.name.clone(),
            kind,
        }))
    }

    fn area(&self, object: &Object, lamp: &LampData, transform: &Transform) -> MeshLight {
        let x = lamp.area_size_x * 0.5;
        let y = lamp.area_size_y.map_or(x, |size| size * 0.5);
        let corners = [[-x, y], [x, y], [x, -y], [-x, -y]];

        let mut mesh = TriangleMesh::new(
            corners
                .iter()
                .map(|[cx, cy]| transform.point([*cx, *cy, 0.0]))
                .collect(),
        );
        mesh.add_triangle(0, 1, 2, 0);
        mesh.add_triangle(0, 2, 3, 0);

        MeshLight {
            name: object.name.clone(),
            emit: Some(lamp.color),
            radiance: lamp.energy * self.settings.meshlight_multiplier,
            samples: self.settings.samples,
            mesh,
        }
    }
}
