//! Scene resolution.
//!
//! This module classifies a [`Scene`] snapshot once, before any text is
//! written: materials become shaders and modifiers, lamps become lights, and
//! meshes become triangle meshes, particles, hair or mesh lights. The
//! emitters then only format what the resolved scene holds.

pub mod camera_resolver;
pub mod geometry_resolver;
pub mod light_resolver;
pub mod modifier_resolver;
pub mod shader_resolver;

pub use camera_resolver::{resolve_camera, Camera, ThinLens};
pub use geometry_resolver::{
    is_mesh_light, Geometry, GeometryKind, GeometryResolver, Instance, MaterialBinding, MeshLight,
};
pub use light_resolver::{Light, LightKind, LightResolver};
pub use modifier_resolver::{Modifier, ModifierKind, ModifierResolver, ModifierSet};
pub use shader_resolver::{Channel, Shader, ShaderKind, ShaderResolver, DEFAULT_SHADER};

use crate::error::{ExportError, Result};
use crate::scene::{Material, ObjectData, Scene, Texture, TextureSlot};
use crate::settings::ExportSettings;
use crate::types::Color;
use std::collections::HashMap;

/// Name of the texture that supplies the image based light.
pub const IBL_TEXTURE: &str = "ibllight";

/// An exported object after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedObject {
    Light(Light),
    MeshLight(MeshLight),
    Geometry(Geometry),
    Instances(Vec<Instance>),
}

/// A scene ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScene {
    pub name: String,
    pub resolution: (u32, u32),
    pub horizon_color: Color,
    /// Material shaders in material order.
    pub shaders: Vec<Shader>,
    /// Modifier declarations, one per texture name.
    pub modifiers: Vec<Modifier>,
    /// Image of the image based light, when one is enabled and available.
    pub ibl_image: Option<String>,
    pub camera: Camera,
    /// Exported objects in scene order.
    pub objects: Vec<ResolvedObject>,
}

/// Resolve a scene snapshot against export settings.
pub fn resolve_scene(scene: &Scene, settings: &ExportSettings) -> Result<ResolvedScene> {
    settings.validate()?;
    let resolution = scene.render.resolution();

    let shader_resolver = ShaderResolver::new(scene);
    let modifier_resolver = ModifierResolver::new(scene);
    let mut shaders = Vec::new();
    let mut modifiers = ModifierSet::new();
    let mut bindings = HashMap::new();

    for material in &scene.materials {
        let Some(shader) = shader_resolver.resolve(material)? else {
            continue;
        };
        let declared = modifier_resolver.resolve(material)?;
        let binding = MaterialBinding {
            shader: shader.name(),
            modifier: declared.first().map(|m| m.name.clone()),
        };
        for modifier in declared {
            modifiers.insert(modifier);
        }
        bindings.insert(material.name.clone(), binding);
        shaders.push(shader);
    }

    let camera = resolve_camera(scene, &settings.camera, resolution)?;
    let ibl_image = if settings.lights.ibl { ibl_image(scene) } else { None };

    let lights = LightResolver::new(&settings.lights);
    let geometry = GeometryResolver::new(scene, settings, &bindings);
    let mut objects = Vec::new();
    for object in scene.exported_objects() {
        let resolved = match &object.data {
            ObjectData::Lamp(lamp) => lights.resolve(object, lamp),
            ObjectData::Mesh(mesh) | ObjectData::Surface(mesh) if is_mesh_light(object) => geometry
                .resolve_mesh_light(object, mesh)?
                .map(ResolvedObject::MeshLight),
            ObjectData::Mesh(mesh) | ObjectData::Surface(mesh) => geometry
                .resolve_geometry(object, mesh)?
                .map(ResolvedObject::Geometry),
            ObjectData::Empty(empty) => {
                let instances = geometry.resolve_instances(object, empty)?;
                (!instances.is_empty()).then_some(ResolvedObject::Instances(instances))
            }
            ObjectData::Camera(_) => None,
        };
        objects.extend(resolved);
    }

    log::debug!(
        "Resolved {}: {} shaders, {} modifiers, {} objects",
        scene.name,
        shaders.len(),
        modifiers.len(),
        objects.len()
    );

    Ok(ResolvedScene {
        name: scene.name.clone(),
        resolution,
        horizon_color: scene.world.horizon_color,
        shaders,
        modifiers: modifiers.into_vec(),
        ibl_image,
        camera,
        objects,
    })
}

/// Image file of the image based light texture.
fn ibl_image(scene: &Scene) -> Option<String> {
    let image = scene
        .texture(IBL_TEXTURE)
        .filter(|texture| texture.users > 0)
        .and_then(|texture| texture.image_file())
        .map(str::to_string);
    if image.is_none() {
        log::warn!(
            "Image based lighting is enabled but no used {} image texture exists",
            IBL_TEXTURE
        );
    }
    image
}

/// The texture slot at `index` of `material` together with the texture it
/// names.
pub(crate) fn bound_texture<'s>(
    scene: &'s Scene,
    material: &'s Material,
    index: usize,
) -> Result<Option<(&'s TextureSlot, &'s Texture)>> {
    let Some(bound) = material.slot(index) else {
        return Ok(None);
    };
    let texture = scene.texture(&bound.texture).ok_or_else(|| {
        ExportError::InvalidScene(format!(
            "slot {} of material {} references unknown texture {}",
            index, material.name, bound.texture
        ))
    })?;
    Ok(Some((bound, texture)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::slot;
    use crate::scene::{CameraData, Face, LampData, LampKind, MeshData, Object};
    use crate::settings::GiEngine;

    fn scene() -> Scene {
        let mut scene = Scene::new("room");
        scene.add_texture(Texture::image("bump_wall", "wall.png"));
        scene.add_texture(Texture::image(IBL_TEXTURE, "sky.hdr"));
        scene.add_material(
            Material::new("sfdif_wall").with_slot(slot::BUMP, TextureSlot::new("bump_wall")),
        );
        scene.add_material(
            Material::new("sfpho_plaster").with_slot(slot::BUMP, TextureSlot::new("bump_wall")),
        );

        let mut mesh = MeshData::new().with_material("sfdif_wall").with_material("sfpho_plaster");
        mesh.add_vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_vertex([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_vertex([1.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_face(Face::tri(0, 1, 2));

        scene.add_object(Object::new("Camera", ObjectData::Camera(CameraData::default())));
        scene.add_object(Object::new("Wall", ObjectData::Mesh(mesh)));
        scene.add_object(Object::new("Lamp", ObjectData::Lamp(LampData::new(LampKind::Point))));
        scene.add_object(
            Object::new("Hidden", ObjectData::Lamp(LampData::new(LampKind::Point)))
                .with_layers(vec![2]),
        );
        scene.camera = Some("Camera".to_string());
        scene
    }

    #[test]
    fn test_shared_bump_texture_declared_once() {
        let resolved = resolve_scene(&scene(), &ExportSettings::default()).unwrap();
        assert_eq!(resolved.shaders.len(), 2);
        assert_eq!(resolved.modifiers.len(), 1);

        let Some(ResolvedObject::Geometry(wall)) = resolved.objects.first() else {
            panic!("expected the wall first");
        };
        assert!(wall
            .bindings
            .iter()
            .all(|b| b.modifier.as_deref() == Some("bump_wall")));
        assert_eq!(wall.bindings[1].shader, "sfpho_plaster.shader");
    }

    #[test]
    fn test_objects_follow_scene_order_and_layers() {
        let resolved = resolve_scene(&scene(), &ExportSettings::default()).unwrap();
        assert_eq!(resolved.objects.len(), 2);
        assert!(matches!(resolved.objects[1], ResolvedObject::Light(ref l) if l.name == "Lamp"));
    }

    #[test]
    fn test_ibl_image_requires_toggle() {
        let scene = scene();
        let mut settings = ExportSettings::default();
        assert_eq!(resolve_scene(&scene, &settings).unwrap().ibl_image, None);

        settings.lights.ibl = true;
        assert_eq!(
            resolve_scene(&scene, &settings).unwrap().ibl_image.as_deref(),
            Some("sky.hdr")
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = ExportSettings::default();
        settings.gi.engine = GiEngine::None;
        settings.gi.view.gi = true;
        assert!(matches!(
            resolve_scene(&scene(), &settings),
            Err(ExportError::InvalidSettings(_))
        ));
    }
}
