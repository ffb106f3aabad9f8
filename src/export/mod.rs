//! Scene description writers.
//!
//! Every block writer appends to a `String`. [`export_frame`] lays the
//! blocks of one resolved frame out in the order the renderer parses them,
//! and [`files`] maps documents onto the single frame and animation file
//! sets.

pub mod camera;
pub mod files;
pub mod geometry;
pub mod light;
pub mod modifier;
pub mod settings_blocks;
pub mod shader;

pub use files::{export_files, frame_path, geometry_path, scene_path, script_path, settings_path};

use crate::error::Result;
use crate::resolver::{resolve_scene, ResolvedObject, ResolvedScene};
use crate::scene::Scene;
use crate::settings::ExportSettings;
use std::fmt::Write;

/// Text of one exported frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneDocument {
    pub main: String,
    /// Geometry written to its own file, when the layout splits it out.
    pub geometry: Option<String>,
}

/// How the blocks of a frame are distributed over documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayout<'a> {
    /// Settings and lights in the main document, which includes the
    /// geometry document under the given file name.
    Split { geometry_file: &'a str },
    /// Animation frame: the settings blocks live in a shared settings file,
    /// geometry is written inline.
    AnimationFrame,
    /// Everything in one document.
    Inline,
}

impl FrameLayout<'_> {
    fn writes_settings(&self) -> bool {
        !matches!(self, FrameLayout::AnimationFrame)
    }
}

/// Write the image, trace-depths, background, bucket and GI blocks that an
/// animation shares between its frames.
pub fn export_settings(scene: &ResolvedScene, settings: &ExportSettings) -> Result<String> {
    let mut out = String::new();
    settings_blocks::write_output(&mut out, scene, &settings.output)?;
    settings_blocks::write_gi(&mut out, &settings.gi)?;
    Ok(out)
}

/// Write one resolved frame.
pub fn export_frame(
    scene: &ResolvedScene,
    settings: &ExportSettings,
    layout: FrameLayout<'_>,
) -> Result<SceneDocument> {
    let mut main = if layout.writes_settings() {
        export_settings(scene, settings)?
    } else {
        String::new()
    };

    shader::write_shaders(&mut main, &scene.shaders, &settings.lights)?;
    modifier::write_modifiers(&mut main, &scene.modifiers)?;
    if let Some(image) = &scene.ibl_image {
        light::write_ibl(&mut main, image, &settings.lights)?;
    }
    camera::write_camera(&mut main, &scene.camera)?;

    for object in &scene.objects {
        match object {
            ResolvedObject::Light(l) => light::write_light(&mut main, l)?,
            ResolvedObject::MeshLight(l) => light::write_mesh_light(&mut main, l)?,
            ResolvedObject::Geometry(_) | ResolvedObject::Instances(_) => {}
        }
    }

    let geometry = match layout {
        FrameLayout::Split { geometry_file } => {
            write!(main, "\n\ninclude \"{}\"\n", geometry_file)?;
            Some(export_geometry(scene)?)
        }
        FrameLayout::AnimationFrame | FrameLayout::Inline => {
            main.push_str(&export_geometry(scene)?);
            None
        }
    };

    Ok(SceneDocument { main, geometry })
}

/// Write the geometry stream: meshes in object order, then instances.
pub fn export_geometry(scene: &ResolvedScene) -> Result<String> {
    let mut out = String::new();
    for object in &scene.objects {
        if let ResolvedObject::Geometry(g) = object {
            geometry::write_geometry(&mut out, g)?;
        }
    }
    for object in &scene.objects {
        if let ResolvedObject::Instances(instances) = object {
            geometry::write_instances(&mut out, instances)?;
        }
    }
    Ok(out)
}

/// Resolve a scene and write it as one self-contained document.
pub fn export_scene(scene: &Scene, settings: &ExportSettings) -> Result<String> {
    let resolved = resolve_scene(scene, settings)?;
    Ok(export_frame(&resolved, settings, FrameLayout::Inline)?.main)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::resolver::Camera;
    use crate::scene::material::slot;
    use crate::scene::{
        CameraData, Face, LampData, LampKind, Material, MeshData, Object, ObjectData, Texture,
        TextureSlot,
    };
    use crate::settings::CameraKind;

    /// An empty resolved scene with a pinhole camera.
    pub(crate) fn resolved_scene() -> ResolvedScene {
        ResolvedScene {
            name: "test".to_string(),
            resolution: (800, 600),
            horizon_color: [0.1, 0.2, 0.3],
            shaders: Vec::new(),
            modifiers: Vec::new(),
            ibl_image: None,
            camera: Camera {
                name: "Camera".to_string(),
                kind: CameraKind::Pinhole,
                eye: [0.0, 0.0, 0.0],
                target: [0.0, 0.0, -1.0],
                up: [0.0, 1.0, 0.0],
                fov: 49.0,
                aspect: 1.5,
                lens: None,
            },
            objects: Vec::new(),
        }
    }

    fn triangle(material: &str) -> MeshData {
        let mut mesh = MeshData::new().with_material(material);
        mesh.add_vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_vertex([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_vertex([1.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        mesh.add_face(Face::tri(0, 1, 2));
        mesh
    }

    /// A small room: camera, a lamp, a mesh light and a bumped wall.
    pub(crate) fn scene() -> Scene {
        let mut scene = Scene::new("room");
        scene.render.width = 800;
        scene.render.height = 600;
        scene.add_texture(Texture::image("bump_wall", "wall.png"));
        scene.add_material(
            Material::new("sfdif_wall").with_slot(slot::BUMP, TextureSlot::new("bump_wall")),
        );
        scene.add_material(Material::new("glow").with_color([1.0, 0.5, 0.0]));

        scene.add_object(Object::new("Camera", ObjectData::Camera(CameraData::default())));
        scene.add_object(Object::new("Wall", ObjectData::Mesh(triangle("sfdif_wall"))));
        scene.add_object(Object::new(
            "Lamp",
            ObjectData::Lamp(LampData::new(LampKind::Point).with_energy(2.0)),
        ));
        scene.add_object(Object::new("meshlight_panel", ObjectData::Mesh(triangle("glow"))));
        scene.camera = Some("Camera".to_string());
        scene
    }

    fn frame(layout: FrameLayout<'_>) -> SceneDocument {
        let settings = ExportSettings::default();
        let resolved = resolve_scene(&scene(), &settings).unwrap();
        export_frame(&resolved, &settings, layout).unwrap()
    }

    #[test]
    fn test_split_frame_order() {
        let document = frame(FrameLayout::Split {
            geometry_file: "room.geo.sc",
        });
        let main = &document.main;

        let positions: Vec<usize> = [
            "image {",
            "trace-depths {",
            "\nbucket 64 hilbert",
            "name def",
            "name \"sfdif_wall.shader\"",
            "\n\nmodifier {\n\tname bump_wall",
            "\n\ncamera {",
            "\ttype point",
            "\ttype meshlight",
            "\n\ninclude \"room.geo.sc\"\n",
        ]
        .iter()
        .map(|needle| main.find(needle).unwrap_or_else(|| panic!("missing {:?}", needle)))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(main.ends_with("\n\ninclude \"room.geo.sc\"\n"));
        assert!(!main.contains("generic-mesh"));

        let geometry = document.geometry.unwrap();
        assert!(geometry.starts_with("\n\nobject {\n\tshader \"sfdif_wall.shader\"\n\tmodifier \"bump_wall\"\n"));
        assert!(!geometry.contains("meshlight_panel"));
    }

    #[test]
    fn test_animation_frame_skips_settings_blocks() {
        let document = frame(FrameLayout::AnimationFrame);
        assert!(document.geometry.is_none());
        assert!(!document.main.contains("image {"));
        assert!(document.main.starts_with("\n\nshader {\n\tname def\n"));
        assert!(document.main.contains("\ttype generic-mesh\n\tname \"Wall\"\n"));
    }

    #[test]
    fn test_export_is_idempotent() {
        let settings = ExportSettings::default();
        let first = export_scene(&scene(), &settings).unwrap();
        let second = export_scene(&scene(), &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lamp_power_uses_multiplier() {
        let out = export_scene(&scene(), &ExportSettings::default()).unwrap();
        assert!(out.contains("\ttype point\n"));
        assert!(out.contains("\tpower 200.0\n"));
        assert!(out.contains("\temit { \"sRGB nonlinear\" 1.000 0.500 0.000 }\n"));
    }

    #[test]
    fn test_shared_modifier_written_once() {
        let mut scene = scene();
        scene.add_material(
            Material::new("sfpho_plaster").with_slot(slot::BUMP, TextureSlot::new("bump_wall")),
        );
        scene.add_object(Object::new("Ceiling", ObjectData::Mesh(triangle("sfpho_plaster"))));
        let out = export_scene(&scene, &ExportSettings::default()).unwrap();
        assert_eq!(out.matches("\n\nmodifier {").count(), 1);
        assert_eq!(out.matches("\tmodifier \"bump_wall\"\n").count(), 2);
    }

    #[test]
    fn test_textured_glass_falls_back_to_diffuse() {
        let mut scene = scene();
        scene.add_texture(Texture::image("pane", "pane.png"));
        scene.add_material(Material::new("sfgla_window").with_slot(slot::DIFFUSE, TextureSlot::new("pane")));
        scene.add_object(Object::new("Window", ObjectData::Mesh(triangle("sfgla_window"))));
        let out = export_scene(&scene, &ExportSettings::default()).unwrap();
        assert!(out.contains(
            "\tname \"sfgla_window.shader\"\n\ttype diffuse\n\ttexture \"pane.png\"\n}"
        ));
    }

    #[test]
    fn test_missing_camera_is_an_error() {
        let mut scene = scene();
        scene.camera = Some("Nowhere".to_string());
        assert!(matches!(
            export_scene(&scene, &ExportSettings::default()),
            Err(crate::error::ExportError::MissingCamera(_))
        ));
    }
}
