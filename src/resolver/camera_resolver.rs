//! Active camera resolution.

use crate::error::{ExportError, Result};
use crate::scene::{ObjectData, Scene};
use crate::settings::{CameraKind, CameraSettings};

/// Lens parameters written for a thin lens camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThinLens {
    pub focus_distance: f32,
    pub radius: f32,
    pub sides: u32,
    pub rotation: f32,
}

/// The camera as the renderer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: String,
    pub kind: CameraKind,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Horizontal field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    /// Present for [`CameraKind::Thinlens`].
    pub lens: Option<ThinLens>,
}

/// Resolve the scene's active camera for an image of `resolution`.
pub fn resolve_camera(
    scene: &Scene,
    settings: &CameraSettings,
    resolution: (u32, u32),
) -> Result<Camera> {
    let object = scene.camera_object().ok_or_else(|| {
        ExportError::MissingCamera(scene.camera.clone().unwrap_or_else(|| "<none>".to_string()))
    })?;
    let ObjectData::Camera(data) = &object.data else {
        return Err(ExportError::MissingCamera(format!(
            "{} is not a camera",
            object.name
        )));
    };

    let (width, height) = resolution;
    let (width, height) = (width as f32, height.max(1) as f32);
    let factor = if height > width { width / height } else { 1.0 };
    let fov = 360.0 * (factor * data.sensor_width / 2.0 / data.lens).atan() / std::f32::consts::PI;

    let transform = object.transform();
    let lens = (settings.kind == CameraKind::Thinlens).then(|| ThinLens {
        focus_distance: data.dof_distance,
        radius: settings.dof_radius,
        sides: settings.lens_sides,
        rotation: settings.lens_rotation,
    });

    log::info!("Resolved {} camera {}", settings.kind.as_str(), object.name);
    Ok(Camera {
        name: object.name.clone(),
        kind: settings.kind,
        eye: transform.point([0.0, 0.0, 0.0]),
        target: transform.point([0.0, 0.0, -1.0]),
        up: transform.direction([0.0, 1.0, 0.0]),
        fov,
        aspect: width / height,
        lens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CameraData, MeshData, Object};
    use crate::types::IDENTITY;

    fn scene_with_camera() -> Scene {
        let mut scene = Scene::new("test");
        let mut matrix = IDENTITY;
        matrix[3] = [0.0, -5.0, 1.0, 1.0];
        scene.add_object(
            Object::new("Camera", ObjectData::Camera(CameraData::default())).with_matrix(matrix),
        );
        scene.camera = Some("Camera".to_string());
        scene
    }

    #[test]
    fn test_pinhole_view_vectors() {
        let scene = scene_with_camera();
        let camera = resolve_camera(&scene, &CameraSettings::default(), (800, 600)).unwrap();
        assert_eq!(camera.kind, CameraKind::Pinhole);
        assert_eq!(camera.eye, [0.0, -5.0, 1.0]);
        assert_eq!(camera.target, [0.0, -5.0, 0.0]);
        assert_eq!(camera.up, [0.0, 1.0, 0.0]);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(camera.lens.is_none());
    }

    #[test]
    fn test_fov_uses_width_fraction_for_portrait() {
        let scene = scene_with_camera();
        let landscape = resolve_camera(&scene, &CameraSettings::default(), (800, 600)).unwrap();
        let expected = 360.0 * (16.0f32 / 35.0).atan() / std::f32::consts::PI;
        assert!((landscape.fov - expected).abs() < 1e-4);

        let portrait = resolve_camera(&scene, &CameraSettings::default(), (600, 800)).unwrap();
        let expected = 360.0 * (0.75f32 * 16.0 / 35.0).atan() / std::f32::consts::PI;
        assert!((portrait.fov - expected).abs() < 1e-4);
    }

    #[test]
    fn test_thinlens_carries_lens() {
        let scene = scene_with_camera();
        let settings = CameraSettings {
            kind: CameraKind::Thinlens,
            dof_radius: 0.2,
            ..Default::default()
        };
        let camera = resolve_camera(&scene, &settings, (640, 480)).unwrap();
        let lens = camera.lens.unwrap();
        assert_eq!(lens.radius, 0.2);
        assert_eq!(lens.sides, 6);
    }

    #[test]
    fn test_missing_camera() {
        let mut scene = scene_with_camera();
        scene.camera = None;
        assert!(matches!(
            resolve_camera(&scene, &CameraSettings::default(), (800, 600)),
            Err(ExportError::MissingCamera(_))
        ));

        scene.add_object(Object::new("Cube", ObjectData::Mesh(MeshData::new())));
        scene.camera = Some("Cube".to_string());
        assert!(matches!(
            resolve_camera(&scene, &CameraSettings::default(), (800, 600)),
            Err(ExportError::MissingCamera(_))
        ));
    }
}
