//! Writing exported frames to disk.
//!
//! A single frame is split into `<name>.sc`, holding settings, shaders,
//! lights and the camera, and `<name>.geo.sc`, holding the geometry it
//! includes. An animation writes a `<name>.java` build script, the shared
//! `<name>.settings.sc` and one self-contained `<name>.<frame>.sc` per frame.

use super::{export_frame, export_settings, FrameLayout};
use crate::error::{ExportError, Result};
use crate::resolver::resolve_scene;
use crate::scene::SceneHost;
use crate::settings::ExportSettings;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const SCENE_EXTENSION: &str = ".sc";

/// `path` with the `.sc` extension appended when missing.
pub fn scene_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.as_os_str().to_string_lossy().ends_with(SCENE_EXTENSION) {
        path.to_path_buf()
    } else {
        with_suffix(path, SCENE_EXTENSION)
    }
}

/// Scene path without its `.sc` extension.
pub fn destination<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = scene_path(path);
    let text = path.as_os_str().to_string_lossy();
    PathBuf::from(&text[..text.len() - SCENE_EXTENSION.len()])
}

pub fn geometry_path<P: AsRef<Path>>(path: P) -> PathBuf {
    with_suffix(&destination(path), ".geo.sc")
}

pub fn settings_path<P: AsRef<Path>>(path: P) -> PathBuf {
    with_suffix(&destination(path), ".settings.sc")
}

pub fn script_path<P: AsRef<Path>>(path: P) -> PathBuf {
    with_suffix(&destination(path), ".java")
}

pub fn frame_path<P: AsRef<Path>>(path: P, frame: i32) -> PathBuf {
    with_suffix(&destination(path), &format!(".{}.sc", frame))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Build script that parses the settings file and the current frame's
/// scene file.
pub fn animation_script(base: &str) -> String {
    format!(
        "\npublic void build() {{\n\tparse(\"{base}\" + \".settings.sc\");\n\tparse(\"{base}\" + \".\" + getCurrentFrame() + \".sc\");\n}}\n",
        base = base
    )
}

/// Export the host's scene to `path`, returning every file written.
///
/// In animation mode the host is stepped through its frame range and put
/// back on its original frame afterwards, whether or not the export
/// succeeded.
pub fn export_files<H: SceneHost, P: AsRef<Path>>(
    host: &mut H,
    settings: &ExportSettings,
    path: P,
) -> Result<Vec<PathBuf>> {
    settings.validate()?;
    let path = scene_path(path);

    if !settings.render.animation {
        return export_single_frame(host, settings, &path);
    }

    let original = host.current_frame();
    let result = export_animation(host, settings, &path);
    let restored = host.set_current_frame(original);
    let written = result?;
    restored?;
    Ok(written)
}

fn export_single_frame<H: SceneHost>(
    host: &H,
    settings: &ExportSettings,
    path: &Path,
) -> Result<Vec<PathBuf>> {
    let geometry_path = geometry_path(path);
    let geometry_file = file_name(&geometry_path)?;

    let scene = host.snapshot()?;
    let resolved = resolve_scene(&scene, settings)?;
    let document = export_frame(
        &resolved,
        settings,
        FrameLayout::Split {
            geometry_file: &geometry_file,
        },
    )?;

    log::info!("Exporting to {}", path.display());
    fs::write(path, &document.main)?;
    log::info!("Exporting geometry to {}", geometry_path.display());
    fs::write(&geometry_path, document.geometry.unwrap_or_default())?;
    Ok(vec![path.to_path_buf(), geometry_path])
}

fn export_animation<H: SceneHost>(
    host: &mut H,
    settings: &ExportSettings,
    path: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let script = script_path(path);
    fs::write(&script, animation_script(&file_name(&destination(path))?))?;
    written.push(script);

    let scene = host.snapshot()?;
    let (start, end) = (scene.render.start_frame, scene.render.end_frame);
    let settings_file = settings_path(path);
    fs::write(
        &settings_file,
        export_settings(&resolve_scene(&scene, settings)?, settings)?,
    )?;
    written.push(settings_file);

    for frame in start..=end {
        host.set_current_frame(frame)?;
        let scene = host.snapshot()?;
        let resolved = resolve_scene(&scene, settings)?;
        let document = export_frame(&resolved, settings, FrameLayout::AnimationFrame)?;

        let frame_file = frame_path(path, frame);
        log::info!("Exporting frame {} to {}", frame, frame_file.display());
        fs::write(&frame_file, document.main)?;
        written.push(frame_file);
    }

    log::debug!("Exported {} frames", written.len() - 2);
    Ok(written)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ExportError::InvalidSettings(format!("{} is not a file path", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::scene;
    use crate::scene::Scene;
    use tempfile::TempDir;

    /// Host whose snapshot fails on one frame.
    struct FailingHost {
        scene: Scene,
        fail_on: i32,
    }

    impl SceneHost for FailingHost {
        fn current_frame(&self) -> i32 {
            self.scene.render.current_frame
        }

        fn set_current_frame(&mut self, frame: i32) -> Result<()> {
            self.scene.render.current_frame = frame;
            Ok(())
        }

        fn snapshot(&self) -> Result<Scene> {
            if self.current_frame() == self.fail_on {
                return Err(ExportError::InvalidScene("frame unavailable".to_string()));
            }
            Ok(self.scene.clone())
        }
    }

    fn animated() -> ExportSettings {
        let mut settings = ExportSettings::default();
        settings.render.animation = true;
        settings
    }

    #[test]
    fn test_file_names() {
        assert_eq!(scene_path("out/room"), PathBuf::from("out/room.sc"));
        assert_eq!(scene_path("out/room.sc"), PathBuf::from("out/room.sc"));
        assert_eq!(geometry_path("room"), PathBuf::from("room.geo.sc"));
        assert_eq!(settings_path("room.sc"), PathBuf::from("room.settings.sc"));
        assert_eq!(script_path("room.sc"), PathBuf::from("room.java"));
        assert_eq!(frame_path("room.sc", 7), PathBuf::from("room.7.sc"));
    }

    #[test]
    fn test_animation_script() {
        assert_eq!(
            animation_script("room"),
            "\npublic void build() {\n\tparse(\"room\" + \".settings.sc\");\n\
             \tparse(\"room\" + \".\" + getCurrentFrame() + \".sc\");\n}\n"
        );
    }

    #[test]
    fn test_single_frame_writes_scene_and_geometry() {
        let dir = TempDir::new().unwrap();
        let mut host = scene();
        let written =
            export_files(&mut host, &ExportSettings::default(), dir.path().join("room")).unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("room.sc"), dir.path().join("room.geo.sc")]
        );
        let main = fs::read_to_string(&written[0]).unwrap();
        let geometry = fs::read_to_string(&written[1]).unwrap();
        assert!(main.starts_with("image {"));
        assert!(main.ends_with("\n\ninclude \"room.geo.sc\"\n"));
        assert!(geometry.contains("\tname \"Wall\"\n"));
    }

    #[test]
    fn test_animation_writes_every_frame_and_restores_current() {
        let dir = TempDir::new().unwrap();
        let mut host = scene();
        host.render.start_frame = 1;
        host.render.end_frame = 3;
        host.render.current_frame = 2;

        let written = export_files(&mut host, &animated(), dir.path().join("room.sc")).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["room.java", "room.settings.sc", "room.1.sc", "room.2.sc", "room.3.sc"]
        );
        assert_eq!(host.render.current_frame, 2);

        let settings = fs::read_to_string(dir.path().join("room.settings.sc")).unwrap();
        assert!(settings.contains("image {") && !settings.contains("camera {"));
        let frame = fs::read_to_string(dir.path().join("room.1.sc")).unwrap();
        assert!(!frame.contains("image {"));
        assert!(frame.contains("\ttype generic-mesh\n"));
    }

    #[test]
    fn test_failed_animation_restores_current_frame() {
        let dir = TempDir::new().unwrap();
        let mut scene = scene();
        scene.render.start_frame = 1;
        scene.render.end_frame = 3;
        scene.render.current_frame = 5;
        let mut host = FailingHost { scene, fail_on: 2 };

        let result = export_files(&mut host, &animated(), dir.path().join("room"));
        assert!(matches!(result, Err(ExportError::InvalidScene(_))));
        assert_eq!(host.current_frame(), 5);
        assert!(dir.path().join("room.1.sc").exists());
        assert!(!dir.path().join("room.3.sc").exists());
    }

    #[test]
    fn test_unwritable_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut host = scene();
        let result = export_files(
            &mut host,
            &ExportSettings::default(),
            dir.path().join("missing").join("room"),
        );
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
