//! Sunflow Export CLI
//!
//! Export scene snapshots to Sunflow scene files and render them.

use clap::{Parser, Subcommand};
use sunflow_export::settings::config::CONFIG_FILE_NAME;
use sunflow_export::settings::persist;
use sunflow_export::{
    export_files, export_scene, load_scene, resolve_scene, ExportError, ExportSettings,
    RenderCommand, RendererConfig, ResolvedObject, Scene,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sunflow-export")]
#[command(author, version, about = "Export scene snapshots to Sunflow scene files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene snapshot to .sc files
    Export {
        /// Scene snapshot JSON file
        #[arg(short, long)]
        scene: PathBuf,

        /// Output scene path (".sc" is appended when missing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export settings JSON file (defaults to the settings stored on the scene)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Print one self-contained document instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Export a scene and run the renderer on it
    Render {
        /// Scene snapshot JSON file
        #[arg(short, long)]
        scene: PathBuf,

        /// Output scene path (".sc" is appended when missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Export settings JSON file (defaults to the settings stored on the scene)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Renderer config file
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the renderer config file
    Configure {
        /// Sunflow install directory, used as a prefix of "sunflow.jar"
        #[arg(long, default_value = "")]
        sunflow_path: String,

        /// Java heap size in MB
        #[arg(long, default_value = "1024")]
        memory: u32,

        /// Render threads (0 lets the renderer decide)
        #[arg(long, default_value = "0")]
        threads: u32,

        /// Java install directory, used as a prefix of "java"
        #[arg(long, default_value = "")]
        java_path: String,

        /// Renderer config file
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,
    },

    /// Show information about a scene snapshot
    Info {
        /// Scene snapshot JSON file
        #[arg(short, long)]
        scene: PathBuf,

        /// Export settings JSON file (defaults to the settings stored on the scene)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            scene,
            output,
            settings,
            stdout,
        } => {
            export(&scene, output.as_deref(), settings.as_deref(), stdout)?;
        }
        Commands::Render {
            scene,
            output,
            settings,
            config,
            dry_run,
        } => {
            render(&scene, &output, settings.as_deref(), &config, dry_run)?;
        }
        Commands::Configure {
            sunflow_path,
            memory,
            threads,
            java_path,
            config,
        } => {
            let renderer = RendererConfig {
                sunflow_path,
                memory_mb: memory,
                threads,
                java_path,
            };
            renderer.save(&config)?;
            println!("Wrote renderer config to {:?}", config);
        }
        Commands::Info { scene, settings } => {
            show_scene_info(&scene, settings.as_deref())?;
        }
    }

    Ok(())
}

fn load_settings(scene: &Scene, path: Option<&Path>) -> sunflow_export::Result<ExportSettings> {
    match path {
        Some(path) => ExportSettings::load(path),
        None => Ok(persist::load_from_scene(scene)),
    }
}

fn export(
    scene_path: &Path,
    output: Option<&Path>,
    settings_path: Option<&Path>,
    stdout: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut scene = load_scene(scene_path)?;
    let settings = load_settings(&scene, settings_path)?;

    if stdout {
        print!("{}", export_scene(&scene, &settings)?);
        return Ok(());
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => scene_path.with_extension("sc"),
    };
    for path in export_files(&mut scene, &settings, &output)? {
        println!("Wrote {:?}", path);
    }
    Ok(())
}

fn render(
    scene_path: &Path,
    output: &Path,
    settings_path: Option<&Path>,
    config_path: &Path,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match RendererConfig::load(config_path) {
        Ok(config) => config,
        Err(ExportError::NotConfigured(path)) => {
            eprintln!(
                "The renderer is not configured yet (no {}). Run `sunflow-export configure` first.",
                path
            );
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    let mut scene = load_scene(scene_path)?;
    let settings = load_settings(&scene, settings_path)?;
    let written = export_files(&mut scene, &settings, output)?;
    println!("Exported {} files", written.len());

    let frames = (scene.render.start_frame, scene.render.end_frame);
    let command = RenderCommand::new(&config, &settings.render, output, frames);
    if dry_run {
        println!("{}", command);
        return Ok(());
    }

    let status = command.run()?;
    if !status.success() {
        return Err(format!("renderer exited with {}", status).into());
    }
    Ok(())
}

fn show_scene_info(
    scene_path: &Path,
    settings_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading scene from {:?}...", scene_path);
    let scene = load_scene(scene_path)?;
    let settings = load_settings(&scene, settings_path)?;
    let (width, height) = scene.render.resolution();

    println!("\nScene Info:");
    println!("  Name: {}", scene.name);
    println!("  Resolution: {}x{}", width, height);
    println!(
        "  Frames: {} to {} (current {})",
        scene.render.start_frame, scene.render.end_frame, scene.render.current_frame
    );
    println!("  Objects: {} ({} exported)", scene.objects.len(), scene.exported_objects().count());
    println!("  Materials: {}", scene.materials.len());
    println!("  Textures: {}", scene.textures.len());

    let resolved = resolve_scene(&scene, &settings)?;
    let mut counts = [0usize; 4];
    for object in &resolved.objects {
        match object {
            ResolvedObject::Light(_) => counts[0] += 1,
            ResolvedObject::MeshLight(_) => counts[1] += 1,
            ResolvedObject::Geometry(_) => counts[2] += 1,
            ResolvedObject::Instances(instances) => counts[3] += instances.len(),
        }
    }

    println!("\nExport:");
    println!("  Camera: {} ({})", resolved.camera.name, resolved.camera.kind.as_str());
    println!("  Shaders: {}", resolved.shaders.len());
    println!("  Modifiers: {}", resolved.modifiers.len());
    println!("  Lights: {}", counts[0]);
    println!("  Mesh lights: {}", counts[1]);
    println!("  Geometry: {}", counts[2]);
    println!("  Instances: {}", counts[3]);
    if let Some(image) = &resolved.ibl_image {
        println!("  Image based light: {}", image);
    }

    Ok(())
}
