//! Image, sampling and global illumination blocks.

use crate::resolver::ResolvedScene;
use crate::settings::gi::{CAUSTICS_MAP, GLOBAL_MAP};
use crate::settings::{BackgroundSource, GiEngine, GiSettings, OutputSettings};
use crate::types::{Scalar, Scalars, Srgb};
use std::fmt::{self, Write};

/// Write the image, trace-depths, background and bucket blocks.
pub fn write_output(out: &mut String, scene: &ResolvedScene, output: &OutputSettings) -> fmt::Result {
    let (width, height) = scene.resolution;
    writeln!(out, "image {{")?;
    writeln!(out, "\tresolution {} {}", width, height)?;
    writeln!(out, "\taa {} {}", output.min_aa, output.max_aa)?;
    writeln!(out, "\tsamples {}", output.samples)?;
    writeln!(out, "\tfilter {}", output.filter.as_str())?;
    if output.jitter {
        writeln!(out, "\tjitter true")?;
    }
    writeln!(out, "}}")?;

    let depths = &output.depths;
    writeln!(out, "trace-depths {{")?;
    writeln!(out, "\tdiff {} ", depths.diff)?;
    writeln!(out, "\trefl {} ", depths.refl)?;
    writeln!(out, "\trefr {}", depths.refr)?;
    writeln!(out, "}}")?;

    let background = match output.background {
        BackgroundSource::None => None,
        BackgroundSource::World => Some(scene.horizon_color),
        BackgroundSource::Custom => Some(output.background_color),
    };
    if let Some(color) = background {
        writeln!(out, "background {{")?;
        writeln!(out, "\tcolor  {}", Srgb(color))?;
        writeln!(out, "}}")?;
    }

    if output.reverse_bucket {
        writeln!(
            out,
            "\nbucket {} \"reverse {}\"",
            output.bucket_size,
            output.bucket_order.as_str()
        )
    } else {
        writeln!(out, "\nbucket {} {}", output.bucket_size, output.bucket_order.as_str())
    }
}

/// Write the photons, gi and view override blocks.
pub fn write_gi(out: &mut String, gi: &GiSettings) -> fmt::Result {
    if gi.caustics {
        let photons = &gi.caustic_photons;
        write!(out, "\nphotons {{\n")?;
        writeln!(
            out,
            "\tcaustics {} {} {} {}",
            photons.photons,
            CAUSTICS_MAP,
            photons.estimate,
            Scalar(photons.radius)
        )?;
        writeln!(out, "}}")?;
    }

    match gi.engine {
        GiEngine::None => {}
        GiEngine::InstantGi => {
            let igi = &gi.instant_gi;
            write!(out, "\ngi {{\n\ttype igi\n")?;
            writeln!(out, "\tsamples {}", igi.samples)?;
            writeln!(out, "\tsets {}", igi.sets)?;
            writeln!(out, "\tb {}", Scalar(igi.bias))?;
            writeln!(out, "\tbias-samples {}", igi.bias_samples)?;
            writeln!(out, "}}")?;
        }
        GiEngine::IrradianceCache => {
            let irr = &gi.irradiance_cache;
            write!(out, "\ngi {{\n\ttype irr-cache\n")?;
            writeln!(out, "\tsamples {}", irr.samples)?;
            writeln!(out, "\ttolerance {}", Scalar(irr.tolerance))?;
            writeln!(
                out,
                "\tspacing {} {}",
                Scalar(irr.spacing_min),
                Scalar(irr.spacing_max)
            )?;
            if irr.use_global_photons {
                let photons = &irr.global_photons;
                writeln!(
                    out,
                    "\tglobal {} {} {} {}",
                    photons.photons,
                    GLOBAL_MAP,
                    photons.estimate,
                    Scalar(photons.radius)
                )?;
            }
            writeln!(out, "}}")?;
        }
        GiEngine::PathTracing => {
            write!(out, "\ngi {{\n\ttype path\n")?;
            writeln!(out, "\tsamples {}", gi.path_tracing.samples)?;
            writeln!(out, "}}")?;
        }
        GiEngine::AmbientOcclusion => {
            let ao = &gi.ambient_occlusion;
            write!(out, "\n\ngi {{\n\ttype ambocc\n")?;
            writeln!(out, "\tbright {{ \"sRGB nonlinear\" {} }}", Scalars(&ao.bright))?;
            writeln!(out, "\tdark {{ \"sRGB nonlinear\" {} }}", Scalars(&ao.dark))?;
            writeln!(out, "\tsamples {}", ao.samples)?;
            write!(out, "\tmaxdist {}\n}}", Scalar(ao.distance))?;
        }
        GiEngine::FakeAmbient => {
            let fake = &gi.fake_ambient;
            write!(out, "\n\ngi {{\n\ttype fake\n\tup 0 1 0\n")?;
            writeln!(out, "\tsky {{ \"sRGB nonlinear\" {} }}", Scalars(&fake.sky))?;
            writeln!(out, "\tground {{ \"sRGB nonlinear\" {} }}", Scalars(&fake.ground))?;
            write!(out, "\n}}")?;
        }
    }

    let overrides = [
        (gi.view.caustics, "debug_caustics", "view-caustics"),
        (gi.view.globals, "debug_globals", "view-global"),
        (gi.view.gi, "debug_gi", "view-irradiance"),
    ];
    for (_, name, kind) in overrides.iter().filter(|(enabled, _, _)| *enabled) {
        write!(out, "\nshader {{\n\tname {}\n\ttype {}\n}}\n", name, kind)?;
        writeln!(out, "override {} false", name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::resolved_scene;

    #[test]
    fn test_default_output_blocks() {
        let mut out = String::new();
        write_output(&mut out, &resolved_scene(), &OutputSettings::default()).unwrap();
        assert_eq!(
            out,
            "image {\n\tresolution 800 600\n\taa 0 2\n\tsamples 1\n\tfilter box\n}\n\
             trace-depths {\n\tdiff 1 \n\trefl 4 \n\trefr 4\n}\n\
             background {\n\tcolor  { \"sRGB nonlinear\" 0.100 0.200 0.300 }\n}\n\
             \nbucket 64 hilbert\n"
        );
    }

    #[test]
    fn test_jitter_custom_background_and_reverse_bucket() {
        let output = OutputSettings {
            jitter: true,
            background: BackgroundSource::Custom,
            background_color: [1.0, 0.0, 0.0],
            reverse_bucket: true,
            bucket_order: crate::settings::BucketOrder::Spiral,
            ..Default::default()
        };
        let mut out = String::new();
        write_output(&mut out, &resolved_scene(), &output).unwrap();
        assert!(out.contains("\tfilter box\n\tjitter true\n}\n"));
        assert!(out.contains("\tcolor  { \"sRGB nonlinear\" 1.000 0.000 0.000 }\n"));
        assert!(out.ends_with("\nbucket 64 \"reverse spiral\"\n"));

        let output = OutputSettings {
            background: BackgroundSource::None,
            ..Default::default()
        };
        let mut out = String::new();
        write_output(&mut out, &resolved_scene(), &output).unwrap();
        assert!(!out.contains("background"));
    }

    #[test]
    fn test_irradiance_cache_with_global_photons() {
        let mut gi = GiSettings {
            caustics: true,
            engine: GiEngine::IrradianceCache,
            ..Default::default()
        };
        gi.irradiance_cache.use_global_photons = true;
        gi.view.globals = true;

        let mut out = String::new();
        write_gi(&mut out, &gi).unwrap();
        assert_eq!(
            out,
            "\nphotons {\n\tcaustics 1000000 kd 100 0.5\n}\n\
             \ngi {\n\ttype irr-cache\n\tsamples 512\n\ttolerance 0.01\n\tspacing 0.05 5.0\n\
             \tglobal 1000000 grid 100 0.5\n}\n\
             \nshader {\n\tname debug_globals\n\ttype view-global\n}\noverride debug_globals false\n"
        );
    }

    #[test]
    fn test_engine_blocks() {
        let engine_block = |engine| {
            let gi = GiSettings {
                engine,
                ..Default::default()
            };
            let mut out = String::new();
            write_gi(&mut out, &gi).unwrap();
            out
        };

        assert_eq!(engine_block(GiEngine::None), "");
        assert_eq!(
            engine_block(GiEngine::InstantGi),
            "\ngi {\n\ttype igi\n\tsamples 64\n\tsets 1\n\tb 0.01\n\tbias-samples 0\n}\n"
        );
        assert_eq!(
            engine_block(GiEngine::PathTracing),
            "\ngi {\n\ttype path\n\tsamples 32\n}\n"
        );
        assert_eq!(
            engine_block(GiEngine::AmbientOcclusion),
            "\n\ngi {\n\ttype ambocc\n\tbright { \"sRGB nonlinear\" 1.0 1.0 1.0 }\n\
             \tdark { \"sRGB nonlinear\" 0.0 0.0 0.0 }\n\tsamples 32\n\tmaxdist 3.0\n}"
        );
        assert_eq!(
            engine_block(GiEngine::FakeAmbient),
            "\n\ngi {\n\ttype fake\n\tup 0 1 0\n\tsky { \"sRGB nonlinear\" 1.0 0.95 0.65 }\n\
             \tground { \"sRGB nonlinear\" 0.5 0.8 1.0 }\n\n}"
        );
    }
}
