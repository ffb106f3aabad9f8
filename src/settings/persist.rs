//! Persisting settings as host custom properties.
//!
//! Every group is written under a marker key (`SceneProp` for output and GI
//! settings, `LightProp`, `RenderProp` on the scene, `CamProp` on the camera
//! object). Booleans are stored as `"true"` / `"false"` strings and list
//! choices as 1-based indices, the way scenes saved by earlier exporter
//! versions carry them, so old scenes load unchanged.
//!
//! Loading never fails: a group without its marker keeps its defaults, and a
//! missing or mistyped key inside a present group discards everything that was
//! read and falls back to the full defaults.

use super::gi::{GiEngine, GiSettings};
use super::{
    BackgroundSource, BucketOrder, CameraKind, ExportSettings, ImageFilter, ImageFormat,
    QuickOption,
};
use crate::error::{ExportError, Result};
use crate::scene::{PropertyMap, PropertyValue, Scene};
use crate::types::Color;

const SCENE_MARKER: &str = "SceneProp";
const LIGHT_MARKER: &str = "LightProp";
const RENDER_MARKER: &str = "RenderProp";
const CAMERA_MARKER: &str = "CamProp";

/// Write every settings group into the scene and camera property maps.
pub fn store(settings: &ExportSettings, scene: &mut PropertyMap, camera: &mut PropertyMap) {
    let mut w = Writer { props: scene };
    w.flag(SCENE_MARKER, true);
    store_output(settings, &mut w);
    store_gi(&settings.gi, &mut w);
    store_lights(settings, &mut w);
    store_render(settings, &mut w);

    let mut w = Writer { props: camera };
    w.flag(CAMERA_MARKER, true);
    let cam = &settings.camera;
    w.float("DOF Radius", cam.dof_radius);
    w.int("Lens Sides", cam.lens_sides as i64);
    w.float("Lens Rotation", cam.lens_rotation);
    w.flag("DOF", cam.kind == CameraKind::Thinlens);
    w.flag("Spherical Camera", cam.kind == CameraKind::Spherical);
    w.flag("Fisheye Camera", cam.kind == CameraKind::Fisheye);
}

/// Read settings back from the scene and camera property maps.
pub fn load(scene: &PropertyMap, camera: &PropertyMap) -> ExportSettings {
    match try_load(scene, camera) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Could not import stored settings, using defaults: {}", e);
            ExportSettings::default()
        }
    }
}

/// Store settings on a scene snapshot: scene groups on the scene, the camera
/// group on the active camera object.
pub fn store_in_scene(settings: &ExportSettings, scene: &mut Scene) {
    let mut camera_props = scene
        .camera_object()
        .map(|o| o.properties.clone())
        .unwrap_or_default();
    store(settings, &mut scene.properties, &mut camera_props);

    match scene.camera.clone() {
        Some(name) => {
            if let Some(camera) = scene.object_mut(&name) {
                camera.properties = camera_props;
            }
        }
        None => log::warn!("Scene has no active camera, camera settings not stored"),
    }
}

/// Load settings stored on a scene snapshot.
pub fn load_from_scene(scene: &Scene) -> ExportSettings {
    let empty = PropertyMap::new();
    let camera = scene
        .camera_object()
        .map(|o| &o.properties)
        .unwrap_or(&empty);
    load(&scene.properties, camera)
}

fn try_load(scene: &PropertyMap, camera: &PropertyMap) -> Result<ExportSettings> {
    let mut settings = ExportSettings::default();

    let r = Reader { props: scene };
    if r.marker(SCENE_MARKER)? {
        load_output(&r, &mut settings)?;
        load_gi(&r, &mut settings.gi)?;
    }
    if r.marker(LIGHT_MARKER)? {
        load_lights(&r, &mut settings)?;
    }
    if r.marker(RENDER_MARKER)? {
        load_render(&r, &mut settings)?;
    }

    let r = Reader { props: camera };
    if r.marker(CAMERA_MARKER)? {
        let cam = &mut settings.camera;
        cam.dof_radius = r.float("DOF Radius")?;
        cam.lens_sides = r.uint("Lens Sides")?;
        cam.lens_rotation = r.float("Lens Rotation")?;
        let flags = [
            r.flag("DOF")?,
            r.flag("Spherical Camera")?,
            r.flag("Fisheye Camera")?,
        ];
        cam.kind = CameraKind::from_flags(flags[0], flags[1], flags[2]);
        if flags.iter().filter(|f| **f).count() > 1 {
            log::warn!(
                "Several camera types enabled in stored settings, using {}",
                cam.kind.as_str()
            );
        }
    }

    clear_invalid_overrides(&mut settings.gi);
    Ok(settings)
}

fn clear_invalid_overrides(gi: &mut GiSettings) {
    if gi.irradiance_cache.use_global_photons && gi.engine != GiEngine::IrradianceCache {
        log::warn!("Global photons stored without irradiance cache, disabling them");
        gi.irradiance_cache.use_global_photons = false;
    }
    if gi.view.caustics && !gi.caustics {
        log::warn!("Caustics override stored without caustics, disabling it");
        gi.view.caustics = false;
    }
    if gi.view.globals && !gi.uses_global_photons() {
        log::warn!("Globals override stored without global photons, disabling it");
        gi.view.globals = false;
    }
    if gi.view.gi && gi.engine == GiEngine::None {
        log::warn!("GI override stored without a GI engine, disabling it");
        gi.view.gi = false;
    }
}

fn store_output(settings: &ExportSettings, w: &mut Writer<'_>) {
    let out = &settings.output;
    w.int("MinAA", out.min_aa as i64);
    w.int("MaxAA", out.max_aa as i64);
    w.int("Samples", out.samples as i64);
    w.int("Filter", out.filter.index());
    w.flag("Jitter", out.jitter);
    w.int("DepthDiff", out.depths.diff as i64);
    w.int("DepthRefl", out.depths.refl as i64);
    w.int("DepthRefr", out.depths.refr as i64);
    w.flag("Blender Background", out.background == BackgroundSource::World);
    w.flag("Script Background", out.background == BackgroundSource::Custom);
    w.color("HorizonCol", out.background_color);
    w.int("Bucket Size", out.bucket_size as i64);
    w.int("Bucket Type", out.bucket_order.index());
    w.flag("Reverse Bucket", out.reverse_bucket);
}

fn load_output(r: &Reader<'_>, settings: &mut ExportSettings) -> Result<()> {
    let out = &mut settings.output;
    out.min_aa = r.int("MinAA")? as i32;
    out.max_aa = r.int("MaxAA")? as i32;
    out.samples = r.uint("Samples")?;
    out.filter = r.choice("Filter", ImageFilter::from_index)?;
    out.jitter = r.flag("Jitter")?;
    out.depths.diff = r.uint("DepthDiff")?;
    out.depths.refl = r.uint("DepthRefl")?;
    out.depths.refr = r.uint("DepthRefr")?;

    let world = r.flag("Blender Background")?;
    let custom = r.flag("Script Background")?;
    if world && custom {
        log::warn!("Both background sources enabled in stored settings, using the custom color");
    }
    out.background = if custom {
        BackgroundSource::Custom
    } else if world {
        BackgroundSource::World
    } else {
        BackgroundSource::None
    };
    if let Some(color) = r.gated(custom, "HorizonCol", Reader::color)? {
        out.background_color = color;
    }

    out.bucket_size = r.uint("Bucket Size")?;
    out.bucket_order = r.choice("Bucket Type", BucketOrder::from_index)?;
    out.reverse_bucket = r.flag("Reverse Bucket")?;
    Ok(())
}

fn store_gi(gi: &GiSettings, w: &mut Writer<'_>) {
    w.flag("Caustics", gi.caustics);
    w.int("Caustics Photon Number", gi.caustic_photons.photons as i64);
    w.int("Caustics Photon Map", 1);
    w.int("Caustics Photon Estimate", gi.caustic_photons.estimate as i64);
    w.float("Caustics Photon Radius", gi.caustic_photons.radius);

    w.flag("IGI", gi.engine == GiEngine::InstantGi);
    w.int("IGI Samples", gi.instant_gi.samples as i64);
    w.int("IGI Sets", gi.instant_gi.sets as i64);
    w.float("IGI Bias", gi.instant_gi.bias);
    w.int("IGI Bias Samples", gi.instant_gi.bias_samples as i64);

    let irr = &gi.irradiance_cache;
    w.flag("IRR", gi.engine == GiEngine::IrradianceCache);
    w.int("IRR Samples", irr.samples as i64);
    w.float("IRR Tolerance", irr.tolerance);
    w.float("IRR Space Min", irr.spacing_min);
    w.float("IRR Space Max", irr.spacing_max);

    w.flag("Global Photon", irr.use_global_photons);
    w.int("Global Photon Num", irr.global_photons.photons as i64);
    w.int("Global Photon Map", 1);
    w.int("Global Photon Estimate", irr.global_photons.estimate as i64);
    w.float("Global Photon Radius", irr.global_photons.radius);

    w.flag("Path Tracing", gi.engine == GiEngine::PathTracing);
    w.int("Path Tracing Samples", gi.path_tracing.samples as i64);

    let ao = &gi.ambient_occlusion;
    w.flag("Global AO", gi.engine == GiEngine::AmbientOcclusion);
    w.color("Global AO Bright", ao.bright);
    w.color("Global AO Dark", ao.dark);
    w.int("Global AO Samples", ao.samples as i64);
    w.float("Global AO Distance", ao.distance);

    w.flag("Fake Ambient Term", gi.engine == GiEngine::FakeAmbient);
    w.color("Fake Ambient Term Sky", gi.fake_ambient.sky);
    w.color("Fake Ambient Term Ground", gi.fake_ambient.ground);

    w.flag("View Caustics", gi.view.caustics);
    w.flag("View Globals", gi.view.globals);
    w.flag("View GI", gi.view.gi);
}

fn load_gi(r: &Reader<'_>, gi: &mut GiSettings) -> Result<()> {
    // Engine parameters are only required when their toggle is on; older
    // scenes store nothing else.
    gi.caustics = r.flag("Caustics")?;
    if let Some(n) = r.gated(gi.caustics, "Caustics Photon Number", Reader::uint)? {
        gi.caustic_photons.photons = n;
    }
    r.gated(gi.caustics, "Caustics Photon Map", |r, k| r.photon_map(k))?;
    if let Some(n) = r.gated(gi.caustics, "Caustics Photon Estimate", Reader::uint)? {
        gi.caustic_photons.estimate = n;
    }
    if let Some(v) = r.gated(gi.caustics, "Caustics Photon Radius", Reader::float)? {
        gi.caustic_photons.radius = v;
    }

    let igi = r.flag("IGI")?;
    if let Some(n) = r.gated(igi, "IGI Samples", Reader::uint)? {
        gi.instant_gi.samples = n;
    }
    if let Some(n) = r.gated(igi, "IGI Sets", Reader::uint)? {
        gi.instant_gi.sets = n;
    }
    if let Some(v) = r.gated(igi, "IGI Bias", Reader::float)? {
        gi.instant_gi.bias = v;
    }
    if let Some(n) = r.gated(igi, "IGI Bias Samples", Reader::uint)? {
        gi.instant_gi.bias_samples = n;
    }

    let irr_on = r.flag("IRR")?;
    let irr = &mut gi.irradiance_cache;
    if let Some(n) = r.gated(irr_on, "IRR Samples", Reader::uint)? {
        irr.samples = n;
    }
    if let Some(v) = r.gated(irr_on, "IRR Tolerance", Reader::float)? {
        irr.tolerance = v;
    }
    if let Some(v) = r.gated(irr_on, "IRR Space Min", Reader::float)? {
        irr.spacing_min = v;
    }
    if let Some(v) = r.gated(irr_on, "IRR Space Max", Reader::float)? {
        irr.spacing_max = v;
    }

    irr.use_global_photons = r.flag("Global Photon")?;
    let globals = irr.use_global_photons;
    if let Some(n) = r.gated(globals, "Global Photon Num", Reader::uint)? {
        irr.global_photons.photons = n;
    }
    r.gated(globals, "Global Photon Map", |r, k| r.photon_map(k))?;
    if let Some(n) = r.gated(globals, "Global Photon Estimate", Reader::uint)? {
        irr.global_photons.estimate = n;
    }
    if let Some(v) = r.gated(globals, "Global Photon Radius", Reader::float)? {
        irr.global_photons.radius = v;
    }

    let path = r.flag("Path Tracing")?;
    if let Some(n) = r.gated(path, "Path Tracing Samples", Reader::uint)? {
        gi.path_tracing.samples = n;
    }

    let ao_on = r.flag("Global AO")?;
    let ao = &mut gi.ambient_occlusion;
    if let Some(c) = r.gated(ao_on, "Global AO Bright", Reader::color)? {
        ao.bright = c;
    }
    if let Some(c) = r.gated(ao_on, "Global AO Dark", Reader::color)? {
        ao.dark = c;
    }
    if let Some(n) = r.gated(ao_on, "Global AO Samples", Reader::uint)? {
        ao.samples = n;
    }
    if let Some(v) = r.gated(ao_on, "Global AO Distance", Reader::float)? {
        ao.distance = v;
    }

    let fake = r.flag("Fake Ambient Term")?;
    if let Some(c) = r.gated(fake, "Fake Ambient Term Sky", Reader::color)? {
        gi.fake_ambient.sky = c;
    }
    if let Some(c) = r.gated(fake, "Fake Ambient Term Ground", Reader::color)? {
        gi.fake_ambient.ground = c;
    }

    let engines = [
        (igi, GiEngine::InstantGi),
        (irr_on, GiEngine::IrradianceCache),
        (path, GiEngine::PathTracing),
        (ao_on, GiEngine::AmbientOcclusion),
        (fake, GiEngine::FakeAmbient),
    ];
    gi.engine = engines
        .iter()
        .find(|(on, _)| *on)
        .map_or(GiEngine::None, |(_, engine)| *engine);
    if engines.iter().filter(|(on, _)| *on).count() > 1 {
        log::warn!(
            "Several GI engines enabled in stored settings, using {:?}",
            gi.engine
        );
    }

    gi.view.caustics = r.flag("View Caustics")?;
    gi.view.globals = r.flag("View Globals")?;
    gi.view.gi = r.flag("View GI")?;
    Ok(())
}

fn store_lights(settings: &ExportSettings, w: &mut Writer<'_>) {
    let l = &settings.lights;
    w.flag(LIGHT_MARKER, true);
    w.float("Lamp Multiplier", l.lamp_multiplier);
    w.float("Meshlight Multiplier", l.meshlight_multiplier);
    w.int("Light Samples", l.samples as i64);
    w.int("IBL Samples", l.ibl_samples as i64);
    w.flag("Image Based Light", l.ibl);
    w.flag("IBL Importance Sampling", l.ibl_importance_sampling);
    w.flag("Convert Unsupported Lamps", l.convert_unsupported);
    w.flag("Sun Lamp", l.import_sun);
    w.float("Sun Turbidity", l.sun_turbidity);
    w.int("Sun Samples", l.sun_samples as i64);
    w.flag("Infinite Plane", l.infinite_plane);
    w.color("Infinite Plane Color", l.plane_color);
}

fn load_lights(r: &Reader<'_>, settings: &mut ExportSettings) -> Result<()> {
    let l = &mut settings.lights;
    l.lamp_multiplier = r.float("Lamp Multiplier")?;
    l.meshlight_multiplier = r.float("Meshlight Multiplier")?;
    l.samples = r.uint("Light Samples")?;
    l.ibl_samples = r.uint("IBL Samples")?;
    l.ibl = r.flag("Image Based Light")?;
    l.ibl_importance_sampling = r.flag("IBL Importance Sampling")?;
    l.convert_unsupported = r.flag("Convert Unsupported Lamps")?;
    l.import_sun = r.flag("Sun Lamp")?;
    l.sun_turbidity = r.float("Sun Turbidity")?;
    l.sun_samples = r.uint("Sun Samples")?;
    l.infinite_plane = r.flag("Infinite Plane")?;
    l.plane_color = r.color("Infinite Plane Color")?;
    Ok(())
}

fn store_render(settings: &ExportSettings, w: &mut Writer<'_>) {
    let rs = &settings.render;
    w.flag(RENDER_MARKER, true);
    w.int("File Type", rs.format.index());
    w.int("Quick Option", rs.quick.index());
    w.float("Quick AO Distance", rs.quick_ambocc_distance);
    w.flag("-nogui", rs.nogui);
    w.flag("-smallmesh", rs.smallmesh);
    w.flag("-nogi", rs.nogi);
    w.flag("-nocaustics", rs.nocaustics);
    w.flag("-quick_ambocc", rs.quick_ambocc);
    w.flag("-ipr", rs.ipr);
    w.flag("animation", rs.animation);
}

fn load_render(r: &Reader<'_>, settings: &mut ExportSettings) -> Result<()> {
    let rs = &mut settings.render;
    rs.format = r.choice("File Type", ImageFormat::from_index)?;
    rs.quick = r.choice("Quick Option", QuickOption::from_index)?;
    rs.quick_ambocc_distance = r.float("Quick AO Distance")?;
    rs.nogui = r.flag("-nogui")?;
    rs.smallmesh = r.flag("-smallmesh")?;
    rs.nogi = r.flag("-nogi")?;
    rs.nocaustics = r.flag("-nocaustics")?;
    rs.quick_ambocc = r.flag("-quick_ambocc")?;
    rs.ipr = r.flag("-ipr")?;
    rs.animation = r.flag("animation")?;
    Ok(())
}

struct Writer<'a> {
    props: &'a mut PropertyMap,
}

impl Writer<'_> {
    fn int(&mut self, key: &str, value: i64) {
        self.props.insert(key, PropertyValue::Int(value));
    }

    fn float(&mut self, key: &str, value: f32) {
        self.props.insert(key, PropertyValue::Float(value as f64));
    }

    fn flag(&mut self, key: &str, value: bool) {
        let s = if value { "true" } else { "false" };
        self.props.insert(key, PropertyValue::Str(s.to_string()));
    }

    fn color(&mut self, key: &str, value: Color) {
        self.props.insert(key, PropertyValue::Color(value));
    }
}

struct Reader<'a> {
    props: &'a PropertyMap,
}

impl Reader<'_> {
    fn value(&self, key: &str) -> Result<&PropertyValue> {
        self.props
            .get(key)
            .ok_or_else(|| ExportError::InvalidSettings(format!("missing property '{}'", key)))
    }

    fn mistyped(key: &str, expected: &str) -> ExportError {
        ExportError::InvalidSettings(format!("property '{}' is not {}", key, expected))
    }

    /// A group marker; absent means the group was never stored.
    fn marker(&self, key: &str) -> Result<bool> {
        if self.props.contains_key(key) {
            self.flag(key)
        } else {
            Ok(false)
        }
    }

    fn int(&self, key: &str) -> Result<i64> {
        match self.value(key)? {
            PropertyValue::Int(v) => Ok(*v),
            _ => Err(Self::mistyped(key, "an integer")),
        }
    }

    fn uint(&self, key: &str) -> Result<u32> {
        u32::try_from(self.int(key)?).map_err(|_| Self::mistyped(key, "a non-negative integer"))
    }

    fn float(&self, key: &str) -> Result<f32> {
        match self.value(key)? {
            PropertyValue::Float(v) => Ok(*v as f32),
            PropertyValue::Int(v) => Ok(*v as f32),
            _ => Err(Self::mistyped(key, "a number")),
        }
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.value(key)? {
            PropertyValue::Str(s) if s == "true" => Ok(true),
            PropertyValue::Str(s) if s == "false" => Ok(false),
            _ => Err(Self::mistyped(key, "\"true\" or \"false\"")),
        }
    }

    fn color(&self, key: &str) -> Result<Color> {
        match self.value(key)? {
            PropertyValue::Color(c) => Ok(*c),
            _ => Err(Self::mistyped(key, "a color")),
        }
    }

    fn choice<T>(&self, key: &str, from_index: fn(i64) -> Option<T>) -> Result<T> {
        let index = self.int(key)?;
        from_index(index).ok_or_else(|| Self::mistyped(key, "a valid list index"))
    }

    /// Photon map lists have a single entry.
    fn photon_map(&self, key: &str) -> Result<()> {
        match self.int(key)? {
            1 => Ok(()),
            _ => Err(Self::mistyped(key, "a valid photon map index")),
        }
    }

    /// Read `key` when `required`, otherwise only if it is present.
    fn gated<T>(
        &self,
        required: bool,
        key: &str,
        read: impl Fn(&Self, &str) -> Result<T>,
    ) -> Result<Option<T>> {
        if required || self.props.contains_key(key) {
            read(self, key).map(Some)
        } else {
            Ok(None)
        }
    }
}
