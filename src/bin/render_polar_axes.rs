//! Regression harness for the polar-axes scene.
//!
//! Loads a BYU mesh (or falls back to a procedural torus), assembles the
//! reference scene — shaded mesh, bounding-box outline, polar axes overlay,
//! camera and light — renders one 600x600 frame and optionally compares it
//! against a blessed baseline PNG. Exits 0 when the image matched (or no
//! comparison was requested), 1 on mismatch, 2 on usage or IO errors.

use std::fs;
use std::path::PathBuf;

use glam::DVec3;
use polar_axes_rs::api::{SceneEngine, SceneEngineConfig};
use polar_axes_rs::axes::{LabelFormat, PolarAxesActor, TextStyle};
use polar_axes_rs::core::{
    TriangleMesh, Viewport, compute_point_normals, outline_edges, read_byu_geometry, torus_mesh,
};
use polar_axes_rs::regress::{BaselineCheck, RegressionOutcome, check_against_baseline};
use polar_axes_rs::render::{Color, RasterRenderer};
use polar_axes_rs::scene::{Actor, Camera, Light, LineActor, LineProperty, SurfaceProperty};

const USAGE: &str = "\
usage: render_polar_axes [options]
  --data <path>              BYU geometry file (default: procedural torus)
  --baseline <path>          baseline PNG to compare against
  --output <path>            rendered PNG destination
                             (default: target/render_polar_axes.png)
  --config <path>            engine config JSON (viewport, background, labels)
  --threshold <0..255>       per-channel tolerance (default: 2)
  --max-diff-pixels <n>      differing pixels accepted (default: 0)
  --bless                    write the baseline instead of comparing
";

struct Args {
    data: Option<PathBuf>,
    baseline: Option<PathBuf>,
    output: PathBuf,
    config: Option<PathBuf>,
    threshold: u8,
    max_diff_pixels: usize,
    bless: bool,
}

fn main() {
    let _ = polar_axes_rs::telemetry::init_default_tracing();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    }
}

fn run() -> Result<i32, String> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            let config: SceneEngineConfig = serde_json::from_str(&raw)
                .map_err(|err| format!("failed to parse config json: {err}"))?;
            config
        }
        None => SceneEngineConfig::new(Viewport::new(600, 600)),
    };

    let mesh = load_mesh(&args)?;
    let mut engine = SceneEngine::new(RasterRenderer::new(), config)
        .map_err(|err| format!("engine init failed: {err}"))?;
    assemble_scene(&mut engine, mesh).map_err(|err| format!("scene assembly failed: {err}"))?;

    engine.render().map_err(|err| format!("render failed: {err}"))?;
    let image = engine
        .into_renderer()
        .into_image()
        .map_err(|err| format!("no image produced: {err}"))?;

    if let Some(parent) = args.output.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create `{}`: {err}", parent.display()))?;
    }
    image
        .save(&args.output)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;
    eprintln!("rendered {}", args.output.display());

    let Some(baseline) = &args.baseline else {
        return Ok(0);
    };

    if args.bless {
        if let Some(parent) = baseline.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create `{}`: {err}", parent.display()))?;
        }
        image
            .save(baseline)
            .map_err(|err| format!("failed to write `{}`: {err}", baseline.display()))?;
        eprintln!("blessed {}", baseline.display());
        return Ok(0);
    }

    let check = BaselineCheck::new(baseline)
        .with_tolerance(args.threshold)
        .with_max_differing_pixels(args.max_diff_pixels);
    let outcome = check_against_baseline(&image, &check)
        .map_err(|err| format!("comparison failed: {err}"))?;

    match &outcome {
        RegressionOutcome::Passed(diff) => {
            eprintln!(
                "baseline matched (mean error {:.3}, max error {})",
                diff.mean_error, diff.max_error
            );
        }
        RegressionOutcome::Mismatch(diff) => {
            eprintln!(
                "baseline mismatch: {} of {} pixels differ (max error {})",
                diff.differing_pixels,
                diff.total_pixels(),
                diff.max_error
            );
        }
        RegressionOutcome::BaselineMissing => {
            eprintln!(
                "baseline `{}` missing; rerun with --bless to create it",
                baseline.display()
            );
        }
        RegressionOutcome::BaselineUpdated => {
            eprintln!("blessed {}", baseline.display());
        }
    }

    Ok(outcome.exit_code())
}

fn load_mesh(args: &Args) -> Result<TriangleMesh, String> {
    match &args.data {
        Some(path) => read_byu_geometry(path)
            .map_err(|err| format!("failed to load `{}`: {err}", path.display())),
        None => torus_mesh(1.5, 0.6, 96, 48).map_err(|err| format!("torus source failed: {err}")),
    }
}

/// The reference polar-axes scene: green shaded mesh, black bounding-box
/// outline, blue radial axes with red arcs and labels, fixed camera and
/// light.
fn assemble_scene(
    engine: &mut SceneEngine<RasterRenderer>,
    mut mesh: TriangleMesh,
) -> polar_axes_rs::SceneResult<()> {
    compute_point_normals(&mut mesh);
    let bounds = mesh
        .bounds()
        .ok_or_else(|| polar_axes_rs::SceneError::InvalidData("mesh has no points".to_owned()))?;

    let scene = engine.scene_mut();

    scene.set_camera(Camera {
        position: DVec3::new(2.0, 6.0, 13.0),
        focal_point: DVec3::new(0.9, 1.0, 0.0),
        clipping_range: (1.0, 100.0),
        ..Camera::default()
    });
    scene.add_light(Light {
        position: DVec3::new(7.0, 7.0, 4.0),
        focal_point: DVec3::new(0.21406, 1.5, 0.0),
        ..Light::default()
    });

    scene.add_mesh_actor(
        "mesh",
        Actor::new(mesh).with_property(SurfaceProperty {
            diffuse_color: Color::rgb(0.5, 0.8, 0.3),
            ..SurfaceProperty::default()
        }),
    );
    scene.add_line_actor(
        "outline",
        LineActor::new(outline_edges(bounds).to_vec())
            .with_property(LineProperty::new(Color::BLACK, 1.0)),
    );

    let red = Color::rgb(1.0, 0.0, 0.0);
    scene.add_polar_axes(PolarAxesActor {
        bounds,
        pole: DVec3::new(0.5, 1.0, 3.0),
        auto_scale_radius: false,
        maximum_radius: 3.0,
        maximum_angle: 210.0,
        number_of_radial_axes: 8,
        number_of_polar_axis_ticks: 11,
        auto_subdivide_polar_axis: false,
        radial_label_format: LabelFormat::parse("%6.1f")?,
        screen_size: 9.0,
        radial_axes_property: LineProperty::new(Color::rgb(0.0, 0.0, 1.0), 1.0),
        polar_arcs_property: LineProperty::new(red, 1.0),
        title_text: TextStyle { color: red },
        label_text: TextStyle { color: red },
        ..PolarAxesActor::default()
    });

    Ok(())
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        data: None,
        baseline: None,
        output: PathBuf::from("target/render_polar_axes.png"),
        config: None,
        threshold: 2,
        max_diff_pixels: 0,
        bless: false,
    };

    let mut raw = std::env::args().skip(1);
    while let Some(flag) = raw.next() {
        match flag.as_str() {
            "--data" => args.data = Some(PathBuf::from(expect_value(&mut raw, "--data")?)),
            "--baseline" => {
                args.baseline = Some(PathBuf::from(expect_value(&mut raw, "--baseline")?));
            }
            "--output" => args.output = PathBuf::from(expect_value(&mut raw, "--output")?),
            "--config" => args.config = Some(PathBuf::from(expect_value(&mut raw, "--config")?)),
            "--threshold" => {
                let value = expect_value(&mut raw, "--threshold")?;
                args.threshold = value
                    .parse()
                    .map_err(|_| format!("invalid --threshold `{value}`"))?;
            }
            "--max-diff-pixels" => {
                let value = expect_value(&mut raw, "--max-diff-pixels")?;
                args.max_diff_pixels = value
                    .parse()
                    .map_err(|_| format!("invalid --max-diff-pixels `{value}`"))?;
            }
            "--bless" => args.bless = true,
            "--help" | "-h" => {
                eprint!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    if args.bless && args.baseline.is_none() {
        return Err("--bless requires --baseline".to_owned());
    }

    Ok(args)
}

fn expect_value(raw: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    raw.next().ok_or_else(|| format!("{flag} needs a value"))
}
