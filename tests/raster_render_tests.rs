use glam::DVec3;
use polar_axes_rs::api::{SceneEngine, SceneEngineConfig};
use polar_axes_rs::core::{Viewport, compute_point_normals, torus_mesh};
use polar_axes_rs::render::{Color, RasterRenderer};
use polar_axes_rs::scene::{Actor, Camera, Light, SurfaceProperty};

const BACKGROUND: [u8; 4] = [204, 204, 204, 255];

fn torus_engine(viewport: Viewport) -> SceneEngine<RasterRenderer> {
    let mut mesh = torus_mesh(1.5, 0.6, 48, 24).expect("valid torus");
    compute_point_normals(&mut mesh);

    let config = SceneEngineConfig::new(viewport).with_background(Color::rgb(0.8, 0.8, 0.8));
    let mut engine = SceneEngine::new(RasterRenderer::new(), config).expect("engine init");

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
        "torus",
        Actor::new(mesh).with_property(SurfaceProperty {
            diffuse_color: Color::rgb(0.5, 0.8, 0.3),
            ..SurfaceProperty::default()
        }),
    );

    engine
}

#[test]
fn rendered_frame_encodes_as_png() {
    let mut engine = torus_engine(Viewport::new(200, 200));
    engine.render().expect("render succeeds");

    let renderer = engine.into_renderer();
    let bytes = renderer
        .framebuffer()
        .expect("framebuffer present")
        .png_bytes()
        .expect("png encoding");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "missing PNG signature");
}

#[test]
fn mesh_paints_pixels_without_flooding_the_frame() {
    let mut engine = torus_engine(Viewport::new(200, 200));
    engine.render().expect("render succeeds");

    let image = engine.into_renderer().into_image().expect("image present");
    let painted = image
        .pixels()
        .filter(|pixel| pixel.0 != BACKGROUND)
        .count();
    let total = (image.width() * image.height()) as usize;

    assert!(painted > 500, "too few painted pixels: {painted}");
    assert!(
        painted < total * 4 / 5,
        "background vanished: {painted} of {total}"
    );
}

#[test]
fn mesh_color_dominates_where_the_camera_looks() {
    let mut engine = torus_engine(Viewport::new(200, 200));
    engine.render().expect("render succeeds");

    let image = engine.into_renderer().into_image().expect("image present");
    // The focal point sits inside the torus tube, so the frame center lands
    // on the shaded surface: green channel above red and blue.
    let mut found_green = false;
    for y in 96..=104 {
        for x in 96..=104 {
            let [red, green, blue, _] = image.get_pixel(x, y).0;
            if green > red && green > blue {
                found_green = true;
            }
        }
    }
    assert!(found_green, "no shaded mesh pixel near the frame center");
}

#[test]
fn render_is_deterministic_across_runs() {
    let mut first = torus_engine(Viewport::new(120, 120));
    first.render().expect("render succeeds");
    let first_image = first.into_renderer().into_image().expect("image present");

    let mut second = torus_engine(Viewport::new(120, 120));
    second.render().expect("render succeeds");
    let second_image = second.into_renderer().into_image().expect("image present");

    assert_eq!(first_image.as_raw(), second_image.as_raw());
}

#[test]
fn corners_stay_background_around_a_small_centered_mesh() {
    use polar_axes_rs::core::octahedron_mesh;

    let config =
        SceneEngineConfig::new(Viewport::new(64, 48)).with_background(Color::rgb(0.8, 0.8, 0.8));
    let mut engine = SceneEngine::new(RasterRenderer::new(), config).expect("engine init");
    let scene = engine.scene_mut();
    scene.set_camera(Camera {
        position: DVec3::new(0.0, 0.0, 10.0),
        focal_point: DVec3::ZERO,
        clipping_range: (1.0, 100.0),
        ..Camera::default()
    });
    let mut mesh = octahedron_mesh(1.0);
    compute_point_normals(&mut mesh);
    scene.add_mesh_actor("octahedron", Actor::new(mesh));

    engine.render().expect("render succeeds");
    let image = engine.into_renderer().into_image().expect("image present");

    // A unit octahedron 10 units away covers well under half the frame.
    assert_eq!(image.get_pixel(0, 0).0, BACKGROUND);
    assert_eq!(image.get_pixel(63, 47).0, BACKGROUND);
    let center = image.get_pixel(32, 24).0;
    assert_ne!(center, BACKGROUND);
}
