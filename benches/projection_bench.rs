use criterion::{Criterion, criterion_group, criterion_main};
use glam::DVec3;
use polar_axes_rs::api::{SceneEngine, SceneEngineConfig};
use polar_axes_rs::axes::{LabelFormat, PolarAxesActor};
use polar_axes_rs::core::{Viewport, compute_point_normals, torus_mesh};
use polar_axes_rs::render::{Color, RasterRenderer, Renderer};
use polar_axes_rs::scene::{Actor, Camera, Light, Scene, SurfaceProperty};
use std::hint::black_box;

fn reference_scene() -> Scene {
    let mut mesh = torus_mesh(1.5, 0.6, 96, 48).expect("valid torus");
    compute_point_normals(&mut mesh);
    let bounds = mesh.bounds().expect("non-empty mesh");

    let mut scene = Scene::new(Color::rgb(0.8, 0.8, 0.8));
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
    scene.add_polar_axes(PolarAxesActor {
        bounds,
        pole: DVec3::new(0.5, 1.0, 3.0),
        auto_scale_radius: false,
        maximum_radius: 3.0,
        maximum_angle: 210.0,
        number_of_radial_axes: 8,
        number_of_polar_axis_ticks: 11,
        auto_subdivide_polar_axis: false,
        radial_label_format: LabelFormat::parse("%6.1f").expect("valid spec"),
        screen_size: 9.0,
        ..PolarAxesActor::default()
    });
    scene
}

fn bench_frame_build(c: &mut Criterion) {
    let scene = reference_scene();
    let viewport = Viewport::new(600, 600);

    c.bench_function("frame_build_torus_600", |b| {
        b.iter(|| {
            let frame = black_box(&scene)
                .build_frame(black_box(viewport), true)
                .expect("frame builds");
            black_box(frame.triangles.len());
        })
    });
}

fn bench_full_raster(c: &mut Criterion) {
    let scene = reference_scene();
    let viewport = Viewport::new(600, 600);
    let frame = scene.build_frame(viewport, true).expect("frame builds");

    c.bench_function("raster_torus_600", |b| {
        b.iter(|| {
            let mut renderer = RasterRenderer::new();
            renderer.render(black_box(&frame)).expect("render succeeds");
            black_box(renderer.framebuffer().is_some());
        })
    });
}

fn bench_engine_end_to_end(c: &mut Criterion) {
    c.bench_function("engine_render_torus_300", |b| {
        b.iter(|| {
            let config = SceneEngineConfig::new(Viewport::new(300, 300));
            let mut engine =
                SceneEngine::new(RasterRenderer::new(), config).expect("engine init");
            *engine.scene_mut() = reference_scene();
            engine.render().expect("render succeeds");
            black_box(engine.into_renderer().framebuffer().is_some());
        })
    });
}

criterion_group!(
    benches,
    bench_frame_build,
    bench_full_raster,
    bench_engine_end_to_end
);
criterion_main!(benches);
