use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shadow_showcase::camera::PerspectiveCamera;
use shadow_showcase::geometry::Geometry;
use shadow_showcase::lights::{LightKind, LightRig, DEFAULT_SHADOW_MAP_SIZE};
use shadow_showcase::registry::Catalog;
use shadow_showcase::renderer::{helper_lines, pack_lights, ShadowLayout};
use shadow_showcase::scenes::create_showcase_scene;

fn bench_tessellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellation");

    for segments in [16u32, 32, 64] {
        group.bench_with_input(BenchmarkId::new("sphere", segments), &segments, |b, &s| {
            let geometry = Geometry::sphere(0.5, s, s);
            b.iter(|| black_box(geometry.tessellate()))
        });
        group.bench_with_input(BenchmarkId::new("torus", segments), &segments, |b, &s| {
            let geometry = Geometry::torus(0.3, 0.2, s, s * 2);
            b.iter(|| black_box(geometry.tessellate()))
        });
    }

    group.finish();
}

fn bench_frame_preparation(c: &mut Criterion) {
    let catalog = Catalog::new(None);
    let lights = LightRig::new(DEFAULT_SHADOW_MAP_SIZE).expect("valid light rig");
    let showcase = create_showcase_scene(&catalog, lights, PerspectiveCamera::new(16.0 / 9.0))
        .expect("showcase scene");
    let mut scene = showcase.scene;
    let animator = showcase.animator;

    let mut group = c.benchmark_group("frame");

    group.bench_function("animate", |b| {
        let mut t = 0.0f32;
        b.iter(|| {
            t += 1.0 / 60.0;
            black_box(animator.apply(&mut scene, t).is_ok())
        })
    });

    group.bench_function("world_matrices", |b| b.iter(|| black_box(scene.world_matrices())));

    group.bench_function("draw_list", |b| b.iter(|| black_box(scene.draw_list())));

    group.bench_function("shadow_views", |b| {
        b.iter(|| {
            let layout = ShadowLayout::from_rig(scene.lights());
            black_box(pack_lights(scene.lights(), &layout))
        })
    });

    scene.lights_mut().set_helper_visible(LightKind::Point, true);
    group.bench_function("helper_lines", |b| b.iter(|| black_box(helper_lines(scene.lights()))));

    group.finish();
}

criterion_group!(benches, bench_tessellation, bench_frame_preparation);
criterion_main!(benches);
