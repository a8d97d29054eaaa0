use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use thumbnail_compositor::{
    composition::Compositor,
    layers::{rotate_expand, SourceImages},
    layout::LayoutParameters,
};

fn thumbnail_sources() -> SourceImages {
    SourceImages {
        background: RgbaImage::from_fn(1280, 720, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])),
        center: RgbaImage::from_pixel(1920, 1080, Rgba([200, 200, 200, 255])),
        logo: RgbaImage::from_pixel(512, 256, Rgba([220, 40, 40, 200])),
        banner: RgbaImage::from_pixel(1200, 180, Rgba([10, 10, 10, 230])),
    }
}

fn bench_compose(c: &mut Criterion) {
    let sources = thumbnail_sources();
    let compositor = Compositor::default();

    c.bench_function("compose_defaults_720p", |b| {
        b.iter(|| compositor.compose(black_box(&sources), black_box(&LayoutParameters::default())))
    });

    let tilted = LayoutParameters {
        logo_rotation: 25,
        logo_opacity: 80,
        ..LayoutParameters::default()
    };
    c.bench_function("compose_tilted_logo_720p", |b| {
        b.iter(|| compositor.compose(black_box(&sources), black_box(&tilted)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let logo = RgbaImage::from_pixel(489, 244, Rgba([220, 40, 40, 255]));
    c.bench_function("rotate_expand_37deg", |b| b.iter(|| rotate_expand(black_box(&logo), 37.0)));
}

criterion_group!(benches, bench_compose, bench_rotate);
criterion_main!(benches);
