// Minimal smoke run: compose synthetic layers without touching the input side of the filesystem

use image::{Rgba, RgbaImage};

use thumbnail_compositor::{
    composition::{preview_surface, Compositor, PreviewConfig},
    config::RenderConfig,
    layers::{write_png_atomic, SourceImages},
    layout::LayoutParameters,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🎨 Testing Thumbnail-Compositor Core Functionality");

    // Test 1: Synthetic layers
    println!("\n1. Building synthetic layers...");
    let sources = SourceImages {
        background: RgbaImage::from_fn(1280, 720, |x, y| {
            Rgba([(x / 5) as u8, (y / 3) as u8, 120, 255])
        }),
        center: RgbaImage::from_pixel(640, 360, Rgba([240, 240, 240, 255])),
        logo: RgbaImage::from_fn(200, 100, |x, _| {
            let alpha = if x % 40 < 20 { 255 } else { 0 };
            Rgba([220, 30, 30, alpha])
        }),
        banner: RgbaImage::from_pixel(800, 120, Rgba([20, 20, 20, 230])),
    };
    println!("   Background: {}x{}", sources.background.width(), sources.background.height());

    // Test 2: Compose with a tilted, faded logo
    println!("\n2. Composing...");
    let params = LayoutParameters {
        logo_rotation: 15,
        logo_opacity: 85,
        ..LayoutParameters::default()
    };
    let compositor = Compositor::new(RenderConfig::default());
    let composition = compositor.compose(&sources, &params);

    println!("   Center:  {:?}", composition.layout.center);
    println!("   Logo:    {:?} -> {:?} rotated", composition.layout.logo, composition.logo_bounds);
    println!("   Banner:  {:?}", composition.layout.banner);
    assert_eq!(composition.layout.center.width, 1224);
    assert_eq!(composition.layout.center.height, 664);

    // Test 3: Save thumbnail and preview
    println!("\n3. Saving outputs...");
    let written = write_png_atomic("minimal_test_output.png", &composition.canvas)?;
    println!("   📁 Thumbnail saved to: minimal_test_output.png ({} bytes)", written);

    let preview = preview_surface(&composition.canvas, &PreviewConfig::default(), compositor.config().filter);
    write_png_atomic("minimal_test_preview.png", &preview)?;
    println!("   📁 Preview saved to: minimal_test_preview.png ({}x{})", preview.width(), preview.height());

    println!("\n🎉 All checks passed! Thumbnail-Compositor core is working.");

    Ok(())
}
