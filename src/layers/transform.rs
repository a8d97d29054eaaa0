// src/layers/transform.rs - per-layer pixel transforms

use image::{imageops, ImageBuffer, Rgba, Rgba32FImage, RgbaImage};

use crate::config::ResampleFilter;
use crate::layout::geometry::rotated_bounds;

/// Resize to exactly `width` x `height`, ignoring the source aspect ratio
///
/// Filtering runs on premultiplied floating-point colour, so the RGB of fully
/// transparent pixels never bleeds into visible edges.
pub fn resize_exact(img: &RgbaImage, width: u32, height: u32, filter: ResampleFilter) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }

    let premultiplied: Rgba32FImage = ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        let pixel = img.get_pixel(x, y);
        let alpha = f32::from(pixel[3]) / 255.0;
        let channel = |i: usize| f32::from(pixel[i]) / 255.0 * alpha * HEADROOM;
        Rgba([channel(0), channel(1), channel(2), alpha * HEADROOM])
    });

    let resized = imageops::resize(&premultiplied, width, height, filter.into());

    ImageBuffer::from_fn(width, height, |x, y| unpremultiply(resized.get_pixel(x, y)))
}

/// Float resampling clamps to 1.0; scaling down first keeps filter overshoot
/// on alpha in proportion with the colour channels.
const HEADROOM: f32 = 0.5;

fn unpremultiply(pixel: &Rgba<f32>) -> Rgba<u8> {
    let alpha = pixel[3] / HEADROOM;
    let alpha_u8 = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    if alpha_u8 == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| ((pixel[i] / HEADROOM / alpha).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([channel(0), channel(1), channel(2), alpha_u8])
}

/// Rotate counter-clockwise by `degrees`, growing the canvas so nothing is clipped
///
/// Uncovered corners of the expanded canvas are fully transparent. Quarter
/// turns are lossless; other angles are resampled bilinearly on premultiplied
/// colour so transparent neighbours don't darken the edges.
pub fn rotate_expand(img: &RgbaImage, degrees: f64) -> RgbaImage {
    let turn = degrees.rem_euclid(360.0);
    if turn == 0.0 {
        return img.clone();
    }
    // imageops rotates clockwise
    if turn == 90.0 {
        return imageops::rotate270(img);
    }
    if turn == 180.0 {
        return imageops::rotate180(img);
    }
    if turn == 270.0 {
        return imageops::rotate90(img);
    }

    let (src_width, src_height) = img.dimensions();
    let (dst_width, dst_height) = rotated_bounds(src_width, src_height, degrees);
    let (sin, cos) = degrees.to_radians().sin_cos();

    let src_cx = f64::from(src_width) / 2.0;
    let src_cy = f64::from(src_height) / 2.0;
    let dst_cx = f64::from(dst_width) / 2.0;
    let dst_cy = f64::from(dst_height) / 2.0;

    ImageBuffer::from_fn(dst_width, dst_height, |x, y| {
        let dx = f64::from(x) + 0.5 - dst_cx;
        let dy = f64::from(y) + 0.5 - dst_cy;

        // Inverse mapping: y grows downward, so a visual counter-clockwise turn
        // is undone by rotating the destination offset the other way.
        let sx = dx * cos - dy * sin + src_cx - 0.5;
        let sy = dx * sin + dy * cos + src_cy - 0.5;

        sample_bilinear(img, sx, sy)
    })
}

/// Sample at a fractional pixel position; taps outside the image count as transparent
fn sample_bilinear(img: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (width, height) = (i64::from(img.width()), i64::from(img.height()));
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (0, 0, (1.0 - fx) * (1.0 - fy)),
        (1, 0, fx * (1.0 - fy)),
        (0, 1, (1.0 - fx) * fy),
        (1, 1, fx * fy),
    ];

    let mut premultiplied = [0.0f64; 3];
    let mut coverage = 0.0f64;

    for (ox, oy, weight) in taps {
        if weight <= 0.0 {
            continue;
        }
        let (px, py) = (x0 + ox, y0 + oy);
        if px < 0 || py < 0 || px >= width || py >= height {
            continue;
        }

        let pixel = img.get_pixel(px as u32, py as u32);
        let alpha = f64::from(pixel[3]) / 255.0 * weight;
        for (channel, value) in premultiplied.iter_mut().zip(pixel.0.iter()) {
            *channel += f64::from(*value) * alpha;
        }
        coverage += alpha;
    }

    if coverage <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let unpremultiply = |value: f64| (value / coverage).round().clamp(0.0, 255.0) as u8;
    Rgba([
        unpremultiply(premultiplied[0]),
        unpremultiply(premultiplied[1]),
        unpremultiply(premultiplied[2]),
        (coverage * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Scale every pixel's alpha by `percent` / 100, rounding half-up
///
/// `percent` is clamped to 0..=100, so opacity only ever lowers alpha.
pub fn apply_opacity(img: &mut RgbaImage, percent: i32) {
    let percent = percent.clamp(0, 100) as u32;
    if percent == 100 {
        return;
    }

    for pixel in img.pixels_mut() {
        let alpha = u32::from(pixel[3]);
        pixel[3] = ((alpha * percent + 50) / 100).min(alpha) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128, 255])
        })
    }

    #[test]
    fn test_resize_exact_ignores_aspect_ratio() {
        let img = gradient(40, 10);
        let resized = resize_exact(&img, 25, 30, ResampleFilter::Lanczos3);
        assert_eq!(resized.dimensions(), (25, 30));
    }

    #[test]
    fn test_resize_keeps_flat_colour() {
        let img = RgbaImage::from_pixel(64, 32, Rgba([200, 40, 90, 255]));
        let resized = resize_exact(&img, 17, 51, ResampleFilter::Lanczos3);
        for pixel in resized.pixels() {
            for (got, want) in pixel.0.iter().zip([200u8, 40, 90, 255]) {
                assert!((i16::from(*got) - i16::from(want)).abs() <= 1, "{:?}", pixel);
            }
        }
    }

    #[test]
    fn test_resize_does_not_darken_edges_next_to_transparent_black() {
        let logo = RgbaImage::from_fn(100, 100, |x, _| {
            if x < 50 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });

        let resized = resize_exact(&logo, 37, 37, ResampleFilter::Lanczos3);
        for pixel in resized.pixels().filter(|p| p[3] > 0) {
            assert!(pixel[0] >= 250 && pixel[1] >= 250 && pixel[2] >= 250, "dark fringe: {:?}", pixel);
        }

        let mut canvas = RgbaImage::from_pixel(60, 60, Rgba([255, 255, 255, 255]));
        imageops::overlay(&mut canvas, &resized, 10, 10);
        let darkest = canvas.pixels().map(|p| p[0]).min().unwrap();
        assert!(darkest >= 250, "darkest red channel on canvas: {}", darkest);
    }

    #[test]
    fn test_resize_keeps_transparent_pixels_transparent() {
        let img = RgbaImage::from_pixel(30, 30, Rgba([0, 0, 0, 0]));
        let resized = resize_exact(&img, 11, 47, ResampleFilter::CatmullRom);
        assert!(resized.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let img = gradient(30, 12);
        assert_eq!(rotate_expand(&img, 0.0), img);
        assert_eq!(rotate_expand(&img, 360.0), img);
    }

    #[test]
    fn test_rotate_quarter_turn_counter_clockwise() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 0, Rgba([255, 0, 0, 255])); // top-right

        let rotated = rotate_expand(&img, 90.0);
        assert_eq!(rotated.dimensions(), (2, 3));
        // Counter-clockwise: top-right corner ends up top-left
        assert_eq!(*rotated.get_pixel(0, 0), Rgba([255, 0, 0, 255]));

        let clockwise = rotate_expand(&img, -90.0);
        assert_eq!(*clockwise.get_pixel(1, 2), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_rotate_half_turn_twice_restores_image() {
        let img = gradient(21, 9);
        let once = rotate_expand(&img, 180.0);
        assert_eq!(once.dimensions(), img.dimensions());
        assert_eq!(rotate_expand(&once, 180.0), img);
        assert_eq!(rotate_expand(&img, -180.0), once);
    }

    #[test]
    fn test_rotate_arbitrary_angle_expands_and_clears_corners() {
        let img = RgbaImage::from_pixel(100, 100, Rgba([10, 200, 30, 255]));
        let rotated = rotate_expand(&img, 45.0);

        assert_eq!(rotated.dimensions(), (141, 141));
        assert_eq!(rotated.get_pixel(0, 0)[3], 0);
        assert_eq!(rotated.get_pixel(140, 140)[3], 0);

        let center = rotated.get_pixel(70, 70);
        assert_eq!(*center, Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn test_rotate_edges_keep_colour_not_black() {
        let img = RgbaImage::from_pixel(50, 20, Rgba([250, 250, 250, 255]));
        let rotated = rotate_expand(&img, 30.0);

        for pixel in rotated.pixels().filter(|p| p[3] > 0) {
            assert!(pixel[0] >= 249, "edge pixel darkened: {:?}", pixel);
        }
    }

    #[test]
    fn test_opacity_zero_clears_alpha() {
        let mut img = gradient(8, 8);
        apply_opacity(&mut img, 0);
        assert!(img.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_opacity_full_is_untouched() {
        let mut img = gradient(8, 8);
        img.put_pixel(3, 3, Rgba([1, 2, 3, 77]));
        let before = img.clone();
        apply_opacity(&mut img, 100);
        assert_eq!(img, before);
    }

    #[test]
    fn test_opacity_rounds_and_never_raises_alpha() {
        let mut img = RgbaImage::from_pixel(1, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 0, 3]));
        img.put_pixel(0, 2, Rgba([9, 9, 9, 0]));

        apply_opacity(&mut img, 50);
        assert_eq!(img.get_pixel(0, 0)[3], 128); // 127.5 rounds up
        assert_eq!(img.get_pixel(0, 1)[3], 2); // 1.5 rounds up
        assert_eq!(img.get_pixel(0, 2)[3], 0);

        let mut over = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 100]));
        apply_opacity(&mut over, 180);
        assert_eq!(over.get_pixel(0, 0)[3], 100);
    }
}
