//! Placement arithmetic for the three pasted layers.
//!
//! Everything here is integer maths on image dimensions. Fractional results are
//! truncated toward zero and the banner is centred with floor division, so a
//! given set of inputs always lands on the same pixels.

use crate::{config::RenderConfig, layout::LayoutParameters};

/// Size and top-left offset of a layer on the canvas
///
/// Offsets are signed: layers may be pushed above, left of, or past the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Where every layer goes for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Background (and output) dimensions
    pub canvas: (u32, u32),

    /// Center image, force-fit into the target rectangle
    pub center: Placement,

    /// Logo size before rotation, positioned at its top-left corner
    pub logo: Placement,

    pub banner: Placement,
}

impl Layout {
    /// Compute the layout for a background of size `canvas` and the given source sizes
    pub fn compute(
        canvas: (u32, u32),
        logo_source: (u32, u32),
        banner_source: (u32, u32),
        params: &LayoutParameters,
        render: &RenderConfig,
    ) -> Self {
        let (bg_width, bg_height) = canvas;
        let margin = i64::from(render.margin);

        let (target_width, target_height) = target_rect(canvas, render.margin);
        let center = Placement {
            x: margin,
            y: margin,
            width: target_width,
            height: target_height,
        };

        let target_w = i64::from(target_width);
        let percent = i64::from(render.logo_width_percent);

        // Base width is computed at 100% logo size; the band it leaves is where the slider moves the logo.
        let base_logo_width = target_w * percent / 100;
        let logo_width = target_w * percent * i64::from(params.logo_size) / 10_000;
        let logo_width = clamp_dimension(logo_width);
        let logo_height = scale_proportional(logo_source, logo_width);
        let logo = Placement {
            x: margin + (target_w - base_logo_width) * i64::from(params.logo_position) / 100,
            y: margin + i64::from(params.logo_y),
            width: logo_width,
            height: logo_height,
        };

        let banner_width = clamp_dimension(i64::from(bg_width) * i64::from(params.banner_size) / 100);
        let banner_height = scale_proportional(banner_source, banner_width);
        let banner = Placement {
            x: (i64::from(bg_width) - i64::from(banner_width)).div_euclid(2),
            y: i64::from(bg_height) - i64::from(banner_height) + i64::from(params.banner_y),
            width: banner_width,
            height: banner_height,
        };

        Self {
            canvas,
            center,
            logo,
            banner,
        }
    }
}

/// Background size minus the margin on every side, never below 1x1
pub fn target_rect(canvas: (u32, u32), margin: u32) -> (u32, u32) {
    let inset = margin.saturating_mul(2);
    (
        canvas.0.saturating_sub(inset).max(1),
        canvas.1.saturating_sub(inset).max(1),
    )
}

/// Bounding box of a `width` x `height` rectangle rotated by `degrees`
///
/// Quarter turns are exact. Other angles round half-up after snapping values
/// that sit within 1e-6 of an integer, so sin/cos noise never adds a pixel.
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let turn = degrees.rem_euclid(360.0);
    if turn == 0.0 || turn == 180.0 {
        return (width, height);
    }
    if turn == 90.0 || turn == 270.0 {
        return (height, width);
    }

    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let (w, h) = (f64::from(width), f64::from(height));

    let new_width = round_half_up(w * cos + h * sin);
    let new_height = round_half_up(w * sin + h * cos);
    (new_width.max(1), new_height.max(1))
}

fn round_half_up(value: f64) -> u32 {
    let nearest = value.round();
    let snapped = if (value - nearest).abs() < 1e-6 { nearest } else { value };
    (snapped + 0.5).floor() as u32
}

fn scale_proportional(source: (u32, u32), width: u32) -> u32 {
    let (src_width, src_height) = source;
    if src_width == 0 {
        return 1;
    }
    clamp_dimension(i64::from(src_height) * i64::from(width) / i64::from(src_width))
}

fn clamp_dimension(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}
