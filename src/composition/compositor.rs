use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::{imageops, RgbaImage};
use tracing::{debug, info, warn};

use crate::{
    config::RenderConfig,
    error::Result,
    layers::{
        apply_opacity, resize_exact, rotate_expand, write_png_atomic, SourceImages, SourcePaths,
    },
    layout::{Layout, LayoutParameters},
};

/// A finished canvas together with the layout that produced it
#[derive(Debug, Clone)]
pub struct Composition {
    pub canvas: RgbaImage,
    pub layout: Layout,

    /// Logo size after rotation, i.e. the footprint actually pasted
    pub logo_bounds: (u32, u32),
}

/// Summary of a render written to disk
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub output: PathBuf,
    pub layout: Layout,
    pub logo_bounds: (u32, u32),
    pub bytes_written: u64,
    pub elapsed: Duration,
}

/// Stacks background, center image, logo and banner into one thumbnail
///
/// The pipeline is fixed:
/// 1. Decode all four layers as RGBA
/// 2. Force-fit the center image into the area inside the margin
/// 3. Scale, rotate and fade the logo
/// 4. Scale the banner to a fraction of the background width
/// 5. Paint center, logo, banner over the background in that order
///
/// Each call is independent; nothing is cached between renders.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    config: RenderConfig,
}

impl Compositor {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Compose already-decoded layers
    pub fn compose(&self, sources: &SourceImages, params: &LayoutParameters) -> Composition {
        let filter = self.config.filter;
        let layout = Layout::compute(
            sources.background.dimensions(),
            sources.logo.dimensions(),
            sources.banner.dimensions(),
            params,
            &self.config,
        );

        debug!("Layout: {:?}", layout);

        let center = resize_exact(&sources.center, layout.center.width, layout.center.height, filter);
        let logo = self.prepare_logo(&sources.logo, &layout, params);
        let banner = resize_exact(&sources.banner, layout.banner.width, layout.banner.height, filter);
        let logo_bounds = logo.dimensions();

        let mut canvas = sources.background.clone();
        imageops::overlay(&mut canvas, &center, layout.center.x, layout.center.y);
        imageops::overlay(&mut canvas, &logo, layout.logo.x, layout.logo.y);
        imageops::overlay(&mut canvas, &banner, layout.banner.x, layout.banner.y);

        Composition {
            canvas,
            layout,
            logo_bounds,
        }
    }

    /// Decode the layers at `paths` and compose them
    pub fn render_image(&self, paths: &SourcePaths, params: &LayoutParameters) -> Result<Composition> {
        let sources = SourceImages::load(paths).map_err(|e| {
            warn!("Failed to load layers: {}", e);
            e
        })?;

        info!(
            "Loaded layers: background {}x{}, center {}x{}, logo {}x{}, banner {}x{}",
            sources.background.width(), sources.background.height(),
            sources.center.width(), sources.center.height(),
            sources.logo.width(), sources.logo.height(),
            sources.banner.width(), sources.banner.height()
        );

        Ok(self.compose(&sources, params))
    }

    /// Decode, compose and write the thumbnail to `output` as PNG
    ///
    /// Nothing is written unless every step succeeds; a previous file at
    /// `output` survives any failure.
    pub fn render<P: AsRef<Path>>(
        &self,
        paths: &SourcePaths,
        params: &LayoutParameters,
        output: P,
    ) -> Result<RenderReport> {
        let output = output.as_ref();
        let started = Instant::now();

        info!("🎨 Rendering thumbnail to {:?}", output);
        let composition = self.render_image(paths, params)?;

        let bytes_written = write_png_atomic(output, &composition.canvas)?;
        let elapsed = started.elapsed();

        info!(
            "✅ Thumbnail written: {}x{}, {} KB in {:.0?}",
            composition.canvas.width(),
            composition.canvas.height(),
            bytes_written / 1024,
            elapsed
        );

        Ok(RenderReport {
            output: output.to_path_buf(),
            layout: composition.layout,
            logo_bounds: composition.logo_bounds,
            bytes_written,
            elapsed,
        })
    }

    fn prepare_logo(&self, logo: &RgbaImage, layout: &Layout, params: &LayoutParameters) -> RgbaImage {
        let resized = resize_exact(logo, layout.logo.width, layout.logo.height, self.config.filter);
        let mut rotated = rotate_expand(&resized, f64::from(params.logo_rotation));
        apply_opacity(&mut rotated, params.logo_opacity);

        debug!(
            "Logo {}x{} -> {}x{} after {}° rotation, opacity {}%",
            resized.width(), resized.height(),
            rotated.width(), rotated.height(),
            params.logo_rotation, params.logo_opacity
        );

        rotated
    }
}
