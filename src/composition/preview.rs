use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::debug;

use crate::{
    composition::compositor::Compositor,
    config::ResampleFilter,
    error::{CompositorError, ConfigError, Result},
    layers::{resize_exact, SourcePaths},
    layout::{Layout, LayoutParameters},
};

/// Size of the on-screen preview surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
        }
    }
}

impl PreviewConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "preview.size".to_string(),
                value: format!("{}x{}", self.width, self.height),
            }.into());
        }
        Ok(())
    }
}

/// Scale a finished thumbnail onto the fixed preview surface
pub fn preview_surface(canvas: &RgbaImage, config: &PreviewConfig, filter: ResampleFilter) -> RgbaImage {
    resize_exact(canvas, config.width, config.height, filter)
}

/// Render the layers at `paths` straight to a preview-sized image
pub fn render_preview(
    compositor: &Compositor,
    paths: &SourcePaths,
    params: &LayoutParameters,
    config: &PreviewConfig,
) -> Result<Preview> {
    let composition = compositor.render_image(paths, params)?;
    let image = preview_surface(&composition.canvas, config, compositor.config().filter);
    Ok(Preview {
        image,
        layout: composition.layout,
    })
}

/// A preview image ready for display
#[derive(Debug, Clone)]
pub struct Preview {
    pub image: RgbaImage,

    /// Layout at full thumbnail resolution
    pub layout: Layout,
}

/// Handle for one preview request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    generation: u64,
}

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Renders previews on the blocking pool so a UI loop stays responsive
///
/// Every request gets a ticket with an increasing generation. A render whose
/// ticket was overtaken by a newer request still runs to completion, but its
/// result is dropped instead of being handed back.
pub struct PreviewScheduler {
    compositor: Arc<Compositor>,
    config: PreviewConfig,
    generation: AtomicU64,
}

impl PreviewScheduler {
    pub fn new(compositor: Compositor, config: PreviewConfig) -> Self {
        Self {
            compositor: Arc::new(compositor),
            config,
            generation: AtomicU64::new(0),
        }
    }

    /// Register a new request, superseding every earlier ticket
    pub fn issue(&self) -> PreviewTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        PreviewTicket { generation }
    }

    /// Generation of the most recently issued ticket
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: PreviewTicket) -> bool {
        self.latest_generation() == ticket.generation
    }

    /// Issue a ticket and render it
    pub async fn refresh(&self, paths: SourcePaths, params: LayoutParameters) -> Result<Option<Preview>> {
        let ticket = self.issue();
        self.render(ticket, paths, params).await
    }

    /// Render for `ticket`; `Ok(None)` when a newer ticket was issued meanwhile
    pub async fn render(
        &self,
        ticket: PreviewTicket,
        paths: SourcePaths,
        params: LayoutParameters,
    ) -> Result<Option<Preview>> {
        let compositor = Arc::clone(&self.compositor);
        let config = self.config;

        let outcome = task::spawn_blocking(move || render_preview(&compositor, &paths, &params, &config))
            .await
            .map_err(|e| CompositorError::Preview {
                reason: format!("Preview task failed: {}", e),
            })?;

        if !self.is_current(ticket) {
            debug!(
                "Discarding preview {} (latest is {})",
                ticket.generation,
                self.latest_generation()
            );
            return Ok(None);
        }

        outcome.map(Some)
    }
}
