//! # Thumbnail-Compositor
//!
//! Compose YouTube thumbnails from four stacked images: a background, a center
//! image framed by a fixed margin, a logo that can be scaled, rotated and faded,
//! and a title banner anchored to the bottom edge.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use thumbnail_compositor::{
//!     composition::Compositor,
//!     config::Config,
//!     layers::SourcePaths,
//!     layout::LayoutParameters,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let compositor = Compositor::new(config.render);
//!
//! let paths = SourcePaths {
//!     background: "background.jpg".into(),
//!     center: "screenshot.png".into(),
//!     logo: "logo.png".into(),
//!     banner: "title.png".into(),
//! };
//!
//! let params = LayoutParameters {
//!     logo_rotation: -12,
//!     ..LayoutParameters::default()
//! };
//!
//! compositor.render(&paths, &params, "thumbnail.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`layout`] - The seven layout controls and placement arithmetic
//! - [`layers`] - Layer decoding, resize/rotate/opacity transforms, PNG output
//! - [`composition`] - The compositor and the preview scheduler
//! - [`config`] - Configuration management
//!
//! ## Driving a UI
//!
//! A front end binds its widgets through [`layout::LayoutControls`] and asks a
//! [`composition::PreviewScheduler`] for previews; results that were overtaken
//! by a newer request come back as `None`.

pub mod composition;
pub mod config;
pub mod error;
pub mod layers;
pub mod layout;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{Compositor, PreviewScheduler},
    config::Config,
    error::{CompositorError, Result},
    layers::{Layer, SourcePaths, SourceSelection},
    layout::LayoutParameters,
};
