//! # Composition
//!
//! The compositor stacks the four layers into a thumbnail; the preview side
//! scales results onto the display surface and keeps stale renders out of it.

pub mod compositor;
pub mod preview;

// Re-exports for convenience
pub use compositor::{Composition, Compositor, RenderReport};
pub use preview::{preview_surface, render_preview, Preview, PreviewConfig, PreviewScheduler, PreviewTicket};
