//! # Layer Module
//!
//! Loading the four input layers, per-layer pixel transforms, and PNG output.

pub mod source;
pub mod transform;
pub mod output;

pub use source::{Layer, SourceImages, SourcePaths, SourceSelection};
pub use transform::{apply_opacity, resize_exact, rotate_expand};
pub use output::{encode_png, write_png_atomic};
