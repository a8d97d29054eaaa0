//! # Layout Module
//!
//! The seven layout controls and the placement arithmetic derived from them.

pub mod params;
pub mod geometry;

pub use params::{LayoutControls, LayoutParameters, SliderSpec, SliderValue, SLIDERS};
pub use geometry::{Layout, Placement};
