#![forbid(unsafe_code)]

//! Core: geometry primitives and sizing configuration shared by the autofit crates.

pub mod config;
pub mod geometry;

pub use config::{ConfigError, FontSpec, FontStyle, SizingConfig};
pub use geometry::{ContentBox, Extent, Sides};
