//! Overlay rendering
//!
//! This module contains:
//! - Geometry constants shared by the live frame and exported rasters
//! - A tiny-skia canvas over `RgbaImage` with bitmap-font text
//! - The live frame composer and the export raster builder

pub mod canvas;
pub mod export;
pub mod frame;
pub mod geometry;
pub mod measurement;
pub mod style;
pub mod text;

pub use export::render_export;
pub use frame::{instruction, render_frame};
pub use style::Palette;
