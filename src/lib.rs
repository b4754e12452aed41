//! On-screen pixel measurement and region screenshots
//!
//! An overlay session freezes the virtual screen into a snapshot, lets the
//! user drag a measurement line and/or a region over it, and publishes the
//! resulting raster to the clipboard and a PNG file.

pub mod app;
pub mod capture;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
