//! Pure domain types with minimal dependencies
//!
//! This module contains the geometry, session mode and export job types
//! shared by the session state machine and the renderers. Types here
//! should have no framework dependencies (eframe, xcap, arboard).

pub mod export;
pub mod geometry;
pub mod mode;

pub use export::*;
pub use geometry::*;
pub use mode::*;
