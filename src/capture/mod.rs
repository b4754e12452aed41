//! Screen capture module
//!
//! This module contains:
//! - The immutable screen snapshot a session renders from (snapshot.rs)
//! - The `ScreenSource` trait and its xcap-backed implementation (screen.rs)

pub mod screen;
pub mod snapshot;

pub use screen::{ScreenSource, XcapScreen};
pub use snapshot::ScreenSnapshot;
