//! Overlay session management
//!
//! This module contains:
//! - Input events and keyboard shortcuts
//! - The mode/phase state machine
//! - `OverlaySession`, tying a snapshot to the state machine and exports
//! - `SessionController`, the single-session entry point

pub mod controller;
pub mod events;
pub mod overlay;
pub mod shortcuts;
pub mod state;

pub use controller::SessionController;
pub use events::{InputEvent, Key, Modifiers, PointerButton};
pub use overlay::{OverlaySession, SessionUpdate};
pub use state::{Phase, StateMachine};
