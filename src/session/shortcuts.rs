use crate::session::events::{Key, Modifiers};

/// Keyboard commands understood by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Close without exporting
    Cancel,
    /// Export per preferences, keep the overlay open
    Save,
    /// Export to the clipboard only, keep the overlay open
    Copy,
}

pub fn handle_key_event(key: Key, modifiers: Modifiers) -> Option<Shortcut> {
    match key {
        Key::Escape => Some(Shortcut::Cancel),
        Key::Character(c) if c.eq_ignore_ascii_case(&'s') && modifiers.control => {
            Some(Shortcut::Save)
        }
        Key::Character(c) if c.eq_ignore_ascii_case(&'c') && modifiers.control => {
            Some(Shortcut::Copy)
        }
        _ => None,
    }
}
