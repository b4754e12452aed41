//! Input events consumed by an overlay session
//!
//! Hosts translate their native pointer and keyboard events into these
//! before handing them to the session.

use crate::domain::Point;

/// Pointer button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button
    Primary,
    /// Right button
    Secondary,
}

/// Keys the overlay cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Character(char),
    Other,
}

/// Keyboard modifier state at the time of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub control: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        control: true,
    };
}

/// One pointer or keyboard event, positions in overlay window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, position: Point },
    PointerMove { position: Point },
    PointerUp { button: PointerButton, position: Point },
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    pub fn press(x: i32, y: i32) -> Self {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Point::new(x, y),
        }
    }

    pub fn drag_to(x: i32, y: i32) -> Self {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    pub fn release(x: i32, y: i32) -> Self {
        InputEvent::PointerUp {
            button: PointerButton::Primary,
            position: Point::new(x, y),
        }
    }

    pub fn right_click(x: i32, y: i32) -> Self {
        InputEvent::PointerUp {
            button: PointerButton::Secondary,
            position: Point::new(x, y),
        }
    }

    pub fn escape() -> Self {
        InputEvent::KeyDown {
            key: Key::Escape,
            modifiers: Modifiers::NONE,
        }
    }

    /// Ctrl + `c`
    pub fn ctrl(c: char) -> Self {
        InputEvent::KeyDown {
            key: Key::Character(c),
            modifiers: Modifiers::CTRL,
        }
    }
}
