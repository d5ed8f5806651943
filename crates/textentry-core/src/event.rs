//! Input events delivered to text controls.

use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Key released
    KeyUp {
        /// Key released
        key: Key,
    },
    /// Text input received
    TextInput {
        /// Input text
        text: String,
    },
    /// Control gained focus
    FocusIn,
    /// Control lost focus
    FocusOut,
}

/// Editing and navigation keys understood by text controls.
///
/// Printable characters arrive as [`Event::TextInput`], not as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home key
    Home,
    /// End key
    End,
    /// Enter/Return key
    Enter,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
}

impl Event {
    /// Build a text input event for a single character.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::TextInput {
            text: c.to_string(),
        }
    }
}

/// Something that consumes input events, one at a time, to completion.
pub trait InputTarget {
    /// Process a single event.
    fn handle_event(&mut self, event: &Event);
}
