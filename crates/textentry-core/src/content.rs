//! Read access to a text control's state.

/// Read-only view of a text control, used by test tooling.
pub trait TextContent {
    /// Current value.
    fn text(&self) -> &str;

    /// Caret offset in characters.
    fn caret(&self) -> usize;
}
