//! Text entry control model.
//!
//! [`TextEntry`] owns a value, caret, optional selection, editability and a
//! maximum length, and reports mutations through
//! [`textentry_core::Notification`]s delivered synchronously to subscribers.
//!
//! ```
//! use textentry_widgets::TextEntry;
//!
//! let mut entry = TextEntry::new().max_length(3);
//! for c in "abcd".chars() {
//!     entry.insert_typed(c);
//! }
//! assert_eq!(entry.get_value(), "abc");
//! ```

pub mod config;
pub mod text_entry;

pub use config::{ConfigError, EntryConfig};
pub use text_entry::TextEntry;
