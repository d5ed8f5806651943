//! Testing harness for textentry controls.
//!
//! - [`NotificationRecorder`] subscribes to a control and counts
//!   notifications by kind.
//! - [`Harness`] owns a control, feeds it simulated keystrokes and asserts
//!   on value, caret and notification counts.
//!
//! ```
//! use textentry_core::Notification;
//! use textentry_test::Harness;
//! use textentry_widgets::TextEntry;
//!
//! let mut harness = Harness::new(TextEntry::new().max_length(3));
//! harness.type_text("abcd");
//! harness
//!     .assert_value("abc")
//!     .assert_count(Notification::Changed, 3)
//!     .assert_count(Notification::LengthExceeded, 1);
//! ```

mod harness;
mod recorder;

pub use harness::Harness;
pub use recorder::NotificationRecorder;
