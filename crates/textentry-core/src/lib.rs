//! Core types for textentry controls.
//!
//! This crate provides the pieces shared by controls and their test tooling:
//! - Input events: [`Event`], [`Key`], [`InputTarget`]
//! - Notifications: [`Notification`], [`Notifier`], [`NotificationSource`]
//! - State access: [`TextContent`]
//! - Errors: [`EntryError`]

mod content;
mod error;
mod event;
mod notification;

pub use content::TextContent;
pub use error::EntryError;
pub use event::{Event, InputTarget, Key};
pub use notification::{Notification, NotificationSource, Notifier, Subscriber, SubscriptionId};
