//! Test harness that drives a text control with simulated input.

use crate::recorder::NotificationRecorder;
use std::collections::VecDeque;
use textentry_core::{Event, InputTarget, Key, Notification, NotificationSource, TextContent};

/// Test harness owning a control and a recorder attached to it.
///
/// Multi-character input is delivered as one event per character, the way a
/// keyboard would, so notification counts match per-keystroke behavior.
pub struct Harness<T> {
    /// Control under test
    target: T,
    /// Recorder subscribed to the control
    recorder: NotificationRecorder,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
}

impl<T: InputTarget + NotificationSource> Harness<T> {
    /// Wrap a control and start recording its notifications.
    pub fn new(mut target: T) -> Self {
        let recorder = NotificationRecorder::attach(&mut target);
        Self {
            target,
            recorder,
            event_queue: VecDeque::new(),
        }
    }

    /// Borrow the control.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Borrow the control for direct API calls.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Borrow the recorder.
    pub fn recorder(&self) -> &NotificationRecorder {
        &self.recorder
    }

    /// Unwrap the control. The recorder stays subscribed.
    pub fn into_inner(self) -> T {
        self.target
    }

    // === Event Simulation ===

    /// Simulate typing text, one character per event.
    ///
    /// A `FocusIn` goes first, standing in for giving the control keyboard
    /// focus before input is simulated. Controls that ignore focus are
    /// unaffected.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        self.event_queue.push_back(Event::FocusIn);
        for c in text.chars() {
            self.event_queue.push_back(Event::char(c));
        }
        self.process_events();
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Deliver an arbitrary event.
    pub fn send(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    // === Counts ===

    /// Notifications of `kind` since creation or the last reset.
    pub fn count(&self, kind: Notification) -> usize {
        self.recorder.count(kind)
    }

    /// Notifications of any kind.
    pub fn total(&self) -> usize {
        self.recorder.total()
    }

    /// Zero the recorder.
    pub fn reset_counts(&mut self) -> &mut Self {
        self.recorder.reset();
        self
    }

    // === Assertions ===

    /// Assert the number of notifications of one kind.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, kind: Notification, expected: usize) -> &Self {
        let actual = self.count(kind);
        assert_eq!(
            actual, expected,
            "Expected {expected} '{kind}' notification(s) but got {actual}"
        );
        self
    }

    /// Assert the number of notifications of any kind.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_total(&self, expected: usize) -> &Self {
        let actual = self.total();
        assert_eq!(
            actual, expected,
            "Expected {expected} notification(s) in total but got {actual}"
        );
        self
    }

    // === Internal ===

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            log::trace!("harness delivering {event:?}");
            self.target.handle_event(&event);
        }
    }
}

impl<T: InputTarget + NotificationSource + TextContent> Harness<T> {
    /// Assert that the value matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the value does not match.
    pub fn assert_value(&self, expected: &str) -> &Self {
        let actual = self.target.text();
        assert_eq!(
            actual, expected,
            "Expected value '{expected}' but got '{actual}'"
        );
        self
    }

    /// Assert the caret position.
    ///
    /// # Panics
    ///
    /// Panics if the position does not match.
    pub fn assert_insertion_point(&self, expected: usize) -> &Self {
        let actual = self.target.caret();
        assert_eq!(
            actual, expected,
            "Expected insertion point {expected} but got {actual}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textentry_core::{Notifier, Subscriber, SubscriptionId};

    // Appends typed characters and reports each one
    struct MockEntry {
        text: String,
        notifier: Notifier,
        focused: bool,
    }

    impl MockEntry {
        fn new() -> Self {
            Self {
                text: String::new(),
                notifier: Notifier::new(),
                focused: false,
            }
        }
    }

    impl InputTarget for MockEntry {
        fn handle_event(&mut self, event: &Event) {
            match event {
                Event::FocusIn => self.focused = true,
                Event::TextInput { text } if self.focused => {
                    self.text.push_str(text);
                    self.notifier.emit(Notification::Changed);
                }
                Event::KeyDown { key: Key::Enter } => {
                    self.notifier.emit(Notification::Submitted);
                }
                _ => {}
            }
        }
    }

    impl NotificationSource for MockEntry {
        fn subscribe(&mut self, callback: Subscriber) -> SubscriptionId {
            self.notifier.subscribe(callback)
        }
        fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            self.notifier.unsubscribe(id)
        }
    }

    impl TextContent for MockEntry {
        fn text(&self) -> &str {
            &self.text
        }
        fn caret(&self) -> usize {
            self.text.chars().count()
        }
    }

    #[test]
    fn test_harness_type_text_one_event_per_char() {
        let mut harness = Harness::new(MockEntry::new());
        harness.type_text("abc");
        harness
            .assert_value("abc")
            .assert_insertion_point(3)
            .assert_count(Notification::Changed, 3)
            .assert_total(3);
    }

    #[test]
    fn test_harness_type_text_focuses() {
        let mut harness = Harness::new(MockEntry::new());
        harness.send(Event::char('x'));
        harness.assert_value("");
        harness.type_text("y");
        assert!(harness.target().focused);
        harness.assert_value("y");
    }

    #[test]
    fn test_harness_press_key() {
        let mut harness = Harness::new(MockEntry::new());
        harness.press_key(Key::Enter);
        harness.assert_count(Notification::Submitted, 1).assert_total(1);
    }

    #[test]
    fn test_harness_reset_counts() {
        let mut harness = Harness::new(MockEntry::new());
        harness.type_text("ab").reset_counts().type_text("c");
        harness.assert_count(Notification::Changed, 1);
        assert_eq!(harness.recorder().events(), vec![Notification::Changed]);
    }

    #[test]
    fn test_harness_target_mut() {
        let mut harness = Harness::new(MockEntry::new());
        harness.target_mut().text.push_str("direct");
        harness.assert_value("direct").assert_total(0);
        assert_eq!(harness.into_inner().text, "direct");
    }

    #[test]
    #[should_panic(expected = "Expected 2 'changed' notification(s) but got 1")]
    fn test_harness_assert_count_fails() {
        let mut harness = Harness::new(MockEntry::new());
        harness.type_text("a");
        harness.assert_count(Notification::Changed, 2);
    }

    #[test]
    #[should_panic(expected = "Expected value")]
    fn test_harness_assert_value_fails() {
        let harness = Harness::new(MockEntry::new());
        harness.assert_value("missing");
    }
}
