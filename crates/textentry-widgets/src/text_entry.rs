//! `TextEntry` control model for single- and multi-line text entry.
//!
//! All positions are character offsets into the value, never byte offsets.

use std::borrow::Cow;
use std::ops::{Bound, RangeBounds};
use textentry_core::{
    EntryError, Event, InputTarget, Key, Notification, NotificationSource, Notifier, Subscriber,
    SubscriptionId, TextContent,
};

/// `TextEntry` control model.
pub struct TextEntry {
    /// Current text value
    value: String,
    /// Caret position (character index)
    insertion_point: usize,
    /// Selected range `[from, to)`, never empty
    selection: Option<(usize, usize)>,
    /// Whether editing operations take effect
    editable: bool,
    /// Maximum length in characters (0 = unlimited)
    max_length: usize,
    /// Whether line breaks are allowed in the value
    multiline: bool,
    /// Subscribers to change notifications
    notifier: Notifier,
}

impl Default for TextEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEntry")
            .field("value", &self.value)
            .field("insertion_point", &self.insertion_point)
            .field("selection", &self.selection)
            .field("editable", &self.editable)
            .field("max_length", &self.max_length)
            .field("multiline", &self.multiline)
            .field("subscribers", &self.notifier.len())
            .finish()
    }
}

const fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_offset(s: &str, pos: usize) -> usize {
    s.char_indices().nth(pos).map_or(s.len(), |(i, _)| i)
}

impl TextEntry {
    /// Create an empty, editable, single-line entry with no length limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: String::new(),
            insertion_point: 0,
            selection: None,
            editable: true,
            max_length: 0,
            multiline: false,
            notifier: Notifier::new(),
        }
    }

    // === Construction ===

    /// Allow line breaks in the value.
    #[must_use]
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        let value = self.sanitize(&self.value).into_owned();
        self.value = value;
        self.insertion_point = self.insertion_point.min(self.len());
        self
    }

    /// Start out read-only. [`TextEntry::set_editable`] can still override it.
    #[must_use]
    pub const fn read_only(mut self, read_only: bool) -> Self {
        self.editable = !read_only;
        self
    }

    /// Set maximum length, truncating the initial value if needed.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        let value = self.fit(&self.value, 0).0.to_owned();
        self.value = value;
        self.insertion_point = self.insertion_point.min(self.len());
        self
    }

    /// Set the initial value. Emits nothing.
    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.change_value(value);
        self
    }

    // === Queries ===

    /// Get current value.
    #[must_use]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Length of the value in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        char_len(&self.value)
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Offset just past the last character.
    #[must_use]
    pub fn last_position(&self) -> usize {
        self.len()
    }

    /// Get the characters in a range.
    pub fn range(&self, range: impl RangeBounds<usize>) -> Result<String, EntryError> {
        let (start, end) = self.resolve(range)?;
        Ok(self.value.chars().skip(start).take(end - start).collect())
    }

    /// Get caret position.
    #[must_use]
    pub const fn insertion_point(&self) -> usize {
        self.insertion_point
    }

    /// Check if editing operations take effect.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    /// Check if line breaks are allowed.
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Get maximum length, `None` when unlimited.
    #[must_use]
    pub const fn get_max_length(&self) -> Option<usize> {
        if self.max_length == 0 {
            None
        } else {
            Some(self.max_length)
        }
    }

    /// Get the selected range, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Get the selected text (empty without a selection).
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.selection.map_or_else(String::new, |(from, to)| {
            self.value.chars().skip(from).take(to - from).collect()
        })
    }

    // === Value ===

    /// Replace the whole value and move the caret to the end.
    ///
    /// Always emits [`Notification::Changed`], even if the value is the same.
    /// Not gated by editability.
    pub fn set_value(&mut self, text: &str) {
        self.change_value(text);
        self.notifier.emit(Notification::Changed);
    }

    /// Like [`TextEntry::set_value`] without emitting anything.
    pub fn change_value(&mut self, text: &str) {
        let text = self.sanitize(text);
        let (text, truncated) = self.fit(&text, 0);
        if truncated {
            log::debug!("value truncated to {} characters", self.max_length);
        }
        self.value = text.to_owned();
        self.insertion_point = self.len();
        self.selection = None;
    }

    /// Clear the value. Emits [`Notification::Changed`].
    pub fn clear(&mut self) {
        self.set_value("");
    }

    /// Replace a range with `text` and put the caret after it.
    ///
    /// An open end (`6..`) extends to the end of the value. Read-only
    /// controls ignore the call. Text that does not fit under the maximum
    /// length is dropped and reported with [`Notification::LengthExceeded`].
    pub fn replace(&mut self, range: impl RangeBounds<usize>, text: &str) -> Result<(), EntryError> {
        let (start, end) = self.resolve(range)?;
        if !self.editable {
            log::debug!("replace {start}..{end} ignored: read-only");
            return Ok(());
        }
        self.edit(start, end, text);
        Ok(())
    }

    /// Remove a range.
    pub fn remove(&mut self, range: impl RangeBounds<usize>) -> Result<(), EntryError> {
        self.replace(range, "")
    }

    /// Insert text at the caret, replacing the selection if there is one.
    pub fn write_text(&mut self, text: &str) {
        if !self.editable {
            log::debug!("write_text ignored: read-only");
            return;
        }
        let (start, end) = self.selection_or_caret();
        self.edit(start, end, text);
    }

    /// Insert text at the end.
    pub fn append_text(&mut self, text: &str) {
        self.set_insertion_point_end();
        self.write_text(text);
    }

    /// Process one typed character.
    ///
    /// Emits exactly one notification when editable: `Changed` on insertion,
    /// `LengthExceeded` when the character does not fit, or `Submitted` for a
    /// line break in a single-line control.
    pub fn insert_typed(&mut self, ch: char) {
        if !self.editable {
            log::debug!("typed {ch:?} ignored: read-only");
            return;
        }
        if is_line_break(ch) && !self.multiline {
            self.notifier.emit(Notification::Submitted);
            return;
        }
        let ch = if ch == '\r' { '\n' } else { ch };

        let (start, end) = self.selection_or_caret();
        let kept = self.len() - (end - start);
        if self.max_length > 0 && kept + 1 > self.max_length {
            log::debug!("typed {ch:?} rejected: max length {}", self.max_length);
            self.notifier.emit(Notification::LengthExceeded);
            return;
        }

        let mut buf = [0u8; 4];
        self.splice(start, end, ch.encode_utf8(&mut buf));
        self.notifier.emit(Notification::Changed);
    }

    // === Caret and selection ===

    /// Move the caret, clamping to the value. Clears the selection.
    pub fn set_insertion_point(&mut self, pos: usize) {
        self.insertion_point = pos.min(self.len());
        self.selection = None;
    }

    /// Move the caret to the end.
    pub fn set_insertion_point_end(&mut self) {
        self.set_insertion_point(self.len());
    }

    /// Select a range; the caret moves to its end. An empty range clears
    /// the selection.
    pub fn set_selection(&mut self, range: impl RangeBounds<usize>) -> Result<(), EntryError> {
        let (from, to) = self.resolve(range)?;
        self.selection = (from < to).then_some((from, to));
        self.insertion_point = to;
        Ok(())
    }

    /// Select the whole value.
    pub fn select_all(&mut self) {
        let len = self.len();
        self.selection = (len > 0).then_some((0, len));
        self.insertion_point = len;
    }

    /// Clear the selection, keeping the caret.
    pub fn select_none(&mut self) {
        self.selection = None;
    }

    // === Settings ===

    /// Toggle editability. Overrides the construction-time read-only flag.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Set maximum length (0 = unlimited). Existing text is kept as is.
    pub fn set_max_length(&mut self, max: usize) {
        self.max_length = max;
    }

    // === Subscriptions ===

    /// Register a notification callback. Callbacks run synchronously, in
    /// registration order, before the triggering call returns.
    pub fn subscribe(&mut self, callback: Subscriber) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    /// Remove a notification callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // === Keys ===

    /// Handle an editing or navigation key.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Home => self.move_home(),
            Key::End => self.move_end(),
            Key::Enter => self.insert_typed('\n'),
            Key::Tab | Key::Escape => {}
        }
    }

    /// Delete the selection or the character before the caret.
    fn backspace(&mut self) {
        if !self.editable {
            return;
        }
        match self.selection {
            Some((from, to)) => self.delete_range(from, to),
            None if self.insertion_point > 0 => {
                self.delete_range(self.insertion_point - 1, self.insertion_point);
            }
            None => {}
        }
    }

    /// Delete the selection or the character at the caret.
    fn delete(&mut self) {
        if !self.editable {
            return;
        }
        match self.selection {
            Some((from, to)) => self.delete_range(from, to),
            None if self.insertion_point < self.len() => {
                self.delete_range(self.insertion_point, self.insertion_point + 1);
            }
            None => {}
        }
    }

    fn move_left(&mut self) {
        if let Some((from, _)) = self.selection.take() {
            self.insertion_point = from;
        } else if self.insertion_point > 0 {
            self.insertion_point -= 1;
        }
    }

    fn move_right(&mut self) {
        if let Some((_, to)) = self.selection.take() {
            self.insertion_point = to;
        } else if self.insertion_point < self.len() {
            self.insertion_point += 1;
        }
    }

    fn move_up(&mut self) {
        if !self.multiline {
            return;
        }
        self.selection = None;
        let (start, _) = self.line_bounds(self.insertion_point);
        if start == 0 {
            self.insertion_point = 0;
            return;
        }
        let column = self.insertion_point - start;
        let (prev_start, prev_end) = self.line_bounds(start - 1);
        self.insertion_point = prev_start + column.min(prev_end - prev_start);
    }

    fn move_down(&mut self) {
        if !self.multiline {
            return;
        }
        self.selection = None;
        let len = self.len();
        let (start, end) = self.line_bounds(self.insertion_point);
        if end == len {
            self.insertion_point = len;
            return;
        }
        let column = self.insertion_point - start;
        let (next_start, next_end) = self.line_bounds(end + 1);
        self.insertion_point = next_start + column.min(next_end - next_start);
    }

    fn move_home(&mut self) {
        self.selection = None;
        self.insertion_point = self.line_bounds(self.insertion_point).0;
    }

    fn move_end(&mut self) {
        self.selection = None;
        self.insertion_point = self.line_bounds(self.insertion_point).1;
    }

    // === Internal ===

    /// Turn range bounds into checked `[start, end)` character offsets.
    fn resolve(&self, range: impl RangeBounds<usize>) -> Result<(usize, usize), EntryError> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        EntryError::check_range(start, end, len)?;
        Ok((start, end))
    }

    /// Start and end of the line containing `pos`, excluding the line break.
    fn line_bounds(&self, pos: usize) -> (usize, usize) {
        let mut start = 0;
        for (i, c) in self.value.chars().enumerate() {
            if c == '\n' {
                if i < pos {
                    start = i + 1;
                } else {
                    return (start, i);
                }
            }
        }
        (start, self.len())
    }

    fn selection_or_caret(&self) -> (usize, usize) {
        self.selection
            .unwrap_or((self.insertion_point, self.insertion_point))
    }

    /// Drop line breaks from text bound for a single-line control.
    fn sanitize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.multiline || !text.contains(is_line_break) {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.chars().filter(|c| !is_line_break(*c)).collect())
        }
    }

    /// Longest prefix of `text` that fits next to `kept` existing characters.
    fn fit<'a>(&self, text: &'a str, kept: usize) -> (&'a str, bool) {
        if self.max_length == 0 {
            return (text, false);
        }
        let room = self.max_length.saturating_sub(kept);
        if char_len(text) <= room {
            (text, false)
        } else {
            (&text[..byte_offset(text, room)], true)
        }
    }

    /// Apply a checked edit and emit the resulting notifications.
    fn edit(&mut self, start: usize, end: usize, text: &str) {
        let text = self.sanitize(text);
        let kept = self.len() - (end - start);
        let (text, truncated) = self.fit(&text, kept);
        if self.splice(start, end, text) {
            self.notifier.emit(Notification::Changed);
        }
        if truncated {
            log::debug!("insertion cut short: max length {}", self.max_length);
            self.notifier.emit(Notification::LengthExceeded);
        }
    }

    fn delete_range(&mut self, start: usize, end: usize) {
        if self.splice(start, end, "") {
            self.notifier.emit(Notification::Changed);
        }
    }

    /// Raw replacement. Returns whether the value changed.
    fn splice(&mut self, start: usize, end: usize, text: &str) -> bool {
        let from = byte_offset(&self.value, start);
        let to = byte_offset(&self.value, end);
        let changed = self.value[from..to] != *text;
        self.value.replace_range(from..to, text);
        self.insertion_point = start + char_len(text);
        self.selection = None;
        changed
    }
}

impl NotificationSource for TextEntry {
    fn subscribe(&mut self, callback: Subscriber) -> SubscriptionId {
        Self::subscribe(self, callback)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        Self::unsubscribe(self, id)
    }
}

impl TextContent for TextEntry {
    fn text(&self) -> &str {
        &self.value
    }

    fn caret(&self) -> usize {
        self.insertion_point
    }
}

impl InputTarget for TextEntry {
    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::TextInput { text } => {
                for c in text.chars() {
                    self.insert_typed(c);
                }
            }
            Event::KeyDown { key } => self.handle_key(*key),
            Event::KeyUp { .. } | Event::FocusIn | Event::FocusOut => {}
        }
    }
}
