//! Caret stability across reformatting.
//!
//! Repainting a formatted amount replaces the whole field value, which moves
//! the caret to the end of the text. When the user is typing in the middle of
//! a number the caret has to be put back, shifted by one when a group
//! separator appeared or disappeared in front of it.
//!
//! The restore must run *after* the repaint has committed; running it before
//! means the repaint wins and the caret jumps to the end on every keystroke.
//! [`RepaintScheduler`] holds restores until the UI layer reports the commit.

use rust_decimal::Decimal;
use tracing::trace;

use crate::amount::plain_len;

/// Caret correction after an amount is regrouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaretOffset {
    /// A separator was removed before the caret
    Back,
    /// No separator change
    #[default]
    Stay,
    /// A separator was inserted before the caret
    Forward,
}

impl CaretOffset {
    /// Signed column delta: -1, 0 or +1.
    pub fn delta(self) -> isize {
        match self {
            CaretOffset::Back => -1,
            CaretOffset::Stay => 0,
            CaretOffset::Forward => 1,
        }
    }

    /// Shift a caret position, never going below column 0.
    pub fn apply(self, position: usize) -> usize {
        match self {
            CaretOffset::Back => position.saturating_sub(1),
            CaretOffset::Stay => position,
            CaretOffset::Forward => position.saturating_add(1),
        }
    }
}

/// Work out how the caret must move after `previous` was edited into `current`.
///
/// Lengths are taken from the plain rendering of each value. The caret moves
/// forward when the new length is one past a multiple of three (a separator
/// now precedes the leading group) and back when the value got shorter and
/// its length is a multiple of three (a separator was dropped).
pub fn compute_caret_offset(previous: Decimal, current: Decimal) -> CaretOffset {
    let prev_len = plain_len(previous);
    let cur_len = plain_len(current);

    if cur_len < prev_len && cur_len % 3 == 0 {
        CaretOffset::Back
    } else if cur_len > 1 && (cur_len - 1) % 3 == 0 {
        CaretOffset::Forward
    } else {
        CaretOffset::Stay
    }
}

/// A text input whose caret can be driven programmatically.
pub trait InputHandle {
    /// Current text of the input.
    fn value(&self) -> &str;

    /// Caret column (start of the selection), in characters.
    fn selection_start(&self) -> usize;

    /// Give the input keyboard focus.
    fn focus(&mut self);

    /// Select `start..end`; equal bounds place a collapsed caret.
    fn set_selection_range(&mut self, start: usize, end: usize);
}

/// Put the caret back at `saved_position` shifted by `offset`.
///
/// The input is focused before the selection is set. The target column is
/// clamped to the current text length, so running against text that changed
/// since the position was saved is harmless. Returns the column used.
pub fn restore_caret<H>(input: &mut H, saved_position: usize, offset: CaretOffset) -> usize
where
    H: InputHandle + ?Sized,
{
    input.focus();
    let len = input.value().chars().count();
    let target = offset.apply(saved_position).min(len);
    input.set_selection_range(target, target);
    target
}

/// A caret restore waiting for the next repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCaret {
    /// Caret column when the edit happened
    pub saved_position: usize,
    /// Correction to apply
    pub offset: CaretOffset,
}

/// Lookup of live inputs by key, implemented by the UI layer.
pub trait InputSurface<K> {
    fn input_mut(&mut self, key: K) -> Option<&mut dyn InputHandle>;
}

/// Defers caret restores until the UI reports that a repaint has committed.
///
/// Holds at most one restore per input. Scheduling again for the same input
/// before the commit replaces the earlier restore, so a stale restore can
/// never overwrite the caret of a newer edit.
#[derive(Debug, Clone)]
pub struct RepaintScheduler<K> {
    pending: Vec<(K, PendingCaret)>,
}

impl<K> Default for RepaintScheduler<K> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<K: Copy + Eq + std::fmt::Debug> RepaintScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a restore for `key`, replacing any restore already queued for it.
    pub fn schedule(&mut self, key: K, saved_position: usize, offset: CaretOffset) {
        let caret = PendingCaret {
            saved_position,
            offset,
        };
        match self.pending.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => {
                trace!(?key, old = ?slot.1, new = ?caret, "superseding pending caret restore");
                slot.1 = caret;
            }
            None => self.pending.push((key, caret)),
        }
    }

    /// Get the restore queued for `key`.
    pub fn pending(&self, key: K) -> Option<PendingCaret> {
        self.pending
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, caret)| *caret)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Run every queued restore. Call once the repaint has landed.
    ///
    /// Inputs the surface no longer knows about are skipped. Returns the
    /// number of restores applied.
    pub fn commit<S>(&mut self, surface: &mut S) -> usize
    where
        S: InputSurface<K> + ?Sized,
    {
        let mut applied = 0;
        for (key, caret) in self.pending.drain(..) {
            match surface.input_mut(key) {
                Some(input) => {
                    let column = restore_caret(input, caret.saved_position, caret.offset);
                    trace!(?key, column, "caret restored");
                    applied += 1;
                }
                None => trace!(?key, "input gone before repaint, caret restore dropped"),
            }
        }
        applied
    }
}

/// In-memory text input.
///
/// Behaves like a browser text field for caret purposes: replacing the value
/// moves the caret to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    caret: usize,
    focused: bool,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = value.chars().count();
        Self {
            value,
            caret,
            focused: false,
        }
    }

    /// Replace the value as a repaint would, caret to the end.
    pub fn repaint(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.caret = self.value.chars().count();
    }

    /// Type `text` at the caret.
    pub fn insert(&mut self, text: &str) {
        let at = self.byte_offset(self.caret);
        self.value.insert_str(at, text);
        self.caret += text.chars().count();
    }

    /// Delete the character before the caret.
    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        let start = self.byte_offset(self.caret - 1);
        let end = self.byte_offset(self.caret);
        self.value.replace_range(start..end, "");
        self.caret -= 1;
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the text.
    pub fn set_caret(&mut self, column: usize) {
        self.caret = column.min(self.value.chars().count());
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn byte_offset(&self, column: usize) -> usize {
        self.value
            .char_indices()
            .nth(column)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

impl InputHandle for TextInput {
    fn value(&self) -> &str {
        &self.value
    }

    fn selection_start(&self) -> usize {
        self.caret
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn set_selection_range(&mut self, start: usize, _end: usize) {
        self.set_caret(start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::{apply_amount_edit, to_display_string};
    use rust_decimal_macros::dec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Balance,
        Risk,
    }

    #[derive(Default)]
    struct Screen {
        balance: TextInput,
        risk: Option<TextInput>,
    }

    impl InputSurface<Field> for Screen {
        fn input_mut(&mut self, key: Field) -> Option<&mut dyn InputHandle> {
            match key {
                Field::Balance => Some(&mut self.balance as &mut dyn InputHandle),
                Field::Risk => self.risk.as_mut().map(|r| r as &mut dyn InputHandle),
            }
        }
    }

    #[test]
    fn test_offset_crossing_boundaries() {
        assert_eq!(compute_caret_offset(dec!(999), dec!(1000)), CaretOffset::Forward);
        assert_eq!(compute_caret_offset(dec!(1000), dec!(999)), CaretOffset::Back);
        assert_eq!(compute_caret_offset(dec!(123), dec!(124)), CaretOffset::Stay);
        assert_eq!(compute_caret_offset(dec!(99999), dec!(100000)), CaretOffset::Stay);
        assert_eq!(compute_caret_offset(dec!(999999), dec!(1000000)), CaretOffset::Forward);
        assert_eq!(compute_caret_offset(dec!(1000000), dec!(999999)), CaretOffset::Back);
    }

    #[test]
    fn test_offset_single_digit_never_moves() {
        assert_eq!(compute_caret_offset(Decimal::ZERO, dec!(5)), CaretOffset::Stay);
        assert_eq!(compute_caret_offset(dec!(5), Decimal::ZERO), CaretOffset::Stay);
    }

    #[test]
    fn test_offset_apply_saturates() {
        assert_eq!(CaretOffset::Back.apply(0), 0);
        assert_eq!(CaretOffset::Back.apply(3), 2);
        assert_eq!(CaretOffset::Forward.apply(3), 4);
        assert_eq!(CaretOffset::Stay.delta(), 0);
        assert_eq!(CaretOffset::Back.delta(), -1);
    }

    #[test]
    fn test_restore_focuses_and_clamps() {
        let mut input = TextInput::new("1,000$");
        assert!(!input.is_focused());

        let col = restore_caret(&mut input, 2, CaretOffset::Forward);
        assert_eq!(col, 3);
        assert!(input.is_focused());
        assert_eq!(input.selection_start(), 3);

        let col = restore_caret(&mut input, 40, CaretOffset::Forward);
        assert_eq!(col, 6);
    }

    #[test]
    fn test_typing_in_the_middle_keeps_caret() {
        // "999$" with the caret after the first 9; the user types another 9.
        let mut screen = Screen {
            balance: TextInput::new("999$"),
            risk: None,
        };
        screen.balance.set_caret(1);
        screen.balance.insert("9");
        assert_eq!(screen.balance.value(), "9999$");
        let saved = screen.balance.selection_start();

        let edit = apply_amount_edit(dec!(999), screen.balance.value());
        let mut scheduler = RepaintScheduler::new();
        scheduler.schedule(Field::Balance, saved, edit.offset);

        // Repaint moves the caret to the end, then the commit puts it back.
        screen.balance.repaint(edit.display.clone());
        assert_eq!(screen.balance.value(), "9,999$");
        assert_eq!(screen.balance.caret(), 6);

        assert_eq!(scheduler.commit(&mut screen), 1);
        assert_eq!(screen.balance.caret(), 3);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_restore_before_repaint_is_lost() {
        let mut screen = Screen {
            balance: TextInput::new("999$"),
            risk: None,
        };
        screen.balance.set_caret(1);
        screen.balance.insert("9");

        let mut scheduler = RepaintScheduler::new();
        scheduler.schedule(Field::Balance, 2, CaretOffset::Forward);
        scheduler.commit(&mut screen);
        screen.balance.repaint(to_display_string(Some(dec!(9999))));

        assert_eq!(screen.balance.caret(), 6);
    }

    #[test]
    fn test_newer_edit_supersedes_pending_restore() {
        let mut scheduler = RepaintScheduler::new();
        scheduler.schedule(Field::Balance, 2, CaretOffset::Forward);
        scheduler.schedule(Field::Balance, 1, CaretOffset::Stay);
        assert_eq!(
            scheduler.pending(Field::Balance),
            Some(PendingCaret {
                saved_position: 1,
                offset: CaretOffset::Stay
            })
        );

        let mut screen = Screen {
            balance: TextInput::new("12,345$"),
            risk: None,
        };
        assert_eq!(scheduler.commit(&mut screen), 1);
        assert_eq!(screen.balance.caret(), 1);
    }

    #[test]
    fn test_stale_restore_against_changed_value_does_not_panic() {
        let mut scheduler = RepaintScheduler::new();
        scheduler.schedule(Field::Balance, 9, CaretOffset::Forward);

        // The field was cleared before the repaint committed.
        let mut screen = Screen::default();
        scheduler.commit(&mut screen);
        assert_eq!(screen.balance.caret(), 0);
    }

    #[test]
    fn test_missing_input_is_skipped() {
        let mut scheduler = RepaintScheduler::new();
        scheduler.schedule(Field::Risk, 1, CaretOffset::Stay);
        scheduler.schedule(Field::Balance, 1, CaretOffset::Stay);

        let mut screen = Screen {
            balance: TextInput::new("10$"),
            risk: None,
        };
        assert_eq!(scheduler.commit(&mut screen), 1);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_independent_inputs_keep_their_own_restore() {
        let mut scheduler = RepaintScheduler::new();
        scheduler.schedule(Field::Balance, 3, CaretOffset::Back);
        scheduler.schedule(Field::Risk, 1, CaretOffset::Forward);

        let mut screen = Screen {
            balance: TextInput::new("100$"),
            risk: Some(TextInput::new("1,000$")),
        };
        assert_eq!(scheduler.commit(&mut screen), 2);
        assert_eq!(screen.balance.caret(), 2);
        assert_eq!(screen.risk.as_ref().unwrap().caret(), 2);
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new("1,234$");
        input.set_caret(3);
        input.backspace();
        assert_eq!(input.value(), "1,34$");
        assert_eq!(input.caret(), 2);
        input.set_caret(0);
        input.backspace();
        assert_eq!(input.value(), "1,34$");
    }
}
