//! Amount formatting for numeric text inputs.
//!
//! Converts raw amounts to grouped, `$`-suffixed display strings and back,
//! and keeps the caret in place when regrouping shifts the separators.

mod amount;
mod caret;

pub use amount::{
    apply_amount_edit, parse_decimal, parse_digits, plain_len, to_display_string, AmountEdit,
};
pub use caret::{
    compute_caret_offset, restore_caret, CaretOffset, InputHandle, InputSurface, PendingCaret,
    RepaintScheduler, TextInput,
};
