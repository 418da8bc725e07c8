//! Headless lot-size calculator form.
//!
//! Models the calculator screen without rendering it: field edits go in,
//! display strings and caret restores come out.

mod form;
mod screen;

pub use form::{CalculatorForm, Field, FormDefaults, FormView};
pub use screen::HeadlessScreen;
