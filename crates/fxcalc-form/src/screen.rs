//! In-memory screen for driving the form without a UI toolkit.

use fxcalc_format::{InputHandle, InputSurface, TextInput};

use crate::form::{CalculatorForm, Field, FormView};

/// One [`TextInput`] per form field.
///
/// Painting only rewrites inputs whose text changed, the same way a UI
/// toolkit reconciles a re-render, so untouched fields keep their caret.
#[derive(Debug, Clone, Default)]
pub struct HeadlessScreen {
    inputs: Vec<(Field, TextInput)>,
}

impl HeadlessScreen {
    /// Create a screen showing `view`.
    pub fn new(view: &FormView) -> Self {
        let inputs = Field::all()
            .iter()
            .map(|field| (*field, TextInput::new(view.field(*field))))
            .collect();
        Self { inputs }
    }

    pub fn input(&self, field: Field) -> Option<&TextInput> {
        self.inputs.iter().find(|(f, _)| *f == field).map(|(_, i)| i)
    }

    fn text_input_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        self.inputs
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, i)| i)
    }

    /// Repaint every field whose text differs from `view`.
    pub fn paint(&mut self, view: &FormView) {
        for (field, input) in self.inputs.iter_mut() {
            let text = view.field(*field);
            if input.value() != text {
                input.repaint(text);
            }
        }
    }

    /// Simulate a keystroke: insert `text` at `field`'s caret and run the
    /// full edit cycle (form update, repaint, caret restore).
    pub fn type_text(&mut self, form: &mut CalculatorForm, field: Field, text: &str) {
        let Some(input) = self.text_input_mut(field) else {
            return;
        };
        input.insert(text);
        let raw = input.value().to_string();
        let caret = input.caret();
        self.edit_cycle(form, field, &raw, caret);
    }

    /// Simulate a backspace at `field`'s caret.
    pub fn backspace(&mut self, form: &mut CalculatorForm, field: Field) {
        let Some(input) = self.text_input_mut(field) else {
            return;
        };
        input.backspace();
        let raw = input.value().to_string();
        let caret = input.caret();
        self.edit_cycle(form, field, &raw, caret);
    }

    /// Move `field`'s caret.
    pub fn set_caret(&mut self, field: Field, column: usize) {
        if let Some(input) = self.text_input_mut(field) {
            input.set_caret(column);
        }
    }

    fn edit_cycle(&mut self, form: &mut CalculatorForm, field: Field, raw: &str, caret: usize) {
        form.on_input(field, raw, caret);
        self.paint(&form.view());
        form.commit_repaint(self);
    }
}

impl InputSurface<Field> for HeadlessScreen {
    fn input_mut(&mut self, key: Field) -> Option<&mut dyn InputHandle> {
        self.text_input_mut(key).map(|i| i as &mut dyn InputHandle)
    }
}
