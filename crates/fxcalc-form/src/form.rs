//! Calculator form state and field interplay.

use fxcalc_core::error::{CalcError, RateError};
use fxcalc_core::traits::RateProvider;
use fxcalc_core::types::{CalculationInputs, CurrencyAllowList, LotSize};
use fxcalc_format::{
    apply_amount_edit, parse_decimal, to_display_string, InputSurface, RepaintScheduler,
};
use fxcalc_risk::{
    format_risk_percent, risk_amount_from_percent, risk_percent_from_amount, CalculationState,
    LotSizeCalculator, RateRequest, Trigger,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Input fields of the calculator screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Base,
    Quote,
    AccountBalance,
    RiskPercent,
    RiskAmount,
    StopLoss,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Base,
            Field::Quote,
            Field::AccountBalance,
            Field::RiskPercent,
            Field::RiskAmount,
            Field::StopLoss,
        ]
    }
}

/// Initial values of a fresh form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefaults {
    pub account_balance: Decimal,
    pub base: String,
    pub quote: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            account_balance: dec!(1000),
            base: "EUR".to_string(),
            quote: "USD".to_string(),
        }
    }
}

/// Everything the screen displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub base: String,
    pub quote: String,
    pub account_balance: String,
    pub risk_percent: String,
    pub risk_amount: String,
    pub stop_loss: String,
    /// Lot size with two decimals, or `Error: <reason>`
    pub result: String,
}

impl FormView {
    /// Text of a single field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Base => &self.base,
            Field::Quote => &self.quote,
            Field::AccountBalance => &self.account_balance,
            Field::RiskPercent => &self.risk_percent,
            Field::RiskAmount => &self.risk_amount,
            Field::StopLoss => &self.stop_loss,
        }
    }
}

/// The calculator screen, minus the rendering.
///
/// Balance and risk amount are reformatted on every edit, and a caret
/// restore is queued for the edited field. The UI repaints from
/// [`CalculatorForm::view`] and then calls [`CalculatorForm::commit_repaint`].
#[derive(Debug, Clone)]
pub struct CalculatorForm {
    calculator: LotSizeCalculator,
    carets: RepaintScheduler<Field>,
    account_balance: Decimal,
    prev_account_balance: Decimal,
    /// Raw text; `None` until the user touches the percent field
    risk_percent: Option<String>,
    risk_amount: Option<Decimal>,
    prev_risk_amount: Decimal,
    base: String,
    quote: String,
    stop_loss: String,
    lot_size: LotSize,
    error: Option<CalcError>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self::new(CurrencyAllowList::default(), FormDefaults::default())
    }
}

impl CalculatorForm {
    /// Create a form accepting `allowed` currencies, starting from `defaults`.
    pub fn new(allowed: CurrencyAllowList, defaults: FormDefaults) -> Self {
        Self {
            calculator: LotSizeCalculator::new(allowed),
            carets: RepaintScheduler::new(),
            account_balance: defaults.account_balance,
            prev_account_balance: defaults.account_balance,
            risk_percent: None,
            risk_amount: None,
            prev_risk_amount: Decimal::ZERO,
            base: defaults.base,
            quote: defaults.quote,
            stop_loss: "0".to_string(),
            lot_size: LotSize::ZERO,
            error: None,
        }
    }

    /// Apply an edit to any field.
    ///
    /// `caret` is the caret column in `raw` at the moment of the edit.
    pub fn on_input(&mut self, field: Field, raw: &str, caret: usize) {
        match field {
            Field::Base => self.base = raw.to_string(),
            Field::Quote => self.quote = raw.to_string(),
            Field::AccountBalance => self.on_balance_input(raw, caret),
            Field::RiskPercent => self.on_risk_percent_input(raw),
            Field::RiskAmount => self.on_risk_amount_input(raw, caret),
            Field::StopLoss => self.stop_loss = raw.to_string(),
        }
    }

    /// Balance edit. Keeps the risk amount in step when a percent is set.
    pub fn on_balance_input(&mut self, raw: &str, caret: usize) {
        let edit = apply_amount_edit(self.prev_account_balance, raw);
        self.account_balance = edit.value;
        self.carets.schedule(Field::AccountBalance, caret, edit.offset);
        self.prev_account_balance = edit.value;

        if let Some(percent) = &self.risk_percent {
            self.risk_amount =
                parse_decimal(percent).map(|p| risk_amount_from_percent(edit.value, p));
        }
        trace!(balance = %edit.value, "Balance edited");
    }

    /// Percent edit. Text is kept verbatim so partial input like `1.` survives.
    pub fn on_risk_percent_input(&mut self, raw: &str) {
        self.risk_percent = Some(raw.to_string());
        if !self.account_balance.is_zero() {
            self.risk_amount =
                parse_decimal(raw).map(|p| risk_amount_from_percent(self.account_balance, p));
        }
    }

    /// Risk amount edit. Rewrites the percent (blank when the balance is zero).
    pub fn on_risk_amount_input(&mut self, raw: &str, caret: usize) {
        let edit = apply_amount_edit(self.prev_risk_amount, raw);
        self.risk_amount = Some(edit.value);
        self.carets.schedule(Field::RiskAmount, caret, edit.offset);
        self.prev_risk_amount = edit.value;

        let percent = risk_percent_from_amount(self.account_balance, edit.value);
        self.risk_percent = Some(format_risk_percent(percent));
        trace!(amount = %edit.value, "Risk amount edited");
    }

    /// Current inputs as the calculation sees them.
    pub fn inputs(&self) -> CalculationInputs {
        CalculationInputs {
            account_balance: self.account_balance,
            risk_amount: self.risk_amount,
            stop_loss_pips: parse_decimal(&self.stop_loss),
            base: self.base.clone(),
            quote: self.quote.clone(),
        }
    }

    /// Calculate trigger: validate, fetch the rate if needed, show the result.
    pub async fn calculate(&mut self, provider: &dyn RateProvider) {
        self.error = None;
        let inputs = self.inputs();
        let result = self.calculator.calculate(&inputs, provider).await;
        self.show(result);
    }

    /// First half of a calculate trigger, for callers that fetch rates
    /// themselves. Returns the rate to fetch, if any.
    pub fn begin_calculate(&mut self) -> Option<RateRequest> {
        self.error = None;
        let inputs = self.inputs();
        match self.calculator.begin(&inputs) {
            Ok(Trigger::Resolved(lot_size)) => {
                self.show(Ok(lot_size));
                None
            }
            Ok(Trigger::NeedsRate(request)) => Some(request),
            Err(err) => {
                self.show(Err(err));
                None
            }
        }
    }

    /// Second half of a calculate trigger. Stale requests are ignored.
    pub fn complete_calculate(&mut self, request: &RateRequest, rate: Result<Decimal, RateError>) {
        match self.calculator.complete(request, rate) {
            Some(result) => self.show(result),
            None => debug!(request = request.id, "Ignoring rate for superseded calculation"),
        }
    }

    fn show(&mut self, result: Result<LotSize, CalcError>) {
        match result {
            Ok(lot_size) => self.lot_size = lot_size,
            Err(err) => self.error = Some(err),
        }
    }

    /// Run queued caret restores. Call after the screen has been repainted.
    pub fn commit_repaint<S>(&mut self, surface: &mut S) -> usize
    where
        S: InputSurface<Field> + ?Sized,
    {
        self.carets.commit(surface)
    }

    pub fn has_pending_carets(&self) -> bool {
        self.carets.has_pending()
    }

    pub fn state(&self) -> &CalculationState {
        self.calculator.state()
    }

    pub fn lot_size(&self) -> LotSize {
        self.lot_size
    }

    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    pub fn account_balance(&self) -> Decimal {
        self.account_balance
    }

    pub fn risk_amount(&self) -> Option<Decimal> {
        self.risk_amount
    }

    /// Display strings for every field and the result line.
    pub fn view(&self) -> FormView {
        let result = match &self.error {
            Some(err) => format!("Error: {}", err),
            None => self.lot_size.to_string(),
        };

        FormView {
            base: self.base.clone(),
            quote: self.quote.clone(),
            account_balance: to_display_string(Some(self.account_balance)),
            risk_percent: self.risk_percent.clone().unwrap_or_default(),
            risk_amount: to_display_string(self.risk_amount),
            stop_loss: self.stop_loss.clone(),
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxcalc_core::types::CurrencyCode;
    use fxcalc_rates::FixedRateProvider;

    fn rates() -> FixedRateProvider {
        FixedRateProvider::new().with_rate(CurrencyCode::JPY, dec!(110))
    }

    #[test]
    fn test_initial_view() {
        let view = CalculatorForm::default().view();
        assert_eq!(view.account_balance, "1,000$");
        assert_eq!(view.risk_percent, "");
        assert_eq!(view.risk_amount, "");
        assert_eq!(view.base, "EUR");
        assert_eq!(view.quote, "USD");
        assert_eq!(view.stop_loss, "0");
        assert_eq!(view.result, "0.00");
    }

    #[test]
    fn test_percent_drives_amount() {
        let mut form = CalculatorForm::default();
        form.on_risk_percent_input("1.");
        assert_eq!(form.risk_amount(), Some(dec!(10)));
        assert_eq!(form.view().risk_percent, "1.");

        form.on_risk_percent_input("1.5");
        assert_eq!(form.view().risk_amount, "15$");
    }

    #[test]
    fn test_garbage_percent_blanks_amount() {
        let mut form = CalculatorForm::default();
        form.on_risk_percent_input("abc");
        assert_eq!(form.risk_amount(), None);
        assert_eq!(form.view().risk_amount, "");
    }

    #[test]
    fn test_balance_edit_recomputes_amount_when_percent_set() {
        let mut form = CalculatorForm::default();
        form.on_balance_input("5,0000$", 2);
        assert_eq!(form.risk_amount(), None);

        form.on_risk_percent_input("2");
        form.on_balance_input("10,0000$", 3);
        assert_eq!(form.view().account_balance, "100,000$");
        assert_eq!(form.view().risk_amount, "2,000$");
    }

    #[test]
    fn test_amount_drives_percent() {
        let mut form = CalculatorForm::default();
        form.on_risk_amount_input("25", 2);
        assert_eq!(form.view().risk_percent, "2.5");
        assert_eq!(form.view().risk_amount, "25$");
    }

    #[test]
    fn test_amount_with_zero_balance_blanks_percent() {
        let mut form = CalculatorForm::default();
        form.on_balance_input("", 0);
        assert_eq!(form.view().account_balance, "");

        form.on_risk_amount_input("50", 2);
        assert_eq!(form.view().risk_percent, "");
        assert_eq!(form.view().risk_amount, "50$");
    }

    #[test]
    fn test_pasted_amount_loses_decimal_point() {
        let mut form = CalculatorForm::default();
        form.on_input(Field::AccountBalance, "1,234.56$", 9);
        assert_eq!(form.account_balance(), dec!(123456));
        assert_eq!(form.view().account_balance, "123,456$");
    }

    #[tokio::test]
    async fn test_calculate_usd() {
        let mut form = CalculatorForm::default();
        form.on_risk_percent_input("1");
        form.on_input(Field::StopLoss, "50", 2);
        form.calculate(&rates()).await;

        assert_eq!(form.view().result, "0.02");
        assert!(form.error().is_none());
    }

    #[tokio::test]
    async fn test_calculate_jpy() {
        let mut form = CalculatorForm::default();
        form.on_input(Field::Quote, "JPY", 3);
        form.on_risk_percent_input("1");
        form.on_input(Field::StopLoss, "50", 2);
        form.calculate(&rates()).await;

        assert_eq!(form.lot_size().value(), dec!(0.022));
        assert_eq!(form.view().result, "0.02");
    }

    #[tokio::test]
    async fn test_validation_error_shown() {
        let mut form = CalculatorForm::default();
        form.calculate(&rates()).await;
        assert_eq!(form.view().result, "Error: Please enter a valid stop loss value");

        form.on_input(Field::StopLoss, "50", 2);
        form.calculate(&rates()).await;
        assert_eq!(form.view().result, "Error: Please enter a valid risk amount");

        form.on_risk_amount_input("10", 2);
        form.on_input(Field::Base, "XYZ", 3);
        form.calculate(&rates()).await;
        assert_eq!(form.view().result, "Error: Please enter a valid base or quote currency");

        form.on_input(Field::Base, "eur", 3);
        form.calculate(&rates()).await;
        assert_eq!(form.view().result, "0.02");
    }

    #[tokio::test]
    async fn test_rate_failure_keeps_previous_lot_size() {
        let mut form = CalculatorForm::default();
        form.on_risk_percent_input("1");
        form.on_input(Field::StopLoss, "50", 2);
        form.calculate(&rates()).await;
        assert_eq!(form.lot_size().to_string(), "0.02");

        form.on_input(Field::Quote, "CHF", 3);
        form.calculate(&rates()).await;
        assert_eq!(form.view().result, "Error: Error fetching exchange rate");
        assert_eq!(form.lot_size().to_string(), "0.02");
    }

    #[test]
    fn test_split_trigger_discards_stale_rate() {
        let mut form = CalculatorForm::default();
        form.on_input(Field::Quote, "JPY", 3);
        form.on_risk_percent_input("1");
        form.on_input(Field::StopLoss, "50", 2);

        let first = form.begin_calculate().unwrap();
        form.on_input(Field::StopLoss, "25", 2);
        let second = form.begin_calculate().unwrap();

        form.complete_calculate(&second, Ok(dec!(110)));
        assert_eq!(form.lot_size().value(), dec!(0.044));

        form.complete_calculate(&first, Ok(dec!(110)));
        assert_eq!(form.lot_size().value(), dec!(0.044));
    }

    #[test]
    fn test_split_trigger_usd_resolves_without_request() {
        let mut form = CalculatorForm::default();
        form.on_risk_amount_input("10", 2);
        form.on_input(Field::StopLoss, "50", 2);
        assert!(form.begin_calculate().is_none());
        assert_eq!(form.view().result, "0.02");
    }
}
