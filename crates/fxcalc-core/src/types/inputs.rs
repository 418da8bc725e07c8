//! Calculation inputs and results.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base-currency units in one standard lot.
pub const STANDARD_LOT_UNITS: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Everything a lot-size calculation reads, exactly as the user entered it.
///
/// Currency codes stay raw text and amounts stay optional here: deciding
/// whether they are usable is the job of the validation gate, which turns
/// this into a validated request or a [`crate::CalcError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInputs {
    /// Account balance
    pub account_balance: Decimal,
    /// Money at risk if the stop loss is hit
    pub risk_amount: Option<Decimal>,
    /// Stop-loss distance in pips
    pub stop_loss_pips: Option<Decimal>,
    /// Base currency text
    pub base: String,
    /// Quote currency text
    pub quote: String,
}

impl CalculationInputs {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            account_balance: Decimal::ZERO,
            risk_amount: None,
            stop_loss_pips: None,
            base: base.into(),
            quote: quote.into(),
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.account_balance = balance;
        self
    }

    pub fn with_risk_amount(mut self, amount: Decimal) -> Self {
        self.risk_amount = Some(amount);
        self
    }

    pub fn with_stop_loss(mut self, pips: Decimal) -> Self {
        self.stop_loss_pips = Some(pips);
        self
    }
}

/// Trade volume in standard lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LotSize(Decimal);

impl LotSize {
    pub const ZERO: LotSize = LotSize(Decimal::ZERO);

    pub fn new(lots: Decimal) -> Self {
        Self(lots)
    }

    /// Unrounded lot count.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Lot count rounded to two decimals, the precision shown to the user.
    pub fn rounded(&self) -> Decimal {
        let mut lots = self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        lots.rescale(2);
        lots
    }
}

impl fmt::Display for LotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lot_size_display_two_decimals() {
        assert_eq!(LotSize::ZERO.to_string(), "0.00");
        assert_eq!(LotSize::new(dec!(0.02)).to_string(), "0.02");
        assert_eq!(LotSize::new(dec!(0.022)).to_string(), "0.02");
        assert_eq!(LotSize::new(dec!(0.025)).to_string(), "0.03");
        assert_eq!(LotSize::new(dec!(2.2)).to_string(), "2.20");
        assert_eq!(LotSize::new(dec!(14)).to_string(), "14.00");
    }

    #[test]
    fn test_inputs_builder() {
        let inputs = CalculationInputs::new("EUR", "USD")
            .with_balance(dec!(1000))
            .with_risk_amount(dec!(10))
            .with_stop_loss(dec!(50));
        assert_eq!(inputs.account_balance, dec!(1000));
        assert_eq!(inputs.risk_amount, Some(dec!(10)));
        assert_eq!(inputs.stop_loss_pips, Some(dec!(50)));
    }
}
