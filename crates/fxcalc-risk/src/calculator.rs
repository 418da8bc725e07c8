//! Lot-size calculation flow.

use fxcalc_core::error::{CalcError, CalcResult, RateError};
use fxcalc_core::traits::RateProvider;
use fxcalc_core::types::{CalculationInputs, CurrencyAllowList, LotSize};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::position_sizer::compute_lot_size;
use crate::rates::{acquire_rate, check_rate};
use crate::validation::{InputValidator, ValidatedInputs};

/// Where a calculation currently stands.
///
/// `Resolved` and `Failed` are terminal until the next trigger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalculationState {
    #[default]
    Idle,
    Validating,
    /// Waiting on the exchange rate for request `request`
    AwaitingRate { request: u64 },
    Resolved { lot_size: LotSize, rate: Decimal },
    Failed(CalcError),
}

impl CalculationState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CalculationState::Resolved { .. } | CalculationState::Failed(_)
        )
    }

    pub fn lot_size(&self) -> Option<LotSize> {
        match self {
            CalculationState::Resolved { lot_size, .. } => Some(*lot_size),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match self {
            CalculationState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// An exchange rate the calculator is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRequest {
    /// Monotonic id of the trigger that issued this request
    pub id: u64,
    pub inputs: ValidatedInputs,
}

/// Outcome of a calculate trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// USD quote, no rate needed
    Resolved(LotSize),
    /// Rate must be fetched and handed back via [`LotSizeCalculator::complete`]
    NeedsRate(RateRequest),
}

/// Drives a lot-size calculation from trigger to result.
///
/// Every trigger gets a fresh request id. A rate that arrives for anything
/// but the latest request is dropped, so an older, slower fetch cannot
/// overwrite the result of a newer trigger.
#[derive(Debug, Clone, Default)]
pub struct LotSizeCalculator {
    validator: InputValidator,
    state: CalculationState,
    last_request: u64,
}

impl LotSizeCalculator {
    /// Create a calculator that accepts the given currencies.
    pub fn new(allowed: CurrencyAllowList) -> Self {
        Self {
            validator: InputValidator::new(allowed),
            state: CalculationState::Idle,
            last_request: 0,
        }
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    /// Return to `Idle`. Any in-flight request becomes stale.
    pub fn reset(&mut self) {
        self.state = CalculationState::Idle;
        self.last_request += 1;
    }

    /// Start a calculation.
    ///
    /// Validation failures move to `Failed` and are returned. A USD quote
    /// resolves immediately with a rate of 1; any other quote moves to
    /// `AwaitingRate` and returns the request to fetch a rate for.
    pub fn begin(&mut self, inputs: &CalculationInputs) -> CalcResult<Trigger> {
        self.reset();
        let id = self.last_request;
        self.state = CalculationState::Validating;

        let validated = match self.validator.validate(inputs) {
            Ok(v) => v,
            Err(err) => {
                debug!(request = id, error = %err, "Calculation inputs rejected");
                self.state = CalculationState::Failed(err.clone());
                return Err(err);
            }
        };

        if validated.pair.quote.is_usd() {
            let lot_size = self.resolve(&validated, Decimal::ONE);
            return Ok(Trigger::Resolved(lot_size));
        }

        debug!(request = id, pair = %validated.pair, "Awaiting exchange rate");
        self.state = CalculationState::AwaitingRate { request: id };
        Ok(Trigger::NeedsRate(RateRequest {
            id,
            inputs: validated,
        }))
    }

    /// Hand back the rate fetched for `request`.
    ///
    /// Returns `None` without touching the state when `request` is not the
    /// one currently awaited.
    pub fn complete(
        &mut self,
        request: &RateRequest,
        rate: Result<Decimal, RateError>,
    ) -> Option<CalcResult<LotSize>> {
        if self.state != (CalculationState::AwaitingRate { request: request.id }) {
            debug!(
                request = request.id,
                latest = self.last_request,
                "Discarding stale exchange rate"
            );
            return None;
        }

        let rate = rate.and_then(|r| check_rate(request.inputs.pair.quote, r));
        Some(self.finish(&request.inputs, rate))
    }

    /// Run a whole calculation against `provider`.
    pub async fn calculate(
        &mut self,
        inputs: &CalculationInputs,
        provider: &dyn RateProvider,
    ) -> CalcResult<LotSize> {
        match self.begin(inputs)? {
            Trigger::Resolved(lot_size) => Ok(lot_size),
            Trigger::NeedsRate(request) => {
                let rate = acquire_rate(request.inputs.pair.quote, provider).await;
                self.finish(&request.inputs, rate)
            }
        }
    }

    fn finish(
        &mut self,
        inputs: &ValidatedInputs,
        rate: Result<Decimal, RateError>,
    ) -> CalcResult<LotSize> {
        match rate {
            Ok(rate) => Ok(self.resolve(inputs, rate)),
            Err(err) => {
                warn!(quote = %inputs.pair.quote, error = %err, "Could not fetch exchange rate");
                let err = CalcError::from(err);
                self.state = CalculationState::Failed(err.clone());
                Err(err)
            }
        }
    }

    fn resolve(&mut self, inputs: &ValidatedInputs, rate: Decimal) -> LotSize {
        let lot_size = compute_lot_size(inputs, rate);
        info!(
            pair = %inputs.pair,
            risk_amount = %inputs.risk_amount,
            stop_loss_pips = %inputs.stop_loss_pips,
            %rate,
            lots = %lot_size,
            "Lot size calculated"
        );
        self.state = CalculationState::Resolved { lot_size, rate };
        lot_size
    }
}
