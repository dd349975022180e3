//! Orchestrates one calculation: validate → fetch brackets → compute.
//!
//! Progress is published on a [`tokio::sync::watch`] channel. Every call
//! takes a ticket; only the holder of the newest ticket may publish a
//! terminal state, so a slow earlier call can never overwrite the outcome
//! of a later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tax_core::validation::validate_inputs;
use tax_core::{BracketSource, SourceError, TaxCalculationResult, ValidationError, compute_tax};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::state::CalculatorState;

/// Why a calculation produced no result.  `Display` is the message shown
/// to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculatorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub struct TaxCalculator {
    source: Arc<dyn BracketSource>,
    supported_years: Vec<i32>,
    state: watch::Sender<CalculatorState>,
    latest_ticket: AtomicU64,
}

impl TaxCalculator {
    pub fn new(
        source: Arc<dyn BracketSource>,
        supported_years: Vec<i32>,
    ) -> Self {
        let (state, _) = watch::channel(CalculatorState::Idle);
        Self {
            source,
            supported_years,
            state,
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Receiver that observes every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<CalculatorState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CalculatorState {
        self.state.borrow().clone()
    }

    pub fn supported_years(&self) -> &[i32] {
        &self.supported_years
    }

    /// Runs a full calculation for raw `income` and `year` input.
    ///
    /// Publishes [`CalculatorState::Loading`] immediately, clearing any
    /// earlier result or error, then the terminal state unless a newer call
    /// has started in the meantime. The outcome is always returned to the
    /// caller, superseded or not.
    pub async fn calculate(
        &self,
        income: &Value,
        year: &Value,
    ) -> Result<TaxCalculationResult, CalculatorError> {
        let ticket = self.begin();
        let outcome = self.run(income, year).await;
        self.finish(ticket, &outcome);
        outcome
    }

    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
            *state = CalculatorState::Loading;
        });
        debug!(ticket, "calculation started");
        ticket
    }

    async fn run(
        &self,
        income: &Value,
        year: &Value,
    ) -> Result<TaxCalculationResult, CalculatorError> {
        let (income, year) =
            validate_inputs(income, year, &self.supported_years).inspect_err(|error| {
                warn!(%error, "input rejected");
            })?;

        debug!(year, source = %self.source.describe(), "requesting brackets");
        let brackets = self.source.get_tax_brackets(year).await?;

        let result = compute_tax(income, &brackets);
        info!(
            year,
            %income,
            total = %result.total,
            bands = result.bands.len(),
            "tax computed"
        );
        Ok(result)
    }

    fn finish(
        &self,
        ticket: u64,
        outcome: &Result<TaxCalculationResult, CalculatorError>,
    ) {
        let next = match outcome {
            Ok(result) => CalculatorState::Succeeded(result.clone()),
            Err(error) => CalculatorState::Failed(error.to_string()),
        };

        let published = self.state.send_if_modified(|state| {
            if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = next;
            true
        });

        if !published {
            debug!(ticket, "discarding superseded calculation");
        }
    }
}
