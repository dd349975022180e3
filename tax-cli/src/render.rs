//! Text rendering of calculator state for the terminal.

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};
use tax_core::{TaxBandResult, TaxCalculationResult};

use crate::state::CalculatorState;
use crate::utils::{format_currency, format_rate, opt_bound_display};

pub const LOADING_TEXT: &str = "Calculating...";

/// Row for the per-band table.
#[derive(Debug, Clone, Tabled)]
struct BandRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl From<&TaxBandResult> for BandRow {
    fn from(band: &TaxBandResult) -> Self {
        Self {
            from: format_currency(band.min),
            to: opt_bound_display(band.max),
            rate: format_rate(band.rate),
            taxable: format_currency(band.taxable),
            tax: format_currency(band.tax),
        }
    }
}

/// Band table followed by the total and effective rate.
pub fn render_result(result: &TaxCalculationResult) -> String {
    let summary = format!(
        "Total tax:      {}\nEffective rate: {}",
        format_currency(result.total),
        format_rate(result.effective_rate)
    );

    if result.bands.is_empty() {
        return format!("No taxable income.\n{summary}");
    }

    let rows: Vec<BandRow> = result.bands.iter().map(BandRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();

    format!("{table}\n{summary}")
}

pub fn render_json(result: &TaxCalculationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// What the terminal shows for `state`; empty while idle.
pub fn render_state(state: &CalculatorState) -> String {
    match state {
        CalculatorState::Idle => String::new(),
        CalculatorState::Loading => LOADING_TEXT.to_string(),
        CalculatorState::Succeeded(result) => render_result(result),
        CalculatorState::Failed(message) => format!("Error: {message}"),
    }
}
