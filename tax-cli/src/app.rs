//! Terminal front end: wires a bracket source into a [`TaxCalculator`] and
//! shows its state as it changes.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde_json::Value;
use tax_core::source::SourceRegistry;
use tax_data::{CsvSourceFactory, HttpSourceFactory};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::calculator::TaxCalculator;
use crate::render::{LOADING_TEXT, render_json, render_state};
use crate::state::CalculatorState;

/// Registry with every bracket backend this binary ships.
pub fn build_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(HttpSourceFactory));
    registry.register(Box::new(CsvSourceFactory));
    registry
}

/// Text typed by the user, as raw validator input.
fn raw_input(text: &str) -> Value {
    Value::String(text.to_string())
}

/// Writes the settled state: results to `out`, errors to `err`.
///
/// Returns `true` when the calculation succeeded.
fn print_state(
    state: &CalculatorState,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    match state {
        CalculatorState::Succeeded(result) if json => {
            writeln!(out, "{}", render_json(result).context("serializing result")?)?;
            Ok(true)
        }
        CalculatorState::Succeeded(_) => {
            writeln!(out, "{}", render_state(state))?;
            Ok(true)
        }
        CalculatorState::Failed(_) => {
            writeln!(err, "{}", render_state(state))?;
            Ok(false)
        }
        CalculatorState::Idle | CalculatorState::Loading => Ok(false),
    }
}

/// One calculation, showing the loading indicator on `err` before the
/// fetch starts and the settled state once it ends.
pub async fn calculate_and_print(
    calculator: &TaxCalculator,
    income: &str,
    year: &str,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    writeln!(err, "{LOADING_TEXT}")?;
    err.flush()?;

    // The outcome is mirrored in the state, which is what gets shown.
    let _ = calculator.calculate(&raw_input(income), &raw_input(year)).await;
    print_state(&calculator.state(), json, out, err)
}

/// One calculation from command-line arguments.
pub async fn run_once(
    calculator: &TaxCalculator,
    income: &str,
    year: &str,
    json: bool,
) -> Result<bool> {
    calculate_and_print(
        calculator,
        income,
        year,
        json,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await
}

/// Prompts for income and year until a blank income line or end of input.
///
/// A blank year picks `default_year`. Returns `true` when the last
/// calculation succeeded, or when none was attempted.
pub async fn run_interactive(
    calculator: &TaxCalculator,
    default_year: i32,
    json: bool,
) -> Result<bool> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_ok = true;

    loop {
        prompt("Income: ")?;
        let Some(income) = lines.next_line().await.context("reading income")? else {
            break;
        };
        if income.trim().is_empty() {
            break;
        }

        prompt(&format!("Year [{default_year}]: "))?;
        let year = lines
            .next_line()
            .await
            .context("reading year")?
            .filter(|line| !line.trim().is_empty())
            .unwrap_or_else(|| default_year.to_string());

        last_ok = run_once(calculator, &income, &year, json).await?;
    }

    Ok(last_ok)
}

fn prompt(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush().context("flushing prompt")
}
