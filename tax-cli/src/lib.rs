pub mod app;
pub mod calculator;
pub mod config;
pub mod logging;
pub mod render;
pub mod state;
pub mod utils;

pub use calculator::{CalculatorError, TaxCalculator};
pub use config::Config;
pub use state::CalculatorState;
