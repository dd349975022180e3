pub mod factory;
pub mod provider;

pub use factory::{BracketSourceFactory, SourceConfig, SourceRegistry};
pub use provider::{BracketSource, SourceError};
