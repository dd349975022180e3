//! Tax calculation modules.
//!
//! This module provides the progressive bracket engine and the shared
//! rounding helper used when results are presented.

pub mod common;
pub mod progressive;

pub use common::round_half_up;
pub use progressive::compute_tax;
