//! Calculation engine: percent/dollar conversions, IRS limit enforcement and
//! the tax-waterfall breakdown.
//!
//! Everything here is a pure function of an [`AllocationState`] and, for
//! limits, an [`IrsLimits`] table.
//!
//! [`AllocationState`]: crate::models::AllocationState
//! [`IrsLimits`]: crate::models::IrsLimits

pub mod breakdown;
pub mod common;
pub mod conversions;
pub mod limits;

pub use breakdown::BreakdownCalculator;
pub use conversions::{dollars_to_percent, percent_to_dollars};
pub use limits::{LimitEngine, LimitStatus};
