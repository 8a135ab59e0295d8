#![doc(test(attr(deny(warnings))))]

//! Budget Engine turns budget API snapshots into the rows, footer totals,
//! currency breakdowns, and fund distribution figures that budget views render.

pub mod api;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod utils;

pub use crate::core::services::{
    BudgetReport, BudgetRow, CategoryMergeService, CurrencyBucketAggregator, DistributionService,
    LimitCalculator, SummaryService,
};
pub use errors::{EngineError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Engine tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
