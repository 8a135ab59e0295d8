//! Footer totals grouped by currency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyCode, FxTable};
use crate::errors::Result;

use super::limit_service::LimitFigures;
use super::merge_service::{BudgetRow, CategoryMergeService};

/// Summed limits for one currency. `total_limit == planned_amount + buffer_amount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BucketTotals {
    pub planned_amount: f64,
    pub buffer_amount: f64,
    pub total_limit: f64,
    pub actual_amount: f64,
    pub remaining: f64,
}

impl BucketTotals {
    fn add(&mut self, figures: &LimitFigures) {
        self.planned_amount += figures.mandatory_amount;
        self.buffer_amount += figures.buffer_amount;
        self.total_limit += figures.total_planned;
        self.actual_amount += figures.actual_amount;
        self.remaining += figures.variance;
    }

    fn scaled(&self, rate: f64) -> Self {
        Self {
            planned_amount: self.planned_amount * rate,
            buffer_amount: self.buffer_amount * rate,
            total_limit: self.total_limit * rate,
            actual_amount: self.actual_amount * rate,
            remaining: self.remaining * rate,
        }
    }

    fn accumulate(&mut self, other: &BucketTotals) {
        self.planned_amount += other.planned_amount;
        self.buffer_amount += other.buffer_amount;
        self.total_limit += other.total_limit;
        self.actual_amount += other.actual_amount;
        self.remaining += other.remaining;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrencyTotals {
    pub default_currency: CurrencyCode,
    pub buckets: BTreeMap<CurrencyCode, BucketTotals>,
    /// More than one currency, or a single non-default one. The footer then
    /// renders a per-currency table instead of one aggregate row.
    pub has_multi_currency_totals: bool,
}

impl CurrencyTotals {
    pub fn bucket(&self, code: &CurrencyCode) -> Option<&BucketTotals> {
        self.buckets.get(code)
    }

    /// The single aggregate row, when the footer is not split by currency.
    pub fn single_total(&self) -> Option<&BucketTotals> {
        if self.has_multi_currency_totals {
            None
        } else {
            self.buckets.get(&self.default_currency)
        }
    }

    /// Converts every bucket into `target` and sums them.
    pub fn converted_total(&self, target: &CurrencyCode, rates: &FxTable) -> Result<BucketTotals> {
        let mut total = BucketTotals::default();
        for (code, bucket) in &self.buckets {
            let rate = rates.rate(code, target)?;
            total.accumulate(&bucket.scaled(rate));
        }
        Ok(total)
    }
}

pub struct CurrencyBucketAggregator;

impl CurrencyBucketAggregator {
    /// Sums visible rows per currency.
    ///
    /// Multi-currency rows contribute each limit to its own bucket. Legacy
    /// rows contribute to the default bucket, but only when they carry an
    /// item or spend, so empty categories do not create a phantom bucket.
    pub fn aggregate(rows: &[BudgetRow], default_currency: &CurrencyCode) -> CurrencyTotals {
        let mut buckets: BTreeMap<CurrencyCode, BucketTotals> = BTreeMap::new();
        for row in CategoryMergeService::visible_rows(rows) {
            if row.is_multi_currency() {
                for limit in &row.currency_limits {
                    buckets
                        .entry(limit.currency.clone())
                        .or_default()
                        .add(&limit.figures);
                }
            } else if row.has_item {
                buckets
                    .entry(default_currency.clone())
                    .or_default()
                    .add(&row.figures);
            }
        }

        let has_multi_currency_totals = match buckets.len() {
            0 => false,
            1 => !buckets.contains_key(default_currency),
            _ => true,
        };
        tracing::debug!(
            buckets = buckets.len(),
            has_multi_currency_totals,
            "aggregated currency buckets"
        );
        CurrencyTotals {
            default_currency: default_currency.clone(),
            buckets,
            has_multi_currency_totals,
        }
    }
}
