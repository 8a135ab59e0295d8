//! Buffer, limit, and variance arithmetic shared by every budget view.

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;
use crate::domain::CurrencyLimit;

/// Derived planning figures for a category or a single currency within it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LimitFigures {
    /// Nominal plan as entered by the user.
    pub planned_amount: f64,
    /// Planned fixed expenses that the limit must cover.
    pub mandatory_amount: f64,
    /// Discretionary part of the limit, never negative.
    pub buffer_amount: f64,
    /// `buffer_amount + mandatory_amount`.
    pub total_planned: f64,
    pub actual_amount: f64,
    /// `total_planned - actual_amount`.
    pub variance: f64,
    pub is_over_budget: bool,
    /// Whole-percent overshoot, uncapped. Zero when not over budget.
    pub over_budget_percent: f64,
    /// Share of the limit consumed, clamped to `[0, 100]`.
    pub progress_percent: f64,
}

impl LimitFigures {
    fn from_parts(
        planned_amount: f64,
        mandatory_amount: f64,
        buffer_amount: f64,
        actual: f64,
    ) -> Self {
        let total_planned = buffer_amount + mandatory_amount;
        let variance = total_planned - actual;
        Self {
            planned_amount,
            mandatory_amount,
            buffer_amount,
            total_planned,
            actual_amount: actual,
            variance,
            is_over_budget: variance < 0.0,
            over_budget_percent: LimitCalculator::over_budget_percent(actual, total_planned),
            progress_percent: LimitCalculator::progress_percent(actual, total_planned),
        }
    }

    /// Adds figures component-wise without currency conversion, then re-derives
    /// variance and percentages from the sums.
    pub fn nominal_sum<'a>(figures: impl IntoIterator<Item = &'a LimitFigures>) -> Self {
        let (planned, mandatory, buffer, actual) = figures.into_iter().fold(
            (0.0, 0.0, 0.0, 0.0),
            |(planned, mandatory, buffer, actual), item| {
                (
                    planned + item.planned_amount,
                    mandatory + item.mandatory_amount,
                    buffer + item.buffer_amount,
                    actual + item.actual_amount,
                )
            },
        );
        Self::from_parts(planned, mandatory, buffer, actual)
    }
}

/// Figures for one [`CurrencyLimit`] entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyLimitFigures {
    pub currency: CurrencyCode,
    pub figures: LimitFigures,
}

pub struct LimitCalculator;

impl LimitCalculator {
    /// Figures for the single-currency item shape.
    ///
    /// The buffer is whatever the plan leaves after mandatory expenses, and
    /// never goes below zero; the effective limit grows to cover the
    /// mandatory expenses instead.
    pub fn legacy(
        planned_amount: f64,
        planned_expenses_sum: f64,
        actual_amount: f64,
    ) -> LimitFigures {
        let buffer_amount = (planned_amount - planned_expenses_sum).max(0.0);
        LimitFigures::from_parts(
            planned_amount,
            planned_expenses_sum,
            buffer_amount,
            actual_amount,
        )
    }

    /// Figures for one entry of the multi-currency item shape.
    pub fn for_currency_limit(limit: &CurrencyLimit) -> CurrencyLimitFigures {
        if !limit.is_well_formed() {
            tracing::warn!(
                currency = limit.currency.as_str(),
                total_limit = limit.total_limit,
                remaining = limit.remaining,
                "currency limit totals disagree with components; recomputing"
            );
        }
        let normalized = limit.normalized();
        CurrencyLimitFigures {
            currency: normalized.currency,
            figures: LimitFigures::from_parts(
                normalized.planned_amount,
                normalized.planned_amount,
                normalized.buffer_amount.max(0.0),
                normalized.actual_amount,
            ),
        }
    }

    /// Progress-bar fill, always within `[0, 100]`.
    pub fn progress_percent(actual: f64, total_planned: f64) -> f64 {
        if total_planned <= 0.0 {
            return if actual > 0.0 { 100.0 } else { 0.0 };
        }
        (actual / total_planned * 100.0).clamp(0.0, 100.0)
    }

    /// Rounded overshoot in percent. Zero unless over budget with a positive limit.
    pub fn over_budget_percent(actual: f64, total_planned: f64) -> f64 {
        if total_planned > 0.0 && actual > total_planned {
            ((actual - total_planned) / total_planned * 100.0).round()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_plan_minus_mandatory() {
        let figures = LimitCalculator::legacy(1000.0, 400.0, 300.0);
        assert_eq!(figures.buffer_amount, 600.0);
        assert_eq!(figures.total_planned, 1000.0);
        assert_eq!(figures.variance, 700.0);
        assert!(!figures.is_over_budget);
        assert_eq!(figures.progress_percent, 30.0);
    }

    #[test]
    fn zero_limit_with_spend_reports_full_progress_only() {
        assert_eq!(LimitCalculator::progress_percent(50.0, 0.0), 100.0);
        assert_eq!(LimitCalculator::over_budget_percent(50.0, 0.0), 0.0);
        assert_eq!(LimitCalculator::progress_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn negative_buffer_in_record_is_clamped() {
        let limit = CurrencyLimit::new("USD", 200.0, -50.0, 0.0);
        let figures = LimitCalculator::for_currency_limit(&limit).figures;
        assert_eq!(figures.buffer_amount, 0.0);
        assert_eq!(figures.total_planned, 200.0);
    }
}
