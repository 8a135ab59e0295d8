//! Splits income across savings funds according to percentage rules.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DistributionRule, Fund, FundTransfer, MONEY_EPSILON};
use crate::errors::{EngineError, Result};

/// Upper bound for the sum of all fund percentages.
pub const MAX_TOTAL_PERCENTAGE: f64 = 100.0;

/// Problem that blocks saving a rule set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleIssue {
    OverAllocated { total: f64 },
    NegativePercentage { fund_id: Uuid, value: f64 },
    DuplicateFund { fund_id: Uuid },
}

impl fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleIssue::OverAllocated { total } => {
                write!(
                    f,
                    "fund percentages add up to {}%, above {}%",
                    total, MAX_TOTAL_PERCENTAGE
                )
            }
            RuleIssue::NegativePercentage { fund_id, value } => {
                write!(f, "fund {} has a negative percentage ({})", fund_id, value)
            }
            RuleIssue::DuplicateFund { fund_id } => {
                write!(f, "fund {} has more than one rule", fund_id)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleValidation {
    pub total_percentage: f64,
    /// `100 - total_percentage`: the share left for regular budget categories.
    /// Negative when over-allocated.
    pub remaining_percentage: f64,
    pub is_valid: bool,
    pub issues: Vec<RuleIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundDistributionSummary {
    pub fund_id: Uuid,
    pub fund_name: String,
    pub percentage: f64,
    pub planned_amount: f64,
    pub percent_of_income: f64,
    pub percent_of_funds: f64,
    pub expected_amount: f64,
    pub actual_amount: f64,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionSummary {
    pub total_income: f64,
    pub total_planned: f64,
    pub total_expected: f64,
    pub total_actual: f64,
    /// Income left for non-fund budget categories.
    pub remaining_amount: f64,
    pub is_completed: bool,
    pub validation: RuleValidation,
    pub funds: Vec<FundDistributionSummary>,
}

pub struct DistributionService;

impl DistributionService {
    pub fn validate(rules: &[DistributionRule]) -> RuleValidation {
        let mut issues = Vec::new();
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in rules {
            if rule.value < 0.0 {
                issues.push(RuleIssue::NegativePercentage {
                    fund_id: rule.fund_id,
                    value: rule.value,
                });
            }
            if !seen.insert(rule.fund_id) {
                issues.push(RuleIssue::DuplicateFund {
                    fund_id: rule.fund_id,
                });
            }
        }
        let total_percentage = round_cents(rules.iter().map(|rule| rule.value).sum());
        if total_percentage - MAX_TOTAL_PERCENTAGE > MONEY_EPSILON {
            issues.insert(
                0,
                RuleIssue::OverAllocated {
                    total: total_percentage,
                },
            );
        }
        RuleValidation {
            total_percentage,
            remaining_percentage: round_cents(MAX_TOTAL_PERCENTAGE - total_percentage),
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// Gate for persisting rule edits. Invalid sets are a user input error.
    pub fn ensure_saveable(rules: &[DistributionRule]) -> Result<RuleValidation> {
        let validation = Self::validate(rules);
        if validation.is_valid {
            return Ok(validation);
        }
        tracing::warn!(
            total_percentage = validation.total_percentage,
            issues = validation.issues.len(),
            "rejecting distribution rules"
        );
        let message = validation
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(EngineError::Validation(message))
    }

    /// Per-fund planned vs actual transfers for a period.
    ///
    /// Funds appear in rule order, followed by active funds without a rule at
    /// zero percent. A fund with no transfer record is expected to receive its
    /// planned amount.
    pub fn summarize(
        funds: &[Fund],
        rules: &[DistributionRule],
        total_income: f64,
        transfers: &[FundTransfer],
    ) -> DistributionSummary {
        let validation = Self::validate(rules);

        let mut order: Vec<Uuid> = Vec::with_capacity(rules.len() + funds.len());
        let mut percentages: HashMap<Uuid, f64> = HashMap::new();
        for rule in rules {
            let entry = percentages.entry(rule.fund_id).or_insert_with(|| {
                order.push(rule.fund_id);
                0.0
            });
            *entry += rule.value;
        }
        for fund in funds.iter().filter(|fund| fund.is_active) {
            if !percentages.contains_key(&fund.id) {
                percentages.insert(fund.id, 0.0);
                order.push(fund.id);
            }
        }

        let mut transferred: HashMap<Uuid, (f64, f64)> = HashMap::new();
        for transfer in transfers {
            let entry = transferred.entry(transfer.fund_id).or_default();
            entry.0 += transfer.expected_amount;
            entry.1 += transfer.actual_amount;
        }

        let names: HashMap<Uuid, &str> = funds
            .iter()
            .map(|fund| (fund.id, fund.name.as_str()))
            .collect();

        let planned: Vec<(Uuid, f64, f64)> = order
            .iter()
            .map(|fund_id| {
                let percentage = percentages.get(fund_id).copied().unwrap_or(0.0);
                (*fund_id, percentage, (total_income * percentage / 100.0).round())
            })
            .collect();
        let total_planned: f64 = planned.iter().map(|(_, _, amount)| amount).sum();

        let entries: Vec<FundDistributionSummary> = planned
            .into_iter()
            .map(|(fund_id, percentage, planned_amount)| {
                let (expected_amount, actual_amount) = transferred
                    .get(&fund_id)
                    .copied()
                    .unwrap_or((planned_amount, 0.0));
                FundDistributionSummary {
                    fund_id,
                    fund_name: names
                        .get(&fund_id)
                        .map(|name| name.to_string())
                        .unwrap_or_default(),
                    percentage,
                    planned_amount,
                    percent_of_income: share_percent(planned_amount, total_income),
                    percent_of_funds: share_percent(planned_amount, total_planned),
                    expected_amount,
                    actual_amount,
                    is_completed: actual_amount >= expected_amount,
                }
            })
            .collect();

        let total_expected: f64 = entries.iter().map(|entry| entry.expected_amount).sum();
        let total_actual: f64 = entries.iter().map(|entry| entry.actual_amount).sum();
        tracing::debug!(
            funds = entries.len(),
            total_income,
            total_planned,
            valid = validation.is_valid,
            "summarized fund distribution"
        );
        DistributionSummary {
            total_income,
            total_planned,
            total_expected,
            total_actual,
            remaining_amount: total_income - total_planned,
            is_completed: entries.iter().all(|entry| entry.is_completed),
            validation,
            funds: entries,
        }
    }
}

/// Drops float noise such as `100.00000000000001` from summed percentages.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn share_percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole * 100.0).round()
    } else {
        0.0
    }
}
