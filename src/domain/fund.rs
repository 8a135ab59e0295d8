use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Savings fund that receives a share of income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fund {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "Fund::active_default")]
    pub is_active: bool,
}

impl Fund {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
        }
    }

    fn active_default() -> bool {
        true
    }
}

impl Identifiable for Fund {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Fund {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Share of income (in percent) routed to a fund.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionRule {
    pub fund_id: Uuid,
    pub value: f64,
}

impl DistributionRule {
    pub fn new(fund_id: Uuid, value: f64) -> Self {
        Self { fund_id, value }
    }
}

/// Expected and actual transfer into a fund for a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundTransfer {
    pub fund_id: Uuid,
    pub expected_amount: f64,
    pub actual_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferred_at: Option<DateTime<Utc>>,
}

impl FundTransfer {
    pub fn new(fund_id: Uuid, expected_amount: f64, actual_amount: f64) -> Self {
        Self {
            fund_id,
            expected_amount,
            actual_amount,
            transferred_at: None,
        }
    }
}
