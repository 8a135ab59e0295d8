//! Wire shapes of the budget API resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyCode;
use crate::domain::{
    BudgetItem, CurrencyLimit, DistributionRule, ExpenseCategory, Fund, FundTransfer,
};

use super::nullable;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<CategoryDto> for ExpenseCategory {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id,
            code: dto.code,
            name: dto.name,
            icon: dto.icon.unwrap_or_default(),
            color: dto.color.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyLimitDto {
    pub currency: String,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub planned_amount: f64,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub buffer_amount: f64,
    #[serde(default, deserialize_with = "nullable::optional_amount")]
    pub total_limit: Option<f64>,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub actual_amount: f64,
    #[serde(default, deserialize_with = "nullable::optional_amount")]
    pub remaining: Option<f64>,
}

impl From<CurrencyLimitDto> for CurrencyLimit {
    fn from(dto: CurrencyLimitDto) -> Self {
        let derived = CurrencyLimit::new(
            CurrencyCode::new(dto.currency),
            dto.planned_amount,
            dto.buffer_amount,
            dto.actual_amount,
        );
        // Keep what the server sent so inconsistencies stay detectable downstream.
        Self {
            total_limit: dto.total_limit.unwrap_or(derived.total_limit),
            remaining: dto.remaining.unwrap_or(derived.remaining),
            ..derived
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub category_id: Uuid,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub planned_amount: f64,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub actual_amount: f64,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub planned_expenses_sum: f64,
    #[serde(default)]
    pub currency_limits: Option<Vec<CurrencyLimitDto>>,
    #[serde(default)]
    pub fund_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable::optional_amount")]
    pub fund_allocation: Option<f64>,
}

impl From<BudgetItemDto> for BudgetItem {
    fn from(dto: BudgetItemDto) -> Self {
        Self {
            id: dto.id.unwrap_or_else(Uuid::new_v4),
            category_id: dto.category_id,
            planned_amount: dto.planned_amount,
            actual_amount: dto.actual_amount,
            planned_expenses_sum: dto.planned_expenses_sum,
            currency_limits: dto
                .currency_limits
                .unwrap_or_default()
                .into_iter()
                .map(CurrencyLimit::from)
                .collect(),
            fund_id: dto.fund_id,
            fund_allocation: dto.fund_allocation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<FundDto> for Fund {
    fn from(dto: FundDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            is_active: dto.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionRuleDto {
    pub fund_id: Uuid,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub value: f64,
}

impl From<DistributionRuleDto> for DistributionRule {
    fn from(dto: DistributionRuleDto) -> Self {
        Self::new(dto.fund_id, dto.value)
    }
}

impl From<&DistributionRule> for DistributionRuleDto {
    fn from(rule: &DistributionRule) -> Self {
        Self {
            fund_id: rule.fund_id,
            value: rule.value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferDto {
    pub fund_id: Uuid,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub expected_amount: f64,
    #[serde(default, deserialize_with = "nullable::amount")]
    pub actual_amount: f64,
    #[serde(default, deserialize_with = "nullable::optional_time")]
    pub transferred_at: Option<DateTime<Utc>>,
}

impl From<FundTransferDto> for FundTransfer {
    fn from(dto: FundTransferDto) -> Self {
        Self {
            fund_id: dto.fund_id,
            expected_amount: dto.expected_amount,
            actual_amount: dto.actual_amount,
            transferred_at: dto.transferred_at,
        }
    }
}
