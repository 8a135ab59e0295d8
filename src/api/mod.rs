//! Decoding of API payloads into domain snapshots, and encoding of rule edits.

pub mod dto;
pub mod nullable;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::core::services::DistributionService;
use crate::domain::{
    BudgetItem, BudgetPeriod, BudgetSnapshot, DistributionRule, ExpenseCategory, Fund,
    FundTransfer,
};
use crate::errors::Result;

use dto::{BudgetItemDto, CategoryDto, DistributionRuleDto, FundDto, FundTransferDto};

fn decode_list<D, T>(json: &str) -> Result<Vec<T>>
where
    D: DeserializeOwned,
    T: From<D>,
{
    let value: Value = serde_json::from_str(json)?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    let dtos: Vec<D> = serde_json::from_value(value)?;
    Ok(dtos.into_iter().map(T::from).collect())
}

pub fn decode_categories(json: &str) -> Result<Vec<ExpenseCategory>> {
    decode_list::<CategoryDto, _>(json)
}

pub fn decode_budget_items(json: &str) -> Result<Vec<BudgetItem>> {
    decode_list::<BudgetItemDto, _>(json)
}

pub fn decode_funds(json: &str) -> Result<Vec<Fund>> {
    decode_list::<FundDto, _>(json)
}

pub fn decode_rules(json: &str) -> Result<Vec<DistributionRule>> {
    decode_list::<DistributionRuleDto, _>(json)
}

pub fn decode_transfers(json: &str) -> Result<Vec<FundTransfer>> {
    decode_list::<FundTransferDto, _>(json)
}

/// Decodes the `{categoryId: amount}` spend map. Unparseable keys are skipped.
pub fn decode_actuals(json: &str) -> Result<HashMap<Uuid, f64>> {
    let raw: Option<HashMap<String, Value>> = serde_json::from_str(json)?;
    let mut actuals = HashMap::new();
    for (key, value) in raw.unwrap_or_default() {
        match Uuid::parse_str(&key) {
            Ok(id) => {
                actuals.insert(id, nullable::coerce_amount(&value));
            }
            Err(_) => tracing::warn!(
                key = key.as_str(),
                "skipping actual spend with invalid category id"
            ),
        }
    }
    Ok(actuals)
}

/// Builds a snapshot from the three budget-page responses.
pub fn decode_snapshot(
    period: Option<BudgetPeriod>,
    categories_json: &str,
    items_json: &str,
    actuals_json: &str,
) -> Result<BudgetSnapshot> {
    Ok(BudgetSnapshot {
        period,
        categories: decode_categories(categories_json)?,
        items: decode_budget_items(items_json)?,
        actuals: decode_actuals(actuals_json)?,
    })
}

/// Serializes rule edits for the `PUT` request, refusing invalid sets.
pub fn encode_rules_for_save(rules: &[DistributionRule]) -> Result<String> {
    DistributionService::ensure_saveable(rules)?;
    let body: Vec<DistributionRuleDto> = rules.iter().map(DistributionRuleDto::from).collect();
    Ok(serde_json::to_string(&body)?)
}
