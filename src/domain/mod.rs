//! Domain records as held by the front end: read-only snapshots of API resources.

pub mod budget;
pub mod category;
pub mod common;
pub mod fund;
pub mod period;
pub mod snapshot;

pub use budget::{BudgetItem, BudgetItemShape, CurrencyLimit};
pub use category::{CategoryIcon, ExpenseCategory, HiddenCategories};
pub use common::{Identifiable, NamedEntity, MONEY_EPSILON};
pub use fund::{DistributionRule, Fund, FundTransfer};
pub use period::BudgetPeriod;
pub use snapshot::BudgetSnapshot;
