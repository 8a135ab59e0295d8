pub mod bucket_service;
pub mod distribution_service;
pub mod limit_service;
pub mod merge_service;
pub mod summary_service;

pub use bucket_service::{BucketTotals, CurrencyBucketAggregator, CurrencyTotals};
pub use distribution_service::{
    DistributionService, DistributionSummary, FundDistributionSummary, RuleIssue, RuleValidation,
};
pub use limit_service::{CurrencyLimitFigures, LimitCalculator, LimitFigures};
pub use merge_service::{BudgetRow, CategoryMergeService, CategoryToggle, FundFinancing};
pub use summary_service::{BudgetReport, BudgetTotals, SummaryService};
