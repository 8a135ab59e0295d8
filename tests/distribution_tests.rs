use budget_engine::{
    api::encode_rules_for_save,
    core::services::{DistributionService, RuleIssue},
    domain::{DistributionRule, Fund, FundTransfer},
    EngineError,
};

fn funds() -> (Fund, Fund, Fund) {
    (
        Fund::new("Emergency"),
        Fund::new("Vacation"),
        Fund::new("Investments"),
    )
}

#[test]
fn over_one_hundred_percent_is_invalid() {
    let (emergency, vacation, _) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 60.0),
        DistributionRule::new(vacation.id, 50.0),
    ];
    let validation = DistributionService::validate(&rules);
    assert_eq!(validation.total_percentage, 110.0);
    assert!(!validation.is_valid);
    assert_eq!(validation.remaining_percentage, -10.0);
    assert_eq!(validation.issues, vec![RuleIssue::OverAllocated { total: 110.0 }]);
}

#[test]
fn remaining_percentage_is_left_for_categories() {
    let (emergency, vacation, _) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 40.0),
        DistributionRule::new(vacation.id, 30.0),
    ];
    let validation = DistributionService::validate(&rules);
    assert!(validation.is_valid);
    assert_eq!(validation.total_percentage, 70.0);
    assert_eq!(validation.remaining_percentage, 30.0);
}

#[test]
fn exactly_one_hundred_percent_is_allowed() {
    let (emergency, vacation, _) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 75.0),
        DistributionRule::new(vacation.id, 25.0),
    ];
    assert!(DistributionService::ensure_saveable(&rules).is_ok());
}

#[test]
fn one_decimal_percentages_summing_to_one_hundred_are_allowed() {
    let (emergency, vacation, investments) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 0.2),
        DistributionRule::new(vacation.id, 83.9),
        DistributionRule::new(investments.id, 15.9),
    ];
    let validation = DistributionService::validate(&rules);
    assert!(validation.is_valid, "{:?}", validation.issues);
    assert_eq!(validation.total_percentage, 100.0);
    assert_eq!(validation.remaining_percentage, 0.0);
    assert!(encode_rules_for_save(&rules).is_ok());
}

#[test]
fn saving_invalid_rules_is_blocked() {
    let (emergency, vacation, _) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 60.0),
        DistributionRule::new(vacation.id, 50.0),
    ];
    let err = DistributionService::ensure_saveable(&rules).unwrap_err();
    match err {
        EngineError::Validation(message) => assert!(message.contains("110"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn summary_splits_income_per_rule() {
    let (emergency, vacation, investments) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 10.0),
        DistributionRule::new(vacation.id, 15.0),
    ];
    let transfers = vec![
        FundTransfer::new(emergency.id, 15_000.0, 15_000.0),
        FundTransfer::new(vacation.id, 22_500.0, 10_000.0),
    ];
    let all_funds = vec![emergency.clone(), vacation.clone(), investments.clone()];
    let summary = DistributionService::summarize(&all_funds, &rules, 150_000.0, &transfers);

    assert_eq!(summary.funds.len(), 3);
    let first = &summary.funds[0];
    assert_eq!(first.fund_name, "Emergency");
    assert_eq!(first.planned_amount, 15_000.0);
    assert_eq!(first.percent_of_income, 10.0);
    assert_eq!(first.percent_of_funds, 40.0);
    assert!(first.is_completed);

    let second = &summary.funds[1];
    assert_eq!(second.planned_amount, 22_500.0);
    assert_eq!(second.percent_of_funds, 60.0);
    assert!(!second.is_completed);

    let third = &summary.funds[2];
    assert_eq!(third.fund_id, investments.id);
    assert_eq!(third.percentage, 0.0);
    assert_eq!(third.planned_amount, 0.0);
    assert_eq!(third.percent_of_funds, 0.0);

    assert_eq!(summary.total_planned, 37_500.0);
    assert_eq!(summary.remaining_amount, 112_500.0);
    assert_eq!(summary.total_actual, 25_000.0);
    assert!(!summary.is_completed);
    assert!(summary.validation.is_valid);
}

#[test]
fn planned_amounts_are_rounded() {
    let (emergency, _, _) = funds();
    let rules = vec![DistributionRule::new(emergency.id, 33.0)];
    let summary = DistributionService::summarize(&[emergency], &rules, 1_001.0, &[]);
    let entry = &summary.funds[0];
    assert_eq!(entry.planned_amount, 330.0);
    assert_eq!(entry.percent_of_income, 33.0);
    assert_eq!(entry.percent_of_funds, 100.0);
    assert_eq!(entry.expected_amount, 330.0);
    assert_eq!(entry.actual_amount, 0.0);
    assert!(!entry.is_completed);
}

#[test]
fn zero_income_produces_zero_shares() {
    let (emergency, vacation, _) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 20.0),
        DistributionRule::new(vacation.id, 20.0),
    ];
    let summary = DistributionService::summarize(&[emergency, vacation], &rules, 0.0, &[]);
    for entry in &summary.funds {
        assert_eq!(entry.planned_amount, 0.0);
        assert_eq!(entry.percent_of_income, 0.0);
        assert_eq!(entry.percent_of_funds, 0.0);
        assert!(entry.is_completed);
    }
}

#[test]
fn inactive_funds_without_rules_are_skipped() {
    let (emergency, mut vacation, _) = funds();
    vacation.is_active = false;
    let rules = vec![DistributionRule::new(emergency.id, 10.0)];
    let summary = DistributionService::summarize(&[emergency, vacation], &rules, 1_000.0, &[]);
    assert_eq!(summary.funds.len(), 1);
}

#[test]
fn duplicate_rules_for_a_fund_are_summed() {
    let (emergency, vacation, _) = funds();
    let rules = vec![
        DistributionRule::new(emergency.id, 10.0),
        DistributionRule::new(vacation.id, 20.0),
        DistributionRule::new(emergency.id, 5.0),
    ];
    let summary = DistributionService::summarize(
        &[emergency.clone(), vacation.clone()],
        &rules,
        1_000.0,
        &[],
    );
    assert_eq!(summary.funds.len(), 2);
    assert_eq!(summary.funds[0].fund_id, emergency.id);
    assert_eq!(summary.funds[0].percentage, 15.0);
    assert_eq!(summary.funds[0].planned_amount, 150.0);
    assert_eq!(summary.funds[1].planned_amount, 200.0);
    assert_eq!(summary.total_planned, 350.0);
    assert!(!summary.validation.is_valid);
    assert_eq!(
        summary.validation.issues,
        vec![RuleIssue::DuplicateFund {
            fund_id: emergency.id
        }]
    );
}

#[test]
fn transfers_for_the_same_fund_accumulate() {
    let (emergency, _, _) = funds();
    let rules = vec![DistributionRule::new(emergency.id, 15.0)];
    let transfers = vec![
        FundTransfer::new(emergency.id, 100.0, 60.0),
        FundTransfer::new(emergency.id, 50.0, 90.0),
    ];
    let summary =
        DistributionService::summarize(&[emergency.clone()], &rules, 1_000.0, &transfers);
    let entry = &summary.funds[0];
    assert_eq!(entry.expected_amount, 150.0);
    assert_eq!(entry.actual_amount, 150.0);
    assert!(entry.is_completed);
    assert_eq!(summary.total_actual, 150.0);
}
