// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use salesboard::aggregate::aggregate;
use salesboard::error::LoadError;
use salesboard::models::{CleanRecord, MonthlyBranchAggregate, TransactionKind};
use salesboard::view::{BranchFilter, build_view};

fn rec(month: Option<&str>, branch: Option<&str>, kind: TransactionKind) -> CleanRecord {
    CleanRecord {
        timestamp: None,
        branch: branch.map(str::to_string),
        kind,
        customer_name: None,
        year_month: month.map(str::to_string),
    }
}

fn income(amount: i64) -> TransactionKind {
    TransactionKind::Income {
        amount: Decimal::new(amount, 0),
        category: None,
    }
}

fn expense(amount: i64) -> TransactionKind {
    TransactionKind::Expense {
        amount: Decimal::new(amount, 0),
        category: None,
    }
}

fn d(v: i64) -> Decimal {
    Decimal::new(v, 0)
}

fn scenario() -> Vec<MonthlyBranchAggregate> {
    aggregate(&[
        rec(Some("2024-01"), Some("X"), income(1000)),
        rec(Some("2024-01"), Some("X"), expense(400)),
        rec(Some("2024-02"), Some("X"), income(500)),
    ])
    .unwrap()
}

#[test]
fn aggregates_sum_per_month_and_branch() {
    let aggs = scenario();
    assert_eq!(
        aggs,
        vec![
            MonthlyBranchAggregate::new("2024-01", "X", d(1000), d(400)),
            MonthlyBranchAggregate::new("2024-02", "X", d(500), d(0)),
        ]
    );
    assert_eq!(aggs[0].profit, d(600));
    assert_eq!(aggs[1].profit, d(500));
}

#[test]
fn scenario_view_for_branch() {
    let view = build_view(&scenario(), &BranchFilter::Branch("X".into()), "X").unwrap();
    assert_eq!(view.branch, "X");
    assert_eq!(view.months.len(), 2);
    assert_eq!(view.months[0].year_month, "2024-01");
    assert_eq!(view.total_sales, d(1500));
    assert_eq!(view.total_cost, d(400));
    assert_eq!(view.total_profit, d(1100));
    assert_eq!(view.profit_percent.round_dp(2), Decimal::new(7333, 2));
    assert_eq!(view.average_monthly_profit, d(550));
}

#[test]
fn profit_is_sales_minus_cost_everywhere() {
    let aggs = aggregate(&[
        rec(Some("2024-01"), Some("X"), income(10)),
        rec(Some("2024-01"), Some("Y"), expense(70)),
        rec(Some("2024-03"), Some("Y"), income(5)),
        rec(Some("2024-03"), Some("Y"), expense(2)),
    ])
    .unwrap();
    for a in &aggs {
        assert_eq!(a.profit, a.sales - a.cost);
    }
    let view = build_view(&aggs, &BranchFilter::All, "all").unwrap();
    for m in &view.months {
        assert_eq!(m.profit, m.sales - m.cost);
    }
}

#[test]
fn unrecognized_and_ungrouped_rows_contribute_nothing() {
    let aggs = aggregate(&[
        rec(Some("2024-01"), Some("X"), TransactionKind::Unrecognized),
        rec(None, Some("X"), income(999)),
        rec(Some("2024-01"), None, income(999)),
    ])
    .unwrap();
    assert_eq!(aggs.len(), 1);
    assert_eq!(aggs[0].sales, Decimal::ZERO);
    assert_eq!(aggs[0].cost, Decimal::ZERO);
}

#[test]
fn zero_sales_gives_zero_percent() {
    let aggs = aggregate(&[rec(Some("2024-01"), Some("X"), expense(300))]).unwrap();
    let view = build_view(&aggs, &BranchFilter::All, "all").unwrap();
    assert_eq!(view.total_sales, Decimal::ZERO);
    assert_eq!(view.profit_percent, Decimal::ZERO);
    assert_eq!(view.total_profit, d(-300));
}

#[test]
fn unknown_branch_has_zero_baseline() {
    let view =
        build_view(&scenario(), &BranchFilter::Branch("Nope".into()), "Nope").unwrap();
    assert!(view.months.is_empty());
    assert_eq!(view.average_monthly_profit, Decimal::ZERO);
    assert_eq!(view.profit_percent, Decimal::ZERO);
}

#[test]
fn branch_match_is_exact_and_case_sensitive() {
    let aggs = scenario();
    for b in ["x", "X "] {
        let view = build_view(&aggs, &BranchFilter::Branch(b.into()), b).unwrap();
        assert!(view.months.is_empty());
    }
}

#[test]
fn all_branches_equals_sum_of_each_branch() {
    let aggs = aggregate(&[
        rec(Some("2024-01"), Some("X"), income(1000)),
        rec(Some("2024-01"), Some("Y"), income(300)),
        rec(Some("2024-01"), Some("Y"), expense(200)),
        rec(Some("2024-02"), Some("X"), expense(50)),
        rec(Some("2024-03"), Some("Z"), income(75)),
    ])
    .unwrap();
    let all = build_view(&aggs, &BranchFilter::All, "all").unwrap();

    let mut sales = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    let mut profit = Decimal::ZERO;
    for b in ["X", "Y", "Z"] {
        let v = build_view(&aggs, &BranchFilter::Branch(b.into()), b).unwrap();
        sales += v.total_sales;
        cost += v.total_cost;
        profit += v.total_profit;
    }
    assert_eq!(all.total_sales, sales);
    assert_eq!(all.total_cost, cost);
    assert_eq!(all.total_profit, profit);
    assert_eq!(all.months.len(), 3);
    // 1125 profit over three distinct months
    assert_eq!(all.average_monthly_profit, d(375));
}

#[test]
fn all_months_are_merged_across_branches() {
    let aggs = aggregate(&[
        rec(Some("2024-02"), Some("Y"), income(100)),
        rec(Some("2024-01"), Some("X"), income(600)),
        rec(Some("2024-01"), Some("Y"), income(100)),
    ])
    .unwrap();
    let view = build_view(&aggs, &BranchFilter::All, "all").unwrap();
    let months: Vec<&str> = view.months.iter().map(|m| m.year_month.as_str()).collect();
    assert_eq!(months, ["2024-01", "2024-02"]);
    assert_eq!(view.months[0].sales, d(700));
    assert_eq!(view.average_monthly_profit, d(400));
}

#[test]
fn sentinel_selection_maps_to_all() {
    assert_eq!(BranchFilter::from_selection("ALL", "ALL"), BranchFilter::All);
    assert_eq!(
        BranchFilter::from_selection("ASASA", "ALL"),
        BranchFilter::Branch("ASASA".into())
    );
}

#[test]
fn group_total_out_of_range_is_an_error() {
    let huge = TransactionKind::Income {
        amount: Decimal::MAX,
        category: None,
    };
    let err = aggregate(&[
        rec(Some("2024-01"), Some("X"), huge.clone()),
        rec(Some("2024-01"), Some("X"), huge),
    ])
    .unwrap_err();
    assert!(matches!(err, LoadError::Overflow { .. }));
    assert!(err.to_string().contains("2024-01 / X"));
}

#[test]
fn percent_out_of_range_is_an_error() {
    let cost: Decimal = "10000000000000000000000000000".parse().unwrap();
    let aggs = vec![MonthlyBranchAggregate::new(
        "2024-01",
        "X",
        Decimal::new(1, 2),
        cost,
    )];
    let err = build_view(&aggs, &BranchFilter::All, "all").unwrap_err();
    assert!(matches!(err, LoadError::Overflow { .. }));
}

#[test]
fn selection_total_out_of_range_is_an_error() {
    let aggs = vec![
        MonthlyBranchAggregate::new("2024-01", "X", Decimal::MAX, Decimal::ZERO),
        MonthlyBranchAggregate::new("2024-01", "Y", Decimal::MAX, Decimal::ZERO),
    ];
    assert!(build_view(&aggs, &BranchFilter::Branch("X".into()), "X").is_ok());
    let err = build_view(&aggs, &BranchFilter::All, "all").unwrap_err();
    assert!(matches!(err, LoadError::Overflow { .. }));
}
