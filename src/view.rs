// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LoadError, Result};
use crate::models::{MonthlyBranchAggregate, MonthlyTotals, ViewModel};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchFilter {
    All,
    Branch(String),
}

impl BranchFilter {
    /// Map a dropdown value onto a filter; `all_label` is the sentinel.
    pub fn from_selection(selected: &str, all_label: &str) -> Self {
        if selected == all_label {
            BranchFilter::All
        } else {
            BranchFilter::Branch(selected.to_string())
        }
    }

    /// Exact, case-sensitive match.
    pub fn matches(&self, branch: &str) -> bool {
        match self {
            BranchFilter::All => true,
            BranchFilter::Branch(b) => b == branch,
        }
    }
}

impl fmt::Display for BranchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchFilter::All => f.write_str("all"),
            BranchFilter::Branch(b) => f.write_str(b),
        }
    }
}

fn overflow(context: &str) -> LoadError {
    LoadError::Overflow {
        context: context.to_string(),
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>, context: &str) -> Result<Decimal> {
    values
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| overflow(context))
}

/// Monthly totals and summary figures for one branch selection.
pub fn build_view(
    aggregates: &[MonthlyBranchAggregate],
    filter: &BranchFilter,
    label: &str,
) -> Result<ViewModel> {
    let selected: Vec<&MonthlyBranchAggregate> = aggregates
        .iter()
        .filter(|a| filter.matches(&a.branch))
        .collect();

    let mut by_month: BTreeMap<&str, MonthlyTotals> = BTreeMap::new();
    for a in &selected {
        let m = by_month
            .entry(a.year_month.as_str())
            .or_insert_with(|| MonthlyTotals {
                year_month: a.year_month.clone(),
                ..MonthlyTotals::default()
            });
        let add = |x: Decimal, y: Decimal| {
            x.checked_add(y).ok_or_else(|| overflow(&a.year_month))
        };
        m.sales = add(m.sales, a.sales)?;
        m.cost = add(m.cost, a.cost)?;
        m.profit = add(m.profit, a.profit)?;
    }
    let months: Vec<MonthlyTotals> = by_month.into_values().collect();

    let distinct_months: HashSet<&str> =
        selected.iter().map(|a| a.year_month.as_str()).collect();
    let baseline_profit = checked_sum(selected.iter().map(|a| a.profit), label)?;
    let average_monthly_profit = if distinct_months.is_empty() {
        Decimal::ZERO
    } else {
        baseline_profit
            .checked_div(Decimal::from(distinct_months.len()))
            .ok_or_else(|| overflow(label))?
    };

    let total_sales = checked_sum(months.iter().map(|m| m.sales), label)?;
    let total_cost = checked_sum(months.iter().map(|m| m.cost), label)?;
    let total_profit = checked_sum(months.iter().map(|m| m.profit), label)?;
    let profit_percent = if total_sales.is_zero() {
        Decimal::ZERO
    } else {
        total_profit
            .checked_div(total_sales)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| overflow(label))?
    };

    Ok(ViewModel {
        branch: label.to_string(),
        months,
        total_sales,
        total_cost,
        total_profit,
        profit_percent,
        average_monthly_profit,
    })
}
