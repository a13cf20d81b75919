// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One source row, cells as they appear in the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub timestamp: String,
    pub branch: String,
    pub trans_type: String,
    pub customer_name: String,
    pub income_category: String,
    pub income_amount: String,
    pub expense_category: String,
    pub expense_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Income {
        amount: Decimal,
        category: Option<String>,
    },
    Expense {
        amount: Decimal,
        category: Option<String>,
    },
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub branch: Option<String>,
    pub kind: TransactionKind,
    pub customer_name: Option<String>,
    pub year_month: Option<String>, // YYYY-MM
}

impl CleanRecord {
    pub fn description(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Income { category, .. }
            | TransactionKind::Expense { category, .. } => category.as_deref(),
            TransactionKind::Unrecognized => None,
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self.kind {
            TransactionKind::Income { amount, .. } | TransactionKind::Expense { amount, .. } => {
                Some(amount)
            }
            TransactionKind::Unrecognized => None,
        }
    }

    pub fn sales_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income { amount, .. } => amount,
            _ => Decimal::ZERO,
        }
    }

    pub fn cost_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Expense { amount, .. } => amount,
            _ => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBranchAggregate {
    pub year_month: String,
    pub branch: String,
    pub sales: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

impl MonthlyBranchAggregate {
    pub fn new(
        year_month: impl Into<String>,
        branch: impl Into<String>,
        sales: Decimal,
        cost: Decimal,
    ) -> Self {
        Self {
            year_month: year_month.into(),
            branch: branch.into(),
            sales,
            cost,
            profit: sales - cost,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub year_month: String,
    pub sales: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub branch: String,
    pub months: Vec<MonthlyTotals>, // ascending by year_month
    pub total_sales: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub profit_percent: Decimal,
    pub average_monthly_profit: Decimal,
}
