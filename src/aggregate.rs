// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LoadError, Result};
use crate::models::{CleanRecord, MonthlyBranchAggregate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sum sales and cost per (year_month, branch). Records without a month or
/// a branch have no group and are skipped.
pub fn aggregate(records: &[CleanRecord]) -> Result<Vec<MonthlyBranchAggregate>> {
    let mut map: BTreeMap<(&str, &str), (Decimal, Decimal)> = BTreeMap::new();
    for r in records {
        let (Some(month), Some(branch)) = (r.year_month.as_deref(), r.branch.as_deref())
        else {
            continue;
        };
        let entry = map
            .entry((month, branch))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        let overflow = || LoadError::Overflow {
            context: format!("{month} / {branch}"),
        };
        entry.0 = entry.0.checked_add(r.sales_amount()).ok_or_else(overflow)?;
        entry.1 = entry.1.checked_add(r.cost_amount()).ok_or_else(overflow)?;
    }
    Ok(map
        .into_iter()
        .map(|((month, branch), (sales, cost))| {
            MonthlyBranchAggregate::new(month, branch, sales, cost)
        })
        .collect())
}
