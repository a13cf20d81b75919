// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::error::Result;
use crate::loader;
use crate::models::{MonthlyBranchAggregate, ViewModel};
use crate::view::{BranchFilter, build_view};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    key: String,
    fetched_at: Instant,
    aggregates: Arc<Vec<MonthlyBranchAggregate>>,
}

/// Time-bounded cache of the last load, keyed by source identity.
pub struct AggregateCache {
    ttl: Duration,
    slot: Mutex<Option<Entry>>,
}

impl AggregateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    fn get(&self, key: &str) -> Option<Arc<Vec<MonthlyBranchAggregate>>> {
        let slot = self.slot.lock().ok()?;
        slot.as_ref()
            .filter(|e| e.key == key && e.fetched_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.aggregates))
    }

    fn put(&self, key: String, aggregates: Arc<Vec<MonthlyBranchAggregate>>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(Entry {
                key,
                fetched_at: Instant::now(),
                aggregates,
            });
        }
    }

    /// Cached aggregates for `cfg.source`, loading on a miss.
    pub fn get_or_load(&self, cfg: &Config) -> Result<Arc<Vec<MonthlyBranchAggregate>>> {
        let key = cfg.source.identity();
        if let Some(hit) = self.get(&key) {
            debug!(source = %key, "aggregate cache hit");
            return Ok(hit);
        }
        let fresh = Arc::new(loader::load(cfg)?);
        self.put(key, Arc::clone(&fresh));
        Ok(fresh)
    }
}

/// One full run for a dropdown selection: fetch, clean, aggregate, filter.
pub fn run(cfg: &Config, selected: &str, cache: Option<&AggregateCache>) -> Result<ViewModel> {
    let aggregates = match cache {
        Some(c) => c.get_or_load(cfg)?,
        None => Arc::new(loader::load(cfg)?),
    };
    let filter = BranchFilter::from_selection(selected, &cfg.all_branches_label);
    build_view(&aggregates, &filter, selected)
}
