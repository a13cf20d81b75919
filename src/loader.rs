// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fetch the transaction log and turn it into clean records.

use crate::aggregate::aggregate;
use crate::config::{Config, FetchOptions, Source};
use crate::error::{LoadError, Result};
use crate::models::{CleanRecord, MonthlyBranchAggregate, RawRecord, TransactionKind};
use crate::utils::http_client;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Source labels in `RawRecord` field order.
pub const SOURCE_COLUMNS: [&str; 8] = [
    "Timestamp",
    "สาขาที่ต้องการคีย์ข้อมูล",
    "ประเภทบัญชี",
    "ชื่อ Supplier / ลูกค้า",
    "รายละเอียด: รายรับ",
    "จำนวนเงิน (บาท): รายรับ",
    "รายละเอียด: รายจ่าย",
    "จำนวนเงิน (บาท): รายจ่าย",
];

const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Largest amount a single cell may carry; anything above is a typo.
const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

static AMOUNT_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{Sc},\s]").unwrap());

/// Labels of the transaction-type column.
#[derive(Debug, Clone, Copy)]
pub struct TypeLabels<'a> {
    pub income: &'a str,
    pub expense: &'a str,
}

impl<'a> From<&'a Config> for TypeLabels<'a> {
    fn from(cfg: &'a Config) -> Self {
        Self {
            income: &cfg.income_label,
            expense: &cfg.expense_label,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub amount_warnings: usize,
    pub bad_timestamps: usize,
}

/// Strip currency symbols and separators and parse. `None` when the cell is
/// not a plain non-negative number up to `MAX_AMOUNT`; an empty cell is zero.
pub fn try_parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = AMOUNT_NOISE.replace_all(s, "");
    if cleaned.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .ok()
        .filter(|d| !d.is_sign_negative() && *d <= Decimal::from(MAX_AMOUNT))
}

pub fn parse_amount(s: &str) -> Decimal {
    try_parse_amount(s).unwrap_or(Decimal::ZERO)
}

/// Day-first; ISO dates are accepted as well.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn amount_cell(s: &str, stats: &mut LoadStats) -> Decimal {
    match try_parse_amount(s) {
        Some(d) => d,
        None => {
            debug!(cell = s, "unparsable amount coerced to 0");
            stats.amount_warnings += 1;
            Decimal::ZERO
        }
    }
}

/// `None` when the row lacks a timestamp or a transaction type.
pub fn clean_record(
    raw: &RawRecord,
    labels: TypeLabels<'_>,
    stats: &mut LoadStats,
) -> Option<CleanRecord> {
    let ts_cell = raw.timestamp.trim();
    let type_cell = raw.trans_type.trim();
    if ts_cell.is_empty() || type_cell.is_empty() {
        return None;
    }

    let kind = if type_cell == labels.expense {
        TransactionKind::Expense {
            amount: amount_cell(&raw.expense_amount, stats),
            category: non_blank(&raw.expense_category),
        }
    } else if type_cell == labels.income {
        TransactionKind::Income {
            amount: amount_cell(&raw.income_amount, stats),
            category: non_blank(&raw.income_category),
        }
    } else {
        TransactionKind::Unrecognized
    };

    let timestamp = parse_timestamp(ts_cell);
    if timestamp.is_none() {
        debug!(cell = ts_cell, "unparsable timestamp");
        stats.bad_timestamps += 1;
    }

    Some(CleanRecord {
        timestamp,
        branch: non_blank(&raw.branch),
        kind,
        customer_name: non_blank(&raw.customer_name).filter(|c| c != "-"),
        year_month: timestamp.map(|t| t.format("%Y-%m").to_string()),
    })
}

/// Read a CSV table and clean every row.
pub fn read_records<R: Read>(
    reader: R,
    labels: TypeLabels<'_>,
) -> Result<(Vec<CleanRecord>, LoadStats)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut idx = [0usize; SOURCE_COLUMNS.len()];
    let mut missing = Vec::new();
    for (slot, label) in idx.iter_mut().zip(SOURCE_COLUMNS) {
        match headers.iter().position(|h| h == label) {
            Some(i) => *slot = i,
            None => missing.push(label.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(LoadError::Schema { missing });
    }
    let widest = idx.iter().copied().max().unwrap_or(0);

    let mut stats = LoadStats::default();
    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        stats.rows_read += 1;
        if rec.len() <= widest {
            stats.rows_dropped += 1;
            continue;
        }
        let cell = |i: usize| rec.get(idx[i]).unwrap_or("").to_string();
        let raw = RawRecord {
            timestamp: cell(0),
            branch: cell(1),
            trans_type: cell(2),
            customer_name: cell(3),
            income_category: cell(4),
            income_amount: cell(5),
            expense_category: cell(6),
            expense_amount: cell(7),
        };
        match clean_record(&raw, labels, &mut stats) {
            Some(c) => out.push(c),
            None => stats.rows_dropped += 1,
        }
    }
    Ok((out, stats))
}

fn fetch_text(url: &str, opts: &FetchOptions) -> Result<String> {
    let fetch_err = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };
    let client = http_client(opts.timeout).map_err(fetch_err)?;
    let mut attempt = 0;
    loop {
        let res = client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text());
        match res {
            Ok(body) => return Ok(body),
            Err(e)
                if attempt < opts.retries
                    && !e.status().is_some_and(|s| s.is_client_error()) =>
            {
                let delay = opts.backoff.saturating_mul(2u32.saturating_pow(attempt));
                warn!(url, attempt, error = %e, "fetch failed, retrying in {:?}", delay);
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(fetch_err(e)),
        }
    }
}

/// Pull the raw table from `source` as bytes.
pub fn fetch(source: &Source, opts: &FetchOptions) -> Result<Vec<u8>> {
    match source {
        Source::File { path } => std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        }),
        _ => {
            let url = source.url().unwrap_or_default();
            Ok(fetch_text(&url, opts)?.into_bytes())
        }
    }
}

/// Fetch, clean and aggregate.
pub fn load(cfg: &Config) -> Result<Vec<MonthlyBranchAggregate>> {
    let bytes = fetch(&cfg.source, &cfg.fetch_options())?;
    let (records, stats) = read_records(bytes.as_slice(), TypeLabels::from(cfg))?;
    let aggregates = aggregate(&records)?;
    info!(
        source = %cfg.source,
        rows = stats.rows_read,
        dropped = stats.rows_dropped,
        amount_warnings = stats.amount_warnings,
        bad_timestamps = stats.bad_timestamps,
        aggregates = aggregates.len(),
        "loaded transaction log"
    );
    Ok(aggregates)
}
