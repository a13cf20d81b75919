// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

/// Source-level failures. Any of these aborts the current render; cell-level
/// problems never surface here, they are coerced and counted in `LoadStats`.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source is not a readable table: {0}")]
    Malformed(#[from] csv::Error),

    #[error("Missing column(s) in source: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Amounts out of range while totalling {context}")]
    Overflow { context: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;
