// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("org", "Salesboard", "salesboard"));

pub const DEFAULT_SHEET_ID: &str = "15_JmzjUIt2LXrUlVug3yGYlZ2XslwVnlt6ge7DIT-rE";
pub const DEFAULT_GID: &str = "949201953";
pub const ALL_BRANCHES: &str = "ดาเลเซอร์ (รวมทุกสาขา)";

/// Where the transaction log comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    GoogleSheet { sheet_id: String, gid: String },
    Url { url: String },
    File { path: PathBuf },
}

impl Source {
    /// Stable identity used as the cache key.
    pub fn identity(&self) -> String {
        match self {
            Source::GoogleSheet { .. } | Source::Url { .. } => {
                self.url().unwrap_or_default()
            }
            Source::File { path } => format!("file://{}", path.display()),
        }
    }

    pub fn url(&self) -> Option<String> {
        match self {
            Source::GoogleSheet { sheet_id, gid } => Some(format!(
                "https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}"
            )),
            Source::Url { url } => Some(url.clone()),
            Source::File { .. } => None,
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::GoogleSheet {
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            gid: DEFAULT_GID.to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: Source,
    /// Dropdown options, sentinel first.
    pub branches: Vec<String>,
    pub all_branches_label: String,
    pub income_label: String,
    pub expense_label: String,
    pub currency_suffix: String,
    pub timeout_secs: u64,
    pub retries: u32,
    /// 0 disables the cache: every interaction re-fetches.
    pub cache_ttl_secs: u64,
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: Source::default(),
            branches: vec![
                ALL_BRANCHES.to_string(),
                "A&D จิวเวลรี่ราคาส่ง".to_string(),
                "ASASA".to_string(),
                "LaGemme".to_string(),
                "velan.co".to_string(),
            ],
            all_branches_label: ALL_BRANCHES.to_string(),
            income_label: "รายรับ".to_string(),
            expense_label: "รายจ่าย".to_string(),
            currency_suffix: "บาท".to_string(),
            timeout_secs: 15,
            retries: 2,
            cache_ttl_secs: 0,
            bind: "127.0.0.1:8050".to_string(),
        }
    }
}

impl Config {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            retries: self.retries,
            ..FetchOptions::default()
        }
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }

    /// Dropdown options, guaranteeing the sentinel is present and first.
    pub fn branch_options(&self) -> Vec<String> {
        let mut out = vec![self.all_branches_label.clone()];
        for b in &self.branches {
            if !out.contains(b) {
                out.push(b.clone());
            }
        }
        out
    }

    pub fn from_path(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let cfg = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(cfg)
    }

    /// Explicit path must exist; the default location falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        if let Some(p) = explicit {
            return Config::from_path(p);
        }
        let path = config_path()?;
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Config::from_path(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config dir")?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config {}", path.display()))?;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}
