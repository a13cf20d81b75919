// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Formatting of a `ViewModel` into summary widgets, a Plotly figure and HTML.
//! Nothing here derives numbers.

use crate::models::{MonthlyTotals, ViewModel};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde_json::{Value, json};

const FONT: &str = "Noto Sans Thai, Arial, sans-serif";
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// `1234567.5` -> `"1,234,568"`; ties round to even.
pub fn format_thousands(d: Decimal) -> String {
    let digits = d.round_dp(0).abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if d.round_dp(0).is_sign_negative() && !d.round_dp(0).is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_percent(d: Decimal) -> String {
    format!("{:.2} %", d.round_dp(2))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
    pub color: String,
}

fn item(label: &str, value: String, color: &str) -> SummaryItem {
    SummaryItem {
        label: label.to_string(),
        value,
        color: color.to_string(),
    }
}

pub fn summary_items(view: &ViewModel, currency: &str) -> Vec<SummaryItem> {
    vec![
        item("ยอดขาย", format!("{} {}", format_thousands(view.total_sales), currency), "white"),
        item("ต้นทุน", format!("{} {}", format_thousands(view.total_cost), currency), "red"),
        item("กำไร", format!("{} {}", format_thousands(view.total_profit), currency), "green"),
        item("กำไร (%)", format_percent(view.profit_percent), "green"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub color: String,
    pub y: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baseline {
    pub y: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x: Vec<String>,
    /// Drawn in order: cost, profit, sales.
    pub series: Vec<Series>,
    pub baseline: Baseline,
}

fn series(
    view: &ViewModel,
    name: &str,
    kind: SeriesKind,
    color: &str,
    pick: fn(&MonthlyTotals) -> Decimal,
) -> Series {
    Series {
        name: name.to_string(),
        kind,
        color: color.to_string(),
        y: view.months.iter().map(|m| pick(m).to_f64().unwrap_or(0.0)).collect(),
        labels: view.months.iter().map(|m| format_thousands(pick(m))).collect(),
    }
}

pub fn chart_spec(view: &ViewModel, currency: &str) -> ChartSpec {
    ChartSpec {
        title: format!("สรุปผลดำเนินงานธุรกิจ - {}", view.branch),
        x_title: "ปี-เดือน".to_string(),
        y_title: "จำนวนเงิน".to_string(),
        x: view.months.iter().map(|m| m.year_month.clone()).collect(),
        series: vec![
            series(view, "ต้นทุน", SeriesKind::Bar, "red", |m| m.cost),
            series(view, "กำไร", SeriesKind::Bar, "green", |m| m.profit),
            series(view, "ยอดขาย", SeriesKind::Line, "white", |m| m.sales),
        ],
        baseline: Baseline {
            y: view.average_monthly_profit.to_f64().unwrap_or(0.0),
            label: format!(
                "รายได้เฉลี่ย/เดือน: {} {}",
                format_thousands(view.average_monthly_profit),
                currency
            ),
            color: "yellow".to_string(),
        },
    }
}

fn base_layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "barmode": "relative",
        "title": { "text": title },
        "xaxis": { "title": { "text": x_title }, "type": "category" },
        "yaxis": { "title": { "text": y_title } },
        "template": "plotly_dark",
        "paper_bgcolor": "#111",
        "plot_bgcolor": "#111",
        "font": { "family": FONT, "size": 14, "color": "white" },
        "legend": {
            "title": { "text": "รายการ" },
            "orientation": "h",
            "yanchor": "bottom", "y": 1,
            "xanchor": "right", "x": 1
        },
        "margin": { "t": 40, "b": 80, "l": 80, "r": 80 }
    })
}

impl ChartSpec {
    pub fn to_plotly(&self) -> Value {
        let data: Vec<Value> = self
            .series
            .iter()
            .map(|s| match s.kind {
                SeriesKind::Bar => json!({
                    "type": "bar",
                    "name": s.name,
                    "x": self.x,
                    "y": s.y,
                    "text": s.labels,
                    "textposition": "inside",
                    "marker": { "color": s.color }
                }),
                SeriesKind::Line => json!({
                    "type": "scatter",
                    "mode": "lines+markers+text",
                    "name": s.name,
                    "x": self.x,
                    "y": s.y,
                    "text": s.labels,
                    "textposition": "top center",
                    "line": { "color": s.color, "width": 3 }
                }),
            })
            .collect();

        let mut layout = base_layout(&self.title, &self.x_title, &self.y_title);
        layout["shapes"] = json!([{
            "type": "line",
            "xref": "paper", "x0": 0, "x1": 1,
            "yref": "y", "y0": self.baseline.y, "y1": self.baseline.y,
            "line": { "color": self.baseline.color, "dash": "dash" }
        }]);
        layout["annotations"] = json!([{
            "xref": "paper", "x": 1, "xanchor": "right",
            "yref": "y", "y": self.baseline.y, "yanchor": "bottom",
            "text": self.baseline.label,
            "showarrow": false,
            "font": { "color": self.baseline.color }
        }]);

        json!({ "data": data, "layout": layout })
    }
}

/// Figure shown when the pipeline failed.
pub fn empty_figure(title: &str) -> Value {
    json!({ "data": [], "layout": base_layout(title, "ปี-เดือน", "จำนวนเงิน") })
}

/// Body of `/api/view`.
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub branch: String,
    pub summary: Vec<SummaryItem>,
    pub figure: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ViewResponse {
    pub fn from_view(view: &ViewModel, currency: &str) -> Self {
        Self {
            branch: view.branch.clone(),
            summary: summary_items(view, currency),
            figure: chart_spec(view, currency).to_plotly(),
            error: None,
        }
    }

    pub fn failed(branch: &str, error: impl ToString) -> Self {
        Self {
            branch: branch.to_string(),
            summary: Vec::new(),
            figure: empty_figure(&format!("สรุปผลดำเนินงานธุรกิจ - {branch}")),
            error: Some(error.to_string()),
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON safe to place inside a `<script>` element.
fn script_json(v: &Value) -> String {
    v.to_string().replace("</", "<\\/")
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="th">
<head>
<meta charset="utf-8">
<title>Dashboard</title>
<script src="{{PLOTLY}}"></script>
<style>
  body { background-color: #111; padding: 20px; color: white; font-family: {{FONT}}; }
  #summary { display: flex; justify-content: space-around; margin: 20px 0; font-size: 18px; font-weight: bold; }
  #error { color: #ff6b6b; min-height: 1em; }
  select { font-size: 16px; padding: 4px; min-width: 280px; }
</style>
</head>
"#;

fn head() -> String {
    PAGE_HEAD.replace("{{PLOTLY}}", PLOTLY_CDN).replace("{{FONT}}", FONT)
}

fn summary_html(items: &[SummaryItem]) -> String {
    items
        .iter()
        .map(|i| {
            format!(
                "<div><div>{}</div><div style=\"color: {}\">{}</div></div>",
                escape_html(&i.label),
                escape_html(&i.color),
                escape_html(&i.value)
            )
        })
        .collect()
}

/// Interactive page: the dropdown drives `/api/view`.
pub fn render_page(branches: &[String], default_branch: &str) -> String {
    let options: String = branches
        .iter()
        .map(|b| {
            let sel = if b == default_branch { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", escape_html(b), sel)
        })
        .collect();
    format!(
        r#"{head}<body>
<h1>📈 Dashboard</h1>
<label for="branch-filter">เลือกสาขา:</label>
<select id="branch-filter">{options}</select>
<div id="error"></div>
<div id="summary"></div>
<div id="chart" style="height: 600px"></div>
<script>
const select = document.getElementById('branch-filter');
function renderSummary(items) {{
  const box = document.getElementById('summary');
  box.replaceChildren();
  for (const it of items) {{
    const cell = document.createElement('div');
    const label = document.createElement('div');
    label.textContent = it.label;
    const value = document.createElement('div');
    value.textContent = it.value;
    value.style.color = it.color;
    cell.append(label, value);
    box.append(cell);
  }}
}}
async function refresh() {{
  let body;
  try {{
    const res = await fetch('/api/view?branch=' + encodeURIComponent(select.value));
    body = await res.json();
  }} catch (e) {{
    body = {{ summary: [], figure: {{ data: [], layout: {{}} }}, error: String(e) }};
  }}
  document.getElementById('error').textContent = body.error || '';
  renderSummary(body.summary);
  Plotly.react('chart', body.figure.data, body.figure.layout);
}}
select.addEventListener('change', refresh);
refresh();
</script>
</body>
</html>
"#,
        head = head(),
        options = options,
    )
}

/// Self-contained page for one selection.
pub fn render_static(view: &ViewModel, currency: &str) -> String {
    let figure = chart_spec(view, currency).to_plotly();
    format!(
        r#"{head}<body>
<h1>📈 Dashboard</h1>
<h2>{branch}</h2>
<div id="summary">{summary}</div>
<div id="chart" style="height: 600px"></div>
<script>
const fig = {figure};
Plotly.newPlot('chart', fig.data, fig.layout);
</script>
</body>
</html>
"#,
        head = head(),
        branch = escape_html(&view.branch),
        summary = summary_html(&summary_items(view, currency)),
        figure = script_json(&figure),
    )
}
