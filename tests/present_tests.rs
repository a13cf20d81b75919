// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use salesboard::models::{MonthlyBranchAggregate, ViewModel};
use salesboard::present::{
    SeriesKind, ViewResponse, chart_spec, escape_html, format_percent, format_thousands,
    render_page, render_static, summary_items,
};
use salesboard::view::{BranchFilter, build_view};

fn view() -> ViewModel {
    let aggs = vec![
        MonthlyBranchAggregate::new("2024-01", "A&D", Decimal::new(1000, 0), Decimal::new(400, 0)),
        MonthlyBranchAggregate::new("2024-02", "A&D", Decimal::new(500, 0), Decimal::ZERO),
    ];
    build_view(&aggs, &BranchFilter::Branch("A&D".into()), "A&D").unwrap()
}

#[test]
fn thousands_formatting() {
    assert_eq!(format_thousands(Decimal::new(1234567, 0)), "1,234,567");
    assert_eq!(format_thousands(Decimal::new(999, 0)), "999");
    assert_eq!(format_thousands(Decimal::ZERO), "0");
    assert_eq!(format_thousands(Decimal::new(-12344, 1)), "-1,234");
    assert_eq!(format_thousands(Decimal::new(1000000, 2)), "10,000");
    assert_eq!(format_thousands(Decimal::new(-4, 1)), "0");
    // ties to even
    assert_eq!(format_thousands(Decimal::new(25, 1)), "2");
    assert_eq!(format_thousands(Decimal::new(35, 1)), "4");
}

#[test]
fn percent_formatting() {
    assert_eq!(format_percent(Decimal::new(733333, 4)), "73.33 %");
    assert_eq!(format_percent(Decimal::ZERO), "0.00 %");
}

#[test]
fn summary_has_four_labeled_values() {
    let items = summary_items(&view(), "บาท");
    let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
    assert_eq!(values, ["1,500 บาท", "400 บาท", "1,100 บาท", "73.33 %"]);
    let colors: Vec<&str> = items.iter().map(|i| i.color.as_str()).collect();
    assert_eq!(colors, ["white", "red", "green", "green"]);
}

#[test]
fn chart_has_cost_profit_sales_and_baseline() {
    let spec = chart_spec(&view(), "บาท");
    assert_eq!(spec.x, ["2024-01", "2024-02"]);
    let kinds: Vec<SeriesKind> = spec.series.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, [SeriesKind::Bar, SeriesKind::Bar, SeriesKind::Line]);
    assert_eq!(spec.series[0].labels, ["400", "0"]);
    assert_eq!(spec.series[1].y, [600.0, 500.0]);
    assert_eq!(spec.series[2].labels, ["1,000", "500"]);
    assert_eq!(spec.baseline.y, 550.0);
    assert_eq!(spec.baseline.label, "รายได้เฉลี่ย/เดือน: 550 บาท");
    assert!(spec.title.ends_with("A&D"));
}

#[test]
fn plotly_figure_stacks_bars_and_draws_baseline() {
    let fig = chart_spec(&view(), "บาท").to_plotly();
    assert_eq!(fig["layout"]["barmode"], "relative");
    assert_eq!(fig["data"][0]["type"], "bar");
    assert_eq!(fig["data"][2]["type"], "scatter");
    assert_eq!(fig["data"][2]["mode"], "lines+markers+text");
    assert_eq!(fig["layout"]["shapes"][0]["y0"], 550.0);
    assert_eq!(fig["layout"]["shapes"][0]["line"]["dash"], "dash");
    assert_eq!(
        fig["layout"]["annotations"][0]["text"],
        "รายได้เฉลี่ย/เดือน: 550 บาท"
    );
}

#[test]
fn failed_response_carries_error_and_empty_chart() {
    let resp = ViewResponse::failed("ASASA", "Missing column(s) in source: Timestamp");
    assert!(resp.summary.is_empty());
    assert_eq!(resp.figure["data"].as_array().map(Vec::len), Some(0));
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["error"], "Missing column(s) in source: Timestamp");

    let ok = ViewResponse::from_view(&view(), "บาท");
    let json = serde_json::to_value(&ok).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["summary"].as_array().map(Vec::len), Some(4));
}

#[test]
fn page_escapes_branch_names_and_selects_default() {
    let branches = vec!["ALL".to_string(), "A&D".to_string()];
    let page = render_page(&branches, "ALL");
    assert!(page.contains("<option value=\"A&amp;D\">A&amp;D</option>"));
    assert!(page.contains("<option value=\"ALL\" selected>ALL</option>"));
    assert!(page.contains("/api/view?branch="));
}

#[test]
fn static_page_embeds_figure() {
    let page = render_static(&view(), "บาท");
    assert!(page.contains("Plotly.newPlot"));
    assert!(page.contains("<h2>A&amp;D</h2>"));
    assert!(page.contains("1,500 บาท"));
    assert_eq!(escape_html("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
}
