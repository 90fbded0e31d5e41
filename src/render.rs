//! HTML fragments for the inspection views.
//!
//! Every fragment is a standalone `<table class="table">` (or `<figure>` for charts) with all
//! user-provided text escaped. Missing values render as `NaN`.

use crate::charts::ChartSpec;
use crate::profiling::{ColumnCount, ProfileReport, Summary};
use crate::types::{DataSet, Value};

/// Fragment shown instead of an empty type-issues table.
pub const NO_TYPE_ISSUES_HTML: &str = "<p class=\"no-issues\">No type issues detected.</p>";

const MISSING_MARKER: &str = "NaN";

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full dataset as a table: header of column names, one row per record, no index column.
pub fn dataset_table(dataset: &DataSet) -> String {
    let header: Vec<String> = dataset.schema.field_names().map(str::to_owned).collect();
    let rows = dataset
        .rows
        .iter()
        .map(|row| row.iter().map(value_cell).collect::<Vec<_>>());
    table(&header, rows)
}

/// Column name / dtype table.
pub fn dtypes_table(report: &ProfileReport) -> String {
    let rows = report
        .dtypes
        .iter()
        .map(|d| vec![escape_html(&d.column), d.dtype.to_string()]);
    table(&["Column".to_string(), "Type".to_string()], rows)
}

/// Descriptive statistics, one column per dataset column and one row per statistic.
///
/// Rows that do not apply to a column's type are shown as `NaN`.
pub fn statistics_table(report: &ProfileReport) -> String {
    let any_numeric = report
        .statistics
        .iter()
        .any(|s| matches!(s.summary, Summary::Numeric(_)));
    let any_categorical = report
        .statistics
        .iter()
        .any(|s| matches!(s.summary, Summary::Categorical(_)));

    let mut stat_names = vec!["count"];
    if any_categorical {
        stat_names.extend(["unique", "top", "freq"]);
    }
    if any_numeric {
        stat_names.extend(["mean", "std", "min", "25%", "50%", "75%", "max"]);
    }

    let mut header = vec![String::new()];
    header.extend(report.statistics.iter().map(|s| s.column.clone()));

    let rows = stat_names.into_iter().map(|stat| {
        let mut cells = vec![format!("<strong>{stat}</strong>")];
        cells.extend(report.statistics.iter().map(|s| stat_cell(&s.summary, stat)));
        cells
    });
    table(&header, rows)
}

fn stat_cell(summary: &Summary, stat: &str) -> String {
    let cell = match (summary, stat) {
        (_, "count") => Some(summary.count().to_string()),
        (Summary::Categorical(s), "unique") => Some(s.unique.to_string()),
        (Summary::Categorical(s), "top") => s.top.as_deref().map(escape_html),
        (Summary::Categorical(s), "freq") => s.freq.map(|f| f.to_string()),
        (Summary::Numeric(s), "mean") => s.mean.map(format_stat),
        (Summary::Numeric(s), "std") => s.std.map(format_stat),
        (Summary::Numeric(s), "min") => s.min.map(format_stat),
        (Summary::Numeric(s), "25%") => s.q25.map(format_stat),
        (Summary::Numeric(s), "50%") => s.q50.map(format_stat),
        (Summary::Numeric(s), "75%") => s.q75.map(format_stat),
        (Summary::Numeric(s), "max") => s.max.map(format_stat),
        _ => None,
    };
    cell.unwrap_or_else(|| MISSING_MARKER.to_string())
}

/// Missing-value count per column.
pub fn missing_table(report: &ProfileReport) -> String {
    count_table("Missing values", &report.missing)
}

/// Single-row table with the duplicate-row count.
pub fn duplicates_table(report: &ProfileReport) -> String {
    table(
        &["Duplicate rows".to_string()],
        std::iter::once(vec![report.duplicate_rows.to_string()]),
    )
}

/// Coercion failures per numeric column, or [`NO_TYPE_ISSUES_HTML`] when there are none.
pub fn type_issues_table(report: &ProfileReport) -> String {
    if report.type_issues.is_empty() {
        NO_TYPE_ISSUES_HTML.to_string()
    } else {
        count_table("Invalid numeric values", &report.type_issues)
    }
}

/// One fragment per chart, in order.
pub fn charts_html(charts: &[ChartSpec]) -> Vec<String> {
    charts.iter().map(ChartSpec::to_html).collect()
}

fn count_table(label: &str, counts: &[ColumnCount]) -> String {
    let rows = counts
        .iter()
        .map(|c| vec![escape_html(&c.column), c.count.to_string()]);
    table(&["Column".to_string(), label.to_string()], rows)
}

/// `header` is escaped here; row cells must already be HTML.
fn table<I>(header: &[String], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut html = String::from("<table class=\"table\">\n<thead>\n<tr>");
    for name in header {
        html.push_str("<th>");
        html.push_str(&escape_html(name));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

fn value_cell(value: &Value) -> String {
    match value {
        Value::Null => MISSING_MARKER.to_string(),
        Value::Utf8(s) => escape_html(s),
        other => other.to_string(),
    }
}

/// Statistic with at most six decimals, trailing zeros dropped.
pub fn format_stat(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// All fragments for one dataset, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionView {
    pub table: String,
    pub dtypes: String,
    pub statistics: String,
    pub missing: String,
    pub duplicates: String,
    pub type_issues: String,
    pub charts: Vec<String>,
}

impl InspectionView {
    /// Render every fragment for `dataset` from its profile and charts.
    pub fn new(dataset: &DataSet, report: &ProfileReport, charts: &[ChartSpec]) -> Self {
        Self {
            table: dataset_table(dataset),
            dtypes: dtypes_table(report),
            statistics: statistics_table(report),
            missing: missing_table(report),
            duplicates: duplicates_table(report),
            type_issues: type_issues_table(report),
            charts: charts_html(charts),
        }
    }

    /// Minimal standalone HTML page around the fragments.
    pub fn to_page(&self, title: &str) -> String {
        let sections = [
            ("Data", &self.table),
            ("Column types", &self.dtypes),
            ("Summary statistics", &self.statistics),
            ("Missing values", &self.missing),
            ("Duplicates", &self.duplicates),
            ("Type issues", &self.type_issues),
        ];
        let mut body = String::new();
        for (heading, fragment) in sections {
            body.push_str(&format!("<h2>{heading}</h2>\n{fragment}\n"));
        }
        if !self.charts.is_empty() {
            body.push_str("<h2>Charts</h2>\n");
            for chart in &self.charts {
                body.push_str(chart);
                body.push('\n');
            }
        }
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
             <body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
            title = escape_html(title),
        )
    }
}
