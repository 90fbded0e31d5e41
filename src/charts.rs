//! Chart summaries.
//!
//! [`summarize`] picks up to [`MAX_CHARTS_PER_KIND`] numeric columns (histograms) and up to
//! [`MAX_CHARTS_PER_KIND`] categorical columns (top-values bar charts), in column order, and
//! returns rendering-ready [Vega-Lite](https://vega.github.io/vega-lite/) specs. Numeric
//! charts come first.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::processing::ranked_value_counts;
use crate::processing::reduce::numeric_values;
use crate::render::escape_html;
use crate::types::DataSet;

/// Maximum number of charts built for each kind of column.
pub const MAX_CHARTS_PER_KIND: usize = 3;
/// Number of most frequent values shown in a bar chart.
pub const TOP_VALUES: usize = 5;
/// Histogram bin limit.
pub const HISTOGRAM_MAX_BINS: usize = 20;

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// The kind of chart built for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Distribution of a numeric column.
    Histogram,
    /// Most frequent values of a categorical column.
    TopValuesBar,
}

impl ChartKind {
    fn slug(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::TopValuesBar => "top-values-bar",
        }
    }
}

/// One chart, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub column: String,
    pub kind: ChartKind,
    pub title: String,
    /// Vega-Lite document, data inlined.
    pub spec: JsonValue,
}

impl ChartSpec {
    /// Self-contained HTML fragment: a `<figure>` with the title and the spec embedded as JSON.
    pub fn to_html(&self) -> String {
        // `</` inside the JSON would close the script element early.
        let spec = self.spec.to_string().replace("</", "<\\/");
        format!(
            "<figure class=\"chart\" data-chart-kind=\"{kind}\" data-column=\"{column}\">\
             <figcaption>{title}</figcaption>\
             <script type=\"application/vnd.vegalite+json\">{spec}</script>\
             </figure>",
            kind = self.kind.slug(),
            column = escape_html(&self.column),
            title = escape_html(&self.title),
        )
    }
}

/// Build the chart specs for a dataset.
///
/// Returns 0 to 6 specs: histograms for the first numeric columns, then top-value bar charts
/// for the first categorical (text or boolean) columns.
pub fn summarize(dataset: &DataSet) -> Vec<ChartSpec> {
    let fields = &dataset.schema.fields;

    let numeric = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.data_type.is_numeric())
        .take(MAX_CHARTS_PER_KIND)
        .map(|(idx, f)| histogram(dataset, idx, &f.name));

    let categorical = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.data_type.is_categorical())
        .take(MAX_CHARTS_PER_KIND)
        .map(|(idx, f)| top_values_bar(dataset, idx, &f.name));

    let charts: Vec<ChartSpec> = numeric.chain(categorical).collect();
    tracing::debug!(charts = charts.len(), "summarized dataset charts");
    charts
}

fn histogram(dataset: &DataSet, idx: usize, column: &str) -> ChartSpec {
    let values: Vec<JsonValue> = numeric_values(dataset, idx)
        .into_iter()
        .filter(|v| v.is_finite())
        .map(|v| json!({ "value": v }))
        .collect();
    let title = format!("Distribution of {column}");

    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": title,
        "data": { "values": values },
        "mark": "bar",
        "encoding": {
            "x": {
                "field": "value",
                "type": "quantitative",
                "bin": { "maxbins": HISTOGRAM_MAX_BINS },
                "title": column,
            },
            "y": { "aggregate": "count", "type": "quantitative", "title": "count" },
        },
    });

    ChartSpec {
        column: column.to_string(),
        kind: ChartKind::Histogram,
        title,
        spec,
    }
}

fn top_values_bar(dataset: &DataSet, idx: usize, column: &str) -> ChartSpec {
    let values: Vec<JsonValue> = ranked_value_counts(dataset, idx)
        .into_iter()
        .take(TOP_VALUES)
        .map(|(value, count)| json!({ "value": value.to_string(), "count": count }))
        .collect();
    let title = format!("Top {TOP_VALUES} values in {column}");

    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": title,
        "data": { "values": values },
        "mark": "bar",
        "encoding": {
            "x": { "field": "value", "type": "nominal", "sort": "-y", "title": column },
            "y": { "field": "count", "type": "quantitative", "title": "count" },
        },
    });

    ChartSpec {
        column: column.to_string(),
        kind: ChartKind::TopValuesBar,
        title,
        spec,
    }
}
