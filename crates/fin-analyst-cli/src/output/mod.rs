pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Periodic results nest a metric map under each period label; single-period
/// results map metric labels straight to values.
pub(crate) fn periods_of(result: &Map<String, Value>) -> Option<Vec<(&str, &Map<String, Value>)>> {
    if result.is_empty() {
        return None;
    }
    result
        .iter()
        .map(|(label, kpis)| match kpis {
            Value::Object(map) if !map.contains_key("explanation") => Some((label.as_str(), map)),
            _ => None,
        })
        .collect()
}

/// Metric labels across all periods, in first-seen order.
pub(crate) fn metric_labels<'a>(periods: &[(&str, &'a Map<String, Value>)]) -> Vec<&'a str> {
    let mut labels: Vec<&str> = Vec::new();
    for (_, kpis) in periods {
        for key in kpis.keys() {
            if !labels.contains(&key.as_str()) {
                labels.push(key);
            }
        }
    }
    labels
}

/// The number behind a KPI entry, whether bare or explained.
pub(crate) fn kpi_value(value: &Value) -> String {
    match value {
        Value::Object(map) => map.get("value").map(scalar).unwrap_or_default(),
        other => scalar(other),
    }
}

pub(crate) fn kpi_explanation(value: &Value) -> Option<&str> {
    value.get("explanation").and_then(Value::as_str)
}

pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
