use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{kpi_explanation, kpi_value, metric_labels, periods_of, scalar};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result_table(result, map),
            _ => print_flat_object(map),
        },
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let table = match periods_of(result) {
        Some(periods) => period_table(&periods),
        None => metric_table(result),
    };
    println!("{}", table);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn metric_table(result: &Map<String, Value>) -> Table {
    let explained = result.values().any(|v| kpi_explanation(v).is_some());
    let mut builder = Builder::default();
    if explained {
        builder.push_record(["Metric", "Value", "Explanation"]);
    } else {
        builder.push_record(["Metric", "Value"]);
    }
    for (label, entry) in result {
        let mut row = vec![label.clone(), kpi_value(entry)];
        if explained {
            row.push(kpi_explanation(entry).unwrap_or_default().to_string());
        }
        builder.push_record(row);
    }
    builder.build()
}

/// One row per metric, one column per period.
fn period_table(periods: &[(&str, &Map<String, Value>)]) -> Table {
    let mut builder = Builder::default();
    let mut header = vec!["Metric".to_string()];
    header.extend(periods.iter().map(|(label, _)| label.to_string()));
    builder.push_record(header);

    for metric in metric_labels(periods) {
        let mut row = vec![metric.to_string()];
        row.extend(
            periods
                .iter()
                .map(|(_, kpis)| kpis.get(metric).map(kpi_value).unwrap_or_default()),
        );
        builder.push_record(row);
    }
    builder.build()
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), scalar(val)]);
    }
    println!("{}", builder.build());
}
