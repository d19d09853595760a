use serde_json::Value;

use super::{kpi_value, periods_of, scalar};

/// Headline figure printed for a KPI set.
const HEADLINE_METRIC: &str = "Net Income";

/// Print just the key answer value from the output.
///
/// KPI sets print net income (one line per period for periodic results).
/// Anything else falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for line in minimal_lines(result) {
        println!("{}", line);
    }
}

fn minimal_lines(result: &Value) -> Vec<String> {
    let Value::Object(map) = result else {
        return vec![scalar(result)];
    };

    if let Some(periods) = periods_of(map) {
        return periods
            .iter()
            .map(|(label, kpis)| {
                let headline = kpis.get(HEADLINE_METRIC).map(kpi_value).unwrap_or_default();
                format!("{}: {}", label, headline)
            })
            .collect();
    }

    for key in [HEADLINE_METRIC, "earnings", "status"] {
        if let Some(val) = map.get(key) {
            return vec![kpi_value(val)];
        }
    }

    match map.iter().next() {
        Some((key, val)) => vec![format!("{}: {}", key, kpi_value(val))],
        None => Vec::new(),
    }
}
