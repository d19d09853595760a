use serde_json::{Map, Value};
use std::io;

use super::{kpi_explanation, kpi_value, metric_labels, periods_of, scalar};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => match periods_of(result) {
                Some(periods) => write_periods(&mut wtr, &periods),
                None => write_metrics(&mut wtr, result),
            },
            _ => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &scalar(val)]);
                }
            }
        },
        _ => {
            let _ = wtr.write_record([&scalar(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_metrics<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Map<String, Value>) {
    let explained = result.values().any(|v| kpi_explanation(v).is_some());
    if explained {
        let _ = wtr.write_record(["metric", "value", "explanation"]);
    } else {
        let _ = wtr.write_record(["metric", "value"]);
    }
    for (label, entry) in result {
        let value = kpi_value(entry);
        if explained {
            let explanation = kpi_explanation(entry).unwrap_or_default();
            let _ = wtr.write_record([label.as_str(), &value, explanation]);
        } else {
            let _ = wtr.write_record([label.as_str(), &value]);
        }
    }
}

fn write_periods<W: io::Write>(wtr: &mut csv::Writer<W>, periods: &[(&str, &Map<String, Value>)]) {
    let mut header = vec!["metric"];
    header.extend(periods.iter().map(|(label, _)| *label));
    let _ = wtr.write_record(&header);

    for metric in metric_labels(periods) {
        let mut row = vec![metric.to_string()];
        row.extend(
            periods
                .iter()
                .map(|(_, kpis)| kpis.get(metric).map(kpi_value).unwrap_or_default()),
        );
        let _ = wtr.write_record(&row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut csv::Writer<Vec<u8>>)) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        f(&mut wtr);
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_period_pivot() {
        let result = json!({
            "2022": {"EBITDA": "100", "EBIT": "80"},
            "2023": {"EBITDA": "120", "EBIT": "90"}
        });
        let periods = periods_of(result.as_object().unwrap()).unwrap();
        let out = render(|w| write_periods(w, &periods));
        assert_eq!(out, "metric,2022,2023\nEBITDA,100,120\nEBIT,80,90\n");
    }

    #[test]
    fn test_explained_metrics_get_a_column() {
        let result = json!({"Current Ratio": {"value": "1.6", "explanation": "A current ratio"}});
        let out = render(|w| write_metrics(w, result.as_object().unwrap()));
        assert_eq!(out, "metric,value,explanation\nCurrent Ratio,1.6,A current ratio\n");
    }
}
