//! Framework-agnostic request handling for the KPI endpoints.
//!
//! An HTTP server only has to forward the method, path and raw body here and
//! write back the returned status and JSON body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::{info, warn};

use crate::kpi::{compute_kpis, compute_periodic_kpis, quick_earnings, EarningsInput, FinancialFigures, PeriodedFigures};
use crate::types::KpiOptions;
use crate::{FinAnalystError, FinAnalystResult};

pub const WELCOME: &str =
    "Welcome to the Financial Analysis API. POST figures to /analyze or /calculateKPIs.";

const INTERNAL_ERROR: &str = "Unexpected error calculating KPIs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => Err(format!("unsupported method '{other}'")),
        }
    }
}

/// Every route the handler serves.
pub const ROUTES: [(Method, &str); 5] = [
    (Method::Get, "/"),
    (Method::Post, "/analyze"),
    (Method::Post, "/analyze/earnings"),
    (Method::Post, "/calculateKPIs"),
    (Method::Post, "/submitData"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn from_error(err: &FinAnalystError) -> Self {
        let status = err.status_code();
        let body = if status >= 500 {
            json!({ "detail": INTERNAL_ERROR })
        } else {
            match err.field() {
                Some(field) => json!({ "detail": err.to_string(), "field": field }),
                None => json!({ "detail": err.to_string() }),
            }
        };
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeriodicRequest {
    data: PeriodedFigures,
}

/// Dispatch one request. Never panics; every failure becomes a status code.
pub fn handle(method: Method, path: &str, body: &str, options: &KpiOptions) -> ApiResponse {
    let route = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    let outcome = match (method, route) {
        (Method::Get, "/") => Ok(json!({ "message": WELCOME })),
        (Method::Post, "/analyze") => analyze(body, options),
        (Method::Post, "/analyze/earnings") => earnings(body, options),
        (Method::Post, "/calculateKPIs") => calculate(body, options),
        (Method::Post, "/submitData") => submit(body, options),
        _ if ROUTES.iter().any(|(_, p)| *p == route) => {
            return ApiResponse {
                status: 405,
                body: json!({ "detail": "Method Not Allowed" }),
            };
        }
        _ => {
            return ApiResponse {
                status: 404,
                body: json!({ "detail": "Not Found" }),
            };
        }
    };

    match outcome {
        Ok(value) => {
            info!(route, "request served");
            ApiResponse::ok(value)
        }
        Err(e) => {
            warn!(route, status = e.status_code(), error = %e, "request rejected");
            ApiResponse::from_error(&e)
        }
    }
}

fn analyze(body: &str, options: &KpiOptions) -> FinAnalystResult<Value> {
    let figures: FinancialFigures = parse(body)?;
    let kpis = compute_kpis(&figures, options)?;
    Ok(json!({ "kpis": serde_json::to_value(kpis)? }))
}

fn calculate(body: &str, options: &KpiOptions) -> FinAnalystResult<Value> {
    let request: PeriodicRequest = parse(body)?;
    let kpis = compute_periodic_kpis(&request.data, options)?;
    Ok(serde_json::to_value(kpis)?)
}

fn submit(body: &str, options: &KpiOptions) -> FinAnalystResult<Value> {
    let request: PeriodicRequest = parse(body)?;
    request.data.validate(options.validation)?;
    Ok(json!({ "message": "Data received successfully" }))
}

fn earnings(body: &str, options: &KpiOptions) -> FinAnalystResult<Value> {
    let input: EarningsInput = parse(body)?;
    Ok(serde_json::to_value(quick_earnings(&input, options.validation)?)?)
}

fn parse<T: DeserializeOwned>(body: &str) -> FinAnalystResult<T> {
    serde_json::from_str(body).map_err(|e| FinAnalystError::MalformedRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationMode;
    use pretty_assertions::assert_eq;

    fn post(path: &str, body: &str) -> ApiResponse {
        handle(Method::Post, path, body, &KpiOptions::default())
    }

    #[test]
    fn test_root_welcome() {
        let resp = handle(Method::Get, "/", "", &KpiOptions::default());
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["message"], WELCOME);
    }

    #[test]
    fn test_analyze_single_period() {
        let resp = post(
            "/analyze",
            r#"{"equity": 15000, "inventories": 8000, "short_term_liabilities": 5000}"#,
        );
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["kpis"]["Current Ratio"], "1.6");
        assert_eq!(resp.body["kpis"]["Cash Ratio"], "0");
    }

    #[test]
    fn test_calculate_preserves_period_order() {
        let resp = post(
            "/calculateKPIs",
            r#"{"data": {"2023": {"equity": 10}, "2022": {"equity": 20}}}"#,
        );
        assert_eq!(resp.status, 200);
        let labels: Vec<&String> = resp.body.as_object().unwrap().keys().collect();
        assert_eq!(labels, vec!["2023", "2022"]);
        let metrics: Vec<&String> = resp.body["2023"].as_object().unwrap().keys().collect();
        assert_eq!(metrics[0], "EBITDA");
        assert_eq!(metrics[20], "Return on Investment");
    }

    #[test]
    fn test_explain_mode_shapes_values() {
        let options = KpiOptions {
            explain: true,
            ..Default::default()
        };
        let resp = handle(Method::Post, "/analyze", r#"{"sales_revenue": 100}"#, &options);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["kpis"]["EBITDA"]["value"], "100");
        assert!(resp.body["kpis"]["EBITDA"]["explanation"].is_string());
    }

    #[test]
    fn test_non_numeric_is_422() {
        let resp = post("/analyze", r#"{"equity": "a lot"}"#);
        assert_eq!(resp.status, 422);
        assert!(resp.body["detail"].as_str().unwrap().starts_with("Malformed request"));
    }

    #[test]
    fn test_unknown_field_is_422() {
        let resp = post("/calculateKPIs", r#"{"data": {"2022": {"revenue": 1}}}"#);
        assert_eq!(resp.status, 422);
        assert!(resp.body["detail"].as_str().unwrap().contains("revenue"));
    }

    #[test]
    fn test_missing_data_wrapper_is_422() {
        let resp = post("/calculateKPIs", r#"{"2022": {"equity": 1}}"#);
        assert_eq!(resp.status, 422);
    }

    #[test]
    fn test_strict_mode_names_field() {
        let options = KpiOptions {
            validation: ValidationMode::Strict,
            ..Default::default()
        };
        let resp = handle(Method::Post, "/analyze", r#"{"equity": 1}"#, &options);
        assert_eq!(resp.status, 422);
        assert_eq!(resp.body["field"], "intangible_assets");
    }

    #[test]
    fn test_overflow_is_opaque_500() {
        let resp = post(
            "/analyze",
            r#"{"sales_revenue": "79228162514264337593543950335",
                "other_operational_income": "79228162514264337593543950335"}"#,
        );
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, json!({ "detail": INTERNAL_ERROR }));
    }

    #[test]
    fn test_submit_acknowledges_without_computing() {
        let resp = post("/submitData", r#"{"data": {"2022": {"equity": 1}}}"#);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["message"], "Data received successfully");
    }

    #[test]
    fn test_earnings_route() {
        let resp = post(
            "/analyze/earnings",
            r#"{"sales_revenue": 10000, "cogs": 7000, "equity": 15000}"#,
        );
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["earnings"], "3000");
        assert_eq!(resp.body["return_on_equity"], "0.2");
    }

    #[test]
    fn test_strict_mode_applies_to_every_route() {
        let options = KpiOptions {
            validation: ValidationMode::Strict,
            ..Default::default()
        };
        let body = r#"{"sales_revenue": 10000, "cogs": 7000}"#;
        assert_eq!(handle(Method::Post, "/analyze", body, &options).status, 422);
        let resp = handle(Method::Post, "/analyze/earnings", body, &options);
        assert_eq!(resp.status, 422);
        assert_eq!(resp.body["field"], "equity");
    }

    #[test]
    fn test_unknown_route_and_wrong_method() {
        assert_eq!(post("/nope", "{}").status, 404);
        assert_eq!(handle(Method::Get, "/analyze", "", &KpiOptions::default()).status, 405);
        assert_eq!(post("/analyze/", "{}").status, 200);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("post".parse::<Method>(), Ok(Method::Post));
        assert!("DELETE".parse::<Method>().is_err());
    }
}
