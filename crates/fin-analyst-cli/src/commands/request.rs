use clap::Args;
use serde_json::{json, Value};

use fin_analyst_core::api::{self, Method};
use fin_analyst_core::KpiOptions;

use crate::input;

/// Arguments for running one request through the API handler
#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method (GET or POST)
    pub method: Method,

    /// Route, e.g. /analyze or /calculateKPIs
    pub route: String,

    /// Path to the JSON request body (defaults to piped stdin)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_request(args: RequestArgs, options: &KpiOptions) -> Result<Value, Box<dyn std::error::Error>> {
    let body = input::load_raw(args.input.as_deref())?.unwrap_or_default();
    let response = api::handle(args.method, &args.route, &body, options);
    Ok(json!({
        "status": response.status,
        "body": response.body,
    }))
}
