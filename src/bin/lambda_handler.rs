//! AWS Lambda handler for single-property lien survival analysis
//!
//! Accepts a property record either as the raw invocation event or, behind a
//! Lambda Function URL, as a JSON string in `body`. Function URL calls get an
//! HTTP-shaped response; direct invocations get the report itself.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use lien_survival::equity::{BidParameters, DEFAULT_DESIRED_MARGIN};
use lien_survival::records::parse_date;
use lien_survival::{AnalysisConfig, PropertyAnalyzer, PropertyRecord, PropertyReport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Property record plus optional run parameters
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub property: PropertyRecord,

    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[serde(default)]
    pub as_of: Option<String>,

    #[serde(default)]
    pub hoa_monthly_dues: Option<f64>,

    #[serde(default)]
    pub auction_costs: f64,

    #[serde(default = "default_margin")]
    pub desired_margin: f64,
}

fn default_margin() -> f64 { DEFAULT_DESIRED_MARGIN }

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub report: PropertyReport,
    pub execution_time_ms: u64,
}

fn http_response(status: u16, body: String) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*"
        },
        "body": body
    })
}

fn error_body(message: &str) -> String {
    json!({ "error": message }).to_string()
}

fn run_analysis(request: AnalysisRequest) -> Result<AnalysisResponse, String> {
    let start = Instant::now();

    let mut config = match request.as_of.as_deref() {
        Some(raw) => AnalysisConfig::as_of(parse_date(raw).ok_or_else(|| format!("invalid as_of date: {}", raw))?),
        None => AnalysisConfig::default(),
    };
    config.hoa_monthly_dues = request.hoa_monthly_dues;

    let analyzer = PropertyAnalyzer::new(config).with_bid_parameters(BidParameters {
        auction_costs: request.auction_costs,
        desired_margin: request.desired_margin,
    });
    let report = analyzer.analyze(&request.property);
    log::info!("{}: {}", report.case_number, report.survival.summary);

    Ok(AnalysisResponse {
        report,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let payload = event.payload;

    // Function URL / API Gateway: the request is a JSON string in `body`
    if let Some(body) = payload.get("body") {
        let method = payload
            .pointer("/requestContext/http/method")
            .and_then(Value::as_str)
            .unwrap_or("POST");
        if method == "OPTIONS" {
            return Ok(http_response(200, String::new()));
        }

        let Some(body) = body.as_str() else {
            return Ok(http_response(400, error_body("request body must be a JSON string")));
        };
        let request: AnalysisRequest = match serde_json::from_str(body) {
            Ok(r) => r,
            Err(e) => return Ok(http_response(400, error_body(&format!("invalid request: {}", e)))),
        };
        return match run_analysis(request) {
            Ok(response) => Ok(http_response(200, serde_json::to_string(&response)?)),
            Err(message) => Ok(http_response(400, error_body(&message))),
        };
    }

    // Direct invocation: the event is the request
    let request: AnalysisRequest = serde_json::from_value(payload)?;
    let response = run_analysis(request)?;
    Ok(serde_json::to_value(response)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
