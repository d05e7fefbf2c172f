//! Request/response transport: JSONL RPC over stdin/stdout.
//!
//! One request per line, one response per line. The only core method is
//! `metrics/metrics`; everything else about document lifecycle belongs to
//! the host integration, which re-issues requests on text change.
//!
//! Responses carry plain serializable data. A consumer on the other side of
//! the process boundary rehydrates `MetricsNode` values and reconstructs
//! derived operations (`collected_complexity`, `explain`) from the plain
//! fields; no behavior survives marshaling.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use crate::analysis::{Analyzer, Diagnostic};
use crate::config::{MetricsConfig, Settings};
use crate::parsing::Language;

/// The single namespaced request the engine answers.
pub const METRICS_METHOD: &str = "metrics/metrics";

/// Notification mirroring visible results as diagnostics, emitted beside a
/// response when `diagnostics_enabled` is set. A side channel, not part of
/// the core return value.
pub const DIAGNOSTICS_METHOD: &str = "metrics/diagnostics";

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub message: String,
}

#[derive(Debug, Serialize)]
struct RpcNotification {
    method: &'static str,
    params: Value,
}

/// Payload of a `metrics/metrics` request. A missing configuration falls
/// back to the server's ambient settings; a supplied one replaces them
/// wholesale for this request.
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestData {
    pub uri: String,
    #[serde(default)]
    pub configuration: Option<MetricsConfig>,
}

fn error_response(id: Value, message: &str) -> RpcResponse {
    RpcResponse {
        id,
        result: None,
        error: Some(RpcError {
            message: message.to_string(),
        }),
    }
}

/// Serve requests line by line until stdin closes.
pub fn serve(settings: &Settings) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("stdin error: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let (response, notification) = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => handle_request(settings, request),
            Err(err) => (
                error_response(Value::Null, &format!("invalid request: {err}")),
                None,
            ),
        };

        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        if let Some(notification) = notification {
            writeln!(stdout, "{}", serde_json::to_string(&notification)?)?;
        }
        stdout.flush()?;
    }

    Ok(())
}

/// One-shot request helper for CLI use: parse params, dispatch, serialize
/// the response.
pub fn call(settings: &Settings, method: &str, params_raw: &str) -> anyhow::Result<String> {
    let params: Value = serde_json::from_str(params_raw)?;
    let request = RpcRequest {
        id: Value::from(1),
        method: method.to_string(),
        params,
    };
    let (response, _) = handle_request(settings, request);
    Ok(serde_json::to_string(&response)?)
}

fn handle_request(
    settings: &Settings,
    request: RpcRequest,
) -> (RpcResponse, Option<RpcNotification>) {
    let id = request.id.clone();
    match request.method.as_str() {
        METRICS_METHOD => match handle_metrics(settings, request.params) {
            Ok((result, notification)) => (
                RpcResponse {
                    id,
                    result: Some(result),
                    error: None,
                },
                notification,
            ),
            Err(err) => (error_response(id, &err.to_string()), None),
        },
        other => (error_response(id, &format!("unknown method: {other}")), None),
    }
}

fn handle_metrics(
    settings: &Settings,
    params: Value,
) -> anyhow::Result<(Value, Option<RpcNotification>)> {
    let data: RequestData = serde_json::from_value(params)?;
    let config = data
        .configuration
        .unwrap_or_else(|| settings.metrics.clone());

    // The host owns buffer sync; the engine sees the document as saved.
    let path = uri_to_path(&data.uri);
    let Some(language) = Language::from_path(&path) else {
        tracing::debug!(uri = %data.uri, "unsupported language identifier, empty result");
        return Ok((Value::Array(Vec::new()), None));
    };
    let source = std::fs::read_to_string(&path)?;

    let outcome = Analyzer::new(&config).analyze(
        &data.uri,
        language,
        &source,
        &CancellationToken::new(),
    )?;

    let notification = config.diagnostics_enabled.then(|| RpcNotification {
        method: DIAGNOSTICS_METHOD,
        params: serde_json::json!({
            "uri": data.uri,
            "diagnostics": outcome.diagnostics,
        }),
    });

    Ok((serde_json::to_value(outcome.results)?, notification))
}

/// Accept both `file://` URIs and plain paths.
fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

/// Re-exported for hosts that consume the diagnostics side channel.
pub type DiagnosticsPayload = Vec<Diagnostic>;
