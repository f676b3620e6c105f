//! CLI utility functions.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::client::SurveyClient;
use crate::config::ClientSettings;
use crate::jsonrpc::{CallContext, HttpTransport, ALL_METHODS, LIST_SURVEYS};
use crate::models::SurveySummary;

/// Load and validate settings (file > env > defaults)
pub fn load_settings(config_path: Option<PathBuf>) -> Result<ClientSettings> {
    let settings = ClientSettings::load(config_path.as_deref())?;
    settings.validate()?;
    Ok(settings)
}

/// Build a client and a call context honouring the configured timeout.
///
/// The context is cancelled on Ctrl-C so an in-flight call aborts cleanly.
pub fn connect(settings: &ClientSettings) -> Result<(SurveyClient, CallContext)> {
    let transport = HttpTransport::with_timeout(settings.endpoint.clone(), settings.timeout())?;
    let client = SurveyClient::with_transport(Box::new(transport));

    let ctx = CallContext::new().with_timeout(settings.timeout());
    cancel_on_ctrl_c(&ctx);

    Ok((client, ctx))
}

fn cancel_on_ctrl_c(ctx: &CallContext) {
    let token = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    debug!("Interrupted, cancelling in-flight call");
                    token.cancel();
                }
            }
        }
    });
}

/// Release the session key, logging rather than failing on error
pub async fn release_quietly(client: &mut SurveyClient, ctx: &CallContext) {
    if let Err(e) = client.release_session_key(ctx).await {
        warn!("Failed to release session key: {}", e);
    }
}

/// Parse `--params-json` into positional parameters
pub fn parse_params(params_json: Option<&str>) -> Result<Vec<Value>> {
    let Some(json_str) = params_json else {
        return Ok(Vec::new());
    };

    let value: Value = serde_json::from_str(json_str).context("Failed to parse inline JSON")?;
    match value {
        Value::Array(items) => Ok(items),
        other => anyhow::bail!(
            "Parameters must be a JSON array of positional arguments, got: {}",
            other
        ),
    }
}

/// Hint for `call` when `method` already has a typed wrapper
pub fn typed_wrapper_hint(method: &str) -> Option<String> {
    if !ALL_METHODS.contains(&method) {
        return None;
    }

    let hint = match method {
        LIST_SURVEYS => "use `limesurvey surveys [--user NAME]` instead",
        _ => "the session key is already managed by the client",
    };
    Some(format!("{} has a typed wrapper: {}", method, hint))
}

/// Render surveys as a fixed-width table
pub fn format_surveys(surveys: &[SurveySummary]) -> String {
    let mut out = format!(
        "{:>8}  {:<6}  {:<19}  {:<19}  {}\n",
        "SID", "ACTIVE", "START", "EXPIRES", "TITLE"
    );
    for survey in surveys {
        out.push_str(&format!(
            "{:>8}  {:<6}  {:<19}  {:<19}  {}\n",
            survey.survey_id,
            survey.active,
            or_dash(&survey.start_date),
            or_dash(&survey.expires),
            survey.title
        ));
    }
    out
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_params() {
        assert!(parse_params(None).unwrap().is_empty());
        assert_eq!(parse_params(Some("[42, null, \"en\"]")).unwrap(), vec![json!(42), Value::Null, json!("en")]);
        assert!(parse_params(Some("{\"sid\": 42}")).is_err());
        assert!(parse_params(Some("[42")).is_err());
    }

    #[test]
    fn test_typed_wrapper_hint() {
        assert!(typed_wrapper_hint("get_summary").is_none());
        assert!(typed_wrapper_hint("list_surveys").unwrap().contains("limesurvey surveys"));
        assert!(typed_wrapper_hint("release_session_key").unwrap().contains("managed by the client"));
        assert!(typed_wrapper_hint("get_session_key").is_some());
    }

    #[test]
    fn test_format_surveys() {
        let surveys = vec![SurveySummary {
            active: "Y".to_string(),
            survey_id: 42,
            title: "Customer feedback".to_string(),
            start_date: String::new(),
            expires: "2030-01-01 00:00:00".to_string(),
        }];

        let table = format_surveys(&surveys);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("TITLE"));
        assert!(lines[1].contains("42"));
        assert!(lines[1].contains(" - "));
        assert!(lines[1].ends_with("Customer feedback"));
    }
}
