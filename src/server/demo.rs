//! Permissive front end: coerces whatever it receives, falls back to the
//! sample records, and renders an HTML page showing both scorers.

use std::fmt::Write;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::fixtures::{sample_group_json, sample_organizer_json};
use crate::scoring::{score_group, score_organizer, GroupRiskInput, OrganizerRiskInput, RiskResult};

/// Sample records served when a request body is unusable.
#[derive(Debug, Clone)]
pub struct DemoState {
    pub organizer: Value,
    pub group: Value,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            organizer: sample_organizer_json(),
            group: sample_group_json(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoredPayload {
    pub input: Value,
    pub output: RiskResult,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "service": "risk-demo" }))
}

/// POST /api/organizer-risk
pub async fn organizer_risk(State(state): State<Arc<DemoState>>, body: Bytes) -> Json<ScoredPayload> {
    let input = payload_or_fixture(&body, &state.organizer);
    let output = score_organizer(&OrganizerRiskInput::from_value(&input));
    info!(
        score = output.risk_score,
        level = %output.risk_level,
        "Scored organizer via demo service"
    );
    Json(ScoredPayload { input, output })
}

/// POST /api/group-risk
pub async fn group_risk(State(state): State<Arc<DemoState>>, body: Bytes) -> Json<ScoredPayload> {
    let input = payload_or_fixture(&body, &state.group);
    let output = score_group(&GroupRiskInput::from_value(&input));
    info!(
        score = output.risk_score,
        level = %output.risk_level,
        "Scored group via demo service"
    );
    Json(ScoredPayload { input, output })
}

/// GET /
pub async fn demo_page(State(state): State<Arc<DemoState>>) -> Html<String> {
    let organizer_result = score_organizer(&OrganizerRiskInput::from_value(&state.organizer));
    let group_result = score_group(&GroupRiskInput::from_value(&state.group));
    Html(render_demo_page(
        &state.organizer,
        &organizer_result,
        &state.group,
        &group_result,
    ))
}

/// Use the request body when it is a non-empty JSON object, the fixture otherwise.
pub fn payload_or_fixture(body: &[u8], fixture: &Value) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Value::Object(map),
        Ok(other) => {
            debug!("Unusable payload {}, using sample record", other);
            fixture.clone()
        }
        Err(e) => {
            debug!("Body is not JSON ({}), using sample record", e);
            fixture.clone()
        }
    }
}

pub fn render_demo_page(
    organizer: &Value,
    organizer_result: &RiskResult,
    group: &Value,
    group_result: &RiskResult,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html lang=\"en\">");
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, "<meta charset=\"utf-8\">");
    let _ = writeln!(output, "<title>Risk Engine Demo</title>");
    let _ = writeln!(
        output,
        "<style>body{{font-family:sans-serif;margin:2rem;max-width:60rem}}\
         section{{border:1px solid #ddd;border-radius:8px;padding:1rem;margin-bottom:1.5rem}}\
         table{{border-collapse:collapse}}td,th{{padding:.2rem .8rem;text-align:left}}\
         .LOW{{color:#1b7f3b}}.MEDIUM{{color:#b26a00}}.HIGH{{color:#b00020}}</style>"
    );
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "<h1>Risk Engine Demo</h1>");

    render_section(&mut output, "Organizer Risk", organizer, organizer_result);
    render_section(&mut output, "Group Risk", group, group_result);

    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");
    output
}

fn render_section(output: &mut String, title: &str, record: &Value, result: &RiskResult) {
    let _ = writeln!(output, "<section>");
    let _ = writeln!(output, "<h2>{}</h2>", escape_html(title));

    let _ = writeln!(output, "<h3>Input</h3>");
    let _ = writeln!(output, "<table>");
    if let Some(fields) = record.as_object() {
        for (key, value) in fields {
            let shown = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let _ = writeln!(
                output,
                "<tr><th>{}</th><td>{}</td></tr>",
                escape_html(key),
                escape_html(&shown)
            );
        }
    }
    let _ = writeln!(output, "</table>");

    let _ = writeln!(output, "<h3>Result</h3>");
    let _ = writeln!(
        output,
        "<p>Score <strong>{:.2}</strong> &middot; Level <strong class=\"{}\">{}</strong> &middot; Model <code>{}</code></p>",
        result.risk_score,
        result.risk_level,
        result.risk_level,
        escape_html(&result.model_version)
    );
    let _ = writeln!(output, "<p>{}</p>", escape_html(&result.explanation));
    let _ = writeln!(output, "<ul>");
    for factor in &result.factors {
        let _ = writeln!(output, "<li>{}</li>", escape_html(factor));
    }
    let _ = writeln!(output, "</ul>");
    let _ = writeln!(output, "</section>");
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_or_fixture_uses_object() {
        let fixture = json!({ "groupSize": 80 });
        let payload = payload_or_fixture(br#"{"groupSize": 10}"#, &fixture);
        assert_eq!(payload, json!({ "groupSize": 10 }));
    }

    #[test]
    fn test_payload_or_fixture_falls_back() {
        let fixture = json!({ "groupSize": 80 });
        let bodies: [&[u8]; 6] = [b"", b"not json", b"{}", b"null", b"false", b"[1,2]"];
        for body in bodies {
            assert_eq!(payload_or_fixture(body, &fixture), fixture);
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_demo_page() {
        let state = DemoState::default();
        let organizer_result = score_organizer(&OrganizerRiskInput::from_value(&state.organizer));
        let group_result = score_group(&GroupRiskInput::from_value(&state.group));
        let html = render_demo_page(&state.organizer, &organizer_result, &state.group, &group_result);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Organizer Risk"));
        assert!(html.contains("Group Risk"));
        assert!(html.contains("15.80"));
        assert!(html.contains("13.66"));
        assert!(html.contains("Mahalaxmi Prime Circle"));
        assert!(html.contains("<li>Escrow enabled lowers fund handling risk.</li>"));
        assert!(html.contains("<code>group_weighted_v1</code>"));
    }

    #[test]
    fn test_render_escapes_record_values() {
        let record = json!({ "groupName": "<script>alert(1)</script>" });
        let result = score_group(&GroupRiskInput::from_value(&record));
        let html = render_demo_page(&record, &result, &record, &result);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
