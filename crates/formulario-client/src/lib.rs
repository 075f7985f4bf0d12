// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use formulario_app::{FieldKind, FormEvent, FormState, ResponseRecord, SubmissionState};
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Raw result of one wire call: HTTP status plus the body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Seam between the submission controller and the wire. The real backend
/// and the simulated one implement the same contract, so a form definition
/// only differs in which transport the caller hands in.
pub trait Transport {
    fn post_json(&mut self, path: &str, body: &Value) -> Result<WireResponse>;
}

/// Blocking HTTP transport for the documents backend.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("client base_url must not be empty");
        }
        Url::parse(&base_url).with_context(|| format!("parse base url {base_url:?}"))?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for Client {
    fn post_json(&mut self, path: &str, body: &Value) -> Result<WireResponse> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        Ok(WireResponse { status, body })
    }
}

/// Transport for form variants with no real endpoint: every post succeeds
/// with a fabricated record that echoes the submitted title (or name) and
/// the backend's placeholder category.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransport {
    next_id: i64,
}

impl SimulatedTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for SimulatedTransport {
    fn post_json(&mut self, _path: &str, body: &Value) -> Result<WireResponse> {
        self.next_id += 1;
        let title = body
            .get("title")
            .or_else(|| body.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let reply = serde_json::json!({
            "id": self.next_id,
            "title": title,
            "category": "Uncategorized",
        });
        Ok(WireResponse {
            status: 201,
            body: reply.to_string(),
        })
    }
}

/// Maps the form's internal values to the wire payload shape: one JSON
/// object keyed by each field's wire name, with text fields as strings and
/// flags as booleans.
pub fn wire_payload(state: &FormState) -> Value {
    let mut payload = Map::new();
    for field in &state.definition().fields {
        let value = match field.kind {
            FieldKind::Text => Value::String(state.values().text(&field.name).to_owned()),
            FieldKind::Flag => Value::Bool(state.values().flag(&field.name)),
        };
        payload.insert(field.wire_name.clone(), value);
    }
    Value::Object(payload)
}

/// Runs one submit attempt: validate, serialize, send, interpret, update.
///
/// All outcomes land in the form state -- validation failures never touch
/// the wire, transport and server errors become `Failed` with a displayable
/// message, and a parseable 2xx body becomes `Succeeded` with the values
/// reset. The returned events are everything the presentation layer needs
/// to re-render.
pub fn submit<T: Transport>(state: &mut FormState, transport: &mut T) -> Vec<FormEvent> {
    let mut events = state.begin_submit();
    if state.submission() != SubmissionState::Submitting {
        return events;
    }

    let payload = wire_payload(state);
    let path = state.definition().submit_path.clone();

    match transport.post_json(&path, &payload) {
        Err(error) => events.extend(state.complete_failure(error.to_string())),
        Ok(response) if !response.is_success() => {
            let detail = error_detail(response.status, &response.body);
            events.extend(state.complete_failure(detail));
        }
        Ok(response) => match serde_json::from_str::<ResponseRecord>(&response.body) {
            Ok(record) => events.extend(state.complete_success(record)),
            Err(_) => events.extend(state.complete_failure(format!(
                "server returned {} with a body that is not a valid record",
                response.status
            ))),
        },
    }

    events
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!("cannot reach {base_url} -- check that the backend is running ({error})")
}

// FastAPI-style error bodies carry a `detail` string; anything else falls
// back to a short plain body or a generic status line.
fn error_detail(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<DetailEnvelope>(body)
        && let Some(detail) = parsed.detail
        && !detail.is_empty()
    {
        return detail;
    }

    if body.len() < 100 && !body.contains('{') && !body.trim().is_empty() {
        return format!("server error ({status}): {body}");
    }

    format!("server returned {status}")
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    detail: Option<String>,
}
