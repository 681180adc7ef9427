//! The session-scoped fetcher.

use crate::{
    FetchError, FetchResult, HttpTransport, InvalidationKey, Invalidator, OutboundRequest,
    ReqwestTransport, ResourceRequest, ResourceResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use session_store::Session;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, error, info};
use url::Url;

/// Longest backend error message carried in [`FetchError::Backend`].
const MAX_ERROR_MESSAGE_CHARS: usize = 512;

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Fetches backend resources on behalf of a session.
///
/// Holds no per-call state; clones share the transport.
#[derive(Clone)]
pub struct Fetcher {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
}

impl Fetcher {
    /// Create a fetcher for `base_url` over the given transport.
    pub fn new(base_url: Url, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    /// Create a fetcher using a default `reqwest` client.
    pub fn with_reqwest(base_url: Url) -> Self {
        Self::new(base_url, Arc::new(ReqwestTransport::new()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join the base URL, the request path, and the encoded query.
    pub fn build_url(&self, request: &ResourceRequest) -> FetchResult<Url> {
        let path = request.path().trim();
        if path.is_empty() {
            return Err(FetchError::InvalidRequest(
                "resource path is empty".to_string(),
            ));
        }
        if path.contains("://") {
            return Err(FetchError::InvalidRequest(format!(
                "resource path must be relative: {path}"
            )));
        }

        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| FetchError::InvalidRequest(format!("invalid URL {joined}: {e}")))?;

        if !request.query_params().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query_params().iter() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Send `request` and return the parsed JSON body unmodified.
    ///
    /// An empty success body parses as `null`.
    pub async fn fetch_value(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
    ) -> FetchResult<Value> {
        let session = authorize(session)?;
        let url = self.build_url(request)?;

        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", session.bearer_token()),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("Cache-Control".to_string(), "no-store".to_string()),
        ];
        if request.body().is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        debug!(method = %request.method(), path = request.path(), "Sending backend request");

        let response = self
            .transport
            .send(OutboundRequest {
                method: request.method(),
                url,
                headers,
                body: request.body().cloned(),
            })
            .await
            .inspect_err(|e| {
                error!(method = %request.method(), path = request.path(), error = %e, "Backend unreachable");
            })?;

        parse_response(request, response)
    }

    /// Send `request` and deserialize the body into `T`.
    ///
    /// A body that does not match `T` fails with [`FetchError::Parse`].
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
    ) -> FetchResult<T> {
        let value = self.fetch_value(session, request).await?;
        serde_json::from_value(value).map_err(|e| {
            error!(path = request.path(), error = %e, "Backend response has unexpected shape");
            FetchError::Parse(e)
        })
    }

    /// Send a mutating request; on success, invalidate `invalidates` before
    /// returning. A failed mutation invalidates nothing.
    pub async fn send_mutation(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
        invalidates: &[InvalidationKey],
        invalidator: &dyn Invalidator,
    ) -> FetchResult<Value> {
        let value = self.fetch_value(session, request).await?;

        for key in invalidates {
            invalidator.invalidate(key);
        }

        info!(
            method = %request.method(),
            path = request.path(),
            invalidated = invalidates.len(),
            "Backend mutation applied"
        );
        Ok(value)
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn authorize(session: Option<&Session>) -> FetchResult<&Session> {
    match session {
        Some(session) if session.is_valid() => Ok(session),
        Some(_) => {
            debug!("Session expired; request not sent");
            Err(FetchError::NoSession)
        }
        None => {
            debug!("No session; request not sent");
            Err(FetchError::NoSession)
        }
    }
}

fn parse_response(request: &ResourceRequest, response: ResourceResponse) -> FetchResult<Value> {
    if !response.is_success() {
        let status = response.status;
        let body_summary = summarize_response_body(&response.body);
        error!(
            status,
            method = %request.method(),
            path = request.path(),
            body_summary = %body_summary,
            "Backend request failed"
        );
        return Err(FetchError::Backend {
            status,
            message: backend_message(status, &response.body),
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// `message`/`error` from a JSON object body, else the body text, else the
/// status line.
fn backend_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for field in ["message", "error"] {
            if let Some(Value::String(message)) = map.get(field) {
                if !message.trim().is_empty() {
                    return truncate(message.trim());
                }
            }
        }
    }

    if !trimmed.is_empty() {
        return truncate(trimmed);
    }

    match reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

fn truncate(message: &str) -> String {
    if message.chars().count() <= MAX_ERROR_MESSAGE_CHARS {
        message.to_string()
    } else {
        let head: String = message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
        format!("{head}...")
    }
}
