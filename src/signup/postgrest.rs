//! PostgREST contact store client.
//!
//! # Responsibilities
//! - Insert rows with `POST /rest/v1/{table}` (`Prefer: return=minimal`)
//! - Count rows with `HEAD /rest/v1/{table}?select=*` (`Prefer: count=exact`)
//! - Translate error bodies (`{code, message, details, hint}`) into `StoreError`
//!
//! # Design Decisions
//! - One reqwest client per store, reused across requests
//! - Optional client timeout comes from config; zero leaves reqwest's default (none)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use serde::Deserialize;
use url::Url;

use crate::config::StoreConfig;
use crate::signup::store::{ContactStore, NewContact, StoreError};

/// Error payload returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// Contact store backed by a PostgREST (Supabase) table.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    endpoint: Url,
}

impl PostgrestStore {
    /// Build a client for the configured table.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let endpoint = table_endpoint(&config.base_url, &config.table)?;

        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let key = HeaderValue::from_str(&config.api_key)
                .map_err(|e| StoreError::Config(format!("invalid API key: {e}")))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| StoreError::Config(format!("invalid API key: {e}")))?;
            headers.insert("apikey", key);
            headers.insert(AUTHORIZATION, bearer);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        tracing::debug!(endpoint = %endpoint, "Contact store client ready");
        Ok(Self { client, endpoint })
    }
}

/// `{base}/rest/v1/{table}`, tolerating a base URL with or without a trailing slash.
pub fn table_endpoint(base_url: &str, table: &str) -> Result<Url, StoreError> {
    let mut base = Url::parse(base_url)
        .map_err(|e| StoreError::Config(format!("invalid base URL '{base_url}': {e}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("rest/v1/{table}"))
        .map_err(|e| StoreError::Config(format!("invalid table '{table}': {e}")))
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/0`.
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.trim().split_once('/')?;
    total.parse().ok()
}

async fn rejection(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body: PostgrestErrorBody = serde_json::from_str(&text).unwrap_or_default();

    let message = match (body.message, body.details) {
        (Some(m), Some(d)) if !d.is_empty() => format!("{m} ({d})"),
        (Some(m), _) => m,
        (None, _) if !text.is_empty() => text,
        (None, _) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };

    StoreError::Rejected {
        status: status.as_u16(),
        code: body.code,
        message,
    }
}

#[async_trait]
impl ContactStore for PostgrestStore {
    async fn insert(&self, contact: &NewContact) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Prefer", "return=minimal")
            .json(&[contact])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("select", "*");

        let response = self
            .client
            .head(url)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| StoreError::Protocol("missing or unparsable Content-Range".to_string()))
    }
}
