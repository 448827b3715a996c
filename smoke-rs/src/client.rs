//! HTTP client for the AgreementHub API
//!
//! One typed method per endpoint. Every call resolves to an [`ApiResponse`]
//! carrying the status code and the decoded JSON body; interpreting either
//! is left to the caller so that "expected 400" probes read the same way as
//! happy-path calls. Transport failures and undecodable bodies surface as
//! [`SmokeError`] and are recorded by the runner like any other failed
//! assertion.

use crate::config::HarnessConfig;
use crate::errors::{Result, SmokeError};
use crate::model::{
    BlueprintUpdate, ContractFilter, ContractUpdate, NewBlueprint, NewContract, TransitionRequest,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Longest body excerpt carried into failure messages.
const BODY_EXCERPT_LEN: usize = 200;

/// Status code and decoded JSON body of one API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body; `Null` when the response body was empty.
    pub body: Value,
}

impl ApiResponse {
    /// Require an exact status code, keeping the response for chaining.
    pub fn expect_status(self, expected: u16) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(SmokeError::UnexpectedStatus {
                expected,
                got: self.status,
                body: self.excerpt(),
            })
        }
    }

    /// Read the server-assigned `id` of the returned resource.
    pub fn id(&self) -> Result<String> {
        self.body
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SmokeError::MissingField("id".to_string()))
    }

    /// Require the body to be a JSON array and return it.
    pub fn require_array(&self) -> Result<&Vec<Value>> {
        self.body
            .as_array()
            .ok_or_else(|| SmokeError::Mismatch(format!("expected a JSON array, got {}", self.excerpt())))
    }

    /// Deserialize the body into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }

    /// Compact body excerpt for failure messages.
    pub fn excerpt(&self) -> String {
        let rendered = self.body.to_string();
        if rendered.chars().count() > BODY_EXCERPT_LEN {
            let mut excerpt: String = rendered.chars().take(BODY_EXCERPT_LEN).collect();
            excerpt.push('…');
            excerpt
        } else {
            rendered
        }
    }
}

/// Typed client over the AgreementHub JSON REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the configured base URL.
    ///
    /// The underlying `reqwest::Client` keeps its default timeouts; the
    /// harness adds no retry layer.
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a prepared request and decode the response body.
    ///
    /// Empty bodies decode to `Null`; anything else must be valid JSON.
    async fn finish(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        tracing::debug!(status, "api response");
        Ok(ApiResponse { status, body })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        tracing::debug!(path, "GET");
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.finish(request).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        tracing::debug!(path, "POST");
        self.finish(self.http.post(self.url(path)).json(body)).await
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        tracing::debug!(path, "PUT");
        self.finish(self.http.put(self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        tracing::debug!(path, "DELETE");
        self.finish(self.http.delete(self.url(path))).await
    }

    // ===== BLUEPRINTS =====

    pub async fn create_blueprint(&self, payload: &NewBlueprint) -> Result<ApiResponse> {
        self.post("/blueprints", payload).await
    }

    pub async fn list_blueprints(&self) -> Result<ApiResponse> {
        self.get("/blueprints", &[]).await
    }

    pub async fn get_blueprint(&self, id: &str) -> Result<ApiResponse> {
        self.get(&format!("/blueprints/{}", id), &[]).await
    }

    pub async fn update_blueprint(&self, id: &str, payload: &BlueprintUpdate) -> Result<ApiResponse> {
        self.put(&format!("/blueprints/{}", id), payload).await
    }

    pub async fn delete_blueprint(&self, id: &str) -> Result<ApiResponse> {
        self.delete(&format!("/blueprints/{}", id)).await
    }

    // ===== CONTRACTS =====

    pub async fn create_contract(&self, payload: &NewContract) -> Result<ApiResponse> {
        self.post("/contracts", payload).await
    }

    pub async fn list_contracts(&self, filter: &ContractFilter) -> Result<ApiResponse> {
        let pairs = filter.query_pairs();
        self.get("/contracts", &pairs).await
    }

    pub async fn get_contract(&self, id: &str) -> Result<ApiResponse> {
        self.get(&format!("/contracts/{}", id), &[]).await
    }

    pub async fn update_contract(&self, id: &str, payload: &ContractUpdate) -> Result<ApiResponse> {
        self.put(&format!("/contracts/{}", id), payload).await
    }

    pub async fn delete_contract(&self, id: &str) -> Result<ApiResponse> {
        self.delete(&format!("/contracts/{}", id)).await
    }

    pub async fn transition_contract(
        &self,
        id: &str,
        request: &TransitionRequest,
    ) -> Result<ApiResponse> {
        self.post(&format!("/contracts/{}/transition", id), request).await
    }

    // ===== STATS =====

    pub async fn stats(&self) -> Result<ApiResponse> {
        self.get("/stats", &[]).await
    }
}
