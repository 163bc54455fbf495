//! HTTP transport backed by reqwest

use async_trait::async_trait;
use contract_auditor_sdk::{
    AnalysisRequest, AnalysisResult, AnalyzeResponse, ExportFormat, TaskStatusResponse,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::Transport;
use crate::error::NetworkError;

/// Talks to the analysis service over HTTP.
///
/// When a token is configured every request carries
/// `Authorization: Bearer <token>`. A missing token is not an error here;
/// the service decides whether it needs one.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
            timeout: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Per-request timeout; requests are unbounded when this is never set
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    /// Send a request and return the body of a 2xx response
    async fn send(&self, builder: RequestBuilder, url: &str) -> Result<Vec<u8>, NetworkError> {
        let response = builder.send().await.map_err(|source| NetworkError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            crate::client_warn!(%url, status = status.as_u16(), "service returned an error status");
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|source| NetworkError::Request {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: &str,
    ) -> Result<T, NetworkError> {
        let body = self.send(builder, url).await?;
        serde_json::from_slice(&body).map_err(|e| NetworkError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalyzeResponse, NetworkError> {
        let url = self.url("analyze");
        crate::client_debug!(%url, language = %request.language, bytes = request.code.len(), "submitting contract");
        let builder = self.request(Method::POST, &url).json(request);
        self.send_json(builder, &url).await
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse, NetworkError> {
        let url = self.url(&format!("result/{}", task_id));
        let builder = self.request(Method::GET, &url);
        self.send_json(builder, &url).await
    }

    async fn history(&self) -> Result<Vec<AnalysisResult>, NetworkError> {
        let url = self.url("history");
        let builder = self.request(Method::GET, &url);
        self.send_json(builder, &url).await
    }

    async fn export(
        &self,
        format: ExportFormat,
        result: &AnalysisResult,
    ) -> Result<Vec<u8>, NetworkError> {
        let url = self.url(&format!("export/{}", format.as_str()));
        let builder = self.request(Method::POST, &url).json(result);
        self.send(builder, &url).await
    }
}
