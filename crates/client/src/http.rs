//! reqwest-backed [`Transport`].

use futures::future::BoxFuture;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Sends [`ApiRequest`]s over HTTP relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl Transport for HttpTransport {
    fn request(&self, request: ApiRequest) -> BoxFuture<'static, Result<ApiResponse, TransportError>> {
        let client = self.client.clone();
        let base_url = self.config.base_url().clone();

        Box::pin(async move {
            let url = base_url
                .join(&request.path)
                .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", request.path, e)))?;

            tracing::debug!(method = %request.method, %url, "sending request");

            let mut builder = client.request(request.method.clone(), url.clone());
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let resp = builder.send().await.map_err(|e| {
                tracing::warn!(method = %request.method, %url, "request failed: {}", e);
                TransportError::Network(e.to_string())
            })?;

            let status = resp.status();
            let body = resp
                .bytes()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?
                .to_vec();

            tracing::debug!(method = %request.method, %url, status = status.as_u16(), "response received");

            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }

            Ok(ApiResponse::new(status.as_u16(), body))
        })
    }
}
