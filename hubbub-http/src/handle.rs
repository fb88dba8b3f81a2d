//! reqwest-backed request handle and factory.

use crate::HttpHandleConfig;
use async_trait::async_trait;
use http::{HeaderValue, Method, header};
use hubbub_core::{HubError, HubResponse, PendingRequest, RequestHandle, RequestHandleFactory, Result};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Creates [`HttpRequestHandle`]s sharing one connection pool.
#[derive(Debug, Clone)]
pub struct HttpRequestFactory {
    client: reqwest::Client,
    config: Arc<HttpHandleConfig>,
}

impl HttpRequestFactory {
    /// Create a factory with its own client built from `config`.
    pub fn new(config: HttpHandleConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl);

        if config.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects));
        } else {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        let client = builder.build().map_err(HubError::transport)?;
        Ok(Self::with_client(client, config))
    }

    /// Create a factory around an existing client.
    ///
    /// Client-level settings in `config` (timeouts, redirects, TLS) are
    /// ignored; per-request settings still apply.
    pub fn with_client(client: reqwest::Client, config: HttpHandleConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &HttpHandleConfig {
        &self.config
    }
}

impl RequestHandleFactory for HttpRequestFactory {
    fn create(&self, url: &str) -> Result<Box<dyn RequestHandle>> {
        Url::parse(url).map_err(|e| HubError::InvalidUrl(format!("{}: {}", url, e)))?;

        let mut request = PendingRequest::new(url);
        for (name, value) in &self.config.default_headers {
            request.set_header(name, value)?;
        }

        Ok(Box::new(HttpRequestHandle {
            client: self.client.clone(),
            config: self.config.clone(),
            request,
        }))
    }
}

/// A pending hub request sent with reqwest.
///
/// Body fields are form-encoded. For GET and HEAD requests they are sent as
/// query parameters instead.
#[derive(Debug)]
pub struct HttpRequestHandle {
    client: reqwest::Client,
    config: Arc<HttpHandleConfig>,
    request: PendingRequest,
}

impl HttpRequestHandle {
    fn build(self) -> Result<reqwest::RequestBuilder> {
        let PendingRequest {
            url,
            method,
            mut headers,
            body_fields,
        } = self.request;

        let mut url = Url::parse(&url).map_err(|e| HubError::InvalidUrl(format!("{}: {}", url, e)))?;

        let body = if method == Method::GET || method == Method::HEAD {
            if !body_fields.is_empty() {
                url.query_pairs_mut().extend_pairs(body_fields.iter());
            }
            None
        } else {
            let pairs: Vec<(&str, &str)> = body_fields.iter().collect();
            let encoded = serde_urlencoded::to_string(&pairs).map_err(HubError::transport)?;
            if !headers.contains_key(header::CONTENT_TYPE) {
                headers.insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
            }
            Some(encoded)
        };

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(builder)
    }
}

#[async_trait]
impl RequestHandle for HttpRequestHandle {
    fn request(&self) -> &PendingRequest {
        &self.request
    }

    fn request_mut(&mut self) -> &mut PendingRequest {
        &mut self.request
    }

    async fn execute(self: Box<Self>) -> Result<HubResponse> {
        let error_for_status = self.config.error_for_status;
        let builder = (*self).build()?;

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Hub request failed");
            HubError::transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(HubError::transport)?;

        debug!(status = %status, bytes = body.len(), "Received hub response");

        if error_for_status && !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(status = %status, "Hub rejected request");
            return Err(HubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(HubResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
