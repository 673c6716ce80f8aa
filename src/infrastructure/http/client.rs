use crate::client::transport::{Method, ServiceRequest, ServiceResponse, ServiceTransport};
use crate::domain::config::SessionConfig;
use crate::domain::error::{BatfishError, BatfishResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-batfish-apikey";
/// Header carrying the client version
pub const VERSION_HEADER: &str = "x-batfish-version";

/// Transport speaking JSON over HTTP to the service.
///
/// Building one performs no I/O; connections are opened on first request and
/// kept alive by the underlying client between requests.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(config: &SessionConfig) -> BatfishResult<Self> {
        config.validate()?;

        let base_url = config.base_url();
        let url = reqwest::Url::parse(&base_url).map_err(|e| {
            BatfishError::Configuration(format!("Invalid service address {}: {}", base_url, e))
        })?;
        if url.host_str().is_none()
            || url.port_or_known_default() != Some(config.port)
            || !url.username().is_empty()
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(BatfishError::Configuration(format!(
                "Invalid service address {}",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| {
            BatfishError::Configuration("api_key contains characters not allowed in a header".to_string())
        })?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(HeaderName::from_static(VERSION_HEADER), HeaderValue::from_static(env!("CARGO_PKG_VERSION")));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if config.ssl && !config.verify_ssl_certs {
            warn!("TLS certificate verification disabled for {}", base_url);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .danger_accept_invalid_certs(config.ssl && !config.verify_ssl_certs)
            .no_proxy()
            // Default headers carry the API key and must never follow a Location
            .redirect(Policy::none())
            .build()
            .map_err(|e| BatfishError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        debug!("HTTP transport configured for {}", base_url);

        Ok(Self {
            client,
            base_url,
            timeout_ms: config.timeout_ms,
        })
    }

    fn map_error(&self, url: &str, error: reqwest::Error) -> BatfishError {
        if error.is_timeout() {
            BatfishError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            BatfishError::Connectivity {
                message: format!("Failed to reach {}: {}", url, error),
            }
        }
    }
}

#[async_trait]
impl ServiceTransport for HttpTransport {
    async fn execute(&self, request: ServiceRequest) -> BatfishResult<ServiceResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        debug!("{} {}", request.method, url);

        let response = self
            .client
            .request(method, &url)
            .send()
            .await.map_err(|e| self.map_error(&url, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&url, e))?
            .to_vec();

        debug!("{} {} -> {} ({} bytes)", request.method, url, status, body.len());

        Ok(ServiceResponse { status, body })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
