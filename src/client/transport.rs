use crate::domain::error::BatfishResult;
use async_trait::async_trait;

/// Request methods used against the service API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single request to the service, relative to the transport's base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub method: Method,
    pub path: String,
}

impl ServiceRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
        }
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
        }
    }
}

/// Raw service response; interpretation is left to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text for error messages
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// One request/response round trip with the analysis service.
///
/// Implementations map unreachable peers to `Connectivity` and elapsed
/// deadlines to `Timeout`. Any response that arrives, whatever its status,
/// is returned as `Ok`.
#[async_trait]
pub trait ServiceTransport: Send + Sync {
    /// Perform the request and return the raw response
    async fn execute(&self, request: ServiceRequest) -> BatfishResult<ServiceResponse>;

    /// Base URL requests are resolved against
    fn base_url(&self) -> &str;
}
