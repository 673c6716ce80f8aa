use crate::client::transport::{ServiceRequest, ServiceResponse, ServiceTransport};
use crate::domain::config::SessionConfig;
use crate::domain::error::{BatfishError, BatfishResult};
use crate::domain::name::validate_name;
use crate::domain::versions::ComponentVersions;
use crate::infrastructure::http::HttpTransport;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

const VERSION_PATH: &str = "/v2/version";
const NETWORKS_PATH: &str = "/v2/networks";

/// Client handle for the analysis service.
///
/// Holds the connection settings, the transport and the currently selected
/// network and snapshot. Construction performs no network I/O; every query is
/// a single request/response round trip.
pub struct Session {
    config: SessionConfig,
    transport: Arc<dyn ServiceTransport>,
    network: Option<String>,
    snapshot: Option<String>,
}

impl Session {
    /// Session for a service on `localhost` with default settings
    pub fn new() -> BatfishResult<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Session for the given settings; invalid settings fail here
    pub fn with_config(config: SessionConfig) -> BatfishResult<Self> {
        // HttpTransport::new validates the config
        let transport = HttpTransport::new(&config)?;
        Ok(Self::from_parts(config, Arc::new(transport)))
    }

    /// Session over a caller-supplied transport
    pub fn with_transport(
        config: SessionConfig,
        transport: Arc<dyn ServiceTransport>,
    ) -> BatfishResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, transport))
    }

    fn from_parts(config: SessionConfig, transport: Arc<dyn ServiceTransport>) -> Self {
        info!("Session created for {}", transport.base_url());

        Self {
            network: config.network.clone(),
            snapshot: config.snapshot.clone(),
            config,
            transport,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Currently selected network
    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    /// Currently selected snapshot
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// Versions of every component the service reports
    pub async fn get_component_versions(&self) -> BatfishResult<ComponentVersions> {
        let versions: ComponentVersions = self.fetch_json(ServiceRequest::get(VERSION_PATH)).await?;
        debug!("Service reported {} component versions", versions.len());
        Ok(versions)
    }

    /// Names of all networks on the service
    pub async fn list_networks(&self) -> BatfishResult<Vec<String>> {
        self.fetch_json(ServiceRequest::get(NETWORKS_PATH)).await
    }

    /// Select a network, creating it on the service if it does not exist.
    ///
    /// Clears the snapshot selection.
    pub async fn set_network(&mut self, name: &str) -> BatfishResult<String> {
        validate_name("network", name)?;

        let networks = self.list_networks().await?;
        if networks.iter().any(|n| n == name) {
            info!("Using existing network '{}'", name);
        } else {
            self.send(ServiceRequest::put(network_path(name))).await?;
            info!("Created network '{}'", name);
        }

        self.network = Some(name.to_string());
        self.snapshot = None;
        Ok(name.to_string())
    }

    /// Delete a network; clears the selection if it was current
    pub async fn delete_network(&mut self, name: &str) -> BatfishResult<()> {
        validate_name("network", name)?;

        self.send(ServiceRequest::delete(network_path(name))).await?;
        info!("Deleted network '{}'", name);

        if self.network.as_deref() == Some(name) {
            self.network = None;
            self.snapshot = None;
        }
        Ok(())
    }

    /// Names of the snapshots in the current network
    pub async fn list_snapshots(&self) -> BatfishResult<Vec<String>> {
        let network = self.require_network()?;
        self.fetch_json(ServiceRequest::get(snapshots_path(network))).await
    }

    /// Select an existing snapshot of the current network
    pub async fn set_snapshot(&mut self, name: &str) -> BatfishResult<String> {
        validate_name("snapshot", name)?;

        let snapshots = self.list_snapshots().await?;
        if !snapshots.iter().any(|s| s == name) {
            return Err(BatfishError::Session {
                message: format!(
                    "snapshot '{}' not found in network '{}'",
                    name,
                    self.network.as_deref().unwrap_or_default()
                ),
            });
        }

        info!("Using snapshot '{}'", name);
        self.snapshot = Some(name.to_string());
        Ok(name.to_string())
    }

    /// Delete a snapshot of the current network; clears the selection if it was current
    pub async fn delete_snapshot(&mut self, name: &str) -> BatfishResult<()> {
        validate_name("snapshot", name)?;
        let network = self.require_network()?;

        let path = format!("{}/{}", snapshots_path(network), name);
        self.send(ServiceRequest::delete(path)).await?;
        info!("Deleted snapshot '{}'", name);

        if self.snapshot.as_deref() == Some(name) {
            self.snapshot = None;
        }
        Ok(())
    }

    fn require_network(&self) -> BatfishResult<&str> {
        self.network.as_deref().ok_or_else(|| BatfishError::Session {
            message: "no network set".to_string(),
        })
    }

    /// Execute a request and fail on any non-success status
    async fn send(&self, request: ServiceRequest) -> BatfishResult<ServiceResponse> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.execute(request).await?;

        if !response.is_success() {
            warn!("{} {} failed with status {}", method, path, response.status);
            let text = response.text();
            let message = if text.is_empty() {
                format!("{} {} returned status {}", method, path, response.status)
            } else {
                format!("{} {} returned status {}: {}", method, path, response.status, text)
            };
            return Err(BatfishError::Service {
                status: Some(response.status),
                message,
            });
        }

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: ServiceRequest) -> BatfishResult<T> {
        let path = request.path.clone();
        let response = self.send(request).await?;

        serde_json::from_slice(&response.body).map_err(|e| BatfishError::Service {
            status: Some(response.status),
            message: format!("Malformed response from {}: {}", path, e),
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.transport.base_url())
            .field("network", &self.network)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

fn network_path(network: &str) -> String {
    format!("{}/{}", NETWORKS_PATH, network)
}

fn snapshots_path(network: &str) -> String {
    format!("{}/snapshots", network_path(network))
}
