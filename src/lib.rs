//! Batfish Client Library
//!
//! Client session for the Batfish network configuration analysis service:
//! component version queries plus network and snapshot context, over the
//! service's v2 REST API.

pub mod cli;
pub mod client;
pub mod domain;
pub mod infrastructure;

pub use client::{ServiceRequest, ServiceResponse, ServiceTransport, Session};
pub use domain::config::{ClientConfig, SessionConfig};
pub use domain::error::{BatfishError, BatfishResult};
pub use domain::versions::ComponentVersions;
pub use infrastructure::http::HttpTransport;
