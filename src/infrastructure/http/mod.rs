// HTTP module - Service transport over the v2 REST API
pub mod client;

pub use client::HttpTransport;
