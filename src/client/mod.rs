// Client module - Session and the service transport seam
pub mod session;
pub mod transport;

pub use session::Session;
pub use transport::{Method, ServiceRequest, ServiceResponse, ServiceTransport};
