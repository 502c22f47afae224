mod client;
mod dto;
pub mod manifest_client;
pub mod rest_gateway;

pub use manifest_client::HttpManifestSource;
pub use rest_gateway::RestGateway;
