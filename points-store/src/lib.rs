pub mod app_config;
pub mod http_client;

pub use http_client::PointsApiClient;
