pub mod config;
pub mod http;
pub mod visibility;

pub use config::EndpointConfig;
pub use http::HttpListSource;
pub use visibility::ChannelVisibilityObserver;
