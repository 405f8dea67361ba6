mod endpoints;

pub use endpoints::EndpointConfig;
