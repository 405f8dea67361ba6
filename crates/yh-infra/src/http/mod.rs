mod list_source;

pub use list_source::HttpListSource;
