//! YamoHub feed runtime
//!
//! Bootstrap for the feed cache: configuration loading, tracing and
//! dependency wiring.

pub mod bootstrap;
