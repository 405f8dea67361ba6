//! # yh-core
//!
//! Core domain models and ports for the YamoHub feed cache.
//!
//! This crate contains pure pagination state and port contracts without any
//! infrastructure dependencies.

pub mod collection;
pub mod config;
pub mod ids;
pub mod ports;

pub use collection::{CollectionKey, LoadMode, PageMeta, PageResponse, PageWindow, Post};
pub use config::AppConfig;
pub use ids::{OwnerId, PostId, SentinelId};
