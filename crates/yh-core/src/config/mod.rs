//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value calculation / 禁止默认值计算**
//!
//! ## Iron Rule / 铁律
//!
//! > **Missing values map to empty/zero. Whoever consumes the DTO decides what an empty value means.**
//! > **缺失的值映射为空或零，由使用方决定空值的含义。**

use std::collections::BTreeMap;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the YamoHub API (may be empty)
    pub api_base_url: String,

    /// Per-request timeout in seconds, `0` when unset
    pub request_timeout_secs: u64,

    /// Items requested per page, `0` when unset
    pub page_limit: u32,

    /// Upper bound accepted for a page limit, `0` when unset
    pub max_limit: u32,

    /// Collection name → endpoint path template (`{owner}` is substituted)
    pub endpoints: BTreeMap<String, String>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// This method must NOT contain any validation or default value logic.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let endpoints = toml_value
            .get("endpoints")
            .and_then(|e| e.as_table())
            .map(|table| {
                table
                    .iter()
                    .filter_map(|(name, path)| {
                        path.as_str().map(|p| (name.clone(), p.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            api_base_url: toml_value
                .get("api")
                .and_then(|a| a.get("base_url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_secs: toml_value
                .get("api")
                .and_then(|a| a.get("timeout_secs"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0) as u64,
            page_limit: toml_value
                .get("pagination")
                .and_then(|p| p.get("page_limit"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0) as u32,
            max_limit: toml_value
                .get("pagination")
                .and_then(|p| p.get("max_limit"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0) as u32,
            endpoints,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: 0,
            page_limit: 0,
            max_limit: 0,
            endpoints: BTreeMap::new(),
        }
    }
}
