//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into the AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value logic / 禁止默认值逻辑** (defaults are resolved in `wiring.rs`)
//!
//! ## Iron Rule / 铁律
//!
//! > **Pure data loading only. Accept whatever is in the file.**
//! > **仅纯数据加载。接受文件中的任何内容。**

use anyhow::Context;
use std::path::{Path, PathBuf};
use yh_core::config::AppConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "YAMOHUB_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "yamohub";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// **NO validation is performed**: empty strings and zero limits are
/// accepted as facts.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Pick the config file: explicit path, then `YAMOHUB_CONFIG`, then the
/// platform config directory. `None` when no candidate exists.
/// 选择配置文件：显式路径 → `YAMOHUB_CONFIG` → 平台配置目录。
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
