//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (HTTP list source, visibility observer) / 创建 infra 层具体实现
//! - ✅ Resolve runtime settings from the loaded [`AppConfig`] / 根据配置解析运行时参数
//! - ✅ Inject the ports into the feed cache / 将端口注入到缓存
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No pagination logic / 禁止包含分页逻辑**
//! ❌ **No config parsing / 禁止解析配置** (done in `config.rs`)
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on yh-infra + yh-app simultaneously.**
//! > **这是唯一允许同时依赖 yh-infra 和 yh-app 的地方。**

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use yh_app::cache::DEFAULT_MAX_LIMIT;
use yh_app::{InfiniteScrollController, PaginatedCollectionCache};
use yh_core::ports::{RemoteListSourcePort, VisibilityObserverPort};
use yh_core::{AppConfig, CollectionKey, Post};
use yh_infra::{ChannelVisibilityObserver, EndpointConfig, HttpListSource};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),

    #[error("Invalid pagination settings: page limit {page_limit} exceeds max limit {max_limit}")]
    InvalidPagination { page_limit: u32, max_limit: u32 },
}

/// Runtime settings with defaults applied for every value the config left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub page_limit: u32,
    pub max_limit: u32,
    pub endpoints: EndpointConfig,
}

impl FeedSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let base_url = if config.api_base_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            config.api_base_url.trim_end_matches('/').to_string()
        };
        let timeout = match config.request_timeout_secs {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        };
        let page_limit = match config.page_limit {
            0 => DEFAULT_PAGE_LIMIT,
            limit => limit,
        };
        let max_limit = match config.max_limit {
            0 => DEFAULT_MAX_LIMIT,
            limit => limit,
        };

        Self {
            base_url,
            timeout,
            page_limit,
            max_limit,
            endpoints: EndpointConfig::with_overrides(&config.endpoints),
        }
    }
}

/// Assembled feed dependencies.
///
/// The cache is shared by every controller created from this runtime, so a
/// collection loaded by one view is reused by the next.
pub struct FeedRuntime {
    pub cache: Arc<PaginatedCollectionCache<Post>>,
    pub visibility: Arc<ChannelVisibilityObserver>,
    pub settings: FeedSettings,
}

impl FeedRuntime {
    /// Controller for `key` using the configured page limit.
    pub fn controller(&self, key: CollectionKey) -> InfiniteScrollController<Post> {
        let observer: Arc<dyn VisibilityObserverPort> = self.visibility.clone();
        InfiniteScrollController::new(
            Arc::clone(&self.cache),
            observer,
            key,
            self.settings.page_limit,
        )
    }
}

/// Wire the feed cache against the HTTP API described by `config`.
/// 按配置组装 HTTP 数据源与缓存。
///
/// # Errors
///
/// Returns [`WiringError`] if the HTTP client cannot be built or the
/// configured page limit is larger than the max limit.
pub fn wire_feed_runtime(config: &AppConfig) -> WiringResult<FeedRuntime> {
    let settings = FeedSettings::from_config(config);
    if settings.page_limit > settings.max_limit {
        return Err(WiringError::InvalidPagination {
            page_limit: settings.page_limit,
            max_limit: settings.max_limit,
        });
    }

    let source = HttpListSource::<Post>::new(
        settings.base_url.clone(),
        settings.endpoints.clone(),
        settings.timeout,
    )
    .map_err(|e| WiringError::HttpClientInit(format!("{e:#}")))?;
    let source: Arc<dyn RemoteListSourcePort<Post>> = Arc::new(source);

    let cache = Arc::new(PaginatedCollectionCache::with_max_limit(
        source,
        settings.max_limit,
    ));

    info!(
        base_url = %settings.base_url,
        page_limit = settings.page_limit,
        max_limit = settings.max_limit,
        timeout_secs = settings.timeout.as_secs(),
        "Feed runtime wired"
    );

    Ok(FeedRuntime {
        cache,
        visibility: Arc::new(ChannelVisibilityObserver::new()),
        settings,
    })
}
