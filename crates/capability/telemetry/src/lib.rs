//! 追踪、请求 ID 生成与客户端指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 客户端指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_sent: u64,
    pub request_failures: u64,
    pub unauthorized: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_joins: u64,
    pub cache_invalidated: u64,
    pub wizard_partial_failures: u64,
}

/// 客户端指标。
pub struct TelemetryMetrics {
    requests_sent: AtomicU64,
    request_failures: AtomicU64,
    unauthorized: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_joins: AtomicU64,
    cache_invalidated: AtomicU64,
    wizard_partial_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            requests_sent: AtomicU64::new(0),
            request_failures: AtomicU64::new(0),
            unauthorized: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            cache_joins: AtomicU64::new(0),
            cache_invalidated: AtomicU64::new(0),
            wizard_partial_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            request_failures: self.request_failures.load(Ordering::Relaxed),
            unauthorized: self.unauthorized.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_joins: self.cache_joins.load(Ordering::Relaxed),
            cache_invalidated: self.cache_invalidated.load(Ordering::Relaxed),
            wizard_partial_failures: self.wizard_partial_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录发出的 HTTP 请求次数。
pub fn record_request_sent() {
    metrics().requests_sent.fetch_add(1, Ordering::Relaxed);
}

/// 记录失败请求次数（传输错误或非 2xx）。
pub fn record_request_failure() {
    metrics().request_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录 401 次数。
pub fn record_unauthorized() {
    metrics().unauthorized.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cache_hit() {
    metrics().cache_hits.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cache_miss() {
    metrics().cache_misses.fetch_add(1, Ordering::Relaxed);
}

/// 记录并入已有在途请求的读取次数。
pub fn record_cache_join() {
    metrics().cache_joins.fetch_add(1, Ordering::Relaxed);
}

/// 记录被失效的缓存条目数。
pub fn record_cache_invalidated(count: u64) {
    metrics()
        .cache_invalidated
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录向导提交部分失败次数。
pub fn record_wizard_partial_failure() {
    metrics()
        .wizard_partial_failures
        .fetch_add(1, Ordering::Relaxed);
}
