//! 键控查询缓存
//!
//! - 命中直接返回副本
//! - 相同键的并发读取共享同一次请求（watch 通道广播结果）
//! - 领头读取被丢弃时，等待者重新规划并由其中一个接替请求
//! - 失效按前缀删除条目，并把在途请求标记为过期：
//!   过期请求的结果仍返回给等待者，但不写入缓存

use crate::key::QueryKey;
use batiment_client::ApiError;
use batiment_telemetry::{
    record_cache_hit, record_cache_invalidated, record_cache_join, record_cache_miss,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;

type Shared<V> = Option<Result<V, ApiError>>;

struct InFlight<V> {
    ticket: u64,
    receiver: watch::Receiver<Shared<V>>,
}

struct CacheState<V> {
    entries: HashMap<QueryKey, V>,
    in_flight: HashMap<QueryKey, InFlight<V>>,
}

/// 查询缓存。
pub struct QueryCache<V> {
    state: Mutex<CacheState<V>>,
    tickets: AtomicU64,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
            }),
            tickets: AtomicU64::new(0),
        }
    }
}

enum Plan<V> {
    Hit(V),
    Join(watch::Receiver<Shared<V>>),
    Lead(u64, watch::Sender<Shared<V>>),
}

/// 领头请求被取消时移除在途登记，避免后续读取一直等待。
struct LeadGuard<'a, V> {
    cache: &'a QueryCache<V>,
    key: &'a QueryKey,
    ticket: u64,
    armed: bool,
}

impl<V> Drop for LeadGuard<'_, V> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut state) = self.cache.state.lock() {
            if state
                .in_flight
                .get(self.key)
                .is_some_and(|in_flight| in_flight.ticket == self.ticket)
            {
                state.in_flight.remove(self.key);
            }
        }
    }
}

impl<V: Clone + Send + Sync> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState<V>>, ApiError> {
        self.state
            .lock()
            .map_err(|_| ApiError::internal("lock failed"))
    }

    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.entries.get(key).cloned())
    }

    pub fn set(&self, key: QueryKey, value: V) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.insert(key, value);
        }
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.state
            .lock()
            .map(|state| state.entries.contains_key(key))
            .unwrap_or(false)
    }

    /// 按前缀失效，返回删除的缓存条目数。
    pub fn invalidate(&self, prefix: &QueryKey) -> u64 {
        let Ok(mut state) = self.state.lock() else {
            return 0;
        };
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = (before - state.entries.len()) as u64;
        let in_flight_before = state.in_flight.len();
        state.in_flight.retain(|key, _| !key.starts_with(prefix));
        let stale = in_flight_before - state.in_flight.len();
        drop(state);
        record_cache_invalidated(removed);
        debug!(
            target: "batiment.cache",
            prefix = %prefix,
            removed,
            stale_in_flight = stale,
            "cache invalidated"
        );
        removed
    }

    /// 读取键值；未命中时执行 `fetch`，并发的相同读取共享结果。
    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetch: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>>,
    {
        let mut fetch = Some(fetch);
        loop {
            let plan = {
                let mut state = self.lock()?;
                if let Some(value) = state.entries.get(&key) {
                    Plan::Hit(value.clone())
                } else if let Some(in_flight) = state.in_flight.get(&key) {
                    Plan::Join(in_flight.receiver.clone())
                } else {
                    let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
                    let (sender, receiver) = watch::channel(None);
                    state
                        .in_flight
                        .insert(key.clone(), InFlight { ticket, receiver });
                    Plan::Lead(ticket, sender)
                }
            };

            match plan {
                Plan::Hit(value) => {
                    record_cache_hit();
                    debug!(target: "batiment.cache", key = %key, "cache hit");
                    return Ok(value);
                }
                Plan::Join(mut receiver) => {
                    record_cache_join();
                    debug!(target: "batiment.cache", key = %key, "joined in-flight request");
                    // 领头请求被丢弃时重新规划：命中缓存、加入新的在途请求或自行领头。
                    let Ok(shared) = receiver.wait_for(Option::is_some).await else {
                        debug!(target: "batiment.cache", key = %key, "in-flight leader dropped");
                        continue;
                    };
                    if let Some(result) = shared.as_ref() {
                        return result.clone();
                    }
                }
                Plan::Lead(ticket, sender) => {
                    let Some(fetch) = fetch.take() else {
                        return Err(ApiError::internal("fetch already consumed"));
                    };
                    record_cache_miss();
                    debug!(target: "batiment.cache", key = %key, "cache miss");
                    let mut guard = LeadGuard {
                        cache: self,
                        key: &key,
                        ticket,
                        armed: true,
                    };
                    let result = fetch().await;
                    {
                        let mut state = self.lock()?;
                        let current = state
                            .in_flight
                            .get(&key)
                            .is_some_and(|in_flight| in_flight.ticket == ticket);
                        if current {
                            state.in_flight.remove(&key);
                            if let Ok(value) = &result {
                                state.entries.insert(key.clone(), value.clone());
                            }
                        } else {
                            debug!(
                                target: "batiment.cache",
                                key = %key,
                                "stale result not cached"
                            );
                        }
                    }
                    guard.armed = false;
                    sender.send_replace(Some(result.clone()));
                    return result;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_read_is_a_hit() {
        let cache = QueryCache::<u32>::new();
        let key = QueryKey::batiment_detail("b1");
        let first = cache.fetch(key.clone(), || async { Ok(1) }).await;
        let second = cache.fetch(key, || async { Ok(2) }).await;
        assert_eq!(first, Ok(1));
        assert_eq!(second, Ok(1));
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = QueryCache::<u32>::new();
        let key = QueryKey::batiment_detail("b1");
        let first = cache
            .fetch(key.clone(), || async { Err(ApiError::transport("down")) })
            .await;
        assert!(first.is_err());
        assert!(!cache.contains(&key));
        let second = cache.fetch(key, || async { Ok(7) }).await;
        assert_eq!(second, Ok(7));
    }

    #[test]
    fn invalidate_removes_by_prefix() {
        let cache = QueryCache::<u32>::new();
        cache.set(QueryKey::batiment_detail("b1"), 1);
        cache.set(QueryKey::batiment_validation("b1"), 2);
        cache.set(QueryKey::batiment_detail("b2"), 3);
        let removed = cache.invalidate(&QueryKey::batiment_detail("b1"));
        assert_eq!(removed, 2);
        assert_eq!(cache.get(&QueryKey::batiment_detail("b2")), Some(3));
    }
}
