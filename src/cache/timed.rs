// Read-through cache with a fixed time-to-live.
// Serves fresh entries from the store, otherwise loads, persists, or falls back.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::clock::{Clock, SystemClock, elapsed_between};
use crate::error::{FolioError, Result};
use crate::telemetry::{Level, Reason, Telemetry};

use super::store::KvStore;

/// Stored form of a cache entry: `{"data": ..., "timestamp": <unix millis>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry<T> {
    pub data: T,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl<T> CachedEntry<T> {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        elapsed_between(self.timestamp, now) <= ttl
    }
}

/// Where a payload returned by [`TimedCache::get`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub payload: T,
    pub source: Source,
}

pub struct TimedCache<S: KvStore, C: Clock = SystemClock> {
    ttl: Duration,
    store: S,
    clock: C,
    loader_timeout: Option<Duration>,
}

impl<S: KvStore> TimedCache<S, SystemClock> {
    pub fn with_system_clock(ttl: Duration, store: S) -> Result<Self> {
        Self::new(ttl, store, SystemClock)
    }
}

impl<S: KvStore, C: Clock> TimedCache<S, C> {
    pub fn new(ttl: Duration, store: S, clock: C) -> Result<Self> {
        if ttl.is_zero() {
            return Err(FolioError::InvalidConfiguration(
                "cache ttl must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            ttl,
            store,
            clock,
            loader_timeout: None,
        })
    }

    /// Treat loaders that run longer than `timeout` as failed.
    pub fn with_loader_timeout(mut self, timeout: Duration) -> Self {
        self.loader_timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Return the entry for `key` if it is still fresh, without loading.
    ///
    /// Expired and unreadable entries are evicted.
    pub fn peek<T: DeserializeOwned>(
        &mut self,
        key: &str,
        telemetry: &mut dyn Telemetry,
    ) -> Option<CachedEntry<T>> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                telemetry.report(
                    Level::Warn,
                    Reason::CacheReadFailed,
                    &format!("could not read {}: {}", key, e),
                );
                return None;
            }
        };

        let entry: CachedEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                telemetry.report(
                    Level::Warn,
                    Reason::CacheReadFailed,
                    &format!("discarding unreadable entry {}: {}", key, e),
                );
                self.evict(key, telemetry);
                return None;
            }
        };

        if entry.is_fresh(self.clock.now(), self.ttl) {
            Some(entry)
        } else {
            self.evict(key, telemetry);
            None
        }
    }

    /// Serve `key` from the store, else from `loader`, else from `fallback`.
    ///
    /// Never fails: store errors are reported and skipped, loader errors and
    /// timeouts produce the fallback payload without touching the store.
    pub async fn get<T, F, Fut, FB>(
        &mut self,
        key: &str,
        loader: F,
        fallback: FB,
        telemetry: &mut dyn Telemetry,
    ) -> Fetched<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
        FB: FnOnce() -> T,
    {
        if let Some(entry) = self.peek::<T>(key, telemetry) {
            telemetry.report(
                Level::Info,
                Reason::CacheHit,
                &format!("using cached {} from {}", key, entry.timestamp.to_rfc3339()),
            );
            return Fetched {
                payload: entry.data,
                source: Source::Cache,
            };
        }

        match self.run_loader(loader).await {
            Ok(payload) => {
                self.put(key, &payload, telemetry);
                Fetched {
                    payload,
                    source: Source::Remote,
                }
            }
            Err(e) => {
                telemetry.report(
                    Level::Error,
                    Reason::FetchFailed,
                    &format!("could not load {}: {}", key, e),
                );
                Fetched {
                    payload: fallback(),
                    source: Source::Fallback,
                }
            }
        }
    }

    /// Drop the entry for `key` so the next `get` reloads it.
    pub fn invalidate(&mut self, key: &str, telemetry: &mut dyn Telemetry) {
        self.evict(key, telemetry);
    }

    async fn run_loader<T, F, Fut>(&self, loader: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.loader_timeout {
            Some(limit) => tokio::time::timeout(limit, loader())
                .await
                .map_err(|_| FolioError::Timeout(limit))?,
            None => loader().await,
        }
    }

    fn put<T: Serialize>(&mut self, key: &str, payload: &T, telemetry: &mut dyn Telemetry) {
        let entry = CachedEntry {
            data: payload,
            timestamp: self.clock.now(),
        };
        let written = serde_json::to_string(&entry)
            .map_err(FolioError::from)
            .and_then(|json| self.store.set(key, &json));
        if let Err(e) = written {
            telemetry.report(
                Level::Warn,
                Reason::CacheWriteFailed,
                &format!("could not cache {}: {}", key, e),
            );
        }
    }

    fn evict(&mut self, key: &str, telemetry: &mut dyn Telemetry) {
        if let Err(e) = self.store.delete(key) {
            telemetry.report(
                Level::Warn,
                Reason::CacheWriteFailed,
                &format!("could not evict {}: {}", key, e),
            );
        }
    }
}
