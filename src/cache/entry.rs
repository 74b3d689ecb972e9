use futures::future::{LocalBoxFuture, Shared};
use serde_json::Value;
use std::rc::Rc;

use super::options::FetchOptions;
use crate::error::FetchError;
use crate::time::TimerHandle;

pub type FetchFuture = LocalBoxFuture<'static, Result<Value, FetchError>>;

/// Produces one request for a key. Called once per network round trip.
pub type Fetcher = Rc<dyn Fn() -> FetchFuture>;

pub(crate) type SharedRequest = Shared<LocalBoxFuture<'static, CacheSnapshot>>;

/// What a subscriber sees for a key at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    pub data: Option<Value>,
    pub error: Option<FetchError>,
    pub is_loading: bool,
    pub last_fetched_at: Option<i64>,
}

impl CacheSnapshot {
    pub(crate) fn from_result(result: Result<Value, FetchError>) -> Self {
        match result {
            Ok(value) => Self {
                data: Some(value),
                ..Self::default()
            },
            Err(err) => Self {
                error: Some(err),
                ..Self::default()
            },
        }
    }
}

#[derive(Clone)]
pub(crate) struct Source {
    pub fetcher: Fetcher,
    pub options: FetchOptions,
}

pub(crate) struct InFlight {
    pub generation: u64,
    pub request: SharedRequest,
}

#[derive(Default)]
pub(crate) struct CacheEntry {
    pub data: Option<Value>,
    pub error: Option<FetchError>,
    pub last_fetched_at: Option<i64>,
    pub last_started_at: Option<i64>,
    /// Generation of the newest forced refresh. Plain requests started
    /// before it must not overwrite its result.
    pub last_mutation: Option<u64>,
    pub in_flight: Option<InFlight>,
    pub source: Option<Source>,
    pub retry: Option<TimerHandle>,
    pub retry_attempt: u32,
}

impl CacheEntry {
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.in_flight.is_some(),
            last_fetched_at: self.last_fetched_at,
        }
    }

    pub fn within_dedupe_window(&self, now: i64) -> bool {
        let window = self
            .source
            .as_ref()
            .map(|source| source.options.dedupe_millis())
            .unwrap_or_else(|| FetchOptions::default().dedupe_millis());
        self.last_started_at
            .map_or(false, |started| now.saturating_sub(started) < window)
    }
}
