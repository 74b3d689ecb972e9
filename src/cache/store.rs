// ============================================================================
// CACHE STORE - stale-while-revalidate resource cache
// ============================================================================
// One entry per resource key. At most one request in flight per key;
// observers inside the dedupe window share it. Cached data stays visible
// while a refresh runs and survives failed refreshes.
// ============================================================================

use futures::future::{self, FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::entry::{CacheEntry, CacheSnapshot, Fetcher, InFlight, SharedRequest, Source};
use super::key::ResourceKey;
use super::options::FetchOptions;
use crate::error::FetchError;
use crate::runtime::Spawner;
use crate::state::{Subscribers, Subscription};
use crate::time::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Observe,
    Focus,
    Mutate,
    Retry,
}

impl Trigger {
    fn shares_in_flight(self) -> bool {
        self != Trigger::Mutate
    }

    fn respects_dedupe_window(self) -> bool {
        matches!(self, Trigger::Observe | Trigger::Focus)
    }
}

#[derive(Default)]
struct CacheState {
    /// Grows with every key observed and lives as long as the store. Only
    /// `invalidate_where` drops entries, and only those nothing can refetch
    /// or is watching.
    entries: HashMap<ResourceKey, CacheEntry>,
    subscribers: HashMap<ResourceKey, Rc<Subscribers>>,
    next_generation: u64,
}

struct StoreCore {
    state: RefCell<CacheState>,
    timer: Rc<dyn Timer>,
    spawner: Spawner,
}

/// Process-wide resource cache. Cheap to clone; clones share entries.
#[derive(Clone)]
pub struct CacheStore {
    core: Rc<StoreCore>,
}

impl CacheStore {
    /// Empty cache. Requests run on `spawner`; retries and the dedupe
    /// window follow `timer`.
    pub fn new(timer: Rc<dyn Timer>, spawner: Spawner) -> Self {
        Self {
            core: Rc::new(StoreCore {
                state: RefCell::new(CacheState::default()),
                timer,
                spawner,
            }),
        }
    }

    /// Current state for `key`; an unknown key reads as empty and idle.
    pub fn snapshot(&self, key: &ResourceKey) -> CacheSnapshot {
        self.core
            .state
            .borrow()
            .entries
            .get(key)
            .map(CacheEntry::snapshot)
            .unwrap_or_default()
    }

    /// What a mounting component does: registers the fetcher for `key` and
    /// starts a request unless one is in flight or the last one started
    /// inside the dedupe window. A `None` key is a no-op.
    pub fn observe(
        &self,
        key: Option<&ResourceKey>,
        fetcher: Fetcher,
        options: FetchOptions,
    ) -> CacheSnapshot {
        let Some(key) = key else {
            return CacheSnapshot::default();
        };

        {
            let mut state = self.core.state.borrow_mut();
            let entry = state.entries.entry(key.clone()).or_default();
            entry.source = Some(Source { fetcher, options });
        }

        drop(self.request(key, Trigger::Observe));
        self.snapshot(key)
    }

    /// Resolves once the shared request for `key` settles. Honors the
    /// dedupe window: inside it, resolves to the cached state.
    pub fn revalidate(&self, key: &ResourceKey) -> LocalBoxFuture<'static, CacheSnapshot> {
        self.request(key, Trigger::Observe)
    }

    /// Forced refresh: ignores the dedupe window and any request already in
    /// flight. Callers use it after their own create/update/delete succeeds.
    pub fn mutate(&self, key: &ResourceKey) -> LocalBoxFuture<'static, CacheSnapshot> {
        self.request(key, Trigger::Mutate)
    }

    /// Local write without a request, e.g. an optimistic update.
    pub fn set_data(&self, key: &ResourceKey, value: Value) {
        let now = self.core.timer.now_millis();
        {
            let mut state = self.core.state.borrow_mut();
            let entry = state.entries.entry(key.clone()).or_default();
            entry.data = Some(value);
            entry.error = None;
            entry.last_fetched_at = Some(now);
        }
        self.notify(key);
    }

    /// Forced refresh of every fetchable key matching `predicate`. Matching
    /// keys with no fetcher and no subscribers are dropped instead.
    pub fn invalidate_where<P>(&self, predicate: P) -> LocalBoxFuture<'static, Vec<CacheSnapshot>>
    where
        P: Fn(&ResourceKey) -> bool,
    {
        let keys: Vec<ResourceKey> = {
            let mut guard = self.core.state.borrow_mut();
            let state = &mut *guard;
            let subscribers = &mut state.subscribers;
            subscribers.retain(|_, registry| !registry.is_empty());

            let before = state.entries.len();
            state.entries.retain(|key, entry| {
                entry.source.is_some()
                    || entry.in_flight.is_some()
                    || subscribers.contains_key(key)
                    || !predicate(key)
            });
            let evicted = before - state.entries.len();
            if evicted > 0 {
                log::debug!("evicted {} unobserved cache entries", evicted);
            }

            state
                .entries
                .iter()
                .filter(|(key, entry)| entry.source.is_some() && predicate(*key))
                .map(|(key, _)| key.clone())
                .collect()
        };

        log::debug!("invalidating {} cached keys", keys.len());
        let requests: Vec<_> = keys.iter().map(|key| self.mutate(key)).collect();
        future::join_all(requests).boxed_local()
    }

    /// Host calls this when the window regains focus. Only keys whose
    /// options opt in are refreshed.
    pub fn focus_changed(&self) {
        let keys: Vec<ResourceKey> = self
            .core
            .state
            .borrow()
            .entries
            .iter()
            .filter(|(_, entry)| {
                entry
                    .source
                    .as_ref()
                    .map_or(false, |source| source.options.revalidate_on_focus)
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in keys {
            drop(self.request(&key, Trigger::Focus));
        }
    }

    /// `callback` runs whenever the entry for `key` changes state. Dropping
    /// the subscription never cancels a request other observers share.
    pub fn subscribe<F>(&self, key: &ResourceKey, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let registry = self
            .core
            .state
            .borrow_mut()
            .subscribers
            .entry(key.clone())
            .or_insert_with(Subscribers::new)
            .clone();
        registry.subscribe(callback)
    }

    /// Live subscriptions on `key`.
    pub fn subscriber_count(&self, key: &ResourceKey) -> usize {
        self.core
            .state
            .borrow()
            .subscribers
            .get(key)
            .map_or(0, |registry| registry.len())
    }

    /// Every key with a cache entry, in no particular order.
    pub fn keys(&self) -> Vec<ResourceKey> {
        self.core.state.borrow().entries.keys().cloned().collect()
    }

    fn request(&self, key: &ResourceKey, trigger: Trigger) -> LocalBoxFuture<'static, CacheSnapshot> {
        let now = self.core.timer.now_millis();

        let (generation, source, replaced_retry) = {
            let mut state = self.core.state.borrow_mut();
            let generation = state.next_generation;
            let entry = state.entries.entry(key.clone()).or_default();

            if trigger.shares_in_flight() {
                if let Some(in_flight) = &entry.in_flight {
                    log::debug!("sharing in-flight request for {}", key);
                    return in_flight.request.clone().boxed_local();
                }
            }
            if trigger.respects_dedupe_window() && entry.within_dedupe_window(now) {
                return future::ready(entry.snapshot()).boxed_local();
            }

            let Some(source) = entry.source.clone() else {
                log::debug!("no fetcher registered for {}, nothing to refresh", key);
                return future::ready(entry.snapshot()).boxed_local();
            };

            entry.last_started_at = Some(now);
            if trigger == Trigger::Mutate {
                entry.last_mutation = Some(generation);
            }
            if trigger != Trigger::Retry {
                entry.retry_attempt = 0;
            }
            let replaced_retry = entry.retry.take();
            state.next_generation += 1;
            (generation, source, replaced_retry)
        };
        drop(replaced_retry);

        let pending = (source.fetcher)();
        let not_found_as_empty = source.options.not_found_as_empty;
        let core = Rc::downgrade(&self.core);
        let settled_key = key.clone();
        let request: SharedRequest = async move {
            let result = match pending.await {
                Err(err) if not_found_as_empty && err.is_not_found() => {
                    log::debug!("{} not found, settling as empty", settled_key);
                    Ok(Value::Object(Default::default()))
                }
                other => other,
            };
            match core.upgrade() {
                Some(core) => CacheStore { core }.settle(&settled_key, generation, trigger, result),
                None => CacheSnapshot::from_result(result),
            }
        }
        .boxed_local()
        .shared();

        if let Some(entry) = self.core.state.borrow_mut().entries.get_mut(key) {
            entry.in_flight = Some(InFlight {
                generation,
                request: request.clone(),
            });
        }

        if let Err(e) = self.core.spawner.spawn_local(request.clone().map(|_| ())) {
            log::error!("❌ Could not start request for {}: {}", key, e);
            let snapshot = self.settle(
                key,
                generation,
                trigger,
                Err(FetchError::Spawn(e.to_string())),
            );
            return future::ready(snapshot).boxed_local();
        }

        log::debug!("🔄 fetching {} ({:?})", key, trigger);
        self.notify(key);
        request.boxed_local()
    }

    fn settle(
        &self,
        key: &ResourceKey,
        generation: u64,
        trigger: Trigger,
        result: Result<Value, FetchError>,
    ) -> CacheSnapshot {
        let now = self.core.timer.now_millis();
        let failed = result.is_err();

        let (snapshot, retry) = {
            let mut state = self.core.state.borrow_mut();
            let entry = state.entries.entry(key.clone()).or_default();
            let superseded = trigger != Trigger::Mutate
                && entry
                    .last_mutation
                    .map_or(false, |mutation| generation < mutation);

            match result {
                _ if superseded => {
                    log::debug!("dropping result for {} that predates a mutate", key);
                }
                Ok(value) => {
                    entry.data = Some(value);
                    entry.error = None;
                    entry.last_fetched_at = Some(now);
                    entry.retry_attempt = 0;
                }
                Err(err) => {
                    log::warn!("⚠️ Request for {} failed: {}", key, err);
                    entry.error = Some(err);
                }
            }

            // An older request settling after a newer one started leaves
            // the newer one in charge of the loading flag.
            if entry.in_flight.as_ref().map(|f| f.generation) == Some(generation) {
                entry.in_flight = None;
            }

            let retry = match &entry.source {
                Some(source)
                    if failed
                        && !superseded
                        && entry.in_flight.is_none()
                        && entry.retry_attempt < source.options.error_retry_count =>
                {
                    entry.retry_attempt += 1;
                    Some((source.options.error_retry_interval, entry.retry_attempt))
                }
                _ => None,
            };

            (entry.snapshot(), retry)
        };

        if let Some((delay, attempt)) = retry {
            self.schedule_retry(key, delay, attempt);
        }
        self.notify(key);
        snapshot
    }

    fn schedule_retry(&self, key: &ResourceKey, delay: Duration, attempt: u32) {
        log::info!("🔁 Retrying {} in {:?} (attempt {})", key, delay, attempt);

        let core = Rc::downgrade(&self.core);
        let retry_key = key.clone();
        let handle = self.core.timer.schedule(
            delay,
            Box::new(move || {
                let Some(core) = core.upgrade() else {
                    return;
                };
                let spawner = core.spawner.clone();
                let store = CacheStore { core };
                // Run outside the timer callback so the callback's own
                // handle is not dropped while it executes.
                let task = async move {
                    store.request(&retry_key, Trigger::Retry).await;
                };
                if let Err(e) = spawner.spawn_local(task) {
                    log::error!("❌ Could not schedule retry: {}", e);
                }
            }),
        );

        let previous = self
            .core
            .state
            .borrow_mut()
            .entries
            .get_mut(key)
            .and_then(|entry| entry.retry.replace(handle));
        drop(previous);
    }

    fn notify(&self, key: &ResourceKey) {
        let registry = self.core.state.borrow().subscribers.get(key).cloned();
        if let Some(registry) = registry {
            registry.notify();
        }
    }
}
