// ============================================================================
// RESOURCE HANDLE - typed view over one cache key
// ============================================================================

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::app::AppContext;
use crate::cache::{CacheSnapshot, CacheStore, FetchOptions, Fetcher, ResourceKey};
use crate::error::FetchError;
use crate::services::HttpRequest;
use crate::state::Subscription;

/// What a component renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub error: Option<FetchError>,
    pub is_loading: bool,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
        }
    }
}

impl<T: DeserializeOwned> ResourceState<T> {
    /// A body that does not decode as `T` shows up as a `Decode` error,
    /// unless a fetch error is already being reported.
    pub fn from_snapshot(snapshot: CacheSnapshot) -> Self {
        let mut error = snapshot.error;
        let data = snapshot.data.and_then(|value| match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("⚠️ Cached value has an unexpected shape: {}", e);
                error.get_or_insert(FetchError::from(e));
                None
            }
        });

        Self {
            data,
            error,
            is_loading: snapshot.is_loading,
        }
    }
}

/// Typed handle a hook returns. Clones share the same cache entry.
pub struct UseResourceHandle<T> {
    cache: CacheStore,
    key: Option<ResourceKey>,
    _data: PhantomData<fn() -> T>,
}

impl<T> Clone for UseResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            _data: PhantomData,
        }
    }
}

impl<T: DeserializeOwned + 'static> UseResourceHandle<T> {
    /// Registers `fetcher` under `key` and kicks off the first request.
    /// With no key nothing is fetched and the state stays empty.
    pub fn mount(
        cache: &CacheStore,
        key: Option<ResourceKey>,
        fetcher: Fetcher,
        options: FetchOptions,
    ) -> Self {
        cache.observe(key.as_ref(), fetcher, options);
        Self {
            cache: cache.clone(),
            key,
            _data: PhantomData,
        }
    }

    /// `None` when the hook mounted without the ids it needs.
    pub fn key(&self) -> Option<&ResourceKey> {
        self.key.as_ref()
    }

    /// Decodes the current cache snapshot as `T`.
    pub fn state(&self) -> ResourceState<T> {
        match &self.key {
            Some(key) => ResourceState::from_snapshot(self.cache.snapshot(key)),
            None => ResourceState::default(),
        }
    }

    /// Forced refetch, e.g. after the caller's own mutation succeeded.
    pub fn mutate(&self) -> LocalBoxFuture<'static, ResourceState<T>> {
        match &self.key {
            Some(key) => self.cache.mutate(key).map(ResourceState::from_snapshot).boxed_local(),
            None => future::ready(ResourceState::default()).boxed_local(),
        }
    }

    /// Refetch honoring the dedupe window.
    pub fn revalidate(&self) -> LocalBoxFuture<'static, ResourceState<T>> {
        match &self.key {
            Some(key) => self
                .cache
                .revalidate(key)
                .map(ResourceState::from_snapshot)
                .boxed_local(),
            None => future::ready(ResourceState::default()).boxed_local(),
        }
    }

    /// `None` when the handle has no key.
    pub fn subscribe<F>(&self, callback: F) -> Option<Subscription>
    where
        F: Fn() + 'static,
    {
        self.key
            .as_ref()
            .map(|key| self.cache.subscribe(key, callback))
    }
}

/// GET hook keyed by its URL.
pub(crate) fn use_get<T>(
    ctx: &AppContext,
    url: Option<String>,
    options: FetchOptions,
) -> UseResourceHandle<T>
where
    T: DeserializeOwned + 'static,
{
    let key = url.as_deref().map(ResourceKey::url);
    let fetcher = ctx.api().fetcher(HttpRequest::get(url.unwrap_or_default()));
    UseResourceHandle::mount(ctx.cache(), key, fetcher, options)
}
