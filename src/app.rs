// ============================================================================
// APP CONTEXT - composition root shared by layouts and hooks
// ============================================================================

use std::rc::Rc;

use crate::cache::{CacheStore, FetchOptions};
use crate::config::AppConfig;
use crate::error::FetchError;
use crate::layout::{LayoutGuard, Route};
use crate::models::Role;
use crate::runtime::Spawner;
use crate::services::{ApiClient, HttpClient};
use crate::state::SessionStore;
use crate::storage::KeyValueStore;
use crate::time::Timer;

/// Cheap to clone; every clone shares the same session, cache and client.
#[derive(Clone)]
pub struct AppContext {
    config: Rc<AppConfig>,
    session: SessionStore,
    cache: CacheStore,
    api: ApiClient,
    timer: Rc<dyn Timer>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        storage: Rc<dyn KeyValueStore>,
        http: Rc<dyn HttpClient>,
        timer: Rc<dyn Timer>,
        spawner: Spawner,
    ) -> Self {
        let session = SessionStore::rehydrate(storage, &config.session_storage_key);
        let cache = CacheStore::new(timer.clone(), spawner);
        let api = ApiClient::new(http, config.services.clone());

        Self {
            config: Rc::new(config),
            session,
            cache,
            api,
            timer,
        }
    }

    /// localStorage, fetch, setTimeout and the JS microtask queue.
    #[cfg(target_arch = "wasm32")]
    pub fn browser(config: AppConfig) -> Self {
        use crate::runtime::BrowserSpawner;
        use crate::services::GlooHttpClient;
        use crate::storage::LocalStorageStore;
        use crate::time::BrowserTimer;

        Self::new(
            config,
            Rc::new(LocalStorageStore),
            Rc::new(GlooHttpClient),
            Rc::new(BrowserTimer),
            Rc::new(BrowserSpawner),
        )
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn timer(&self) -> Rc<dyn Timer> {
        self.timer.clone()
    }

    /// Default policy for hooks: configured dedupe window, no retries.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::from_config(&self.config.cache)
    }

    pub fn mount_layout<F>(&self, allowed: &[Role], on_notice: F) -> Result<LayoutGuard, Route>
    where
        F: Fn() + 'static,
    {
        LayoutGuard::mount(
            self.session.clone(),
            allowed,
            self.timer.clone(),
            &self.config.idle,
            on_notice,
        )
    }

    /// Authenticates against the user service and opens the session.
    /// Returns the signed-in user's home.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Route, FetchError> {
        let user = self.api.login(email, password).await?;
        let home = Route::home_of(user.role);
        self.session.login(user);
        Ok(home)
    }

    /// The local session is cleared even when the service call fails.
    pub async fn sign_out(&self) -> Route {
        if let Err(e) = self.api.logout().await {
            log::warn!("⚠️ Logout request failed, clearing the local session anyway: {}", e);
        }
        self.session.logout();
        Route::Login
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::services::testing::MockHttp;
    use crate::storage::MemoryStore;
    use crate::time::ManualTimer;
    use futures::executor::LocalPool;

    pub(crate) struct TestApp {
        pub pool: LocalPool,
        pub timer: ManualTimer,
        pub http: Rc<MockHttp>,
        pub storage: Rc<MemoryStore>,
        pub ctx: AppContext,
    }

    pub(crate) fn test_app() -> TestApp {
        let pool = LocalPool::new();
        let timer = ManualTimer::new();
        let http = MockHttp::new();
        let storage = Rc::new(MemoryStore::new());
        let ctx = AppContext::new(
            AppConfig::default(),
            storage.clone(),
            http.clone(),
            Rc::new(timer.clone()),
            Rc::new(pool.spawner()),
        );
        TestApp {
            pool,
            timer,
            http,
            storage,
            ctx,
        }
    }
}
