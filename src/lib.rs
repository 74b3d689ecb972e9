// ============================================================================
// DUBBING DASHBOARD - client core
// ============================================================================
// - State: signed-in session, persisted and observable
// - Cache: stale-while-revalidate store shared by every hook
// - Idle: inactivity timeout owned by each role layout
// - Services: HTTP only, one file per upstream service
// ============================================================================

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod hooks;
pub mod idle;
pub mod layout;
pub mod models;
pub mod runtime;
pub mod services;
pub mod state;
pub mod storage;
pub mod time;

pub use app::AppContext;
pub use cache::{CacheSnapshot, CacheStore, FetchOptions, ResourceKey};
pub use config::AppConfig;
pub use error::{FetchError, StorageError};
pub use layout::{LayoutGuard, Route};
pub use state::{Access, SessionStore};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;

    use crate::app::AppContext;
    use crate::config::AppConfig;

    thread_local! {
        static APP: RefCell<Option<AppContext>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = AppConfig::from_env();
        if config.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 Dubbing dashboard starting");

        let ctx = AppContext::browser(config);
        APP.with(|app| *app.borrow_mut() = Some(ctx));
        Ok(())
    }

    /// Runs `f` against the context created by `start`.
    pub fn with_app<R>(f: impl FnOnce(&AppContext) -> R) -> Option<R> {
        APP.with(|app| app.borrow().as_ref().map(f))
    }

    /// Called by the host page when the window regains focus.
    #[wasm_bindgen]
    pub fn window_focused() {
        if with_app(|ctx| ctx.cache().focus_changed()).is_none() {
            log::warn!("⚠️ window_focused called before start");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::with_app;
