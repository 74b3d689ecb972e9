// ============================================================================
// SESSION STORE - who is signed in, persisted across reloads
// ============================================================================

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::reactivity::{ReactiveState, Subscription};
use crate::layout::Route;
use crate::models::{Role, User};
use crate::storage::{load_json, save_json, KeyValueStore};

/// Shape of the persisted blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct PersistedSession {
    user: Option<User>,
}

/// Outcome of a role check performed by a layout on mount.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Granted(User),
    Redirect(Route),
}

#[derive(Clone)]
pub struct SessionStore {
    state: ReactiveState<Option<User>>,
    storage: Rc<dyn KeyValueStore>,
    storage_key: Rc<str>,
}

impl SessionStore {
    /// Restores the last persisted session. A missing or unreadable blob
    /// starts signed out.
    pub fn rehydrate(storage: Rc<dyn KeyValueStore>, storage_key: &str) -> Self {
        let user = match load_json::<PersistedSession>(storage.as_ref(), storage_key) {
            Ok(Some(persisted)) => persisted.user,
            Ok(None) => None,
            Err(e) => {
                log::warn!("⚠️ Stored session could not be read, starting signed out: {}", e);
                None
            }
        };

        if let Some(ref user) = user {
            log::info!("📋 Session restored for {} ({})", user.email, user.role);
        }

        Self {
            state: ReactiveState::new(user),
            storage,
            storage_key: Rc::from(storage_key),
        }
    }

    /// No credential check happens here; the auth service already did it.
    pub fn login(&self, user: User) {
        log::info!("🔐 Signed in as {} ({})", user.email, user.role);
        self.replace(Some(user));
    }

    pub fn logout(&self) {
        log::info!("🚪 Signed out");
        self.replace(None);
    }

    /// Replaces the whole profile; fields are never merged.
    pub fn update(&self, user: User) {
        self.replace(Some(user));
    }

    pub fn current(&self) -> Option<User> {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Option::is_some)
    }

    pub fn role(&self) -> Option<Role> {
        self.state.with(|user| user.as_ref().map(|u| u.role))
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback)
    }

    /// Signed-out visitors go to the login page; other roles go back to
    /// their own home.
    pub fn authorize(&self, allowed: &[Role]) -> Access {
        match self.current() {
            None => {
                log::debug!("no session, redirecting to {}", Route::Login);
                Access::Redirect(Route::Login)
            }
            Some(user) if allowed.contains(&user.role) => Access::Granted(user),
            Some(user) => {
                log::debug!("role {} not allowed here, redirecting home", user.role);
                Access::Redirect(Route::home_of(user.role))
            }
        }
    }

    fn replace(&self, user: Option<User>) {
        let persisted = PersistedSession { user };
        if let Err(e) = save_json(self.storage.as_ref(), &self.storage_key, &persisted) {
            log::error!("❌ Could not persist session: {}", e);
        }
        self.state.set(persisted.user);
    }
}
