use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::route::Route;
use crate::config::IdleConfig;
use crate::idle::IdleMonitor;
use crate::models::{Role, User};
use crate::state::{Access, SessionStore};
use crate::time::Timer;

/// A mounted role layout: the role check passed and the idle monitor runs
/// until the guard is dropped.
pub struct LayoutGuard {
    user: User,
    session: SessionStore,
    monitor: IdleMonitor,
    notice: Rc<Cell<bool>>,
    #[cfg(target_arch = "wasm32")]
    _listeners: Option<crate::idle::ActivityListeners>,
}

impl LayoutGuard {
    /// `Err` carries where to navigate instead. `on_notice` runs once when
    /// the idle timeout expires; the session stays until the user
    /// acknowledges.
    pub fn mount<F>(
        session: SessionStore,
        allowed: &[Role],
        timer: Rc<dyn Timer>,
        idle: &IdleConfig,
        on_notice: F,
    ) -> Result<Self, Route>
    where
        F: Fn() + 'static,
    {
        let user = match session.authorize(allowed) {
            Access::Granted(user) => user,
            Access::Redirect(route) => return Err(route),
        };

        let notice = Rc::new(Cell::new(false));
        let flag = notice.clone();
        let monitor = IdleMonitor::start(timer, idle.timeout_for(user.role), move || {
            if !flag.replace(true) {
                on_notice();
            }
        });

        #[cfg(target_arch = "wasm32")]
        let _listeners = crate::idle::ActivityListeners::attach(monitor.activity_sink());

        log::info!("🧭 {} layout mounted for {}", user.role, user.email);

        Ok(Self {
            user,
            session,
            monitor,
            notice,
            #[cfg(target_arch = "wasm32")]
            _listeners,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn idle_timeout(&self) -> Duration {
        self.monitor.timeout()
    }

    pub fn notice_pending(&self) -> bool {
        self.notice.get()
    }

    /// Activity reported by the host. Does not dismiss a pending notice.
    pub fn notify_activity(&self) {
        if !self.notice.get() {
            self.monitor.notify_activity();
        }
    }

    /// The user confirmed the idle notice: sign out and go to login.
    pub fn acknowledge_timeout(&self) -> Route {
        self.monitor.stop();
        self.notice.set(false);
        self.session.logout();
        Route::Login
    }
}

impl Drop for LayoutGuard {
    fn drop(&mut self) {
        log::debug!("{} layout unmounted", self.user.role);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::time::ManualTimer;

    fn session_with(role: Role) -> SessionStore {
        let session = SessionStore::rehydrate(Rc::new(MemoryStore::new()), "test:session");
        session.login(User {
            id: "u1".into(),
            name: "Mara".into(),
            email: "mara@studio.test".into(),
            mobile: None,
            employee_id: None,
            exp_level: None,
            role,
            profile_image: None,
            is_verified: true,
            created_at: None,
        });
        session
    }

    fn mount(
        session: &SessionStore,
        allowed: &[Role],
        timer: &ManualTimer,
    ) -> (Result<LayoutGuard, Route>, Rc<Cell<u32>>) {
        let notices = Rc::new(Cell::new(0));
        let counter = notices.clone();
        let guard = LayoutGuard::mount(
            session.clone(),
            allowed,
            Rc::new(timer.clone()),
            &IdleConfig::default(),
            move || counter.set(counter.get() + 1),
        );
        (guard, notices)
    }

    #[test]
    fn wrong_role_is_sent_home_without_a_monitor() {
        let timer = ManualTimer::new();
        let session = session_with(Role::Translator);

        let (guard, _) = mount(&session, &[Role::Admin], &timer);
        assert_eq!(guard.err(), Some(Route::Home(Role::Translator)));
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn signed_out_visitors_go_to_login() {
        let timer = ManualTimer::new();
        let session = SessionStore::rehydrate(Rc::new(MemoryStore::new()), "test:session");

        let (guard, _) = mount(&session, &[Role::Editor], &timer);
        assert_eq!(guard.err(), Some(Route::Login));
    }

    #[test]
    fn idle_timeout_notifies_but_keeps_the_session() {
        let timer = ManualTimer::new();
        let session = session_with(Role::SoundEngineer);
        let (guard, notices) = mount(&session, &[Role::SoundEngineer], &timer);
        let guard = guard.unwrap();
        assert_eq!(guard.idle_timeout(), Duration::from_secs(20 * 60));

        timer.advance(Duration::from_secs(20 * 60));
        assert_eq!(notices.get(), 1);
        assert!(guard.notice_pending());
        assert!(session.is_authenticated());

        guard.notify_activity();
        assert!(guard.notice_pending());

        assert_eq!(guard.acknowledge_timeout(), Route::Login);
        assert!(!session.is_authenticated());
        assert!(!guard.notice_pending());
    }

    #[test]
    fn supervisors_get_the_longer_timeout() {
        let timer = ManualTimer::new();
        let session = session_with(Role::Supervisor);
        let (guard, notices) = mount(&session, &[Role::Supervisor], &timer);
        let guard = guard.unwrap();

        timer.advance(Duration::from_secs(30 * 60));
        assert_eq!(notices.get(), 0);
        assert_eq!(guard.idle_timeout(), Duration::from_secs(40 * 60));
    }

    #[test]
    fn unmounting_cancels_the_idle_timer() {
        let timer = ManualTimer::new();
        let session = session_with(Role::Editor);
        let (guard, notices) = mount(&session, &[Role::Editor], &timer);

        drop(guard);
        assert_eq!(timer.pending(), 0);
        timer.advance(Duration::from_secs(60 * 60));
        assert_eq!(notices.get(), 0);
        assert!(session.is_authenticated());
    }
}
