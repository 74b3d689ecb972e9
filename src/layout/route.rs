use std::fmt;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    /// Landing page of a role's layout.
    Home(Role),
}

impl Route {
    pub fn home_of(role: Role) -> Self {
        Route::Home(role)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home(Role::Admin) => "/admin",
            Route::Home(Role::Supervisor) => "/supervisor",
            Route::Home(Role::Translator) => "/translator",
            Route::Home(Role::VoiceOverArtist) => "/voice-over-artist",
            Route::Home(Role::SoundEngineer) => "/sound-engineer",
            Route::Home(Role::Editor) => "/editor",
            Route::Home(Role::User) => "/",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
