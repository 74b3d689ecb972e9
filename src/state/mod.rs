pub mod reactivity;
pub mod session_store;

pub use reactivity::{ReactiveState, Subscribers, Subscription};
pub use session_store::{Access, SessionStore};
