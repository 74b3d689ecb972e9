pub mod guard;
pub mod route;

pub use guard::LayoutGuard;
pub use route::Route;
