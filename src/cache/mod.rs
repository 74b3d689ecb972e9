pub mod entry;
pub mod key;
pub mod options;
pub mod store;

pub use entry::{CacheSnapshot, FetchFuture, Fetcher};
pub use key::ResourceKey;
pub use options::FetchOptions;
pub use store::CacheStore;
