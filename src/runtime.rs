// Local task spawning. Everything runs on one thread; futures are `!Send`.

use futures::task::LocalSpawn;
use std::rc::Rc;

pub type Spawner = Rc<dyn LocalSpawn>;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserSpawner;

#[cfg(target_arch = "wasm32")]
mod browser {
    use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};

    /// Spawns onto the JS microtask queue.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserSpawner;

    impl LocalSpawn for BrowserSpawner {
        fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
            wasm_bindgen_futures::spawn_local(future);
            Ok(())
        }
    }
}
