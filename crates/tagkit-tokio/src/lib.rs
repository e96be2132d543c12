mod abortable_task;
pub mod task;
pub mod unblock;

use std::sync::OnceLock;
use tokio::runtime::Handle;

pub use abortable_task::AbortableTask;

pub(crate) static TOKIO: OnceLock<Handle> = OnceLock::new();

/// Remember the current runtime so tasks can be spawned from threads the host owns
pub fn init() {
    if is_tokio_initialized() {
        return;
    }

    if let Ok(handle) = Handle::try_current() {
        let _ = TOKIO.set(handle);
    }
}

pub fn is_tokio_initialized() -> bool {
    TOKIO.get().is_some()
}
