use crate::TOKIO;

use act_zero::{Actor, Addr};
use core::future::Future;
use futures::task::{Spawn, SpawnError};
use tokio::{runtime::Handle, task::JoinHandle};

struct CustomRuntime;

impl Spawn for CustomRuntime {
    fn spawn_obj(&self, future: futures::future::FutureObj<'static, ()>) -> Result<(), SpawnError> {
        spawn(future);
        Ok(())
    }
}

/// The runtime we are running on, or the one stored by [`crate::init`]
fn handle() -> Handle {
    Handle::try_current()
        .ok()
        .or_else(|| TOKIO.get().cloned())
        .expect("tokio runtime not initialized, call tagkit_tokio::init first")
}

pub fn spawn<T>(task: T) -> JoinHandle<T::Output>
where
    T: Future + Send + 'static,
    T::Output: Send + 'static,
{
    handle().spawn(task)
}

pub fn spawn_blocking<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    handle().spawn_blocking(f)
}

/// Provides an infallible way to spawn an actor onto the Tokio runtime,
/// equivalent to `Addr::new`.
pub fn spawn_actor<T: Actor>(actor: T) -> Addr<T> {
    Addr::new(&CustomRuntime, actor).expect("custom runtime never fails to spawn")
}
