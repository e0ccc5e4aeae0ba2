//! Tokio runtime and mock store helpers for integration tests.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::{Builder, Runtime};
use wiremock::MockServer;

/// Runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    /// Builds a multi-threaded runtime with timers enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be created.
    pub fn start() -> Result<Self, io::Error> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        Ok(Self(Rc::new(RefCell::new(runtime))))
    }

    /// Drives `future` to completion on the runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }

    /// Runs a synchronous closure inside the runtime context so that it can
    /// spawn tasks.
    pub fn within<R>(&self, action: impl FnOnce() -> R) -> R {
        let runtime = self.0.borrow();
        let _context = runtime.enter();
        action()
    }
}

/// Returns the scenario runtime and mock store server, starting them on
/// first use.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created or the slots do not
/// hold a value after being set.
pub fn runtime_and_store_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::start()?);
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime slot is empty after initialisation"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}
