// SPDX-License-Identifier: MPL-2.0

//! Shared async runtime for all store round trips.
//!
//! The widget shells this crate serves are synchronous, so the crate keeps a
//! single lazily built Tokio runtime instead of spinning one up per request.

use once_cell::sync::Lazy;
use std::future::Future;
use tokio::runtime::Runtime;

/// Two worker threads cover the crate's I/O-bound request pattern.
static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("gantry-async")
        .build()
        .expect("failed to create async runtime")
});

/// Run a future to completion on the shared runtime, blocking the caller.
/// This is the bridge for synchronous shells and tests.
pub fn block_on<F: Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}

/// Spawn a future on the shared runtime without blocking the caller.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    RUNTIME.spawn(future)
}
