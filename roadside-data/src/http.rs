//! Shared HTTP plumbing for the provider adapters.
//!
//! Every provider owns a `reqwest` client plus a [`BlockingBridge`] that runs
//! its async requests behind the synchronous core trait surface. The bridge
//! reuses the surrounding multi-threaded Tokio runtime when one is present
//! and falls back to an owned current-thread runtime otherwise, so providers
//! work both inside async applications and in plain synchronous binaries.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// User agent sent with every outbound request.
pub(crate) const USER_AGENT: &str = "roadside-engine/0.1";

/// Errors raised while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Build a client with connect and request timeouts applied.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
}

/// Runs futures to completion from synchronous code.
///
/// When called from within an existing multi-threaded Tokio runtime
/// (detected via [`Handle::try_current`]), the bridge uses that runtime's
/// handle with [`tokio::task::block_in_place`] to avoid nested-runtime
/// panics. From outside any runtime, or inside a `current_thread` runtime,
/// it blocks on its own stored runtime.
pub(crate) struct BlockingBridge {
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingBridge")
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingBridge {
    pub(crate) fn new() -> Result<Self, std::io::Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_runs_futures_outside_a_runtime() {
        let bridge = BlockingBridge::new().expect("bridge should build");
        let value = bridge.block_on(async { 21 * 2 });
        assert_eq!(value, 42);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn bridge_reuses_a_multi_thread_runtime() {
        let bridge = BlockingBridge::new().expect("bridge should build");
        let value = bridge.block_on(async { "ok" });
        assert_eq!(value, "ok");
    }

    #[test]
    fn client_builds_with_timeouts() {
        let client = build_client(Duration::from_secs(5), USER_AGENT);
        assert!(client.is_ok());
    }
}
