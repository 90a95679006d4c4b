//! Error types for the loader core
//!
//! Only [`BootstrapError`] is fatal. Everything else is reported on the host
//! console and the surrounding state is left as it was.

use thiserror::Error;

/// Fatal failure while draining an instance's command queue
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The first queued command was not `init`
    #[error("Failed to start Widget [{instance}]. 'init' must be called before other methods.")]
    InitNotFirst {
        /// Name of the instance slot being bootstrapped
        instance: String,
    },
}

/// Failure raised at a handler call site
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The api method name was missing or empty
    #[error("API method required")]
    MissingApi,
}
