//! Loader core for TypefullyForms
//!
//! Platform-independent logic of the embeddable widget loader. A host page
//! queues `init` / `render` calls on a named global before the loader runs;
//! this crate turns that queue into a live handler and renders widgets through
//! the capabilities defined in `tyforms-host`.
//!
//! ## Module Structure
//!
//! - `slot` - Instance slot state (queue placeholder or live handler)
//! - `drain` - Command queue draining and bootstrap validation
//! - `handler` - Post-bootstrap API dispatch
//! - `config` - Flat configuration map and shallow merge
//! - `render` - Render option resolution and iframe mounting
//! - `coerce` - Lenient value coercions (`str_to_bool`, truthiness)
//! - `command` - Queued commands and the closed API enum
//! - `error` - Error types

pub mod coerce;
pub mod command;
pub mod config;
pub mod drain;
pub mod error;
pub mod handler;
pub mod render;
pub mod slot;

// =============================================================================
// Public re-exports
// =============================================================================

pub use coerce::str_to_bool;
pub use command::{Api, Command};
pub use config::Configuration;
pub use drain::drain;
pub use error::{ApiError, BootstrapError};
pub use handler::Handler;
pub use render::{render, RenderOptions, RenderOutcome, ResolvedOptions};
pub use slot::{InstanceSlot, DEFAULT_INSTANCE_NAME};

/// Product name used in console output
pub const PRODUCT_NAME: &str = "TypefullyForms";
