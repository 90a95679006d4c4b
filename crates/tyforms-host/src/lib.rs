//! Host capability traits for the TypefullyForms loader
//!
//! The loader core never touches the DOM or page globals directly. Everything
//! it needs from the embedding page is expressed here as a narrow capability:
//!
//! - [`ElementLocator`]: find the render target and mount an iframe into it
//! - [`AttributeReader`]: read `data-*` overrides from a located element
//! - [`ResizeAttacher`]: hand the mounted iframe to the resize library
//! - [`Console`]: leveled diagnostic output
//! - [`Entropy`]: random bytes for generated widget ids
//!
//! # Platform Implementations
//!
//! - **Browser**: `tyforms-loader` (`document.querySelector`, `iFrameResize`, `console.*`)
//! - **Tests**: `tyforms-host-mock` (in-memory document, captured console)

use thiserror::Error;

// =============================================================================
// Capabilities
// =============================================================================

/// Read access to the attributes of a located element.
pub trait AttributeReader {
    /// Value of the attribute `name` (full name, e.g. `data-ty-url`), if present.
    fn data_attribute(&self, name: &str) -> Option<String>;
}

/// Element lookup and iframe mounting.
pub trait ElementLocator {
    /// Handle to a located element
    type Element: AttributeReader;

    /// Find the first element matching a CSS selector.
    ///
    /// Returns `None` when nothing matches or the selector is invalid.
    fn locate(&self, selector: &str) -> Option<Self::Element>;

    /// Create an iframe described by `frame` and append it as the last child
    /// of `parent`.
    fn mount_iframe(&self, parent: &Self::Element, frame: &FrameSpec) -> Result<(), HostError>;
}

/// The external iframe resize capability.
pub trait ResizeAttacher {
    /// Attach resize behaviour to the iframe(s) matched by `selector`.
    ///
    /// The capability owns all later size negotiation; callers do not observe it.
    fn attach_resize(&self, options: &ResizeOptions, selector: &str) -> Result<(), HostError>;
}

/// Leveled console output
pub trait Console {
    /// Informational message
    fn log(&self, msg: &str);
    /// Warning message
    fn warn(&self, msg: &str);
    /// Error message
    fn error(&self, msg: &str);
}

/// Platform entropy source
pub trait Entropy {
    /// Fill `buf` with random bytes.
    ///
    /// # Returns
    /// * `Ok(())` - Buffer filled
    /// * `Err(HostError::EntropyUnavailable)` - No entropy source on this platform
    fn random_bytes(&self, buf: &mut [u8]) -> Result<(), HostError>;
}

/// Everything the loader core needs from its host.
pub trait Host: ElementLocator + ResizeAttacher + Console + Entropy {}

impl<T> Host for T where T: ElementLocator + ResizeAttacher + Console + Entropy {}

// =============================================================================
// Values crossing the host boundary
// =============================================================================

/// Width applied to every mounted widget iframe
pub const FRAME_WIDTH: &str = "100%";

/// Description of an iframe to mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSpec {
    /// Element id of the iframe
    pub id: String,
    /// Source URL; `None` leaves `src` unset
    pub url: Option<String>,
    /// CSS width
    pub width: &'static str,
}

impl FrameSpec {
    /// Full-width iframe with the given id and source
    pub fn new(id: impl Into<String>, url: Option<String>) -> Self {
        Self {
            id: id.into(),
            url,
            width: FRAME_WIDTH,
        }
    }

    /// CSS selector targeting this iframe by id
    pub fn selector(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Options handed to the resize capability.
///
/// Unset size bounds mean "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Enable the resize library's own logging
    pub log: bool,
    /// Keep resizing after the initial sizing
    pub auto_resize: bool,
    pub max_height: Option<String>,
    pub min_height: Option<String>,
    pub max_width: Option<String>,
    pub min_width: Option<String>,
}

impl ResizeOptions {
    /// The size bounds as `(camelCase key, value)` pairs, unset ones included.
    pub fn bounds(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("maxHeight", self.max_height.as_deref()),
            ("minHeight", self.min_height.as_deref()),
            ("maxWidth", self.max_width.as_deref()),
            ("minWidth", self.min_width.as_deref()),
        ]
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Host operation failures
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// The iframe element could not be created
    #[error("failed to create iframe: {0}")]
    IframeCreation(String),
    /// The iframe could not be attached to its parent
    #[error("failed to append iframe: {0}")]
    Append(String),
    /// The resize library is not loaded on the page
    #[error("resize capability unavailable")]
    ResizeUnavailable,
    /// The resize library rejected the call
    #[error("resize attachment failed: {0}")]
    ResizeFailed(String),
    /// No entropy source on this platform
    #[error("entropy source unavailable")]
    EntropyUnavailable,
}
