//! Mock host implementation for testing the TypefullyForms loader
//!
//! This provides an in-memory document, captured console output and a
//! recorder for resize attachments, so the loader core can be tested
//! without a browser.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use tyforms_host::{
    AttributeReader, Console, ElementLocator, Entropy, FrameSpec, HostError, ResizeAttacher,
    ResizeOptions,
};

/// Console level of a captured message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Log,
    Warn,
    Error,
}

/// Element in the mock document
#[derive(Clone, Debug, Default)]
pub struct MockElement {
    /// Selector this element answers to
    pub selector: String,
    attributes: BTreeMap<String, String>,
}

impl MockElement {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl AttributeReader for MockElement {
    fn data_attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

/// An iframe appended to a mock element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountedFrame {
    /// Selector of the parent element
    pub parent: String,
    pub frame: FrameSpec,
}

/// A recorded `attach_resize` call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeCall {
    pub options: ResizeOptions,
    pub selector: String,
}

/// Mock host for unit testing
pub struct MockHost {
    /// Elements keyed by the exact selector that locates them
    elements: RefCell<BTreeMap<String, MockElement>>,
    /// Iframes mounted so far, in order
    mounted: RefCell<Vec<MountedFrame>>,
    /// Resize attachments, in order
    resize_calls: RefCell<Vec<ResizeCall>>,
    /// Captured console output
    console: RefCell<Vec<(LogLevel, String)>>,
    /// Seed for deterministic "random" bytes
    random_seed: Cell<u64>,
    fail_mount: Cell<bool>,
    resize_available: Cell<bool>,
}

impl MockHost {
    /// Create an empty document with a resize library present
    pub fn new() -> Self {
        Self {
            elements: RefCell::new(BTreeMap::new()),
            mounted: RefCell::new(Vec::new()),
            resize_calls: RefCell::new(Vec::new()),
            console: RefCell::new(Vec::new()),
            random_seed: Cell::new(12345), // Deterministic seed
            fail_mount: Cell::new(false),
            resize_available: Cell::new(true),
        }
    }

    /// Create a mock host whose document contains `body`
    pub fn with_body() -> Self {
        let host = Self::new();
        host.add_element(MockElement::new("body"));
        host
    }

    /// Add (or replace) an element in the document
    pub fn add_element(&self, element: MockElement) {
        self.elements
            .borrow_mut()
            .insert(element.selector.clone(), element);
    }

    /// Make every subsequent `mount_iframe` fail
    pub fn fail_mounts(&self) {
        self.fail_mount.set(true);
    }

    /// Simulate a page where the resize library was never loaded
    pub fn remove_resize_library(&self) {
        self.resize_available.set(false);
    }

    /// Set the random seed for deterministic testing
    pub fn set_random_seed(&self, seed: u64) {
        self.random_seed.set(seed);
    }

    /// All iframes mounted so far
    pub fn mounted(&self) -> Vec<MountedFrame> {
        self.mounted.borrow().clone()
    }

    /// All resize attachments so far
    pub fn resize_calls(&self) -> Vec<ResizeCall> {
        self.resize_calls.borrow().clone()
    }

    /// All captured console messages
    pub fn console_log(&self) -> Vec<(LogLevel, String)> {
        self.console.borrow().clone()
    }

    /// Captured console messages at one level
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.console
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// Check if a specific message was logged at any level
    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.console
            .borrow()
            .iter()
            .any(|(_, msg)| msg.contains(substr))
    }

    /// Check if a specific message was logged at `level`
    pub fn has_level_containing(&self, level: LogLevel, substr: &str) -> bool {
        self.console
            .borrow()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(substr))
    }

    fn capture(&self, level: LogLevel, msg: &str) {
        self.console.borrow_mut().push((level, String::from(msg)));
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementLocator for MockHost {
    type Element = MockElement;

    fn locate(&self, selector: &str) -> Option<Self::Element> {
        self.elements.borrow().get(selector).cloned()
    }

    fn mount_iframe(&self, parent: &Self::Element, frame: &FrameSpec) -> Result<(), HostError> {
        if self.fail_mount.get() {
            return Err(HostError::Append(format!(
                "mock refused to append to {}",
                parent.selector
            )));
        }
        self.mounted.borrow_mut().push(MountedFrame {
            parent: parent.selector.clone(),
            frame: frame.clone(),
        });
        Ok(())
    }
}

impl ResizeAttacher for MockHost {
    fn attach_resize(&self, options: &ResizeOptions, selector: &str) -> Result<(), HostError> {
        if !self.resize_available.get() {
            return Err(HostError::ResizeUnavailable);
        }
        self.resize_calls.borrow_mut().push(ResizeCall {
            options: options.clone(),
            selector: String::from(selector),
        });
        Ok(())
    }
}

impl Console for MockHost {
    fn log(&self, msg: &str) {
        self.capture(LogLevel::Log, msg);
    }

    fn warn(&self, msg: &str) {
        self.capture(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.capture(LogLevel::Error, msg);
    }
}

impl Entropy for MockHost {
    fn random_bytes(&self, buf: &mut [u8]) -> Result<(), HostError> {
        // Simple LCG for deterministic "random" bytes in tests
        let mut seed = self.random_seed.get();
        for byte in buf.iter_mut() {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            *byte = (seed >> 33) as u8;
        }
        self.random_seed.set(seed);
        Ok(())
    }
}
