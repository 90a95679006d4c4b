//! Queued commands and the supported API surface

use core::fmt;

use serde_json::Value;

/// Method name of the bootstrap command
pub const INIT: &str = "init";

/// Method name of the render command
pub const RENDER: &str = "render";

/// One `(methodName, params)` pair queued by the host page before load.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// Method name as queued (any case)
    pub method: String,
    /// Parameters, if any were passed
    pub params: Option<Value>,
}

impl Command {
    /// Queue entry for `method` with optional `params`.
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Lowercased method name
    pub fn normalized_method(&self) -> String {
        self.method.to_lowercase()
    }

    /// Whether this is the bootstrap command, in any case
    pub fn is_init(&self) -> bool {
        self.normalized_method() == INIT
    }
}

/// Operations the live handler knows about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Api {
    Init,
    Render,
    /// Any other name; logged and ignored
    Unsupported(String),
}

impl Api {
    /// Parse a method name (case-insensitive).
    pub fn parse(name: &str) -> Self {
        let name = name.to_lowercase();
        match name.as_str() {
            INIT => Api::Init,
            RENDER => Api::Render,
            _ => Api::Unsupported(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Api::Init => INIT,
            Api::Render => RENDER,
            Api::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Api::Unsupported(_))
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
