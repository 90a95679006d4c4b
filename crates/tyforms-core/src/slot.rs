//! Instance slot state
//!
//! A host page reserves a named global before the loader runs and queues calls
//! on it. Bootstrap replaces that placeholder with a live handler exactly once.

use crate::command::Command;
use crate::handler::Handler;

/// Name of the instance slot when the loading script tag has no `id`
pub const DEFAULT_INSTANCE_NAME: &str = "_ty";

/// Contents of an instance slot
#[derive(Debug)]
pub enum InstanceSlot<H> {
    /// Placeholder holding calls queued before load
    Queue(Vec<Command>),
    /// Live handler installed by bootstrap
    Handler(Handler<H>),
}

impl<H> InstanceSlot<H> {
    /// Placeholder with the given queued commands
    pub fn queue(commands: Vec<Command>) -> Self {
        InstanceSlot::Queue(commands)
    }

    /// The live handler, once installed
    pub fn handler(&self) -> Option<&Handler<H>> {
        match self {
            InstanceSlot::Handler(handler) => Some(handler),
            InstanceSlot::Queue(_) => None,
        }
    }

    /// Whether bootstrap has installed a handler
    pub fn is_live(&self) -> bool {
        matches!(self, InstanceSlot::Handler(_))
    }
}
