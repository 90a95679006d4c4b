//! Command queue drainer
//!
//! Replays the calls a host page queued before the loader executed.
//!
//! # Rules
//!
//! Commands are processed in queue order over a snapshot of the queue:
//!
//! 1. The first command must be `init`, otherwise bootstrap fails and the slot
//!    is left untouched.
//! 2. The first `init` shallow-merges its params over the default
//!    configuration and replaces the slot with a handler bound to the result.
//! 3. Any later `init` is dropped: not merged, not dispatched.
//! 4. Every other command is dispatched to the installed handler.
//!
//! A handler error on one queued command is reported and draining continues.

use std::rc::Rc;

use tyforms_host::Host;

use crate::config::Configuration;
use crate::error::BootstrapError;
use crate::handler::Handler;
use crate::slot::InstanceSlot;
use crate::PRODUCT_NAME;

/// Drain the queue held by `slot`.
///
/// Does nothing if the slot is already live or its queue is empty.
///
/// # Returns
/// * `Ok(())` - Queue drained; the slot is live if the queue was non-empty
/// * `Err(BootstrapError::InitNotFirst)` - First command was not `init`; slot unmodified
pub fn drain<H: Host>(
    instance: &str,
    slot: &mut InstanceSlot<H>,
    host: &Rc<H>,
) -> Result<(), BootstrapError> {
    let commands = match slot {
        InstanceSlot::Queue(commands) if !commands.is_empty() => commands.clone(),
        _ => return Ok(()),
    };

    let mut configuration = Configuration::default();
    let mut handler: Option<Handler<H>> = None;

    for (i, command) in commands.iter().enumerate() {
        let is_init = command.is_init();

        if i == 0 && !is_init {
            return Err(BootstrapError::InitNotFirst {
                instance: instance.to_string(),
            });
        } else if i != 0 && is_init {
            continue;
        }

        if is_init {
            configuration = configuration.merge(command.params.as_ref());
            if configuration.debug() {
                host.log(&format!("{} started {}", PRODUCT_NAME, configuration.to_json()));
            }
            let live = Handler::new(configuration.clone(), Rc::clone(host));
            *slot = InstanceSlot::Handler(live.clone());
            handler = Some(live);
        } else if let Some(handler) = &handler {
            if let Err(e) = handler.call(&command.normalized_method(), command.params.as_ref()) {
                host.error(&e.to_string());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use serde_json::json;
    use tyforms_host_mock::{LogLevel, MockElement, MockHost};

    fn queued(commands: Vec<Command>) -> InstanceSlot<MockHost> {
        InstanceSlot::queue(commands)
    }

    #[test]
    fn test_empty_queue_is_a_no_op() {
        let host = Rc::new(MockHost::with_body());
        let mut slot = queued(vec![]);

        drain("_ty", &mut slot, &host).unwrap();

        assert!(!slot.is_live());
        assert!(host.console_log().is_empty());
    }

    #[test]
    fn test_init_not_first_fails_and_leaves_slot() {
        let host = Rc::new(MockHost::with_body());
        let commands = vec![
            Command::new("render", Some(json!({}))),
            Command::new("init", None),
        ];
        let mut slot = queued(commands.clone());

        let err = drain("_ty", &mut slot, &host).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to start Widget [_ty]. 'init' must be called before other methods."
        );
        match &slot {
            InstanceSlot::Queue(left) => assert_eq!(left, &commands),
            InstanceSlot::Handler(_) => panic!("slot must stay a queue"),
        }
        assert!(host.mounted().is_empty());
    }

    #[test]
    fn test_init_installs_handler_with_merged_config() {
        let host = Rc::new(MockHost::with_body());
        let mut slot = queued(vec![Command::new(
            "Init",
            Some(json!({ "dataAttributesPrefix": "tf" })),
        )]);

        drain("forms", &mut slot, &host).unwrap();

        let handler = slot.handler().expect("handler installed");
        assert_eq!(handler.config().data_attributes_prefix(), "tf");
        assert!(!handler.config().debug());
        assert!(!host.has_log_containing("TypefullyForms started"));
    }

    #[test]
    fn test_debug_traces_merged_config() {
        let host = Rc::new(MockHost::with_body());
        let mut slot = queued(vec![Command::new("init", Some(json!({ "debug": true })))]);

        drain("_ty", &mut slot, &host).unwrap();

        assert!(host.has_level_containing(
            LogLevel::Log,
            r#"TypefullyForms started {"dataAttributesPrefix":"ty","debug":true}"#
        ));
    }

    #[test]
    fn test_leading_init_matches_any_case() {
        let host = Rc::new(MockHost::with_body());
        let mut slot = queued(vec![
            Command::new("Init", Some(json!({ "dataAttributesPrefix": "tf" }))),
            Command::new("RENDER", None),
        ]);

        drain("_ty", &mut slot, &host).unwrap();

        let handler = slot.handler().expect("handler installed");
        assert_eq!(handler.config().data_attributes_prefix(), "tf");
        assert_eq!(host.mounted().len(), 1);
    }

    #[test]
    fn test_later_init_is_dropped() {
        let host = Rc::new(MockHost::with_body());
        let mut slot = queued(vec![
            Command::new("init", None),
            Command::new("render", None),
            Command::new("INIT", Some(json!({ "debug": true, "dataAttributesPrefix": "zz" }))),
        ]);

        drain("_ty", &mut slot, &host).unwrap();

        let handler = slot.handler().expect("handler installed");
        assert!(!handler.config().debug());
        assert_eq!(handler.config().data_attributes_prefix(), "ty");
        assert!(!host.has_log_containing("Handling API call init"));
        assert!(!host.has_log_containing("No handler defined for init"));
        assert_eq!(host.mounted().len(), 1);
    }

    #[test]
    fn test_commands_dispatched_in_order() {
        let host = Rc::new(MockHost::new());
        for selector in ["#a", "#b", "#c"] {
            host.add_element(MockElement::new(selector));
        }
        let mut slot = queued(vec![
            Command::new("init", None),
            Command::new("render", Some(json!({ "selector": "#a", "id": "first" }))),
            Command::new("track", Some(json!({ "event": "x" }))),
            Command::new("Render", Some(json!({ "selector": "#b", "id": "second" }))),
            Command::new("render", Some(json!({ "selector": "#c", "id": "third" }))),
        ]);

        drain("_ty", &mut slot, &host).unwrap();

        let ids: Vec<_> = host.mounted().into_iter().map(|m| m.frame.id).collect();
        assert_eq!(ids, ["first", "second", "third"]);

        let handled: Vec<_> = host
            .messages_at(LogLevel::Log)
            .into_iter()
            .filter(|m| m.starts_with("Handling API call"))
            .collect();
        assert_eq!(handled.len(), 4);
        assert!(handled[1].starts_with("Handling API call track"));
        assert!(host.has_level_containing(LogLevel::Error, "Method track is not supported"));
    }

    #[test]
    fn test_dispatch_uses_bound_config() {
        let host = Rc::new(MockHost::new());
        host.add_element(MockElement::new("#w").with_attribute("data-tf-url", "from-attr"));
        let mut slot = queued(vec![
            Command::new("init", Some(json!({ "dataAttributesPrefix": "tf", "debug": true }))),
            Command::new("render", Some(json!({ "selector": "#w", "url": "from-param" }))),
        ]);

        drain("_ty", &mut slot, &host).unwrap();

        assert_eq!(host.mounted()[0].frame.url.as_deref(), Some("from-attr"));
        assert!(host.resize_calls()[0].options.log);
    }

    #[test]
    fn test_missing_method_reported_and_draining_continues() {
        let host = Rc::new(MockHost::with_body());
        let mut slot = queued(vec![
            Command::new("init", None),
            Command::new("", None),
            Command::new("render", None),
        ]);

        drain("_ty", &mut slot, &host).unwrap();

        assert!(host.has_level_containing(LogLevel::Error, "API method required"));
        assert_eq!(host.mounted().len(), 1);
    }

    #[test]
    fn test_live_slot_is_not_drained_again() {
        let host = Rc::new(MockHost::with_body());
        let mut slot = queued(vec![Command::new("init", None), Command::new("render", None)]);
        drain("_ty", &mut slot, &host).unwrap();

        drain("_ty", &mut slot, &host).unwrap();

        assert_eq!(host.mounted().len(), 1);
    }
}
