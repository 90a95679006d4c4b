//! Bootstrap integration tests
//!
//! These tests drive the loader the way a host page does: queue calls on a
//! placeholder slot, drain it, then keep calling the installed handler.

use std::rc::Rc;

use serde_json::json;
use tyforms_core::{
    drain, str_to_bool, BootstrapError, Command, InstanceSlot, DEFAULT_INSTANCE_NAME,
};
use tyforms_host_mock::{LogLevel, MockElement, MockHost};

fn page() -> Rc<MockHost> {
    let host = MockHost::with_body();
    host.add_element(
        MockElement::new("#signup")
            .with_attribute("data-ty-url", "https://forms.example/signup")
            .with_attribute("data-ty-max-height", "900"),
    );
    Rc::new(host)
}

// =============================================================================
// Queue Ordering
// =============================================================================

#[test]
fn test_non_init_first_for_any_method() {
    for first in ["render", "RENDER", "close", ""] {
        let host = page();
        let mut slot = InstanceSlot::queue(vec![
            Command::new(first, None),
            Command::new("init", None),
        ]);

        let err = drain("widget", &mut slot, &host).unwrap_err();

        assert_eq!(
            err,
            BootstrapError::InitNotFirst {
                instance: "widget".into()
            }
        );
        assert!(!slot.is_live());
        assert!(host.mounted().is_empty());
    }
}

#[test]
fn test_full_page_bootstrap() {
    let host = page();
    let mut slot = InstanceSlot::queue(vec![
        Command::new("init", Some(json!({ "debug": true }))),
        Command::new("render", Some(json!({ "selector": "#signup", "url": "ignored" }))),
        Command::new("init", Some(json!({ "dataAttributesPrefix": "other" }))),
        Command::new("render", Some(json!({ "id": "footer", "autoResize": "false" }))),
    ]);

    drain(DEFAULT_INSTANCE_NAME, &mut slot, &host).unwrap();

    let mounted = host.mounted();
    assert_eq!(mounted.len(), 2);
    assert_eq!(mounted[0].parent, "#signup");
    assert_eq!(
        mounted[0].frame.url.as_deref(),
        Some("https://forms.example/signup")
    );
    assert_eq!(mounted[1].parent, "body");
    assert_eq!(mounted[1].frame.id, "footer");

    let resizes = host.resize_calls();
    assert_eq!(resizes.len(), 2);
    assert!(resizes[0].options.auto_resize);
    assert_eq!(resizes[0].options.max_height.as_deref(), Some("900"));
    assert!(resizes[0].selector.starts_with("#ty"));
    assert!(!resizes[1].options.auto_resize);
    assert_eq!(resizes[1].selector, "#footer");
    assert!(resizes.iter().all(|call| call.options.log));

    let handler = slot.handler().expect("handler installed");
    assert_eq!(handler.config().data_attributes_prefix(), "ty");
}

// =============================================================================
// Post-bootstrap Calls
// =============================================================================

#[test]
fn test_handler_serves_calls_after_bootstrap() {
    let host = page();
    let mut slot = InstanceSlot::queue(vec![Command::new("init", None)]);
    drain(DEFAULT_INSTANCE_NAME, &mut slot, &host).unwrap();
    let handler = slot.handler().expect("handler installed").clone();

    handler
        .call("render", Some(&json!({ "selector": "#signup" })))
        .unwrap();
    handler
        .call("render", Some(&json!({ "selector": "#absent" })))
        .unwrap();
    handler.call("resize", None).unwrap();
    assert!(handler.call("", None).is_err());

    assert_eq!(host.mounted().len(), 1);
    assert!(host.has_level_containing(LogLevel::Error, "Wrapper element #absent not found"));
    assert!(host.has_level_containing(LogLevel::Error, "Method resize is not supported"));
}

#[test]
fn test_str_to_bool_truth_table() {
    let table = [
        ("undefined", false),
        ("null", false),
        ("0", false),
        ("false", false),
        ("", false),
        ("true", true),
        ("1", true),
        ("yes", true),
        ("anything", true),
    ];
    for (input, expected) in table {
        assert_eq!(str_to_bool(input), expected, "{input:?}");
    }
}
