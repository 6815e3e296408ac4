use std::collections::BTreeSet;

use serde_json::json;
use synthetic_events::events::ConstructionStrategy;
use synthetic_events::{
    create, create_event, EventCatalog, EventKey, EventSynthesizer, Environment, FireEventError,
    PropertyDescriptor, Window,
};

#[test]
fn every_event_type_is_the_lowercase_key() {
    let window = Window::new(Environment::modern());
    let node = window.create_element("div");

    for key in EventKey::ALL {
        let event = create(*key, &node, None).expect("create event");
        assert_eq!(event.event_type(), key.name().to_lowercase(), "{key}");
        assert!(event.is_initialized());
    }
}

#[test]
fn catalog_defaults_become_event_flags() {
    let window = Window::new(Environment::modern());
    let node = window.create_element("button");

    let click = create_event::click(&node, None).expect("click");
    assert_eq!(click.interface(), "MouseEvent");
    assert!(click.bubbles());
    assert!(click.cancelable());
    assert!(click.composed());
    assert_eq!(click.field("button"), Some(&json!(0)));

    let focus = create_event::focus(&node, None).expect("focus");
    assert_eq!(focus.interface(), "FocusEvent");
    assert!(!focus.bubbles());
    assert!(!focus.cancelable());
}

#[test]
fn caller_init_overrides_defaults() {
    let window = Window::new(Environment::modern());
    let node = window.create_element("button");

    let event = create_event::click(&node, Some(json!({"button": 2, "bubbles": false, "detail": 3})))
        .expect("click");
    assert!(!event.bubbles());
    assert!(event.cancelable());
    assert_eq!(event.field("button"), Some(&json!(2)));
    assert_eq!(event.detail(), Some(&json!(3)));
}

#[test]
fn missing_node_is_rejected() {
    let err = create_event::click(None, None).unwrap_err();
    assert_eq!(
        err,
        FireEventError::MissingTarget {
            event_type: "click".to_string()
        }
    );

    let err = create_event::dbl_click(None, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to fire a \"dblClick\" event - please provide a DOM element."
    );
}

#[test]
fn target_value_is_written_before_construction() {
    let window = Window::new(Environment::modern());
    let input = window.create_element("input");

    let event = create_event::change(&input, Some(json!({"target": {"value": "hello"}})))
        .expect("change");
    assert_eq!(input.value().as_deref(), Some("hello"));
    assert!(event.field("target").is_none());
    assert!(event.target().is_none());
}

#[test]
fn target_files_replace_the_read_only_list() {
    let window = Window::new(Environment::modern());
    let input = window.create_element("input");
    input.set_attribute("type", "file");
    let files = json!([{"name": "chucknorris.png", "type": "image/png"}]);

    create_event::change(&input, Some(json!({"target": {"files": files.clone()}}))).expect("change");

    assert_eq!(input.files(), Some(files.clone()));
    assert_eq!(
        input.own_property_descriptor("files"),
        Some(PropertyDescriptor::Data {
            value: files,
            writable: true,
            enumerable: true,
            configurable: true,
        })
    );
}

#[test]
fn other_target_properties_are_assigned() {
    let window = Window::new(Environment::modern());
    let checkbox = window.create_element("input");

    create_event::click(
        &checkbox,
        Some(json!({"target": {"checked": true, "scrollTop": 10}})),
    )
    .expect("click");

    assert_eq!(checkbox.get("checked"), Some(json!(true)));
    assert_eq!(checkbox.get("scrollTop"), Some(json!(10)));
}

#[test]
fn value_on_element_without_setter_fails() {
    let window = Window::new(Environment::modern());
    let div = window.create_element("div");

    let err = create_event::input(&div, Some(json!({"target": {"value": "x"}}))).unwrap_err();
    assert_eq!(err, FireEventError::UnsupportedTarget);
}

#[test]
fn data_transfer_is_native_when_available() {
    let window = Window::new(Environment::modern());
    let zone = window.create_element("div");
    let file = json!({"name": "photo.jpg"});

    let event = create_event::drop(
        &zone,
        Some(json!({"dataTransfer": {"files": [file.clone()], "dropEffect": "copy"}})),
    )
    .expect("drop");

    assert_eq!(event.interface(), "DragEvent");
    let transfer = event.data_transfer().expect("dataTransfer attached");
    assert!(transfer.is_native());
    assert_eq!(transfer.files(), vec![file]);
    assert_eq!(transfer.get("dropEffect"), Some(json!("copy")));
    assert!(event.field("dataTransfer").is_none());
}

#[test]
fn data_transfer_falls_back_to_plain_object() {
    let window = Window::new(Environment::jsdom());
    let zone = window.create_element("div");
    let file = json!({"name": "photo.jpg"});

    let event = create_event::drag_enter(&zone, Some(json!({"dataTransfer": {"files": [file.clone()]}})))
        .expect("dragEnter");

    assert_eq!(event.interface(), "Event");
    let transfer = event.data_transfer().expect("dataTransfer attached");
    assert!(!transfer.is_native());
    assert_eq!(transfer.files(), vec![file.clone()]);
    assert_eq!(event.get("dataTransfer"), Some(json!({"files": [file]})));
}

#[test]
fn non_object_data_transfer_stays_an_init_field() {
    let window = Window::new(Environment::modern());
    let zone = window.create_element("div");

    let event = create_event::drop(&zone, Some(json!({"dataTransfer": null}))).expect("drop");
    assert!(event.data_transfer().is_none());
    assert_eq!(event.field("dataTransfer"), Some(&json!(null)));
}

#[test]
fn legacy_environment_uses_initializer() {
    let window = Window::new(Environment::legacy());
    assert_eq!(
        window.event_builder().strategy(),
        ConstructionStrategy::Legacy
    );
    let input = window.create_element("input");

    let event = create_event::key_down(
        &input,
        Some(json!({"key": "Enter", "detail": 1, "target": {"value": "done"}})),
    )
    .expect("keyDown");

    assert_eq!(event.interface(), "KeyboardEvent");
    assert_eq!(event.event_type(), "keydown");
    assert!(event.bubbles());
    assert!(event.cancelable());
    // `composed` is read-only on legacy events.
    assert!(!event.composed());
    assert_eq!(event.field("key"), Some(&json!("Enter")));
    assert_eq!(event.field("charCode"), Some(&json!(0)));
    assert_eq!(event.detail(), Some(&json!(1)));
    assert_eq!(input.value().as_deref(), Some("done"));
}

#[test]
fn array_data_transfer_is_attached() {
    let window = Window::new(Environment::jsdom());
    let zone = window.create_element("div");

    let event = create_event::drop(&zone, Some(json!({"dataTransfer": ["report.pdf"]})))
        .expect("drop");

    let transfer = event.data_transfer().expect("dataTransfer attached");
    assert_eq!(transfer.get("0"), Some(json!("report.pdf")));
    assert!(event.field("dataTransfer").is_none());
}

#[test]
fn integral_numbers_are_written_without_fraction() {
    let window = Window::new(Environment::modern());
    let input = window.create_element("input");

    create_event::input(&input, Some(json!({"target": {"value": 1.0}}))).expect("input");
    assert_eq!(input.value().as_deref(), Some("1"));

    create_event::input(&input, Some(json!({"target": {"value": 0.25}}))).expect("input");
    assert_eq!(input.value().as_deref(), Some("0.25"));
}

fn environment_exposing(constructors: &[&str]) -> Environment {
    Environment {
        name: "custom".to_string(),
        event_constructors: constructors
            .iter()
            .map(|class| class.to_string())
            .collect::<BTreeSet<_>>(),
        data_transfer: false,
    }
}

#[test]
fn custom_environment_without_generic_event_constructs_exposed_classes() {
    let window = Window::new(environment_exposing(&["MouseEvent"]));
    assert_eq!(
        window.event_builder().strategy(),
        ConstructionStrategy::Direct
    );
    let node = window.create_element("button");

    let click = create_event::click(&node, Some(json!({"composed": true}))).expect("click");
    assert_eq!(click.interface(), "MouseEvent");
    assert!(click.composed());
    assert!(click.bubbles());

    // Neither KeyboardEvent nor Event can be constructed here.
    let key = create_event::key_down(&node, Some(json!({"key": "a"}))).expect("keyDown");
    assert_eq!(key.interface(), "KeyboardEvent");
    assert_eq!(key.event_type(), "keydown");
    assert!(key.is_initialized());
    assert!(key.bubbles());
    assert_eq!(key.field("key"), Some(&json!("a")));
}

#[test]
fn custom_environment_with_only_generic_event() {
    let window = Window::new(environment_exposing(&["Event"]));
    let node = window.create_element("div");

    let event = create_event::mouse_over(&node, None).expect("mouseOver");
    assert_eq!(event.interface(), "Event");
    assert!(event.bubbles());
    assert!(event.composed());
}

#[test]
fn unexposed_classes_construct_generic_events() {
    let window = Window::new(Environment::jsdom());
    let node = window.create_element("div");

    let pointer = create_event::pointer_down(&node, None).expect("pointerDown");
    assert_eq!(pointer.interface(), "Event");
    assert!(pointer.bubbles());

    let mouse = create_event::mouse_down(&node, None).expect("mouseDown");
    assert_eq!(mouse.interface(), "MouseEvent");
}

#[test]
fn repeated_creation_is_identical() {
    let window = Window::new(Environment::modern());
    let input = window.create_element("input");
    let init = json!({"target": {"value": "same"}, "key": "a", "repeat": false});

    let first = create_event::key_press(&input, Some(init.clone())).expect("first");
    let second = create_event::key_press(&input, Some(init)).expect("second");

    assert_eq!(first.event_type(), second.event_type());
    assert_eq!(first.init_fields(), second.init_fields());
    assert_eq!(input.value().as_deref(), Some("same"));
}

#[test]
fn custom_catalog_changes_construction() {
    let contents = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/src/catalog/events.yaml"
    ))
    .expect("read catalog");
    let contents = contents.replace(
        "  submit:\n    class: Event\n    init: { bubbles: true, cancelable: true }",
        "  submit:\n    class: SubmitEvent\n    init: { bubbles: true, cancelable: false }",
    );
    let catalog = EventCatalog::from_yaml_str(&contents).expect("parse catalog");
    let synthesizer = EventSynthesizer::new(&catalog);

    let window = Window::new(Environment::modern());
    let form = window.create_element("form");
    let event = synthesizer
        .create(EventKey::Submit, Some(&form), None)
        .expect("submit");

    // SubmitEvent is not exposed, so the generic class is used.
    assert_eq!(event.interface(), "Event");
    assert!(!event.cancelable());
}
