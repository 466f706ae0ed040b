//! End-to-end load/edit/save scenarios

use crate::*;
use pagekit_document::{Breakpoint, OpaqueValue, PageDocument, Value};
use pagekit_schema::{ComponentSchema, FieldMap, FieldSchema, Schema};
use pretty_assertions::assert_eq;
use serde_json::json;

fn doc(json: serde_json::Value) -> PageDocument {
    serde_json::from_value(json).unwrap()
}

fn schema() -> Schema {
    Schema::new()
        .with_root(
            ComponentSchema::new(FieldMap::new().with("title", FieldSchema::text()))
                .with_default("title", "Untitled"),
        )
        .with_component(
            "Stat",
            ComponentSchema::new(
                FieldMap::new()
                    .with("number", FieldSchema::number())
                    .with("label", FieldSchema::text())
                    .with("series", FieldSchema::atomic_array()),
            )
            .with_default("label", "Total"),
        )
}

fn stat(props: serde_json::Value) -> PageDocument {
    doc(json!({ "content": [ { "type": "Stat", "props": props } ] }))
}

#[test]
fn test_responsive_toggle_off_discards_history() {
    let original = stat(json!({ "id": "Stat-1", "number": { "$xlg": 16, "$sm": 14 } }));
    let edited = stat(json!({ "id": "Stat-1", "number": 15 }));

    let stored = to_storage(
        &original,
        Some(&edited),
        Breakpoint::Xs,
        Some(&schema()),
        &BreakpointModeMap::new(),
    );

    assert_eq!(
        stored.content[0].props.get("number"),
        Some(&Value::from(json!({ "$xlg": 15 })))
    );
}

#[test]
fn test_responsive_toggle_on_keeps_history() {
    let original = stat(json!({ "id": "Stat-1", "number": { "$xlg": 16, "$sm": 14 } }));
    let edited = stat(json!({ "id": "Stat-1", "number": 15 }));
    let modes = BreakpointModeMap::new().with("Stat-1", "number", true);

    let stored = to_storage(&original, Some(&edited), Breakpoint::Xs, Some(&schema()), &modes);

    assert_eq!(
        stored.content[0].props.get("number"),
        Some(&Value::from(json!({ "$xlg": 16, "$sm": 14, "$xs": 15 })))
    );
}

#[test]
fn test_first_responsive_save_seeds_fallback() {
    let original = stat(json!({ "id": "Stat-1", "number": 16 }));
    let edited = stat(json!({ "id": "Stat-1", "number": 15 }));
    let modes = BreakpointModeMap::new().with("Stat-1", "number", true);

    let stored = to_storage(&original, Some(&edited), Breakpoint::Md, Some(&schema()), &modes);

    assert_eq!(
        stored.content[0].props.get("number"),
        Some(&Value::from(json!({ "$xlg": 15, "$md": 15 })))
    );
}

#[test]
fn test_array_is_one_unit() {
    let series = json!([ { "x": 1, "junk": true }, 2, "three" ]);
    let loaded = stat(json!({ "id": "Stat-1", "series": series.clone() }));

    let trimmed = trim(&loaded, &schema());
    assert_eq!(
        trimmed.content[0].props.get("series"),
        Some(&Value::from(series.clone()))
    );

    let modes = BreakpointModeMap::new().with("Stat-1", "series", true);
    let stored = to_storage(&loaded, Some(&trimmed), Breakpoint::Sm, Some(&schema()), &modes);
    assert_eq!(
        stored.content[0].props.get("series"),
        Some(&Value::from(json!({ "$xlg": series })))
    );
}

#[test]
fn test_trim_removes_unknowns() {
    let loaded = stat(json!({ "number": 1, "junk": "y" }));
    let trimmed = trim(&loaded, &schema());

    assert_eq!(trimmed.content[0].props.get("junk"), None);
    assert_eq!(trimmed.content[0].props.get("number"), Some(&Value::from(1)));
}

#[test]
fn test_cleared_field_is_stored_as_undefined() {
    let original = stat(json!({ "id": "Stat-1", "label": { "$xlg": "Visitors" } }));
    let edited = stat(json!({ "id": "Stat-1", "number": 3 }));

    let stored = to_storage(
        &original,
        Some(&edited),
        Breakpoint::Xlg,
        Some(&schema()),
        &BreakpointModeMap::new(),
    );

    let mut expected = pagekit_document::Object::new();
    expected.insert("$xlg".to_string(), Value::Undefined);
    assert_eq!(
        stored.content[0].props.get("label"),
        Some(&Value::Object(expected))
    );
    assert!(stored
        .to_json_pretty()
        .unwrap()
        .contains(r#""$undefined": true"#));
}

#[test]
fn test_missing_document_is_not_sanitized() {
    assert_eq!(sanitize_loaded(None, &schema()), None);

    let loaded = doc(json!({}));
    let clean = sanitize_loaded(Some(&loaded), &schema()).unwrap();
    assert_eq!(clean.root.props.get("title"), Some(&Value::from("Untitled")));
}

#[test]
fn test_load_edit_save_cycle() {
    let stored = doc(json!({
        "root": { "props": { "title": { "$xlg": "Shop", "$xs": "S" } } },
        "content": [
            { "type": "Stat", "props": { "id": "Stat-1", "number": { "$xlg": 10, "$md": 8 } } },
            { "type": "Removed", "props": { "id": "Removed-1" } }
        ],
        "updatedBy": "editor"
    }));
    let modes = BreakpointModeMap::new()
        .with(ROOT_INSTANCE, "title", true)
        .with("Stat-1", "number", true);

    let editing = sanitize(&to_editing(&stored, Breakpoint::Md), &schema());
    assert_eq!(editing.content.len(), 1);
    assert_eq!(editing.content[0].props.get("number"), Some(&Value::from(8)));
    assert_eq!(editing.content[0].props.get("label"), Some(&Value::from("Total")));

    let mut edited = editing.clone();
    edited.content[0]
        .props
        .insert("number".to_string(), Value::from(9));

    let saved = to_storage(&stored, Some(&edited), Breakpoint::Md, Some(&schema()), &modes);

    assert_eq!(
        saved,
        doc(json!({
            "root": { "props": { "title": { "$xlg": "Shop", "$xs": "S", "$md": "Shop" } } },
            "content": [ {
                "type": "Stat",
                "props": {
                    "id": "Stat-1",
                    "number": { "$xlg": 10, "$md": 9 },
                    "label": { "$xlg": "Total" }
                }
            } ],
            "updatedBy": "editor"
        }))
    );
    assert_eq!(to_editing(&saved, Breakpoint::Md).content, edited.content);
}

#[test]
fn test_transforms_leave_inputs_untouched() {
    let leaf = OpaqueValue::new(vec![1u8, 2, 3]);
    let mut stored = stat(json!({
        "id": "Stat-1",
        "number": { "$xlg": 16, "$sm": 14 },
        "junk": { "nested": [1, 2] }
    }));
    stored.content[0]
        .props
        .insert("icon".to_string(), Value::Opaque(leaf.clone()));
    let edited = stat(json!({ "id": "Stat-1", "number": 1 }));
    let modes = BreakpointModeMap::new().with("Stat-1", "number", true);

    let stored_before = stored.clone();
    let edited_before = edited.clone();

    let _ = to_editing(&stored, Breakpoint::Sm);
    let _ = trim(&stored, &schema());
    let _ = extend(&stored, &schema());
    let _ = sanitize(&stored, &schema());
    let _ = to_storage(&stored, Some(&edited), Breakpoint::Sm, Some(&schema()), &modes);

    assert_eq!(stored, stored_before);
    assert_eq!(edited, edited_before);
    let icon = stored.content[0].props["icon"].as_opaque().unwrap();
    assert!(icon.ptr_eq(&leaf));
}
