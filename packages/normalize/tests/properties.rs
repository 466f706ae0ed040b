//! Property-based tests for the document transforms.
//!
//! - Sanitize is idempotent: sanitize(sanitize(d)) == sanitize(d)
//! - Save then load is lossless: to_editing(to_storage(s, e, bp)) == e
//!   whenever the mode map is the same across both calls

use pagekit_document::{Breakpoint, Object, PageDocument, Value};
use pagekit_normalize::{sanitize, to_editing, to_storage, BreakpointModeMap, ROOT_INSTANCE};
use pagekit_schema::{ComponentSchema, FieldMap, FieldSchema, Schema};
use proptest::prelude::*;
use serde_json::{json, Map, Value as Json};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn scalar_strategy() -> impl Strategy<Value = Json> {
    prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::from),
        (-1000i64..1000).prop_map(Json::from),
        "[a-z]{0,6}".prop_map(Json::from),
    ]
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "title", "style", "color", "size", "label", "items", "tags", "aside", "junk",
    ])
    .prop_map(String::from)
}

fn loose_strategy() -> impl Strategy<Value = Json> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..4)
                .prop_map(|map| Json::Object(map.into_iter().collect())),
        ]
    })
}

fn props_strategy() -> impl Strategy<Value = Map<String, Json>> {
    (
        prop::option::of("[A-Z][a-z]{1,4}-[0-9]"),
        prop::collection::btree_map(key_strategy(), loose_strategy(), 0..5),
    )
        .prop_map(|(id, fields)| {
            let mut props: Map<String, Json> = fields.into_iter().collect();
            if let Some(id) = id {
                props.insert("id".to_string(), Json::from(id));
            }
            props
        })
}

fn component_type_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Card", "Text", "Ghost"])
}

fn node_strategy() -> impl Strategy<Value = Json> {
    let leaf = (component_type_strategy(), props_strategy())
        .prop_map(|(component_type, props)| json!({ "type": component_type, "props": props }));

    leaf.prop_recursive(2, 12, 3, |inner| {
        (
            component_type_strategy(),
            props_strategy(),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(component_type, mut props, children)| {
                props.insert("content".to_string(), Json::Array(children));
                json!({ "type": component_type, "props": props })
            })
    })
}

fn document_strategy() -> impl Strategy<Value = PageDocument> {
    (
        props_strategy(),
        prop::collection::vec(node_strategy(), 0..4),
        prop::collection::vec(node_strategy(), 0..2),
    )
        .prop_map(|(root_props, content, zone)| {
            serde_json::from_value(json!({
                "root": { "props": root_props },
                "content": content,
                "zones": { "Card-1:aside": zone }
            }))
            .unwrap()
        })
}

fn breakpoint_strategy() -> impl Strategy<Value = Breakpoint> {
    prop::sample::select(Breakpoint::ALL.to_vec())
}

/// A previously stored value: plain, per-breakpoint, or missing.
fn stored_strategy() -> impl Strategy<Value = Option<Json>> {
    prop::option::of(prop_oneof![
        scalar_strategy(),
        prop::collection::btree_map(
            breakpoint_strategy().prop_map(|bp| bp.storage_key().to_string()),
            scalar_strategy(),
            0..4,
        )
        .prop_map(|map| Json::Object(map.into_iter().collect())),
    ])
}

// =============================================================================
// SCHEMAS
// =============================================================================

fn object(json: Json) -> Object {
    match Value::from(json) {
        Value::Object(map) => map,
        other => panic!("expected object, got {:?}", other),
    }
}

fn card_fields() -> FieldMap {
    FieldMap::new()
        .with("title", FieldSchema::text())
        .with(
            "style",
            FieldSchema::object(
                FieldMap::new()
                    .with("color", FieldSchema::text())
                    .with("size", FieldSchema::number()),
            ),
        )
        .with(
            "items",
            FieldSchema::array(FieldMap::new().with("label", FieldSchema::text())),
        )
        .with("tags", FieldSchema::atomic_array())
        .with("aside", FieldSchema::slot())
}

fn loose_schema() -> Schema {
    Schema::new()
        .with_root(
            ComponentSchema::new(FieldMap::new().with("title", FieldSchema::text()))
                .with_default("title", "Untitled"),
        )
        .with_component(
            "Card",
            ComponentSchema::new(card_fields())
                .with_default("title", "Card")
                .with_default("style", Value::from(json!({ "color": "red" })))
                .with_default("tags", Value::from(json!(["new"]))),
        )
        .with_component(
            "Text",
            ComponentSchema::new(FieldMap::new().with("label", FieldSchema::textarea()))
                .with_default("label", ""),
        )
}

/// Card defaults carrying more than its fields declare.
fn overfull_schema() -> Schema {
    loose_schema().with_component(
        "Card",
        ComponentSchema::new(card_fields()).with_default_props(object(json!({
            "items": [ { "label": "first", "legacy": true }, "raw" ],
            "style": { "color": "red", "weight": 700 },
            "aside": [
                { "type": "Text", "props": { "label": "hi", "junk": 1 } },
                { "type": "Ghost" },
                "stray"
            ],
            "content": [ { "type": "Text", "props": { "id": "Text-9", "junk": true } } ],
            "theme": "dark"
        }))),
    )
}

fn stat_schema() -> Schema {
    Schema::new()
        .with_root(ComponentSchema::new(
            FieldMap::new().with("title", FieldSchema::text()),
        ))
        .with_component(
            "Stat",
            ComponentSchema::new(
                FieldMap::new()
                    .with("number", FieldSchema::number())
                    .with("label", FieldSchema::text())
                    .with(
                        "style",
                        FieldSchema::object(FieldMap::new().with("color", FieldSchema::text())),
                    ),
            ),
        )
}

// =============================================================================
// SANITIZE
// =============================================================================

proptest! {
    #[test]
    fn sanitize_is_idempotent(doc in document_strategy()) {
        let schema = loose_schema();

        let once = sanitize(&doc, &schema);
        let twice = sanitize(&once, &schema);

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn sanitize_is_idempotent_with_overfull_defaults(doc in document_strategy()) {
        let schema = overfull_schema();

        let once = sanitize(&doc, &schema);
        let twice = sanitize(&once, &schema);

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn sanitize_never_mutates_input(doc in document_strategy()) {
        let before = doc.clone();
        let _ = sanitize(&doc, &loose_schema());
        prop_assert_eq!(doc, before);
    }
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[derive(Debug)]
struct StatCase {
    number: Json,
    label: Json,
    color: Json,
    stored_number: Option<Json>,
    stored_color: Option<Json>,
    responsive: [bool; 3],
}

fn stat_case_strategy() -> impl Strategy<Value = StatCase> {
    (
        (scalar_strategy(), scalar_strategy(), scalar_strategy()),
        (stored_strategy(), stored_strategy()),
        any::<[bool; 3]>(),
    )
        .prop_map(
            |((number, label, color), (stored_number, stored_color), responsive)| StatCase {
                number,
                label,
                color,
                stored_number,
                stored_color,
                responsive,
            },
        )
}

proptest! {
    #[test]
    fn storage_round_trips_to_editing(
        cases in prop::collection::vec(stat_case_strategy(), 1..4),
        title in scalar_strategy(),
        root_responsive in any::<bool>(),
        active in breakpoint_strategy(),
    ) {
        let mut modes = BreakpointModeMap::new().with(ROOT_INSTANCE, "title", root_responsive);
        let mut stored_nodes = Vec::new();
        let mut edited_nodes = Vec::new();

        for (index, case) in cases.iter().enumerate() {
            let id = format!("Stat-{}", index);
            modes.set(id.as_str(), "number", case.responsive[0]);
            modes.set(id.as_str(), "label", case.responsive[1]);
            modes.set(id.as_str(), "style.color", case.responsive[2]);

            let mut stored_props = Map::new();
            stored_props.insert("id".to_string(), Json::from(id.clone()));
            if let Some(number) = &case.stored_number {
                stored_props.insert("number".to_string(), number.clone());
            }
            if let Some(color) = &case.stored_color {
                stored_props.insert("style".to_string(), json!({ "color": color }));
            }
            stored_nodes.push(json!({ "type": "Stat", "props": stored_props }));

            edited_nodes.push(json!({
                "type": "Stat",
                "props": {
                    "id": id,
                    "number": case.number,
                    "label": case.label,
                    "style": { "color": case.color }
                }
            }));
        }

        let stored: PageDocument = serde_json::from_value(json!({
            "root": { "props": { "title": { "$xlg": "Old", "$sm": "Small" } } },
            "content": stored_nodes
        }))
        .unwrap();
        let edited: PageDocument = serde_json::from_value(json!({
            "root": { "props": { "title": title } },
            "content": edited_nodes
        }))
        .unwrap();

        let schema = stat_schema();
        let saved = to_storage(&stored, Some(&edited), active, Some(&schema), &modes);

        prop_assert_eq!(to_editing(&saved, active), edited);
    }
}
