//! Schema trimming: drop everything the schema does not declare.

use pagekit_document::{
    node_list, nodes_to_value, ComponentNode, Object, PageDocument, RootData, Value, CONTENT_KEY,
    ID_KEY,
};
use pagekit_schema::{FieldKind, FieldMap, FieldSchema, Schema};
use tracing::{debug, instrument};

/// Rebuild `doc` keeping only what `schema` declares.
///
/// - nodes whose type has no schema are dropped
/// - `props.id` always survives
/// - undeclared props are dropped at every level
/// - `content` node lists (and top-level slot fields) are trimmed as nodes
/// - root props are trimmed against the root schema, or emptied without one
///
/// Top-level document keys outside root/content/zones are kept as they are.
#[instrument(skip_all, fields(nodes = doc.content.len(), zones = doc.zones.len()))]
pub fn trim(doc: &PageDocument, schema: &Schema) -> PageDocument {
    let props = match schema.root() {
        Some(root) => trim_props(&doc.root.props, &root.fields, schema),
        None => {
            debug!("No root schema; clearing root props");
            Object::new()
        }
    };

    PageDocument {
        root: RootData {
            props,
            content: trim_nodes(&doc.root.content, schema),
        },
        content: trim_nodes(&doc.content, schema),
        zones: doc
            .zones
            .iter()
            .map(|(zone, nodes)| (zone.clone(), trim_nodes(nodes, schema)))
            .collect(),
        extra: doc.extra.clone(),
    }
}

fn trim_nodes(nodes: &[ComponentNode], schema: &Schema) -> Vec<ComponentNode> {
    nodes
        .iter()
        .filter_map(|node| trim_node(node, schema))
        .collect()
}

fn trim_node(node: &ComponentNode, schema: &Schema) -> Option<ComponentNode> {
    let Some(component) = schema.component(&node.component_type) else {
        debug!(
            component_type = %node.component_type,
            id = ?node.id(),
            "Dropping node without schema"
        );
        return None;
    };

    Some(ComponentNode::new(
        node.component_type.clone(),
        trim_props(&node.props, &component.fields, schema),
    ))
}

/// Top-level props of a node or of the root.
fn trim_props(props: &Object, fields: &FieldMap, schema: &Schema) -> Object {
    let mut trimmed = Object::new();

    if let Some(id) = props.get(ID_KEY) {
        trimmed.insert(ID_KEY.to_string(), id.clone());
    }

    // Nested content is structural, declared or not
    let content_nodes = props.get(CONTENT_KEY).and_then(node_list);
    if let Some(nodes) = &content_nodes {
        trimmed.insert(
            CONTENT_KEY.to_string(),
            nodes_to_value(trim_nodes(nodes, schema)),
        );
    }

    for (name, field) in fields.iter() {
        if name == CONTENT_KEY && content_nodes.is_some() {
            continue;
        }
        let Some(value) = props.get(name) else {
            continue;
        };

        let kept = match &field.kind {
            FieldKind::Slot => {
                node_list(value).map(|nodes| nodes_to_value(trim_nodes(&nodes, schema)))
            }
            _ => trim_field(value, field),
        };
        if let Some(kept) = kept {
            trimmed.insert(name.to_string(), kept);
        }
    }

    trimmed
}

/// Reduce `defaults` to what trimming would keep of them.
///
/// Declared fields and node lists are trimmed the way document props are.
/// Undeclared keys come back unchanged: trimming drops them from a document
/// and defaulting puts the same value back.
pub(crate) fn trim_defaults(defaults: &Object, fields: &FieldMap, schema: &Schema) -> Object {
    defaults
        .iter()
        .filter_map(|(key, value)| {
            let structural = key == CONTENT_KEY || schema_slot(fields, key);
            let kept = match (structural, fields.get(key)) {
                (true, field) => match node_list(value) {
                    Some(nodes) => Some(nodes_to_value(trim_nodes(&nodes, schema))),
                    None => field.and_then(|field| trim_field(value, field)),
                },
                (false, Some(field)) => trim_field(value, field),
                (false, None) => Some(value.clone()),
            };
            kept.map(|kept| (key.clone(), kept))
        })
        .collect()
}

fn schema_slot(fields: &FieldMap, key: &str) -> bool {
    matches!(fields.get(key), Some(field) if field.kind == FieldKind::Slot)
}

/// Trim one declared value. `None` means the key is omitted.
fn trim_field(value: &Value, field: &FieldSchema) -> Option<Value> {
    match &field.kind {
        FieldKind::Primitive { .. }
        | FieldKind::Divider
        | FieldKind::Hidden
        | FieldKind::Array { array_fields: None } => Some(value.clone()),
        FieldKind::Object { object_fields } => value
            .as_object()
            .map(|map| Value::Object(trim_nested(map, object_fields))),
        FieldKind::Array {
            array_fields: Some(array_fields),
        } => value.as_array().map(|items| {
            Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(map) => Value::Object(trim_nested(map, array_fields)),
                        other => other.clone(),
                    })
                    .collect(),
            )
        }),
        // Slots below the top level carry no data
        FieldKind::Slot => None,
    }
}

fn trim_nested(map: &Object, fields: &FieldMap) -> Object {
    fields
        .iter()
        .filter_map(|(name, field)| {
            let value = map.get(name)?;
            trim_field(value, field).map(|kept| (name.to_string(), kept))
        })
        .collect()
}
