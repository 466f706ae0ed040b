//! Schema defaulting.

use crate::trim::trim_defaults;
use pagekit_document::{ComponentNode, Object, PageDocument, RootData, Value, CONTENT_KEY};
use pagekit_schema::{ComponentSchema, FieldKind, Schema};
use tracing::instrument;

/// Fill missing props from the schema's `defaultProps` without overwriting
/// anything already present.
///
/// Defaults are first reduced to the fields the schema declares, so a
/// default never brings in anything `trim` would take away again. Nested
/// node lists (`content` and top-level slot fields) are extended with each
/// child's own defaults after the parent's defaults are applied. Nodes with
/// no schema and root props with no root schema are copied unchanged.
#[instrument(skip_all, fields(nodes = doc.content.len(), zones = doc.zones.len()))]
pub fn extend(doc: &PageDocument, schema: &Schema) -> PageDocument {
    let props = match schema.root() {
        Some(root) => extend_props(&doc.root.props, root, schema),
        None => doc.root.props.clone(),
    };

    PageDocument {
        root: RootData {
            props,
            content: extend_nodes(&doc.root.content, schema),
        },
        content: extend_nodes(&doc.content, schema),
        zones: doc
            .zones
            .iter()
            .map(|(zone, nodes)| (zone.clone(), extend_nodes(nodes, schema)))
            .collect(),
        extra: doc.extra.clone(),
    }
}

/// Deep-merge `current` over `default`.
///
/// Per key: an absent or `undefined` current value takes the default;
/// two objects merge recursively; two arrays keep the current array unless
/// it is empty; any other pair keeps the current value.
pub fn merge_defaults(default: &Object, current: &Object) -> Object {
    let mut merged = current.clone();

    for (key, default_value) in default {
        let value = match current.get(key) {
            None | Some(Value::Undefined) => default_value.clone(),
            Some(current_value) => merge_value(default_value, current_value),
        };
        merged.insert(key.clone(), value);
    }

    merged
}

fn merge_value(default: &Value, current: &Value) -> Value {
    match (default, current) {
        (Value::Object(default), Value::Object(current)) => {
            Value::Object(merge_defaults(default, current))
        }
        (Value::Array(default), Value::Array(current)) if current.is_empty() => {
            Value::Array(default.clone())
        }
        _ => current.clone(),
    }
}

fn extend_nodes(nodes: &[ComponentNode], schema: &Schema) -> Vec<ComponentNode> {
    nodes.iter().map(|node| extend_node(node, schema)).collect()
}

fn extend_node(node: &ComponentNode, schema: &Schema) -> ComponentNode {
    match schema.component(&node.component_type) {
        Some(component) => ComponentNode::new(
            node.component_type.clone(),
            extend_props(&node.props, component, schema),
        ),
        None => node.clone(),
    }
}

fn extend_props(props: &Object, component: &ComponentSchema, schema: &Schema) -> Object {
    let defaults = trim_defaults(&component.default_props, &component.fields, schema);
    let mut merged = merge_defaults(&defaults, props);

    for (key, value) in merged.iter_mut() {
        let structural = key == CONTENT_KEY
            || matches!(component.field(key), Some(field) if field.kind == FieldKind::Slot);
        if !structural {
            continue;
        }
        let Value::Array(items) = value else {
            continue;
        };
        for item in items.iter_mut() {
            if let Some(node) = ComponentNode::from_value(item) {
                *item = extend_node(&node, schema).into_value();
            }
        }
    }

    merged
}
