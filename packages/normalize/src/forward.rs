//! Storage form → editing form.

use crate::resolve::resolve;
use pagekit_document::{
    is_multi_breakpoint, Breakpoint, ComponentNode, Object, PageDocument, RootData, Value,
};
use tracing::{debug, instrument};

/// Resolve every multi-breakpoint value in `doc` for the `active` breakpoint.
///
/// The whole tree is rebuilt, including top-level keys outside the node
/// lists. Opaque leaves are the only values shared with the input.
#[instrument(skip(doc), fields(nodes = doc.content.len(), zones = doc.zones.len()))]
pub fn to_editing(doc: &PageDocument, active: Breakpoint) -> PageDocument {
    debug!(breakpoint = %active, "Resolving document for editing");

    PageDocument {
        root: RootData {
            props: resolve_object(&doc.root.props, active),
            content: resolve_nodes(&doc.root.content, active),
        },
        content: resolve_nodes(&doc.content, active),
        zones: doc
            .zones
            .iter()
            .map(|(zone, nodes)| (zone.clone(), resolve_nodes(nodes, active)))
            .collect(),
        extra: resolve_object(&doc.extra, active),
    }
}

/// Resolve a single value, recursing through arrays and objects.
///
/// A resolved branch that is itself an object or array is walked again, so
/// values wrapped twice (an outer per-breakpoint choice holding inner
/// per-field maps) come out fully scalar.
pub fn to_editing_value(value: &Value, active: Breakpoint) -> Value {
    match value {
        Value::Opaque(_) => value.clone(),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| to_editing_value(item, active))
                .collect(),
        ),
        Value::Object(_) if is_multi_breakpoint(value) => {
            to_editing_value(resolve(value, active), active)
        }
        Value::Object(map) => Value::Object(resolve_object(map, active)),
        Value::Undefined
        | Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_) => value.clone(),
    }
}

fn resolve_object(map: &Object, active: Breakpoint) -> Object {
    map.iter()
        .map(|(key, value)| (key.clone(), to_editing_value(value, active)))
        .collect()
}

fn resolve_nodes(nodes: &[ComponentNode], active: Breakpoint) -> Vec<ComponentNode> {
    nodes
        .iter()
        .map(|node| {
            ComponentNode::new(
                node.component_type.clone(),
                resolve_object(&node.props, active),
            )
        })
        .collect()
}
