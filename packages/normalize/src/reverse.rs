//! Editing form → storage form.

use crate::mode_map::{BreakpointModeMap, ROOT_INSTANCE};
use pagekit_document::{
    is_multi_breakpoint, node_list, nodes_to_value, Breakpoint, ComponentNode, NodeRef, Object,
    PageDocument, RootData, Value, CONTENT_KEY, ID_KEY, ROOT_TYPE,
};
use pagekit_schema::{FieldKind, FieldMap, FieldSchema, Schema};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Fold an edited (scalar) document back into the stored document.
///
/// Without an edited document or a schema the original comes back
/// unchanged. Otherwise node lists come from `edited` and every declared
/// leaf is rewritten into per-breakpoint form:
///
/// - responsive off: `{ "$xlg": edited }`, earlier breakpoints discarded
/// - responsive on: the stored map for that instance and path (if any),
///   `$xlg` filled in when missing, then `$<active>` set to the edited value
///
/// Object fields and structured arrays are recursed into and never wrapped
/// themselves. Atomic arrays are wrapped whole. Undeclared props are
/// dropped, and top-level document keys outside root/content/zones are
/// taken from `original`.
#[instrument(skip_all, fields(breakpoint = %active))]
pub fn to_storage(
    original: &PageDocument,
    edited: Option<&PageDocument>,
    active: Breakpoint,
    schema: Option<&Schema>,
    modes: &BreakpointModeMap,
) -> PageDocument {
    let (Some(edited), Some(schema)) = (edited, schema) else {
        debug!("Nothing to fold back; keeping stored document");
        return original.clone();
    };

    let writer = StorageWriter {
        active,
        schema,
        modes,
        originals: index_originals(original, schema),
    };

    let props = match schema.root() {
        Some(root) => writer.store_props(
            ROOT_INSTANCE,
            Some(&original.root.props),
            &edited.root.props,
            &root.fields,
        ),
        None => original.root.props.clone(),
    };

    PageDocument {
        root: RootData {
            props,
            content: writer.store_nodes(&edited.root.content),
        },
        content: writer.store_nodes(&edited.content),
        zones: edited
            .zones
            .iter()
            .map(|(zone, nodes)| (zone.clone(), writer.store_nodes(nodes)))
            .collect(),
        extra: original.extra.clone(),
    }
}

struct StorageWriter<'a> {
    active: Breakpoint,
    schema: &'a Schema,
    modes: &'a BreakpointModeMap,
    /// Stored props of every original instance, nested ones included
    originals: HashMap<&'a str, &'a Object>,
}

impl<'a> StorageWriter<'a> {
    fn store_nodes(&self, nodes: &[ComponentNode]) -> Vec<ComponentNode> {
        nodes
            .iter()
            .filter_map(|node| {
                let Some(component) = self.schema.component(&node.component_type) else {
                    debug!(component_type = %node.component_type, "Dropping node without schema");
                    return None;
                };
                let instance = node.id().unwrap_or_default();
                let previous = node.id().and_then(|id| self.originals.get(id).copied());

                Some(ComponentNode::new(
                    node.component_type.clone(),
                    self.store_props(instance, previous, &node.props, &component.fields),
                ))
            })
            .collect()
    }

    fn store_props(
        &self,
        instance: &str,
        previous: Option<&Object>,
        edited: &Object,
        fields: &FieldMap,
    ) -> Object {
        let mut stored = Object::new();

        if let Some(id) = edited.get(ID_KEY) {
            stored.insert(ID_KEY.to_string(), id.clone());
        }

        let content = edited.get(CONTENT_KEY).and_then(node_list);
        if let Some(children) = &content {
            stored.insert(
                CONTENT_KEY.to_string(),
                nodes_to_value(self.store_nodes(children)),
            );
        }

        for (name, field) in fields.iter() {
            if name == CONTENT_KEY && content.is_some() {
                continue;
            }

            let value = match &field.kind {
                FieldKind::Slot => edited
                    .get(name)
                    .and_then(node_list)
                    .map(|children| nodes_to_value(self.store_nodes(&children))),
                _ => self.store_field(
                    instance,
                    name,
                    previous.and_then(|prev| prev.get(name)),
                    edited.get(name),
                    field,
                ),
            };
            if let Some(value) = value {
                stored.insert(name.to_string(), value);
            }
        }

        stored
    }

    fn store_nested(
        &self,
        instance: &str,
        prefix: &str,
        previous: Option<&Object>,
        edited: &Object,
        fields: &FieldMap,
    ) -> Object {
        fields
            .iter()
            .filter_map(|(name, field)| {
                let path = format!("{}.{}", prefix, name);
                let value = self.store_field(
                    instance,
                    &path,
                    previous.and_then(|prev| prev.get(name)),
                    edited.get(name),
                    field,
                )?;
                Some((name.to_string(), value))
            })
            .collect()
    }

    /// Storage value for one declared field. `None` omits the key.
    fn store_field(
        &self,
        instance: &str,
        path: &str,
        previous: Option<&Value>,
        edited: Option<&Value>,
        field: &FieldSchema,
    ) -> Option<Value> {
        match &field.kind {
            FieldKind::Primitive { .. } => {
                let edited = edited.cloned().unwrap_or(Value::Undefined);
                Some(self.wrap(instance, path, previous, edited, field))
            }
            FieldKind::Array { array_fields: None } => {
                let edited = edited?.clone();
                Some(self.wrap(instance, path, previous, edited, field))
            }
            FieldKind::Object { object_fields } => {
                let edited = edited?.as_object()?;
                Some(Value::Object(self.store_nested(
                    instance,
                    path,
                    previous.and_then(Value::as_object),
                    edited,
                    object_fields,
                )))
            }
            FieldKind::Array {
                array_fields: Some(array_fields),
            } => {
                let items = edited?.as_array()?;
                let previous_items = previous.and_then(Value::as_array);

                let stored = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        Value::Object(item) => {
                            let previous_item = previous_items
                                .and_then(|prev| prev.get(index))
                                .and_then(Value::as_object);
                            Value::Object(self.store_nested(
                                instance,
                                path,
                                previous_item,
                                item,
                                array_fields,
                            ))
                        }
                        other => other.clone(),
                    })
                    .collect();
                Some(Value::Array(stored))
            }
            FieldKind::Divider | FieldKind::Hidden => edited.cloned(),
            FieldKind::Slot => None,
        }
    }

    fn wrap(
        &self,
        instance: &str,
        path: &str,
        previous: Option<&Value>,
        edited: Value,
        field: &FieldSchema,
    ) -> Value {
        let enabled = field.responsive_eligible() && self.modes.is_enabled(instance, path);

        let mut map = match previous {
            Some(prev) if enabled && is_multi_breakpoint(prev) => {
                prev.as_object().cloned().unwrap_or_default()
            }
            _ => Object::new(),
        };

        if enabled {
            map.entry(Breakpoint::FALLBACK.storage_key().to_string())
                .or_insert_with(|| edited.clone());
            map.insert(self.active.storage_key().to_string(), edited);
        } else {
            map.insert(Breakpoint::FALLBACK.storage_key().to_string(), edited);
        }

        Value::Object(map)
    }
}

fn index_originals<'a>(doc: &'a PageDocument, schema: &Schema) -> HashMap<&'a str, &'a Object> {
    let mut index = HashMap::new();

    index_node(&mut index, NodeRef::root(doc), schema);
    for list in doc.node_lists() {
        for node in list {
            index_node(&mut index, node.into(), schema);
        }
    }

    index
}

fn index_node<'a>(index: &mut HashMap<&'a str, &'a Object>, node: NodeRef<'a>, schema: &Schema) {
    if node.component_type != ROOT_TYPE {
        if let Some(id) = node.id() {
            index.entry(id).or_insert(node.props);
        }
    }
    for (_, children) in node.child_lists(|key| schema.is_slot(node.component_type, key)) {
        for child in children {
            index_node(index, child, schema);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_schema::ComponentSchema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(json: serde_json::Value) -> PageDocument {
        serde_json::from_value(json).unwrap()
    }

    fn schema() -> Schema {
        Schema::new()
            .with_root(ComponentSchema::new(
                FieldMap::new().with("title", FieldSchema::text()),
            ))
            .with_component(
                "Card",
                ComponentSchema::new(
                    FieldMap::new()
                        .with("size", FieldSchema::number())
                        .with(
                            "style",
                            FieldSchema::object(
                                FieldMap::new()
                                    .with("color", FieldSchema::text())
                                    .with(
                                        "border",
                                        FieldSchema::object(
                                            FieldMap::new().with("width", FieldSchema::number()),
                                        ),
                                    ),
                            ),
                        )
                        .with(
                            "links",
                            FieldSchema::array(FieldMap::new().with("href", FieldSchema::text())),
                        )
                        .with("divider", FieldSchema::divider())
                        .with("fixed", FieldSchema::number().non_responsive()),
                ),
            )
    }

    #[test]
    fn test_missing_inputs_return_original() {
        let original = doc(json!({
            "content": [ { "type": "Card", "props": { "size": { "$xlg": 1 } } } ]
        }));
        let modes = BreakpointModeMap::new();

        assert_eq!(to_storage(&original, None, Breakpoint::Md, Some(&schema()), &modes), original);
        assert_eq!(to_storage(&original, Some(&original), Breakpoint::Md, None, &modes), original);
    }

    #[test]
    fn test_nested_fields_use_full_dot_path() {
        let original = doc(json!({
            "content": [ {
                "type": "Card",
                "props": {
                    "id": "Card-1",
                    "style": { "border": { "width": { "$xlg": 1, "$md": 2 } } }
                }
            } ]
        }));
        let edited = doc(json!({
            "content": [ {
                "type": "Card",
                "props": {
                    "id": "Card-1",
                    "size": 3,
                    "style": { "color": "red", "border": { "width": 4 } }
                }
            } ]
        }));
        let modes = BreakpointModeMap::new().with("Card-1", "style.border.width", true);

        let stored = to_storage(&original, Some(&edited), Breakpoint::Sm, Some(&schema()), &modes);

        assert_eq!(
            Value::Object(stored.content[0].props.clone()),
            Value::from(json!({
                "id": "Card-1",
                "size": { "$xlg": 3 },
                "fixed": { "$xlg": { "$undefined": true } },
                "style": {
                    "color": { "$xlg": "red" },
                    "border": { "width": { "$xlg": 1, "$md": 2, "$sm": 4 } }
                }
            }))
        );
    }

    #[test]
    fn test_array_elements_share_the_field_path() {
        let original = doc(json!({
            "content": [ {
                "type": "Card",
                "props": {
                    "id": "Card-1",
                    "links": [ { "href": { "$xlg": "/a", "$lg": "/wide" } } ]
                }
            } ]
        }));
        let edited = doc(json!({
            "content": [ {
                "type": "Card",
                "props": { "id": "Card-1", "links": [ { "href": "/b", "rel": "x" }, "raw" ] }
            } ]
        }));
        let modes = BreakpointModeMap::new().with("Card-1", "links.href", true);

        let stored = to_storage(&original, Some(&edited), Breakpoint::Md, Some(&schema()), &modes);

        assert_eq!(
            stored.content[0].props.get("links"),
            Some(&Value::from(json!([
                { "href": { "$xlg": "/a", "$lg": "/wide", "$md": "/b" } },
                "raw"
            ])))
        );
    }

    #[test]
    fn test_non_responsive_fields_ignore_mode_map() {
        let original = doc(json!({
            "content": [
                { "type": "Card", "props": { "id": "Card-1", "fixed": { "$xlg": 1, "$sm": 2 } } }
            ]
        }));
        let edited = doc(json!({
            "content": [
                { "type": "Card", "props": { "id": "Card-1", "fixed": 5, "divider": null } }
            ]
        }));
        let modes = BreakpointModeMap::new().with("Card-1", "fixed", true);

        let stored = to_storage(&original, Some(&edited), Breakpoint::Sm, Some(&schema()), &modes);
        let props = &stored.content[0].props;

        assert_eq!(props.get("fixed"), Some(&Value::from(json!({ "$xlg": 5 }))));
        assert_eq!(props.get("divider"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_object_field_is_omitted() {
        let original = doc(json!({}));
        let edited = doc(json!({
            "content": [ { "type": "Card", "props": { "style": "oops" } } ]
        }));

        let stored = to_storage(
            &original,
            Some(&edited),
            Breakpoint::Xlg,
            Some(&schema()),
            &BreakpointModeMap::new(),
        );
        let props = &stored.content[0].props;

        assert_eq!(props.get("style"), None);
        assert_eq!(props.get("links"), None);
        assert_eq!(
            props.get("size"),
            Some(&Value::from(json!({ "$xlg": { "$undefined": true } })))
        );
    }

    #[test]
    fn test_root_props_and_extra_keys() {
        let original = doc(json!({
            "root": { "props": { "title": { "$xlg": "Home", "$xs": "H" } } },
            "version": 2
        }));
        let edited = doc(json!({ "root": { "props": { "title": "Welcome", "stray": 1 } } }));
        let modes = BreakpointModeMap::new().with(ROOT_INSTANCE, "title", true);

        let stored = to_storage(&original, Some(&edited), Breakpoint::Lg, Some(&schema()), &modes);

        assert_eq!(
            Value::Object(stored.root.props.clone()),
            Value::from(json!({ "title": { "$xlg": "Home", "$xs": "H", "$lg": "Welcome" } }))
        );
        assert_eq!(stored.extra.get("version"), Some(&Value::from(2)));
    }

    #[test]
    fn test_nested_instances_find_their_history() {
        let original = doc(json!({
            "content": [ {
                "type": "Card",
                "props": {
                    "id": "Card-1",
                    "content": [
                        {
                            "type": "Card",
                            "props": { "id": "Card-2", "size": { "$xlg": 10, "$xs": 8 } }
                        }
                    ]
                }
            } ]
        }));
        let edited = doc(json!({
            "content": [ { "type": "Card", "props": { "id": "Card-2", "size": 9 } } ]
        }));
        let modes = BreakpointModeMap::new().with("Card-2", "size", true);

        let stored = to_storage(&original, Some(&edited), Breakpoint::Md, Some(&schema()), &modes);

        assert_eq!(
            stored.content[0].props.get("size"),
            Some(&Value::from(json!({ "$xlg": 10, "$xs": 8, "$md": 9 })))
        );
    }

    #[test]
    fn test_root_content_and_zones_keep_history() {
        let original = doc(json!({
            "root": { "content": [
                { "type": "Card", "props": { "id": "Card-R", "size": { "$xlg": 10, "$sm": 8 } } }
            ] },
            "zones": { "Card-1:aside": [
                { "type": "Card", "props": { "id": "Card-Z", "size": { "$xlg": 20 } } }
            ] }
        }));
        let edited = doc(json!({
            "root": { "content": [
                { "type": "Card", "props": { "id": "Card-R", "size": 7 } },
                { "type": "Legacy", "props": { "id": "Legacy-1" } }
            ] },
            "zones": { "Card-1:aside": [
                { "type": "Legacy", "props": {} },
                { "type": "Card", "props": { "id": "Card-Z", "size": 21 } }
            ] }
        }));
        let modes = BreakpointModeMap::new()
            .with("Card-R", "size", true)
            .with("Card-Z", "size", true);

        let stored = to_storage(&original, Some(&edited), Breakpoint::Md, Some(&schema()), &modes);

        assert_eq!(stored.root.content.len(), 1);
        assert_eq!(
            stored.root.content[0].props.get("size"),
            Some(&Value::from(json!({ "$xlg": 10, "$sm": 8, "$md": 7 })))
        );

        let aside = &stored.zones["Card-1:aside"];
        assert_eq!(aside.len(), 1);
        assert_eq!(aside[0].id(), Some("Card-Z"));
        assert_eq!(
            aside[0].props.get("size"),
            Some(&Value::from(json!({ "$xlg": 20, "$md": 21 })))
        );
    }

    #[test]
    fn test_malformed_children_cost_only_themselves() {
        let original = doc(json!({}));
        let edited = doc(json!({
            "content": [ {
                "type": "Card",
                "props": {
                    "id": "Card-1",
                    "content": [
                        { "type": "Card", "props": { "id": "Card-2", "size": 1 } },
                        "stray",
                        { "type": "Card", "props": null }
                    ]
                }
            } ]
        }));

        let stored = to_storage(
            &original,
            Some(&edited),
            Breakpoint::Xlg,
            Some(&schema()),
            &BreakpointModeMap::new(),
        );

        let children = stored.content[0]
            .props
            .get("content")
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(
            children[0].get("props").and_then(|props| props.get("size")),
            Some(&Value::from(json!({ "$xlg": 1 })))
        );
    }

    #[test]
    fn test_data_arrays_are_not_instance_history() {
        let original = doc(json!({
            "content": [ {
                "type": "Card",
                "props": {
                    "id": "Card-1",
                    "links": [
                        {
                            "type": "Card",
                            "props": { "id": "Card-2", "size": { "$xlg": 5, "$xs": 4 } }
                        }
                    ]
                }
            } ]
        }));
        let edited = doc(json!({
            "content": [ { "type": "Card", "props": { "id": "Card-2", "size": 6 } } ]
        }));
        let modes = BreakpointModeMap::new().with("Card-2", "size", true);

        let stored = to_storage(&original, Some(&edited), Breakpoint::Md, Some(&schema()), &modes);

        assert_eq!(
            stored.content[0].props.get("size"),
            Some(&Value::from(json!({ "$xlg": 6, "$md": 6 })))
        );
    }
}
