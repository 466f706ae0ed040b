use crate::value::{Object, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// System prop carrying a component instance id.
pub const ID_KEY: &str = "id";

/// Prop holding nested slot content (a list of component nodes).
pub const CONTENT_KEY: &str = "content";

/// Node type the page root is visited under.
pub const ROOT_TYPE: &str = "root";

/// Persisted page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub root: RootData,

    #[serde(default)]
    pub content: Vec<ComponentNode>,

    #[serde(default)]
    pub zones: BTreeMap<String, Vec<ComponentNode>>,

    /// Top-level keys this model does not govern
    #[serde(flatten)]
    pub extra: Object,
}

/// Page root: page-wide props plus the root drop zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootData {
    #[serde(default)]
    pub props: Object,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ComponentNode>,
}

/// One placed component instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(default)]
    pub props: Object,
}

impl PageDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(source: &str) -> crate::DocumentResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_pretty(&self) -> crate::DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every top-level node list: root content, content, then zones by name.
    pub fn node_lists(&self) -> impl Iterator<Item = &Vec<ComponentNode>> {
        std::iter::once(&self.root.content)
            .chain(std::iter::once(&self.content))
            .chain(self.zones.values())
    }
}

impl ComponentNode {
    pub fn new(component_type: impl Into<String>, props: Object) -> Self {
        Self {
            component_type: component_type.into(),
            props,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.props.get(ID_KEY).and_then(Value::as_str)
    }

    /// Rebuild a node from its value form (`{ "type": .., "props": {..} }`).
    pub fn from_value(value: &Value) -> Option<Self> {
        node_parts(value).map(|(component_type, props)| Self::new(component_type, props.clone()))
    }

    pub fn into_value(self) -> Value {
        let mut map = Object::new();
        map.insert("type".to_string(), Value::String(self.component_type));
        map.insert("props".to_string(), Value::Object(self.props));
        Value::Object(map)
    }
}

/// Borrow the type and props of a node held as a value.
///
/// A node-shaped value is an object with a string `type` and, when present,
/// an object `props`.
pub fn node_parts(value: &Value) -> Option<(&str, &Object)> {
    static EMPTY: Object = Object::new();

    let map = value.as_object()?;
    let component_type = map.get("type")?.as_str()?;
    match map.get("props") {
        None => Some((component_type, &EMPTY)),
        Some(Value::Object(props)) => Some((component_type, props)),
        Some(_) => None,
    }
}

/// Read a slot value as a node list.
///
/// Returns `None` unless the value is an array. Elements that are not
/// node-shaped are skipped, so one malformed child never costs its siblings.
pub fn node_list(value: &Value) -> Option<Vec<ComponentNode>> {
    Some(
        value
            .as_array()?
            .iter()
            .filter_map(ComponentNode::from_value)
            .collect(),
    )
}

pub fn nodes_to_value(nodes: Vec<ComponentNode>) -> Value {
    Value::Array(nodes.into_iter().map(ComponentNode::into_value).collect())
}
