use crate::error::SchemaResult;
use crate::field::{FieldKind, FieldSchema};
use crate::field_map::FieldMap;
use pagekit_document::{Object, Value, CONTENT_KEY, ROOT_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields and defaults of one component type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub fields: FieldMap,

    #[serde(default)]
    pub default_props: Object,
}

impl ComponentSchema {
    pub fn new(fields: FieldMap) -> Self {
        Self {
            label: None,
            fields,
            default_props: Object::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.fields.insert(name, field);
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_props.insert(name.into(), value.into());
        self
    }

    pub fn with_default_props(mut self, default_props: Object) -> Self {
        self.default_props = default_props;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }
}

/// Resolved schema consumed by normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSchema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<ComponentSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(source: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn with_component(mut self, name: impl Into<String>, component: ComponentSchema) -> Self {
        self.components.insert(name.into(), component);
        self
    }

    pub fn with_root(mut self, root: ComponentSchema) -> Self {
        self.root = Some(root);
        self
    }

    pub fn component(&self, component_type: &str) -> Option<&ComponentSchema> {
        self.components.get(component_type)
    }

    pub fn root(&self) -> Option<&ComponentSchema> {
        self.root.as_ref()
    }

    /// Whether prop `key` of a `component_type` node holds child nodes.
    ///
    /// `content` always does. Other keys must be declared as top-level
    /// `slot` fields; the root is looked up under [`ROOT_TYPE`].
    pub fn is_slot(&self, component_type: &str, key: &str) -> bool {
        if key == CONTENT_KEY {
            return true;
        }
        let component = if component_type == ROOT_TYPE {
            self.root()
        } else {
            self.component(component_type)
        };
        matches!(
            component.and_then(|component| component.field(key)),
            Some(FieldSchema {
                kind: FieldKind::Slot,
                ..
            })
        )
    }

    /// Validate the root and every component schema.
    pub fn validate(&self) -> SchemaResult<()> {
        if let Some(root) = &self.root {
            root.validate()?;
        }
        for component in self.components.values() {
            component.validate()?;
        }
        Ok(())
    }
}
