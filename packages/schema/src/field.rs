use crate::error::SchemaError;
use crate::field_map::FieldMap;
use serde::{Deserialize, Serialize};

/// Shape of a field's value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Leaf value edited by a single control (`text`, `number`, `select`, ...)
    Primitive { control: String },

    /// Nested object with its own declared fields
    Object { object_fields: FieldMap },

    /// List value; without `array_fields` the array is atomic
    Array { array_fields: Option<FieldMap> },

    /// Drop zone holding child component nodes
    Slot,

    /// Visual separator in the editing form
    Divider,

    /// Stored but never shown
    Hidden,
}

/// Declaration of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct FieldSchema {
    pub kind: FieldKind,
    pub label: Option<String>,
    /// Author intent; only primitive kinds honour it
    responsive: bool,
}

impl FieldSchema {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            responsive: true,
        }
    }

    pub fn primitive(control: impl Into<String>) -> Self {
        Self::new(FieldKind::Primitive {
            control: control.into(),
        })
    }

    pub fn text() -> Self {
        Self::primitive("text")
    }

    pub fn textarea() -> Self {
        Self::primitive("textarea")
    }

    pub fn number() -> Self {
        Self::primitive("number")
    }

    pub fn select() -> Self {
        Self::primitive("select")
    }

    pub fn object(object_fields: FieldMap) -> Self {
        Self::new(FieldKind::Object { object_fields })
    }

    /// Array whose object elements are recursed through `array_fields`.
    pub fn array(array_fields: FieldMap) -> Self {
        Self::new(FieldKind::Array {
            array_fields: Some(array_fields),
        })
    }

    /// Array kept and stored as one opaque unit.
    pub fn atomic_array() -> Self {
        Self::new(FieldKind::Array { array_fields: None })
    }

    pub fn slot() -> Self {
        Self::new(FieldKind::Slot)
    }

    pub fn divider() -> Self {
        Self::new(FieldKind::Divider)
    }

    pub fn hidden() -> Self {
        Self::new(FieldKind::Hidden)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Opt a primitive field out of per-breakpoint storage.
    pub fn non_responsive(mut self) -> Self {
        self.responsive = false;
        self
    }

    /// Whether values of this field may be stored per breakpoint.
    ///
    /// Object, array, divider, hidden and slot kinds are never eligible,
    /// whatever the author asked for.
    pub fn responsive_eligible(&self) -> bool {
        match self.kind {
            FieldKind::Primitive { .. } => self.responsive,
            FieldKind::Object { .. }
            | FieldKind::Array { .. }
            | FieldKind::Slot
            | FieldKind::Divider
            | FieldKind::Hidden => false,
        }
    }

    /// Wire name of the field type.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            FieldKind::Primitive { control } => control.as_str(),
            FieldKind::Object { .. } => "object",
            FieldKind::Array { .. } => "array",
            FieldKind::Slot => "slot",
            FieldKind::Divider => "divider",
            FieldKind::Hidden => "hidden",
        }
    }

    /// Child fields for object and structured array kinds.
    pub fn children(&self) -> Option<&FieldMap> {
        match &self.kind {
            FieldKind::Object { object_fields } => Some(object_fields),
            FieldKind::Array { array_fields } => array_fields.as_ref(),
            FieldKind::Primitive { .. }
            | FieldKind::Slot
            | FieldKind::Divider
            | FieldKind::Hidden => None,
        }
    }
}

/// Wire form: `{ "type": "object", "objectFields": {..}, "responsive": false }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(rename = "type")]
    field_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    object_fields: Option<FieldMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    array_fields: Option<FieldMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    responsive: Option<bool>,
}

impl TryFrom<RawField> for FieldSchema {
    type Error = SchemaError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match raw.field_type.as_str() {
            "object" => FieldKind::Object {
                object_fields: raw.object_fields.ok_or(SchemaError::MissingObjectFields)?,
            },
            "array" => FieldKind::Array {
                array_fields: raw.array_fields,
            },
            "slot" => FieldKind::Slot,
            "divider" => FieldKind::Divider,
            "hidden" => FieldKind::Hidden,
            _ => FieldKind::Primitive {
                control: raw.field_type,
            },
        };

        Ok(Self {
            kind,
            label: raw.label,
            responsive: raw.responsive.unwrap_or(true),
        })
    }
}

impl From<FieldSchema> for RawField {
    fn from(field: FieldSchema) -> Self {
        let field_type = field.type_name().to_string();
        let responsive = if field.responsive { None } else { Some(false) };
        let (object_fields, array_fields) = match field.kind {
            FieldKind::Object { object_fields } => (Some(object_fields), None),
            FieldKind::Array { array_fields } => (None, array_fields),
            _ => (None, None),
        };

        Self {
            field_type,
            label: field.label,
            object_fields,
            array_fields,
            responsive,
        }
    }
}
