use crate::component::ComponentSchema;
use crate::error::{SchemaError, SchemaResult};
use crate::field::FieldKind;
use crate::field_map::FieldMap;
use pagekit_document::ID_KEY;

/// Deepest object/array nesting a schema may declare.
pub const MAX_FIELD_DEPTH: usize = 32;

impl ComponentSchema {
    /// Check structural rules the type system does not enforce:
    /// - field names are non-empty and contain no `.` (mode map paths are dotted)
    /// - `id` is never declared at the top level
    /// - slots only appear at the top level
    /// - nesting stays within [`MAX_FIELD_DEPTH`]
    pub fn validate(&self) -> SchemaResult<()> {
        if self.fields.contains_key(ID_KEY) {
            return Err(SchemaError::ReservedField {
                path: ID_KEY.to_string(),
            });
        }
        validate_fields(&self.fields, "", 0)
    }
}

fn validate_fields(fields: &FieldMap, prefix: &str, depth: usize) -> SchemaResult<()> {
    if depth > MAX_FIELD_DEPTH {
        return Err(SchemaError::TooDeep {
            path: prefix.to_string(),
            max: MAX_FIELD_DEPTH,
        });
    }

    for (name, field) in fields.iter() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };

        if name.is_empty() {
            return Err(SchemaError::InvalidFieldName {
                path,
                name: name.to_string(),
                reason: "field names cannot be empty".to_string(),
            });
        }
        if name.contains('.') {
            return Err(SchemaError::InvalidFieldName {
                path,
                name: name.to_string(),
                reason: "field names cannot contain '.'".to_string(),
            });
        }

        match &field.kind {
            FieldKind::Slot if depth > 0 => return Err(SchemaError::NestedSlot { path }),
            FieldKind::Object { object_fields } => {
                validate_fields(object_fields, &path, depth + 1)?
            }
            FieldKind::Array {
                array_fields: Some(array_fields),
            } => validate_fields(array_fields, &path, depth + 1)?,
            FieldKind::Primitive { .. }
            | FieldKind::Array { array_fields: None }
            | FieldKind::Slot
            | FieldKind::Divider
            | FieldKind::Hidden => {}
        }
    }

    Ok(())
}
