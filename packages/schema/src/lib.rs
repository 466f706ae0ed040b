//! Component and field schemas.
//!
//! A [`Schema`] maps component type names to [`ComponentSchema`]s and holds
//! the root schema. Each field is a [`FieldSchema`] whose [`FieldKind`]
//! decides how normalization treats its value:
//! - `Primitive`: a leaf; eligible for per-breakpoint storage
//! - `Object`: recursed through `objectFields`
//! - `Array`: recursed through `arrayFields`, or kept atomic without them
//! - `Slot`: a nested list of component nodes
//! - `Divider` / `Hidden`: presentational, never stored per breakpoint
//!
//! Schemas are owned trees, so they cannot contain cycles.
//! [`ComponentSchema::validate`] checks the remaining structural rules.

mod component;
mod error;
mod field;
mod field_map;
mod validate;

pub use component::{ComponentSchema, Schema};
pub use error::{SchemaError, SchemaResult};
pub use field::{FieldKind, FieldSchema};
pub use field_map::FieldMap;
pub use validate::MAX_FIELD_DEPTH;
