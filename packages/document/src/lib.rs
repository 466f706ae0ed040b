//! # Pagekit Document
//!
//! In-memory model of a persisted page document.
//!
//! ## Shapes
//!
//! ```text
//! PageDocument
//! ├── root { props, content: [ComponentNode] }
//! ├── content: [ComponentNode]
//! ├── zones: { name → [ComponentNode] }
//! └── extra: unknown top-level keys, kept verbatim
//!
//! ComponentNode { type, props }
//!   props.id       system field, never schema-checked
//!   props.content  nested slot content, itself [ComponentNode]
//! ```
//!
//! Values are held in [`Value`], which keeps `undefined` distinct from
//! `null` and carries pre-rendered leaves as [`OpaqueValue`]s that are shared
//! by identity instead of being cloned.
//!
//! A document exists in two forms:
//! - **storage form**: responsive fields hold `{ "$xlg": .., "$md": .. }` maps
//! - **editing form**: the same fields hold the value for one breakpoint
//!
//! The conversions between the two live in `pagekit-normalize`.

mod breakpoint;
mod codec;
mod error;
mod node;
mod value;
mod visitor;

pub use breakpoint::{breakpoint_keys, is_multi_breakpoint, Breakpoint};
pub use codec::UNDEFINED_SENTINEL;
pub use error::{DocumentError, DocumentResult};
pub use node::{
    node_list, node_parts, nodes_to_value, ComponentNode, PageDocument, RootData, CONTENT_KEY,
    ID_KEY, ROOT_TYPE,
};
pub use value::{Object, OpaqueValue, Value};
pub use visitor::{instance_ids, instance_ids_with, walk_document, walk_node, NodeRef, Visitor};
