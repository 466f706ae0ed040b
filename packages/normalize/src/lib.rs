//! # Pagekit Normalize
//!
//! Converts page documents between storage form and editing form, and keeps
//! them in line with the current schema.
//!
//! ## Pipeline
//!
//! ```text
//! load:  stored ──to_editing(bp)──▶ scalar ──trim──▶ ──extend──▶ editing
//!                                          └──── sanitize ────┘
//!
//! save:  (stored, edited) ──to_storage(bp, schema, modes)──▶ stored'
//! ```
//!
//! ## Guarantees
//!
//! - Every pass borrows its input and returns a fresh document. Nothing is
//!   mutated in place and no nested array or object is shared with the
//!   input, apart from opaque leaves which are passed by identity.
//! - Every pass is total: unknown component types are dropped, type
//!   mismatches omit the field, malformed breakpoint maps resolve to
//!   `undefined`.
//! - `sanitize` is idempotent.
//! - For a stable mode map, `to_editing(to_storage(s, e, bp, ..), bp) == e`.

mod extend;
mod forward;
mod mode_map;
mod resolve;
mod reverse;
mod sanitize;
mod trim;

#[cfg(test)]
mod tests_scenarios;

pub use extend::{extend, merge_defaults};
pub use forward::{to_editing, to_editing_value};
pub use mode_map::{BreakpointModeMap, ROOT_INSTANCE};
pub use resolve::resolve;
pub use reverse::to_storage;
pub use sanitize::{sanitize, sanitize_loaded};
pub use trim::trim;
