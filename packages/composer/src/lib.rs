//! # Pagekit Composer
//!
//! Merges independently authored root fragments into one page root.
//!
//! ```text
//! [builtin, f1, f2, f1', ...] ──compose──▶ CompositeRoot
//!                                            ├─ schema: { builtin: {..}, f1: {..}, f2: {..}, content: slot }
//!                                            ├─ rejected: [f1' (duplicate)]
//!                                            └─ render(props, ctx)
//!                                                 ├─ f1 sees props.f1 + ctx only
//!                                                 ├─ f2 sees props.f2 + ctx only
//!                                                 └─ global style = styles joined in order
//! ```
//!
//! Composition is synchronous: fragment definitions and their manifests are
//! resolved by the caller and handed over in a [`ComposeContext`].

mod builtin;
mod compose;
mod error;
mod fragment;
mod render;

pub use builtin::{builtin_fragment, PropsRenderer, BUILTIN_FRAGMENT_ID};
pub use compose::{compose, ComposeContext, Composer, CompositeRoot};
pub use error::{ComposeError, ComposeResult, RejectReason, Rejection, RenderError};
pub use fragment::{FragmentManifest, FragmentRenderer, RootFragment};
pub use render::{
    FragmentOutcome, FragmentOutput, RenderContext, RenderScope, RootRender,
};
