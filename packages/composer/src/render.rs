//! Per-fragment render isolation.

use crate::error::RenderError;
use pagekit_document::{Breakpoint, Object, Value, ID_KEY};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Context shared by every fragment in one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub breakpoint: Breakpoint,
    pub instance_id: String,
    pub is_editing: bool,
    /// Whatever the host editor hands to root renderers
    pub host: Value,
}

impl RenderContext {
    pub fn new(breakpoint: Breakpoint) -> Self {
        Self {
            breakpoint,
            instance_id: "root".to_string(),
            is_editing: false,
            host: Value::Undefined,
        }
    }

    pub fn editing(mut self, is_editing: bool) -> Self {
        self.is_editing = is_editing;
        self
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = instance_id.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<Value>) -> Self {
        self.host = host.into();
        self
    }
}

/// What one fragment sees while rendering: its own namespaced props and the
/// shared context, nothing else.
#[derive(Debug, Clone)]
pub struct RenderScope<'a> {
    fragment_id: &'a str,
    props: Object,
    context: &'a RenderContext,
}

impl<'a> RenderScope<'a> {
    pub(crate) fn new(fragment_id: &'a str, props: Object, context: &'a RenderContext) -> Self {
        Self {
            fragment_id,
            props,
            context,
        }
    }

    pub fn fragment_id(&self) -> &str {
        self.fragment_id
    }

    /// The fragment's own props, without context keys.
    pub fn props(&self) -> &Object {
        &self.props
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.context.breakpoint
    }

    pub fn instance_id(&self) -> &str {
        &self.context.instance_id
    }

    pub fn is_editing(&self) -> bool {
        self.context.is_editing
    }

    pub fn host(&self) -> &Value {
        &self.context.host
    }

    /// Props plus the context keys `breakpoint`, `id`, `isEditing` and
    /// `host`. Context keys win over props of the same name.
    pub fn merged_props(&self) -> Object {
        let mut merged = self.props.clone();
        merged.insert(
            "breakpoint".to_string(),
            Value::from(self.context.breakpoint.name()),
        );
        merged.insert(
            ID_KEY.to_string(),
            Value::from(self.context.instance_id.as_str()),
        );
        merged.insert("isEditing".to_string(), Value::from(self.context.is_editing));
        merged.insert("host".to_string(), self.context.host.clone());
        merged
    }
}

/// Result of rendering one fragment
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentOutput {
    Rendered(Value),
    /// The fragment has no renderer
    Skipped,
    /// The renderer failed and was replaced by an empty fallback
    Fallback(RenderError),
}

impl FragmentOutput {
    pub fn value(&self) -> Option<&Value> {
        match self {
            FragmentOutput::Rendered(value) => Some(value),
            FragmentOutput::Skipped | FragmentOutput::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FragmentOutput::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentOutcome {
    pub fragment_id: String,
    pub output: FragmentOutput,
}

/// Output of one composite render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RootRender {
    /// One entry per fragment, in fragment order
    pub outcomes: Vec<FragmentOutcome>,
    /// Supplementary styles of every fragment, joined in fragment order
    pub global_style: String,
    /// The page body slot, passed through untouched
    pub content: Value,
}

impl RootRender {
    pub fn outcome(&self, fragment_id: &str) -> Option<&FragmentOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.fragment_id == fragment_id)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenderError> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.output {
            FragmentOutput::Fallback(error) => Some(error),
            _ => None,
        })
    }
}

/// Run one fragment callback behind a failure boundary.
///
/// Errors and panics both come back as [`RenderError`].
pub(crate) fn guarded<T>(
    fragment_id: &str,
    callback: impl FnOnce() -> anyhow::Result<T>,
) -> Result<T, RenderError> {
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(RenderError::Failed {
            fragment_id: fragment_id.to_string(),
            message: format!("{:#}", error),
        }),
        Err(payload) => Err(RenderError::Panicked {
            fragment_id: fragment_id.to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
