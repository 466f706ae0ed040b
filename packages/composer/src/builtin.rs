use crate::fragment::{FragmentRenderer, RootFragment};
use crate::render::RenderScope;
use pagekit_document::Value;
use pagekit_schema::{FieldMap, FieldSchema};

/// Reserved id of the built-in fragment. Always composed first.
pub const BUILTIN_FRAGMENT_ID: &str = "pagekit";

/// Page-wide fields every composite root carries.
pub fn builtin_fragment() -> RootFragment {
    RootFragment::new(
        BUILTIN_FRAGMENT_ID,
        "Page",
        FieldMap::new()
            .with("title", FieldSchema::text().with_label("Title"))
            .with(
                "description",
                FieldSchema::textarea().with_label("Description"),
            ),
    )
    .with_default("title", "")
    .with_default("description", "")
    .with_renderer(PropsRenderer)
}

/// Renders the built-in fragment as its own props.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropsRenderer;

impl FragmentRenderer for PropsRenderer {
    fn render(&self, scope: &RenderScope<'_>) -> anyhow::Result<Value> {
        Ok(Value::Object(scope.props().clone()))
    }
}
