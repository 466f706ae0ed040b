use crate::render::RenderScope;
use pagekit_document::{Object, Value};
use pagekit_schema::{ComponentSchema, FieldMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Render callbacks of one root fragment
///
/// Implementations only ever see their own fragment's props, merged with the
/// shared render context (see [`RenderScope`]).
pub trait FragmentRenderer: Send + Sync {
    fn render(&self, scope: &RenderScope<'_>) -> anyhow::Result<Value>;

    /// Style text injected once per render pass, alongside every other
    /// fragment's.
    fn supplementary_style(&self, _scope: &RenderScope<'_>) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// One independently authored contribution to the page root
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFragment {
    pub fragment_id: String,

    pub display_name: String,

    #[serde(default)]
    pub fields: FieldMap,

    #[serde(default)]
    pub default_props: Object,

    #[serde(skip)]
    renderer: Option<Arc<dyn FragmentRenderer>>,
}

impl RootFragment {
    pub fn new(
        fragment_id: impl Into<String>,
        display_name: impl Into<String>,
        fields: FieldMap,
    ) -> Self {
        Self {
            fragment_id: fragment_id.into(),
            display_name: display_name.into(),
            fields,
            default_props: Object::new(),
            renderer: None,
        }
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_props.insert(name.into(), value.into());
        self
    }

    pub fn with_default_props(mut self, default_props: Object) -> Self {
        self.default_props = default_props;
        self
    }

    pub fn with_renderer(mut self, renderer: impl FragmentRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn with_shared_renderer(mut self, renderer: Arc<dyn FragmentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn renderer(&self) -> Option<&dyn FragmentRenderer> {
        self.renderer.as_deref()
    }

    /// The fragment's fields and defaults as a standalone component schema.
    pub fn schema(&self) -> ComponentSchema {
        ComponentSchema::new(self.fields.clone())
            .with_label(self.display_name.clone())
            .with_default_props(self.default_props.clone())
    }

    pub(crate) fn apply_manifest(&mut self, manifest: &FragmentManifest) {
        if let Some(display_name) = &manifest.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(default_props) = &manifest.default_props {
            self.default_props = default_props.clone();
        }
    }
}

impl fmt::Debug for RootFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootFragment")
            .field("fragment_id", &self.fragment_id)
            .field("display_name", &self.display_name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Metadata resolved for a fragment ahead of composition
///
/// Set values replace the fragment's own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_props: Option<Object>,
}
