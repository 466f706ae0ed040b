use crate::builtin::{builtin_fragment, BUILTIN_FRAGMENT_ID};
use crate::error::{ComposeError, ComposeResult, RejectReason, Rejection};
use crate::fragment::{FragmentManifest, FragmentRenderer, RootFragment};
use crate::render::{
    guarded, FragmentOutcome, FragmentOutput, RenderContext, RenderScope, RootRender,
};
use pagekit_document::{Object, Value, CONTENT_KEY};
use pagekit_schema::{ComponentSchema, FieldMap, FieldSchema, Schema};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Everything one composition needs: the contributed fragments in caller
/// order plus manifests resolved for them, keyed by fragment id.
#[derive(Debug, Clone, Default)]
pub struct ComposeContext {
    fragments: Vec<RootFragment>,
    manifests: HashMap<String, FragmentManifest>,
}

impl ComposeContext {
    pub fn new(fragments: Vec<RootFragment>) -> Self {
        Self {
            fragments,
            manifests: HashMap::new(),
        }
    }

    pub fn with_manifest(
        mut self,
        fragment_id: impl Into<String>,
        manifest: FragmentManifest,
    ) -> Self {
        self.manifests.insert(fragment_id.into(), manifest);
        self
    }

    pub fn fragments(&self) -> &[RootFragment] {
        &self.fragments
    }
}

/// Builds composite roots.
#[derive(Default)]
pub struct Composer {
    builtin_renderer: Option<Arc<dyn FragmentRenderer>>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in fragment's renderer.
    pub fn with_builtin_renderer(mut self, renderer: impl FragmentRenderer + 'static) -> Self {
        self.builtin_renderer = Some(Arc::new(renderer));
        self
    }

    /// Merge the built-in fragment and `context`'s fragments into one root.
    ///
    /// The built-in fragment comes first. Contributed fragments keep caller
    /// order; a fragment whose id is reserved, already accepted, or whose
    /// schema is invalid is rejected with a warning and composition goes on.
    #[instrument(skip_all, fields(fragments = context.fragments.len()))]
    pub fn compose(&self, context: ComposeContext) -> ComposeResult<CompositeRoot> {
        let ComposeContext {
            fragments,
            manifests,
        } = context;

        let mut builtin = builtin_fragment();
        if let Some(renderer) = &self.builtin_renderer {
            builtin = builtin.with_shared_renderer(Arc::clone(renderer));
        }
        if let Some(manifest) = manifests.get(BUILTIN_FRAGMENT_ID) {
            builtin.apply_manifest(manifest);
        }
        builtin
            .schema()
            .validate()
            .map_err(ComposeError::InvalidBuiltin)?;

        let mut accepted = vec![builtin];
        let mut seen: HashSet<String> = HashSet::from([BUILTIN_FRAGMENT_ID.to_string()]);
        let mut rejected = Vec::new();

        for mut fragment in fragments {
            let reason = if fragment.fragment_id.is_empty() || fragment.fragment_id.contains('.') {
                Some(RejectReason::InvalidId(fragment.fragment_id.clone()))
            } else if fragment.fragment_id == CONTENT_KEY {
                Some(RejectReason::ReservedId(fragment.fragment_id.clone()))
            } else if seen.contains(&fragment.fragment_id) {
                Some(RejectReason::Duplicate)
            } else {
                if let Some(manifest) = manifests.get(&fragment.fragment_id) {
                    fragment.apply_manifest(manifest);
                }
                fragment.schema().validate().err().map(RejectReason::InvalidSchema)
            };

            match reason {
                Some(reason) => {
                    warn!(fragment_id = %fragment.fragment_id, %reason, "Rejecting root fragment");
                    rejected.push(Rejection {
                        fragment_id: fragment.fragment_id,
                        reason,
                    });
                }
                None => {
                    debug!(fragment_id = %fragment.fragment_id, "Accepted root fragment");
                    seen.insert(fragment.fragment_id.clone());
                    accepted.push(fragment);
                }
            }
        }

        info!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "Composed root"
        );

        Ok(CompositeRoot::new(accepted, rejected))
    }
}

/// Compose with the default built-in renderer and no manifests.
pub fn compose(fragments: Vec<RootFragment>) -> ComposeResult<CompositeRoot> {
    Composer::new().compose(ComposeContext::new(fragments))
}

/// Root schema and render contract built from accepted fragments
#[derive(Debug, Clone)]
pub struct CompositeRoot {
    fragments: Vec<RootFragment>,
    schema: ComponentSchema,
    rejected: Vec<Rejection>,
}

impl CompositeRoot {
    fn new(fragments: Vec<RootFragment>, rejected: Vec<Rejection>) -> Self {
        let mut fields = FieldMap::new();
        let mut default_props = Object::new();

        for fragment in &fragments {
            fields.insert(
                fragment.fragment_id.clone(),
                FieldSchema::object(fragment.fields.clone())
                    .with_label(fragment.display_name.clone()),
            );
            default_props.insert(
                fragment.fragment_id.clone(),
                Value::Object(fragment.default_props.clone()),
            );
        }
        fields.insert(CONTENT_KEY, FieldSchema::slot());

        Self {
            fragments,
            schema: ComponentSchema::new(fields).with_default_props(default_props),
            rejected,
        }
    }

    /// Accepted fragments, built-in first.
    pub fn fragments(&self) -> &[RootFragment] {
        &self.fragments
    }

    pub fn fragment_ids(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|fragment| fragment.fragment_id.as_str())
    }

    /// One object field per fragment keyed by fragment id, then the
    /// `content` slot.
    pub fn schema(&self) -> &ComponentSchema {
        &self.schema
    }

    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    /// Install this root into a component schema set.
    pub fn attach_to(&self, schema: Schema) -> Schema {
        schema.with_root(self.schema.clone())
    }

    /// Render every fragment against composite root `props`.
    ///
    /// Each fragment gets only its own namespace (`props[fragment_id]`, or
    /// `{}`) plus `context`. A fragment that fails or panics is logged and
    /// replaced by a fallback; its siblings and the content slot still
    /// render.
    #[instrument(skip_all, fields(breakpoint = %context.breakpoint, editing = context.is_editing))]
    pub fn render(&self, props: &Object, context: &RenderContext) -> RootRender {
        let mut outcomes = Vec::with_capacity(self.fragments.len());
        let mut styles = Vec::new();

        for fragment in &self.fragments {
            let fragment_id = fragment.fragment_id.as_str();
            let own_props = props
                .get(fragment_id)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            let scope = RenderScope::new(fragment_id, own_props, context);

            let output = match fragment.renderer() {
                None => FragmentOutput::Skipped,
                Some(renderer) => {
                    match guarded(fragment_id, || renderer.supplementary_style(&scope)) {
                        Ok(Some(style)) if !style.is_empty() => styles.push(style),
                        Ok(_) => {}
                        Err(error) => warn!(fragment_id, %error, "Dropping fragment style"),
                    }

                    match guarded(fragment_id, || renderer.render(&scope)) {
                        Ok(value) => FragmentOutput::Rendered(value),
                        Err(error) => {
                            warn!(fragment_id, %error, "Fragment render failed; using fallback");
                            FragmentOutput::Fallback(error)
                        }
                    }
                }
            };

            outcomes.push(FragmentOutcome {
                fragment_id: fragment_id.to_string(),
                output,
            });
        }

        RootRender {
            outcomes,
            global_style: styles.join("\n"),
            content: props
                .get(CONTENT_KEY)
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
        }
    }
}
