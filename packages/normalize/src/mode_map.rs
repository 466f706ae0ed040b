use pagekit_document::{instance_ids_with, PageDocument};
use pagekit_schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Mode map key for the page root.
pub const ROOT_INSTANCE: &str = "root";

/// Per-instance, per-field switch for responsive storage.
///
/// Keys are component instance ids (or [`ROOT_INSTANCE`]) mapping dotted
/// field paths to whether that field keeps one value per breakpoint.
/// Anything not listed is disabled.
///
/// ```json
/// { "root": { "title": true }, "Heading-1": { "style.size": true } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointModeMap {
    instances: BTreeMap<String, BTreeMap<String, bool>>,
}

impl BreakpointModeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, instance: &str, path: &str) -> bool {
        self.instances
            .get(instance)
            .and_then(|fields| fields.get(path))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, instance: impl Into<String>, path: impl Into<String>, enabled: bool) {
        self.instances
            .entry(instance.into())
            .or_default()
            .insert(path.into(), enabled);
    }

    pub fn with(
        mut self,
        instance: impl Into<String>,
        path: impl Into<String>,
        enabled: bool,
    ) -> Self {
        self.set(instance, path, enabled);
        self
    }

    pub fn instance(&self, instance: &str) -> Option<&BTreeMap<String, bool>> {
        self.instances.get(instance)
    }

    /// Forget instances that no longer exist in `doc`, looking through
    /// `content` and the slot fields `schema` declares. The root entry is
    /// always kept.
    pub fn retain_instances(&mut self, doc: &PageDocument, schema: &Schema) {
        let live = instance_ids_with(doc, |component_type, key| {
            schema.is_slot(component_type, key)
        });
        let before = self.instances.len();

        self.instances
            .retain(|id, _| id == ROOT_INSTANCE || live.contains(id));

        let removed = before - self.instances.len();
        if removed > 0 {
            debug!(removed, "Pruned stale mode map instances");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }
}
