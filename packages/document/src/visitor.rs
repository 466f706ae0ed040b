use crate::node::{node_parts, ComponentNode, PageDocument, CONTENT_KEY, ID_KEY, ROOT_TYPE};
use crate::value::{Object, Value};
use std::collections::BTreeSet;

/// Borrowed view of a component node, whether it sits in a top-level list
/// or inside a parent's props.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRef<'a> {
    pub component_type: &'a str,
    pub props: &'a Object,
}

impl<'a> NodeRef<'a> {
    /// View of the page root, visited as a node of type [`ROOT_TYPE`].
    pub fn root(doc: &'a PageDocument) -> Self {
        Self {
            component_type: ROOT_TYPE,
            props: &doc.root.props,
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.props.get(ID_KEY).and_then(Value::as_str)
    }

    /// Nested node lists held in props, keyed by prop name.
    ///
    /// Only array props whose key `is_slot` accepts are read as children.
    /// Elements that are not node-shaped are skipped.
    pub fn child_lists<F>(&self, is_slot: F) -> impl Iterator<Item = (&'a str, Vec<NodeRef<'a>>)>
    where
        F: Fn(&str) -> bool,
    {
        self.props.iter().filter_map(move |(key, value)| {
            if !is_slot(key.as_str()) {
                return None;
            }
            let children = value
                .as_array()?
                .iter()
                .filter_map(|item| {
                    node_parts(item).map(|(component_type, props)| NodeRef {
                        component_type,
                        props,
                    })
                })
                .collect();
            Some((key.as_str(), children))
        })
    }
}

impl<'a> From<&'a ComponentNode> for NodeRef<'a> {
    fn from(node: &'a ComponentNode) -> Self {
        Self {
            component_type: &node.component_type,
            props: &node.props,
        }
    }
}

/// Read-only traversal over every component node of a document
///
/// Override `visit_node` and call `walk_node` to keep descending into
/// nested slot content. `is_slot` decides which props hold child nodes;
/// by default only `content` does.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &PageDocument) {
        walk_document(self, doc);
    }

    fn visit_root_props(&mut self, _props: &Object) {
        // Root props hold no nodes outside slots
    }

    fn visit_node(&mut self, node: NodeRef<'_>) {
        walk_node(self, node);
    }

    fn is_slot(&self, _component_type: &str, key: &str) -> bool {
        key == CONTENT_KEY
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &PageDocument) {
    visitor.visit_root_props(&doc.root.props);
    walk_node(visitor, NodeRef::root(doc));
    for list in doc.node_lists() {
        for node in list {
            visitor.visit_node(node.into());
        }
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: NodeRef<'_>) {
    let lists: Vec<_> = node
        .child_lists(|key| visitor.is_slot(node.component_type, key))
        .collect();
    for (_, children) in lists {
        for child in children {
            visitor.visit_node(child);
        }
    }
}

struct InstanceIdCollector<F> {
    ids: BTreeSet<String>,
    is_slot: F,
}

impl<F: Fn(&str, &str) -> bool> Visitor for InstanceIdCollector<F> {
    fn visit_node(&mut self, node: NodeRef<'_>) {
        if let Some(id) = node.id() {
            self.ids.insert(id.to_string());
        }
        walk_node(self, node);
    }

    fn is_slot(&self, component_type: &str, key: &str) -> bool {
        (self.is_slot)(component_type, key)
    }
}

/// Ids of every component instance in a document, including nodes nested
/// in `content`.
pub fn instance_ids(doc: &PageDocument) -> BTreeSet<String> {
    instance_ids_with(doc, |_, key| key == CONTENT_KEY)
}

/// Like [`instance_ids`], descending into every prop `is_slot` accepts for
/// a node type.
pub fn instance_ids_with<F>(doc: &PageDocument, is_slot: F) -> BTreeSet<String>
where
    F: Fn(&str, &str) -> bool,
{
    let mut collector = InstanceIdCollector {
        ids: BTreeSet::new(),
        is_slot,
    };
    collector.visit_document(doc);
    collector.ids
}
