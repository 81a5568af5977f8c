//! Namespace tree node - one segment of a dotted symbolic path.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Index of a node in the registry's arena.
///
/// Nodes are never removed, so an id stays valid for the life of the
/// registry that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// What a child-segment name resolves to inside its parent.
///
/// A slot that holds an artifact is terminal: it is never replaced and
/// never treated as a namespace again. The variant makes that invariant
/// explicit instead of leaving it to run-time type inspection.
#[derive(Debug)]
pub enum Slot<A> {
    /// A child namespace node.
    Namespace(NodeId),
    /// A loaded artifact cached under this segment name.
    Artifact(Arc<A>),
}

/// One segment of a dotted symbolic path.
///
/// Owns an optional bound directory and the mapping from child-segment
/// name to child node or cached artifact. The parent reference never
/// determines lifetime; it exists for bound-directory inheritance and
/// error messages only.
#[derive(Debug)]
pub struct NamespaceNode<A> {
    pub(super) segment: String,
    pub(super) parent: Option<NodeId>,
    pub(super) directory: Option<PathBuf>,
    pub(super) children: FxHashMap<String, Slot<A>>,
}

impl<A> NamespaceNode<A> {
    pub(super) fn new(segment: &str, parent: Option<NodeId>, directory: Option<PathBuf>) -> Self {
        Self {
            segment: segment.to_string(),
            parent,
            directory,
            children: FxHashMap::default(),
        }
    }

    /// The single path component this node represents.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// The owning node; `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The directory bound to this node, if any.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub(super) fn set_directory(&mut self, directory: PathBuf) {
        self.directory = Some(directory);
    }

    /// Pure lookup of a child namespace.
    ///
    /// Returns `None` when the name is absent or when the slot holds a
    /// loaded artifact: an artifact is not a namespace.
    pub fn child_namespace(&self, name: &str) -> Option<NodeId> {
        match self.children.get(name) {
            Some(Slot::Namespace(id)) => Some(*id),
            _ => None,
        }
    }

    pub(super) fn slot(&self, name: &str) -> Option<&Slot<A>> {
        self.children.get(name)
    }

    /// Number of occupied child slots (namespaces and cached artifacts).
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_namespace_ignores_artifact_slots() {
        let mut node: NamespaceNode<String> = NamespaceNode::new("App", None, None);
        node.children
            .insert("Models".to_string(), Slot::Namespace(NodeId(1)));
        node.children.insert(
            "User".to_string(),
            Slot::Artifact(Arc::new("artifact".to_string())),
        );

        assert_eq!(node.child_namespace("Models"), Some(NodeId(1)));
        assert_eq!(node.child_namespace("User"), None);
        assert_eq!(node.child_namespace("Missing"), None);
        assert_eq!(node.child_count(), 2);
    }
}
