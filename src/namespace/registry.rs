//! Registry - the namespace forest and its resolution walks.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::SymbolName;
use crate::debug;
use crate::loader::{ArtifactLoader, FsProbe, RealFs};
use crate::utils::path::{normalize_base, normalize_dir};

use super::error::ResolveError;
use super::node::{NamespaceNode, NodeId, Slot};

/// Owns the forest of namespace nodes and the artifact cache.
///
/// Explicitly constructed and passed to whoever needs name resolution;
/// the crate deliberately exposes no process-wide instance. All walks
/// are synchronous and assume a single logical thread of mutation.
pub struct Registry<L: ArtifactLoader> {
    loader: L,
    probe: Box<dyn FsProbe>,
    nodes: Vec<NamespaceNode<L::Artifact>>,
    roots: FxHashMap<String, NodeId>,
}

impl<L: ArtifactLoader> Registry<L> {
    /// Create an empty registry resolving against the real filesystem.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            probe: Box::new(RealFs),
            nodes: Vec::new(),
            roots: FxHashMap::default(),
        }
    }

    /// Replace the filesystem probe.
    pub fn with_probe(mut self, probe: impl FsProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Access the loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> &NamespaceNode<L::Artifact> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NamespaceNode<L::Artifact> {
        &mut self.nodes[id.0]
    }

    /// Total number of namespace nodes (registered and lazily discovered).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of cached artifacts across the whole tree.
    pub fn cached_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| {
                n.children
                    .values()
                    .filter(|s| matches!(s, Slot::Artifact(_)))
                    .count()
            })
            .sum()
    }

    /// Iterate over root segment names and their nodes.
    pub fn roots(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.roots.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// Reconstruct the fully-qualified dotted name of a node.
    pub fn qualified_name(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let node = self.node(cur);
            segments.push(node.segment.as_str());
            cursor = node.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    /// The directory a node resolves against: its own binding, or the
    /// nearest bound ancestor's directory re-joined with the intermediate
    /// segments. `None` when the whole parent chain is unbound.
    pub fn effective_dir(&self, id: NodeId) -> Option<PathBuf> {
        let node = self.node(id);
        if let Some(dir) = &node.directory {
            return Some(dir.clone());
        }

        let mut suffix = vec![node.segment.as_str()];
        let mut cursor = node.parent;
        while let Some(cur) = cursor {
            let ancestor = self.node(cur);
            if let Some(dir) = &ancestor.directory {
                let mut path = dir.clone();
                for segment in suffix.iter().rev() {
                    path.push(segment);
                }
                return Some(path);
            }
            suffix.push(ancestor.segment.as_str());
            cursor = ancestor.parent;
        }
        None
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a namespace path and bind `directory` to its leaf node.
    ///
    /// Creates any missing nodes along the way (directory left unbound on
    /// intermediates). Re-registering an existing path rebinds the leaf
    /// directory: last write wins, and the tree keeps exactly one node
    /// per path.
    pub fn register_namespace(
        &mut self,
        namespace: &str,
        directory: &str,
    ) -> Result<NodeId, ResolveError> {
        let name = SymbolName::parse(namespace).ok_or_else(|| ResolveError::InvalidName {
            given: namespace.to_string(),
        })?;
        let directory = normalize_dir(directory).ok_or_else(|| ResolveError::InvalidDirectory {
            given: directory.to_string(),
        })?;

        let mut cur = match self.roots.get(name.head()) {
            Some(&id) => id,
            None => self.alloc_root(name.head()),
        };

        for segment in &name.segments()[1..] {
            let existing = match self.node(cur).slot(segment) {
                Some(Slot::Namespace(id)) => Some(*id),
                Some(Slot::Artifact(_)) => {
                    return Err(ResolveError::NotANamespace {
                        name: format!("{}.{segment}", self.qualified_name(cur)),
                    });
                }
                None => None,
            };
            cur = match existing {
                Some(id) => id,
                None => self.alloc_child(cur, segment, None),
            };
        }

        self.node_mut(cur).set_directory(directory);
        Ok(cur)
    }

    /// Register every (namespace, directory) pair. The first failure aborts.
    pub fn register_namespaces<I, N, D>(&mut self, pairs: I) -> Result<(), ResolveError>
    where
        I: IntoIterator<Item = (N, D)>,
        N: AsRef<str>,
        D: AsRef<str>,
    {
        for (namespace, directory) in pairs {
            self.register_namespace(namespace.as_ref(), directory.as_ref())?;
        }
        Ok(())
    }

    // ========================================================================
    // Lookup and lazy creation
    // ========================================================================

    /// Pure lookup with no side effects and no filesystem access.
    ///
    /// `None` as soon as the root or any intermediate segment is missing,
    /// or when a segment resolves to a cached artifact.
    pub fn get_namespace(&self, namespace: &str) -> Option<NodeId> {
        let name = SymbolName::parse(namespace)?;
        self.lookup_segments(name.segments())
    }

    fn lookup_segments(&self, segments: &[String]) -> Option<NodeId> {
        let (head, rest) = segments.split_first()?;
        let mut cur = *self.roots.get(head.as_str())?;
        for segment in rest {
            cur = self.node(cur).child_namespace(segment)?;
        }
        Some(cur)
    }

    /// Lazy-materializing walk.
    ///
    /// Requires the root segment to pre-exist: `Ok(None)` otherwise, with
    /// no filesystem access - lazy creation never invents a root. Missing
    /// non-root segments are probed against the filesystem; a matching
    /// subdirectory materializes a node bound to it, anything else is a
    /// hard error.
    pub fn create_namespace(&mut self, namespace: &str) -> Result<Option<NodeId>, ResolveError> {
        let Some(name) = SymbolName::parse(namespace) else {
            return Ok(None);
        };
        let Some(&root) = self.roots.get(name.head()) else {
            return Ok(None);
        };

        let mut cur = root;
        for segment in &name.segments()[1..] {
            let existing = match self.node(cur).slot(segment) {
                Some(Slot::Namespace(id)) => Some(*id),
                Some(Slot::Artifact(_)) => {
                    return Err(ResolveError::NotANamespace {
                        name: format!("{}.{segment}", self.qualified_name(cur)),
                    });
                }
                None => None,
            };
            if let Some(id) = existing {
                cur = id;
                continue;
            }

            let Some(base) = self.effective_dir(cur) else {
                return Err(ResolveError::UnboundNamespace {
                    namespace: self.qualified_name(cur),
                });
            };
            let candidate = base.join(segment);
            match self.probe.dir_exists(&candidate) {
                Ok(true) => {
                    debug!("resolve"; "materialized namespace {}.{} -> {}",
                        self.qualified_name(cur), segment, candidate.display());
                    cur = self.alloc_child(cur, segment, Some(candidate));
                }
                Ok(false) => {
                    return Err(ResolveError::DirectoryNotFound {
                        segment: segment.clone(),
                        path: candidate,
                    });
                }
                Err(source) => {
                    return Err(ResolveError::Io {
                        path: candidate,
                        source,
                    });
                }
            }
        }
        Ok(Some(cur))
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Resolve a fully-qualified name end-to-end and load its artifact.
    ///
    /// The owning namespace is resolved through [`Self::create_namespace`],
    /// so intermediate directories are discovered on demand. A successful
    /// load is cached on the owning node: a second call for the same name
    /// returns the cached artifact without touching the filesystem or the
    /// loader again.
    pub fn require(&mut self, symbol: &str) -> Result<Arc<L::Artifact>, ResolveError> {
        let name = SymbolName::parse(symbol).ok_or_else(|| ResolveError::InvalidName {
            given: symbol.to_string(),
        })?;
        let namespace = name.namespace_segments();
        if namespace.is_empty() {
            return Err(ResolveError::NamespaceNotRegistered {
                namespace: symbol.to_string(),
            });
        }

        let namespace = namespace.join(".");
        let owner = self
            .create_namespace(&namespace)?
            .ok_or(ResolveError::NamespaceNotRegistered { namespace })?;

        let leaf = name.leaf();
        if let Some(slot) = self.node(owner).slot(leaf) {
            return match slot {
                Slot::Artifact(artifact) => Ok(Arc::clone(artifact)),
                Slot::Namespace(_) => Err(ResolveError::IsNamespace {
                    name: symbol.to_string(),
                }),
            };
        }

        let base = self
            .effective_dir(owner)
            .ok_or_else(|| ResolveError::UnboundNamespace {
                namespace: self.qualified_name(owner),
            })?;
        let candidate = base.join(leaf).with_extension(self.loader.extension());

        match self.probe.file_exists(&candidate) {
            Ok(true) => {}
            Ok(false) => return Err(ResolveError::ArtifactNotFound { path: candidate }),
            Err(source) => {
                return Err(ResolveError::Io {
                    path: candidate,
                    source,
                });
            }
        }

        let artifact = self
            .loader
            .load(&candidate)
            .map(Arc::new)
            .map_err(|source| ResolveError::Load {
                path: candidate.clone(),
                source,
            })?;
        debug!("resolve"; "loaded {} from {}", symbol, candidate.display());

        self.node_mut(owner)
            .children
            .insert(leaf.to_string(), Slot::Artifact(Arc::clone(&artifact)));
        Ok(artifact)
    }

    // ========================================================================
    // Path transform
    // ========================================================================

    /// Best-effort file path for a name, without requiring registration.
    ///
    /// Strips segments off the namespace part until a registered prefix is
    /// found; the stripped segments (in original order) become the mid-path
    /// under that prefix's directory. With no matching prefix the whole
    /// mid-path goes under `base` (default: current working directory).
    ///
    /// Performs no filesystem access and never fails - this is a path
    /// guess, not a resolution.
    pub fn path_for_name(&self, symbol: &str, base: Option<&Path>) -> PathBuf {
        let fallback = || match base {
            Some(dir) => normalize_base(dir),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };

        let Some(name) = SymbolName::parse(symbol) else {
            return fallback();
        };
        let namespace = name.namespace_segments();

        let mut matched = None;
        for len in (1..=namespace.len()).rev() {
            if let Some(id) = self.lookup_segments(&namespace[..len])
                && let Some(dir) = self.effective_dir(id)
            {
                matched = Some((dir, len));
                break;
            }
        }

        let (mut path, mid_start) = matched.unwrap_or_else(|| (fallback(), 0));
        for segment in &namespace[mid_start..] {
            path.push(segment);
        }
        path.push(name.leaf());
        path.set_extension(self.loader.extension());
        path
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Dump the namespace forest for debugging.
    pub fn dump(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();

        writeln!(
            out,
            "=== Namespaces ({} nodes, {} cached) ===",
            self.node_count(),
            self.cached_count()
        )
        .unwrap();

        let mut roots: Vec<_> = self.roots.iter().collect();
        roots.sort_by_key(|(name, _)| name.as_str());
        for (_, &id) in roots {
            self.dump_node(id, 0, &mut out);
        }
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        use std::fmt::Write;
        let node = self.node(id);
        let indent = "  ".repeat(depth);
        match &node.directory {
            Some(dir) => writeln!(out, "{indent}{} -> {}", node.segment, dir.display()).unwrap(),
            None => writeln!(out, "{indent}{}", node.segment).unwrap(),
        }

        let mut children: Vec<_> = node.children.iter().collect();
        children.sort_by_key(|(name, _)| name.as_str());
        for (name, slot) in children {
            match slot {
                Slot::Namespace(child) => self.dump_node(*child, depth + 1, out),
                Slot::Artifact(_) => {
                    writeln!(out, "{}{name} [artifact]", "  ".repeat(depth + 1)).unwrap();
                }
            }
        }
    }

    // ========================================================================
    // Arena
    // ========================================================================

    fn alloc_root(&mut self, segment: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NamespaceNode::new(segment, None, None));
        self.roots.insert(segment.to_string(), id);
        id
    }

    fn alloc_child(&mut self, parent: NodeId, segment: &str, directory: Option<PathBuf>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(NamespaceNode::new(segment, Some(parent), directory));
        self.node_mut(parent)
            .children
            .insert(segment.to_string(), Slot::Namespace(id));
        id
    }
}
