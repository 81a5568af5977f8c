//! Namespace forest - mapping dotted symbol names onto the filesystem.
//!
//! This module provides [`Registry`], the tree of namespace nodes and the
//! walks that register, look up, lazily materialize, and load them.
//!
//! # Architecture
//!
//! ```text
//! Symbol names                      Filesystem
//! ============                      ==========
//! App                          ->   /srv/app/
//! App.Models                   ->   /srv/app/models/
//! App.Models.User              ->   /srv/app/models/User.txt  (loaded once)
//! ```
//!
//! # Module Structure
//!
//! - [`node`]: tree node and the tagged child slot (namespace vs artifact)
//! - [`registry`]: registration, lookup, lazy creation, loading
//! - [`error`]: the resolution error taxonomy
//!
//! # Usage
//!
//! ```ignore
//! use nsload::{Registry, StringLoader};
//!
//! let mut registry = Registry::new(StringLoader::new("txt"));
//! registry.register_namespace("App.Models", "/srv/app/models")?;
//!
//! let user = registry.require("App.Models.User")?;
//! let guess = registry.path_for_name("App.Models.Deep.Thing", None);
//! ```

mod error;
mod node;
mod registry;

pub use error::ResolveError;
pub use node::{NamespaceNode, NodeId, Slot};
pub use registry::Registry;
