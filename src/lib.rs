//! nsload - lazy namespace resolution and artifact loading.
//!
//! Maps dot-separated symbol names (`App.Models.User`) onto filesystem
//! locations and loads the artifact found there at most once per process.
//!
//! ```ignore
//! use nsload::{Registry, StringLoader};
//!
//! let mut registry = Registry::new(StringLoader::new("txt"));
//! registry.register_namespace("App.Models", "/srv/app/models")?;
//!
//! // Loads /srv/app/models/User.txt on first call, cached afterwards.
//! let user = registry.require("App.Models.User")?;
//! ```

mod config;
mod core;
mod loader;
pub mod logger;
mod namespace;
mod utils;

pub use config::Manifest;
pub use core::SymbolName;
pub use loader::{ArtifactLoader, FsProbe, LoadError, RealFs, StringLoader};
pub use namespace::{NamespaceNode, NodeId, Registry, ResolveError, Slot};
