//! Resolution error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::loader::LoadError;

/// Errors surfaced by registry registration and resolution walks.
///
/// Missing roots are soft failures (`None`) from pure lookups; every
/// error here aborts the whole call that produced it. There is no
/// partial success and no retry.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The input did not parse as a dotted symbol name.
    #[error("invalid symbol name `{given}`")]
    InvalidName { given: String },

    /// A directory binding could not be interpreted.
    #[error("invalid namespace directory `{given}`")]
    InvalidDirectory { given: String },

    /// An active resolution needed a namespace whose root was never registered.
    #[error("namespace `{namespace}` is not registered")]
    NamespaceNotRegistered { namespace: String },

    /// The owning namespace has no bound directory anywhere up its parent chain.
    #[error("namespace `{namespace}` has no directory binding")]
    UnboundNamespace { namespace: String },

    /// A walk tried to descend through a name already bound to a loaded artifact.
    #[error("`{name}` is bound to a loaded artifact, not a namespace")]
    NotANamespace { name: String },

    /// The requested name resolves to a namespace node, which cannot be loaded.
    #[error("`{name}` names a namespace, not a loadable artifact")]
    IsNamespace { name: String },

    /// Lazy creation probed for a subdirectory that does not exist.
    #[error("namespace directory `{path}` for segment `{segment}` does not exist")]
    DirectoryNotFound { segment: String, path: PathBuf },

    /// The computed artifact file does not exist.
    #[error("artifact file `{path}` does not exist")]
    ArtifactNotFound { path: PathBuf },

    /// The artifact loader failed; its error is passed through unchanged.
    #[error("failed to load `{path}`")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// A filesystem probe failed for a reason other than "not found".
    #[error("IO error while probing `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_attempted_path() {
        let err = ResolveError::DirectoryNotFound {
            segment: "Models".to_string(),
            path: PathBuf::from("/srv/app/Models"),
        };
        let display = format!("{err}");
        assert!(display.contains("/srv/app/Models"));
        assert!(display.contains("Models"));

        let err = ResolveError::ArtifactNotFound {
            path: PathBuf::from("/srv/app/models/User.txt"),
        };
        assert!(format!("{err}").contains("/srv/app/models/User.txt"));
    }
}
