//! Namespace manifest management for `nsload.toml`.
//!
//! A manifest is the declarative counterpart of programmatic
//! registration: a TOML table of dotted namespace paths and the
//! directories they bind to.
//!
//! ```toml
//! [namespaces]
//! "App.Models" = "/srv/app/models"
//! "App.Views" = "~/app/views"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::loader::ArtifactLoader;
use crate::log;
use crate::namespace::{Registry, ResolveError};

/// Root manifest structure representing nsload.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Dotted namespace path -> directory to bind
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    pub fn from_str(content: &str) -> Result<Self> {
        let manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load a manifest from a file, with unknown key detection.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest `{}`", path.display()))?;

        let (manifest, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse manifest `{}`", path.display()))?;

        if !ignored.is_empty() {
            log!(
                "warning";
                "unknown keys in `{}`: {}",
                path.display(),
                ignored.join(", ")
            );
        }

        Ok(manifest)
    }

    /// Parse TOML content, collecting any unknown keys.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let manifest = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((manifest, ignored))
    }

    /// Register every mapping into `registry`. The first failure aborts.
    ///
    /// Directories go through the same normalization as programmatic
    /// registration (tilde expansion, trailing-separator trimming).
    pub fn apply<L: ArtifactLoader>(&self, registry: &mut Registry<L>) -> Result<(), ResolveError> {
        registry.register_namespaces(
            self.namespaces
                .iter()
                .map(|(namespace, directory)| (namespace.as_str(), directory.as_str())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StringLoader;
    use tempfile::TempDir;

    fn registry() -> Registry<StringLoader> {
        Registry::new(StringLoader::new("txt"))
    }

    #[test]
    fn parse_and_apply() {
        let manifest = Manifest::from_str(
            r#"
[namespaces]
"App.Models" = "/srv/app/models"
"App.Views" = "/srv/app/views/"
"#,
        )
        .unwrap();

        let mut reg = registry();
        manifest.apply(&mut reg).unwrap();

        assert!(reg.get_namespace("App.Models").is_some());
        let views = reg.get_namespace("App.Views").unwrap();
        assert_eq!(
            reg.node(views).directory(),
            Some(Path::new("/srv/app/views"))
        );
    }

    #[test]
    fn unknown_keys_are_collected() {
        let (manifest, ignored) = Manifest::parse_with_ignored(
            r#"
typo = 1

[namespaces]
"A" = "/a"
"#,
        )
        .unwrap();

        assert_eq!(manifest.namespaces.len(), 1);
        assert_eq!(ignored, ["typo"]);
    }

    #[test]
    fn load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nsload.toml");
        fs::write(&path, "[namespaces]\n\"App\" = \"/srv/app\"\n").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.namespaces["App"], "/srv/app");
    }

    #[test]
    fn load_missing_file_fails_with_context() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join("nsload.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read manifest"));
    }

    #[test]
    fn apply_rejects_bad_directory() {
        let manifest = Manifest::from_str("[namespaces]\n\"A.B\" = \"\"\n").unwrap();
        let mut reg = registry();
        assert!(matches!(
            manifest.apply(&mut reg).unwrap_err(),
            ResolveError::InvalidDirectory { .. }
        ));
    }
}
