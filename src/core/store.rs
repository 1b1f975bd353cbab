/// Materials store: JSON materials files in a directory, addressed by
/// identifier.
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::schema::materials::MaterialsSet;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid materials identifier '{0}'")]
    InvalidIdentifier(String),
    #[error("materials '{0}' not found")]
    NotFound(String),
    #[error("IO error reading materials '{id}': {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed materials '{id}': {source}")]
    Json {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Check that `id` names a file directly inside the store root.
///
/// Identifiers are restricted to ASCII letters, digits, `-`, `_` and `.`,
/// and may not contain `..`.
pub fn validate_id(id: &str) -> Result<(), StoreError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if id.is_empty() || id.contains("..") || !id.chars().all(allowed) {
        return Err(StoreError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// Split a comma-separated identifier list, trimming whitespace and
/// dropping empty entries.
pub fn parse_materials_ids(param: &str) -> Vec<String> {
    param
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads materials sets from `<root>/<id>.json`.
#[derive(Debug, Clone)]
pub struct MaterialsStore {
    root: PathBuf,
}

impl MaterialsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file backing `id`. Validates the identifier first.
    pub fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_id(id)?;
        Ok(self.root.join(format!("{id}.json")))
    }

    pub fn load(&self, id: &str) -> Result<MaterialsSet, StoreError> {
        let path = self.path_for(id)?;
        let contents = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(id.to_string())
            } else {
                StoreError::Io {
                    id: id.to_string(),
                    source,
                }
            }
        })?;
        let set = MaterialsSet::from_json(&contents).map_err(|source| StoreError::Json {
            id: id.to_string(),
            source,
        })?;
        debug!(id, path = %path.display(), items = set.items.len(), "loaded materials");
        Ok(set)
    }

    /// Identifiers of every materials file in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let io = |source: std::io::Error| StoreError::Io {
            id: self.root.display().to_string(),
            source,
        };
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io)? {
            let path = entry.map_err(io)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_id(stem).is_ok() {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers() {
        for id in ["swarm-000-base", "fillers_v2", "spray.load.3", "A1"] {
            assert!(validate_id(id).is_ok(), "{id}");
        }
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for id in ["", "..", "../secret", "a/b", "a\\b", "x..y", "name with space", "ü"] {
            assert!(
                matches!(validate_id(id), Err(StoreError::InvalidIdentifier(_))),
                "{id:?} accepted"
            );
        }
    }

    #[test]
    fn parse_ids() {
        assert_eq!(
            parse_materials_ids("swarm-000, swarm-fillers"),
            vec!["swarm-000".to_string(), "swarm-fillers".to_string()]
        );
        assert_eq!(parse_materials_ids("a,,b,"), vec!["a", "b"]);
        assert!(parse_materials_ids(" ").is_empty());
    }

    #[test]
    fn path_stays_under_root() {
        let store = MaterialsStore::new("materials");
        assert_eq!(
            store.path_for("swarm-000").unwrap(),
            Path::new("materials").join("swarm-000.json")
        );
        assert!(store.path_for("../etc/passwd").is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let store = MaterialsStore::new(std::env::temp_dir().join("stimulus-engine-no-such-dir"));
        assert!(matches!(store.load("absent"), Err(StoreError::NotFound(ref id)) if id == "absent"));
    }
}
