use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::schema::Schema;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("schema {0:?} not found")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schema pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("invalid schema document {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of schemas resolved by id (URN).
///
/// Implementations hand out shared, read-only schemas; callers never mutate
/// what they receive.
pub trait SchemaRepository: Send + Sync {
    fn get(&self, id: &str) -> Result<Arc<Schema>, RepositoryError>;
}

/// Schemas held in memory, keyed by id.
#[derive(Debug, Default, Clone)]
pub struct InMemorySchemaRepository {
    schemas: HashMap<String, Arc<Schema>>,
}

impl InMemorySchemaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);
        self.schemas.insert(schema.id.clone(), Arc::clone(&schema));
        schema
    }

    /// Decode one schema JSON document and store it.
    pub fn load_json(&mut self, json: &str) -> Result<Arc<Schema>, RepositoryError> {
        let schema: Schema = serde_json::from_str(json).map_err(|source| RepositoryError::Decode {
            origin: "<inline>".to_string(),
            source,
        })?;
        Ok(self.insert(schema))
    }

    /// Load every schema file matching `pattern`, e.g. `schemas/*.json`.
    /// Returns the number of schemas loaded.
    ///
    /// A pattern without glob characters names one file, which must exist;
    /// a glob that matches nothing loads nothing.
    pub fn load_glob(&mut self, pattern: &str) -> Result<usize, RepositoryError> {
        let paths = resolve_schema_glob(pattern)?;
        for path in &paths {
            self.load_file(path)?;
        }
        Ok(paths.len())
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Arc<Schema>, RepositoryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema: Schema =
            serde_json::from_str(&content).map_err(|source| RepositoryError::Decode {
                origin: path.display().to_string(),
                source,
            })?;
        Ok(self.insert(schema))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn resolve_schema_glob(pattern: &str) -> Result<Vec<PathBuf>, RepositoryError> {
    if !(pattern.contains('*') || pattern.contains('?') || pattern.contains('[')) {
        return Ok(vec![PathBuf::from(pattern)]);
    }
    let mut paths: Vec<PathBuf> = glob::glob(pattern)
        .map_err(|source| RepositoryError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();
    Ok(paths)
}

impl SchemaRepository for InMemorySchemaRepository {
    fn get(&self, id: &str) -> Result<Arc<Schema>, RepositoryError> {
        self.schemas
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}
