//! Loading a directory of definition files.
//!
//! Every file is read, parsed and validated as an isolated task in the
//! bounded fan-out pool. A broken or slow file is counted in the report and
//! never aborts its siblings.

use serde::Serialize;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fanout::{run_bounded, BatchReport, FanoutConfig, TaskOutcome};
use crate::metrics::DEFINITION_FILES_LOADED;

use super::{parse_definition, validate_definition, Definition, DefinitionError};

/// Errors that abort a directory load as a whole.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read definitions directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors for a single definition file.
#[derive(Debug, Error)]
pub enum FileLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{}", .0.tag())]
    Definition(#[from] DefinitionError),
}

/// Definitions loaded from a directory, plus per-file outcome counts.
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionCatalog {
    /// Valid definitions, sorted by id.
    pub definitions: Vec<Definition>,
    pub report: BatchReport,
}

impl DefinitionCatalog {
    pub fn get(&self, id: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.id == id)
    }
}

/// Load every `*.yml` / `*.yaml` file in `dir`.
///
/// Only failing to list the directory is an error; per-file failures are
/// reported in [`DefinitionCatalog::report`]. When two files declare the same
/// id, the first file in path order wins and the other is counted as failed.
pub async fn load_definitions(
    dir: &Path,
    config: &FanoutConfig,
) -> Result<DefinitionCatalog, LoadError> {
    let files = list_definition_files(dir)
        .await
        .map_err(|source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

    debug!(dir = %dir.display(), files = files.len(), "Loading indexer definitions");

    let mut outcomes = run_bounded(files, config, |path| async move {
        load_definition_file(&path).await
    })
    .await;
    outcomes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut report = BatchReport::default();
    let mut seen = HashSet::new();
    let mut definitions = Vec::new();

    for (path, outcome) in outcomes {
        let key = path.display().to_string();
        match outcome {
            TaskOutcome::Completed(definition) => {
                if seen.insert(definition.id.clone()) {
                    DEFINITION_FILES_LOADED.with_label_values(&["loaded"]).inc();
                    report.record_success();
                    definitions.push(definition);
                } else {
                    DEFINITION_FILES_LOADED.with_label_values(&["failed"]).inc();
                    warn!(file = %key, id = %definition.id, "Duplicate definition id");
                    report.record_failure(key, format!("duplicate definition id '{}'", definition.id));
                }
            }
            TaskOutcome::Failed(message) => {
                DEFINITION_FILES_LOADED.with_label_values(&["failed"]).inc();
                warn!(file = %key, error = %message, "Failed to load definition");
                report.record_failure(key, message);
            }
            TaskOutcome::TimedOut => {
                DEFINITION_FILES_LOADED.with_label_values(&["timed_out"]).inc();
                warn!(file = %key, "Loading definition timed out");
                report.record_timeout(key);
            }
        }
    }

    definitions.sort_by(|a, b| a.id.cmp(&b.id));

    info!(
        loaded = report.succeeded,
        failed = report.failed,
        timed_out = report.timed_out,
        "Indexer definitions loaded"
    );

    Ok(DefinitionCatalog {
        definitions,
        report,
    })
}

/// Read, parse and validate a single definition file.
pub async fn load_definition_file(path: &Path) -> Result<Definition, FileLoadError> {
    let text = tokio::fs::read_to_string(path).await?;
    let definition = parse_definition(&text)?;
    validate_definition(&definition)?;
    Ok(definition)
}

async fn list_definition_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
            .unwrap_or(false);
        if is_yaml && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::MINIMAL_DEFINITION;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_definition_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("example.yml");
        std::fs::write(&path, MINIMAL_DEFINITION).unwrap();

        let definition = load_definition_file(&path).await.unwrap();
        assert_eq!(definition.id, "examplepublic");
    }

    #[tokio::test]
    async fn test_load_definition_file_reports_tag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yml");
        std::fs::write(&path, "id: broken\n").unwrap();

        let err = load_definition_file(&path).await.unwrap_err();
        assert_eq!(err.to_string(), "missing_search_path");
    }

    #[tokio::test]
    async fn test_missing_directory_is_error() {
        let result = load_definitions(Path::new("/nonexistent/definitions"), &FanoutConfig::default()).await;
        assert!(matches!(result, Err(LoadError::ReadDir { .. })));
    }

    #[tokio::test]
    async fn test_non_yaml_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("readme.md"), "# not a definition").unwrap();
        std::fs::write(dir.path().join("example.yaml"), MINIMAL_DEFINITION).unwrap();

        let catalog = load_definitions(dir.path(), &FanoutConfig::default())
            .await
            .unwrap();
        assert_eq!(catalog.report.total, 1);
        assert_eq!(catalog.definitions.len(), 1);
        assert!(catalog.get("examplepublic").is_some());
    }

    #[tokio::test]
    async fn test_duplicate_ids_keep_first_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.yml"), MINIMAL_DEFINITION).unwrap();
        std::fs::write(dir.path().join("b.yml"), MINIMAL_DEFINITION).unwrap();

        let catalog = load_definitions(dir.path(), &FanoutConfig::default())
            .await
            .unwrap();
        assert_eq!(catalog.definitions.len(), 1);
        assert_eq!(catalog.report.succeeded, 1);
        assert_eq!(catalog.report.failed, 1);
        let (failed_file, message) = catalog.report.errors.iter().next().unwrap();
        assert!(failed_file.ends_with("b.yml"));
        assert!(message.contains("duplicate"));
    }
}
