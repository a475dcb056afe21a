//! File writing for exported documents.
//!
//! - Resolving the target path inside the output directory
//! - Picking a free name (`name (1).md`) when the file already exists
//! - Overwriting with a `.bak` backup when forced

use crate::utils::error::GuidelinesError;
use std::path::{Path, PathBuf};

/// Options for controlling output file writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Directory the file is written into
    pub output_dir: PathBuf,
    /// Overwrite an existing file instead of choosing a new name
    pub force: bool,
    /// Whether to back up a file before overwriting it
    pub create_backups: bool,
}

impl WriteOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            force: false,
            create_backups: true,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_backups(mut self, create_backups: bool) -> Self {
        self.create_backups = create_backups;
        self
    }
}

/// Result of writing an output file.
#[derive(Debug, Clone)]
pub struct OutputResult {
    /// Path where the file was written
    pub path: PathBuf,
    /// Path to the backup file, if one was made
    pub backup_path: Option<PathBuf>,
    /// Whether an existing file was overwritten
    pub overwritten: bool,
}

/// Write `content` as `filename` inside `options.output_dir`.
pub fn write_document(
    content: &str,
    filename: &str,
    options: &WriteOptions,
) -> Result<OutputResult, GuidelinesError> {
    if !options.output_dir.exists() {
        std::fs::create_dir_all(&options.output_dir).map_err(|e| {
            GuidelinesError::OutputFormat(format!(
                "Failed to create directory {}: {}",
                options.output_dir.display(),
                e
            ))
        })?;
    }

    let requested = options.output_dir.join(filename);
    let mut backup_path = None;
    let mut overwritten = false;

    let path = if !requested.exists() {
        requested
    } else if options.force {
        if options.create_backups {
            backup_path = Some(create_backup(&requested)?);
        }
        overwritten = true;
        requested
    } else {
        next_free_path(&requested)
    };

    std::fs::write(&path, content).map_err(|e| {
        GuidelinesError::OutputFormat(format!("Failed to write {}: {}", path.display(), e))
    })?;

    tracing::info!("Wrote {}", path.display());

    Ok(OutputResult {
        path,
        backup_path,
        overwritten,
    })
}

/// First `stem (n).ext` next to `path` that does not exist yet.
fn next_free_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| path.with_file_name(format!("{} ({}){}", stem, n, extension)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Create a backup of an existing file and return its path.
fn create_backup(path: &Path) -> Result<PathBuf, GuidelinesError> {
    let backup_path = generate_backup_path(path);

    std::fs::copy(path, &backup_path).map_err(|e| {
        GuidelinesError::OutputFormat(format!(
            "Failed to create backup of {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(
        "Created backup: {} -> {}",
        path.display(),
        backup_path.display()
    );

    Ok(backup_path)
}

/// `file.ext` -> `file.ext.bak`
fn generate_backup_path(path: &Path) -> PathBuf {
    let backup_name = format!(
        "{}.bak",
        path.file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
    );

    path.with_file_name(backup_name)
}
