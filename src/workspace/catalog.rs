//! Workspace storage scanning
//!
//! The editor keeps one folder per opened workspace:
//! ~/.config/Code/User/workspaceStorage/<hash>/workspace.json
//!
//! Each folder is turned into a [`ProjectEntry`] or a [`SkipReason`]. A bad
//! record never aborts the scan; only failing to list the storage directory
//! itself does.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use walkdir::WalkDir;

use super::folder_uri::{self, FolderRef};
use super::project::{dedup_by_location, ProjectEntry, REMOTE_MARKER};
use super::record::{WorkspaceRecord, WORKSPACE_RECORD_FILE};
use crate::cache::{Clock, SystemClock, TimedCache};
use crate::config;

/// Why a workspace storage folder produced no project
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no workspace.json")]
    NoRecord,

    #[error("unreadable record: {0}")]
    Unreadable(String),

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("record has no folder reference")]
    NoFolder,

    #[error("multi-root workspace: {0}")]
    MultiRootWorkspace(String),

    #[error("unsupported folder reference: {0}")]
    UnsupportedScheme(String),

    #[error("invalid local folder reference: {0}")]
    InvalidLocalPath(String),

    #[error("local folder no longer exists: {}", .0.display())]
    MissingDirectory(PathBuf),
}

/// Result of one uncached pass over workspace storage
#[derive(Debug, Default)]
pub struct WorkspaceScan {
    /// Deduplicated projects, newest first
    pub entries: Vec<ProjectEntry>,

    /// Storage folders that produced no project, in scan order
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

/// Scan a workspace storage directory
///
/// A missing directory is an empty scan. Any other failure to reach or list
/// the directory is an error.
pub fn scan_workspace_storage(storage_dir: &Path) -> Result<WorkspaceScan> {
    let mut scan = WorkspaceScan::default();

    match fs::metadata(storage_dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => anyhow::bail!("Not a directory: {}", storage_dir.display()),
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(scan),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read: {}", storage_dir.display()));
        }
    }

    let mut candidates = Vec::new();

    for entry in WalkDir::new(storage_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 || err.path() == Some(storage_dir) => {
                return Err(err)
                    .with_context(|| format!("Failed to read: {}", storage_dir.display()));
            }
            Err(err) => {
                tracing::debug!("Skipping unreadable storage entry: {}", err);
                continue;
            }
        };

        // Skip non-directory entries
        if !entry.file_type().is_dir() {
            continue;
        }

        let record_dir = entry.path();
        match project_from_record_dir(record_dir) {
            Ok(project) => candidates.push(project),
            Err(SkipReason::NoRecord) => {
                tracing::trace!("{}: {}", record_dir.display(), SkipReason::NoRecord);
                scan.skipped.push((record_dir.to_path_buf(), SkipReason::NoRecord));
            }
            Err(reason) => {
                tracing::debug!("Skipping {}: {}", record_dir.display(), reason);
                scan.skipped.push((record_dir.to_path_buf(), reason));
            }
        }
    }

    scan.entries = dedup_by_location(candidates);
    Ok(scan)
}

/// Build a project from one workspace storage folder
pub fn project_from_record_dir(record_dir: &Path) -> Result<ProjectEntry, SkipReason> {
    let record_path = record_dir.join(WORKSPACE_RECORD_FILE);
    if !record_path.is_file() {
        return Err(SkipReason::NoRecord);
    }

    let record = WorkspaceRecord::read(&record_path)?;

    let folder = match (&record.folder, &record.workspace) {
        (Some(folder), _) => folder,
        (None, Some(workspace)) => return Err(SkipReason::MultiRootWorkspace(workspace.clone())),
        (None, None) => return Err(SkipReason::NoFolder),
    };

    let explicit_time = record
        .timestamp
        .and_then(|ms| UNIX_EPOCH.checked_add(Duration::from_millis(ms)));
    let label = record.display_label();

    match FolderRef::parse(folder)? {
        FolderRef::Local(path) => {
            if !path.is_dir() {
                return Err(SkipReason::MissingDirectory(path));
            }

            let name = match label {
                Some(label) => label.to_string(),
                None => path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            };
            let last_opened = explicit_time
                .or_else(|| modified(&path))
                .or_else(|| modified(record_dir))
                .unwrap_or(UNIX_EPOCH);

            Ok(ProjectEntry {
                name,
                location: path.to_string_lossy().into_owned(),
                is_remote: false,
                remote: None,
                last_opened,
            })
        }
        FolderRef::Remote { uri, remote } => {
            let name = label.unwrap_or_else(|| folder_uri::remote_name(&uri));
            let name = format!("{}{}", name, REMOTE_MARKER);
            let last_opened = explicit_time
                .or_else(|| modified(record_dir))
                .unwrap_or(UNIX_EPOCH);

            Ok(ProjectEntry {
                name,
                location: uri,
                is_remote: true,
                remote,
                last_opened,
            })
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Cached view of the editor's recently opened workspaces
pub struct WorkspaceCatalog {
    storage_dir: PathBuf,
    cache: TimedCache<ProjectEntry>,
}

impl WorkspaceCatalog {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(storage_dir, Arc::new(SystemClock))
    }

    pub fn with_clock(storage_dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            cache: TimedCache::new(clock),
        }
    }

    /// Catalog over the platform's default workspace storage directory
    pub fn from_default_location() -> Result<Self> {
        let storage_dir = config::workspace_storage_dir()
            .context("Failed to determine workspace storage directory")?;
        Ok(Self::new(storage_dir))
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Projects newest first, rescanning at most once per cache window
    ///
    /// Never fails: an unreadable storage directory yields an empty list.
    pub fn load(&self) -> Arc<[ProjectEntry]> {
        self.cache.get_or_refresh(|| {
            match scan_workspace_storage(&self.storage_dir) {
                Ok(scan) => {
                    tracing::info!(
                        "Loaded {} projects from {} ({} folders skipped)",
                        scan.entries.len(),
                        self.storage_dir.display(),
                        scan.skipped.len()
                    );
                    scan.entries
                }
                Err(err) => {
                    tracing::warn!("Workspace scan failed: {:#}", err);
                    Vec::new()
                }
            }
        })
    }

    /// Force the next [`load`](Self::load) to rescan
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }
}
