//! Per-run output directories.
//!
//! Every batch writes into `<output_root>/<run_id>/`; archives are looked up
//! by run id.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::archive::ARCHIVE_FILE_NAME;
use crate::{FolioError, Result};

/// Identifier of one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a fresh random run id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a run id from its textual form.
    pub fn parse(value: &str) -> Result<Self> {
        Uuid::parse_str(value.trim()).map(Self).map_err(|_| FolioError::RunNotFound(value.to_string()))
    }

    /// Directory holding this run's files under `root`.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(self.to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RunId {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Creates the run directory (and `root` if needed).
///
/// Failure here is fatal for a batch and is reported as [`FolioError::OutputDir`].
pub fn create_run_dir(root: &Path, run_id: &RunId) -> Result<PathBuf> {
    let dir = run_id.dir(root);
    fs::create_dir_all(&dir).map_err(|source| FolioError::OutputDir { path: dir.clone(), source })?;
    Ok(dir)
}

/// Resolves the archive produced by `run_id`.
///
/// # Errors
///
/// Returns [`FolioError::RunNotFound`] when the run or its archive does not exist.
pub fn locate_archive(root: &Path, run_id: &RunId) -> Result<PathBuf> {
    let path = run_id.dir(root).join(ARCHIVE_FILE_NAME);
    if path.is_file() { Ok(path) } else { Err(FolioError::RunNotFound(run_id.to_string())) }
}

/// Deletes the oldest finished runs so that at most `keep` remain.
///
/// A run counts as finished once its archive exists, and runs are ordered by
/// the archive's modification time. Directories without an archive belong to
/// batches still in progress and are never removed, nor is anything under
/// `root` that is not named by a valid run id. Returns the number of runs
/// removed.
pub fn prune_runs(root: &Path, keep: usize) -> Result<usize> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut runs = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        let is_run = path.is_dir()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| Uuid::parse_str(n).is_ok());
        if !is_run {
            continue;
        }

        let archive = path.join(ARCHIVE_FILE_NAME);
        let finished = match fs::metadata(&archive) {
            Ok(meta) if meta.is_file() => meta.modified()?,
            Ok(_) => continue,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };
        runs.push((finished, path));
    }

    if runs.len() <= keep {
        return Ok(0);
    }

    runs.sort_by(|a, b| b.0.cmp(&a.0));
    let stale = runs.split_off(keep);
    for (_, path) in &stale {
        tracing::debug!(run = %path.display(), "removing old run");
        fs::remove_dir_all(path)?;
    }

    Ok(stale.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_run_id_round_trip_text() {
        let id = RunId::new();
        let parsed: RunId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_run_id_rejects_garbage() {
        assert!(matches!(RunId::parse("../etc"), Err(FolioError::RunNotFound(_))));
    }

    #[test]
    fn test_create_and_locate() {
        let tmp = TempDir::new().unwrap();
        let id = RunId::new();
        let dir = create_run_dir(tmp.path(), &id).unwrap();
        assert!(dir.is_dir());

        assert!(matches!(locate_archive(tmp.path(), &id), Err(FolioError::RunNotFound(_))));

        fs::write(dir.join(ARCHIVE_FILE_NAME), b"zip").unwrap();
        assert_eq!(locate_archive(tmp.path(), &id).unwrap(), dir.join(ARCHIVE_FILE_NAME));
    }

    #[test]
    fn test_create_run_dir_fails_under_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();

        let result = create_run_dir(&blocker, &RunId::new());
        assert!(matches!(result, Err(FolioError::OutputDir { .. })));
    }

    fn finished_run(root: &Path, finished: SystemTime) -> RunId {
        let id = RunId::new();
        let dir = create_run_dir(root, &id).unwrap();
        let archive = fs::File::create(dir.join(ARCHIVE_FILE_NAME)).unwrap();
        archive.set_modified(finished).unwrap();
        id
    }

    #[test]
    fn test_prune_runs_keeps_newest() {
        let tmp = TempDir::new().unwrap();
        let now = SystemTime::now();
        let ids: Vec<RunId> =
            [30u64, 20, 10].iter().map(|age| finished_run(tmp.path(), now - Duration::from_secs(*age))).collect();
        fs::create_dir(tmp.path().join("keep-me")).unwrap();

        let removed = prune_runs(tmp.path(), 2).unwrap();
        assert_eq!(removed, 1);
        assert!(!ids[0].dir(tmp.path()).exists());
        assert!(ids[1].dir(tmp.path()).exists());
        assert!(ids[2].dir(tmp.path()).exists());
        assert!(tmp.path().join("keep-me").exists());
    }

    #[test]
    fn test_prune_runs_orders_by_archive_time() {
        let tmp = TempDir::new().unwrap();
        let now = SystemTime::now();
        let older = finished_run(tmp.path(), now - Duration::from_secs(60));
        let newer = finished_run(tmp.path(), now - Duration::from_secs(5));

        // Touching the older run's directory must not make it look recent.
        fs::write(older.dir(tmp.path()).join("report.txt"), b"report").unwrap();

        assert_eq!(prune_runs(tmp.path(), 1).unwrap(), 1);
        assert!(!older.dir(tmp.path()).exists());
        assert!(newer.dir(tmp.path()).exists());
    }

    #[test]
    fn test_prune_runs_spares_unfinished_runs() {
        let tmp = TempDir::new().unwrap();
        let now = SystemTime::now();
        let in_progress = RunId::new();
        let dir = create_run_dir(tmp.path(), &in_progress).unwrap();
        fs::write(dir.join("Some Story.docx"), b"docx").unwrap();
        let handle = fs::File::open(&dir).unwrap();
        handle.set_modified(now - Duration::from_secs(3600)).unwrap();

        let finished: Vec<RunId> =
            [20u64, 10].iter().map(|age| finished_run(tmp.path(), now - Duration::from_secs(*age))).collect();

        assert_eq!(prune_runs(tmp.path(), 1).unwrap(), 1);
        assert!(in_progress.dir(tmp.path()).join("Some Story.docx").exists());
        assert!(!finished[0].dir(tmp.path()).exists());
        assert!(finished[1].dir(tmp.path()).exists());
    }

    #[test]
    fn test_prune_runs_missing_root() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(prune_runs(&tmp.path().join("absent"), 1).unwrap(), 0);
    }
}
