/*!
 * Artifact Log Workers
 * Fixed pool of independent threads, each writing one log artifact
 */

use crate::core::errors::{LogError, LogResult};
use log::info;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// Handle to the background log-worker pool.
///
/// The pool has no interaction with the scheduler: each worker writes one
/// artifact tagged with its own identity and the OS process id, then exits.
#[derive(Debug)]
pub struct LogPool {
    handles: Vec<(usize, JoinHandle<LogResult<PathBuf>>)>,
}

impl LogPool {
    /// Create the artifact directory and start `count` log workers.
    ///
    /// Directory creation failure is fatal; per-worker write failures are
    /// deferred to [`LogPool::join`].
    pub fn spawn(dir: &Path, count: usize) -> LogResult<Self> {
        fs::create_dir_all(dir).map_err(|e| LogError::DirUnavailable {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut handles = Vec::with_capacity(count);
        for worker in 1..=count {
            let path = dir.join(format!("worker-{}.log", worker));
            let handle = thread::Builder::new()
                .name(format!("log-worker-{}", worker))
                .spawn(move || write_artifact(worker, path))
                .map_err(|e| LogError::SpawnFailed {
                    worker,
                    reason: e.to_string(),
                })?;
            handles.push((worker, handle));
        }

        info!("started {} log workers", count);
        Ok(Self { handles })
    }

    /// Wait for every worker and collect the per-artifact outcomes.
    pub fn join(self) -> Vec<LogResult<PathBuf>> {
        self.handles
            .into_iter()
            .map(|(worker, handle)| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(LogError::WorkerPanicked(worker)))
            })
            .collect()
    }

    /// Number of workers in the pool
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if the pool was started with zero workers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

fn write_artifact(worker: usize, path: PathBuf) -> LogResult<PathBuf> {
    let failed = |e: std::io::Error| LogError::ArtifactFailed {
        worker,
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut file = fs::File::create(&path).map_err(failed)?;
    writeln!(
        file,
        "log worker {} (pid {}) wrote this artifact",
        worker,
        std::process::id()
    )
    .map_err(failed)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_each_worker_writes_one_artifact() {
        let dir = tempdir().unwrap();
        let pool = LogPool::spawn(dir.path(), 4).unwrap();
        assert_eq!(pool.len(), 4);

        let results = pool.join();
        assert_eq!(results.len(), 4);

        for result in results {
            let path = result.unwrap();
            let contents = fs::read_to_string(path).unwrap();
            assert!(contents.contains("wrote this artifact"));
        }
    }

    #[test]
    fn test_artifacts_are_distinct_files() {
        let dir = tempdir().unwrap();
        let pool = LogPool::spawn(dir.path(), 3).unwrap();

        let mut paths: Vec<_> = pool.join().into_iter().map(Result::unwrap).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn test_unwritable_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let file_in_the_way = dir.path().join("occupied");
        fs::write(&file_in_the_way, b"not a directory").unwrap();

        let err = LogPool::spawn(&file_in_the_way, 2).unwrap_err();
        assert!(matches!(err, LogError::DirUnavailable { .. }));
    }
}
