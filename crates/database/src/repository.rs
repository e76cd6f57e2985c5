use crate::DbError;
use crate::seed::seed_strategies;
use core_types::Strategy;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// The `StrategyRepository` provides load/save access to the strategy
/// collection stored as a single JSON array on disk.
///
/// It holds no in-memory state of its own; callers own the collection and
/// hand the complete snapshot back on every save.
#[derive(Debug, Clone)]
pub struct StrategyRepository {
    path: PathBuf,
}

impl StrategyRepository {
    /// Creates a repository backed by the file at `path`. Nothing is touched
    /// on disk until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full collection, in stored order.
    ///
    /// If no store file exists yet, the data directory is created, the seed
    /// set is persisted, and the seed set is returned. A file that exists
    /// but does not parse is an error; it is never silently replaced.
    pub async fn load(&self) -> Result<Vec<Strategy>, DbError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DbError::io(parent, e))?;
        }

        match fs::read(&self.path).await {
            Ok(bytes) => {
                let strategies: Vec<Strategy> = serde_json::from_slice(&bytes)?;
                tracing::debug!(path = %self.path.display(), count = strategies.len(), "Loaded strategy store.");
                Ok(strategies)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let seed = seed_strategies()?;
                self.save(&seed).await?;
                tracing::info!(path = %self.path.display(), count = seed.len(), "Strategy store was empty; wrote seed records.");
                Ok(seed)
            }
            Err(e) => Err(DbError::io(&self.path, e)),
        }
    }

    /// Replaces the stored collection with `strategies`.
    ///
    /// The snapshot is written to a temporary sibling file, flushed to disk and
    /// renamed over the live file. On error the previous file is left intact.
    pub async fn save(&self, strategies: &[Strategy]) -> Result<(), DbError> {
        let bytes = serde_json::to_vec_pretty(strategies)?;
        let tmp_path = self.tmp_path();

        if let Err(e) = write_synced(&tmp_path, &bytes).await {
            // Best effort; the write error is the one worth reporting.
            let _ = fs::remove_file(&tmp_path).await;
            return Err(DbError::io(&tmp_path, e));
        }

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| DbError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), count = strategies.len(), "Persisted strategy store.");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("strategies.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}
