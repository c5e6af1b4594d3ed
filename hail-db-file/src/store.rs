use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use hail_core::db::{LedgerStore, StoreError};

/// Ledger document kept as `<dir>/<slot>.json`.
///
/// Writes go to a sibling temp file first and are renamed over the target,
/// so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `slot` inside `dir`.
    pub fn in_dir(
        dir: impl AsRef<Path>,
        slot: &str,
    ) -> Self {
        Self::new(dir.as_ref().join(format!("{slot}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn read_document(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("{}: {e}", self.path.display()))),
        }
    }

    async fn write_document(&self, document: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(format!("{}: {e}", parent.display())))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, document)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", temp.display())))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", self.path.display())))?;

        debug!(path = %self.path.display(), bytes = document.len(), "ledger file written");
        Ok(())
    }
}
