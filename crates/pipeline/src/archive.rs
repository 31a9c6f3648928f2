//! Local copies of uploaded files.
//!
//! Every MediaInfo or NFO payload the catalog accepted is written to the
//! archive directory under the same file name it was uploaded with.

use std::path::{Path, PathBuf};

/// Archive directory for uploaded payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    dir: PathBuf,
}

impl Archive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `data` as `file_name`, creating the directory if needed.
    ///
    /// Only the final component of `file_name` is used, so the copy always
    /// lands directly inside the archive directory.
    pub fn store(&self, file_name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        let name = Path::new(file_name).file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid archive file name: {file_name:?}"),
            )
        })?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, data)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "archived upload");
        Ok(path)
    }
}
