//! Running the `mediainfo` binary.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::MediaInfoError;
use crate::version::{ensure_supported, parse_version};

/// Tool name looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_TOOL_NAME: &str = "mediainfo";

/// A resolved `mediainfo` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    path: PathBuf,
}

impl MediaInfo {
    /// Wraps an executable path without checking it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the tool from an explicit path or from `PATH`.
    ///
    /// Returns `None` when nothing executable is found; callers then run
    /// without media info.
    pub fn locate(explicit: Option<&Path>) -> Option<Self> {
        let wanted = explicit
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL_NAME));

        match which::which(&wanted) {
            Ok(path) => {
                debug!(path = %path.display(), "found MediaInfo");
                Some(Self { path })
            }
            Err(e) => {
                debug!(tool = %wanted.display(), error = %e, "MediaInfo not found");
                None
            }
        }
    }

    /// Path of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs the tool with `args` and returns stdout on success.
    async fn run(&self, args: &[&std::ffi::OsStr]) -> Result<Vec<u8>, MediaInfoError> {
        let output = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(MediaInfoError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }
        Ok(output.stdout)
    }

    /// Queries `--Version` and returns the parsed version number.
    pub async fn version(&self) -> Result<u32, MediaInfoError> {
        let stdout = self.run(&["--Version".as_ref()]).await?;
        parse_version(&String::from_utf8_lossy(&stdout))
    }

    /// Fails unless the tool reports at least the minimum supported version.
    pub async fn check_version(&self) -> Result<u32, MediaInfoError> {
        let version = self.version().await?;
        ensure_supported(version)?;
        debug!(version, "MediaInfo version accepted");
        Ok(version)
    }

    /// Produces the JSON report for one media file.
    pub async fn generate_json(&self, file: &Path) -> Result<Vec<u8>, MediaInfoError> {
        debug!(file = %file.display(), "generating MediaInfo JSON");
        self.run(&["--Output=JSON".as_ref(), file.as_os_str()]).await
    }
}
