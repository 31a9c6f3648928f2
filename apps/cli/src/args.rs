//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crowdnfo_pipeline::ReleaseOptions;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "crowdnfo",
    version,
    about = "Upload MediaInfo, NFO, and file lists of a release to CrowdNFO"
)]
pub struct Args {
    /// Release directory or single release file.
    pub release_path: PathBuf,

    /// Catalog category (Movies, TV, Games, Software, Music, Audiobooks, Books, Other).
    /// Derived from the release name when omitted.
    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(long, env = "CROWDNFO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "CROWDNFO_API_URL")]
    pub api_url: Option<String>,

    /// Directory receiving copies of uploaded files.
    #[arg(long, env = "CROWDNFO_ARCHIVE_DIR")]
    pub archive_dir: Option<PathBuf>,

    /// Largest file to hash in bytes; 0 hashes everything, negative disables hashing.
    #[arg(long, allow_negative_numbers = true)]
    pub max_hash_file_size: Option<i64>,

    /// MediaInfo executable (default: `mediainfo` on PATH).
    #[arg(long, env = "CROWDNFO_MEDIAINFO")]
    pub mediainfo_path: Option<PathBuf>,

    /// Pre-generated MediaInfo JSON to upload instead of running MediaInfo.
    #[arg(long)]
    pub mediainfo_json: Option<PathBuf>,

    /// NFO file to upload instead of the one found in the release.
    #[arg(long)]
    pub nfo: Option<PathBuf>,

    /// HTTP timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Config file (default: ~/.config/crowdnfo/config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not print progress lines.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Merges the arguments over `config`; arguments win.
    pub fn into_options(self, config: Config) -> anyhow::Result<ReleaseOptions> {
        let media_info_json = match &self.mediainfo_json {
            Some(path) => Some(
                std::fs::read(path)
                    .with_context(|| format!("reading MediaInfo JSON {}", path.display()))?,
            ),
            None => None,
        };
        let timeout = self
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.timeout());

        Ok(ReleaseOptions {
            release_path: self.release_path,
            category: self.category,
            api_key: self.api_key.unwrap_or(config.api_key),
            api_base_url: self.api_url.unwrap_or(config.api_base_url),
            timeout,
            archive_dir: self.archive_dir.or(config.archive_dir),
            max_hash_file_size: self.max_hash_file_size.unwrap_or(config.max_hash_file_size),
            media_info_path: self.mediainfo_path.or(config.mediainfo_path),
            media_info_json,
            nfo_file: self.nfo,
        })
    }
}
