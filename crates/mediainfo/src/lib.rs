//! MediaInfo command-line integration.
//!
//! Locates the `mediainfo` binary, checks that it is new enough, and runs it
//! with `--Output=JSON` against a media file.

pub mod error;
pub mod probe;
pub mod version;

pub use error::MediaInfoError;
pub use probe::{DEFAULT_TOOL_NAME, MediaInfo};
pub use version::{MIN_MEDIAINFO_VERSION, ensure_supported, parse_version};
