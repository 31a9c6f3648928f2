//! Version gate for the MediaInfo tool.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MediaInfoError;

/// Oldest supported release, as `major * 100 + minor` (23.0).
pub const MIN_MEDIAINFO_VERSION: u32 = 2300;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:MediaInfoLib\s*-\s*)?v?(\d+)\.(\d+)").expect("version pattern should compile")
});

/// Extracts a comparable version number from `mediainfo --Version` output.
///
/// The first `major.minor` pair wins and is folded into `major * 100 + minor`,
/// so `MediaInfoLib - v25.07` gives `2507` and `v23.1` gives `2301`.
pub fn parse_version(output: &str) -> Result<u32, MediaInfoError> {
    let trimmed = output.trim();
    let parse_err = || MediaInfoError::VersionParse(trimmed.to_string());

    let caps = VERSION_PATTERN.captures(trimmed).ok_or_else(parse_err)?;
    let major: u32 = caps[1].parse().map_err(|_| parse_err())?;
    let minor: u32 = caps[2].parse().map_err(|_| parse_err())?;

    major
        .checked_mul(100)
        .and_then(|v| v.checked_add(minor))
        .ok_or_else(parse_err)
}

/// Fails with [`MediaInfoError::TooOld`] when `version` is below the minimum.
pub fn ensure_supported(version: u32) -> Result<(), MediaInfoError> {
    if version < MIN_MEDIAINFO_VERSION {
        return Err(MediaInfoError::TooOld {
            found: version,
            minimum: MIN_MEDIAINFO_VERSION,
        });
    }
    Ok(())
}
