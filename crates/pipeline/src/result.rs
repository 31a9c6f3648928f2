//! Accumulated outcome of a run.

use std::fmt;

use crate::upload::AssetKind;

/// Stage or asset a warning belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    MediaInfo,
    Hash,
    Nfo,
    FileList,
    Upload(AssetKind),
    Archive(AssetKind),
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MediaInfo => f.write_str("MediaInfo"),
            WarningKind::Hash => f.write_str("Hash"),
            WarningKind::Nfo => f.write_str("NFO"),
            WarningKind::FileList => f.write_str("File List"),
            WarningKind::Upload(kind) => write!(f, "{kind} upload"),
            WarningKind::Archive(kind) => write!(f, "{kind} archive"),
        }
    }
}

/// A non-fatal failure, tagged with the release or episode it hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub release: String,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}: {}", self.release, self.kind, self.message)
    }
}

/// Warnings collected over a run, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    pub warnings: Vec<Warning>,
}

impl ProcessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and logs it.
    pub fn warn(&mut self, release: &str, kind: WarningKind, message: impl fmt::Display) {
        let warning = Warning {
            release: release.to_string(),
            kind,
            message: message.to_string(),
        };
        tracing::warn!(release = %warning.release, kind = %warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Appends `other`'s warnings after this result's own.
    pub fn merge(&mut self, other: ProcessResult) {
        self.warnings.extend(other.warnings);
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warnings recorded for one release or episode.
    pub fn warnings_for<'a>(&'a self, release: &'a str) -> impl Iterator<Item = &'a Warning> + 'a {
        self.warnings.iter().filter(move |w| w.release == release)
    }
}
