//! Category resolution for releases.
//!
//! An explicit category must be one of the catalog's fixed values. Without
//! one, the release name is run through an ordered rule list and the first
//! matching rule decides. Order matters: a name carrying both `S01E02` and
//! `1080p` is TV because the TV rule comes before the Movies rule.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ReleaseError;

/// Catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Movies,
    #[serde(rename = "TV")]
    Tv,
    Games,
    Software,
    Music,
    Audiobooks,
    Books,
    Other,
}

impl Category {
    /// All categories accepted by the catalog.
    pub const ALL: [Category; 8] = [
        Category::Movies,
        Category::Tv,
        Category::Games,
        Category::Software,
        Category::Music,
        Category::Audiobooks,
        Category::Books,
        Category::Other,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "Movies",
            Category::Tv => "TV",
            Category::Games => "Games",
            Category::Software => "Software",
            Category::Music => "Music",
            Category::Audiobooks => "Audiobooks",
            Category::Books => "Books",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ReleaseError;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ReleaseError::InvalidCategory(s.to_string()))
    }
}

/// Name rules in evaluation order.
const CATEGORY_RULES: &[(&str, Category)] = &[
    (
        r"(?i)\b(audiobook|abook|abookde|hörbuch|hoerbuch|horbuch|m4b)\b",
        Category::Audiobooks,
    ),
    (r"(?i)\b(ebook|epaper|pdf|epub|mobi)\b", Category::Books),
    (
        r"(?i)\b((s\d{1,4}e\d{1,4})|(s\d{1,4})|(e\d{1,4})|season|staffel|episode|folge|(\d{4}-\d{2}-\d{2}))\b",
        Category::Tv,
    ),
    (
        r"(?i)\b(elamigos|gog|xbox|xbox360|x360|ps\d|nintendo|nsw|amiga|atari|wii[u]?)\b",
        Category::Games,
    ),
    (
        r"(?i)\b(patch|crack|cracked|keygen|keymaker|keyfilemaker|x64|dvt|btcr|macos)\b",
        Category::Software,
    ),
    (
        r"(?i)\b((\d{3,4}[pi])|bluray|dvdrip|webrip|hdtv|bdrip|dvd|remux|mpeg[-]?2|vc[-]?1|avc|hevc|([xh][. ]?26[456]))\b",
        Category::Movies,
    ),
    (
        r"(?i)\b(mp3|flac|webflac|aac|wav|album|artist|discography|single|vinyl|cd|\d+bit|\d+khz)\b",
        Category::Music,
    ),
];

static COMPILED_RULES: Lazy<Vec<(Regex, Category)>> = Lazy::new(|| compile_rules(CATEGORY_RULES));

/// Compiles rules in order, dropping any pattern that fails to compile.
fn compile_rules(rules: &[(&str, Category)]) -> Vec<(Regex, Category)> {
    rules
        .iter()
        .filter_map(|(pattern, category)| match Regex::new(pattern) {
            Ok(re) => Some((re, *category)),
            Err(e) => {
                tracing::debug!(pattern, error = %e, "skipping malformed category rule");
                None
            }
        })
        .collect()
}

fn first_match(rules: &[(Regex, Category)], release_name: &str) -> Option<Category> {
    rules
        .iter()
        .find(|(re, _)| re.is_match(release_name))
        .map(|(_, category)| *category)
}

/// Returns the category of the first built-in rule matching `release_name`.
pub fn match_category(release_name: &str) -> Option<Category> {
    first_match(&COMPILED_RULES, release_name)
}

/// Resolves the category for a release.
///
/// A non-empty `explicit` value must name a catalog category exactly; there
/// is no fallback to the name rules when it does not. An empty or missing
/// value falls through to [`match_category`].
pub fn resolve_category(
    explicit: Option<&str>,
    release_name: &str,
) -> Result<Category, ReleaseError> {
    match explicit.filter(|c| !c.is_empty()) {
        Some(value) => value.parse(),
        None => match_category(release_name)
            .ok_or_else(|| ReleaseError::UndeterminedCategory(release_name.to_string())),
    }
}
