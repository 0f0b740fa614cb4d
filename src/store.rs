use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;

use crate::extract::ExtractedRecord;

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lowercase, hyphen-separated, URL-safe rendition of a headline.
pub fn slugify(text: &str) -> String {
    NON_SLUG
        .replace_all(&text.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Minute-resolution timestamp plus headline slug, e.g.
/// `2017-07-16-14:05-donald-trump.json`.
pub fn filename(headline: &str, at: DateTime<Local>) -> String {
    format!("{}-{}.json", at.format("%Y-%m-%d-%H:%M"), slugify(headline))
}

/// Serialize the record as flat JSON into `dir`, creating the directory if
/// needed. Returns the written path.
pub fn persist(dir: &Path, record: &ExtractedRecord) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    let path = dir.join(filename(&record.headline, Local::now()));
    let json = serde_json::to_string(record)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
