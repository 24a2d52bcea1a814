//! Working-file version numbers.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{CollectError, CollectResult};
use crate::model::instance::Instance;

/// `_v012` / `.v3` labels in a file stem.
static VERSION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[._]v(\d+)").expect("static regex"));

/// Families whose publish bumps the working file.
pub const DEFAULT_INCREMENT_FAMILIES: &[&str] = &["render", "render.farm", "render.frames_farm"];

/// Version-increment settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IncrementOpts {
    pub enabled: bool,
    pub families: Vec<String>,
}

impl Default for IncrementOpts {
    fn default() -> Self {
        Self {
            enabled: true,
            families: DEFAULT_INCREMENT_FAMILIES
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

/// Outcome of one plugin/instance in the current publish.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishResult {
    pub label: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Why no increment happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Disabled,
    NoMatchingFamily,
    UnsavedWorkfile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IncrementDecision {
    /// Save the working file under this path.
    Increment(PathBuf),
    Skipped(SkipReason),
}

/// Version number in the last version label of `path`'s file stem.
pub fn parse_version(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    VERSION_LABEL
        .captures_iter(stem)
        .last()
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn next_version_path(path: &Path) -> CollectResult<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CollectError::version(format!("no file name in '{}'", path.display())))?;

    let new_stem = match VERSION_LABEL.captures_iter(stem).last().and_then(|c| c.get(1)) {
        Some(digits) => {
            let version: u64 = digits.as_str().parse().map_err(|_| {
                CollectError::version(format!("version number too large in '{}'", path.display()))
            })?;
            let width = digits.as_str().len();
            format!(
                "{}{:0width$}{}",
                &stem[..digits.start()],
                version + 1,
                &stem[digits.end()..]
            )
        }
        None => format!("{stem}_v001"),
    };

    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{new_stem}.{ext}"),
        None => new_stem,
    };
    Ok(path.with_file_name(file_name))
}

/// Next free version of `path`.
///
/// Bumps the last `_v<digits>` label keeping its padding, or appends `_v001`.
/// Versions already on disk are skipped.
pub fn version_up(path: &Path) -> CollectResult<PathBuf> {
    let mut candidate = next_version_path(path)?;
    if candidate == path {
        return Err(CollectError::version(format!(
            "created path is the same as current file '{}'",
            path.display()
        )));
    }
    while candidate.exists() {
        tracing::info!(path = %candidate.display(), "skipping existing version");
        candidate = next_version_path(&candidate)?;
    }
    Ok(candidate)
}

/// Decide whether the working file gets a new version after this publish.
///
/// Refuses when any publish result failed, or when the session publishes a
/// version older than the working file's own version.
pub fn plan_increment(
    opts: &IncrementOpts,
    instances: &[Instance],
    results: &[PublishResult],
    current_file: Option<&Path>,
) -> CollectResult<IncrementDecision> {
    if !opts.enabled {
        return Ok(IncrementDecision::Skipped(SkipReason::Disabled));
    }

    let relevant = instances.iter().any(|inst| {
        std::iter::once(&inst.product_type)
            .chain(inst.families.iter())
            .any(|family| opts.families.contains(family))
    });
    if !relevant {
        return Ok(IncrementDecision::Skipped(SkipReason::NoMatchingFamily));
    }

    let Some(current_file) = current_file else {
        return Ok(IncrementDecision::Skipped(SkipReason::UnsavedWorkfile));
    };

    if let Some(failed) = results.iter().find(|r| !r.success) {
        return Err(CollectError::version(format!(
            "publishing not successful so version is not increased ('{}' failed)",
            failed.label
        )));
    }

    let lowest = instances.iter().filter_map(|inst| inst.version).min();
    if let (Some(lowest), Some(current)) = (lowest, parse_version(current_file))
        && lowest < current
    {
        return Err(CollectError::version(format!(
            "publishing version {lowest} which is older than working file version {current}"
        )));
    }

    let next = version_up(current_file)?;
    tracing::info!(next = %next.display(), "incrementing script version");
    Ok(IncrementDecision::Increment(next))
}

#[cfg(test)]
#[path = "../../tests/unit/workfile/version.rs"]
mod tests;
