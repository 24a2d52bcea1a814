use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::foundation::error::{CollectError, CollectResult};

/// `name` and its rolling autosaves `name1`..`name9`, oldest first.
///
/// Files are ordered by modification time; ties fall back to the path.
pub fn autosave_files(name: &Path) -> CollectResult<Vec<PathBuf>> {
    let base = name.to_string_lossy();
    let pattern = format!("{}[1-9]", glob::Pattern::escape(&base));
    let entries = glob::glob(&pattern).map_err(|e| {
        CollectError::Other(anyhow::anyhow!("invalid autosave pattern '{pattern}': {e}"))
    })?;

    let mut files: Vec<PathBuf> = entries.filter_map(Result::ok).collect();
    if name.is_file() {
        files.push(name.to_path_buf());
    }

    let mut dated = files
        .into_iter()
        .map(|path| -> CollectResult<(SystemTime, PathBuf)> {
            let modified = std::fs::metadata(&path)?.modified()?;
            Ok((modified, path))
        })
        .collect::<CollectResult<Vec<_>>>()?;
    dated.sort();
    Ok(dated.into_iter().map(|(_, path)| path).collect())
}
