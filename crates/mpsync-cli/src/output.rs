//! Snapshot persistence.

use std::fs::Permissions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyhow::Context;
use mpsync_core::Snapshot;
use tempfile::NamedTempFile;

/// Writes `snapshot` to `path` as pretty-printed JSON.
///
/// The JSON is written to a temporary file in the same directory and then
/// renamed over `path`, so readers only ever see the previous snapshot or
/// the complete new one. Missing parent directories are created.
///
/// The new file takes over the permissions of the file it replaces, or
/// `0o644` on Unix when there is none, so the snapshot stays readable by
/// whatever serves it.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the snapshot cannot
/// be serialized, or the temporary file cannot be written or renamed.
pub(crate) fn write_snapshot(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut json = serde_json::to_vec_pretty(snapshot).context("failed to serialize snapshot")?;
    json.push(b'\n');

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(&json)
        .and_then(|()| tmp.as_file().sync_all())
        .context("failed to write snapshot")?;
    if let Some(perms) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(perms)
            .with_context(|| format!("failed to set permissions for {}", path.display()))?;
    }
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "snapshot written");
    Ok(())
}

/// Permissions for the replacement file: the current target's if it is a
/// regular file, otherwise world-readable.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.permissions()),
        #[cfg(unix)]
        _ => Some(Permissions::from_mode(0o644)),
        #[cfg(not(unix))]
        _ => None,
    }
}
