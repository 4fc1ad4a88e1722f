use crate::toolbar::Entry;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::Path;
use tracing::warn;

/// Walks `root` and returns every entry below it with a volume-relative
/// `full_path` (`/` separated, leading `/`). The root itself is not listed.
pub fn scan_volume(root: &Path, include_ignored: bool) -> Result<Vec<Entry>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("cannot open volume root {}", root.display()))?;
    let mut entries: Vec<Entry> = Vec::new();
    let mut walker = WalkBuilder::new(&root);
    walker.hidden(false);

    if include_ignored {
        walker.git_ignore(false).ignore(false);
    }

    for result in walker.build() {
        let dirent = match result {
            Ok(v) => v,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = dirent.into_path();
        if path == root {
            continue;
        }
        // .git internals would drown the listing
        if path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }

        let Some(full_path) = volume_path(&root, &path) else {
            continue;
        };
        let metadata = match path.symlink_metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        entries.push(Entry {
            full_path,
            is_dir: metadata.is_dir(),
            read_only: metadata.permissions().readonly(),
        });
    }

    entries.sort_by(|a, b| a.full_path.cmp(&b.full_path));
    entries.dedup_by(|a, b| a.full_path == b.full_path);

    Ok(entries)
}

fn volume_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(format!("/{}", parts.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_entries_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Downloads")).unwrap();
        fs::write(dir.path().join("Downloads/a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "n").unwrap();

        let entries = scan_volume(dir.path(), false).unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.full_path.as_str()).collect();
        assert_eq!(paths, vec!["/Downloads", "/Downloads/a.txt", "/notes.md"]);
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
    }

    #[test]
    fn read_only_files_are_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("locked.txt");
        fs::write(&file, "x").unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file, perms).unwrap();

        let entries = scan_volume(dir.path(), false).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].read_only);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_volume(&dir.path().join("nope"), false).is_err());
    }
}
