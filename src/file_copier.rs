use crate::error::OpError;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Copies `src` to `dest`. A directory brings its whole subtree along; a file
/// copies exactly that file. Missing destination parents are created.
pub fn copy_path(src: &Path, dest: &Path) -> Result<(), OpError> {
    copy_tree(src, dest).map_err(|source| OpError::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    })
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    if !fs::metadata(src)?.is_dir() {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dest)?;
        return Ok(());
    }

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            tracing::trace!(from = %entry.path().display(), to = %target.display(), "copying file");
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
