use crate::error::OpError;
use crate::job_stack::JobKind;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedEntry {
    pub name: OsString,
    pub kind: JobKind,
}

/// Lists the direct children of `root/relative_dir`, sorted by name. Never recurses.
pub fn scan_dir(root: &Path, relative_dir: &Path) -> Result<Vec<ScannedEntry>, OpError> {
    let dir = root.join(relative_dir);
    let to_err = |source| OpError::Enumeration {
        path: dir.clone(),
        source,
    };

    let mut entries = Vec::new();
    for dirent in fs::read_dir(&dir).map_err(to_err)? {
        let dirent = dirent.map_err(to_err)?;
        let is_dir = dirent.file_type().map_err(to_err)?.is_dir();
        entries.push(ScannedEntry {
            name: dirent.file_name(),
            kind: if is_dir {
                JobKind::Directory
            } else {
                JobKind::File
            },
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
