use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::paths::is_savestate_name;

/// Zip up a savestates tree next to itself (non-destructive). Only
/// directories and valid slot files for `format` go into the archive;
/// stray files are left out.
pub fn zip_backup_tree(root: &Path, format: &str) -> io::Result<PathBuf> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        ));
    }
    let parent = root.parent().unwrap_or(Path::new("."));
    let stem = root
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("savestates");
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let dest = parent.join(format!("{}-backup-{}.zip", stem, ts));

    let file = fs::File::create(&dest)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| io::Error::other(e.to_string()))?;
        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap_or(path);
        if rel.as_os_str().is_empty() {
            continue;
        }
        let name = rel.to_string_lossy().replace('\\', "/");
        if path.is_dir() {
            zip.add_directory(name, options)?;
        } else {
            let valid = path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|n| is_savestate_name(n, format));
            if !valid {
                continue;
            }
            zip.start_file(name, options)?;
            let data = fs::read(path)?;
            zip.write_all(&data)?;
        }
    }
    zip.finish()?;
    Ok(dest)
}
