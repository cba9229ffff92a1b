use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::paths::is_savestate_name;

/// Does `dir` hold at least one valid savestate? Short-circuits on the
/// first hit; any read error counts as "none found".
pub fn directory_has_saves(dir: &Path, format: &str) -> bool {
    let Ok(rd) = fs::read_dir(dir) else {
        return false;
    };
    for e in rd.flatten() {
        if let Some(name) = e.file_name().to_str() {
            if is_savestate_name(name, format) {
                return true;
            }
        }
    }
    false
}

/// Single-entry memo of the "any save exists?" poll.
///
/// A UI refresh asks this every frame; scanning the directory each time is
/// wasteful, so the scan is lazy: the first query after the directory
/// changes just primes the cache and answers `false`, a repeat query on the
/// same directory scans, and a positive answer sticks until the directory
/// changes again. The result is eventually consistent with externally
/// created files.
#[derive(Debug, Default)]
pub struct ScanCache {
    dir: Option<PathBuf>,
    found: bool,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any_save(&mut self, dir: &Path, format: &str) -> bool {
        if self.dir.as_deref() != Some(dir) {
            self.dir = Some(dir.to_path_buf());
            self.found = false;
        } else if !self.found {
            self.found = directory_has_saves(dir, format);
        }
        self.found
    }

    pub fn reset(&mut self) {
        self.dir = None;
        self.found = false;
    }
}

/// One program directory inside the savestates tree and its occupied slots.
#[derive(Debug)]
pub struct ProgramSaves {
    pub dir: PathBuf,
    pub program: String,
    pub slots: Vec<u8>,
}

/// Walk a savestates tree and group valid slot files per program directory.
/// Yields entries sorted by path; programs without any valid slot file are
/// skipped.
pub fn tree_overview(root: &Path, format: &str) -> Vec<ProgramSaves> {
    let mut out: Vec<ProgramSaves> = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_savestate_name(name, format) {
            continue;
        }
        let slot: u8 = match name[..2].parse() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let dir = entry.path().parent().unwrap_or(root).to_path_buf();
        match out.iter_mut().find(|p| p.dir == dir) {
            Some(p) => p.slots.push(slot),
            None => {
                let program = dir
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("<unnamed>")
                    .to_string();
                out.push(ProgramSaves {
                    dir,
                    program,
                    slots: vec![slot],
                });
            }
        }
    }
    for p in &mut out {
        p.slots.sort_unstable();
    }
    out.sort_by(|a, b| a.dir.cmp(&b.dir));
    out
}
