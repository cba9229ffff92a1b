use std::fs;
use std::io;
use std::path::Path;

use crate::error::SlotError;

/// Directory segment under the config root holding all savestates.
pub const SAVESTATES_DIR: &str = "savestates";

/// Highest valid slot number (two display digits).
pub const MAX_SLOT: u8 = 99;

/// Basename of a slot file: two zero-padded digits plus the extension.
pub fn slot_basename(slot: u8, format: &str) -> String {
    format!("{:02}{}", slot, format)
}

/// Is `name` a valid savestate basename for `format`? Checked by length,
/// two leading ASCII digits and an exact extension match.
pub fn is_savestate_name(name: &str, format: &str) -> bool {
    if name.len() != 2 + format.len() {
        return false;
    }
    let b = name.as_bytes();
    if !b[0].is_ascii_digit() || !b[1].is_ascii_digit() {
        return false;
    }
    &name[2..] == format
}

/// Recover the slot number from a savestate path ("…/07.szx" -> 7).
/// The stem must be exactly two digits.
pub fn slot_from_name(path: &Path) -> Option<u8> {
    let stem = path.file_stem()?.to_str()?;
    if stem.len() != 2 || !stem.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

/// Existence of a directory, with I/O failure kept apart from plain absence
/// so first-use "not there yet" never reads as an error.
#[derive(Debug)]
pub enum DirState {
    Exists,
    Absent,
    Error(io::Error),
}

pub fn dir_state(path: &Path) -> DirState {
    match fs::metadata(path) {
        Ok(_) => DirState::Exists,
        Err(e) if e.kind() == io::ErrorKind::NotFound => DirState::Absent,
        Err(e) => DirState::Error(e),
    }
}

/// Create one directory level if missing. The parent must already exist;
/// callers build the savestate chain segment by segment.
pub fn ensure_dir(path: &Path) -> Result<(), SlotError> {
    match dir_state(path) {
        DirState::Exists => Ok(()),
        DirState::Absent => match fs::create_dir(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(SlotError::CreateDir {
                path: path.to_path_buf(),
                source: e,
            }),
        },
        DirState::Error(e) => Err(SlotError::Stat {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
