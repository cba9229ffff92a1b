use std::io;
use std::path::PathBuf;

/// Failures surfaced by the slot manager.
///
/// `Unavailable` means the quicksave feature is inactive (no program loaded,
/// or no config directory); callers should treat it as "do nothing", not as
/// a user-facing error. A load against an empty slot is not an error at all,
/// see [`crate::manager::LoadOutcome::NoSave`].
#[derive(thiserror::Error, Debug)]
pub enum SlotError {
    #[error("quicksave unavailable: no program loaded or no config directory")]
    Unavailable,

    #[error("no slot number in savestate name '{}'", .path.display())]
    BadSlotName { path: PathBuf },

    #[error("couldn't stat '{}': {}", .path.display(), .source)]
    Stat { path: PathBuf, source: io::Error },

    #[error("error creating savestate directory '{}': {}", .path.display(), .source)]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("error saving state to slot {slot:02}: {reason}")]
    Save { slot: u8, reason: String },

    #[error("error loading state from slot {slot:02}: {reason}")]
    Load { slot: u8, reason: String },
}
