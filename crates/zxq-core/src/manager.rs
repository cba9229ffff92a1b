use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SlotError;
use crate::layout::{self, SaveLayout};
use crate::paths;
use crate::scan::ScanCache;
use crate::snapshot::{self, LoadMode, SnapshotService, SCREEN_LEN};

/// Result of a successful quicksave, for UI display.
#[derive(Debug)]
pub struct SaveReceipt {
    pub slot: u8,
    pub path: PathBuf,
    /// "Last changed" string of the written file.
    pub saved_at: Option<String>,
}

/// Result of a quickload. An empty slot is a no-op, not a failure.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded {
        slot: u8,
        loaded_at: Option<String>,
    },
    NoSave,
}

/// Quicksave slot manager: path layout plus the host's snapshot service,
/// with a memoized "any save exists?" poll.
///
/// Synchronous and single-threaded; the host pauses emulation around
/// `save`/`load` calls.
pub struct SlotManager<S: SnapshotService> {
    layout: SaveLayout,
    service: S,
    cache: ScanCache,
}

impl<S: SnapshotService> SlotManager<S> {
    pub fn new(layout: SaveLayout, service: S) -> Self {
        Self {
            layout,
            service,
            cache: ScanCache::new(),
        }
    }

    pub fn layout(&self) -> &SaveLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut SaveLayout {
        &mut self.layout
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Save the running machine to the currently configured slot.
    pub fn save(&mut self) -> Result<SaveReceipt, SlotError> {
        self.save_slot(self.layout.settings.slot)
    }

    pub fn save_slot(&mut self, slot: u8) -> Result<SaveReceipt, SlotError> {
        let path = self.layout.slot_path(slot).ok_or(SlotError::Unavailable)?;
        self.layout.ensure_save_dir()?;
        self.service
            .save_to(&path)
            .map_err(|reason| SlotError::Save { slot, reason })?;
        Ok(SaveReceipt {
            slot,
            saved_at: layout::mtime_string(&path),
            path,
        })
    }

    /// Load the currently configured slot. An absent slot file yields
    /// `LoadOutcome::NoSave`.
    pub fn load(&mut self) -> Result<LoadOutcome, SlotError> {
        self.load_slot(self.layout.settings.slot)
    }

    pub fn load_slot(&mut self, slot: u8) -> Result<LoadOutcome, SlotError> {
        let Some(path) = self.layout.slot_path(slot) else {
            return Ok(LoadOutcome::NoSave);
        };
        if !path.exists() {
            return Ok(LoadOutcome::NoSave);
        }
        self.service
            .load_from(&path, LoadMode::Quickload)
            .map_err(|reason| SlotError::Load { slot, reason })?;
        Ok(LoadOutcome::Loaded {
            slot,
            loaded_at: layout::mtime_string(&path),
        })
    }

    /// Save to the slot named by a savestate path ("…/07.szx" selects
    /// slot 7). The slot becomes the configured one.
    pub fn save_file(&mut self, savestate: &Path) -> Result<SaveReceipt, SlotError> {
        let slot = paths::slot_from_name(savestate).ok_or_else(|| SlotError::BadSlotName {
            path: savestate.to_path_buf(),
        })?;
        self.layout.settings.slot = slot;
        self.save_slot(slot)
    }

    /// Load from the slot named by a savestate path.
    pub fn load_file(&mut self, savestate: &Path) -> Result<LoadOutcome, SlotError> {
        let slot = paths::slot_from_name(savestate).ok_or_else(|| SlotError::BadSlotName {
            path: savestate.to_path_buf(),
        })?;
        self.layout.settings.slot = slot;
        self.load_slot(slot)
    }

    /// Memoized existence poll, see [`ScanCache`] for the lazy-scan policy.
    pub fn any_save_exists(&mut self) -> bool {
        let Some(dir) = self.layout.save_dir() else {
            return false;
        };
        if !matches!(paths::dir_state(&dir), paths::DirState::Exists) {
            return false;
        }
        self.cache.any_save(&dir, &self.layout.settings.format)
    }

    pub fn slot_exists(&self, slot: u8) -> bool {
        self.layout.slot_exists(slot)
    }

    /// Screen contents of a slot's snapshot, without activating it. Always
    /// returns a 6912-byte buffer; every failure path degrades to blank.
    pub fn screen_preview(&self, slot: u8) -> Vec<u8> {
        let blank = || vec![0u8; SCREEN_LEN];
        let Some(path) = self.layout.slot_path(slot) else {
            return blank();
        };
        let Ok(data) = fs::read(&path) else {
            return blank();
        };
        match self.service.parse_snapshot(&data) {
            Ok(info) => snapshot::screen_bytes(&info),
            Err(_) => blank(),
        }
    }
}
