use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::SlotError;
use crate::machine::MachineKind;
use crate::paths::{self, SAVESTATES_DIR};
use crate::program::ProgramNamer;
use crate::settings::QuicksaveSettings;

/// Width of the slot label as shown by the host UI (fits "NN: " plus a
/// 15-character program name).
const LABEL_WIDTH: usize = 19;

/// An occupied slot, as listed for a frontend.
#[derive(Debug)]
pub struct SlotEntry {
    pub slot: u8,
    pub path: PathBuf,
    pub modified: Option<String>,
    pub bytes: u64,
}

/// Path derivation for the current program/machine. Owns the settings and
/// the annotation stripper; knows nothing about snapshot contents.
pub struct SaveLayout {
    pub settings: QuicksaveSettings,
    namer: ProgramNamer,
    loaded_program: Option<PathBuf>,
    machine: MachineKind,
}

impl SaveLayout {
    pub fn new(settings: QuicksaveSettings, machine: MachineKind) -> Self {
        Self {
            settings,
            namer: ProgramNamer::new(),
            loaded_program: None,
            machine,
        }
    }

    pub fn with_namer(mut self, namer: ProgramNamer) -> Self {
        self.namer = namer;
        self
    }

    /// Host calls this whenever a program is opened or ejected.
    pub fn set_loaded_program(&mut self, path: Option<PathBuf>) {
        self.loaded_program = path;
    }

    pub fn set_machine(&mut self, machine: MachineKind) {
        self.machine = machine;
    }

    pub fn machine(&self) -> MachineKind {
        self.machine
    }

    pub fn program_name(&self) -> Option<String> {
        self.namer.derive(self.loaded_program.as_deref()?)
    }

    /// Is the quicksave feature active at all?
    pub fn possible(&self) -> bool {
        self.settings.config_root.is_some() && self.program_name().is_some()
    }

    /// `{config_root}/savestates/[{machine}/]{program}`, or `None` while
    /// the feature is inactive.
    pub fn save_dir(&self) -> Option<PathBuf> {
        let root = self.settings.config_root.as_deref()?;
        let program = self.program_name()?;
        let mut dir = root.join(SAVESTATES_DIR);
        if self.settings.per_machine {
            dir.push(self.machine.name());
        }
        dir.push(program);
        Some(dir)
    }

    pub fn slot_path(&self, slot: u8) -> Option<PathBuf> {
        if slot > paths::MAX_SLOT {
            return None;
        }
        let dir = self.save_dir()?;
        Some(dir.join(paths::slot_basename(slot, &self.settings.format)))
    }

    pub fn slot_exists(&self, slot: u8) -> bool {
        self.slot_path(slot).is_some_and(|p| p.exists())
    }

    /// Create the save directory chain, one level at a time, bottom-up from
    /// the config root. Only missing segments are created.
    pub fn ensure_save_dir(&self) -> Result<PathBuf, SlotError> {
        let root = self
            .settings
            .config_root
            .as_deref()
            .ok_or(SlotError::Unavailable)?;
        let dir = self.save_dir().ok_or(SlotError::Unavailable)?;
        let mut cur = root.to_path_buf();
        for seg in dir.strip_prefix(root).unwrap_or(&dir).components() {
            cur.push(seg);
            paths::ensure_dir(&cur)?;
        }
        Ok(dir)
    }

    /// Menu label for a slot: `"NN: program"`, truncated with a trailing
    /// `>` marker when the program name exceeds 15 characters.
    pub fn label(&self, slot: u8) -> Option<String> {
        if slot > paths::MAX_SLOT {
            return None;
        }
        let program = self.program_name()?;
        let mut label = format!("{:02}: {}", slot, program);
        // Counted in chars: program names come from arbitrary filenames.
        if label.chars().count() > LABEL_WIDTH {
            label = label.chars().take(LABEL_WIDTH - 1).collect();
            label.push('>');
        }
        Some(label)
    }

    /// Modification time of a slot file, formatted for display.
    pub fn last_change(&self, slot: u8) -> Option<String> {
        let path = self.slot_path(slot)?;
        mtime_string(&path)
    }

    /// Every occupied slot in the save directory, ascending by slot number.
    pub fn occupied_slots(&self) -> Vec<SlotEntry> {
        let Some(dir) = self.save_dir() else {
            return Vec::new();
        };
        let Ok(rd) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut out: Vec<SlotEntry> = Vec::new();
        for e in rd.flatten() {
            let Some(name) = e.file_name().to_str().map(|s| s.to_string()) else {
                continue;
            };
            if !paths::is_savestate_name(&name, &self.settings.format) {
                continue;
            }
            let Ok(slot) = name[..2].parse::<u8>() else {
                continue;
            };
            let path = e.path();
            let bytes = e.metadata().map(|m| m.len()).unwrap_or(0);
            out.push(SlotEntry {
                slot,
                modified: mtime_string(&path),
                path,
                bytes,
            });
        }
        out.sort_by_key(|s| s.slot);
        out
    }
}

pub(crate) fn mtime_string(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}
