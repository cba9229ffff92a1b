use std::path::PathBuf;

/// Configuration surface the host emulator exposes to the slot manager.
#[derive(Debug, Clone)]
pub struct QuicksaveSettings {
    /// Emulator config directory; `None` means quicksave is inactive.
    pub config_root: Option<PathBuf>,
    /// Savestate extension, leading dot included (e.g. ".szx").
    pub format: String,
    /// Segregate saves under a per-machine directory segment.
    pub per_machine: bool,
    /// Current quicksave slot, 0-99.
    pub slot: u8,
}

impl Default for QuicksaveSettings {
    fn default() -> Self {
        Self {
            config_root: None,
            format: ".szx".to_string(),
            per_machine: false,
            slot: 0,
        }
    }
}
