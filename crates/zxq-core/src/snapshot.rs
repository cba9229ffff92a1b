use std::path::Path;

use crate::machine::MachineKind;

/// Bytes in a Spectrum display file (bitmap + attributes).
pub const SCREEN_LEN: usize = 6912;

/// How a snapshot load should treat host bookkeeping.
///
/// `Quickload` suppresses the "most recently loaded file" update so a
/// quickload never replaces the user's actual last-opened program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Normal,
    Quickload,
}

/// Decoded view of a snapshot, just deep enough for screen extraction.
#[derive(Debug)]
pub struct SnapshotInfo {
    pub machine: MachineKind,
    /// Last value written to port 0x7ffd, 0 for unbanked machines.
    pub memory_port_128: u8,
    /// (page number, contents) for every RAM page present.
    pub pages: Vec<(u8, Vec<u8>)>,
}

impl SnapshotInfo {
    pub fn page(&self, n: u8) -> Option<&[u8]> {
        self.pages
            .iter()
            .find(|(p, _)| *p == n)
            .map(|(_, data)| data.as_slice())
    }
}

/// Boundary to the host's snapshot machinery. Serialization format and
/// machine emulation live entirely on the other side of this trait.
pub trait SnapshotService {
    /// Serialize the running machine state to `path`.
    fn save_to(&mut self, path: &Path) -> Result<(), String>;

    /// Restore machine state from `path`.
    fn load_from(&mut self, path: &Path, mode: LoadMode) -> Result<(), String>;

    /// Decode raw snapshot bytes without activating them as the running
    /// machine.
    fn parse_snapshot(&self, data: &[u8]) -> Result<SnapshotInfo, String>;
}

/// Copy the visible screen out of a decoded snapshot. Picks bank 7 on
/// 128-style machines with the shadow screen selected, else bank 5; a
/// missing or short page leaves the remainder zeroed.
pub fn screen_bytes(info: &SnapshotInfo) -> Vec<u8> {
    let mut screen = vec![0u8; SCREEN_LEN];
    let page = info.machine.screen_page(info.memory_port_128);
    if let Some(data) = info.page(page) {
        let n = data.len().min(SCREEN_LEN);
        screen[..n].copy_from_slice(&data[..n]);
    }
    screen
}
