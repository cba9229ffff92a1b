//! zxq-core: quicksave slot management for ZX Spectrum savestates
//!
//! This crate focuses on a small, well-factored surface:
//! - Save directory / slot filename derivation from settings + loaded program
//! - Program-name annotation stripping ("game (disk 1 of 2)" -> "game")
//! - Memoized "any save exists?" polling and savestate tree scans
//! - Quicksave/quickload through a host-provided [`SnapshotService`]
//! - Screen preview extraction and zip backup of the savestates tree
//!
pub mod backup;
pub mod error;
pub mod layout;
pub mod machine;
pub mod manager;
pub mod paths;
pub mod program;
pub mod report;
pub mod scan;
pub mod settings;
pub mod snapshot;

pub use error::SlotError;
pub use layout::{SaveLayout, SlotEntry};
pub use machine::MachineKind;
pub use manager::{LoadOutcome, SaveReceipt, SlotManager};
pub use program::ProgramNamer;
pub use scan::{ProgramSaves, ScanCache};
pub use settings::QuicksaveSettings;
pub use snapshot::{LoadMode, SnapshotInfo, SnapshotService, SCREEN_LEN};
