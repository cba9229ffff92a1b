use std::fs;
use std::path::{Path, PathBuf};

use zxq_core::{
    LoadMode, LoadOutcome, MachineKind, QuicksaveSettings, SaveLayout, ScanCache, SlotError,
    SlotManager, SnapshotInfo, SnapshotService, SCREEN_LEN,
};

// Throwaway snapshot service: saves write a fixed blob, loads are recorded,
// parsing decodes the tiny format built by encode_snapshot.
struct FakeSnapshots {
    state: Vec<u8>,
    loads: Vec<(PathBuf, LoadMode)>,
}

impl FakeSnapshots {
    fn new(state: Vec<u8>) -> Self {
        Self {
            state,
            loads: Vec::new(),
        }
    }
}

impl SnapshotService for FakeSnapshots {
    fn save_to(&mut self, path: &Path) -> Result<(), String> {
        fs::write(path, &self.state).map_err(|e| e.to_string())
    }

    fn load_from(&mut self, path: &Path, mode: LoadMode) -> Result<(), String> {
        self.loads.push((path.to_path_buf(), mode));
        Ok(())
    }

    fn parse_snapshot(&self, data: &[u8]) -> Result<SnapshotInfo, String> {
        decode_snapshot(data)
    }
}

// [machine tag, 0x7ffd value, page count, (page, len u32 le, bytes)*]
fn encode_snapshot(machine_tag: u8, port: u8, pages: &[(u8, Vec<u8>)]) -> Vec<u8> {
    let mut out = vec![machine_tag, port, pages.len() as u8];
    for (page, data) in pages {
        out.push(*page);
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
    }
    out
}

fn decode_snapshot(data: &[u8]) -> Result<SnapshotInfo, String> {
    if data.len() < 3 {
        return Err("truncated".into());
    }
    let machine = match data[0] {
        0 => MachineKind::Spectrum48,
        1 => MachineKind::Spectrum128,
        2 => MachineKind::Pentagon,
        _ => return Err("unknown machine".into()),
    };
    let memory_port_128 = data[1];
    let mut pages = Vec::new();
    let mut pos = 3usize;
    for _ in 0..data[2] {
        let page = data[pos];
        let len = u32::from_le_bytes(data[pos + 1..pos + 5].try_into().unwrap()) as usize;
        pages.push((page, data[pos + 5..pos + 5 + len].to_vec()));
        pos += 5 + len;
    }
    Ok(SnapshotInfo {
        machine,
        memory_port_128,
        pages,
    })
}

fn layout_for(root: &Path, program: &str, per_machine: bool) -> SaveLayout {
    let settings = QuicksaveSettings {
        config_root: Some(root.to_path_buf()),
        per_machine,
        ..QuicksaveSettings::default()
    };
    let mut layout = SaveLayout::new(settings, MachineKind::Spectrum48);
    layout.set_loaded_program(Some(PathBuf::from(program)));
    layout
}

#[test]
fn slot_basenames_are_two_digits_plus_extension() {
    for slot in 0..=99u8 {
        let name = zxq_core::paths::slot_basename(slot, ".szx");
        assert_eq!(name.len(), 6);
        assert!(zxq_core::paths::is_savestate_name(&name, ".szx"), "{name}");
        assert_eq!(
            zxq_core::paths::slot_from_name(Path::new(&name)),
            Some(slot)
        );
    }
    assert!(!zxq_core::paths::is_savestate_name("3.szx", ".szx"));
    assert!(!zxq_core::paths::is_savestate_name("ab.szx", ".szx"));
    assert!(!zxq_core::paths::is_savestate_name("03.sna", ".szx"));
    assert!(!zxq_core::paths::is_savestate_name("003.szx", ".szx"));

    // Only a stem of exactly two digits names a slot.
    assert_eq!(zxq_core::paths::slot_from_name(Path::new("100.szx")), None);
    assert_eq!(zxq_core::paths::slot_from_name(Path::new("7.szx")), None);
    assert_eq!(zxq_core::paths::slot_from_name(Path::new("0a.szx")), None);
}

#[test]
fn program_name_strips_annotations() {
    let namer = zxq_core::ProgramNamer::new();
    let name = namer.derive(Path::new("/tapes/game (disk 1 of 2).tap"));
    assert_eq!(name.as_deref(), Some("game"));
    let name = namer.derive(Path::new("Jet Set Willy [side A].tzx"));
    assert_eq!(name.as_deref(), Some("Jet Set Willy"));
    let name = namer.derive(Path::new("/tapes/plain.z80"));
    assert_eq!(name.as_deref(), Some("plain"));
}

#[test]
fn save_dir_honours_per_machine_segment() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    assert_eq!(
        layout.save_dir().unwrap(),
        dir.path().join("savestates").join("game")
    );
    let layout = layout_for(dir.path(), "game.tap", true);
    assert_eq!(
        layout.save_dir().unwrap(),
        dir.path()
            .join("savestates")
            .join("Spectrum 48K")
            .join("game")
    );
}

#[test]
fn layout_unavailable_without_program_or_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut layout = layout_for(dir.path(), "game.tap", false);
    layout.set_loaded_program(None);
    assert!(!layout.possible());
    assert!(layout.save_dir().is_none());
    assert!(layout.label(0).is_none());

    let mut layout = layout_for(dir.path(), "game.tap", false);
    layout.settings.config_root = None;
    assert!(!layout.possible());
    assert!(layout.slot_path(0).is_none());
}

#[test]
fn ensure_save_dir_creates_chain() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", true);
    let created = layout.ensure_save_dir().unwrap();
    assert!(created.is_dir());
    assert_eq!(created, layout.save_dir().unwrap());
    // A second call is a no-op.
    layout.ensure_save_dir().unwrap();
}

#[test]
fn dir_state_tristate() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        zxq_core::paths::dir_state(dir.path()),
        zxq_core::paths::DirState::Exists
    ));
    assert!(matches!(
        zxq_core::paths::dir_state(&dir.path().join("missing")),
        zxq_core::paths::DirState::Absent
    ));
}

#[test]
fn any_save_scan_is_lazy() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("03.szx"), b"snap").unwrap();

    let mut cache = ScanCache::new();
    // First query after a directory change only primes the cache.
    assert!(!cache.any_save(dir.path(), ".szx"));
    assert!(cache.any_save(dir.path(), ".szx"));
    // A positive result sticks.
    assert!(cache.any_save(dir.path(), ".szx"));

    // Changing directory resets.
    let other = tempfile::tempdir().unwrap();
    assert!(!cache.any_save(other.path(), ".szx"));
}

#[test]
fn manager_any_save_exists_polls_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let save_dir = layout.ensure_save_dir().unwrap();
    fs::write(save_dir.join("00.szx"), b"snap").unwrap();

    let mut mgr = SlotManager::new(layout, FakeSnapshots::new(vec![1, 2, 3]));
    assert!(!mgr.any_save_exists());
    assert!(mgr.any_save_exists());
}

#[test]
fn any_save_exists_false_for_absent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let mut mgr = SlotManager::new(layout, FakeSnapshots::new(Vec::new()));
    assert!(!mgr.any_save_exists());
    assert!(!mgr.any_save_exists());
}

#[test]
fn save_writes_slot_file_and_reports_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game (disk 1 of 2).tap", false);
    let mut mgr = SlotManager::new(layout, FakeSnapshots::new(b"machine state".to_vec()));
    let receipt = mgr.save_slot(7).unwrap();
    assert_eq!(receipt.slot, 7);
    assert_eq!(
        receipt.path,
        dir.path().join("savestates").join("game").join("07.szx")
    );
    assert!(receipt.path.is_file());
    assert!(receipt.saved_at.is_some());
    assert!(mgr.slot_exists(7));
}

#[test]
fn load_on_empty_slot_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let mut mgr = SlotManager::new(layout, FakeSnapshots::new(Vec::new()));
    assert!(matches!(mgr.load_slot(4).unwrap(), LoadOutcome::NoSave));
    assert!(mgr.service().loads.is_empty());
}

#[test]
fn load_uses_quickload_mode() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let mut mgr = SlotManager::new(layout, FakeSnapshots::new(b"state".to_vec()));
    mgr.save_slot(0).unwrap();
    let out = mgr.load().unwrap();
    assert!(matches!(out, LoadOutcome::Loaded { slot: 0, .. }));
    assert_eq!(mgr.service().loads.len(), 1);
    assert_eq!(mgr.service().loads[0].1, LoadMode::Quickload);
}

#[test]
fn save_file_selects_slot_from_name() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let mut mgr = SlotManager::new(layout, FakeSnapshots::new(b"state".to_vec()));
    let receipt = mgr.save_file(Path::new("/anywhere/42.szx")).unwrap();
    assert_eq!(receipt.slot, 42);
    assert_eq!(mgr.layout().settings.slot, 42);
    assert!(matches!(
        mgr.load_file(Path::new("42.szx")).unwrap(),
        LoadOutcome::Loaded { slot: 42, .. }
    ));
}

#[test]
fn save_file_rejects_paths_without_slot_number() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let mut mgr = SlotManager::new(layout, FakeSnapshots::new(b"state".to_vec()));
    let err = mgr.save_file(Path::new("/anywhere/100.szx")).unwrap_err();
    assert!(matches!(err, SlotError::BadSlotName { .. }));
    assert!(err.to_string().contains("100.szx"));
    // Configured slot stays untouched.
    assert_eq!(mgr.layout().settings.slot, 0);
    let err = mgr.load_file(Path::new("autosave.szx")).unwrap_err();
    assert!(matches!(err, SlotError::BadSlotName { .. }));
}

#[test]
fn preview_of_missing_slot_is_blank() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let mgr = SlotManager::new(layout, FakeSnapshots::new(Vec::new()));
    let screen = mgr.screen_preview(9);
    assert_eq!(screen.len(), SCREEN_LEN);
    assert!(screen.iter().all(|&b| b == 0));
}

#[test]
fn preview_picks_screen_bank_from_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let save_dir = layout.ensure_save_dir().unwrap();

    // 48K machine: screen always comes from page 5.
    let snap48 = encode_snapshot(0, 0, &[(5, vec![0xAA; SCREEN_LEN])]);
    fs::write(save_dir.join("01.szx"), &snap48).unwrap();
    // 128K with bit 3 of 0x7ffd set: shadow screen in page 7.
    let snap128 = encode_snapshot(
        1,
        0x08,
        &[(5, vec![0xAA; SCREEN_LEN]), (7, vec![0xBB; 100])],
    );
    fs::write(save_dir.join("02.szx"), &snap128).unwrap();
    // Garbage never surfaces as an error.
    fs::write(save_dir.join("03.szx"), b"xx").unwrap();

    let mgr = SlotManager::new(layout, FakeSnapshots::new(Vec::new()));
    assert!(mgr.screen_preview(1).iter().all(|&b| b == 0xAA));

    let screen = mgr.screen_preview(2);
    assert!(screen[..100].iter().all(|&b| b == 0xBB));
    // Short page: remainder stays blank.
    assert!(screen[100..].iter().all(|&b| b == 0));

    let screen = mgr.screen_preview(3);
    assert_eq!(screen.len(), SCREEN_LEN);
    assert!(screen.iter().all(|&b| b == 0));
}

#[test]
fn labels_fit_display_budget() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    assert_eq!(layout.label(7).as_deref(), Some("07: game"));

    let layout = layout_for(dir.path(), "twenty characters aa.tap", false);
    let label = layout.label(3).unwrap();
    assert_eq!(label.len(), 19);
    assert!(label.starts_with("03: "));
    assert!(label.ends_with('>'));

    // 15-character name fits exactly, no marker.
    let layout = layout_for(dir.path(), "fifteen chars x.tap", false);
    let label = layout.label(3).unwrap();
    assert_eq!(label, "03: fifteen chars x");
    assert_eq!(label.len(), 19);
}

#[test]
fn labels_truncate_multibyte_names_per_char() {
    let dir = tempfile::tempdir().unwrap();

    // Long name with a multibyte char straddling the truncation point.
    let layout = layout_for(dir.path(), "abcdefghijklmé longer.tap", false);
    let label = layout.label(3).unwrap();
    assert_eq!(label.chars().count(), 19);
    assert!(label.ends_with('>'));
    assert!(label.starts_with("03: abcdefghijklm"));

    // 15 chars but well over 19 bytes: fits the display, no marker.
    let layout = layout_for(dir.path(), "ééééééééééééééé.tap", false);
    let label = layout.label(1).unwrap();
    assert_eq!(label, "01: ééééééééééééééé");
    assert_eq!(label.chars().count(), 19);
}

#[test]
fn occupied_slots_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_for(dir.path(), "game.tap", false);
    let save_dir = layout.ensure_save_dir().unwrap();
    fs::write(save_dir.join("12.szx"), b"b").unwrap();
    fs::write(save_dir.join("03.szx"), b"a").unwrap();
    fs::write(save_dir.join("notes.txt"), b"x").unwrap();
    fs::write(save_dir.join("7.szx"), b"x").unwrap();

    let slots = layout.occupied_slots();
    let nums: Vec<u8> = slots.iter().map(|s| s.slot).collect();
    assert_eq!(nums, vec![3, 12]);
    assert!(slots.iter().all(|s| s.modified.is_some()));

    let v = zxq_core::report::slots_json(&slots);
    let text = serde_json::to_string(&v).unwrap();
    assert!(text.contains("\"slot\":3"));
    assert!(text.contains("\"slot\":12"));
}

#[test]
fn tree_overview_groups_programs() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("savestates");
    fs::create_dir_all(root.join("alpha")).unwrap();
    fs::create_dir_all(root.join("beta")).unwrap();
    fs::write(root.join("alpha").join("00.szx"), b"a").unwrap();
    fs::write(root.join("alpha").join("02.szx"), b"a").unwrap();
    fs::write(root.join("beta").join("99.szx"), b"b").unwrap();
    fs::write(root.join("beta").join("junk.dat"), b"x").unwrap();

    let programs = zxq_core::scan::tree_overview(&root, ".szx");
    assert_eq!(programs.len(), 2);
    assert_eq!(programs[0].program, "alpha");
    assert_eq!(programs[0].slots, vec![0, 2]);
    assert_eq!(programs[1].program, "beta");
    assert_eq!(programs[1].slots, vec![99]);
}

#[test]
fn backup_zips_savestates_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("savestates");
    fs::create_dir_all(root.join("game")).unwrap();
    fs::write(root.join("game").join("00.szx"), b"snap").unwrap();
    let zip = zxq_core::backup::zip_backup_tree(&root, ".szx").unwrap();
    assert!(zip.exists());
    assert!(zip.file_name().unwrap().to_str().unwrap().ends_with(".zip"));
}
