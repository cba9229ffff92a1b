/// Spectrum-family machine models a snapshot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineKind {
    Spectrum16,
    Spectrum48,
    Spectrum48Ntsc,
    Spectrum128,
    Spectrum128E,
    Plus2,
    Plus2A,
    Plus3,
    Plus3E,
    Se,
    Tc2048,
    Tc2068,
    Ts2068,
    Pentagon,
    Pentagon512,
    Pentagon1024,
    Scorpion,
}

impl MachineKind {
    /// Display name, also used as the per-machine directory segment.
    pub fn name(self) -> &'static str {
        match self {
            MachineKind::Spectrum16 => "Spectrum 16K",
            MachineKind::Spectrum48 => "Spectrum 48K",
            MachineKind::Spectrum48Ntsc => "Spectrum 48K (NTSC)",
            MachineKind::Spectrum128 => "Spectrum 128K",
            MachineKind::Spectrum128E => "Spectrum 128Ke",
            MachineKind::Plus2 => "Spectrum +2",
            MachineKind::Plus2A => "Spectrum +2A",
            MachineKind::Plus3 => "Spectrum +3",
            MachineKind::Plus3E => "Spectrum +3e",
            MachineKind::Se => "Spectrum SE",
            MachineKind::Tc2048 => "Timex TC2048",
            MachineKind::Tc2068 => "Timex TC2068",
            MachineKind::Ts2068 => "Timex TS2068",
            MachineKind::Pentagon => "Pentagon 128K",
            MachineKind::Pentagon512 => "Pentagon 512K",
            MachineKind::Pentagon1024 => "Pentagon 1024K",
            MachineKind::Scorpion => "Scorpion ZS 256",
        }
    }

    /// Parse a display name or a short alias ("48", "128", "+3", "pentagon").
    pub fn from_name(s: &str) -> Option<Self> {
        let t = s.trim();
        let all = [
            MachineKind::Spectrum16,
            MachineKind::Spectrum48,
            MachineKind::Spectrum48Ntsc,
            MachineKind::Spectrum128,
            MachineKind::Spectrum128E,
            MachineKind::Plus2,
            MachineKind::Plus2A,
            MachineKind::Plus3,
            MachineKind::Plus3E,
            MachineKind::Se,
            MachineKind::Tc2048,
            MachineKind::Tc2068,
            MachineKind::Ts2068,
            MachineKind::Pentagon,
            MachineKind::Pentagon512,
            MachineKind::Pentagon1024,
            MachineKind::Scorpion,
        ];
        if let Some(m) = all.iter().find(|m| m.name().eq_ignore_ascii_case(t)) {
            return Some(*m);
        }
        match t.to_ascii_lowercase().as_str() {
            "16" => Some(MachineKind::Spectrum16),
            "48" => Some(MachineKind::Spectrum48),
            "128" => Some(MachineKind::Spectrum128),
            "128e" => Some(MachineKind::Spectrum128E),
            "+2" | "plus2" => Some(MachineKind::Plus2),
            "+2a" | "plus2a" => Some(MachineKind::Plus2A),
            "+3" | "plus3" => Some(MachineKind::Plus3),
            "+3e" | "plus3e" => Some(MachineKind::Plus3E),
            "se" => Some(MachineKind::Se),
            "2048" | "tc2048" => Some(MachineKind::Tc2048),
            "tc2068" => Some(MachineKind::Tc2068),
            "ts2068" => Some(MachineKind::Ts2068),
            "pentagon" => Some(MachineKind::Pentagon),
            "pentagon512" => Some(MachineKind::Pentagon512),
            "pentagon1024" => Some(MachineKind::Pentagon1024),
            "scorpion" => Some(MachineKind::Scorpion),
            _ => None,
        }
    }

    /// Machines whose display buffer can live in bank 7 (128-style paging).
    pub fn has_screen_banking(self) -> bool {
        matches!(
            self,
            MachineKind::Spectrum128
                | MachineKind::Spectrum128E
                | MachineKind::Plus2
                | MachineKind::Plus2A
                | MachineKind::Plus3
                | MachineKind::Plus3E
                | MachineKind::Se
                | MachineKind::Pentagon
                | MachineKind::Pentagon512
                | MachineKind::Pentagon1024
                | MachineKind::Scorpion
        )
    }

    /// RAM page holding the visible screen, given the last 0x7ffd write.
    pub fn screen_page(self, memory_port_128: u8) -> u8 {
        if self.has_screen_banking() && memory_port_128 & 0x08 != 0 {
            7
        } else {
            5
        }
    }
}
