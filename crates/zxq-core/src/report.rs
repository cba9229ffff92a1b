use serde_json::{json, Value};

use crate::layout::SlotEntry;
use crate::scan::ProgramSaves;

pub fn slots_json(entries: &[SlotEntry]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|e| {
                json!({
                    "slot": e.slot,
                    "path": e.path.display().to_string(),
                    "modified": e.modified,
                    "bytes": e.bytes,
                })
            })
            .collect(),
    )
}

pub fn overview_json(programs: &[ProgramSaves]) -> Value {
    Value::Array(
        programs
            .iter()
            .map(|p| {
                json!({
                    "program": p.program,
                    "dir": p.dir.display().to_string(),
                    "slots": p.slots,
                })
            })
            .collect(),
    )
}
