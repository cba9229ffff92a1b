use std::path::Path;

use regex::Regex;

/// Derives the per-program directory name from the loaded file's path by
/// stripping disk/tape/side/part annotations, e.g.
/// "game (disk 1 of 2).tap" -> "game".
pub struct ProgramNamer {
    patterns: Vec<Regex>,
}

/// Ordered annotation patterns applied to the file stem. Kept as data so
/// frontends can extend or replace the list.
pub fn default_annotation_patterns() -> Vec<Regex> {
    // "(disk 1 of 2)", "[side A]", "- part 3", "tape 2" and similar
    let src = r"(?i)[\s_-]*[(\[]*\s*(?:disk|tape|side|part)[\s[:punct:]]*[abcd1-4](?:\s*of\s*[1-4])?\s*[)\]]*[\s_-]*";
    vec![Regex::new(src).expect("annotation pattern")]
}

impl Default for ProgramNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramNamer {
    pub fn new() -> Self {
        Self {
            patterns: default_annotation_patterns(),
        }
    }

    pub fn with_patterns(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Program name for a loaded file, or `None` when the path has no
    /// usable stem. A stem the patterns would erase entirely is kept as-is.
    pub fn derive(&self, loaded: &Path) -> Option<String> {
        let stem = loaded.file_stem()?.to_str()?;
        let mut name = stem.to_string();
        for re in &self.patterns {
            name = re.replace_all(&name, "").into_owned();
        }
        let name = name
            .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '.' | ','))
            .to_string();
        if name.is_empty() {
            Some(stem.trim().to_string())
        } else {
            Some(name)
        }
    }
}
