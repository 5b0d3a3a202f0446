//! Short-prefix candidate lookup (short hex → matching stored OIDs).

use std::fs;

use rgit_hash::ObjectId;

use crate::{LooseError, LooseObjectStore};

/// Minimum abbreviation length; shorter prefixes never match objects.
pub const MINIMUM_ABBREV: usize = 4;

impl LooseObjectStore {
    /// Collect every stored OID whose hex form starts with `prefix`.
    ///
    /// Only the one fan-out directory named by the first two characters is
    /// scanned. Prefixes shorter than [`MINIMUM_ABBREV`] or longer than a
    /// full id return no candidates.
    pub fn prefix_candidates(&self, prefix: &str) -> Result<Vec<ObjectId>, LooseError> {
        if prefix.len() < MINIMUM_ABBREV
            || prefix.len() >= 40
            || !prefix.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Ok(Vec::new());
        }

        let prefix = prefix.to_ascii_lowercase();
        let shard = self.objects_dir().join(&prefix[..2]);
        let rest = &prefix[2..];

        let entries = match fs::read_dir(&shard) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LooseError::Io(e)),
        };

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.starts_with(rest) {
                let hex = format!("{}{}", &prefix[..2], name_str);
                if let Ok(oid) = ObjectId::from_hex(&hex) {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        matches.dedup();
        Ok(matches)
    }
}
