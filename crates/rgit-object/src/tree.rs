use bstr::{BStr, BString, ByteSlice};
use rgit_hash::ObjectId;

use crate::{ObjectError, ObjectType};

/// A tree entry mode: octal ASCII on disk, stored without leading zeros.
///
/// Five characters for directories (`40000`), six for files (`100xxx`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryMode(u32);

impl EntryMode {
    /// Regular file (100644).
    pub const REGULAR: Self = Self(0o100644);
    /// Executable file (100755).
    pub const EXECUTABLE: Self = Self(0o100755);
    /// Subdirectory (40000).
    pub const TREE: Self = Self(0o40000);

    /// Parse from octal ASCII bytes as stored in a tree entry.
    ///
    /// The stored form must be 5 or 6 characters long.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        if s.len() != 5 && s.len() != 6 {
            return Err(ObjectError::InvalidTreeEntry {
                offset: 0,
                reason: format!("bad mode '{}'", s.as_bstr()),
            });
        }
        Self::from_text(s)
    }

    /// Parse from octal ASCII of any width (human-typed listings may pad).
    pub fn from_text(s: &[u8]) -> Result<Self, ObjectError> {
        let mut raw: u32 = 0;
        if s.is_empty() {
            return Err(ObjectError::InvalidTreeEntry {
                offset: 0,
                reason: "empty mode".into(),
            });
        }
        for &b in s {
            if !(b'0'..=b'7').contains(&b) {
                return Err(ObjectError::InvalidTreeEntry {
                    offset: 0,
                    reason: format!("bad mode '{}'", s.as_bstr()),
                });
            }
            raw = raw
                .checked_mul(8)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
                .ok_or_else(|| ObjectError::InvalidTreeEntry {
                    offset: 0,
                    reason: format!("mode overflow '{}'", s.as_bstr()),
                })?;
        }
        Ok(Self(raw))
    }

    /// Serialize to the stored octal form, leading zeros stripped.
    pub fn as_bytes(&self) -> BString {
        BString::from(format!("{:o}", self.0))
    }

    /// Render zero-padded to six characters, as `ls-tree` prints it.
    pub fn padded(&self) -> String {
        format!("{:06o}", self.0)
    }

    /// Get the raw numeric value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Is this a tree (directory) entry?
    pub fn is_tree(&self) -> bool {
        self.0 == 0o40000
    }

    /// The low nine permission bits, applied to checked-out files.
    pub fn perm_bits(&self) -> u32 {
        self.0 & 0o777
    }
}

/// A single entry in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: BString,
    pub oid: ObjectId,
}

/// A tree object — a directory listing.
///
/// The on-disk payload is a sequence of `<mode> <name>\0<20 oid bytes>`
/// entries with no header or terminator. Canonical order is lexicographic
/// by name bytes; parsing accepts any order, serialization emits canonical
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tree payload from the binary format.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < payload.len() {
            let space_pos = payload[pos..]
                .iter()
                .position(|&b| b == b' ')
                .ok_or_else(|| ObjectError::InvalidTreeEntry {
                    offset: pos,
                    reason: "missing space after mode".into(),
                })?
                + pos;

            let mode = EntryMode::from_bytes(&payload[pos..space_pos]).map_err(|e| match e {
                ObjectError::InvalidTreeEntry { reason, .. } => {
                    ObjectError::InvalidTreeEntry { offset: pos, reason }
                }
                other => other,
            })?;

            let name_start = space_pos + 1;
            let null_pos = payload[name_start..]
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| ObjectError::InvalidTreeEntry {
                    offset: name_start,
                    reason: "missing null after name".into(),
                })?
                + name_start;

            let name = BString::from(&payload[name_start..null_pos]);

            let oid_start = null_pos + 1;
            let oid_end = oid_start + 20;
            if oid_end > payload.len() {
                return Err(ObjectError::InvalidTreeEntry {
                    offset: oid_start,
                    reason: "truncated OID".into(),
                });
            }
            let oid = ObjectId::from_bytes(&payload[oid_start..oid_end])?;

            entries.push(TreeEntry { mode, name, oid });
            pos = oid_end;
        }

        Ok(Self { entries })
    }

    /// Parse a human-typed listing as accepted by `mktree`.
    ///
    /// Each non-empty line is `<mode> SP <kind> SP <hex-oid> TAB <name>`;
    /// the name may contain spaces.
    pub fn from_text(input: &[u8]) -> Result<Self, ObjectError> {
        let mut payload = Vec::new();

        for (idx, line) in input.split(|&b| b == b'\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;

            let tab_pos = line.find_byte(b'\t').ok_or_else(|| {
                ObjectError::InvalidTreeText {
                    line: line_no,
                    reason: "missing TAB before name".into(),
                }
            })?;
            let name = &line[tab_pos + 1..];
            if name.is_empty() {
                return Err(ObjectError::InvalidTreeText {
                    line: line_no,
                    reason: "empty name".into(),
                });
            }

            let mut fields = line[..tab_pos].fields();
            let (mode_str, kind_str, hex_str) =
                match (fields.next(), fields.next(), fields.next(), fields.next()) {
                    (Some(m), Some(k), Some(h), None) => (m, k, h),
                    _ => {
                        return Err(ObjectError::InvalidTreeText {
                            line: line_no,
                            reason: "expected '<mode> <kind> <oid>\\t<name>'".into(),
                        })
                    }
                };

            let mode = EntryMode::from_text(mode_str).map_err(|_| {
                ObjectError::InvalidTreeText {
                    line: line_no,
                    reason: format!("bad mode '{}'", mode_str.as_bstr()),
                }
            })?;
            // The kind column is informational but must at least be a known kind.
            ObjectType::from_bytes(kind_str).map_err(|_| ObjectError::InvalidTreeText {
                line: line_no,
                reason: format!("bad object kind '{}'", kind_str.as_bstr()),
            })?;
            let hex = std::str::from_utf8(hex_str).ok().and_then(|h| {
                ObjectId::from_hex(h).ok()
            });
            let oid = hex.ok_or_else(|| ObjectError::InvalidTreeText {
                line: line_no,
                reason: format!("bad object id '{}'", hex_str.as_bstr()),
            })?;

            payload.extend_from_slice(&mode.as_bytes());
            payload.push(b' ');
            payload.extend_from_slice(name);
            payload.push(0);
            payload.extend_from_slice(oid.as_bytes());
        }

        Self::parse(&payload)
    }

    /// Serialize tree payload to the binary format in canonical name order.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = Vec::new();
        for entry in sorted {
            out.extend_from_slice(&entry.mode.as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(0);
            out.extend_from_slice(entry.oid.as_bytes());
        }
        out
    }

    /// Sort entries into canonical order in place.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Lookup an entry by name.
    pub fn find(&self, name: &BStr) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name.as_bstr() == name)
    }

    /// Iterate entries.
    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOB_HEX: &str = "557db03de997c86a4a028e1ebd3a1ceb225be238";

    fn entry(mode: EntryMode, name: &str, hex: &str) -> TreeEntry {
        TreeEntry {
            mode,
            name: BString::from(name),
            oid: ObjectId::from_hex(hex).unwrap(),
        }
    }

    #[test]
    fn mode_from_bytes() {
        assert_eq!(EntryMode::from_bytes(b"100644").unwrap(), EntryMode::REGULAR);
        assert_eq!(
            EntryMode::from_bytes(b"100755").unwrap(),
            EntryMode::EXECUTABLE
        );
        assert_eq!(EntryMode::from_bytes(b"40000").unwrap(), EntryMode::TREE);
    }

    #[test]
    fn mode_rejects_bad_width() {
        // Stored modes are 5 chars (dirs) or 6 chars (files).
        assert!(EntryMode::from_bytes(b"644").is_err());
        assert!(EntryMode::from_bytes(b"0100644").is_err());
        assert!(EntryMode::from_bytes(b"").is_err());
    }

    #[test]
    fn mode_rejects_non_octal() {
        assert!(EntryMode::from_bytes(b"10064x").is_err());
        assert!(EntryMode::from_bytes(b"100648").is_err());
    }

    #[test]
    fn mode_strips_leading_zeros_on_emit() {
        let mode = EntryMode::from_text(b"040000").unwrap();
        assert!(mode.is_tree());
        assert_eq!(mode.as_bytes(), "40000");
        assert_eq!(mode.padded(), "040000");
    }

    #[test]
    fn mode_perm_bits() {
        assert_eq!(EntryMode::REGULAR.perm_bits(), 0o644);
        assert_eq!(EntryMode::EXECUTABLE.perm_bits(), 0o755);
    }

    #[test]
    fn parse_empty_tree() {
        assert!(Tree::parse(b"").unwrap().is_empty());
    }

    #[test]
    fn parse_single_entry() {
        let oid = ObjectId::from_hex(BLOB_HEX).unwrap();
        let mut data = Vec::new();
        data.extend_from_slice(b"100644 hello.txt\0");
        data.extend_from_slice(oid.as_bytes());

        let tree = Tree::parse(&data).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.entries[0].mode, EntryMode::REGULAR);
        assert_eq!(tree.entries[0].name, "hello.txt");
        assert_eq!(tree.entries[0].oid, oid);
    }

    #[test]
    fn parse_rejects_truncated_oid() {
        let data = b"100644 short\0abc";
        assert!(matches!(
            Tree::parse(data),
            Err(ObjectError::InvalidTreeEntry { .. })
        ));
    }

    #[test]
    fn serialize_sorts_by_name() {
        let tree = Tree {
            entries: vec![
                entry(EntryMode::REGULAR, "b.txt", BLOB_HEX),
                entry(EntryMode::TREE, "a-dir", BLOB_HEX),
            ],
        };

        let parsed = Tree::parse(&tree.serialize_payload()).unwrap();
        assert_eq!(parsed.entries[0].name, "a-dir");
        assert_eq!(parsed.entries[1].name, "b.txt");
    }

    #[test]
    fn canonical_payload_roundtrips_unchanged() {
        let tree = Tree {
            entries: vec![
                entry(EntryMode::TREE, "dir", BLOB_HEX),
                entry(EntryMode::REGULAR, "file", BLOB_HEX),
            ],
        };
        let payload = tree.serialize_payload();
        let reparsed = Tree::parse(&payload).unwrap();
        assert_eq!(reparsed.serialize_payload(), payload);
    }

    #[test]
    fn unsorted_input_canonicalizes() {
        // Parse an out-of-order payload, re-emit, parse again: stable.
        let mut data = Vec::new();
        for name in ["zz", "aa"] {
            data.extend_from_slice(b"100644 ");
            data.extend_from_slice(name.as_bytes());
            data.push(0);
            data.extend_from_slice(ObjectId::from_hex(BLOB_HEX).unwrap().as_bytes());
        }
        let tree = Tree::parse(&data).unwrap();
        assert_eq!(tree.entries[0].name, "zz");

        let canonical = tree.serialize_payload();
        assert_ne!(canonical, data);
        let reparsed = Tree::parse(&canonical).unwrap();
        assert_eq!(reparsed.entries[0].name, "aa");
        assert_eq!(reparsed.serialize_payload(), canonical);
    }

    #[test]
    fn from_text_single_line() {
        let input = format!("100644 blob {}\ttestfile\n", BLOB_HEX);
        let tree = Tree::from_text(input.as_bytes()).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.entries[0].name, "testfile");
        assert_eq!(tree.serialize_payload().len(), 36);
    }

    #[test]
    fn from_text_name_with_spaces() {
        let input = format!("100644 blob {}\ta file name\n", BLOB_HEX);
        let tree = Tree::from_text(input.as_bytes()).unwrap();
        assert_eq!(tree.entries[0].name, "a file name");
    }

    #[test]
    fn from_text_strips_leading_zeros() {
        let input = format!("040000 tree {}\tsubdir\n", BLOB_HEX);
        let tree = Tree::from_text(input.as_bytes()).unwrap();
        assert!(tree.entries[0].mode.is_tree());
        // The stored form has no leading zero.
        assert!(tree.serialize_payload().starts_with(b"40000 "));
    }

    #[test]
    fn from_text_rejects_bad_lines() {
        assert!(Tree::from_text(b"100644 blob deadbeef\tx\n").is_err()); // short oid
        assert!(Tree::from_text(b"100644 blob\tx\n").is_err()); // missing field
        let no_tab = format!("100644 blob {} x\n", BLOB_HEX);
        assert!(Tree::from_text(no_tab.as_bytes()).is_err());
        let bad_kind = format!("100644 tag {}\tx\n", BLOB_HEX);
        assert!(Tree::from_text(bad_kind.as_bytes()).is_err());
    }

    #[test]
    fn find_entry() {
        let tree = Tree {
            entries: vec![
                entry(EntryMode::REGULAR, "README.md", BLOB_HEX),
                entry(EntryMode::TREE, "src", BLOB_HEX),
            ],
        };
        assert!(tree.find(BStr::new("README.md")).is_some());
        assert!(tree.find(BStr::new("nonexistent")).is_none());
    }
}
