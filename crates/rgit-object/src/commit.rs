use bstr::{BStr, BString, ByteSlice};
use rgit_hash::ObjectId;
use rgit_utils::{GitDate, Identity, Signature};

use crate::ObjectError;

/// One commit header key with its values, in insertion order.
///
/// A key may carry several values (notably `parent`); values for the same
/// key are grouped under its first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitHeader {
    pub key: BString,
    pub values: Vec<BString>,
}

/// A commit object.
///
/// The payload is textual: a run of `key SP value LF` headers, a blank
/// line, then the message verbatim. A value may span multiple lines; each
/// continuation line starts with a single space, stripped on parse and
/// reinserted on serialization, so parse → serialize reproduces the
/// original payload byte for byte, whatever the keys are.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub headers: Vec<CommitHeader>,
    pub message: BString,
}

impl Commit {
    /// Parse commit payload (no object header).
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let mut commit = Commit::default();
        let mut pos = 0;

        while pos < payload.len() {
            let rest = &payload[pos..];
            let space = rest.find_byte(b' ');
            let lf = rest.find_byte(b'\n');

            // No space before the next newline (or none at all) means the
            // current line is blank: headers are done and everything after
            // this newline is the message.
            let blank = match (space, lf) {
                (None, _) => true,
                (Some(s), Some(n)) => n < s,
                _ => false,
            };
            if blank {
                let msg_start = lf.map(|n| n + 1).unwrap_or(rest.len());
                commit.message = BString::from(&rest[msg_start..]);
                break;
            }

            let space = space.unwrap();
            let key = &rest[..space];

            // The value ends at the first newline whose next byte is not a
            // space; newlines followed by a space are continuation lines.
            let mut end = lf.unwrap_or(rest.len());
            while end + 1 < rest.len() && rest[end + 1] == b' ' {
                end = rest[end + 1..]
                    .find_byte(b'\n')
                    .map(|p| p + end + 1)
                    .unwrap_or(rest.len());
            }

            let value = BString::from(rest[space + 1..end].replace(b"\n ", b"\n"));
            commit.push_header(key, value);

            pos += end + 1;
        }

        Ok(commit)
    }

    /// Append a value under `key`, grouping repeats under the first occurrence.
    pub fn push_header(&mut self, key: &[u8], value: BString) {
        match self.headers.iter_mut().find(|h| h.key == key) {
            Some(header) => header.values.push(value),
            None => self.headers.push(CommitHeader {
                key: BString::from(key),
                values: vec![value],
            }),
        }
    }

    /// Serialize commit payload: headers in insertion order with refolded
    /// continuation lines, a blank line, then the message.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for header in &self.headers {
            for value in &header.values {
                out.extend_from_slice(&header.key);
                out.push(b' ');
                for (i, line) in value.split(|&b| b == b'\n').enumerate() {
                    if i > 0 {
                        out.push(b'\n');
                        out.push(b' ');
                    }
                    out.extend_from_slice(line);
                }
                out.push(b'\n');
            }
        }
        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }

    /// Synthesize a commit from a tree, optional parent, and message.
    ///
    /// Author and committer lines carry the same identity and timestamp,
    /// captured once by the caller.
    pub fn from_params(
        tree: &ObjectId,
        parent: Option<&ObjectId>,
        message: &BStr,
        identity: &Identity,
        date: GitDate,
    ) -> Self {
        let mut commit = Commit {
            headers: Vec::new(),
            message: BString::from(message),
        };
        commit.push_header(b"tree", BString::from(tree.to_hex()));
        if let Some(parent) = parent {
            commit.push_header(b"parent", BString::from(parent.to_hex()));
        }
        let signature = identity.at(date).to_bytes();
        commit.push_header(b"author", signature.clone());
        commit.push_header(b"committer", signature);
        commit
    }

    /// All values recorded for `key`.
    pub fn values(&self, key: &[u8]) -> &[BString] {
        self.headers
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.values.as_slice())
            .unwrap_or(&[])
    }

    /// The first value recorded for `key`.
    pub fn value(&self, key: &[u8]) -> Option<&BStr> {
        self.values(key).first().map(|v| v.as_bstr())
    }

    /// The OID of the root tree (every commit has exactly one).
    pub fn tree_oid(&self) -> Result<ObjectId, ObjectError> {
        let value = self
            .value(b"tree")
            .ok_or(ObjectError::MissingCommitField { field: "tree" })?;
        let hex = std::str::from_utf8(value)
            .map_err(|_| ObjectError::InvalidHeader("non-UTF8 tree OID".into()))?;
        Ok(ObjectId::from_hex(hex)?)
    }

    /// Parent commit OIDs, empty for a root commit.
    pub fn parents(&self) -> Result<Vec<ObjectId>, ObjectError> {
        self.values(b"parent")
            .iter()
            .map(|value| {
                let hex = std::str::from_utf8(value)
                    .map_err(|_| ObjectError::InvalidHeader("non-UTF8 parent OID".into()))?;
                Ok(ObjectId::from_hex(hex)?)
            })
            .collect()
    }

    /// The first parent, if any.
    pub fn first_parent(&self) -> Result<Option<ObjectId>, ObjectError> {
        Ok(self.parents()?.into_iter().next())
    }

    /// The parsed author signature.
    pub fn author(&self) -> Result<Signature, ObjectError> {
        let value = self
            .value(b"author")
            .ok_or(ObjectError::MissingCommitField { field: "author" })?;
        Signature::parse(value).map_err(|e| ObjectError::InvalidSignature(e.to_string()))
    }
}
