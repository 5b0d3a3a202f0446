use std::fmt;
use std::str::FromStr;

use crate::HashError;

/// Number of raw bytes in an object identifier.
pub const OID_RAW_LEN: usize = 20;
/// Number of hex characters in a rendered object identifier.
pub const OID_HEX_LEN: usize = 40;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Decode one hex character to its nibble value, either case.
fn decode_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// An object identifier — the SHA-1 hash of an object's framed content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OID_RAW_LEN]);

impl ObjectId {
    /// The null OID (all zeros).
    pub const NULL: Self = Self([0u8; OID_RAW_LEN]);

    /// Create an ObjectId from raw digest bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        if bytes.len() != OID_RAW_LEN {
            return Err(HashError::InvalidHashLength {
                expected: OID_RAW_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; OID_RAW_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Create an ObjectId from a 40-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        if hex.len() != OID_HEX_LEN {
            return Err(HashError::InvalidHexLength {
                expected: OID_HEX_LEN,
                actual: hex.len(),
            });
        }
        let mut bytes = [0u8; OID_RAW_LEN];
        for (i, pair) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = decode_nibble(pair[0]).ok_or(HashError::InvalidHex {
                position: i * 2,
                character: pair[0] as char,
            })?;
            let lo = decode_nibble(pair[1]).ok_or(HashError::InvalidHex {
                position: i * 2 + 1,
                character: pair[1] as char,
            })?;
            bytes[i] = hi << 4 | lo;
        }
        Ok(Self(bytes))
    }

    /// Get the raw bytes of the hash.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Check if this is the null (all-zeros) OID.
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Get the hex string representation (lowercase).
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(OID_HEX_LEN);
        for &b in &self.0 {
            hex.push(HEX_DIGITS[usize::from(b >> 4)] as char);
            hex.push(HEX_DIGITS[usize::from(b & 0xf)] as char);
        }
        hex
    }

    /// Check if this OID's hex form starts with the given prefix,
    /// case-insensitively. Compares nibble by nibble; a prefix that is not
    /// valid hex (or is longer than a full id) never matches.
    pub fn starts_with_hex(&self, prefix: &str) -> bool {
        prefix.bytes().enumerate().all(|(i, c)| {
            let (Some(want), Some(&byte)) = (decode_nibble(c), self.0.get(i / 2)) else {
                return false;
            };
            let have = if i % 2 == 0 { byte >> 4 } else { byte & 0xf };
            have == want
        })
    }

    /// Get the loose object path component: `"xx/xxxx..."`.
    pub fn loose_path(&self) -> String {
        let hex = self.to_hex();
        format!("{}/{}", &hex[..2], &hex[2..])
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE_HEX: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

    #[test]
    fn from_hex() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        assert_eq!(oid.as_bytes().len(), 20);
        assert_eq!(oid.as_bytes()[0], 0xda);
        assert_eq!(oid.as_bytes()[19], 0x09);
    }

    #[test]
    fn display_roundtrip() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        let displayed = oid.to_string();
        assert_eq!(displayed, SAMPLE_HEX);
        let parsed: ObjectId = displayed.parse().unwrap();
        assert_eq!(parsed, oid);
    }

    #[test]
    fn hex_roundtrip_patterned_bytes() {
        let bytes: Vec<u8> = (0..20u8).map(|i| i.wrapping_mul(13)).collect();
        let oid = ObjectId::from_bytes(&bytes).unwrap();
        let again = ObjectId::from_hex(&oid.to_hex()).unwrap();
        assert_eq!(oid, again);
    }

    #[test]
    fn debug_shows_short_hash() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        assert_eq!(format!("{:?}", oid), "ObjectId(da39a3ee)");
    }

    #[test]
    fn ordering() {
        let a = ObjectId::from_hex("0000000000000000000000000000000000000001").unwrap();
        let b = ObjectId::from_hex("0000000000000000000000000000000000000002").unwrap();
        assert!(a < b);
    }

    #[test]
    fn hashmap_key() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        let mut map = HashMap::new();
        map.insert(oid, "value");
        assert_eq!(map.get(&oid), Some(&"value"));
    }

    #[test]
    fn null_oid() {
        assert!(ObjectId::NULL.is_null());
        assert!(!ObjectId::from_hex(SAMPLE_HEX).unwrap().is_null());
    }

    #[test]
    fn from_bytes_roundtrip() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        let reconstructed = ObjectId::from_bytes(oid.as_bytes()).unwrap();
        assert_eq!(oid, reconstructed);
    }

    #[test]
    fn from_bytes_wrong_length() {
        let err = ObjectId::from_bytes(&[0; 10]).unwrap_err();
        assert!(matches!(
            err,
            HashError::InvalidHashLength {
                expected: 20,
                actual: 10
            }
        ));
    }

    #[test]
    fn invalid_hex_chars() {
        let err = ObjectId::from_hex("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz").unwrap_err();
        assert!(matches!(err, HashError::InvalidHex { .. }));
    }

    #[test]
    fn invalid_hex_reports_position() {
        let mut hex = String::from(SAMPLE_HEX);
        hex.replace_range(5..6, "g");
        match ObjectId::from_hex(&hex).unwrap_err() {
            HashError::InvalidHex {
                position: 5,
                character: 'g',
            } => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_hex_length() {
        let err = ObjectId::from_hex("abcd").unwrap_err();
        assert!(matches!(err, HashError::InvalidHexLength { .. }));
    }

    #[test]
    fn case_insensitive_hex_decode() {
        let lower = ObjectId::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let upper = ObjectId::from_hex("DA39A3EE5E6B4B0D3255BFEF95601890AFD80709").unwrap();
        let mixed = ObjectId::from_hex("Da39A3eE5e6b4b0d3255bfef95601890afd80709").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn starts_with_hex_prefix() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        assert!(oid.starts_with_hex("da39"));
        assert!(oid.starts_with_hex("DA39"));
        assert!(oid.starts_with_hex("da3")); // odd lengths compare the high nibble
        assert!(!oid.starts_with_hex("abcd"));
        assert!(!oid.starts_with_hex("da3x"));
    }

    #[test]
    fn starts_with_hex_full_and_overlong() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        assert!(oid.starts_with_hex(SAMPLE_HEX));
        let overlong = format!("{SAMPLE_HEX}ff");
        assert!(!oid.starts_with_hex(&overlong));
    }

    #[test]
    fn loose_path() {
        let oid = ObjectId::from_hex(SAMPLE_HEX).unwrap();
        assert_eq!(oid.loose_path(), format!("da/{}", &SAMPLE_HEX[2..]));
    }
}
