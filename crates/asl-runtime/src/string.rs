//! Read-only byte strings with checked indexing.

use std::fmt;

use asl_core::{Error, Outcome, PrimitiveKind};
use asl_mem::{ops, BoxedValue, MemoryRegion};
use tracing::debug;

/// A NUL-terminated byte string in its own region.
///
/// The length is the number of bytes before the first NUL, so content with
/// an embedded NUL is cut short there. Indexing is over raw bytes, not
/// characters, and follows the same bound policy as
/// [`DynamicArray`](crate::DynamicArray).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexableString {
    data: MemoryRegion,
    len: usize,
}

impl IndexableString {
    /// Copy `s` into a new string.
    pub fn new(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Copy `bytes` into a new string, appending the NUL sentinel.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut data = MemoryRegion::zeroed(bytes.len() + 1);
        data.as_bytes_mut()[..bytes.len()].copy_from_slice(bytes);
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        debug!(len, "string created");
        Self { data, len }
    }

    /// Number of bytes before the NUL sentinel.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the string has no bytes before the sentinel.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check(&self, index: usize) -> Outcome<()> {
        if index >= self.len {
            return Err(Error::index_out_of_bounds());
        }
        Ok(())
    }

    /// The byte at `index`.
    pub fn get(&self, index: usize) -> Outcome<u8> {
        self.check(index)?;
        Ok(self.data.read::<u8>(index)?)
    }

    /// The byte at `index`, boxed as a `u8`.
    pub fn get_boxed(&self, index: usize) -> Outcome<BoxedValue> {
        self.check(index)?;
        Ok((ops(PrimitiveKind::U8).boxed)(&self.data, index)?)
    }

    /// The content bytes, without the sentinel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data.as_bytes()[..self.len]
    }

    /// The content bytes followed by the NUL sentinel.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data.as_bytes()[..=self.len]
    }

    /// The content as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }
}

impl From<&str> for IndexableString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for IndexableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asl_core::Value;

    #[test]
    fn index_within_and_past_end() {
        let s = IndexableString::new("hi");
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(0).unwrap(), b'h');
        assert_eq!(s.get(1).unwrap(), b'i');
        let err = s.get(2).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.message(), "Index out of Bounds");
    }

    #[test]
    fn sentinel_is_stored() {
        let s = IndexableString::from("abc");
        assert_eq!(s.as_bytes_with_nul(), b"abc\0");
        assert_eq!(s.as_bytes(), b"abc");
    }

    #[test]
    fn empty_string() {
        let s = IndexableString::new("");
        assert!(s.is_empty());
        assert!(s.get(0).is_err());
        assert_eq!(s.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn embedded_nul_truncates() {
        let s = IndexableString::from_bytes(b"ab\0cd");
        assert_eq!(s.len(), 2);
        assert!(s.get(3).is_err());
        assert_eq!(s.to_string(), "ab");
    }

    #[test]
    fn boxed_byte() {
        let s = IndexableString::new("xyz");
        let b = s.get_boxed(2).unwrap();
        assert_eq!(b.unbox(), Value::U8(b'z'));
        assert!(s.get_boxed(3).is_err());
    }

    #[test]
    fn indexing_is_by_byte() {
        let s = IndexableString::new("é");
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(0).unwrap(), 0xc3);
        assert_eq!(s.as_str(), Some("é"));
        assert_eq!(IndexableString::from_bytes(&[0xff]).as_str(), None);
    }
}
