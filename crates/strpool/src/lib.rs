//! # String Pool
//!
//! A flat byte array of NUL-terminated UTF-8 strings, referenced from
//! fixed-size records by `i32` offset.
//!
//! Offset `0` is reserved for "absent": byte 0 of every pool is a NUL, so a
//! record that has no name simply stores `0`. Any offset `<= 0` or past the
//! end of the pool also reads as "no string".
//!
//! ## Example
//!
//! ```rust
//! use strpool::{StringPool, StringPoolBuilder};
//!
//! let mut b = StringPoolBuilder::new();
//! let off = b.intern(Some("Sirius"));
//! let pool = StringPool::from_bytes(b.into_bytes());
//! assert_eq!(pool.get(off).as_deref(), Some("Sirius"));
//! ```
use dashmap::DashMap;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

/// Accumulates strings for a pool, deduplicating exact matches.
pub struct StringPoolBuilder {
    bytes: Vec<u8>,
    offsets: HashMap<String, i32>,
}

impl StringPoolBuilder {
    /// Creates a builder whose pool starts with the reserved NUL byte.
    pub fn new() -> Self {
        Self {
            bytes: vec![0],
            offsets: HashMap::new(),
        }
    }

    /// Interns `value` and returns its offset.
    ///
    /// `None`, empty and whitespace-only values map to offset `0`. An exact
    /// string that was interned before returns the earlier offset.
    pub fn intern(&mut self, value: Option<&str>) -> i32 {
        let value = match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => return 0,
        };
        if let Some(&off) = self.offsets.get(value) {
            return off;
        }
        let off = self.bytes.len() as i32;
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.push(0);
        self.offsets.insert(value.to_owned(), off);
        off
    }

    /// Size of the pool in bytes, including the leading NUL.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A builder always holds at least the reserved NUL.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.len() <= 1
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes the raw pool bytes to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.bytes)
    }
}

impl Default for StringPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of the pool with a memoised decode cache.
///
/// `get` takes `&self` and is safe to call from many threads. The cache is a
/// write-once-per-key map; two threads racing on the same offset decode the
/// same bytes, so whichever insert wins is indistinguishable.
pub struct StringPool {
    bytes: Vec<u8>,
    cache: DashMap<i32, Arc<str>>,
}

impl StringPool {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            cache: DashMap::new(),
        }
    }

    /// Decodes the string at `offset`.
    ///
    /// Returns `None` for offsets `<= 0` or `>= len()`. The string runs to
    /// the next NUL or the end of the pool; invalid UTF-8 is replaced
    /// lossily. An empty string (offset pointing at a NUL) is also `None`.
    pub fn get(&self, offset: i32) -> Option<Arc<str>> {
        let start = usize::try_from(offset).ok().filter(|&s| s > 0)?;
        if start >= self.bytes.len() {
            return None;
        }
        if let Some(hit) = self.cache.get(&offset) {
            return Some(Arc::clone(hit.value()));
        }

        let tail = &self.bytes[start..];
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        if end == 0 {
            return None;
        }
        let decoded: Arc<str> = Arc::from(String::from_utf8_lossy(&tail[..end]).as_ref());
        let entry = self.cache.entry(offset).or_insert_with(|| decoded);
        Some(Arc::clone(entry.value()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of decoded strings currently memoised.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for StringPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringPool")
            .field("bytes", &self.bytes.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}
