//! Fixed-capacity, sentinel-terminated string buffers.
//!
//! Every representation stores a string field as `capacity + 1` characters.
//! The last slot belongs to the terminator and is never written by a content
//! copy. A set blanks the content area, copies as much of the input as fits
//! and puts the sentinel right after it; a get scans backwards from the last
//! content slot, skipping blanks and sentinels. The emitted accessors in both
//! languages implement this same contract, and the native module's string
//! initializers are produced from this model.

/// Terminator written after string content.
pub const SENTINEL: u8 = 0;

/// Padding character for unused content slots.
pub const BLANK: u8 = b' ';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelBuffer {
    bytes: Vec<u8>,
}

impl SentinelBuffer {
    /// An empty buffer: blank content with the reserved sentinel slot.
    pub fn new(capacity: usize) -> Self {
        let mut bytes = vec![BLANK; capacity + 1];
        bytes[capacity] = SENTINEL;
        Self { bytes }
    }

    /// Wrap raw physical storage (content plus the reserved slot).
    pub fn from_raw(bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Some(Self { bytes })
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn physical_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Store `content`, truncated to capacity. Returns the number of bytes
    /// copied.
    pub fn set(&mut self, content: &str) -> usize {
        let capacity = self.capacity();
        let count = content.len().min(capacity);

        self.bytes[..capacity].fill(BLANK);
        self.bytes[..count].copy_from_slice(&content.as_bytes()[..count]);
        self.bytes[count] = SENTINEL;
        count
    }

    /// Length of the logical content.
    pub fn content_len(&self) -> usize {
        self.bytes[..self.capacity()]
            .iter()
            .rposition(|b| *b != BLANK && *b != SENTINEL)
            .map_or(0, |last| last + 1)
    }

    pub fn get(&self) -> String {
        String::from_utf8_lossy(&self.bytes[..self.content_len()]).into_owned()
    }
}
