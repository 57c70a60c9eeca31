use crate::bits::{and_in_place, popcount};
use crate::error::CompareError;

/// Raw bytes of one decoded bloom filter.
///
/// The buffer is owned by whoever decoded it and released when it goes out of
/// scope, so every early return in the comparator frees what it allocated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
}

impl BitBuffer {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u64 {
        popcount(&self.bytes)
    }

    /// Replace this buffer with its bitwise AND against `other`.
    pub fn intersect(&mut self, other: &BitBuffer) -> Result<(), CompareError> {
        if self.len() != other.len() {
            return Err(CompareError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        and_in_place(&mut self.bytes, &other.bytes);
        Ok(())
    }
}

impl From<Vec<u8>> for BitBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
