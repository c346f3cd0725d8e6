//! Bounds-checked reader over a byte buffer
//!
//! The reader is the `(begin, end)` cursor the codecs advance. Its
//! position only ever moves forward, and every consume is checked against
//! the end of the buffer before any byte is touched.

use crate::error::{DabersError, DabersResult};

/// Bounds-checked byte cursor
///
/// # Position Tracking
///
/// The reader keeps a position that advances as bytes are consumed. A
/// failed check leaves the position untouched, so the caller can inspect
/// [`Reader::rest`] after an error.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a new reader positioned at the start of `buffer`
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Get current position in buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get remaining bytes
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Check if the cursor is exhausted
    pub fn is_empty(&self) -> bool {
        self.position == self.buffer.len()
    }

    /// Get the bytes that have not been consumed yet
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.position..]
    }

    /// Verify that at least `min_size` bytes remain
    ///
    /// # Error Handling
    /// Returns `BufferUnderrun` carrying `context` if the buffer is too small.
    pub fn check(&self, min_size: usize, context: &str) -> DabersResult<()> {
        let remaining = self.remaining();
        if remaining < min_size {
            log::debug!(
                "buffer too small for '{}': {} < {}",
                context,
                remaining,
                min_size
            );
            return Err(DabersError::BufferUnderrun(format!(
                "buffer too small for '{}': have {} bytes, need {}",
                context, remaining, min_size
            )));
        }
        Ok(())
    }

    /// Consume `size` bytes
    ///
    /// # Returns
    /// Returns the consumed sub-slice, advancing the position past it.
    pub fn consume(&mut self, size: usize, context: &str) -> DabersResult<&'a [u8]> {
        self.check(size, context)?;
        let start = self.position;
        self.position += size;
        Ok(&self.buffer[start..self.position])
    }

    /// Consume a single byte
    pub fn read_byte(&mut self, context: &str) -> DabersResult<u8> {
        self.check(1, context)?;
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(byte)
    }
}
