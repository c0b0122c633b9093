//! Bounds-checked little-endian reads over a byte buffer.

use crate::{Error, Result};

/// Forward-only reader that reports [`Error::TruncatedRecord`] instead of panicking.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at `position`.
    #[must_use]
    pub fn new(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Current byte position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Returns true once the cursor has reached the end of the buffer.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Moves the cursor to an absolute position.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Takes the next `len` bytes.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedRecord`] if fewer than `len` bytes remain,
    /// including an empty take from a position past the end.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let start = self.position;
        let Some(bytes) = start
            .checked_add(len)
            .and_then(|end| self.data.get(start..end))
        else {
            return Err(Error::TruncatedRecord {
                position: start,
                needed: len,
                available: self.remaining(),
            });
        };
        self.position += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.take(N)?);
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.take_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Reads `count` unsigned 16-bit samples.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedRecord`] if the block runs past the buffer.
    pub fn read_u16_samples(&mut self, count: usize) -> Result<Vec<u16>> {
        let bytes = self.take(count * 2)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// Reads `count` signed 16-bit samples.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedRecord`] if the block runs past the buffer.
    pub fn read_i16_samples(&mut self, count: usize) -> Result<Vec<i16>> {
        let bytes = self.take(count * 2)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// Reads a fixed-width text field, trimming trailing NULs and spaces.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedRecord`] if fewer than `len` bytes remain.
    pub fn read_text(&mut self, len: usize) -> Result<String> {
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes)
            .trim_end_matches(['\0', ' '])
            .to_string())
    }
}
