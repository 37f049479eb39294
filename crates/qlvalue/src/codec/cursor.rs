// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Big-endian read/write cursors for protocol cells.

use super::DecodeError;

/// Generate big-endian read methods for primitive types.
///
/// Each generated method checks bounds, reads N bytes and advances the
/// offset.
macro_rules! impl_read_be {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type, DecodeError> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_be_bytes(bytes))
        }
    };
}

/// Generate big-endian write methods for primitive types.
macro_rules! impl_write_be {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_be_bytes());
        }
    };
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
    /// Absolute position of `buffer[0]`, for error reporting.
    base: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            base: 0,
        }
    }

    impl_read_be!(read_i8, i8, 1);
    impl_read_be!(read_u8, u8, 1);
    impl_read_be!(read_i16, i16, 2);
    impl_read_be!(read_i32, i32, 4);
    impl_read_be!(read_i64, i64, 8);
    impl_read_be!(read_f32, f32, 4);
    impl_read_be!(read_f64, f64, 8);

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.offset(),
                need: len,
                have: self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Consume `len` bytes and return a cursor restricted to them.
    pub fn sub_cursor(&mut self, len: usize) -> Result<Cursor<'a>, DecodeError> {
        let base = self.offset();
        let buffer = self.read_bytes(len)?;
        Ok(Cursor {
            buffer,
            offset: 0,
            base,
        })
    }

    /// Absolute position of the next byte.
    pub fn offset(&self) -> usize {
        self.base + self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

/// Growable cursor for writing cells.
///
/// Collections reserve their length field with [`CellWriter::reserve_length`]
/// and patch it once the content is written.
#[derive(Debug, Default)]
pub struct CellWriter {
    buffer: Vec<u8>,
}

/// Position of a reserved length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a reserved length must be finished"]
pub struct LengthSlot(usize);

impl CellWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to an existing buffer.
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    impl_write_be!(write_i8, i8);
    impl_write_be!(write_u8, u8);
    impl_write_be!(write_i16, i16);
    impl_write_be!(write_i32, i32);
    impl_write_be!(write_i64, i64);
    impl_write_be!(write_f32, f32);
    impl_write_be!(write_f64, f64);

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Write a 4-byte length field.
    ///
    /// # Panics
    ///
    /// If `len` exceeds `i32::MAX`; a cell that large cannot be framed.
    pub fn write_length(&mut self, len: usize) {
        self.write_i32(frame_length(len));
    }

    /// Write a placeholder length and remember where it is.
    pub fn reserve_length(&mut self) -> LengthSlot {
        let slot = LengthSlot(self.buffer.len());
        self.write_i32(0);
        slot
    }

    /// Patch `slot` with the number of bytes written after it.
    pub fn finish_length(&mut self, slot: LengthSlot) {
        let start = slot.0 + 4;
        let len = frame_length(self.buffer.len() - start);
        self.buffer[slot.0..start].copy_from_slice(&len.to_be_bytes());
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

fn frame_length(len: usize) -> i32 {
    i32::try_from(len)
        .unwrap_or_else(|_| panic!("internal error: cell of {} bytes exceeds i32 framing", len))
}
