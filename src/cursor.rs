//! Bounds-checked read and write positions over an owned byte buffer.
//!
//! Every advance is validated against the buffer length, so malformed length fields surface as
//! [`OutOfBounds`] instead of reads or writes past the end of the resource.

use alloc::{vec, vec::Vec};
use core::any::type_name;

use debug_ignore::DebugIgnore;
use log::trace;
use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::{constants::*, errors::*, util::*};

/// Read cursor over a version resource.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cursor {
    data:   DebugIgnore<Vec<u8>>,
    offset: usize,
}
impl Cursor {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data:   data.into(),
            offset: 0,
        }
    }

    /// Returns the current offset relative to the start of the buffer.
    pub fn offset(&self) -> usize { self.offset }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Returns the number of bytes between the offset and the end of the buffer.
    pub fn remaining(&self) -> usize { self.data.len() - self.offset }

    fn check(&self, offset: usize, length: usize) -> Result<usize, OutOfBounds> {
        match offset.checked_add(length) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(OutOfBounds {
                offset,
                length,
                size: self.data.len(),
            }),
        }
    }

    /// Move the offset forward by `length` bytes.
    pub fn advance(&mut self, length: usize) -> Result<(), OutOfBounds> {
        self.offset = self.check(self.offset, length)?;
        Ok(())
    }

    /// Move the offset to an absolute position inside the buffer.
    pub fn seek(&mut self, offset: usize) -> Result<(), OutOfBounds> {
        self.offset = self.check(offset, 0)?;
        Ok(())
    }

    /// Skip the zero padding up to the next multiple of 4 bytes.
    pub fn align4(&mut self) -> Result<(), OutOfBounds> {
        let aligned = aligned_to(self.offset, VS_ALIGNMENT);
        self.advance(aligned - self.offset)
    }

    pub fn peek<T: FromBytes + Copy>(&self) -> Result<T, OutOfBounds> {
        let length = core::mem::size_of::<T>();
        let end = self.check(self.offset, length)?;
        T::read_from_prefix(&self.data[self.offset..end])
            .map(|(value, _)| value)
            .map_err(|_| {
                trace!("failed to read {} at {:#x?}", type_name::<T>(), self.offset);
                OutOfBounds {
                    offset: self.offset,
                    length,
                    size: self.data.len(),
                }
            })
    }

    pub fn read<T: FromBytes + Copy>(&mut self) -> Result<T, OutOfBounds> {
        let value = self.peek::<T>()?;
        self.advance(core::mem::size_of::<T>())?;
        Ok(value)
    }

    pub fn peek_u16(&self) -> Result<u16, OutOfBounds> {
        self.check(self.offset, 2)?;
        Ok(u16::from_le_bytes([self.data[self.offset], self.data[self.offset + 1]]))
    }

    pub fn peek_u32(&self) -> Result<u32, OutOfBounds> {
        let end = self.check(self.offset, 4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[self.offset..end]);
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_u16(&mut self) -> Result<u16, OutOfBounds> {
        let value = self.peek_u16()?;
        self.advance(2)?;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, OutOfBounds> {
        let value = self.peek_u32()?;
        self.advance(4)?;
        Ok(value)
    }

    /// Read `count` UTF-16 units.
    pub fn read_units(&mut self, count: usize) -> Result<Vec<u16>, OutOfBounds> {
        let length = count.checked_mul(2).ok_or(OutOfBounds {
            offset: self.offset,
            length: usize::MAX,
            size:   self.data.len(),
        })?;
        let end = self.check(self.offset, length)?;
        let units = self.data[self.offset..end]
            .chunks_exact(2)
            .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
            .collect();
        self.offset = end;
        Ok(units)
    }

    /// Read a nul-terminated UTF-16 string and move past its terminator.
    ///
    /// The returned units do not include the terminator. The offset is unchanged on failure.
    pub fn read_text(&mut self) -> Result<Vec<u16>, OutOfBounds> {
        let start = self.offset;
        self.read_text_within(self.data.len()).ok_or(OutOfBounds {
            offset: start,
            length: self.data.len() - start + 2,
            size:   self.data.len(),
        })
    }

    /// Read a nul-terminated UTF-16 string whose terminator ends at or before `end`.
    ///
    /// # Returns
    /// Returns `None` and leaves the offset unchanged if no terminator is found before `end`.
    pub fn read_text_within(&mut self, end: usize) -> Option<Vec<u16>> {
        let end = end.min(self.data.len());
        let mut units = Vec::new();
        let mut offset = self.offset;
        while offset + 2 <= end {
            let unit = u16::from_le_bytes([self.data[offset], self.data[offset + 1]]);
            offset += 2;
            if unit == 0 {
                self.offset = offset;
                return Some(units);
            }
            units.push(unit);
        }
        None
    }

    pub fn into_inner(self) -> Vec<u8> { self.data.0 }
}

/// Write cursor over a zero-filled buffer of fixed size.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CursorMut {
    data:   DebugIgnore<Vec<u8>>,
    offset: usize,
}
impl CursorMut {
    /// Create a cursor over `size` zero bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data:   vec![0; size].into(),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize { self.offset }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    fn check(&self, offset: usize, length: usize) -> Result<usize, OutOfBounds> {
        match offset.checked_add(length) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(OutOfBounds {
                offset,
                length,
                size: self.data.len(),
            }),
        }
    }

    pub fn advance(&mut self, length: usize) -> Result<(), OutOfBounds> {
        self.offset = self.check(self.offset, length)?;
        Ok(())
    }

    /// Write zero padding up to the next multiple of 4 bytes.
    pub fn align4(&mut self) -> Result<(), OutOfBounds> {
        let aligned = aligned_to(self.offset, VS_ALIGNMENT);
        let end = self.check(self.offset, aligned - self.offset)?;
        self.data[self.offset..end].fill(0);
        self.offset = end;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), OutOfBounds> {
        let end = self.check(self.offset, bytes.len())?;
        self.data[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
        Ok(())
    }

    pub fn write<T: IntoBytes + Immutable>(&mut self, value: &T) -> Result<(), OutOfBounds> {
        self.write_bytes(value.as_bytes())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), OutOfBounds> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), OutOfBounds> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write the string as nul-terminated UTF-16.
    pub fn write_text(&mut self, text: &str) -> Result<(), OutOfBounds> {
        for unit in string_to_u16(text) {
            self.write_u16(unit)?;
        }
        Ok(())
    }

    /// Overwrite the 16-bit word at `offset` without moving the cursor.
    pub fn patch_u16(&mut self, offset: usize, value: u16) -> Result<(), OutOfBounds> {
        let end = self.check(offset, 2)?;
        self.data[offset..end].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Returns the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        let mut data = self.data.0;
        data.truncate(self.offset);
        data
    }
}
