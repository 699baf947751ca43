//! Encoder for `VS_VERSIONINFO` resources.
//!
//! The size of the resource is computed up front, then every block is written with a placeholder
//! length that is patched once the block and its trailing padding have been written.

use alloc::{string::ToString, vec::Vec};

use log::{debug, trace};

use crate::{constants::*, cursor::*, errors::*, version_info::*};

/// Encoder state for a single resource.
pub(crate) struct BlockWriter {
    cursor: CursorMut,
}
impl BlockWriter {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            cursor: CursorMut::new(size),
        }
    }

    /// Write a block header with a placeholder length, the key and the padding following it.
    ///
    /// # Returns
    /// Returns the offset of the block to pass to [`BlockWriter::end_block`].
    fn begin_block(
        &mut self, key: &str, value_length: u16, type_: u16, level: usize,
    ) -> Result<usize, EncodeError> {
        let start = self.cursor.offset();
        trace!("{} {:#x?}: {:?}", "--".repeat(level + 1), start, key);
        self.cursor.write_u16(0)?;
        self.cursor.write_u16(value_length)?;
        self.cursor.write_u16(type_)?;
        self.cursor.write_text(key)?;
        self.cursor.align4()?;
        Ok(start)
    }

    /// Pad the block to a 4 byte boundary and patch its length.
    fn end_block(&mut self, start: usize) -> Result<(), EncodeError> {
        self.cursor.align4()?;
        let length = self.cursor.offset() - start;
        let length = u16::try_from(length).map_err(|_| EncodeError::LengthOverflow(length))?;
        self.cursor.patch_u16(start, length)?;
        Ok(())
    }

    fn write_version_info(&mut self, info: &VersionInfo) -> Result<(), EncodeError> {
        let root = self.begin_block(
            VS_VERSION_INFO_KEY,
            VS_FIXEDFILEINFO_SIZE as u16,
            info.type_,
            0,
        )?;
        self.cursor.write(&info.fixed_file_info)?;
        self.cursor.align4()?;
        self.write_string_file_info(&info.string_file_info)?;
        self.write_var_file_info(&info.var_file_info)?;
        self.end_block(root)
    }

    fn write_string_file_info(&mut self, info: &StringFileInfo) -> Result<(), EncodeError> {
        let block = self.begin_block(VS_STRING_FILE_INFO_KEY, 0, info.type_, 1)?;
        let table = &info.table;
        let table_block = self.begin_block(&table.language, 0, table.type_, 2)?;
        for entry in &table.entries {
            self.write_string(entry)?;
        }
        self.end_block(table_block)?;
        self.end_block(block)
    }

    fn write_string(&mut self, entry: &StringEntry) -> Result<(), EncodeError> {
        let value_length = entry.value.encode_utf16().count() + 1;
        let value_length =
            u16::try_from(value_length).map_err(|_| EncodeError::LengthOverflow(value_length))?;
        let block = self.begin_block(&entry.key, value_length, VS_TYPE_TEXT, 3)?;
        self.cursor.write_text(&entry.value)?;
        self.end_block(block)
    }

    fn write_var_file_info(&mut self, info: &VarFileInfo) -> Result<(), EncodeError> {
        let block = self.begin_block(VS_VAR_FILE_INFO_KEY, 0, info.type_, 1)?;
        let var = self.begin_block(&info.key, VS_TRANSLATION_SIZE as u16, VS_TYPE_BINARY, 2)?;
        self.cursor.write_u32(info.translation)?;
        self.end_block(var)?;
        self.end_block(block)
    }

    pub(crate) fn into_inner(self) -> Vec<u8> { self.cursor.into_inner() }
}

fn check_text(text: &str) -> Result<(), EncodeError> {
    if text.contains('\0') {
        return Err(EncodeError::InteriorNul(text.to_string()));
    }
    Ok(())
}

/// Encode a version resource into at most `capacity` bytes.
///
/// # Returns
/// Returns the encoded bytes, exactly [`VersionInfo::encoded_size`] long, or an error if they would exceed `capacity`.
pub fn encode(info: &VersionInfo, capacity: usize) -> Result<Vec<u8>, EncodeError> {
    let required = info.encoded_size();
    debug!("encoding version info of {} bytes (capacity {})", required, capacity);
    if required > capacity {
        return Err(EncodeError::BufferTooSmall { required, capacity });
    }
    if required > u16::MAX as usize {
        return Err(EncodeError::LengthOverflow(required));
    }

    let table = info.string_table();
    check_text(table.language())?;
    check_text(info.var_file_info.key())?;
    for entry in table.entries() {
        check_text(entry.key())?;
        check_text(entry.value())?;
    }

    let mut writer = BlockWriter::new(required);
    writer.write_version_info(info)?;
    let data = writer.into_inner();
    debug_assert_eq!(data.len(), required, "encoded size equals computed size");
    Ok(data)
}
