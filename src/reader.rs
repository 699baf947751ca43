//! Recursive-descent decoder for `VS_VERSIONINFO` resources.
//!
//! Every block starts with a [`VersionHeader`], followed by a nul-terminated UTF-16 key, padding to
//! a 4 byte boundary and the block value or children. The decoder walks blocks by their declared
//! lengths and checks every span against the span of the enclosing block.

use alloc::{format, string::String, vec::Vec};

use log::{debug, trace, warn};

use crate::{constants::*, cursor::*, errors::*, types::*, util::*, version_info::*, CodecConfig};

/// Decoded block header.
#[derive(Debug)]
struct Block {
    start:  usize,
    end:    usize,
    header: VersionHeader,
    key:    String,
}

/// Decoder state for a single resource.
pub(crate) struct BlockReader {
    cursor:      Cursor,
    max_entries: usize,
}
impl BlockReader {
    pub(crate) fn new(data: Vec<u8>, config: &CodecConfig) -> Self {
        Self {
            cursor:      Cursor::new(data),
            max_entries: config.max_string_entries,
        }
    }

    fn read_block(&mut self, parent_end: usize, level: usize) -> Result<Block, DecodeError> {
        let start = self.cursor.offset();
        if start + VS_HEADER_SIZE > parent_end {
            return Err(DecodeError::MalformedBlock(format!(
                "block header at {:#x} exceeds its parent end {:#x}",
                start, parent_end
            )));
        }
        let header = self.cursor.read::<VersionHeader>()?;
        let length = header.length.get() as usize;
        if length < VS_HEADER_SIZE {
            return Err(DecodeError::MalformedBlock(format!(
                "block at {:#x} has invalid length {}",
                start, length
            )));
        }
        let end = start + length;
        if end > parent_end {
            return Err(DecodeError::MalformedBlock(format!(
                "block at {:#x} ends at {:#x} beyond its parent end {:#x}",
                start, end, parent_end
            )));
        }
        let key = self.cursor.read_text_within(end).ok_or_else(|| {
            DecodeError::MalformedBlock(format!(
                "key of block at {:#x} exceeds its length {}",
                start, length
            ))
        })?;
        let key = u16_to_string(&key)?;
        trace!("{} {:#x?}: {:?} {:#x?}", "--".repeat(level + 1), start, key, header);
        Ok(Block {
            start,
            end,
            header,
            key,
        })
    }

    /// Move to the next child inside a block ending at `end`.
    ///
    /// # Returns
    /// Returns `false` and moves to `end` if no further child fits before it.
    fn next_child(&mut self, end: usize) -> Result<bool, DecodeError> {
        let offset = self.cursor.offset();
        if aligned_to(offset, VS_ALIGNMENT) >= end {
            if offset < end {
                trace!("skipping {} trailing bytes at {:#x?}", end - offset, offset);
            }
            self.cursor.seek(end.max(offset))?;
            return Ok(false);
        }
        self.cursor.align4()?;
        Ok(true)
    }

    fn expect_key(block: &Block, key: &str) -> Result<(), DecodeError> {
        if block.key != key {
            return Err(DecodeError::MalformedBlock(format!(
                "expected {} block at {:#x}, found {:?}",
                key, block.start, block.key
            )));
        }
        Ok(())
    }

    pub(crate) fn read_version_info(&mut self) -> Result<VersionInfo, DecodeError> {
        let root = self.read_block(self.cursor.len(), 0)?;
        Self::expect_key(&root, VS_VERSION_INFO_KEY)?;

        let value_length = root.header.value_length.get() as usize;
        if value_length != VS_FIXEDFILEINFO_SIZE {
            return Err(DecodeError::MalformedBlock(format!(
                "fixed file info has length {}, expected {}",
                value_length, VS_FIXEDFILEINFO_SIZE
            )));
        }
        if aligned_to(self.cursor.offset(), VS_ALIGNMENT) + VS_FIXEDFILEINFO_SIZE > root.end {
            return Err(DecodeError::MalformedBlock("fixed file info exceeds root block".into()));
        }
        self.cursor.align4()?;
        let fixed_file_info = self.cursor.read::<FixedFileInfo>()?;
        debug!("{:#x?}", fixed_file_info);
        if !fixed_file_info.has_valid_signature() {
            warn!(
                "unexpected fixed file info signature {:#010x}",
                fixed_file_info.signature.get()
            );
        }

        let mut string_file_info = None;
        let mut var_file_info = None;
        while self.next_child(root.end)? {
            let block = self.read_block(root.end, 1)?;
            match block.key.as_str() {
                VS_STRING_FILE_INFO_KEY => {
                    if string_file_info.is_some() {
                        return Err(DecodeError::UnsupportedLayout(
                            "more than one StringFileInfo block".into(),
                        ));
                    }
                    if var_file_info.is_some() {
                        warn!("VarFileInfo precedes StringFileInfo, re-encoding will reorder them");
                    }
                    string_file_info = Some(self.read_string_file_info(&block)?);
                }
                VS_VAR_FILE_INFO_KEY => {
                    if var_file_info.is_some() {
                        return Err(DecodeError::UnsupportedLayout(
                            "more than one VarFileInfo block".into(),
                        ));
                    }
                    var_file_info = Some(self.read_var_file_info(&block)?);
                }
                key => {
                    return Err(DecodeError::UnsupportedLayout(format!(
                        "unknown block {:?} at {:#x}",
                        key, block.start
                    )));
                }
            }
            self.cursor.seek(block.end)?;
        }

        let string_file_info = string_file_info
            .ok_or_else(|| DecodeError::MalformedBlock("missing StringFileInfo block".into()))?;
        let var_file_info = var_file_info
            .ok_or_else(|| DecodeError::MalformedBlock("missing VarFileInfo block".into()))?;

        debug!(
            "decoded version info of {} bytes with {} strings",
            root.end,
            string_file_info.table.len()
        );
        Ok(VersionInfo {
            type_: root.header.type_.get(),
            fixed_file_info,
            string_file_info,
            var_file_info,
        })
    }

    fn read_string_file_info(&mut self, block: &Block) -> Result<StringFileInfo, DecodeError> {
        let mut table = None;
        while self.next_child(block.end)? {
            if table.is_some() {
                return Err(DecodeError::UnsupportedLayout(
                    "more than one string table in StringFileInfo".into(),
                ));
            }
            let child = self.read_block(block.end, 2)?;
            table = Some(self.read_string_table(&child)?);
            self.cursor.seek(child.end)?;
        }
        let table = table.ok_or_else(|| {
            DecodeError::UnsupportedLayout("StringFileInfo without string table".into())
        })?;
        Ok(StringFileInfo {
            type_: block.header.type_.get(),
            table,
        })
    }

    fn read_string_table(&mut self, block: &Block) -> Result<StringTable, DecodeError> {
        let mut entries = Vec::new();
        while self.next_child(block.end)? {
            let child = self.read_block(block.end, 3)?;
            if entries.len() >= self.max_entries {
                return Err(DecodeError::TooManyEntries(self.max_entries));
            }
            let value = self.read_string_value(&child)?;
            trace!("{} {:?} = {:?}", "--".repeat(4), child.key, value);
            entries.push(StringEntry {
                key: child.key,
                value,
            });
            // jump by the declared length, the value may be followed by unknown data
            self.cursor.seek(child.end)?;
        }
        Ok(StringTable {
            type_: block.header.type_.get(),
            language: block.key.clone(),
            entries,
        })
    }

    fn read_string_value(&mut self, block: &Block) -> Result<String, DecodeError> {
        let value_length = block.header.value_length.get() as usize;
        if value_length == 0 || !self.next_child(block.end)? {
            return Ok(String::new());
        }
        // some compilers count bytes instead of units
        let available = (block.end - self.cursor.offset()) / 2;
        let mut units = self.cursor.read_units(value_length.min(available))?;
        if let Some(nul) = units.iter().position(|&unit| unit == 0) {
            units.truncate(nul);
        }
        u16_to_string(&units)
    }

    fn read_var_file_info(&mut self, block: &Block) -> Result<VarFileInfo, DecodeError> {
        let mut var = None;
        while self.next_child(block.end)? {
            if var.is_some() {
                return Err(DecodeError::UnsupportedLayout(
                    "more than one Var record in VarFileInfo".into(),
                ));
            }
            let child = self.read_block(block.end, 2)?;
            var = Some((self.read_var_value(&child)?, child.key));
            self.cursor.seek(child.end)?;
        }
        let (translation, key) = var
            .ok_or_else(|| DecodeError::UnsupportedLayout("VarFileInfo without Var record".into()))?;
        Ok(VarFileInfo {
            type_: block.header.type_.get(),
            key,
            translation,
        })
    }

    fn read_var_value(&mut self, block: &Block) -> Result<u32, DecodeError> {
        let value_length = block.header.value_length.get() as usize;
        let span = if self.next_child(block.end)? {
            block.end - self.cursor.offset()
        } else {
            0
        };
        if value_length > VS_TRANSLATION_SIZE || span > VS_TRANSLATION_SIZE {
            return Err(DecodeError::UnsupportedLayout(format!(
                "Var {:?} holds {} values, expected one",
                block.key,
                value_length.max(span) / VS_TRANSLATION_SIZE
            )));
        }
        if span < VS_TRANSLATION_SIZE {
            return Err(DecodeError::MalformedBlock(format!(
                "Var {:?} value of {} bytes is too short",
                block.key, span
            )));
        }
        let translation = self.cursor.read_u32()?;
        trace!("{} {:?} = {:#010x}", "--".repeat(3), block.key, translation);
        Ok(translation)
    }
}

/// Decode a version resource with the default configuration.
pub fn decode<B: Into<Vec<u8>>>(bytes: B) -> Result<VersionInfo, DecodeError> {
    decode_with(bytes, &CodecConfig::default())
}

/// Decode a version resource.
///
/// # Returns
/// Returns the decoded resource, or an error if the block structure is inconsistent or exceeds the supported layout.
pub fn decode_with<B: Into<Vec<u8>>>(
    bytes: B, config: &CodecConfig,
) -> Result<VersionInfo, DecodeError> {
    BlockReader::new(bytes.into(), config).read_version_info()
}
