//! In-memory model of a `VS_VERSIONINFO` resource.
//! See <https://learn.microsoft.com/en-us/windows/win32/menurc/vs-versioninfo> for more information.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use log::debug;

use crate::{constants::*, errors::*, types::*, util::*};

/// Size of a block header including its key and the padding following it.
pub(crate) fn header_size(key: &str) -> usize {
    aligned_to(VS_HEADER_SIZE + u16_len(key) * 2, VS_ALIGNMENT)
}

/// Key and text value of a `String` block.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct StringEntry {
    pub(crate) key:   String,
    pub(crate) value: String,
}
impl StringEntry {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key:   key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str { &self.key }

    pub fn value(&self) -> &str { &self.value }

    /// Returns the size of the encoded `String` block including trailing padding.
    pub fn size(&self) -> usize {
        header_size(&self.key) + aligned_to(u16_len(&self.value) * 2, VS_ALIGNMENT)
    }
}

/// `StringTable` block holding the version strings of one language and codepage.
///
/// Entries keep their resource order. Keys are not required to be unique, lookups use the first match.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StringTable {
    pub(crate) type_:    u16,
    pub(crate) language: String,
    pub(crate) entries:  Vec<StringEntry>,
}
impl Default for StringTable {
    fn default() -> Self {
        Self {
            type_:    VS_TYPE_TEXT,
            language: "040904b0".to_string(),
            entries:  Vec::new(),
        }
    }
}
impl StringTable {
    /// Returns the language and codepage tag of the table, e.g. `040904b0`.
    /// The codec does not interpret it.
    pub fn language(&self) -> &str { &self.language }

    pub fn set_language<S: Into<String>>(&mut self, language: S) { self.language = language.into(); }

    pub fn entries(&self) -> &[StringEntry] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Append an entry to the end of the table.
    pub fn push<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.push(StringEntry::new(key, value));
    }

    /// Returns the value of the first entry with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| entry.value())
    }

    /// Returns the size of the encoded table including trailing padding.
    pub fn size(&self) -> usize {
        header_size(&self.language) + self.entries.iter().map(StringEntry::size).sum::<usize>()
    }
}

/// `StringFileInfo` block wrapping a single string table.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StringFileInfo {
    pub(crate) type_: u16,
    pub(crate) table: StringTable,
}
impl Default for StringFileInfo {
    fn default() -> Self {
        Self {
            type_: VS_TYPE_TEXT,
            table: StringTable::default(),
        }
    }
}
impl StringFileInfo {
    pub fn table(&self) -> &StringTable { &self.table }

    pub fn table_mut(&mut self) -> &mut StringTable { &mut self.table }

    pub fn size(&self) -> usize { header_size(VS_STRING_FILE_INFO_KEY) + self.table.size() }
}

/// `VarFileInfo` block holding the single translation `Var`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VarFileInfo {
    pub(crate) type_:       u16,
    pub(crate) key:         String,
    pub(crate) translation: u32,
}
impl Default for VarFileInfo {
    fn default() -> Self {
        Self {
            type_:       VS_TYPE_TEXT,
            key:         VS_TRANSLATION_KEY.to_string(),
            translation: (CODE_PAGE_ID_EN_US as u32) << 16 | LANGUAGE_ID_EN_US as u32,
        }
    }
}
impl VarFileInfo {
    /// Returns the key of the `Var` record, conventionally `Translation`.
    pub fn key(&self) -> &str { &self.key }

    /// Returns the packed language id (low word) and codepage (high word).
    pub fn translation(&self) -> u32 { self.translation }

    pub fn size(&self) -> usize {
        header_size(VS_VAR_FILE_INFO_KEY) + header_size(&self.key) + VS_TRANSLATION_SIZE
    }
}

/// Decoded `VS_VERSIONINFO` resource.
///
/// Created by [`decode`](crate::decode), optionally modified and consumed by [`encode`](crate::encode).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VersionInfo {
    pub(crate) type_:            u16,
    pub(crate) fixed_file_info:  FixedFileInfo,
    pub(crate) string_file_info: StringFileInfo,
    pub(crate) var_file_info:    VarFileInfo,
}
impl Default for VersionInfo {
    fn default() -> Self { Self::new(FixedFileInfo::default()) }
}
impl VersionInfo {
    /// Create a version resource with an empty `040904b0` string table and an en-US/UTF-16 translation.
    pub fn new(fixed_file_info: FixedFileInfo) -> Self {
        Self {
            type_: VS_TYPE_BINARY,
            fixed_file_info,
            string_file_info: StringFileInfo::default(),
            var_file_info: VarFileInfo::default(),
        }
    }

    /// Returns the type word of the root block.
    pub fn block_type(&self) -> u16 { self.type_ }

    pub fn fixed_file_info(&self) -> &FixedFileInfo { &self.fixed_file_info }

    pub fn fixed_file_info_mut(&mut self) -> &mut FixedFileInfo { &mut self.fixed_file_info }

    pub fn string_file_info(&self) -> &StringFileInfo { &self.string_file_info }

    pub fn var_file_info(&self) -> &VarFileInfo { &self.var_file_info }

    pub fn string_table(&self) -> &StringTable { &self.string_file_info.table }

    pub fn string_table_mut(&mut self) -> &mut StringTable { &mut self.string_file_info.table }

    /// Returns the value of the first string entry with the given key.
    pub fn string_value(&self, key: &str) -> Option<&str> { self.string_table().get(key) }

    /// Replace the value of the first string entry whose key matches exactly.
    ///
    /// # Returns
    /// Returns [`MutationError::KeyNotFound`] and leaves the resource untouched if no entry matches.
    pub fn set_string_value<S: Into<String>>(
        &mut self, key: &str, value: S,
    ) -> Result<(), MutationError> {
        let entry = self
            .string_file_info
            .table
            .entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .ok_or_else(|| MutationError::KeyNotFound(key.to_string()))?;
        let value = value.into();
        debug!("replacing {} value {:?} with {:?}", key, entry.value, value);
        entry.value = value;
        Ok(())
    }

    /// Returns the packed translation word, language id in the low and codepage in the high word.
    pub fn translation_word(&self) -> u32 { self.var_file_info.translation }

    pub fn set_translation_word(&mut self, translation: u32) {
        self.var_file_info.translation = translation;
    }

    /// Returns the language id to commit the resource under.
    pub fn language_id(&self) -> LANGID { self.var_file_info.translation as LANGID }

    pub fn codepage(&self) -> WORD { (self.var_file_info.translation >> 16) as WORD }

    /// Returns the exact size of the encoded resource in bytes.
    pub fn encoded_size(&self) -> usize {
        header_size(VS_VERSION_INFO_KEY)
            + aligned_to(VS_FIXEDFILEINFO_SIZE, VS_ALIGNMENT)
            + self.string_file_info.size()
            + self.var_file_info.size()
    }
}
