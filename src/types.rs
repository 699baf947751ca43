//! Version resource data types.
//!
//! These types are a one-to-one mapping of the fixed-size records described in <https://learn.microsoft.com/en-us/windows/win32/menurc/version-information>
//! Fields are stored little-endian regardless of the host.

use core::fmt;

use zerocopy::{
    byteorder::little_endian::{U16, U32},
    FromBytes, Immutable, IntoBytes, Unaligned,
};

use crate::constants::*;

/// Pair of 32-bit words holding the four 16-bit components of a version number.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    FromBytes,
    IntoBytes,
    Immutable,
    Unaligned,
    Default,
)]
pub struct VersionPair {
    pub most_significant:  U32,
    pub least_significant: U32,
}
impl VersionPair {
    pub fn new(most_significant: u32, least_significant: u32) -> Self {
        Self {
            most_significant:  U32::new(most_significant),
            least_significant: U32::new(least_significant),
        }
    }

    pub fn from_parts(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self::new(
            (major as u32) << 16 | minor as u32,
            (build as u32) << 16 | revision as u32,
        )
    }

    /// Returns the version components as `[major, minor, build, revision]`.
    pub fn parts(&self) -> [u16; 4] {
        let most = self.most_significant.get();
        let least = self.least_significant.get();
        [(most >> 16) as u16, most as u16, (least >> 16) as u16, least as u16]
    }
}
impl fmt::Display for VersionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, build, revision] = self.parts();
        write!(f, "{}.{}.{}.{}", major, minor, build, revision)
    }
}

/// `VS_FIXEDFILEINFO`, the value of the root version block.
///
/// The codec copies this record through unchanged.
#[repr(C)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, FromBytes, IntoBytes, Immutable, Unaligned)]
pub struct FixedFileInfo {
    pub signature:       U32,
    pub struct_version:  U32,
    pub file_version:    VersionPair,
    pub product_version: VersionPair,
    pub file_flags_mask: U32,
    pub file_flags:      U32,
    pub file_os:         U32,
    pub file_type:       U32,
    pub file_subtype:    U32,
    pub file_date:       VersionPair,
}
impl FixedFileInfo {
    /// Returns whether the signature equals `VS_FIXEDFILEINFO_SIGNATURE`.
    pub fn has_valid_signature(&self) -> bool { self.signature.get() == VS_FIXEDFILEINFO_SIGNATURE }
}
impl Default for FixedFileInfo {
    fn default() -> Self {
        Self {
            signature:       U32::new(VS_FIXEDFILEINFO_SIGNATURE),
            struct_version:  U32::new(VS_FIXEDFILEINFO_VERSION),
            file_version:    VersionPair::from_parts(1, 0, 0, 0),
            product_version: VersionPair::from_parts(1, 0, 0, 0),
            file_flags_mask: U32::new(VS_FFI_FILEFLAGSMASK),
            file_flags:      U32::ZERO,
            file_os:         U32::new(VOS_NT_WINDOWS32),
            file_type:       U32::new(VFT_APP),
            file_subtype:    U32::ZERO,
            file_date:       VersionPair::default(),
        }
    }
}

/// Header preceding the key of every block in the version resource.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    FromBytes,
    IntoBytes,
    Immutable,
    Unaligned,
    Default,
)]
pub struct VersionHeader {
    pub length:       U16,
    pub value_length: U16,
    pub type_:        U16,
}

const _: () = assert!(core::mem::size_of::<FixedFileInfo>() == VS_FIXEDFILEINFO_SIZE);
const _: () = assert!(core::mem::size_of::<VersionHeader>() == VS_HEADER_SIZE);
