//! Windows API and version resource constants.

#![allow(non_upper_case_globals)]

pub type DWORD = u32;
pub type UINT = u32;
pub type WORD = u16;
pub type LANGID = WORD;


// https://learn.microsoft.com/en-us/windows/win32/menurc/vs-versioninfo

pub const VS_VERSION_INFO_KEY: &str = "VS_VERSION_INFO";
pub const VS_STRING_FILE_INFO_KEY: &str = "StringFileInfo";
pub const VS_VAR_FILE_INFO_KEY: &str = "VarFileInfo";
pub const VS_TRANSLATION_KEY: &str = "Translation";

pub const VS_TYPE_BINARY: WORD = 0;
pub const VS_TYPE_TEXT: WORD = 1;

/// Size of the `wLength`, `wValueLength` and `wType` words preceding every block key.
pub const VS_HEADER_SIZE: usize = 6;
/// Alignment of every block and value relative to the start of the resource.
pub const VS_ALIGNMENT: usize = 4;
/// Size of the single language/codepage word of the translation var.
pub const VS_TRANSLATION_SIZE: usize = 4;

/// Default upper bound of entries in a string table.
pub const DEFAULT_MAX_STRING_ENTRIES: usize = 32;
/// Default headroom added to the original resource size when re-encoding it.
pub const DEFAULT_ENCODE_SLACK: usize = 256;


pub const VS_COMMENTS: &str = "Comments";
pub const VS_COMPANY_NAME: &str = "CompanyName";
pub const VS_FILE_DESCRIPTION: &str = "FileDescription";
pub const VS_FILE_VERSION: &str = "FileVersion";
pub const VS_INTERNAL_NAME: &str = "InternalName";
pub const VS_LEGAL_COPYRIGHT: &str = "LegalCopyright";
pub const VS_LEGAL_TRADEMARKS: &str = "LegalTrademarks";
pub const VS_ORIGINAL_FILENAME: &str = "OriginalFilename";
pub const VS_PRIVATE_BUILD: &str = "PrivateBuild";
pub const VS_PRODUCT_NAME: &str = "ProductName";
pub const VS_PRODUCT_VERSION: &str = "ProductVersion";
pub const VS_SPECIAL_BUILD: &str = "SpecialBuild";


// https://docs.microsoft.com/en-us/openspecs/windows_protocols/ms-lcid/a9eac961-e77d-41a6-90a5-ce1a8b0cdb9c
pub const LANGUAGE_ID_EN_US: LANGID = 1033; // 0x0409, en-US
// https://docs.microsoft.com/en-us/openspecs/windows_protocols/ms-ucoderef/28fefe92-d66c-4b03-90a9-97b473223d43
pub const CODE_PAGE_ID_EN_US: LANGID = 1200; // 0x04B0, UTF-16LE


// https://docs.microsoft.com/en-us/windows/win32/api/verrsrc/ns-verrsrc-vs_fixedfileinfo

pub const VS_FIXEDFILEINFO_SIGNATURE: DWORD = 0xFEEF04BD;
pub const VS_FIXEDFILEINFO_VERSION: DWORD = 0x00010000;
pub const VS_FIXEDFILEINFO_SIZE: usize = 52;

pub const VS_FF_DEBUG: DWORD = 0x00000001;
pub const VS_FF_PRERELEASE: DWORD = 0x00000002;
pub const VS_FF_PATCHED: DWORD = 0x00000004;
pub const VS_FF_PRIVATEBUILD: DWORD = 0x00000008;
pub const VS_FF_INFOINFERRED: DWORD = 0x00000010;
pub const VS_FF_SPECIALBUILD: DWORD = 0x00000020;
pub const VS_FFI_FILEFLAGSMASK: DWORD = 0x0000003F;

pub const VOS_UNKNOWN: DWORD = 0x00000000;
pub const VOS_DOS: DWORD = 0x00010000;
pub const VOS_NT: DWORD = 0x00040000;
pub const VOS__WINDOWS16: DWORD = 0x00000001;
pub const VOS__WINDOWS32: DWORD = 0x00000004;
pub const VOS_OS216: DWORD = 0x00020000;
pub const VOS_OS232: DWORD = 0x00030000;
pub const VOS__PM16: DWORD = 0x00000002;
pub const VOS__PM32: DWORD = 0x00000003;
pub const VOS_NT_WINDOWS32: DWORD = VOS_NT | VOS__WINDOWS32;

pub const VFT_UNKNOWN: DWORD = 0x00000000;
pub const VFT_APP: DWORD = 0x00000001;
pub const VFT_DLL: DWORD = 0x00000002;
pub const VFT_DRV: DWORD = 0x00000003;
pub const VFT_FONT: DWORD = 0x00000004;
pub const VFT_STATIC_LIB: DWORD = 0x00000007;
pub const VFT_VXD: DWORD = 0x00000005;
