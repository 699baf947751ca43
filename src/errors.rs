//! Errors specific to decoding, modifying or encoding a version resource.

use alloc::string::String;
use core::char::DecodeUtf16Error;

#[cfg(feature = "std")]
use std::{io::Error as IOError, path::PathBuf};

/// Access past the end of the buffer underlying a cursor.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[cfg_attr(
    feature = "std",
    error("out of bounds: {length} bytes at offset {offset} exceed buffer of {size} bytes")
)]
pub struct OutOfBounds {
    pub offset: usize,
    pub length: usize,
    pub size:   usize,
}

/// Errors that can occur when decoding a version resource.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum DecodeError {
    #[cfg_attr(feature = "std", error("malformed block: {0}"))]
    MalformedBlock(String),
    #[cfg_attr(feature = "std", error("too many string table entries, limit is {0}"))]
    TooManyEntries(usize),
    #[cfg_attr(feature = "std", error("unsupported layout: {0}"))]
    UnsupportedLayout(String),
    #[cfg_attr(feature = "std", error("invalid utf16: {0}"))]
    InvalidText(DecodeUtf16Error),
    #[cfg_attr(feature = "std", error("{0}"))]
    OutOfBounds(OutOfBounds),
}
impl From<OutOfBounds> for DecodeError {
    fn from(error: OutOfBounds) -> Self { DecodeError::OutOfBounds(error) }
}
impl From<DecodeUtf16Error> for DecodeError {
    fn from(error: DecodeUtf16Error) -> Self { DecodeError::InvalidText(error) }
}

/// Errors that can occur when modifying a decoded version resource.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum MutationError {
    #[cfg_attr(feature = "std", error("key not found: {0}"))]
    KeyNotFound(String),
}

/// Errors that can occur when encoding a version resource.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum EncodeError {
    #[cfg_attr(feature = "std", error("buffer too small: {required} bytes required, capacity is {capacity}"))]
    BufferTooSmall { required: usize, capacity: usize },
    #[cfg_attr(feature = "std", error("resource of {0} bytes exceeds the 16 bit length field"))]
    LengthOverflow(usize),
    #[cfg_attr(feature = "std", error("text contains a nul character: {0:?}"))]
    InteriorNul(String),
    #[cfg_attr(feature = "std", error("{0}"))]
    OutOfBounds(OutOfBounds),
}
impl From<OutOfBounds> for EncodeError {
    fn from(error: OutOfBounds) -> Self { EncodeError::OutOfBounds(error) }
}

/// Failure kind of a codec operation, used to tell failures apart in diagnostics.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    MalformedBlock,
    TooManyEntries,
    UnsupportedLayout,
    InvalidText,
    KeyNotFound,
    BufferTooSmall,
    LengthOverflow,
    InteriorNul,
    OutOfBounds,
    InvalidState,
}

/// Errors that can occur when driving the codec.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum CodecError {
    #[cfg_attr(feature = "std", error("decode failed: {0}"))]
    Decode(DecodeError),
    #[cfg_attr(feature = "std", error("update failed: {0}"))]
    Mutation(MutationError),
    #[cfg_attr(feature = "std", error("encode failed: {0}"))]
    Encode(EncodeError),
    #[cfg_attr(feature = "std", error("invalid codec state: {0}"))]
    InvalidState(&'static str),
}
impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Decode(DecodeError::MalformedBlock(_)) => ErrorKind::MalformedBlock,
            CodecError::Decode(DecodeError::TooManyEntries(_)) => ErrorKind::TooManyEntries,
            CodecError::Decode(DecodeError::UnsupportedLayout(_)) => ErrorKind::UnsupportedLayout,
            CodecError::Decode(DecodeError::InvalidText(_)) => ErrorKind::InvalidText,
            CodecError::Decode(DecodeError::OutOfBounds(_)) => ErrorKind::OutOfBounds,
            CodecError::Mutation(MutationError::KeyNotFound(_)) => ErrorKind::KeyNotFound,
            CodecError::Encode(EncodeError::BufferTooSmall { .. }) => ErrorKind::BufferTooSmall,
            CodecError::Encode(EncodeError::LengthOverflow(_)) => ErrorKind::LengthOverflow,
            CodecError::Encode(EncodeError::InteriorNul(_)) => ErrorKind::InteriorNul,
            CodecError::Encode(EncodeError::OutOfBounds(_)) => ErrorKind::OutOfBounds,
            CodecError::InvalidState(_) => ErrorKind::InvalidState,
        }
    }
}
impl From<DecodeError> for CodecError {
    fn from(error: DecodeError) -> Self { CodecError::Decode(error) }
}
impl From<MutationError> for CodecError {
    fn from(error: MutationError) -> Self { CodecError::Mutation(error) }
}
impl From<EncodeError> for CodecError {
    fn from(error: EncodeError) -> Self { CodecError::Encode(error) }
}

/// Errors that can occur when loading or committing a version resource.
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no version resource found in {0}")]
    MissingResource(PathBuf),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("io error: {0}")]
    IOError(IOError),
}
#[cfg(feature = "std")]
impl From<IOError> for StoreError {
    fn from(error: IOError) -> Self { StoreError::IOError(error) }
}
#[cfg(feature = "std")]
impl StoreError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            StoreError::Codec(error) => Some(error.kind()),
            _ => None,
        }
    }
}
