use alloc::{string::String, vec::Vec};
use core::ops::{Add, Rem, Sub};

use crate::DecodeError;

pub fn aligned_to<T: Add<Output = T> + Sub<Output = T> + Rem<Output = T> + Eq + Copy + Default>(
    value: T, alignment: T,
) -> T {
    if value % alignment == T::default() {
        return value;
    }
    value + alignment - (value % alignment)
}

pub fn u16_to_string(units: &[u16]) -> Result<String, DecodeError> {
    char::decode_utf16(units.iter().copied())
        .collect::<Result<String, _>>()
        .map_err(DecodeError::from)
}

pub fn string_to_u16<S: AsRef<str>>(string: S) -> Vec<u16> {
    let string = string.as_ref();
    let mut data = Vec::with_capacity(string.len() + 1);
    data.extend(string.encode_utf16());
    data.push(0);
    data
}

/// Number of UTF-16 units of the string including the terminating nul.
pub fn u16_len<S: AsRef<str>>(string: S) -> usize { string.as_ref().encode_utf16().count() + 1 }
