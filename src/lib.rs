//! Version resource **stamp**er for Windows binaries.
//!
//! Supports:
//! * Decoding the `VS_VERSIONINFO` resource into a structured model
//! * Replacing version strings such as `ProductVersion` or `FileVersion`
//! * Encoding the model back with the exact length, padding and alignment rules of the format
//!
//! See [`Codec`] for a single decode, modify and encode pass, or [`decode`] and [`encode`] for the individual steps.
//! Loading the resource from and committing it to a binary is delegated to a [`ResourceStore`].
//!
//! # Examples
//!
//! ### Version update
//! ```
//! use stampver::{decode, encode, constants::VS_PRODUCT_VERSION};
//!
//! let data = std::fs::read(RESOURCE_PATH)?;
//!
//! // decode the resource
//! let mut version_info = decode(data.clone())?;
//!
//! // replace the product version string
//! version_info.set_string_value(VS_PRODUCT_VERSION, "2.0.0")?;
//!
//! // encode the resource with 256 bytes of headroom
//! let target = encode(&version_info, data.len() + 256)?;
//! ```
//!
//! ### Version dump
//! ```
//! use stampver::decode;
//!
//! let data = std::fs::read(RESOURCE_PATH)?;
//!
//! println!("{}", decode(data)?.report());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(doc)))]

extern crate alloc;

pub(crate) mod codec;
pub(crate) mod cursor;
pub(crate) mod errors;
pub(crate) mod reader;
#[cfg(feature = "std")]
pub(crate) mod store;
pub(crate) mod util;
pub(crate) mod version_info;
pub(crate) mod writer;

pub mod constants;
pub mod types;

#[cfg(feature = "std")]
pub use crate::store::*;
pub use crate::{codec::*, cursor::*, errors::*, reader::*, version_info::*, writer::*};
