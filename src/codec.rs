//! Codec facade tying the decoder, the model and the encoder together.

use alloc::{string::String, vec::Vec};
use core::fmt;

use debug_ignore::DebugIgnore;
use log::{debug, info};

use crate::{constants::*, errors::*, reader::*, version_info::*, writer::*};

/// Codec configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct CodecConfig {
    /// Upper bound of entries accepted in the string table when decoding.
    pub max_string_entries: usize,
    /// Headroom added to the original resource size to get the encode capacity.
    pub encode_slack:       usize,
}
impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_string_entries: DEFAULT_MAX_STRING_ENTRIES,
            encode_slack:       DEFAULT_ENCODE_SLACK,
        }
    }
}
impl CodecConfig {
    pub fn with_max_string_entries(mut self, max_string_entries: usize) -> Self {
        self.max_string_entries = max_string_entries;
        self
    }

    pub fn with_encode_slack(mut self, encode_slack: usize) -> Self {
        self.encode_slack = encode_slack;
        self
    }

    /// Returns the encode capacity for a resource originally `original_size` bytes long.
    pub fn capacity_for(&self, original_size: usize) -> usize {
        original_size.saturating_add(self.encode_slack)
    }
}

/// State of a [`Codec`] session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CodecState {
    Idle,
    Decoding,
    Decoded,
    Mutating,
    Encoding,
    Encoded,
    Failed(ErrorKind),
}

/// Single decode, modify and encode pass over one version resource.
///
/// A session moves from [`CodecState::Idle`] to [`CodecState::Encoded`].
/// Structural failures move it to [`CodecState::Failed`], after which every call is rejected and a new session has to be started.
/// A missing key is reported without failing the session and leaves the resource unchanged.
#[derive(Debug, Clone)]
pub struct Codec {
    config:        CodecConfig,
    state:         CodecState,
    original_size: usize,
    version_info:  Option<VersionInfo>,
    output:        DebugIgnore<Vec<u8>>,
}
impl Default for Codec {
    fn default() -> Self { Self::new(CodecConfig::default()) }
}
impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            state: CodecState::Idle,
            original_size: 0,
            version_info: None,
            output: Vec::new().into(),
        }
    }

    pub fn state(&self) -> CodecState { self.state }

    pub fn config(&self) -> &CodecConfig { &self.config }

    /// Returns the size of the decoded input.
    pub fn original_size(&self) -> usize { self.original_size }

    /// Returns the decoded resource including all modifications applied so far.
    pub fn version_info(&self) -> Option<&VersionInfo> { self.version_info.as_ref() }

    /// Returns the encoded bytes once the session reached [`CodecState::Encoded`].
    pub fn output(&self) -> Option<&[u8]> {
        match self.state {
            CodecState::Encoded => Some(self.output.as_slice()),
            _ => None,
        }
    }

    pub fn into_output(self) -> Option<Vec<u8>> {
        match self.state {
            CodecState::Encoded => Some(self.output.0),
            _ => None,
        }
    }

    fn transition(&mut self, state: CodecState) {
        debug!("codec state {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn fail(&mut self, error: CodecError) -> CodecError {
        self.transition(CodecState::Failed(error.kind()));
        error
    }

    fn expect_state(
        &self, allowed: &[CodecState], operation: &'static str,
    ) -> Result<(), CodecError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            debug!("rejecting {} in state {:?}", operation, self.state);
            Err(CodecError::InvalidState(operation))
        }
    }

    /// Decode the given resource bytes.
    pub fn decode<B: Into<Vec<u8>>>(&mut self, bytes: B) -> Result<&VersionInfo, CodecError> {
        self.expect_state(&[CodecState::Idle], "decode")?;
        self.transition(CodecState::Decoding);
        let bytes = bytes.into();
        self.original_size = bytes.len();
        match decode_with(bytes, &self.config) {
            Ok(version_info) => {
                self.transition(CodecState::Decoded);
                Ok(self.version_info.insert(version_info))
            }
            Err(error) => Err(self.fail(error.into())),
        }
    }

    /// Replace the value of the first string entry with the given key.
    pub fn set_string_value<S: Into<String>>(
        &mut self, key: &str, value: S,
    ) -> Result<(), CodecError> {
        self.expect_state(&[CodecState::Decoded, CodecState::Mutating], "set_string_value")?;
        let version_info = self
            .version_info
            .as_mut()
            .ok_or(CodecError::InvalidState("set_string_value"))?;
        version_info.set_string_value(key, value)?;
        self.transition(CodecState::Mutating);
        Ok(())
    }

    /// Encode the resource into at most `capacity` bytes.
    pub fn encode(&mut self, capacity: usize) -> Result<&[u8], CodecError> {
        self.expect_state(&[CodecState::Decoded, CodecState::Mutating], "encode")?;
        self.transition(CodecState::Encoding);
        let result = match &self.version_info {
            Some(version_info) => encode(version_info, capacity).map_err(CodecError::from),
            None => Err(CodecError::InvalidState("encode")),
        };
        match result {
            Ok(output) => {
                self.output = output.into();
                self.transition(CodecState::Encoded);
                Ok(self.output.as_slice())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Encode the resource into the original size plus the configured slack.
    pub fn encode_with_slack(&mut self) -> Result<&[u8], CodecError> {
        self.encode(self.config.capacity_for(self.original_size))
    }
}

/// Result of updating a single string value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Update {
    /// Encoded resource to commit.
    pub data:        DebugIgnore<Vec<u8>>,
    /// Language id the resource has to be committed under.
    pub language_id: LANGID,
    /// Value the key held before the update.
    pub previous:    String,
}

/// Decode a resource, replace the value of `key` and encode it again.
///
/// # Returns
/// Returns the encoded resource, or the first error of any step. Nothing is encoded if the key is missing.
pub fn update<B: Into<Vec<u8>>>(
    bytes: B, key: &str, value: &str, config: &CodecConfig,
) -> Result<Update, CodecError> {
    let mut codec = Codec::new(*config);
    let version_info = codec.decode(bytes)?;
    let previous = version_info.string_value(key).map(String::from).unwrap_or_default();
    let language_id = version_info.language_id();
    codec.set_string_value(key, value)?;
    codec.encode_with_slack()?;
    info!(
        "updated {} from {:?} to {:?} ({} -> {} bytes)",
        key,
        previous,
        value,
        codec.original_size(),
        codec.output().map(<[u8]>::len).unwrap_or_default()
    );
    Ok(Update {
        data: codec.into_output().unwrap_or_default().into(),
        language_id,
        previous,
    })
}

/// Split a `<key>=<value>` assignment at the first `=`.
///
/// # Returns
/// Returns `None` if there is no `=` or the key is empty. The value may be empty.
pub fn split_assignment(assignment: &str) -> Option<(&str, &str)> {
    assignment.split_once('=').filter(|(key, _)| !key.is_empty())
}

/// Decode a resource without modifying it.
pub fn dump<B: Into<Vec<u8>>>(bytes: B, config: &CodecConfig) -> Result<VersionInfo, CodecError> {
    let mut codec = Codec::new(*config);
    codec.decode(bytes)?;
    codec.version_info.take().ok_or(CodecError::InvalidState("dump"))
}

/// Human readable listing of a decoded version resource.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a>(pub &'a VersionInfo);

impl VersionInfo {
    /// Returns a [`Report`] displaying all fields of the resource.
    pub fn report(&self) -> Report<'_> { Report(self) }
}

fn file_os_name(file_os: u32) -> &'static str {
    match file_os {
        VOS_NT_WINDOWS32 => "NT/Win32",
        VOS_NT => "NT",
        VOS__WINDOWS32 => "Win32",
        VOS__WINDOWS16 => "Win16",
        VOS_DOS => "DOS",
        VOS_UNKNOWN => "unknown",
        _ => "other",
    }
}

fn file_type_name(file_type: u32) -> &'static str {
    match file_type {
        VFT_APP => "application",
        VFT_DLL => "library",
        VFT_DRV => "driver",
        VFT_FONT => "font",
        VFT_VXD => "virtual device",
        VFT_STATIC_LIB => "static library",
        VFT_UNKNOWN => "unknown",
        _ => "other",
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = self.0.fixed_file_info();
        let file_os = fixed.file_os.get();
        let file_type = fixed.file_type.get();

        let validity = if fixed.has_valid_signature() { "" } else { " (invalid)" };
        writeln!(f, "Signature: {:#010x}{}", fixed.signature.get(), validity)?;
        writeln!(f, "StructVersion: {:#010x}", fixed.struct_version.get())?;
        writeln!(f, "FileVersion: {}", fixed.file_version)?;
        writeln!(f, "ProductVersion: {}", fixed.product_version)?;
        writeln!(
            f,
            "FileFlags: {:#010x} (mask {:#010x})",
            fixed.file_flags.get(),
            fixed.file_flags_mask.get()
        )?;
        writeln!(f, "FileOS: {:#010x} ({})", file_os, file_os_name(file_os))?;
        writeln!(f, "FileType: {:#010x} ({})", file_type, file_type_name(file_type))?;
        writeln!(f, "FileSubtype: {:#010x}", fixed.file_subtype.get())?;
        writeln!(
            f,
            "FileDate: {:#010x}{:08x}",
            fixed.file_date.most_significant.get(),
            fixed.file_date.least_significant.get()
        )?;

        let table = self.0.string_table();
        writeln!(f, "StringTable {}:", table.language())?;
        for entry in table.entries() {
            writeln!(f, "  String: {} = {}", entry.key(), entry.value())?;
        }

        let var = self.0.var_file_info();
        write!(
            f,
            "Var: {} = {:#010x} (language {:#06x}, codepage {})",
            var.key(),
            var.translation(),
            self.0.language_id(),
            self.0.codepage()
        )
    }
}
