//! Loading and committing version resources.
//!
//! Locating the resource inside a binary and writing it back is left to a [`ResourceStore`].

use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{codec::*, constants::*, errors::*, version_info::*};

/// Source and destination of raw `VS_VERSIONINFO` resource bytes.
pub trait ResourceStore {
    /// Fetch the version resource of the binary at `path`.
    ///
    /// # Returns
    /// Returns [`StoreError::MissingResource`] if the binary has no version resource.
    fn load_version_resource(&self, path: &Path) -> Result<Vec<u8>, StoreError>;

    /// Replace the version resource of the binary at `path` under the given language id.
    ///
    /// Implementations must either replace the resource completely or leave it untouched.
    fn commit_version_resource(
        &mut self, path: &Path, language_id: LANGID, data: &[u8],
    ) -> Result<(), StoreError>;
}

/// File holding nothing but a raw version resource, as extracted by resource tools.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct RawResourceFile;

impl ResourceStore for RawResourceFile {
    fn load_version_resource(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        let data = fs::read(path)?;
        if data.is_empty() {
            return Err(StoreError::MissingResource(path.to_path_buf()));
        }
        debug!("read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }

    fn commit_version_resource(
        &mut self, path: &Path, language_id: LANGID, data: &[u8],
    ) -> Result<(), StoreError> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // write next to the target and rename over it so readers never see a partial file
        let mut file = tempfile::NamedTempFile::new_in(directory)?;
        file.write_all(data)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|error| StoreError::IOError(error.error))?;
        debug!(
            "committed {} bytes to {} (language {:#06x})",
            data.len(),
            path.display(),
            language_id
        );
        Ok(())
    }
}

/// In-memory store keyed by path.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct MemoryStore {
    resources: HashMap<PathBuf, Vec<u8>>,
    commits:   Vec<(PathBuf, LANGID)>,
}
impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Insert a resource, returning the one previously stored under the path.
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, data: Vec<u8>) -> Option<Vec<u8>> {
        self.resources.insert(path.into(), data)
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&[u8]> {
        self.resources.get(path.as_ref()).map(Vec::as_slice)
    }

    /// Returns the committed paths and language ids in commit order.
    pub fn commits(&self) -> &[(PathBuf, LANGID)] { &self.commits }
}

impl ResourceStore for MemoryStore {
    fn load_version_resource(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::MissingResource(path.to_path_buf()))
    }

    fn commit_version_resource(
        &mut self, path: &Path, language_id: LANGID, data: &[u8],
    ) -> Result<(), StoreError> {
        self.resources.insert(path.to_path_buf(), data.to_vec());
        self.commits.push((path.to_path_buf(), language_id));
        Ok(())
    }
}

/// Replace the value of `key` in the version resource of the binary at `path`.
///
/// The resource is only committed after it was encoded successfully.
///
/// # Returns
/// Returns the committed update, or the first error of loading, decoding, updating, encoding or committing.
pub fn update_resource<S: ResourceStore + ?Sized>(
    store: &mut S, path: &Path, key: &str, value: &str, config: &CodecConfig,
) -> Result<Update, StoreError> {
    info!("replacing {} value with {:?} in {}", key, value, path.display());
    let data = store.load_version_resource(path)?;
    let updated = update(data, key, value, config)?;
    store.commit_version_resource(path, updated.language_id, updated.data.as_slice())?;
    Ok(updated)
}

/// Decode the version resource of the binary at `path` without modifying it.
pub fn dump_resource<S: ResourceStore + ?Sized>(
    store: &S, path: &Path, config: &CodecConfig,
) -> Result<VersionInfo, StoreError> {
    let data = store.load_version_resource(path)?;
    Ok(dump(data, config)?)
}
