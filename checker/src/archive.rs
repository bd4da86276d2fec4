//! Zip container helpers shared by the checkers.

use crate::error::{CheckError, Result};
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;
use zip::result::ZipError;

/// A zip container read from an entry of another zip container.
///
/// Zip entries are not seekable, so nested archives are held in memory for
/// as long as their checker runs.
pub type NestedArchive = ZipArchive<Cursor<Vec<u8>>>;

/// Read the entry `name` fully, or return `None` when it does not exist.
///
/// # Errors
///
/// Returns [`CheckError::Zip`] when the entry cannot be opened and
/// [`CheckError::ReadEntry`] when it cannot be read.
pub fn read_optional_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(source) => return Err(CheckError::zip(name, source)),
    };
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|source| CheckError::read_entry(name, source))?;
    Ok(Some(bytes))
}

/// Open the entry `name` as a nested zip container, or return `None` when
/// it does not exist.
///
/// # Errors
///
/// Returns [`CheckError::Zip`] when the entry is not a valid zip container,
/// plus the errors of [`read_optional_entry`].
pub fn open_nested<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<NestedArchive>> {
    let Some(bytes) = read_optional_entry(archive, name)? else {
        return Ok(None);
    };
    ZipArchive::new(Cursor::new(bytes))
        .map(Some)
        .map_err(|source| CheckError::zip(name, source))
}

/// Entry names in central-directory order.
#[must_use]
pub fn entry_names<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
    archive.file_names().map(str::to_owned).collect()
}
