//! Checksum manifest verification.
//!
//! Every package archive must have exactly one manifest line, and every
//! manifest line must name a package archive whose MD5 digest matches.

use super::PackageDir;
use super::digest::compute_md5;
use super::manifest::ManifestEntry;
use crate::archive::read_optional_entry;
use crate::defect::{Defect, DefectSink};
use crate::error::{CheckError, Result};
use log::{debug, trace};
use std::collections::BTreeSet;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Verify the manifest in `dir` against the package archives `packages`.
///
/// A missing manifest is reported once and ends the check. Package files
/// never mentioned by the manifest are reported in name order after all
/// manifest lines have been processed.
///
/// # Errors
///
/// Returns [`CheckError::Zip`] or [`CheckError::ReadEntry`] when the manifest
/// or a package archive cannot be read.
pub fn verify_checksums<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    dir: &PackageDir<'_>,
    packages: &[String],
    sink: &mut dyn DefectSink,
) -> Result<()> {
    let manifest_path = dir.manifest_path();
    let Some(contents) = read_optional_entry(archive, &manifest_path)? else {
        sink.report(Defect::MissingManifest {
            manifest: dir.manifest_name().to_owned(),
            dir: dir.name().to_owned(),
        });
        return Ok(());
    };

    let mut unlisted: BTreeSet<&str> = packages.iter().map(String::as_str).collect();
    for line in String::from_utf8_lossy(&contents).lines() {
        let Some(entry) = ManifestEntry::parse(line) else {
            sink.report(Defect::MalformedManifestLine {
                manifest: dir.manifest_name().to_owned(),
                line: line.to_owned(),
            });
            continue;
        };

        if !unlisted.remove(entry.filename()) {
            sink.report(Defect::UnknownManifestEntry {
                manifest: dir.manifest_name().to_owned(),
                dir: dir.name().to_owned(),
                name: entry.filename().to_owned(),
            });
            continue;
        }

        verify_entry(archive, dir, &entry, sink)?;
    }

    for name in unlisted {
        sink.report(Defect::MissingManifestEntry {
            manifest: dir.manifest_name().to_owned(),
            name: name.to_owned(),
        });
    }
    debug!("verified {manifest_path}");
    Ok(())
}

/// Hash one package archive and compare it with its manifest line.
fn verify_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    dir: &PackageDir<'_>,
    entry: &ManifestEntry,
    sink: &mut dyn DefectSink,
) -> Result<()> {
    let path = dir.entry_path(entry.filename());
    let file = archive
        .by_name(&path)
        .map_err(|source| CheckError::zip(path.as_str(), source))?;
    let actual = compute_md5(file).map_err(|source| CheckError::read_entry(path.as_str(), source))?;
    trace!("{path}: md5 {actual}");

    if entry.hash() != actual {
        sink.report(Defect::HashMismatch {
            manifest: dir.manifest_name().to_owned(),
            name: entry.filename().to_owned(),
            expected: entry.hash().to_owned(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;
