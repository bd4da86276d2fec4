//! Package directory listing checks.

use super::PackageDir;
use super::checksum::verify_checksums;
use crate::archive::entry_names;
use crate::defect::{Defect, DefectSink};
use crate::error::Result;
use crate::layout::ReleaseLayout;
use log::debug;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Validate the package directory under `base` and verify its manifest.
///
/// Entries other than package archives and the manifest are reported, as
/// is a missing primary package. The collected package archives are then
/// handed to [`verify_checksums`].
///
/// # Errors
///
/// Propagates the fatal errors of [`verify_checksums`].
pub fn check_package_dir<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    layout: &ReleaseLayout,
    base: &str,
    sink: &mut dyn DefectSink,
) -> Result<()> {
    let dir = PackageDir::new(layout, base);
    let mut packages = Vec::new();

    for name in entry_names(archive) {
        let Some(relative) = name.strip_prefix(dir.prefix()) else {
            continue;
        };
        if relative.is_empty() {
            continue;
        }
        if dir.is_package(relative) {
            packages.push(relative.to_owned());
        } else if relative != dir.manifest_name() {
            sink.report(Defect::UnexpectedPkgEntry {
                dir: dir.name().to_owned(),
                name: relative.to_owned(),
            });
        }
    }
    debug!("found {} package(s) under {}", packages.len(), dir.prefix());

    let primary = dir.primary_package();
    if !packages.contains(&primary) {
        sink.report(Defect::MissingPrimaryPackage { name: primary });
    }

    verify_checksums(archive, &dir, &packages, sink)
}
