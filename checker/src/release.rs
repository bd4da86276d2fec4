//! Release orchestration.
//!
//! [`ReleaseChecker`] walks a release archive in a fixed order: the platform
//! archives in layout order, the symbols archive, then the package
//! directory. Every defect goes to one sink, so the output keeps that
//! order.

use crate::archive::open_nested;
use crate::defect::{Defect, DefectSink};
use crate::error::{CheckError, Result};
use crate::layout::ReleaseLayout;
use crate::package::directory::check_package_dir;
use crate::platform::{PassThroughChecker, PlatformChecker};
use crate::symbols::check_symbols;
use camino::Utf8Path;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

/// Checks release archives against a [`ReleaseLayout`].
///
/// # Examples
///
/// ```
/// use release_checker::release::ReleaseChecker;
/// use release_checker::testing::ReleaseFixture;
///
/// let mut archive = ReleaseFixture::new("0.55").archive().expect("fixture builds");
/// let mut defects = Vec::new();
/// ReleaseChecker::default()
///     .check(&mut archive, "0.55", &mut defects)
///     .expect("check runs");
/// assert!(defects.is_empty());
/// ```
pub struct ReleaseChecker {
    layout: ReleaseLayout,
    platform_checkers: HashMap<String, Box<dyn PlatformChecker>>,
}

impl Default for ReleaseChecker {
    fn default() -> Self {
        Self::new(ReleaseLayout::default())
    }
}

impl fmt::Debug for ReleaseChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<&str> = self.platform_checkers.keys().map(String::as_str).collect();
        registered.sort_unstable();
        f.debug_struct("ReleaseChecker")
            .field("layout", &self.layout)
            .field("platform_checkers", &registered)
            .finish()
    }
}

impl ReleaseChecker {
    /// Create a checker for `layout` with pass-through platform checkers.
    #[must_use]
    pub fn new(layout: ReleaseLayout) -> Self {
        Self {
            layout,
            platform_checkers: HashMap::new(),
        }
    }

    /// The layout releases are checked against.
    #[must_use]
    pub fn layout(&self) -> &ReleaseLayout {
        &self.layout
    }

    /// Use `checker` for the platform archive `name` (without `.zip`).
    #[must_use]
    pub fn with_platform_checker(
        mut self,
        name: impl Into<String>,
        checker: impl PlatformChecker + 'static,
    ) -> Self {
        self.platform_checkers.insert(name.into(), Box::new(checker));
        self
    }

    /// Open the archive at `path` and check it as release `version`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::OpenArchive`] when the file cannot be opened,
    /// [`CheckError::Zip`] when it is not a zip container, and the errors
    /// of [`ReleaseChecker::check`].
    pub fn check_file(
        &self,
        path: &Utf8Path,
        version: &str,
        sink: &mut dyn DefectSink,
    ) -> Result<()> {
        let file = File::open(path).map_err(|source| CheckError::OpenArchive {
            path: path.to_owned(),
            source,
        })?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|source| CheckError::zip(path.as_str(), source))?;
        debug!("opened {path} with {} entries", archive.len());
        self.check(&mut archive, version, sink)
    }

    /// Check an open release archive as release `version`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] when a nested archive or entry cannot be
    /// read. Defects never abort the check.
    pub fn check<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        version: &str,
        sink: &mut dyn DefectSink,
    ) -> Result<()> {
        let base = self.layout.base_dir(version);

        for name in &self.layout.platform_archives {
            let path = format!("{base}{name}.zip");
            let Some(mut nested) = open_nested(archive, &path)? else {
                sink.report(Defect::MissingPlatformArchive { path });
                continue;
            };
            debug!("checking platform archive {path}");
            self.platform_checker(name).check(&mut nested, sink)?;
        }

        let symbols = format!("{base}{}.zip", self.layout.symbols_archive(version));
        match open_nested(archive, &symbols)? {
            Some(mut nested) => {
                debug!("checking symbols archive {symbols}");
                check_symbols(&symbols, &mut nested, &self.layout, sink)?;
            }
            None => sink.report(Defect::MissingPlatformArchive { path: symbols }),
        }

        check_package_dir(archive, &self.layout, &base, sink)
    }

    fn platform_checker(&self, name: &str) -> &dyn PlatformChecker {
        self.platform_checkers
            .get(name)
            .map_or(&PassThroughChecker as &dyn PlatformChecker, Box::as_ref)
    }
}

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;
