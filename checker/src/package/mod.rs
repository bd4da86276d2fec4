//! Package directory checks.
//!
//! The `pkg/` directory of a release holds the `.dpk` package archives and
//! an `md5sums` manifest covering each of them.
//!
//! # Sub-modules
//!
//! - [`checksum`] - Manifest verification against package contents.
//! - [`digest`] - MD5 content hashing.
//! - [`directory`] - Directory listing classification.
//! - [`manifest`] - Manifest line parsing (`ManifestEntry`).

pub mod checksum;
pub mod digest;
pub mod directory;
pub mod manifest;

use crate::layout::ReleaseLayout;

/// Names and paths of one release's package directory.
///
/// # Examples
///
/// ```
/// use release_checker::layout::ReleaseLayout;
/// use release_checker::package::PackageDir;
///
/// let layout = ReleaseLayout::default();
/// let dir = PackageDir::new(&layout, "unvanquished_0.55/");
/// assert_eq!(dir.prefix(), "unvanquished_0.55/pkg/");
/// assert_eq!(dir.manifest_path(), "unvanquished_0.55/pkg/md5sums");
/// assert_eq!(dir.primary_package(), "unvanquished_0.55.dpk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir<'a> {
    layout: &'a ReleaseLayout,
    base: String,
    prefix: String,
}

impl<'a> PackageDir<'a> {
    /// Describe the package directory under `base` (which ends in `/`).
    #[must_use]
    pub fn new(layout: &'a ReleaseLayout, base: &str) -> Self {
        Self {
            layout,
            base: base.to_owned(),
            prefix: format!("{base}{}/", layout.package_dir),
        }
    }

    /// Entry path prefix of the directory, with a trailing slash.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Directory name, as used in defect messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.layout.package_dir
    }

    /// Manifest filename.
    #[must_use]
    pub fn manifest_name(&self) -> &str {
        &self.layout.manifest_name
    }

    /// Full entry path of the manifest.
    #[must_use]
    pub fn manifest_path(&self) -> String {
        self.entry_path(self.manifest_name())
    }

    /// Full entry path of a file inside the directory.
    #[must_use]
    pub fn entry_path(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Whether `name` (relative to the directory) is a package archive:
    /// a single non-empty path segment ending in the package extension.
    #[must_use]
    pub fn is_package(&self, name: &str) -> bool {
        if name.contains('/') {
            return false;
        }
        name.strip_suffix(self.layout.package_extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|stem| !stem.is_empty())
    }

    /// Package named after the release's top-level directory.
    #[must_use]
    pub fn primary_package(&self) -> String {
        let top = self.base.split('/').next().unwrap_or_default();
        format!("{top}.{}", self.layout.package_extension)
    }
}
