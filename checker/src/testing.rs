//! In-memory release archive builders for tests.
//!
//! Available to the crate's own unit tests and, through the `test-support`
//! feature, to integration and behaviour tests. [`ReleaseFixture`] starts
//! from a complete, defect-free release and lets each test remove or
//! replace the parts it is interested in.

use crate::layout::{NaclNaming, ReleaseLayout, SymbolMarkers};
use crate::symbols::identity::SymbolIdentity;
use camino::Utf8Path;
use md5::{Digest, Md5};
use std::io::{Cursor, Write};
use zip::ZipArchive;
use zip::result::ZipResult;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Build a zip container from `(name, contents)` pairs, in order.
///
/// Names ending in `/` become directory entries and their contents are
/// ignored.
///
/// # Errors
///
/// Returns the [`zip::result::ZipError`] raised while writing.
pub fn zip_bytes(entries: &[(String, Vec<u8>)]) -> ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        if name.ends_with('/') {
            writer.add_directory(name.as_str(), options)?;
        } else {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(contents)?;
        }
    }
    Ok(writer.finish()?.into_inner())
}

/// One entry of a symbols archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFile {
    path: String,
    contents: String,
    identity: Option<SymbolIdentity>,
}

impl SymbolFile {
    /// A well-formed, unstripped symbol file for `identity`.
    ///
    /// NaCl identities are written the way the toolchain emits them: under
    /// the loader name, with a `Linux` module line and a body carrying the
    /// client or server marker.
    #[must_use]
    pub fn new(identity: SymbolIdentity, build_id: &str) -> Self {
        let markers = SymbolMarkers::default();
        let nacl = NaclNaming::default();

        let (path, contents) = if identity.platform() == nacl.platform {
            let loader = nacl.loader.as_str();
            let module_marker = if identity.binary() == nacl.server_binary {
                &markers.nacl_server
            } else {
                &markers.nacl_client
            };
            (
                format!("symbols/{loader}/{build_id}/{loader}.sym"),
                format!(
                    "MODULE Linux {arch} {build_id} {loader}\n\
                     FUNC 1000 24 0 {unstripped}::detail::formatImpl\n\
                     FUNC 2000 10 0 {module_marker}Init\n",
                    arch = identity.arch(),
                    unstripped = markers.unstripped,
                ),
            )
        } else {
            let binary = identity.binary();
            (
                format!("symbols/{binary}/{build_id}/{binary}.sym"),
                format!(
                    "MODULE {platform} {arch} {build_id} {binary}\n\
                     FILE 0 src/engine/main.cpp\n\
                     FUNC 1000 24 0 {unstripped}::format\n",
                    platform = identity.platform(),
                    arch = identity.arch(),
                    unstripped = markers.unstripped,
                ),
            )
        };

        Self {
            path,
            contents,
            identity: Some(identity),
        }
    }

    /// An arbitrary entry with no known identity.
    #[must_use]
    pub fn raw(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            identity: None,
        }
    }

    /// One well-formed file per default expected triple, in layout order,
    /// each with a distinct build id.
    #[must_use]
    pub fn complete_set() -> Vec<Self> {
        ReleaseLayout::default()
            .expected_symbols
            .into_iter()
            .enumerate()
            .map(|(index, identity)| Self::new(identity, &format!("5EED{index:04X}")))
            .collect()
    }

    /// Entry path inside the symbols archive.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// The identity this file was generated for, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&SymbolIdentity> {
        self.identity.as_ref()
    }
}

/// Build a symbols archive holding `files`, in order.
///
/// # Errors
///
/// Returns the [`zip::result::ZipError`] raised while writing.
pub fn symbols_archive_bytes(files: &[SymbolFile]) -> ZipResult<Vec<u8>> {
    let entries: Vec<(String, Vec<u8>)> = files
        .iter()
        .map(|file| (file.path.clone(), file.contents.as_bytes().to_vec()))
        .collect();
    zip_bytes(&entries)
}

/// How the fixture's checksum manifest is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ManifestSource {
    Generated,
    Custom(String),
    Absent,
}

/// Builder for a complete release archive.
///
/// The default fixture is defect-free under the default layout: every
/// platform archive, a symbols archive covering every expected triple, the
/// primary package plus one resource package, and a manifest generated from
/// the packages' digests.
///
/// # Examples
///
/// ```
/// use release_checker::release::ReleaseChecker;
/// use release_checker::testing::ReleaseFixture;
///
/// let mut archive = ReleaseFixture::new("0.55")
///     .without_platform_archive("macos-amd64")
///     .archive()
///     .expect("fixture builds");
/// let mut defects = Vec::new();
/// ReleaseChecker::default()
///     .check(&mut archive, "0.55", &mut defects)
///     .expect("check runs");
/// assert_eq!(defects.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReleaseFixture {
    layout: ReleaseLayout,
    version: String,
    platform_archives: Vec<String>,
    symbol_files: Option<Vec<SymbolFile>>,
    packages: Vec<(String, Vec<u8>)>,
    manifest: ManifestSource,
    extra_entries: Vec<(String, Vec<u8>)>,
}

impl ReleaseFixture {
    /// A defect-free release for `version` under the default layout.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self::for_layout(ReleaseLayout::default(), version)
    }

    /// A release for `version` shaped by `layout`.
    ///
    /// Symbol files are still generated for the default triples, so the
    /// release is defect-free only when `layout` keeps those.
    #[must_use]
    pub fn for_layout(layout: ReleaseLayout, version: impl Into<String>) -> Self {
        let version = version.into();
        let packages = vec![
            (
                format!("{}{version}.{}", layout.base_prefix, layout.package_extension),
                b"primary game package".to_vec(),
            ),
            (
                format!("res-maps_{version}.{}", layout.package_extension),
                b"map resources".to_vec(),
            ),
        ];
        Self {
            platform_archives: layout.platform_archives.clone(),
            symbol_files: Some(SymbolFile::complete_set()),
            packages,
            manifest: ManifestSource::Generated,
            extra_entries: Vec::new(),
            layout,
            version,
        }
    }

    /// Release version the archive is built for.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Layout the archive is built for.
    #[must_use]
    pub fn layout(&self) -> &ReleaseLayout {
        &self.layout
    }

    /// Leave out the platform archive `name` (without `.zip`).
    #[must_use]
    pub fn without_platform_archive(mut self, name: &str) -> Self {
        self.platform_archives.retain(|archive| archive != name);
        self
    }

    /// Leave out the symbols archive entirely.
    #[must_use]
    pub fn without_symbols_archive(mut self) -> Self {
        self.symbol_files = None;
        self
    }

    /// Replace the symbols archive contents.
    #[must_use]
    pub fn with_symbol_files(mut self, files: Vec<SymbolFile>) -> Self {
        self.symbol_files = Some(files);
        self
    }

    /// Drop the symbol file generated for `identity`.
    #[must_use]
    pub fn without_symbol(mut self, identity: &SymbolIdentity) -> Self {
        if let Some(files) = self.symbol_files.as_mut() {
            files.retain(|file| file.identity() != Some(identity));
        }
        self
    }

    /// Add or replace a package archive in the package directory.
    #[must_use]
    pub fn with_package(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        self.packages.retain(|(existing, _)| *existing != name);
        self.packages.push((name, contents.into()));
        self
    }

    /// Remove a package archive from the package directory.
    #[must_use]
    pub fn without_package(mut self, name: &str) -> Self {
        self.packages.retain(|(existing, _)| existing != name);
        self
    }

    /// Use `contents` verbatim as the checksum manifest.
    #[must_use]
    pub fn with_manifest(mut self, contents: impl Into<String>) -> Self {
        self.manifest = ManifestSource::Custom(contents.into());
        self
    }

    /// Leave out the checksum manifest.
    #[must_use]
    pub fn without_manifest(mut self) -> Self {
        self.manifest = ManifestSource::Absent;
        self
    }

    /// Add an arbitrary entry at `path`, relative to the base directory.
    #[must_use]
    pub fn with_entry(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.extra_entries.push((path.into(), contents.into()));
        self
    }

    /// Manifest text covering the current packages, one line each.
    #[must_use]
    pub fn generated_manifest(&self) -> String {
        self.packages
            .iter()
            .map(|(name, contents)| format!("{:x} *{name}\n", Md5::digest(contents)))
            .collect()
    }

    /// Serialise the release archive.
    ///
    /// # Errors
    ///
    /// Returns the [`zip::result::ZipError`] raised while writing.
    pub fn build(&self) -> ZipResult<Vec<u8>> {
        let base = self.layout.base_dir(&self.version);
        let pkg = format!("{base}{}/", self.layout.package_dir);
        let mut entries = vec![(base.clone(), Vec::new())];

        for name in &self.platform_archives {
            let inner = zip_bytes(&[(format!("{name}/README.txt"), b"binaries".to_vec())])?;
            entries.push((format!("{base}{name}.zip"), inner));
        }
        if let Some(files) = &self.symbol_files {
            entries.push((
                format!("{base}{}.zip", self.layout.symbols_archive(&self.version)),
                symbols_archive_bytes(files)?,
            ));
        }

        entries.push((pkg.clone(), Vec::new()));
        for (name, contents) in &self.packages {
            entries.push((format!("{pkg}{name}"), contents.clone()));
        }
        let manifest = match &self.manifest {
            ManifestSource::Generated => Some(self.generated_manifest()),
            ManifestSource::Custom(contents) => Some(contents.clone()),
            ManifestSource::Absent => None,
        };
        if let Some(manifest) = manifest {
            entries.push((
                format!("{pkg}{}", self.layout.manifest_name),
                manifest.into_bytes(),
            ));
        }

        for (path, contents) in &self.extra_entries {
            entries.push((format!("{base}{path}"), contents.clone()));
        }
        zip_bytes(&entries)
    }

    /// Build the release and open it for reading.
    ///
    /// # Errors
    ///
    /// Returns the [`zip::result::ZipError`] raised while writing or
    /// reopening the archive.
    pub fn archive(&self) -> ZipResult<ZipArchive<Cursor<Vec<u8>>>> {
        ZipArchive::new(Cursor::new(self.build()?))
    }

    /// Build the release and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when building or writing fails.
    pub fn write_to(&self, path: &Utf8Path) -> std::io::Result<()> {
        let bytes = self.build().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }
}
