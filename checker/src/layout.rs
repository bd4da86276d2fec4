//! Release layout configuration.
//!
//! A [`ReleaseLayout`] describes what a valid release archive contains: the
//! base directory prefix, the nested platform archives, the symbol triples
//! every release must ship, the content markers used to classify symbol
//! files and the package directory conventions. The defaults describe an
//! Unvanquished release. A TOML file can override any subset of the fields;
//! omitted keys keep their defaults.

use crate::symbols::identity::SymbolIdentity;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Errors arising from loading a layout file.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout file could not be read.
    #[error("failed to read layout file {path}: {source}")]
    Io {
        /// Path of the layout file.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The layout file is not valid TOML or has unknown keys.
    #[error("invalid layout file {path}: {source}")]
    Parse {
        /// Path of the layout file.
        path: Utf8PathBuf,
        /// The TOML deserialisation failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Substrings searched for in symbol file bodies.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SymbolMarkers {
    /// Present in every unstripped binary; its absence flags a stripped file.
    pub unstripped: String,
    /// Identifies a NaCl client module.
    pub nacl_client: String,
    /// Identifies a NaCl server module.
    pub nacl_server: String,
}

impl Default for SymbolMarkers {
    fn default() -> Self {
        Self {
            unstripped: "tinyformat".to_owned(),
            nacl_client: "CG_Rocket_".to_owned(),
            nacl_server: "G_admin_".to_owned(),
        }
    }
}

/// How NaCl symbol files are recognised and renamed.
///
/// NaCl modules are all built as the generic loader filename and report
/// `Linux` as their operating system, so both are replaced before the
/// identity is reconciled.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NaclNaming {
    /// Binary name shared by every NaCl module.
    pub loader: String,
    /// Platform token substituted for NaCl modules.
    pub platform: String,
    /// Logical binary name for a module carrying the client marker.
    pub client_binary: String,
    /// Logical binary name for a module carrying the server marker.
    pub server_binary: String,
}

impl Default for NaclNaming {
    fn default() -> Self {
        Self {
            loader: "main.nexe".to_owned(),
            platform: "NaCl".to_owned(),
            client_binary: "cgame".to_owned(),
            server_binary: "sgame".to_owned(),
        }
    }
}

/// Immutable description of a release archive's expected structure.
///
/// # Examples
///
/// ```
/// use release_checker::layout::ReleaseLayout;
///
/// let layout = ReleaseLayout::default();
/// assert_eq!(layout.base_dir("0.55.2"), "unvanquished_0.55.2/");
/// assert_eq!(layout.expected_symbols.len(), 13);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseLayout {
    /// Prefix of the top-level directory; the version is appended.
    pub base_prefix: String,
    /// Prefix of the symbols archive name; the version is appended.
    pub symbols_prefix: String,
    /// Nested per-platform archive names, without the `.zip` suffix, in the
    /// order they are checked.
    pub platform_archives: Vec<String>,
    /// Package directory name under the base directory.
    pub package_dir: String,
    /// Checksum manifest filename inside the package directory.
    pub manifest_name: String,
    /// Extension of package archives, without the dot.
    pub package_extension: String,
    /// Content markers searched for in symbol files.
    pub markers: SymbolMarkers,
    /// NaCl module naming rules.
    pub nacl: NaclNaming,
    /// Triples that must each be covered by exactly one symbol file.
    pub expected_symbols: Vec<SymbolIdentity>,
}

impl Default for ReleaseLayout {
    fn default() -> Self {
        Self {
            base_prefix: "unvanquished_".to_owned(),
            symbols_prefix: "symbols_".to_owned(),
            platform_archives: ["linux-amd64", "macos-amd64", "windows-i686", "windows-amd64"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            package_dir: "pkg".to_owned(),
            manifest_name: "md5sums".to_owned(),
            package_extension: "dpk".to_owned(),
            markers: SymbolMarkers::default(),
            nacl: NaclNaming::default(),
            expected_symbols: default_expected_symbols(),
        }
    }
}

impl ReleaseLayout {
    /// Load a layout from a TOML file, filling omitted keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Io`] when the file cannot be read and
    /// [`LayoutError::Parse`] when it is not a valid layout.
    pub fn load(path: &Utf8Path) -> Result<Self, LayoutError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| LayoutError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Parse a layout from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the deserialisation error for malformed input or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use release_checker::layout::ReleaseLayout;
    ///
    /// let layout = ReleaseLayout::from_toml("base_prefix = \"daemon_\"").expect("valid");
    /// assert_eq!(layout.base_dir("1.0"), "daemon_1.0/");
    /// assert_eq!(layout.manifest_name, "md5sums");
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Top-level directory for `version`, with a trailing slash.
    #[must_use]
    pub fn base_dir(&self, version: &str) -> String {
        format!("{}{version}/", self.base_prefix)
    }

    /// Name of the symbols archive for `version`, without the `.zip` suffix.
    #[must_use]
    pub fn symbols_archive(&self, version: &str) -> String {
        format!("{}{version}", self.symbols_prefix)
    }
}

/// The triples shipped by every Unvanquished release.
fn default_expected_symbols() -> Vec<SymbolIdentity> {
    const DAEMONS: [&str; 3] = ["daemon", "daemonded", "daemon-tty"];

    let linux = DAEMONS
        .into_iter()
        .map(|binary| SymbolIdentity::new("Linux", "x86_64", binary));
    let windows = ["x86", "x86_64"].into_iter().flat_map(|arch| {
        DAEMONS
            .into_iter()
            .map(move |binary| SymbolIdentity::new("windows", arch, format!("{binary}.exe")))
    });
    let nacl = ["cgame", "sgame"].into_iter().flat_map(|binary| {
        ["x86", "x86_64"]
            .into_iter()
            .map(move |arch| SymbolIdentity::new("NaCl", arch, binary))
    });

    linux.chain(windows).chain(nacl).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_layout_expects_thirteen_distinct_triples() {
        let layout = ReleaseLayout::default();
        let mut triples = layout.expected_symbols.clone();
        triples.sort();
        triples.dedup();
        assert_eq!(triples.len(), 13);
    }

    #[rstest]
    #[case::linux(SymbolIdentity::new("Linux", "x86_64", "daemon-tty"))]
    #[case::windows32(SymbolIdentity::new("windows", "x86", "daemonded.exe"))]
    #[case::windows64(SymbolIdentity::new("windows", "x86_64", "daemon.exe"))]
    #[case::nacl_client(SymbolIdentity::new("NaCl", "x86", "cgame"))]
    #[case::nacl_server(SymbolIdentity::new("NaCl", "x86_64", "sgame"))]
    fn default_layout_includes(#[case] identity: SymbolIdentity) {
        assert!(ReleaseLayout::default().expected_symbols.contains(&identity));
    }

    #[test]
    fn default_layout_names_four_platform_archives_in_order() {
        let layout = ReleaseLayout::default();
        assert_eq!(
            layout.platform_archives,
            vec!["linux-amd64", "macos-amd64", "windows-i686", "windows-amd64"]
        );
        assert_eq!(layout.symbols_archive("0.55"), "symbols_0.55");
    }

    #[test]
    fn toml_overrides_keep_unspecified_defaults() {
        let layout = ReleaseLayout::from_toml(concat!(
            "platform_archives = [\"linux-amd64\"]\n",
            "[markers]\n",
            "unstripped = \"fmt::format\"\n",
            "[[expected_symbols]]\n",
            "platform = \"Linux\"\n",
            "arch = \"x86_64\"\n",
            "binary = \"daemon\"\n",
        ))
        .expect("valid layout");

        assert_eq!(layout.platform_archives, vec!["linux-amd64"]);
        assert_eq!(layout.markers.unstripped, "fmt::format");
        assert_eq!(layout.markers.nacl_client, "CG_Rocket_");
        assert_eq!(
            layout.expected_symbols,
            vec![SymbolIdentity::new("Linux", "x86_64", "daemon")]
        );
        assert_eq!(layout.package_dir, "pkg");
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        assert!(ReleaseLayout::from_toml("bogus = 1").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ReleaseLayout::load(Utf8Path::new("/nonexistent/layout.toml"))
            .expect_err("file does not exist");
        assert!(matches!(err, LayoutError::Io { .. }));
    }

    #[test]
    fn load_reads_layout_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, "package_dir = \"packages\"\n").expect("write layout");
        let utf8 = Utf8PathBuf::from_path_buf(path).expect("utf-8 temp path");

        let layout = ReleaseLayout::load(&utf8).expect("valid layout");
        assert_eq!(layout.package_dir, "packages");
    }
}
