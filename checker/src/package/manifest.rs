//! Checksum manifest line parsing.
//!
//! Each manifest line has the form `<hex-md5> *<filename>`, as written by
//! `md5sum --binary`.

const SEPARATOR: &str = " *";

/// One parsed manifest line.
///
/// # Examples
///
/// ```
/// use release_checker::package::manifest::ManifestEntry;
///
/// let entry = ManifestEntry::parse("d41d8cd98f00b204e9800998ecf8427e *unvanquished_0.55.dpk\n")
///     .expect("valid line");
/// assert_eq!(entry.hash(), "d41d8cd98f00b204e9800998ecf8427e");
/// assert_eq!(entry.filename(), "unvanquished_0.55.dpk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    hash: String,
    filename: String,
}

impl ManifestEntry {
    /// Parse a manifest line, ignoring surrounding whitespace.
    ///
    /// The line is split on the first `" *"`. Returns `None` when the
    /// separator is absent or the filename after it is empty. The hash is
    /// kept verbatim and compared as text.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let (hash, filename) = line.trim().split_once(SEPARATOR)?;
        (!filename.is_empty()).then(|| Self {
            hash: hash.to_owned(),
            filename: filename.to_owned(),
        })
    }

    /// The recorded digest.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The file the digest belongs to.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }
}
