//! Symbol file path grammar.
//!
//! Symbol files live at `symbols/<binary-dir>/<build-id>/<binary-name>.sym`.
//! The directory and file name exclude `/`, and the build id is one or more
//! uppercase hexadecimal characters.

use crate::defect::Defect;

const SYMBOLS_ROOT: &str = "symbols/";
const SYMBOL_SUFFIX: &str = ".sym";

/// Identity fragments captured from a symbol file path.
///
/// # Examples
///
/// ```
/// use release_checker::symbols::path::SymbolPath;
///
/// let path = SymbolPath::parse("symbols/daemon/0A1B2C/daemon.sym").expect("valid path");
/// assert_eq!(path.binary_dir(), "daemon");
/// assert_eq!(path.build_id(), "0A1B2C");
/// assert_eq!(path.binary_name(), "daemon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPath {
    full: String,
    binary_dir: String,
    build_id: String,
    binary_name: String,
}

impl SymbolPath {
    /// Match `path` against the symbol file grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Defect::PathFormat`] naming `path` when it does not match.
    pub fn parse(path: &str) -> Result<Self, Defect> {
        split_segments(path)
            .map(|(binary_dir, build_id, binary_name)| Self {
                full: path.to_owned(),
                binary_dir: binary_dir.to_owned(),
                build_id: build_id.to_owned(),
                binary_name: binary_name.to_owned(),
            })
            .ok_or_else(|| Defect::PathFormat {
                path: path.to_owned(),
            })
    }

    /// The full entry path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Directory segment naming the binary.
    #[must_use]
    pub fn binary_dir(&self) -> &str {
        &self.binary_dir
    }

    /// Build id segment.
    #[must_use]
    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    /// File name without the `.sym` suffix.
    #[must_use]
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }
}

/// Split a symbol path into its directory, build id and file name.
fn split_segments(path: &str) -> Option<(&str, &str, &str)> {
    let mut segments = path.strip_prefix(SYMBOLS_ROOT)?.split('/');
    let binary_dir = segments.next()?;
    let build_id = segments.next()?;
    let binary_name = segments.next()?.strip_suffix(SYMBOL_SUFFIX)?;
    if segments.next().is_some() {
        return None;
    }

    let well_formed = !binary_dir.is_empty() && !binary_name.is_empty() && is_build_id(build_id);
    well_formed.then_some((binary_dir, build_id, binary_name))
}

/// Whether `value` is one or more uppercase hexadecimal characters.
fn is_build_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}
