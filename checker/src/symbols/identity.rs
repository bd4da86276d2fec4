//! Platform, architecture and binary identity of a debug-symbol file.

use serde::Deserialize;
use std::fmt;

/// The `(platform, architecture, binary)` triple identifying a symbol file.
///
/// # Examples
///
/// ```
/// use release_checker::symbols::identity::SymbolIdentity;
///
/// let identity = SymbolIdentity::new("NaCl", "x86_64", "cgame");
/// assert_eq!(identity.to_string(), "(NaCl, x86_64, cgame)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolIdentity {
    platform: String,
    arch: String,
    binary: String,
}

impl SymbolIdentity {
    /// Create an identity from its three components.
    #[must_use]
    pub fn new(
        platform: impl Into<String>,
        arch: impl Into<String>,
        binary: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            arch: arch.into(),
            binary: binary.into(),
        }
    }

    /// Operating system token, as written in the module record.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// CPU architecture token.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Binary name, after NaCl remapping.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl fmt::Display for SymbolIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.platform, self.arch, self.binary)
    }
}
