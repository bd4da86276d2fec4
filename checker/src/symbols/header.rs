//! `MODULE` record parsing.
//!
//! The first line of a Breakpad symbol file reads
//! `MODULE <platform> <arch> <build-id> <binary>`.

const MODULE_TOKEN: &str = "MODULE";

/// The parsed first line of a symbol file.
///
/// # Examples
///
/// ```
/// use release_checker::symbols::header::ModuleRecord;
///
/// let record = ModuleRecord::parse("MODULE Linux x86_64 ABCDEF1234 main.nexe\n")
///     .expect("valid module record");
/// assert_eq!(record.platform(), "Linux");
/// assert_eq!(record.binary(), "main.nexe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    platform: String,
    arch: String,
    build_id: String,
    binary: String,
}

impl ModuleRecord {
    /// Parse a module record line.
    ///
    /// Returns `None` unless the line has exactly five whitespace-separated
    /// fields and the first is `MODULE`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let (Some(token), Some(platform), Some(arch), Some(build_id), Some(binary), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return None;
        };
        (token == MODULE_TOKEN).then(|| Self {
            platform: platform.to_owned(),
            arch: arch.to_owned(),
            build_id: build_id.to_owned(),
            binary: binary.to_owned(),
        })
    }

    /// Operating system token.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// CPU architecture token.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Build id.
    #[must_use]
    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    /// Binary file name.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }
}
