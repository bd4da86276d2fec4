//! Reportable defects and the sinks that receive them.
//!
//! A [`Defect`] is a non-fatal validation failure. Checkers push defects into
//! a [`DefectSink`] as soon as they find them, so the command-line front end
//! can stream each report to standard output while the scan continues.

use crate::symbols::identity::SymbolIdentity;
use std::io::Write;
use thiserror::Error;

/// A data-quality problem found in a release archive.
///
/// The [`Display`](std::fmt::Display) rendering of each variant is the line
/// printed for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Defect {
    /// A platform or symbols archive is absent from the release.
    #[error("Missing file: {path}")]
    MissingPlatformArchive {
        /// Full path the archive was expected at.
        path: String,
    },

    /// A `.sym` entry does not follow `symbols/<binary>/<BUILDID>/<binary>.sym`.
    #[error("Symbol filename {path:?} does not match expected pattern")]
    PathFormat {
        /// The offending entry path.
        path: String,
    },

    /// The first line of a symbol file is not a five-field `MODULE` record.
    #[error("Symbol file {path:?} does not have a valid first line (module record)")]
    HeaderFormat {
        /// The offending entry path.
        path: String,
    },

    /// The module record's build id differs from the one in the path.
    #[error(
        "Build ID in {path:?} module line ({header}) does not match that in the path ({expected})"
    )]
    BuildIdMismatch {
        /// The offending entry path.
        path: String,
        /// Build id taken from the module record.
        header: String,
        /// Build id taken from the path.
        expected: String,
    },

    /// The module record's binary name differs from the path segments.
    #[error("Binary name inside {path:?} ({binary}) does not match either the directory or filename")]
    BinaryNameMismatch {
        /// The offending entry path.
        path: String,
        /// Binary name taken from the module record.
        binary: String,
    },

    /// A symbol file carries no recognisable function symbols.
    #[error(
        "Symbol file {path:?} doesn't appear to actually have symbols (mistakenly used stripped binary?)"
    )]
    StrippedSymbols {
        /// The offending entry path.
        path: String,
    },

    /// A symbol file identifies a triple outside the expected set, or one
    /// that was already matched.
    #[error("Unexpected platform/arch/binary combination {identity}")]
    UnexpectedTriple {
        /// The unexpected identity.
        identity: SymbolIdentity,
    },

    /// No symbol file was found for an expected triple.
    #[error("No symbols found for {identity}")]
    MissingSymbols {
        /// The identity that was never observed.
        identity: SymbolIdentity,
    },

    /// The checksum manifest is absent from the package directory.
    #[error("Missing {manifest} file in {dir}/")]
    MissingManifest {
        /// Manifest filename.
        manifest: String,
        /// Package directory name.
        dir: String,
    },

    /// A manifest line lacks the `" *"` separator or a filename.
    #[error("Bad line in {manifest}: {line:?}")]
    MalformedManifestLine {
        /// Manifest filename.
        manifest: String,
        /// The raw line.
        line: String,
    },

    /// The manifest lists a file that is not in the package directory.
    #[error("{manifest} has file {name:?} which does not exist in {dir}/")]
    UnknownManifestEntry {
        /// Manifest filename.
        manifest: String,
        /// Package directory name.
        dir: String,
        /// The listed filename.
        name: String,
    },

    /// A package file's content hash differs from the manifest.
    #[error("{manifest} says hash of {name} is {expected}, but actual is {actual}")]
    HashMismatch {
        /// Manifest filename.
        manifest: String,
        /// The package filename.
        name: String,
        /// Hash recorded in the manifest.
        expected: String,
        /// Hash computed from the file.
        actual: String,
    },

    /// A package file has no manifest line.
    #[error("Missing {manifest} entry for file: {name}")]
    MissingManifestEntry {
        /// Manifest filename.
        manifest: String,
        /// The package filename.
        name: String,
    },

    /// The package directory holds something other than packages and the
    /// manifest.
    #[error("Unexpected filename in {dir}/ {name:?}")]
    UnexpectedPkgEntry {
        /// Package directory name.
        dir: String,
        /// The entry path relative to the package directory.
        name: String,
    },

    /// The package named after the release is missing.
    #[error("Expected there to be a package named {name}")]
    MissingPrimaryPackage {
        /// The expected package filename.
        name: String,
    },
}

/// Receiver for defects as checkers produce them.
pub trait DefectSink {
    /// Record one defect.
    fn report(&mut self, defect: Defect);
}

impl DefectSink for Vec<Defect> {
    fn report(&mut self, defect: Defect) {
        self.push(defect);
    }
}

/// A sink that writes each defect as one line and counts them.
///
/// Write failures are remembered rather than returned so that checkers stay
/// infallible with respect to output; call [`LineSink::finish`] once the
/// check is complete to surface the first failure.
///
/// # Examples
///
/// ```
/// use release_checker::defect::{Defect, DefectSink, LineSink};
///
/// let mut sink = LineSink::new(Vec::new());
/// sink.report(Defect::MissingPrimaryPackage {
///     name: "unvanquished_0.55.dpk".to_owned(),
/// });
/// assert_eq!(sink.count(), 1);
/// let out = sink.finish().expect("in-memory writes succeed");
/// assert_eq!(
///     String::from_utf8(out).expect("utf-8"),
///     "Expected there to be a package named unvanquished_0.55.dpk\n"
/// );
/// ```
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
    count: usize,
    error: Option<std::io::Error>,
}

impl<W: Write> LineSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            error: None,
        }
    }

    /// Number of defects reported so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flush the writer and return it, or the first write failure.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while writing or flushing.
    pub fn finish(mut self) -> std::io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> DefectSink for LineSink<W> {
    fn report(&mut self, defect: Defect) {
        self.count += 1;
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.writer, "{defect}") {
            self.error = Some(err);
        }
    }
}
