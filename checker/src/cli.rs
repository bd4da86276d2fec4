//! CLI argument definitions for the release checker.
//!
//! Kept apart from the binary entrypoint so parsing can be unit-tested.

use camino::Utf8PathBuf;
use clap::Parser;

/// Check a packaged release archive for structural defects.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "release-checker")]
#[command(version, about)]
#[command(long_about = concat!(
    "Check a packaged release archive for structural defects.\n\n",
    "The archive is expected to contain unvanquished_<VERSION>/ with the ",
    "per-platform archives, a symbols_<VERSION>.zip debug-symbols archive and ",
    "a pkg/ directory whose packages are listed in an md5sums manifest.\n\n",
    "Each defect is printed as one line on standard output. The exit status ",
    "is 0 whatever the defect count unless --strict is given.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Check a release:\n",
    "    $ release-checker unvanquished_0.55.2.zip 0.55.2\n\n",
    "  Fail the build on any defect:\n",
    "    $ release-checker --strict unvanquished_0.55.2.zip 0.55.2\n\n",
    "  Check against a custom layout with debug logging:\n",
    "    $ release-checker --layout layout.toml -vv release.zip 1.0",
))]
pub struct Cli {
    /// Path to the release archive.
    #[arg(value_name = "ARCHIVE")]
    pub archive: Utf8PathBuf,

    /// Release version, as used in the archive's directory names.
    #[arg(value_name = "VERSION")]
    pub release: String,

    /// TOML file overriding the default release layout.
    #[arg(long, value_name = "FILE")]
    pub layout: Option<Utf8PathBuf>,

    /// Exit with status 1 when any defect is found.
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors; the defect summary is suppressed.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
