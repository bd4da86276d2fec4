//! Tests for release checker CLI parsing.

use super::*;
use clap::error::ErrorKind;
use rstest::rstest;

#[test]
fn cli_parses_positionals() {
    let cli = Cli::parse_from(["release-checker", "release.zip", "0.55.2"]);
    assert_eq!(cli.archive, Utf8PathBuf::from("release.zip"));
    assert_eq!(cli.release, "0.55.2");
    assert!(cli.layout.is_none());
    assert!(!cli.strict);
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
}

#[test]
fn cli_parses_options() {
    let cli = Cli::parse_from([
        "release-checker",
        "--layout",
        "layout.toml",
        "--strict",
        "-vv",
        "release.zip",
        "1.0",
    ]);
    assert_eq!(cli.layout, Some(Utf8PathBuf::from("layout.toml")));
    assert!(cli.strict);
    assert_eq!(cli.verbosity, 2);
}

#[rstest]
#[case::no_arguments(&["release-checker"][..])]
#[case::archive_only(&["release-checker", "release.zip"][..])]
#[case::extra_argument(&["release-checker", "release.zip", "1.0", "extra"][..])]
fn cli_requires_exactly_two_positionals(#[case] args: &[&str]) {
    let err = Cli::try_parse_from(args).expect_err("wrong arity");
    assert!(matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
    ));
}

#[test]
fn cli_rejects_quiet_with_verbose() {
    let err = Cli::try_parse_from(["release-checker", "-q", "-v", "release.zip", "1.0"])
        .expect_err("conflicting flags");
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn cli_version_flag_is_not_shadowed_by_release_argument() {
    let err = Cli::try_parse_from(["release-checker", "--version"]).expect_err("prints version");
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}
