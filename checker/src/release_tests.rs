//! Unit tests for release orchestration.

use super::*;
use crate::archive::NestedArchive;
use crate::symbols::identity::SymbolIdentity;
use crate::testing::ReleaseFixture;
use rstest::rstest;

const VERSION: &str = "0.55";

fn check(fixture: &ReleaseFixture) -> Vec<Defect> {
    check_with(&ReleaseChecker::default(), fixture, VERSION)
}

fn check_with(checker: &ReleaseChecker, fixture: &ReleaseFixture, version: &str) -> Vec<Defect> {
    let mut archive = fixture.archive().expect("fixture builds");
    let mut defects = Vec::new();
    checker
        .check(&mut archive, version, &mut defects)
        .expect("check runs");
    defects
}

#[test]
fn complete_release_reports_nothing() {
    let defects = check(&ReleaseFixture::new(VERSION));
    assert!(defects.is_empty(), "unexpected defects: {defects:?}");
}

#[rstest]
#[case::linux("linux-amd64")]
#[case::macos("macos-amd64")]
#[case::windows32("windows-i686")]
#[case::windows64("windows-amd64")]
fn missing_platform_archive_is_reported(#[case] name: &str) {
    let defects = check(&ReleaseFixture::new(VERSION).without_platform_archive(name));
    assert_eq!(
        defects,
        vec![Defect::MissingPlatformArchive {
            path: format!("unvanquished_0.55/{name}.zip")
        }]
    );
}

#[test]
fn missing_symbols_archive_is_reported_like_a_platform_archive() {
    let defects = check(&ReleaseFixture::new(VERSION).without_symbols_archive());
    assert_eq!(
        defects
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec!["Missing file: unvanquished_0.55/symbols_0.55.zip"]
    );
}

#[test]
fn defects_keep_platform_symbols_package_order() {
    let fixture = ReleaseFixture::new(VERSION);
    let manifest = fixture.generated_manifest().replacen("357b", "0000", 1);
    let fixture = fixture
        .with_manifest(manifest)
        .without_symbol(&SymbolIdentity::new("NaCl", "x86", "sgame"))
        .without_platform_archive("windows-amd64");

    assert_eq!(
        check(&fixture),
        vec![
            Defect::MissingPlatformArchive {
                path: "unvanquished_0.55/windows-amd64.zip".to_owned()
            },
            Defect::MissingSymbols {
                identity: SymbolIdentity::new("NaCl", "x86", "sgame")
            },
            Defect::HashMismatch {
                manifest: "md5sums".to_owned(),
                name: "unvanquished_0.55.dpk".to_owned(),
                expected: "0000499ee658759b72c9a6e3380bbe9f".to_owned(),
                actual: "357b499ee658759b72c9a6e3380bbe9f".to_owned(),
            },
        ]
    );
}

#[test]
fn wrong_version_finds_nothing() {
    let defects = check_with(
        &ReleaseChecker::default(),
        &ReleaseFixture::new(VERSION),
        "0.56",
    );
    let lines: Vec<String> = defects.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "Missing file: unvanquished_0.56/linux-amd64.zip",
            "Missing file: unvanquished_0.56/macos-amd64.zip",
            "Missing file: unvanquished_0.56/windows-i686.zip",
            "Missing file: unvanquished_0.56/windows-amd64.zip",
            "Missing file: unvanquished_0.56/symbols_0.56.zip",
            "Expected there to be a package named unvanquished_0.56.dpk",
            "Missing md5sums file in pkg/",
        ]
    );
}

#[test]
fn registered_platform_checker_runs_in_platform_order() {
    let checker = ReleaseChecker::default().with_platform_checker(
        "windows-i686",
        |archive: &mut NestedArchive, sink: &mut dyn DefectSink| -> Result<()> {
            sink.report(Defect::MissingPlatformArchive {
                path: format!("windows-i686 holds {} entries", archive.len()),
            });
            Ok(())
        },
    );
    let fixture = ReleaseFixture::new(VERSION).without_platform_archive("linux-amd64");

    assert_eq!(
        check_with(&checker, &fixture, VERSION),
        vec![
            Defect::MissingPlatformArchive {
                path: "unvanquished_0.55/linux-amd64.zip".to_owned()
            },
            Defect::MissingPlatformArchive {
                path: "windows-i686 holds 1 entries".to_owned()
            },
        ]
    );
}

#[test]
fn corrupt_platform_archive_is_fatal() {
    let fixture = ReleaseFixture::new(VERSION)
        .without_platform_archive("macos-amd64")
        .with_entry("macos-amd64.zip", b"not a zip".to_vec());
    let mut archive = fixture.archive().expect("fixture builds");
    let mut defects = Vec::new();

    let err = ReleaseChecker::default()
        .check(&mut archive, VERSION, &mut defects)
        .expect_err("corrupt nested archive");
    assert!(
        matches!(err, CheckError::Zip { ref archive, .. } if archive == "unvanquished_0.55/macos-amd64.zip")
    );
    assert!(defects.is_empty());
}

#[test]
fn check_file_reads_archive_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8Path::from_path(dir.path())
        .expect("utf-8 temp dir")
        .join("unvanquished_0.55.zip");
    ReleaseFixture::new(VERSION)
        .without_package("res-maps_0.55.dpk")
        .with_entry("pkg/notes.txt", b"hello".to_vec())
        .write_to(&path)
        .expect("write fixture");

    let mut defects = Vec::new();
    ReleaseChecker::default()
        .check_file(&path, VERSION, &mut defects)
        .expect("check runs");
    assert_eq!(
        defects,
        vec![Defect::UnexpectedPkgEntry {
            dir: "pkg".to_owned(),
            name: "notes.txt".to_owned()
        }]
    );
}

#[test]
fn check_file_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8Path::from_path(dir.path())
        .expect("utf-8 temp dir")
        .join("absent.zip");

    let err = ReleaseChecker::default()
        .check_file(&path, VERSION, &mut Vec::<Defect>::new())
        .expect_err("missing archive");
    assert!(matches!(err, CheckError::OpenArchive { path: ref reported, .. } if *reported == path));
}

#[test]
fn check_file_rejects_non_zip_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8Path::from_path(dir.path())
        .expect("utf-8 temp dir")
        .join("release.zip");
    std::fs::write(&path, b"plain text").expect("write file");

    let err = ReleaseChecker::default()
        .check_file(&path, VERSION, &mut Vec::<Defect>::new())
        .expect_err("not a zip");
    assert!(matches!(err, CheckError::Zip { .. }));
}

#[test]
fn debug_lists_registered_checkers() {
    let checker = ReleaseChecker::default()
        .with_platform_checker("macos-amd64", PassThroughChecker)
        .with_platform_checker("linux-amd64", PassThroughChecker);
    let rendered = format!("{checker:?}");
    assert!(rendered.contains(r#"platform_checkers: ["linux-amd64", "macos-amd64"]"#));
}
