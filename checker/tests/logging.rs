//! Log output of release checks.
//!
//! Kept in its own test binary because `logtest` installs a process-wide
//! logger.

use logtest::Logger;
use release_checker::release::ReleaseChecker;
use release_checker::testing::ReleaseFixture;

#[test]
fn nested_archives_are_logged_as_they_are_entered() {
    let mut logger = Logger::start();
    let mut archive = ReleaseFixture::new("0.55")
        .with_entry("pkg/notes.txt", b"hello".to_vec())
        .archive()
        .expect("fixture builds");
    let mut defects = Vec::new();
    ReleaseChecker::default()
        .check(&mut archive, "0.55", &mut defects)
        .expect("check runs");
    assert_eq!(defects.len(), 1);

    let mut messages = Vec::new();
    while let Some(record) = logger.pop() {
        messages.push(record.args().to_string());
    }
    for expected in [
        "checking platform archive unvanquished_0.55/linux-amd64.zip",
        "checking symbols archive unvanquished_0.55/symbols_0.55.zip",
        "found 2 package(s) under unvanquished_0.55/pkg/",
    ] {
        assert!(
            messages.iter().any(|message| message == expected),
            "missing log message {expected:?} in {messages:?}"
        );
    }
}
