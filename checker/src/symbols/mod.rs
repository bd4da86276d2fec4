//! Debug-symbol archive checks.
//!
//! The symbols archive holds one Breakpad symbol file per shipped binary.
//! Checking runs in two phases: every `.sym` entry is first inspected and
//! classified, then the collected identities are reconciled against the
//! layout's expected set.
//!
//! # Sub-modules
//!
//! - [`expected`] - Expected-set tracking (`ExpectedSymbols`).
//! - [`header`] - `MODULE` record parsing (`ModuleRecord`).
//! - [`identity`] - The `(platform, arch, binary)` triple (`SymbolIdentity`).
//! - [`inspector`] - Per-file checks and classification (`SymbolInspector`).
//! - [`path`] - Symbol path grammar (`SymbolPath`).

pub mod expected;
pub mod header;
pub mod identity;
pub mod inspector;
pub mod path;

use crate::defect::DefectSink;
use crate::error::{CheckError, Result};
use crate::layout::ReleaseLayout;
use expected::ExpectedSymbols;
use identity::SymbolIdentity;
use inspector::SymbolInspector;
use log::debug;
use path::SymbolPath;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

const SYMBOL_EXTENSION: &str = ".sym";

/// Check every symbol file in `archive` and reconcile the result against
/// the layout's expected triples.
///
/// `archive_name` is used only to give fatal errors context.
///
/// # Errors
///
/// Returns [`CheckError::Zip`] when an entry cannot be located in the
/// container and [`CheckError::ReadEntry`] when a symbol file cannot be read.
pub fn check_symbols<R: Read + Seek>(
    archive_name: &str,
    archive: &mut ZipArchive<R>,
    layout: &ReleaseLayout,
    sink: &mut dyn DefectSink,
) -> Result<()> {
    let identities = classify_symbol_files(archive_name, archive, layout, sink)?;

    let mut expected = ExpectedSymbols::new(layout.expected_symbols.iter().cloned());
    for identity in identities {
        expected.observe(identity, sink);
    }
    expected.drain(sink);
    Ok(())
}

/// Inspect each `.sym` entry in archive order and collect the identities
/// that could be determined.
fn classify_symbol_files<R: Read + Seek>(
    archive_name: &str,
    archive: &mut ZipArchive<R>,
    layout: &ReleaseLayout,
    sink: &mut dyn DefectSink,
) -> Result<Vec<SymbolIdentity>> {
    let inspector = SymbolInspector::new(&layout.markers, &layout.nacl);
    let mut identities = Vec::new();

    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|source| CheckError::zip(archive_name, source))?;
        let name = entry.name().to_owned();
        if !name.ends_with(SYMBOL_EXTENSION) {
            debug!("skipping non-symbol entry {name} in {archive_name}");
            continue;
        }

        let path = match SymbolPath::parse(&name) {
            Ok(path) => path,
            Err(defect) => {
                sink.report(defect);
                continue;
            }
        };

        let identity = inspector
            .inspect(&path, BufReader::new(entry), sink)
            .map_err(|source| CheckError::read_entry(name.as_str(), source))?;
        identities.extend(identity);
    }

    Ok(identities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defect::Defect;
    use crate::testing::{SymbolFile, symbols_archive_bytes};
    use rstest::rstest;
    use std::io::Cursor;

    fn run(files: &[SymbolFile]) -> Vec<Defect> {
        let bytes = symbols_archive_bytes(files).expect("build symbols archive");
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
        let mut defects = Vec::new();
        check_symbols("symbols_test.zip", &mut archive, &ReleaseLayout::default(), &mut defects)
            .expect("check succeeds");
        defects
    }

    #[test]
    fn complete_set_reports_nothing() {
        assert!(run(&SymbolFile::complete_set()).is_empty());
    }

    #[rstest]
    #[case::linux(0)]
    #[case::windows(5)]
    #[case::nacl(12)]
    fn removing_one_file_reports_it_missing(#[case] index: usize) {
        let mut files = SymbolFile::complete_set();
        let removed = files.remove(index);
        assert_eq!(
            run(&files),
            vec![Defect::MissingSymbols {
                identity: removed.identity().cloned().expect("generated files carry an identity")
            }]
        );
    }

    #[test]
    fn non_symbol_entries_are_ignored() {
        let mut files = SymbolFile::complete_set();
        files.push(SymbolFile::raw("symbols/README.txt", "not a symbol file"));
        assert!(run(&files).is_empty());
    }

    #[test]
    fn malformed_path_is_reported_and_skipped() {
        let mut files = SymbolFile::complete_set();
        files.push(SymbolFile::raw("symbols/daemon.sym", "MODULE Linux x86_64 ABC daemon\n"));
        assert_eq!(
            run(&files),
            vec![Defect::PathFormat {
                path: "symbols/daemon.sym".to_owned()
            }]
        );
    }

    #[test]
    fn unexpected_triples_follow_per_file_defects() {
        let mut files = SymbolFile::complete_set();
        files.insert(
            0,
            SymbolFile::raw(
                "symbols/daemon/ABC/daemon.sym",
                "MODULE Linux aarch64 ABC daemon\nFUNC tinyformat\n",
            ),
        );
        files.push(SymbolFile::raw(
            "symbols/daemon/DEF/daemon.sym",
            "MODULE Linux x86_64 DEF daemon\n",
        ));

        assert_eq!(
            run(&files),
            vec![
                Defect::StrippedSymbols {
                    path: "symbols/daemon/DEF/daemon.sym".to_owned()
                },
                Defect::UnexpectedTriple {
                    identity: SymbolIdentity::new("Linux", "aarch64", "daemon")
                },
                Defect::UnexpectedTriple {
                    identity: SymbolIdentity::new("Linux", "x86_64", "daemon")
                },
            ]
        );
    }
}
