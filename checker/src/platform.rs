//! Per-platform binary checkers.
//!
//! Each platform archive of a release is handed to a [`PlatformChecker`].
//! The release checker uses [`PassThroughChecker`] for every platform unless
//! a specific checker is registered with
//! [`ReleaseChecker::with_platform_checker`](crate::release::ReleaseChecker::with_platform_checker).

use crate::archive::NestedArchive;
use crate::defect::DefectSink;
use crate::error::Result;

/// Checks the contents of one nested platform archive.
pub trait PlatformChecker {
    /// Inspect `archive` and report any defects to `sink`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`](crate::error::CheckError) when the archive
    /// cannot be read.
    fn check(&self, archive: &mut NestedArchive, sink: &mut dyn DefectSink) -> Result<()>;
}

/// A checker that accepts any archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassThroughChecker;

impl PlatformChecker for PassThroughChecker {
    fn check(&self, _archive: &mut NestedArchive, _sink: &mut dyn DefectSink) -> Result<()> {
        Ok(())
    }
}

impl<F> PlatformChecker for F
where
    F: Fn(&mut NestedArchive, &mut dyn DefectSink) -> Result<()>,
{
    fn check(&self, archive: &mut NestedArchive, sink: &mut dyn DefectSink) -> Result<()> {
        self(archive, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defect::Defect;
    use crate::testing::zip_bytes;
    use std::io::Cursor;
    use zip::ZipArchive;

    fn nested() -> NestedArchive {
        let bytes = zip_bytes(&[("daemon".to_owned(), b"\x7fELF".to_vec())]).expect("build zip");
        ZipArchive::new(Cursor::new(bytes)).expect("valid zip")
    }

    #[test]
    fn pass_through_reports_nothing() {
        let mut defects = Vec::new();
        PassThroughChecker
            .check(&mut nested(), &mut defects)
            .expect("check succeeds");
        assert!(defects.is_empty());
    }

    #[test]
    fn closures_act_as_checkers() {
        let checker = |archive: &mut NestedArchive, sink: &mut dyn DefectSink| -> Result<()> {
            for name in archive.file_names() {
                sink.report(Defect::MissingPlatformArchive {
                    path: name.to_owned(),
                });
            }
            Ok(())
        };
        let mut defects = Vec::new();
        checker.check(&mut nested(), &mut defects).expect("check succeeds");
        assert_eq!(
            defects,
            vec![Defect::MissingPlatformArchive {
                path: "daemon".to_owned()
            }]
        );
    }
}
