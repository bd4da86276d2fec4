//! Single symbol file inspection.
//!
//! Checks one symbol file against the identity encoded in its path, scans
//! its body for content markers and derives the effective
//! [`SymbolIdentity`] used for reconciliation.

use super::header::ModuleRecord;
use super::identity::SymbolIdentity;
use super::path::SymbolPath;
use crate::defect::{Defect, DefectSink};
use crate::layout::{NaclNaming, SymbolMarkers};
use log::trace;
use std::io::BufRead;

/// Binary classification derived from NaCl content markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NaclModule {
    Client,
    Server,
}

/// What a body scan found.
#[derive(Debug, Default)]
struct BodyScan {
    has_symbols: bool,
    nacl_module: Option<NaclModule>,
}

/// Inspects symbol files using a fixed set of markers and NaCl naming rules.
#[derive(Debug, Clone, Copy)]
pub struct SymbolInspector<'a> {
    markers: &'a SymbolMarkers,
    nacl: &'a NaclNaming,
}

impl<'a> SymbolInspector<'a> {
    /// Create an inspector.
    #[must_use]
    pub fn new(markers: &'a SymbolMarkers, nacl: &'a NaclNaming) -> Self {
        Self { markers, nacl }
    }

    /// Inspect one symbol file read from `reader`.
    ///
    /// Defects are reported to `sink`. Returns the effective identity, or
    /// `None` when the header is malformed or a NaCl module could not be
    /// classified.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while reading the file.
    pub fn inspect<R: BufRead>(
        &self,
        path: &SymbolPath,
        mut reader: R,
        sink: &mut dyn DefectSink,
    ) -> std::io::Result<Option<SymbolIdentity>> {
        trace!("inspecting symbol file {}", path.as_str());

        let mut line = Vec::new();
        let read = reader.read_until(b'\n', &mut line)?;
        let record = if read == 0 {
            None
        } else {
            ModuleRecord::parse(&String::from_utf8_lossy(&line))
        };
        let Some(record) = record else {
            sink.report(Defect::HeaderFormat {
                path: path.as_str().to_owned(),
            });
            return Ok(None);
        };

        check_record(path, &record, sink);

        let scan = self.scan_body(&mut reader)?;
        if !scan.has_symbols {
            sink.report(Defect::StrippedSymbols {
                path: path.as_str().to_owned(),
            });
        }

        Ok(self.effective_identity(&record, scan.nacl_module))
    }

    /// Scan the remaining lines for content markers.
    ///
    /// A line carrying the unstripped marker is not also searched for NaCl
    /// markers; the last NaCl marker seen wins.
    fn scan_body<R: BufRead>(&self, reader: &mut R) -> std::io::Result<BodyScan> {
        let unstripped = self.markers.unstripped.as_bytes();
        let client = self.markers.nacl_client.as_bytes();
        let server = self.markers.nacl_server.as_bytes();

        let mut scan = BodyScan::default();
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if contains(&line, unstripped) {
                scan.has_symbols = true;
            } else if contains(&line, client) {
                scan.nacl_module = Some(NaclModule::Client);
            } else if contains(&line, server) {
                scan.nacl_module = Some(NaclModule::Server);
            }
        }
        Ok(scan)
    }

    /// Apply NaCl remapping to the module record's identity.
    fn effective_identity(
        &self,
        record: &ModuleRecord,
        nacl_module: Option<NaclModule>,
    ) -> Option<SymbolIdentity> {
        if record.binary() != self.nacl.loader {
            return Some(SymbolIdentity::new(
                record.platform(),
                record.arch(),
                record.binary(),
            ));
        }

        let binary = match nacl_module? {
            NaclModule::Client => &self.nacl.client_binary,
            NaclModule::Server => &self.nacl.server_binary,
        };
        Some(SymbolIdentity::new(
            self.nacl.platform.as_str(),
            record.arch(),
            binary.as_str(),
        ))
    }
}

/// Compare the module record with the identity encoded in the path.
fn check_record(path: &SymbolPath, record: &ModuleRecord, sink: &mut dyn DefectSink) {
    if record.build_id() != path.build_id() {
        sink.report(Defect::BuildIdMismatch {
            path: path.as_str().to_owned(),
            header: record.build_id().to_owned(),
            expected: path.build_id().to_owned(),
        });
    }
    if record.binary() != path.binary_dir() || record.binary() != path.binary_name() {
        sink.report(Defect::BinaryNameMismatch {
            path: path.as_str().to_owned(),
            binary: record.binary().to_owned(),
        });
    }
}

/// Byte substring search.
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod tests;
