//! Expected-set tracking for symbol identities.
//!
//! Every triple in the release layout must be matched by exactly one symbol
//! file. Observing a triple removes it; observing anything else, including a
//! second file for an already matched triple, is reported as unexpected.
//! Whatever remains once every file has been observed is missing.

use super::identity::SymbolIdentity;
use crate::defect::{Defect, DefectSink};

/// The set of triples not yet matched by a symbol file.
///
/// # Examples
///
/// ```
/// use release_checker::defect::Defect;
/// use release_checker::symbols::expected::ExpectedSymbols;
/// use release_checker::symbols::identity::SymbolIdentity;
///
/// let daemon = SymbolIdentity::new("Linux", "x86_64", "daemon");
/// let tty = SymbolIdentity::new("Linux", "x86_64", "daemon-tty");
/// let mut expected = ExpectedSymbols::new([daemon.clone(), tty.clone()]);
/// let mut defects = Vec::new();
///
/// expected.observe(daemon, &mut defects);
/// expected.drain(&mut defects);
/// assert_eq!(defects, vec![Defect::MissingSymbols { identity: tty }]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpectedSymbols {
    remaining: Vec<SymbolIdentity>,
}

impl ExpectedSymbols {
    /// Seed the tracker; duplicate seeds collapse to one entry.
    pub fn new(expected: impl IntoIterator<Item = SymbolIdentity>) -> Self {
        let mut remaining: Vec<SymbolIdentity> = Vec::new();
        for identity in expected {
            if !remaining.contains(&identity) {
                remaining.push(identity);
            }
        }
        Self { remaining }
    }

    /// Match one observed identity against the set.
    pub fn observe(&mut self, identity: SymbolIdentity, sink: &mut dyn DefectSink) {
        match self.remaining.iter().position(|candidate| *candidate == identity) {
            Some(index) => {
                self.remaining.remove(index);
            }
            None => sink.report(Defect::UnexpectedTriple { identity }),
        }
    }

    /// Number of triples still unmatched.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether every triple has been matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Report every unmatched triple, in seed order, and empty the set.
    pub fn drain(&mut self, sink: &mut dyn DefectSink) {
        for identity in self.remaining.drain(..) {
            sink.report(Defect::MissingSymbols { identity });
        }
    }
}
