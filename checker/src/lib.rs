//! Release archive checker.
//!
//! This crate validates the structure of a packaged release before it is
//! published. A release is a zip archive holding nested per-platform
//! archives, a debug-symbols archive and a package directory with a checksum
//! manifest. Problems are reported as [`defect::Defect`]s through a
//! [`defect::DefectSink`] without stopping at the first one; only unreadable
//! input aborts a check with an [`error::CheckError`].
//!
//! # Modules
//!
//! - [`archive`] - Nested zip container helpers
//! - [`cli`] - Command-line argument definitions
//! - [`defect`] - Reportable defects and defect sinks
//! - [`error`] - Fatal error types
//! - [`layout`] - Release layout configuration
//! - [`package`] - Package directory and checksum manifest checks
//! - [`platform`] - Per-platform archive checkers
//! - [`release`] - Release orchestration
//! - [`symbols`] - Debug-symbol archive checks

pub mod archive;
pub mod cli;
pub mod defect;
pub mod error;
pub mod layout;
pub mod package;
pub mod platform;
pub mod release;
pub mod symbols;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
