//! Annotation scanner
//!
//! This module turns raw source text into [`StructDescriptor`]s:
//! - [`matcher`]: incremental literal matching for the marker and keyword
//! - [`scan`]: the four-state automaton
//! - [`descriptor`]: descriptor and member definitions
//!
//! # What is recognized
//!
//! ```text
//! //!serialize
//! struct Name {
//!     <type> <identifier>;
//!     ...
//! };
//! ```
//!
//! Nothing else of C is understood. Comments, macros and unmarked structs are
//! just characters the scanner walks past while looking for the marker.

pub mod descriptor;
pub mod matcher;
pub mod scan;

pub use descriptor::{MemberDecl, SourceLocation, StructDescriptor};
pub use matcher::MatchPolicy;
pub use scan::{scan, scan_with, ScanState, Scanner};
