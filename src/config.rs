//! Generator configuration and fixed constants
//!
//! There is no configuration file: the constants below describe the input
//! syntax and the output naming, and [`GeneratorConfig`] carries the few
//! knobs a library caller may want to change.

use std::path::PathBuf;

use crate::scanner::matcher::MatchPolicy;

/// Annotation line that requests generation for the following struct.
/// The trailing newline is part of the literal: the marker must end its line.
pub const MARKER: &str = "//!serialize\n";

/// Keyword expected after the marker
pub const STRUCT_KEYWORD: &str = "struct";

/// Suffix appended to the input basename for both artifacts
pub const SERIALIZERS_SUFFIX: &str = "_serializers";

/// Buffer abstraction included by every generated header
pub const DEFAULT_BUFFER_INCLUDE: &str = "<buffer.h>";

/// Status returned by generated functions when the buffer is too small
pub const CAPACITY_ERROR: i32 = -1;

/// Options for a [`Generator`](crate::generate::Generator) run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// How the marker matcher recovers from a mismatch
    pub match_policy: MatchPolicy,
    /// Directory the artifact pair is written to
    pub output_dir: PathBuf,
    /// Include target emitted in the header, with its `<>` or `""` delimiters
    pub buffer_include: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            match_policy: MatchPolicy::default(),
            output_dir: PathBuf::from("."),
            buffer_include: DEFAULT_BUFFER_INCLUDE.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    pub fn with_buffer_include(mut self, include: impl Into<String>) -> Self {
        self.buffer_include = include.into();
        self
    }
}
