//! The annotation scanning automaton
//!
//! [`Scanner`] walks the input once, left to right, one character per
//! [`Scanner::step`]. All progress lives in the explicit [`ScanState`] value
//! and the two [`Matcher`]s, so a scanner can be driven, inspected and
//! finished in isolation.
//!
//! # States
//!
//! ```text
//! Seek ──marker──▶ ParseName ──name──▶ AttrsPrelude ──{──▶ Attrs ──}──▶ Seek
//! ```
//!
//! `struct Name{` skips the prelude. Anything ahead of the keyword is passed
//! over until an `s` starts it. An abort in `ParseName` (a keyword broken
//! partway, a bad name) or `AttrsPrelude` returns to `Seek` and re-feeds the
//! offending character.
//!
//! Malformed input never produces an error: the attempt is dropped and the
//! scanner goes back to looking for the next marker.

use log::debug;

use super::descriptor::{MemberDecl, SourceLocation, StructDescriptor};
use super::matcher::{is_any_space, is_inline_space, MatchPolicy, Matcher, Progress};
use crate::config::{MARKER, STRUCT_KEYWORD};

/// Sub-phases of [`ScanState::ParseName`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePhase {
    /// Matching the `struct` keyword
    Keyword,
    /// Keyword matched; `separated` once whitespace has followed it
    AfterKeyword { separated: bool },
    /// Accumulating the struct name
    Identifier {
        name: String,
        location: SourceLocation,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the marker line
    Seek,
    /// Marker seen, reading `struct <Name>`
    ParseName(NamePhase),
    /// Name read, waiting for the opening brace
    AttrsPrelude(StructDescriptor),
    /// Inside the body
    Attrs {
        current: StructDescriptor,
        depth: usize,
        pending: String,
    },
}

/// Whether the character that caused a transition still has to be handled
enum Flow {
    Consumed,
    Reprocess,
}

pub struct Scanner {
    state: ScanState,
    marker: Matcher,
    keyword: Matcher,
    line: usize,
    column: usize,
    completed: Vec<StructDescriptor>,
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new(MatchPolicy::default())
    }
}

impl Scanner {
    pub fn new(policy: MatchPolicy) -> Self {
        Scanner {
            state: ScanState::Seek,
            marker: Matcher::new(MARKER, is_inline_space, policy),
            keyword: Matcher::new(STRUCT_KEYWORD, is_any_space, policy),
            line: 1,
            column: 1,
            completed: Vec::new(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Descriptors completed so far, in file order
    pub fn completed(&self) -> &[StructDescriptor] {
        &self.completed
    }

    /// Feed one character
    pub fn step(&mut self, c: char) {
        let location = SourceLocation::new(self.line, self.column);

        // An abort hands the character back to Seek, which always consumes it
        while let Flow::Reprocess = self.transition(c, location) {}

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// End of input. Whatever attempt is still open yields nothing.
    pub fn finish(self) -> Vec<StructDescriptor> {
        match &self.state {
            ScanState::Seek => {}
            ScanState::ParseName(_) => {
                debug!("input ended after a marker without a complete struct header");
            }
            ScanState::AttrsPrelude(desc) | ScanState::Attrs { current: desc, .. } => {
                debug!(
                    "input ended inside struct '{}' ({}); dropped",
                    desc.name(),
                    desc.location()
                );
            }
        }
        self.completed
    }

    fn transition(&mut self, c: char, location: SourceLocation) -> Flow {
        let state = std::mem::replace(&mut self.state, ScanState::Seek);

        let (next, flow) = match state {
            ScanState::Seek => {
                if self.marker.feed(c) == Progress::Complete {
                    debug!("marker matched ending at line {}", location.line);
                    self.keyword.reset();
                    (ScanState::ParseName(NamePhase::Keyword), Flow::Consumed)
                } else {
                    (ScanState::Seek, Flow::Consumed)
                }
            }

            ScanState::ParseName(phase) => self.parse_name(phase, c, location),

            ScanState::AttrsPrelude(desc) => {
                if c.is_whitespace() {
                    (ScanState::AttrsPrelude(desc), Flow::Consumed)
                } else if c == '{' {
                    (open_body(desc), Flow::Consumed)
                } else {
                    debug!(
                        "expected '{{' after struct '{}', found {:?} at {}; dropped",
                        desc.name(),
                        c,
                        location
                    );
                    (ScanState::Seek, Flow::Reprocess)
                }
            }

            ScanState::Attrs {
                current,
                depth,
                pending,
            } => self.parse_attrs(current, depth, pending, c),
        };

        self.state = next;
        flow
    }

    fn parse_name(
        &mut self,
        phase: NamePhase,
        c: char,
        location: SourceLocation,
    ) -> (ScanState, Flow) {
        match phase {
            NamePhase::Keyword => {
                // Text before the keyword (comments, `typedef`) is passed over;
                // only a keyword broken partway abandons the attempt
                let partial = self.keyword.matched() > 0;
                match self.keyword.feed(c) {
                    Progress::Broken if partial => {
                        debug!("'struct' interrupted by {:?} at {}; dropped", c, location);
                        self.keyword.reset();
                        (ScanState::Seek, Flow::Reprocess)
                    }
                    Progress::Complete => (
                        ScanState::ParseName(NamePhase::AfterKeyword { separated: false }),
                        Flow::Consumed,
                    ),
                    _ => (ScanState::ParseName(NamePhase::Keyword), Flow::Consumed),
                }
            }

            NamePhase::AfterKeyword { separated } => {
                if c.is_whitespace() {
                    (
                        ScanState::ParseName(NamePhase::AfterKeyword { separated: true }),
                        Flow::Consumed,
                    )
                } else if separated && is_ident_char(c) {
                    (
                        ScanState::ParseName(NamePhase::Identifier {
                            name: c.to_string(),
                            location,
                        }),
                        Flow::Consumed,
                    )
                } else {
                    debug!("no struct name at {}; dropped", location);
                    (ScanState::Seek, Flow::Reprocess)
                }
            }

            NamePhase::Identifier { mut name, location } => {
                if c.is_whitespace() {
                    let desc = StructDescriptor::new(name, location);
                    (ScanState::AttrsPrelude(desc), Flow::Consumed)
                } else if c == '{' {
                    (open_body(StructDescriptor::new(name, location)), Flow::Consumed)
                } else if is_ident_char(c) {
                    name.push(c);
                    (
                        ScanState::ParseName(NamePhase::Identifier { name, location }),
                        Flow::Consumed,
                    )
                } else {
                    debug!("unexpected {:?} in struct name '{}'; dropped", c, name);
                    (ScanState::Seek, Flow::Reprocess)
                }
            }
        }
    }

    fn parse_attrs(
        &mut self,
        mut current: StructDescriptor,
        mut depth: usize,
        mut pending: String,
        c: char,
    ) -> (ScanState, Flow) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    if !pending.trim().is_empty() {
                        debug!(
                            "struct '{}': discarding unterminated member {:?}",
                            current.name(),
                            pending.trim()
                        );
                    }
                    debug!(
                        "captured struct '{}' with {} member(s)",
                        current.name(),
                        current.members().len()
                    );
                    self.completed.push(current);
                    return (ScanState::Seek, Flow::Consumed);
                }
            }
            ';' if depth == 1 => {
                current.push_member(MemberDecl::new(&pending));
                pending.clear();
            }
            _ => pending.push(c),
        }

        (
            ScanState::Attrs {
                current,
                depth,
                pending,
            },
            Flow::Consumed,
        )
    }
}

fn open_body(desc: StructDescriptor) -> ScanState {
    ScanState::Attrs {
        current: desc,
        depth: 1,
        pending: String::new(),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scan `source` with the default match policy
pub fn scan(source: &str) -> Vec<StructDescriptor> {
    scan_with(source, MatchPolicy::default())
}

pub fn scan_with(source: &str, policy: MatchPolicy) -> Vec<StructDescriptor> {
    let mut scanner = Scanner::new(policy);
    for c in source.chars() {
        scanner.step(c);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_texts(desc: &StructDescriptor) -> Vec<&str> {
        desc.members().iter().map(|m| m.text()).collect()
    }

    #[test]
    fn test_single_struct() {
        let source = "//!serialize\nstruct Point {\n  int32_t x;\n  int32_t y;\n};\n";
        let structs = scan(source);

        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "Point");
        assert_eq!(member_texts(&structs[0]), vec!["int32_t x", "int32_t y"]);
        assert_eq!(structs[0].location(), SourceLocation::new(2, 8));
    }

    #[test]
    fn test_unmarked_struct_ignored() {
        let source = "struct Hidden { int32_t x; };\n//!serialize\nstruct Shown { char c; };";
        let structs = scan(source);

        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "Shown");
    }

    #[test]
    fn test_interrupted_marker() {
        let source = "//!seria-lize\nstruct A { char c; };\n//!serialise\nstruct B { char c; };";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_marker_with_spaces_and_crlf() {
        let source = "  // !serialize \r\nstruct A { char c; };";
        assert_eq!(scan(source).len(), 1);
    }

    #[test]
    fn test_marker_must_end_its_line() {
        let source = "//!serialize struct A { char c; };";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_nested_block_closes_once() {
        let source = "//!serialize\nstruct V {\n  uint8_t tag;\n  union { int32_t i; float f; } u;\n  uint16_t tail;\n};";
        let structs = scan(source);

        assert_eq!(structs.len(), 1);
        let members = member_texts(&structs[0]);
        assert_eq!(members.len(), 3);
        assert_eq!(members[0], "uint8_t tag");
        assert!(members[1].starts_with("union"));
        assert!(members[1].contains("int32_t i; float f;"));
        assert!(members[1].ends_with('u'));
        assert_eq!(members[2], "uint16_t tail");
    }

    #[test]
    fn test_multiple_structs_in_file_order() {
        let source = "//!serialize\nstruct A { char a; };\nint unrelated;\n//!serialize\nstruct B { double b1; double b2; };";
        let structs = scan(source);

        assert_eq!(structs.len(), 2);
        assert_eq!(structs[0].name(), "A");
        assert_eq!(member_texts(&structs[0]), vec!["char a"]);
        assert_eq!(structs[1].name(), "B");
        assert_eq!(member_texts(&structs[1]), vec!["double b1", "double b2"]);
    }

    #[test]
    fn test_text_before_keyword_is_passed_over() {
        let structs = scan("//!serialize\ntypedef struct A { char a; } A;");
        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "A");
    }

    #[test]
    fn test_comment_line_between_marker_and_struct() {
        let source = "//!serialize\n// 2D point\nstruct Point { int32_t x; };";
        let structs = scan(source);

        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "Point");
        assert_eq!(member_texts(&structs[0]), vec!["int32_t x"]);
    }

    #[test]
    fn test_keyword_broken_partway_reverts_to_seek() {
        let source = "//!serialize\nstatic int x;\nstruct A { char a; };";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_broken_keyword_refeeds_marker_start() {
        let source = "//!serialize\nst//!serialize\nstruct B { char b; };";
        let structs = scan(source);

        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "B");
    }

    #[test]
    fn test_keyword_with_inner_whitespace() {
        let source = "//!serialize\nst ruct A { char a; };";
        assert_eq!(scan(source).len(), 1);
    }

    #[test]
    fn test_keyword_needs_separator_before_name() {
        let source = "//!serialize\nstructure A { char a; };";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_brace_right_after_name() {
        let structs = scan("//!serialize\nstruct Tight{ uint8_t a; };");
        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "Tight");
    }

    #[test]
    fn test_garbage_before_brace_drops_attempt() {
        let structs = scan("//!serialize\nstruct A x { char a; };");
        assert!(structs.is_empty());
    }

    #[test]
    fn test_aborting_char_is_refed_to_seek() {
        let source = "//!serialize\nstruct A //!serialize\nstruct B { char b; };";
        let structs = scan(source);

        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "B");
    }

    #[test]
    fn test_unterminated_body_yields_nothing() {
        let source = "//!serialize\nstruct Done { char a; };\n//!serialize\nstruct Open { char a;";
        let structs = scan(source);

        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name(), "Done");
    }

    #[test]
    fn test_trailing_member_without_semicolon_discarded() {
        let structs = scan("//!serialize\nstruct A { char a; char b };");
        assert_eq!(member_texts(&structs[0]), vec!["char a"]);
    }

    #[test]
    fn test_empty_declaration_kept() {
        let structs = scan("//!serialize\nstruct A { char a;; };");
        assert_eq!(member_texts(&structs[0]), vec!["char a", ""]);
    }

    #[test]
    fn test_policy_divergence_on_overlap() {
        let source = "///!serialize\nstruct A { char a; };";
        assert_eq!(scan_with(source, MatchPolicy::Fallback).len(), 1);
        assert!(scan_with(source, MatchPolicy::Restart).is_empty());
    }

    #[test]
    fn test_state_is_observable() {
        let mut scanner = Scanner::default();
        for c in "//!serialize\nstruct P {".chars() {
            scanner.step(c);
        }
        assert!(matches!(scanner.state(), ScanState::Attrs { depth: 1, .. }));

        for c in " int8_t a; }".chars() {
            scanner.step(c);
        }
        assert_eq!(scanner.state(), &ScanState::Seek);
        assert_eq!(scanner.completed().len(), 1);
    }
}
