//! Rejection reporting
//!
//! Validation failures are batched: every rejected struct is collected into
//! one [`ValidationError`], and [`ValidationError::diagnostics`] renders the
//! report the CLI prints before exiting.

use std::fmt;

use super::types::ScalarType;
use crate::scanner::SourceLocation;

/// Why a struct was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// Leading token of a member is not on the allow-list
    UnsupportedType { member: String, token: String },

    /// Allowed type, but not followed by exactly one C identifier
    MalformedMember { member: String },

    /// Another struct with the same name appeared earlier
    DuplicateName { first_line: usize },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::UnsupportedType { member, token } => {
                if token.is_empty() {
                    write!(f, "empty member declaration")
                } else {
                    write!(f, "unsupported type '{}' in '{}'", token, member)
                }
            }
            Issue::MalformedMember { member } => {
                write!(f, "malformed member '{}'", member)
            }
            Issue::DuplicateName { first_line } => {
                write!(f, "already defined at line {}", first_line)
            }
        }
    }
}

/// A struct that failed validation, with everything found wrong with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub location: SourceLocation,
    pub issues: Vec<Issue>,
}

impl Rejection {
    pub fn has_unsupported_types(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, Issue::UnsupportedType { .. }))
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ERROR] Struct \"{}\" (line {}) ",
            self.name, self.location.line
        )?;
        if self.has_unsupported_types() {
            write!(f, "has unsupported member types: ")?;
        } else {
            write!(f, "cannot be serialized: ")?;
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// One or more annotated structs cannot be serialized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} struct(s) cannot be serialized", .rejections.len())]
pub struct ValidationError {
    pub rejections: Vec<Rejection>,
}

impl ValidationError {
    /// Full report: one line per rejected struct, a blank line, then the
    /// allow-list
    pub fn diagnostics(&self) -> String {
        let mut out = String::new();
        for rejection in &self.rejections {
            out.push_str(&rejection.to_string());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&allowed_types_listing());
        out
    }
}

pub fn allowed_types_listing() -> String {
    let mut out = String::from("ALLOWED_TYPES:\n");
    for ty in ScalarType::ALL {
        out.push_str("  ");
        out.push_str(ty.c_name());
        out.push('\n');
    }
    out
}
