// Descriptors produced by the scanner

use std::fmt;

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// One `;`-terminated declaration inside a struct body, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    text: String,
}

impl MemberDecl {
    pub fn new(raw: &str) -> Self {
        MemberDecl {
            text: raw.trim().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Leading whitespace-delimited token, empty for an empty declaration
    pub fn type_token(&self) -> &str {
        self.text.split_whitespace().next().unwrap_or("")
    }

    /// The member name when the declaration is exactly `<type> <identifier>`
    pub fn identifier(&self) -> Option<&str> {
        let mut tokens = self.text.split_whitespace();
        tokens.next()?;
        let name = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }
        Some(name)
    }
}

impl fmt::Display for MemberDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// An annotated struct as it appears in the source: its name and its member
/// declarations in textual order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    name: String,
    members: Vec<MemberDecl>,
    location: SourceLocation,
}

impl StructDescriptor {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        StructDescriptor {
            name: name.into(),
            members: Vec::new(),
            location,
        }
    }

    /// Members are only appended while the scanner is inside the body
    pub(crate) fn push_member(&mut self, member: MemberDecl) {
        self.members.push(member);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[MemberDecl] {
        &self.members
    }

    /// Location of the first character of the struct name
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

impl fmt::Display for StructDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {} {{ ", self.name)?;
        for member in &self.members {
            write!(f, "{}; ", member)?;
        }
        write!(f, "}}")
    }
}
