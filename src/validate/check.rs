// Validation pass: descriptors in, typed structs or rejections out

use log::debug;
use rustc_hash::FxHashMap;

use super::report::{Issue, Rejection, ValidationError};
use super::types::ScalarType;
use crate::scanner::{MemberDecl, StructDescriptor};

/// A typed member of a validated struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: ScalarType,
    pub name: String,
}

/// A struct every member of which is an allowed scalar. Only [`validate`]
/// builds these, so the emitter never sees anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidStruct {
    descriptor: StructDescriptor,
    fields: Vec<Field>,
}

impl ValidStruct {
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &StructDescriptor {
        &self.descriptor
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Outcome of validating a whole file: both partitions keep input order
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub valid: Vec<ValidStruct>,
    pub rejected: Vec<Rejection>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn into_result(self) -> Result<Vec<ValidStruct>, ValidationError> {
        if self.rejected.is_empty() {
            Ok(self.valid)
        } else {
            Err(ValidationError {
                rejections: self.rejected,
            })
        }
    }
}

/// Check every descriptor. Never stops at the first failure.
pub fn validate(descriptors: Vec<StructDescriptor>) -> Validation {
    let duplicates = find_duplicates(&descriptors);
    let mut validation = Validation::default();

    for (desc, first_line) in descriptors.into_iter().zip(duplicates) {
        let mut issues = Vec::new();
        let mut fields = Vec::with_capacity(desc.members().len());

        if let Some(first_line) = first_line {
            issues.push(Issue::DuplicateName { first_line });
        }

        for member in desc.members() {
            match check_member(member) {
                Ok(field) => fields.push(field),
                Err(issue) => issues.push(issue),
            }
        }

        if issues.is_empty() {
            validation.valid.push(ValidStruct {
                descriptor: desc,
                fields,
            });
        } else {
            debug!("rejecting struct '{}': {} issue(s)", desc.name(), issues.len());
            validation.rejected.push(Rejection {
                name: desc.name().to_string(),
                location: desc.location(),
                issues,
            });
        }
    }

    validation
}

fn check_member(member: &MemberDecl) -> Result<Field, Issue> {
    let token = member.type_token();
    let ty = ScalarType::from_token(token).ok_or_else(|| Issue::UnsupportedType {
        member: member.text().to_string(),
        token: token.to_string(),
    })?;

    match member.identifier() {
        Some(name) if is_c_identifier(name) => Ok(Field {
            ty,
            name: name.to_string(),
        }),
        _ => Err(Issue::MalformedMember {
            member: member.text().to_string(),
        }),
    }
}

/// For each descriptor, the line of an earlier descriptor with the same name
fn find_duplicates(descriptors: &[StructDescriptor]) -> Vec<Option<usize>> {
    let mut first_seen: FxHashMap<&str, usize> = FxHashMap::default();
    descriptors
        .iter()
        .map(|desc| match first_seen.get(desc.name()) {
            Some(&line) => Some(line),
            None => {
                first_seen.insert(desc.name(), desc.location().line);
                None
            }
        })
        .collect()
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn test_point_is_valid() {
        let validation = validate(scan("//!serialize\nstruct Point { int32_t x; int32_t y; };"));
        assert!(validation.is_ok());

        let structs = validation.into_result().unwrap();
        assert_eq!(structs[0].name(), "Point");
        assert_eq!(
            structs[0].fields(),
            &[
                Field { ty: ScalarType::Int32, name: "x".to_string() },
                Field { ty: ScalarType::Int32, name: "y".to_string() },
            ]
        );
    }

    #[test]
    fn test_all_invalid_collected_in_order() {
        let source = "//!serialize\nstruct A { long a; };\n\
                      //!serialize\nstruct B { char b; };\n\
                      //!serialize\nstruct C { uint8_t c; int64_t d; };";
        let validation = validate(scan(source));

        assert_eq!(validation.valid.len(), 1);
        assert_eq!(validation.valid[0].name(), "B");
        let names: Vec<&str> = validation.rejected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_every_bad_member_reported() {
        let validation = validate(scan("//!serialize\nstruct A { long a; char ok; short b; };"));
        let issues = &validation.rejected[0].issues;

        assert_eq!(issues.len(), 2);
        assert!(matches!(&issues[1], Issue::UnsupportedType { token, .. } if token == "short"));
    }

    #[test]
    fn test_tabs_separate_type_token() {
        let validation = validate(scan("//!serialize\nstruct A {\n\tuint16_t\tport;\n};"));
        assert!(validation.is_ok());
    }

    #[test]
    fn test_malformed_members() {
        let source = "//!serialize\nstruct A { int32_t a, b; };\n\
                      //!serialize\nstruct B { int32_t arr[4]; };\n\
                      //!serialize\nstruct C { int32_t; };";
        let validation = validate(scan(source));

        assert_eq!(validation.rejected.len(), 3);
        for rejection in &validation.rejected {
            assert!(matches!(rejection.issues[0], Issue::MalformedMember { .. }));
        }
    }

    #[test]
    fn test_nested_union_rejected() {
        let validation =
            validate(scan("//!serialize\nstruct V { union { int32_t i; float f; } u; };"));
        assert!(matches!(
            &validation.rejected[0].issues[0],
            Issue::UnsupportedType { token, .. } if token == "union"
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let source = "//!serialize\nstruct P { char a; };\n//!serialize\nstruct P { char b; };";
        let validation = validate(scan(source));

        assert_eq!(validation.valid.len(), 1);
        assert_eq!(validation.rejected.len(), 1);
        assert_eq!(
            validation.rejected[0].issues,
            vec![Issue::DuplicateName { first_line: 2 }]
        );
    }

    #[test]
    fn test_empty_struct_is_valid() {
        let validation = validate(scan("//!serialize\nstruct Empty { };"));
        assert!(validation.is_ok());
        assert!(validation.valid[0].fields().is_empty());
    }

    #[test]
    fn test_c_identifier() {
        assert!(is_c_identifier("_count2"));
        assert!(!is_c_identifier("2count"));
        assert!(!is_c_identifier("a[4]"));
        assert!(!is_c_identifier("*p"));
    }
}
