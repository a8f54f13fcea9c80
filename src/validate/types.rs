//! The scalar type allow-list
//!
//! Only fixed-width scalars can be packed without knowing anything about the
//! target platform, so the list is closed. Pointers (including `char *`) are
//! left out: they have no wire width.

use std::fmt;

/// Member types a serializable struct may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Char,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float,
    Double,
}

impl ScalarType {
    /// Every allowed type, in the order diagnostics list them
    pub const ALL: [ScalarType; 9] = [
        ScalarType::Char,
        ScalarType::Int8,
        ScalarType::UInt8,
        ScalarType::Int16,
        ScalarType::UInt16,
        ScalarType::Int32,
        ScalarType::UInt32,
        ScalarType::Float,
        ScalarType::Double,
    ];

    /// Look up a type token; `None` if it is not on the allow-list
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "char" => Some(ScalarType::Char),
            "int8_t" => Some(ScalarType::Int8),
            "uint8_t" => Some(ScalarType::UInt8),
            "int16_t" => Some(ScalarType::Int16),
            "uint16_t" => Some(ScalarType::UInt16),
            "int32_t" => Some(ScalarType::Int32),
            "uint32_t" => Some(ScalarType::UInt32),
            "float" => Some(ScalarType::Float),
            "double" => Some(ScalarType::Double),
            _ => None,
        }
    }

    pub fn is_allowed(token: &str) -> bool {
        Self::from_token(token).is_some()
    }

    /// Spelling in C source
    pub fn c_name(self) -> &'static str {
        match self {
            ScalarType::Char => "char",
            ScalarType::Int8 => "int8_t",
            ScalarType::UInt8 => "uint8_t",
            ScalarType::Int16 => "int16_t",
            ScalarType::UInt16 => "uint16_t",
            ScalarType::Int32 => "int32_t",
            ScalarType::UInt32 => "uint32_t",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
        }
    }

    /// Encoded size in bytes
    pub fn width(self) -> usize {
        match self {
            ScalarType::Char | ScalarType::Int8 | ScalarType::UInt8 => 1,
            ScalarType::Int16 | ScalarType::UInt16 => 2,
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float => 4,
            ScalarType::Double => 8,
        }
    }

    /// Bit width of the unsigned carrier used on the wire
    pub fn carrier_bits(self) -> usize {
        self.width() * 8
    }

    pub fn is_floating(self) -> bool {
        matches!(self, ScalarType::Float | ScalarType::Double)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_names() {
        for ty in ScalarType::ALL {
            assert_eq!(ScalarType::from_token(ty.c_name()), Some(ty));
        }
    }

    #[test]
    fn test_rejected_tokens() {
        for token in ["long", "int", "int64_t", "char*", "struct", "unsigned", ""] {
            assert!(!ScalarType::is_allowed(token), "{} should be rejected", token);
        }
    }

    #[test]
    fn test_widths() {
        assert_eq!(ScalarType::Char.width(), 1);
        assert_eq!(ScalarType::UInt16.width(), 2);
        assert_eq!(ScalarType::Float.width(), 4);
        assert_eq!(ScalarType::Double.carrier_bits(), 64);
    }
}
