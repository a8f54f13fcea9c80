//! Tagged scalar values
//!
//! One [`Value`] variant per allowed member type. Each variant knows its
//! [`ScalarType`] and its raw wire bits, which is also how values are
//! compared bit-for-bit (a NaN float round-trips even though it never equals
//! itself).

use crate::validate::ScalarType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Char(i8),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Float(f32),
    Double(f64),
}

impl Value {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Value::Char(_) => ScalarType::Char,
            Value::Int8(_) => ScalarType::Int8,
            Value::UInt8(_) => ScalarType::UInt8,
            Value::Int16(_) => ScalarType::Int16,
            Value::UInt16(_) => ScalarType::UInt16,
            Value::Int32(_) => ScalarType::Int32,
            Value::UInt32(_) => ScalarType::UInt32,
            Value::Float(_) => ScalarType::Float,
            Value::Double(_) => ScalarType::Double,
        }
    }

    /// Unsigned carrier bits, zero-extended to 64
    pub fn to_bits(&self) -> u64 {
        match *self {
            Value::Char(v) | Value::Int8(v) => v as u8 as u64,
            Value::UInt8(v) => v as u64,
            Value::Int16(v) => v as u16 as u64,
            Value::UInt16(v) => v as u64,
            Value::Int32(v) => v as u32 as u64,
            Value::UInt32(v) => v as u64,
            Value::Float(v) => v.to_bits() as u64,
            Value::Double(v) => v.to_bits(),
        }
    }

    /// Rebuild a value from carrier bits; bits above the type's width are
    /// ignored
    pub fn from_bits(ty: ScalarType, bits: u64) -> Self {
        match ty {
            ScalarType::Char => Value::Char(bits as u8 as i8),
            ScalarType::Int8 => Value::Int8(bits as u8 as i8),
            ScalarType::UInt8 => Value::UInt8(bits as u8),
            ScalarType::Int16 => Value::Int16(bits as u16 as i16),
            ScalarType::UInt16 => Value::UInt16(bits as u16),
            ScalarType::Int32 => Value::Int32(bits as u32 as i32),
            ScalarType::UInt32 => Value::UInt32(bits as u32),
            ScalarType::Float => Value::Float(f32::from_bits(bits as u32)),
            ScalarType::Double => Value::Double(f64::from_bits(bits)),
        }
    }

    /// Same type and same bits
    pub fn same_bits(&self, other: &Value) -> bool {
        self.scalar_type() == other.scalar_type() && self.to_bits() == other.to_bits()
    }
}
