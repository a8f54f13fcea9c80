//! Reference codec for the generated wire format
//!
//! [`encode`] and [`decode`] implement in Rust exactly what the emitted C
//! functions do for a [`Layout`]: fixed offsets, little-endian, no padding,
//! and a capacity check before any byte is touched. They exist so the format
//! can be exercised without a C toolchain.

pub mod value;

pub use value::Value;

use crate::emit::Layout;
use crate::validate::ScalarType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The buffer is smaller than the struct's encoded size
    #[error("buffer of {available} bytes cannot hold {needed} bytes")]
    Capacity { needed: usize, available: usize },

    /// Wrong number of values for the layout
    #[error("struct {name} has {expected} field(s), got {got} value(s)")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A value does not match its field's declared type
    #[error("field '{field}' is {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: ScalarType,
        got: ScalarType,
    },
}

/// Write `values` into `dst`; returns the number of bytes written
pub fn encode(layout: &Layout, values: &[Value], dst: &mut [u8]) -> Result<usize, CodecError> {
    if values.len() != layout.fields().len() {
        return Err(CodecError::Arity {
            name: layout.name().to_string(),
            expected: layout.fields().len(),
            got: values.len(),
        });
    }
    for (field, value) in layout.fields().iter().zip(values) {
        if value.scalar_type() != field.ty {
            return Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: field.ty,
                got: value.scalar_type(),
            });
        }
    }
    check_capacity(layout, dst.len())?;

    for (field, value) in layout.fields().iter().zip(values) {
        let bytes = value.to_bits().to_le_bytes();
        dst[field.offset..field.end()].copy_from_slice(&bytes[..field.width()]);
    }
    Ok(layout.size())
}

/// Read one value per field from `src`
pub fn decode(layout: &Layout, src: &[u8]) -> Result<Vec<Value>, CodecError> {
    check_capacity(layout, src.len())?;

    Ok(layout
        .fields()
        .iter()
        .map(|field| {
            let mut bytes = [0u8; 8];
            bytes[..field.width()].copy_from_slice(&src[field.offset..field.end()]);
            Value::from_bits(field.ty, u64::from_le_bytes(bytes))
        })
        .collect())
}

fn check_capacity(layout: &Layout, available: usize) -> Result<(), CodecError> {
    if available < layout.size() {
        return Err(CodecError::Capacity {
            needed: layout.size(),
            available,
        });
    }
    Ok(())
}
