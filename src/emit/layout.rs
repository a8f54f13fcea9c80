//! Wire layout of a validated struct
//!
//! Members are packed back to back in declaration order, little-endian, with
//! no padding. The emitted C and the reference [`codec`](crate::codec) both
//! derive their offsets from [`Layout`].

use crate::validate::{ScalarType, ValidStruct};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: String,
    pub ty: ScalarType,
    pub offset: usize,
}

impl FieldLayout {
    pub fn width(&self) -> usize {
        self.ty.width()
    }

    /// Offset one past the last byte of this field
    pub fn end(&self) -> usize {
        self.offset + self.width()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: String,
    fields: Vec<FieldLayout>,
    size: usize,
}

impl Layout {
    pub fn of(s: &ValidStruct) -> Self {
        let mut offset = 0;
        let fields = s
            .fields()
            .iter()
            .map(|field| {
                let layout = FieldLayout {
                    name: field.name.clone(),
                    ty: field.ty,
                    offset,
                };
                offset += field.ty.width();
                layout
            })
            .collect();

        Layout {
            name: s.name().to_string(),
            fields,
            size: offset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    /// Total encoded size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}
