//! C code emission
//!
//! - [`layout`]: byte offsets and encoded size of a validated struct
//! - [`header`]: the declaration artifact (`<basename>_serializers.h`)
//! - [`source`]: the definition artifact (`<basename>_serializers.c`)
//!
//! Emission takes [`ValidStruct`]s only and cannot fail.
//!
//! # Generated contract
//!
//! ```c
//! int Name_serialize(const struct Name *s, char *dst, int size);
//! int Name_deserialize(const char *src, int size, struct Name *s);
//! ```
//!
//! Both return the encoded size on success and `-1` when `size` is smaller
//! than that, in which case no byte is read or written.

pub mod header;
pub mod layout;
pub mod source;

pub use layout::{FieldLayout, Layout};

use crate::config::SERIALIZERS_SUFFIX;
use crate::validate::ValidStruct;

/// The artifact pair for one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub header_file: String,
    pub header: String,
    pub source_file: String,
    pub source: String,
    /// Names of the structs covered, in input order
    pub struct_names: Vec<String>,
}

/// Render both artifacts. `input_include` is how the generated `.c` refers
/// to the file holding the struct definitions.
pub fn emit(
    basename: &str,
    input_include: &str,
    buffer_include: &str,
    structs: &[ValidStruct],
) -> Artifacts {
    let header_file = format!("{basename}{SERIALIZERS_SUFFIX}.h");
    let source_file = format!("{basename}{SERIALIZERS_SUFFIX}.c");

    let header = header::render_header(basename, buffer_include, structs);
    let source = source::render_source(&header_file, input_include, structs);

    Artifacts {
        header_file,
        header,
        source_file,
        source,
        struct_names: structs.iter().map(|s| s.name().to_string()).collect(),
    }
}
