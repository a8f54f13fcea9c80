//! Definition artifact (.c)
//!
//! Every generated function checks the buffer size against the struct's
//! encoded size before touching a byte, so a failed call leaves the buffer
//! (or the struct, when decoding) exactly as it was. Multi-byte values are
//! written little-endian through `put_uN`/`get_uN` helpers; only the helper
//! widths some struct actually uses are emitted.

use std::collections::BTreeSet;

use super::header::{deserialize_signature, serialize_signature};
use super::layout::{FieldLayout, Layout};
use crate::config::CAPACITY_ERROR;
use crate::validate::ValidStruct;

pub fn render_source(header_file: &str, input_include: &str, structs: &[ValidStruct]) -> String {
    let layouts: Vec<Layout> = structs.iter().map(Layout::of).collect();
    let mut out = String::new();

    out.push_str("#include <stdint.h>\n");
    out.push_str("#include <string.h>\n");
    out.push('\n');
    out.push_str(&format!("#include \"{input_include}\"\n"));
    out.push_str(&format!("#include \"{header_file}\"\n"));
    out.push('\n');

    let widths: BTreeSet<usize> = layouts
        .iter()
        .flat_map(|layout| layout.fields().iter().map(|f| f.ty.carrier_bits()))
        .collect();
    for bits in &widths {
        out.push_str(&put_helper(*bits));
        out.push('\n');
        out.push_str(&get_helper(*bits));
        out.push('\n');
    }

    for layout in &layouts {
        out.push_str(&serialize_fn(layout));
        out.push('\n');
        out.push_str(&deserialize_fn(layout));
        out.push('\n');
    }

    out
}

fn put_helper(bits: usize) -> String {
    let mut out = format!("static void put_u{bits}(unsigned char *p, uint{bits}_t v)\n{{\n");
    for i in 0..bits / 8 {
        if i == 0 {
            out.push_str("\tp[0] = (unsigned char)v;\n");
        } else {
            out.push_str(&format!("\tp[{i}] = (unsigned char)(v >> {});\n", i * 8));
        }
    }
    out.push_str("}\n");
    out
}

fn get_helper(bits: usize) -> String {
    let terms: Vec<String> = (0..bits / 8)
        .map(|i| {
            if i == 0 {
                format!("(uint{bits}_t)p[0]")
            } else {
                format!("((uint{bits}_t)p[{i}] << {})", i * 8)
            }
        })
        .collect();

    format!(
        "static uint{bits}_t get_u{bits}(const unsigned char *p)\n{{\n\treturn {};\n}}\n",
        terms.join(" |\n\t       ")
    )
}

fn serialize_fn(layout: &Layout) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n{{\n", serialize_signature(layout.name())));

    if layout.fields().is_empty() {
        out.push_str("\t(void)s;\n\t(void)dst;\n");
    } else {
        out.push_str("\tunsigned char *p = (unsigned char *)dst;\n");
    }
    out.push('\n');
    push_size_check(&mut out, layout.size());

    for field in layout.fields() {
        out.push_str(&pack_field(field));
    }

    out.push('\n');
    out.push_str(&format!("\treturn {};\n", layout.size()));
    out.push_str("}\n");
    out
}

fn deserialize_fn(layout: &Layout) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n{{\n", deserialize_signature(layout.name())));

    if layout.fields().is_empty() {
        out.push_str("\t(void)src;\n\t(void)s;\n");
    } else {
        out.push_str("\tconst unsigned char *p = (const unsigned char *)src;\n");
    }
    out.push('\n');
    push_size_check(&mut out, layout.size());

    for field in layout.fields() {
        out.push_str(&unpack_field(field));
    }

    out.push('\n');
    out.push_str(&format!("\treturn {};\n", layout.size()));
    out.push_str("}\n");
    out
}

fn push_size_check(out: &mut String, size: usize) {
    out.push_str(&format!("\tif (size < {size})\n\t\treturn {CAPACITY_ERROR};\n\n"));
}

fn pack_field(field: &FieldLayout) -> String {
    let bits = field.ty.carrier_bits();
    let (name, offset) = (&field.name, field.offset);

    if field.ty.is_floating() {
        format!(
            "\t{{\n\t\tuint{bits}_t bits;\n\t\tmemcpy(&bits, &s->{name}, sizeof bits);\n\t\tput_u{bits}(p + {offset}, bits);\n\t}}\n"
        )
    } else {
        format!("\tput_u{bits}(p + {offset}, (uint{bits}_t)s->{name});\n")
    }
}

fn unpack_field(field: &FieldLayout) -> String {
    let bits = field.ty.carrier_bits();
    let (name, offset) = (&field.name, field.offset);

    if field.ty.is_floating() {
        format!(
            "\t{{\n\t\tuint{bits}_t bits = get_u{bits}(p + {offset});\n\t\tmemcpy(&s->{name}, &bits, sizeof bits);\n\t}}\n"
        )
    } else {
        format!(
            "\ts->{name} = ({})get_u{bits}(p + {offset});\n",
            field.ty.c_name()
        )
    }
}
