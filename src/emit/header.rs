// Declaration artifact (.h)

use crate::validate::ValidStruct;

/// Include guard macro for a basename: uppercased, anything that is not an
/// identifier character becomes `_`
pub fn guard_macro(basename: &str) -> String {
    let mut guard: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if guard.starts_with(|c: char| c.is_ascii_digit()) {
        guard.insert(0, '_');
    }
    guard.push_str("_SERIALIZERS_H");
    guard
}

pub fn serialize_signature(name: &str) -> String {
    format!("int {name}_serialize(const struct {name} *s, char *dst, int size)")
}

pub fn deserialize_signature(name: &str) -> String {
    format!("int {name}_deserialize(const char *src, int size, struct {name} *s)")
}

pub fn render_header(basename: &str, buffer_include: &str, structs: &[ValidStruct]) -> String {
    let guard = guard_macro(basename);
    let mut out = String::new();

    out.push_str(&format!("#ifndef {guard}\n"));
    out.push_str(&format!("#define {guard}\n"));
    out.push('\n');
    out.push_str(&format!("#include {buffer_include}\n"));
    out.push('\n');

    for s in structs {
        let name = s.name();
        out.push_str(&format!("struct {name};\n"));
        out.push_str(&format!("{};\n", serialize_signature(name)));
        out.push_str(&format!("{};\n", deserialize_signature(name)));
        out.push('\n');
    }

    out.push_str("#endif\n");
    out
}
