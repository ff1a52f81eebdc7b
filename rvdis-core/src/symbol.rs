/// Decodes the packed symbol-table fields into the fixed strings the
/// `.symtab` dump prints.
use crate::elf_def::{Elf32Symbol, SHN_ABS, SHN_COMMON, SHN_UNDEF};

pub fn type_name(sym: &Elf32Symbol) -> &'static str {
    match sym.symbol_type() {
        0 => "NOTYPE",
        1 => "OBJECT",
        2 => "FUNC",
        3 => "SECTION",
        4 => "FILE",
        5 => "COMMON",
        6 => "TLS",
        _ => "NOTYPE",
    }
}

pub fn bind_name(sym: &Elf32Symbol) -> &'static str {
    match sym.bind() {
        0 => "LOCAL",
        1 => "GLOBAL",
        2 => "WEAK",
        _ => "LOCAL",
    }
}

pub fn visibility_name(sym: &Elf32Symbol) -> &'static str {
    match sym.visibility() {
        0 => "DEFAULT",
        1 => "INTERNAL",
        2 => "HIDDEN",
        3 => "PROTECTED",
        _ => "DEFAULT",
    }
}

/// `st_shndx` rendered as `UNDEF`/`ABS`/`COMMON` for the reserved
/// indices, otherwise the plain decimal section index.
pub fn index_display(sym: &Elf32Symbol) -> String {
    match sym.st_shndx {
        SHN_UNDEF => "UNDEF".to_string(),
        SHN_ABS => "ABS".to_string(),
        SHN_COMMON => "COMMON".to_string(),
        other => other.to_string(),
    }
}
