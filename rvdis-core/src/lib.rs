pub mod buffer;
pub mod constants;
pub mod elf;
pub mod elf_def;
pub mod instruction;
pub mod label;
pub mod symbol;
