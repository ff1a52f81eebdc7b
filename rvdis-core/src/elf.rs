/// Validates an ELF32 RISC-V object and locates the three sections the
/// disassembler needs: `.text`, `.symtab`, and the `.strtab` `.symtab` points
/// at via `sh_link`.
use std::fmt;

use crate::buffer::ByteBuffer;
use crate::constants::INSTRUCTION_LEN_BYTES;
use crate::elf_def::{
    Elf32Header, Elf32SectionHeader, Elf32Symbol, EM_RISCV, ELFCLASS32, ELFDATA2LSB, ELFMAG,
    EV_CURRENT, SHT_PROGBITS, SHT_SYMTAB, TEXT_SECTION_NAME,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElfError {
    Empty,
    HeaderOutOfRange,
    BadMagic,
    BadClass,
    BadData,
    BadIdentVersion,
    BadMachine,
    BadVersion,
    ZeroEntry,
    SectionNameStringTableOutOfRange,
    SectionHeaderOutOfRange,
    MissingText,
    TextSizeNotMultipleOf4,
    TextOutOfRange,
    MissingSymtab,
    StrtabOutOfRange,
    SymbolOutOfRange,
    SymbolNameNotTerminated,
}

impl fmt::Display for ElfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElfError::Empty => write!(f, "input file is empty"),
            ElfError::HeaderOutOfRange => write!(f, "malformed header: file is shorter than the ELF header"),
            ElfError::BadMagic => write!(f, "malformed header: magic bytes are not \\x7fELF"),
            ElfError::BadClass => write!(f, "malformed header: not an ELFCLASS32 object"),
            ElfError::BadData => write!(f, "malformed header: not a little-endian (ELFDATA2LSB) object"),
            ElfError::BadIdentVersion => write!(f, "malformed header: identification version is not EV_CURRENT"),
            ElfError::BadMachine => write!(f, "malformed header: e_machine is not EM_RISCV"),
            ElfError::BadVersion => write!(f, "malformed header: e_version is not EV_CURRENT"),
            ElfError::ZeroEntry => write!(f, "malformed header: e_entry is zero"),
            ElfError::SectionNameStringTableOutOfRange => {
                write!(f, "bad section table: section-header string table is out of range")
            }
            ElfError::SectionHeaderOutOfRange => write!(f, "bad section table: a section header is out of range"),
            ElfError::MissingText => write!(f, "bad section table: no PROGBITS section named .text"),
            ElfError::TextSizeNotMultipleOf4 => write!(f, "bad section table: .text size is not a multiple of 4"),
            ElfError::TextOutOfRange => write!(f, "bad section table: .text extends past the end of the file"),
            ElfError::MissingSymtab => write!(f, "bad section table: no SYMTAB section"),
            ElfError::StrtabOutOfRange => write!(f, "bad section table: .strtab (via sh_link) is out of range"),
            ElfError::SymbolOutOfRange => write!(f, "bad symbol: a symtab entry extends past the end of the file"),
            ElfError::SymbolNameNotTerminated => {
                write!(f, "bad symbol: a symbol name is not null-terminated within the file")
            }
        }
    }
}

pub type ElfResult<T> = Result<T, ElfError>;

/// A validated ELF32 RISC-V object: the file header plus the three
/// section headers the disassembler cares about. Borrows the buffer it
/// was parsed from.
pub struct ParsedElf<'a> {
    pub header: Elf32Header,
    pub text: Elf32SectionHeader,
    pub symtab: Elf32SectionHeader,
    pub strtab: Elf32SectionHeader,
    buffer: &'a ByteBuffer,
}

impl<'a> ParsedElf<'a> {
    pub fn parse(buffer: &'a ByteBuffer) -> ElfResult<Self> {
        if buffer.is_empty() {
            return Err(ElfError::Empty);
        }

        let header: Elf32Header = buffer
            .read_struct(0)
            .map_err(|_| ElfError::HeaderOutOfRange)?;

        if header.e_ident[0..4] != ELFMAG[..] {
            return Err(ElfError::BadMagic);
        }
        if header.e_ident[4] != ELFCLASS32 {
            return Err(ElfError::BadClass);
        }
        if header.e_ident[5] != ELFDATA2LSB {
            return Err(ElfError::BadData);
        }
        if header.e_ident[6] != EV_CURRENT {
            return Err(ElfError::BadIdentVersion);
        }
        if header.e_machine != EM_RISCV {
            return Err(ElfError::BadMachine);
        }
        if header.e_version != u32::from(EV_CURRENT) {
            return Err(ElfError::BadVersion);
        }
        if header.e_entry == 0 {
            return Err(ElfError::ZeroEntry);
        }

        let shstrtab_header_offset = section_header_offset(&header, header.e_shstrndx as u32);
        let shstrtab: Elf32SectionHeader = buffer
            .read_struct(shstrtab_header_offset)
            .map_err(|_| ElfError::SectionNameStringTableOutOfRange)?;
        buffer
            .slice(shstrtab.sh_offset as usize, shstrtab.sh_size as usize)
            .map_err(|_| ElfError::SectionNameStringTableOutOfRange)?;

        let mut text: Option<Elf32SectionHeader> = None;
        let mut symtab: Option<Elf32SectionHeader> = None;

        for i in 0..u32::from(header.e_shnum) {
            let section: Elf32SectionHeader = buffer
                .read_struct(section_header_offset(&header, i))
                .map_err(|_| ElfError::SectionHeaderOutOfRange)?;

            if section.sh_type == SHT_PROGBITS && text.is_none() {
                let name = buffer
                    .read_cstring((shstrtab.sh_offset + section.sh_name) as usize)
                    .map_err(|_| ElfError::SectionHeaderOutOfRange)?;
                if name == TEXT_SECTION_NAME {
                    text = Some(section);
                }
            } else if section.sh_type == SHT_SYMTAB && symtab.is_none() {
                symtab = Some(section);
            }
        }

        let text = text.ok_or(ElfError::MissingText)?;
        if text.sh_size % INSTRUCTION_LEN_BYTES != 0 {
            return Err(ElfError::TextSizeNotMultipleOf4);
        }
        buffer
            .slice(text.sh_offset as usize, text.sh_size as usize)
            .map_err(|_| ElfError::TextOutOfRange)?;

        let symtab = symtab.ok_or(ElfError::MissingSymtab)?;
        let strtab: Elf32SectionHeader = buffer
            .read_struct(section_header_offset(&header, symtab.sh_link))
            .map_err(|_| ElfError::StrtabOutOfRange)?;
        buffer
            .slice(strtab.sh_offset as usize, strtab.sh_size as usize)
            .map_err(|_| ElfError::StrtabOutOfRange)?;

        Ok(ParsedElf {
            header,
            text,
            symtab,
            strtab,
            buffer,
        })
    }

    /// Reads the 32-bit little-endian word at byte offset `i` within
    /// `.text` (`i` must be 4-byte aligned and within `sh_size`).
    pub fn text_word(&self, i: u32) -> u32 {
        self.buffer
            .read_u32_le((self.text.sh_offset + i) as usize)
            .expect("text_word offset validated against .text bounds during parse")
    }

    pub fn text_len(&self) -> u32 {
        self.text.sh_size
    }

    pub fn entry(&self) -> u32 {
        self.header.e_entry
    }

    /// Yields every symtab entry with its name resolved via `.strtab`.
    pub fn symbols(&self) -> ElfResult<Vec<(Elf32Symbol, &'a str)>> {
        if self.symtab.sh_entsize == 0 {
            return Ok(Vec::new());
        }
        let count = self.symtab.sh_size / self.symtab.sh_entsize;
        let mut out = Vec::with_capacity(count as usize);
        for i in 0..count {
            let offset = self.symtab.sh_offset + i * self.symtab.sh_entsize;
            let sym: Elf32Symbol = self
                .buffer
                .read_struct(offset as usize)
                .map_err(|_| ElfError::SymbolOutOfRange)?;
            let name = self
                .buffer
                .read_cstring((self.strtab.sh_offset + sym.st_name) as usize)
                .map_err(|_| ElfError::SymbolNameNotTerminated)?;
            out.push((sym, name));
        }
        Ok(out)
    }
}

fn section_header_offset(header: &Elf32Header, index: u32) -> usize {
    (header.e_shoff + index * u32::from(header.e_shentsize)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER_SIZE: u32 = 52;

    fn push_u16(buf: &mut Vec<u8>, v: u16) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_section_header(
        buf: &mut Vec<u8>,
        name_offset: u32,
        sh_type: u32,
        sh_offset: u32,
        sh_size: u32,
        sh_link: u32,
        sh_entsize: u32,
    ) {
        push_u32(buf, name_offset);
        push_u32(buf, sh_type);
        push_u32(buf, 0); // sh_flags
        push_u32(buf, 0); // sh_addr
        push_u32(buf, sh_offset);
        push_u32(buf, sh_size);
        push_u32(buf, sh_link);
        push_u32(buf, 0); // sh_info
        push_u32(buf, 0); // sh_addralign
        push_u32(buf, sh_entsize);
    }

    /// A minimal but valid ELF32 LSB RISC-V object: empty `.text`, one
    /// `.symtab` entry naming `main` at the entry point. `mutate` runs
    /// just before the header/section bytes are sealed, so callers can
    /// corrupt a single field and assert on the resulting `ElfError`.
    fn build(mutate: impl FnOnce(&mut Vec<u8>)) -> Vec<u8> {
        const ENTRY: u32 = 0x1000;

        let text_bytes: Vec<u8> = 0x00A58533u32.to_le_bytes().to_vec();

        let mut strtab = vec![0u8];
        let main_name_offset = strtab.len() as u32;
        strtab.extend_from_slice(b"main\0");

        let mut shstrtab = vec![0u8];
        let text_name_offset = shstrtab.len() as u32;
        shstrtab.extend_from_slice(b".text\0");
        let symtab_name_offset = shstrtab.len() as u32;
        shstrtab.extend_from_slice(b".symtab\0");
        let strtab_name_offset = shstrtab.len() as u32;
        shstrtab.extend_from_slice(b".strtab\0");
        let shstrtab_name_offset = shstrtab.len() as u32;
        shstrtab.extend_from_slice(b".shstrtab\0");

        let mut symtab = Vec::new();
        push_u32(&mut symtab, main_name_offset);
        push_u32(&mut symtab, ENTRY);
        push_u32(&mut symtab, text_bytes.len() as u32);
        symtab.push(0x12); // bind=GLOBAL, type=FUNC
        symtab.push(0);
        push_u16(&mut symtab, 1);

        let text_offset = HEADER_SIZE;
        let symtab_offset = text_offset + text_bytes.len() as u32;
        let strtab_offset = symtab_offset + symtab.len() as u32;
        let shstrtab_offset = strtab_offset + strtab.len() as u32;
        let sh_offset = shstrtab_offset + shstrtab.len() as u32;

        let mut buf = Vec::new();
        buf.extend_from_slice(&[0x7f, b'E', b'L', b'F', 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        push_u16(&mut buf, 1); // e_type
        push_u16(&mut buf, 0xf3); // e_machine
        push_u32(&mut buf, 1); // e_version
        push_u32(&mut buf, ENTRY); // e_entry
        push_u32(&mut buf, 0); // e_phoff
        push_u32(&mut buf, sh_offset); // e_shoff
        push_u32(&mut buf, 0); // e_flags
        push_u16(&mut buf, HEADER_SIZE as u16); // e_ehsize
        push_u16(&mut buf, 0); // e_phentsize
        push_u16(&mut buf, 0); // e_phnum
        push_u16(&mut buf, 40); // e_shentsize
        push_u16(&mut buf, 5); // e_shnum
        push_u16(&mut buf, 4); // e_shstrndx
        assert_eq!(buf.len() as u32, HEADER_SIZE);

        buf.extend_from_slice(&text_bytes);
        buf.extend_from_slice(&symtab);
        buf.extend_from_slice(&strtab);
        buf.extend_from_slice(&shstrtab);

        push_section_header(&mut buf, 0, 0, 0, 0, 0, 0);
        push_section_header(&mut buf, text_name_offset, 1, text_offset, text_bytes.len() as u32, 0, 0);
        push_section_header(&mut buf, symtab_name_offset, 2, symtab_offset, symtab.len() as u32, 3, 16);
        push_section_header(&mut buf, strtab_name_offset, 3, strtab_offset, strtab.len() as u32, 0, 0);
        push_section_header(&mut buf, shstrtab_name_offset, 3, shstrtab_offset, shstrtab.len() as u32, 0, 0);

        mutate(&mut buf);
        buf
    }

    #[test]
    fn parses_a_well_formed_object() {
        let bytes = build(|_| {});
        let buffer = ByteBuffer::new(bytes);
        let elf = ParsedElf::parse(&buffer).expect("well-formed object should parse");
        assert_eq!(elf.entry(), 0x1000);
        assert_eq!(elf.text_len(), 4);
        let symbols = elf.symbols().expect("symtab should resolve");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].1, "main");
    }

    #[test]
    fn empty_file_is_rejected() {
        let buffer = ByteBuffer::new(Vec::new());
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::Empty));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let bytes = build(|buf| buf[0] = 0x00);
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::BadMagic));
    }

    #[test]
    fn wrong_class_is_rejected() {
        let bytes = build(|buf| buf[4] = 2); // ELFCLASS64
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::BadClass));
    }

    #[test]
    fn big_endian_is_rejected() {
        let bytes = build(|buf| buf[5] = 2); // ELFDATA2MSB
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::BadData));
    }

    #[test]
    fn non_riscv_machine_is_rejected() {
        let bytes = build(|buf| {
            buf[18] = 0x3e; // e_machine low byte, EM_X86_64
            buf[19] = 0x00;
        });
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::BadMachine));
    }

    #[test]
    fn zero_entry_is_rejected() {
        let bytes = build(|buf| {
            buf[24] = 0;
            buf[25] = 0;
            buf[26] = 0;
            buf[27] = 0;
        });
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::ZeroEntry));
    }

    #[test]
    fn odd_text_size_is_a_hard_error() {
        // Shrink .text's sh_size field (second section header, offset 20
        // within it: name, type, flags, addr, offset, then size) by one
        // byte so it's no longer a multiple of 4.
        let bytes = build(|buf| {
            let sh_offset = u32::from_le_bytes([buf[32], buf[33], buf[34], buf[35]]) as usize;
            let field = sh_offset + 40 + 20; // skip the NULL header, then .text's sh_size
            buf[field..field + 4].copy_from_slice(&3u32.to_le_bytes());
        });
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::TextSizeNotMultipleOf4));
    }

    #[test]
    fn missing_text_section_is_rejected() {
        let bytes = build(|buf| {
            let sh_offset = u32::from_le_bytes([buf[32], buf[33], buf[34], buf[35]]) as usize;
            // Zero out .text's sh_type (PROGBITS -> NULL) so no section
            // named ".text" is ever found.
            let field = sh_offset + 40 + 4;
            buf[field..field + 4].copy_from_slice(&0u32.to_le_bytes());
        });
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(ParsedElf::parse(&buffer), Err(ElfError::MissingText));
    }
}
