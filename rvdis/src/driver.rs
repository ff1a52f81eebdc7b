/// Orchestrates the two passes over `.text` and the symbol-table dump.
/// Holds no ISA or ELF knowledge of its own; it calls into `rvdis_core`
/// and renders what comes back through the `Formatter`.
use std::io::Write;

use rvdis_core::elf::{ElfResult, ParsedElf};
use rvdis_core::instruction::decode::{self, Decoded};
use rvdis_core::label::LabelTable;
use rvdis_core::{constants, symbol};

use crate::format::Formatter;

/// Pass 1: harvests every JAL/valid-BRANCH target into `labels`, after
/// priming it with the named symbols from `.symtab` (so names always
/// win over anything synthesized afterward).
fn harvest_labels(elf: &ParsedElf, labels: &mut LabelTable) -> ElfResult<()> {
    for (sym, name) in elf.symbols()? {
        labels.insert_named(sym.st_value, name.to_string());
    }

    let mut i = 0;
    while i < elf.text_len() {
        let addr = elf.entry().wrapping_add(i);
        let word = elf.text_word(i);
        // Only direct relative transfers create labels: JALR and computed
        // jumps do not.
        match decode::decode(word) {
            Decoded::J { .. } => {
                labels.ensure_synth(decode::jal_target(word, addr));
            }
            Decoded::B { .. } if decode::is_valid_branch(word) => {
                labels.ensure_synth(decode::branch_target(word, addr));
            }
            _ => {}
        }
        i += constants::INSTRUCTION_LEN_BYTES;
    }

    Ok(())
}

/// Pass 2: emits `.text` (with inline label headers) and `.symtab`.
pub fn run<W: Write>(elf: &ParsedElf, out: &mut Formatter<W>) -> ElfResult<()> {
    let mut labels = LabelTable::new();
    harvest_labels(elf, &mut labels)?;

    out.write(".text\n");

    let mut i = 0;
    while i < elf.text_len() {
        let addr = elf.entry().wrapping_add(i);
        if let Some(label) = labels.get(addr) {
            out.write(&format!("{:08x}   <{}>:\n", addr, label.display_name()));
        }
        let word = elf.text_word(i);
        out.write(&render_instruction(addr, word, &labels));
        i += constants::INSTRUCTION_LEN_BYTES;
    }

    // Exactly one blank line separates the last .text line from .symtab.
    out.write("\n.symtab\n");
    out.write("Symbol Value          \tSize Type \tBind \tVis   \tIndex Name\n");

    for (idx, (sym, name)) in elf.symbols()?.into_iter().enumerate() {
        out.write(&format!(
            "[{:>4}] 0x{:<15X} {:>5} {:<8} {:<8} {:<8} {:>6} {}\n",
            idx,
            sym.st_value,
            sym.st_size,
            symbol::type_name(&sym),
            symbol::bind_name(&sym),
            symbol::visibility_name(&sym),
            symbol::index_display(&sym),
            name,
        ));
    }

    Ok(())
}

fn render_instruction(addr: u32, word: u32, labels: &LabelTable) -> String {
    let prefix = format!("   {:05x}:\t{:08x}\t", addr, word);
    match decode::decode(word) {
        Decoded::R { rd, rs1, rs2, mnemonic } => format!(
            "{prefix}{:>7}\t{}, {}, {}\n",
            mnemonic,
            constants::reg_name(rd),
            constants::reg_name(rs1),
            constants::reg_name(rs2),
        ),
        Decoded::I { rd, rs1, imm, mnemonic } => format!(
            "{prefix}{:>7}\t{}, {}, {}\n",
            mnemonic,
            constants::reg_name(rd),
            constants::reg_name(rs1),
            imm,
        ),
        Decoded::Shift { rd, rs1, shamt, mnemonic } => format!(
            "{prefix}{:>7}\t{}, {}, {}\n",
            mnemonic,
            constants::reg_name(rd),
            constants::reg_name(rs1),
            shamt,
        ),
        Decoded::Load { rd, rs1, imm, mnemonic } => format!(
            "{prefix}{:>7}\t{}, {}({})\n",
            mnemonic,
            constants::reg_name(rd),
            imm,
            constants::reg_name(rs1),
        ),
        Decoded::S { rs1, rs2, imm, mnemonic } => format!(
            "{prefix}{:>7}\t{}, {}({})\n",
            mnemonic,
            constants::reg_name(rs2),
            imm,
            constants::reg_name(rs1),
        ),
        Decoded::B { rs1, rs2, imm, mnemonic } => {
            let target = format_target(addr, imm, labels);
            format!(
                "{prefix}{:>7}\t{}, {}, {}\n",
                mnemonic,
                constants::reg_name(rs1),
                constants::reg_name(rs2),
                target,
            )
        }
        Decoded::U { rd, imm, mnemonic } => format!(
            "{prefix}{:>7}\t{}, {}\n",
            mnemonic,
            constants::reg_name(rd),
            imm,
        ),
        Decoded::J { rd, imm } => {
            let target = format_target(addr, imm, labels);
            format!("{prefix}{:>7}\t{}, {}\n", "jal", constants::reg_name(rd), target)
        }
        Decoded::System { mnemonic } => format!("{prefix}{:>7}\n", mnemonic),
        Decoded::Unknown => format!("{prefix}unknown_instruction\n"),
    }
}

/// Renders a branch/jump operand as `0x<hex-target> <<label>>`, looking
/// the target up in the (already fully populated) label table.
fn format_target(addr: u32, imm: i32, labels: &LabelTable) -> String {
    let target = addr.wrapping_add(imm as u32);
    let label = labels
        .get(target)
        .map(|l| l.display_name())
        .unwrap_or_default();
    format!("{:#x} <{}>", target, label)
}
