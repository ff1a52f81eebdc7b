/// I-Type (arithmetic/logical immediate): `imm[11:0] | rs1 | funct3 | rd |
/// opcode`. Covers OP-IMM (non-shift), LOAD, and JALR, each of which
/// reuses this field layout even though they're rendered as distinct
/// `Decoded` variants.
use crate::instruction::raw::RawInstruction;

#[derive(Debug, Clone, Copy)]
pub struct IArgs {
    pub rd: u32,
    pub rs1: u32,
    pub funct3: u32,
    pub imm: i32,
}

impl From<RawInstruction> for IArgs {
    fn from(raw: RawInstruction) -> Self {
        IArgs {
            rd: raw.rd(),
            rs1: raw.rs1(),
            funct3: raw.funct3(),
            imm: raw.i_imm(),
        }
    }
}
