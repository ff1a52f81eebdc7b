/// J-Type (unconditional jump-and-link): `imm[20|10:1|11|19:12] | rd |
/// opcode`. Used only by JAL.
use crate::instruction::raw::RawInstruction;

#[derive(Debug, Clone, Copy)]
pub struct JArgs {
    pub rd: u32,
    pub imm: i32,
}

impl From<RawInstruction> for JArgs {
    fn from(raw: RawInstruction) -> Self {
        JArgs {
            rd: raw.rd(),
            imm: raw.j_imm(),
        }
    }
}
