/// U-Type (upper immediate): `imm[31:12] | rd | opcode`. Used by LUI and
/// AUIPC. The immediate is rendered as the raw 20-bit field.
use crate::instruction::raw::RawInstruction;

#[derive(Debug, Clone, Copy)]
pub struct UArgs {
    pub rd: u32,
    pub imm: i32,
}

impl From<RawInstruction> for UArgs {
    fn from(raw: RawInstruction) -> Self {
        UArgs {
            rd: raw.rd(),
            imm: raw.u_imm(),
        }
    }
}
