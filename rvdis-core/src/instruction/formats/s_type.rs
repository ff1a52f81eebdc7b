/// S-Type (store): `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
use crate::instruction::raw::RawInstruction;

#[derive(Debug, Clone, Copy)]
pub struct SArgs {
    pub rs1: u32,
    pub rs2: u32,
    pub funct3: u32,
    pub imm: i32,
}

impl From<RawInstruction> for SArgs {
    fn from(raw: RawInstruction) -> Self {
        SArgs {
            rs1: raw.rs1(),
            rs2: raw.rs2(),
            funct3: raw.funct3(),
            imm: raw.s_imm(),
        }
    }
}
