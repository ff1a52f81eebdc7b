/// R-Type (register-register): `funct7 | rs2 | rs1 | funct3 | rd | opcode`.
/// Used by the OP major opcode for both RV32I and RV32M.
use crate::instruction::raw::RawInstruction;

#[derive(Debug, Clone, Copy)]
pub struct RArgs {
    pub rd: u32,
    pub rs1: u32,
    pub rs2: u32,
    pub funct3: u32,
    pub funct7: u32,
}

impl From<RawInstruction> for RArgs {
    fn from(raw: RawInstruction) -> Self {
        RArgs {
            rd: raw.rd(),
            rs1: raw.rs1(),
            rs2: raw.rs2(),
            funct3: raw.funct3(),
            funct7: raw.funct7(),
        }
    }
}
