/// Shift-immediate shape: an I-Type word whose immediate field is split
/// into a funct7-like high bit-group and a 5-bit shift amount (SLLI/SRLI/
/// SRAI). Distinguished from `IArgs` at dispatch time by `funct3`.
use crate::instruction::raw::RawInstruction;

#[derive(Debug, Clone, Copy)]
pub struct ShiftArgs {
    pub rd: u32,
    pub rs1: u32,
    pub funct3: u32,
    pub funct7: u32,
    pub shamt: u32,
}

impl From<RawInstruction> for ShiftArgs {
    fn from(raw: RawInstruction) -> Self {
        ShiftArgs {
            rd: raw.rd(),
            rs1: raw.rs1(),
            funct3: raw.funct3(),
            funct7: raw.funct7(),
            shamt: raw.shamt(),
        }
    }
}
