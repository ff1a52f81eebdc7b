/// B-Type (conditional branch): like S-Type but the immediate bits are
/// reordered and represent an even (bit0 = 0) PC-relative offset.
use crate::instruction::raw::RawInstruction;

#[derive(Debug, Clone, Copy)]
pub struct BArgs {
    pub rs1: u32,
    pub rs2: u32,
    pub funct3: u32,
    pub imm: i32,
}

impl From<RawInstruction> for BArgs {
    fn from(raw: RawInstruction) -> Self {
        BArgs {
            rs1: raw.rs1(),
            rs2: raw.rs2(),
            funct3: raw.funct3(),
            imm: raw.b_imm(),
        }
    }
}
