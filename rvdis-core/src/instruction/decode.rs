/// Opcode dispatch: classifies a 32-bit word into exactly one decoded form.
/// A dense `match` on the 7-bit opcode, falling through to `Decoded::Unknown`
/// for anything unrecognized or malformed within a recognized opcode.
use crate::instruction::formats::{
    b_type::BArgs, i_type::IArgs, j_type::JArgs, load_type::LoadArgs, r_type::RArgs,
    s_type::SArgs, shift_type::ShiftArgs, u_type::UArgs,
};
use crate::instruction::mnemonic;
use crate::instruction::raw::RawInstruction;

pub const OP: u32 = 0b0110011;
pub const OP_IMM: u32 = 0b0010011;
pub const LOAD: u32 = 0b0000011;
pub const JALR: u32 = 0b1100111;
pub const STORE: u32 = 0b0100011;
pub const BRANCH: u32 = 0b1100011;
pub const LUI: u32 = 0b0110111;
pub const AUIPC: u32 = 0b0010111;
pub const JAL: u32 = 0b1101111;
pub const SYSTEM: u32 = 0b1110011;

const PRIV_FUNCT3: u32 = 0b000;
const ECALL_FUNCT12: u32 = 0b0000_0000_0000;
const EBREAK_FUNCT12: u32 = 0b0000_0000_0001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded {
    R {
        rd: u32,
        rs1: u32,
        rs2: u32,
        mnemonic: &'static str,
    },
    I {
        rd: u32,
        rs1: u32,
        imm: i32,
        mnemonic: &'static str,
    },
    Shift {
        rd: u32,
        rs1: u32,
        shamt: u32,
        mnemonic: &'static str,
    },
    Load {
        rd: u32,
        rs1: u32,
        imm: i32,
        mnemonic: &'static str,
    },
    S {
        rs1: u32,
        rs2: u32,
        imm: i32,
        mnemonic: &'static str,
    },
    B {
        rs1: u32,
        rs2: u32,
        imm: i32,
        mnemonic: &'static str,
    },
    U {
        rd: u32,
        imm: i32,
        mnemonic: &'static str,
    },
    J {
        rd: u32,
        imm: i32,
    },
    System {
        mnemonic: &'static str,
    },
    Unknown,
}

/// Classifies a 32-bit little-endian instruction word.
pub fn decode(word: u32) -> Decoded {
    let raw = RawInstruction::new(word);
    match raw.opcode() {
        OP => {
            let args = RArgs::from(raw);
            match mnemonic::r_mnemonic(args.funct7, args.funct3) {
                Some(mnemonic) => Decoded::R {
                    rd: args.rd,
                    rs1: args.rs1,
                    rs2: args.rs2,
                    mnemonic,
                },
                None => Decoded::Unknown,
            }
        }
        OP_IMM => {
            if mnemonic::is_shift(raw.funct3()) {
                let args = ShiftArgs::from(raw);
                match mnemonic::shift_mnemonic(args.funct7, args.funct3) {
                    Some(mnemonic) => Decoded::Shift {
                        rd: args.rd,
                        rs1: args.rs1,
                        shamt: args.shamt,
                        mnemonic,
                    },
                    None => Decoded::Unknown,
                }
            } else {
                let args = IArgs::from(raw);
                match mnemonic::i_mnemonic(args.funct3) {
                    Some(mnemonic) => Decoded::I {
                        rd: args.rd,
                        rs1: args.rs1,
                        imm: args.imm,
                        mnemonic,
                    },
                    None => Decoded::Unknown,
                }
            }
        }
        LOAD => {
            let args = LoadArgs::from(raw);
            match mnemonic::load_mnemonic(args.funct3) {
                Some(mnemonic) => Decoded::Load {
                    rd: args.rd,
                    rs1: args.rs1,
                    imm: args.imm,
                    mnemonic,
                },
                None => Decoded::Unknown,
            }
        }
        JALR => {
            let args = LoadArgs::from(raw);
            if args.funct3 == 0 {
                Decoded::Load {
                    rd: args.rd,
                    rs1: args.rs1,
                    imm: args.imm,
                    mnemonic: "jalr",
                }
            } else {
                Decoded::Unknown
            }
        }
        STORE => {
            let args = SArgs::from(raw);
            match mnemonic::store_mnemonic(args.funct3) {
                Some(mnemonic) => Decoded::S {
                    rs1: args.rs1,
                    rs2: args.rs2,
                    imm: args.imm,
                    mnemonic,
                },
                None => Decoded::Unknown,
            }
        }
        BRANCH => {
            let args = BArgs::from(raw);
            match mnemonic::branch_mnemonic(args.funct3) {
                Some(mnemonic) => Decoded::B {
                    rs1: args.rs1,
                    rs2: args.rs2,
                    imm: args.imm,
                    mnemonic,
                },
                None => Decoded::Unknown,
            }
        }
        LUI => {
            let args = UArgs::from(raw);
            Decoded::U {
                rd: args.rd,
                imm: args.imm,
                mnemonic: "lui",
            }
        }
        AUIPC => {
            let args = UArgs::from(raw);
            Decoded::U {
                rd: args.rd,
                imm: args.imm,
                mnemonic: "auipc",
            }
        }
        JAL => {
            let args = JArgs::from(raw);
            Decoded::J {
                rd: args.rd,
                imm: args.imm,
            }
        }
        SYSTEM => {
            if raw.funct3() == PRIV_FUNCT3 && raw.rd() == 0 && raw.rs1() == 0 {
                match raw.funct12() {
                    ECALL_FUNCT12 => Decoded::System { mnemonic: "ecall" },
                    EBREAK_FUNCT12 => Decoded::System { mnemonic: "ebreak" },
                    _ => Decoded::Unknown,
                }
            } else {
                Decoded::Unknown
            }
        }
        _ => Decoded::Unknown,
    }
}

/// `true` for a BRANCH word whose `funct3` names one of the six valid
/// comparisons. The target-harvest pass only synthesizes a label for
/// these, not for every BRANCH-opcode word.
pub fn is_valid_branch(word: u32) -> bool {
    let raw = RawInstruction::new(word);
    raw.opcode() == BRANCH && mnemonic::branch_mnemonic(raw.funct3()).is_some()
}

/// The JAL target address, for the label-harvest pass.
pub fn jal_target(word: u32, addr: u32) -> u32 {
    let raw = RawInstruction::new(word);
    addr.wrapping_add(raw.j_imm() as u32)
}

/// The BRANCH target address, for the label-harvest pass.
pub fn branch_target(word: u32, addr: u32) -> u32 {
    let raw = RawInstruction::new(word);
    addr.wrapping_add(raw.b_imm() as u32)
}
