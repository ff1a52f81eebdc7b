/// Mnemonic selection tables: every `(funct7, funct3)`/`funct3` lookup the
/// decoder needs.

/// `(funct7, funct3)` for RV32I base + RV32M (`funct7 == 0b0000001`) OP
/// instructions.
pub fn r_mnemonic(funct7: u32, funct3: u32) -> Option<&'static str> {
    match (funct7, funct3) {
        (0x00, 0) => Some("add"),
        (0x20, 0) => Some("sub"),
        (0x00, 1) => Some("sll"),
        (0x00, 2) => Some("slt"),
        (0x00, 3) => Some("sltu"),
        (0x00, 4) => Some("xor"),
        (0x00, 5) => Some("srl"),
        (0x20, 5) => Some("sra"),
        (0x00, 6) => Some("or"),
        (0x00, 7) => Some("and"),
        (0x01, 0) => Some("mul"),
        (0x01, 1) => Some("mulh"),
        (0x01, 2) => Some("mulhsu"),
        (0x01, 3) => Some("mulhu"),
        (0x01, 4) => Some("div"),
        (0x01, 5) => Some("divu"),
        (0x01, 6) => Some("rem"),
        (0x01, 7) => Some("remu"),
        _ => None,
    }
}

/// OP-IMM instructions whose funct3 marks them as a shift rather than a
/// plain arithmetic/logical immediate.
pub fn is_shift(funct3: u32) -> bool {
    matches!(funct3, 0b001 | 0b101)
}

pub fn shift_mnemonic(funct7: u32, funct3: u32) -> Option<&'static str> {
    match (funct7, funct3) {
        (0x00, 1) => Some("slli"),
        (0x00, 5) => Some("srli"),
        (0x20, 5) => Some("srai"),
        _ => None,
    }
}

pub fn i_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        0 => Some("addi"),
        2 => Some("slti"),
        3 => Some("sltiu"),
        4 => Some("xori"),
        6 => Some("ori"),
        7 => Some("andi"),
        _ => None,
    }
}

pub fn load_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        0 => Some("lb"),
        1 => Some("lh"),
        2 => Some("lw"),
        4 => Some("lbu"),
        5 => Some("lhu"),
        _ => None,
    }
}

pub fn store_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        0 => Some("sb"),
        1 => Some("sh"),
        2 => Some("sw"),
        _ => None,
    }
}

/// A BRANCH `funct3` is "valid" exactly when it names one of these six
/// comparisons; the target-harvest pass only synthesizes a label for a
/// valid branch.
pub fn branch_mnemonic(funct3: u32) -> Option<&'static str> {
    match funct3 {
        0 => Some("beq"),
        1 => Some("bne"),
        4 => Some("blt"),
        5 => Some("bge"),
        6 => Some("bltu"),
        7 => Some("bgeu"),
        _ => None,
    }
}
