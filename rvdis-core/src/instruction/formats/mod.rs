/// One module per RV32 instruction-word layout. Each defines a plain
/// argument struct and a `From<RawInstruction>` conversion that pulls the
/// relevant fields out. Mnemonic selection lives separately in
/// `super::mnemonic`.
pub mod b_type;
pub mod i_type;
pub mod j_type;
pub mod load_type;
pub mod r_type;
pub mod s_type;
pub mod shift_type;
pub mod u_type;
