pub mod decode;
pub mod formats;
pub mod mnemonic;
pub mod raw;

pub use decode::{decode, Decoded};
