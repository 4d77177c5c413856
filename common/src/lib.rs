pub mod asm;
pub mod constants;
pub mod decoder;
