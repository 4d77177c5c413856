pub const MEM_SIZE: usize = 256; // Bytes
pub const PROGRAM_START: u16 = 0;

// The stack grows down from here; 0xf4 through 0xff are left free.
pub const SP_INIT: u8 = 0xf4;
