use std::fmt;
use std::io;

use common::asm::Opcode;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Mem(u16),
    Reg(u8),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Location::Mem(addr) => write!(f, "memory address {addr:#04x}"),
            Location::Reg(idx) => write!(f, "register index {idx}"),
        }
    }
}

// All of these end the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("unknown opcode {opcode:#04x} at address {addr:#04x}")]
    UnknownOpcode { opcode: u8, addr: u16 },

    #[error("unsupported ALU operation {0}")]
    UnsupportedOperation(Opcode),

    #[error("{0} out of bounds")]
    OutOfBounds(Location),

    #[error("no halt after {0} instructions")]
    StepLimit(u64),

    #[error("unable to write output: {0}")]
    Output(io::ErrorKind),
}
