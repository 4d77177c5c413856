use thiserror::Error;

use super::asm::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    #[error("register index {0} out of range")]
    InvalidReg(u8),

    #[error("{op} needs {needed} bytes, only {got} available")]
    Truncated { op: Opcode, needed: u16, got: u16 },

    #[error("no input")]
    Empty,
}

fn decode_reg(input: &[u8], idx: usize) -> Result<Reg, DecodeError> {
    Reg::decode(input[idx])
}

// input[0] is the opcode; only as many bytes as the opcode declares are read.
pub fn decode(input: &[u8]) -> Result<Ins, DecodeError> {
    let Some(&byte) = input.first() else {
        return Err(DecodeError::Empty);
    };
    let op = Opcode::from_byte(byte).ok_or(DecodeError::UnknownOpcode(byte))?;

    let needed = op.size();
    if input.len() < needed as usize {
        return Err(DecodeError::Truncated { op, needed, got: input.len() as u16 });
    }

    use Opcode::*;
    let ins = match op {
        Hlt => Ins::Hlt,
        Ret => Ins::Ret,
        Ldi => Ins::Ldi { reg: decode_reg(input, 1)?, imm: input[2] },
        Prn => Ins::Prn(decode_reg(input, 1)?),
        Push => Ins::Push(decode_reg(input, 1)?),
        Pop => Ins::Pop(decode_reg(input, 1)?),
        Call => Ins::Call(decode_reg(input, 1)?),
        Jmp => Ins::Jmp(decode_reg(input, 1)?),
        Jeq => Ins::Jeq(decode_reg(input, 1)?),
        Jne => Ins::Jne(decode_reg(input, 1)?),
        Add | Mul | Cmp => Ins::Alu { op, a: decode_reg(input, 1)?, b: decode_reg(input, 2)? },
    };
    debug_assert_eq!(ins.size(), needed);
    Ok(ins)
}
