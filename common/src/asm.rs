use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use crate::decoder::DecodeError;


// Opcode bytes are laid out as AABCDDDD:
//  AA:   number of operand bytes
//  B:    handled by the ALU
//  C:    sets the PC
//  DDDD: instruction identifier
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
pub enum Opcode {
    Hlt = 0b0000_0001,
    Ret = 0b0001_0001,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Prn = 0b0100_0111,
    Call = 0b0101_0000,
    Jmp = 0b0101_0100,
    Jeq = 0b0101_0101,
    Jne = 0b0101_0110,
    Ldi = 0b1000_0010,
    Add = 0b1010_0000,
    Mul = 0b1010_0010,
    Cmp = 0b1010_0111,
}

impl Opcode {
    const NUM_OPERANDS_SHIFT: u8 = 6;
    const ALU_SHIFT: u8 = 5;
    const SETS_PC_SHIFT: u8 = 4;

    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Opcode::from_u8(byte)
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn num_operands(self) -> u16 {
        (self.to_byte() >> Self::NUM_OPERANDS_SHIFT) as u16
    }

    // Bytes, including the opcode.
    pub fn size(self) -> u16 {
        1 + self.num_operands()
    }

    pub fn is_alu(self) -> bool {
        (self.to_byte() >> Self::ALU_SHIFT) & 0x1 != 0
    }

    pub fn sets_pc(self) -> bool {
        (self.to_byte() >> Self::SETS_PC_SHIFT) & 0x1 != 0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}


////////////////////////////////////////////////////////////////////////////////


#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
pub enum Reg {
    R0 = 0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    SP,
}

pub const NUM_REGS: usize = 8;

impl Reg {
    pub const ALL: [Reg; NUM_REGS] = [
        Reg::R0, Reg::R1, Reg::R2, Reg::R3, Reg::R4, Reg::R5, Reg::R6, Reg::SP,
    ];

    pub fn decode(byte: u8) -> Result<Reg, DecodeError> {
        Reg::from_u8(byte).ok_or(DecodeError::InvalidReg(byte))
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reg::SP => write!(f, "SP"),
            reg => write!(f, "R{}", reg.index()),
        }
    }
}


////////////////////////////////////////////////////////////////////////////////


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ins {
    Hlt,
    Ret,
    Ldi { reg: Reg, imm: u8 },
    Prn(Reg),
    Push(Reg),
    Pop(Reg),
    Call(Reg),
    Jmp(Reg),
    Jeq(Reg),
    Jne(Reg),
    // The opcode doubles as the ALU operation.
    Alu { op: Opcode, a: Reg, b: Reg },
}

impl Ins {
    pub fn opcode(&self) -> Opcode {
        match self {
            Ins::Hlt => Opcode::Hlt,
            Ins::Ret => Opcode::Ret,
            Ins::Ldi { .. } => Opcode::Ldi,
            Ins::Prn(_) => Opcode::Prn,
            Ins::Push(_) => Opcode::Push,
            Ins::Pop(_) => Opcode::Pop,
            Ins::Call(_) => Opcode::Call,
            Ins::Jmp(_) => Opcode::Jmp,
            Ins::Jeq(_) => Opcode::Jeq,
            Ins::Jne(_) => Opcode::Jne,
            Ins::Alu { op, .. } => *op,
        }
    }

    pub fn size(&self) -> u16 {
        self.opcode().size()
    }

    pub fn encode(&self) -> Vec<u8> {
        let op = self.opcode().to_byte();
        match *self {
            Ins::Hlt | Ins::Ret => vec![op],
            Ins::Ldi { reg, imm } => vec![op, reg.index() as u8, imm],
            Ins::Prn(reg)
            | Ins::Push(reg)
            | Ins::Pop(reg)
            | Ins::Call(reg)
            | Ins::Jmp(reg)
            | Ins::Jeq(reg)
            | Ins::Jne(reg) => vec![op, reg.index() as u8],
            Ins::Alu { a, b, .. } => vec![op, a.index() as u8, b.index() as u8],
        }
    }
}

impl fmt::Display for Ins {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = self.opcode();
        match self {
            Ins::Hlt | Ins::Ret => write!(f, "{op}"),
            Ins::Ldi { reg, imm } => write!(f, "{op}\t{reg}, {imm}"),
            Ins::Prn(reg)
            | Ins::Push(reg)
            | Ins::Pop(reg)
            | Ins::Call(reg)
            | Ins::Jmp(reg)
            | Ins::Jeq(reg)
            | Ins::Jne(reg) => write!(f, "{op}\t{reg}"),
            Ins::Alu { a, b, .. } => write!(f, "{op}\t{a}, {b}"),
        }
    }
}
