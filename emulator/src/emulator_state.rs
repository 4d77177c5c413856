use std::cmp::Ordering;

use common::asm::{NUM_REGS, Reg};
use common::constants::{MEM_SIZE, SP_INIT};

use crate::{ExecError, Location};

use log::trace;

// The FL register: 00000LGE.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const EQUAL_SHIFT: u8 = 0;
    pub const GREATER_SHIFT: u8 = 1;
    pub const LESS_SHIFT: u8 = 2;

    pub const E: u8 = 0x1 << Self::EQUAL_SHIFT;
    pub const G: u8 = 0x1 << Self::GREATER_SHIFT;
    pub const L: u8 = 0x1 << Self::LESS_SHIFT;

    pub fn new() -> Flags {
        Default::default()
    }

    pub fn to_raw(&self) -> u8 {
        self.0
    }

    pub fn get_equal(&self) -> bool {
        (self.0 & Self::E) != 0
    }

    pub fn get_greater(&self) -> bool {
        (self.0 & Self::G) != 0
    }

    pub fn get_less(&self) -> bool {
        (self.0 & Self::L) != 0
    }

    // Exactly one flag is left set.
    pub fn set_compare(&mut self, ord: Ordering) {
        self.0 = match ord {
            Ordering::Equal => Self::E,
            Ordering::Greater => Self::G,
            Ordering::Less => Self::L,
        };
    }
}

pub struct EmulatorState {
    num_ins: u64,
    mem: [u8; MEM_SIZE],
    regs: [u8; NUM_REGS],
    pc: u16,
    flags: Flags,
}

impl EmulatorState {
    pub fn new() -> Self {
        let mut regs = [0; NUM_REGS];
        regs[Reg::SP.index()] = SP_INIT;
        EmulatorState {
            num_ins: 0,
            mem: [0; MEM_SIZE],
            regs,
            pc: 0,
            flags: Flags::new(),
        }
    }

    pub fn inc_ins(&mut self) {
        self.num_ins += 1;
    }

    pub fn num_ins(&self) -> u64 {
        self.num_ins
    }

    fn check_addr(addr: u16) -> Result<usize, ExecError> {
        let idx = addr as usize;
        if idx < MEM_SIZE {
            Ok(idx)
        } else {
            Err(ExecError::OutOfBounds(Location::Mem(addr)))
        }
    }

    pub fn mem_read(&self, addr: u16) -> Result<u8, ExecError> {
        Ok(self.mem[Self::check_addr(addr)?])
    }

    pub fn mem_write(&mut self, addr: u16, val: u8) -> Result<(), ExecError> {
        let idx = Self::check_addr(addr)?;
        trace!("Mem: writing {val:#04x} to {addr:#04x}");
        self.mem[idx] = val;
        Ok(())
    }

    pub fn reg_read(&self, reg: Reg) -> u8 {
        self.regs[reg.index()]
    }

    pub fn reg_write(&mut self, reg: Reg, val: u8) {
        trace!("Reg: writing {val:#04x} to {reg}");
        self.regs[reg.index()] = val;
    }

    fn check_reg(index: u8) -> Result<Reg, ExecError> {
        Reg::decode(index).map_err(|_| ExecError::OutOfBounds(Location::Reg(index)))
    }

    pub fn reg_read_index(&self, index: u8) -> Result<u8, ExecError> {
        Ok(self.reg_read(Self::check_reg(index)?))
    }

    pub fn reg_write_index(&mut self, index: u8, val: u8) -> Result<(), ExecError> {
        self.reg_write(Self::check_reg(index)?, val);
        Ok(())
    }

    pub fn regs(&self) -> &[u8; NUM_REGS] {
        &self.regs
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        trace!("PC: {:#04x} -> {pc:#04x}", self.pc);
        self.pc = pc;
    }

    pub fn get_flags(&self) -> &Flags {
        &self.flags
    }

    pub fn get_flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }
}

impl Default for EmulatorState {
    fn default() -> Self {
        Self::new()
    }
}
