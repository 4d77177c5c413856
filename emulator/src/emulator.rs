use common::asm::*;
use common::decoder::{decode, DecodeError};
use crate::io::{Printer, StdoutPrinter};
use crate::{EmulatorState, ExecError, Flags, Location};

use std::sync::Arc;

use delegate::delegate;
use derive_more::IsVariant;
use log::debug;


#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum ExecRet {
    Ok,
    Halt,
}


pub struct Emulator {
    state: EmulatorState,
    printer: Arc<dyn Printer>,
    tracing: bool,
}

impl Emulator {
    pub fn new() -> Emulator {
        Emulator::with_printer(Arc::new(StdoutPrinter::default()))
    }

    pub fn with_printer(printer: Arc<dyn Printer>) -> Emulator {
        Emulator {
            state: EmulatorState::new(),
            printer,
            tracing: false,
        }
    }

    // Print a trace line to stderr before each instruction.
    pub fn set_tracing(&mut self, tracing: bool) {
        self.tracing = tracing;
    }

    delegate! {
        to self.state {
            pub fn mem_read(&self, addr: u16) -> Result<u8, ExecError>;
            pub fn mem_write(&mut self, addr: u16, val: u8) -> Result<(), ExecError>;
            pub fn reg_read(&self, reg: Reg) -> u8;
            pub fn reg_write(&mut self, reg: Reg, val: u8);
            pub fn pc(&self) -> u16;
            pub fn get_flags(&self) -> &Flags;
            pub fn num_ins(&self) -> u64;
        }
    }

    pub fn get_state_mut(&mut self) -> &mut EmulatorState {
        &mut self.state
    }

    pub fn load_image(&mut self, data: &[u8], start: u16) -> Result<(), ExecError> {
        for (offset, byte) in data.iter().enumerate() {
            let addr = u16::try_from(offset)
                .ok()
                .and_then(|offset| start.checked_add(offset))
                .ok_or(ExecError::OutOfBounds(Location::Mem(u16::MAX)))?;
            self.state.mem_write(addr, *byte)?;
        }
        Ok(())
    }

    // Run until a halt.
    pub fn run(&mut self) -> Result<(), ExecError> {
        let mut running = true;
        while running {
            running = self.run_ins()?.is_ok();
        }
        debug!("Halted after {} instructions", self.state.num_ins());
        Ok(())
    }

    // Run until a halt, giving up after max_ins instructions.
    pub fn run_for(&mut self, max_ins: u64) -> Result<(), ExecError> {
        for _ in 0..max_ins {
            if self.run_ins()?.is_halt() {
                debug!("Halted after {} instructions", self.state.num_ins());
                return Ok(());
            }
        }
        Err(ExecError::StepLimit(max_ins))
    }

    // Fetch, decode and execute a single instruction. On error the PC is left
    // at the faulting instruction.
    pub fn run_ins(&mut self) -> Result<ExecRet, ExecError> {
        if self.tracing {
            eprintln!("{}", self.trace_line());
        }

        let ins = self.decode()?;
        debug!("PC: {:#04x}: {}", self.state.pc(), ins);
        self.state.inc_ins();
        self.exec(ins)
    }

    fn decode(&self) -> Result<Ins, ExecError> {
        let pc = self.state.pc();
        let opcode = self.state.mem_read(pc)?;
        let Some(op) = Opcode::from_byte(opcode) else {
            return Err(ExecError::UnknownOpcode { opcode, addr: pc });
        };

        let mut buf = [opcode; 3];
        for off in 1..op.size() {
            buf[off as usize] = self.state.mem_read(pc + off)?;
        }

        decode(&buf[..op.size() as usize]).map_err(|e| match e {
            DecodeError::InvalidReg(idx) => ExecError::OutOfBounds(Location::Reg(idx)),
            DecodeError::UnknownOpcode(opcode) => ExecError::UnknownOpcode { opcode, addr: pc },
            DecodeError::Truncated { got, .. } => ExecError::OutOfBounds(Location::Mem(pc + got)),
            DecodeError::Empty => ExecError::OutOfBounds(Location::Mem(pc)),
        })
    }

    // TRACE: PC | next 3 bytes | R0-R7 | FL
    pub fn trace_line(&self) -> String {
        let pc = self.state.pc();
        let byte = |off: u16| match pc.checked_add(off).map(|addr| self.state.mem_read(addr)) {
            Some(Ok(val)) => format!("{val:02X}"),
            _ => "--".to_string(),
        };

        let mut line = format!("TRACE: {pc:02X} | {} {} {} |", byte(0), byte(1), byte(2));
        for val in self.state.regs() {
            line.push_str(&format!(" {val:02X}"));
        }
        line.push_str(&format!(" | {:02X}", self.state.get_flags().to_raw()));
        line
    }


    ///////////////////////////////////////////////////////////////////////////
    // Execute
    ///////////////////////////////////////////////////////////////////////////

    pub fn alu(&mut self, op: Opcode, a: Reg, b: Reg) -> Result<(), ExecError> {
        let a_val = self.state.reg_read(a);
        let b_val = self.state.reg_read(b);
        match op {
            Opcode::Add => self.state.reg_write(a, a_val.wrapping_add(b_val)),
            Opcode::Mul => self.state.reg_write(a, a_val.wrapping_mul(b_val)),
            Opcode::Cmp => self.state.get_flags_mut().set_compare(a_val.cmp(&b_val)),
            op => return Err(ExecError::UnsupportedOperation(op)),
        }
        Ok(())
    }

    fn push(&mut self, val: u8) -> Result<(), ExecError> {
        let sp = self.state.reg_read(Reg::SP).wrapping_sub(1);
        self.state.reg_write(Reg::SP, sp);
        self.state.mem_write(sp as u16, val)
    }

    fn exec_push(&mut self, reg: Reg) -> Result<(), ExecError> {
        let sp = self.state.reg_read(Reg::SP).wrapping_sub(1);
        self.state.reg_write(Reg::SP, sp);
        // Read after the decrement, so PUSH SP stores the new SP.
        let val = self.state.reg_read(reg);
        self.state.mem_write(sp as u16, val)
    }

    fn pop(&mut self) -> Result<u8, ExecError> {
        let sp = self.state.reg_read(Reg::SP);
        let val = self.state.mem_read(sp as u16)?;
        self.state.reg_write(Reg::SP, sp.wrapping_add(1));
        Ok(val)
    }

    fn exec_pop(&mut self, reg: Reg) -> Result<(), ExecError> {
        let sp = self.state.reg_read(Reg::SP);
        let val = self.state.mem_read(sp as u16)?;
        self.state.reg_write(reg, val);
        // For POP SP the increment lands on the popped value.
        let sp = self.state.reg_read(Reg::SP);
        self.state.reg_write(Reg::SP, sp.wrapping_add(1));
        Ok(())
    }

    fn exec_call(&mut self, reg: Reg, ret_addr: u16) -> Result<u16, ExecError> {
        let target = self.state.reg_read(reg);
        let ret_addr = u8::try_from(ret_addr)
            .map_err(|_| ExecError::OutOfBounds(Location::Mem(ret_addr)))?;
        self.push(ret_addr)?;
        Ok(target as u16)
    }

    fn jump_target(&self, reg: Reg) -> u16 {
        self.state.reg_read(reg) as u16
    }

    fn exec(&mut self, ins: Ins) -> Result<ExecRet, ExecError> {
        let next = self.state.pc() + ins.size();

        let new_pc = match ins {
            Ins::Hlt => next,
            Ins::Ret => self.pop()? as u16,
            Ins::Ldi { reg, imm } => {
                self.state.reg_write(reg, imm);
                next
            },
            Ins::Prn(reg) => {
                self.printer.print(self.state.reg_read(reg))
                    .map_err(|e| ExecError::Output(e.kind()))?;
                next
            },
            Ins::Push(reg) => {
                self.exec_push(reg)?;
                next
            },
            Ins::Pop(reg) => {
                self.exec_pop(reg)?;
                next
            },
            Ins::Call(reg) => self.exec_call(reg, next)?,
            Ins::Jmp(reg) => self.jump_target(reg),
            Ins::Jeq(reg) => {
                if self.state.get_flags().get_equal() { self.jump_target(reg) } else { next }
            },
            Ins::Jne(reg) => {
                if !self.state.get_flags().get_equal() { self.jump_target(reg) } else { next }
            },
            Ins::Alu { op, a, b } => {
                self.alu(op, a, b)?;
                next
            },
        };
        self.state.set_pc(new_pc);

        if ins == Ins::Hlt {
            Ok(ExecRet::Halt)
        } else {
            Ok(ExecRet::Ok)
        }
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
