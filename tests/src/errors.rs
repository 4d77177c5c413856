use crate::{load, prog_text, CALL, HLT, JMP, LDI, PRN};
use emu_lib::{ExecError, Location};

#[test]
fn unknown_opcode_stops() {
    let (mut emu, out) = load(&prog_text(&[
        LDI, 0, 3, // 0: LDI R0, 3
        PRN, 0,    // 3: PRN R0
        0xee,      // 5: ???
        PRN, 0,    // 6: PRN R0
        HLT,       // 8: HLT
    ]));
    let err = emu.run().unwrap_err();
    assert_eq!(err, ExecError::UnknownOpcode { opcode: 0xee, addr: 5 });
    assert_eq!(err.to_string(), "unknown opcode 0xee at address 0x05");
    assert_eq!(out.take_output(), "3\n");
    assert_eq!(emu.pc(), 5);

    // Running again faults at the same place.
    assert_eq!(emu.run(), Err(err));
    assert!(out.is_empty());
    assert_eq!(emu.num_ins(), 2);
}

#[test]
fn no_halt() {
    // Falls through into zeroed memory, and 0x00 isn't an opcode.
    let (mut emu, _) = load(&prog_text(&[
        LDI, 0, 3, // 0: LDI R0, 3
    ]));
    assert_eq!(emu.run(), Err(ExecError::UnknownOpcode { opcode: 0, addr: 3 }));
}

#[test]
fn register_out_of_bounds() {
    let (mut emu, out) = load(&prog_text(&[
        LDI, 9, 3, // 0: LDI R9, 3
        HLT,
    ]));
    let err = emu.run().unwrap_err();
    assert_eq!(err, ExecError::OutOfBounds(Location::Reg(9)));
    assert_eq!(err.to_string(), "register index 9 out of bounds");
    assert!(out.is_empty());
    assert_eq!(emu.num_ins(), 0);
}

#[test]
fn call_return_addr_out_of_bounds() {
    let mut bytes = vec![0; 256];
    bytes[..5].copy_from_slice(&[
        LDI, 1, 0xfe, // 0: LDI R1, 0xfe
        JMP, 1,       // 3: JMP R1
    ]);
    bytes[0xfe] = CALL; // CALL R0; return address would be 0x100
    bytes[0xff] = 0;
    let (mut emu, _) = load(&prog_text(&bytes));
    assert_eq!(emu.run(), Err(ExecError::OutOfBounds(Location::Mem(0x100))));
    assert_eq!(emu.pc(), 0xfe);
    assert_eq!(emu.reg_read(common::asm::Reg::SP), 0xf4);
}

#[test]
fn infinite_loop_step_limit() {
    let (mut emu, _) = load(&prog_text(&[
        LDI, 0, 3, // 0: LDI R0, loop
        JMP, 0,    // 3: loop: JMP R0
    ]));
    assert_eq!(emu.run_for(1000), Err(ExecError::StepLimit(1000)));
    assert_eq!(emu.pc(), 3);
}
