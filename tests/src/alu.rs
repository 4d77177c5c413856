use crate::flags::{check_flags, E, G, L};
use crate::{load, prog_text, run, ADD, CMP, HLT, LDI, MUL};
use common::asm::Reg;

fn alu_prog(op: u8) -> String {
    prog_text(&[
        op, 0, 1, // op R0, R1
        HLT,
    ])
}

#[test]
fn mul_wraps() {
    let src = alu_prog(MUL);
    for a in 0..=u8::MAX {
        for b in 0..=u8::MAX {
            let (mut emu, _) = load(&src);
            emu.reg_write(Reg::R0, a);
            emu.reg_write(Reg::R1, b);
            emu.run().unwrap();
            assert_eq!(emu.reg_read(Reg::R0) as u32, (a as u32 * b as u32) % 256, "{a} * {b}");
            assert_eq!(emu.reg_read(Reg::R1), b, "{a} * {b}");
        }
    }
}

#[test]
fn add_wraps() {
    let src = alu_prog(ADD);
    for a in (0..=u8::MAX).step_by(3) {
        for b in (0..=u8::MAX).step_by(7) {
            let (mut emu, _) = load(&src);
            emu.reg_write(Reg::R0, a);
            emu.reg_write(Reg::R1, b);
            emu.run().unwrap();
            assert_eq!(emu.reg_read(Reg::R0) as u32, (a as u32 + b as u32) % 256, "{a} + {b}");
        }
    }
}

#[test]
fn mul_print() {
    let (emu, out) = run(r#"
        10000010 # LDI R0,5
        00000000
        00000101
        10000010 # LDI R1,6
        00000001
        00000110
        10100010 # MUL R0,R1
        00000000
        00000001
        01000111 # PRN R0
        00000000
        00000001 # HLT
    "#);
    assert_eq!(out, "30\n");
    assert_eq!(emu.pc(), 12);
}

#[test]
fn mul_same_reg() {
    let (emu, _) = run(&prog_text(&[
        LDI, 2, 20, // LDI R2, 20
        MUL, 2, 2,  // MUL R2, R2
        HLT,
    ]));
    assert_eq!(emu.reg_read(Reg::R2), (400 % 256) as u8);
}

#[test]
fn cmp_sets_exactly_one() {
    let src = alu_prog(CMP);
    for a in (0..=u8::MAX).step_by(5) {
        for b in (0..=u8::MAX).step_by(5) {
            let (mut emu, _) = load(&src);
            emu.reg_write(Reg::R0, a);
            emu.reg_write(Reg::R1, b);
            emu.run().unwrap();

            let exp = if a == b { E } else if a > b { G } else { L };
            check_flags(&emu, exp);
            assert_eq!(emu.get_flags().to_raw().count_ones(), 1, "{a} vs {b}");

            // Compare leaves its operands alone.
            assert_eq!(emu.reg_read(Reg::R0), a);
            assert_eq!(emu.reg_read(Reg::R1), b);
        }
    }
}

#[test]
fn cmp_clears_previous() {
    let (mut emu, _) = load(&prog_text(&[
        LDI, 0, 1, // LDI R0, 1
        LDI, 1, 2, // LDI R1, 2
        CMP, 0, 1, // CMP R0, R1
        CMP, 1, 0, // CMP R1, R0
        CMP, 0, 0, // CMP R0, R0
        HLT,
    ]));
    for _ in 0..3 {
        emu.run_ins().unwrap();
    }
    check_flags(&emu, L);
    emu.run_ins().unwrap();
    check_flags(&emu, G);
    emu.run_ins().unwrap();
    check_flags(&emu, E);
}
