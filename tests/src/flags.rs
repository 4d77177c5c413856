use emu_lib::Emulator;
use emu_lib::emulator_state::Flags;

pub const E: u8 = Flags::E;
pub const G: u8 = Flags::G;
pub const L: u8 = Flags::L;

pub fn check_flags(emu: &Emulator, exp: u8) {
    let flags = emu.get_flags();
    assert_eq!(flags.get_equal(), exp & E != 0, "equal flag");
    assert_eq!(flags.get_greater(), exp & G != 0, "greater flag");
    assert_eq!(flags.get_less(), exp & L != 0, "less flag");
}
