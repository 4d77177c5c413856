pub mod emulator;
pub mod emulator_state;
pub mod error;
pub mod io;

pub use emulator::{Emulator, ExecRet};
pub use emulator_state::{EmulatorState, Flags};
pub use error::{ExecError, Location};
pub use io::{PipePrinter, Printer, StdoutPrinter};
