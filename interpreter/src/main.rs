use std::path::PathBuf;
use std::process::ExitCode;

use common::constants::PROGRAM_START;
use emu_lib::{Emulator, ExecError};
use loader::{LoadError, Program};

use clap::Parser;
use log::error;
use thiserror::Error;

/// LS-8 Emulator
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Program file, one binary literal per line
    program: PathBuf,

    /// Give up after this many instructions without a halt
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print a trace line to stderr before each instruction
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Error)]
enum Error {
    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    #[error("execution failed: {0}")]
    Exec(#[from] ExecError),
}

fn run(args: &Args) -> Result<(), Error> {
    let prog = Program::from_file(&args.program)?;

    let mut emu = Emulator::new();
    emu.set_tracing(args.trace);
    emu.load_image(&prog.bytes, PROGRAM_START)?;

    match args.max_steps {
        Some(max) => emu.run_for(max)?,
        None => emu.run()?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {e}", args.program.display());
            ExitCode::FAILURE
        },
    }
}
