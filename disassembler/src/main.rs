use disassembler::disassemble;
use loader::Program;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

/// LS-8 Disassembler
#[derive(Parser)]
struct Args {
    /// Program file to list
    program: PathBuf,
}


fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let prog = match Program::from_file(&args.program) {
        Ok(prog) => prog,
        Err(e) => {
            error!("{e}");
            eprintln!("ls8-dis: {e}");
            return ExitCode::FAILURE;
        },
    };

    for dis in disassemble(&prog.bytes) {
        println!("{}", dis);
    }
    ExitCode::SUCCESS
}
