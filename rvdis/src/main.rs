use std::fmt;
use std::fs;
use std::io;

use clap::Parser;

use rvdis::args::Cli;
use rvdis::format::{self, Formatter};
use rvdis::driver;
use rvdis_core::buffer::ByteBuffer;
use rvdis_core::elf::{ElfError, ParsedElf};

#[derive(Debug)]
enum RunError {
    OpenInput(io::Error),
    OpenOutput(io::Error),
    CloseOutput(io::Error),
    Elf(ElfError),
    Write,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::OpenInput(e) => write!(f, "could not open input file: {e}"),
            RunError::OpenOutput(e) => write!(f, "could not open output file: {e}"),
            RunError::CloseOutput(e) => write!(f, "could not close output file: {e}"),
            RunError::Elf(e) => write!(f, "{e}"),
            RunError::Write => write!(f, "write error"),
        }
    }
}

impl From<ElfError> for RunError {
    fn from(e: ElfError) -> Self {
        RunError::Elf(e)
    }
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let bytes = fs::read(&cli.input_path).map_err(RunError::OpenInput)?;
    let buffer = ByteBuffer::new(bytes);
    let elf = ParsedElf::parse(&buffer)?;

    let output_file = fs::File::create(&cli.output_path).map_err(RunError::OpenOutput)?;
    let mut out = Formatter::new(io::BufWriter::new(output_file));

    driver::run(&elf, &mut out)?;

    if out.had_error() {
        return Err(RunError::Write);
    }
    out.flush().map_err(RunError::CloseOutput)?;

    Ok(())
}

fn main() {
    // Any argc other than "program input output" prints usage to stdout
    // and exits 0, never clap's own exit-2-on-stderr behavior. The
    // count is checked before clap ever sees the arguments.
    let raw_args: Vec<String> = std::env::args().collect();
    if raw_args.len() != 3 {
        println!("usage: rvdis <input-elf> <output-file>");
        return;
    }

    let cli = Cli::parse();

    // Recoverable validation failures still exit 0: the tool reports the
    // error on stderr and leaves no output file or a truncated one.
    if let Err(e) = run(&cli) {
        format::report_error(e);
    }
}
