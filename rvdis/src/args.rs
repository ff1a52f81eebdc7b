use std::path::PathBuf;

use clap::Parser;

/// The two positional paths the tool takes once the argc check in
/// `main` has already confirmed there are exactly two of them. Any
/// other argc is handled before this ever parses.
#[derive(Debug, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}
