use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "scribe")]
#[command(version = "0.1.0")]
#[command(about = "A small terminal text editor with syntax highlighting")]
pub struct CliArgs {
    /// File to open (a new untitled buffer when omitted)
    pub file: Option<PathBuf>,

    /// Config file to use instead of the per-user default
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Write log records to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override the configured tab stop
    #[arg(long)]
    pub tab_stop: Option<usize>,
}

pub fn parse_args() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}
