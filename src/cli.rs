use clap::Parser;
use std::path::PathBuf;

/// gut: interactively copy selected content from a folder into the current directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder to copy from
    #[arg(value_name = "FOLDER")]
    pub source: PathBuf,

    /// Write debug logs to this file. Logging is silent when unset.
    #[arg(long, value_name = "PATH", env = "GUT_LOG")]
    pub log_file: Option<PathBuf>,
}
