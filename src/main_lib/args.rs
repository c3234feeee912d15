use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, verbatim_doc_comment)]
/// input-analyzer: replay keyboard and mouse event scripts through the input
/// analyzer
///
/// Each simulation file is run on a fresh analyzer. The event transcript is
/// printed, showing which events would have their default browser action
/// suppressed, followed by a summary of the collected statistics.
pub struct Args {
    // Display different platform specific paths based on the target OS
    #[cfg_attr(
        target_os = "windows",
        doc = r"Configuration file(s) to use. If not specified, defaults to
input-analyzer.cfg in the current working directory and
'C:\Users\user\AppData\Roaming\input-analyzer\input-analyzer.cfg'.
Built-in defaults are used if neither exists. Simulations use the first file."
    )]
    #[cfg_attr(
        target_os = "macos",
        doc = "Configuration file(s) to use. If not specified, defaults to
input-analyzer.cfg in the current working directory and
'$HOME/Library/Application Support/input-analyzer/input-analyzer.cfg'.
Built-in defaults are used if neither exists. Simulations use the first file."
    )]
    #[cfg_attr(
        not(any(target_os = "macos", target_os = "windows")),
        doc = "Configuration file(s) to use. If not specified, defaults to
input-analyzer.cfg in the current working directory and
'$XDG_CONFIG_HOME/input-analyzer/input-analyzer.cfg'.
Built-in defaults are used if neither exists. Simulations use the first file."
    )]
    #[arg(short, long, verbatim_doc_comment)]
    pub cfg: Option<Vec<PathBuf>>,

    /// Simulation file(s) to run. If not specified, defaults to
    /// input-analyzer.sim in the current working directory.
    #[arg(short = 's', long, verbatim_doc_comment)]
    pub sim: Option<Vec<PathBuf>>,

    /// Print a JSON snapshot of the analyzer state instead of the summary.
    #[arg(long)]
    pub json: bool,

    /// Print the key log, newest entry first.
    #[arg(long)]
    pub log: bool,

    /// Disable logging, except for errors. Takes precedent over debug and trace.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// Enable trace logging; implies --debug as well.
    #[arg(short, long)]
    pub trace: bool,

    /// Validate configuration file(s) and exit
    #[arg(long, verbatim_doc_comment)]
    pub check: bool,
}
