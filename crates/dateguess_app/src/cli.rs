use std::path::PathBuf;

use clap::{ArgAction, Parser};
use dateguess_engine::Accuracy;

/// Guess the publication date of a web page from its URL and HTML.
#[derive(Debug, Parser)]
#[command(name = "dateguess", version)]
pub struct Cli {
    /// URL the page was retrieved from.
    #[arg(long)]
    pub url: String,

    /// HTML file to read; `-` or absent reads stdin.
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Content-Type header of the response, used for the charset.
    #[arg(long)]
    pub content_type: Option<String>,

    /// RON config with extra extractor tables.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report no date when the guess is weaker than this.
    #[arg(long, value_name = "LEVEL")]
    pub min_accuracy: Option<Accuracy>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not log to the terminal.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn reads_stdin(&self) -> bool {
        self.html
            .as_deref()
            .is_none_or(|path| path.as_os_str() == "-")
    }
}
