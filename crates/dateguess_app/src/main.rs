mod cli;
mod config;
mod input;
mod logging;
mod report;

use std::process::ExitCode;

use clap::Parser;
use dateguess_engine::{Accuracy, DateGuesser};
use guess_logging::{guess_debug, guess_warn};

use cli::Cli;
use config::AppConfig;
use report::GuessReport;

const EXIT_INPUT: u8 = 1;
const EXIT_SETUP: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(config::load_config).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => return fail(EXIT_SETUP, &err),
    };

    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    if let Some(destination) = logging::LogDestination::select(log_file, cli.quiet) {
        logging::initialize(&destination, logging::level_for_verbosity(cli.verbose));
    }

    let min_accuracy = match config.min_accuracy() {
        Ok(from_config) => cli.min_accuracy.or(from_config).unwrap_or(Accuracy::None),
        Err(err) => return fail(EXIT_SETUP, &err),
    };

    match run(&cli, &config, min_accuracy) {
        Ok(()) => ExitCode::SUCCESS,
        Err((code, err)) => fail(code, &err),
    }
}

fn run(cli: &Cli, config: &AppConfig, min_accuracy: Accuracy) -> Result<(), (u8, anyhow::Error)> {
    let guesser = DateGuesser::from_config(&config.guesser)
        .map_err(|err| (EXIT_SETUP, anyhow::Error::from(err)))?;

    let html_path = (!cli.reads_stdin()).then_some(cli.html.as_deref()).flatten();
    let page = input::read_page(html_path, cli.content_type.as_deref(), &cli.url)
        .map_err(|err| (EXIT_INPUT, err))?;
    if page.had_replacements {
        guess_warn!("page was not valid {}; some characters were replaced", page.encoding_label);
    }
    guess_debug!("read {} chars of html for {}", page.html.len(), cli.url);

    let guess = guesser.guess_date(&cli.url, &page.html);
    let report = GuessReport::new(&cli.url, &guess, min_accuracy);
    if cli.json {
        let json = report
            .to_json()
            .map_err(|err| (EXIT_INPUT, anyhow::Error::from(err)))?;
        println!("{json}");
    } else {
        println!("{}", report.to_line());
    }
    Ok(())
}

fn fail(code: u8, err: &anyhow::Error) -> ExitCode {
    eprintln!("error: {err:#}");
    ExitCode::from(code)
}
