//! FlashBriefs - interactive news-briefing viewer with a topic-aware agent

mod app;
mod commands;
mod config;
mod consts;
mod logic;
mod render;
mod session;

use crate::app::{App, AppError, Step};
use crate::commands::{build_help_message, parse_line, Command};
use crate::config::Config;
use crate::consts::{labels, CATALOG};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;

const PROMPT: &str = "flashbriefs> ";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("flashbriefs: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    pretty_env_logger::formatted_builder()
        .parse_filters(&config.log_filter)
        .init();

    log::info!("═══════════════════════════════════════════");
    log::info!("  {}", labels::PAGE_TITLE);
    log::info!("  {} briefs in catalog", CATALOG.len());
    log::info!("═══════════════════════════════════════════");
    log::debug!("config: {:?}", config);

    let mut app = App::new(&config);
    let mut rl = DefaultEditor::new()?;

    println!("{}", labels::PAGE_TITLE);
    println!("{}\n", build_help_message());

    if config.autoload {
        print_step(app.handle(Command::Load)?);
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        log::debug!("history entry not recorded: {}", e);
                    }
                }
                match parse_line(&line) {
                    Ok(None) => continue,
                    Ok(Some(command)) => match app.handle(command)? {
                        Step::Quit => break,
                        step => print_step(step),
                    },
                    Err(e) => {
                        log::warn!("rejected input {:?}: {}", line.trim(), e);
                        println!("⚠ {}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C : tapez /quit pour quitter.");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    log::info!("session closed");
    Ok(())
}

fn print_step(step: Step) {
    if let Step::Continue { notice, view } = step {
        if let Some(notice) = notice {
            println!("{}", notice);
        }
        if let Some(view) = view {
            println!("{}", view);
        }
    }
}
