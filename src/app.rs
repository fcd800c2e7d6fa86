//! Presentation loop state: selector controls, the session and dispatch of
//! parsed commands to it.

use crate::commands::{build_help_message, Command};
use crate::config::{Config, ConfigError, OutputFormat};
use crate::logic::FilterCriteria;
use crate::render::{render_criteria, render_json, render_view};
use crate::session::{SendOutcome, Session};
use thiserror::Error;

const OPEN_FIRST_HINT: &str = "Ouvrez d'abord l'agent sur une brève (/open N).";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("render: {0}")]
    Render(#[from] serde_json::Error),
}

/// Result of one dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue { notice: Option<String>, view: Option<String> },
    Quit,
}

impl Step {
    fn notice(text: impl Into<String>) -> Self {
        Step::Continue { notice: Some(text.into()), view: None }
    }

    fn view(view: String) -> Self {
        Step::Continue { notice: None, view: Some(view) }
    }

    fn nothing() -> Self {
        Step::Continue { notice: None, view: None }
    }
}

pub struct App {
    controls: FilterCriteria,
    session: Session,
    output: OutputFormat,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            controls: FilterCriteria::new(config.language, config.region),
            session: Session::new(),
            output: config.output,
        }
    }

    pub fn render(&self) -> Result<String, AppError> {
        Ok(match self.output {
            OutputFormat::Text => render_view(&self.controls, &self.session),
            OutputFormat::Json => render_json(&self.controls, &self.session)?,
        })
    }

    pub fn handle(&mut self, command: Command) -> Result<Step, AppError> {
        let step = match command {
            Command::Quit => Step::Quit,
            Command::Help => Step::notice(build_help_message()),
            Command::Criteria => Step::notice(render_criteria(&self.controls)),
            Command::Show => Step::view(self.render()?),

            Command::Lang(language) => {
                self.controls.language = language;
                Step::notice(render_criteria(&self.controls))
            }
            Command::Region(region) => {
                self.controls.region = region;
                Step::notice(render_criteria(&self.controls))
            }
            Command::Topics(topics) => {
                self.controls = self.controls.clone().with_topics(topics);
                Step::notice(render_criteria(&self.controls))
            }

            Command::Load => {
                self.session.load(&self.controls);
                Step::view(self.render()?)
            }
            Command::Open(index) => match self.session.open(index) {
                Ok(_) => Step::view(self.render()?),
                Err(e) => {
                    log::warn!("open rejected: {}", e);
                    Step::notice(e.to_string())
                }
            },
            Command::Send(text) => match self.session.send_to_open(&text) {
                SendOutcome::Sent => Step::view(self.render()?),
                SendOutcome::NoOpenChat
                | SendOutcome::NotOpen { .. }
                | SendOutcome::UnknownResult { .. } => Step::notice(OPEN_FIRST_HINT),
                SendOutcome::EmptyMessage => Step::nothing(),
            },
        };
        Ok(step)
    }
}
