//! Line-oriented command parsing for the interactive viewer.

use crate::consts::{find_topic, Language, UnknownCode, TOPIC_OPTIONS};
use crate::logic::RegionFilter;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '/{0}' (try /help)")]
    UnknownCommand(String),
    #[error("/{command} needs an argument: {expected}")]
    MissingArgument { command: &'static str, expected: &'static str },
    #[error("/{command} takes no argument")]
    UnexpectedArgument { command: &'static str },
    #[error(transparent)]
    InvalidCode(#[from] UnknownCode),
    #[error("unknown topic '{0}'")]
    UnknownTopic(String),
    #[error("'{0}' is not a result number")]
    InvalidNumber(String),
}

/// User action. `Open` carries a 0-based result position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Criteria,
    Lang(Language),
    Region(RegionFilter),
    Topics(Vec<&'static str>),
    Load,
    Open(usize),
    Send(String),
    Quit,
}

/// Parse one input line. Blank lines yield `None`; lines not starting
/// with `/` are chat messages for the open panel, kept as typed.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let raw = line.trim_end_matches(['\r', '\n']);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return Ok(Some(Command::Quit));
    }

    let Some(body) = raw.trim_start().strip_prefix('/') else {
        return Ok(Some(Command::Send(raw.to_string())));
    };
    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args),
        None => (body, ""),
    };
    routes::resolve_command(name, args).map(Some)
}

/// Build help message
pub fn build_help_message() -> String {
    let topics = TOPIC_OPTIONS
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(" ");
    let languages = Language::ALL.map(|l| l.code()).join("|");
    let regions = RegionFilter::ALL.map(|r| r.code()).join("|");
    format!(
        "Commandes :\n\
         /lang {languages:<17}langue des brèves\n\
         /region {regions:<15}zone\n\
         /topics [{topics}]\n\
         \x20                      sujets (aucun = tous)\n\
         /load                  charger les brèves\n\
         /open N                ouvrir l'agent sur la brève N\n\
         /send TEXTE            écrire à l'agent (ou tapez simplement le texte)\n\
         /show /criteria /help /quit"
    )
}

/// Command routing table
pub mod routes {
    use super::*;

    /// Map command name and raw argument string to a command.
    /// Only `/send` keeps its argument untrimmed.
    pub fn resolve_command(name: &str, raw_args: &str) -> Result<Command, CommandError> {
        let args = raw_args.trim();
        match name.to_lowercase().as_str() {
            "help" | "start" => no_args("help", args, Command::Help),
            "show" => no_args("show", args, Command::Show),
            "criteria" | "prefs" => no_args("criteria", args, Command::Criteria),
            "load" => no_args("load", args, Command::Load),
            "quit" | "exit" => no_args("quit", args, Command::Quit),

            "lang" => {
                let code = required("lang", args, "fr|en")?;
                Ok(Command::Lang(code.parse()?))
            }
            "region" => {
                let code = required("region", args, "fr|int|both")?;
                Ok(Command::Region(code.parse()?))
            }
            "topics" => parse_topics(args).map(Command::Topics),
            "open" => {
                let raw = required("open", args, "N")?;
                match raw.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Command::Open(n - 1)),
                    _ => Err(CommandError::InvalidNumber(raw.to_string())),
                }
            }
            "send" => Ok(Command::Send(raw_args.to_string())),

            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    fn no_args(command: &'static str, args: &str, cmd: Command) -> Result<Command, CommandError> {
        if args.is_empty() {
            Ok(cmd)
        } else {
            Err(CommandError::UnexpectedArgument { command })
        }
    }

    fn required<'a>(
        command: &'static str,
        args: &'a str,
        expected: &'static str,
    ) -> Result<&'a str, CommandError> {
        if args.is_empty() {
            Err(CommandError::MissingArgument { command, expected })
        } else {
            Ok(args)
        }
    }

    /// Topics separated by spaces or commas, deduplicated in input order
    fn parse_topics(args: &str) -> Result<Vec<&'static str>, CommandError> {
        let mut topics = Vec::new();
        for raw in args.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty()) {
            let key = find_topic(raw).ok_or_else(|| CommandError::UnknownTopic(raw.to_string()))?;
            if !topics.contains(&key) {
                topics.push(key);
            }
        }
        Ok(topics)
    }
}
