//! Per-user session state: loaded results, the open chat panel and
//! per-result chat transcripts.

use crate::consts::{NewsItem, CATALOG};
use crate::logic::{filter, respond, FilterCriteria};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no result number {} (only {len} loaded)", .index + 1)]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(role: Role, content: String) -> Self {
        Self { role, content, sent_at: Local::now() }
    }
}

/// What happened to a send request. Only `Sent` mutates the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    NoOpenChat,
    NotOpen { open: usize },
    EmptyMessage,
    UnknownResult { index: usize },
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendOutcome::Sent => write!(f, "sent"),
            SendOutcome::NoOpenChat => write!(f, "no chat panel is open"),
            SendOutcome::NotOpen { open } => write!(f, "chat panel {} is the open one", open + 1),
            SendOutcome::EmptyMessage => write!(f, "empty message"),
            SendOutcome::UnknownResult { index } => write!(f, "no result number {}", index + 1),
        }
    }
}

/// Session state. `results` is `None` until the first load.
#[derive(Debug, Default)]
pub struct Session {
    results: Option<Vec<&'static NewsItem>>,
    criteria: Option<FilterCriteria>,
    open_chat: Option<usize>,
    chats: HashMap<usize, Vec<ChatMessage>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.results.is_some()
    }

    pub fn results(&self) -> &[&'static NewsItem] {
        self.results.as_deref().unwrap_or(&[])
    }

    /// Criteria of the last load, if any
    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    pub fn open_chat(&self) -> Option<usize> {
        self.open_chat
    }

    /// Transcript for a result position, `None` if that panel was never opened
    pub fn messages(&self, index: usize) -> Option<&[ChatMessage]> {
        self.chats.get(&index).map(Vec::as_slice)
    }

    /// Runs the filter and hard-resets every chat panel, even for identical criteria.
    pub fn load(&mut self, criteria: &FilterCriteria) -> usize {
        let results = filter(CATALOG, criteria);
        log::info!(
            "load lang={} region={} topics={:?} -> {} result(s)",
            criteria.language.code(),
            criteria.region.code(),
            criteria.topics,
            results.len()
        );

        let count = results.len();
        self.results = Some(results);
        self.criteria = Some(criteria.clone());
        self.open_chat = None;
        self.chats.clear();
        count
    }

    /// Opens the panel at `index`, closing any other. Existing history is kept.
    pub fn open(&mut self, index: usize) -> Result<&'static NewsItem, SessionError> {
        let results = self.results();
        let item = *results.get(index).ok_or(SessionError::IndexOutOfRange {
            index,
            len: results.len(),
        })?;

        if let Some(previous) = self.open_chat.filter(|p| *p != index) {
            log::debug!("closing chat panel {}", previous);
        }
        self.open_chat = Some(index);
        self.chats.entry(index).or_default();
        log::info!("opened chat on {} '{}'", item.id, item.title);
        Ok(item)
    }

    /// Appends the user message and the agent reply to the open panel.
    pub fn send(&mut self, index: usize, text: &str) -> SendOutcome {
        let outcome = match self.open_chat {
            None => SendOutcome::NoOpenChat,
            Some(open) if open != index => SendOutcome::NotOpen { open },
            Some(_) if text.is_empty() => SendOutcome::EmptyMessage,
            Some(_) => SendOutcome::Sent,
        };
        if outcome != SendOutcome::Sent {
            log::debug!("send to panel {} ignored: {}", index, outcome);
            return outcome;
        }

        let results = self.results();
        let Some(focal) = results.get(index).copied() else {
            let outcome = SendOutcome::UnknownResult { index };
            log::debug!("send to panel {} ignored: {}", index, outcome);
            return outcome;
        };
        let reply = respond(text, focal, results);

        let history = self.chats.entry(index).or_default();
        history.push(ChatMessage::new(Role::User, text.to_string()));
        history.push(ChatMessage::new(Role::Agent, reply));
        log::info!("agent replied on {} ({} message(s))", focal.id, history.len());
        outcome
    }

    /// Sends to whichever panel is open
    pub fn send_to_open(&mut self, text: &str) -> SendOutcome {
        match self.open_chat {
            Some(index) => self.send(index, text),
            None => {
                log::debug!("send ignored: {}", SendOutcome::NoOpenChat);
                SendOutcome::NoOpenChat
            }
        }
    }
}
