//! Pure projections of viewer state: terminal text and JSON snapshot.

use crate::consts::{labels, topic_label, NewsItem};
use crate::logic::FilterCriteria;
use crate::session::{ChatMessage, Role, Session};
use serde::Serialize;

const RULE: &str = "───────────────────";

// ═══════════════════════════════════════════════════════════════════
// TEXT
// ═══════════════════════════════════════════════════════════════════

/// One-line summary of the selector controls
pub fn render_criteria(criteria: &FilterCriteria) -> String {
    let topics = if criteria.topics.is_empty() {
        labels::ALL_TOPICS.to_string()
    } else {
        criteria
            .topics
            .iter()
            .map(|t| topic_label(t))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{} · {} : {} · {} : {} · {} : {}",
        labels::PREFERENCES,
        labels::LANGUAGE,
        criteria.language,
        labels::REGION,
        criteria.region,
        labels::TOPICS,
        topics
    )
}

/// Full page: header, controls, result cards, open chat panel, footer
pub fn render_view(controls: &FilterCriteria, session: &Session) -> String {
    let mut output = String::with_capacity(2048);
    output.push_str(labels::PAGE_TITLE);
    output.push('\n');
    output.push_str(&render_criteria(controls));
    output.push('\n');
    if session.criteria().is_some_and(|loaded| loaded != controls) {
        output.push_str(labels::PENDING_CHANGES);
        output.push('\n');
    }
    output.push_str(RULE);
    output.push('\n');

    if !session.is_loaded() {
        output.push_str(labels::NOT_LOADED);
        output.push('\n');
    } else if session.results().is_empty() {
        output.push_str(labels::NO_RESULTS);
        output.push('\n');
    }

    for (idx, item) in session.results().iter().enumerate() {
        output.push_str(&render_card(idx, item));
        if session.open_chat() == Some(idx) {
            output.push_str(&render_panel(item, session.messages(idx).unwrap_or(&[])));
        }
        output.push('\n');
    }

    output.push_str(RULE);
    output.push('\n');
    output.push_str(labels::FOOTER);
    output.push('\n');
    output
}

fn render_card(idx: usize, item: &NewsItem) -> String {
    format!(
        "[{n}] {title}\n    {summary}\n    {source_label} {source}\n    {more} {link}\n    ▸ {agent} : /open {n}\n",
        n = idx + 1,
        title = item.title,
        summary = item.summary,
        source_label = labels::SOURCE,
        source = item.source,
        more = labels::READ_MORE,
        link = item.link,
        agent = labels::AGENT_BUTTON,
    )
}

fn render_panel(item: &NewsItem, messages: &[ChatMessage]) -> String {
    let mut output = format!(
        "    ┌ {}\n    │ {}\n    │ {}\n",
        labels::CHAT_PANEL,
        item.title,
        item.summary
    );
    for message in messages {
        output.push_str(&format!("    │ {}\n", render_message(message)));
    }
    output.push_str(&format!("    └ {}\n", labels::ASK_PLACEHOLDER));
    output
}

fn render_message(message: &ChatMessage) -> String {
    let prefix = match message.role {
        Role::User => labels::USER_PREFIX,
        Role::Agent => labels::AGENT_PREFIX,
    };
    format!("[{}] {} {}", message.sent_at.format("%H:%M"), prefix, message.content)
}

// ═══════════════════════════════════════════════════════════════════
// JSON
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub criteria: &'a FilterCriteria,
    /// Criteria of the last load; differs from `criteria` until the next load
    pub loaded_with: Option<&'a FilterCriteria>,
    pub loaded: bool,
    pub results: Vec<ResultView<'a>>,
    /// 1-based position of the open panel
    pub open_chat: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ResultView<'a> {
    pub position: usize,
    #[serde(flatten)]
    pub item: &'a NewsItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<&'a [ChatMessage]>,
}

impl<'a> Snapshot<'a> {
    pub fn new(controls: &'a FilterCriteria, session: &'a Session) -> Self {
        let open = session.open_chat();
        let results = session
            .results()
            .iter()
            .enumerate()
            .map(|(idx, &item)| ResultView {
                position: idx + 1,
                item,
                messages: if open == Some(idx) { session.messages(idx) } else { None },
            })
            .collect();
        Self {
            criteria: controls,
            loaded_with: session.criteria(),
            loaded: session.is_loaded(),
            results,
            open_chat: open.map(|idx| idx + 1),
        }
    }
}

pub fn render_json(controls: &FilterCriteria, session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot::new(controls, session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::Language;
    use crate::logic::RegionFilter;
    use serde_json::Value;

    fn tesla_session() -> (FilterCriteria, Session) {
        let criteria = FilterCriteria::new(Language::En, RegionFilter::Int).with_topics(["tech"]);
        let mut session = Session::new();
        session.load(&criteria);
        session.open(0).unwrap();
        session.send(0, "Quelle autonomie ?");
        (criteria, session)
    }

    #[test]
    fn criteria_line_uses_labels() {
        let criteria = FilterCriteria::default().with_topics(["economy", "health"]);
        assert_eq!(
            render_criteria(&criteria),
            "Préférences · Langue : Français · Zone : National et International · Sujets : Économie, Santé"
        );
        assert!(render_criteria(&FilterCriteria::default()).ends_with("Sujets : Tous"));
    }

    #[test]
    fn view_before_load_prompts_to_load() {
        let view = render_view(&FilterCriteria::default(), &Session::new());
        assert!(view.starts_with(labels::PAGE_TITLE));
        assert!(view.contains(labels::NOT_LOADED));
        assert!(view.trim_end().ends_with("accès approfondi."));
    }

    #[test]
    fn empty_load_says_so() {
        let criteria = FilterCriteria::new(Language::Fr, RegionFilter::Int);
        let mut session = Session::new();
        session.load(&criteria);
        assert!(render_view(&criteria, &session).contains(labels::NO_RESULTS));
    }

    #[test]
    fn view_shows_cards_and_only_the_open_transcript() {
        let (criteria, session) = tesla_session();
        let view = render_view(&criteria, &session);

        assert!(view.contains("[1] Tesla annonce une nouvelle batterie révolutionnaire"));
        assert!(view.contains("[2] Blockchain technology transforms supply chains"));
        assert!(view.contains("Source : Reuters"));
        assert!(view.contains("Lire la suite : https://www.bloomberg.com/"));
        assert_eq!(view.matches(labels::CHAT_PANEL).count(), 1);
        assert!(view.contains("Vous : Quelle autonomie ?"));
        assert!(view.contains("Agent : Voici d'autres articles"));

        let user_at = view.find("Vous :").unwrap();
        let agent_at = view.find("Agent :").unwrap();
        assert!(user_at < agent_at);
    }

    #[test]
    fn unapplied_control_changes_are_flagged() {
        let (criteria, session) = tesla_session();
        assert!(!render_view(&criteria, &session).contains(labels::PENDING_CHANGES));

        let changed = FilterCriteria::new(Language::Fr, RegionFilter::Both);
        assert!(render_view(&changed, &session).contains(labels::PENDING_CHANGES));

        let json: Value = serde_json::from_str(&render_json(&changed, &session).unwrap()).unwrap();
        assert_eq!(json["criteria"]["language"], "fr");
        assert_eq!(json["loaded_with"]["language"], "en");
    }

    #[test]
    fn json_snapshot_mirrors_state() {
        let (criteria, session) = tesla_session();
        let json: Value = serde_json::from_str(&render_json(&criteria, &session).unwrap()).unwrap();

        assert_eq!(json["loaded"], true);
        assert_eq!(json["open_chat"], 1);
        assert_eq!(json["criteria"]["language"], "en");
        assert_eq!(json["criteria"]["region"], "int");
        assert_eq!(json["criteria"]["topics"], serde_json::json!(["tech"]));

        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["position"], 1);
        assert_eq!(results[0]["id"], 3);
        assert_eq!(results[0]["topics"], serde_json::json!(["tech", "economy"]));
        assert_eq!(results[0]["messages"][0]["role"], "user");
        assert_eq!(results[0]["messages"][1]["role"], "agent");
        assert!(results[1].get("messages").is_none());
    }
}
