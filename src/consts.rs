//! Static catalog and UI vocabulary with zero-allocation design.
//! All strings are &'static str; the catalog is compiled in and never mutated.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rejected selector code (language, region or region filter)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Article language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Fr => write!(f, "Français"),
            Language::En => write!(f, "English"),
        }
    }
}

impl FromStr for Language {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            other => Err(UnknownCode {
                kind: "language",
                value: other.to_string(),
                expected: "fr, en",
            }),
        }
    }
}

/// Editorial region of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Fr,
    Int,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Fr => write!(f, "France"),
            Region::Int => write!(f, "International"),
        }
    }
}

/// Stable catalog identifier (position in [`CATALOG`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// News record with static lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub id: ItemId,
    pub title: &'static str,
    pub summary: &'static str,
    pub source: &'static str,
    pub link: &'static str,
    pub language: Language,
    pub region: Region,
    pub topics: &'static [&'static str],
}

impl NewsItem {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: usize,
        title: &'static str,
        summary: &'static str,
        source: &'static str,
        link: &'static str,
        language: Language,
        region: Region,
        topics: &'static [&'static str],
    ) -> Self {
        Self { id: ItemId(id), title, summary, source, link, language, region, topics }
    }

    #[inline]
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| *t == topic)
    }

    /// True when both items share at least one topic
    #[inline]
    pub fn shares_topic_with(&self, other: &NewsItem) -> bool {
        self.topics.iter().any(|t| other.has_topic(t))
    }
}

/// Static sample catalog - compile-time constant, ids match positions
pub static CATALOG: &[NewsItem] = &[
    // ═══════════════════════════════════════════════════════════════════
    // FRANCE
    // ═══════════════════════════════════════════════════════════════════
    NewsItem::new(
        0,
        "Apple dévoile son nouveau casque de réalité mixte",
        "Apple a présenté un casque de réalité mixte qui combine réalité augmentée et réalité virtuelle.",
        "Le Monde",
        "https://www.lemonde.fr/tech/article/2025/08/18/apple-casque-realite-mixte.html",
        Language::Fr,
        Region::Fr,
        &["tech"],
    ),
    NewsItem::new(
        1,
        "La France adopte une loi sur la neutralité carbone",
        "Le parlement français a voté une loi visant la neutralité carbone d'ici 2050.",
        "AFP",
        "https://www.afp.com/fr/neutralite-carbone-france-2050",
        Language::Fr,
        Region::Fr,
        &["environment", "politique"],
    ),
    NewsItem::new(
        2,
        "Une avancée majeure dans la lutte contre le cancer du sein",
        "Des chercheurs ont développé un traitement prometteur contre certaines formes de cancer du sein.",
        "France24",
        "https://www.france24.com/fr/sante/avancee-cancer-sein",
        Language::Fr,
        Region::Fr,
        &["health", "science"],
    ),

    // ═══════════════════════════════════════════════════════════════════
    // INTERNATIONAL
    // ═══════════════════════════════════════════════════════════════════
    NewsItem::new(
        3,
        "Tesla annonce une nouvelle batterie révolutionnaire",
        "Tesla affirme avoir développé une batterie capable de faire 1 000 km avec une seule charge.",
        "Reuters",
        "https://www.reuters.com/business/autos-transportation/tesla-new-battery-1000km-range",
        Language::En,
        Region::Int,
        &["tech", "economy"],
    ),
    NewsItem::new(
        4,
        "Climate change threatens global food security",
        "Scientists warn that rising temperatures could reduce crop yields by up to 25% by 2050.",
        "CNN",
        "https://www.cnn.com/2025/08/18/climate-food-security-study",
        Language::En,
        Region::Int,
        &["environment", "science"],
    ),
    NewsItem::new(
        5,
        "Blockchain technology transforms supply chains",
        "Companies are using blockchain to improve transparency and reduce costs in supply chain management.",
        "Bloomberg",
        "https://www.bloomberg.com/news/articles/2025-08-17/blockchain-supply-chain",
        Language::En,
        Region::Int,
        &["tech", "economy"],
    ),
    NewsItem::new(
        6,
        "Une découverte exoplanétaire bouleverse l'astronomie",
        "Une exoplanète de la taille de la Terre a été découverte dans la zone habitable d'une étoile proche.",
        "Cité des Sciences",
        "https://www.cite-sciences.fr/exoplanete-zone-habitable",
        Language::Fr,
        Region::Fr,
        &["science"],
    ),
    NewsItem::new(
        7,
        "Global markets rally as inflation cools",
        "Stock markets worldwide have surged after reports showed that inflation is slowing down.",
        "Financial Times",
        "https://www.ft.com/content/markets-rally-inflation-cools",
        Language::En,
        Region::Int,
        &["economy"],
    ),
];

/// Selectable topic keys with their UI labels, in selector order
pub static TOPIC_OPTIONS: &[(&str, &str)] = &[
    ("tech", "Tech"),
    ("science", "Science"),
    ("economy", "Économie"),
    ("environment", "Environnement"),
    ("health", "Santé"),
];

/// Lookup a selectable topic (case-insensitive), returning its canonical key
#[inline]
pub fn find_topic(key: &str) -> Option<&'static str> {
    TOPIC_OPTIONS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(k, _)| *k)
}

/// UI label for a topic key, falling back to the key itself
pub fn topic_label(key: &str) -> &str {
    TOPIC_OPTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// Page copy
pub mod labels {
    pub const PAGE_TITLE: &str = "FlashBriefs – L'essentiel en 1 minute";
    pub const PREFERENCES: &str = "Préférences";
    pub const LANGUAGE: &str = "Langue";
    pub const REGION: &str = "Zone";
    pub const TOPICS: &str = "Sujets";
    pub const ALL_TOPICS: &str = "Tous";
    pub const SOURCE: &str = "Source :";
    pub const READ_MORE: &str = "Lire la suite :";
    pub const AGENT_BUTTON: &str = "Agent Flashbriefs";
    pub const CHAT_PANEL: &str = "Discussion avec l'agent";
    pub const USER_PREFIX: &str = "Vous :";
    pub const AGENT_PREFIX: &str = "Agent :";
    pub const ASK_PLACEHOLDER: &str = "Posez votre question (Demandez plus de détails…)";
    pub const NOT_LOADED: &str = "Choisissez vos préférences puis chargez les brèves (/load).";
    pub const PENDING_CHANGES: &str = "(préférences modifiées, /load pour les appliquer)";
    pub const NO_RESULTS: &str = "Aucune brève ne correspond à vos préférences.";
    pub const FOOTER: &str = "Les brèves sont mises à jour à 07 h et 18 h 30 (Fuseau Europe/Paris).\n\
        Version freemium : résumés avec publicité. Version premium : sans publicité et accès approfondi.";
}

/// Agent reply templates
pub mod replies {
    pub const SUGGESTIONS_PREFIX: &str = "Voici d'autres articles qui pourraient vous intéresser : ";
    pub const TITLE_SEPARATOR: &str = " ; ";
    pub const NOTHING_FOUND: &str = "Je n'ai pas trouvé d'autres articles pertinents pour le moment.";
}

/// Limits and thresholds
pub mod limits {
    pub const RELATED_LIMIT: usize = 3;
}
