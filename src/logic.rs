//! Business logic layer - filtering, related-article lookup and agent replies.
//! Everything here is pure: no session state, no I/O.

use crate::consts::{limits, replies, Language, NewsItem, Region, UnknownCode};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Region selector - a single region or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionFilter {
    Fr,
    Int,
    #[default]
    Both,
}

impl RegionFilter {
    pub const ALL: [RegionFilter; 3] = [RegionFilter::Fr, RegionFilter::Int, RegionFilter::Both];

    pub fn code(&self) -> &'static str {
        match self {
            RegionFilter::Fr => "fr",
            RegionFilter::Int => "int",
            RegionFilter::Both => "both",
        }
    }

    #[inline]
    pub fn accepts(&self, region: Region) -> bool {
        match self {
            RegionFilter::Both => true,
            RegionFilter::Fr => region == Region::Fr,
            RegionFilter::Int => region == Region::Int,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::Fr => write!(f, "{}", Region::Fr),
            RegionFilter::Int => write!(f, "{}", Region::Int),
            RegionFilter::Both => write!(f, "National et International"),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" => Ok(RegionFilter::Fr),
            "int" => Ok(RegionFilter::Int),
            "both" => Ok(RegionFilter::Both),
            other => Err(UnknownCode {
                kind: "region",
                value: other.to_string(),
                expected: "fr, int, both",
            }),
        }
    }
}

/// User-selected filter. An empty topic set disables topic filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub language: Language,
    pub region: RegionFilter,
    pub topics: BTreeSet<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::new(Language::Fr, RegionFilter::Both)
    }
}

impl FilterCriteria {
    pub fn new(language: Language, region: RegionFilter) -> Self {
        Self { language, region, topics: BTreeSet::new() }
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Conjunction of the language, region and topic predicates
    pub fn matches(&self, item: &NewsItem) -> bool {
        item.language == self.language
            && self.region.accepts(item.region)
            && (self.topics.is_empty() || self.topics.iter().any(|t| item.has_topic(t)))
    }
}

/// Select catalog items matching `criteria`, preserving catalog order
pub fn filter<'a>(catalog: &'a [NewsItem], criteria: &FilterCriteria) -> Vec<&'a NewsItem> {
    catalog.iter().filter(|item| criteria.matches(item)).collect()
}

/// Up to `limit` candidates sharing a topic with `focal`, in candidate order.
/// The focal item is skipped by id, never by field equality.
pub fn related<'a>(focal: &NewsItem, candidates: &[&'a NewsItem], limit: usize) -> Vec<&'a NewsItem> {
    candidates
        .iter()
        .copied()
        .filter(|item| item.id != focal.id && item.shares_topic_with(focal))
        .take(limit)
        .collect()
}

/// Canned agent reply. The query is accepted but not interpreted yet.
pub fn respond(_query: &str, focal: &NewsItem, candidates: &[&NewsItem]) -> String {
    let suggestions = related(focal, candidates, limits::RELATED_LIMIT);
    if suggestions.is_empty() {
        return replies::NOTHING_FOUND.to_string();
    }

    let titles = suggestions
        .iter()
        .map(|item| format!("« {} »", item.title))
        .collect::<Vec<_>>()
        .join(replies::TITLE_SEPARATOR);
    format!("{}{}.", replies::SUGGESTIONS_PREFIX, titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TOPIC_OPTIONS, CATALOG};

    fn titles(items: &[&NewsItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.title).collect()
    }

    /// Every language x region x topic-subset combination over the selector set
    fn all_criteria() -> Vec<FilterCriteria> {
        let mut out = Vec::new();
        for language in Language::ALL {
            for region in RegionFilter::ALL {
                for mask in 0u32..(1 << TOPIC_OPTIONS.len()) {
                    let topics = TOPIC_OPTIONS
                        .iter()
                        .enumerate()
                        .filter(|(bit, _)| (mask >> *bit) & 1 == 1)
                        .map(|(_, (key, _))| *key);
                    out.push(FilterCriteria::new(language, region).with_topics(topics));
                }
            }
        }
        out
    }

    #[test]
    fn filter_is_sound_complete_and_ordered() {
        for criteria in all_criteria() {
            let result = filter(CATALOG, &criteria);
            let expected: Vec<_> = CATALOG.iter().filter(|i| criteria.matches(i)).collect();
            assert_eq!(titles(&result), titles(&expected), "{criteria:?}");
            assert!(result.windows(2).all(|w| w[0].id < w[1].id));
            for item in &result {
                assert_eq!(item.language, criteria.language);
                assert!(criteria.region.accepts(item.region));
                assert!(criteria.topics.is_empty() || criteria.topics.iter().any(|t| item.has_topic(t)));
            }
        }
    }

    #[test]
    fn both_regions_is_union_of_single_regions() {
        for criteria in all_criteria().into_iter().filter(|c| c.region == RegionFilter::Both) {
            let both = filter(CATALOG, &criteria);
            let mut union: Vec<_> = filter(CATALOG, &FilterCriteria { region: RegionFilter::Fr, ..criteria.clone() });
            union.extend(filter(CATALOG, &FilterCriteria { region: RegionFilter::Int, ..criteria.clone() }));
            union.sort_by_key(|i| i.id);
            assert_eq!(titles(&both), titles(&union));
        }
    }

    #[test]
    fn empty_topics_ignores_topic_predicate() {
        for language in Language::ALL {
            for region in RegionFilter::ALL {
                let result = filter(CATALOG, &FilterCriteria::new(language, region));
                let expected = CATALOG
                    .iter()
                    .filter(|i| i.language == language && region.accepts(i.region))
                    .count();
                assert_eq!(result.len(), expected);
            }
        }
    }

    #[test]
    fn french_national_briefs() {
        let result = filter(CATALOG, &FilterCriteria::new(Language::Fr, RegionFilter::Fr));
        assert_eq!(
            titles(&result),
            vec![
                "Apple dévoile son nouveau casque de réalité mixte",
                "La France adopte une loi sur la neutralité carbone",
                "Une avancée majeure dans la lutte contre le cancer du sein",
                "Une découverte exoplanétaire bouleverse l'astronomie",
            ]
        );
    }

    #[test]
    fn english_international_tech() {
        let criteria = FilterCriteria::new(Language::En, RegionFilter::Int).with_topics(["tech"]);
        let result = filter(CATALOG, &criteria);
        assert_eq!(
            titles(&result),
            vec![
                "Tesla annonce une nouvelle batterie révolutionnaire",
                "Blockchain technology transforms supply chains",
            ]
        );
    }

    #[test]
    fn unmatched_criteria_yield_empty_not_error() {
        let criteria = FilterCriteria::new(Language::Fr, RegionFilter::Int);
        assert!(filter(CATALOG, &criteria).is_empty());
    }

    #[test]
    fn related_excludes_focal_and_respects_limit() {
        let all: Vec<&NewsItem> = CATALOG.iter().collect();
        for focal in CATALOG {
            for limit in 0..=CATALOG.len() {
                let result = related(focal, &all, limit);
                assert!(result.len() <= limit);
                assert!(result.iter().all(|i| i.id != focal.id));
                assert!(result.iter().all(|i| i.shares_topic_with(focal)));
            }
        }
    }

    #[test]
    fn related_keeps_candidate_order_and_stops_at_limit() {
        let all: Vec<&NewsItem> = CATALOG.iter().collect();
        let tesla = &CATALOG[3];
        assert_eq!(
            titles(&related(tesla, &all, 3)),
            vec![
                "Apple dévoile son nouveau casque de réalité mixte",
                "Blockchain technology transforms supply chains",
                "Global markets rally as inflation cools",
            ]
        );
        assert_eq!(titles(&related(tesla, &all, 1)), vec!["Apple dévoile son nouveau casque de réalité mixte"]);
    }

    #[test]
    fn identical_fields_with_different_id_are_distinct() {
        let original = CATALOG[3];
        let twin = NewsItem { id: crate::consts::ItemId(99), ..original };
        let candidates = vec![&original, &twin];
        assert_eq!(related(&original, &candidates, 3).len(), 1);
        assert_eq!(related(&original, &candidates, 3)[0].id, twin.id);
        assert_eq!(related(&twin, &candidates, 3)[0].id, original.id);
    }

    #[test]
    fn respond_lists_quoted_titles() {
        let criteria = FilterCriteria::new(Language::En, RegionFilter::Int);
        let results = filter(CATALOG, &criteria);
        let reply = respond("Pourquoi ?", &CATALOG[3], &results);
        assert_eq!(
            reply,
            "Voici d'autres articles qui pourraient vous intéresser : \
             « Blockchain technology transforms supply chains » ; \
             « Global markets rally as inflation cools »."
        );
    }

    #[test]
    fn respond_nothing_found_iff_related_empty() {
        let all: Vec<&NewsItem> = CATALOG.iter().collect();
        for criteria in all_criteria() {
            let results = filter(CATALOG, &criteria);
            for focal in &results {
                let reply = respond("", focal, &results);
                let empty = related(focal, &results, limits::RELATED_LIMIT).is_empty();
                assert_eq!(reply == replies::NOTHING_FOUND, empty);
            }
        }
        let headset = &CATALOG[0];
        assert_eq!(respond("?", headset, &[headset]), replies::NOTHING_FOUND);
        assert_ne!(respond("?", headset, &all), replies::NOTHING_FOUND);
    }

    #[test]
    fn respond_ignores_query_text() {
        let all: Vec<&NewsItem> = CATALOG.iter().collect();
        let focal = &CATALOG[4];
        assert_eq!(respond("a", focal, &all), respond("something else entirely", focal, &all));
    }

    #[test]
    fn region_filter_codes_parse() {
        for region in RegionFilter::ALL {
            assert_eq!(region.code().parse::<RegionFilter>(), Ok(region));
        }
        assert!("eu".parse::<RegionFilter>().is_err());
        assert_eq!(RegionFilter::default(), RegionFilter::Both);
    }
}
