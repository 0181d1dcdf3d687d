//! Ranked stop-group suggestions for free-text queries.
//!
//! Matching happens on normalized text (see [`normalize`]); candidates
//! are scored through a fixed ladder of tiers and the first tier that
//! hits decides the score. Fuzzy tiers tolerate typos up to 30% of the
//! query length.

mod distance;
mod normalize;

pub use distance::levenshtein;
pub use normalize::{fold_diacritics, normalize};

use std::cmp::Reverse;

use itertools::Itertools;

use crate::models::stops::StopGroup;

/// Default number of suggestions handed to the UI.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

const SCORE_EXACT: u32 = 100;
const SCORE_PREFIX: u32 = 95;
const SCORE_WORD_PREFIX: u32 = 90;
const SCORE_SUBSTRING: u32 = 70;
const FUZZY_FULL_BASE: u32 = 50;
const FUZZY_FULL_STEP: u32 = 8;
const FUZZY_WORD_BASE: u32 = 45;
const FUZZY_WORD_STEP: u32 = 7;

/// Relevance of one candidate name for a query; zero means "exclude".
///
/// Tier order: exact equality, prefix, word prefix, substring, fuzzy
/// against the whole name, fuzzy against individual words. Word tiers
/// split the *original* name (whitespace/hyphen/dot) and normalize each
/// word independently, so "sw" still fronts "Św. Marcin".
pub fn relevance_score(name: &str, query: &str) -> u32 {
    let name_norm = normalize(name);
    let query_norm = normalize(query);

    if name_norm == query_norm {
        return SCORE_EXACT;
    }
    if name_norm.starts_with(&query_norm) {
        return SCORE_PREFIX;
    }

    let word_norms: Vec<String> = normalize::words(name).map(normalize).collect();
    if word_norms.iter().any(|word| word.starts_with(&query_norm)) {
        return SCORE_WORD_PREFIX;
    }

    if name_norm.contains(&query_norm) {
        return SCORE_SUBSTRING;
    }

    let max_distance = fuzzy_threshold(query_norm.len());
    let full = levenshtein(&query_norm, &name_norm);
    if full <= max_distance {
        return FUZZY_FULL_BASE.saturating_sub(full as u32 * FUZZY_FULL_STEP);
    }

    for word in &word_norms {
        let d = levenshtein(&query_norm, word);
        if d <= max_distance {
            return FUZZY_WORD_BASE.saturating_sub(d as u32 * FUZZY_WORD_STEP);
        }
    }

    0
}

/// Edit budget for the fuzzy tiers: 30% of the query, rounded up, never
/// below one.
fn fuzzy_threshold(query_len: usize) -> usize {
    ((query_len as f64 * 0.3).ceil() as usize).max(1)
}

/// Rank stop groups against a query, best first.
///
/// Blank queries return nothing without touching the candidate list.
/// Ties keep the input order; the backend sends groups alphabetically and
/// that order reads well untouched.
pub fn suggest<'a>(query: &str, groups: &'a [StopGroup], limit: usize) -> Vec<&'a StopGroup> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    groups
        .iter()
        .map(|group| (group, relevance_score(&group.group_name, query)))
        .filter(|(_, score)| *score > 0)
        .sorted_by_key(|(_, score)| Reverse(*score))
        .take(limit)
        .map(|(group, _)| group)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::GroupCode;

    fn group(code: &str, name: &str) -> StopGroup {
        StopGroup {
            group_code: GroupCode::new(code),
            group_name: name.into(),
            lat: 52.4,
            lon: 16.9,
        }
    }

    fn poznan_groups() -> Vec<StopGroup> {
        vec![
            group("MT", "Most Teatralny"),
            group("KAP", "Rondo Kaponiera"),
            group("SJ", "Świętego Józefa"),
            group("PW", "Plac Wolności"),
            group("SM", "Św. Marcin"),
            group("OG", "Ogrody"),
        ]
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let groups = poznan_groups();
        assert!(suggest("", &groups, 8).is_empty());
        assert!(suggest("   ", &groups, 8).is_empty());
    }

    #[test]
    fn test_alias_and_diacritics_reach_word_prefix_tier() {
        // "sw jozefa" and "Świętego Józefa" normalize identically, so
        // this lands in the top three tiers (here: exact).
        let score = relevance_score("Świętego Józefa", "sw jozefa");
        assert!(score >= SCORE_WORD_PREFIX, "score was {score}");
    }

    #[test]
    fn test_exact_outranks_prefix() {
        let exact = relevance_score("Ogrody", "ogrody");
        let prefix = relevance_score("Ogrody Zachodnie", "ogrody");
        assert_eq!(exact, SCORE_EXACT);
        assert_eq!(prefix, SCORE_PREFIX);
        assert!(exact > prefix);
    }

    #[test]
    fn test_word_prefix_tier() {
        // Query fronts the second word only.
        assert_eq!(relevance_score("Most Teatralny", "teatr"), SCORE_WORD_PREFIX);
    }

    #[test]
    fn test_substring_tier() {
        // "ondo" sits inside "rondokaponiera" without fronting any word.
        assert_eq!(relevance_score("Rondo Kaponiera", "ondo"), SCORE_SUBSTRING);
    }

    #[test]
    fn test_fuzzy_word_tier_catches_typos() {
        // "kaponira" is one edit from "kaponiera": too far for the whole
        // name, close enough for the word tier.
        let score = relevance_score("Rondo Kaponiera", "kaponira");
        assert_eq!(score, FUZZY_WORD_BASE - FUZZY_WORD_STEP);
    }

    #[test]
    fn test_hopeless_queries_score_zero() {
        assert_eq!(relevance_score("Most Teatralny", "xyzzy"), 0);
    }

    #[test]
    fn test_suggest_ranks_and_caps() {
        let groups = poznan_groups();

        let top = suggest("sw", &groups, 8);
        assert!(!top.is_empty());

        let capped = suggest("o", &groups, 2);
        assert!(capped.len() <= 2);
    }

    #[test]
    fn test_suggest_prefers_exact_name() {
        let groups = vec![group("OGZ", "Ogrody Zachodnie"), group("OG", "Ogrody")];
        let top = suggest("ogrody", &groups, 8);

        assert_eq!(top[0].group_code, GroupCode::new("OG"));
        assert_eq!(top[1].group_code, GroupCode::new("OGZ"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let groups = vec![
            group("A", "Dworzec Zachodni"),
            group("B", "Dworzec Główny"),
            group("C", "Dworzec Letni"),
        ];
        // All three match "dworzec" at the same tier.
        let top = suggest("dworzec", &groups, 8);

        let codes: Vec<&str> = top.iter().map(|g| g.group_code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_fuzzy_threshold_floors_at_one() {
        assert_eq!(fuzzy_threshold(1), 1);
        assert_eq!(fuzzy_threshold(3), 1);
        assert_eq!(fuzzy_threshold(4), 2);
        assert_eq!(fuzzy_threshold(10), 3);
    }
}
