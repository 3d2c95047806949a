//! Fuzzy text matching for interactive filtering.
//!
//! Scores a free-text query against an item's text with a mix of word-level
//! rules (exact, prefix, substring, initial letter, edit distance) and a
//! whole-string subsequence bonus. A query only needs one strongly matching
//! word to rank an item highly.
//!
//! ```
//! use clubdir_search::fuzzy::{score, search};
//!
//! let clubs = ["Robotics Club", "Chess Club", "Film Society"];
//! assert_eq!(score("Robotics Club", "robotics club"), 1.0);
//!
//! let hits = search(&clubs, "film", |c| *c);
//! assert_eq!(hits, vec![&"Film Society"]);
//! ```

use serde::Serialize;

/// Items must score strictly above this to be returned by [`search`].
pub const DEFAULT_THRESHOLD: f64 = 0.1;

const EXACT_WORD: f64 = 1.0;
const PREFIX_WORD: f64 = 0.9;
const CONTAINS_WORD: f64 = 0.8;
const INITIAL_LETTER: f64 = 0.7;
const CONTAINED_IN_TEXT: f64 = 0.7;
/// Query words up to this many chars get the initial-letter rule.
const INITIAL_LETTER_MAX_LEN: usize = 5;
const EDIT_SIMILARITY_FLOOR: f64 = 0.5;
const EDIT_WEIGHT: f64 = 0.6;
const SUBSEQUENCE_WEIGHT: f64 = 0.5;

/// An item paired with its score against the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scored<T> {
    pub item: T,
    pub score: f64,
}

/// Similarity of `text` to `query` in [0, 1]. Case-insensitive.
///
/// A blank query scores 1.0: no query matches everything.
pub fn score(text: &str, query: &str) -> f64 {
    if query.trim().is_empty() {
        return 1.0;
    }

    let text = text.to_lowercase();
    let query = query.to_lowercase();

    if text == query {
        return 1.0;
    }

    let text_words: Vec<&str> = text.split_whitespace().collect();

    let mut best = 0.0_f64;
    for query_word in query.split_whitespace() {
        let mut word_best = text_words
            .iter()
            .map(|text_word| word_score(text_word, query_word))
            .fold(0.0, f64::max);

        if text.contains(query_word) {
            word_best = word_best.max(CONTAINED_IN_TEXT);
        }

        best = best.max(word_best);
    }

    best.max(subsequence_score(&text, &query))
}

/// Score one text word against one query word; both already lower-cased.
fn word_score(text_word: &str, query_word: &str) -> f64 {
    if text_word == query_word {
        return EXACT_WORD;
    }
    if text_word.starts_with(query_word) {
        return PREFIX_WORD;
    }
    if text_word.contains(query_word) {
        return CONTAINS_WORD;
    }

    // Short queries are often acronyms: "acm" for "association ..."
    if let Some(initial) = query_word.chars().next() {
        if query_word.chars().count() <= INITIAL_LETTER_MAX_LEN && text_word.starts_with(initial) {
            return INITIAL_LETTER;
        }
    }

    let max_len = text_word.chars().count().max(query_word.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let distance = strsim::levenshtein(text_word, query_word);
    let similarity = 1.0 - distance as f64 / max_len as f64;
    if similarity > EDIT_SIMILARITY_FLOOR {
        similarity * EDIT_WEIGHT
    } else {
        0.0
    }
}

/// Bonus when every char of `query` appears in `text` in order, scaled by
/// how much of the text the query covers.
fn subsequence_score(text: &str, query: &str) -> f64 {
    let query_chars: Vec<char> = query.chars().collect();
    let mut next = 0;
    let mut text_len = 0usize;

    for c in text.chars() {
        text_len += 1;
        if next < query_chars.len() && c == query_chars[next] {
            next += 1;
        }
    }

    if next == query_chars.len() && text_len > 0 {
        SUBSEQUENCE_WEIGHT * (query_chars.len() as f64 / text_len as f64)
    } else {
        0.0
    }
}

/// Whether `text` scores above `threshold` against `query`.
pub fn is_match(text: &str, query: &str, threshold: f64) -> bool {
    score(text, query) > threshold
}

/// Items scoring above [`DEFAULT_THRESHOLD`], best first.
///
/// A blank query returns every item in its original order.
pub fn search<'a, T, F, S>(items: &'a [T], query: &str, extract: F) -> Vec<&'a T>
where
    F: Fn(&'a T) -> S,
    S: AsRef<str>,
{
    search_with_threshold(items, query, extract, DEFAULT_THRESHOLD)
}

pub fn search_with_threshold<'a, T, F, S>(
    items: &'a [T],
    query: &str,
    extract: F,
    threshold: f64,
) -> Vec<&'a T>
where
    F: Fn(&'a T) -> S,
    S: AsRef<str>,
{
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    search_scored(items, query, extract, threshold)
        .into_iter()
        .map(|s| s.item)
        .collect()
}

/// Like [`search_with_threshold`] but keeps the scores.
///
/// Ties keep input order. A blank query scores every item 1.0 and keeps
/// them all in input order.
pub fn search_scored<'a, T, F, S>(
    items: &'a [T],
    query: &str,
    extract: F,
    threshold: f64,
) -> Vec<Scored<&'a T>>
where
    F: Fn(&'a T) -> S,
    S: AsRef<str>,
{
    if query.trim().is_empty() {
        return items.iter().map(|item| Scored { item, score: 1.0 }).collect();
    }

    let mut scored: Vec<Scored<&'a T>> = items
        .iter()
        .map(|item| Scored {
            item,
            score: score(extract(item).as_ref(), query),
        })
        .filter(|s| s.score > threshold)
        .collect();

    // sort_by is stable, equal scores keep their input order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn exact_full_match() {
        assert_eq!(score("Robotics Club", "robotics club"), 1.0);
        assert_eq!(score("ACM", "acm"), 1.0);
    }

    #[test]
    fn blank_query_scores_one() {
        assert_eq!(score("anything", ""), 1.0);
        assert_eq!(score("anything", "   "), 1.0);
    }

    #[test]
    fn word_rules() {
        assert_eq!(word_score("robotics", "robotics"), EXACT_WORD);
        assert_eq!(word_score("robotics", "robo"), PREFIX_WORD);
        assert_eq!(word_score("microbiology", "bio"), CONTAINS_WORD);
        assert_eq!(word_score("association", "acm"), INITIAL_LETTER);
    }

    #[test]
    fn initial_letter_only_for_short_queries() {
        // six chars: too long for the initial-letter rule, edit distance too far
        assert_eq!(word_score("association", "abcdef"), 0.0);
    }

    #[test]
    fn edit_distance_rule() {
        // one substitution in eight chars
        let s = word_score("robotics", "rxbotics");
        assert!(approx(s, (1.0 - 1.0 / 8.0) * EDIT_WEIGHT), "{s}");

        // half or less similar contributes nothing
        assert_eq!(word_score("chess", "xxxxxx"), 0.0);
    }

    #[test]
    fn best_query_word_wins() {
        // "zzzzzz" scores nothing, "club" is exact
        assert_eq!(score("Chess Club", "zzzzzz club"), 1.0);
    }

    #[test]
    fn substring_of_a_word() {
        assert_eq!(score("E-Cell Startup Hub", "cell"), CONTAINS_WORD);
    }

    #[test]
    fn acronym_query() {
        let s = score("Robotics Club", "RC");
        assert!(s > DEFAULT_THRESHOLD);
        assert_eq!(s, INITIAL_LETTER);
    }

    #[test]
    fn subsequence_bonus() {
        assert!(approx(subsequence_score("robotics club", "rc"), 0.5 * 2.0 / 13.0));
        assert_eq!(subsequence_score("chess", "xyz"), 0.0);
        assert_eq!(subsequence_score("", "a"), 0.0);
    }

    #[test]
    fn subsequence_when_no_word_rule_fires() {
        // six-char query: no initial-letter rule, edit similarity exactly 0.5
        assert!(approx(score("abcdefghijkl", "bdfhjl"), 0.25));
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(score("", "chess"), 0.0);
        assert_eq!(score("   ", "chess"), 0.0);
    }

    #[test]
    fn non_ascii_case_folding() {
        assert_eq!(score("ÉCOLE DE DANSE", "école de danse"), 1.0);
        assert_eq!(word_score("société", "soc"), PREFIX_WORD);
    }

    #[test]
    fn is_match_uses_strict_threshold() {
        assert!(is_match("Chess Club", "chess", DEFAULT_THRESHOLD));
        assert!(!is_match("Chess Club", "chess", 1.0));
        assert!(!is_match("Chess", "xyzxyz", DEFAULT_THRESHOLD));
    }

    #[test]
    fn search_ranks_exact_first() {
        let items = ["Robotics Club", "Robotics and AI Society", "Chess Club"];
        let scored = search_scored(&items, "Robotics Club", |s| *s, DEFAULT_THRESHOLD);
        assert_eq!(*scored[0].item, "Robotics Club");
        assert_eq!(scored[0].score, 1.0);
    }

    #[test]
    fn search_filters_below_threshold() {
        let items = ["Chess Club", "Quiz Society", "Film Society"];
        let hits = search(&items, "film", |s| *s);
        assert_eq!(hits, vec![&"Film Society"]);
    }

    #[test]
    fn search_blank_query_returns_everything() {
        let items = ["b", "a", "c"];
        let hits = search(&items, "  ", |s| *s);
        assert_eq!(hits, vec![&"b", &"a", &"c"]);
    }

    #[test]
    fn search_with_owned_text() {
        struct Club {
            name: &'static str,
            tags: Vec<&'static str>,
        }
        let items = vec![
            Club { name: "Chess Club", tags: vec!["sports"] },
            Club { name: "Dance Club", tags: vec!["culture", "music"] },
        ];
        let hits = search(&items, "music", |c| format!("{} {}", c.name, c.tags.join(" ")));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Dance Club");
    }

    #[test]
    fn search_empty_items() {
        let items: [&str; 0] = [];
        assert!(search(&items, "chess", |s| *s).is_empty());
        assert!(search(&items, "", |s| *s).is_empty());
    }
}
