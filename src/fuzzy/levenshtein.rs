// File: src/fuzzy/levenshtein.rs
use crate::core::types::MatchCandidate;
use crate::learning::HistoryTracker;

pub const DEFAULT_HISTORY_BOOST: u32 = 20;

const BASE_SCORE: i64 = 100;
const DISTANCE_PENALTY: i64 = 10;
const LENGTH_PENALTY: i64 = 2;
const PREFIX_BONUS: i64 = 5;

/// Classic edit distance: insertion, deletion and substitution each cost 1.
///
/// Fills a `(|b|+1) x (|a|+1)` table over Unicode scalar values.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, cell) in table[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in table.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=b.len() {
        for i in 1..=a.len() {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[j][i] = (table[j][i - 1] + 1) // insertion
                .min(table[j - 1][i] + 1) // deletion
                .min(table[j - 1][i - 1] + substitution);
        }
    }

    table[b.len()][a.len()]
}

pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Largest distance accepted for an input of `input_len` characters:
/// `max(2, floor(0.4 * len))`.
pub fn max_accepted_distance(input_len: usize) -> usize {
    (input_len * 2 / 5).max(2)
}

/// Scores dictionary words against an input, with a boost for words the user
/// has accepted before.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    history_boost: u32,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_BOOST)
    }
}

impl FuzzyMatcher {
    pub fn new(history_boost: u32) -> Self {
        Self { history_boost }
    }

    /// `100 - 10*distance - 2*|len diff| + 5*common prefix`, plus the history
    /// boost, floored at zero. `input` is expected lowercased already.
    pub fn score(&self, input: &str, candidate: &str, history: &HistoryTracker) -> u32 {
        let candidate = candidate.to_lowercase();
        self.score_with_distance(input, &candidate, distance(input, &candidate), history)
    }

    fn score_with_distance(
        &self,
        input: &str,
        candidate: &str,
        edit_distance: usize,
        history: &HistoryTracker,
    ) -> u32 {
        let length_diff = input.chars().count().abs_diff(candidate.chars().count());
        let prefix = common_prefix_len(input, candidate);

        let mut score = BASE_SCORE - DISTANCE_PENALTY * edit_distance as i64
            - LENGTH_PENALTY * length_diff as i64
            + PREFIX_BONUS * prefix as i64;
        if history.contains(candidate) {
            score += i64::from(self.history_boost);
        }
        score.clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Every word within the acceptance budget, best score first. Ties keep
    /// the order of `words`.
    pub fn rank<'a, I>(&self, input: &str, words: I, history: &HistoryTracker) -> Vec<MatchCandidate>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let budget = max_accepted_distance(input.chars().count());
        let mut matches: Vec<MatchCandidate> = words
            .into_iter()
            .filter_map(|word| {
                let edit_distance = distance(input, word);
                (edit_distance <= budget).then(|| MatchCandidate {
                    word: word.clone(),
                    edit_distance,
                    score: self.score_with_distance(input, word, edit_distance, history),
                })
            })
            .collect();
        // sort_by is stable
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn kitten_sitting() {
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn distance_edges() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("helo", "hello"), 1);
        assert_eq!(distance("ab", "ba"), 2);
    }

    #[test]
    fn budget_grows_with_length() {
        assert_eq!(max_accepted_distance(0), 2);
        assert_eq!(max_accepted_distance(4), 2);
        assert_eq!(max_accepted_distance(7), 2);
        assert_eq!(max_accepted_distance(8), 3);
        assert_eq!(max_accepted_distance(10), 4);
    }

    #[test]
    fn score_formula() {
        let matcher = FuzzyMatcher::default();
        let history = HistoryTracker::default();
        // distance 1, length diff 1, common prefix "hel" (3)
        assert_eq!(matcher.score("helo", "hello", &history), 100 - 10 - 2 + 15);
        assert_eq!(matcher.score("hello", "hello", &history), 100 + 25);
    }

    #[test]
    fn score_floors_at_zero() {
        let matcher = FuzzyMatcher::default();
        let history = HistoryTracker::default();
        assert_eq!(matcher.score("a", "communication", &history), 0);
    }

    #[test]
    fn history_adds_exact_boost() {
        let matcher = FuzzyMatcher::default();
        let mut history = HistoryTracker::default();
        let before = matcher.score("cat", "bat", &history);
        let other = matcher.score("cat", "hat", &history);
        assert_eq!(before, other);

        history.record("Bat");
        assert_eq!(matcher.score("cat", "bat", &history), before + 20);
        assert_eq!(matcher.score("cat", "hat", &history), other);
    }

    #[test]
    fn rank_filters_and_keeps_ties_in_order() {
        let matcher = FuzzyMatcher::default();
        let history = HistoryTracker::default();
        let words: Vec<String> = ["hat", "bat", "keyboard", "cat"].iter().map(|s| s.to_string()).collect();
        let ranked = matcher.rank("cat", &words, &history);
        let names: Vec<_> = ranked.iter().map(|m| m.word.as_str()).collect();
        assert_eq!(names, vec!["cat", "hat", "bat"]);
        assert_eq!(ranked[0].edit_distance, 0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in "[a-e]{0,8}", b in "[a-e]{0,8}") {
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }

        #[test]
        fn distance_to_self_is_zero(a in "\\PC{0,10}") {
            prop_assert_eq!(distance(&a, &a), 0);
        }
    }
}
