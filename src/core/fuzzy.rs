//! Fuzzy matching of theme labels.

use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};

/// Fuzzy matcher wrapping nucleo-matcher.
///
/// Reuses internal buffers across calls.
pub struct FuzzyMatcher {
    matcher: Matcher,
    buf: Vec<char>,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyMatcher").finish_non_exhaustive()
    }
}

impl FuzzyMatcher {
    /// Create a matcher.
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::with_capacity(64),
        }
    }

    /// Indices of `labels` that match `query`, best first.
    ///
    /// An empty query matches everything in original order. Equal scores keep
    /// their original relative order.
    pub fn rank<S: AsRef<str>>(&mut self, query: &str, labels: &[S]) -> Vec<usize> {
        if query.trim().is_empty() {
            return (0..labels.len()).collect();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut scored: Vec<(usize, u32)> = labels
            .iter()
            .enumerate()
            .filter_map(|(idx, label)| {
                self.buf.clear();
                let haystack = Utf32Str::new(label.as_ref(), &mut self.buf);
                pattern
                    .score(haystack, &mut self.matcher)
                    .map(|score| (idx, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }

    /// Index of the label that best matches `query`.
    ///
    /// A case-insensitive exact match always wins.
    pub fn best_match<S: AsRef<str>>(&mut self, query: &str, labels: &[S]) -> Option<usize> {
        if query.trim().is_empty() {
            return None;
        }
        labels
            .iter()
            .position(|label| label.as_ref().eq_ignore_ascii_case(query.trim()))
            .or_else(|| self.rank(query, labels).first().copied())
    }
}
