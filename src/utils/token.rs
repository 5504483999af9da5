//! Tokenization and n-gram utilities
//!
//! Every metric in this crate sees a text the same way: lower-cased and split on whitespace.

use std::collections::{HashMap, HashSet};

/// An n-gram, borrowed from the [TokenSequence] it was cut from.
pub type NGram<'a> = &'a [String];

/// Ordered, case-folded whitespace tokens of a text. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[readonly::make]
pub struct TokenSequence {
    /// The tokens. read-only.
    #[readonly]
    pub tokens: Vec<String>,
}

impl TokenSequence {
    /// Tokenize a text: lower-case, then split on any whitespace.
    ///
    /// # Example
    /// ```
    /// use textmetrics::utils::token::TokenSequence;
    /// let tokens = TokenSequence::from_text("The  Cat\tsat");
    /// assert_eq!(tokens.tokens, vec!["the", "cat", "sat"]);
    /// ```
    pub fn from_text(text: &str) -> Self {
        Self {
            tokens: text.to_lowercase().split_whitespace().map(str::to_string).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All contiguous windows of `n` tokens. Empty when `n` is 0 or longer than the sequence.
    pub fn ngrams(&self, n: usize) -> impl Iterator<Item=NGram<'_>> {
        // `windows` panics on 0
        if n == 0 {
            self.tokens[..0].windows(1)
        } else {
            self.tokens.windows(n)
        }
    }

    /// Multiset of the `n`-grams with their occurrence counts.
    pub fn ngram_counts(&self, n: usize) -> NGramCount<'_> {
        let mut counts = HashMap::new();
        self.ngrams(n).for_each(|gram| *counts.entry(gram).or_insert(0) += 1);
        NGramCount { counts }
    }

    /// Set of distinct `n`-grams.
    pub fn ngram_set(&self, n: usize) -> HashSet<NGram<'_>> {
        self.ngrams(n).collect()
    }

    /// Set of distinct tokens.
    pub fn token_set(&self) -> HashSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }
}

/// Occurrence count of each n-gram within one text.
#[derive(Debug, Clone, Default)]
pub struct NGramCount<'a> {
    counts: HashMap<NGram<'a>, usize>,
}

impl<'a> NGramCount<'a> {
    /// Total number of n-grams, counting repetitions.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `gram`, 0 if absent.
    pub fn count(&self, gram: NGram<'_>) -> usize {
        self.counts.get(gram).copied().unwrap_or(0)
    }

    /// Clipped overlap: every n-gram of `self` counts at most as often as it occurs in `other`.
    pub fn clipped_overlap(&self, other: &NGramCount<'_>) -> usize {
        self.counts
            .iter()
            .map(|(gram, &count)| count.min(other.count(gram)))
            .sum()
    }
}

/// Length of the longest common (not necessarily contiguous) subsequence of two token slices.
///
/// Classic `O(m*n)` dynamic programming, keeping only two rows of the table.
pub fn lcs_length<T: PartialEq>(seq1: &[T], seq2: &[T]) -> usize {
    if seq1.is_empty() || seq2.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; seq2.len() + 1];
    let mut curr = vec![0usize; seq2.len() + 1];
    for a in seq1 {
        for (j, b) in seq2.iter().enumerate() {
            curr[j + 1] = if a == b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[seq2.len()]
}
