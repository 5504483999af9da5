//! # Scorers
//! Every scorer compares a `candidate` text against a `reference` text and returns a score in `[0, 1]`,
//! where 1 means a perfect match.
//!
//! Scoring is total: empty texts, texts without shared tokens and texts shorter than an n-gram window all
//! get a defined score of `0.0` instead of an error. Only a bad configuration, like an n-gram order of 0,
//! is rejected, and that happens when the scorer is constructed.
//!
//! ## Scorers
//! * [Bleu]: clipped n-gram precision, geometric mean over orders `1..=max_n`, with brevity penalty.
//! * [RougeN]: recall of the distinct reference n-grams. Note that it uses plain set overlap, not the
//!   clipped multiset overlap of [Bleu].
//! * [RougeL]: F1 of the longest common token subsequence.
//! * [Similarity]: set similarity of the two token sets, see [SimilarityMethod].
//!
//! Anything implementing [Score] can be used as a scorer, including closures.

use crate::metric::{Metric, RougeVariant, SimilarityMethod};
use crate::metric::errors::InvalidNGramOrder;
use crate::utils::token::{lcs_length, TokenSequence};

/// Trait for scoring a candidate text against a reference text.
pub trait Score {
    fn score(&self, reference: &str, candidate: &str) -> f64;
}

/// Blanket impl of Score for Fn(&str, &str) -> f64.
impl<F> Score for F where F: Fn(&str, &str) -> f64 {
    fn score(&self, reference: &str, candidate: &str) -> f64 {
        self(reference, candidate)
    }
}

#[inline]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[inline]
fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * (precision * recall) / (precision + recall)
    }
}

/// BLEU-style score: geometric mean of clipped n-gram precisions times a brevity penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[readonly::make]
pub struct Bleu {
    /// The largest n-gram order. read-only.
    #[readonly]
    pub max_n: usize,
}

impl Default for Bleu {
    fn default() -> Self {
        Self { max_n: 4 }
    }
}

impl Bleu {
    /// Create a BLEU scorer over n-gram orders `1..=max_n`. Returns an error if `max_n` is 0.
    pub fn new(max_n: usize) -> Result<Self, InvalidNGramOrder> {
        if max_n == 0 {
            Err(InvalidNGramOrder { order: max_n })
        } else {
            Ok(Self { max_n })
        }
    }

    /// Clipped precision of each order `1..=max_n`. An order for which the candidate has no n-gram gets 0.
    pub fn precisions(&self, reference: &TokenSequence, candidate: &TokenSequence) -> Vec<f64> {
        (1..=self.max_n)
            .map(|n| {
                let cand_counts = candidate.ngram_counts(n);
                if cand_counts.is_empty() {
                    return 0.0;
                }
                let ref_counts = reference.ngram_counts(n);
                ratio(cand_counts.clipped_overlap(&ref_counts), cand_counts.total())
            })
            .collect()
    }

    /// `exp(1 - ref_len / cand_len)` when the candidate is shorter than the reference, 1 otherwise, 0 for an empty candidate.
    pub fn brevity_penalty(ref_len: usize, cand_len: usize) -> f64 {
        if cand_len == 0 {
            return 0.0;
        }
        if cand_len < ref_len {
            (1.0 - ref_len as f64 / cand_len as f64).exp()
        } else {
            1.0
        }
    }

    fn score_tokens(&self, reference: &TokenSequence, candidate: &TokenSequence) -> f64 {
        if candidate.is_empty() {
            return 0.0;
        }
        let precisions = self.precisions(reference, candidate);
        // log(0) is undefined, and any zero order zeroes the geometric mean anyway
        if precisions.iter().any(|&p| p == 0.0) {
            return 0.0;
        }
        let log_mean = precisions.iter().map(|p| p.ln()).sum::<f64>() / precisions.len() as f64;
        let score = log_mean.exp() * Self::brevity_penalty(reference.len(), candidate.len());
        score.clamp(0.0, 1.0)
    }
}

impl Score for Bleu {
    fn score(&self, reference: &str, candidate: &str) -> f64 {
        self.score_tokens(&TokenSequence::from_text(reference), &TokenSequence::from_text(candidate))
    }
}

/// ROUGE-N-style score: share of the distinct reference n-grams that also appear in the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[readonly::make]
pub struct RougeN {
    /// The n-gram order. read-only.
    #[readonly]
    pub order: usize,
}

impl RougeN {
    pub const UNIGRAM: RougeN = RougeN { order: 1 };
    pub const BIGRAM: RougeN = RougeN { order: 2 };

    /// Returns an error if `order` is 0.
    pub fn new(order: usize) -> Result<Self, InvalidNGramOrder> {
        if order == 0 {
            Err(InvalidNGramOrder { order })
        } else {
            Ok(Self { order })
        }
    }
}

impl Score for RougeN {
    fn score(&self, reference: &str, candidate: &str) -> f64 {
        let reference = TokenSequence::from_text(reference);
        let candidate = TokenSequence::from_text(candidate);
        let ref_set = reference.ngram_set(self.order);
        let cand_set = candidate.ngram_set(self.order);
        ratio(ref_set.intersection(&cand_set).count(), ref_set.len())
    }
}

/// Precision, recall and F1 of a [RougeL] comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LcsComponents {
    pub lcs_len: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// ROUGE-L-style score: F1 of the longest common token subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RougeL;

impl RougeL {
    /// Precision is `lcs / candidate length`, recall is `lcs / reference length`.
    /// All components are 0 when the candidate is empty.
    pub fn components(&self, reference: &str, candidate: &str) -> LcsComponents {
        let reference = TokenSequence::from_text(reference);
        let candidate = TokenSequence::from_text(candidate);
        if candidate.is_empty() {
            return LcsComponents::default();
        }
        let lcs_len = lcs_length(&reference.tokens, &candidate.tokens);
        let precision = ratio(lcs_len, candidate.len());
        let recall = ratio(lcs_len, reference.len());
        LcsComponents {
            lcs_len,
            precision,
            recall,
            f1: harmonic_mean(precision, recall).clamp(0.0, 1.0),
        }
    }
}

impl Score for RougeL {
    fn score(&self, reference: &str, candidate: &str) -> f64 {
        self.components(reference, candidate).f1
    }
}

/// Set similarity of the token sets of two texts. Symmetric for every method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Similarity {
    pub method: SimilarityMethod,
}

impl Similarity {
    pub fn new(method: SimilarityMethod) -> Self {
        Self { method }
    }

    pub fn similarity(&self, text1: &str, text2: &str) -> f64 {
        let tokens1 = TokenSequence::from_text(text1);
        let tokens2 = TokenSequence::from_text(text2);
        let set1 = tokens1.token_set();
        let set2 = tokens2.token_set();
        let intersection = set1.intersection(&set2).count();
        let score = match self.method {
            SimilarityMethod::Jaccard => ratio(intersection, set1.union(&set2).count()),
            SimilarityMethod::Overlap => ratio(intersection, set1.len().min(set2.len())),
            SimilarityMethod::Cosine => {
                // binary indicator vectors: dot = |A∩B|, magnitudes = sqrt(|A|), sqrt(|B|)
                let magnitude = (set1.len() as f64 * set2.len() as f64).sqrt();
                if magnitude == 0.0 {
                    0.0
                } else {
                    intersection as f64 / magnitude
                }
            }
        };
        score.clamp(0.0, 1.0)
    }
}

impl Score for Similarity {
    fn score(&self, reference: &str, candidate: &str) -> f64 {
        self.similarity(reference, candidate)
    }
}

/// A [Metric] bound to its parameters, dispatching to the matching scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricScorer {
    pub metric: Metric,
    pub bleu: Bleu,
    pub similarity: Similarity,
}

impl MetricScorer {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            bleu: Bleu::default(),
            similarity: Similarity::default(),
        }
    }

    pub fn with_params(metric: Metric, bleu: Bleu, similarity_method: SimilarityMethod) -> Self {
        Self {
            metric,
            bleu,
            similarity: Similarity::new(similarity_method),
        }
    }
}

impl From<Metric> for MetricScorer {
    fn from(metric: Metric) -> Self {
        Self::new(metric)
    }
}

impl Score for MetricScorer {
    fn score(&self, reference: &str, candidate: &str) -> f64 {
        match self.metric {
            Metric::Bleu => self.bleu.score(reference, candidate),
            Metric::Rouge1 => RougeN::UNIGRAM.score(reference, candidate),
            Metric::Rouge2 => RougeN::BIGRAM.score(reference, candidate),
            Metric::RougeL => RougeL.score(reference, candidate),
            Metric::Similarity => self.similarity.score(reference, candidate),
        }
    }
}

/// Calculate a BLEU score over n-gram orders `1..=max_n`.
///
/// # Example
/// ```
/// use textmetrics::scorer::calculate_bleu;
/// let score = calculate_bleu("the cat sat on the mat", "the cat sat on the mat", 4).unwrap();
/// assert_eq!(score, 1.0);
/// assert!(calculate_bleu("the cat", "the cat", 0).is_err());
/// ```
pub fn calculate_bleu(reference: &str, candidate: &str, max_n: usize) -> Result<f64, InvalidNGramOrder> {
    Bleu::new(max_n).map(|bleu| bleu.score(reference, candidate))
}

/// Calculate a ROUGE score.
///
/// # Example
/// ```
/// use textmetrics::metric::RougeVariant;
/// use textmetrics::scorer::calculate_rouge;
/// let score = calculate_rouge("the cat sat", "the dog sat", RougeVariant::Rouge1);
/// assert!((score - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn calculate_rouge(reference: &str, candidate: &str, variant: RougeVariant) -> f64 {
    match variant {
        RougeVariant::Rouge1 => RougeN::UNIGRAM.score(reference, candidate),
        RougeVariant::Rouge2 => RougeN::BIGRAM.score(reference, candidate),
        RougeVariant::RougeL => RougeL.score(reference, candidate),
    }
}

/// Calculate the set similarity of two texts.
///
/// # Example
/// ```
/// use textmetrics::metric::SimilarityMethod;
/// use textmetrics::scorer::calculate_similarity;
/// assert_eq!(calculate_similarity("a b c", "b c d", SimilarityMethod::Jaccard), 0.5);
/// ```
pub fn calculate_similarity(text1: &str, text2: &str, method: SimilarityMethod) -> f64 {
    Similarity::new(method).similarity(text1, text2)
}
