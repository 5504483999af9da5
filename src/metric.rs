//! # Metric identifiers
//! The closed set of metrics and similarity methods this crate knows about.
//!
//! Both parse from their usual string names (`"bleu"`, `"rouge-l"`, `"jaccard"`, ...) and print back
//! to a canonical name, which is also what they serialize to.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use crate::metric::errors::{UnsupportedMetric, UnsupportedSimilarityMethod};

/// A text metric comparing a candidate against a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Clipped n-gram precision with brevity penalty
    #[serde(rename = "bleu")]
    Bleu,
    /// Unigram set recall
    #[serde(rename = "rouge-1")]
    Rouge1,
    /// Bigram set recall
    #[serde(rename = "rouge-2")]
    Rouge2,
    /// Longest-common-subsequence F1
    #[serde(rename = "rouge-l")]
    RougeL,
    /// Token set similarity, see [SimilarityMethod]
    #[serde(rename = "similarity")]
    Similarity,
}

/// Metrics computed by default for every candidate in a batch.
pub const DEFAULT_EVAL_METRICS: [Metric; 4] = [Metric::Bleu, Metric::Rouge1, Metric::RougeL, Metric::Similarity];

/// Metrics summarized by default in a report.
pub const DEFAULT_REPORT_METRICS: [Metric; 3] = [Metric::Bleu, Metric::Rouge1, Metric::RougeL];

impl Metric {
    pub const ALL: [Metric; 5] = [Metric::Bleu, Metric::Rouge1, Metric::Rouge2, Metric::RougeL, Metric::Similarity];

    /// The canonical name, e.g. `"rouge-l"`.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Bleu => "bleu",
            Metric::Rouge1 => "rouge-1",
            Metric::Rouge2 => "rouge-2",
            Metric::RougeL => "rouge-l",
            Metric::Similarity => "similarity",
        }
    }
}

/// The ROUGE subset of [Metric].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RougeVariant {
    Rouge1,
    Rouge2,
    RougeL,
}

impl From<RougeVariant> for Metric {
    fn from(variant: RougeVariant) -> Self {
        match variant {
            RougeVariant::Rouge1 => Metric::Rouge1,
            RougeVariant::Rouge2 => Metric::Rouge2,
            RougeVariant::RougeL => Metric::RougeL,
        }
    }
}

impl TryFrom<Metric> for RougeVariant {
    type Error = UnsupportedMetric;

    fn try_from(metric: Metric) -> Result<Self, Self::Error> {
        match metric {
            Metric::Rouge1 => Ok(RougeVariant::Rouge1),
            Metric::Rouge2 => Ok(RougeVariant::Rouge2),
            Metric::RougeL => Ok(RougeVariant::RougeL),
            other => Err(UnsupportedMetric::with_supported(other.name(), RougeVariant::ALL.iter().map(|v| Metric::from(*v).name()).collect())),
        }
    }
}

impl FromStr for RougeVariant {
    type Err = UnsupportedMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let metric: Metric = s.parse()?;
        RougeVariant::try_from(metric).map_err(|mut err| {
            err.name = s.to_string();
            err
        })
    }
}

impl RougeVariant {
    pub const ALL: [RougeVariant; 3] = [RougeVariant::Rouge1, RougeVariant::Rouge2, RougeVariant::RougeL];
}

impl fmt::Display for RougeVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(Metric::from(*self).name())
    }
}

/// How two token sets are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMethod {
    /// `|A∩B| / |A∪B|`
    #[default]
    Jaccard,
    /// `|A∩B| / min(|A|, |B|)`
    Overlap,
    /// `|A∩B| / sqrt(|A|·|B|)`, the cosine of the binary indicator vectors
    Cosine,
}

impl SimilarityMethod {
    pub const ALL: [SimilarityMethod; 3] = [SimilarityMethod::Jaccard, SimilarityMethod::Overlap, SimilarityMethod::Cosine];

    pub fn name(&self) -> &'static str {
        match self {
            SimilarityMethod::Jaccard => "jaccard",
            SimilarityMethod::Overlap => "overlap",
            SimilarityMethod::Cosine => "cosine",
        }
    }
}

lazy_static! {
    /// map from accepted (lower-cased) metric names to metrics, aliases included.
    static ref NAME_TO_METRIC: HashMap<&'static str, Metric> = HashMap::from([
        ("bleu", Metric::Bleu),
        ("rouge-1", Metric::Rouge1),
        ("rouge_1", Metric::Rouge1),
        ("rouge1", Metric::Rouge1),
        ("rouge-2", Metric::Rouge2),
        ("rouge_2", Metric::Rouge2),
        ("rouge2", Metric::Rouge2),
        ("rouge-l", Metric::RougeL),
        ("rouge_l", Metric::RougeL),
        ("rougel", Metric::RougeL),
        ("similarity", Metric::Similarity),
    ]);

    static ref NAME_TO_SIMILARITY_METHOD: HashMap<&'static str, SimilarityMethod> = SimilarityMethod::ALL
        .iter()
        .map(|method| (method.name(), *method))
        .collect();
}

impl FromStr for Metric {
    type Err = UnsupportedMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAME_TO_METRIC
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnsupportedMetric::new(s))
    }
}

impl FromStr for SimilarityMethod {
    type Err = UnsupportedSimilarityMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAME_TO_SIMILARITY_METHOD
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnsupportedSimilarityMethod::new(s))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a list of metric names, failing on the first unsupported one.
pub fn parse_metrics<S: AsRef<str>>(names: &[S]) -> Result<Vec<Metric>, UnsupportedMetric> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

pub mod errors {
    use std::error::Error;
    use std::fmt;
    use std::fmt::Formatter;
    use super::{Metric, SimilarityMethod};

    /// Error when a metric name is not one of the supported metrics.
    #[derive(Debug, Clone)]
    pub struct UnsupportedMetric {
        pub name: String,
        pub supported: Vec<&'static str>,
    }

    impl UnsupportedMetric {
        pub(crate) fn new(name: impl Into<String>) -> Self {
            Self::with_supported(name, Metric::ALL.iter().map(Metric::name).collect())
        }

        pub(crate) fn with_supported(name: impl Into<String>, supported: Vec<&'static str>) -> Self {
            Self {
                name: name.into(),
                supported,
            }
        }
    }

    impl fmt::Display for UnsupportedMetric {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "UnsupportedMetric: got metric = {}, but supported metrics are {:?}", self.name, self.supported)
        }
    }

    impl Error for UnsupportedMetric {}

    /// Error when a similarity method name is not one of the supported methods.
    #[derive(Debug, Clone)]
    pub struct UnsupportedSimilarityMethod {
        pub name: String,
        pub supported: Vec<&'static str>,
    }

    impl UnsupportedSimilarityMethod {
        pub(crate) fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                supported: SimilarityMethod::ALL.iter().map(SimilarityMethod::name).collect(),
            }
        }
    }

    impl fmt::Display for UnsupportedSimilarityMethod {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "UnsupportedSimilarityMethod: got method = {}, but supported methods are {:?}", self.name, self.supported)
        }
    }

    impl Error for UnsupportedSimilarityMethod {}

    /// Error when an n-gram order is not positive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InvalidNGramOrder {
        pub order: usize,
    }

    impl fmt::Display for InvalidNGramOrder {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "InvalidNGramOrder: n-gram order must be at least 1, got {}", self.order)
        }
    }

    impl Error for InvalidNGramOrder {}
}
