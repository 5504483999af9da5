//! # Evaluation
//! Batch scoring of many candidates against one reference, and aggregation of the scores into a report.
//!
//! ## EvalConfig
//! Which metrics to compute and with which parameters. It can be built in code or loaded from JSON, where
//! every field is optional:
//! ```
//! use textmetrics::evaluation::EvalConfig;
//! use textmetrics::metric::{Metric, SimilarityMethod};
//! let config = EvalConfig::from_json_str(r#"{"metrics": ["rouge-2", "similarity"], "similarity_method": "cosine"}"#).unwrap();
//! assert_eq!(config.metrics, vec![Metric::Rouge2, Metric::Similarity]);
//! assert_eq!(config.similarity_method, SimilarityMethod::Cosine);
//! assert_eq!(config.bleu_max_n, 4);
//! ```
//!
//! ## SampleScores
//! The scores of one candidate, one optional field per [Metric]. Metrics that were not requested are `None`
//! and are left out when converted to a mapping via [SampleScores::to_json_map].
//!
//! ## EvaluationReport
//! Per-metric statistics over a list of [SampleScores] plus the best and worst sample by the first listed
//! metric. A report is read-only once created by [create_evaluation_report].

use std::collections::BTreeMap;
use anyhow::Result;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::metric::{parse_metrics, Metric, SimilarityMethod, DEFAULT_EVAL_METRICS};
use crate::metric::errors::InvalidNGramOrder;
use crate::scorer::{Bleu, MetricScorer, Score};
use crate::utils::{stats, JsonMap};

/// Configuration of a batch evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Metrics to compute, in order. Duplicates are ignored.
    pub metrics: Vec<Metric>,
    /// Largest n-gram order of [Metric::Bleu]
    pub bleu_max_n: usize,
    /// Set similarity used by [Metric::Similarity]
    pub similarity_method: SimilarityMethod,
    /// Score candidates on the rayon thread pool (requires the `parallel` feature)
    pub parallel: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            metrics: DEFAULT_EVAL_METRICS.to_vec(),
            bleu_max_n: 4,
            similarity_method: SimilarityMethod::default(),
            parallel: false,
        }
    }
}

impl EvalConfig {
    /// Default parameters with the given metrics, duplicates removed.
    pub fn with_metrics(metrics: impl IntoIterator<Item=Metric>) -> Self {
        let metrics: Vec<Metric> = metrics.into_iter().collect();
        Self {
            metrics: dedup_metrics(&metrics),
            ..Self::default()
        }
    }

    /// Parse a JSON config. Missing fields take their default values and duplicate metrics are removed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        config.metrics = config.unique_metrics();
        Ok(config)
    }

    /// Check the parameters. Returns an error if the BLEU order is 0.
    pub fn validate(&self) -> Result<(), InvalidNGramOrder> {
        Bleu::new(self.bleu_max_n).map(|_| ())
    }

    /// The requested metrics without duplicates, first occurrence kept.
    pub fn unique_metrics(&self) -> Vec<Metric> {
        dedup_metrics(&self.metrics)
    }

    /// The scorers of the requested metrics, in order.
    pub fn scorers(&self) -> Result<Vec<MetricScorer>, InvalidNGramOrder> {
        let bleu = Bleu::new(self.bleu_max_n)?;
        Ok(self.unique_metrics()
            .into_iter()
            .map(|metric| MetricScorer::with_params(metric, bleu, self.similarity_method))
            .collect())
    }
}

fn dedup_metrics(metrics: &[Metric]) -> Vec<Metric> {
    let mut unique = Vec::with_capacity(metrics.len());
    for metric in metrics {
        if unique.contains(metric) {
            warn!("Metric {} is listed more than once, ignoring the duplicate", metric);
        } else {
            unique.push(*metric);
        }
    }
    unique
}

/// Scores of one candidate. `None` means the metric was not computed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleScores {
    #[serde(rename = "bleu", default, skip_serializing_if = "Option::is_none")]
    pub bleu: Option<f64>,
    #[serde(rename = "rouge-1", default, skip_serializing_if = "Option::is_none")]
    pub rouge_1: Option<f64>,
    #[serde(rename = "rouge-2", default, skip_serializing_if = "Option::is_none")]
    pub rouge_2: Option<f64>,
    #[serde(rename = "rouge-l", default, skip_serializing_if = "Option::is_none")]
    pub rouge_l: Option<f64>,
    #[serde(rename = "similarity", default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl SampleScores {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Bleu => self.bleu,
            Metric::Rouge1 => self.rouge_1,
            Metric::Rouge2 => self.rouge_2,
            Metric::RougeL => self.rouge_l,
            Metric::Similarity => self.similarity,
        }
    }

    pub fn set(&mut self, metric: Metric, score: f64) -> &mut Self {
        let slot = match metric {
            Metric::Bleu => &mut self.bleu,
            Metric::Rouge1 => &mut self.rouge_1,
            Metric::Rouge2 => &mut self.rouge_2,
            Metric::RougeL => &mut self.rouge_l,
            Metric::Similarity => &mut self.similarity,
        };
        *slot = Some(score);
        self
    }

    /// The computed scores, in [Metric] order.
    pub fn iter(&self) -> impl Iterator<Item=(Metric, f64)> + '_ {
        Metric::ALL.into_iter().filter_map(|metric| self.get(metric).map(|score| (metric, score)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The mapping view: metric name to score, computed metrics only.
    pub fn to_json_map(&self) -> JsonMap {
        self.iter()
            .map(|(metric, score)| (metric.to_string(), json!(score)))
            .collect()
    }
}

impl FromIterator<(Metric, f64)> for SampleScores {
    fn from_iter<T: IntoIterator<Item=(Metric, f64)>>(iter: T) -> Self {
        let mut scores = SampleScores::default();
        iter.into_iter().for_each(|(metric, score)| {
            scores.set(metric, score);
        });
        scores
    }
}

fn score_with(reference: &str, candidate: &str, scorers: &[MetricScorer]) -> SampleScores {
    scorers
        .iter()
        .map(|scorer| (scorer.metric, scorer.score(reference, candidate)))
        .collect()
}

/// Score one candidate with every metric of the config.
///
/// # Example
/// ```
/// use textmetrics::evaluation::{score_sample, EvalConfig};
/// let scores = score_sample("the cat sat on the mat", "the cat sat on the mat", &EvalConfig::default()).unwrap();
/// assert_eq!(scores.bleu, Some(1.0));
/// assert_eq!(scores.rouge_2, None);
/// ```
pub fn score_sample(reference: &str, candidate: &str, config: &EvalConfig) -> Result<SampleScores> {
    let scorers = config.scorers()?;
    Ok(score_with(reference, candidate, &scorers))
}

fn score_sequential(reference: &str, candidates: &[(&str, &str)], scorers: &[MetricScorer]) -> Vec<(String, SampleScores)> {
    candidates
        .iter()
        .map(|&(name, candidate)| {
            let scores = score_with(reference, candidate, scorers);
            debug!("Scored candidate {}: {:?}", name, scores);
            (name.to_string(), scores)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn score_parallel(reference: &str, candidates: &[(&str, &str)], scorers: &[MetricScorer]) -> Vec<(String, SampleScores)> {
    use rayon::prelude::*;
    candidates
        .par_iter()
        .map(|&(name, candidate)| {
            let scores = score_with(reference, candidate, scorers);
            debug!("Scored candidate {}: {:?}", name, scores);
            (name.to_string(), scores)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_parallel(reference: &str, candidates: &[(&str, &str)], scorers: &[MetricScorer]) -> Vec<(String, SampleScores)> {
    warn!("Parallel evaluation requested but the `parallel` feature is disabled, scoring sequentially");
    score_sequential(reference, candidates, scorers)
}

/// Scores of a batch keyed by candidate name, in input order.
pub type EvaluationResults = IndexMap<String, SampleScores>;

/// Evaluate named candidates against one reference.
///
/// Returns the scores keyed by candidate name, in input order. If a name occurs more than once, the last
/// candidate's scores win and the name keeps its first position.
/// Returns an error if the config is invalid.
///
/// # Example
/// ```
/// use textmetrics::evaluation::{evaluate_multiple_outputs, EvalConfig};
/// use textmetrics::metric::Metric;
/// let candidates = [("exact", "the cat sat on the mat"), ("other", "a dog ran in the park")];
/// let config = EvalConfig::with_metrics([Metric::Rouge1]);
/// let results = evaluate_multiple_outputs("the cat sat on the mat", candidates, &config).unwrap();
/// assert_eq!(results["exact"].rouge_1, Some(1.0));
/// assert_eq!(results["other"].rouge_1, Some(0.2));
/// assert_eq!(results.get_index(0).unwrap().0, "exact");
/// ```
pub fn evaluate_multiple_outputs<K, V>(reference: &str,
                                       candidates: impl IntoIterator<Item=(K, V)>,
                                       config: &EvalConfig) -> Result<EvaluationResults>
    where K: Into<String>, V: AsRef<str> {
    let scorers = config.scorers()?;
    if reference.trim().is_empty() {
        warn!("Reference text is empty, every candidate will score 0");
    }
    let candidates: Vec<(String, V)> = candidates.into_iter().map(|(name, text)| (name.into(), text)).collect();
    let candidates: Vec<(&str, &str)> = candidates.iter().map(|(name, text)| (name.as_str(), text.as_ref())).collect();
    let scored = if config.parallel {
        score_parallel(reference, &candidates, &scorers)
    } else {
        score_sequential(reference, &candidates, &scorers)
    };
    Ok(scored.into_iter().collect())
}

/// Like [evaluate_multiple_outputs] with default parameters, but metrics are given by name.
/// Returns an error if any name is not a supported metric.
pub fn evaluate_with_metric_names<K, V, S>(reference: &str,
                                           candidates: impl IntoIterator<Item=(K, V)>,
                                           metric_names: &[S]) -> Result<EvaluationResults>
    where K: Into<String>, V: AsRef<str>, S: AsRef<str> {
    let metrics = parse_metrics(metric_names)?;
    evaluate_multiple_outputs(reference, candidates, &EvalConfig::with_metrics(metrics))
}

/// Summary statistics of one metric over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: f64,
    pub median: f64,
    /// population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricStats {
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Some(Self {
            mean: stats::mean(values)?,
            median: stats::median(values)?,
            std: stats::std_dev(values)?,
            min: stats::min(values)?,
            max: stats::max(values)?,
        })
    }
}

/// Aggregated statistics of a batch of [SampleScores].
#[derive(Debug, Clone, PartialEq)]
#[readonly::make]
pub struct EvaluationReport {
    /// Number of samples in the batch. read-only.
    #[readonly]
    pub num_samples: usize,
    /// Statistics of every requested metric present in at least one sample. read-only.
    #[readonly]
    pub metrics: BTreeMap<Metric, MetricStats>,
    /// The metric samples are ranked by. read-only.
    #[readonly]
    pub primary_metric: Option<Metric>,
    /// The highest ranked sample. read-only.
    #[readonly]
    pub best_sample: Option<SampleScores>,
    /// The lowest ranked sample. read-only.
    #[readonly]
    pub worst_sample: Option<SampleScores>,
    /// Position of the best sample in the input. read-only.
    #[readonly]
    pub best_index: Option<usize>,
    /// Position of the worst sample in the input. read-only.
    #[readonly]
    pub worst_index: Option<usize>,
}

impl EvaluationReport {
    /// The mapping view of the report.
    pub fn to_json(&self) -> Value {
        let metrics: JsonMap = self.metrics
            .iter()
            .map(|(metric, stats)| (metric.to_string(), json!(stats)))
            .collect();
        let mut report = JsonMap::new();
        report.insert("num_samples".to_string(), json!(self.num_samples));
        report.insert("metrics".to_string(), Value::Object(metrics));
        if let (Some(best), Some(worst)) = (&self.best_sample, &self.worst_sample) {
            report.insert("best_sample".to_string(), Value::Object(best.to_json_map()));
            report.insert("worst_sample".to_string(), Value::Object(worst.to_json_map()));
        }
        Value::Object(report)
    }
}

/// Create a report over `results` for the given metrics.
///
/// * Each metric's statistics only cover the samples that have that metric; the others are skipped, not
///   counted as 0.
/// * Samples are ranked in descending order of the first metric, keeping input order among ties. A sample
///   without the first metric ranks as 0.
/// * With no samples or no metrics, there is no best or worst sample.
///
/// # Example
/// ```
/// use textmetrics::evaluation::{create_evaluation_report, SampleScores};
/// use textmetrics::metric::Metric;
/// let results: Vec<SampleScores> = [0.2, 0.8, 0.5]
///     .into_iter()
///     .map(|score| [(Metric::Rouge1, score)].into_iter().collect::<SampleScores>())
///     .collect();
/// let report = create_evaluation_report(&results, &[Metric::Rouge1]);
/// assert_eq!(report.num_samples, 3);
/// assert_eq!(report.best_index, Some(1));
/// assert_eq!(report.worst_index, Some(0));
/// assert_eq!(report.metrics[&Metric::Rouge1].median, 0.5);
/// ```
pub fn create_evaluation_report(results: &[SampleScores], metrics: &[Metric]) -> EvaluationReport {
    let metrics = dedup_metrics(metrics);
    let stats = metrics
        .iter()
        .filter_map(|&metric| {
            let values: Vec<f64> = results.iter().filter_map(|sample| sample.get(metric)).collect();
            let stats = MetricStats::from_values(&values);
            if stats.is_none() && !results.is_empty() {
                warn!("No sample has metric {}, leaving it out of the report", metric);
            }
            stats.map(|stats| (metric, stats))
        })
        .collect();

    let primary_metric = metrics.first().copied();
    let (best_index, worst_index) = match primary_metric {
        Some(primary) if !results.is_empty() => {
            let key = |idx: usize| results[idx].get(primary).unwrap_or(0.0);
            let mut ranking: Vec<usize> = (0..results.len()).collect();
            // sort_by is stable
            ranking.sort_by(|&a, &b| key(b).total_cmp(&key(a)));
            (ranking.first().copied(), ranking.last().copied())
        }
        _ => (None, None),
    };

    EvaluationReport {
        num_samples: results.len(),
        metrics: stats,
        primary_metric,
        best_sample: best_index.map(|idx| results[idx]),
        worst_sample: worst_index.map(|idx| results[idx]),
        best_index,
        worst_index,
    }
}

#[cfg(test)]
mod test_evaluation {
    use std::collections::BTreeMap;
    use crate::metric::{Metric, SimilarityMethod, DEFAULT_REPORT_METRICS};
    use crate::scorer::{calculate_similarity, RougeL, Score};
    use super::*;

    const REFERENCE: &str = "the cat sat on the mat";

    fn rouge1_sample(score: f64) -> SampleScores {
        [(Metric::Rouge1, score)].into_iter().collect()
    }

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.metrics, DEFAULT_EVAL_METRICS.to_vec());
        assert_eq!(config.bleu_max_n, 4);
        assert_eq!(config.similarity_method, SimilarityMethod::Jaccard);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config = EvalConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EvalConfig::default());

        let config = EvalConfig::from_json_str(r#"{"bleu_max_n": 2, "parallel": true}"#).unwrap();
        assert_eq!(config.bleu_max_n, 2);
        assert!(config.parallel);

        let err = EvalConfig::from_json_str(r#"{"bleu_max_n": 0}"#).expect_err("order 0 should be rejected");
        println!("{}", err);
        assert!(EvalConfig::from_json_str(r#"{"metrics": ["meteor"]}"#).is_err());

        let config = EvalConfig::from_json_str(r#"{"metrics": ["rouge-l", "bleu", "rouge-l", "bleu"]}"#).unwrap();
        assert_eq!(config.metrics, vec![Metric::RougeL, Metric::Bleu]);
    }

    #[test]
    fn test_duplicate_metrics_are_ignored() {
        let config = EvalConfig::with_metrics([Metric::RougeL, Metric::Bleu, Metric::RougeL]);
        assert_eq!(config.metrics, vec![Metric::RougeL, Metric::Bleu]);

        let config = EvalConfig { metrics: vec![Metric::Bleu, Metric::Bleu], ..EvalConfig::default() };
        assert_eq!(config.unique_metrics(), vec![Metric::Bleu]);
        assert_eq!(config.scorers().unwrap().len(), 2);
    }

    #[test]
    fn test_sample_scores_mapping_view() {
        let mut scores = SampleScores::default();
        assert!(scores.is_empty());
        scores.set(Metric::RougeL, 0.5).set(Metric::Bleu, 0.25);
        assert_eq!(scores.get(Metric::RougeL), Some(0.5));
        assert_eq!(scores.get(Metric::Rouge2), None);
        let collected: Vec<(Metric, f64)> = scores.iter().collect();
        assert_eq!(collected, vec![(Metric::Bleu, 0.25), (Metric::RougeL, 0.5)]);

        let map = scores.to_json_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["rouge-l"], 0.5);
        assert_eq!(serde_json::to_value(scores).unwrap(), Value::Object(map));

        let parsed: SampleScores = serde_json::from_str(r#"{"rouge-1": 1.0}"#).unwrap();
        assert_eq!(parsed, rouge1_sample(1.0));
    }

    #[test]
    fn test_evaluate_multiple_outputs() {
        let candidates = BTreeMap::from([
            ("exact", "the cat sat on the mat"),
            ("empty", ""),
            ("reordered", "on the mat the cat sat"),
        ]);
        let results = evaluate_multiple_outputs(REFERENCE, candidates, &EvalConfig::default()).unwrap();
        assert_eq!(results.len(), 3);

        let exact = &results["exact"];
        for metric in DEFAULT_EVAL_METRICS {
            assert_eq!(exact.get(metric), Some(1.0), "{}", metric);
        }
        assert_eq!(exact.rouge_2, None);

        let empty = &results["empty"];
        assert!(empty.iter().all(|(_, score)| score == 0.0));
        assert_eq!(empty.iter().count(), DEFAULT_EVAL_METRICS.len());

        let reordered = &results["reordered"];
        assert_eq!(reordered.rouge_1, Some(1.0));
        assert_eq!(reordered.similarity, Some(1.0));
        assert_eq!(reordered.rouge_l, Some(RougeL.score(REFERENCE, "on the mat the cat sat")));
        assert!(reordered.rouge_l.unwrap() < 1.0);
    }

    #[test]
    fn test_evaluate_uses_config_parameters() {
        let candidates = vec![("a".to_string(), "the cat sat".to_string())];
        let config = EvalConfig {
            metrics: vec![Metric::Similarity, Metric::Bleu],
            bleu_max_n: 1,
            similarity_method: SimilarityMethod::Overlap,
            parallel: false,
        };
        let results = evaluate_multiple_outputs(REFERENCE, candidates, &config).unwrap();
        let scores = &results["a"];
        assert_eq!(scores.similarity, Some(calculate_similarity(REFERENCE, "the cat sat", SimilarityMethod::Overlap)));
        assert_eq!(scores.similarity, Some(1.0));
        // unigram precision 1, brevity penalty exp(1 - 6/3)
        let bleu = scores.bleu.unwrap();
        assert!((bleu - (-1.0f64).exp()).abs() < 1e-12);

        let invalid = EvalConfig { bleu_max_n: 0, ..EvalConfig::default() };
        assert!(evaluate_multiple_outputs(REFERENCE, [("a", "b")], &invalid).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let candidates: Vec<(String, String)> = (0..32)
            .map(|i| (format!("candidate-{:02}", i), format!("the cat sat on mat number {}", i)))
            .collect();
        let sequential = evaluate_multiple_outputs(REFERENCE, candidates.clone(), &EvalConfig::default()).unwrap();
        let config = EvalConfig { parallel: true, ..EvalConfig::default() };
        let parallel = evaluate_multiple_outputs(REFERENCE, candidates.clone(), &config).unwrap();
        assert_eq!(sequential, parallel);
        let names: Vec<&String> = parallel.keys().collect();
        let expected: Vec<&String> = candidates.iter().map(|(name, _)| name).collect();
        assert_eq!(expected, names);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_rayon_scoring_keeps_input_order() {
        let texts: Vec<(String, String)> = (0..64)
            .rev()
            .map(|i| (format!("c{}", i), "the cat sat on the mat ".repeat(i % 5 + 1)))
            .collect();
        let pairs: Vec<(&str, &str)> = texts.iter().map(|(name, text)| (name.as_str(), text.as_str())).collect();
        let scorers = EvalConfig::default().scorers().unwrap();
        let parallel = score_parallel(REFERENCE, &pairs, &scorers);
        let sequential = score_sequential(REFERENCE, &pairs, &scorers);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel[0].0, "c63");
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let candidates = [("x", "a dog"), ("y", REFERENCE), ("x", REFERENCE)];
        let results = evaluate_multiple_outputs(REFERENCE, candidates, &EvalConfig::with_metrics([Metric::Rouge1])).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results.get_index(0).unwrap().0, "x");
        assert_eq!(results["x"].rouge_1, Some(1.0));
    }

    #[test]
    fn test_report_ties_follow_candidate_order() {
        let candidates = [
            ("zeta", "the cat sat on the mat"),
            ("alpha", "the mat on the cat sat"),
            ("mid", "the cat"),
        ];
        let results = evaluate_multiple_outputs(REFERENCE, candidates, &EvalConfig::with_metrics([Metric::Rouge1])).unwrap();
        let names: Vec<&str> = results.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        let samples: Vec<SampleScores> = results.values().copied().collect();
        let report = create_evaluation_report(&samples, &[Metric::Rouge1]);
        // zeta and alpha both score 1.0; zeta comes first
        assert_eq!(names[report.best_index.unwrap()], "zeta");
        assert_eq!(names[report.worst_index.unwrap()], "mid");
    }

    #[test]
    fn test_evaluate_with_metric_names() {
        let results = evaluate_with_metric_names(REFERENCE, [("a", REFERENCE)], &["rouge-2", "ROUGE-L"]).unwrap();
        assert_eq!(results["a"].rouge_2, Some(1.0));
        assert_eq!(results["a"].rouge_l, Some(1.0));
        assert_eq!(results["a"].bleu, None);

        let err = evaluate_with_metric_names(REFERENCE, [("a", REFERENCE)], &["cider"]).expect_err("cider is not supported");
        println!("{}", err);
    }

    #[test]
    fn test_report_best_and_worst() {
        let candidates = [
            ("first", "the cat"),
            ("second", "the cat sat on the mat"),
            ("third", "a dog"),
        ];
        let names: Vec<&str> = candidates.iter().map(|(name, _)| *name).collect();
        let results = evaluate_multiple_outputs(REFERENCE, candidates, &EvalConfig::with_metrics([Metric::Rouge1])).unwrap();
        let samples: Vec<SampleScores> = names.iter().map(|name| results[*name]).collect();

        let report = create_evaluation_report(&samples, &[Metric::Rouge1]);
        assert_eq!(report.num_samples, 3);
        assert_eq!(report.primary_metric, Some(Metric::Rouge1));
        assert_eq!(names[report.best_index.unwrap()], "second");
        assert_eq!(names[report.worst_index.unwrap()], "third");
        assert_eq!(report.best_sample, Some(results["second"]));
        assert_eq!(report.worst_sample, Some(results["third"]));

        let stats = report.metrics[&Metric::Rouge1];
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.min, 0.0);
        // rouge-1 scores: 0.4, 1.0, 0.0
        assert_eq!(stats.median, 0.4);
        assert!((stats.mean - 1.4 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_ties_keep_input_order() {
        let samples = vec![rouge1_sample(0.5), rouge1_sample(0.9), rouge1_sample(0.9), rouge1_sample(0.5)];
        let report = create_evaluation_report(&samples, &[Metric::Rouge1]);
        assert_eq!(report.best_index, Some(1));
        assert_eq!(report.worst_index, Some(3));

        let all_equal = vec![rouge1_sample(0.3); 3];
        let report = create_evaluation_report(&all_equal, &[Metric::Rouge1]);
        assert_eq!(report.best_index, Some(0));
        assert_eq!(report.worst_index, Some(2));
    }

    #[test]
    fn test_report_skips_missing_metrics() {
        let mut with_bleu = rouge1_sample(0.2);
        with_bleu.set(Metric::Bleu, 0.6);
        let samples = vec![rouge1_sample(0.4), with_bleu];
        let report = create_evaluation_report(&samples, &DEFAULT_REPORT_METRICS);

        // only the second sample has bleu, and it is not averaged with a 0
        let bleu = report.metrics[&Metric::Bleu];
        assert_eq!((bleu.mean, bleu.median, bleu.std, bleu.min, bleu.max), (0.6, 0.6, 0.0, 0.6, 0.6));
        assert!(!report.metrics.contains_key(&Metric::RougeL));

        let rouge1 = report.metrics[&Metric::Rouge1];
        assert!((rouge1.mean - 0.3).abs() < 1e-12);
        assert!((rouge1.std - 0.1).abs() < 1e-12);

        // ranked by bleu, the sample without it counts as 0
        assert_eq!(report.best_index, Some(1));
        assert_eq!(report.worst_index, Some(0));
    }

    #[test]
    fn test_report_degenerate_inputs() {
        let report = create_evaluation_report(&[], &DEFAULT_REPORT_METRICS);
        assert_eq!(report.num_samples, 0);
        assert!(report.metrics.is_empty());
        assert_eq!(report.best_sample, None);
        assert_eq!(report.worst_sample, None);

        let report = create_evaluation_report(&[rouge1_sample(0.1)], &[]);
        assert_eq!(report.num_samples, 1);
        assert!(report.metrics.is_empty());
        assert_eq!(report.best_index, None);
    }

    #[test]
    fn test_report_to_json() {
        let samples = vec![rouge1_sample(1.0), rouge1_sample(0.0)];
        let report = create_evaluation_report(&samples, &[Metric::Rouge1]);
        let value = report.to_json();
        assert_eq!(value["num_samples"], 2);
        assert_eq!(value["metrics"]["rouge-1"]["mean"], 0.5);
        assert_eq!(value["metrics"]["rouge-1"]["std"], 0.5);
        assert_eq!(value["best_sample"]["rouge-1"], 1.0);
        assert_eq!(value["worst_sample"]["rouge-1"], 0.0);

        let empty = create_evaluation_report(&[], &[Metric::Rouge1]).to_json();
        assert!(empty.get("best_sample").is_none());
    }
}
