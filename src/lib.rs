//! # textmetrics
//!
//! Simple reference-based text metrics for scoring LLM outputs in Rust
//!
//! **Note: these are simplified, self-contained scorers. They do not reproduce the numbers of the official
//! BLEU or ROUGE implementations.**
//!
//! ## Usage
//! Add a dependency in `Cargo.toml`
//! ```toml
//! textmetrics = { git = "https://github.com/ifsheldon/textmetrics.git", branch = "main"}
//! ```
//!
//! ## Why `textmetrics`
//!
//! When comparing prompts or models, you often have a reference answer and a handful of generated ones, and you
//! want a quick number for "how close is this". Heavy evaluation harnesses are overkill for that, so this crate
//! keeps it to plain functions over two strings.
//!
//! ## Concepts and Design
//!
//! ### Tokens
//!
//! Every metric sees a text as its lower-cased, whitespace separated tokens. See [`TokenSequence`](crate::utils::token::TokenSequence).
//!
//! ### Metrics
//!
//! A [`Metric`](crate::metric::Metric) is one of
//! * `bleu`: clipped n-gram precision with brevity penalty
//! * `rouge-1` and `rouge-2`: recall of distinct reference unigrams or bigrams
//! * `rouge-l`: F1 of the longest common token subsequence
//! * `similarity`: token set similarity, by [`SimilarityMethod`](crate::metric::SimilarityMethod) `jaccard`, `overlap` or `cosine`
//!
//! All scores are in `[0, 1]`. Scoring never fails on data: degenerate inputs such as an empty candidate simply
//! score `0.0`. Only invalid configuration, like an n-gram order of 0 or an unknown metric name, is an error.
//!
//! ### Scorer
//!
//! Anything that implements [`Score`](crate::scorer::Score), closures included. See [scorer] for the built-in ones.
//!
//! ### Evaluation and Report
//!
//! [`evaluate_multiple_outputs`](crate::evaluation::evaluate_multiple_outputs) scores named candidates against one
//! reference, and [`create_evaluation_report`](crate::evaluation::create_evaluation_report) aggregates the scores
//! into per-metric statistics with the best and worst samples.
//!
//! ```
//! use textmetrics::evaluation::{create_evaluation_report, evaluate_multiple_outputs, EvalConfig};
//! use textmetrics::metric::DEFAULT_REPORT_METRICS;
//!
//! let reference = "the cat sat on the mat";
//! let candidates = [("model-a", "the cat sat on the mat"), ("model-b", "a cat sat on a mat")];
//! let results = evaluate_multiple_outputs(reference, candidates, &EvalConfig::default()).unwrap();
//! let samples: Vec<_> = results.values().copied().collect();
//! let report = create_evaluation_report(&samples, &DEFAULT_REPORT_METRICS);
//! assert_eq!(report.num_samples, 2);
//! assert_eq!(report.best_index, Some(0));
//! ```
//!
//! ### Printing
//!
//! Results and reports can be turned into markdown tables with [utils::printing], and printed to the terminal
//! with the `terminal_printing` feature.
//!
//! ## Features
//! * `terminal_printing` (default): terminal rendering with `termimad`
//! * `parallel`: score candidates on the `rayon` thread pool when [`EvalConfig::parallel`](crate::evaluation::EvalConfig) is set
//!
//! ## License
//!
//! `textmetrics` will always remain free under Apache license.


pub mod metric;
pub mod scorer;
pub mod evaluation;
pub mod utils;
