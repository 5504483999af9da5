//! Markdown comparison tables for batch results and reports.
//!
//! The table builders only produce markdown strings, so callers can render them however they like.
//! With the `terminal_printing` feature, [MarkdownPrinter] renders them in the terminal.

use std::fmt::Write;
#[cfg(feature = "terminal_printing")]
use termimad::{FmtText, MadSkin};
use crate::evaluation::{EvaluationReport, EvaluationResults};
use crate::metric::Metric;

const MISSING_CELL: &str = "-";

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| MISSING_CELL.to_string(), |score| format!("{:.4}", score))
}

fn table_header(first_column: &str, columns: impl IntoIterator<Item=impl AsRef<str>>) -> String {
    let columns: Vec<String> = columns.into_iter().map(|c| c.as_ref().to_string()).collect();
    let mut header = format!("|{}|{}|\n", first_column, columns.join("|"));
    header.push_str("|:-|");
    header.push_str(&vec!["-:"; columns.len()].join("|"));
    header.push_str("|\n");
    header
}

/// One row per candidate in result order, one column per metric. Metrics a candidate lacks show as `-`.
/// Duplicate metrics get a single column.
///
/// # Example
/// ```
/// use textmetrics::evaluation::{EvaluationResults, SampleScores};
/// use textmetrics::metric::Metric;
/// use textmetrics::utils::printing::results_to_markdown;
/// let mut scores = SampleScores::default();
/// scores.set(Metric::Bleu, 0.5);
/// let results = EvaluationResults::from([("gpt".to_string(), scores)]);
/// let table = results_to_markdown(&results, &[Metric::Bleu, Metric::RougeL]);
/// assert!(table.contains("|gpt|0.5000|-|"));
/// ```
pub fn results_to_markdown(results: &EvaluationResults, metrics: &[Metric]) -> String {
    let mut unique: Vec<Metric> = Vec::with_capacity(metrics.len());
    metrics.iter().for_each(|metric| if !unique.contains(metric) { unique.push(*metric) });
    let metrics = unique.as_slice();
    let mut table = table_header("candidate", metrics.iter().map(Metric::name));
    for (name, scores) in results {
        let cells: Vec<String> = metrics.iter().map(|&metric| format_score(scores.get(metric))).collect();
        // writing into a String cannot fail
        let _ = writeln!(table, "|{}|{}|", name, cells.join("|"));
    }
    table
}

/// Statistics table of a report, followed by its best and worst samples.
pub fn report_to_markdown(report: &EvaluationReport) -> String {
    let mut markdown = format!("**samples**: {}\n\n", report.num_samples);
    if !report.metrics.is_empty() {
        markdown.push_str(&table_header("metric", ["mean", "median", "std", "min", "max"]));
        for (metric, stats) in &report.metrics {
            let _ = writeln!(markdown, "|{}|{:.4}|{:.4}|{:.4}|{:.4}|{:.4}|",
                             metric, stats.mean, stats.median, stats.std, stats.min, stats.max);
        }
    }
    let ranked = (report.primary_metric, report.best_index, &report.best_sample, report.worst_index, &report.worst_sample);
    if let (Some(primary), Some(best_idx), Some(best), Some(worst_idx), Some(worst)) = ranked {
        let _ = write!(markdown, "\nRanked by *{}*:\n* best: sample #{} ({})\n* worst: sample #{} ({})\n",
                       primary, best_idx, format_score(best.get(primary)), worst_idx, format_score(worst.get(primary)));
    }
    markdown
}

/// Renders markdown in the terminal.
#[cfg(feature = "terminal_printing")]
pub struct MarkdownPrinter {
    pub skin: MadSkin,
    pub wrap_width: Option<usize>,
}

#[cfg(feature = "terminal_printing")]
impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self {
            skin: MadSkin::default(),
            wrap_width: None,
        }
    }
}

#[cfg(feature = "terminal_printing")]
impl MarkdownPrinter {
    pub fn print(&self, markdown: &str) {
        let text = FmtText::from(&self.skin, markdown, self.wrap_width);
        println!("{}", text);
    }

    pub fn print_results(&self, results: &EvaluationResults, metrics: &[Metric]) {
        self.print(&results_to_markdown(results, metrics));
    }

    pub fn print_report(&self, report: &EvaluationReport) {
        self.print(&report_to_markdown(report));
    }
}
