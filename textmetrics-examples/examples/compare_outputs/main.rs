use anyhow::Result;
use textmetrics::evaluation::{create_evaluation_report, evaluate_multiple_outputs, EvalConfig};
use textmetrics::metric::{Metric, SimilarityMethod};
use textmetrics::utils::printing::MarkdownPrinter;
use textmetrics_examples::{sample_candidates, REFERENCE};

fn main() -> Result<()> {
    let config = EvalConfig {
        metrics: vec![Metric::RougeL, Metric::Bleu, Metric::Rouge1, Metric::Rouge2, Metric::Similarity],
        similarity_method: SimilarityMethod::Cosine,
        parallel: true,
        ..EvalConfig::default()
    };
    let candidates = sample_candidates();
    let results = evaluate_multiple_outputs(REFERENCE, candidates.iter().copied(), &config)?;

    let printer = MarkdownPrinter::default();
    let metrics = config.unique_metrics();
    printer.print_results(&results, &metrics);

    let samples: Vec<_> = results.values().copied().collect();
    let report = create_evaluation_report(&samples, &metrics);
    printer.print_report(&report);
    if let Some((name, _)) = report.best_index.and_then(|best| results.get_index(best)) {
        println!("best candidate: {}", name);
    }
    println!("{:#}", report.to_json());
    Ok(())
}
