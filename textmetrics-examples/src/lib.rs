//! Sample data shared by the examples.

pub const REFERENCE: &str = "Our quarterly revenue grew by twelve percent driven by strong demand in the enterprise segment";

/// Candidate summaries, as if produced by different models.
pub fn sample_candidates() -> Vec<(&'static str, &'static str)> {
    vec![
        ("faithful", "Our quarterly revenue grew by twelve percent driven by strong demand in the enterprise segment"),
        ("paraphrase", "Revenue for the quarter grew twelve percent thanks to strong enterprise demand"),
        ("short", "Revenue grew"),
        ("off-topic", "The weather was pleasant during the company picnic"),
    ]
}
