//! End-to-end classification pipeline.
//!
//! Stages run strictly forward (load -> split -> train -> predict ->
//! evaluate) over one report buffer. Everything is local to the call, so
//! repeated invocations cannot leak model or split state into each other.
use crate::config::PipelineConfig;
use crate::data_handling::stratified_split;
use crate::error::PipelineError;
use crate::io::parse_delimited;
use crate::models::naive_bayes::{NaiveBayesModel, Prediction};
use crate::report::Report;
use crate::stats;

/// Run one full train/test cycle over raw file contents and return the
/// ordered report lines.
///
/// Fatal conditions abort with a single descriptive error (its `Display`
/// text); skipped-row warnings are recoverable and appear at the top of the
/// report.
pub fn run_classification(
    contents: &str,
    config: &PipelineConfig,
) -> Result<Vec<String>, PipelineError> {
    let mut report = Report::new();

    if !config.delimiter.is_ascii() {
        return Err(PipelineError::Delimiter {
            delimiter: config.delimiter,
        });
    }
    let outcome = parse_delimited(contents, config.delimiter as u8)?;
    for warning in &outcome.warnings {
        report.push(warning.clone());
    }
    if !outcome.warnings.is_empty() {
        report.blank();
    }

    let dataset = outcome.dataset;
    log::info!(
        "loaded {} instances with {} attributes",
        dataset.instances.len(),
        dataset.schema.len()
    );

    let split = stratified_split(&dataset, config.train_fraction, &mut report);
    if split.training.is_empty() || split.testing.is_empty() {
        return Err(PipelineError::EmptySplit);
    }

    let model = NaiveBayesModel::fit(&dataset.schema, &split.training, &mut report)?;

    report.push("--- Testing Predictions ---");
    report.blank();
    let predictions: Vec<Prediction> = split
        .testing
        .iter()
        .map(|instance| model.predict(&dataset.schema, instance, &mut report))
        .collect();

    stats::evaluate(model.classes(), &predictions, split.testing.len(), &mut report);

    Ok(report.into_lines())
}
