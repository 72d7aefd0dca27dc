//! Typed dataset structures and the deterministic stratified splitter.
use std::collections::HashMap;

use crate::error::PipelineError;
use crate::math::round_to;
use crate::report::{format_as_table, Report};

/// Ordered attribute names parsed from the header row.
///
/// The first attribute is the unique instance identifier, the last is the
/// class label, and everything in between is a categorical predictor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    attributes: Vec<String>,
}

impl Schema {
    /// Build a schema from trimmed header fields. Fails when fewer than two
    /// fields are present (id + class is the minimum).
    pub fn new(attributes: Vec<String>) -> Result<Self, PipelineError> {
        if attributes.len() < 2 {
            return Err(PipelineError::Schema {
                fields: attributes.len(),
            });
        }
        Ok(Schema { attributes })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn id_attribute(&self) -> &str {
        &self.attributes[0]
    }

    pub fn class_attribute(&self) -> &str {
        &self.attributes[self.attributes.len() - 1]
    }

    /// Predictor attribute names (everything between id and class). Empty
    /// for a two-column schema.
    pub fn predictors(&self) -> &[String] {
        &self.attributes[1..self.attributes.len() - 1]
    }
}

/// One data row, values aligned positionally with the schema.
///
/// Invariant (enforced by the loader): value count equals schema length and
/// the identifier is non-empty. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    values: Vec<String>,
}

impl Instance {
    pub fn new(values: Vec<String>) -> Self {
        Instance { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value(&self, index: usize) -> &str {
        &self.values[index]
    }

    /// Identifier value (first schema attribute).
    pub fn id(&self) -> &str {
        &self.values[0]
    }

    /// Class label value (last schema attribute).
    pub fn label(&self) -> &str {
        &self.values[self.values.len() - 1]
    }
}

/// An ordered sequence of instances sharing one schema.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub schema: Schema,
    pub instances: Vec<Instance>,
}

/// Disjoint training/testing subsets whose union is the full dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub training: Vec<Instance>,
    pub testing: Vec<Instance>,
}

/// Partition the dataset per class, keeping `train_fraction` of each class
/// for training (round-half-to-even on the split index).
///
/// Instances are sorted by identifier (lexicographic) inside each class
/// group before the cut, and both subsets are re-sorted by identifier
/// afterwards, so the split is byte-for-byte reproducible for identical
/// input. A class with a single instance lands entirely in training; the
/// caller decides whether an empty testing set is fatal.
///
/// Emits the split summary and both formatted tables into the report.
pub fn stratified_split(dataset: &Dataset, train_fraction: f64, report: &mut Report) -> Split {
    let mut by_class: HashMap<&str, Vec<&Instance>> = HashMap::new();
    for instance in &dataset.instances {
        by_class.entry(instance.label()).or_default().push(instance);
    }

    let mut training = Vec::new();
    let mut testing = Vec::new();
    for group in by_class.values_mut() {
        group.sort_by(|a, b| a.id().cmp(b.id()));
        let split_index = round_to(group.len() as f64 * train_fraction, 0) as usize;
        let split_index = split_index.min(group.len());
        for (i, instance) in group.iter().enumerate() {
            if i < split_index {
                training.push((*instance).clone());
            } else {
                testing.push((*instance).clone());
            }
        }
    }
    training.sort_by(|a, b| a.id().cmp(b.id()));
    testing.sort_by(|a, b| a.id().cmp(b.id()));

    log::debug!(
        "split {} instances into {} training / {} testing across {} classes",
        dataset.instances.len(),
        training.len(),
        testing.len(),
        by_class.len()
    );

    report.push("--- Data Split ---");
    report.push(format!("Training instances: {}", training.len()));
    report.push(format!("Testing instances: {}", testing.len()));
    report.blank();
    report.push("Training data (sorted by id):");
    report.extend(format_as_table(&dataset.schema, &training));
    report.blank();
    report.push("Testing data (sorted by id):");
    report.extend(format_as_table(&dataset.schema, &testing));
    report.blank();

    Split { training, testing }
}
