//! Categorical Naive Bayes with Laplace (add-one) smoothing.
//!
//! Every prior and likelihood is rounded to two decimals at the point of
//! computation and used in rounded form downstream, so rounding error
//! compounds across attributes exactly as it does in the hand calculation
//! this model reproduces. Unnormalized scores are rounded to six decimals.
use std::collections::{BTreeSet, HashMap};

use crate::data_handling::{Instance, Schema};
use crate::error::PipelineError;
use crate::math::round_to;
use crate::report::Report;

/// Outcome of scoring one testing instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub actual: String,
    pub predicted: String,
}

/// Immutable-after-fit model state.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    /// Class labels in first-seen order over the id-sorted training set.
    /// This order is the argmax tie-break: the first maximal class wins.
    classes: Vec<String>,
    class_counts: HashMap<String, usize>,
    priors: HashMap<String, f64>,
    /// Distinct values per predictor attribute across all of training,
    /// independent of class. The set size is the Laplace denominator `V`.
    /// Ordered sets keep the derivation lines reproducible.
    unique_values: HashMap<String, BTreeSet<String>>,
    /// class -> attribute -> value -> rounded likelihood. Covers every
    /// training-seen value for every class, so a lookup only misses for
    /// values absent from `unique_values`.
    likelihoods: HashMap<String, HashMap<String, HashMap<String, f64>>>,
}

impl NaiveBayesModel {
    /// Fit priors and Laplace-smoothed likelihoods from the training set,
    /// appending the derivation lines to the report.
    ///
    /// For every class and attribute the likelihood table iterates over all
    /// values seen for that attribute anywhere in training, not just inside
    /// the class, so unseen (class, value) combinations get the smoothing
    /// floor `1 / (class_count + V)` instead of collapsing to zero.
    pub fn fit(
        schema: &Schema,
        training: &[Instance],
        report: &mut Report,
    ) -> Result<Self, PipelineError> {
        if training.is_empty() {
            return Err(PipelineError::EmptySplit);
        }

        let predictors = schema.predictors();
        let total = training.len();

        let mut classes: Vec<String> = Vec::new();
        let mut class_counts: HashMap<String, usize> = HashMap::new();
        for instance in training {
            let label = instance.label();
            if !class_counts.contains_key(label) {
                classes.push(label.to_string());
            }
            *class_counts.entry(label.to_string()).or_insert(0) += 1;
        }

        let mut priors: HashMap<String, f64> = HashMap::new();
        report.push("--- Prior Probabilities ---");
        for class in &classes {
            let count = class_counts[class];
            let prior = round_to(count as f64 / total as f64, 2);
            report.push(format!("P('{}') = {} / {} = {}", class, count, total, prior));
            priors.insert(class.clone(), prior);
        }
        report.blank();

        // (class, attribute, value) co-occurrence counts; absent means zero
        let mut value_counts: HashMap<(String, String, String), usize> = HashMap::new();
        let mut unique_values: HashMap<String, BTreeSet<String>> = HashMap::new();
        for instance in training {
            let label = instance.label();
            for (offset, attr) in predictors.iter().enumerate() {
                let value = instance.value(offset + 1);
                unique_values
                    .entry(attr.clone())
                    .or_default()
                    .insert(value.to_string());
                *value_counts
                    .entry((label.to_string(), attr.clone(), value.to_string()))
                    .or_insert(0) += 1;
            }
        }

        let empty = BTreeSet::new();
        let mut likelihoods: HashMap<String, HashMap<String, HashMap<String, f64>>> =
            HashMap::new();
        report.push("--- Likelihood Computation (Laplace smoothing) ---");
        for class in &classes {
            let n_class = class_counts[class];
            report.blank();
            report.push(format!(
                "For hypothesis: {} (training instances for this class: {})",
                class, n_class
            ));
            for attr in predictors {
                let values = unique_values.get(attr).unwrap_or(&empty);
                let v = values.len();
                report.push(format!(
                    "  Attribute '{}' (distinct training values: {})",
                    attr, v
                ));
                for value in values {
                    let count = value_counts
                        .get(&(class.clone(), attr.clone(), value.clone()))
                        .copied()
                        .unwrap_or(0);
                    let denominator = n_class + v;
                    let likelihood = if denominator > 0 {
                        round_to((count as f64 + 1.0) / denominator as f64, 2)
                    } else {
                        0.0
                    };
                    report.push(format!(
                        "    P('{}'='{}' | '{}') = ({} + 1) / ({} + {}) = {}",
                        attr, value, class, count, n_class, v, likelihood
                    ));
                    likelihoods
                        .entry(class.clone())
                        .or_default()
                        .entry(attr.clone())
                        .or_default()
                        .insert(value.clone(), likelihood);
                }
            }
        }
        report.blank();

        log::debug!(
            "fitted model over {} training instances: {} classes, {} predictors",
            total,
            classes.len(),
            predictors.len()
        );

        Ok(NaiveBayesModel {
            classes,
            class_counts,
            priors,
            unique_values,
            likelihoods,
        })
    }

    /// Class labels in first-seen training order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn prior(&self, class: &str) -> Option<f64> {
        self.priors.get(class).copied()
    }

    pub fn class_count(&self, class: &str) -> usize {
        self.class_counts.get(class).copied().unwrap_or(0)
    }

    /// Number of distinct training values for an attribute (the `V` in the
    /// smoothing denominator).
    pub fn distinct_values(&self, attribute: &str) -> usize {
        self.unique_values
            .get(attribute)
            .map(|values| values.len())
            .unwrap_or(0)
    }

    /// Table lookup; `None` only for values never seen for the attribute.
    pub fn likelihood(&self, class: &str, attribute: &str, value: &str) -> Option<f64> {
        self.likelihoods
            .get(class)?
            .get(attribute)?
            .get(value)
            .copied()
    }

    /// Score one testing instance against every training class and pick the
    /// argmax, appending the multiplication breakdown to the report.
    ///
    /// Values the model never saw for an attribute fall back to the same
    /// smoothing formula computed on the fly: `(0 + 1) / (class_count + V)`.
    /// When every unnormalized score underflows to zero the percentages are
    /// all `0%` and the tie-break still applies.
    pub fn predict(&self, schema: &Schema, instance: &Instance, report: &mut Report) -> Prediction {
        let predictors = schema.predictors();
        let actual = instance.label().to_string();

        report.push(format!("Testing instance id: {}", instance.id()));
        let attr_values: Vec<String> = predictors
            .iter()
            .enumerate()
            .map(|(offset, attr)| format!("{}={}", attr, instance.value(offset + 1)))
            .collect();
        report.push(format!("  Attributes: ({})", attr_values.join(";")));
        report.push(format!("  Actual class: {}", actual));

        let mut scores: Vec<(String, f64)> = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let prior = self.priors[class];
            let mut score = prior;
            let mut steps = vec![format!("P('{}') = {}", class, prior)];
            report.push(format!("  Computing for hypothesis: {}", class));

            for (offset, attr) in predictors.iter().enumerate() {
                let value = instance.value(offset + 1);
                let seen = self
                    .unique_values
                    .get(attr)
                    .map(|values| values.contains(value))
                    .unwrap_or(false);
                let likelihood = if seen {
                    self.likelihood(class, attr, value).unwrap_or(0.0)
                } else {
                    // genuinely novel value: no table entry exists, so the
                    // smoothing formula runs on the fly with count = 0
                    let n_class = self.class_count(class);
                    let v = self.distinct_values(attr);
                    let denominator = n_class + v;
                    let fallback = if denominator > 0 {
                        round_to(1.0 / denominator as f64, 2)
                    } else {
                        0.0
                    };
                    report.push(format!(
                        "    value '{}' unseen in training for '{}': P = (0 + 1) / ({} + {}) = {}",
                        value, attr, n_class, v, fallback
                    ));
                    fallback
                };
                score *= likelihood;
                steps.push(format!("* {}", likelihood));
            }

            let score = round_to(score, 6);
            report.push(format!(
                "    P(instance | '{}') * P('{}') = {} = {}",
                class,
                class,
                steps.join(" "),
                score
            ));
            scores.push((class.clone(), score));
        }

        let total: f64 = scores.iter().map(|(_, score)| *score).sum();
        let percentages: Vec<String> = scores
            .iter()
            .map(|(class, score)| {
                let normalized = if total > 0.0 { score / total } else { 0.0 };
                format!("{}: {}%", class, round_to(normalized * 100.0, 2))
            })
            .collect();

        // first maximum in class insertion order wins
        let mut predicted = scores[0].0.clone();
        let mut best = scores[0].1;
        for (class, score) in &scores[1..] {
            if *score > best {
                best = *score;
                predicted = class.clone();
            }
        }

        let unnormalized: Vec<String> = scores
            .iter()
            .map(|(class, score)| format!("{}: {}", class, score))
            .collect();
        report.push(format!(
            "  Unnormalized probabilities: {{{}}}",
            unnormalized.join(", ")
        ));
        report.push(format!(
            "  Percentage probabilities: {}",
            percentages.join(", ")
        ));
        report.push(format!("  Prediction: {}", predicted));
        report.blank();

        Prediction { actual, predicted }
    }
}
