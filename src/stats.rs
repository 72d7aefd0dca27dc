//! Confusion matrix construction and classification quality metrics.
//!
//! Accuracy = correct / total testing instances.
//! Precision = TP / (TP + FP), Recall = TP / (TP + FN), per class.
//! Every zero denominator yields 0.0 rather than an error.
use crate::math::round_to;
use crate::models::naive_bayes::Prediction;
use crate::report::Report;

/// Count table of actual vs predicted class outcomes.
///
/// Rows are the classes observed in training (sorted); columns are the
/// sorted union of training classes and every label that appeared as a
/// prediction, so a degenerate prediction outside the training classes
/// still lands in a column and counts toward the true class's false
/// negatives.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    actual_classes: Vec<String>,
    all_classes: Vec<String>,
    counts: Vec<Vec<usize>>,
}

/// Per-class outcome counts and derived metrics (2-decimal rounded).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub tp: usize,
    pub fp: usize,
    pub fn_: usize,
    pub precision: f64,
    pub recall: f64,
}

impl ConfusionMatrix {
    pub fn from_predictions(training_classes: &[String], predictions: &[Prediction]) -> Self {
        let mut actual_classes = training_classes.to_vec();
        actual_classes.sort();

        let mut all_classes = actual_classes.clone();
        for prediction in predictions {
            if !all_classes.contains(&prediction.predicted) {
                all_classes.push(prediction.predicted.clone());
            }
        }
        all_classes.sort();

        let mut counts = vec![vec![0usize; all_classes.len()]; actual_classes.len()];
        for prediction in predictions {
            if let Some(row) = actual_classes.iter().position(|c| *c == prediction.actual) {
                if let Some(col) = all_classes.iter().position(|c| *c == prediction.predicted) {
                    counts[row][col] += 1;
                }
            }
        }

        ConfusionMatrix {
            actual_classes,
            all_classes,
            counts,
        }
    }

    pub fn actual_classes(&self) -> &[String] {
        &self.actual_classes
    }

    pub fn all_classes(&self) -> &[String] {
        &self.all_classes
    }

    pub fn count(&self, actual: &str, predicted: &str) -> usize {
        let Some(row) = self.actual_classes.iter().position(|c| c == actual) else {
            return 0;
        };
        let Some(col) = self.all_classes.iter().position(|c| c == predicted) else {
            return 0;
        };
        self.counts[row][col]
    }

    /// Sum of diagonal entries over the training classes.
    pub fn correct_predictions(&self) -> usize {
        self.actual_classes
            .iter()
            .map(|class| self.count(class, class))
            .sum()
    }

    /// `correct / total_testing`, rounded to two decimals; 0.0 when there
    /// was nothing to test.
    pub fn accuracy(&self, total_testing: usize) -> f64 {
        if total_testing == 0 {
            return 0.0;
        }
        round_to(self.correct_predictions() as f64 / total_testing as f64, 2)
    }

    /// TP / FP / FN and precision/recall for one training class.
    ///
    /// FN sums over every column other than the class itself, so
    /// predictions outside the training classes still count against recall.
    pub fn class_metrics(&self, class: &str) -> ClassMetrics {
        let tp = self.count(class, class);
        let fp: usize = self
            .actual_classes
            .iter()
            .filter(|other| other.as_str() != class)
            .map(|other| self.count(other, class))
            .sum();
        let fn_: usize = self
            .all_classes
            .iter()
            .filter(|predicted| predicted.as_str() != class)
            .map(|predicted| self.count(class, predicted))
            .sum();

        let precision = if tp + fp > 0 {
            round_to(tp as f64 / (tp + fp) as f64, 2)
        } else {
            0.0
        };
        let recall = if tp + fn_ > 0 {
            round_to(tp as f64 / (tp + fn_) as f64, 2)
        } else {
            0.0
        };

        ClassMetrics {
            tp,
            fp,
            fn_,
            precision,
            recall,
        }
    }

    /// Fixed-width rendering (rows: actual, columns: predicted).
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.actual_classes.len() + 1);
        let mut header = format!("{:<15}", "Actual");
        for class in &self.all_classes {
            header.push_str(&format!("{:<15}", class));
        }
        lines.push(header);
        for (row, actual) in self.actual_classes.iter().enumerate() {
            let mut line = format!("{:<15}", actual);
            for count in &self.counts[row] {
                line.push_str(&format!("{:<15}", count));
            }
            lines.push(line);
        }
        lines
    }
}

/// Build the confusion matrix and append the full evaluation section
/// (matrix table, accuracy, per-class precision/recall with formulas) to
/// the report.
pub fn evaluate(
    training_classes: &[String],
    predictions: &[Prediction],
    total_testing: usize,
    report: &mut Report,
) -> ConfusionMatrix {
    let matrix = ConfusionMatrix::from_predictions(training_classes, predictions);

    report.push("--- Evaluation ---");
    report.push("Confusion matrix (rows: actual, columns: predicted):");
    report.extend(matrix.render());
    report.blank();

    let correct = matrix.correct_predictions();
    let accuracy = matrix.accuracy(total_testing);
    report.push("Accuracy = (correct predictions) / (total testing instances)");
    report.push(format!(
        "Accuracy = {} / {} = {} ({}%)",
        correct,
        total_testing,
        accuracy,
        round_to(accuracy * 100.0, 2)
    ));
    report.blank();

    for class in matrix.actual_classes() {
        let metrics = matrix.class_metrics(class);
        report.push(format!("For hypothesis: {}", class));
        report.push("  Precision = TP / (TP + FP)");
        report.push(format!(
            "  Precision = {} / ({} + {}) = {} ({}%)",
            metrics.tp,
            metrics.tp,
            metrics.fp,
            metrics.precision,
            round_to(metrics.precision * 100.0, 2)
        ));
        report.push("  Recall  = TP / (TP + FN)");
        report.push(format!(
            "  Recall  = {} / ({} + {}) = {} ({}%)",
            metrics.tp,
            metrics.tp,
            metrics.fn_,
            metrics.recall,
            round_to(metrics.recall * 100.0, 2)
        ));
        report.blank();
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(actual: &str, predicted: &str) -> Prediction {
        Prediction {
            actual: actual.to_string(),
            predicted: predicted.to_string(),
        }
    }

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn counts_land_in_actual_by_predicted_cells() {
        let matrix = ConfusionMatrix::from_predictions(
            &classes(&["Yes", "No"]),
            &[
                prediction("Yes", "Yes"),
                prediction("No", "Yes"),
                prediction("No", "No"),
            ],
        );
        assert_eq!(matrix.actual_classes(), &["No", "Yes"]);
        assert_eq!(matrix.count("Yes", "Yes"), 1);
        assert_eq!(matrix.count("No", "Yes"), 1);
        assert_eq!(matrix.count("No", "No"), 1);
        assert_eq!(matrix.count("Yes", "No"), 0);
        assert_eq!(matrix.correct_predictions(), 2);
    }

    #[test]
    fn accuracy_is_diagonal_over_total() {
        let matrix = ConfusionMatrix::from_predictions(
            &classes(&["Yes", "No"]),
            &[
                prediction("Yes", "Yes"),
                prediction("No", "Yes"),
                prediction("No", "No"),
            ],
        );
        assert_eq!(matrix.accuracy(3), 0.67);
        assert_eq!(matrix.accuracy(0), 0.0);
    }

    #[test]
    fn precision_and_recall_per_class() {
        let matrix = ConfusionMatrix::from_predictions(
            &classes(&["Yes", "No"]),
            &[
                prediction("Yes", "Yes"),
                prediction("No", "Yes"),
                prediction("No", "No"),
            ],
        );
        let yes = matrix.class_metrics("Yes");
        assert_eq!((yes.tp, yes.fp, yes.fn_), (1, 1, 0));
        assert_eq!(yes.precision, 0.5);
        assert_eq!(yes.recall, 1.0);

        let no = matrix.class_metrics("No");
        assert_eq!((no.tp, no.fp, no.fn_), (1, 0, 1));
        assert_eq!(no.precision, 1.0);
        assert_eq!(no.recall, 0.5);
    }

    #[test]
    fn predicted_label_outside_training_classes_extends_columns() {
        let matrix = ConfusionMatrix::from_predictions(
            &classes(&["Yes"]),
            &[prediction("Yes", "Mystery")],
        );
        assert_eq!(matrix.actual_classes(), &["Yes"]);
        assert_eq!(matrix.all_classes(), &["Mystery", "Yes"]);
        assert_eq!(matrix.count("Yes", "Mystery"), 1);

        let yes = matrix.class_metrics("Yes");
        assert_eq!((yes.tp, yes.fp, yes.fn_), (0, 0, 1));
        // zero denominators stay 0.0 instead of dividing by zero
        assert_eq!(yes.precision, 0.0);
        assert_eq!(yes.recall, 0.0);
        assert_eq!(matrix.accuracy(1), 0.0);
    }

    #[test]
    fn metrics_stay_within_unit_interval() {
        let matrix = ConfusionMatrix::from_predictions(
            &classes(&["A", "B", "C"]),
            &[
                prediction("A", "A"),
                prediction("A", "B"),
                prediction("B", "B"),
                prediction("C", "A"),
                prediction("C", "C"),
            ],
        );
        let accuracy = matrix.accuracy(5);
        assert!((0.0..=1.0).contains(&accuracy));
        for class in matrix.actual_classes() {
            let metrics = matrix.class_metrics(class);
            assert!((0.0..=1.0).contains(&metrics.precision));
            assert!((0.0..=1.0).contains(&metrics.recall));
        }
    }

    #[test]
    fn render_pads_columns_to_fixed_width() {
        let matrix =
            ConfusionMatrix::from_predictions(&classes(&["Yes", "No"]), &[prediction("Yes", "Yes")]);
        let lines = matrix.render();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Actual"));
        assert!(lines[0].contains("No"));
        assert!(lines[0].contains("Yes"));
    }
}
