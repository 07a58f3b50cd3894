use crate::data::value::Value;
use crate::ModelError;

/// A confusion matrix over nominal class labels.
///
/// Rows are true labels, columns are predicted labels. The class list is the
/// union of both label vectors, sorted by the total value order, so the
/// layout does not depend on input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    classes: Vec<Value>,
    counts: Vec<Vec<usize>>,
    total: usize,
}

impl ConfusionMatrix {
    /// Builds the matrix from paired label vectors.
    ///
    /// # Errors
    ///
    /// Fails when the vectors differ in length or are empty.
    pub fn from_labels(y_true: &[Value], y_pred: &[Value]) -> Result<Self, ModelError> {
        if y_true.len() != y_pred.len() {
            return Err(ModelError::InvalidParameter(
                "predictions and labels are of different sizes".to_string(),
            ));
        }
        if y_true.is_empty() {
            return Err(ModelError::InvalidParameter(
                "cannot score an empty label vector".to_string(),
            ));
        }

        let mut classes: Vec<Value> = Vec::new();
        for label in y_true.iter().chain(y_pred) {
            if !classes.contains(label) {
                classes.push(label.clone());
            }
        }
        classes.sort_by(|a, b| a.compare(b));

        let n = classes.len();
        let mut counts = vec![vec![0usize; n]; n];
        for (truth, predicted) in y_true.iter().zip(y_pred) {
            let row = classes.iter().position(|c| c == truth);
            let col = classes.iter().position(|c| c == predicted);
            if let (Some(row), Some(col)) = (row, col) {
                counts[row][col] += 1;
            }
        }

        Ok(Self {
            classes,
            counts,
            total: y_true.len(),
        })
    }

    pub fn classes(&self) -> &[Value] {
        &self.classes
    }

    /// The number of instances with the given true label that received the
    /// given prediction. Unseen labels count zero.
    pub fn count(&self, truth: &Value, predicted: &Value) -> usize {
        let row = self.classes.iter().position(|c| c == truth);
        let col = self.classes.iter().position(|c| c == predicted);
        match (row, col) {
            (Some(row), Some(col)) => self.counts[row][col],
            _ => 0,
        }
    }

    /// Fraction of instances whose prediction matched the true label.
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.classes.len()).map(|i| self.counts[i][i]).sum();
        correct as f64 / self.total as f64
    }

    /// Of the instances predicted as `class`, the fraction that truly are.
    /// Zero when the class was never predicted.
    pub fn precision(&self, class: &Value) -> f64 {
        let col = match self.classes.iter().position(|c| c == class) {
            Some(col) => col,
            None => return 0.0,
        };
        let tp = self.counts[col][col];
        let predicted: usize = (0..self.classes.len()).map(|row| self.counts[row][col]).sum();
        if predicted > 0 {
            tp as f64 / predicted as f64
        } else {
            0.0
        }
    }

    /// Of the instances truly labeled `class`, the fraction predicted as
    /// such. Zero when the class never occurred.
    pub fn recall(&self, class: &Value) -> f64 {
        let row = match self.classes.iter().position(|c| c == class) {
            Some(row) => row,
            None => return 0.0,
        };
        let tp = self.counts[row][row];
        let actual: usize = self.counts[row].iter().sum();
        if actual > 0 {
            tp as f64 / actual as f64
        } else {
            0.0
        }
    }

    /// Unweighted mean of the per-class precisions.
    pub fn macro_precision(&self) -> f64 {
        let sum: f64 = self.classes.iter().map(|c| self.precision(c)).sum();
        sum / self.classes.len() as f64
    }

    /// Unweighted mean of the per-class recalls.
    pub fn macro_recall(&self) -> f64 {
        let sum: f64 = self.classes.iter().map(|c| self.recall(c)).sum();
        sum / self.classes.len() as f64
    }

    /// Harmonic mean of macro precision and macro recall.
    ///
    /// # Errors
    ///
    /// Fails when both are zero, where the score is undefined.
    pub fn f1_score(&self) -> Result<f64, ModelError> {
        let precision = self.macro_precision();
        let recall = self.macro_recall();
        if (precision + recall).abs() < f64::EPSILON {
            return Err(ModelError::InvalidParameter(
                "precision and recall are both zero, F1 score undefined".to_string(),
            ));
        }
        Ok(2.0 * (precision * recall) / (precision + recall))
    }
}
