use std::error::Error;

use nalgebra::{DMatrix, DVector};
use num_traits::FromPrimitive;

type ConfusionMatrix = DMatrix<usize>;

pub trait ClassificationMetrics {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are indexed by the true class and columns by the predicted class,
    /// so row and column `c` both belong to class value `c`.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The true class values.
    /// * `y_pred` - The predicted class values.
    /// * `num_classes` - Number of values of the class attribute.
    fn confusion_matrix(
        &self,
        y_true: &DVector<usize>,
        y_pred: &DVector<usize>,
        num_classes: usize,
    ) -> Result<ConfusionMatrix, Box<dyn Error>> {
        if y_true.len() != y_pred.len() {
            return Err("Predictions and labels are of different sizes.".into());
        }

        let mut matrix = DMatrix::zeros(num_classes, num_classes);
        for (&y_t, &y_p) in y_true.iter().zip(y_pred.iter()) {
            if y_t >= num_classes || y_p >= num_classes {
                return Err(format!("Class value outside of 0..{}.", num_classes).into());
            }
            matrix[(y_t, y_p)] += 1;
        }

        Ok(matrix)
    }

    /// Computes the fraction of predictions equal to the true labels.
    fn accuracy(&self, y_true: &DVector<usize>, y_pred: &DVector<usize>) -> Result<f64, Box<dyn Error>> {
        if y_true.len() != y_pred.len() {
            return Err("Predictions and labels are of different sizes.".into());
        }
        if y_true.is_empty() {
            return Err("Accuracy of an empty set of predictions is undefined.".into());
        }

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(y_t, y_p)| y_t == y_p)
            .count();
        let correct = f64::from_usize(correct).ok_or("Couldn't transform from usize")?;
        let n = f64::from_usize(y_true.len()).ok_or("Couldn't transform from usize")?;

        Ok(correct / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct MockClassifier;

    impl ClassificationMetrics for MockClassifier {}

    #[test]
    fn test_confusion_matrix() {
        let classifier = MockClassifier;

        let y_true = DVector::from_vec(vec![1, 0, 1, 0, 1]);
        let y_pred = DVector::from_vec(vec![1, 1, 0, 0, 1]);

        let result = classifier.confusion_matrix(&y_true, &y_pred, 2).unwrap();
        let expected = DMatrix::from_vec(2, 2, vec![1, 1, 1, 2]);

        assert_eq!(result, expected);
    }

    #[test]
    fn test_confusion_matrix_keeps_unseen_classes() {
        let classifier = MockClassifier;

        let y_true = DVector::from_vec(vec![0, 2, 2]);
        let y_pred = DVector::from_vec(vec![0, 2, 0]);

        let result = classifier.confusion_matrix(&y_true, &y_pred, 3).unwrap();

        assert_eq!(result.shape(), (3, 3));
        assert_eq!(result.row(1).sum(), 0);
        assert_eq!(result[(2, 0)], 1);
        assert_eq!(result[(2, 2)], 1);
    }

    #[test]
    fn test_confusion_matrix_unequal() {
        let classifier = MockClassifier;

        let y_true = DVector::from_vec(vec![1, 0, 1, 0, 1, 0]);
        let y_pred = DVector::from_vec(vec![1, 1, 0, 0, 1]);

        assert!(classifier.confusion_matrix(&y_true, &y_pred, 2).is_err());
    }

    #[test]
    fn test_confusion_matrix_out_of_range() {
        let classifier = MockClassifier;

        let y_true = DVector::from_vec(vec![0, 3]);
        let y_pred = DVector::from_vec(vec![0, 1]);

        assert!(classifier.confusion_matrix(&y_true, &y_pred, 2).is_err());
    }

    #[test]
    fn test_accuracy() {
        let classifier = MockClassifier;

        let y_true = DVector::from_vec(vec![1, 0, 1, 0, 1]);
        let y_pred = DVector::from_vec(vec![1, 1, 0, 0, 1]);

        let result = classifier.accuracy(&y_true, &y_pred).unwrap();

        assert_relative_eq!(result, 0.6);
    }

    #[test]
    fn test_accuracy_perfect_classification() {
        let classifier = MockClassifier;

        let y_true = DVector::from_vec(vec![1, 0, 1, 0, 1]);

        let result = classifier.accuracy(&y_true, &y_true).unwrap();

        assert_relative_eq!(result, 1.0);
    }

    #[test]
    fn test_accuracy_empty() {
        let classifier = MockClassifier;

        let empty = DVector::<usize>::zeros(0);

        assert!(classifier.accuracy(&empty, &empty).is_err());
    }
}
