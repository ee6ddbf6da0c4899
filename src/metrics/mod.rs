/// Confusion matrix and accuracy for nominal classifiers
pub mod confusion;
