use nalgebra::DVector;

/// Pearson chi-square statistic and pruning threshold
pub mod chi_square;
/// Entropy and information gain with missing values
pub mod entropy;
/// Gamma function and chi-square distribution
pub mod special;

/// Index of the largest value, ties going to the lowest index.
///
/// Returns 0 for an empty vector.
pub fn max_index(values: &DVector<f64>) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_index() {
        assert_eq!(max_index(&DVector::from_vec(vec![0.1, 0.7, 0.2])), 1);
        assert_eq!(max_index(&DVector::from_vec(vec![0.4, 0.4, 0.2])), 0);
        assert_eq!(max_index(&DVector::from_vec(vec![0.0, 0.0])), 0);
        assert_eq!(max_index(&DVector::from_vec(vec![])), 0);
    }
}
