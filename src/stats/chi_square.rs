use super::special::chi_square_inverse_cdf;
use crate::data::dataset::Dataset;
use nalgebra::DVector;

/// Pearson chi-square statistic of the association between `attribute` and
/// the class in `dataset`.
pub fn chi_square(dataset: &Dataset, attribute: usize) -> f64 {
    split_chi_square(
        &dataset.class_counts(),
        dataset.nrows(),
        &dataset.partition(attribute),
    )
}

/// Chi-square statistic of an already partitioned dataset.
///
/// `class_counts` and `total` describe the whole dataset, unknown bucket
/// included. The unknown bucket (the last one) takes no part in the sum, and
/// neither do empty buckets or cells whose expected count is zero.
pub fn split_chi_square(class_counts: &DVector<f64>, total: usize, buckets: &[Dataset]) -> f64 {
    let Some((_, known)) = buckets.split_last() else {
        return 0.0;
    };

    known
        .iter()
        .filter(|bucket| bucket.is_not_empty())
        .map(|bucket| {
            let share = bucket.nrows() as f64 / total as f64;
            let observed = bucket.class_counts();
            class_counts
                .iter()
                .zip(observed.iter())
                .map(|(&class_total, &observed)| {
                    let expected = class_total * share;
                    if expected > 0.0 {
                        (observed - expected).powi(2) / expected
                    } else {
                        0.0
                    }
                })
                .sum::<f64>()
        })
        .sum()
}

/// Value the statistic must exceed for a split on an attribute with
/// `num_values` values to be significant at `confidence_level`.
pub fn critical_value(confidence_level: f64, num_values: usize) -> f64 {
    chi_square_inverse_cdf(confidence_level, num_values.saturating_sub(1).max(1))
}

/// Fraction of buckets holding fewer than `min_bucket_size` instances.
///
/// The unknown bucket counts in both the numerator and the denominator.
pub fn small_bucket_ratio(buckets: &[Dataset], min_bucket_size: usize) -> f64 {
    if buckets.is_empty() {
        return 0.0;
    }
    let small = buckets
        .iter()
        .filter(|bucket| bucket.nrows() < min_bucket_size)
        .count();
    small as f64 / buckets.len() as f64
}
