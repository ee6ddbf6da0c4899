use crate::data::dataset::Dataset;
use nalgebra::DVector;

/// Shannon entropy in bits of a class distribution given by raw counts.
///
/// Classes with a zero count contribute nothing; a distribution with at most
/// one non-empty class has an entropy of exactly zero.
pub fn entropy_of_counts(counts: &DVector<f64>) -> f64 {
    if counts.iter().filter(|&&count| count > 0.0).count() <= 1 {
        return 0.0;
    }
    weighted_entropy(counts, counts.sum())
}

/// Entropy of the class distribution of `dataset`.
pub fn entropy(dataset: &Dataset) -> f64 {
    entropy_of_counts(&dataset.class_counts())
}

/// Entropy of a known-value bucket with the unknown bucket folded in.
///
/// Each class count of `known` is incremented by `unknown_class_counts[c] *
/// ratio` before the sum is normalized by the size of `known`, so the
/// unknown instances are shared among the buckets in proportion to `ratio`.
pub fn entropy_with_unknowns(
    known: &Dataset,
    unknown_class_counts: &DVector<f64>,
    ratio: f64,
) -> f64 {
    let counts = known.class_counts() + unknown_class_counts * ratio;
    weighted_entropy(&counts, known.nrows() as f64)
}

/// `log2(n) - Σ c·log2(c) / n`, which is the Shannon entropy when the
/// counts sum to `n`.
fn weighted_entropy(counts: &DVector<f64>, total: f64) -> f64 {
    let sum = counts
        .iter()
        .filter(|&&count| count > 0.0)
        .map(|&count| count * count.log2())
        .sum::<f64>();
    total.log2() - sum / total
}

/// Information gain of splitting `dataset` on `attribute`.
///
/// `entropy_of_all` is the entropy of the whole dataset, computed once per
/// node and shared by every candidate attribute.
pub fn information_gain(dataset: &Dataset, attribute: usize, entropy_of_all: f64) -> f64 {
    split_information_gain(dataset.nrows(), &dataset.partition(attribute), entropy_of_all)
}

/// Information gain of an already partitioned dataset of `total` instances.
///
/// The last bucket holds the instances missing the attribute. The gain is
/// zero when every instance is missing it, and when the class distribution
/// is already pure.
pub fn split_information_gain(total: usize, buckets: &[Dataset], entropy_of_all: f64) -> f64 {
    let Some((unknown, known)) = buckets.split_last() else {
        return 0.0;
    };
    let num_unknown = unknown.nrows();
    if num_unknown == total || entropy_of_all == 0.0 {
        return 0.0;
    }

    let unknown_class_counts = unknown.class_counts();
    let total = total as f64;
    let mut gain = entropy_of_all;
    for bucket in known.iter().filter(|bucket| bucket.is_not_empty()) {
        let size = bucket.nrows() as f64;
        let ratio = size / total;
        let weight = (size + num_unknown as f64 * ratio) / total;
        gain -= weight * entropy_with_unknowns(bucket, &unknown_class_counts, ratio);
    }
    gain
}
