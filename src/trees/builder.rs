//! Recursive ID3 induction with chi-square pre-pruning.
use super::node::{Branch, Leaf, LeafKind, Split, TreeNode};
use super::params::TreeParams;
use crate::data::dataset::Dataset;
use crate::stats::chi_square::{critical_value, small_bucket_ratio, split_chi_square};
use crate::stats::entropy::{entropy, information_gain};
use log::debug;

/// Gains closer to zero than this are treated as zero.
const GAIN_TOLERANCE: f64 = 1e-6;

pub struct TreeBuilder<'a> {
    params: &'a TreeParams,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(params: &'a TreeParams) -> Self {
        Self { params }
    }

    /// Grows a tree from `dataset`.
    ///
    /// The dataset must already satisfy the classifier's capabilities: every
    /// class value known and every value code inside its attribute's domain.
    pub fn build(&self, dataset: &Dataset) -> TreeNode {
        self.build_node(dataset, 0)
    }

    fn build_node(&self, dataset: &Dataset, depth: usize) -> TreeNode {
        let schema = dataset.schema();
        if !dataset.is_not_empty() {
            debug!("depth {}: no instances, uniform leaf", depth);
            return TreeNode::Leaf(Leaf::uniform(schema.num_classes(), LeafKind::Empty));
        }

        let entropy_of_all = entropy(dataset);
        let Some((attribute, gain)) = self.best_attribute(dataset, entropy_of_all) else {
            debug!(
                "depth {}: no attribute with non-negative gain, leaf over {} instances",
                depth,
                dataset.nrows()
            );
            return TreeNode::Leaf(Leaf::from_dataset(dataset, LeafKind::ZeroGain));
        };
        let name = schema.attribute(attribute).name();

        if gain < GAIN_TOLERANCE {
            debug!("depth {}: zero gain on '{}', leaf", depth, name);
            return TreeNode::Leaf(Leaf::from_dataset(
                &dataset.without_missing(attribute),
                LeafKind::ZeroGain,
            ));
        }

        let num_values = schema.attribute(attribute).num_values();
        let buckets = dataset.partition(attribute);
        let chi_square = split_chi_square(&dataset.class_counts(), dataset.nrows(), &buckets);
        let threshold = critical_value(self.params.confidence_level(), num_values);
        let applicable = small_bucket_ratio(&buckets, self.params.min_bucket_size())
            < self.params.max_small_bucket_ratio();

        if applicable && chi_square <= threshold {
            debug!(
                "depth {}: split on '{}' not significant (chi-square {:.4} <= {:.4}), pruned",
                depth, name, chi_square, threshold
            );
            return TreeNode::Leaf(Leaf::from_dataset(
                &dataset.without_missing(attribute),
                LeafKind::Pruned,
            ));
        }

        debug!(
            "depth {}: split on '{}' (gain {:.4}, chi-square {:.4}, threshold {:.4}, {} unknown)",
            depth,
            name,
            gain,
            chi_square,
            threshold,
            buckets[num_values].nrows()
        );
        let total = dataset.nrows() as f64;
        let branches = buckets
            .iter()
            .take(num_values)
            .map(|bucket| Branch {
                mass_ratio: bucket.nrows() as f64 / total,
                node: self.build_node(bucket, depth + 1),
            })
            .collect();

        TreeNode::Internal(Split {
            attribute,
            branches,
        })
    }

    /// Attribute with the highest information gain, ties going to the lowest
    /// index. `None` when there is no attribute or every gain is negative.
    fn best_attribute(&self, dataset: &Dataset, entropy_of_all: f64) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for attribute in 0..dataset.schema().num_attributes() {
            let gain = information_gain(dataset, attribute, entropy_of_all);
            if best.map_or(true, |(_, best_gain)| gain > best_gain) {
                best = Some((attribute, gain));
            }
        }
        best.filter(|&(_, gain)| gain >= 0.0)
    }
}
