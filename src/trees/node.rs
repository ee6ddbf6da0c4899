use crate::data::dataset::Dataset;
use crate::stats::max_index;
use nalgebra::DVector;

/// Reason a leaf was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafKind {
    /// No training instance reached the node.
    Empty,
    /// The best attribute gave no information gain.
    ZeroGain,
    /// The chi-square test did not find the best split significant.
    Pruned,
}

/// Terminal node holding a class distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    /// Normalized class frequencies, uniform when nothing was observed.
    pub distribution: DVector<f64>,
    /// Majority class, `None` when no instance supports a decision.
    pub class: Option<usize>,
    pub kind: LeafKind,
}

impl Leaf {
    /// Leaf of total ignorance: every class gets `1 / num_classes`.
    pub fn uniform(num_classes: usize, kind: LeafKind) -> Self {
        Self {
            distribution: DVector::from_element(num_classes, 1.0 / num_classes as f64),
            class: None,
            kind,
        }
    }

    /// Leaf predicting the class distribution of `dataset`.
    pub fn from_dataset(dataset: &Dataset, kind: LeafKind) -> Self {
        let counts = dataset.class_counts();
        let total = counts.sum();
        if total <= 0.0 {
            return Self::uniform(counts.len(), kind);
        }
        let distribution = counts / total;
        let class = Some(max_index(&distribution));
        Self {
            distribution,
            class,
            kind,
        }
    }
}

/// Edge from an internal node to one of its children.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// Instances routed to the child divided by the instances that reached
    /// the parent, those missing the split attribute included.
    pub mass_ratio: f64,
    pub node: TreeNode,
}

/// Internal node testing one attribute, with a branch per attribute value.
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    pub attribute: usize,
    pub branches: Vec<Branch>,
}

/// Decision tree node
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Leaf(Leaf),
    Internal(Split),
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            TreeNode::Leaf(leaf) => Some(leaf),
            TreeNode::Internal(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&Split> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Internal(split) => Some(split),
        }
    }

    pub fn num_nodes(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Internal(split) => {
                1 + split
                    .branches
                    .iter()
                    .map(|branch| branch.node.num_nodes())
                    .sum::<usize>()
            }
        }
    }

    pub fn num_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Internal(split) => split
                .branches
                .iter()
                .map(|branch| branch.node.num_leaves())
                .sum(),
        }
    }

    /// Number of splits on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Internal(split) => {
                1 + split
                    .branches
                    .iter()
                    .map(|branch| branch.node.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::attribute::{Attribute, Schema};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn leaf(class: usize) -> TreeNode {
        let mut distribution = DVector::zeros(2);
        distribution[class] = 1.0;
        TreeNode::Leaf(Leaf {
            distribution,
            class: Some(class),
            kind: LeafKind::ZeroGain,
        })
    }

    #[test]
    fn test_uniform_leaf() {
        let leaf = Leaf::uniform(4, LeafKind::Empty);
        assert_eq!(leaf.class, None);
        assert!(leaf.distribution.iter().all(|&p| p == 0.25));
    }

    #[test]
    fn test_leaf_from_dataset_normalizes_and_breaks_ties_low() {
        let schema = Arc::new(Schema::new(
            vec![Attribute::from_labels("Weather", &["Sunny", "Rainy"])],
            Attribute::from_labels("Play", &["Yes", "No", "Maybe"]),
        ));
        let dataset = Dataset::from_rows(
            schema,
            vec![vec![Some(0)], vec![Some(1)], vec![None], vec![Some(0)]],
            vec![Some(1), Some(2), Some(1), Some(2)],
        )
        .unwrap();

        let leaf = Leaf::from_dataset(&dataset, LeafKind::Pruned);
        assert_relative_eq!(leaf.distribution[0], 0.0);
        assert_relative_eq!(leaf.distribution[1], 0.5);
        assert_relative_eq!(leaf.distribution[2], 0.5);
        assert_eq!(leaf.class, Some(1));
        assert_eq!(leaf.kind, LeafKind::Pruned);
    }

    #[test]
    fn test_leaf_from_empty_dataset_is_uniform() {
        let schema = Arc::new(Schema::new(
            vec![Attribute::from_labels("Weather", &["Sunny", "Rainy"])],
            Attribute::from_labels("Play", &["Yes", "No"]),
        ));
        let dataset = Dataset::from_rows(schema, vec![], vec![]).unwrap();
        let leaf = Leaf::from_dataset(&dataset, LeafKind::ZeroGain);
        assert_eq!(leaf.class, None);
        assert_relative_eq!(leaf.distribution[0], 0.5);
        assert_relative_eq!(leaf.distribution[1], 0.5);
    }

    #[test]
    fn test_tree_shape() {
        let inner = TreeNode::Internal(Split {
            attribute: 1,
            branches: vec![
                Branch {
                    mass_ratio: 0.5,
                    node: leaf(0),
                },
                Branch {
                    mass_ratio: 0.5,
                    node: leaf(1),
                },
            ],
        });
        let root = TreeNode::Internal(Split {
            attribute: 0,
            branches: vec![
                Branch {
                    mass_ratio: 0.6,
                    node: inner,
                },
                Branch {
                    mass_ratio: 0.4,
                    node: leaf(1),
                },
            ],
        });

        assert!(!root.is_leaf());
        assert_eq!(root.num_nodes(), 5);
        assert_eq!(root.num_leaves(), 3);
        assert_eq!(root.depth(), 2);
        assert_eq!(root.as_split().map(|split| split.attribute), Some(0));
        assert!(leaf(0).as_leaf().is_some());
    }
}
