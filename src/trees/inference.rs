//! Classification walks over a finished tree.
use super::node::{Split, TreeNode};
use crate::data::attribute::Schema;
use crate::error::TreeError;
use nalgebra::DVector;

impl TreeNode {
    /// Token-weighted class vector for `instance`.
    ///
    /// A leaf returns `token` times its distribution. A split passes
    /// `token * mass_ratio` to the child matching the instance's value, or to
    /// every child when the value is missing, and sums what they return.
    /// The ratio is applied on the single known branch as well, so the result
    /// is only proportional to a probability distribution.
    pub fn token_distribution(
        &self,
        schema: &Schema,
        instance: &[Option<usize>],
        token: f64,
    ) -> Result<DVector<f64>, TreeError> {
        match self {
            TreeNode::Leaf(leaf) => Ok(&leaf.distribution * token),
            TreeNode::Internal(split) => match instance[split.attribute] {
                Some(value) => {
                    let branch = &split.branches[checked_value(schema, split, value)?];
                    branch
                        .node
                        .token_distribution(schema, instance, token * branch.mass_ratio)
                }
                None => {
                    let mut total = DVector::zeros(schema.num_classes());
                    for branch in &split.branches {
                        total += branch.node.token_distribution(
                            schema,
                            instance,
                            token * branch.mass_ratio,
                        )?;
                    }
                    Ok(total)
                }
            },
        }
    }

    /// Stored distribution of the leaf `instance` reaches.
    ///
    /// Only defined for instances that know every attribute tested on their
    /// path; a missing value yields [`TreeError::UndefinedQuery`] instead of a
    /// guess. Use [`TreeNode::token_distribution`] when values may be missing.
    pub fn strict_distribution(
        &self,
        schema: &Schema,
        instance: &[Option<usize>],
    ) -> Result<&DVector<f64>, TreeError> {
        match self {
            TreeNode::Leaf(leaf) => Ok(&leaf.distribution),
            TreeNode::Internal(split) => {
                let value = instance[split.attribute].ok_or_else(|| TreeError::UndefinedQuery {
                    attribute: schema.attribute(split.attribute).name().to_string(),
                })?;
                split.branches[checked_value(schema, split, value)?]
                    .node
                    .strict_distribution(schema, instance)
            }
        }
    }
}

fn checked_value(schema: &Schema, split: &Split, value: usize) -> Result<usize, TreeError> {
    if value < split.branches.len() {
        Ok(value)
    } else {
        Err(TreeError::ValueOutOfRange {
            attribute: schema.attribute(split.attribute).name().to_string(),
            value,
            num_values: split.branches.len(),
        })
    }
}
