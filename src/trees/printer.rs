use super::node::TreeNode;
use crate::data::attribute::Schema;
use std::fmt::{self, Display, Formatter};

/// Indented, depth-first text rendering of a tree.
///
/// Every branch of a split is printed on its own line as `name = value`,
/// prefixed by `|  ` once per level, and followed by the rendering of its
/// child. A leaf prints `: label` on the line of the branch that leads to it,
/// or `: null` when it has no class.
pub struct TreeDisplay<'a> {
    node: &'a TreeNode,
    schema: &'a Schema,
}

impl<'a> TreeDisplay<'a> {
    pub fn new(node: &'a TreeNode, schema: &'a Schema) -> Self {
        Self { node, schema }
    }

    fn fmt_level(&self, node: &TreeNode, level: usize, f: &mut Formatter<'_>) -> fmt::Result {
        match node {
            TreeNode::Leaf(leaf) => {
                let label = leaf
                    .class
                    .and_then(|class| self.schema.class_attribute().value(class));
                write!(f, ": {}", label.unwrap_or("null"))
            }
            TreeNode::Internal(split) => {
                let attribute = self.schema.attribute(split.attribute);
                for (value, branch) in split.branches.iter().enumerate() {
                    writeln!(f)?;
                    for _ in 0..level {
                        write!(f, "|  ")?;
                    }
                    write!(
                        f,
                        "{} = {}",
                        attribute.name(),
                        attribute.value(value).unwrap_or("?")
                    )?;
                    self.fmt_level(&branch.node, level + 1, f)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_level(self.node, 0, f)
    }
}

impl TreeNode {
    pub fn render(&self, schema: &Schema) -> String {
        TreeDisplay::new(self, schema).to_string()
    }
}
