use std::fmt::{self, Display, Formatter};

use crate::data::value::Value;
use crate::trees::condition::Condition;

/// Decision tree node.
///
/// `condition` is the branch test that leads into this node; it is `None`
/// only at the root. Leaf-ness is explicit in [`NodeKind`], so a node whose
/// whole training subset was pure can be a leaf even at the root.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub condition: Option<Condition>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Terminal node: predicted label plus the number of training instances
    /// that supported it.
    Leaf { label: Value, count: usize },
    /// Internal node with one child per branch condition, in construction
    /// order.
    Internal { children: Vec<TreeNode> },
}

impl TreeNode {
    pub fn new(condition: Option<Condition>, kind: NodeKind) -> Self {
        Self { condition, kind }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Internal { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    fn render(&self, indentation: &str, out: &mut Formatter<'_>) -> fmt::Result {
        match (&self.condition, &self.kind) {
            (Some(condition), NodeKind::Leaf { label, count }) => {
                writeln!(out, "{}{} : {} ({})", indentation, condition, label, count)?;
            }
            (Some(condition), NodeKind::Internal { .. }) => {
                writeln!(out, "{}{}", indentation, condition)?;
            }
            (None, NodeKind::Leaf { label, count }) => {
                writeln!(out, "{}{} ({})", indentation, label, count)?;
            }
            (None, NodeKind::Internal { .. }) => {}
        }
        let deeper = if self.condition.is_some() {
            format!("{}|  ", indentation)
        } else {
            indentation.to_string()
        };
        for child in self.children() {
            child.render(&deeper, out)?;
        }
        Ok(())
    }
}

impl Display for TreeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render("", f)
    }
}
