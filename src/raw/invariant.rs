use smallvec::SmallVec;
use thiserror::Error;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// A red-black or ordering rule broken by a tree.
///
/// Returned by [`RBTree::validate`](crate::RBTree::validate). A tree built only through
/// the public API never reports one unless its values' [`Ord`] impl is inconsistent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    /// The root node is red.
    #[error("root node is red")]
    RedRoot,
    /// A red node has a red child.
    #[error("red node has a red child")]
    RedRedEdge,
    /// Two sibling subtrees have different black-heights.
    #[error("black-height mismatch: left subtree {left}, right subtree {right}")]
    BlackHeightMismatch {
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
    /// An in-order successor compares less than its predecessor.
    #[error("in-order sequence is not sorted")]
    OutOfOrder,
}

/// Read-only verification pass over the subtree at `root`.
pub(crate) fn validate<T: Ord>(nodes: &Arena<Node<T>>, root: Option<Handle>) -> Result<(), Violation> {
    let Some(root) = root else {
        return Ok(());
    };
    if nodes.get(root).color().is_red() {
        return Err(Violation::RedRoot);
    }
    black_height(nodes, Some(root))?;
    check_order(nodes, root)
}

/// Black-height of a subtree, counting the vacant slot below each leaf as one.
///
/// Also rejects red-red edges met on the way, so a single pass checks both coloring
/// rules.
fn black_height<T>(nodes: &Arena<Node<T>>, handle: Option<Handle>) -> Result<usize, Violation> {
    let Some(handle) = handle else {
        return Ok(1);
    };
    let node = nodes.get(handle);
    if node.color().is_red() {
        let red_child = [node.left(), node.right()]
            .into_iter()
            .flatten()
            .any(|child| nodes.get(child).color().is_red());
        if red_child {
            return Err(Violation::RedRedEdge);
        }
    }
    let left = black_height(nodes, node.left())?;
    let right = black_height(nodes, node.right())?;
    if left != right {
        return Err(Violation::BlackHeightMismatch { left, right });
    }
    Ok(left + usize::from(node.color().is_black()))
}

/// Walks the subtree in order, requiring each value not to be less than the one before.
fn check_order<T: Ord>(nodes: &Arena<Node<T>>, root: Handle) -> Result<(), Violation> {
    let mut previous: Option<&T> = None;
    let mut stack: SmallVec<[Handle; 32]> = SmallVec::new();
    let mut next = Some(root);
    loop {
        while let Some(handle) = next {
            stack.push(handle);
            next = nodes.get(handle).left();
        }
        let Some(handle) = stack.pop() else {
            return Ok(());
        };
        let node = nodes.get(handle);
        if previous.is_some_and(|previous| node.value() < previous) {
            return Err(Violation::OutOfOrder);
        }
        previous = Some(node.value());
        next = node.right();
    }
}
