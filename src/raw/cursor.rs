use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// Slots visited from the root down to the current position.
///
/// `path[0]` is the root slot. Every later entry is a child slot of the entry before
/// it; only the last entry may be vacant (`None`).
type Path = SmallVec<[Option<Handle>; 32]>;

/// A navigation request the cursor's recorded path cannot satisfy.
///
/// These only arise from a bug in the code driving the cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub(crate) enum CursorError {
    #[error("no ancestor {requested} levels up, path holds only {available} above the current slot")]
    NoSuchAncestor { requested: usize, available: usize },
    #[error("child side is undefined for the root slot")]
    UndefinedForRoot,
    #[error("cannot descend from a vacant slot")]
    NoSuchChild,
    #[error("cannot move up from the root slot")]
    AtRoot,
}

/// A top-down path through the tree standing in for parent links.
///
/// The cursor is built during a single insertion and dropped when its fixup is done.
/// It borrows the arena and the root slot mutably for that whole time, so nothing else
/// can observe the tree while rotations are half applied.
pub(crate) struct Cursor<'a, T> {
    nodes: &'a mut Arena<Node<T>>,
    root: &'a mut Option<Handle>,
    path: Path,
    // The side last descended into. A vacant slot has no node to compare against, so
    // this is the only record of which side of its parent it sits on.
    leaf_side: Side,
}

impl<'a, T> Cursor<'a, T> {
    /// Positions a new cursor at the root slot.
    pub(crate) fn new(nodes: &'a mut Arena<Node<T>>, root: &'a mut Option<Handle>) -> Self {
        let path = smallvec![*root];
        Self {
            nodes,
            root,
            path,
            leaf_side: Side::Left,
        }
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    /// Stores a detached node in the arena. It is unreachable until passed to
    /// [`replace`](Self::replace).
    pub(crate) fn alloc(&mut self, node: Node<T>) -> Handle {
        self.nodes.alloc(node)
    }

    /// The node at the current position, or `None` for a vacant slot.
    #[inline]
    pub(crate) fn current(&self) -> Option<Handle> {
        self.path.last().copied().flatten()
    }

    #[inline]
    pub(crate) fn is_root(&self) -> bool {
        self.path.len() == 1
    }

    /// Number of entries on the path, root slot included.
    pub(crate) fn level(&self) -> usize {
        self.path.len()
    }

    /// The node `k` levels above the current position.
    pub(crate) fn parent(&self, k: usize) -> Result<Handle, CursorError> {
        let available = self.path.len() - 1;
        if k == 0 || k > available {
            return Err(CursorError::NoSuchAncestor { requested: k, available });
        }
        self.path[available - k].ok_or(CursorError::NoSuchAncestor { requested: k, available })
    }

    /// Which child slot of its parent the current position occupies.
    pub(crate) fn side(&self) -> Result<Side, CursorError> {
        if self.is_root() {
            return Err(CursorError::UndefinedForRoot);
        }
        let parent = self.parent(1)?;
        match self.current() {
            Some(handle) if self.nodes.get(parent).left() == Some(handle) => Ok(Side::Left),
            Some(_) => Ok(Side::Right),
            None => Ok(self.leaf_side),
        }
    }

    pub(crate) fn is_left_child(&self) -> Result<bool, CursorError> {
        self.side().map(|side| side == Side::Left)
    }

    pub(crate) fn is_right_child(&self) -> Result<bool, CursorError> {
        self.side().map(|side| side == Side::Right)
    }

    /// Drops the current position and returns the node that becomes current.
    pub(crate) fn up(&mut self) -> Result<Option<Handle>, CursorError> {
        if self.is_root() {
            return Err(CursorError::AtRoot);
        }
        self.path.pop();
        Ok(self.current())
    }

    pub(crate) fn left(&mut self) -> Result<Option<Handle>, CursorError> {
        self.descend(Side::Left)
    }

    pub(crate) fn right(&mut self) -> Result<Option<Handle>, CursorError> {
        self.descend(Side::Right)
    }

    /// Moves into the `side` child slot of the current node, vacant or not.
    pub(crate) fn descend(&mut self, side: Side) -> Result<Option<Handle>, CursorError> {
        let current = self.current().ok_or(CursorError::NoSuchChild)?;
        let child = self.nodes.get(current).child(side);
        if child.is_none() {
            self.leaf_side = side;
        }
        self.path.push(child);
        Ok(child)
    }

    /// Points the slot at the current position to `subtree`.
    ///
    /// At the root this rewrites the tree's root slot; elsewhere it rewrites the
    /// parent's child link. The path tail follows the new occupant, so the cursor stays
    /// on the same slot.
    pub(crate) fn replace(&mut self, subtree: Option<Handle>) -> Result<(), CursorError> {
        if self.is_root() {
            *self.root = subtree;
            self.path.truncate(1);
            self.path[0] = subtree;
            return Ok(());
        }
        let side = self.side()?;
        let parent = self.parent(1)?;
        self.nodes.get_mut(parent).set_child(side, subtree);
        if subtree.is_none() {
            self.leaf_side = side;
        }
        if let Some(tail) = self.path.last_mut() {
            *tail = subtree;
        }
        Ok(())
    }

    /// Rotates the subtree at the current position towards `direction`.
    ///
    /// For `Side::Left` the right child `y` of the current node `x` takes `x`'s slot,
    /// `x` becomes `y`'s left child and `y`'s old left subtree becomes `x`'s right.
    /// `Side::Right` is the mirror. Colors are left alone. The cursor ends on `y`,
    /// the node now occupying the slot, which is returned.
    pub(crate) fn rotate(&mut self, direction: Side) -> Result<Handle, CursorError> {
        let x = self.current().ok_or(CursorError::NoSuchChild)?;
        let y = self.nodes.get(x).child(direction.opposite()).ok_or(CursorError::NoSuchChild)?;
        let inner = self.nodes.get(y).child(direction);
        self.nodes.get_mut(x).set_child(direction.opposite(), inner);
        self.nodes.get_mut(y).set_child(direction, Some(x));
        self.replace(Some(y))?;
        Ok(y)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Builds `2 -> (1, 3)` by hand and returns the handles `[1, 2, 3]`.
    fn three_nodes(nodes: &mut Arena<Node<i32>>, root: &mut Option<Handle>) -> [Handle; 3] {
        let one = nodes.alloc(Node::new(1));
        let two = nodes.alloc(Node::new(2));
        let three = nodes.alloc(Node::new(3));
        nodes.get_mut(two).set_child(Side::Left, Some(one));
        nodes.get_mut(two).set_child(Side::Right, Some(three));
        *root = Some(two);
        [one, two, three]
    }

    fn in_order(nodes: &Arena<Node<i32>>, handle: Option<Handle>, out: &mut Vec<i32>) {
        if let Some(h) = handle {
            let node = nodes.get(h);
            in_order(nodes, node.left(), out);
            out.push(*node.value());
            in_order(nodes, node.right(), out);
        }
    }

    #[test]
    fn fresh_cursor_sits_on_root() {
        let mut nodes = Arena::new();
        let mut root = None;
        let [_, two, _] = three_nodes(&mut nodes, &mut root);
        let cursor = Cursor::new(&mut nodes, &mut root);
        assert!(cursor.is_root());
        assert_eq!(cursor.current(), Some(two));
        assert_eq!(cursor.side(), Err(CursorError::UndefinedForRoot));
        assert_eq!(cursor.parent(1), Err(CursorError::NoSuchAncestor { requested: 1, available: 0 }));
    }

    #[test]
    fn up_at_root_fails() {
        let mut nodes: Arena<Node<i32>> = Arena::new();
        let mut root = None;
        let mut cursor = Cursor::new(&mut nodes, &mut root);
        assert_eq!(cursor.up(), Err(CursorError::AtRoot));
    }

    #[test]
    fn descend_from_vacant_slot_fails() {
        let mut nodes: Arena<Node<i32>> = Arena::new();
        let mut root = None;
        let mut cursor = Cursor::new(&mut nodes, &mut root);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.left(), Err(CursorError::NoSuchChild));
        assert_eq!(cursor.right(), Err(CursorError::NoSuchChild));
    }

    #[test]
    fn navigation_tracks_parents_and_sides() {
        let mut nodes = Arena::new();
        let mut root = None;
        let [one, two, three] = three_nodes(&mut nodes, &mut root);
        let mut cursor = Cursor::new(&mut nodes, &mut root);

        assert_eq!(cursor.left(), Ok(Some(one)));
        assert_eq!(cursor.is_left_child(), Ok(true));
        assert_eq!(cursor.parent(1), Ok(two));
        assert_eq!(cursor.up(), Ok(Some(two)));

        assert_eq!(cursor.right(), Ok(Some(three)));
        assert_eq!(cursor.is_right_child(), Ok(true));
        assert_eq!(cursor.level(), 2);
    }

    #[test]
    fn vacant_slot_side_comes_from_last_descent() {
        let mut nodes = Arena::new();
        let mut root = None;
        let [one, two, _] = three_nodes(&mut nodes, &mut root);
        let mut cursor = Cursor::new(&mut nodes, &mut root);

        cursor.left().unwrap();
        assert_eq!(cursor.right(), Ok(None));
        assert_eq!(cursor.is_right_child(), Ok(true));
        assert_eq!(cursor.parent(1), Ok(one));
        assert_eq!(cursor.parent(2), Ok(two));
        assert_eq!(cursor.parent(3), Err(CursorError::NoSuchAncestor { requested: 3, available: 2 }));
        cursor.up().unwrap();
        assert_eq!(cursor.left(), Ok(None));
        assert_eq!(cursor.is_left_child(), Ok(true));
    }

    #[test]
    fn replace_vacant_slot_attaches_node() {
        let mut nodes = Arena::new();
        let mut root = None;
        let [one, _, _] = three_nodes(&mut nodes, &mut root);
        {
            let mut cursor = Cursor::new(&mut nodes, &mut root);
            cursor.left().unwrap();
            cursor.left().unwrap();
            let zero = cursor.alloc(Node::new(0));
            cursor.replace(Some(zero)).unwrap();
            assert_eq!(cursor.current(), Some(zero));
            assert_eq!(cursor.is_left_child(), Ok(true));
        }
        assert!(nodes.get(one).left().is_some());
        let mut values = Vec::new();
        in_order(&nodes, root, &mut values);
        assert_eq!(values, [0, 1, 2, 3]);
    }

    #[test]
    fn replace_at_root_rewrites_root_slot() {
        let mut nodes = Arena::new();
        let mut root = None;
        let handle;
        {
            let mut cursor = Cursor::new(&mut nodes, &mut root);
            handle = cursor.alloc(Node::new(9));
            cursor.replace(Some(handle)).unwrap();
            assert!(cursor.is_root());
            assert_eq!(cursor.current(), Some(handle));
        }
        assert_eq!(root, Some(handle));
    }

    #[test]
    fn rotations_keep_order_and_follow_the_moved_node() {
        let mut nodes = Arena::new();
        let mut root = None;
        let [one, two, three] = three_nodes(&mut nodes, &mut root);
        {
            let mut cursor = Cursor::new(&mut nodes, &mut root);
            assert_eq!(cursor.rotate(Side::Left), Ok(three));
            assert_eq!(cursor.current(), Some(three));
            assert!(cursor.is_root());
        }
        assert_eq!(root, Some(three));
        assert_eq!(nodes.get(three).left(), Some(two));
        assert_eq!(nodes.get(two).left(), Some(one));
        assert_eq!(nodes.get(two).right(), None);

        {
            let mut cursor = Cursor::new(&mut nodes, &mut root);
            cursor.left().unwrap();
            assert_eq!(cursor.rotate(Side::Right), Ok(one));
            assert_eq!(cursor.is_left_child(), Ok(true));
            assert_eq!(cursor.parent(1), Ok(three));
        }
        assert_eq!(nodes.get(three).left(), Some(one));
        assert_eq!(nodes.get(one).right(), Some(two));

        let mut values = Vec::new();
        in_order(&nodes, root, &mut values);
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn rotate_without_child_fails() {
        let mut nodes = Arena::new();
        let mut root = None;
        three_nodes(&mut nodes, &mut root);
        let mut cursor = Cursor::new(&mut nodes, &mut root);
        cursor.left().unwrap();
        assert_eq!(cursor.rotate(Side::Left), Err(CursorError::NoSuchChild));
    }
}
