use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use log::trace;
use smallvec::SmallVec;

use super::arena::Arena;
use super::cursor::{Cursor, CursorError};
use super::fixup::rebalance_after_insert;
use super::handle::Handle;
use super::invariant::{self, Violation};
use super::node::{Color, Node, Side};
use crate::DuplicatePolicy;

/// The core red-black tree backing `RBTree`.
#[derive(Clone)]
pub(crate) struct RawRBTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of values stored.
    len: usize,
    policy: DuplicatePolicy,
}

impl<T> RawRBTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(policy: DuplicatePolicy) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            policy,
        }
    }

    /// Creates a new tree with room for `capacity` values.
    pub(crate) fn with_capacity(capacity: usize, policy: DuplicatePolicy) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            policy,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Height of the tree: 0 when empty, otherwise the node count of the longest
    /// root-to-leaf path.
    pub(crate) fn depth(&self) -> usize {
        fn subtree_depth<T>(nodes: &Arena<Node<T>>, handle: Option<Handle>) -> usize {
            handle.map_or(0, |h| {
                let node = nodes.get(h);
                1 + subtree_depth(nodes, node.left()).max(subtree_depth(nodes, node.right()))
            })
        }
        subtree_depth(&self.nodes, self.root)
    }

    /// The leftmost or rightmost node, depending on `side`.
    pub(crate) fn extreme(&self, side: Side) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(next) = self.nodes.get(current).child(side) {
            current = next;
        }
        Some(current)
    }

    /// Moves every value out in order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[Handle; 32]> = SmallVec::new();
        let mut next = self.root;
        loop {
            while let Some(handle) = next {
                stack.push(handle);
                next = self.nodes.get(handle).left();
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.nodes.take(handle);
            next = node.right();
            result.push(node.into_value());
        }
        self.clear();
        result
    }
}

impl<T: Ord> RawRBTree<T> {
    /// Finds a node holding a value equal to `value`.
    pub(crate) fn search<Q>(&self, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match value.cmp(node.value().borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    pub(crate) fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(value).is_some()
    }

    /// Inserts `value` and rebalances. Returns `false` if the duplicate policy turned it
    /// away.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        match self.insert_and_rebalance(value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("`RawRBTree::insert()` - fixup left the recorded path: {err}"),
        }
    }

    fn insert_and_rebalance(&mut self, value: T) -> Result<bool, CursorError> {
        let policy = self.policy;
        let mut cursor = Cursor::new(&mut self.nodes, &mut self.root);

        // Only `<` steers the descent: values not less than a node go right, which puts
        // a duplicate after the equal values already stored.
        while let Some(handle) = cursor.current() {
            let existing = cursor.node(handle).value();
            if value < *existing {
                cursor.left()?;
            } else if policy == DuplicatePolicy::Reject && !(*existing < value) {
                trace!("insert: duplicate rejected at level {}", cursor.level());
                return Ok(false);
            } else {
                cursor.right()?;
            }
        }

        let handle = cursor.alloc(Node::new(value));
        cursor.replace(Some(handle))?;
        rebalance_after_insert(&mut cursor)?;
        drop(cursor);

        if let Some(root) = self.root {
            self.nodes.get_mut(root).set_color(Color::Black);
        }
        self.len += 1;
        Ok(true)
    }

    pub(crate) fn validate(&self) -> Result<(), Violation> {
        invariant::validate(&self.nodes, self.root)
    }
}
