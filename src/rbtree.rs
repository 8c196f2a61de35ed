use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::DuplicatePolicy;
use crate::raw::{Handle, RawRBTree, Side};

mod capacity;
mod diagnostics;

/// An ordered container based on a red-black tree.
///
/// Values are kept sorted by their [`Ord`] implementation. Lookups and insertions take
/// O(log n) time, and the tree's height never exceeds `2 * log2(n + 1)`.
///
/// By default the tree is a multiset: inserting a value equal to one already stored
/// keeps both, and iteration yields equal values in insertion order. Build the tree
/// with [`DuplicatePolicy::Reject`] to keep only the first of equal values.
///
/// It is a logic error for a value to be modified in such a way that its ordering
/// relative to any other value changes while it is in the tree. The behavior resulting
/// from such a logic error is not specified, but will not be undefined behavior; the
/// tree may simply stop finding values. [`RBTree::validate`] detects it.
///
/// # Examples
///
/// ```
/// use akakuro::RBTree;
///
/// let mut tree = RBTree::new();
/// for value in [5, 2, 8, 2] {
///     tree.insert(value);
/// }
///
/// assert!(tree.contains(&8));
/// assert!(!tree.contains(&3));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [2, 2, 5, 8]);
/// assert!(tree.check_invariant());
/// ```
#[derive(Clone)]
pub struct RBTree<T> {
    raw: RawRBTree<T>,
}

/// An iterator over the values of an `RBTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RBTree`].
///
/// # Examples
///
/// ```
/// use akakuro::RBTree;
///
/// let tree = RBTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    tree: Option<&'a RawRBTree<T>>,
    // Pending ancestors for each end: the top of `front` is the next value from the
    // left, the top of `back` the next from the right.
    front: SmallVec<[Handle; 32]>,
    back: SmallVec<[Handle; 32]>,
    // The two stacks overlap once the ends meet; this count stops them.
    remaining: usize,
}

/// An owning iterator over the values of an `RBTree`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RBTree#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> RBTree<T> {
    /// Makes a new, empty `RBTree` that keeps duplicates.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let mut tree: RBTree<i32> = RBTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Allow)
    }

    /// Makes a new, empty `RBTree` that treats equal values according to `policy`.
    #[must_use]
    pub const fn with_policy(policy: DuplicatePolicy) -> Self {
        RBTree {
            raw: RawRBTree::new(policy),
        }
    }

    /// Returns the duplicate policy the tree was built with.
    #[must_use]
    pub const fn policy(&self) -> DuplicatePolicy {
        self.raw.policy()
    }

    /// Returns the number of values in the tree, duplicates included.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree = RBTree::from([1, 1, 2]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every value, keeping the duplicate policy.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest value, or the first inserted of several equal smallest ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree = RBTree::from([4, 9, 1]);
    /// assert_eq!(tree.first(), Some(&1));
    /// assert_eq!(tree.last(), Some(&9));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.extreme(Side::Left).map(|h| self.raw.node(h).value())
    }

    /// Returns the largest value, or the last inserted of several equal largest ones.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.extreme(Side::Right).map(|h| self.raw.node(h).value())
    }

    /// Gets an iterator that visits the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree = RBTree::from([3, 1, 2]);
    /// let values: Vec<_> = tree.iter().collect();
    /// assert_eq!(values, [&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }
}

impl<T: Ord> RBTree<T> {
    /// Adds a value to the tree and rebalances it.
    ///
    /// Returns whether the value was stored. Under [`DuplicatePolicy::Allow`] this is
    /// always `true`; under [`DuplicatePolicy::Reject`] it is `false` when an equal value
    /// is already present, and the tree is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert!(tree.insert(2));
    /// assert!(tree.insert(2));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree = RBTree::from([1, 2, 3]);
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&4));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for RBTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for RBTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RBTree<T> {}

impl<T: Ord> FromIterator<T> for RBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RBTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for RBTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTree<T> {
    /// Converts a `[T; N]` into an `RBTree<T>` that keeps duplicates.
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree1 = RBTree::from([1, 2, 3, 4]);
    /// let tree2: RBTree<_> = [4, 3, 2, 1].into();
    /// assert_eq!(tree1, tree2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a RBTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for RBTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator that moves the values out in ascending order.
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree = RBTree::from([2, 3, 1]);
    /// let values: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a RawRBTree<T>) -> Self {
        let mut iter = Iter {
            tree: Some(tree),
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: tree.len(),
        };
        iter.push_spine(tree.root(), Side::Left);
        iter.push_spine(tree.root(), Side::Right);
        iter
    }

    /// Pushes `handle` and its chain of `side` children onto that end's stack.
    fn push_spine(&mut self, mut handle: Option<Handle>, side: Side) {
        let Some(tree) = self.tree else {
            return;
        };
        let stack = match side {
            Side::Left => &mut self.front,
            Side::Right => &mut self.back,
        };
        while let Some(h) = handle {
            stack.push(h);
            handle = tree.node(h).child(side);
        }
    }

    /// Pops the next node from the `side` end and queues its inner subtree.
    fn step(&mut self, side: Side) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;
        let handle = match side {
            Side::Left => self.front.pop(),
            Side::Right => self.back.pop(),
        }?;
        let node = tree.node(handle);
        self.push_spine(node.child(side.opposite()), side);
        self.remaining -= 1;
        Some(node.value())
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.step(Side::Left)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.step(Side::Right)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `Iter`.
    ///
    /// ```
    /// use akakuro::rbtree::Iter;
    ///
    /// let iter: Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            tree: None,
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: 0,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}
