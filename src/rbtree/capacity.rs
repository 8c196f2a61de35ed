use super::RBTree;
use crate::DuplicatePolicy;
use crate::raw::RawRBTree;

impl<T> RBTree<T> {
    /// Creates an empty tree with room for at least `capacity` values before its node
    /// storage reallocates. Duplicates are kept.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree: RBTree<i32> = RBTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_policy(capacity, DuplicatePolicy::Allow)
    }

    /// Creates an empty tree with room for at least `capacity` values, treating equal
    /// values according to `policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::{DuplicatePolicy, RBTree};
    ///
    /// let tree: RBTree<i32> = RBTree::with_capacity_and_policy(8, DuplicatePolicy::Reject);
    /// assert_eq!(tree.policy(), DuplicatePolicy::Reject);
    /// ```
    #[must_use]
    pub fn with_capacity_and_policy(capacity: usize, policy: DuplicatePolicy) -> Self {
        RBTree {
            raw: RawRBTree::with_capacity(capacity, policy),
        }
    }

    /// Returns how many values the tree can hold before its node storage reallocates.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
