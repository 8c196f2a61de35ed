use super::RBTree;
use crate::Violation;

impl<T> RBTree<T> {
    /// Returns the height of the tree: 0 when empty, otherwise the number of nodes on
    /// the longest path from the root down to a leaf.
    ///
    /// The red-black rules keep this at or below `2 * log2(len + 1)`.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree: RBTree<u32> = (0..255).collect();
    /// assert!(tree.depth() <= 16);
    /// assert_eq!(RBTree::<u32>::new().depth(), 0);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        self.raw.depth()
    }
}

impl<T: Ord> RBTree<T> {
    /// Checks the red-black and ordering rules, returning the first one found broken.
    ///
    /// The root must be black, no red node may have a red child, every path from a node
    /// down to a vacant child slot must cross the same number of black nodes, and the
    /// in-order sequence must be sorted. Never modifies the tree.
    ///
    /// # Errors
    ///
    /// Returns the [`Violation`] describing the broken rule.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::RBTree;
    ///
    /// let tree = RBTree::from([5, 3, 8]);
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), Violation> {
        self.raw.validate()
    }

    /// Returns `true` if every red-black and ordering rule holds.
    ///
    /// Shorthand for `self.validate().is_ok()`.
    #[must_use]
    pub fn check_invariant(&self) -> bool {
        self.validate().is_ok()
    }
}
