/// What [`RBTree::insert`](crate::RBTree::insert) does with a value equal to one
/// already stored.
///
/// Two values are equal when neither compares less than the other.
///
/// # Examples
///
/// ```
/// use akakuro::{DuplicatePolicy, RBTree};
///
/// let mut multiset = RBTree::new();
/// assert!(multiset.insert(7));
/// assert!(multiset.insert(7));
/// assert_eq!(multiset.len(), 2);
///
/// let mut set = RBTree::with_policy(DuplicatePolicy::Reject);
/// assert!(set.insert(7));
/// assert!(!set.insert(7));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DuplicatePolicy {
    /// Keep every value. A duplicate is placed after the equal values already stored,
    /// so iteration yields equal values in insertion order.
    #[default]
    Allow,
    /// Leave the tree unchanged when an equal value is already stored.
    Reject,
}
