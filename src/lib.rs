//! A red-black ordered container for Rust.
//!
//! This crate provides [`RBTree`], a self-balancing ordered container over any [`Ord`]
//! type, with membership tests, insertion with automatic rebalancing, in-order
//! iteration, and a structural invariant checker:
//!
//! - [`insert`](RBTree::insert) - Add a value in O(log n), keeping or rejecting
//!   duplicates per [`DuplicatePolicy`]
//! - [`contains`](RBTree::contains) - O(log n) membership test
//! - [`iter`](RBTree::iter) - Lazy, double-ended, in-order traversal
//! - [`depth`](RBTree::depth) - Height of the tree, at most `2 * log2(n + 1)`
//! - [`check_invariant`](RBTree::check_invariant) / [`validate`](RBTree::validate) -
//!   Read-only verification of the red-black rules
//!
//! # Example
//!
//! ```
//! use akakuro::{DuplicatePolicy, RBTree};
//!
//! let mut tree = RBTree::new();
//! for value in [1, 2, 3, 4, 5] {
//!     tree.insert(value);
//!     assert!(tree.check_invariant());
//! }
//! assert!(tree.depth() <= 3);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
//!
//! // A set instead of a multiset.
//! let mut set = RBTree::with_policy(DuplicatePolicy::Reject);
//! assert!(set.insert("a"));
//! assert!(!set.insert("a"));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No `unsafe`** - Nodes live in an arena and link to their children by index
//! - **No parent links** - Rebalancing walks a path recorded on the way down
//!
//! # Implementation
//!
//! Nodes are stored in an arena and hold only their value, their color, and the
//! handles of their two children. Insertion descends from the root with a cursor that
//! records every slot it visits; the new red node is attached at the vacant slot where
//! the descent ends, and the fixup walks back up that recorded path, recoloring and
//! rotating until no red node has a red parent. The root is then painted black.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod policy;
mod raw;

pub mod rbtree;

pub use policy::DuplicatePolicy;
pub use raw::Violation;
pub use rbtree::RBTree;
