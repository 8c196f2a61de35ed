mod arena;
mod cursor;
mod fixup;
mod handle;
mod invariant;
mod node;
mod raw_rbtree;

pub(crate) use handle::Handle;
pub use invariant::Violation;
pub(crate) use node::Side;
pub(crate) use raw_rbtree::RawRBTree;
