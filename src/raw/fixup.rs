//! Rebalancing after a raw binary-search-tree insertion.
//!
//! The cursor arrives on a freshly attached red node. While that node's parent is also
//! red, one of three cases applies, picked from the uncle's color and the sides the
//! parent and the node hang on:
//!
//! - **Red uncle**: parent and uncle turn black, grandparent turns red, and the
//!   grandparent becomes the node to check next.
//! - **Inner grandchild** (left-right or right-left): a rotation at the parent turns it
//!   into the outer case.
//! - **Outer grandchild** (left-left or right-right): parent turns black, grandparent
//!   red, and a rotation at the grandparent ends the loop.
//!
//! Every left/right choice is derived from the two [`Side`]s, so both mirror images share
//! one code path.

use log::trace;

use super::cursor::{Cursor, CursorError};
use super::handle::Handle;
use super::node::{Color, Side};

/// One step of the fixup loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Case {
    RedUncle(Handle),
    Inner,
    Outer,
}

impl Case {
    fn classify(uncle: Option<(Handle, Color)>, parent_side: Side, this_side: Side) -> Self {
        match (uncle, parent_side, this_side) {
            (Some((uncle, Color::Red)), _, _) => Case::RedUncle(uncle),
            (_, Side::Left, Side::Left) | (_, Side::Right, Side::Right) => Case::Outer,
            (_, Side::Left, Side::Right) | (_, Side::Right, Side::Left) => Case::Inner,
        }
    }
}

/// Restores the red-black coloring rules around the cursor's current node.
///
/// The root may be left red; the caller repaints it black afterwards.
pub(crate) fn rebalance_after_insert<T>(cursor: &mut Cursor<'_, T>) -> Result<(), CursorError> {
    while !cursor.is_root() {
        let parent = cursor.parent(1)?;
        if cursor.node(parent).color().is_black() {
            break;
        }
        // A red parent is never the root, so the grandparent exists.
        let grandparent = cursor.parent(2)?;
        let this_side = if cursor.is_right_child()? { Side::Right } else { Side::Left };

        cursor.up()?;
        let parent_side = if cursor.is_left_child()? { Side::Left } else { Side::Right };
        let uncle = cursor
            .node(grandparent)
            .child(parent_side.opposite())
            .map(|uncle| (uncle, cursor.node(uncle).color()));

        match Case::classify(uncle, parent_side, this_side) {
            Case::RedUncle(uncle) => {
                trace!("insert fixup: red uncle, recoloring at level {}", cursor.level() - 1);
                cursor.node_mut(parent).set_color(Color::Black);
                cursor.node_mut(uncle).set_color(Color::Black);
                cursor.node_mut(grandparent).set_color(Color::Red);
                cursor.up()?;
            }
            Case::Inner => {
                trace!("insert fixup: inner grandchild on the {parent_side:?}, rotating parent");
                // The rotation leaves the former child in the parent's slot, so the
                // cursor already sits where the outer case expects the parent to be.
                cursor.rotate(parent_side)?;
                return rotate_grandparent(cursor, parent_side);
            }
            Case::Outer => return rotate_grandparent(cursor, parent_side),
        }
    }
    Ok(())
}

/// The outer-grandchild case, with the cursor on the parent.
///
/// The parent's slot is on `parent_side` of the grandparent. After the rotation the
/// subtree root is black, so no red-red edge can remain above it.
fn rotate_grandparent<T>(cursor: &mut Cursor<'_, T>, parent_side: Side) -> Result<(), CursorError> {
    let parent = cursor.current().ok_or(CursorError::NoSuchChild)?;
    let grandparent = cursor.parent(1)?;
    trace!("insert fixup: outer grandchild on the {parent_side:?}, rotating grandparent");
    cursor.node_mut(parent).set_color(Color::Black);
    cursor.node_mut(grandparent).set_color(Color::Red);
    cursor.up()?;
    cursor.rotate(parent_side.opposite())?;
    Ok(())
}
