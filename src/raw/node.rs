use super::handle::Handle;

/// Color tag of a red-black node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    #[inline]
    pub(crate) const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

/// Which child slot of a node a position occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single tree vertex.
///
/// Children are arena handles, each held by exactly one parent slot. Nodes do not
/// know their parent; upward navigation goes through [`Cursor`](super::Cursor).
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    value: T,
    color: Color,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached red node.
    pub(crate) const fn new(value: T) -> Self {
        Self {
            value,
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_red_leaf() {
        let node = Node::new(3);
        assert_eq!(*node.value(), 3);
        assert!(node.color().is_red());
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
    }

    #[test]
    fn child_slots_follow_side() {
        let mut node = Node::new(());
        let a = Handle::from_index(1);
        let b = Handle::from_index(2);
        node.set_child(Side::Left, Some(a));
        node.set_child(Side::Right.opposite().opposite(), Some(b));
        assert_eq!(node.child(Side::Left), Some(a));
        assert_eq!(node.child(Side::Right), Some(b));
        node.set_child(Side::Left, None);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), Some(b));
    }
}
