use std::{
    fmt::Debug,
    ptr::{self, NonNull},
};

use super::{Color, Node, NodePtr};

impl<T> Node<T> {
    /// A fresh node: red, unlinked.
    pub(crate) fn new(elem: T) -> Self {
        Node {
            parent_color: ptr::null_mut(),
            right: None,
            left: None,
            elem,
        }
    }

    #[inline(always)]
    pub(crate) fn color(&self) -> Color {
        Color::from(self.parent_color.addr() & 1)
    }

    #[inline(always)]
    pub(crate) fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    #[inline(always)]
    pub(crate) fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[inline(always)]
    pub(crate) fn parent(&self) -> NodePtr<T> {
        NonNull::new(self.parent_color.map_addr(|p| p & !3))
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, parent: NodePtr<T>) {
        let parent = parent.map_or(ptr::null_mut(), NonNull::as_ptr);
        self.parent_color = parent.map_addr(|p| p + self.color() as usize);
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, color: Color) {
        let parent = self.parent_color.map_addr(|p| p & !3);
        self.parent_color = parent.map_addr(|p| p + color as usize);
    }

    /// In-order successor: leftmost node of the right subtree, or the first
    /// ancestor of which this node sits in the left subtree.
    pub(crate) fn next(&self) -> NodePtr<T> {
        if let Some(mut current) = self.right {
            // SAFETY: by the loop guard, current is a live node.
            while let Some(left) = unsafe { current.as_ref() }.left {
                current = left;
            }
            return Some(current);
        }

        // Everything below us is smaller; climb while we are a right child.
        let mut node = NonNull::from(self);
        let mut parent = self.parent();
        while let Some(p) = parent {
            // SAFETY: parent links always point at live nodes.
            let p_ref = unsafe { p.as_ref() };
            if p_ref.right != Some(node) {
                break;
            }
            node = p;
            parent = p_ref.parent();
        }
        parent
    }

    /// In-order predecessor; mirror of [`Self::next`].
    pub(crate) fn prev(&self) -> NodePtr<T> {
        if let Some(mut current) = self.left {
            // SAFETY: by the loop guard, current is a live node.
            while let Some(right) = unsafe { current.as_ref() }.right {
                current = right;
            }
            return Some(current);
        }

        let mut node = NonNull::from(self);
        let mut parent = self.parent();
        while let Some(p) = parent {
            // SAFETY: parent links always point at live nodes.
            let p_ref = unsafe { p.as_ref() };
            if p_ref.left != Some(node) {
                break;
            }
            node = p;
            parent = p_ref.parent();
        }
        parent
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.color(), self.elem))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_node_is_red_and_unlinked() {
        let node = Node::new(42);
        assert_eq!(Color::Red, node.color());
        assert_eq!(None, node.parent());
        assert!(node.left.is_none());
        assert!(node.right.is_none());
    }

    #[test]
    fn color_survives_parent_updates() {
        let mut parent = Node::new(1);
        let mut child = Node::new(2);
        child.set_color(Color::Black);
        child.set_parent(Some(NonNull::from(&mut parent)));
        assert_eq!(Color::Black, child.color());
        assert_eq!(Some(NonNull::from(&mut parent)), child.parent());
        child.set_color(Color::Red);
        assert_eq!(Color::Red, child.color());
        assert_eq!(Some(NonNull::from(&mut parent)), child.parent());
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn next_and_prev_walk_a_hand_built_tree() {
        //        2
        //       / \
        //      1   4
        //         /
        //        3
        let mut n1 = Node::new(1);
        let mut n2 = Node::new(2);
        let mut n3 = Node::new(3);
        let mut n4 = Node::new(4);

        n2.left = Some(NonNull::from(&mut n1));
        n2.right = Some(NonNull::from(&mut n4));
        n1.set_parent(Some(NonNull::from(&mut n2)));
        n4.set_parent(Some(NonNull::from(&mut n2)));
        n4.left = Some(NonNull::from(&mut n3));
        n3.set_parent(Some(NonNull::from(&mut n4)));

        assert_eq!(Some(NonNull::from(&n2)), n1.next());
        assert_eq!(Some(NonNull::from(&n3)), n2.next());
        assert_eq!(Some(NonNull::from(&n4)), n3.next());
        assert_eq!(None, n4.next());

        assert_eq!(Some(NonNull::from(&n3)), n4.prev());
        assert_eq!(Some(NonNull::from(&n2)), n3.prev());
        assert_eq!(Some(NonNull::from(&n1)), n2.prev());
        assert_eq!(None, n1.prev());
    }
}
