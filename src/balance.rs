use crate::{Callbacks, Color, NodePtr, NodePtrExt, Tree};

impl<T, C: Callbacks<Elem = T>> Tree<T, C> {
    /// Rewires `parent`'s child link (or the root) from `old` to `new`.
    pub(crate) fn change_child(&mut self, old: NodePtr<T>, new: NodePtr<T>, parent: NodePtr<T>) {
        if let Some(mut parent) = parent {
            // SAFETY: parent links always point at live nodes.
            let parent = unsafe { parent.as_mut() };
            if parent.left == old {
                parent.left = new;
            } else {
                parent.right = new;
            }
        } else {
            self.root = new;
        }
    }

    /// Left rotation about `node`: its right child takes its place and `node`
    /// becomes that child's left child. Purely structural; callers recolor.
    pub(crate) fn rotate_left(&mut self, mut node: NodePtr<T>) {
        debug_assert!(node.right().is_some());
        let mut pivot = node.right();
        let mut inner = pivot.left();

        node.set_right(inner);
        inner.set_parent(node);

        let parent = node.parent();
        pivot.set_parent(parent);
        self.change_child(node, pivot, parent);

        pivot.set_left(node);
        node.set_parent(pivot);
    }

    /// Mirror of [`Self::rotate_left`].
    pub(crate) fn rotate_right(&mut self, mut node: NodePtr<T>) {
        debug_assert!(node.left().is_some());
        let mut pivot = node.left();
        let mut inner = pivot.right();

        node.set_left(inner);
        inner.set_parent(node);

        let parent = node.parent();
        pivot.set_parent(parent);
        self.change_child(node, pivot, parent);

        pivot.set_right(node);
        node.set_parent(pivot);
    }

    /// Restores the red-black invariants after linking a fresh red node.
    ///
    /// Climbs while the parent is red: a red uncle means recolor and retry at
    /// the grandparent; a black uncle takes one or two rotations and ends the
    /// loop. The root is painted black on the way out.
    pub(crate) fn insert_fixup(&mut self, mut node: NodePtr<T>) {
        while node.parent().is_red() {
            let mut parent = node.parent();
            // A red parent is never the root, so the grandparent exists.
            let mut gparent = parent.parent();

            if parent == gparent.left() {
                let mut uncle = gparent.right();
                if uncle.is_red() {
                    // Red uncle: pull the grandparent's blackness down one
                    // level and retry from there.
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                } else {
                    if node == parent.right() {
                        // Zig-zag: straighten through the parent first.
                        node = parent;
                        self.rotate_left(node);
                        parent = node.parent();
                        gparent = parent.parent();
                    }
                    // Zig-zig: one rotation at the grandparent settles it.
                    parent.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    self.rotate_right(gparent);
                }
            } else {
                let mut uncle = gparent.left();
                if uncle.is_red() {
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                } else {
                    if node == parent.left() {
                        node = parent;
                        self.rotate_right(node);
                        parent = node.parent();
                        gparent = parent.parent();
                    }
                    parent.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    self.rotate_left(gparent);
                }
            }
        }
        self.root.set_color(Color::Black);
    }

    /// Resolves the double-black deficiency left behind by unlinking a black
    /// node. `node` is the child that moved up into the vacated position
    /// (possibly empty), `parent` its parent.
    ///
    /// An empty `node` never lacks a sibling: the unlinked black node gave
    /// its side a black-height of at least one, so the sibling subtree must
    /// hold a node too. Routing on `node == parent.left()` is therefore
    /// sound even when both are empty.
    pub(crate) fn erase_fixup(&mut self, mut node: NodePtr<T>, mut parent: NodePtr<T>) {
        while node != self.root && node.is_black() {
            if node == parent.left() {
                let mut sibling = parent.right();
                if sibling.is_red() {
                    // Red sibling: rotate it above the parent to expose
                    // black nephews, then fall through.
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_left(parent);
                    sibling = parent.right();
                }
                if sibling.left().is_black() && sibling.right().is_black() {
                    // Both nephews black: recolor, push the deficit up. A red
                    // parent absorbs it when the loop re-tests and exits.
                    sibling.set_color(Color::Red);
                    node = parent;
                    parent = node.parent();
                } else {
                    if sibling.right().is_black() {
                        // Near nephew red: rotate it into the far slot.
                        sibling.left().set_color(Color::Black);
                        sibling.set_color(Color::Red);
                        self.rotate_right(sibling);
                        sibling = parent.right();
                    }
                    // Far nephew red: the sibling takes the parent's color,
                    // the deficit is paid for, done.
                    sibling.set_color(parent.color());
                    parent.set_color(Color::Black);
                    sibling.right().set_color(Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                    parent = None;
                }
            } else {
                let mut sibling = parent.left();
                if sibling.is_red() {
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_right(parent);
                    sibling = parent.left();
                }
                if sibling.left().is_black() && sibling.right().is_black() {
                    sibling.set_color(Color::Red);
                    node = parent;
                    parent = node.parent();
                } else {
                    if sibling.left().is_black() {
                        sibling.right().set_color(Color::Black);
                        sibling.set_color(Color::Red);
                        self.rotate_left(sibling);
                        sibling = parent.left();
                    }
                    sibling.set_color(parent.color());
                    parent.set_color(Color::Black);
                    sibling.left().set_color(Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                    parent = None;
                }
            }
        }
        // Either the root, or a red node that absorbs the deficiency.
        node.set_color(Color::Black);
    }
}
