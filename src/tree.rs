use std::{cmp::Ordering::*, fmt, mem, ops::ControlFlow, ptr::NonNull};

use crate::{Callbacks, Color, InsertError, Natural, Node, NodePtr, NodePtrExt, Tree, alloc};

impl<T: Ord> Tree<T> {
    /// An empty tree ordered by `T`'s `Ord` instance.
    pub fn new() -> Self {
        Self::with_callbacks(Natural::new())
    }
}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Callbacks<Elem = T>> Tree<T, C> {
    /// An empty tree using `callbacks` for comparison and disposal.
    pub fn with_callbacks(callbacks: C) -> Self {
        Tree {
            root: None,
            len: 0,
            callbacks,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, probe: &T) -> bool {
        self.find(probe).is_some()
    }

    /// The stored element comparing equal to `probe`, if any.
    pub fn get(&self, probe: &T) -> Option<&T> {
        // SAFETY: find returns a live node owned by self.
        self.find(probe).map(|n| unsafe { &(*n.as_ptr()).elem })
    }

    pub fn first(&self) -> Option<&T> {
        // SAFETY: first_node returns a live node owned by self.
        self.first_node().map(|n| unsafe { &(*n.as_ptr()).elem })
    }

    pub fn last(&self) -> Option<&T> {
        // SAFETY: last_node returns a live node owned by self.
        self.last_node().map(|n| unsafe { &(*n.as_ptr()).elem })
    }

    /// Adds `elem` unless an equal element is already stored.
    ///
    /// Ownership transfers to the tree on success; on failure the element
    /// comes back inside the [`InsertError`].
    pub fn insert(&mut self, elem: T) -> Result<(), InsertError<T>> {
        let mut link = self.root;
        let mut parent: NodePtr<T> = None;
        let mut from_left = false;

        while let Some(candidate) = link {
            // SAFETY: the descent only visits live nodes owned by self.
            let candidate_ref = unsafe { candidate.as_ref() };
            parent = Some(candidate);
            match self.callbacks.compare(&elem, &candidate_ref.elem) {
                Equal => return Err(InsertError::Duplicate(elem)),
                Less => {
                    link = candidate_ref.left;
                    from_left = true;
                }
                Greater => {
                    link = candidate_ref.right;
                    from_left = false;
                }
            }
        }

        let node = alloc::alloc_node(elem).map_err(InsertError::AllocationFailed)?;
        let mut node_ptr: NodePtr<T> = Some(node);
        if let Some(mut p) = parent {
            // SAFETY: parent is a live node found during the descent.
            let p_ref = unsafe { p.as_mut() };
            if from_left {
                p_ref.left = node_ptr;
            } else {
                p_ref.right = node_ptr;
            }
            node_ptr.set_parent(parent);
            self.insert_fixup(node_ptr);
        } else {
            node_ptr.set_color(Color::Black);
            self.root = node_ptr;
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the element comparing equal to `probe` and disposes of it.
    /// Returns `false` when no such element is stored.
    pub fn remove(&mut self, probe: &T) -> bool {
        match self.find(probe) {
            Some(node) => {
                let elem = self.unlink(node);
                self.callbacks.dispose(elem);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the smallest element without disposing of it.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.first_node()?;
        Some(self.unlink(first))
    }

    /// Removes and returns the largest element without disposing of it.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.last_node()?;
        Some(self.unlink(last))
    }

    /// Visits every element in ascending order, one successor lookup at a
    /// time. The visitor stops the traversal by returning
    /// [`ControlFlow::Break`], which is handed back to the caller;
    /// completing the walk yields [`ControlFlow::Continue`]. An empty tree
    /// completes trivially.
    ///
    /// The traversal reads the live tree, not a snapshot.
    pub fn for_each<B>(&self, mut visit: impl FnMut(&T) -> ControlFlow<B>) -> ControlFlow<B> {
        let mut node = self.first_node();
        while let Some(n) = node {
            // SAFETY: the traversal only visits live nodes owned by self.
            let n = unsafe { n.as_ref() };
            visit(&n.elem)?;
            node = n.next();
        }
        ControlFlow::Continue(())
    }

    /// Disposes of every element and empties the tree.
    pub fn clear(&mut self) {
        // Post-order: children go before their parent, so no parent link is
        // ever followed to a freed node.
        let mut node = self.root.take();
        while let Some(current) = node {
            // SAFETY: current is live until the dealloc below.
            let current_ref = unsafe { current.as_ref() };
            if current_ref.left.is_some() {
                node = current_ref.left;
                continue;
            }
            if current_ref.right.is_some() {
                node = current_ref.right;
                continue;
            }
            let parent = current_ref.parent();
            if let Some(mut p) = parent {
                // SAFETY: the parent has not been freed yet.
                let p_ref = unsafe { p.as_mut() };
                if p_ref.left == node {
                    p_ref.left = None;
                } else {
                    p_ref.right = None;
                }
            }
            // SAFETY: current is a leaf by now and just got unlinked.
            let elem = unsafe { alloc::dealloc_node(current) };
            self.callbacks.dispose(elem);
            node = parent;
        }
        self.len = 0;
    }

    /// The node holding the element equal to `probe`, if any.
    fn find(&self, probe: &T) -> Option<NonNull<Node<T>>> {
        let mut node = self.root;
        while let Some(candidate) = node {
            // SAFETY: the descent only visits live nodes owned by self.
            let candidate = unsafe { candidate.as_ref() };
            match self.callbacks.compare(probe, &candidate.elem) {
                Equal => break,
                Less => node = candidate.left,
                Greater => node = candidate.right,
            }
        }
        node
    }

    pub(crate) fn first_node(&self) -> NodePtr<T> {
        let mut n = self.root?;
        // SAFETY: child links always point at live nodes.
        while let Some(left) = unsafe { n.as_ref() }.left {
            n = left;
        }
        Some(n)
    }

    pub(crate) fn last_node(&self) -> NodePtr<T> {
        let mut n = self.root?;
        // SAFETY: child links always point at live nodes.
        while let Some(right) = unsafe { n.as_ref() }.right {
            n = right;
        }
        Some(n)
    }

    /// Detaches `node` and returns its element, rebalancing as needed.
    ///
    /// A node with two children trades elements with its in-order successor
    /// and the successor's node is unlinked instead, so the removal proper
    /// always sees at most one child. Stored elements consequently have no
    /// stable node identity across removals.
    fn unlink(&mut self, mut node: NonNull<Node<T>>) -> T {
        // SAFETY: node is live, and the successor (when taken) is a distinct
        // node in its right subtree.
        unsafe {
            if node.as_ref().left.is_some() && node.as_ref().right.is_some() {
                let mut succ = node.as_ref().right.unwrap();
                while let Some(left) = succ.as_ref().left {
                    succ = left;
                }
                mem::swap(&mut (*node.as_ptr()).elem, &mut (*succ.as_ptr()).elem);
                node = succ;
            }
        }

        let node_ptr: NodePtr<T> = Some(node);
        let mut child = node_ptr.left().or(node_ptr.right());
        let parent = node_ptr.parent();
        let color = node_ptr.color();

        child.set_parent(parent);
        self.change_child(node_ptr, child, parent);
        if color == Color::Black {
            // Unlinking a red node cannot break the black-height invariant.
            self.erase_fixup(child, parent);
        }

        self.len -= 1;
        // SAFETY: node is fully unlinked, nothing references it anymore.
        unsafe { alloc::dealloc_node(node) }
    }
}

impl<T, C: Callbacks<Elem = T>> Drop for Tree<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, C: Callbacks<Elem = T>> fmt::Debug for Tree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
