use std::{iter::FusedIterator, marker::PhantomData};

use crate::{Callbacks, NodePtr, Tree};

/// An iterator over the elements of a [`Tree`] in ascending order.
///
/// Walks the live tree one successor (or predecessor) lookup at a time; it
/// is not a snapshot, and the tree cannot be mutated while it exists.
pub struct Iter<'a, T> {
    front: NodePtr<T>,
    back: NodePtr<T>,
    len: usize,
    _phantom: PhantomData<&'a T>,
}

impl<T, C: Callbacks<Elem = T>> Tree<T, C> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.first_node(),
            back: self.last_node(),
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T, C: Callbacks<Elem = T>> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.front.map(|n| {
            // SAFETY: the borrow on the tree keeps every node alive.
            let n = unsafe { n.as_ref() };
            self.len -= 1;
            self.front = n.next();
            &n.elem
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.back.map(|n| {
            // SAFETY: the borrow on the tree keeps every node alive.
            let n = unsafe { n.as_ref() };
            self.len -= 1;
            self.back = n.prev();
            &n.elem
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}
