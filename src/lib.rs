//! An ordered set on a red-black tree, with caller-supplied comparison and
//! disposal callbacks.
//!
//! [`Tree`] stores one exclusive copy of every element accepted by
//! [`Tree::insert`] and keeps them ordered by the [`Callbacks::compare`]
//! capability it was constructed with. Elements are released exactly once,
//! through [`Callbacks::dispose`], when they are removed or when the tree is
//! dropped. The node layout packs the color into the low bit of the parent
//! back-pointer, the same representation the linux kernel uses for its
//! red-black trees.
mod alloc;
mod balance;
mod error;
mod iter;
mod node;
mod tree;

pub use error::InsertError;
pub use iter::Iter;

use std::{cmp::Ordering, marker::PhantomData, ptr::NonNull};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl From<Color> for usize {
    fn from(color: Color) -> usize {
        color as usize
    }
}

impl From<usize> for Color {
    fn from(color: usize) -> Color {
        match color {
            0 => Color::Red,
            _ => Color::Black,
        }
    }
}

pub(crate) type NodePtr<T> = Option<NonNull<Node<T>>>;

/// Null-tolerant accessors over [`NodePtr`]: an absent node reads as a black
/// leaf slot and silently ignores writes, which keeps the fixup loops free of
/// per-link unwrapping.
pub(crate) trait NodePtrExt {
    type Elem;

    fn color(&self) -> Color;
    fn is_black(&self) -> bool;
    fn is_red(&self) -> bool;
    fn left(&self) -> NodePtr<Self::Elem>;
    fn parent(&self) -> NodePtr<Self::Elem>;
    fn right(&self) -> NodePtr<Self::Elem>;
    fn set_color(&mut self, color: Color);
    fn set_left(&mut self, left: NodePtr<Self::Elem>);
    fn set_parent(&mut self, parent: NodePtr<Self::Elem>);
    fn set_right(&mut self, right: NodePtr<Self::Elem>);
}

impl<T> NodePtrExt for NodePtr<T> {
    type Elem = T;

    #[inline(always)]
    fn color(&self) -> Color {
        self.map_or(Color::Black, |v| unsafe { v.as_ref() }.color())
    }

    #[inline(always)]
    fn is_black(&self) -> bool {
        self.map_or(true, |v| unsafe { v.as_ref() }.is_black())
    }

    #[inline(always)]
    fn is_red(&self) -> bool {
        self.map_or(false, |v| unsafe { v.as_ref() }.is_red())
    }

    #[inline(always)]
    fn left(&self) -> NodePtr<T> {
        self.map_or(None, |v| unsafe { v.as_ref() }.left)
    }

    #[inline(always)]
    fn parent(&self) -> NodePtr<T> {
        self.map_or(None, |v| unsafe { v.as_ref() }.parent())
    }

    #[inline(always)]
    fn right(&self) -> NodePtr<T> {
        self.map_or(None, |v| unsafe { v.as_ref() }.right)
    }

    #[inline(always)]
    fn set_color(&mut self, color: Color) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.set_color(color);
        }
    }

    #[inline(always)]
    fn set_left(&mut self, left: NodePtr<T>) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.left = left;
        }
    }

    #[inline(always)]
    fn set_parent(&mut self, parent: NodePtr<T>) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.set_parent(parent);
        }
    }

    #[inline(always)]
    fn set_right(&mut self, right: NodePtr<T>) {
        if let Some(node) = self {
            unsafe { node.as_mut() }.right = right;
        }
    }
}

#[repr(C)]
pub(crate) struct Node<T> {
    // The parent pointer with the color in the lowest bit.
    pub(crate) parent_color: *mut Node<T>,
    pub(crate) right: NodePtr<T>,
    pub(crate) left: NodePtr<T>,
    pub(crate) elem: T,
}

/// The capabilities a [`Tree`] requires from its caller.
///
/// `compare` must be a total order and must stay consistent for as long as
/// the tree holds elements: mutating a stored element so that its order
/// relative to the others changes leaves the tree unable to find it again.
pub trait Callbacks {
    type Elem;

    /// Three-way comparison between two elements.
    fn compare(&self, a: &Self::Elem, b: &Self::Elem) -> Ordering;

    /// Releases one element. Called exactly once per element that is removed
    /// or that is still stored when the tree is dropped.
    fn dispose(&self, elem: Self::Elem) {
        drop(elem);
    }
}

/// [`Callbacks`] for elements ordered by their `Ord` instance and released by
/// their own `Drop`.
pub struct Natural<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Natural<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Natural<T> {
    pub fn new() -> Self {
        Natural {
            _phantom: PhantomData,
        }
    }
}

impl<T: Ord> Callbacks for Natural<T> {
    type Elem = T;

    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// An ordered set of exclusively owned elements.
///
/// Duplicates (by [`Callbacks::compare`]) are rejected at insertion. Node
/// identity is not stable: removing an element elsewhere in the tree may
/// relocate another element's storage.
pub struct Tree<T, C: Callbacks<Elem = T> = Natural<T>> {
    pub(crate) root: NodePtr<T>,
    pub(crate) len: usize,
    pub(crate) callbacks: C,
}
