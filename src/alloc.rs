use std::{
    alloc::{Layout, alloc},
    ptr::NonNull,
};

use crate::Node;

/// Allocates a node for `elem`, handing the element back if backing storage
/// cannot be obtained.
pub(crate) fn alloc_node<T>(elem: T) -> Result<NonNull<Node<T>>, T> {
    let layout = Layout::new::<Node<T>>();
    // SAFETY: Node carries three pointers, the layout is never zero-sized.
    let raw = unsafe { alloc(layout) }.cast::<Node<T>>();
    match NonNull::new(raw) {
        Some(node) => {
            // SAFETY: raw is valid for writes of one Node<T>.
            unsafe { raw.write(Node::new(elem)) };
            Ok(node)
        }
        None => Err(elem),
    }
}

/// Releases a node's storage and returns the element it owned.
///
/// # Safety
///
/// `node` must come from [`alloc_node`], must be fully unlinked, and must not
/// be reached again.
pub(crate) unsafe fn dealloc_node<T>(node: NonNull<Node<T>>) -> T {
    // alloc_node used the global allocator with the exact Node layout, so
    // Box::from_raw is its inverse.
    let node = unsafe { Box::from_raw(node.as_ptr()) };
    node.elem
}
