use std::{error, fmt};

/// Why [`Tree::insert`](crate::Tree::insert) rejected an element.
///
/// Both variants carry the rejected element, so the caller keeps ownership
/// and may reuse or drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError<T> {
    /// An element comparing equal is already stored. The tree is unchanged.
    Duplicate(T),
    /// Backing storage for the new node could not be obtained. The tree is
    /// unchanged.
    AllocationFailed(T),
}

impl<T> InsertError<T> {
    /// Takes the rejected element back out of the error.
    pub fn into_element(self) -> T {
        match self {
            Self::Duplicate(elem) | Self::AllocationFailed(elem) => elem,
        }
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(_) => f.write_str("an equal element is already in the tree"),
            Self::AllocationFailed(_) => f.write_str("node allocation failed"),
        }
    }
}

impl<T: fmt::Debug> error::Error for InsertError<T> {}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn into_element_hands_the_element_back() {
        assert_eq!(42, InsertError::Duplicate(42).into_element());
        assert_eq!(42, InsertError::AllocationFailed(42).into_element());
    }
}
