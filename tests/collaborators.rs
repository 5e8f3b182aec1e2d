//! The tree never calls back into its users except through the comparison,
//! disposal, and visitor capabilities. These tests drive that contract the
//! way a client program would: a sorted word list folded into one string,
//! and a set of vectors folded into the one with the largest L2 norm.

use std::{cell::Cell, cmp::Ordering, ops::ControlFlow, rc::Rc};

use pretty_assertions::assert_eq;
use vermeil::{Callbacks, Tree};

#[test]
fn word_list_concatenates_in_lexicographic_order() {
    let mut tree = Tree::new();
    for word in ["pear", "apple", "orange", "banana"] {
        tree.insert(word.to_string()).unwrap();
    }

    let mut concatenated = String::new();
    let completed = tree.for_each(|word| {
        concatenated.push_str(word);
        concatenated.push('\n');
        ControlFlow::<()>::Continue(())
    });

    assert_eq!(ControlFlow::Continue(()), completed);
    assert_eq!("apple\nbanana\norange\npear\n", concatenated);
}

/// Element-by-element vector order: the first differing component decides;
/// a strict prefix is the smaller vector.
struct ByComponents;

impl Callbacks for ByComponents {
    type Elem = Vec<f64>;

    fn compare(&self, a: &Vec<f64>, b: &Vec<f64>) -> Ordering {
        for (x, y) in a.iter().zip(b.iter()) {
            if x > y {
                return Ordering::Greater;
            }
            if x < y {
                return Ordering::Less;
            }
        }
        a.len().cmp(&b.len())
    }
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[test]
fn max_norm_fold_finds_the_longest_vector() {
    let mut tree = Tree::with_callbacks(ByComponents);
    tree.insert(vec![1.0, 1.0]).unwrap();
    tree.insert(vec![3.0, 4.0]).unwrap();
    tree.insert(vec![-6.0, 0.1]).unwrap();
    tree.insert(vec![2.0]).unwrap();

    let mut max: Option<Vec<f64>> = None;
    let completed = tree.for_each(|v| {
        if max.as_deref().is_none_or(|m| norm(v) > norm(m)) {
            max = Some(v.clone());
        }
        ControlFlow::<()>::Continue(())
    });

    assert_eq!(ControlFlow::Continue(()), completed);
    assert_eq!(Some(vec![-6.0, 0.1]), max);
}

#[test]
fn component_order_rejects_duplicates_and_orders_prefixes() {
    let mut tree = Tree::with_callbacks(ByComponents);
    tree.insert(vec![1.0, 2.0]).unwrap();
    tree.insert(vec![1.0]).unwrap();
    tree.insert(vec![1.0, 2.0, 0.0]).unwrap();
    assert!(tree.insert(vec![1.0, 2.0]).is_err());

    let collected: Vec<Vec<f64>> = tree.iter().cloned().collect();
    assert_eq!(
        vec![vec![1.0], vec![1.0, 2.0], vec![1.0, 2.0, 0.0]],
        collected
    );
}

/// Disposal that counts, so a client can prove "exactly once per element".
struct CountingDrop {
    count: Rc<Cell<usize>>,
}

impl Callbacks for CountingDrop {
    type Elem = u32;

    fn compare(&self, a: &u32, b: &u32) -> Ordering {
        a.cmp(b)
    }

    fn dispose(&self, _elem: u32) {
        self.count.set(self.count.get() + 1);
    }
}

#[test]
fn every_element_is_disposed_exactly_once() {
    let count = Rc::new(Cell::new(0));
    {
        let mut tree = Tree::with_callbacks(CountingDrop {
            count: count.clone(),
        });
        for v in 0..100 {
            tree.insert(v).unwrap();
        }
        for v in (0..100).step_by(3) {
            assert!(tree.remove(&v));
        }
        // Rejected duplicates stay with the caller: no disposal.
        assert!(tree.insert(50).is_err());
    }
    assert_eq!(100, count.get());
}
