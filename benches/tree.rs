use criterion::{Criterion, criterion_group, criterion_main};

fn insert(c: &mut Criterion) {
    let mut tree = vermeil::Tree::<usize>::new();
    c.bench_function("vermeil_insert", |b| {
        b.iter(|| {
            for k in 0..100 {
                let _ = tree.insert(k);
            }
        })
    });
    let mut tree = rbtree::RBTree::<usize, ()>::new();
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            for k in 0..100 {
                tree.insert(k, ());
            }
        })
    });
}

criterion_group!(benches, insert);
criterion_main!(benches);
