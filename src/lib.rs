pub mod groups;

mod error;
mod fenwick_tree;
mod index;
pub mod script;
mod segment_tree;

pub use error::{IndexError, Result};
pub use fenwick_tree::FenwickTree;
pub use index::{RangeAggregateIndex, RangeUpdate};
pub use segment_tree::SegmentTree;

#[cfg(test)]
fn bench<F: FnOnce()>(name: &str, num_tabs: usize, f: F) {
    use std::time::{Duration, Instant};
    let start = Instant::now();
    f();
    let elapsed = start.elapsed();

    print!("BENCH `{}` :", name);
    for _ in 0..num_tabs {
        print!("\t");
    }

    if elapsed < Duration::from_millis(1) {
        println!("{} micros", elapsed.as_micros());
    } else {
        println!("{} millis", elapsed.as_millis());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::NumAdditiveGroups;
    use rand::prelude::*;

    #[test]
    fn backends_agree_on_point_updates() {
        let mut rng = SmallRng::seed_from_u64(42);
        const N: usize = 128;

        let values: Vec<i64> = (0..N).map(|_| rng.gen_range(-500..500)).collect();
        let mut st = SegmentTree::from_values(NumAdditiveGroups::new(), values.clone());
        let mut ft = FenwickTree::from_values(NumAdditiveGroups::new(), values);

        for _ in 0..3000 {
            let i = rng.gen_range(0..N);
            let delta = rng.gen_range(-20..20);
            st.update(i, i, delta).unwrap();
            ft.update(i + 1, delta).unwrap();

            let l = rng.gen_range(0..N);
            let r = rng.gen_range(l..N);
            assert_eq!(st.query(l, r), ft.range_sum(l + 1, r + 1));
        }
        assert_eq!(st.total(), ft.total());
    }

    fn exercise<I: RangeAggregateIndex<Elem = i64>>(index: &mut I) {
        assert_eq!(index.len(), 5);
        assert_eq!(index.total(), 15);
        index.add(4, -5).unwrap();
        assert_eq!(index.sum(3, 4), Ok(4));
        assert_eq!(
            index.sum(2, 1),
            Err(IndexError::InvertedRange { left: 2, right: 1 })
        );
        assert_eq!(index.total(), 10);
    }

    #[test]
    fn contract_is_backend_independent() {
        let values = vec![1i64, 2, 3, 4, 5];
        exercise(&mut SegmentTree::from_values(
            NumAdditiveGroups::new(),
            values.clone(),
        ));
        exercise(&mut FenwickTree::from_values(NumAdditiveGroups::new(), values));
    }

    #[test]
    fn wrapping_elements_wrap() {
        use std::num::Wrapping;

        let values = vec![Wrapping(200u8), Wrapping(100)];
        let mut st = SegmentTree::from_values(NumAdditiveGroups::new(), values.clone());
        let mut ft = FenwickTree::from_values(NumAdditiveGroups::new(), values);

        st.add_range(0, 1, Wrapping(10)).unwrap();
        ft.add(1, Wrapping(10)).unwrap();
        assert_eq!(st.total(), Wrapping(64));
        assert_eq!(ft.total(), Wrapping(54));
    }

    #[test]
    #[ignore]
    fn bench_prefix_sums() {
        let mut rng = SmallRng::from_entropy();

        const N: usize = 1 << 20;

        let mut a: Vec<_> = (0..N as i64).collect();
        a.shuffle(&mut rng);

        let mut st = SegmentTree::new(NumAdditiveGroups::<i64>::new(), N);
        let mut ft = FenwickTree::new(NumAdditiveGroups::<i64>::new(), N);

        bench("SegmentTree::build", 1, || st.build(a.iter().cloned()).unwrap());
        bench("FenwickTree::from_values", 1, || {
            ft = FenwickTree::from_values(NumAdditiveGroups::new(), a.iter().cloned())
        });
        println!();

        bench("SegmentTree::query", 1, || {
            for i in 0..N {
                st.query(0, i).unwrap();
            }
        });
        bench("FenwickTree::prefix_sum", 1, || {
            for i in 0..N {
                ft.prefix_sum(i + 1).unwrap();
            }
        });
        println!();

        bench("SegmentTree::update", 1, || {
            for i in 0..N {
                let r = rng.gen_range(i..N);
                st.update(i, r, 1).unwrap();
            }
        });
        bench("FenwickTree::update", 1, || {
            for i in 0..N {
                ft.update(i + 1, 1).unwrap();
            }
        });
        println!();

        assert_eq!(ft.get(3 * N / 4 + 1), Ok(a[3 * N / 4] + 1));
    }
}
