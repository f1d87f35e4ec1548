//! Merge sort engine
//!
//! Stable top-down merge sort. The engine sorts a permutation of positions
//! rather than the records themselves: the positions are split at the
//! midpoint, both halves are sorted recursively, and the halves are merged back
//! through one auxiliary buffer the size of the page. On equal keys the merge
//! always takes the left position first, so records with equal keys keep their
//! original relative order. The finished permutation is then applied to the
//! page with swaps, so records are only ever moved, never cloned.
//!
//! Cost does not depend on the input order: O(n log n) comparisons and O(n)
//! extra space.

use std::cmp::Ordering;

/// Sort `v` in place using `compare`, preserving the order of equal elements.
pub fn merge_sort<T, F>(v: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }

    let mut order: Vec<usize> = (0..v.len()).collect();
    let mut buf = order.clone();
    {
        let records: &[T] = v;
        sort_range(&mut order, &mut buf, &|a: &usize, b: &usize| {
            compare(&records[*a], &records[*b])
        });
    }
    apply_permutation(v, &mut order);
}

/// Sort `v` using `buf` (same length) as scratch space
fn sort_range<T, F>(v: &mut [T], buf: &mut [T], compare: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let len = v.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        let (left_buf, right_buf) = buf.split_at_mut(mid);
        sort_range(left, left_buf, compare);
        sort_range(right, right_buf, compare);
    }

    buf.copy_from_slice(v);
    let (left, right) = buf.split_at(mid);
    merge(left, right, v, compare);
}

/// Merge two sorted runs into `out`. Ties are taken from `left` first.
fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    debug_assert_eq!(left.len() + right.len(), out.len());

    let mut i = 0;
    let mut j = 0;
    for slot in out.iter_mut() {
        let take_left = j == right.len()
            || (i < left.len() && compare(&left[i], &right[j]) != Ordering::Greater);

        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

/// Move `v[order[k]]` into slot `k` for every `k`, following each cycle once.
///
/// `order` must be a permutation of `0..v.len()`; it is reset to the identity.
fn apply_permutation<T>(v: &mut [T], order: &mut [usize]) {
    debug_assert_eq!(v.len(), order.len());

    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            v.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::Cell;

    fn natural(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<i32> = Vec::new();
        merge_sort(&mut empty, &natural);
        assert!(empty.is_empty());

        let mut single = vec![42];
        merge_sort(&mut single, &natural);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_basic_sort() {
        let mut data = vec![5, -1, 3, 5, 0, -1, 5, 2, 2, 9, -7];
        let mut expected = data.clone();
        expected.sort();

        merge_sort(&mut data, &natural);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // (key, original position)
        let mut data = vec![(2, 0), (1, 1), (2, 2), (1, 3), (0, 4), (2, 5), (1, 6)];
        merge_sort(&mut data, &|a: &(i32, usize), b: &(i32, usize)| a.0.cmp(&b.0));

        assert_eq!(
            data,
            vec![(0, 4), (1, 1), (1, 3), (1, 6), (2, 0), (2, 2), (2, 5)]
        );
    }

    #[test]
    fn test_ties_keep_input_order_descending() {
        let mut data = vec![(1, 0), (3, 1), (1, 2), (3, 3)];
        merge_sort(&mut data, &|a: &(i32, usize), b: &(i32, usize)| b.0.cmp(&a.0));

        assert_eq!(data, vec![(3, 1), (3, 3), (1, 0), (1, 2)]);
    }

    #[test]
    fn test_random_inputs_match_std_stable_sort() {
        let mut rng = StdRng::seed_from_u64(0xfeed);
        for len in [2, 3, 10, 57, 100, 513] {
            let mut data: Vec<(i32, usize)> =
                (0..len).map(|i| (rng.gen_range(0..8), i)).collect();
            let mut expected = data.clone();
            expected.sort_by_key(|pair| pair.0);

            merge_sort(&mut data, &|a: &(i32, usize), b: &(i32, usize)| a.0.cmp(&b.0));
            assert_eq!(data, expected, "length {len}");
        }
    }

    #[test]
    fn test_records_are_moved_not_cloned() {
        // No Clone impl: the engine can only move these around.
        #[derive(Debug, PartialEq)]
        struct Record {
            key: i32,
            name: String,
        }
        let record = |key: i32, name: &str| Record {
            key,
            name: name.to_string(),
        };

        let mut data = vec![record(3, "c"), record(1, "a"), record(3, "d"), record(2, "b")];
        merge_sort(&mut data, &|a: &Record, b: &Record| a.key.cmp(&b.key));

        assert_eq!(
            data,
            vec![record(1, "a"), record(2, "b"), record(3, "c"), record(3, "d")]
        );
    }

    #[test]
    fn test_apply_permutation_follows_cycles() {
        let mut data = vec!['a', 'b', 'c', 'd', 'e'];
        let mut order = vec![2, 0, 1, 4, 3];
        apply_permutation(&mut data, &mut order);

        assert_eq!(data, vec!['c', 'a', 'b', 'e', 'd']);
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_comparisons_bounded_regardless_of_order() {
        let n = 1024usize;
        let bound = n * 10; // n * log2(n)
        let comparisons = Cell::new(0usize);
        let counting = |a: &usize, b: &usize| {
            comparisons.set(comparisons.get() + 1);
            a.cmp(b)
        };

        let mut rng = StdRng::seed_from_u64(7);
        let shuffled: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

        for mut data in [(0..n).collect::<Vec<_>>(), (0..n).rev().collect(), shuffled] {
            comparisons.set(0);
            merge_sort(&mut data, &counting);
            assert!(data.windows(2).all(|w| w[0] <= w[1]));
            assert!(comparisons.get() <= bound, "{} comparisons", comparisons.get());
        }
    }
}
