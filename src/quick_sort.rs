//! Partition sort engine (quicksort family)
//!
//! In-place and **not stable**: records whose keys compare equal may come out
//! in any relative order. Callers that need ties to keep their original order
//! must use [`crate::merge_sort`].
//!
//! The pivot is the median of the first, middle and last element of the active
//! range, which keeps already sorted and reverse sorted pages at O(n log n).
//! After each partition the engine recurses into the smaller side and loops on
//! the larger one, so the stack depth stays at O(log n) whatever the input.
//!
//! A range that is already in order is left alone, so sorting a sorted page
//! again with the same comparator never moves records with equal keys.

use std::cmp::Ordering;

/// Sort `v` in place using `compare`.
pub fn quick_sort<T, F>(v: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut lo = 0;
    let mut hi = v.len();

    while hi - lo > 1 {
        if is_ordered(&v[lo..hi], compare) {
            return;
        }

        let pivot = lo + partition(&mut v[lo..hi], compare);

        // Pivot is in its final slot; neither side includes it.
        if pivot - lo < hi - pivot - 1 {
            quick_sort(&mut v[lo..pivot], compare);
            lo = pivot + 1;
        } else {
            quick_sort(&mut v[pivot + 1..hi], compare);
            hi = pivot;
        }
    }
}

/// One pass over adjacent pairs; stops at the first inversion
fn is_ordered<T, F>(v: &[T], compare: &F) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    v.windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Partition `v` around a median-of-three pivot and return the pivot's final index.
///
/// Afterwards every element left of the pivot is `<=` it and every element to
/// the right is `>=` it. Elements equal to the pivot may end up on either side.
fn partition<T, F>(v: &mut [T], compare: &F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let len = v.len();
    debug_assert!(len >= 2);

    let pivot = median_of_three(v, 0, len / 2, len - 1, compare);
    v.swap(0, pivot);

    // Forward scan from the left, backward scan from the right.
    let mut i = 1;
    let mut j = len - 1;
    loop {
        while i <= j && compare(&v[i], &v[0]) == Ordering::Less {
            i += 1;
        }
        while i <= j && compare(&v[j], &v[0]) == Ordering::Greater {
            j -= 1;
        }
        if i >= j {
            break;
        }
        v.swap(i, j);
        i += 1;
        j -= 1;
    }

    // v[1..=j] <= pivot, v[j + 1..] >= pivot
    v.swap(0, j);
    j
}

/// Find median of three elements for pivot selection
fn median_of_three<T, F>(v: &[T], a: usize, b: usize, c: usize, compare: &F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let cmp_ab = compare(&v[a], &v[b]);
    let cmp_bc = compare(&v[b], &v[c]);
    let cmp_ac = compare(&v[a], &v[c]);

    if cmp_ab != Ordering::Greater {
        if cmp_bc != Ordering::Greater {
            b
        } else if cmp_ac != Ordering::Greater {
            c
        } else {
            a
        }
    } else if cmp_bc == Ordering::Greater {
        b
    } else if cmp_ac != Ordering::Greater {
        a
    } else {
        c
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
        quick_sort(&mut empty, &natural);
        assert!(empty.is_empty());

        let mut single = vec![42];
        quick_sort(&mut single, &natural);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_small_inputs() {
        let mut two = vec![2, 1];
        quick_sort(&mut two, &natural);
        assert_eq!(two, vec![1, 2]);

        let mut three = vec![3, 1, 2];
        quick_sort(&mut three, &natural);
        assert_eq!(three, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicates_and_negatives() {
        let mut data = vec![5, -1, 3, 5, 0, -1, 5, 2, 2, 9, -7];
        let mut expected = data.clone();
        expected.sort();

        quick_sort(&mut data, &natural);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_all_equal() {
        let mut data = vec![7; 64];
        quick_sort(&mut data, &natural);
        assert_eq!(data, vec![7; 64]);
    }

    #[test]
    fn test_reverse_comparator() {
        let mut data = vec![4, 8, 1, 9, 3];
        quick_sort(&mut data, &|a: &i32, b: &i32| b.cmp(a));
        assert_eq!(data, vec![9, 8, 4, 3, 1]);
    }

    #[test]
    fn test_random_inputs_match_std() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in [2, 3, 10, 57, 100, 513] {
            let mut data: Vec<i32> = (0..len).map(|_| rng.gen_range(-50..50)).collect();
            let mut expected = data.clone();
            expected.sort();

            quick_sort(&mut data, &natural);
            assert_eq!(data, expected, "length {len}");
        }
    }

    #[test]
    fn test_sorted_input_stays_near_n_log_n() {
        // Median-of-three keeps presorted pages away from the quadratic case.
        let n = 1024usize;
        let comparisons = Cell::new(0usize);
        let counting = |a: &usize, b: &usize| {
            comparisons.set(comparisons.get() + 1);
            a.cmp(b)
        };

        let mut ascending: Vec<usize> = (0..n).collect();
        quick_sort(&mut ascending, &counting);
        assert!(ascending.windows(2).all(|w| w[0] <= w[1]));
        assert!(comparisons.get() < n * 24, "{} comparisons", comparisons.get());

        comparisons.set(0);
        let mut descending: Vec<usize> = (0..n).rev().collect();
        quick_sort(&mut descending, &counting);
        assert!(descending.windows(2).all(|w| w[0] <= w[1]));
        assert!(comparisons.get() < n * 24, "{} comparisons", comparisons.get());
    }

    fn by_key(a: &(i32, usize), b: &(i32, usize)) -> Ordering {
        a.0.cmp(&b.0)
    }

    #[test]
    fn test_ordered_input_with_ties_is_left_alone() {
        let ordered = vec![(1, 0), (5, 1), (5, 2), (5, 3), (5, 4), (9, 5), (9, 6)];
        let mut data = ordered.clone();
        quick_sort(&mut data, &by_key);
        assert_eq!(data, ordered);

        let mut all_tied: Vec<(i32, usize)> = (0..5).map(|i| (5, i)).collect();
        let expected = all_tied.clone();
        quick_sort(&mut all_tied, &by_key);
        assert_eq!(all_tied, expected);
    }

    #[test]
    fn test_ties_may_be_reordered() {
        // (key, original position)
        let mut data = vec![(5, 0), (5, 1), (5, 2), (1, 3)];
        quick_sort(&mut data, &by_key);
        assert_eq!(data, vec![(1, 3), (5, 2), (5, 0), (5, 1)]);
    }

    #[test]
    fn test_is_ordered() {
        assert!(is_ordered(&[1, 2, 2, 3], &natural));
        assert!(is_ordered::<i32, _>(&[], &natural));
        assert!(!is_ordered(&[1, 3, 2], &natural));
    }

    #[test]
    fn test_median_of_three() {
        let v = [1, 2, 3];
        assert_eq!(median_of_three(&v, 0, 1, 2, &natural), 1);
        let v = [3, 2, 1];
        assert_eq!(median_of_three(&v, 0, 1, 2, &natural), 1);
        let v = [2, 3, 1];
        assert_eq!(median_of_three(&v, 0, 1, 2, &natural), 0);
        let v = [1, 3, 2];
        assert_eq!(median_of_three(&v, 0, 1, 2, &natural), 2);
    }

    #[test]
    fn test_partition_places_pivot() {
        let mut v = vec![9, 4, 7, 1, 8, 2, 6];
        let p = partition(&mut v, &natural);
        assert!(v[..p].iter().all(|x| *x <= v[p]));
        assert!(v[p + 1..].iter().all(|x| *x >= v[p]));
    }
}
