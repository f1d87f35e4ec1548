//! Sort dispatcher
//!
//! Resolves the raw request tokens (field name, algorithm name) against the
//! record's field registry and the known algorithms, then runs the selected
//! engine. An unknown field or algorithm is not an error: the page is left
//! exactly as it was.

use crate::comparator::{self, KeyComparator};
use crate::config::SortOrder;
use crate::field::{FieldBinding, FieldTag, Resolution, ViewRecord};
use crate::merge_sort::merge_sort;
use crate::quick_sort::quick_sort;
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Sort engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// In-place partition sort; equal keys may be reordered
    QuickSort,
    /// Stable merge sort; equal keys keep their input order
    MergeSort,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::QuickSort, Algorithm::MergeSort];

    /// Canonical upper-case name matched against request tokens
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::QuickSort => "QUICKSORT",
            Algorithm::MergeSort => "MERGESORT",
        }
    }

    /// Resolve a request token (case-insensitive)
    pub fn resolve(token: &str) -> Resolution<Algorithm> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(token))
            .into()
    }

    pub fn is_stable(self) -> bool {
        matches!(self, Algorithm::MergeSort)
    }

    /// Run this engine over `v`
    pub fn run<T, F>(self, v: &mut [T], compare: &F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        match self {
            Algorithm::QuickSort => quick_sort(v, compare),
            Algorithm::MergeSort => merge_sort(v, compare),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal state of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sorted,
    Unchanged,
}

/// A fully resolved sort request for one record kind
#[derive(Debug)]
pub struct SortPlan<T: ViewRecord> {
    field: FieldBinding<T>,
    algorithm: Algorithm,
    order: SortOrder,
}

impl<T: ViewRecord> Clone for SortPlan<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ViewRecord> Copy for SortPlan<T> {}

impl<T: ViewRecord> SortPlan<T> {
    /// Resolve the field and algorithm tokens. Both must be known.
    pub fn resolve(field_token: &str, algorithm_token: &str, order: SortOrder) -> Resolution<Self> {
        let field = match T::registry().resolve(field_token) {
            Resolution::Resolved(field) => field,
            Resolution::Unresolved => {
                debug!(entity = %T::KIND, field = field_token, "unknown sort field");
                return Resolution::Unresolved;
            }
        };
        let algorithm = match Algorithm::resolve(algorithm_token) {
            Resolution::Resolved(algorithm) => algorithm,
            Resolution::Unresolved => {
                debug!(algorithm = algorithm_token, "unknown sort algorithm");
                return Resolution::Unresolved;
            }
        };

        Resolution::Resolved(Self {
            field,
            algorithm,
            order,
        })
    }

    pub fn field(&self) -> T::Field {
        self.field.tag()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn comparator(&self) -> KeyComparator<T> {
        comparator::build(self.field, self.order)
    }

    /// Reorder `records` in place
    pub fn execute(&self, records: &mut [T]) {
        debug!(
            entity = %T::KIND,
            field = self.field.tag().name(),
            algorithm = %self.algorithm,
            ascending = self.order.is_ascending(),
            len = records.len(),
            "sorting page"
        );
        let comparator = self.comparator();
        self.algorithm.run(records, &comparator.as_fn());
    }

    /// Index of the first record that is out of order under this plan, if any
    pub fn first_out_of_order(&self, records: &[T]) -> Option<usize> {
        let comparator = self.comparator();
        records
            .iter()
            .tuple_windows()
            .position(|(a, b)| comparator.compare(a, b) == Ordering::Greater)
            .map(|pos| pos + 1)
    }
}

/// Sort `records` by `field_token` with `algorithm_token`.
///
/// Tokens match case-insensitively. When either token is unknown the records
/// are left untouched and [`Outcome::Unchanged`] is returned; this is the
/// normal response to a bad request parameter, not a failure.
pub fn apply<T>(records: &mut [T], field_token: &str, algorithm_token: &str, ascending: bool) -> Outcome
where
    T: ViewRecord,
{
    let order = SortOrder::from_ascending(ascending);
    let Resolution::Resolved(plan) = SortPlan::<T>::resolve(field_token, algorithm_token, order)
    else {
        return Outcome::Unchanged;
    };

    plan.execute(records);
    Outcome::Sorted
}
