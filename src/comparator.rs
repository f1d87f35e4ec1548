//! Comparator builder
//!
//! Turns a field binding and a direction into the two-argument ordering
//! function the engines consume. Descending order swaps `Less` and `Greater`
//! on the final result; engines never see the direction.

use crate::config::SortOrder;
use crate::field::{FieldBinding, ViewRecord};
use std::cmp::Ordering;

/// Ordering function over two records of the same kind
#[derive(Debug)]
pub struct KeyComparator<T: ViewRecord> {
    field: FieldBinding<T>,
    order: SortOrder,
}

impl<T: ViewRecord> KeyComparator<T> {
    pub fn new(field: FieldBinding<T>, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Compare two records by the bound field.
    ///
    /// Equal keys yield `Equal` in both directions; the comparator carries no
    /// positional tie-break.
    #[inline]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let cmp = self.field.key(a).cmp(&self.field.key(b));
        match self.order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    }

    /// Closure form for the sort engines
    pub fn as_fn(&self) -> impl Fn(&T, &T) -> Ordering + '_ {
        move |a, b| self.compare(a, b)
    }
}

impl<T: ViewRecord> Clone for KeyComparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ViewRecord> Copy for KeyComparator<T> {}

/// Build an ordering function for `field` in the given direction
pub fn build<T: ViewRecord>(field: FieldBinding<T>, order: SortOrder) -> KeyComparator<T> {
    KeyComparator::new(field, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ProductField, ProductView};

    fn comparator(field: ProductField, order: SortOrder) -> KeyComparator<ProductView> {
        let binding = ProductView::registry()
            .binding(field)
            .resolved()
            .expect("registered product field");
        build(binding, order)
    }

    #[test]
    fn test_ascending_is_natural_order() {
        let cheap = ProductView::new(1, "Pen", 1.5, 100);
        let pricey = ProductView::new(2, "Desk", 120.0, 4);
        let by_price = comparator(ProductField::Price, SortOrder::Ascending);

        assert_eq!(by_price.compare(&cheap, &pricey), Ordering::Less);
        assert_eq!(by_price.compare(&pricey, &cheap), Ordering::Greater);
    }

    #[test]
    fn test_descending_swaps_less_and_greater() {
        let cheap = ProductView::new(1, "Pen", 1.5, 100);
        let pricey = ProductView::new(2, "Desk", 120.0, 4);
        let by_price = comparator(ProductField::Price, SortOrder::Descending);

        assert_eq!(by_price.compare(&cheap, &pricey), Ordering::Greater);
        assert_eq!(by_price.compare(&pricey, &cheap), Ordering::Less);
    }

    #[test]
    fn test_equal_keys_are_equal_in_both_directions() {
        let a = ProductView::new(1, "Chair", 40.0, 1);
        let b = ProductView::new(2, "chair", 55.0, 9);

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let by_name = comparator(ProductField::Name, order);
            assert_eq!(by_name.compare(&a, &b), Ordering::Equal);
            assert_eq!(by_name.compare(&b, &a), Ordering::Equal);
        }
    }

    #[test]
    fn test_closure_form_matches_compare() {
        let a = ProductView::new(1, "b", 5.0, 1);
        let b = ProductView::new(2, "a", 5.0, 1);
        let by_name = comparator(ProductField::Name, SortOrder::Ascending);
        let f = by_name.as_fn();

        assert_eq!(f(&a, &b), by_name.compare(&a, &b));
        assert_eq!(f(&a, &b), Ordering::Greater);
    }
}
