//! Field accessor registry
//!
//! Each view record type owns a small, immutable table that binds its sort
//! field tags to plain accessor functions. Tables are built once on first use
//! and shared by every caller afterwards; resolving a request token walks the
//! table instead of reflecting over the record.

use crate::config::EntityKind;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::fmt;

/// Comparable key extracted from a view record
///
/// Keys of the same variant compare naturally. Decimals use IEEE total
/// ordering so every key has a defined position, and `Missing` sorts before
/// any present value. Mixed variants never meet in practice since one field
/// always yields one variant; they fall back to variant rank.
#[derive(Debug, Clone)]
pub enum SortKey {
    Missing,
    Integer(i64),
    Decimal(f64),
    Ordinal(u8),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl SortKey {
    /// Case-folded text key
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(SortKey::Missing, Self::text)
    }

    pub fn optional_timestamp(value: Option<NaiveDateTime>) -> Self {
        value.map_or(SortKey::Missing, SortKey::Timestamp)
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Integer(_) => 1,
            SortKey::Decimal(_) => 2,
            SortKey::Ordinal(_) => 3,
            SortKey::Timestamp(_) => 4,
            SortKey::Text(_) => 5,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Decimal(a), SortKey::Decimal(b)) => a.total_cmp(b),
            (SortKey::Ordinal(a), SortKey::Ordinal(b)) => a.cmp(b),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Pure function extracting a sort key from a record
pub type Accessor<T> = fn(&T) -> SortKey;

/// Tag naming one sortable attribute of an entity
pub trait FieldTag: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Canonical upper-case name matched against request tokens
    fn name(self) -> &'static str;
}

/// A view record that can be reordered by the sort core
pub trait ViewRecord: Sized + 'static {
    type Field: FieldTag;

    const KIND: EntityKind;

    /// Shared accessor table for this record type
    fn registry() -> &'static FieldRegistry<Self>;
}

/// Outcome of matching a request token against a known set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn resolved(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unresolved => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Resolved(value) => Resolution::Resolved(f(value)),
            Resolution::Unresolved => Resolution::Unresolved,
        }
    }
}

impl<T> From<Option<T>> for Resolution<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Resolution::Unresolved, Resolution::Resolved)
    }
}

/// A field tag together with its accessor
pub struct FieldBinding<T: ViewRecord> {
    tag: T::Field,
    accessor: Accessor<T>,
}

impl<T: ViewRecord> FieldBinding<T> {
    pub fn tag(&self) -> T::Field {
        self.tag
    }

    /// Extract this field's key from a record
    #[inline]
    pub fn key(&self, record: &T) -> SortKey {
        (self.accessor)(record)
    }
}

impl<T: ViewRecord> Clone for FieldBinding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ViewRecord> Copy for FieldBinding<T> {}

impl<T: ViewRecord> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding").field("tag", &self.tag).finish()
    }
}

/// Immutable tag to accessor table for one entity kind
pub struct FieldRegistry<T: ViewRecord> {
    bindings: Vec<FieldBinding<T>>,
}

impl<T: ViewRecord> FieldRegistry<T> {
    pub fn builder() -> FieldRegistryBuilder<T> {
        FieldRegistryBuilder {
            bindings: Vec::new(),
        }
    }

    /// Resolve a request token (case-insensitive) to a field binding
    pub fn resolve(&self, token: &str) -> Resolution<FieldBinding<T>> {
        self.bindings
            .iter()
            .find(|binding| binding.tag.name().eq_ignore_ascii_case(token))
            .copied()
            .into()
    }

    /// Look up the binding for a tag that is already known
    pub fn binding(&self, tag: T::Field) -> Resolution<FieldBinding<T>> {
        self.bindings
            .iter()
            .find(|binding| binding.tag == tag)
            .copied()
            .into()
    }

    pub fn tags(&self) -> impl Iterator<Item = T::Field> + '_ {
        self.bindings.iter().map(|binding| binding.tag)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<T: ViewRecord> fmt::Debug for FieldRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("entity", &T::KIND)
            .field("fields", &self.tags().map(FieldTag::name).collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`FieldRegistry`]
pub struct FieldRegistryBuilder<T: ViewRecord> {
    bindings: Vec<FieldBinding<T>>,
}

impl<T: ViewRecord> FieldRegistryBuilder<T> {
    /// Bind a tag to its accessor. Binding the same tag twice keeps the last accessor.
    pub fn field(mut self, tag: T::Field, accessor: Accessor<T>) -> Self {
        match self.bindings.iter_mut().find(|binding| binding.tag == tag) {
            Some(binding) => binding.accessor = accessor,
            None => self.bindings.push(FieldBinding { tag, accessor }),
        }
        self
    }

    pub fn build(self) -> FieldRegistry<T> {
        FieldRegistry {
            bindings: self.bindings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{OrderField, OrderView, ProductField, ProductView};

    #[test]
    fn test_sort_key_ordering() {
        assert!(SortKey::Integer(1) < SortKey::Integer(2));
        assert!(SortKey::Decimal(-0.5) < SortKey::Decimal(0.25));
        assert!(SortKey::Missing < SortKey::text("a"));
        assert_eq!(SortKey::text("Apple"), SortKey::text("aPPLE"));
        assert!(SortKey::text("apple") < SortKey::text("Banana"));
    }

    #[test]
    fn test_decimal_nan_has_a_position() {
        let nan = SortKey::Decimal(f64::NAN);
        assert_eq!(nan.cmp(&nan), Ordering::Equal);
        assert!(SortKey::Decimal(f64::INFINITY) < nan);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = ProductView::registry();
        let binding = registry.resolve("price").resolved().expect("price field");
        assert_eq!(binding.tag(), ProductField::Price);
        assert!(registry.resolve("PrIcE").is_resolved());
        assert!(registry.resolve("bogus").resolved().is_none());
    }

    #[test]
    fn test_resolve_does_not_cross_entities() {
        assert!(!ProductView::registry().resolve("total_amount").is_resolved());
        assert_eq!(
            OrderView::registry()
                .resolve("TOTAL_AMOUNT")
                .map(|b| b.tag()),
            Resolution::Resolved(OrderField::TotalAmount)
        );
    }

    #[test]
    fn test_builder_rebinding_replaces_accessor() {
        let registry = FieldRegistry::<ProductView>::builder()
            .field(ProductField::Name, |p| SortKey::Integer(p.id))
            .field(ProductField::Name, |p| SortKey::text(&p.name))
            .build();
        assert_eq!(registry.len(), 1);

        let product = ProductView::new(7, "Lamp", 12.5, 3);
        let binding = registry.binding(ProductField::Name).resolved().expect("name");
        assert_eq!(binding.key(&product), SortKey::text("lamp"));
    }

    #[test]
    fn test_registry_debug_lists_fields() {
        let rendered = format!("{:?}", ProductView::registry());
        assert!(rendered.contains("PRICE"));
        assert!(rendered.contains("Products"));
    }
}
