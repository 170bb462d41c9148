use super::entity::{CollectionError, Entity, Entry};
use crate::core::format::value::Value;
use crate::core::potentials::Potential;
use std::slice;

/// An ordered, homogeneous sequence of one entity kind.
///
/// Only named operations are exposed. There is no in-place extend, no
/// repetition and no user-facing sort; [`sort_entries`](Self::sort_entries)
/// exists for rendering and leaves the collection untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedCollection<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for TypedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> TypedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Coerces each row of raw values into an entity.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Value]>,
    {
        let items = rows
            .into_iter()
            .map(|row| T::from_values(row.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts before `index`; indices past the end append.
    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Replaces the entry at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, CollectionError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        if index >= self.items.len() {
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Appends an entry of any kind, failing unless it is a `T`.
    pub fn push_entry(&mut self, entry: Entry) -> Result<(), CollectionError> {
        let item = T::try_from(entry)?;
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// All entries of `self` followed by all entries of `other`, duplicates kept.
    pub fn concat(&self, other: &Self) -> Self {
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Self { items }
    }

    /// `self` followed by the entries of `other` that `self` lacks.
    pub fn union(&self, other: &Self) -> Self {
        self.concat(&other.difference(self))
    }

    /// Entries of `self` that also occur in `other`, in `self`'s order.
    pub fn intersection(&self, other: &Self) -> Self {
        self.retain_by(|item| other.contains(item))
    }

    /// Entries of `self` that do not occur in `other`, in `self`'s order.
    pub fn difference(&self, other: &Self) -> Self {
        self.retain_by(|item| !other.contains(item))
    }

    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.difference(other).concat(&other.difference(self))
    }

    fn retain_by(&self, keep: impl Fn(&T) -> bool) -> Self {
        Self {
            items: self.items.iter().filter(|item| keep(item)).cloned().collect(),
        }
    }

    /// Canonical rendering order: grouped by the header each entry renders
    /// under, then by the kind's own ordering. Stable.
    ///
    /// `fallback` is the potential the owning section assigns to unbound entries.
    pub fn sort_entries(&self, fallback: Option<Potential>) -> Vec<&T> {
        let mut sorted: Vec<&T> = self.items.iter().collect();
        sorted.sort_by(|a, b| {
            a.effective_header(fallback)
                .cmp(&b.effective_header(fallback))
                .then_with(|| a.intrinsic_cmp(b))
        });
        sorted
    }
}

impl<T: Entity> From<Vec<T>> for TypedCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Entity> FromIterator<T> for TypedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T: Entity> IntoIterator for &'a TypedCollection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Entity> IntoIterator for TypedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::entity::EntityKind;
    use crate::core::models::entry::Comment;
    use crate::core::models::group::{Exclusion, Pair};

    fn pairs(indices: &[(u32, u32)]) -> TypedCollection<Pair> {
        indices
            .iter()
            .map(|&(i, j)| Pair::new(i, j).with_distance(0.5))
            .collect()
    }

    #[test]
    fn concat_keeps_duplicates_and_order() {
        let a = pairs(&[(1, 2), (2, 3)]);
        let b = pairs(&[(2, 3), (3, 4)]);
        assert_eq!(a.concat(&b), pairs(&[(1, 2), (2, 3), (2, 3), (3, 4)]));
    }

    #[test]
    fn union_equals_concat_of_difference() {
        let a = pairs(&[(1, 2), (2, 3)]);
        let b = pairs(&[(2, 3), (3, 4)]);
        assert_eq!(a.union(&b), a.concat(&b.difference(&a)));
        assert_eq!(a.union(&b), pairs(&[(1, 2), (2, 3), (3, 4)]));
    }

    #[test]
    fn symmetric_difference_equals_both_differences() {
        let a = pairs(&[(1, 2), (2, 3), (5, 6)]);
        let b = pairs(&[(2, 3), (3, 4)]);
        assert_eq!(
            a.symmetric_difference(&b),
            a.difference(&b).concat(&b.difference(&a))
        );
        assert_eq!(a.symmetric_difference(&b), pairs(&[(1, 2), (5, 6), (3, 4)]));
    }

    #[test]
    fn intersection_members_belong_to_both_operands() {
        let a = pairs(&[(1, 2), (2, 3), (4, 5)]);
        let b = pairs(&[(4, 5), (2, 3), (7, 8)]);
        let both = a.intersection(&b);
        assert_eq!(both, pairs(&[(2, 3), (4, 5)]));
        assert!(both.iter().all(|p| a.contains(p) && b.contains(p)));
    }

    #[test]
    fn difference_with_itself_is_empty() {
        let a = pairs(&[(1, 2), (2, 3)]);
        assert!(a.difference(&a).is_empty());
    }

    #[test]
    fn membership_compares_distance_and_potential() {
        let a = pairs(&[(1, 2)]);
        let mut b = TypedCollection::new();
        b.append(Pair::new(1, 2).with_distance(0.5).with_potential(Potential::Bond));
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn push_entry_rejects_other_kinds() {
        let mut collection = TypedCollection::<Pair>::new();
        collection.push_entry(Pair::new(1, 2).into()).unwrap();
        let err = collection.push_entry(Exclusion::new(1, 2).into()).unwrap_err();
        assert_eq!(
            err,
            CollectionError::TypeMismatch {
                expected: EntityKind::Pair,
                found: EntityKind::Exclusion
            }
        );
        let err = collection.push_entry(Comment::new("x").into()).unwrap_err();
        assert!(matches!(
            err,
            CollectionError::TypeMismatch {
                found: EntityKind::Comment,
                ..
            }
        ));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn from_rows_coerces_value_tuples() {
        let rows = vec![
            vec![Value::Int(1), Value::Int(2)],
            vec![Value::Int(3), Value::Int(4), Value::Float(0.4)],
        ];
        let collection = TypedCollection::<Pair>::from_rows(rows).unwrap();
        assert_eq!(collection.get(1), Some(&Pair::new(3, 4).with_distance(0.4)));
    }

    #[test]
    fn from_rows_reports_uncoercible_rows_as_type_mismatch() {
        let rows = vec![vec![Value::Str("a".into()), Value::Int(2)]];
        let err = TypedCollection::<Exclusion>::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            CollectionError::Uncoercible {
                expected: EntityKind::Exclusion,
                ..
            }
        ));
    }

    #[test]
    fn insert_clamps_and_set_checks_bounds() {
        let mut collection = pairs(&[(1, 2)]);
        collection.insert(10, Pair::new(3, 4));
        collection.insert(0, Pair::new(5, 6));
        assert_eq!(collection.get(0).unwrap().atoms, [5, 6]);
        assert_eq!(collection.get(2).unwrap().atoms, [3, 4]);

        let previous = collection.set(2, Pair::new(7, 8)).unwrap();
        assert_eq!(previous.atoms, [3, 4]);
        assert_eq!(
            collection.set(3, Pair::new(9, 9)).unwrap_err(),
            CollectionError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert!(collection.remove(3).is_err());
        assert_eq!(collection.remove(0).unwrap().atoms, [5, 6]);
    }

    #[test]
    fn sort_entries_groups_by_potential_then_indices() {
        let collection: TypedCollection<Pair> = vec![
            Pair::new(3, 4).with_distance(0.5).with_potential(Potential::Gaussian),
            Pair::new(1, 2).with_distance(0.5).with_potential(Potential::CombinedGaussian),
            Pair::new(1, 3).with_distance(0.5).with_potential(Potential::Gaussian),
            Pair::new(1, 2).with_distance(0.6).with_potential(Potential::Gaussian),
        ]
        .into();
        let sorted = collection.sort_entries(None);
        let runs: Vec<_> = sorted.iter().map(|p| (p.atoms, p.potential)).collect();
        let gaussian_first =
            Potential::Gaussian.header() < Potential::CombinedGaussian.header();
        assert_eq!(runs.len(), 4);
        let gaussian: Vec<_> = runs
            .iter()
            .filter(|(_, p)| *p == Some(Potential::Gaussian))
            .map(|(atoms, _)| *atoms)
            .collect();
        assert_eq!(gaussian, vec![[1, 2], [1, 3], [3, 4]]);
        let first = runs[0].1;
        if gaussian_first {
            assert_eq!(first, Some(Potential::Gaussian));
        } else {
            assert_eq!(first, Some(Potential::CombinedGaussian));
        }
        // The collection itself keeps insertion order.
        assert_eq!(collection.get(0).unwrap().atoms, [3, 4]);
    }

    #[test]
    fn sort_entries_is_stable_for_equal_keys() {
        let collection: TypedCollection<Pair> = vec![
            Pair::new(1, 2).with_distance(0.9),
            Pair::new(1, 2).with_distance(0.1),
        ]
        .into();
        let sorted = collection.sort_entries(Some(Potential::LennardJones));
        assert_eq!(sorted[0].distance, Some(0.9));
        assert_eq!(sorted[1].distance, Some(0.1));
    }
}
