//! Generic edit-script algebra.
//!
//! Four primitive shapes compose to describe a structural diff between any
//! two values: [`Edit`] for plain values, [`OptionEdit`] for `Option<T>`,
//! [`SeqMapElementEdit`] for sequence/map elements (which additionally need
//! `Insert`/`Delete`), and [`Replace`] as the default leaf recursive edit.
//!
//! Every composite differ in this module obeys the equal-collapse rule: if
//! every child edit is `Equal`, the composite itself is returned as `Equal`
//! carrying the left input, never as an `Edit` wrapping an all-equal script.

use indexmap::IndexMap;
use std::hash::Hash;

/// The default leaf recursive edit: two values that differ, with nothing
/// more specific to say about how.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replace<T> {
    pub before: T,
    pub after: T,
}

impl<T> Replace<T> {
    pub fn new(before: T, after: T) -> Self {
        Self { before, after }
    }
}

/// A diff between two plain values: either they were equal, or `R`
/// describes how they differ.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Edit<T, R> {
    Equal(T),
    Edit(R),
}

impl<T, R> Edit<T, R> {
    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal(_))
    }
}

/// A diff between two `Option<T>` values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionEdit<T, R> {
    Equal(Option<T>),
    Insert(T),
    Delete(T),
    Edit(R),
}

impl<T, R> OptionEdit<T, R> {
    pub fn is_equal(&self) -> bool {
        matches!(self, OptionEdit::Equal(_))
    }
}

/// A diff between two elements at the same position in a sequence, or the
/// same key in a map. Unlike [`Edit`], an element can also be purely
/// inserted or deleted relative to its counterpart.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SeqMapElementEdit<T, R> {
    Equal(T),
    Insert(T),
    Delete(T),
    Edit(R),
}

impl<T, R> SeqMapElementEdit<T, R> {
    pub fn is_equal(&self) -> bool {
        matches!(self, SeqMapElementEdit::Equal(_))
    }
}

impl<T, R> From<Edit<T, R>> for SeqMapElementEdit<T, R> {
    fn from(edit: Edit<T, R>) -> Self {
        match edit {
            Edit::Equal(t) => SeqMapElementEdit::Equal(t),
            Edit::Edit(r) => SeqMapElementEdit::Edit(r),
        }
    }
}

/// An ordered edit script over a sequence: an element-wise diff wrapped so
/// a wholly-equal sequence collapses to `Equal`.
pub type SeqEdit<T, R> = Edit<Vec<T>, Vec<SeqMapElementEdit<T, R>>>;

/// A keyed edit script over a map, wrapped so a wholly-equal map collapses
/// to `Equal`.
pub type MapEdit<K, V, R> = Edit<IndexMap<K, V>, IndexMap<K, SeqMapElementEdit<V, R>>>;

/// Diffs two plain values with `Replace` as the leaf edit.
pub fn diff_eq<T>(a: &T, b: &T) -> Edit<T, Replace<T>>
where
    T: Clone + PartialEq,
{
    if a == b {
        Edit::Equal(a.clone())
    } else {
        Edit::Edit(Replace::new(a.clone(), b.clone()))
    }
}

/// Diffs two `Option<T>` values, delegating to `inner` when both sides are
/// `Some`.
///
/// `(Some a, Some b)` delegates to `inner`; `(Some a, None)` is `Delete a`;
/// `(None, Some b)` is `Insert b`; `(None, None)` is `Equal None`.
pub fn diff_option<T, R>(
    a: &Option<T>,
    b: &Option<T>,
    inner: impl FnOnce(&T, &T) -> Edit<T, R>,
) -> OptionEdit<T, R>
where
    T: Clone,
{
    match (a, b) {
        (Some(av), Some(bv)) => match inner(av, bv) {
            Edit::Equal(v) => OptionEdit::Equal(Some(v)),
            Edit::Edit(r) => OptionEdit::Edit(r),
        },
        (Some(av), None) => OptionEdit::Delete(av.clone()),
        (None, Some(bv)) => OptionEdit::Insert(bv.clone()),
        (None, None) => OptionEdit::Equal(None),
    }
}

/// Diffs two sequences.
///
/// Elements are compared pairwise up to the length of the shorter side
/// using `inner`; the longer side's trailing elements become a run of
/// `Delete` (if `a` is longer) or `Insert` (if `b` is longer). This is the
/// minimal contract fixed by the edit-script shape: it is not an LCS
/// minimizer, so a single changed element in the middle of two
/// equal-length sequences produces one `Edit`, not a delete/insert pair.
pub fn diff_seq<T, R>(a: &[T], b: &[T], inner: impl Fn(&T, &T) -> Edit<T, R>) -> SeqEdit<T, R>
where
    T: Clone + PartialEq,
{
    let min_len = a.len().min(b.len());
    let mut script = Vec::with_capacity(a.len().max(b.len()));

    for i in 0..min_len {
        script.push(SeqMapElementEdit::from(inner(&a[i], &b[i])));
    }

    if a.len() > b.len() {
        for item in &a[min_len..] {
            script.push(SeqMapElementEdit::Delete(item.clone()));
        }
    } else {
        for item in &b[min_len..] {
            script.push(SeqMapElementEdit::Insert(item.clone()));
        }
    }

    if script.iter().all(SeqMapElementEdit::is_equal) {
        Edit::Equal(a.to_vec())
    } else {
        Edit::Edit(script)
    }
}

/// Diffs two maps by the union of their keys, iterated in `a`'s order
/// followed by any keys only present in `b`, in `b`'s order.
pub fn diff_map<K, V, R>(
    a: &IndexMap<K, V>,
    b: &IndexMap<K, V>,
    inner: impl Fn(&V, &V) -> Edit<V, R>,
) -> MapEdit<K, V, R>
where
    K: Clone + Eq + Hash,
    V: Clone + PartialEq,
{
    let mut script = IndexMap::new();

    for (key, av) in a {
        let element = match b.get(key) {
            Some(bv) => SeqMapElementEdit::from(inner(av, bv)),
            None => SeqMapElementEdit::Delete(av.clone()),
        };
        script.insert(key.clone(), element);
    }

    for (key, bv) in b {
        if !a.contains_key(key) {
            script.insert(key.clone(), SeqMapElementEdit::Insert(bv.clone()));
        }
    }

    if script.values().all(SeqMapElementEdit::is_equal) {
        Edit::Equal(a.clone())
    } else {
        Edit::Edit(script)
    }
}

/// A wrapper that selects the "print `Equal` in full" serialization mode
/// instead of the sentinel-string default (see the wire format rules for
/// edit scripts).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Verbose<T>(pub T);

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::{SerializeMap, Serializer};
    use serde::Serialize;

    use super::{Edit, OptionEdit, SeqMapElementEdit, Verbose};

    /// Shared by `Edit`, `OptionEdit`, and `SeqMapElementEdit`: flattens the
    /// `Edit(r)` variant (no `{"Edit": ...}` wrapper, `r` serializes
    /// directly), renders `Equal` as the sentinel string `"Equal"`, and
    /// renders every other variant as `{"VariantName": payload}`.
    impl<T, R> Serialize for Edit<T, R>
    where
        T: Serialize,
        R: Serialize,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Edit::Equal(_) => serializer.serialize_str("Equal"),
                Edit::Edit(r) => r.serialize(serializer),
            }
        }
    }

    impl<T, R> Serialize for OptionEdit<T, R>
    where
        T: Serialize,
        R: Serialize,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                OptionEdit::Equal(_) => serializer.serialize_str("Equal"),
                OptionEdit::Insert(t) => single_variant(serializer, "Insert", t),
                OptionEdit::Delete(t) => single_variant(serializer, "Delete", t),
                OptionEdit::Edit(r) => r.serialize(serializer),
            }
        }
    }

    impl<T, R> Serialize for SeqMapElementEdit<T, R>
    where
        T: Serialize,
        R: Serialize,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                SeqMapElementEdit::Equal(_) => serializer.serialize_str("Equal"),
                SeqMapElementEdit::Insert(t) => single_variant(serializer, "Insert", t),
                SeqMapElementEdit::Delete(t) => single_variant(serializer, "Delete", t),
                SeqMapElementEdit::Edit(r) => r.serialize(serializer),
            }
        }
    }

    fn single_variant<S: Serializer, T: Serialize>(
        serializer: S,
        name: &'static str,
        value: &T,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(name, value)?;
        map.end()
    }

    /// Recursive "print `Equal` in full" rendering, used transitively once
    /// any ancestor node is wrapped in [`Verbose`].
    pub trait VerboseSerialize {
        fn verbose_serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;
    }

    impl<T, R> VerboseSerialize for Edit<T, R>
    where
        T: Serialize,
        R: VerboseSerialize,
    {
        fn verbose_serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Edit::Equal(t) => single_variant(serializer, "Equal", t),
                Edit::Edit(r) => r.verbose_serialize(serializer),
            }
        }
    }

    impl<T, R> VerboseSerialize for OptionEdit<T, R>
    where
        T: Serialize,
        R: VerboseSerialize,
    {
        fn verbose_serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                OptionEdit::Equal(t) => single_variant(serializer, "Equal", t),
                OptionEdit::Insert(t) => single_variant(serializer, "Insert", t),
                OptionEdit::Delete(t) => single_variant(serializer, "Delete", t),
                OptionEdit::Edit(r) => r.verbose_serialize(serializer),
            }
        }
    }

    impl<T, R> VerboseSerialize for SeqMapElementEdit<T, R>
    where
        T: Serialize,
        R: VerboseSerialize,
    {
        fn verbose_serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                SeqMapElementEdit::Equal(t) => single_variant(serializer, "Equal", t),
                SeqMapElementEdit::Insert(t) => single_variant(serializer, "Insert", t),
                SeqMapElementEdit::Delete(t) => single_variant(serializer, "Delete", t),
                SeqMapElementEdit::Edit(r) => r.verbose_serialize(serializer),
            }
        }
    }

    impl<T> VerboseSerialize for super::Replace<T>
    where
        T: Serialize,
    {
        fn verbose_serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.serialize(serializer)
        }
    }

    impl<T, R> VerboseSerialize for Vec<SeqMapElementEdit<T, R>>
    where
        T: Serialize,
        R: VerboseSerialize,
    {
        fn verbose_serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            use serde::ser::SerializeSeq;
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for element in self {
                seq.serialize_element(&VerboseRef(element))?;
            }
            seq.end()
        }
    }

    impl<K, V, R> VerboseSerialize for indexmap::IndexMap<K, SeqMapElementEdit<V, R>>
    where
        K: Serialize + std::hash::Hash + Eq,
        V: Serialize,
        R: VerboseSerialize,
    {
        fn verbose_serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, &VerboseRef(v))?;
            }
            map.end()
        }
    }

    /// A by-reference adapter so `VerboseSerialize` impls can recurse
    /// without forcing an owning `Verbose<T>` at every level.
    struct VerboseRef<'a, T>(&'a T);

    impl<'a, T: VerboseSerialize> Serialize for VerboseRef<'a, T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.0.verbose_serialize(serializer)
        }
    }

    impl<T: VerboseSerialize> Serialize for Verbose<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.0.verbose_serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
pub use serde_impl::VerboseSerialize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_eq_collapses_to_equal() {
        assert_eq!(diff_eq(&1, &1), Edit::Equal(1));
    }

    #[test]
    fn diff_eq_replaces_on_mismatch() {
        assert_eq!(diff_eq(&1, &2), Edit::Edit(Replace::new(1, 2)));
    }

    #[test]
    fn diff_option_some_some_delegates() {
        let edit = diff_option(&Some(1), &Some(2), diff_eq);
        assert_eq!(edit, OptionEdit::Edit(Replace::new(1, 2)));
    }

    #[test]
    fn diff_option_some_some_equal_collapses() {
        let edit = diff_option(&Some(1), &Some(1), diff_eq);
        assert_eq!(edit, OptionEdit::Equal(Some(1)));
    }

    #[test]
    fn diff_option_delete_and_insert() {
        assert_eq!(diff_option(&Some(1), &None, diff_eq), OptionEdit::Delete(1));
        assert_eq!(diff_option(&None, &Some(1), diff_eq), OptionEdit::Insert(1));
        assert_eq!(
            diff_option::<i32, Replace<i32>>(&None, &None, diff_eq),
            OptionEdit::Equal(None)
        );
    }

    #[test]
    fn diff_seq_idempotent_on_equal_inputs() {
        // A sequence diffed against an identical copy of itself collapses to Equal.
        let a = vec!["x".to_string(), "y".to_string()];
        assert_eq!(diff_seq(&a, &a, diff_eq), Edit::Equal(a));
    }

    #[test]
    fn diff_seq_middle_replace_is_an_edit_not_delete_insert() {
        // A single differing element surrounded by equals yields one
        // positional Edit, not a delete/insert pair.
        let a = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let b = vec!["a".to_string(), "B".to_string(), "c".to_string()];

        let Edit::Edit(script) = diff_seq(&a, &b, diff_eq) else {
            panic!("expected an Edit");
        };

        assert_eq!(script[0], SeqMapElementEdit::Equal("a".to_string()));
        assert_eq!(
            script[1],
            SeqMapElementEdit::Edit(Replace::new("b".to_string(), "B".to_string()))
        );
        assert_eq!(script[2], SeqMapElementEdit::Equal("c".to_string()));
    }

    #[test]
    fn diff_seq_trailing_delete_when_a_longer() {
        let a = vec![1, 2, 3];
        let b = vec![1];

        let Edit::Edit(script) = diff_seq(&a, &b, diff_eq) else {
            panic!("expected an Edit");
        };

        assert_eq!(script[0], SeqMapElementEdit::Equal(1));
        assert_eq!(script[1], SeqMapElementEdit::Delete(2));
        assert_eq!(script[2], SeqMapElementEdit::Delete(3));
    }

    #[test]
    fn diff_seq_trailing_insert_when_b_longer() {
        let a = vec![1];
        let b = vec![1, 2, 3];

        let Edit::Edit(script) = diff_seq(&a, &b, diff_eq) else {
            panic!("expected an Edit");
        };

        assert_eq!(script[0], SeqMapElementEdit::Equal(1));
        assert_eq!(script[1], SeqMapElementEdit::Insert(2));
        assert_eq!(script[2], SeqMapElementEdit::Insert(3));
    }

    #[test]
    fn diff_map_idempotent_on_equal_inputs() {
        // A map diffed against an identical copy of itself collapses to Equal.
        let mut m = IndexMap::new();
        m.insert("A".to_string(), 1);
        m.insert("B".to_string(), 2);

        assert_eq!(diff_map(&m, &m, diff_eq), Edit::Equal(m));
    }

    #[test]
    fn map_diff_collapses_when_all_entries_equal() {
        // Two maps with every key mapping to an equal value collapse to
        // Equal, rather than an Edit whose script is entirely Equal entries.
        let mut a = IndexMap::new();
        a.insert("A".to_string(), 1);
        a.insert("B".to_string(), 2);
        let b = a.clone();

        assert_eq!(diff_map(&a, &b, diff_eq), Edit::Equal(a));
    }

    #[test]
    fn diff_map_insert_and_delete_by_key() {
        let mut a = IndexMap::new();
        a.insert("x".to_string(), "1".to_string());
        a.insert("y".to_string(), "2".to_string());

        let mut b = IndexMap::new();
        b.insert("x".to_string(), "1".to_string());
        b.insert("z".to_string(), "3".to_string());

        let Edit::Edit(script) = diff_map(&a, &b, diff_eq) else {
            panic!("expected an Edit");
        };

        assert_eq!(script["x"], SeqMapElementEdit::Equal("1".to_string()));
        assert_eq!(script["y"], SeqMapElementEdit::Delete("2".to_string()));
        assert_eq!(script["z"], SeqMapElementEdit::Insert("3".to_string()));
    }
}
