//! Ordered, possibly nested selections of objects.

use serde::{Deserialize, Serialize};

/// A single object or an ordered list of selections.
///
/// Duplication results mirror the shape of the request: a single object
/// yields a single duplicate, a list yields a list of the same length, and
/// nesting is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection<T> {
    One(T),
    Many(Vec<Selection<T>>),
}

impl<T> Selection<T> {
    pub fn many(items: impl IntoIterator<Item = T>) -> Self {
        Selection::Many(items.into_iter().map(Selection::One).collect())
    }

    /// All leaf objects in request order.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            Selection::One(item) => out.push(item),
            Selection::Many(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::One(_) => 1,
            Selection::Many(items) => items.iter().map(Selection::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild this shape with `values` as leaves, in order.
    ///
    /// Returns `None` when `values` does not hold exactly one value per leaf.
    pub fn reshape<U>(&self, values: impl IntoIterator<Item = U>) -> Option<Selection<U>> {
        let mut values = values.into_iter();
        let shaped = self.reshape_from(&mut values)?;
        match values.next() {
            Some(_) => None,
            None => Some(shaped),
        }
    }

    fn reshape_from<U>(&self, values: &mut impl Iterator<Item = U>) -> Option<Selection<U>> {
        match self {
            Selection::One(_) => values.next().map(Selection::One),
            Selection::Many(items) => items
                .iter()
                .map(|item| item.reshape_from(values))
                .collect::<Option<Vec<_>>>()
                .map(Selection::Many),
        }
    }

    /// Map every leaf through `f`, keeping the shape. Stops at the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<Selection<U>, E> {
        self.try_map_with(&mut f)
    }

    fn try_map_with<U, E, F>(&self, f: &mut F) -> Result<Selection<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        match self {
            Selection::One(item) => f(item).map(Selection::One),
            Selection::Many(items) => items
                .iter()
                .map(|item| item.try_map_with(f))
                .collect::<Result<Vec<_>, E>>()
                .map(Selection::Many),
        }
    }

    pub fn into_one(self) -> Option<T> {
        match self {
            Selection::One(item) => Some(item),
            Selection::Many(_) => None,
        }
    }

    /// Leaf values of a flat list selection; `None` for a single object or
    /// a nested list.
    pub fn into_flat(self) -> Option<Vec<T>> {
        match self {
            Selection::One(_) => None,
            Selection::Many(items) => items.into_iter().map(Selection::into_one).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_keep_request_order() {
        let selection = Selection::Many(vec![
            Selection::One(1),
            Selection::many([2, 3]),
            Selection::One(4),
        ]);
        assert_eq!(selection.leaves(), vec![&1, &2, &3, &4]);
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn reshape_single() {
        let selection = Selection::One("a");
        assert_eq!(selection.reshape(["A"]), Some(Selection::One("A")));
    }

    #[test]
    fn reshape_preserves_nesting() {
        let selection = Selection::Many(vec![Selection::One('a'), Selection::many(['b', 'c'])]);
        let shaped = selection.reshape([1, 2, 3]).unwrap();
        assert_eq!(
            shaped,
            Selection::Many(vec![Selection::One(1), Selection::many([2, 3])])
        );
    }

    #[test]
    fn reshape_rejects_wrong_counts() {
        let selection = Selection::many([1, 2]);
        assert_eq!(selection.reshape(["x"]), None);
        assert_eq!(selection.reshape(["x", "y", "z"]), None);
    }

    #[test]
    fn empty_list() {
        let selection: Selection<i32> = Selection::Many(vec![]);
        assert!(selection.is_empty());
        assert_eq!(selection.reshape(Vec::<i32>::new()), Some(Selection::Many(vec![])));
    }

    #[test]
    fn flat_accessors() {
        assert_eq!(Selection::many([1, 2]).into_flat(), Some(vec![1, 2]));
        assert_eq!(Selection::One(1).into_flat(), None);
        assert_eq!(Selection::One(1).into_one(), Some(1));
    }

    #[test]
    fn try_map_keeps_shape() {
        let selection = Selection::Many(vec![Selection::One(1), Selection::many([2, 3])]);
        let mapped: Result<_, ()> = selection.try_map(|n| Ok(n * 10));
        assert_eq!(
            mapped,
            Ok(Selection::Many(vec![Selection::One(10), Selection::many([20, 30])]))
        );
    }

    #[test]
    fn try_map_stops_at_first_error() {
        let mut seen = Vec::new();
        let result = Selection::many([1, 2, 3]).try_map(|n| {
            seen.push(*n);
            if *n == 2 {
                Err("two")
            } else {
                Ok(*n)
            }
        });
        assert_eq!(result, Err("two"));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn deserializes_untagged() {
        let selection: Selection<i32> = serde_json::from_str("[1, [2, 3]]").unwrap();
        assert_eq!(
            selection,
            Selection::Many(vec![Selection::One(1), Selection::many([2, 3])])
        );
    }
}
