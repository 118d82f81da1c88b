//! Change-tracking collection for child entities of an aggregate.
//!
//! A `WatchedList` remembers the items it was built with and lets the owning
//! aggregate mutate a working copy. Persistence adapters read
//! [`WatchedList::new_items`] and [`WatchedList::removed_items`] to issue the
//! minimal set of inserts and deletes without re-querying storage.
//!
//! Items are matched with a caller-supplied comparator rather than `PartialEq`
//! because child rows are rebuilt from storage on every load; two instances
//! describing the same row usually differ in everything but their identity
//! field.

use std::fmt;

/// Equality predicate used to match items, usually on a stable id field.
pub type Comparator<T> = fn(&T, &T) -> bool;

/// A baseline/working pair of child items with diffing by comparator.
#[derive(Clone)]
pub struct WatchedList<T> {
    initial: Vec<T>,
    current: Vec<T>,
    compare: Comparator<T>,
}

impl<T: Clone> WatchedList<T> {
    /// Creates a list whose baseline and working set are both `items`.
    ///
    /// Later duplicates (under `compare`) are dropped from the working set so
    /// that it never holds two matching items.
    #[must_use]
    pub fn new(items: Vec<T>, compare: Comparator<T>) -> Self {
        let mut list = Self {
            initial: Vec::with_capacity(items.len()),
            current: Vec::with_capacity(items.len()),
            compare,
        };
        list.replace_all(items);
        list.initial = list.current.clone();
        list
    }

    /// Creates an empty list, as used by a freshly created aggregate.
    #[must_use]
    pub fn empty(compare: Comparator<T>) -> Self {
        Self::new(Vec::new(), compare)
    }

    /// Appends `item` unless a matching item is already present.
    pub fn add(&mut self, item: T) {
        if !self.contains(&item) {
            self.current.push(item);
        }
    }

    /// Removes the first item matching `item`. Absent items are ignored.
    pub fn remove(&mut self, item: &T) {
        let compare = self.compare;
        if let Some(index) = self.current.iter().position(|existing| compare(existing, item)) {
            self.current.remove(index);
        }
    }

    /// Replaces the working set with `items`, keeping the first of any
    /// matching duplicates. The baseline is left untouched, so the next diff
    /// is still taken against the items the list was built with.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.current.clear();
        for item in items {
            self.add(item);
        }
    }

    /// Returns `true` if the working set holds an item matching `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        let compare = self.compare;
        self.current.iter().any(|existing| compare(existing, item))
    }

    /// Read-only view of the working set.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.current
    }

    /// Read-only view of the baseline.
    #[must_use]
    pub fn initial_items(&self) -> &[T] {
        &self.initial
    }

    /// Items in the working set with no match in the baseline, in working-set
    /// order.
    #[must_use]
    pub fn new_items(&self) -> Vec<T> {
        Self::difference(&self.current, &self.initial, self.compare)
    }

    /// Items in the baseline with no match in the working set, in baseline
    /// order.
    #[must_use]
    pub fn removed_items(&self) -> Vec<T> {
        Self::difference(&self.initial, &self.current, self.compare)
    }

    /// Number of items in the working set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns `true` if the working set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    fn difference(left: &[T], right: &[T], compare: Comparator<T>) -> Vec<T> {
        left.iter()
            .filter(|item| !right.iter().any(|other| compare(item, other)))
            .cloned()
            .collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for WatchedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchedList")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
