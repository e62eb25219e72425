//! Named, insertion-ordered registry of entries
//!
//! Browsers and search engines both live in a `Registry`. Entries are looked
//! up by exact name and referenced elsewhere through typed [`Id`]s, so a
//! browser's base is an index into the browser registry rather than a pointer.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::Entry;

/// Typed index into a [`Registry`]
///
/// An `Id<Browser>` can only be used with a `Registry<Browser>`.
pub struct Id<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Position of the entry in registration order
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index)
    }
}

/// Registry of entries keyed by name
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<T>,
    by_name: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<T: Entry> Registry<T> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any entry with the same name
    ///
    /// A replaced entry keeps its slot, so ids handed out before the
    /// replacement now refer to the new entry.
    pub fn register(&mut self, entry: T) -> Id<T> {
        if let Some(&index) = self.by_name.get(entry.name()) {
            self.entries[index] = entry;
            return Id::new(index);
        }
        let index = self.entries.len();
        self.by_name.insert(entry.name().to_string(), index);
        self.entries.push(entry);
        Id::new(index)
    }

    /// Id of the entry with the given name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Id<T>> {
        self.by_name.get(name).map(|&index| Id::new(index))
    }

    /// Entry with the given name
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    /// Entry behind an id
    ///
    /// # Panics
    ///
    /// Ids are only created by this registry and entries are never removed,
    /// so an id from this registry is always in bounds.
    #[must_use]
    pub fn get(&self, id: Id<T>) -> &T {
        &self.entries[id.index]
    }

    /// All entries with their ids, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (Id::new(index), entry))
    }

    /// All ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = Id<T>> + '_ {
        (0..self.entries.len()).map(Id::new)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
