//! FavoriteSet - client-owned list of favorited tools

use crate::value_objects::SubjectId;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of favorite tool ids
///
/// Persisted as a plain JSON list; duplicates in stored data are dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SubjectId>", into = "Vec<SubjectId>")]
pub struct FavoriteSet {
    items: Vec<SubjectId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &SubjectId) -> bool {
        self.items.contains(id)
    }

    /// Returns false if the id was already present
    pub fn insert(&mut self, id: SubjectId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.items.push(id);
        true
    }

    /// Returns false if the id was not present
    pub fn remove(&mut self, id: &SubjectId) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing != id);
        self.items.len() != before
    }

    /// Flip membership; returns whether the id is a favorite afterwards
    pub fn toggle(&mut self, id: SubjectId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.items.push(id);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectId> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<SubjectId>> for FavoriteSet {
    fn from(ids: Vec<SubjectId>) -> Self {
        let mut set = FavoriteSet::new();
        for id in ids {
            set.insert(id);
        }
        set
    }
}

impl From<FavoriteSet> for Vec<SubjectId> {
    fn from(set: FavoriteSet) -> Self {
        set.items
    }
}
