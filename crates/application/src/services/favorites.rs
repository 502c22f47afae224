//! Favorites Store
//!
//! Полностью client-owned: никакого remote аналога, только local storage.

use crate::ports::KeyValueStore;
use domain::{FavoriteSet, SubjectId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

pub const FAVORITES_KEY: &str = "tooldir_favorites";

pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    favorites: Mutex<FavoriteSet>,
}

impl FavoritesStore {
    /// Load the persisted set; unreadable data starts an empty set
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_key(store, FAVORITES_KEY)
    }

    pub fn load_with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let favorites = match store.get(&key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(error = %e, "stored favorites are corrupt, starting empty");
                FavoriteSet::new()
            }),
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                warn!(error = %e, "favorites storage unavailable, keeping them in memory");
                FavoriteSet::new()
            }
        };
        debug!(count = favorites.len(), "favorites loaded");

        Self {
            store,
            key,
            favorites: Mutex::new(favorites),
        }
    }

    /// Returns whether the tool is a favorite after the toggle
    pub fn toggle(&self, id: SubjectId) -> bool {
        let mut favorites = self.favorites.lock();
        let now_favorite = favorites.toggle(id);
        self.persist(&favorites);
        now_favorite
    }

    pub fn add(&self, id: SubjectId) -> bool {
        let mut favorites = self.favorites.lock();
        let added = favorites.insert(id);
        if added {
            self.persist(&favorites);
        }
        added
    }

    pub fn remove(&self, id: &SubjectId) -> bool {
        let mut favorites = self.favorites.lock();
        let removed = favorites.remove(id);
        if removed {
            self.persist(&favorites);
        }
        removed
    }

    pub fn contains(&self, id: &SubjectId) -> bool {
        self.favorites.lock().contains(id)
    }

    pub fn list(&self) -> Vec<SubjectId> {
        self.favorites.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        let mut favorites = self.favorites.lock();
        *favorites = FavoriteSet::new();
        if let Err(e) = self.store.remove(&self.key) {
            warn!(error = %e, "failed to clear stored favorites");
        }
    }

    fn persist(&self, favorites: &FavoriteSet) {
        let result = serde_json::to_string(favorites)
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(&self.key, &json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            warn!(error = %e, "failed to persist favorites, change kept in memory only");
        }
    }
}
