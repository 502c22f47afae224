//! Identity Resolver
//!
//! Выдаёт стабильный anonymous client id. При недоступном storage
//! деградирует до ephemeral token, живущего только в этой сессии.

use crate::ports::KeyValueStore;
use domain::ClientIdentity;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct IdentityResolver {
    store: Arc<dyn KeyValueStore>,
    /// Tokens issued while storage was unusable, per namespace
    ephemeral: Mutex<HashMap<String, ClientIdentity>>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            ephemeral: Mutex::new(HashMap::new()),
        }
    }

    /// Return the persisted identity for `namespace`, creating it on first use
    pub fn get_or_create_client_id(&self, namespace: &str) -> ClientIdentity {
        let mut ephemeral = self.ephemeral.lock();
        if let Some(identity) = ephemeral.get(namespace) {
            return identity.clone();
        }

        match self.store.get(namespace) {
            Ok(Some(stored)) => match ClientIdentity::from_stored(&stored) {
                Ok(identity) => return identity,
                Err(e) => warn!(namespace, error = %e, "discarding unusable stored client id"),
            },
            Ok(None) => debug!(namespace, "no client id stored yet"),
            Err(e) => {
                warn!(namespace, error = %e, "storage unavailable, using ephemeral client id");
                let identity = ClientIdentity::generate();
                ephemeral.insert(namespace.to_string(), identity.clone());
                return identity;
            }
        }

        let identity = ClientIdentity::generate();
        match self.store.set(namespace, identity.as_str()) {
            Ok(()) => info!(namespace, "created client id"),
            Err(e) => {
                warn!(namespace, error = %e, "could not persist client id, using it for this session only");
                ephemeral.insert(namespace.to_string(), identity.clone());
            }
        }
        identity
    }

    /// Forget the identity; the next lookup issues a new one
    pub fn reset(&self, namespace: &str) {
        self.ephemeral.lock().remove(namespace);
        if let Err(e) = self.store.remove(namespace) {
            warn!(namespace, error = %e, "failed to clear stored client id");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;

    #[test]
    fn test_same_token_every_call() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let resolver = IdentityResolver::new(store.clone());

        let first = resolver.get_or_create_client_id("client_id");
        for _ in 0..10 {
            assert_eq!(resolver.get_or_create_client_id("client_id"), first);
        }
        assert_eq!(
            store.get("client_id").unwrap().as_deref(),
            Some(first.as_str())
        );
    }

    #[test]
    fn test_existing_token_is_reused_across_resolvers() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set("client_id", "persisted-token").unwrap();

        let resolver = IdentityResolver::new(store);
        assert_eq!(
            resolver.get_or_create_client_id("client_id").as_str(),
            "persisted-token"
        );
    }

    #[test]
    fn test_reset_issues_new_identity() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let resolver = IdentityResolver::new(store);

        let before = resolver.get_or_create_client_id("client_id");
        resolver.reset("client_id");
        let after = resolver.get_or_create_client_id("client_id");
        assert_ne!(before, after);
    }

    #[test]
    fn test_unavailable_storage_falls_back_to_session_token() {
        let store = Arc::new(InMemoryKeyValueStore::unavailable());
        let resolver = IdentityResolver::new(store.clone());

        let first = resolver.get_or_create_client_id("client_id");
        assert_eq!(resolver.get_or_create_client_id("client_id"), first);

        // A new session (resolver) gets a different token since nothing was persisted
        let next_session = IdentityResolver::new(store);
        assert_ne!(next_session.get_or_create_client_id("client_id"), first);
    }

    #[test]
    fn test_blank_stored_value_is_replaced() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set("client_id", "   ").unwrap();

        let resolver = IdentityResolver::new(store.clone());
        let identity = resolver.get_or_create_client_id("client_id");
        assert_eq!(
            store.get("client_id").unwrap().as_deref(),
            Some(identity.as_str())
        );
    }
}
