//! Cache Manager Module
//!
//! Owns the per-namespace stores and exposes aggregate operations plus the
//! domain-level convenience wrappers used by the repository layer.

use std::time::Duration;

use serde_json::Value;

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::CacheReport;

// == Store Names ==
/// Namespace of the tickets store.
pub const TICKETS_STORE: &str = "tickets";
/// Namespace of the views store.
pub const VIEWS_STORE: &str = "views";
/// Namespace of the users store.
pub const USERS_STORE: &str = "users";

// == Key Conventions ==
// The repository layer and the pre-registered invalidation patterns below
// must agree on key shapes; these helpers are the single source of both.

/// Cache key for a single ticket.
pub fn ticket_key(ticket_id: u64) -> String {
    format!("ticket_{}", ticket_id)
}

/// Cache key for a ticket listing ("recent", "open", ...).
pub fn tickets_list_key(scope: &str) -> String {
    format!("tickets_{}", scope)
}

/// Cache key for the tickets belonging to a view.
pub fn view_tickets_key(view_id: u64) -> String {
    format!("view_{}_tickets", view_id)
}

/// Cache key for a single view definition.
pub fn view_key(view_id: u64) -> String {
    format!("view_{}", view_id)
}

/// Cache key for the full view listing.
pub fn all_views_key() -> String {
    "views_all".to_string()
}

/// Cache key for a single user record.
pub fn user_key(user_id: u64) -> String {
    format!("user_{}", user_id)
}

// == Cache Manager ==
/// Aggregates the fixed set of named stores: tickets, views, users.
///
/// Construct one explicitly and hand it to every collaborator that needs
/// caching; there is no process-wide default instance. Aggregate operations
/// visit each store under its own lock, one after another, so they are not
/// atomic across stores.
#[derive(Debug)]
pub struct CacheManager {
    tickets: CacheStore,
    views: CacheStore,
    users: CacheStore,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager with one store per namespace, sized from `config`,
    /// and the standard invalidation patterns pre-registered: ticket-list
    /// and view-ticket-list keys on the tickets store, the view listing and
    /// single-view keys on the views store (all at their store's default
    /// TTL).
    pub fn new(config: &CacheConfig) -> Self {
        let tickets = CacheStore::new(
            TICKETS_STORE,
            config.tickets.max_entries,
            Duration::from_secs(config.tickets.default_ttl_secs),
        )
        .with_invalidation_pattern("^tickets_", None)
        .with_invalidation_pattern("^view_[0-9]+_tickets$", None);

        let views = CacheStore::new(
            VIEWS_STORE,
            config.views.max_entries,
            Duration::from_secs(config.views.default_ttl_secs),
        )
        .with_invalidation_pattern("^views_all$", None)
        .with_invalidation_pattern("^view_[0-9]+$", None);

        let users = CacheStore::new(
            USERS_STORE,
            config.users.max_entries,
            Duration::from_secs(config.users.default_ttl_secs),
        );

        Self {
            tickets,
            views,
            users,
        }
    }

    // == Get Cache ==
    /// Returns the store registered under `name`.
    ///
    /// Unknown names are a caller error, reported as a value.
    pub fn get_cache(&self, name: &str) -> Result<&CacheStore> {
        match name {
            TICKETS_STORE => Ok(&self.tickets),
            VIEWS_STORE => Ok(&self.views),
            USERS_STORE => Ok(&self.users),
            other => Err(CacheError::UnknownStore(other.to_string())),
        }
    }

    fn stores(&self) -> [&CacheStore; 3] {
        [&self.tickets, &self.views, &self.users]
    }

    // == Statistics ==
    /// Snapshots every store and assembles the aggregate report.
    pub fn statistics(&self) -> CacheReport {
        CacheReport::new(self.stores().iter().map(|store| store.snapshot()).collect())
    }

    // == Clear All ==
    /// Empties every store. Statistics are left untouched.
    pub fn clear_all(&self) {
        for store in self.stores() {
            store.clear();
        }
    }

    // == Reset Statistics ==
    /// Zeroes the counters of every store.
    pub fn reset_statistics(&self) {
        for store in self.stores() {
            store.reset_stats();
        }
    }

    // == Set Custom TTL ==
    /// Replaces the named store's default TTL. Returns false when `name` is
    /// not a known namespace.
    pub fn set_custom_ttl(&self, name: &str, ttl_secs: u64) -> bool {
        match self.get_cache(name) {
            Ok(store) => {
                store.set_default_ttl(Duration::from_secs(ttl_secs));
                true
            }
            Err(_) => false,
        }
    }

    // == Prune Expired ==
    /// Removes stale entries from every store, returning the total count.
    pub fn prune_expired(&self) -> usize {
        self.stores()
            .iter()
            .map(|store| store.prune_expired())
            .sum()
    }

    // == Ticket Convenience ==
    /// Looks up a single cached ticket payload.
    pub fn get_ticket(&self, key: &str) -> Option<Value> {
        self.tickets.get(key)
    }

    /// Caches a single ticket payload.
    pub fn set_ticket(&self, key: &str, value: Value) {
        self.tickets.set(key, value);
    }

    /// Looks up a cached ticket listing.
    pub fn get_tickets(&self, key: &str) -> Option<Value> {
        self.tickets.get(key)
    }

    /// Caches a ticket listing.
    pub fn set_tickets(&self, key: &str, value: Value) {
        self.tickets.set(key, value);
    }

    /// Drops every tickets-store key whose string form contains
    /// `ticket_id`, so the next read goes back to the API. This sweeps the
    /// ticket itself and any listing key carrying the id; returns the count
    /// removed.
    ///
    /// Called by write paths (tagging, commenting) after mutating a ticket
    /// upstream.
    pub fn invalidate_ticket(&self, ticket_id: &str) -> usize {
        self.tickets.invalidate_by_pattern(&regex::escape(ticket_id))
    }

    // == Views Convenience ==
    /// Looks up a cached view payload.
    pub fn get_views(&self, key: &str) -> Option<Value> {
        self.views.get(key)
    }

    /// Caches a view payload.
    pub fn set_views(&self, key: &str, value: Value) {
        self.views.set(key, value);
    }

    /// Empties the views store, leaving the other stores alone.
    pub fn force_refresh_views(&self) {
        self.views.clear();
    }

    // == Users Convenience ==
    /// Looks up a cached user record.
    pub fn get_user(&self, key: &str) -> Option<Value> {
        self.users.get(key)
    }

    /// Caches a user record.
    pub fn set_user(&self, key: &str, value: Value) {
        self.users.set(key, value);
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manager_default_configuration() {
        let manager = CacheManager::default();

        let report = manager.statistics();
        let tickets = report.store(TICKETS_STORE).unwrap();
        assert_eq!(tickets.max_entries, 1000);
        assert_eq!(tickets.default_ttl_secs, 300);

        let views = report.store(VIEWS_STORE).unwrap();
        assert_eq!(views.max_entries, 100);
        assert_eq!(views.default_ttl_secs, 900);

        let users = report.store(USERS_STORE).unwrap();
        assert_eq!(users.max_entries, 500);
        assert_eq!(users.default_ttl_secs, 1800);
    }

    #[test]
    fn test_get_cache_known_names() {
        let manager = CacheManager::default();
        assert_eq!(manager.get_cache("tickets").unwrap().name(), "tickets");
        assert_eq!(manager.get_cache("views").unwrap().name(), "views");
        assert_eq!(manager.get_cache("users").unwrap().name(), "users");
    }

    #[test]
    fn test_get_cache_unknown_name() {
        let manager = CacheManager::default();
        let err = manager.get_cache("sessions").unwrap_err();
        assert!(matches!(err, CacheError::UnknownStore(name) if name == "sessions"));
    }

    #[test]
    fn test_set_custom_ttl() {
        let manager = CacheManager::default();

        assert!(manager.set_custom_ttl("tickets", 60));
        assert_eq!(
            manager.get_cache("tickets").unwrap().default_ttl(),
            Duration::from_secs(60)
        );

        assert!(!manager.set_custom_ttl("sessions", 60));
    }

    #[test]
    fn test_clear_all() {
        let manager = CacheManager::default();

        manager.set_ticket(&ticket_key(1), json!({"id": 1}));
        manager.set_views(&all_views_key(), json!([{"id": 10}]));
        manager.set_user(&user_key(7), json!({"id": 7}));

        manager.clear_all();

        for store in manager.stores() {
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_reset_statistics() {
        let manager = CacheManager::default();

        manager.set_ticket("ticket_1", json!(1));
        manager.get_ticket("ticket_1");
        manager.get_views("missing");

        manager.reset_statistics();

        let report = manager.statistics();
        for snapshot in &report.stores {
            assert_eq!(snapshot.hits, 0);
            assert_eq!(snapshot.misses, 0);
        }
    }

    #[test]
    fn test_statistics_report_per_store() {
        let manager = CacheManager::default();

        manager.set_ticket("ticket_1", json!(1));
        manager.get_ticket("ticket_1");
        manager.get_ticket("ticket_2");

        let report = manager.statistics();
        let tickets = report.store(TICKETS_STORE).unwrap();
        assert_eq!(tickets.hits, 1);
        assert_eq!(tickets.misses, 1);
        assert_eq!(tickets.size, 1);

        // The other stores were never touched.
        let views = report.store(VIEWS_STORE).unwrap();
        assert_eq!(views.hits + views.misses, 0);
    }

    #[test]
    fn test_ticket_roundtrip() {
        let manager = CacheManager::default();

        let key = ticket_key(42);
        manager.set_ticket(&key, json!({"id": 42, "subject": "help"}));
        assert_eq!(
            manager.get_ticket(&key),
            Some(json!({"id": 42, "subject": "help"}))
        );

        let list_key = tickets_list_key("recent");
        manager.set_tickets(&list_key, json!([{"id": 42}]));
        assert_eq!(manager.get_tickets(&list_key), Some(json!([{"id": 42}])));
    }

    #[test]
    fn test_invalidate_ticket_sweeps_matching_keys() {
        let manager = CacheManager::default();

        manager.set_ticket(&ticket_key(42), json!({"id": 42}));
        manager.set_tickets(&tickets_list_key("42_comments"), json!([1, 2]));
        manager.set_ticket(&ticket_key(7), json!({"id": 7}));
        manager.set_views(&view_key(42), json!({"id": 42}));

        let removed = manager.invalidate_ticket("42");

        // Both tickets-store keys carrying the id are gone; the unrelated
        // ticket and the views store are untouched.
        assert_eq!(removed, 2);
        assert_eq!(manager.get_ticket(&ticket_key(42)), None);
        assert_eq!(manager.get_tickets(&tickets_list_key("42_comments")), None);
        assert_eq!(manager.get_ticket(&ticket_key(7)), Some(json!({"id": 7})));
        assert_eq!(manager.get_views(&view_key(42)), Some(json!({"id": 42})));
    }

    #[test]
    fn test_force_refresh_views() {
        let manager = CacheManager::default();

        manager.set_views(&all_views_key(), json!([1]));
        manager.set_ticket("ticket_1", json!(1));

        manager.force_refresh_views();

        assert!(manager.get_cache("views").unwrap().is_empty());
        assert_eq!(manager.get_ticket("ticket_1"), Some(json!(1)));
    }

    #[test]
    fn test_prune_expired_across_stores() {
        let manager = CacheManager::default();
        manager.set_custom_ttl("tickets", 0);
        manager.set_custom_ttl("views", 0);

        manager.set_ticket("ticket_1", json!(1));
        manager.set_views("views_all", json!([1]));
        manager.set_user("user_1", json!(1));

        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(manager.prune_expired(), 2);
        assert_eq!(manager.get_user("user_1"), Some(json!(1)));
    }

    #[test]
    fn test_key_helpers() {
        assert_eq!(ticket_key(42), "ticket_42");
        assert_eq!(tickets_list_key("recent"), "tickets_recent");
        assert_eq!(view_tickets_key(9), "view_9_tickets");
        assert_eq!(view_key(9), "view_9");
        assert_eq!(all_views_key(), "views_all");
        assert_eq!(user_key(3), "user_3");
    }
}
