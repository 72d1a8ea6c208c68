use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Anything stored in a [`ResourceCache`] is addressed by its server id.
pub trait CacheItem {
    fn id(&self) -> i64;
}

/// Local mirror of one server-owned collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCache<T, S = ()> {
    items: Vec<T>,
    stats: Option<S>,
    loading: bool,
    error: Option<String>,
}

impl<T, S> Default for ResourceCache<T, S> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            stats: None,
            loading: false,
            error: None,
        }
    }
}

impl<T, S> ResourceCache<T, S>
where
    T: CacheItem + Clone + Serialize + DeserializeOwned,
{
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn stats(&self) -> Option<&S> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the list in server order and drops any previous error.
    pub fn set_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.error = None;
    }

    pub fn add(&mut self, item: T) {
        if self.get(item.id()).is_some() {
            log::warn!("cache already holds id {}, appending anyway", item.id());
        }
        self.items.push(item);
    }

    /// Shallow merge over the cached entry with the same id: top-level fields
    /// of `item` that are not null win. Returns `false` when the id is absent.
    pub fn update(&mut self, item: T) -> bool {
        let Some(slot) = self.items.iter_mut().find(|cached| cached.id() == item.id()) else {
            log::debug!("no cached entry with id {} to update", item.id());
            return false;
        };
        *slot = merge_shallow(slot, item);
        true
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Drops every entry matching `predicate`.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    pub fn set_stats(&mut self, stats: S) {
        self.stats = Some(stats);
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn merge_shallow<T>(existing: &T, incoming: T) -> T
where
    T: Clone + Serialize + DeserializeOwned,
{
    let (Ok(Value::Object(mut base)), Ok(Value::Object(patch))) =
        (serde_json::to_value(existing), serde_json::to_value(&incoming))
    else {
        return incoming;
    };
    for (key, value) in patch {
        if !value.is_null() {
            base.insert(key, value);
        }
    }
    serde_json::from_value(Value::Object(base)).unwrap_or(incoming)
}

/// Transactions are immutable once created, so this cache only grows, newest
/// first.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionCache<T, S = ()> {
    inner: ResourceCache<T, S>,
}

impl<T, S> Default for TransactionCache<T, S> {
    fn default() -> Self {
        Self {
            inner: ResourceCache::default(),
        }
    }
}

impl<T, S> TransactionCache<T, S>
where
    T: CacheItem + Clone + Serialize + DeserializeOwned,
{
    pub fn items(&self) -> &[T] {
        self.inner.items()
    }

    pub fn stats(&self) -> Option<&S> {
        self.inner.stats()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.inner.error()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn set_all(&mut self, items: Vec<T>) {
        self.inner.set_all(items);
    }

    pub fn add(&mut self, item: T) {
        self.inner.items.insert(0, item);
    }

    pub fn set_stats(&mut self, stats: S) {
        self.inner.set_stats(stats);
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.inner.set_error(error);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.inner.set_loading(loading);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Account, Card, Transaction, TransactionStats};

    fn account(id: i64, balance: f64) -> Account {
        Account {
            id,
            account_number: format!("40817{:015}", id),
            balance,
            created_at: None,
        }
    }

    fn card(id: i64, account_id: i64) -> Card {
        Card {
            id,
            card_number: format!("4000 0000 0000 {:04}", id),
            card_type: "debit".into(),
            expiration_date: None,
            is_active: true,
            account_id,
            account: None,
        }
    }

    fn transaction(id: i64) -> Transaction {
        Transaction {
            id,
            transaction_type: "deposit".into(),
            amount: 10.0,
            description: None,
            created_at: None,
            status: "completed".into(),
            from_card_id: None,
            to_card_id: Some(1),
            loan_id: None,
            client_id: 1,
        }
    }

    #[test]
    fn set_all_keeps_server_order_and_clears_error() {
        let mut cache: ResourceCache<Account> = ResourceCache::default();
        cache.set_error("boom");
        cache.set_all(vec![account(3, 0.0), account(1, 0.0), account(2, 0.0)]);
        let ids: Vec<i64> = cache.items().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(cache.error().is_none());
    }

    #[test]
    fn add_appends_even_on_duplicate_id() {
        let mut cache: ResourceCache<Account> = ResourceCache::default();
        cache.add(account(1, 0.0));
        cache.add(account(2, 0.0));
        cache.add(account(1, 5.0));
        let ids: Vec<i64> = cache.items().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 1]);
    }

    #[test]
    fn update_with_unknown_id_is_a_no_op() {
        let mut cache: ResourceCache<Account> = ResourceCache::default();
        cache.set_all(vec![account(1, 100.0)]);
        let before = cache.clone();
        assert!(!cache.update(account(99, 5.0)));
        assert_eq!(cache, before);
    }

    #[test]
    fn update_merges_non_null_fields() {
        let mut cache: ResourceCache<Card> = ResourceCache::default();
        let mut original = card(5, 1);
        original.account = Some(account(1, 100.0));
        cache.set_all(vec![original]);

        let mut deactivated = card(5, 1);
        deactivated.is_active = false;
        assert!(cache.update(deactivated));

        let cached = cache.get(5).unwrap();
        assert!(!cached.is_active);
        assert_eq!(cached.account.as_ref().map(|a| a.balance), Some(100.0));
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let mut cache: ResourceCache<Account> = ResourceCache::default();
        cache.set_all(vec![account(1, 0.0)]);
        assert!(!cache.remove(2));
        assert_eq!(cache.len(), 1);
        assert!(cache.remove(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn remove_where_drops_matching_entries() {
        let mut cache: ResourceCache<Card> = ResourceCache::default();
        cache.set_all(vec![card(1, 10), card(2, 11), card(3, 10)]);
        assert_eq!(cache.remove_where(|c| c.account_id == 10), 2);
        assert_eq!(cache.items().len(), 1);
        assert_eq!(cache.items()[0].id, 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cache: ResourceCache<Account, TransactionStats> = ResourceCache::default();
        cache.set_all(vec![account(1, 0.0)]);
        cache.set_stats(TransactionStats::default());
        cache.set_loading(true);
        cache.set_error("x");
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.stats().is_none());
        assert!(!cache.is_loading());
        assert!(cache.error().is_none());
    }

    #[test]
    fn transactions_are_prepended_newest_first() {
        let mut cache: TransactionCache<Transaction, TransactionStats> =
            TransactionCache::default();
        cache.add(transaction(1));
        cache.add(transaction(2));
        let ids: Vec<i64> = cache.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);

        cache.set_all(vec![transaction(7), transaction(8), transaction(9)]);
        let ids: Vec<i64> = cache.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);

        cache.set_stats(TransactionStats::default());
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.stats().is_none());
    }
}
