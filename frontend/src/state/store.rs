use std::rc::Rc;

use leptos::*;

use crate::{
    api::{
        client::AuthPort,
        types::{
            Account, Card, CustomerProfile, EmployeeProfile, Loan, PersonalInfo, Process,
            ProcessStats, Transaction, TransactionStats,
        },
    },
    config,
    identity::IdentityKind,
    state::{
        admin::AdminState,
        cache::{ResourceCache, TransactionCache},
        session::{AdminCachePolicy, CustomerSession, EmployeeSession, SessionStatus},
    },
    utils::storage::TokenStorage,
};

pub type AccountsCache = ResourceCache<Account>;
pub type CardsCache = ResourceCache<Card>;
pub type LoansCache = ResourceCache<Loan>;
pub type ProcessesCache = ResourceCache<Process, ProcessStats>;
pub type TransactionsCache = TransactionCache<Transaction, TransactionStats>;

/// Process-wide reactive state: both sessions and every cache slice.
#[derive(Clone, Copy)]
pub struct AppStore {
    pub customer: RwSignal<CustomerSession>,
    pub employee: RwSignal<EmployeeSession>,
    pub personal_info: RwSignal<PersonalInfo>,
    pub accounts: RwSignal<AccountsCache>,
    pub cards: RwSignal<CardsCache>,
    pub loans: RwSignal<LoansCache>,
    pub processes: RwSignal<ProcessesCache>,
    pub transactions: RwSignal<TransactionsCache>,
    pub admin: RwSignal<AdminState>,
}

impl AppStore {
    pub fn new() -> Self {
        Self {
            customer: create_rw_signal(CustomerSession::default()),
            employee: create_rw_signal(EmployeeSession::default()),
            personal_info: create_rw_signal(PersonalInfo::default()),
            accounts: create_rw_signal(AccountsCache::default()),
            cards: create_rw_signal(CardsCache::default()),
            loans: create_rw_signal(LoansCache::default()),
            processes: create_rw_signal(ProcessesCache::default()),
            transactions: create_rw_signal(TransactionsCache::default()),
            admin: create_rw_signal(AdminState::default()),
        }
    }

    pub fn status(&self, kind: IdentityKind) -> SessionStatus {
        match kind {
            IdentityKind::Customer => self.customer.with_untracked(|s| s.status()),
            IdentityKind::Employee => self.employee.with_untracked(|s| s.status()),
        }
    }

    pub fn is_logged_in(&self, kind: IdentityKind) -> bool {
        match kind {
            IdentityKind::Customer => self.customer.with_untracked(|s| s.is_logged_in()),
            IdentityKind::Employee => self.employee.with_untracked(|s| s.is_logged_in()),
        }
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_app_store() -> AppStore {
    use_context::<AppStore>().unwrap_or_else(|| {
        log::warn!("AppStore missing from context, creating a detached one");
        AppStore::new()
    })
}

/// Owns the session writes that must happen together: store, durable token
/// and dependent caches.
#[derive(Clone)]
pub struct SessionManager {
    store: AppStore,
    storage: Rc<dyn TokenStorage>,
    policy: Option<AdminCachePolicy>,
}

impl SessionManager {
    pub fn new(store: AppStore, storage: Rc<dyn TokenStorage>) -> Self {
        Self {
            store,
            storage,
            policy: None,
        }
    }

    /// Pins the admin cache policy instead of reading it from runtime config.
    pub fn with_admin_policy(mut self, policy: AdminCachePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn store(&self) -> AppStore {
        self.store
    }

    pub fn admin_policy(&self) -> AdminCachePolicy {
        self.policy.unwrap_or_else(config::admin_cache_policy)
    }

    pub fn stored_token(&self, kind: IdentityKind) -> Option<String> {
        self.storage
            .get(kind.storage_key())
            .filter(|token| !token.trim().is_empty())
    }

    fn persist_token(&self, kind: IdentityKind, token: &str) {
        if let Err(err) = self.storage.set(kind.storage_key(), token) {
            log::warn!("could not persist the {} token: {}", kind.label(), err);
        }
    }

    fn forget_token(&self, kind: IdentityKind) {
        if let Err(err) = self.storage.remove(kind.storage_key()) {
            log::warn!("could not remove the {} token: {}", kind.label(), err);
        }
    }

    pub fn establish_customer(&self, mut profile: CustomerProfile, token: &str) {
        if let Some(info) = profile.personal_info.take() {
            self.store.personal_info.set(info);
        }
        self.store
            .customer
            .update(|session| session.establish(profile, token));
        self.persist_token(IdentityKind::Customer, token);
    }

    pub fn establish_employee(&self, profile: EmployeeProfile, token: &str) {
        self.store
            .employee
            .update(|session| session.establish(profile, token));
        self.persist_token(IdentityKind::Employee, token);
    }

    /// Resolves a session that has nothing stored to `LoggedOut`.
    pub fn mark_logged_out(&self, kind: IdentityKind) {
        match kind {
            IdentityKind::Customer => self.store.customer.update(|s| s.clear()),
            IdentityKind::Employee => self.store.employee.update(|s| s.clear()),
        }
    }

    /// Logout cascade of one identity. The other identity is never touched.
    pub fn logout(&self, kind: IdentityKind) {
        match kind {
            IdentityKind::Customer => self.logout_customer(),
            IdentityKind::Employee => self.logout_employee(),
        }
    }

    fn logout_customer(&self) {
        let store = self.store;
        store.customer.update(|s| s.clear());
        store.personal_info.set(PersonalInfo::default());
        store.accounts.update(|c| c.clear());
        store.cards.update(|c| c.clear());
        store.loans.update(|c| c.clear());
        store.processes.update(|c| c.clear());
        store.transactions.update(|c| c.clear());
        self.forget_token(IdentityKind::Customer);
    }

    fn logout_employee(&self) {
        self.store.employee.update(|s| s.clear());
        if self.admin_policy() == AdminCachePolicy::ClearOnLogout {
            self.clear_admin();
        }
        self.forget_token(IdentityKind::Employee);
    }

    pub fn clear_admin(&self) {
        self.store.admin.update(|a| a.clear());
    }
}

impl AuthPort for SessionManager {
    fn bearer_token(&self, kind: IdentityKind) -> Option<String> {
        match kind {
            IdentityKind::Customer => self
                .store
                .customer
                .with_untracked(|s| s.token().map(str::to_string)),
            IdentityKind::Employee => self
                .store
                .employee
                .with_untracked(|s| s.token().map(str::to_string)),
        }
    }

    fn on_unauthorized(&self, kind: IdentityKind) -> bool {
        if self.store.status(kind) == SessionStatus::LoggedOut {
            return false;
        }
        self.logout(kind);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::SessionStatus;
    use crate::test_support::fixtures;
    use crate::utils::storage::MemoryStorage;

    fn manager(storage: &MemoryStorage) -> SessionManager {
        SessionManager::new(AppStore::new(), Rc::new(storage.clone()))
    }

    fn fill_customer_caches(store: AppStore) {
        store.personal_info.set(fixtures::personal_info());
        store.accounts.update(|c| c.set_all(vec![fixtures::account(1, 100.0)]));
        store.cards.update(|c| c.set_all(vec![fixtures::card(5, 1)]));
        store.loans.update(|c| c.set_all(vec![fixtures::loan(3)]));
        store.processes.update(|c| {
            c.set_all(vec![fixtures::process(8)]);
            c.set_stats(ProcessStats::default());
        });
        store.transactions.update(|c| {
            c.add(fixtures::transaction(11));
            c.set_stats(TransactionStats::default());
        });
    }

    #[test]
    fn repeated_rejection_does_not_rerun_the_cascade() {
        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let sessions = manager(&storage);
        sessions.establish_customer(fixtures::customer_profile(1), "tok1");

        assert!(sessions.on_unauthorized(IdentityKind::Customer));
        assert!(!sessions.store().is_logged_in(IdentityKind::Customer));

        fill_customer_caches(sessions.store());
        assert!(!sessions.on_unauthorized(IdentityKind::Customer));
        assert_eq!(sessions.store().accounts.with_untracked(|c| c.len()), 1);
        runtime.dispose();
    }

    #[test]
    fn establish_persists_token_and_personal_info() {
        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let sessions = manager(&storage);

        let mut profile = fixtures::customer_profile(42);
        profile.personal_info = Some(fixtures::personal_info());
        sessions.establish_customer(profile, "tokC");

        let store = sessions.store();
        assert!(store.is_logged_in(IdentityKind::Customer));
        assert_eq!(storage.get("access_token").as_deref(), Some("tokC"));
        assert_eq!(
            store.personal_info.get_untracked(),
            fixtures::personal_info()
        );
        assert!(store
            .customer
            .with_untracked(|s| s.profile().map(|p| p.personal_info.is_none()))
            .unwrap_or(false));
        runtime.dispose();
    }

    #[test]
    fn customer_logout_clears_every_customer_slice() {
        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let sessions = manager(&storage);
        sessions.establish_customer(fixtures::customer_profile(42), "tokC");
        let store = sessions.store();
        fill_customer_caches(store);

        sessions.logout(IdentityKind::Customer);

        assert_eq!(
            store.customer.with_untracked(|s| s.status()),
            SessionStatus::LoggedOut
        );
        assert_eq!(store.personal_info.get_untracked(), PersonalInfo::default());
        assert!(store.accounts.with_untracked(|c| c.is_empty()));
        assert!(store.cards.with_untracked(|c| c.is_empty()));
        assert!(store.loans.with_untracked(|c| c.is_empty()));
        assert!(store
            .processes
            .with_untracked(|c| c.is_empty() && c.stats().is_none()));
        assert!(store
            .transactions
            .with_untracked(|c| c.is_empty() && c.stats().is_none()));
        assert!(!storage.contains("access_token"));
        runtime.dispose();
    }

    #[test]
    fn unauthorized_customer_leaves_employee_intact() {
        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let sessions = manager(&storage);
        sessions.establish_customer(fixtures::customer_profile(1), "tok1");
        sessions.establish_employee(fixtures::employee_profile(3), "tokE");
        let before = sessions.store().employee.get_untracked();

        sessions.on_unauthorized(IdentityKind::Customer);

        assert!(sessions.bearer_token(IdentityKind::Customer).is_none());
        assert_eq!(sessions.store().employee.get_untracked(), before);
        assert_eq!(storage.get("employee_token").as_deref(), Some("tokE"));
        runtime.dispose();
    }

    #[test]
    fn unauthorized_employee_leaves_customer_intact() {
        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let sessions = manager(&storage);
        sessions.establish_customer(fixtures::customer_profile(1), "tokC");
        sessions.establish_employee(fixtures::employee_profile(3), "tokE");
        fill_customer_caches(sessions.store());
        let before = sessions.store().customer.get_untracked();

        sessions.on_unauthorized(IdentityKind::Employee);

        assert!(!sessions.store().is_logged_in(IdentityKind::Employee));
        assert!(!storage.contains("employee_token"));
        assert_eq!(sessions.store().customer.get_untracked(), before);
        assert_eq!(sessions.store().accounts.with_untracked(|c| c.len()), 1);
        assert_eq!(storage.get("access_token").as_deref(), Some("tokC"));
        runtime.dispose();
    }

    #[test]
    fn admin_caches_follow_the_policy() {
        let runtime = create_runtime();
        for (policy, expect_empty) in [
            (AdminCachePolicy::Retain, false),
            (AdminCachePolicy::ClearOnLogout, true),
        ] {
            let sessions =
                manager(&MemoryStorage::new()).with_admin_policy(policy);
            sessions.establish_employee(fixtures::employee_profile(3), "tokE");
            sessions
                .store()
                .admin
                .update(|a| a.roles.set_all(vec![fixtures::role(1, "Manager")]));

            sessions.on_unauthorized(IdentityKind::Employee);

            assert_eq!(
                sessions.store().admin.with_untracked(|a| a.is_empty()),
                expect_empty,
                "{policy:?}"
            );
        }
        runtime.dispose();
    }

    #[test]
    fn both_identities_can_be_logged_in_at_once() {
        let runtime = create_runtime();
        let sessions = manager(&MemoryStorage::new());
        sessions.establish_employee(fixtures::employee_profile(3), "tokE");
        sessions.establish_customer(fixtures::customer_profile(1), "tokC");

        assert_eq!(
            sessions.bearer_token(IdentityKind::Employee).as_deref(),
            Some("tokE")
        );
        assert_eq!(
            sessions.bearer_token(IdentityKind::Customer).as_deref(),
            Some("tokC")
        );
        runtime.dispose();
    }

    #[test]
    fn blank_stored_tokens_are_ignored() {
        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        storage.set("access_token", "  ").unwrap();
        let sessions = manager(&storage);
        assert!(sessions.stored_token(IdentityKind::Customer).is_none());
        runtime.dispose();
    }
}
