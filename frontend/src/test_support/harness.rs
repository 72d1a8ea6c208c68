use std::rc::Rc;

use httpmock::MockServer;
use leptos::*;

use crate::{
    api::client::ApiClient,
    state::{session::AdminCachePolicy, store::{AppStore, SessionManager}},
    utils::{navigation::DetachedNavigator, storage::MemoryStorage},
};

/// A store, session manager and gateway wired against a mock backend.
pub struct Harness {
    pub store: AppStore,
    pub sessions: SessionManager,
    pub api: ApiClient,
    pub storage: MemoryStorage,
    pub nav: DetachedNavigator,
}

pub fn harness(server: &MockServer, start_path: &str) -> Harness {
    harness_with_storage(server, start_path, MemoryStorage::new())
}

pub fn harness_with_storage(
    server: &MockServer,
    start_path: &str,
    storage: MemoryStorage,
) -> Harness {
    let store = AppStore::new();
    provide_context(store);
    let sessions = SessionManager::new(store, Rc::new(storage.clone()))
        .with_admin_policy(AdminCachePolicy::Retain);
    let nav = DetachedNavigator::at(start_path);
    let api = ApiClient::new_with_base_url(server.base_url(), Rc::new(sessions.clone()))
        .with_navigator(Rc::new(nav.clone()));
    Harness {
        store,
        sessions,
        api,
        storage,
        nav,
    }
}
