use std::future::Future;

use leptos::*;

use crate::{
    api::{ApiClient, ApiError},
    components::{error::InlineErrorMessage, layout::SuccessMessage},
    state::{
        auth::use_api,
        store::{use_app_store, AppStore},
    },
};

pub mod accounts;
pub mod admin_dashboard;
pub mod admin_login;
pub mod cards;
pub mod dashboard;
pub mod loans;
pub mod login;
pub mod profile;
pub mod register;
pub mod transfers;

pub use accounts::AccountsPage;
pub use admin_dashboard::AdminDashboardPage;
pub use admin_login::AdminLoginPage;
pub use cards::CardsPage;
pub use dashboard::DashboardPage;
pub use loans::LoansPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use transfers::TransfersPage;

/// What a page needs to run operations: the gateway, the store and the
/// feedback slots of its last operation.
#[derive(Clone)]
pub struct PageContext {
    api: Option<ApiClient>,
    pub store: AppStore,
    pub error: RwSignal<Option<ApiError>>,
    pub notice: RwSignal<Option<String>>,
    pub pending: RwSignal<bool>,
}

impl PageContext {
    pub fn new() -> Self {
        Self {
            api: use_api(),
            store: use_app_store(),
            error: create_rw_signal(None),
            notice: create_rw_signal(None),
            pending: create_rw_signal(false),
        }
    }

    /// Runs one operation in the background. While it is in flight further
    /// submissions are ignored.
    pub fn run<F, Fut, T>(&self, success: Option<&'static str>, op: F)
    where
        F: FnOnce(ApiClient, AppStore) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        T: 'static,
    {
        if self.pending.get_untracked() {
            log::debug!("operation already in flight, ignoring submit");
            return;
        }
        let Some(api) = self.api.clone() else {
            self.error
                .set(Some(ApiError::validation("Session services are not available")));
            return;
        };
        let (store, error, notice, pending) = (self.store, self.error, self.notice, self.pending);
        pending.set(true);
        error.set(None);
        notice.set(None);
        spawn_local(async move {
            let result = op(api, store).await;
            pending.set(false);
            match result {
                Ok(_) => notice.set(success.map(str::to_string)),
                Err(err) => error.set(Some(err)),
            }
        });
    }

    /// Fires the initial loads of a page once it is mounted.
    pub fn load<F, Fut>(&self, op: F)
    where
        F: FnOnce(ApiClient, AppStore) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let Some(api) = self.api.clone() else {
            return;
        };
        let store = self.store;
        spawn_local(async move { op(api, store).await });
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Error and success slots of a [`PageContext`].
#[component]
pub fn PageFeedback(ctx: PageContext) -> impl IntoView {
    let notice = ctx.notice;
    view! {
        <InlineErrorMessage error=ctx.error/>
        {move || notice.get().map(|message| view! { <SuccessMessage message=message/> })}
    }
}

pub fn log_failure(what: &str, result: Result<(), ApiError>) {
    if let Err(err) = result {
        log::warn!("{} failed: {}", what, err);
    }
}
