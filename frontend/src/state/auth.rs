use std::rc::Rc;

use futures::join;
use leptos::*;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, RegisterRequest, TransactionQuery},
    identity::IdentityKind,
    messages,
    state::{
        employee_auth,
        store::{AppStore, SessionManager},
    },
    utils::storage::default_storage,
};

/// Builds the login payload, rejecting blank fields before any request.
pub fn validate_credentials(email: &str, password: &str) -> Result<LoginRequest, ApiError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(ApiError::validation(messages::FILL_ALL_FIELDS));
    }
    Ok(LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

pub fn validate_registration(form: &RegisterRequest) -> Result<(), ApiError> {
    let fields = [
        &form.first_name,
        &form.last_name,
        &form.patronymic,
        &form.email,
        &form.phone,
        &form.password,
    ];
    if fields.iter().any(|value| value.trim().is_empty()) {
        return Err(ApiError::validation(messages::FILL_ALL_FIELDS));
    }
    Ok(())
}

/// Fetches every customer collection in parallel. A failed fetch leaves its
/// slice as it was.
pub async fn load_customer_data(api: &ApiClient, store: AppStore) {
    store.accounts.update(|c| c.set_loading(true));
    store.cards.update(|c| c.set_loading(true));

    let query = TransactionQuery::default();
    let (accounts, cards, loans, processes, transactions) = join!(
        api.my_accounts(),
        api.my_cards(),
        api.my_loans(),
        api.my_processes(),
        api.my_transactions(&query),
    );

    store.accounts.update(|c| c.set_loading(false));
    store.cards.update(|c| c.set_loading(false));

    match accounts {
        Ok(items) => store.accounts.update(|c| c.set_all(items)),
        Err(err) => log::warn!("accounts not loaded: {}", err),
    }
    match cards {
        Ok(items) => store.cards.update(|c| c.set_all(items)),
        Err(err) => log::warn!("cards not loaded: {}", err),
    }
    match loans {
        Ok(items) => store.loans.update(|c| c.set_all(items)),
        Err(err) => log::warn!("loans not loaded: {}", err),
    }
    match processes {
        Ok(items) => store.processes.update(|c| c.set_all(items)),
        Err(err) => log::warn!("processes not loaded: {}", err),
    }
    match transactions {
        Ok(items) => store.transactions.update(|c| c.set_all(items)),
        Err(err) => log::warn!("transactions not loaded: {}", err),
    }
}

pub async fn login(
    api: &ApiClient,
    sessions: &SessionManager,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let request = validate_credentials(email, password)?;
    let response = api.login(&request).await?;
    sessions.establish_customer(response.profile, &response.access_token);
    log::info!("customer logged in");
    load_customer_data(api, sessions.store()).await;
    Ok(())
}

/// Registration logs the new customer in.
pub async fn register(
    api: &ApiClient,
    sessions: &SessionManager,
    form: RegisterRequest,
) -> Result<(), ApiError> {
    validate_registration(&form)?;
    let response = api.register(&form).await?;
    sessions.establish_customer(response.profile, &response.access_token);
    log::info!("customer registered");
    load_customer_data(api, sessions.store()).await;
    Ok(())
}

/// Restores the customer session from the stored token. Returns whether a
/// session is active afterwards.
pub async fn auto_login(api: &ApiClient, sessions: &SessionManager) -> bool {
    let Some(token) = sessions.stored_token(IdentityKind::Customer) else {
        log::debug!("no stored customer token");
        sessions.logout(IdentityKind::Customer);
        return false;
    };

    match api.customer_me(&token).await {
        Ok(profile) => {
            sessions.establish_customer(profile, &token);
            log::info!("customer session restored");
            load_customer_data(api, sessions.store()).await;
            true
        }
        Err(err) => {
            log::info!("stored customer token rejected: {}", err);
            sessions.logout(IdentityKind::Customer);
            false
        }
    }
}

pub fn logout(sessions: &SessionManager) {
    sessions.logout(IdentityKind::Customer);
    log::info!("customer logged out");
}

/// Runs both auto-logins concurrently. Returns `(customer, employee)`.
pub async fn initialize_sessions(api: &ApiClient, sessions: &SessionManager) -> (bool, bool) {
    join!(
        auto_login(api, sessions),
        employee_auth::auto_login(api, sessions)
    )
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let store = AppStore::new();
    let sessions = SessionManager::new(store, default_storage());
    let api = ApiClient::new(Rc::new(sessions.clone()));
    provide_context(store);
    provide_context(sessions.clone());
    provide_context(api.clone());

    spawn_local(async move {
        let (customer, employee) = initialize_sessions(&api, &sessions).await;
        log::debug!(
            "start-up sessions resolved (customer: {}, employee: {})",
            customer,
            employee
        );
    });

    view! { <>{children()}</> }
}

pub fn use_sessions() -> Option<SessionManager> {
    use_context::<SessionManager>()
}

pub fn use_api() -> Option<ApiClient> {
    use_context::<ApiClient>()
}

pub(crate) fn wiring() -> Result<(ApiClient, SessionManager), ApiError> {
    match (use_api(), use_sessions()) {
        (Some(api), Some(sessions)) => Ok((api, sessions)),
        _ => Err(ApiError::validation("Session services are not available")),
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn use_login_action() -> Action<Credentials, Result<(), ApiError>> {
    let wired = wiring();
    create_action(move |input: &Credentials| {
        let input = input.clone();
        let wired = wired.clone();
        async move {
            let (api, sessions) = wired?;
            login(&api, &sessions, &input.email, &input.password).await
        }
    })
}

pub fn use_register_action() -> Action<RegisterRequest, Result<(), ApiError>> {
    let wired = wiring();
    create_action(move |form: &RegisterRequest| {
        let form = form.clone();
        let wired = wired.clone();
        async move {
            let (api, sessions) = wired?;
            register(&api, &sessions, form).await
        }
    })
}
