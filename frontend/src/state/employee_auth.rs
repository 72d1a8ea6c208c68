use futures::join;
use leptos::*;

use crate::{
    api::{ApiClient, ApiError, CLIENT_PAGE_LIMIT},
    identity::IdentityKind,
    state::{
        auth::{validate_credentials, wiring, Credentials},
        store::{AppStore, SessionManager},
    },
};

/// Loads the back-office collections concurrently. Each one that fails is
/// left as it was.
pub async fn load_admin_data(api: &ApiClient, store: AppStore) {
    store.admin.update(|a| a.loading = true);

    let (employees, roles, branches, clients, processes, stats) = join!(
        api.employees(),
        api.roles(),
        api.branches(),
        api.clients(0, CLIENT_PAGE_LIMIT),
        api.pending_processes(),
        api.process_overview(),
    );

    store.admin.update(|admin| {
        admin.loading = false;
        match employees {
            Ok(items) => admin.employees.set_all(items),
            Err(err) => log::warn!("employees not loaded: {}", err),
        }
        match roles {
            Ok(items) => admin.roles.set_all(items),
            Err(err) => log::warn!("roles not loaded: {}", err),
        }
        match branches {
            Ok(items) => admin.branches.set_all(items),
            Err(err) => log::warn!("branches not loaded: {}", err),
        }
        match clients {
            Ok(items) => admin.clients.set_all(items),
            Err(err) => log::warn!("clients not loaded: {}", err),
        }
        match processes {
            Ok(items) => admin.processes.set_all(items),
            Err(err) => log::warn!("pending processes not loaded: {}", err),
        }
        match stats {
            Ok(stats) => admin.stats = Some(stats),
            Err(err) => log::warn!("process overview not loaded: {}", err),
        }
    });
}

pub async fn login(
    api: &ApiClient,
    sessions: &SessionManager,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let request = validate_credentials(email, password)?;
    let response = api.employee_login(&request).await?;
    sessions.establish_employee(response.profile, &response.access_token);
    log::info!("employee logged in");
    load_admin_data(api, sessions.store()).await;
    Ok(())
}

pub async fn auto_login(api: &ApiClient, sessions: &SessionManager) -> bool {
    let Some(token) = sessions.stored_token(IdentityKind::Employee) else {
        log::debug!("no stored employee token");
        sessions.mark_logged_out(IdentityKind::Employee);
        return false;
    };

    match api.employee_me(&token).await {
        Ok(profile) => {
            sessions.establish_employee(profile, &token);
            log::info!("employee session restored");
            load_admin_data(api, sessions.store()).await;
            true
        }
        Err(err) => {
            log::info!("stored employee token rejected: {}", err);
            sessions.logout(IdentityKind::Employee);
            false
        }
    }
}

pub fn logout(sessions: &SessionManager) {
    sessions.logout(IdentityKind::Employee);
    log::info!("employee logged out");
}

pub fn use_employee_login_action() -> Action<Credentials, Result<(), ApiError>> {
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
