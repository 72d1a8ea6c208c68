//! Employee-side mutations over the admin caches.

use leptos::*;

use crate::{
    api::{
        AdminClient, ApiClient, ApiError, Branch, BranchDraft, Employee, EmployeeCreate,
        EmployeeUpdate, Process, ProcessDecision, Role, RoleDraft,
    },
    messages,
    state::store::AppStore,
};

fn require(values: &[&str]) -> Result<(), ApiError> {
    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(ApiError::validation(messages::FILL_ALL_FIELDS));
    }
    Ok(())
}

pub async fn register_employee(
    api: &ApiClient,
    store: AppStore,
    payload: &EmployeeCreate,
) -> Result<Employee, ApiError> {
    require(&[
        payload.first_name.as_str(),
        payload.last_name.as_str(),
        payload.email.as_str(),
        payload.password.as_str(),
    ])?;
    let employee = api.register_employee(payload).await?;
    store.admin.update(|a| a.employees.add(employee.clone()));
    Ok(employee)
}

pub async fn update_employee(
    api: &ApiClient,
    store: AppStore,
    employee_id: i64,
    payload: &EmployeeUpdate,
) -> Result<Employee, ApiError> {
    let employee = api.update_employee(employee_id, payload).await?;
    store.admin.update(|a| {
        a.employees.update(employee.clone());
    });
    Ok(employee)
}

/// Flips the active flag and mirrors the server's answer in the cache.
pub async fn toggle_employee_active(
    api: &ApiClient,
    store: AppStore,
    employee_id: i64,
) -> Result<bool, ApiError> {
    let toggled = api.toggle_employee_active(employee_id).await?;
    store.admin.update(|a| {
        let current = a.employees.get(toggled.employee_id).cloned();
        match current {
            Some(mut employee) => {
                employee.is_active = toggled.is_active;
                a.employees.update(employee);
            }
            None => log::debug!("toggled employee {} is not cached", toggled.employee_id),
        }
    });
    Ok(toggled.is_active)
}

pub async fn delete_employee(
    api: &ApiClient,
    store: AppStore,
    employee_id: i64,
) -> Result<(), ApiError> {
    api.delete_employee(employee_id).await?;
    store.admin.update(|a| {
        a.employees.remove(employee_id);
    });
    Ok(())
}

pub async fn create_role(api: &ApiClient, store: AppStore, name: &str) -> Result<Role, ApiError> {
    require(&[name])?;
    let draft = RoleDraft {
        name: name.trim().to_string(),
    };
    let role = api.create_role(&draft).await?;
    store.admin.update(|a| a.roles.add(role.clone()));
    Ok(role)
}

pub async fn rename_role(
    api: &ApiClient,
    store: AppStore,
    role_id: i64,
    name: &str,
) -> Result<Role, ApiError> {
    require(&[name])?;
    let draft = RoleDraft {
        name: name.trim().to_string(),
    };
    let role = api.update_role(role_id, &draft).await?;
    store.admin.update(|a| {
        a.roles.update(role.clone());
    });
    Ok(role)
}

pub async fn delete_role(api: &ApiClient, store: AppStore, role_id: i64) -> Result<(), ApiError> {
    api.delete_role(role_id).await?;
    store.admin.update(|a| {
        a.roles.remove(role_id);
    });
    Ok(())
}

pub async fn create_branch(
    api: &ApiClient,
    store: AppStore,
    draft: &BranchDraft,
) -> Result<Branch, ApiError> {
    require(&[
        draft.name.as_deref().unwrap_or_default(),
        draft.address.as_deref().unwrap_or_default(),
    ])?;
    let branch = api.create_branch(draft).await?;
    store.admin.update(|a| a.branches.add(branch.clone()));
    Ok(branch)
}

pub async fn update_branch(
    api: &ApiClient,
    store: AppStore,
    branch_id: i64,
    draft: &BranchDraft,
) -> Result<Branch, ApiError> {
    let branch = api.update_branch(branch_id, draft).await?;
    store.admin.update(|a| {
        a.branches.update(branch.clone());
    });
    Ok(branch)
}

pub async fn delete_branch(
    api: &ApiClient,
    store: AppStore,
    branch_id: i64,
) -> Result<(), ApiError> {
    api.delete_branch(branch_id).await?;
    store.admin.update(|a| {
        a.branches.remove(branch_id);
    });
    Ok(())
}

pub async fn decide_process(
    api: &ApiClient,
    store: AppStore,
    process_id: i64,
    decision: ProcessDecision,
) -> Result<Process, ApiError> {
    let process = api.decide_process(process_id, decision).await?;
    store.admin.update(|a| {
        a.processes.update(process.clone());
    });
    Ok(process)
}

pub async fn refresh_overview(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    let stats = api.process_overview().await?;
    store.admin.update(|a| a.stats = Some(stats));
    Ok(())
}

/// An empty query restores the first page of clients.
pub async fn search_clients(
    api: &ApiClient,
    store: AppStore,
    query: &str,
) -> Result<Vec<AdminClient>, ApiError> {
    let query = query.trim();
    let clients = if query.is_empty() {
        api.clients(0, crate::api::CLIENT_PAGE_LIMIT).await?
    } else {
        api.search_clients(query).await?
    };
    store.admin.update(|a| a.clients.set_all(clients.clone()));
    Ok(clients)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures, harness::*};
    use httpmock::prelude::*;
    use leptos::*;
    use serde_json::json;

    #[tokio::test]
    async fn toggle_active_mirrors_the_server_flag() {
        let server = MockServer::start_async().await;
        let toggle = server.mock(|when, then| {
            when.method(httpmock::Method::PATCH)
                .path("/employees/4/toggle-active")
                .header("Authorization", "Bearer tokE");
            then.status(200).json_body(json!({
                "message": "Employee deactivated",
                "employee_id": 4,
                "is_active": false
            }));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/admin/dashboard");
        h.sessions
            .establish_employee(fixtures::employee_profile(3), "tokE");
        h.store
            .admin
            .update(|a| a.employees.set_all(vec![fixtures::employee(4)]));

        let active = toggle_employee_active(&h.api, h.store, 4).await.unwrap();

        toggle.assert();
        assert!(!active);
        assert_eq!(
            h.store
                .admin
                .with_untracked(|a| a.employees.get(4).map(|e| e.is_active)),
            Some(false)
        );
        runtime.dispose();
    }

    #[tokio::test]
    async fn approving_a_process_updates_the_pending_list() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(httpmock::Method::PATCH).path("/admin/processes/8/approve");
            let mut approved = fixtures::process(8);
            approved.status = "approved".into();
            approved.employee_id = Some(3);
            then.status(200).json_body(fixtures::json(&approved));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/admin/dashboard");
        h.sessions
            .establish_employee(fixtures::employee_profile(3), "tokE");
        h.store
            .admin
            .update(|a| a.processes.set_all(vec![fixtures::process(8)]));

        decide_process(&h.api, h.store, 8, ProcessDecision::Approve)
            .await
            .unwrap();

        h.store.admin.with_untracked(|a| {
            let process = a.processes.get(8).unwrap();
            assert_eq!(process.status, "approved");
            assert_eq!(process.employee_id, Some(3));
        });
        runtime.dispose();
    }

    #[tokio::test]
    async fn role_and_branch_crud_reach_the_cache() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/roles/")
                .json_body(json!({"name": "Teller"}));
            then.status(200).json_body(json!({"id": 7, "name": "Teller"}));
        });
        server.mock(|when, then| {
            when.method(httpmock::Method::PATCH).path("/roles/7");
            then.status(200)
                .json_body(json!({"id": 7, "name": "Senior teller"}));
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/branches/1");
            then.status(200).json_body(json!({"message": "deleted"}));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/admin/dashboard");
        h.sessions
            .establish_employee(fixtures::employee_profile(3), "tokE");
        h.store
            .admin
            .update(|a| a.branches.set_all(vec![fixtures::branch(1)]));

        create_role(&h.api, h.store, "Teller").await.unwrap();
        rename_role(&h.api, h.store, 7, "Senior teller").await.unwrap();
        delete_branch(&h.api, h.store, 1).await.unwrap();

        h.store.admin.with_untracked(|a| {
            assert_eq!(a.roles.get(7).map(|r| r.name.as_str()), Some("Senior teller"));
            assert!(a.branches.is_empty());
        });
        runtime.dispose();
    }

    #[tokio::test]
    async fn blank_role_name_is_rejected_locally() {
        let server = MockServer::start_async().await;
        let runtime = create_runtime();
        let h = harness(&server, "/admin/dashboard");
        let err = create_role(&h.api, h.store, "   ").await.unwrap_err();
        assert_eq!(err.error, messages::FILL_ALL_FIELDS);
        runtime.dispose();
    }

    #[tokio::test]
    async fn client_search_replaces_the_client_list() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/admin/clients/search")
                .query_param("query", "Petrov");
            then.status(200)
                .json_body(json!([fixtures::json(&fixtures::admin_client(2))]));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/admin/dashboard");
        h.sessions
            .establish_employee(fixtures::employee_profile(3), "tokE");
        h.store.admin.update(|a| {
            a.clients
                .set_all(vec![fixtures::admin_client(1), fixtures::admin_client(5)])
        });

        let found = search_clients(&h.api, h.store, " Petrov ").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(
            h.store
                .admin
                .with_untracked(|a| a.clients.items().iter().map(|c| c.id).collect::<Vec<_>>()),
            vec![2]
        );
        runtime.dispose();
    }
}
