use leptos::*;

use crate::{
    api::{
        ApiClient, ApiError, ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest,
        CustomerProfile, MessageResponse, PersonalInfo, PersonalInfoFill, ProfileUpdate,
    },
    messages,
    state::{session::CustomerPatch, store::AppStore},
};

fn require(values: &[&str]) -> Result<(), ApiError> {
    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(ApiError::validation(messages::FILL_ALL_FIELDS));
    }
    Ok(())
}

/// Applies a fresh profile from the server over the logged-in customer. The
/// token is never part of this write.
fn apply_profile(store: AppStore, mut profile: CustomerProfile) {
    if let Some(info) = profile.personal_info.take() {
        store.personal_info.set(info);
    }
    let patch = CustomerPatch::from_profile(&profile);
    let applied = store
        .customer
        .try_update(|session| session.patch_profile(patch))
        .unwrap_or(false);
    if !applied {
        log::debug!("profile response arrived after logout, ignored");
    }
}

pub async fn refresh_profile(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    let profile = api.my_profile().await?;
    apply_profile(store, profile);
    Ok(())
}

pub async fn update_profile(
    api: &ApiClient,
    store: AppStore,
    update: &ProfileUpdate,
) -> Result<(), ApiError> {
    let profile = api.update_profile(update).await?;
    apply_profile(store, profile);
    Ok(())
}

pub async fn change_email(
    api: &ApiClient,
    store: AppStore,
    new_email: &str,
    password: &str,
) -> Result<(), ApiError> {
    require(&[new_email, password])?;
    let request = ChangeEmailRequest {
        new_email: new_email.trim().to_string(),
        password: password.to_string(),
    };
    let profile = api.change_email(&request).await?;
    apply_profile(store, profile);
    Ok(())
}

pub async fn change_phone(
    api: &ApiClient,
    store: AppStore,
    new_phone: &str,
    password: &str,
) -> Result<(), ApiError> {
    require(&[new_phone, password])?;
    let request = ChangePhoneRequest {
        new_phone: new_phone.trim().to_string(),
        password: password.to_string(),
    };
    let profile = api.change_phone(&request).await?;
    apply_profile(store, profile);
    Ok(())
}

/// Changes the password. The session keeps its token.
pub async fn change_password(
    api: &ApiClient,
    current_password: &str,
    new_password: &str,
) -> Result<MessageResponse, ApiError> {
    require(&[current_password, new_password])?;
    let request = ChangePasswordRequest {
        current_password: current_password.to_string(),
        new_password: new_password.to_string(),
    };
    api.change_password(&request).await
}

pub async fn fill_personal_info(
    api: &ApiClient,
    store: AppStore,
    info: &PersonalInfoFill,
) -> Result<PersonalInfo, ApiError> {
    if info.passport_number.trim().is_empty() {
        return Err(ApiError::validation(messages::PASSPORT_REQUIRED));
    }
    let saved = api.fill_personal_info(info).await?;
    store.personal_info.set(saved.personal_info.clone());
    Ok(saved.personal_info)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::identity::IdentityKind;
    use crate::test_support::{fixtures, harness::*};
    use crate::utils::storage::TokenStorage;
    use httpmock::prelude::*;
    use leptos::*;
    use serde_json::json;

    #[tokio::test]
    async fn email_change_keeps_the_token() {
        let server = MockServer::start_async().await;
        let mut changed = fixtures::customer_profile(1);
        changed.email = Some("new@example.com".into());
        server.mock(|when, then| {
            when.method(POST)
                .path("/profile/change-email")
                .json_body(json!({"new_email": "new@example.com", "password": "secret"}));
            then.status(200).json_body(fixtures::json(&changed));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/profile");
        h.sessions
            .establish_customer(fixtures::customer_profile(1), "tokC");

        change_email(&h.api, h.store, " new@example.com ", "secret")
            .await
            .unwrap();

        h.store.customer.with_untracked(|s| {
            assert_eq!(s.token(), Some("tokC"));
            assert_eq!(
                s.profile().and_then(|p| p.email.as_deref()),
                Some("new@example.com")
            );
        });
        assert!(h.store.is_logged_in(IdentityKind::Customer));
        assert_eq!(h.storage.get("access_token").as_deref(), Some("tokC"));
        runtime.dispose();
    }

    #[tokio::test]
    async fn password_change_leaves_state_alone() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/profile/change-password");
            then.status(200)
                .json_body(json!({"message": "Password changed"}));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/profile");
        h.sessions
            .establish_customer(fixtures::customer_profile(1), "tokC");
        let before = h.store.customer.get_untracked();

        let reply = change_password(&h.api, "old", "new").await.unwrap();

        assert_eq!(reply.message.as_deref(), Some("Password changed"));
        assert_eq!(h.store.customer.get_untracked(), before);
        runtime.dispose();
    }

    #[tokio::test]
    async fn personal_info_fill_updates_the_slice() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/personal_info/fill");
            then.status(200).json_body(json!({
                "message": "saved",
                "personal_info": fixtures::json(&fixtures::personal_info())
            }));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/profile");
        h.sessions
            .establish_customer(fixtures::customer_profile(1), "tokC");

        let fill = PersonalInfoFill {
            passport_number: "4510 123456".into(),
            address: Some("Lenina 1".into()),
            birth_date: Some("1990-05-17".into()),
            employment_status: Some("employed".into()),
        };
        fill_personal_info(&h.api, h.store, &fill).await.unwrap();

        assert_eq!(
            h.store.personal_info.get_untracked(),
            fixtures::personal_info()
        );
        runtime.dispose();
    }

    #[tokio::test]
    async fn profile_reply_after_logout_is_ignored() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/profile/me");
            then.status(200)
                .json_body(fixtures::json(&fixtures::customer_profile(1)));
        });

        let runtime = create_runtime();
        let h = harness(&server, "/profile");
        h.sessions.mark_logged_out(IdentityKind::Customer);

        refresh_profile(&h.api, h.store).await.unwrap();

        assert!(!h.store.is_logged_in(IdentityKind::Customer));
        assert!(h.store.customer.with_untracked(|s| s.profile().is_none()));
        runtime.dispose();
    }

    #[tokio::test]
    async fn blank_phone_change_is_rejected_locally() {
        let server = MockServer::start_async().await;
        let runtime = create_runtime();
        let h = harness(&server, "/profile");
        let err = change_phone(&h.api, h.store, "", "secret")
            .await
            .unwrap_err();
        assert_eq!(err.error, messages::FILL_ALL_FIELDS);
        runtime.dispose();
    }
}
