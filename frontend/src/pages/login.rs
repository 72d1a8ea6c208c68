use leptos::{ev::SubmitEvent, *};

use crate::{
    api::ApiError,
    components::forms::CredentialsForm,
    state::auth::{self, Credentials},
};

/// Customer sign-in. Once the session is established the public-only guard
/// moves the user on to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            error.set(result.err());
        }
    });

    let on_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        login_action.dispatch(Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        });
    });

    let footer = view! {
        <p class="text-sm text-fg-muted text-center">
            "No account yet? " <a href="/register" class="text-action-primary-bg">"Register"</a>
        </p>
    }
    .into_view();

    view! {
        <CredentialsForm
            title="Sign in to Bankline"
            email=email
            password=password
            error=error
            pending=pending
            on_submit=on_submit
            footer=footer
        />
    }
}
