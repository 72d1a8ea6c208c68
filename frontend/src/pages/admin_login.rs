use leptos::{ev::SubmitEvent, *};

use crate::{
    api::ApiError,
    components::forms::CredentialsForm,
    state::{auth::Credentials, employee_auth},
};

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);

    let login_action = employee_auth::use_employee_login_action();
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

    view! {
        <CredentialsForm
            title="Back office sign in"
            email=email
            password=password
            error=error
            pending=pending
            on_submit=on_submit
        />
    }
}
