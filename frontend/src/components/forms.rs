use leptos::{ev::SubmitEvent, *};

use crate::{
    api::ApiError,
    components::{common::ButtonVariant, error::InlineErrorMessage},
};

const INPUT_CLASS: &str = "mt-1 block w-full rounded-md border border-form-control-border bg-form-control-bg text-fg px-3 py-2 focus:outline-none focus:ring-2 focus:ring-action-primary-focus";

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional, into)] name: String,
) -> impl IntoView {
    view! {
        <label class="block text-sm font-medium text-fg-muted">
            {label}
            <input
                type=input_type
                name=name
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn SubmitButton(
    #[prop(into)] label: String,
    #[prop(into)] pending: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            type="submit"
            class=format!(
                "w-full inline-flex justify-center rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}",
                ButtonVariant::Primary.classes()
            )
            disabled=move || pending.get()
        >
            {label}
        </button>
    }
}

/// Email and password form shared by the customer and employee login pages.
#[component]
pub fn CredentialsForm(
    #[prop(into)] title: String,
    email: RwSignal<String>,
    password: RwSignal<String>,
    #[prop(into)] error: Signal<Option<ApiError>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
    #[prop(optional)] footer: Option<View>,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface">
            <form
                class="w-full max-w-md space-y-4 bg-surface-elevated p-8 rounded-lg shadow"
                on:submit=move |ev| on_submit.call(ev)
            >
                <h2 class="text-2xl font-bold text-fg">{title}</h2>
                <TextField label="Email" value=email input_type="email" name="email"/>
                <TextField label="Password" value=password input_type="password" name="password"/>
                <InlineErrorMessage error=error/>
                <SubmitButton label="Sign in" pending=pending/>
                {footer}
            </form>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_with_store;

    #[test]
    fn credentials_form_renders_fields_and_error() {
        let html = render_with_store(
            |_| {},
            || {
                let email = create_rw_signal("ivan@example.com".to_string());
                let password = create_rw_signal(String::new());
                let error = create_rw_signal(Some(ApiError::validation("Please fill in all fields")));
                let pending = create_rw_signal(false);
                view! {
                    <CredentialsForm
                        title="Sign in to Bankline"
                        email=email
                        password=password
                        error=error
                        pending=pending
                        on_submit=Callback::new(|_| {})
                    />
                }
            },
        );
        assert!(html.contains("Sign in to Bankline"));
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("Please fill in all fields"));
    }
}
