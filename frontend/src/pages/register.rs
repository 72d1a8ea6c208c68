use leptos::{ev::SubmitEvent, *};

use crate::{
    api::{ApiError, RegisterRequest},
    components::{
        error::InlineErrorMessage,
        forms::{SubmitButton, TextField},
    },
    state::auth,
};

#[derive(Clone, Copy)]
struct RegisterForm {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    patronymic: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    password: RwSignal<String>,
}

impl RegisterForm {
    fn new() -> Self {
        Self {
            first_name: create_rw_signal(String::new()),
            last_name: create_rw_signal(String::new()),
            patronymic: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }

    fn to_request(self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.get_untracked().trim().to_string(),
            last_name: self.last_name.get_untracked().trim().to_string(),
            patronymic: self.patronymic.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            phone: self.phone.get_untracked().trim().to_string(),
            password: self.password.get_untracked(),
        }
    }
}

/// Registration signs the new customer in straight away.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let form = RegisterForm::new();
    let error = create_rw_signal(None::<ApiError>);
    let register_action = auth::use_register_action();
    let pending = register_action.pending();

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            error.set(result.err());
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let request = form.to_request();
        if let Err(err) = auth::validate_registration(&request) {
            error.set(Some(err));
            return;
        }
        register_action.dispatch(request);
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface">
            <form
                class="w-full max-w-md space-y-4 bg-surface-elevated p-8 rounded-lg shadow"
                on:submit=on_submit
            >
                <h2 class="text-2xl font-bold text-fg">"Open a Bankline account"</h2>
                <TextField label="First name" value=form.first_name/>
                <TextField label="Last name" value=form.last_name/>
                <TextField label="Patronymic" value=form.patronymic/>
                <TextField label="Email" value=form.email input_type="email"/>
                <TextField label="Phone" value=form.phone input_type="tel"/>
                <TextField label="Password" value=form.password input_type="password"/>
                <InlineErrorMessage error=error/>
                <SubmitButton label="Register" pending=pending/>
                <p class="text-sm text-fg-muted text-center">
                    "Already a customer? " <a href="/login" class="text-action-primary-bg">"Sign in"</a>
                </p>
            </form>
        </div>
    }
}
