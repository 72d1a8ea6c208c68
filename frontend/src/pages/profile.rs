use leptos::{ev::SubmitEvent, *};

use crate::{
    api::{ApiError, PersonalInfoFill, ProfileUpdate},
    components::{
        forms::{SubmitButton, TextField},
        layout::Layout,
    },
    messages,
    pages::{log_failure, PageContext, PageFeedback},
    state::profile,
};

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = PageContext::new();
    let store = ctx.store;
    let pending = ctx.pending;

    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let patronymic = create_rw_signal(String::new());
    let new_email = create_rw_signal(String::new());
    let new_phone = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let current_password = create_rw_signal(String::new());
    let new_password = create_rw_signal(String::new());
    let passport = create_rw_signal(String::new());
    let address = create_rw_signal(String::new());
    let birth_date = create_rw_signal(String::new());
    let employment = create_rw_signal(String::new());

    ctx.load(|api, store| async move {
        log_failure("profile", profile::refresh_profile(&api, store).await);
    });

    // Seed the forms from the session once it is known.
    create_effect(move |_| {
        store.customer.with(|s| {
            if let Some(p) = s.profile() {
                first_name.set(p.first_name.clone().unwrap_or_default());
                last_name.set(p.last_name.clone().unwrap_or_default());
                patronymic.set(p.patronymic.clone().unwrap_or_default());
            }
        });
        store.personal_info.with(|info| {
            passport.set(info.passport_number.clone().unwrap_or_default());
            address.set(info.address.clone().unwrap_or_default());
            birth_date.set(info.birth_date.clone().unwrap_or_default());
            employment.set(info.employment_status.clone().unwrap_or_default());
        });
    });

    let save_names = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let update = ProfileUpdate {
                first_name: optional(first_name.get_untracked()),
                last_name: optional(last_name.get_untracked()),
                patronymic: optional(patronymic.get_untracked()),
            };
            ctx.run(Some("Profile updated"), move |api, store| async move {
                profile::update_profile(&api, store, &update).await
            });
        }
    };

    let change_contacts = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let email = new_email.get_untracked();
            let phone = new_phone.get_untracked();
            let password = confirm_password.get_untracked();
            if email.trim().is_empty() && phone.trim().is_empty() {
                ctx.error.set(Some(ApiError::validation(messages::FILL_ALL_FIELDS)));
                return;
            }
            ctx.run(Some("Contacts updated"), move |api, store| async move {
                if !email.trim().is_empty() {
                    profile::change_email(&api, store, &email, &password).await?;
                }
                if !phone.trim().is_empty() {
                    profile::change_phone(&api, store, &phone, &password).await?;
                }
                Ok::<(), ApiError>(())
            });
        }
    };

    let change_password = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let current = current_password.get_untracked();
            let next = new_password.get_untracked();
            ctx.run(Some("Password changed"), move |api, _store| async move {
                profile::change_password(&api, &current, &next).await
            });
        }
    };

    let save_personal_info = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let fill = PersonalInfoFill {
                passport_number: passport.get_untracked().trim().to_string(),
                address: optional(address.get_untracked()),
                birth_date: optional(birth_date.get_untracked()),
                employment_status: optional(employment.get_untracked()),
            };
            ctx.run(Some("Personal information saved"), move |api, store| async move {
                profile::fill_personal_info(&api, store, &fill).await
            });
        }
    };

    let contact_line = move || {
        store.customer.with(|s| {
            s.profile()
                .map(|p| {
                    format!(
                        "{} / {}",
                        p.email.clone().unwrap_or_default(),
                        p.phone.clone().unwrap_or_default()
                    )
                })
                .unwrap_or_default()
        })
    };

    view! {
        <Layout>
            <div class="max-w-2xl space-y-6">
                <h1 class="text-2xl font-bold text-fg">"Profile"</h1>
                <p class="text-sm text-fg-muted">{contact_line}</p>
                <PageFeedback ctx=ctx.clone()/>
                <form class="space-y-3" on:submit=save_names>
                    <TextField label="First name" value=first_name/>
                    <TextField label="Last name" value=last_name/>
                    <TextField label="Patronymic" value=patronymic/>
                    <SubmitButton label="Save" pending=pending/>
                </form>
                <form class="space-y-3" on:submit=change_contacts>
                    <TextField label="New email" value=new_email input_type="email"/>
                    <TextField label="New phone" value=new_phone input_type="tel"/>
                    <TextField label="Current password" value=confirm_password input_type="password"/>
                    <SubmitButton label="Update contacts" pending=pending/>
                </form>
                <form class="space-y-3" on:submit=change_password>
                    <TextField label="Current password" value=current_password input_type="password"/>
                    <TextField label="New password" value=new_password input_type="password"/>
                    <SubmitButton label="Change password" pending=pending/>
                </form>
                <form class="space-y-3" on:submit=save_personal_info>
                    <TextField label="Passport number" value=passport/>
                    <TextField label="Address" value=address/>
                    <TextField label="Birth date" value=birth_date input_type="date"/>
                    <TextField label="Employment status" value=employment/>
                    <SubmitButton label="Save personal information" pending=pending/>
                </form>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::optional;

    #[test]
    fn blank_inputs_are_left_out() {
        assert_eq!(optional("  ".into()), None);
        assert_eq!(optional(" Ivan ".into()).as_deref(), Some("Ivan"));
    }
}
