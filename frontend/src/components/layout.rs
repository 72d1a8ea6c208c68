use leptos::*;

use crate::{
    identity::IdentityKind,
    state::{
        auth, employee_auth,
        store::{use_app_store, SessionManager},
    },
    utils::navigation::default_navigator,
};

const NAV_LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

pub const CUSTOMER_NAV: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/accounts", "Accounts"),
    ("/cards", "Cards"),
    ("/loans", "Loans"),
    ("/transfers", "Transfers"),
    ("/profile", "Profile"),
];

pub const ADMIN_NAV: &[(&str, &str)] = &[("/admin/dashboard", "Dashboard")];

/// Ends the session of `identity` and sends the browser to its login page.
fn logout_and_leave(sessions: Option<&SessionManager>, identity: IdentityKind) {
    match sessions {
        Some(sessions) => match identity {
            IdentityKind::Customer => auth::logout(sessions),
            IdentityKind::Employee => employee_auth::logout(sessions),
        },
        None => log::warn!("logout requested without a session manager"),
    }
    default_navigator().navigate(identity.login_path());
}

#[component]
pub fn Header(identity: IdentityKind) -> impl IntoView {
    let store = use_app_store();
    let display_name = move || match identity {
        IdentityKind::Customer => store.customer.with(|s| {
            s.profile()
                .and_then(|p| p.first_name.clone())
                .unwrap_or_default()
        }),
        IdentityKind::Employee => store.employee.with(|s| {
            s.profile()
                .map(|p| {
                    let name = p.first_name.clone().unwrap_or_default();
                    match &p.role {
                        Some(role) => format!("{} ({})", name, role.name),
                        None => name,
                    }
                })
                .unwrap_or_default()
        }),
    };
    let title = match identity {
        IdentityKind::Customer => "Bankline",
        IdentityKind::Employee => "Bankline Back Office",
    };
    let links = match identity {
        IdentityKind::Customer => CUSTOMER_NAV,
        IdentityKind::Employee => ADMIN_NAV,
    };
    let sessions = auth::use_sessions();
    let on_logout = move |_| logout_and_leave(sessions.as_ref(), identity);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">{title}</h1>
                    <nav class="flex items-center space-x-4">
                        {links
                            .iter()
                            .map(|(href, label)| {
                                view! { <a href=*href class=NAV_LINK_CLASS>{*label}</a> }
                            })
                            .collect_view()}
                        <span class="text-sm text-fg-muted">{display_name}</span>
                        <button on:click=on_logout class=NAV_LINK_CLASS>
                            "Log out"
                        </button>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(
    #[prop(default = IdentityKind::Customer)] identity: IdentityKind,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header identity=identity/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">{children()}</main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures, ssr::render_with_store};

    #[test]
    fn customer_header_lists_banking_pages() {
        let html = render_with_store(
            |store| {
                store
                    .customer
                    .update(|s| s.establish(fixtures::customer_profile(1), "tokC"))
            },
            || view! { <Header identity=IdentityKind::Customer/> },
        );
        for (href, _) in CUSTOMER_NAV {
            assert!(html.contains(href), "missing link {}", href);
        }
        assert!(html.contains("Ivan"));
        assert!(html.contains("Log out"));
    }

    #[test]
    fn admin_header_shows_role() {
        let html = render_with_store(
            |store| {
                store
                    .employee
                    .update(|s| s.establish(fixtures::employee_profile(3), "tokE"))
            },
            || view! { <Header identity=IdentityKind::Employee/> },
        );
        assert!(html.contains("Back Office"));
        assert!(html.contains("Olga (SuperAdmin)"));
        assert!(!html.contains("/transfers"));
    }

    #[test]
    fn layout_renders_children_and_feedback() {
        let html = render_with_store(
            |_| {},
            || {
                view! {
                    <Layout>
                        <LoadingSpinner/>
                        <SuccessMessage message="saved"/>
                        <div>"child"</div>
                    </Layout>
                }
            },
        );
        assert!(html.contains("child"));
        assert!(html.contains("saved"));
        assert!(html.contains("animate-spin"));
    }
}
