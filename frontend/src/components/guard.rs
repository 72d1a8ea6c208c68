use leptos::*;

use crate::{
    components::layout::LoadingSpinner,
    identity::IdentityKind,
    state::{session::SessionStatus, store::use_app_store},
    utils::navigation::default_navigator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Children need a logged-in session.
    Auth,
    /// Children are public-only pages (login, register).
    NoAuth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
    /// Auto-login has not resolved yet.
    Pending,
}

pub fn guard_decision(
    kind: GuardKind,
    status: SessionStatus,
    identity: IdentityKind,
) -> GuardDecision {
    match (kind, status) {
        (_, SessionStatus::Unknown) => GuardDecision::Pending,
        (GuardKind::Auth, SessionStatus::LoggedIn) => GuardDecision::Render,
        (GuardKind::Auth, SessionStatus::LoggedOut) => {
            GuardDecision::Redirect(identity.login_path())
        }
        (GuardKind::NoAuth, SessionStatus::LoggedIn) => {
            GuardDecision::Redirect(identity.landing_path())
        }
        (GuardKind::NoAuth, SessionStatus::LoggedOut) => GuardDecision::Render,
    }
}

fn guarded_view(kind: GuardKind, identity: IdentityKind, children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();
    let decision = create_memo(move |_| {
        let status = match identity {
            IdentityKind::Customer => store.customer.with(|s| s.status()),
            IdentityKind::Employee => store.employee.with(|s| s.status()),
        };
        guard_decision(kind, status, identity)
    });

    create_effect(move |_| {
        if let GuardDecision::Redirect(target) = decision.get() {
            log::debug!("{} guard redirecting to {}", identity.label(), target);
            default_navigator().navigate(target);
        }
    });

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || {
                if decision.get() == GuardDecision::Pending {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAuth(
    #[prop(default = IdentityKind::Customer)] identity: IdentityKind,
    children: ChildrenFn,
) -> impl IntoView {
    guarded_view(GuardKind::Auth, identity, children)
}

#[component]
pub fn RequireNoAuth(
    #[prop(default = IdentityKind::Customer)] identity: IdentityKind,
    children: ChildrenFn,
) -> impl IntoView {
    guarded_view(GuardKind::NoAuth, identity, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_auth_redirects_logged_out_to_login() {
        assert_eq!(
            guard_decision(GuardKind::Auth, SessionStatus::LoggedOut, IdentityKind::Customer),
            GuardDecision::Redirect("/login")
        );
        assert_eq!(
            guard_decision(GuardKind::Auth, SessionStatus::LoggedOut, IdentityKind::Employee),
            GuardDecision::Redirect("/admin/login")
        );
    }

    #[test]
    fn require_no_auth_redirects_logged_in_to_landing() {
        assert_eq!(
            guard_decision(GuardKind::NoAuth, SessionStatus::LoggedIn, IdentityKind::Customer),
            GuardDecision::Redirect("/dashboard")
        );
        assert_eq!(
            guard_decision(GuardKind::NoAuth, SessionStatus::LoggedIn, IdentityKind::Employee),
            GuardDecision::Redirect("/admin/dashboard")
        );
    }

    #[test]
    fn unresolved_session_is_pending_for_both_guards() {
        for kind in [GuardKind::Auth, GuardKind::NoAuth] {
            for identity in [IdentityKind::Customer, IdentityKind::Employee] {
                assert_eq!(
                    guard_decision(kind, SessionStatus::Unknown, identity),
                    GuardDecision::Pending
                );
            }
        }
    }

    #[test]
    fn matching_state_renders() {
        assert_eq!(
            guard_decision(GuardKind::Auth, SessionStatus::LoggedIn, IdentityKind::Customer),
            GuardDecision::Render
        );
        assert_eq!(
            guard_decision(GuardKind::NoAuth, SessionStatus::LoggedOut, IdentityKind::Employee),
            GuardDecision::Render
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures, ssr::render_with_store};

    fn protected(identity: IdentityKind) -> impl IntoView {
        view! {
            <RequireAuth identity=identity>
                {|| view! { <div>"protected-content"</div> }}
            </RequireAuth>
        }
    }

    #[test]
    fn require_auth_renders_children_when_logged_in() {
        let html = render_with_store(
            |store| {
                store
                    .customer
                    .update(|s| s.establish(fixtures::customer_profile(1), "tokC"))
            },
            || protected(IdentityKind::Customer),
        );
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_logged_out() {
        let html = render_with_store(
            |store| store.customer.update(|s| s.clear()),
            || protected(IdentityKind::Customer),
        );
        assert!(!html.contains("protected-content"));
        assert!(!html.contains("animate-spin"));
    }

    #[test]
    fn require_auth_shows_spinner_before_auto_login_resolves() {
        let html = render_with_store(|_| {}, || protected(IdentityKind::Customer));
        assert!(!html.contains("protected-content"));
        assert!(html.contains("animate-spin"));
    }

    #[test]
    fn customer_session_does_not_open_admin_pages() {
        let html = render_with_store(
            |store| {
                store
                    .customer
                    .update(|s| s.establish(fixtures::customer_profile(1), "tokC"));
                store.employee.update(|s| s.clear());
            },
            || protected(IdentityKind::Employee),
        );
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_no_auth_hides_login_form_when_logged_in() {
        let html = render_with_store(
            |store| {
                store
                    .employee
                    .update(|s| s.establish(fixtures::employee_profile(3), "tokE"))
            },
            || {
                view! {
                    <RequireNoAuth identity=IdentityKind::Employee>
                        {|| view! { <form>"login-form"</form> }}
                    </RequireNoAuth>
                }
            },
        );
        assert!(!html.contains("login-form"));
    }
}
