use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    components::guard::{RequireAuth, RequireNoAuth},
    identity::IdentityKind,
    pages::{
        AccountsPage, AdminDashboardPage, AdminLoginPage, CardsPage, DashboardPage, LoansPage,
        LoginPage, ProfilePage, RegisterPage, TransfersPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/dashboard",
    "/accounts",
    "/cards",
    "/loans",
    "/transfers",
    "/profile",
    "/admin/login",
    "/admin/dashboard",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/dashboard",
    "/accounts",
    "/cards",
    "/loans",
    "/transfers",
    "/profile",
    "/admin/dashboard",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login", "/register", "/admin/login"];

/// Where unknown paths and the site root end up.
pub const FALLBACK_PATH: &str = "/login";

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    view! {
        <Title text="Bankline"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=ToLogin/>
                    <Route path="/login" view=PublicLogin/>
                    <Route path="/register" view=PublicRegister/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/accounts" view=ProtectedAccounts/>
                    <Route path="/cards" view=ProtectedCards/>
                    <Route path="/loans" view=ProtectedLoans/>
                    <Route path="/transfers" view=ProtectedTransfers/>
                    <Route path="/profile" view=ProtectedProfile/>
                    <Route path="/admin/login" view=PublicAdminLogin/>
                    <Route path="/admin/dashboard" view=ProtectedAdminDashboard/>
                    <Route path="/*any" view=ToLogin/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ToLogin() -> impl IntoView {
    view! { <Redirect path=FALLBACK_PATH/> }
}

#[component]
fn PublicLogin() -> impl IntoView {
    view! { <RequireNoAuth><LoginPage/></RequireNoAuth> }
}

#[component]
fn PublicRegister() -> impl IntoView {
    view! { <RequireNoAuth><RegisterPage/></RequireNoAuth> }
}

#[component]
fn PublicAdminLogin() -> impl IntoView {
    view! { <RequireNoAuth identity=IdentityKind::Employee><AdminLoginPage/></RequireNoAuth> }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedAccounts() -> impl IntoView {
    view! { <RequireAuth><AccountsPage/></RequireAuth> }
}

#[component]
fn ProtectedCards() -> impl IntoView {
    view! { <RequireAuth><CardsPage/></RequireAuth> }
}

#[component]
fn ProtectedLoans() -> impl IntoView {
    view! { <RequireAuth><LoansPage/></RequireAuth> }
}

#[component]
fn ProtectedTransfers() -> impl IntoView {
    view! { <RequireAuth><TransfersPage/></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}

#[component]
fn ProtectedAdminDashboard() -> impl IntoView {
    view! { <RequireAuth identity=IdentityKind::Employee><AdminDashboardPage/></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn protected_and_public_routes_are_disjoint_subsets() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS.iter().chain(PUBLIC_ROUTE_PATHS) {
            assert!(all.contains(path), "path missing from ROUTE_PATHS: {}", path);
        }
        let public: HashSet<&str> = PUBLIC_ROUTE_PATHS.iter().copied().collect();
        assert!(PROTECTED_ROUTE_PATHS.iter().all(|p| !public.contains(p)));
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn login_paths_are_public_routes() {
        for identity in [IdentityKind::Customer, IdentityKind::Employee] {
            assert!(PUBLIC_ROUTE_PATHS.contains(&identity.login_path()));
            assert!(PROTECTED_ROUTE_PATHS.contains(&identity.landing_path()));
        }
    }
}
