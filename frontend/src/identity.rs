//! The two authorization domains of the client and the rules that map a
//! request path onto one of them.

use serde::{Deserialize, Serialize};

/// Path prefixes served by the back office. Anything else belongs to the
/// customer side of the API.
pub const ADMIN_PATH_PREFIXES: &[&str] = &["/admin", "/employees", "/roles", "/branches"];

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const EMPLOYEE_TOKEN_KEY: &str = "employee_token";

pub const CUSTOMER_LOGIN_PATH: &str = "/login";
pub const CUSTOMER_LANDING_PATH: &str = "/dashboard";
pub const EMPLOYEE_LOGIN_PATH: &str = "/admin/login";
pub const EMPLOYEE_LANDING_PATH: &str = "/admin/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKind {
    Customer,
    Employee,
}

impl IdentityKind {
    pub const ALL: [IdentityKind; 2] = [IdentityKind::Customer, IdentityKind::Employee];

    /// Durable storage key holding this identity's bearer token.
    pub fn storage_key(self) -> &'static str {
        match self {
            IdentityKind::Customer => ACCESS_TOKEN_KEY,
            IdentityKind::Employee => EMPLOYEE_TOKEN_KEY,
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            IdentityKind::Customer => CUSTOMER_LOGIN_PATH,
            IdentityKind::Employee => EMPLOYEE_LOGIN_PATH,
        }
    }

    pub fn landing_path(self) -> &'static str {
        match self {
            IdentityKind::Customer => CUSTOMER_LANDING_PATH,
            IdentityKind::Employee => EMPLOYEE_LANDING_PATH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IdentityKind::Customer => "customer",
            IdentityKind::Employee => "employee",
        }
    }
}

/// Classifies an API path (relative to the base URL) by the identity whose
/// token authorizes it.
pub fn classify_path(path: &str) -> IdentityKind {
    if ADMIN_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        IdentityKind::Employee
    } else {
        IdentityKind::Customer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_prefixes_classify_as_employee() {
        for path in [
            "/admin/auth/login",
            "/admin/clients/",
            "/admin/processes/pending",
            "/employees/",
            "/employees/7/toggle-active",
            "/roles/",
            "/branches/3",
        ] {
            assert_eq!(classify_path(path), IdentityKind::Employee, "{path}");
        }
    }

    #[test]
    fn everything_else_classifies_as_customer() {
        for path in [
            "/auth/login",
            "/auth/me",
            "/accounts/",
            "/cards/5/deposit",
            "/loans/me",
            "/processes/me",
            "/transactions/me/stats",
            "/profile/update",
            "/personal_info/fill",
            "",
        ] {
            assert_eq!(classify_path(path), IdentityKind::Customer, "{path}");
        }
    }

    #[test]
    fn classification_is_prefix_based_not_substring_based() {
        assert_eq!(classify_path("/cards/admin"), IdentityKind::Customer);
        assert_eq!(classify_path("/profile/roles"), IdentityKind::Customer);
    }

    #[test]
    fn identities_have_distinct_storage_keys_and_pages() {
        assert_eq!(IdentityKind::Customer.storage_key(), "access_token");
        assert_eq!(IdentityKind::Employee.storage_key(), "employee_token");
        assert_ne!(
            IdentityKind::Customer.login_path(),
            IdentityKind::Employee.login_path()
        );
        assert_eq!(IdentityKind::Employee.landing_path(), "/admin/dashboard");
    }
}
