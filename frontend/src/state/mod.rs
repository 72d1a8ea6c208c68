pub mod admin;
pub mod auth;
pub mod back_office;
pub mod banking;
pub mod cache;
pub mod employee_auth;
pub mod profile;
pub mod session;
pub mod store;
