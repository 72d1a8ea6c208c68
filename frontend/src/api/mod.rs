pub mod admin;
mod auth;
mod banking;
pub mod client;
mod profile;
pub mod types;

pub use admin::{ProcessDecision, CLIENT_PAGE_LIMIT};
pub use client::*;
pub use types::*;
