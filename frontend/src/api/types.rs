use std::collections::HashMap;

use chrono::NaiveDateTime;
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::cache::CacheItem;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Rejected locally before any request was made.
    Validation,
    /// The server answered with a non-2xx status other than 401.
    Server,
    /// The server answered 401; the owning session has already been torn down.
    Unauthorized,
    /// No response was received.
    Connection,
    /// A response arrived but its body did not have the expected shape.
    Decode,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Server => "SERVER_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Connection => "REQUEST_FAILED",
            ErrorCode::Decode => "DECODE_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: ErrorCode,
    pub status: Option<u16>,
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::Validation,
            status: None,
            details: None,
        }
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::Connection,
            status: None,
            details: None,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: ErrorCode::Decode,
            status: None,
            details: None,
        }
    }

    /// Builds the error for a non-2xx response from its status and JSON body.
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let detail = body.as_ref().map(extract_detail).unwrap_or_default();
        Self {
            error: detail,
            code: if status == 401 {
                ErrorCode::Unauthorized
            } else {
                ErrorCode::Server
            },
            status: Some(status),
            details: body,
        }
    }

    /// Replaces an empty server detail with the call site's own message.
    /// Connection and validation messages are kept as they are.
    pub fn with_fallback(mut self, fallback: &str) -> Self {
        if self.error.trim().is_empty() {
            self.error = fallback.to_string();
        }
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == ErrorCode::Unauthorized
    }
}

/// Pulls a human readable message out of an error body: `detail` as a string,
/// `detail` as a list of validation entries, or an `errors` list.
pub fn extract_detail(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(detail)) => return detail.clone(),
        Some(Value::Array(entries)) => {
            let joined = entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect::<Vec<_>>()
                .join(", ");
            if !joined.is_empty() {
                return joined;
            }
        }
        _ => {}
    }
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub passport_number: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<String>,
    pub employment_status: Option<String>,
}

/// Customer profile as returned by `/auth/me` and embedded in login and
/// registration responses (where the id is called `client_id`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default, alias = "client_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAuthResponse {
    pub access_token: String,
    #[serde(flatten)]
    pub profile: CustomerProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    #[serde(default, alias = "employee_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub role: Option<RoleInfo>,
    #[serde(default)]
    pub branch: Option<BranchInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAuthResponse {
    pub access_token: String,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
}

// ---------------------------------------------------------------------------
// Customer resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub account_number: String,
    pub balance: f64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub card_number: String,
    pub card_type: String,
    #[serde(default)]
    pub expiration_date: Option<NaiveDateTime>,
    pub is_active: bool,
    pub account_id: i64,
    #[serde(default)]
    pub account: Option<Account>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCreate {
    pub card_type: String,
    pub account_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDeleted {
    pub success: bool,
    pub deleted_card_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceChange {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub new_balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: i32,
    #[serde(default)]
    pub issued_at: Option<NaiveDateTime>,
    pub is_paid: bool,
    #[serde(default)]
    pub paid_amount: f64,
    pub client_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPayment {
    pub payment_amount: f64,
    pub card_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPaymentResult {
    #[serde(default)]
    pub message: Option<String>,
    pub paid_amount: f64,
    pub total_paid: f64,
    pub remaining_amount: f64,
    pub card_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScheduleItem {
    pub month: i32,
    pub payment_date: NaiveDateTime,
    pub monthly_payment: f64,
    pub principal_payment: f64,
    pub interest_payment: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub loan_id: i64,
    pub total_amount: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<LoanScheduleItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub transaction_type: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    pub status: String,
    #[serde(default)]
    pub from_card_id: Option<i64>,
    #[serde(default)]
    pub to_card_id: Option<i64>,
    #[serde(default)]
    pub loan_id: Option<i64>,
    pub client_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_transactions: i64,
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    pub total_transfers: f64,
    pub total_loan_payments: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: i64,
    pub process_type: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    pub client_id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub branch_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCreate {
    pub process_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStatusUpdate {
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub total_processes: i64,
    #[serde(default)]
    pub pending_processes: Option<i64>,
    #[serde(default)]
    pub by_status: HashMap<String, i64>,
    #[serde(default)]
    pub by_type: HashMap<String, i64>,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChangeEmailRequest {
    pub new_email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChangePhoneRequest {
    pub new_phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfoFill {
    pub passport_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfoSaved {
    #[serde(default)]
    pub message: Option<String>,
    pub personal_info: PersonalInfo,
}

// ---------------------------------------------------------------------------
// Back office
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub patronymic: Option<String>,
    pub email: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub role: Option<RoleInfo>,
    #[serde(default)]
    pub branch: Option<BranchInfo>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    pub email: String,
    pub password: String,
    pub role_id: i64,
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeActiveToggled {
    #[serde(default)]
    pub message: Option<String>,
    pub employee_id: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminClient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub patronymic: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

macro_rules! cache_item_by_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CacheItem for $ty {
                fn id(&self) -> i64 {
                    self.id
                }
            }
        )*
    };
}

cache_item_by_id!(Account, Card, Loan, Transaction, Process, Employee, Role, Branch, AdminClient);
