//! User-facing fallback messages, used when the server gives no detail.

pub const CONNECTION_FAILED: &str = "Could not reach the server. Check your connection.";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the server";

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const AMOUNT_MUST_BE_POSITIVE: &str = "Amount must be greater than zero";

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const SESSION_CHECK_FAILED: &str = "Could not verify the session";
pub const EMPLOYEE_LOGIN_FAILED: &str = "Employee login failed";

pub const ACCOUNTS_LOAD_FAILED: &str = "Could not load accounts";
pub const ACCOUNT_CREATE_FAILED: &str = "Could not open an account";
pub const ACCOUNT_DELETE_FAILED: &str = "Could not close the account";

pub const CARDS_LOAD_FAILED: &str = "Could not load cards";
pub const CARD_CREATE_FAILED: &str = "Could not issue the card";
pub const CARD_DEACTIVATE_FAILED: &str = "Could not deactivate the card";
pub const CARD_DELETE_FAILED: &str = "Could not delete the card";
pub const DEPOSIT_FAILED: &str = "Could not top up the card";
pub const WITHDRAW_FAILED: &str = "Could not withdraw from the card";
pub const TRANSFER_FAILED: &str = "Could not transfer funds";

pub const LOANS_LOAD_FAILED: &str = "Could not load loans";
pub const LOAN_APPLY_FAILED: &str = "Could not submit the loan application";
pub const LOAN_DETAILS_FAILED: &str = "Could not load the loan";
pub const LOAN_PAY_FAILED: &str = "Could not make the loan payment";
pub const LOAN_SCHEDULE_FAILED: &str = "Could not load the payment schedule";

pub const TRANSACTIONS_LOAD_FAILED: &str = "Could not load transactions";
pub const TRANSACTION_DETAILS_FAILED: &str = "Could not load the transaction";
pub const TRANSACTION_STATS_FAILED: &str = "Could not load transaction statistics";
pub const TRANSACTION_SEARCH_FAILED: &str = "Could not search transactions";

pub const PROCESSES_LOAD_FAILED: &str = "Could not load requests";
pub const PROCESS_CREATE_FAILED: &str = "Could not create the request";
pub const PROCESS_UPDATE_FAILED: &str = "Could not update the request";
pub const PROCESS_DELETE_FAILED: &str = "Could not delete the request";
pub const PROCESS_STATS_FAILED: &str = "Could not load request statistics";

pub const PROFILE_LOAD_FAILED: &str = "Could not load the profile";
pub const PROFILE_UPDATE_FAILED: &str = "Could not update the profile";
pub const PASSWORD_CHANGE_FAILED: &str = "Could not change the password";
pub const EMAIL_CHANGE_FAILED: &str = "Could not change the email";
pub const PHONE_CHANGE_FAILED: &str = "Could not change the phone number";
pub const PERSONAL_INFO_FAILED: &str = "Could not save personal information";

pub const EMPLOYEES_LOAD_FAILED: &str = "Could not load employees";
pub const EMPLOYEE_UPDATE_FAILED: &str = "Could not update the employee";
pub const EMPLOYEE_DELETE_FAILED: &str = "Could not delete the employee";
pub const ROLES_LOAD_FAILED: &str = "Could not load roles";
pub const ROLE_SAVE_FAILED: &str = "Could not save the role";
pub const ROLE_DELETE_FAILED: &str = "Could not delete the role";
pub const BRANCHES_LOAD_FAILED: &str = "Could not load branches";
pub const BRANCH_SAVE_FAILED: &str = "Could not save the branch";
pub const BRANCH_DELETE_FAILED: &str = "Could not delete the branch";
pub const CLIENTS_LOAD_FAILED: &str = "Could not load clients";
pub const CLIENT_SEARCH_FAILED: &str = "Could not search clients";
pub const PENDING_PROCESSES_FAILED: &str = "Could not load pending requests";
pub const PROCESS_DECISION_FAILED: &str = "Could not update the request status";
pub const OVERVIEW_STATS_FAILED: &str = "Could not load statistics";
pub const CARD_NUMBER_REQUIRED: &str = "Enter the recipient card number";
pub const PASSPORT_REQUIRED: &str = "Passport number is required";
