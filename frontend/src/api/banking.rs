use serde_json::Value;

use super::{
    client::ApiClient,
    types::{
        Account, ApiError, BalanceChange, Card, CardCreate, CardDeleted, Loan, LoanApplication, LoanPayment,
        LoanPaymentResult, LoanSchedule, Process, ProcessCreate, ProcessStats,
        ProcessStatusUpdate, Transaction, TransactionQuery, TransactionStats,
    },
};
use crate::messages;

fn amount_param(amount: f64) -> (&'static str, String) {
    ("amount", amount.to_string())
}

impl ApiClient {
    // --- accounts ---------------------------------------------------------

    pub async fn my_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.get("/accounts/me")
            .await
            .map_err(|e| e.with_fallback(messages::ACCOUNTS_LOAD_FAILED))
    }

    pub async fn open_account(&self) -> Result<Account, ApiError> {
        self.post_empty("/accounts/")
            .await
            .map_err(|e| e.with_fallback(messages::ACCOUNT_CREATE_FAILED))
    }

    pub async fn close_account(&self, account_id: i64) -> Result<Value, ApiError> {
        self.delete(&format!("/accounts/{}", account_id))
            .await
            .map_err(|e| e.with_fallback(messages::ACCOUNT_DELETE_FAILED))
    }

    // --- cards ------------------------------------------------------------

    pub async fn my_cards(&self) -> Result<Vec<Card>, ApiError> {
        self.get("/cards/me")
            .await
            .map_err(|e| e.with_fallback(messages::CARDS_LOAD_FAILED))
    }

    pub async fn issue_card(&self, payload: &CardCreate) -> Result<Card, ApiError> {
        self.post("/cards/", payload)
            .await
            .map_err(|e| e.with_fallback(messages::CARD_CREATE_FAILED))
    }

    pub async fn deactivate_card(&self, card_id: i64) -> Result<Card, ApiError> {
        self.patch_empty(&format!("/cards/{}/deactivate", card_id))
            .await
            .map_err(|e| e.with_fallback(messages::CARD_DEACTIVATE_FAILED))
    }

    pub async fn delete_card(&self, card_id: i64) -> Result<CardDeleted, ApiError> {
        self.delete(&format!("/cards/{}", card_id))
            .await
            .map_err(|e| e.with_fallback(messages::CARD_DELETE_FAILED))
    }

    pub async fn deposit(&self, card_id: i64, amount: f64) -> Result<BalanceChange, ApiError> {
        self.post_query(
            &format!("/cards/{}/deposit", card_id),
            &[amount_param(amount)],
        )
        .await
        .map_err(|e| e.with_fallback(messages::DEPOSIT_FAILED))
    }

    pub async fn withdraw(&self, card_id: i64, amount: f64) -> Result<BalanceChange, ApiError> {
        self.post_query(
            &format!("/cards/{}/withdraw", card_id),
            &[amount_param(amount)],
        )
        .await
        .map_err(|e| e.with_fallback(messages::WITHDRAW_FAILED))
    }

    pub async fn transfer(
        &self,
        from_card_id: i64,
        to_card_number: &str,
        amount: f64,
    ) -> Result<Value, ApiError> {
        self.post_query(
            "/cards/transfer",
            &[
                ("from_card_id", from_card_id.to_string()),
                ("to_card_number", to_card_number.to_string()),
                amount_param(amount),
            ],
        )
        .await
        .map_err(|e| e.with_fallback(messages::TRANSFER_FAILED))
    }

    // --- loans ------------------------------------------------------------

    pub async fn my_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.get("/loans/me")
            .await
            .map_err(|e| e.with_fallback(messages::LOANS_LOAD_FAILED))
    }

    pub async fn apply_for_loan(&self, application: &LoanApplication) -> Result<Loan, ApiError> {
        self.post("/loans/apply", application)
            .await
            .map_err(|e| e.with_fallback(messages::LOAN_APPLY_FAILED))
    }

    pub async fn loan_details(&self, loan_id: i64) -> Result<Loan, ApiError> {
        self.get(&format!("/loans/{}", loan_id))
            .await
            .map_err(|e| e.with_fallback(messages::LOAN_DETAILS_FAILED))
    }

    pub async fn pay_loan(
        &self,
        loan_id: i64,
        payment: &LoanPayment,
    ) -> Result<LoanPaymentResult, ApiError> {
        self.post(&format!("/loans/{}/pay", loan_id), payment)
            .await
            .map_err(|e| e.with_fallback(messages::LOAN_PAY_FAILED))
    }

    pub async fn loan_schedule(&self, loan_id: i64) -> Result<LoanSchedule, ApiError> {
        self.get(&format!("/loans/{}/schedule", loan_id))
            .await
            .map_err(|e| e.with_fallback(messages::LOAN_SCHEDULE_FAILED))
    }

    // --- transactions -----------------------------------------------------

    pub async fn my_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ApiError> {
        let mut params = Vec::new();
        if let Some(kind) = &query.transaction_type {
            params.push(("transaction_type", kind.clone()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        self.get_with_query("/transactions/me", &params)
            .await
            .map_err(|e| e.with_fallback(messages::TRANSACTIONS_LOAD_FAILED))
    }

    pub async fn transaction_details(&self, transaction_id: i64) -> Result<Transaction, ApiError> {
        self.get(&format!("/transactions/{}", transaction_id))
            .await
            .map_err(|e| e.with_fallback(messages::TRANSACTION_DETAILS_FAILED))
    }

    pub async fn transaction_stats(&self) -> Result<TransactionStats, ApiError> {
        self.get("/transactions/me/stats")
            .await
            .map_err(|e| e.with_fallback(messages::TRANSACTION_STATS_FAILED))
    }

    pub async fn search_transactions(&self, query: &str) -> Result<Vec<Transaction>, ApiError> {
        self.get_with_query("/transactions/search/", &[("query", query.to_string())])
            .await
            .map_err(|e| e.with_fallback(messages::TRANSACTION_SEARCH_FAILED))
    }

    // --- processes --------------------------------------------------------

    pub async fn my_processes(&self) -> Result<Vec<Process>, ApiError> {
        self.get("/processes/me")
            .await
            .map_err(|e| e.with_fallback(messages::PROCESSES_LOAD_FAILED))
    }

    pub async fn create_process(&self, payload: &ProcessCreate) -> Result<Process, ApiError> {
        self.post("/processes/", payload)
            .await
            .map_err(|e| e.with_fallback(messages::PROCESS_CREATE_FAILED))
    }

    pub async fn update_process_status(
        &self,
        process_id: i64,
        payload: &ProcessStatusUpdate,
    ) -> Result<Process, ApiError> {
        self.patch(&format!("/processes/{}/status", process_id), payload)
            .await
            .map_err(|e| e.with_fallback(messages::PROCESS_UPDATE_FAILED))
    }

    pub async fn delete_process(&self, process_id: i64) -> Result<Value, ApiError> {
        self.delete(&format!("/processes/{}", process_id))
            .await
            .map_err(|e| e.with_fallback(messages::PROCESS_DELETE_FAILED))
    }

    pub async fn process_stats(&self) -> Result<ProcessStats, ApiError> {
        self.get("/processes/me/stats")
            .await
            .map_err(|e| e.with_fallback(messages::PROCESS_STATS_FAILED))
    }
}
