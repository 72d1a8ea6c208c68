//! Customer resource operations. Each one calls the gateway and then brings
//! the matching cache slice in line with the server's answer.

use futures::join;
use leptos::*;
use serde_json::Value;

use crate::{
    api::{
        Account, ApiClient, ApiError, BalanceChange, Card, CardCreate, Loan, LoanApplication,
        LoanPayment, LoanPaymentResult, Process, ProcessCreate, ProcessStatusUpdate, Transaction,
        TransactionQuery,
    },
    messages,
    state::store::AppStore,
};

fn positive_amount(amount: f64) -> Result<f64, ApiError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ApiError::validation(messages::AMOUNT_MUST_BE_POSITIVE))
    }
}

// --- accounts -------------------------------------------------------------

pub async fn refresh_accounts(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    store.accounts.update(|c| c.set_loading(true));
    let result = api.my_accounts().await;
    store.accounts.update(|cache| {
        cache.set_loading(false);
        match &result {
            Ok(items) => cache.set_all(items.clone()),
            // The forced logout has already cleared this slice.
            Err(err) if err.is_unauthorized() => {}
            Err(err) => cache.set_error(err.error.clone()),
        }
    });
    result.map(|_| ())
}

pub async fn open_account(api: &ApiClient, store: AppStore) -> Result<Account, ApiError> {
    let account = api.open_account().await?;
    store.accounts.update(|c| c.add(account.clone()));
    Ok(account)
}

/// Closes the account and drops its cards from the cards cache, mirroring the
/// server-side cascade.
pub async fn close_account(
    api: &ApiClient,
    store: AppStore,
    account_id: i64,
) -> Result<(), ApiError> {
    api.close_account(account_id).await?;
    store.accounts.update(|c| {
        c.remove(account_id);
    });
    let dropped = store
        .cards
        .try_update(|c| c.remove_where(|card| card.account_id == account_id))
        .unwrap_or_default();
    if dropped > 0 {
        log::debug!("dropped {} cards of closed account {}", dropped, account_id);
    }
    Ok(())
}

// --- cards ----------------------------------------------------------------

pub async fn refresh_cards(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    store.cards.update(|c| c.set_loading(true));
    let result = api.my_cards().await;
    store.cards.update(|cache| {
        cache.set_loading(false);
        match &result {
            Ok(items) => cache.set_all(items.clone()),
            // The forced logout has already cleared this slice.
            Err(err) if err.is_unauthorized() => {}
            Err(err) => cache.set_error(err.error.clone()),
        }
    });
    result.map(|_| ())
}

/// Refetches accounts and cards after a money movement. The server balance
/// is the only one shown.
async fn reconcile_balances(api: &ApiClient, store: AppStore) {
    let (accounts, cards) = join!(refresh_accounts(api, store), refresh_cards(api, store));
    if let Err(err) = accounts.and(cards) {
        log::warn!("balances not refreshed: {}", err);
    }
}

pub async fn issue_card(
    api: &ApiClient,
    store: AppStore,
    card_type: &str,
    account_id: i64,
) -> Result<Card, ApiError> {
    if card_type.trim().is_empty() {
        return Err(ApiError::validation(messages::FILL_ALL_FIELDS));
    }
    let payload = CardCreate {
        card_type: card_type.trim().to_string(),
        account_id,
    };
    let card = api.issue_card(&payload).await?;
    store.cards.update(|c| c.add(card.clone()));
    Ok(card)
}

pub async fn deactivate_card(
    api: &ApiClient,
    store: AppStore,
    card_id: i64,
) -> Result<Card, ApiError> {
    let card = api.deactivate_card(card_id).await?;
    store.cards.update(|c| {
        c.update(card.clone());
    });
    Ok(card)
}

pub async fn delete_card(api: &ApiClient, store: AppStore, card_id: i64) -> Result<(), ApiError> {
    let deleted = api.delete_card(card_id).await?;
    store.cards.update(|c| {
        c.remove(deleted.deleted_card_id);
    });
    Ok(())
}

pub async fn deposit(
    api: &ApiClient,
    store: AppStore,
    card_id: i64,
    amount: f64,
) -> Result<BalanceChange, ApiError> {
    let amount = positive_amount(amount)?;
    let change = api.deposit(card_id, amount).await?;
    reconcile_balances(api, store).await;
    Ok(change)
}

pub async fn withdraw(
    api: &ApiClient,
    store: AppStore,
    card_id: i64,
    amount: f64,
) -> Result<BalanceChange, ApiError> {
    let amount = positive_amount(amount)?;
    let change = api.withdraw(card_id, amount).await?;
    reconcile_balances(api, store).await;
    Ok(change)
}

pub async fn transfer(
    api: &ApiClient,
    store: AppStore,
    from_card_id: i64,
    to_card_number: &str,
    amount: f64,
) -> Result<Value, ApiError> {
    let to_card_number = to_card_number.trim();
    if to_card_number.is_empty() {
        return Err(ApiError::validation(messages::CARD_NUMBER_REQUIRED));
    }
    let amount = positive_amount(amount)?;
    let receipt = api.transfer(from_card_id, to_card_number, amount).await?;
    reconcile_balances(api, store).await;
    Ok(receipt)
}

/// Pairs every card with its account. Cards whose account is not cached are
/// left out.
pub fn cards_with_accounts(accounts: &[Account], cards: &[Card]) -> Vec<(Card, Account)> {
    cards
        .iter()
        .filter_map(|card| {
            accounts
                .iter()
                .find(|account| account.id == card.account_id)
                .map(|account| (card.clone(), account.clone()))
        })
        .collect()
}

// --- loans ----------------------------------------------------------------

pub async fn refresh_loans(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    store.loans.update(|c| c.set_loading(true));
    let result = api.my_loans().await;
    store.loans.update(|cache| {
        cache.set_loading(false);
        match &result {
            Ok(items) => cache.set_all(items.clone()),
            // The forced logout has already cleared this slice.
            Err(err) if err.is_unauthorized() => {}
            Err(err) => cache.set_error(err.error.clone()),
        }
    });
    result.map(|_| ())
}

/// Submits a loan application. Approval happens through a process, so the
/// process list is refetched too.
pub async fn apply_for_loan(
    api: &ApiClient,
    store: AppStore,
    application: &LoanApplication,
) -> Result<Loan, ApiError> {
    positive_amount(application.amount)?;
    if application.term_months <= 0 {
        return Err(ApiError::validation(messages::FILL_ALL_FIELDS));
    }
    let loan = api.apply_for_loan(application).await?;
    store.loans.update(|c| c.add(loan.clone()));
    if let Err(err) = refresh_processes(api, store).await {
        log::warn!("processes not refreshed after loan application: {}", err);
    }
    Ok(loan)
}

pub async fn pay_loan(
    api: &ApiClient,
    store: AppStore,
    loan_id: i64,
    payment: &LoanPayment,
) -> Result<LoanPaymentResult, ApiError> {
    positive_amount(payment.payment_amount)?;
    let result = api.pay_loan(loan_id, payment).await?;
    let (loans, _) = join!(refresh_loans(api, store), reconcile_balances(api, store));
    if let Err(err) = loans {
        log::warn!("loans not refreshed after payment: {}", err);
    }
    Ok(result)
}

// --- transactions ---------------------------------------------------------

pub async fn refresh_transactions(
    api: &ApiClient,
    store: AppStore,
    query: &TransactionQuery,
) -> Result<(), ApiError> {
    store.transactions.update(|c| c.set_loading(true));
    let result = api.my_transactions(query).await;
    store.transactions.update(|cache| {
        cache.set_loading(false);
        match &result {
            Ok(items) => cache.set_all(items.clone()),
            // The forced logout has already cleared this slice.
            Err(err) if err.is_unauthorized() => {}
            Err(err) => cache.set_error(err.error.clone()),
        }
    });
    result.map(|_| ())
}

pub async fn refresh_transaction_stats(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    let stats = api.transaction_stats().await?;
    store.transactions.update(|c| c.set_stats(stats));
    Ok(())
}

/// Search results are returned to the caller; the cached history is left
/// alone.
pub async fn search_transactions(api: &ApiClient, query: &str) -> Result<Vec<Transaction>, ApiError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    api.search_transactions(query.trim()).await
}

// --- processes ------------------------------------------------------------

pub async fn refresh_processes(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    store.processes.update(|c| c.set_loading(true));
    let result = api.my_processes().await;
    store.processes.update(|cache| {
        cache.set_loading(false);
        match &result {
            Ok(items) => cache.set_all(items.clone()),
            // The forced logout has already cleared this slice.
            Err(err) if err.is_unauthorized() => {}
            Err(err) => cache.set_error(err.error.clone()),
        }
    });
    result.map(|_| ())
}

pub async fn refresh_process_stats(api: &ApiClient, store: AppStore) -> Result<(), ApiError> {
    let stats = api.process_stats().await?;
    store.processes.update(|c| c.set_stats(stats));
    Ok(())
}

pub async fn create_process(
    api: &ApiClient,
    store: AppStore,
    payload: &ProcessCreate,
) -> Result<Process, ApiError> {
    if payload.process_type.trim().is_empty() {
        return Err(ApiError::validation(messages::FILL_ALL_FIELDS));
    }
    let process = api.create_process(payload).await?;
    store.processes.update(|c| c.add(process.clone()));
    Ok(process)
}

pub async fn update_process_status(
    api: &ApiClient,
    store: AppStore,
    process_id: i64,
    status: &str,
) -> Result<Process, ApiError> {
    let payload = ProcessStatusUpdate {
        status: status.to_string(),
    };
    let process = api.update_process_status(process_id, &payload).await?;
    store.processes.update(|c| {
        c.update(process.clone());
    });
    Ok(process)
}

pub async fn delete_process(
    api: &ApiClient,
    store: AppStore,
    process_id: i64,
) -> Result<(), ApiError> {
    api.delete_process(process_id).await?;
    store.processes.update(|c| {
        c.remove(process_id);
    });
    Ok(())
}
