use leptos::{ev::SubmitEvent, *};

use crate::{
    api::{ApiError, Transaction},
    components::{
        common::{format_money, EmptyState},
        forms::{SubmitButton, TextField},
        layout::Layout,
    },
    pages::{log_failure, PageContext, PageFeedback},
    state::banking,
};

const RECENT_TRANSACTIONS: usize = 5;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = PageContext::new();
    let store = ctx.store;

    ctx.load(|api, store| async move {
        let (transactions, processes) = futures::join!(
            banking::refresh_transaction_stats(&api, store),
            banking::refresh_process_stats(&api, store),
        );
        log_failure("transaction stats", transactions);
        log_failure("process stats", processes);
    });

    let query = create_rw_signal(String::new());
    let found = create_rw_signal(None::<Vec<Transaction>>);
    let search = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let text = query.get_untracked();
            ctx.run(None, move |api, _store| async move {
                let results = banking::search_transactions(&api, &text).await?;
                found.set((!text.trim().is_empty()).then_some(results));
                Ok::<(), ApiError>(())
            });
        }
    };
    let pending = ctx.pending;

    let greeting = move || {
        store.customer.with(|s| {
            s.profile()
                .and_then(|p| p.first_name.clone())
                .map(|name| format!("Welcome, {}", name))
                .unwrap_or_else(|| "Welcome".to_string())
        })
    };
    let total_balance = move || {
        store
            .accounts
            .with(|c| format_money(c.items().iter().map(|a| a.balance).sum()))
    };
    let active_cards = move || store.cards.with(|c| c.items().iter().filter(|card| card.is_active).count());
    let open_loans = move || store.loans.with(|c| c.items().iter().filter(|loan| !loan.is_paid).count());
    let pending_requests = move || {
        store.processes.with(|c| {
            c.stats()
                .and_then(|s| s.pending_processes)
                .unwrap_or_else(|| c.items().iter().filter(|p| p.status == "pending").count() as i64)
        })
    };

    view! {
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">{greeting}</h1>
                <div class="grid grid-cols-2 gap-4 lg:grid-cols-4">
                    <Stat label="Total balance" value=Signal::derive(total_balance)/>
                    <Stat label="Active cards" value=Signal::derive(move || active_cards().to_string())/>
                    <Stat label="Open loans" value=Signal::derive(move || open_loans().to_string())/>
                    <Stat label="Pending requests" value=Signal::derive(move || pending_requests().to_string())/>
                </div>
                <section class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-medium text-fg mb-4">"Recent transactions"</h2>
                    <form class="flex gap-2 items-end mb-4" on:submit=search>
                        <TextField label="Search" value=query/>
                        <SubmitButton label="Find" pending=pending/>
                    </form>
                    <PageFeedback ctx=ctx.clone()/>
                    {move || {
                        let shown = found.get().unwrap_or_else(|| {
                            store.transactions.with(|c| {
                                c.items().iter().take(RECENT_TRANSACTIONS).cloned().collect::<Vec<_>>()
                            })
                        });
                        if shown.is_empty() {
                            view! { <EmptyState title="No transactions yet"/> }.into_view()
                        } else {
                            view! { <TransactionList items=shown/> }.into_view()
                        }
                    }}
                </section>
            </div>
        </Layout>
    }
}

#[component]
fn TransactionList(items: Vec<Transaction>) -> impl IntoView {
    view! {
        <ul class="divide-y divide-border">
            {items
                .into_iter()
                .map(|t| view! {
                    <li class="py-2 flex justify-between text-sm">
                        <span>{t.description.clone().unwrap_or(t.transaction_type)}</span>
                        <span>{format_money(t.amount)}</span>
                    </li>
                })
                .collect_view()}
        </ul>
    }
}

#[component]
fn Stat(#[prop(into)] label: String, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4">
            <p class="text-sm text-fg-muted">{label}</p>
            <p class="text-xl font-semibold text-fg">{move || value.get()}</p>
        </div>
    }
}
