use leptos::*;

use crate::{
    api::ApiError,
    components::{
        common::{format_money, parse_amount, ButtonVariant, EmptyState},
        layout::Layout,
    },
    messages,
    pages::{PageContext, PageFeedback},
    state::banking,
};

const CARD_TYPES: &[&str] = &["debit", "credit"];

#[component]
pub fn CardsPage() -> impl IntoView {
    let ctx = PageContext::new();
    let store = ctx.store;
    let pending = ctx.pending;

    let new_card_type = create_rw_signal(CARD_TYPES[0].to_string());
    let new_card_account = create_rw_signal(String::new());
    let amount = create_rw_signal(String::new());

    let issue = {
        let ctx = ctx.clone();
        move |_: ev::MouseEvent| {
            let card_type = new_card_type.get_untracked();
            let Ok(account_id) = new_card_account.get_untracked().parse::<i64>() else {
                ctx.error.set(Some(ApiError::validation(messages::FILL_ALL_FIELDS)));
                return;
            };
            ctx.run(Some("Card issued"), move |api, store| async move {
                banking::issue_card(&api, store, &card_type, account_id).await
            })
        }
    };

    let act = {
        let ctx = ctx.clone();
        move |card_id: i64, op: CardOp| {
            let raw_amount = amount.get_untracked();
            ctx.run(Some(op.success()), move |api, store| async move {
                match op {
                    CardOp::Deposit | CardOp::Withdraw => {
                        let value = parse_amount(&raw_amount)
                            .ok_or_else(|| ApiError::validation(messages::AMOUNT_MUST_BE_POSITIVE))?;
                        if op == CardOp::Deposit {
                            banking::deposit(&api, store, card_id, value).await.map(|_| ())
                        } else {
                            banking::withdraw(&api, store, card_id, value).await.map(|_| ())
                        }
                    }
                    CardOp::Deactivate => banking::deactivate_card(&api, store, card_id).await.map(|_| ()),
                    CardOp::Delete => banking::delete_card(&api, store, card_id).await,
                }
            })
        }
    };

    view! {
        <Layout>
            <div class="space-y-4">
                <h1 class="text-2xl font-bold text-fg">"Cards"</h1>
                <PageFeedback ctx=ctx.clone()/>
                <section class="bg-surface-elevated shadow rounded-lg p-4 flex flex-wrap gap-2 items-end">
                    <select
                        class="rounded-md border border-border px-2 py-2"
                        on:change=move |ev| new_card_account.set(event_target_value(&ev))
                    >
                        <option value="">"Choose an account"</option>
                        {move || store.accounts.with(|c| {
                            c.items()
                                .iter()
                                .map(|a| view! { <option value=a.id.to_string()>{a.account_number.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <select
                        class="rounded-md border border-border px-2 py-2"
                        on:change=move |ev| new_card_type.set(event_target_value(&ev))
                    >
                        {CARD_TYPES
                            .iter()
                            .map(|t| view! { <option value=*t>{*t}</option> })
                            .collect_view()}
                    </select>
                    <button
                        class=format!("rounded-md px-4 py-2 text-sm {}", ButtonVariant::Primary.classes())
                        disabled=move || pending.get()
                        on:click=issue
                    >
                        "Issue card"
                    </button>
                </section>
                <label class="block text-sm text-fg-muted">
                    "Amount"
                    <input
                        class="ml-2 rounded-md border border-border px-2 py-1"
                        prop:value=move || amount.get()
                        on:input=move |ev| amount.set(event_target_value(&ev))
                    />
                </label>
                {move || {
                    let rows = store.accounts.with(|accounts| {
                        store.cards.with(|cards| banking::cards_with_accounts(accounts.items(), cards.items()))
                    });
                    if rows.is_empty() {
                        return view! { <EmptyState title="You have no cards"/> }.into_view();
                    }
                    let act = act.clone();
                    rows.into_iter()
                        .map(|(card, account)| {
                            let act = act.clone();
                            let id = card.id;
                            let buttons = CardOp::ALL
                                .iter()
                                .filter(|op| card.is_active || matches!(op, CardOp::Delete))
                                .map(|op| {
                                    let act = act.clone();
                                    let op = *op;
                                    view! {
                                        <button
                                            class=format!("rounded-md px-3 py-1 text-sm {}", op.variant().classes())
                                            disabled=move || pending.get()
                                            on:click=move |_| act(id, op)
                                        >
                                            {op.label()}
                                        </button>
                                    }
                                })
                                .collect_view();
                            view! {
                                <div class="bg-surface-elevated shadow rounded-lg p-4 space-y-2">
                                    <div class="flex justify-between">
                                        <span class="font-mono">{card.card_number.clone()}</span>
                                        <span class="text-sm text-fg-muted">
                                            {card.card_type.clone()}
                                            {if card.is_active { "" } else { " (inactive)" }}
                                        </span>
                                    </div>
                                    <p class="text-lg font-semibold">{format_money(account.balance)}</p>
                                    <div class="flex gap-2">{buttons}</div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Layout>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardOp {
    Deposit,
    Withdraw,
    Deactivate,
    Delete,
}

impl CardOp {
    const ALL: [CardOp; 4] = [
        CardOp::Deposit,
        CardOp::Withdraw,
        CardOp::Deactivate,
        CardOp::Delete,
    ];

    fn label(self) -> &'static str {
        match self {
            CardOp::Deposit => "Top up",
            CardOp::Withdraw => "Withdraw",
            CardOp::Deactivate => "Block",
            CardOp::Delete => "Delete",
        }
    }

    fn success(self) -> &'static str {
        match self {
            CardOp::Deposit => "Card topped up",
            CardOp::Withdraw => "Cash withdrawn",
            CardOp::Deactivate => "Card blocked",
            CardOp::Delete => "Card deleted",
        }
    }

    fn variant(self) -> ButtonVariant {
        match self {
            CardOp::Deposit | CardOp::Withdraw => ButtonVariant::Secondary,
            CardOp::Deactivate | CardOp::Delete => ButtonVariant::Danger,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures, ssr::render_with_store};

    #[test]
    fn inactive_cards_only_offer_delete() {
        let html = render_with_store(
            |store| {
                let mut blocked = fixtures::card(6, 1);
                blocked.is_active = false;
                store.accounts.update(|c| c.set_all(vec![fixtures::account(1, 250.0)]));
                store.cards.update(|c| c.set_all(vec![blocked]));
            },
            || view! { <CardsPage/> },
        );
        assert!(html.contains("4276 0000 0000 0006"));
        assert!(html.contains("(inactive)"));
        assert!(html.contains("250.00"));
        assert!(!html.contains("Top up"));
        assert!(html.contains("Delete"));
    }

    #[test]
    fn cards_without_a_cached_account_are_hidden() {
        let html = render_with_store(
            |store| store.cards.update(|c| c.set_all(vec![fixtures::card(7, 99)])),
            || view! { <CardsPage/> },
        );
        assert!(!html.contains("4276 0000 0000 0007"));
        assert!(html.contains("You have no cards"));
    }
}
