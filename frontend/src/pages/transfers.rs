use leptos::{ev::SubmitEvent, *};

use crate::{
    api::ApiError,
    components::{
        common::{format_money, parse_amount},
        forms::{SubmitButton, TextField},
        layout::Layout,
    },
    messages,
    pages::{PageContext, PageFeedback},
    state::banking,
};

#[component]
pub fn TransfersPage() -> impl IntoView {
    let ctx = PageContext::new();
    let store = ctx.store;
    let pending = ctx.pending;

    let from_card = create_rw_signal(String::new());
    let to_card_number = create_rw_signal(String::new());
    let amount = create_rw_signal(String::new());

    let on_submit = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let Ok(from_card_id) = from_card.get_untracked().parse::<i64>() else {
                ctx.error.set(Some(ApiError::validation(messages::FILL_ALL_FIELDS)));
                return;
            };
            let Some(value) = parse_amount(&amount.get_untracked()) else {
                ctx.error
                    .set(Some(ApiError::validation(messages::AMOUNT_MUST_BE_POSITIVE)));
                return;
            };
            let target = to_card_number.get_untracked();
            ctx.run(Some("Transfer sent"), move |api, store| async move {
                banking::transfer(&api, store, from_card_id, &target, value).await
            });
        }
    };

    let source_cards = move || {
        store.accounts.with(|accounts| {
            store.cards.with(|cards| {
                banking::cards_with_accounts(accounts.items(), cards.items())
                    .into_iter()
                    .filter(|(card, _)| card.is_active)
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <Layout>
            <form class="max-w-lg space-y-4" on:submit=on_submit>
                <h1 class="text-2xl font-bold text-fg">"Transfer between cards"</h1>
                <label class="block text-sm font-medium text-fg-muted">
                    "From card"
                    <select
                        class="mt-1 block w-full rounded-md border border-border px-2 py-2"
                        on:change=move |ev| from_card.set(event_target_value(&ev))
                    >
                        <option value="">"Choose a card"</option>
                        {move || {
                            source_cards()
                                .into_iter()
                                .map(|(card, account)| {
                                    let label = format!("{} ({})", card.card_number, format_money(account.balance));
                                    view! { <option value=card.id.to_string()>{label}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <TextField label="Recipient card number" value=to_card_number/>
                <TextField label="Amount" value=amount/>
                <PageFeedback ctx=ctx.clone()/>
                <SubmitButton label="Send" pending=pending/>
            </form>
        </Layout>
    }
}
