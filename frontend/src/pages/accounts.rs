use leptos::*;

use crate::{
    components::{
        common::{format_money, ButtonVariant, EmptyState},
        layout::Layout,
    },
    pages::{PageContext, PageFeedback},
    state::banking,
};

#[component]
pub fn AccountsPage() -> impl IntoView {
    let ctx = PageContext::new();
    let store = ctx.store;
    let pending = ctx.pending;

    let open = {
        let ctx = ctx.clone();
        move |_: ev::MouseEvent| {
            ctx.run(Some("Account opened"), |api, store| async move {
                banking::open_account(&api, store).await
            })
        }
    };

    let close = {
        let ctx = ctx.clone();
        move |account_id: i64| {
            ctx.run(Some("Account closed"), move |api, store| async move {
                banking::close_account(&api, store, account_id).await
            })
        }
    };

    view! {
        <Layout>
            <div class="space-y-4">
                <div class="flex justify-between items-center">
                    <h1 class="text-2xl font-bold text-fg">"Accounts"</h1>
                    <button
                        class=format!("rounded-md px-4 py-2 text-sm {}", ButtonVariant::Primary.classes())
                        disabled=move || pending.get()
                        on:click=open
                    >
                        "Open account"
                    </button>
                </div>
                <PageFeedback ctx=ctx.clone()/>
                {move || {
                    let accounts = store.accounts.with(|c| c.items().to_vec());
                    if accounts.is_empty() {
                        return view! { <EmptyState title="You have no accounts"/> }.into_view();
                    }
                    let close = close.clone();
                    view! {
                        <ul class="divide-y divide-border bg-surface-elevated shadow rounded-lg">
                            {accounts
                                .into_iter()
                                .map(|account| {
                                    let close = close.clone();
                                    let id = account.id;
                                    view! {
                                        <li class="p-4 flex justify-between items-center">
                                            <div>
                                                <p class="font-mono text-sm">{account.account_number}</p>
                                                <p class="text-lg font-semibold">{format_money(account.balance)}</p>
                                            </div>
                                            <button
                                                class=format!("rounded-md px-3 py-1 text-sm {}", ButtonVariant::Danger.classes())
                                                on:click=move |_| close(id)
                                            >
                                                "Close"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_view()
                }}
            </div>
        </Layout>
    }
}
