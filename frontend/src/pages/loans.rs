use leptos::{ev::SubmitEvent, *};

use crate::{
    api::{ApiError, LoanApplication, LoanPayment, LoanSchedule},
    components::{
        common::{format_money, parse_amount, ButtonVariant, EmptyState},
        forms::{SubmitButton, TextField},
        layout::Layout,
    },
    messages,
    pages::{PageContext, PageFeedback},
    state::banking,
};

fn application_from(amount: &str, rate: &str, term: &str) -> Result<LoanApplication, ApiError> {
    let invalid = || ApiError::validation(messages::FILL_ALL_FIELDS);
    Ok(LoanApplication {
        amount: parse_amount(amount).ok_or_else(invalid)?,
        interest_rate: parse_amount(rate).ok_or_else(invalid)?,
        term_months: term.trim().parse().map_err(|_| invalid())?,
    })
}

#[component]
pub fn LoansPage() -> impl IntoView {
    let ctx = PageContext::new();
    let store = ctx.store;
    let pending = ctx.pending;

    let amount = create_rw_signal(String::new());
    let rate = create_rw_signal("12.5".to_string());
    let term = create_rw_signal("12".to_string());
    let pay_card = create_rw_signal(String::new());
    let pay_amount = create_rw_signal(String::new());
    let schedule = create_rw_signal(None::<LoanSchedule>);

    ctx.load(|api, store| async move {
        super::log_failure("loans", banking::refresh_loans(&api, store).await);
    });

    let apply = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let application = match application_from(
                &amount.get_untracked(),
                &rate.get_untracked(),
                &term.get_untracked(),
            ) {
                Ok(application) => application,
                Err(err) => {
                    ctx.error.set(Some(err));
                    return;
                }
            };
            ctx.run(Some("Loan application submitted"), move |api, store| async move {
                banking::apply_for_loan(&api, store, &application).await
            });
        }
    };

    let pay = {
        let ctx = ctx.clone();
        move |loan_id: i64| {
            let card_id = pay_card.get_untracked().parse::<i64>().ok();
            let value = parse_amount(&pay_amount.get_untracked());
            let (Some(card_id), Some(payment_amount)) = (card_id, value) else {
                ctx.error.set(Some(ApiError::validation(messages::FILL_ALL_FIELDS)));
                return;
            };
            let payment = LoanPayment {
                payment_amount,
                card_id,
            };
            ctx.run(Some("Payment accepted"), move |api, store| async move {
                banking::pay_loan(&api, store, loan_id, &payment).await
            });
        }
    };

    let show_schedule = {
        let ctx = ctx.clone();
        move |loan_id: i64| {
            ctx.run(None, move |api, _store| async move {
                let loaded = api.loan_schedule(loan_id).await?;
                schedule.set(Some(loaded));
                Ok::<(), ApiError>(())
            });
        }
    };

    view! {
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">"Loans"</h1>
                <PageFeedback ctx=ctx.clone()/>
                <form class="bg-surface-elevated shadow rounded-lg p-4 space-y-3" on:submit=apply>
                    <h2 class="text-lg font-medium">"Apply for a loan"</h2>
                    <TextField label="Amount" value=amount/>
                    <TextField label="Interest rate, %" value=rate/>
                    <TextField label="Term, months" value=term/>
                    <SubmitButton label="Apply" pending=pending/>
                </form>
                <section class="space-y-2">
                    <div class="flex gap-2">
                        <TextField label="Pay from card id" value=pay_card/>
                        <TextField label="Payment amount" value=pay_amount/>
                    </div>
                    {move || {
                        let loans = store.loans.with(|c| c.items().to_vec());
                        if loans.is_empty() {
                            return view! { <EmptyState title="You have no loans"/> }.into_view();
                        }
                        let pay = pay.clone();
                        let show_schedule = show_schedule.clone();
                        loans
                            .into_iter()
                            .map(|loan| {
                                let pay = pay.clone();
                                let show_schedule = show_schedule.clone();
                                let id = loan.id;
                                let is_paid = loan.is_paid;
                                view! {
                                    <div class="bg-surface-elevated shadow rounded-lg p-4 flex justify-between items-center">
                                        <div>
                                            <p class="font-semibold">{format_money(loan.amount)}</p>
                                            <p class="text-sm text-fg-muted">
                                                {format!("{}% for {} months, paid {}", loan.interest_rate, loan.term_months, format_money(loan.paid_amount))}
                                            </p>
                                        </div>
                                        <div class="flex gap-2">
                                            <button
                                                class=format!("rounded-md px-3 py-1 text-sm {}", ButtonVariant::Secondary.classes())
                                                on:click=move |_| show_schedule(id)
                                            >
                                                "Schedule"
                                            </button>
                                            <button
                                                class=format!("rounded-md px-3 py-1 text-sm {}", ButtonVariant::Primary.classes())
                                                disabled=move || is_paid || pending.get()
                                                on:click=move |_| pay(id)
                                            >
                                                "Pay"
                                            </button>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </section>
                {move || schedule.get().map(|s| view! {
                    <section class="bg-surface-elevated shadow rounded-lg p-4">
                        <h2 class="text-lg font-medium">
                            {format!("Schedule for loan #{}: {} per month", s.loan_id, format_money(s.monthly_payment))}
                        </h2>
                        <table class="w-full text-sm">
                            <tbody>
                                {s.schedule
                                    .into_iter()
                                    .map(|row| view! {
                                        <tr>
                                            <td>{row.month}</td>
                                            <td>{row.payment_date.date().to_string()}</td>
                                            <td>{format_money(row.monthly_payment)}</td>
                                            <td>{format_money(row.remaining_balance)}</td>
                                        </tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </section>
                })}
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_parses_user_input() {
        let application = application_from("100000", "12,5", " 24 ").unwrap();
        assert_eq!(application.amount, 100_000.0);
        assert_eq!(application.interest_rate, 12.5);
        assert_eq!(application.term_months, 24);
        assert!(application_from("", "12", "12").is_err());
        assert!(application_from("100", "12", "a year").is_err());
    }
}
