use leptos::{ev::SubmitEvent, *};

use crate::{
    api::{BranchDraft, ProcessDecision},
    components::{
        common::{ButtonVariant, EmptyState},
        forms::{SubmitButton, TextField},
        layout::Layout,
    },
    identity::IdentityKind,
    pages::{PageContext, PageFeedback},
    state::{back_office, employee_auth},
};

const SMALL_BUTTON: &str = "rounded-md px-3 py-1 text-sm";

fn decision_label(decision: ProcessDecision) -> &'static str {
    match decision {
        ProcessDecision::Approve => "Approve",
        ProcessDecision::Reject => "Reject",
        ProcessDecision::Complete => "Complete",
    }
}

/// Decisions that make sense for a process in `status`.
fn decisions_for(status: &str) -> &'static [ProcessDecision] {
    match status {
        "pending" => &[ProcessDecision::Approve, ProcessDecision::Reject],
        "approved" | "in_progress" => &[ProcessDecision::Complete],
        _ => &[],
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let ctx = PageContext::new();
    let store = ctx.store;
    let pending = ctx.pending;

    ctx.load(|api, store| async move {
        employee_auth::load_admin_data(&api, store).await;
    });

    let role_name = create_rw_signal(String::new());
    let branch_name = create_rw_signal(String::new());
    let branch_address = create_rw_signal(String::new());
    let client_query = create_rw_signal(String::new());

    let decide = {
        let ctx = ctx.clone();
        move |process_id: i64, decision: ProcessDecision| {
            ctx.run(Some("Request updated"), move |api, store| async move {
                back_office::decide_process(&api, store, process_id, decision).await
            })
        }
    };
    let toggle_employee = {
        let ctx = ctx.clone();
        move |employee_id: i64| {
            ctx.run(None, move |api, store| async move {
                back_office::toggle_employee_active(&api, store, employee_id).await
            })
        }
    };
    let delete_employee = {
        let ctx = ctx.clone();
        move |employee_id: i64| {
            ctx.run(Some("Employee removed"), move |api, store| async move {
                back_office::delete_employee(&api, store, employee_id).await
            })
        }
    };
    let refresh_stats = {
        let ctx = ctx.clone();
        move |_: ev::MouseEvent| {
            ctx.run(None, |api, store| async move {
                back_office::refresh_overview(&api, store).await
            })
        }
    };
    let delete_role = {
        let ctx = ctx.clone();
        move |role_id: i64| {
            ctx.run(Some("Role deleted"), move |api, store| async move {
                back_office::delete_role(&api, store, role_id).await
            })
        }
    };
    let delete_branch = {
        let ctx = ctx.clone();
        move |branch_id: i64| {
            ctx.run(Some("Branch deleted"), move |api, store| async move {
                back_office::delete_branch(&api, store, branch_id).await
            })
        }
    };
    let add_role = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let name = role_name.get_untracked();
            ctx.run(Some("Role created"), move |api, store| async move {
                back_office::create_role(&api, store, &name).await
            });
        }
    };
    let add_branch = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let draft = BranchDraft {
                name: Some(branch_name.get_untracked()),
                address: Some(branch_address.get_untracked()),
                phone: None,
            };
            ctx.run(Some("Branch created"), move |api, store| async move {
                back_office::create_branch(&api, store, &draft).await
            });
        }
    };
    let search = {
        let ctx = ctx.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let query = client_query.get_untracked();
            ctx.run(None, move |api, store| async move {
                back_office::search_clients(&api, store, &query).await
            });
        }
    };

    view! {
        <Layout identity=IdentityKind::Employee>
            <div class="space-y-8">
                <div class="flex justify-between items-center">
                    <h1 class="text-2xl font-bold text-fg">"Back office"</h1>
                    <button
                        class=format!("{} {}", SMALL_BUTTON, ButtonVariant::Secondary.classes())
                        disabled=move || pending.get()
                        on:click=refresh_stats
                    >
                        "Refresh stats"
                    </button>
                </div>
                <PageFeedback ctx=ctx.clone()/>
                <section class="grid grid-cols-2 gap-4 lg:grid-cols-4">
                    {move || store.admin.with(|a| a.stats.clone()).map(|stats| {
                        let mut by_status: Vec<_> = stats.by_status.into_iter().collect();
                        by_status.sort();
                        view! {
                            <div class="bg-surface-elevated shadow rounded-lg p-4">
                                <p class="text-sm text-fg-muted">"Requests"</p>
                                <p class="text-xl font-semibold">{stats.total_processes}</p>
                            </div>
                            {by_status
                                .into_iter()
                                .map(|(status, count)| view! {
                                    <div class="bg-surface-elevated shadow rounded-lg p-4">
                                        <p class="text-sm text-fg-muted">{status}</p>
                                        <p class="text-xl font-semibold">{count}</p>
                                    </div>
                                })
                                .collect_view()}
                        }
                    })}
                </section>

                <section class="space-y-2">
                    <h2 class="text-lg font-medium">"Pending requests"</h2>
                    {move || {
                        let processes = store.admin.with(|a| a.processes.items().to_vec());
                        if processes.is_empty() {
                            return view! { <EmptyState title="Nothing to review"/> }.into_view();
                        }
                        let decide = decide.clone();
                        processes
                            .into_iter()
                            .map(|process| {
                                let id = process.id;
                                let buttons = decisions_for(&process.status)
                                    .iter()
                                    .map(|decision| {
                                        let decide = decide.clone();
                                        let decision = *decision;
                                        let variant = if decision == ProcessDecision::Reject {
                                            ButtonVariant::Danger
                                        } else {
                                            ButtonVariant::Primary
                                        };
                                        view! {
                                            <button
                                                class=format!("{} {}", SMALL_BUTTON, variant.classes())
                                                disabled=move || pending.get()
                                                on:click=move |_| decide(id, decision)
                                            >
                                                {decision_label(decision)}
                                            </button>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <div class="bg-surface-elevated shadow rounded-lg p-3 flex justify-between">
                                        <span>{format!("#{} {} (client {}): {}", process.id, process.process_type, process.client_id, process.status)}</span>
                                        <div class="flex gap-2">{buttons}</div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </section>

                <section class="space-y-2">
                    <h2 class="text-lg font-medium">"Employees"</h2>
                    {move || {
                        let toggle_employee = toggle_employee.clone();
                        let delete_employee = delete_employee.clone();
                        store.admin.with(|a| a.employees.items().to_vec())
                            .into_iter()
                            .map(|employee| {
                                let toggle = toggle_employee.clone();
                                let delete = delete_employee.clone();
                                let id = employee.id;
                                let label = if employee.is_active { "Deactivate" } else { "Activate" };
                                view! {
                                    <div class="flex justify-between text-sm py-1">
                                        <span>{format!("{} {} <{}>", employee.first_name, employee.last_name, employee.email)}</span>
                                        <div class="flex gap-2">
                                            <button
                                                class=format!("{} {}", SMALL_BUTTON, ButtonVariant::Secondary.classes())
                                                on:click=move |_| toggle(id)
                                            >
                                                {label}
                                            </button>
                                            <button
                                                class=format!("{} {}", SMALL_BUTTON, ButtonVariant::Danger.classes())
                                                on:click=move |_| delete(id)
                                            >
                                                "Remove"
                                            </button>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </section>

                <section class="grid grid-cols-1 gap-6 lg:grid-cols-2">
                    <div class="space-y-2">
                        <h2 class="text-lg font-medium">"Roles"</h2>
                        {move || {
                            let delete_role = delete_role.clone();
                            store.admin.with(|a| a.roles.items().to_vec())
                                .into_iter()
                                .map(|role| {
                                    let delete = delete_role.clone();
                                    let id = role.id;
                                    view! {
                                        <div class="flex justify-between text-sm py-1">
                                            <span>{role.name}</span>
                                            <button
                                                class=format!("{} {}", SMALL_BUTTON, ButtonVariant::Danger.classes())
                                                on:click=move |_| delete(id)
                                            >
                                                "Delete"
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                        <form class="space-y-2" on:submit=add_role>
                            <TextField label="New role" value=role_name/>
                            <SubmitButton label="Add role" pending=pending/>
                        </form>
                    </div>
                    <div class="space-y-2">
                        <h2 class="text-lg font-medium">"Branches"</h2>
                        {move || {
                            let delete_branch = delete_branch.clone();
                            store.admin.with(|a| a.branches.items().to_vec())
                                .into_iter()
                                .map(|branch| {
                                    let delete = delete_branch.clone();
                                    let id = branch.id;
                                    view! {
                                        <div class="flex justify-between text-sm py-1">
                                            <span>{format!("{}, {}", branch.name, branch.address)}</span>
                                            <button
                                                class=format!("{} {}", SMALL_BUTTON, ButtonVariant::Danger.classes())
                                                on:click=move |_| delete(id)
                                            >
                                                "Delete"
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                        <form class="space-y-2" on:submit=add_branch>
                            <TextField label="Branch name" value=branch_name/>
                            <TextField label="Address" value=branch_address/>
                            <SubmitButton label="Add branch" pending=pending/>
                        </form>
                    </div>
                </section>

                <section class="space-y-2">
                    <h2 class="text-lg font-medium">"Clients"</h2>
                    <form class="flex gap-2 items-end" on:submit=search>
                        <TextField label="Search" value=client_query/>
                        <SubmitButton label="Find" pending=pending/>
                    </form>
                    {move || store.admin.with(|a| {
                        a.clients
                            .items()
                            .iter()
                            .map(|c| view! {
                                <div class="text-sm py-1">{format!("{} {} <{}>", c.first_name, c.last_name, c.email)}</div>
                            })
                            .collect_view()
                    })}
                </section>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_processes_offer_decisions() {
        assert_eq!(
            decisions_for("pending"),
            &[ProcessDecision::Approve, ProcessDecision::Reject]
        );
        assert_eq!(decisions_for("approved"), &[ProcessDecision::Complete]);
        assert!(decisions_for("rejected").is_empty());
        assert!(decisions_for("completed").is_empty());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{fixtures, ssr::render_with_store};

    #[test]
    fn renders_cached_admin_collections() {
        let html = render_with_store(
            |store| {
                store.admin.update(|a| {
                    a.processes.set_all(vec![fixtures::process(8)]);
                    a.roles.set_all(vec![fixtures::role(1, "Manager")]);
                    a.branches.set_all(vec![fixtures::branch(2)]);
                    a.employees.set_all(vec![fixtures::employee(4)]);
                });
            },
            || view! { <AdminDashboardPage/> },
        );
        assert!(html.contains("#8 card_issue"));
        assert!(html.contains("Approve"));
        assert!(html.contains("Manager"));
        assert!(html.contains("Branch 2, Main st. 1"));
        assert!(html.contains("Deactivate"));
    }
}
