//! Prediction history with filtering, export, and insight charts.
//!
//! Admins can switch between their own records and everyone's; the user
//! filter, per-row delete, and "clear all" only exist in the all-users view.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::history_table::HistoryTable;
use crate::components::insights_panel::InsightsPanel;
use crate::components::notification::{Notification, Notifier};
use crate::components::pagination::Pagination;
use crate::download;
use crate::insights::{self, HistoryFilter, SubjectPolicy, UserFilter};
use crate::models::HistoryRecord;
use crate::session::use_session;
use crate::tasks::{TaskSet, TaskSlot};

#[component]
pub fn HistoryPage() -> impl IntoView {
    let session = use_session();
    let config = session.config();
    let page_size = config.page_size;
    let notifier = Notifier::new(&config);
    let navigate = use_navigate();

    let history = RwSignal::new(Vec::<HistoryRecord>::new());
    let view_all = RwSignal::new(false);
    let user_filter = RwSignal::new(UserFilter::All);
    let page = RwSignal::new(1usize);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let is_admin = Memo::new(move |_| session.is_admin());
    let all_view = Memo::new(move |_| is_admin.get() && view_all.get());

    let load_task = TaskSlot::scoped();
    let action_tasks = TaskSet::scoped();

    // Reload whenever the view changes; a newer load supersedes an older one.
    Effect::new(move |_| {
        let all = all_view.get();
        let client = session.client();
        set_loading.set(true);
        set_error.set(None);
        load_task.spawn(async move {
            let result = if all {
                client.list_all_history().await
            } else {
                client.list_history().await
            };
            match result {
                Ok(records) => {
                    tracing::debug!(count = records.len(), all, "history loaded");
                    history.set(records);
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        session.expire();
                    }
                    history.set(Vec::new());
                    set_error.set(Some(e.into()));
                }
            }
            set_loading.set(false);
        });
    });

    let filter = Memo::new(move |_| HistoryFilter {
        user: if all_view.get() { user_filter.get() } else { UserFilter::All },
        search: String::new(),
    });
    let filtered = Memo::new(move |_| {
        let filter = filter.get();
        history.with(|records| insights::filter_records(records, &filter))
    });
    let users = Memo::new(move |_| history.with(|records| insights::unique_users(records)));
    let (pages, page_rows) = super::paged(filtered, page, page_size);

    let policy = Signal::derive(move || SubjectPolicy::MostRecentOwn {
        user_id: session.user().and_then(|u| u.id),
    });

    let toggle_view = move |_| {
        view_all.update(|all| *all = !*all);
        user_filter.set(UserFilter::All);
        page.set(1);
    };

    let clear_mine = {
        let action_tasks = action_tasks.clone();
        move |_| {
            if !super::confirm("Clear your history?") {
                return;
            }
            let client = session.client();
            action_tasks.spawn(async move {
                match client.clear_history().await {
                    Ok(()) => {
                        history.set(Vec::new());
                        page.set(1);
                        notifier.success("History cleared.");
                    }
                    Err(e) => super::report_error(session, notifier, e),
                }
            });
        }
    };

    let clear_all = {
        let action_tasks = action_tasks.clone();
        move |_| {
            if !super::confirm("Clear ALL history?") {
                return;
            }
            let client = session.client();
            action_tasks.spawn(async move {
                match client.clear_all_history().await {
                    Ok(()) => {
                        history.set(Vec::new());
                        page.set(1);
                        notifier.success("All history cleared.");
                    }
                    Err(e) => super::report_error(session, notifier, e),
                }
            });
        }
    };

    let delete_record = {
        let action_tasks = action_tasks.clone();
        Callback::new(move |record: HistoryRecord| {
            let Some(id) = record.id.clone() else {
                notifier.error("This record cannot be deleted.");
                return;
            };
            if !super::confirm("Delete this record?") {
                return;
            }
            let client = session.client();
            action_tasks.spawn(async move {
                match client.delete_history(&id).await {
                    Ok(()) => history.update(|records| records.retain(|r| r.id.as_deref() != Some(id.as_str()))),
                    Err(e) => super::report_error(session, notifier, e),
                }
            });
        })
    };

    let export = move |rows: Vec<HistoryRecord>, file_name: &'static str| {
        let result = insights::history_csv(&rows, all_view.get_untracked())
            .map_err(|e| e.to_string())
            .and_then(|csv| download::save_csv(file_name, &csv));
        if let Err(e) = result {
            tracing::error!("export failed: {}", e);
            notifier.error("Export failed.");
        }
    };

    view! {
        <div class="page history-page">
            <Notification notifier=notifier />
            <div class="card">
                <div class="card-header">
                    <h2>"Prediction History"</h2>
                    <div class="button-row">
                        <button class="btn btn-small" on:click=move |_| navigate("/", Default::default())>
                            "\u{2190} Home"
                        </button>
                        <Show when=move || !all_view.get() && history.with(|h| !h.is_empty())>
                            <button class="btn btn-small btn-danger" on:click=clear_mine.clone()>"Clear My History"</button>
                        </Show>
                        <Show when=move || is_admin.get()>
                            <button class="btn btn-small btn-secondary" on:click=toggle_view>
                                {move || if view_all.get() { "My History" } else { "All Users" }}
                            </button>
                        </Show>
                        <Show when=move || all_view.get() && history.with(|h| !h.is_empty())>
                            <button class="btn btn-small btn-danger" on:click=clear_all.clone()>"Clear All History"</button>
                        </Show>
                        <Show when=move || page_rows.with(|r| !r.is_empty())>
                            <button
                                class="btn btn-small btn-success"
                                on:click=move |_| export(page_rows.get_untracked(), "current_page_history.csv")
                            >
                                "Download Current Page"
                            </button>
                        </Show>
                        <Show when=move || filtered.with(|r| !r.is_empty())>
                            <button
                                class="btn btn-small btn-primary"
                                on:click=move |_| export(filtered.get_untracked(), "all_filtered_history.csv")
                            >
                                "Download All Filtered"
                            </button>
                        </Show>
                    </div>
                </div>

                <Show when=move || loading.get()>
                    <p class="status-text">"Loading..."</p>
                </Show>
                {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}

                <Show when=move || all_view.get() && users.with(|u| !u.is_empty())>
                    <div class="filter-row">
                        <label for="history-user-filter">"Filter:"</label>
                        <select
                            id="history-user-filter"
                            class="input input-small"
                            prop:value=move || user_filter.get().as_value()
                            on:change=move |ev| {
                                user_filter.set(UserFilter::from_value(&event_target_value(&ev)));
                                page.set(1);
                            }
                        >
                            <option value="all">"All Users"</option>
                            {move || {
                                users
                                    .get()
                                    .into_iter()
                                    .map(|u| view! { <option value=u.id.clone()>{u.label()}</option> })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                    </div>
                </Show>

                {move || {
                    if filtered.with(Vec::is_empty) {
                        return (!loading.get())
                            .then(|| view! { <p class="status-text">"No history found."</p> })
                            .into_any();
                    }
                    let on_action = all_view.get().then_some(delete_record);
                    match on_action {
                        Some(cb) => view! {
                            <HistoryTable rows=page_rows show_user=all_view on_action=cb action_label="Delete" />
                        }
                        .into_any(),
                        None => view! { <HistoryTable rows=page_rows show_user=all_view /> }.into_any(),
                    }
                }}
                <Pagination page=page pages=pages />
            </div>

            <Show when=move || filtered.with(|r| !r.is_empty())>
                <InsightsPanel records=filtered group_source=filtered policy=policy />
            </Show>
        </div>
    }
}
