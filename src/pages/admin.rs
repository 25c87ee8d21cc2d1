//! Admin dashboard: platform counters, user management, admin creation, and
//! the all-users history with search, export, and charts.

use leptos::prelude::*;

use crate::components::history_table::HistoryTable;
use crate::components::insights_panel::InsightsPanel;
use crate::components::notification::{Notification, Notifier};
use crate::components::pagination::Pagination;
use crate::download;
use crate::error::ApiError;
use crate::insights::{self, HistoryFilter, SubjectPolicy, UserFilter};
use crate::models::{AdminStats, HistoryRecord, NewAdmin, Tally, UserAccount};
use crate::session::{use_session, SessionContext};
use crate::tasks::{TaskSet, TaskSlot};

#[derive(Clone, Copy)]
struct Dashboard {
    stats: RwSignal<Option<AdminStats>>,
    top_roles: RwSignal<Vec<Tally>>,
    trend: RwSignal<Vec<Tally>>,
    users: RwSignal<Vec<UserAccount>>,
}

impl Dashboard {
    fn new() -> Self {
        Self {
            stats: RwSignal::new(None),
            top_roles: RwSignal::new(Vec::new()),
            trend: RwSignal::new(Vec::new()),
            users: RwSignal::new(Vec::new()),
        }
    }

    /// Refresh counters, tallies, and the user list. A failed part keeps its
    /// previous value; the others still update.
    fn reload(self, session: SessionContext, notifier: Notifier, slot: &TaskSlot) {
        let client = session.client();
        slot.spawn(async move {
            let overview = client.admin_overview().await;
            let mut errors: Vec<ApiError> = Vec::new();
            if let Some(stats) = keep(overview.stats, &mut errors) {
                self.stats.set(Some(stats));
            }
            if let Some(top_roles) = keep(overview.top_roles, &mut errors) {
                self.top_roles.set(top_roles);
            }
            if let Some(trend) = keep(overview.trend, &mut errors) {
                self.trend.set(trend);
            }
            if let Some(users) = keep(overview.users, &mut errors) {
                self.users.set(users);
            }
            // A rejected token outranks the other failures.
            let worst = errors
                .iter()
                .position(ApiError::is_unauthorized)
                .unwrap_or(0);
            if worst < errors.len() {
                super::report_error(session, notifier, errors.swap_remove(worst));
            }
        });
    }
}

fn keep<T>(result: Result<T, ApiError>, errors: &mut Vec<ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("dashboard load failed: {}", e);
            errors.push(e);
            None
        }
    }
}

fn tally_list(title: &'static str, empty: &'static str, items: RwSignal<Vec<Tally>>) -> impl IntoView {
    view! {
        <section class="card">
            <h3>{title}</h3>
            {move || {
                let rows = items.get();
                if rows.is_empty() {
                    return view! { <p class="status-text">{empty}</p> }.into_any();
                }
                view! {
                    <ul class="tally-list">
                        {rows
                            .into_iter()
                            .map(|(label, count)| view! {
                                <li><span>{label}</span><span class="tally-count">{count.to_string()}</span></li>
                            })
                            .collect::<Vec<_>>()}
                    </ul>
                }
                .into_any()
            }}
        </section>
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = use_session();
    let config = session.config();
    let page_size = config.page_size;
    let notifier = Notifier::new(&config);
    let dashboard = Dashboard::new();

    let history = RwSignal::new(Vec::<HistoryRecord>::new());
    let search = RwSignal::new(String::new());
    let user_filter = RwSignal::new(UserFilter::All);
    let page = RwSignal::new(1usize);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (creating, set_creating) = signal(false);

    let dashboard_task = TaskSlot::scoped();
    let history_task = TaskSlot::scoped();
    let action_tasks = TaskSet::scoped();

    dashboard.reload(session, notifier, &dashboard_task);
    {
        let client = session.client();
        history_task.spawn(async move {
            match client.list_all_history().await {
                Ok(records) => history.set(records),
                Err(e) => super::report_error(session, notifier, e),
            }
        });
    }

    let filtered = Memo::new(move |_| {
        let filter = HistoryFilter {
            user: user_filter.get(),
            search: search.get(),
        };
        history.with(|records| insights::filter_records(records, &filter))
    });
    let users_in_history = Memo::new(move |_| history.with(|records| insights::unique_users(records)));
    let (pages, page_rows) = super::paged(filtered, page, page_size);

    let on_create = {
        let action_tasks = action_tasks.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let admin = NewAdmin {
                name: name.get().trim().to_string(),
                email: email.get().trim().to_string(),
                password: password.get(),
            };
            let client = session.client();
            set_creating.set(true);
            action_tasks.spawn(async move {
                match client.create_admin(&admin).await {
                    Ok(_) => {
                        notifier.success("Admin created successfully!");
                        name.set(String::new());
                        email.set(String::new());
                        password.set(String::new());
                    }
                    Err(e) => super::report_error(session, notifier, e),
                }
                set_creating.set(false);
            });
        }
    };

    let user_action = {
        let action_tasks = action_tasks.clone();
        let dashboard_task = dashboard_task.clone();
        Callback::new(move |(account, promote): (UserAccount, bool)| {
            let prompt = if promote {
                format!("Promote {} to admin?", account.user_email)
            } else {
                format!("Delete user {}? Their history is removed too.", account.user_email)
            };
            if !super::confirm(&prompt) {
                return;
            }
            let client = session.client();
            let dashboard_task = dashboard_task.clone();
            action_tasks.spawn(async move {
                let result = if promote {
                    client.promote_user(&account.user_id).await
                } else {
                    client.delete_user(&account.user_id).await
                };
                match result {
                    Ok(message) => {
                        let fallback = if promote { "User promoted." } else { "User deleted." };
                        notifier.success(message.unwrap_or_else(|| fallback.to_string()));
                        if !promote {
                            history.update(|records| records.retain(|r| !r.belongs_to(&account.user_id)));
                        }
                        dashboard.reload(session, notifier, &dashboard_task);
                    }
                    Err(e) => super::report_error(session, notifier, e),
                }
            });
        })
    };

    let clear_user = {
        let action_tasks = action_tasks.clone();
        Callback::new(move |record: HistoryRecord| {
            let Some(user_id) = record.user_id.clone() else {
                notifier.error("This record has no user.");
                return;
            };
            if !super::confirm("Are you sure you want to clear history?") {
                return;
            }
            let client = session.client();
            action_tasks.spawn(async move {
                match client.clear_user_history(&user_id).await {
                    Ok(()) => {
                        history.update(|records| records.retain(|r| !r.belongs_to(&user_id)));
                        notifier.success("User history cleared.");
                    }
                    Err(e) => super::report_error(session, notifier, e),
                }
            });
        })
    };

    let clear_all = {
        let action_tasks = action_tasks.clone();
        move |_| {
            if !super::confirm("Are you sure you want to clear ALL history?") {
                return;
            }
            let client = session.client();
            action_tasks.spawn(async move {
                match client.clear_all_history().await {
                    Ok(()) => {
                        history.set(Vec::new());
                        notifier.success("All history cleared.");
                    }
                    Err(e) => super::report_error(session, notifier, e),
                }
            });
        }
    };

    let export = move |_| {
        let result = filtered
            .with_untracked(|rows| insights::admin_csv(rows))
            .map_err(|e| e.to_string())
            .and_then(|csv| download::save_csv("history.csv", &csv));
        if let Err(e) = result {
            tracing::error!("export failed: {}", e);
            notifier.error("Export failed.");
        }
    };

    let stat_card = move |label: &'static str, value: fn(&AdminStats) -> u64| {
        view! {
            <div class="stat-card">
                <span class="stat-value">
                    {move || dashboard.stats.with(|s| s.as_ref().map(value).map(|v| v.to_string()).unwrap_or_else(|| "-".into()))}
                </span>
                <span class="stat-label">{label}</span>
            </div>
        }
    };

    let field = move |id: &'static str, placeholder: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <input
                id=id
                type=kind
                class="input"
                placeholder=placeholder
                required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="page admin-page">
            <Notification notifier=notifier />

            <div class="stat-grid">
                {stat_card("Users", |s| s.total_users)}
                {stat_card("Admins", |s| s.total_admins)}
                {stat_card("Predictions", |s| s.total_predictions)}
            </div>

            <div class="split">
                {tally_list("Top Predicted Roles", "No predictions yet.", dashboard.top_roles)}
                {tally_list("Predictions Over Time", "No predictions yet.", dashboard.trend)}
            </div>

            <div class="split">
                <section class="card">
                    <h3>"Create Admin"</h3>
                    <form class="auth-form" on:submit=on_create>
                        {field("admin-name", "Name", "text", name)}
                        {field("admin-email", "Email", "email", email)}
                        {field("admin-password", "Password", "password", password)}
                        <button type="submit" class="btn btn-primary" disabled=move || creating.get()>
                            {move || if creating.get() { "Creating..." } else { "Create Admin" }}
                        </button>
                    </form>
                </section>

                <section class="card">
                    <h3>"Users"</h3>
                    <table class="history-table">
                        <thead>
                            <tr><th>"Name"</th><th>"Email"</th><th>"Role"</th><th>"Actions"</th></tr>
                        </thead>
                        <tbody>
                            {move || {
                                dashboard
                                    .users
                                    .get()
                                    .into_iter()
                                    .map(|account| {
                                        let is_admin = account.is_admin();
                                        let role = account.role.map(|r| r.as_str()).unwrap_or("-");
                                        let to_promote = account.clone();
                                        let to_delete = account.clone();
                                        view! {
                                            <tr>
                                                <td>{account.user_name.clone()}</td>
                                                <td>{account.user_email.clone()}</td>
                                                <td>{role}</td>
                                                <td class="button-row">
                                                    {(!is_admin).then(|| view! {
                                                        <button
                                                            class="btn btn-small"
                                                            on:click=move |_| user_action.run((to_promote.clone(), true))
                                                        >
                                                            "Promote"
                                                        </button>
                                                    })}
                                                    <button
                                                        class="btn btn-small btn-danger"
                                                        on:click=move |_| user_action.run((to_delete.clone(), false))
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </section>
            </div>

            <section class="card">
                <div class="card-header">
                    <h3>"Prediction History"</h3>
                    <div class="button-row">
                        <button class="btn btn-small btn-danger" on:click=clear_all>"Clear All"</button>
                        <button class="btn btn-small btn-success" on:click=export>"Export CSV"</button>
                    </div>
                </div>
                <div class="filter-row">
                    <input
                        type="search"
                        class="input"
                        placeholder="Search by name, email, degree, or major"
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            search.set(event_target_value(&ev));
                            page.set(1);
                        }
                    />
                    <select
                        class="input input-small"
                        prop:value=move || user_filter.get().as_value()
                        on:change=move |ev| {
                            user_filter.set(UserFilter::from_value(&event_target_value(&ev)));
                            page.set(1);
                        }
                    >
                        <option value="all">"All Users"</option>
                        {move || {
                            users_in_history
                                .get()
                                .into_iter()
                                .map(|u| view! { <option value=u.id.clone()>{u.label()}</option> })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </div>
                <HistoryTable rows=page_rows show_user=true on_action=clear_user action_label="Clear" />
                <Pagination page=page pages=pages />
            </section>

            <InsightsPanel
                records=filtered
                group_source=history
                policy=SubjectPolicy::Leading
                radar_title="Peer Comparison (Your vs Others)"
            />
        </div>
    }
}
