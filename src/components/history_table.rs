use leptos::prelude::*;

use crate::insights::{format_date, percent};
use crate::models::HistoryRecord;

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

/// One page of prediction records.
#[component]
pub fn HistoryTable(
    #[prop(into)] rows: Signal<Vec<HistoryRecord>>,
    /// Show the user name and email columns.
    #[prop(into)]
    show_user: Signal<bool>,
    /// Per-row action button, e.g. delete.
    #[prop(optional)]
    on_action: Option<Callback<HistoryRecord>>,
    #[prop(optional)] action_label: &'static str,
) -> impl IntoView {
    view! {
        <div class="table-wrap">
            <table class="history-table">
                <thead>
                    <tr>
                        <Show when=move || show_user.get()>
                            <th>"User"</th>
                            <th>"Email"</th>
                        </Show>
                        <th>"Date"</th>
                        <th>"Degree"</th>
                        <th>"Major"</th>
                        <th>"CGPA"</th>
                        <th>"Exp"</th>
                        <th>"Skills"</th>
                        <th>"Certs"</th>
                        <th>"Predicted Role"</th>
                        <th>"Top 3 Suggestions"</th>
                        {on_action.map(|_| view! { <th>"Actions"</th> })}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let show_user = show_user.get();
                        rows.get()
                            .into_iter()
                            .map(|record| {
                                let suggestions = record
                                    .top_three()
                                    .into_iter()
                                    .map(|p| view! { <li>{format!("{} ({}%)", or_dash(&p.role), percent(p.confidence))}</li> })
                                    .collect::<Vec<_>>();
                                let skills = if record.skills.is_missing() {
                                    "-".to_string()
                                } else {
                                    or_dash(&record.skills.joined(", "))
                                };
                                let action = on_action.map(|cb| {
                                    let target = record.clone();
                                    view! {
                                        <td>
                                            <button
                                                class="btn btn-small btn-danger"
                                                on:click=move |_| cb.run(target.clone())
                                            >
                                                {action_label}
                                            </button>
                                        </td>
                                    }
                                });
                                view! {
                                    <tr>
                                        {show_user.then(|| view! {
                                            <td>{or_dash(&record.user_name)}</td>
                                            <td>{or_dash(&record.user_email)}</td>
                                        })}
                                        <td>{format_date(&record.date)}</td>
                                        <td>{or_dash(&record.degree)}</td>
                                        <td>{or_dash(&record.major)}</td>
                                        <td>{number_cell(record.cgpa)}</td>
                                        <td>{number_cell(record.experience)}</td>
                                        <td>{skills}</td>
                                        <td>{or_dash(&record.certifications)}</td>
                                        <td class="role-cell">{record.role_label().to_string()}</td>
                                        <td><ul class="suggestions">{suggestions}</ul></td>
                                        {action}
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </tbody>
            </table>
        </div>
    }
}
