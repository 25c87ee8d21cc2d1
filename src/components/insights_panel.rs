use leptos::prelude::*;

use super::charts::{PieChart, RadarChart, StackedBarChart};
use crate::insights::{self, SubjectPolicy};
use crate::models::HistoryRecord;

/// Trend, domain, and peer charts over a record set.
///
/// `group_source` supplies the degree groups for the bar axis and the pie
/// selector; it may be wider than `records` so both survive filtering.
#[component]
pub fn InsightsPanel(
    #[prop(into)] records: Signal<Vec<HistoryRecord>>,
    #[prop(into)] group_source: Signal<Vec<HistoryRecord>>,
    #[prop(into)] policy: Signal<SubjectPolicy>,
    #[prop(optional)] radar_title: Option<&'static str>,
) -> impl IntoView {
    let selected_group = RwSignal::new(String::new());
    let groups = Memo::new(move |_| group_source.with(|r| insights::group_options(r)));

    // Fall back to the first group whenever the current choice disappears.
    Effect::new(move |_| {
        let options = groups.get();
        let current = selected_group.get_untracked();
        if !options.contains(&current) {
            selected_group.set(options.first().cloned().unwrap_or_default());
        }
    });

    // Bars span every group in `group_source` so filtering keeps the x axis.
    let stacked = Signal::derive(move || {
        let groups = groups.get();
        records.with(|r| insights::stacked_over_groups(r, &groups))
    });
    let pie = Signal::derive(move || {
        let group = selected_group.get();
        records.with(|r| insights::role_distribution(r, &group))
    });
    let radar = Signal::derive(move || {
        let policy = policy.get();
        records.with(|r| insights::compare_with_peers(r, &policy))
    });

    view! {
        <div class="insights-grid">
            <section class="card chart-card">
                <h3>"Education \u{2192} Job Trends"</h3>
                <StackedBarChart series=stacked />
            </section>
            <section class="card chart-card">
                <div class="card-header">
                    <h3>"Job Domains (by Degree)"</h3>
                    <select
                        class="input input-small"
                        prop:value=move || selected_group.get()
                        on:change=move |ev| selected_group.set(event_target_value(&ev))
                    >
                        {move || {
                            groups
                                .get()
                                .into_iter()
                                .map(|g| {
                                    let value = g.clone();
                                    let label = g.clone();
                                    let selected = move || selected_group.with(|s| *s == value);
                                    view! { <option value=g selected=selected>{label}</option> }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </div>
                <PieChart slices=pie />
            </section>
            <section class="card chart-card">
                <h3>{radar_title.unwrap_or("Skill Radar")}</h3>
                <RadarChart comparison=radar />
            </section>
        </div>
    }
}
