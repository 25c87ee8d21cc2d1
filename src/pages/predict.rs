use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::profile::{load_options, ProfileFields, ProfileFieldsView};
use crate::components::notification::{Notification, Notifier};
use crate::insights::percent;
use crate::models::{OptionLists, Profile};
use crate::prediction::{ConfidenceBand, PredictionOutcome};
use crate::session::use_session;
use crate::tasks::TaskSlot;

#[component]
fn PredictionPanel(outcome: PredictionOutcome) -> impl IntoView {
    let headline_pct = outcome.percent();
    let rows = outcome
        .ranked
        .into_iter()
        .map(|row| {
            let pct = percent(row.confidence);
            let bar_class = format!("bar-fill {}", row.band().css_class());
            view! {
                <li class="ranked-row">
                    <div class="ranked-head">
                        <span>{row.role}</span>
                        <span class="ranked-pct">{format!("{}%", pct)}</span>
                    </div>
                    <div class="bar">
                        <div class=bar_class style={format!("width:{}%", pct)}></div>
                    </div>
                    <p class="ranked-explanation">{row.explanation}</p>
                </li>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="card prediction-panel">
            <h3>"Predicted Job Role"</h3>
            <div class="prediction-headline">
                <p class="prediction-role">{outcome.headline}</p>
                <p>{format!("Confidence: {}%", headline_pct)}</p>
                <div class="bar">
                    <div
                        class={format!("bar-fill {}", ConfidenceBand::of(outcome.confidence).css_class())}
                        style={format!("width:{}%", headline_pct)}
                    ></div>
                </div>
            </div>
            {outcome.server_explanation.map(|text| view! { <p class="server-explanation">{text}</p> })}
            <h4>"Top Predictions"</h4>
            <ul class="ranked-list">{rows}</ul>
        </div>
    }
}

#[component]
pub fn PredictPage() -> impl IntoView {
    let session = use_session();
    let notifier = Notifier::new(&session.config());
    let navigate = use_navigate();
    let fields = ProfileFields::new();
    let options = RwSignal::new(OptionLists::default());
    let outcome = RwSignal::new(None::<PredictionOutcome>);
    let (predicting, set_predicting) = signal(false);

    let options_task = TaskSlot::scoped();
    let profile_task = TaskSlot::scoped();
    let predict_task = TaskSlot::scoped();

    load_options(session, &options_task, options);

    let pull_from_profile = move |_| {
        let client = session.client();
        if !client.has_token() {
            notifier.error("Please login first.");
            return;
        }
        profile_task.spawn(async move {
            match client.get_profile().await {
                Ok(profile) if profile == Profile::default() => {
                    notifier.error("No profile details found.");
                }
                Ok(profile) => {
                    fields.fill(&profile);
                    notifier.success("Profile loaded successfully!");
                }
                Err(e) => super::report_error(session, notifier, e),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let client = session.client();
        if !client.has_token() {
            notifier.error("Please login first.");
            navigate("/login", Default::default());
            return;
        }
        let form = fields.snapshot();
        set_predicting.set(true);
        predict_task.spawn(async move {
            match client.predict(&form).await {
                Ok(response) => {
                    outcome.set(Some(PredictionOutcome::from_response(response, &form)));
                    notifier.success("Prediction completed!");
                }
                Err(e) => {
                    outcome.set(None);
                    super::report_error(session, notifier, e);
                }
            }
            set_predicting.set(false);
        });
    };

    view! {
        <div class="page predict-page">
            <Notification notifier=notifier />
            <div class="split">
                <div class="card">
                    <h2>"Job Role Prediction"</h2>
                    <form on:submit=on_submit>
                        <ProfileFieldsView fields=fields options=options />
                        <div class="button-row">
                            <button type="button" class="btn btn-secondary" on:click=pull_from_profile>
                                "Pull From Profile"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=move || predicting.get()>
                                {move || if predicting.get() { "Predicting..." } else { "Predict" }}
                            </button>
                        </div>
                    </form>
                </div>
                {move || outcome.get().map(|o| view! { <PredictionPanel outcome=o /> })}
            </div>
        </div>
    }
}
