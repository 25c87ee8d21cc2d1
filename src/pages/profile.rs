//! Profile page, plus the academic-profile form it shares with Predict.

use leptos::prelude::*;

use crate::components::notification::{Notification, Notifier};
use crate::components::select::{ChoiceSelect, MultiSelect};
use crate::models::{OptionLists, Profile};
use crate::session::{use_session, SessionContext};
use crate::tasks::TaskSlot;

/// Parse a number input; blank or malformed text means "not given".
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn number_text(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Form state for the six profile fields.
#[derive(Clone, Copy)]
pub struct ProfileFields {
    pub degree: RwSignal<String>,
    pub major: RwSignal<String>,
    pub cgpa: RwSignal<String>,
    pub experience: RwSignal<String>,
    pub skills: RwSignal<Vec<String>>,
    pub certifications: RwSignal<String>,
}

impl ProfileFields {
    pub fn new() -> Self {
        Self {
            degree: RwSignal::new(String::new()),
            major: RwSignal::new(String::new()),
            cgpa: RwSignal::new(String::new()),
            experience: RwSignal::new(String::new()),
            skills: RwSignal::new(Vec::new()),
            certifications: RwSignal::new(String::new()),
        }
    }

    pub fn fill(&self, profile: &Profile) {
        self.degree.set(profile.degree.clone());
        self.major.set(profile.major.clone());
        self.cgpa.set(number_text(profile.cgpa));
        self.experience.set(number_text(profile.experience));
        self.skills.set(profile.skills.clone());
        self.certifications.set(profile.certifications.clone());
    }

    pub fn snapshot(&self) -> Profile {
        Profile {
            degree: self.degree.get_untracked().trim().to_string(),
            major: self.major.get_untracked().trim().to_string(),
            cgpa: parse_number(&self.cgpa.get_untracked()),
            experience: parse_number(&self.experience.get_untracked()),
            skills: self.skills.get_untracked(),
            certifications: self.certifications.get_untracked().trim().to_string(),
        }
    }
}

/// Load the option vocabulary into `options`. Failures leave the lists
/// empty; the form still accepts stored values.
pub fn load_options(session: SessionContext, slot: &TaskSlot, options: RwSignal<OptionLists>) {
    let client = session.client();
    slot.spawn(async move {
        match client.option_lists().await {
            Ok(lists) => options.set(lists),
            Err(e) => tracing::error!("failed to load option lists: {}", e),
        }
    });
}

#[component]
pub fn ProfileFieldsView(
    fields: ProfileFields,
    options: RwSignal<OptionLists>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    let degrees = Signal::derive(move || options.with(|o| o.degrees.clone()));
    let majors = Signal::derive(move || options.with(|o| o.majors.clone()));
    let skills = Signal::derive(move || options.with(|o| o.skills.clone()));

    let number_input = move |id: &'static str, label: &'static str, step: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    id=id
                    type="number"
                    min="0"
                    step=step
                    class="input"
                    disabled=move || disabled.get()
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="form-grid">
            <ChoiceSelect id="field-degree" label="Degree" options=degrees value=fields.degree disabled=disabled />
            <ChoiceSelect id="field-major" label="Major" options=majors value=fields.major disabled=disabled />
            {number_input("field-cgpa", "CGPA", "0.01", fields.cgpa)}
            {number_input("field-experience", "Experience (yrs)", "1", fields.experience)}
            <div class="form-span">
                <MultiSelect id="field-skills" label="Skills" options=skills selected=fields.skills disabled=disabled />
            </div>
            <div class="form-group form-span">
                <label for="field-certifications">"Certifications"</label>
                <textarea
                    id="field-certifications"
                    class="input"
                    rows="2"
                    disabled=move || disabled.get()
                    prop:value=move || fields.certifications.get()
                    on:input=move |ev| fields.certifications.set(event_target_value(&ev))
                ></textarea>
            </div>
        </div>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let notifier = Notifier::new(&session.config());
    let fields = ProfileFields::new();
    let options = RwSignal::new(OptionLists::default());
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);

    let options_task = TaskSlot::scoped();
    let profile_task = TaskSlot::scoped();
    let save_task = TaskSlot::scoped();

    load_options(session, &options_task, options);

    {
        let client = session.client();
        profile_task.spawn(async move {
            match client.get_profile().await {
                Ok(profile) => fields.fill(&profile),
                Err(e) => super::report_error(session, notifier, e),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let profile = fields.snapshot();
        let client = session.client();
        set_saving.set(true);
        save_task.spawn(async move {
            match client.save_profile(&profile).await {
                Ok(message) => {
                    notifier.success(message.unwrap_or_else(|| "Profile saved successfully!".to_string()));
                    set_editing.set(false);
                }
                Err(e) => super::report_error(session, notifier, e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="page profile-page">
            <Notification notifier=notifier />
            <div class="card">
                <div class="card-header">
                    <h2>"User Profile"</h2>
                    <Show when=move || !editing.get()>
                        <button class="btn btn-small" on:click=move |_| set_editing.set(true)>"Edit"</button>
                    </Show>
                </div>
                <form on:submit=on_submit>
                    <ProfileFieldsView fields=fields options=options disabled=Signal::derive(move || !editing.get()) />
                    <Show when=move || editing.get()>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save Profile" }}
                        </button>
                    </Show>
                </form>
            </div>
        </div>
    }
}
