//! Selection widgets fed by the option vocabulary.

use leptos::prelude::*;

/// Options for a single-value select, each paired with whether it is the
/// current value. A stored value missing from the vocabulary is kept
/// selectable at the front.
pub fn choice_entries(options: &[String], current: &str) -> Vec<(String, bool)> {
    let mut choices = options.to_vec();
    if !current.is_empty() && !choices.iter().any(|c| c == current) {
        choices.insert(0, current.to_string());
    }
    choices
        .into_iter()
        .map(|opt| {
            let selected = opt == current;
            (opt, selected)
        })
        .collect()
}

/// Native single-value `<select>` with an empty "choose" entry.
#[component]
pub fn ChoiceSelect(
    id: &'static str,
    label: &'static str,
    options: Signal<Vec<String>>,
    value: RwSignal<String>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                class="input"
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"Select..."</option>
                {move || {
                    value.with(|current| options.with(|opts| choice_entries(opts, current)))
                        .into_iter()
                        .map(|(opt, selected)| {
                            let label = opt.clone();
                            view! { <option value=opt selected=selected>{label}</option> }
                        })
                        .collect::<Vec<_>>()
                }}
            </select>
        </div>
    }
}

/// Entries of `options` not yet chosen and matching `query`.
pub fn remaining_options(options: &[String], chosen: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| !chosen.contains(o))
        .filter(|o| query.is_empty() || o.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Searchable multi-value picker.
///
/// Chosen values render as removable chips; typing filters the remaining
/// options and clicking one adds it.
#[component]
pub fn MultiSelect(
    id: &'static str,
    label: &'static str,
    options: Signal<Vec<String>>,
    selected: RwSignal<Vec<String>>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    let (is_open, set_is_open) = signal(false);
    let (search_text, set_search_text) = signal(String::new());

    let add = move |val: String| {
        selected.update(|chosen| {
            if !chosen.contains(&val) {
                chosen.push(val);
            }
        });
        set_search_text.set(String::new());
    };

    let remove = move |val: String| {
        selected.update(|chosen| chosen.retain(|c| *c != val));
    };

    let dropdown_id = format!("{}-dropdown", id);

    view! {
        <div class="form-group multi-select" class:open=move || is_open.get()>
            <label for=id>{label}</label>
            <div class="ms-chips">
                {move || {
                    selected
                        .get()
                        .into_iter()
                        .map(|val| {
                            let to_remove = val.clone();
                            let removable = !disabled.get();
                            view! {
                                <span class="ms-chip">
                                    {val}
                                    {removable.then(|| view! {
                                        <button
                                            type="button"
                                            class="ms-chip-remove"
                                            title="Remove"
                                            on:click=move |_| remove(to_remove.clone())
                                        >
                                            "\u{2715}"
                                        </button>
                                    })}
                                </span>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
            <input
                id=id
                type="text"
                class="input ms-search"
                placeholder="Type to search..."
                disabled=move || disabled.get()
                prop:value=move || search_text.get()
                on:focus=move |_| set_is_open.set(true)
                on:input=move |ev| {
                    set_search_text.set(event_target_value(&ev));
                    set_is_open.set(true);
                }
                on:blur=move |_| {
                    // Options are picked on mousedown, which fires before blur.
                    super::notification::after_delay(200, move || {
                        let _ = set_is_open.try_set(false);
                    });
                }
            />
            {move || {
                if !is_open.get() || disabled.get() {
                    return view! { <div style="display:none"></div> }.into_any();
                }
                let remaining = remaining_options(
                    &options.get(),
                    &selected.get(),
                    &search_text.get(),
                );
                if remaining.is_empty() {
                    return view! {
                        <div class="ms-dropdown">
                            <div class="ms-empty">"No matching options"</div>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="ms-dropdown" id=dropdown_id.clone()>
                        {remaining
                            .into_iter()
                            .map(|opt| {
                                let val = opt.clone();
                                view! {
                                    <div class="ms-option" on:mousedown=move |_| add(val.clone())>
                                        {opt}
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_choice_entries_mark_current_value() {
        let options = strings(&["B.Tech", "M.Tech"]);
        assert_eq!(
            choice_entries(&options, "M.Tech"),
            vec![("B.Tech".to_string(), false), ("M.Tech".to_string(), true)]
        );
        assert!(choice_entries(&options, "").iter().all(|(_, selected)| !selected));
    }

    #[test]
    fn test_choice_entries_keep_unlisted_value() {
        let options = strings(&["B.Tech"]);
        let entries = choice_entries(&options, "B.Arch");
        assert_eq!(entries[0], ("B.Arch".to_string(), true));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_remaining_excludes_chosen() {
        let options = strings(&["Python", "SQL", "Rust"]);
        let chosen = strings(&["SQL"]);
        assert_eq!(remaining_options(&options, &chosen, ""), strings(&["Python", "Rust"]));
    }

    #[test]
    fn test_remaining_filters_case_insensitively() {
        let options = strings(&["Python", "PyTorch", "SQL"]);
        assert_eq!(remaining_options(&options, &[], "py"), strings(&["Python", "PyTorch"]));
        assert!(remaining_options(&options, &[], "java").is_empty());
    }
}
