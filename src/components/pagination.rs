use leptos::prelude::*;

/// Prev/next controls over a 1-based page signal. Hidden when there are no
/// pages; buttons disable at the bounds.
#[component]
pub fn Pagination(page: RwSignal<usize>, #[prop(into)] pages: Signal<usize>) -> impl IntoView {
    view! {
        <Show when=move || { pages.get() > 0 }>
            <div class="pagination">
                <button
                    class="btn btn-small"
                    disabled=move || page.get() <= 1
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Prev"
                </button>
                <span class="pagination-status">
                    {move || format!("Page {} of {}", page.get(), pages.get())}
                </span>
                <button
                    class="btn btn-small"
                    disabled=move || page.get() >= pages.get()
                    on:click=move |_| {
                        let last = pages.get_untracked();
                        page.update(|p| *p = (*p + 1).min(last.max(1)))
                    }
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}
