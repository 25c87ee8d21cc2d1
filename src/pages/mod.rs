pub mod admin;
pub mod history;
pub mod home;
pub mod login;
pub mod predict;
pub mod profile;
pub mod register;
pub mod reset_password;

use leptos::prelude::*;

use crate::components::notification::Notifier;
use crate::error::ApiError;
use crate::insights;
use crate::models::HistoryRecord;
use crate::session::SessionContext;

/// Ask the user to confirm a destructive action.
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Surface a failed call. A rejected token ends the session, which makes the
/// route guard redirect to the login page.
pub(crate) fn report_error(session: SessionContext, notifier: Notifier, err: ApiError) {
    if err.is_unauthorized() {
        session.expire();
    }
    notifier.error(String::from(err));
}

/// Page count and current-page rows over `filtered`. The page signal is
/// pulled back inside the range when the list shrinks.
pub(crate) fn paged(
    filtered: Memo<Vec<HistoryRecord>>,
    page: RwSignal<usize>,
    page_size: usize,
) -> (Memo<usize>, Memo<Vec<HistoryRecord>>) {
    let pages = Memo::new(move |_| insights::page_count(filtered.with(Vec::len), page_size));
    let rows = Memo::new(move |_| {
        let current = insights::clamp_page(page.get(), pages.get());
        filtered.with(|rows| insights::paginate(rows, current, page_size).to_vec())
    });
    Effect::new(move |_| {
        let clamped = insights::clamp_page(page.get(), pages.get());
        if clamped != page.get_untracked() {
            page.set(clamped);
        }
    });
    (pages, rows)
}
