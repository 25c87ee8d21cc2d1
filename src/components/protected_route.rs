use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::guard;
use crate::models::Role;
use crate::session::use_session;

/// Renders `children` only for a session the guard accepts; otherwise
/// redirects. Re-evaluated whenever the session changes, so a logout or an
/// expired token sends the user away from the page immediately.
#[component]
pub fn ProtectedRoute(
    /// Roles allowed to see the page. Omit to admit any logged-in user.
    #[prop(optional)]
    roles: Option<Vec<Role>>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();

    move || {
        let current = session.current();
        let access = guard::evaluate(current.as_ref(), roles.as_deref());
        match access.redirect_path() {
            None => children().into_any(),
            Some(path) => {
                tracing::debug!(?access, path, "route guard redirect");
                view! { <Redirect path=path /> }.into_any()
            }
        }
    }
}

