//! Top navigation bar with the signed-in user and a logout button.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::session::use_session;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let (menu_open, set_menu_open) = signal(false);

    // Local state is cleared whatever the backend says.
    let logout = move |_| {
        let client = session.client();
        let navigate = navigate.clone();
        set_menu_open.set(false);
        spawn_local(async move {
            if let Err(e) = client.logout().await {
                tracing::warn!("logout request failed: {}", e);
            }
            session.sign_out();
            navigate("/login", Default::default());
        });
    };

    let user_label = move || {
        session
            .user()
            .filter(|u| !u.name.is_empty() || !u.email.is_empty())
            .map(|u| format!("{} ({})", u.name, u.email))
    };

    view! {
        <nav class="navbar">
            <div class="navbar-inner">
                <h1 class="navbar-brand">"Edu2 " <span class="navbar-brand-accent">"Job Prediction"</span></h1>

                {move || user_label().map(|label| view! { <div class="navbar-user">{label}</div> })}

                <button
                    class="navbar-toggle"
                    aria-label="toggle navigation"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "\u{2715}" } else { "\u{2630}" }}
                </button>

                <div class="navbar-links" class:open=move || menu_open.get()>
                    <A href="/">"Home"</A>
                    <A href="/profile">"Profile"</A>
                    <A href="/predict">"Predict"</A>
                    <A href="/history">"History"</A>
                    <Show when=move || session.is_admin()>
                        <A href="/admin">"Admin"</A>
                    </Show>
                    <button class="navbar-logout" on:click=logout>"Logout"</button>
                </div>
            </div>
        </nav>
    }
}

/// Shell for authenticated pages.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Navbar />
            <main class="content">{children()}</main>
        </div>
    }
}
