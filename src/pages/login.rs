use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::components::notification::{after_delay, Notification, Notifier};
use crate::models::Credentials;
use crate::session::use_session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let notifier = Notifier::new(&session.config());
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        let client = session.client();
        let navigate = navigate.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match client.login(&credentials).await {
                Ok(new_session) => {
                    session.sign_in(new_session);
                    notifier.success("Login successful!");
                    after_delay(notifier.success_ms(), move || navigate("/", Default::default()));
                }
                Err(e) => notifier.error(String::from(e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="page auth-page">
            <Notification notifier=notifier />
            <div class="auth-card">
                <h2>"Welcome to Edu2"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="login-email">"Email"</label>
                        <input
                            id="login-email"
                            type="email"
                            class="input"
                            placeholder="user@user.com"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="login-password">"Password"</label>
                        <input
                            id="login-password"
                            type="password"
                            class="input"
                            placeholder="Enter your password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-link"><A href="/reset-password">"Forgot Password?"</A></p>
                <p class="auth-link">"Don't have an account? " <A href="/register">"Register"</A></p>
            </div>
        </div>
    }
}
