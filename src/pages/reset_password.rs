use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use super::register::check_passwords;
use crate::components::notification::{after_delay, Notification, Notifier};
use crate::models::PasswordReset;
use crate::session::use_session;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let session = use_session();
    let notifier = Notifier::new(&session.config());
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(e) = check_passwords(&new_password.get(), &confirm_password.get()) {
            notifier.error(String::from(e));
            return;
        }
        let reset = PasswordReset {
            email: email.get().trim().to_string(),
            phone: phone.get().trim().to_string(),
            new_password: new_password.get(),
        };
        let client = session.client();
        let navigate = navigate.clone();
        spawn_local(async move {
            match client.reset_password(&reset).await {
                Ok(_) => {
                    // Any session held in this tab is stale after a reset.
                    session.sign_out();
                    notifier.success("Password reset successful! Please login.");
                    after_delay(notifier.success_ms(), move || navigate("/login", Default::default()));
                }
                Err(e) => notifier.error(String::from(e)),
            }
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    id=id
                    type=kind
                    class="input"
                    required
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="page auth-page">
            <Notification notifier=notifier />
            <div class="auth-card">
                <h2>"Reset Password"</h2>
                <form class="auth-form" on:submit=on_submit>
                    {field("reset-email", "Registered Email", "email", email)}
                    {field("reset-phone", "Registered Phone", "tel", phone)}
                    <div class="form-row">
                        {field("reset-password", "New Password", "password", new_password)}
                        {field("reset-confirm", "Confirm", "password", confirm_password)}
                    </div>
                    <button type="submit" class="btn btn-primary">"Reset Password"</button>
                </form>
                <p class="auth-link"><A href="/login">"Back to Login"</A></p>
            </div>
        </div>
    }
}
