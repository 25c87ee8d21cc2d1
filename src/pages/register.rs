use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::components::notification::{after_delay, Notification, Notifier};
use crate::error::ApiError;
use crate::models::Registration;
use crate::session::use_session;

/// Checks done before any request is sent.
pub fn check_passwords(password: &str, confirm: &str) -> Result<(), ApiError> {
    if password != confirm {
        return Err(ApiError::Validation("Passwords do not match!".to_string()));
    }
    Ok(())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let notifier = Notifier::new(&session.config());
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(e) = check_passwords(&password.get(), &confirm_password.get()) {
            notifier.error(String::from(e));
            return;
        }
        let registration = Registration {
            name: name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            phone: phone.get().trim().to_string(),
            password: password.get(),
        };
        let client = session.client();
        let navigate = navigate.clone();
        spawn_local(async move {
            match client.register(&registration).await {
                Ok(_) => {
                    tracing::info!("account registered");
                    notifier.success("Registration successful!");
                    after_delay(notifier.success_ms(), move || navigate("/login", Default::default()));
                }
                Err(e) => notifier.error(String::from(e)),
            }
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>, required: bool| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    id=id
                    type=kind
                    class="input"
                    required=required
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
                <h2>"Register an Account"</h2>
                <form class="auth-form" on:submit=on_submit>
                    {field("register-name", "Full Name", "text", name, true)}
                    {field("register-email", "Email", "email", email, true)}
                    {field("register-phone", "Phone", "tel", phone, false)}
                    <div class="form-row">
                        {field("register-password", "Password", "password", password, true)}
                        {field("register-confirm", "Confirm", "password", confirm_password, true)}
                    </div>
                    <button type="submit" class="btn btn-primary">"Register"</button>
                </form>
                <p class="auth-link">"Already have an account? " <A href="/login">"Login"</A></p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_passwords_rejected() {
        let err = check_passwords("secret1", "secret2").unwrap_err();
        assert_eq!(String::from(err), "Passwords do not match!");
    }

    #[test]
    fn test_matching_passwords_pass() {
        assert!(check_passwords("secret", "secret").is_ok());
    }
}
