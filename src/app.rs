use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::navbar::Layout;
use crate::components::protected_route::ProtectedRoute;
use crate::config::AppConfig;
use crate::models::Role;
use crate::pages::admin::AdminPage;
use crate::pages::history::HistoryPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::predict::PredictPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;
use crate::pages::reset_password::ResetPasswordPage;
use crate::session::SessionContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Restore whatever session this tab already holds before any route
    // guard runs.
    provide_context(SessionContext::hydrate(config));

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/register") view=RegisterPage />
                <Route path=path!("/reset-password") view=ResetPasswordPage />
                <Route
                    path=path!("/")
                    view=|| view! { <ProtectedRoute><Layout><HomePage /></Layout></ProtectedRoute> }
                />
                <Route
                    path=path!("/home")
                    view=|| view! { <Redirect path="/" /> }
                />
                <Route
                    path=path!("/profile")
                    view=|| view! { <ProtectedRoute><Layout><ProfilePage /></Layout></ProtectedRoute> }
                />
                <Route
                    path=path!("/predict")
                    view=|| view! { <ProtectedRoute><Layout><PredictPage /></Layout></ProtectedRoute> }
                />
                <Route
                    path=path!("/history")
                    view=|| view! { <ProtectedRoute><Layout><HistoryPage /></Layout></ProtectedRoute> }
                />
                <Route
                    path=path!("/admin")
                    view=|| view! {
                        <ProtectedRoute roles=vec![Role::Admin]>
                            <Layout><AdminPage /></Layout>
                        </ProtectedRoute>
                    }
                />
            </Routes>
        </Router>
    }
}
