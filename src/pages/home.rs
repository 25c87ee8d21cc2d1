use leptos::prelude::*;
use leptos_router::components::A;

use crate::session::use_session;

struct Feature {
    title: &'static str,
    description: &'static str,
    href: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        title: "Profile",
        description: "View and edit your personal details",
        href: "/profile",
    },
    Feature {
        title: "Predict",
        description: "Get AI-powered career predictions",
        href: "/predict",
    },
    Feature {
        title: "History",
        description: "View your past predictions & insights",
        href: "/history",
    },
];

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session
            .user()
            .map(|u| u.name)
            .filter(|n| !n.trim().is_empty())
            .map(|n| format!("Welcome back, {}", n))
            .unwrap_or_else(|| "Welcome to Edu2".to_string())
    };

    view! {
        <div class="page home-page">
            <header class="hero">
                <h1>{greeting}</h1>
                <p>"Predict your future | Unlock opportunities | Achieve success"</p>
            </header>
            <div class="feature-grid">
                {FEATURES
                    .iter()
                    .map(|f| {
                        view! {
                            <div class="feature-card">
                                <A href=f.href>
                                    <h2>{f.title}</h2>
                                    <p>{f.description}</p>
                                </A>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
                <Show when=move || session.is_admin()>
                    <div class="feature-card">
                        <A href="/admin">
                            <h2>"Admin"</h2>
                            <p>"Manage users and review platform-wide insights"</p>
                        </A>
                    </div>
                </Show>
            </div>
        </div>
    }
}
