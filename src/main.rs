use edu2job::app::App;
use edu2job::config::AppConfig;
use edu2job::logging;
use leptos::prelude::*;

fn main() {
    let config = AppConfig::from_build_env();
    logging::init(&config);
    tracing::info!(api_url = %config.api_url, "starting edu2job");
    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
