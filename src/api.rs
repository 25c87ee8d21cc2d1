//! Typed client for the prediction backend.
//!
//! Every endpoint the UI talks to goes through [`ApiClient`], so status
//! mapping (transport failure, 401, `{error}` bodies) is decided in one place.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::models::{
    Ack, AdminStats, Credentials, HistoryRecord, NewAdmin, OptionLists, PasswordReset,
    PredictionResponse, Profile, Registration, Session, Tally, UserAccount,
};

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Pull the `error` field out of a failure body, if there is one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let text = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Admin dashboard data. Each part is fetched concurrently and succeeds or
/// fails on its own.
#[derive(Debug)]
pub struct AdminOverview {
    pub stats: Result<AdminStats, ApiError>,
    pub top_roles: Result<Vec<Tally>, ApiError>,
    pub trend: Result<Vec<Tally>, ApiError>,
    pub users: Result<Vec<UserAccount>, ApiError>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the bearer token used for authenticated calls.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        self.http.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Send a request and decode the reply.
    ///
    /// `authenticated` controls whether a 401 means "session expired" or is
    /// an ordinary failure (a bad password on `/login` also answers 401).
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        authenticated: bool,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            error!("request failed: {}", e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED && authenticated {
            warn!("backend rejected the session token");
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
            warn!(status = status.as_u16(), "backend returned an error: {}", message);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        parse_body(&body)
    }

    // -- Accounts --

    pub async fn register(&self, registration: &Registration) -> Result<Option<String>, ApiError> {
        let req = self.request(Method::POST, "/register").json(registration);
        let ack: Ack = self.dispatch(req, false, "Registration failed!").await?;
        Ok(ack.message)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let req = self.request(Method::POST, "/login").json(credentials);
        let session: Session = self.dispatch(req, false, "Invalid credentials").await?;
        if !session.has_token() {
            return Err(ApiError::Server {
                status: 200,
                message: "Invalid credentials".to_string(),
            });
        }
        info!(user = %session.user.email, "logged in");
        Ok(session)
    }

    /// Ask the backend to drop its cookie-side session. Callers clear local
    /// state regardless of the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let mut req = self.request(Method::POST, "/logout");
        #[cfg(target_arch = "wasm32")]
        {
            req = req.fetch_credentials_include();
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let _: IgnoredAny = self.dispatch(req, false, "Logout failed").await?;
        Ok(())
    }

    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<Option<String>, ApiError> {
        let req = self.request(Method::POST, "/reset_password").json(reset);
        let ack: Ack = self.dispatch(req, false, "Password reset failed!").await?;
        Ok(ack.message)
    }

    // -- Profile --

    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        let req = self.authed(Method::GET, "/profile")?;
        self.dispatch(req, true, "Failed to load profile").await
    }

    /// Overwrite the stored profile wholesale.
    pub async fn save_profile(&self, profile: &Profile) -> Result<Option<String>, ApiError> {
        let req = self.authed(Method::POST, "/profile")?.json(profile);
        let ack: Ack = self.dispatch(req, true, "Error saving profile. Please try again.").await?;
        Ok(ack.message)
    }

    pub async fn option_lists(&self) -> Result<OptionLists, ApiError> {
        let req = self.request(Method::GET, "/unique_values.json");
        self.dispatch(req, false, "Failed to load options").await
    }

    // -- Prediction --

    pub async fn predict(&self, form: &Profile) -> Result<PredictionResponse, ApiError> {
        let req = self.authed(Method::POST, "/predict")?.json(form);
        self.dispatch(req, true, "Prediction failed").await
    }

    // -- History --

    pub async fn list_history(&self) -> Result<Vec<HistoryRecord>, ApiError> {
        let req = self.authed(Method::GET, "/history")?;
        self.dispatch(req, true, "Failed to fetch history").await
    }

    pub async fn list_all_history(&self) -> Result<Vec<HistoryRecord>, ApiError> {
        let req = self.authed(Method::GET, "/history/all")?;
        self.dispatch(req, true, "Failed to fetch history").await
    }

    pub async fn delete_history(&self, id: &str) -> Result<(), ApiError> {
        let req = self.authed(Method::DELETE, &format!("/history/{}", id))?;
        let _: IgnoredAny = self.dispatch(req, true, "Error deleting record").await?;
        Ok(())
    }

    /// Clear the logged-in user's own history.
    pub async fn clear_history(&self) -> Result<(), ApiError> {
        let req = self.authed(Method::DELETE, "/history/clear")?;
        let _: IgnoredAny = self.dispatch(req, true, "Error clearing history").await?;
        Ok(())
    }

    pub async fn clear_user_history(&self, user_id: &str) -> Result<(), ApiError> {
        let req = self.authed(Method::DELETE, &format!("/history/clear/{}", user_id))?;
        let _: IgnoredAny = self.dispatch(req, true, "Error clearing history").await?;
        Ok(())
    }

    pub async fn clear_all_history(&self) -> Result<(), ApiError> {
        let req = self.authed(Method::DELETE, "/history/clear_all")?;
        let _: IgnoredAny = self.dispatch(req, true, "Error clearing all history").await?;
        Ok(())
    }

    // -- Admin --

    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<Option<String>, ApiError> {
        let req = self.authed(Method::POST, "/admin/create")?.json(admin);
        let ack: Ack = self.dispatch(req, true, "Failed to create admin").await?;
        Ok(ack.message)
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        let req = self.authed(Method::GET, "/admin/stats")?;
        self.dispatch(req, true, "Failed to load statistics").await
    }

    pub async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        let req = self.authed(Method::GET, "/admin/users")?;
        self.dispatch(req, true, "Failed to load users").await
    }

    pub async fn promote_user(&self, user_id: &str) -> Result<Option<String>, ApiError> {
        let req = self.authed(Method::POST, &format!("/admin/users/{}/promote", user_id))?;
        let ack: Ack = self.dispatch(req, true, "Failed to promote user").await?;
        Ok(ack.message)
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<Option<String>, ApiError> {
        let req = self.authed(Method::DELETE, &format!("/admin/users/{}", user_id))?;
        let ack: Ack = self.dispatch(req, true, "Failed to delete user").await?;
        Ok(ack.message)
    }

    /// Most frequent top-ranked roles, most common first.
    pub async fn top_roles(&self) -> Result<Vec<Tally>, ApiError> {
        let req = self.authed(Method::GET, "/admin/top_roles")?;
        self.dispatch(req, true, "Failed to load role statistics").await
    }

    /// Predictions per calendar day, oldest first.
    pub async fn predictions_over_time(&self) -> Result<Vec<Tally>, ApiError> {
        let req = self.authed(Method::GET, "/admin/predictions_over_time")?;
        self.dispatch(req, true, "Failed to load prediction trend").await
    }

    pub async fn admin_overview(&self) -> AdminOverview {
        let (stats, top_roles, trend, users) = futures::join!(
            self.admin_stats(),
            self.top_roles(),
            self.predictions_over_time(),
            self.list_users()
        );
        AdminOverview {
            stats,
            top_roles,
            trend,
            users,
        }
    }
}
