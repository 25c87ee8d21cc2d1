use edu2job::api::ApiClient;
use edu2job::error::{ApiError, CONNECTION_ERROR};
use edu2job::models::{Credentials, Profile, Role};
use mockito::Matcher;
use serde_json::json;

fn credentials() -> Credentials {
    Credentials {
        email: "asha@example.org".into(),
        password: "secret".into(),
    }
}

#[tokio::test]
async fn test_login_returns_session() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "token": "tok-123",
        "user": {"id": 2, "name": "Asha Rao", "email": "asha@example.org", "role": "admin"}
    })
    .to_string();
    let mock = server
        .mock("POST", "/login")
        .match_body(Matcher::PartialJson(json!({"email": "asha@example.org"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let session = ApiClient::new(server.url())
        .login(&credentials())
        .await
        .expect("login should succeed");

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.user.id.as_deref(), Some("2"));
    assert_eq!(session.user.role, Some(Role::Admin));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bad_password_is_not_session_expiry() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/login")
        .with_status(401)
        .with_body(r#"{"error": "Invalid email or password"}"#)
        .create_async()
        .await;

    let err = ApiClient::new(server.url())
        .login(&credentials())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Server {
            status: 401,
            message: "Invalid email or password".into()
        }
    );
    assert!(!err.is_unauthorized());
}

#[tokio::test]
async fn test_login_without_token_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/login")
        .with_status(200)
        .with_body(r#"{"message": "ok"}"#)
        .create_async()
        .await;

    let err = ApiClient::new(server.url())
        .login(&credentials())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_expired_token_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/history")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(r#"{"error": "Token expired"}"#)
        .create_async()
        .await;

    let err = ApiClient::new(server.url())
        .with_token(Some("stale".into()))
        .list_history()
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert!(err.is_unauthorized());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_field_passed_through() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/register")
        .with_status(400)
        .with_body(r#"{"error": "Email already exists"}"#)
        .create_async()
        .await;

    let registration = edu2job::models::Registration {
        name: "Asha".into(),
        email: "asha@example.org".into(),
        phone: "9999999999".into(),
        password: "secret".into(),
    };
    let err = ApiClient::new(server.url())
        .register(&registration)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");
}

#[tokio::test]
async fn test_server_error_without_body_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/history/clear_all")
        .with_status(500)
        .create_async()
        .await;

    let err = ApiClient::new(server.url())
        .with_token(Some("tok".into()))
        .clear_all_history()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error clearing all history");
}

#[tokio::test]
async fn test_predict_sends_profile_and_parses_ranking() {
    let mut server = mockito::Server::new_async().await;
    let reply = json!({
        "prediction": "Data Scientist",
        "confidence": 0.82,
        "top_predictions": [
            {"role": "Data Scientist", "confidence": 0.82},
            {"role": "ML Engineer", "confidence": "0.10"}
        ]
    })
    .to_string();
    let mock = server
        .mock("POST", "/predict")
        .match_header("authorization", "Bearer tok")
        .match_body(Matcher::PartialJson(json!({
            "degree": "B.Tech",
            "skills": "Python, SQL"
        })))
        .with_status(200)
        .with_body(reply)
        .create_async()
        .await;

    let form = Profile {
        degree: "B.Tech".into(),
        major: "Computer Science".into(),
        cgpa: Some(8.6),
        experience: Some(1.0),
        skills: vec!["Python".into(), "SQL".into()],
        certifications: String::new(),
    };
    let response = ApiClient::new(server.url())
        .with_token(Some("tok".into()))
        .predict(&form)
        .await
        .expect("predict should succeed");

    assert_eq!(response.prediction, "Data Scientist");
    assert_eq!(response.top_predictions.len(), 2);
    assert_eq!(response.top_predictions[1].confidence, 0.10);
    assert!(response.explanation.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/history/12")
        .with_status(200)
        .create_async()
        .await;

    ApiClient::new(server.url())
        .with_token(Some("tok".into()))
        .delete_history("12")
        .await
        .expect("delete should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_admin_tallies_parsed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/admin/top_roles")
        .with_status(200)
        .with_body(r#"[["Data Scientist", 4], ["Backend Developer", 2]]"#)
        .create_async()
        .await;

    let tallies = ApiClient::new(server.url())
        .with_token(Some("tok".into()))
        .top_roles()
        .await
        .expect("tallies");
    assert_eq!(tallies[0], ("Data Scientist".to_string(), 4));
    assert_eq!(tallies.len(), 2);
}

#[tokio::test]
async fn test_authenticated_call_without_token_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/profile")
        .expect(0)
        .create_async()
        .await;

    let err = ApiClient::new(server.url()).get_profile().await.unwrap_err();
    assert_eq!(err, ApiError::NotAuthenticated);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let err = ApiClient::new("http://127.0.0.1:1")
        .option_lists()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.to_string(), CONNECTION_ERROR);
}

#[tokio::test]
async fn test_admin_overview_parts_load_independently() {
    let mut server = mockito::Server::new_async().await;
    let _stats = server
        .mock("GET", "/admin/stats")
        .with_status(500)
        .with_body(r#"{"error": "stats unavailable"}"#)
        .create_async()
        .await;
    let _roles = server
        .mock("GET", "/admin/top_roles")
        .with_status(200)
        .with_body(r#"[["Data Scientist", 3]]"#)
        .create_async()
        .await;
    let _trend = server
        .mock("GET", "/admin/predictions_over_time")
        .with_status(200)
        .with_body(r#"[["2026-09-02", 1], ["2026-09-03", 2]]"#)
        .create_async()
        .await;
    let users = server
        .mock("GET", "/admin/users")
        .with_status(200)
        .with_body(r#"[{"user_id": 2, "user_name": "Asha Rao", "user_email": "asha@example.org", "role": "admin"}]"#)
        .create_async()
        .await;

    let overview = ApiClient::new(server.url())
        .with_token(Some("tok".into()))
        .admin_overview()
        .await;

    assert_eq!(overview.stats.unwrap_err().to_string(), "stats unavailable");
    assert_eq!(overview.top_roles.unwrap().len(), 1);
    assert_eq!(overview.trend.unwrap().len(), 2);
    let accounts = overview.users.expect("user list should still load");
    assert_eq!(accounts[0].user_id, "2");
    assert!(accounts[0].is_admin());
    users.assert_async().await;
}
