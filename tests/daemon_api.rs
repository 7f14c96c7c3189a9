//! Typed daemon operations against a mock daemon.

mod common;

use common::MockDaemon;
use mockito::Matcher;
use motion_console::{AuthEvent, ErrorKind};
use serde_json::{json, Map, Value};

#[tokio::test]
async fn test_cameras_are_unwrapped() {
    let mut daemon = MockDaemon::new().await;
    let _mock = daemon
        .mock_json(
            "GET",
            "/0/api/cameras",
            200,
            r#"{"cameras":[{"id":1,"name":"Front door","url":"http://pi:8081/1/"},{"id":2,"name":"Garage","url":"http://pi:8081/2/"}]}"#,
            1,
        )
        .await;

    let cameras = daemon.client().cameras().await.unwrap();

    assert_eq!(cameras.len(), 2);
    assert_eq!(cameras[0].name, "Front door");
    assert_eq!(cameras[1].id, 2);
}

#[tokio::test]
async fn test_config_caches_csrf_token() {
    let mut daemon = MockDaemon::new().await;
    let _config = daemon.mock_config_token("0123abcd", 1).await;

    let config = daemon.client().config().await.unwrap();

    assert_eq!(config.csrf_token.as_deref(), Some("0123abcd"));
    assert_eq!(config.version, "5.0.0");
    assert_eq!(daemon.context.csrf_token().as_deref(), Some("0123abcd"));
}

#[tokio::test]
async fn test_daemon_config_and_client_settings_are_separate() {
    let mut daemon = MockDaemon::new().await;
    let _config = daemon.mock_config_token("tok", 1).await;

    let client = daemon.client();
    let settings = client.client_config();
    let daemon_config = client.config().await.unwrap();

    assert_eq!(settings.max_retries, 1);
    assert_eq!(settings.timeout, std::time::Duration::from_secs(5));
    assert_eq!(daemon_config.version, "5.0.0");
}

#[tokio::test]
async fn test_config_with_empty_token_keeps_cached_one() {
    let mut daemon = MockDaemon::new().await;
    daemon.context.set_csrf_token("existing");
    let _config = daemon
        .mock_json("GET", "/0/api/config", 200, r#"{"csrf_token":"","version":"5.0.0"}"#, 1)
        .await;

    daemon.client().config().await.unwrap();

    assert_eq!(daemon.context.csrf_token().as_deref(), Some("existing"));
}

#[tokio::test]
async fn test_pictures_and_movies() {
    let mut daemon = MockDaemon::new().await;
    let _pictures = daemon
        .mock_json(
            "GET",
            "/1/api/media/pictures",
            200,
            r#"{"pictures":[{"id":42,"filename":"01-20240101120000.jpg","path":"/var/lib/motion/01-20240101120000.jpg","date":"20240101","time":"12:00:00","size":48213}]}"#,
            1,
        )
        .await;
    let _movies = daemon
        .mock_json("GET", "/1/api/media/movies", 200, r#"{"movies":[]}"#, 1)
        .await;

    let client = daemon.client();
    let pictures = client.pictures(1).await.unwrap();
    let movies = client.movies(1).await.unwrap();

    assert_eq!(pictures[0].id, 42);
    assert_eq!(pictures[0].time.as_deref(), Some("12:00:00"));
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_delete_reports_daemon_refusal() {
    let mut daemon = MockDaemon::new().await;
    let _mock = daemon
        .mock_json(
            "DELETE",
            "/1/api/media/picture/42",
            200,
            r#"{"error":"Delete action is disabled"}"#,
            1,
        )
        .await;

    let err = daemon.client().delete_picture(1, 42).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Daemon);
    assert_eq!(err.user_message(), "Delete action is disabled");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_delete_movie_success() {
    let mut daemon = MockDaemon::new().await;
    daemon.context.set_csrf_token("tok");
    let mock = daemon
        .server
        .mock("DELETE", "/2/api/media/movie/17")
        .match_header("x-csrf-token", "tok")
        .with_status(200)
        .with_body(r#"{"success":true,"deleted_id":17}"#)
        .expect(1)
        .create_async()
        .await;

    let result = daemon.client().delete_movie(2, 17).await.unwrap();

    assert!(result.success);
    assert_eq!(result.deleted_id, 17);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_config_param_sends_parameter_in_query() {
    let mut daemon = MockDaemon::new().await;
    let mock = daemon
        .server
        .mock("POST", Matcher::Regex(r"^/1/config/set".to_string()))
        .match_query(Matcher::UrlEncoded(
            "text_left".to_string(),
            "Front door & yard".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .expect(1)
        .create_async()
        .await;

    let value = daemon
        .client()
        .set_config_param(1, "text_left", "Front door & yard")
        .await
        .unwrap();

    assert_eq!(value, json!({"status": "ok"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_patch_config_sends_changes_and_reports_refusals() {
    let mut daemon = MockDaemon::new().await;
    let mock = daemon
        .server
        .mock("PATCH", "/0/api/config")
        .match_body(Matcher::Json(json!({"threshold": "2000", "sql_log_picture": "on"})))
        .with_status(200)
        .with_body(
            r#"{"status":"ok","applied":[
                {"param":"threshold","old":"1500","new":"2000","hot_reload":true},
                {"param":"sql_log_picture","old":"","new":"on","error":"SQL parameters cannot be modified via web interface (security restriction)"}
            ],"summary":{"total":2,"success":1,"errors":1}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let mut changes = Map::new();
    changes.insert("threshold".to_string(), Value::from("2000"));
    changes.insert("sql_log_picture".to_string(), Value::from("on"));
    let result = daemon.client().patch_config(0, &changes).await.unwrap();

    assert_eq!(result.summary.success, 1);
    let rejected: Vec<_> = result.rejected().map(|(param, _)| param).collect();
    assert_eq!(rejected, vec!["sql_log_picture"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_reboot_disabled_is_daemon_error() {
    let mut daemon = MockDaemon::new().await;
    let _mock = daemon
        .mock_json(
            "POST",
            "/0/api/system/reboot",
            200,
            r#"{"error":"Power control actions are disabled"}"#,
            1,
        )
        .await;

    let err = daemon.client().reboot().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Daemon);
    assert_eq!(err.message(), "Power control actions are disabled");
}

#[tokio::test]
async fn test_shutdown_success() {
    let mut daemon = MockDaemon::new().await;
    let _mock = daemon
        .mock_json(
            "POST",
            "/0/api/system/shutdown",
            200,
            r#"{"success":true,"operation":"shutdown","message":"System will shut down in 2 seconds"}"#,
            1,
        )
        .await;

    let result = daemon.client().shutdown().await.unwrap();

    assert!(result.success);
    assert_eq!(result.operation, "shutdown");
}

#[tokio::test]
async fn test_system_status_decodes_sections() {
    let mut daemon = MockDaemon::new().await;
    let _mock = daemon
        .mock_json(
            "GET",
            "/0/api/system/status",
            200,
            r#"{"temperature":{"celsius":51.5,"fahrenheit":124.7},
                "uptime":{"seconds":90061,"days":1,"hours":1},
                "memory":{"total":1000,"used":400,"free":600,"available":650,"percent":40.0},
                "version":"5.0.0"}"#,
            1,
        )
        .await;

    let status = daemon.client().system_status().await.unwrap();

    assert_eq!(status.temperature.unwrap().celsius, 51.5);
    assert_eq!(status.memory.unwrap().used, 400);
    assert!(status.disk.is_none());
}

#[tokio::test]
async fn test_temperature_unavailable_is_daemon_error() {
    let mut daemon = MockDaemon::new().await;
    let _mock = daemon
        .mock_json(
            "GET",
            "/0/api/system/temperature",
            200,
            r#"{"error":"Temperature not available"}"#,
            1,
        )
        .await;

    let err = daemon.client().temperature().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Daemon);
}

#[tokio::test]
async fn test_login_stores_credentials_for_later_requests() {
    let mut daemon = MockDaemon::new().await;
    let probe = daemon
        .server
        .mock("GET", "/0/api/auth/me")
        .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
        .with_status(200)
        .with_body(r#"{"authenticated":true,"auth_method":"basic"}"#)
        .expect(1)
        .create_async()
        .await;
    let cameras = daemon
        .server
        .mock("GET", "/0/api/cameras")
        .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
        .with_status(200)
        .with_body(r#"{"cameras":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = daemon.client();
    let status = client.login("admin", "secret").await.unwrap();
    client.cameras().await.unwrap();

    assert!(status.authenticated);
    assert_eq!(status.auth_method.as_deref(), Some("basic"));
    assert_eq!(
        daemon.context.credentials().map(|c| c.username.clone()),
        Some("admin".to_string())
    );
    probe.assert_async().await;
    cameras.assert_async().await;
}

#[tokio::test]
async fn test_login_rejected_publishes_no_event() {
    let mut daemon = MockDaemon::new().await;
    let mut events = daemon.context.subscribe_auth_events();
    let probe = daemon
        .mock_json("GET", "/0/api/auth/me", 401, "", 1)
        .await;

    let err = daemon.client().login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.message(), "Invalid username or password");
    assert!(daemon.context.credentials().is_none());
    assert!(events.try_recv().is_err());
    probe.assert_async().await;
}

#[tokio::test]
async fn test_login_server_error_is_not_retried() {
    let mut daemon = MockDaemon::new().await;
    let probe = daemon
        .mock_json("GET", "/0/api/auth/me", 503, "", 1)
        .await;

    let err = daemon.client().login("admin", "secret").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.message(), "Authentication failed (503)");
    probe.assert_async().await;
}

#[tokio::test]
async fn test_logout_drops_credentials() {
    let mut daemon = MockDaemon::new().await;
    let mut events = daemon.context.subscribe_auth_events();
    let _probe = daemon
        .mock_json("GET", "/0/api/auth/me", 200, r#"{"authenticated":true}"#, 1)
        .await;
    let anonymous = daemon
        .server
        .mock("GET", "/0/api/cameras")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let client = daemon.client();
    client.login("admin", "secret").await.unwrap();
    client.logout();
    let err = client.cameras().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(events.try_recv().unwrap(), AuthEvent { status: 401 });
    anonymous.assert_async().await;
}
