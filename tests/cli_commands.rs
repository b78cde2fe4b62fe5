//! End-to-end tests of the `moviedesk` binary
//!
//! Each test runs in its own temporary directory with a file-backed session
//! so nothing leaks between runs or into the user's data directory.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{expired_jwt, valid_jwt};

const ENV_VARS: &[&str] = &[
    "MOVIEDESK_API_URL",
    "MOVIEDESK_API_BASE_URL",
    "MOVIEDESK_TIMEOUT_SECONDS",
    "MOVIEDESK_MOVIE_LOOKUP",
    "MOVIEDESK_OMDB_API_KEY",
    "MOVIEDESK_SESSION_BACKEND",
    "MOVIEDESK_SESSION_PATH",
    "MOVIEDESK_PASSWORD",
];

fn moviedesk(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("moviedesk").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .arg("--session-file")
        .arg(dir.path().join("session.json"));
    cmd
}

fn write_session(dir: &TempDir, token: &str, role: &str) {
    let body = json!({"auth_token": token, "user_role": role});
    std::fs::write(dir.path().join("session.json"), body.to_string()).unwrap();
}

#[test]
fn test_status_without_session() {
    let dir = TempDir::new().unwrap();
    moviedesk(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_status_with_live_session() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, &valid_jwt(), "ADMIN");
    moviedesk(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in"))
        .stdout(predicate::str::contains("ADMIN"));
}

#[test]
fn test_status_with_expired_session() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, &expired_jwt(), "USER");
    moviedesk(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session expired"));
}

#[test]
fn test_open_movies_redirects_to_login() {
    let dir = TempDir::new().unwrap();
    moviedesk(&dir)
        .args(["open", "/movies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Redirected to /login"));
}

#[test]
fn test_open_unknown_route_fails() {
    let dir = TempDir::new().unwrap();
    moviedesk(&dir)
        .args(["open", "/admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown route"));
}

#[test]
fn test_movies_list_requires_login() {
    let dir = TempDir::new().unwrap();
    moviedesk(&dir)
        .args(["movies", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("moviedesk login"));
}

#[test]
fn test_logout_removes_session_file() {
    let dir = TempDir::new().unwrap();
    write_session(&dir, &valid_jwt(), "USER");
    moviedesk(&dir).arg("logout").assert().success();
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    moviedesk(&dir)
        .args(["--api-url", "ftp://example.test", "status"])
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_list_movies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": valid_jwt(), "role": "ADMIN"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/movie/getAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Id": 1, "Title": "Heat", "Year": "1995"},
            {"Id": 2, "Title": "Heat", "Year": "1995"}
        ])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let api_url = format!("{}/api", server.uri());

    moviedesk(&dir)
        .args(["--api-url", &api_url, "login", "-u", "alice"])
        .env("MOVIEDESK_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"));
    assert!(dir.path().join("session.json").exists());

    moviedesk(&dir)
        .args(["--api-url", &api_url, "movies", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Heat\""))
        .stdout(predicate::str::contains("\"id\": 2").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_bad_credentials_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    moviedesk(&dir)
        .args(["--api-url", &format!("{}/api", server.uri())])
        .args(["login", "-u", "alice", "-p", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
    assert!(!dir.path().join("session.json").exists());
}
