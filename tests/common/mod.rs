use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use wiremock::MockServer;

use moviedesk::config::{ApiConfig, MovieLookup};
use moviedesk::session::LoginResponse;
use moviedesk::{ApiClient, AuthService, MemorySessionStore, MovieService, SessionContext};

#[allow(dead_code)]
pub fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"alice","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, body)
}

#[allow(dead_code)]
pub fn valid_jwt() -> String {
    jwt_with_exp((Utc::now() + Duration::hours(1)).timestamp())
}

#[allow(dead_code)]
pub fn expired_jwt() -> String {
    jwt_with_exp((Utc::now() - Duration::hours(1)).timestamp())
}

#[allow(dead_code)]
pub fn api_config(server: &MockServer, lookup: MovieLookup) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_seconds: 5,
        movie_lookup: lookup,
    }
}

/// Fresh in-memory session, optionally already logged in.
#[allow(dead_code)]
pub fn session(token: Option<String>, role: Option<&str>) -> SessionContext {
    let ctx = SessionContext::new(Arc::new(MemorySessionStore::new()));
    if token.is_some() {
        ctx.begin(&LoginResponse {
            token,
            role: role.map(str::to_string),
        })
        .expect("failed to seed session");
    }
    ctx
}

#[allow(dead_code)]
pub fn auth_service(server: &MockServer, session: SessionContext) -> AuthService {
    let client = ApiClient::new(&api_config(server, MovieLookup::Path), session)
        .expect("failed to build client");
    AuthService::new(client)
}

#[allow(dead_code)]
pub fn movie_service(server: &MockServer, session: SessionContext, lookup: MovieLookup) -> MovieService {
    let client =
        ApiClient::new(&api_config(server, lookup), session).expect("failed to build client");
    MovieService::new(client, lookup)
}
