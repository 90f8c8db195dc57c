//! Session store flow against a local stub of the auth endpoints

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use wayfare_common::{
    config::ClientConfig,
    models::{SessionHandshake, UserProfile},
};

use wayfare_client::{MemoryStorage, SessionStorage, SessionStore};

const GOOD_CODE: &str = "good-code";
const ISSUED_TOKEN: &str = "wf_stubtoken";

fn stub_profile() -> UserProfile {
    UserProfile {
        id: "user-1".to_string(),
        email: "traveler@example.com".to_string(),
        name: "Traveler".to_string(),
        picture: Some("https://example.com/p.png".to_string()),
    }
}

#[derive(Deserialize)]
struct ExchangeQuery {
    session_id: String,
}

async fn exchange(
    Query(query): Query<ExchangeQuery>,
) -> Result<Json<SessionHandshake>, StatusCode> {
    if query.session_id != GOOD_CODE {
        return Err(StatusCode::BAD_GATEWAY);
    }

    Ok(Json(SessionHandshake {
        token: ISSUED_TOKEN.to_string(),
        user: stub_profile(),
        expires_at: Utc::now() + Duration::days(7),
    }))
}

async fn me(headers: HeaderMap) -> Result<Json<UserProfile>, StatusCode> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ISSUED_TOKEN));

    if authorized {
        Ok(Json(stub_profile()))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/api/auth/session", post(exchange))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    addr
}

fn store_for(addr: SocketAddr, storage: Arc<MemoryStorage>) -> SessionStore {
    let config = ClientConfig {
        api_base: format!("http://{}", addr),
        timeout_secs: 2,
    };
    SessionStore::new(&config, storage)
}

#[tokio::test]
async fn login_verify_logout_round_trip() {
    let addr = spawn_stub().await;
    let storage = Arc::new(MemoryStorage::new());
    let store = store_for(addr, storage.clone());
    let subscription = store.subscribe();

    assert!(store.token().is_none());

    let user = store.login(GOOD_CODE).await.expect("login");
    assert_eq!(user.id, "user-1");
    assert_eq!(store.token().as_deref(), Some(ISSUED_TOKEN));
    assert!(storage.load().is_some());
    assert!(subscription.borrow().is_some());

    assert!(store.verify().await);
    assert!(store.current_user().is_some());

    store.logout().await;
    assert!(store.token().is_none());
    assert!(store.current_user().is_none());
    assert!(storage.load().is_none());
    assert!(subscription.borrow().is_none());
}

#[tokio::test]
async fn failed_login_leaves_prior_session_untouched() {
    let addr = spawn_stub().await;
    let storage = Arc::new(MemoryStorage::new());
    let store = store_for(addr, storage.clone());

    store.login(GOOD_CODE).await.expect("initial login");
    let token_before = store.token();

    let err = store.login("bogus-code").await.unwrap_err();
    assert!(matches!(
        err,
        wayfare_client::ClientError::Status { code: 502 }
    ));

    assert_eq!(store.token(), token_before);
    assert!(storage.load().is_some());
}

#[tokio::test]
async fn restore_with_stale_token_clears_session() {
    let addr = spawn_stub().await;
    let storage = Arc::new(MemoryStorage::new());

    storage.save(&SessionHandshake {
        token: "wf_stale".to_string(),
        user: stub_profile(),
        expires_at: Utc::now() + Duration::days(1),
    });

    let store = store_for(addr, storage.clone());
    assert!(!store.restore().await);
    assert!(store.token().is_none());
    assert!(storage.load().is_none());
}

#[tokio::test]
async fn restore_with_valid_token_refreshes_profile() {
    let addr = spawn_stub().await;
    let storage = Arc::new(MemoryStorage::new());

    storage.save(&SessionHandshake {
        token: ISSUED_TOKEN.to_string(),
        user: UserProfile {
            name: "Stale Name".to_string(),
            ..stub_profile()
        },
        expires_at: Utc::now() + Duration::days(1),
    });

    let store = store_for(addr, storage.clone());
    assert!(store.restore().await);
    assert_eq!(store.current_user().map(|u| u.name), Some("Traveler".to_string()));
}
