//! Favorites round trip against a local stub of the favorites endpoints
//!
//! The stub mirrors the server's semantics: adding an existing pair returns
//! the existing row, removing a missing pair is a 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use wayfare_common::{
    config::ClientConfig,
    models::{Attraction, Category, CategoryFilter, Favorite, FavoriteCreate},
};

use wayfare_client::ApiClient;

#[derive(Clone, Default)]
struct StubState {
    favorites: Arc<Mutex<Vec<Favorite>>>,
}

fn catalog_attraction(id: &str) -> Attraction {
    let now = Utc::now();
    Attraction {
        id: id.to_string(),
        name: format!("Attraction {id}"),
        location: Some("Kuching".to_string()),
        description: None,
        categories: vec![Category::Culture],
        latitude: Some(1.55),
        longitude: Some(110.34),
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

async fn add(
    State(state): State<StubState>,
    Json(request): Json<FavoriteCreate>,
) -> Json<Favorite> {
    let mut favorites = state.favorites.lock().unwrap();

    if let Some(existing) = favorites
        .iter()
        .find(|f| f.user_id == request.user_id && f.attraction_id == request.attraction_id)
    {
        return Json(existing.clone());
    }

    let row = Favorite {
        id: format!("fav-{}", favorites.len() + 1),
        user_id: request.user_id,
        attraction_id: request.attraction_id,
        created_at: Utc::now(),
    };
    favorites.push(row.clone());
    Json(row)
}

async fn list(
    State(state): State<StubState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Attraction>> {
    let favorites = state.favorites.lock().unwrap();
    let attractions = favorites
        .iter()
        .filter(|f| f.user_id == user_id)
        .map(|f| catalog_attraction(&f.attraction_id))
        .collect();
    Json(attractions)
}

async fn remove(
    State(state): State<StubState>,
    Path((user_id, attraction_id)): Path<(String, String)>,
) -> StatusCode {
    let mut favorites = state.favorites.lock().unwrap();
    let before = favorites.len();
    favorites.retain(|f| !(f.user_id == user_id && f.attraction_id == attraction_id));

    if favorites.len() < before {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/api/favorites", post(add))
        .route("/api/favorites/{user_id}", get(list))
        .route("/api/favorites/{user_id}/{attraction_id}", delete(remove))
        .with_state(StubState::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    let config = ClientConfig {
        api_base: format!("http://{}", addr),
        timeout_secs: 2,
    };
    let (_tx, rx) = watch::channel(None);
    ApiClient::new(&config, rx)
}

#[tokio::test]
async fn add_then_remove_leaves_listing_clean() {
    let addr = spawn_stub().await;
    let client = client_for(addr);

    assert!(client.list_favorites("user-1").await.is_empty());

    let added = client.add_favorite("user-1", "a-1").await.expect("add");
    assert_eq!(added.user_id, "user-1");
    assert_eq!(added.attraction_id, "a-1");

    let listed = client.list_favorites("user-1").await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "a-1");

    assert!(client.remove_favorite("user-1", "a-1").await);
    assert!(client.list_favorites("user-1").await.is_empty());

    // Removing an already-removed pair is a 404, surfaced as false
    assert!(!client.remove_favorite("user-1", "a-1").await);
}

#[tokio::test]
async fn double_add_yields_one_entry() {
    let addr = spawn_stub().await;
    let client = client_for(addr);

    let first = client.add_favorite("user-1", "a-1").await.expect("add");
    let second = client.add_favorite("user-1", "a-1").await.expect("re-add");

    assert_eq!(first.id, second.id);
    assert_eq!(client.list_favorites("user-1").await.len(), 1);
}

#[tokio::test]
async fn favorites_are_scoped_to_the_user() {
    let addr = spawn_stub().await;
    let client = client_for(addr);

    client.add_favorite("user-1", "a-1").await.expect("add");
    client.add_favorite("user-2", "a-2").await.expect("add");

    let listed = client.list_favorites("user-1").await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "a-1");

    // Listed favorites re-filter like any other attraction collection
    let filtered = wayfare_client::filter::by_category(
        &listed,
        CategoryFilter::Only(Category::Culture),
    );
    assert_eq!(filtered.len(), 1);
}
