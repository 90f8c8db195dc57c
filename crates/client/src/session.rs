//! Client session store
//!
//! Owns the whole authenticated state of the app: the opaque bearer token and
//! the profile it belongs to. The two are set and cleared only together, so a
//! subscriber can never observe a token without its profile or vice versa.
//!
//! Login is delegated: the store never sees credentials, only the one-time
//! code handed back by the external identity provider's redirect.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;
use wayfare_common::{
    config::ClientConfig,
    models::{SessionHandshake, UserProfile},
};

/// Errors surfaced by the SDK's fallible operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned status {code}")]
    Status { code: u16 },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("not authenticated")]
    Unauthenticated,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// The authenticated state as observed by subscribers. One value, swapped
/// atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub token: String,
    pub user: UserProfile,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl From<SessionHandshake> for AuthSnapshot {
    fn from(handshake: SessionHandshake) -> Self {
        Self {
            token: handshake.token,
            user: handshake.user,
            expires_at: handshake.expires_at,
        }
    }
}

impl AuthSnapshot {
    fn to_handshake(&self) -> SessionHandshake {
        SessionHandshake {
            token: self.token.clone(),
            user: self.user.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Where the session survives process restarts
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Option<SessionHandshake>;
    fn save(&self, session: &SessionHandshake);
    fn clear(&self);
}

/// JSON file under the platform config directory
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at `<config dir>/wayfare/session.json`; `None` when the
    /// platform has no config directory
    pub fn new() -> Option<Self> {
        let dir = dirs::config_dir()?.join("wayfare");
        Some(Self {
            path: dir.join("session.json"),
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Option<SessionHandshake> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session is unreadable; ignoring");
                None
            }
        }
    }

    fn save(&self, session: &SessionHandshake) {
        let result = (|| {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_vec(session).map_err(std::io::Error::other)?;
            std::fs::write(&self.path, json)
        })();

        if let Err(e) = result {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to persist session");
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %e, "Failed to remove persisted session");
            }
        }
    }
}

/// In-memory backend for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    session: Mutex<Option<SessionHandshake>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<SessionHandshake> {
        self.session.lock().ok()?.clone()
    }

    fn save(&self, session: &SessionHandshake) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = Some(session.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = None;
        }
    }
}

pub struct SessionStore {
    base_url: String,
    client: reqwest::Client,
    storage: Arc<dyn SessionStorage>,
    tx: watch::Sender<Option<AuthSnapshot>>,
}

impl SessionStore {
    pub fn new(config: &ClientConfig, storage: Arc<dyn SessionStorage>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        let (tx, _) = watch::channel(None);

        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            client,
            storage,
            tx,
        }
    }

    /// Observe authentication changes. The receiver always holds the latest
    /// snapshot, or `None` while unauthenticated.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSnapshot>> {
        self.tx.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.tx.borrow().as_ref().map(|s| s.user.clone())
    }

    /// Exchange a one-time code for a session. On failure the previous
    /// session, if any, is left untouched.
    pub async fn login(&self, one_time_code: &str) -> Result<UserProfile, ClientError> {
        #[derive(Serialize)]
        struct ExchangeQuery<'a> {
            session_id: &'a str,
        }

        let response = self
            .client
            .post(format!("{}/api/auth/session", self.base_url))
            .query(&ExchangeQuery {
                session_id: one_time_code,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(if status.as_u16() == 401 {
                ClientError::Unauthenticated
            } else {
                ClientError::Status {
                    code: status.as_u16(),
                }
            });
        }

        let handshake: SessionHandshake = response.json().await?;
        let snapshot = AuthSnapshot::from(handshake);

        self.storage.save(&snapshot.to_handshake());
        let user = snapshot.user.clone();
        self.tx.send_replace(Some(snapshot));

        tracing::info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    /// Probe the session against the server. Success refreshes the cached
    /// profile; any failure at all drops the local session.
    pub async fn verify(&self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        let result = async {
            let response = self
                .client
                .get(format!("{}/api/auth/me", self.base_url))
                .bearer_auth(&token)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ClientError::Status {
                    code: response.status().as_u16(),
                });
            }

            Ok::<UserProfile, ClientError>(response.json().await?)
        }
        .await;

        match result {
            Ok(profile) => {
                let updated = {
                    let current = self.tx.borrow();
                    current.as_ref().map(|snapshot| AuthSnapshot {
                        token: snapshot.token.clone(),
                        user: profile,
                        expires_at: snapshot.expires_at,
                    })
                };

                match updated {
                    Some(snapshot) => {
                        self.storage.save(&snapshot.to_handshake());
                        self.tx.send_replace(Some(snapshot));
                        true
                    }
                    // Logged out while the probe was in flight
                    None => false,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session verification failed; clearing session");
                self.clear();
                false
            }
        }
    }

    /// Invalidate the session remotely (best effort) and clear it locally
    pub async fn logout(&self) {
        if let Some(token) = self.token() {
            let result = self
                .client
                .post(format!("{}/api/auth/logout", self.base_url))
                .bearer_auth(&token)
                .send()
                .await;

            if let Err(e) = result {
                tracing::warn!(error = %e, "Remote logout failed; clearing locally anyway");
            }
        }

        self.clear();
    }

    /// Load a persisted session and immediately verify it against the server
    pub async fn restore(&self) -> bool {
        let Some(handshake) = self.storage.load() else {
            return false;
        };

        self.tx.send_replace(Some(AuthSnapshot::from(handshake)));
        self.verify().await
    }

    fn clear(&self) {
        self.storage.clear();
        self.tx.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_handshake() -> SessionHandshake {
        SessionHandshake {
            token: "wf_abc123".to_string(),
            user: UserProfile {
                id: "user-1".to_string(),
                email: "traveler@example.com".to_string(),
                name: "Traveler".to_string(),
                picture: None,
            },
            expires_at: Utc::now() + Duration::days(7),
        }
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().is_none());

        let session = sample_handshake();
        storage.save(&session);
        assert_eq!(storage.load().as_ref().map(|s| s.token.as_str()), Some("wf_abc123"));

        storage.clear();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_file_storage_ignores_corrupt_session() {
        let dir = std::env::temp_dir().join(format!("wayfare-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let storage = FileStorage::with_path(path.clone());
        assert!(storage.load().is_none());

        storage.save(&sample_handshake());
        assert!(storage.load().is_some());

        storage.clear();
        assert!(storage.load().is_none());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_token_and_profile_move_together() {
        let config = ClientConfig::default();
        let store = SessionStore::new(&config, Arc::new(MemoryStorage::new()));

        assert!(store.token().is_none());
        assert!(store.current_user().is_none());

        store.tx.send_replace(Some(AuthSnapshot::from(sample_handshake())));
        assert!(store.token().is_some());
        assert!(store.current_user().is_some());

        store.clear();
        assert!(store.token().is_none());
        assert!(store.current_user().is_none());
    }
}
