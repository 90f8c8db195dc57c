//! Wayfare Client SDK
//!
//! The app-facing access layer for the Wayfare API:
//! - [`ApiClient`]: typed reads and favorites writes; failures degrade to
//!   empty results rather than surfacing
//! - [`SessionStore`]: delegated login, verification, and persistence of the
//!   bearer session
//! - [`RequestGate`]: discards responses that arrive after a newer request
//!   has been issued
//!
//! Collection filtering itself lives in `wayfare_common::filter` so the same
//! predicates run on both sides of the wire.

pub mod api;
pub mod fetch;
pub mod session;

// The shared filtering semantics and wire models, so app code needs only
// this crate.
pub use wayfare_common::filter;
pub use wayfare_common::models;

pub use api::ApiClient;
pub use fetch::{RequestGate, Ticket};
pub use session::{
    AuthSnapshot, ClientError, FileStorage, MemoryStorage, SessionStorage, SessionStore,
};
