//! Pasteboard service — the OS clipboard as a swappable collaborator.
//!
//! [`PasteboardService`] is the low-level capability set the adapter
//! drives: query, enumerate, clear, declare, store. Backends implement
//! it; the adapter in [`crate::pasteboard`] never talks to the OS
//! directly.
//!
//! Two backends ship with the crate:
//!
//! - [`system::SystemPasteboard`] — the real OS clipboard via `clipboard-rs`.
//! - [`memory::InMemoryPasteboard`] — a process-local fake for tests.

pub mod memory;
pub mod system;

pub use memory::InMemoryPasteboard;
pub use system::SystemPasteboard;

use crate::registry::TypeIdentifier;

/// Errors returned by pasteboard backends.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No clipboard service could be opened on this platform.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// Reading content or the declared type list failed.
    #[error("query: {0}")]
    Query(String),

    /// Declaring the type set for a write failed. Nothing was stored.
    #[error("declare: {0}")]
    Declare(String),

    /// Storing one representation failed after a successful declare.
    #[error("store {type_id}: {reason}")]
    Store {
        type_id: TypeIdentifier,
        reason: String,
    },

    #[error("clear: {0}")]
    Clear(String),
}

/// Low-level access to a shared clipboard.
///
/// Writes follow an ownership protocol: [`declare_types`] must name
/// every identifier before [`store_content`] is called for it. A store
/// for an undeclared identifier is dropped by the backend without an
/// error, the same way the host OS drops it.
///
/// `Send + Sync` is required so a single handle can be shared across
/// threads; backends synchronize internally.
///
/// [`declare_types`]: PasteboardService::declare_types
/// [`store_content`]: PasteboardService::store_content
pub trait PasteboardService: Send + Sync {
    /// Raw bytes stored under `type_id` on the first item, if any.
    fn query_content(&self, type_id: &TypeIdentifier) -> Result<Option<Vec<u8>>, ServiceError>;

    /// Identifiers declared on the first clipboard item, in OS order.
    ///
    /// Returns an empty list when the clipboard holds no items.
    fn query_declared_types(&self) -> Result<Vec<TypeIdentifier>, ServiceError>;

    /// Remove every item and representation.
    fn clear_all(&self) -> Result<(), ServiceError>;

    /// Take ownership of `types` ahead of storing content for them.
    ///
    /// Identifiers already on the clipboard that are not in `types`
    /// are left in place.
    fn declare_types(&self, types: &[TypeIdentifier]) -> Result<(), ServiceError>;

    /// Store `bytes` under a previously declared identifier.
    fn store_content(&self, bytes: &[u8], type_id: &TypeIdentifier) -> Result<(), ServiceError>;
}
