//! Pasteboard adapter — multi-format reads and writes over a
//! [`PasteboardService`].
//!
//! The adapter holds no clipboard state of its own. Every call goes to
//! the service, and the service's clipboard may be changed by another
//! process between any two calls:
//!
//! - [`Pasteboard::read_all`] enumerates and then reads each type
//!   separately. The result is best effort and may mix two clipboard
//!   generations.
//! - [`Pasteboard::write`] with `clear_first` clears, declares, then
//!   stores. A concurrent writer landing between those steps can lose
//!   its content or destroy ours. No cross-process transaction exists
//!   to prevent this.

mod request;
mod snapshot;

pub use request::WriteRequest;
pub use snapshot::ClipboardSnapshot;

use crate::registry::{self, FormatName, PREFERRED, TypeIdentifier};
use crate::service::{PasteboardService, ServiceError, SystemPasteboard};

/// Errors surfaced by pasteboard operations.
///
/// Missing content is not an error; reads return `None`.
#[derive(Debug, thiserror::Error)]
pub enum PasteboardError {
    /// The platform has no usable clipboard service.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// Stored content under `type_id` is not valid UTF-8 text.
    #[error("{type_id}: content is not valid UTF-8: {source}")]
    Encoding {
        type_id: TypeIdentifier,
        source: std::string::FromUtf8Error,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Enumeration flags for [`Pasteboard::list_available`] and
/// [`Pasteboard::read_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Report registered identifiers by short name (`text`, `html`, `rtf`).
    pub neat: bool,
    /// Keep identifiers from the `dyn.` namespace.
    pub include_dynamic: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            neat: true,
            include_dynamic: false,
        }
    }
}

/// Multi-format access to one shared clipboard.
pub struct Pasteboard {
    service: Box<dyn PasteboardService>,
}

impl Pasteboard {
    pub fn new(service: impl PasteboardService + 'static) -> Self {
        Self {
            service: Box::new(service),
        }
    }

    /// Connect to the OS clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`PasteboardError::Unavailable`] if the platform exposes
    /// no clipboard service.
    pub fn system() -> Result<Self, PasteboardError> {
        match SystemPasteboard::connect() {
            Ok(service) => Ok(Self::new(service)),
            Err(ServiceError::Unavailable(reason)) => Err(PasteboardError::Unavailable(reason)),
            Err(e) => Err(e.into()),
        }
    }

    /// Read one representation as text.
    ///
    /// `format` is a registered short name or a literal identifier.
    /// Returns `Ok(None)` when nothing is stored under it.
    pub fn read(&self, format: &str) -> Result<Option<String>, PasteboardError> {
        self.read_type(&registry::resolve(format))
    }

    fn read_type(&self, type_id: &TypeIdentifier) -> Result<Option<String>, PasteboardError> {
        let Some(bytes) = self.service.query_content(type_id)? else {
            tracing::debug!(%type_id, "no content");
            return Ok(None);
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|source| PasteboardError::Encoding {
                type_id: type_id.clone(),
                source,
            })
    }

    /// Identifiers on the first clipboard item, dynamic ones optionally
    /// removed.
    fn declared_types(
        &self,
        include_dynamic: bool,
    ) -> Result<Vec<TypeIdentifier>, PasteboardError> {
        let mut types = self.service.query_declared_types()?;
        if !include_dynamic {
            types.retain(|t| !t.is_dynamic());
        }
        Ok(types)
    }

    fn display_key(type_id: &TypeIdentifier, neat: bool) -> String {
        if neat {
            registry::to_format_name(type_id).to_string()
        } else {
            type_id.to_string()
        }
    }

    /// Formats present on the clipboard, in the order the OS reports them.
    ///
    /// Only the first clipboard item is considered.
    pub fn list_available(&self, options: ListOptions) -> Result<Vec<String>, PasteboardError> {
        let types = self.declared_types(options.include_dynamic)?;
        Ok(types
            .iter()
            .map(|t| Self::display_key(t, options.neat))
            .collect())
    }

    /// Read every listed text representation.
    ///
    /// Types that vanish between enumeration and read are left out, as
    /// are types whose content is not UTF-8 text (images and other
    /// binary payloads). Use [`read`](Self::read) to get the encoding
    /// error for one specific type.
    pub fn read_all(&self, options: ListOptions) -> Result<ClipboardSnapshot, PasteboardError> {
        let mut snapshot = ClipboardSnapshot::default();
        for type_id in self.declared_types(options.include_dynamic)? {
            match self.read_type(&type_id) {
                Ok(Some(content)) => {
                    snapshot.push(Self::display_key(&type_id, options.neat), content)
                }
                Ok(None) => tracing::debug!(%type_id, "listed type has no content"),
                Err(PasteboardError::Encoding { source, .. }) => {
                    tracing::warn!(%type_id, error = %source, "skipping non-text content");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(snapshot)
    }

    /// Highest-ranked registered format present (`rtf`, then `html`,
    /// then `text`) together with its content.
    pub fn read_preferred(&self) -> Result<Option<(FormatName, String)>, PasteboardError> {
        let types = self.declared_types(false)?;
        for name in PREFERRED {
            let type_id = registry::to_type_identifier(&name);
            if !types.contains(&type_id) {
                continue;
            }
            if let Some(content) = self.read_type(&type_id)? {
                return Ok(Some((name, content)));
            }
        }
        Ok(None)
    }

    /// Post every representation in `request` as UTF-8 text.
    ///
    /// With `clear_first` the clipboard ends up holding exactly the
    /// requested types; otherwise unrelated types already present stay.
    /// All types are declared before any content is stored. A failed
    /// declaration stores nothing. Once declaration succeeds every
    /// entry is attempted, and the first store failure is returned;
    /// the clipboard is then in an indeterminate state.
    pub fn write(&self, request: &WriteRequest, clear_first: bool) -> Result<(), PasteboardError> {
        if clear_first {
            self.service.clear_all()?;
        }
        if request.is_empty() {
            tracing::debug!(clear_first, "empty write");
            return Ok(());
        }

        let types: Vec<TypeIdentifier> = request.type_ids().cloned().collect();
        self.service.declare_types(&types)?;

        let mut first_error = None;
        for (type_id, content) in request.iter() {
            if let Err(e) = self.service.store_content(content.as_bytes(), type_id) {
                tracing::warn!(%type_id, error = %e, "store failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => {
                tracing::debug!(types = types.len(), clear_first, "clipboard written");
                Ok(())
            }
        }
    }

    /// Replace the clipboard with a single plain-text representation.
    pub fn copy_text(&self, text: &str) -> Result<(), PasteboardError> {
        self.write(&WriteRequest::new().text(text), true)
    }

    /// Remove every representation. Clearing an empty clipboard succeeds.
    pub fn clear(&self) -> Result<(), PasteboardError> {
        self.service.clear_all()?;
        tracing::debug!("clipboard cleared");
        Ok(())
    }
}
