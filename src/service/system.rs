//! System pasteboard — the OS clipboard via `clipboard-rs`.
//!
//! A fresh `ClipboardContext` is opened per call, the equivalent of
//! asking the OS for its general pasteboard each time. The three
//! registered identifiers go through the typed text/HTML/RTF accessors
//! so they land in each platform's native slots; everything else is
//! stored as a raw buffer under its literal name.
//!
//! `clipboard-rs` posts a full set of representations in one call and
//! has no separate declaration step. Declaration is therefore staged
//! here: `declare_types` only records the owned identifiers. Each
//! `store_content` re-reads what is on the clipboard now, drops the
//! stale content of declared types not yet stored, and re-posts that
//! set with the new representation. Only identifiers are kept between
//! calls, never content.

use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext, ContentFormat};
use parking_lot::Mutex;

use super::{PasteboardService, ServiceError};
use crate::registry::TypeIdentifier;

/// Native names that are platform spellings of a registered identifier.
const TEXT_ALIASES: &[&str] = &[
    "public.utf8-plain-text",
    "UTF8_STRING",
    "STRING",
    "TEXT",
    "text/plain",
    "text/plain;charset=utf-8",
    "NSStringPboardType",
    "CF_TEXT",
    "CF_UNICODETEXT",
    "CF_OEMTEXT",
];
const HTML_ALIASES: &[&str] = &[
    "public.html",
    "text/html",
    "HTML Format",
    "Apple HTML pasteboard type",
];
const RTF_ALIASES: &[&str] = &[
    "public.rtf",
    "text/rtf",
    "Rich Text Format",
    "NeXT Rich Text Format v1.0 pasteboard type",
];

/// Selection-protocol targets that never carry content.
const PROTOCOL_TARGETS: &[&str] = &[
    "TARGETS",
    "TIMESTAMP",
    "MULTIPLE",
    "SAVE_TARGETS",
    "CF_LOCALE",
];

/// Identifiers owned by the write in progress.
#[derive(Debug, Default)]
struct Staged {
    declared: Vec<TypeIdentifier>,
    stored: Vec<TypeIdentifier>,
}

impl Staged {
    fn declare(&mut self, types: &[TypeIdentifier]) {
        self.declared = types.to_vec();
        self.stored.clear();
    }

    fn accepts(&self, type_id: &TypeIdentifier) -> bool {
        self.declared.contains(type_id)
    }

    /// Whether content currently on the clipboard under `type_id` is
    /// left over from before the declaration.
    fn is_stale(&self, type_id: &TypeIdentifier) -> bool {
        self.declared.contains(type_id) && !self.stored.contains(type_id)
    }

    /// Full set to post when storing `bytes` under `type_id`, given
    /// the representations currently on the clipboard.
    fn merge(
        &self,
        current: Vec<(TypeIdentifier, Vec<u8>)>,
        type_id: &TypeIdentifier,
        bytes: &[u8],
    ) -> Vec<(TypeIdentifier, Vec<u8>)> {
        let mut set: Vec<_> = current
            .into_iter()
            .filter(|(id, _)| id != type_id && !self.is_stale(id))
            .collect();
        set.push((type_id.clone(), bytes.to_vec()));
        set
    }

    fn mark_stored(&mut self, type_id: &TypeIdentifier) {
        if !self.stored.contains(type_id) {
            self.stored.push(type_id.clone());
        }
    }
}

/// Handle to the OS clipboard.
#[derive(Debug, Default)]
pub struct SystemPasteboard {
    staged: Mutex<Staged>,
}

impl SystemPasteboard {
    /// Open the OS clipboard once to confirm a service is available.
    pub fn connect() -> Result<Self, ServiceError> {
        open()?;
        tracing::debug!("system clipboard available");
        Ok(Self::default())
    }
}

fn open() -> Result<ClipboardContext, ServiceError> {
    ClipboardContext::new().map_err(|e| ServiceError::Unavailable(e.to_string()))
}

/// Map a native format name onto the registry, or `None` for
/// protocol targets that should not be listed.
fn canonical(native: &str) -> Option<TypeIdentifier> {
    if PROTOCOL_TARGETS.contains(&native) {
        None
    } else if TEXT_ALIASES.contains(&native) {
        Some(TypeIdentifier::PLAIN_TEXT)
    } else if HTML_ALIASES.contains(&native) {
        Some(TypeIdentifier::HTML)
    } else if RTF_ALIASES.contains(&native) {
        Some(TypeIdentifier::RTF)
    } else {
        Some(TypeIdentifier::new(native))
    }
}

fn typed_format(type_id: &TypeIdentifier) -> ContentFormat {
    if *type_id == TypeIdentifier::PLAIN_TEXT {
        ContentFormat::Text
    } else if *type_id == TypeIdentifier::HTML {
        ContentFormat::Html
    } else if *type_id == TypeIdentifier::RTF {
        ContentFormat::Rtf
    } else {
        ContentFormat::Other(type_id.to_string())
    }
}

fn read_native(
    ctx: &ClipboardContext,
    type_id: &TypeIdentifier,
) -> Result<Option<Vec<u8>>, ServiceError> {
    if !ctx.has(typed_format(type_id)) {
        return Ok(None);
    }
    let result = if *type_id == TypeIdentifier::PLAIN_TEXT {
        ctx.get_text().map(String::into_bytes)
    } else if *type_id == TypeIdentifier::HTML {
        ctx.get_html().map(String::into_bytes)
    } else if *type_id == TypeIdentifier::RTF {
        ctx.get_rich_text().map(String::into_bytes)
    } else {
        ctx.get_buffer(type_id.as_str())
    };
    result
        .map(Some)
        .map_err(|e| ServiceError::Query(format!("{type_id}: {e}")))
}

fn list_native(ctx: &ClipboardContext) -> Result<Vec<TypeIdentifier>, ServiceError> {
    let native = ctx
        .available_formats()
        .map_err(|e| ServiceError::Query(e.to_string()))?;

    let mut types: Vec<TypeIdentifier> = Vec::new();
    for id in native.iter().filter_map(|name| canonical(name)) {
        if !types.contains(&id) {
            types.push(id);
        }
    }
    // Some platforms only report typed slots through `has`.
    for id in [
        TypeIdentifier::PLAIN_TEXT,
        TypeIdentifier::HTML,
        TypeIdentifier::RTF,
    ] {
        if !types.contains(&id) && ctx.has(typed_format(&id)) {
            types.push(id);
        }
    }
    Ok(types)
}

/// Any failure while declaring means nothing was written.
fn declare_error(e: ServiceError) -> ServiceError {
    match e {
        ServiceError::Declare(_) => e,
        other => ServiceError::Declare(other.to_string()),
    }
}

/// Any failure while storing is reported against the type being stored.
fn store_error(type_id: &TypeIdentifier, e: ServiceError) -> ServiceError {
    match e {
        ServiceError::Store { .. } => e,
        other => ServiceError::Store {
            type_id: type_id.clone(),
            reason: other.to_string(),
        },
    }
}

fn to_content(type_id: &TypeIdentifier, bytes: &[u8]) -> Result<ClipboardContent, ServiceError> {
    let text = || {
        String::from_utf8(bytes.to_vec()).map_err(|e| ServiceError::Store {
            type_id: type_id.clone(),
            reason: e.to_string(),
        })
    };
    Ok(if *type_id == TypeIdentifier::PLAIN_TEXT {
        ClipboardContent::Text(text()?)
    } else if *type_id == TypeIdentifier::HTML {
        ClipboardContent::Html(text()?)
    } else if *type_id == TypeIdentifier::RTF {
        ClipboardContent::Rtf(text()?)
    } else {
        ClipboardContent::Other(type_id.to_string(), bytes.to_vec())
    })
}

impl PasteboardService for SystemPasteboard {
    fn query_content(&self, type_id: &TypeIdentifier) -> Result<Option<Vec<u8>>, ServiceError> {
        read_native(&open()?, type_id)
    }

    fn query_declared_types(&self) -> Result<Vec<TypeIdentifier>, ServiceError> {
        list_native(&open()?)
    }

    fn clear_all(&self) -> Result<(), ServiceError> {
        let mut staged = self.staged.lock();
        open()?
            .clear()
            .map_err(|e| ServiceError::Clear(e.to_string()))?;
        *staged = Staged::default();
        Ok(())
    }

    fn declare_types(&self, types: &[TypeIdentifier]) -> Result<(), ServiceError> {
        let mut staged = self.staged.lock();
        open().map_err(declare_error)?;
        staged.declare(types);
        tracing::debug!(declared = types.len(), "declared clipboard types");
        Ok(())
    }

    fn store_content(&self, bytes: &[u8], type_id: &TypeIdentifier) -> Result<(), ServiceError> {
        let mut staged = self.staged.lock();
        if !staged.accepts(type_id) {
            tracing::debug!(%type_id, "store for undeclared type dropped");
            return Ok(());
        }

        let ctx = open().map_err(|e| store_error(type_id, e))?;
        let mut current = Vec::new();
        for id in list_native(&ctx).map_err(|e| store_error(type_id, e))? {
            if id == *type_id || staged.is_stale(&id) {
                continue;
            }
            if let Some(existing) = read_native(&ctx, &id).map_err(|e| store_error(type_id, e))? {
                current.push((id, existing));
            }
        }

        let contents = staged
            .merge(current, type_id, bytes)
            .iter()
            .map(|(id, bytes)| to_content(id, bytes))
            .collect::<Result<Vec<_>, _>>()?;

        ctx.set(contents).map_err(|e| ServiceError::Store {
            type_id: type_id.clone(),
            reason: e.to_string(),
        })?;
        staged.mark_stored(type_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_aliases_fold_onto_registry() {
        assert_eq!(canonical("UTF8_STRING"), Some(TypeIdentifier::PLAIN_TEXT));
        assert_eq!(canonical("text/plain;charset=utf-8"), Some(TypeIdentifier::PLAIN_TEXT));
        assert_eq!(canonical("text/html"), Some(TypeIdentifier::HTML));
        assert_eq!(canonical("HTML Format"), Some(TypeIdentifier::HTML));
        assert_eq!(canonical("text/rtf"), Some(TypeIdentifier::RTF));
        assert_eq!(canonical("public.rtf"), Some(TypeIdentifier::RTF));
    }

    #[test]
    fn protocol_targets_are_hidden() {
        assert_eq!(canonical("TARGETS"), None);
        assert_eq!(canonical("TIMESTAMP"), None);
    }

    #[test]
    fn unknown_native_names_pass_through() {
        assert_eq!(
            canonical("dyn.ah62d4rv4gu8y"),
            Some(TypeIdentifier::from("dyn.ah62d4rv4gu8y"))
        );
        assert_eq!(canonical("image/png"), Some(TypeIdentifier::from("image/png")));
    }

    #[test]
    fn registered_types_become_typed_content() {
        assert!(matches!(
            to_content(&TypeIdentifier::PLAIN_TEXT, b"hi").unwrap(),
            ClipboardContent::Text(s) if s == "hi"
        ));
        assert!(matches!(
            to_content(&TypeIdentifier::HTML, b"<i>hi</i>").unwrap(),
            ClipboardContent::Html(_)
        ));
        assert!(matches!(
            to_content(&TypeIdentifier::RTF, b"{\\rtf1}").unwrap(),
            ClipboardContent::Rtf(_)
        ));
    }

    #[test]
    fn custom_types_become_raw_buffers() {
        let content = to_content(&TypeIdentifier::from("application/x-custom"), b"raw").unwrap();
        assert!(matches!(
            content,
            ClipboardContent::Other(name, bytes) if name == "application/x-custom" && bytes == b"raw"
        ));
    }

    #[test]
    fn invalid_utf8_text_is_rejected() {
        let result = to_content(&TypeIdentifier::PLAIN_TEXT, &[0xff, 0xfe]);
        assert!(matches!(result, Err(ServiceError::Store { .. })));
    }

    fn ids(set: &[(TypeIdentifier, Vec<u8>)]) -> Vec<&str> {
        set.iter().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn merge_keeps_unrelated_and_replaces_target() {
        let mut staged = Staged::default();
        staged.declare(&[TypeIdentifier::PLAIN_TEXT]);
        let current = vec![
            (TypeIdentifier::RTF, b"{\\rtf1}".to_vec()),
            (TypeIdentifier::from("public.png"), vec![0x89, b'P', b'N', b'G']),
        ];
        let set = staged.merge(current, &TypeIdentifier::PLAIN_TEXT, b"new");
        assert_eq!(ids(&set), vec!["public.rtf", "public.png", "public.utf8-plain-text"]);
        assert_eq!(set[2].1, b"new");
    }

    #[test]
    fn merge_drops_stale_declared_content() {
        let mut staged = Staged::default();
        staged.declare(&[TypeIdentifier::PLAIN_TEXT, TypeIdentifier::HTML]);
        let current = vec![(TypeIdentifier::HTML, b"old html".to_vec())];
        let set = staged.merge(current, &TypeIdentifier::PLAIN_TEXT, b"t");
        assert_eq!(ids(&set), vec!["public.utf8-plain-text"]);
    }

    #[test]
    fn merge_keeps_types_stored_earlier_in_the_write() {
        let mut staged = Staged::default();
        staged.declare(&[TypeIdentifier::PLAIN_TEXT, TypeIdentifier::HTML]);
        staged.mark_stored(&TypeIdentifier::PLAIN_TEXT);
        let current = vec![(TypeIdentifier::PLAIN_TEXT, b"t".to_vec())];
        let set = staged.merge(current, &TypeIdentifier::HTML, b"h");
        assert_eq!(ids(&set), vec!["public.utf8-plain-text", "public.html"]);
    }

    #[test]
    fn redeclare_forgets_previous_write() {
        let mut staged = Staged::default();
        staged.declare(&[TypeIdentifier::PLAIN_TEXT]);
        staged.mark_stored(&TypeIdentifier::PLAIN_TEXT);
        staged.declare(&[TypeIdentifier::HTML]);
        assert!(!staged.accepts(&TypeIdentifier::PLAIN_TEXT));
        assert!(staged.stored.is_empty());
        assert!(staged.is_stale(&TypeIdentifier::HTML));
    }

    #[test]
    fn declare_failures_report_as_declare() {
        let err = declare_error(ServiceError::Unavailable("no display".into()));
        assert!(matches!(err, ServiceError::Declare(ref m) if m.contains("no display")));
        let err = declare_error(ServiceError::Query("available_formats".into()));
        assert!(matches!(err, ServiceError::Declare(_)));
    }

    #[test]
    fn store_failures_name_the_stored_type() {
        let err = store_error(&TypeIdentifier::HTML, ServiceError::Query("get_buffer".into()));
        match err {
            ServiceError::Store { type_id, reason } => {
                assert_eq!(type_id, TypeIdentifier::HTML);
                assert!(reason.contains("get_buffer"));
            }
            other => panic!("expected store error, got {other:?}"),
        }
    }
}
