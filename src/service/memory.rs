//! In-memory pasteboard — process-local stand-in for the OS clipboard.
//!
//! Follows the same declare-before-store protocol as the real service
//! and keeps a list of items, of which only the first is visible
//! through [`PasteboardService`]. Clones share state, so two adapters
//! built over clones of one `InMemoryPasteboard` behave like two
//! processes sharing one system clipboard.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{PasteboardService, ServiceError};
use crate::registry::TypeIdentifier;

/// A backend call that can be made to fail once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePoint {
    Query,
    Declare,
    Store(TypeIdentifier),
    Clear,
}

#[derive(Debug, Clone)]
struct Representation {
    type_id: TypeIdentifier,
    /// `None` while declared but not yet stored.
    content: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
struct Item {
    representations: Vec<Representation>,
}

impl Item {
    fn find_mut(&mut self, type_id: &TypeIdentifier) -> Option<&mut Representation> {
        self.representations.iter_mut().find(|r| &r.type_id == type_id)
    }
}

#[derive(Debug, Default)]
struct State {
    items: Vec<Item>,
    change_count: u64,
    pending_failure: Option<FailurePoint>,
}

impl State {
    fn take_failure(&mut self, point: &FailurePoint) -> bool {
        if self.pending_failure.as_ref() == Some(point) {
            self.pending_failure = None;
            true
        } else {
            false
        }
    }

    fn first_item_mut(&mut self) -> &mut Item {
        if self.items.is_empty() {
            self.items.push(Item::default());
        }
        &mut self.items[0]
    }
}

/// Shared in-memory clipboard.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPasteboard {
    state: Arc<Mutex<State>>,
}

impl InMemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call at `point` fail.
    pub fn fail_next(&self, point: FailurePoint) {
        self.state.lock().pending_failure = Some(point);
    }

    /// Put a representation on the first item directly, bypassing the
    /// declare/store protocol. Stands in for another application
    /// posting data, including dynamic or non-UTF-8 payloads.
    pub fn insert_raw(&self, type_id: impl Into<TypeIdentifier>, bytes: impl Into<Vec<u8>>) {
        let type_id = type_id.into();
        let bytes = bytes.into();
        let mut state = self.state.lock();
        state.change_count += 1;
        let item = state.first_item_mut();
        match item.find_mut(&type_id) {
            Some(rep) => rep.content = Some(bytes),
            None => item.representations.push(Representation {
                type_id,
                content: Some(bytes),
            }),
        }
    }

    /// Append a further item behind the first one.
    pub fn push_item(&self, representations: Vec<(TypeIdentifier, Vec<u8>)>) {
        let mut state = self.state.lock();
        state.change_count += 1;
        state.items.push(Item {
            representations: representations
                .into_iter()
                .map(|(type_id, bytes)| Representation {
                    type_id,
                    content: Some(bytes),
                })
                .collect(),
        });
    }

    /// Number of items currently on the clipboard.
    pub fn item_count(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Monotonic counter bumped by every mutation.
    pub fn change_count(&self) -> u64 {
        self.state.lock().change_count
    }
}

impl PasteboardService for InMemoryPasteboard {
    fn query_content(&self, type_id: &TypeIdentifier) -> Result<Option<Vec<u8>>, ServiceError> {
        let mut state = self.state.lock();
        if state.take_failure(&FailurePoint::Query) {
            return Err(ServiceError::Query("injected failure".into()));
        }
        Ok(state.items.first().and_then(|item| {
            item.representations
                .iter()
                .find(|r| &r.type_id == type_id)
                .and_then(|r| r.content.clone())
        }))
    }

    fn query_declared_types(&self) -> Result<Vec<TypeIdentifier>, ServiceError> {
        let mut state = self.state.lock();
        if state.take_failure(&FailurePoint::Query) {
            return Err(ServiceError::Query("injected failure".into()));
        }
        Ok(state
            .items
            .first()
            .map(|item| {
                item.representations
                    .iter()
                    .map(|r| r.type_id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn clear_all(&self) -> Result<(), ServiceError> {
        let mut state = self.state.lock();
        if state.take_failure(&FailurePoint::Clear) {
            return Err(ServiceError::Clear("injected failure".into()));
        }
        state.items.clear();
        state.change_count += 1;
        Ok(())
    }

    fn declare_types(&self, types: &[TypeIdentifier]) -> Result<(), ServiceError> {
        let mut state = self.state.lock();
        if state.take_failure(&FailurePoint::Declare) {
            return Err(ServiceError::Declare("injected failure".into()));
        }
        state.change_count += 1;
        let item = state.first_item_mut();
        for type_id in types {
            match item.find_mut(type_id) {
                Some(rep) => rep.content = None,
                None => item.representations.push(Representation {
                    type_id: type_id.clone(),
                    content: None,
                }),
            }
        }
        Ok(())
    }

    fn store_content(&self, bytes: &[u8], type_id: &TypeIdentifier) -> Result<(), ServiceError> {
        let mut state = self.state.lock();
        if state.take_failure(&FailurePoint::Store(type_id.clone())) {
            return Err(ServiceError::Store {
                type_id: type_id.clone(),
                reason: "injected failure".into(),
            });
        }
        let Some(rep) = state.items.first_mut().and_then(|item| item.find_mut(type_id)) else {
            tracing::debug!(%type_id, "store for undeclared type dropped");
            return Ok(());
        };
        rep.content = Some(bytes.to_vec());
        state.change_count += 1;
        Ok(())
    }
}
