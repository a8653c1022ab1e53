//! Multi-format access to the system clipboard.
//!
//! A clipboard item can carry several representations of the same
//! content at once: plain text, HTML, RTF, or any other type the OS
//! knows by identifier. This crate reads and writes those
//! representations side by side.
//!
//! - [`registry`] maps the short names `text`, `html` and `rtf` to
//!   canonical type identifiers and passes every other string through.
//! - [`service`] abstracts the OS clipboard behind [`PasteboardService`],
//!   with a real backend and an in-memory one for tests.
//! - [`pasteboard`] is the caller-facing adapter: read one format,
//!   list or read everything, write many formats in one go, clear.
//!
//! ```no_run
//! use richpaste::{ListOptions, Pasteboard, WriteRequest};
//!
//! let pb = Pasteboard::system()?;
//! pb.write(
//!     &WriteRequest::new()
//!         .text("this is good!")
//!         .html("this is <strong>good</strong>!"),
//!     true,
//! )?;
//! assert_eq!(pb.read("html")?.as_deref(), Some("this is <strong>good</strong>!"));
//! println!("{:?}", pb.list_available(ListOptions::default())?);
//! # Ok::<(), richpaste::PasteboardError>(())
//! ```

pub mod pasteboard;
pub mod registry;
pub mod service;

pub use pasteboard::{ClipboardSnapshot, ListOptions, Pasteboard, PasteboardError, WriteRequest};
pub use registry::{FormatName, TypeIdentifier};
pub use service::{InMemoryPasteboard, PasteboardService, ServiceError, SystemPasteboard};
