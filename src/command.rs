//! CLI command execution.
//!
//! Each subcommand performs one pasteboard operation, prints the
//! result, and returns. Called from `main.rs` with the system
//! pasteboard; tests pass an in-memory one.

use std::io;
use std::path::Path;

use richpaste::{ListOptions, Pasteboard, PasteboardError, WriteRequest};

use crate::cli::{Command, ListFlags};
use crate::output;

/// Command error type.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("no {0} content on the clipboard")]
    Absent(String),
    #[error("invalid argument {0:?}: expected FORMAT=VALUE")]
    InvalidPair(String),
    #[error("{path}: {source}")]
    ReadFile { path: String, source: io::Error },
    #[error(transparent)]
    Pasteboard(#[from] PasteboardError),
    #[error("JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<ListFlags> for ListOptions {
    fn from(flags: ListFlags) -> Self {
        Self {
            neat: !flags.raw,
            include_dynamic: flags.dynamic,
        }
    }
}

/// Run one command against `pb`.
pub fn run(command: Command, pb: &Pasteboard) -> Result<(), CommandError> {
    match command {
        Command::Paste { format } => {
            let content = pb.read(&format)?.ok_or(CommandError::Absent(format))?;
            output::print_content(&content)?;
        }
        Command::Available { list } => {
            let formats = pb.list_available(list.into())?;
            output::print_available(&formats);
        }
        Command::PasteAll { list, json } => {
            let snapshot = pb.read_all(list.into())?;
            if json {
                output::print_snapshot_json(&snapshot)?;
            } else {
                output::print_snapshot(&snapshot);
            }
        }
        Command::Copy {
            text,
            html,
            rtf,
            set,
            file,
            keep,
        } => {
            let mut request = build_request(text, html, rtf, &set, &file)?;
            if request.is_empty() {
                request.insert("text", io::read_to_string(io::stdin())?);
            }
            pb.write(&request, !keep)?;
            output::print_copied(request.len());
        }
        Command::Clear => pb.clear()?,
    }

    Ok(())
}

/// Split `FORMAT=VALUE` at the first `=`.
fn parse_pair(arg: &str) -> Result<(&str, &str), CommandError> {
    match arg.split_once('=') {
        Some((format, value)) if !format.is_empty() => Ok((format, value)),
        _ => Err(CommandError::InvalidPair(arg.to_string())),
    }
}

/// Assemble one write from the copy flags.
///
/// Later sources override earlier ones for the same type: named flags,
/// then `--set`, then `--file`.
fn build_request(
    text: Option<String>,
    html: Option<String>,
    rtf: Option<String>,
    set: &[String],
    file: &[String],
) -> Result<WriteRequest, CommandError> {
    let mut request = WriteRequest::new();
    for (format, content) in [("text", text), ("html", html), ("rtf", rtf)] {
        if let Some(content) = content {
            request.insert(format, content);
        }
    }
    for arg in set {
        let (format, value) = parse_pair(arg)?;
        request.insert(format, value);
    }
    for arg in file {
        let (format, path) = parse_pair(arg)?;
        request.insert(format, read_file(path)?);
    }
    Ok(request)
}

fn read_file(path: &str) -> Result<String, CommandError> {
    std::fs::read_to_string(Path::new(path)).map_err(|source| CommandError::ReadFile {
        path: path.to_string(),
        source,
    })
}
