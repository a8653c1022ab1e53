//! Output formatting for CLI commands.
//!
//! Content goes to stdout untouched so `richpaste paste --format html >
//! out.html` works; listings are plain lines.

use std::io::{self, Write};

use richpaste::ClipboardSnapshot;

/// Write one representation to stdout exactly as stored.
pub fn print_content(content: &str) -> Result<(), io::Error> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()
}

/// Print format names, one per line.
pub fn print_available(formats: &[String]) {
    for format in formats {
        println!("{format}");
    }
}

/// Print a snapshot as an indented `key: value` listing.
pub fn print_snapshot(snapshot: &ClipboardSnapshot) {
    if snapshot.is_empty() {
        println!("Clipboard is empty");
        return;
    }
    print!("{}", render_snapshot(snapshot));
}

/// Print a snapshot as a JSON object.
pub fn print_snapshot_json(snapshot: &ClipboardSnapshot) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

/// Print copy success.
pub fn print_copied(count: usize) {
    eprintln!("Copied {count} representation(s)");
}

fn render_snapshot(snapshot: &ClipboardSnapshot) -> String {
    let mut out = String::new();
    for (key, content) in snapshot.iter() {
        // Continuation lines line up under the first content line.
        let content = content.replace('\n', "\n       ");
        out.push_str(&format!("   {key}: {content}\n"));
    }
    out
}
