use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "richpaste", about = "Copy and paste rich text (HTML/RTF) and plain text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration flags shared by `available` and `paste-all`.
#[derive(Args, Debug, Clone, Copy)]
pub struct ListFlags {
    /// Show raw type identifiers instead of short format names
    #[arg(long)]
    pub raw: bool,

    /// Include OS-private dynamic types (`dyn.*`)
    #[arg(long)]
    pub dynamic: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one representation to stdout
    Paste {
        /// Format name (text, html, rtf) or a literal type identifier
        #[arg(long, short, default_value = "text")]
        format: String,
    },

    /// List the formats currently on the clipboard
    Available {
        #[command(flatten)]
        list: ListFlags,
    },

    /// Print every representation on the clipboard
    PasteAll {
        #[command(flatten)]
        list: ListFlags,

        /// Print a JSON object instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Put one or more representations on the clipboard in one write
    Copy {
        /// Plain text content
        #[arg(long)]
        text: Option<String>,

        /// HTML fragment content
        #[arg(long)]
        html: Option<String>,

        /// RTF document content
        #[arg(long)]
        rtf: Option<String>,

        /// Extra representation as FORMAT=VALUE (repeatable)
        #[arg(long = "set", value_name = "FORMAT=VALUE")]
        set: Vec<String>,

        /// Representation read from a file as FORMAT=PATH (repeatable)
        #[arg(long = "file", value_name = "FORMAT=PATH")]
        file: Vec<String>,

        /// Keep unrelated types already on the clipboard
        #[arg(long)]
        keep: bool,
    },

    /// Remove everything from the clipboard
    Clear,
}
