//! Type registry — short format names ↔ canonical type identifiers.
//!
//! Three formats are registered (`text`, `html`, `rtf`). Any other
//! string passes through unchanged and is treated as an already
//! canonical identifier. Lookups never fail.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Reserved prefix of OS-private, unregistered dynamic types.
pub const DYNAMIC_PREFIX: &str = "dyn.";

/// Registered formats, most preferred first.
pub const PREFERRED: [FormatName; 3] = [FormatName::Rtf, FormatName::Html, FormatName::Text];

/// Canonical OS-level tag for one content representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentifier(Cow<'static, str>);

impl TypeIdentifier {
    pub const PLAIN_TEXT: TypeIdentifier = TypeIdentifier(Cow::Borrowed("public.utf8-plain-text"));
    pub const HTML: TypeIdentifier = TypeIdentifier(Cow::Borrowed("public.html"));
    pub const RTF: TypeIdentifier = TypeIdentifier(Cow::Borrowed("public.rtf"));

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier lives in the dynamic-type namespace.
    pub fn is_dynamic(&self) -> bool {
        self.0.starts_with(DYNAMIC_PREFIX)
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeIdentifier {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TypeIdentifier {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Symbolic format name.
///
/// `Custom` is the open extension point: it carries an identifier the
/// registry does not know, which is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatName {
    Text,
    Html,
    Rtf,
    Custom(TypeIdentifier),
}

impl FormatName {
    /// Parse a caller-supplied name. Unknown names become `Custom`.
    pub fn parse(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "html" => Self::Html,
            "rtf" => Self::Rtf,
            other => Self::Custom(TypeIdentifier::new(other)),
        }
    }

    /// Short name for registered formats, the identifier otherwise.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Rtf => "rtf",
            Self::Custom(id) => id.as_str(),
        }
    }

    pub fn is_registered(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for FormatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FormatName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

/// Canonical identifier for a format name.
pub fn to_type_identifier(name: &FormatName) -> TypeIdentifier {
    match name {
        FormatName::Text => TypeIdentifier::PLAIN_TEXT,
        FormatName::Html => TypeIdentifier::HTML,
        FormatName::Rtf => TypeIdentifier::RTF,
        FormatName::Custom(id) => id.clone(),
    }
}

/// Reverse lookup. Unregistered identifiers come back as `Custom`.
pub fn to_format_name(id: &TypeIdentifier) -> FormatName {
    match id.as_str() {
        "public.utf8-plain-text" => FormatName::Text,
        "public.html" => FormatName::Html,
        "public.rtf" => FormatName::Rtf,
        _ => FormatName::Custom(id.clone()),
    }
}

/// Resolve a raw caller string straight to an identifier.
pub fn resolve(name: &str) -> TypeIdentifier {
    to_type_identifier(&FormatName::parse(name))
}
