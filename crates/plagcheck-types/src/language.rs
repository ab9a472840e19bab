use serde::{Deserialize, Serialize};
use std::fmt;

/// The set of source languages plagcheck knows how to tokenize.
///
/// Closed by design: the core is not an open-ended plugin host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Java,
    Python,
    C,
}

impl Language {
    /// Parse a caller-supplied language tag (`"java" | "python" | "c"`).
    /// Returns `None` for anything else so the caller can raise
    /// `UnsupportedLanguage`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "java" => Some(Self::Java),
            "python" => Some(Self::Python),
            "c" => Some(Self::C),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
            Self::C => "c",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
