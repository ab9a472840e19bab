use std::fmt;

/// A non-fatal diagnostic folded into `Report.warnings` rather than
/// raised as an error. Tokenizer recovery, frequency-filtered
/// fingerprints, and truncated match sets all produce warnings instead
/// of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub file: Option<String>,
    pub row: Option<u32>,
    pub col: Option<u32>,
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            file: None,
            row: None,
            col: None,
            message: message.into(),
        }
    }

    pub fn at(file: impl Into<String>, row: u32, col: u32, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            row: Some(row),
            col: Some(col),
            message: message.into(),
        }
    }

    /// A warning with a source position but no known file yet — used by
    /// tokenizers, which only ever see one file's content and don't know
    /// its name. `plagcheck-core` stamps `file` in once it knows which
    /// submission produced the warning.
    pub fn at_position(row: u32, col: u32, message: impl Into<String>) -> Self {
        Self {
            file: None,
            row: Some(row),
            col: Some(col),
            message: message.into(),
        }
    }

    /// Returns a copy with `file` set, used by callers that only learn
    /// the originating file after the warning is produced.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.row, self.col) {
            (Some(file), Some(row), Some(col)) => {
                write!(f, "{file}:{row}:{col}: {}", self.message)
            }
            (Some(file), _, _) => write!(f, "{file}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}
