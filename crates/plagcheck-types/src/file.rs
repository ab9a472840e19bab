use crate::SourceMap;

/// Optional attribution the caller attaches to a submitted file. Neither
/// field affects detection — they're carried through to the report
/// purely for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitterInfo {
    pub student_id: Option<String>,
    pub student_name: Option<String>,
}

/// A single submitted source file, immutable once constructed.
///
/// `id` is the dense index assigned by the caller building a `Report`:
/// files are cross-referenced by integer id, never by pointer or path,
/// once inside the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id: u32,
    pub path: String,
    pub filename: String,
    pub content: String,
    pub line_count: u32,
    pub info: Option<SubmitterInfo>,
    pub source_map: SourceMap,
}

impl File {
    /// `filename` is derived from `path` (the component after the last
    /// `/`, or the whole path if there is none). `line_count` is the
    /// number of `\n`-terminated lines, plus one more if the content is
    /// non-empty and does not end with `\n`.
    pub fn new(id: u32, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_info(id, path, content, None)
    }

    pub fn with_info(
        id: u32,
        path: impl Into<String>,
        content: impl Into<String>,
        info: Option<SubmitterInfo>,
    ) -> Self {
        let path = path.into();
        let content = content.into();
        let filename = path
            .rsplit_once('/')
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| path.clone());
        let line_count = Self::count_lines(&content);
        let source_map = SourceMap::new(&content);
        Self {
            id,
            path,
            filename,
            content,
            line_count,
            info,
            source_map,
        }
    }

    fn count_lines(content: &str) -> u32 {
        if content.is_empty() {
            return 0;
        }
        let newlines = content.bytes().filter(|&b| b == b'\n').count() as u32;
        if content.ends_with('\n') {
            newlines
        } else {
            newlines + 1
        }
    }
}
