use plagcheck_config::AnalyzeOptions;

/// One submission, as the caller hands it in. There is no `id` field —
/// `analyze` assigns dense ids by the position a file holds in
/// `AnalyzeRequest.files`, the same rule `plagcheck-types::File` itself
/// documents for its own `id`.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: String,
    pub content: String,
    pub student_id: Option<String>,
    pub student_name: Option<String>,
}

impl InputFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            student_id: None,
            student_name: None,
        }
    }

    pub fn with_submitter(
        path: impl Into<String>,
        content: impl Into<String>,
        student_id: impl Into<String>,
        student_name: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            student_id: Some(student_id.into()),
            student_name: Some(student_name.into()),
        }
    }
}

/// A full `analyze` request. `language` is a raw tag rather
/// than `plagcheck_types::Language` so an unrecognized value produces a
/// faithful `UnsupportedLanguage` error instead of failing to deserialize
/// the request at the transport boundary.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub files: Vec<InputFile>,
    pub language: String,
    pub template: Option<InputFile>,
    pub options: AnalyzeOptions,
}

impl AnalyzeRequest {
    pub fn new(files: Vec<InputFile>, language: impl Into<String>) -> Self {
        Self {
            files,
            language: language.into(),
            template: None,
            options: AnalyzeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalyzeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_template(mut self, template: InputFile) -> Self {
        self.template = Some(template);
        self
    }
}
