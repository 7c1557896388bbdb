use serde::Serialize;
use thiserror::Error;

/// Rendering request passed into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Slug of the post being rendered, used for diagnostics only.
    pub slug: String,
    /// Markdown body. A leading `---` frontmatter block is ignored.
    pub markdown: String,
}

impl RenderRequest {
    pub fn new(slug: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            markdown: markdown.into(),
        }
    }
}

/// Heading discovered while rewriting the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingOutline {
    pub level: u8,
    pub anchor: String,
    pub text: String,
}

/// Deterministic rendering result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    /// Sanitised HTML.
    pub html: String,
    /// Whether at least one fenced or indented code block was highlighted.
    pub contains_code: bool,
    /// Document headings in source order; anchors are empty when anchoring
    /// is disabled.
    pub headings: Vec<HeadingOutline>,
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
    #[error("syntax highlighting failed: {language}: {message}")]
    Highlighting { language: String, message: String },
    #[error("anchor slug generation failed: {message}")]
    Anchoring { message: String },
}

/// Implementations must be pure and deterministic: the same request always
/// yields the same output or error.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError>;
}
