mod config;
mod highlight;
mod rewrite;

use std::sync::Arc;

use comrak::{Arena, format_html, nodes::AstNode, parse_document};
use once_cell::sync::{Lazy, OnceCell};
use syntect::{html::ClassStyle, parsing::SyntaxSet};
use thiserror::Error;
use tracing::debug;

use crate::application::render::types::{
    RenderError, RenderOutput, RenderRequest, RenderService,
};

use config::{build_post_sanitizer, default_options};
use rewrite::{RewriteOutcome, rewrite_ast};

/// Default Comrak-based rendering pipeline with Syntect highlighting and Ammonia sanitisation.
pub struct ComrakRenderService {
    options: comrak::Options<'static>,
    syntax_set: SyntaxSet,
    class_style: ClassStyle,
    sanitizer: ammonia::Builder<'static>,
    heading_anchors: bool,
}

impl ComrakRenderService {
    /// Construct a renderer with GFM extensions enabled and syntax highlighting
    /// configured to emit `syntax-` prefixed CSS classes.
    pub fn new(config: RenderPipelineConfig) -> Self {
        Self {
            options: default_options(),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            class_style: ClassStyle::SpacedPrefixed { prefix: "syntax-" },
            sanitizer: build_post_sanitizer(),
            heading_anchors: config.heading_anchors,
        }
    }

    /// Render markdown into HTML while skipping the sanitisation stage. This is
    /// intended for diagnostics when refining sanitizer rules.
    pub fn render_unsanitized(&self, request: &RenderRequest) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, &request.markdown, &self.options);

        self.rewrite_stage(root)?;
        render_html_stage(root, &self.options)
    }

    fn rewrite_stage<'a>(&self, root: &'a AstNode<'a>) -> Result<RewriteOutcome, RenderError> {
        rewrite_ast(
            root,
            &self.options,
            &self.syntax_set,
            &self.class_style,
            self.heading_anchors,
        )
    }
}

static RENDER_SERVICE: Lazy<Arc<ComrakRenderService>> =
    Lazy::new(|| Arc::new(ComrakRenderService::new(active_render_config())));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<ComrakRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl Default for ComrakRenderService {
    fn default() -> Self {
        Self::new(RenderPipelineConfig::default())
    }
}

impl RenderService for ComrakRenderService {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, &request.markdown, &self.options);

        let RewriteOutcome {
            contains_code,
            headings,
        } = self.rewrite_stage(root)?;

        let rendered_html = render_html_stage(root, &self.options)?;
        let html = sanitize_stage(&rendered_html, &self.sanitizer);

        debug!(
            target = "application::render",
            slug = %request.slug,
            headings = headings.len(),
            contains_code,
            "rendered markdown"
        );

        Ok(RenderOutput {
            html,
            contains_code,
            headings,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPipelineConfig {
    pub heading_anchors: bool,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            heading_anchors: true,
        }
    }
}

impl From<&crate::config::RenderSettings> for RenderPipelineConfig {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            heading_anchors: settings.heading_anchors,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render service already configured")]
    AlreadyConfigured,
}

static RENDER_PIPELINE_CONFIG: OnceCell<RenderPipelineConfig> = OnceCell::new();

/// Install the pipeline configuration used by [`render_service`]. Must run
/// before the shared service is first accessed.
pub fn configure_render_service(config: RenderPipelineConfig) -> Result<(), RenderConfigError> {
    RENDER_PIPELINE_CONFIG
        .set(config)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

fn active_render_config() -> RenderPipelineConfig {
    RENDER_PIPELINE_CONFIG.get().copied().unwrap_or_default()
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })?;
    Ok(html)
}

fn sanitize_stage(html: &str, sanitizer: &ammonia::Builder<'static>) -> String {
    sanitizer.clean(html).to_string()
}
