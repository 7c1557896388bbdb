//! Markdown rendering pipeline.
//!
//! The pipeline is pure: it accepts markdown, produces deterministic HTML and
//! surfaces structured errors. Stages run in a fixed order over the comrak
//! AST: parse, rewrite (code highlighting and heading anchors), stringify,
//! sanitise.

mod service;
mod types;

pub use service::{
    ComrakRenderService, RenderConfigError, RenderPipelineConfig, configure_render_service,
    render_service,
};
pub use types::{HeadingOutline, RenderError, RenderOutput, RenderRequest, RenderService};
