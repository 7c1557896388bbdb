use comrak::{
    format_html,
    nodes::{AstNode, NodeHtmlBlock, NodeValue},
    options::Options,
};
use syntect::{html::ClassStyle, parsing::SyntaxSet};

use crate::{
    application::render::types::{HeadingOutline, RenderError},
    domain::slug::{AnchorSlugger, SlugError},
};

use super::highlight;

#[derive(Debug, Default)]
pub(crate) struct RewriteOutcome {
    pub(crate) contains_code: bool,
    pub(crate) headings: Vec<HeadingOutline>,
}

/// Rewrite the AST in place: code blocks become highlighted HTML blocks and,
/// when `anchor_headings` is set, headings gain an `id` derived from their
/// text.
pub(crate) fn rewrite_ast<'a>(
    root: &'a AstNode<'a>,
    options: &Options<'static>,
    syntax_set: &SyntaxSet,
    class_style: &ClassStyle,
    anchor_headings: bool,
) -> Result<RewriteOutcome, RenderError> {
    let mut walker = RewriteWalker {
        options,
        syntax_set,
        class_style,
        anchor_headings,
        slugger: AnchorSlugger::new(),
        outcome: RewriteOutcome::default(),
    };
    walker.visit_nodes(root)?;
    Ok(walker.outcome)
}

struct RewriteWalker<'a> {
    options: &'a Options<'static>,
    syntax_set: &'a SyntaxSet,
    class_style: &'a ClassStyle,
    anchor_headings: bool,
    slugger: AnchorSlugger,
    outcome: RewriteOutcome,
}

impl RewriteWalker<'_> {
    fn visit_nodes<'n>(&mut self, node: &'n AstNode<'n>) -> Result<(), RenderError> {
        if let Some(level) = heading_level(node) {
            self.rewrite_heading(node, level)?;
            // Heading children are either detached or inline-only.
            return Ok(());
        }

        if let Some((info, literal)) = extract_code_block(node) {
            let mut segments = info.split_whitespace();
            let language = segments.next().map(str::to_string);
            let meta = segments.collect::<Vec<_>>().join(" ");
            let meta_ref = (!meta.is_empty()).then_some(meta.as_str());

            let html = highlight::highlight_code(
                language.as_deref(),
                meta_ref,
                &literal,
                self.syntax_set,
                self.class_style,
            )?;
            self.outcome.contains_code = true;

            let mut data = node.data.borrow_mut();
            data.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: 0,
                literal: html,
            });
            return Ok(());
        }

        let mut child = node.first_child();
        while let Some(next) = child {
            self.visit_nodes(next)?;
            child = next.next_sibling();
        }

        Ok(())
    }

    fn rewrite_heading<'n>(&mut self, node: &'n AstNode<'n>, level: u8) -> Result<(), RenderError> {
        let text = collect_inline_text(node)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if !self.anchor_headings {
            self.outcome.headings.push(HeadingOutline {
                level,
                anchor: String::new(),
                text,
            });
            return Ok(());
        }

        let anchor = match self.slugger.anchor_for(&text) {
            Ok(anchor) => anchor,
            // Headings without sluggable text (e.g. only punctuation) stay unanchored.
            Err(SlugError::EmptyInput | SlugError::Unrepresentable { .. }) => {
                self.outcome.headings.push(HeadingOutline {
                    level,
                    anchor: String::new(),
                    text,
                });
                return Ok(());
            }
        };

        let mut rendered = String::new();
        format_html(node, self.options, &mut rendered).map_err(|err| {
            RenderError::Anchoring {
                message: err.to_string(),
            }
        })?;

        let open_tag = format!("<h{level}>");
        let Some(inner) = rendered.strip_prefix(open_tag.as_str()) else {
            return Err(RenderError::Anchoring {
                message: format!("unexpected heading markup for `{text}`"),
            });
        };
        let anchored = format!("<h{level} id=\"{anchor}\">{inner}");

        while let Some(child) = node.first_child() {
            child.detach();
        }
        let mut data = node.data.borrow_mut();
        data.value = NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal: anchored,
        });

        self.outcome.headings.push(HeadingOutline {
            level,
            anchor,
            text,
        });
        Ok(())
    }
}

fn extract_code_block(node: &AstNode<'_>) -> Option<(String, String)> {
    let data = node.data.borrow();
    if let NodeValue::CodeBlock(block) = &data.value {
        Some((block.info.trim().to_string(), block.literal.clone()))
    } else {
        None
    }
}

fn heading_level(node: &AstNode<'_>) -> Option<u8> {
    let data = node.data.borrow();
    if let NodeValue::Heading(heading) = &data.value {
        Some(heading.level)
    } else {
        None
    }
}

fn collect_inline_text<'n>(node: &'n AstNode<'n>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        let data = descendant.data.borrow();
        match &data.value {
            NodeValue::Text(value) => text.push_str(value),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
