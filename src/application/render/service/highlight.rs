use syntect::{
    html::{ClassStyle, ClassedHTMLGenerator},
    parsing::{SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

use crate::application::render::types::RenderError;

const PLAIN_TEXT: &str = "text";

/// Fence tokens that the bundled syntax set does not know under the name
/// authors usually write.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("c++", "cpp"),
    ("shell", "bash"),
    ("ts", "js"),
    ("tsx", "js"),
    ("typescript", "js"),
    ("yml", "yaml"),
    ("zsh", "bash"),
];

/// Highlight a code block into `<pre><code>` markup carrying `syntax-` prefixed
/// token classes. Unknown languages fall back to plain text.
pub(crate) fn highlight_code(
    language: Option<&str>,
    meta: Option<&str>,
    code: &str,
    syntax_set: &SyntaxSet,
    class_style: &ClassStyle,
) -> Result<String, RenderError> {
    let token = language
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| PLAIN_TEXT.to_string());
    let syntax = resolve_syntax(syntax_set, &token);

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, *class_style);
    let terminated;
    let source = if code.ends_with('\n') {
        code
    } else {
        terminated = format!("{code}\n");
        terminated.as_str()
    };
    for line in LinesWithEndings::from(source) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|err| RenderError::Highlighting {
                language: token.clone(),
                message: err.to_string(),
            })?;
    }
    let body = generator.finalize();

    let lang = ammonia::clean_text(&token);
    let mut html = format!(
        "<pre class=\"syntax-highlight syntax-lang-{lang}\" data-language=\"{lang}\"><code class=\"language-{lang} syntax-code\""
    );
    if let Some(meta) = meta.filter(|meta| !meta.is_empty()) {
        html.push_str(&format!(" data-meta=\"{}\"", ammonia::clean_text(meta)));
    }
    html.push('>');
    html.push_str(&body);
    html.push_str("</code></pre>");
    Ok(html)
}

fn resolve_syntax<'a>(syntax_set: &'a SyntaxSet, token: &str) -> &'a SyntaxReference {
    let canonical = LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map_or(token, |(_, target)| *target);

    syntax_set
        .find_syntax_by_token(canonical)
        .or_else(|| syntax_set.find_syntax_by_extension(canonical))
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_and_style() -> (SyntaxSet, ClassStyle) {
        (
            SyntaxSet::load_defaults_newlines(),
            ClassStyle::SpacedPrefixed { prefix: "syntax-" },
        )
    }

    #[test]
    fn known_language_gets_token_spans() {
        let (syntax_set, class_style) = syntax_and_style();
        let html = highlight_code(
            Some("rust"),
            None,
            "fn main() {}",
            &syntax_set,
            &class_style,
        )
        .expect("highlight");

        assert!(html.starts_with("<pre class=\"syntax-highlight syntax-lang-rust\""));
        assert!(html.contains("<span class=\"syntax-"));
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() {
        let (syntax_set, class_style) = syntax_and_style();
        let html = highlight_code(
            Some("no-such-lang"),
            Some("title=demo"),
            "a < b",
            &syntax_set,
            &class_style,
        )
        .expect("highlight");

        assert!(html.contains("data-language=\"no-such-lang\""));
        assert!(html.contains("data-meta=\"title&#61;demo\""));
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn aliases_resolve_but_keep_the_written_token() {
        let (syntax_set, class_style) = syntax_and_style();
        let html = highlight_code(
            Some("TS"),
            None,
            "const x = 1;",
            &syntax_set,
            &class_style,
        )
        .expect("highlight");

        assert!(html.contains("data-language=\"ts\""));
        assert!(html.contains("<span class=\"syntax-"));
    }
}
