use ammonia::Builder as AmmoniaBuilder;
use comrak::options::{ListStyleType, Options};

const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "blockquote", "br", "code", "dd", "del", "div", "dl", "dt", "em", "figcaption",
    "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "input", "ins", "kbd", "li",
    "mark", "ol", "p", "pre", "s", "section", "span", "strong", "sub", "sup", "table", "tbody",
    "td", "th", "thead", "tr", "u", "ul",
];

const GENERIC_ATTRIBUTES: &[&str] = &[
    "class",
    "id",
    "title",
    "lang",
    "dir",
    "aria-hidden",
    "aria-label",
    "role",
    "data-footnote-ref",
    "data-footnotes",
    "data-footnote-backref",
];

const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["target"]),
    ("img", &["width", "height", "alt", "loading", "decoding"]),
    ("code", &["data-meta", "data-language"]),
    ("pre", &["data-language"]),
    ("th", &["align", "colspan", "rowspan", "scope"]),
    ("td", &["align", "colspan", "rowspan"]),
    ("input", &["type", "checked", "disabled"]),
];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

/// Allowlist applied to rendered post bodies. Everything outside it, event
/// handler attributes and non-http(s) link schemes included, is stripped.
pub(crate) fn build_post_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
        .url_schemes(URL_SCHEMES.iter().copied().collect());
    for (tag, attributes) in TAG_ATTRIBUTES {
        builder.add_tag_attributes(tag, attributes.iter());
    }
    builder
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.superscript = true;
    ext.footnotes = true;
    ext.description_lists = true;
    ext.front_matter_delimiter = Some("---".to_string());

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.full_info_string = true;
    render.tasklist_classes = true;
    render.list_style = ListStyleType::Dash;
    // Raw HTML is passed through here and cleaned by the sanitiser stage.
    render.r#unsafe = true;
    render.sourcepos = false;
}

#[cfg(test)]
mod tests {
    use super::build_post_sanitizer;

    #[test]
    fn post_sanitizer_preserves_strikethrough() {
        let sanitizer = build_post_sanitizer();
        let html = sanitizer
            .clean("<p><del>Removed</del> text</p>")
            .to_string();

        assert!(html.contains("<del>Removed</del>"));
    }

    #[test]
    fn post_sanitizer_drops_scripts_and_handlers() {
        let sanitizer = build_post_sanitizer();
        let html = sanitizer
            .clean("<p onclick=\"steal()\">Hi</p><script>alert(1)</script>")
            .to_string();

        assert_eq!(html, "<p>Hi</p>");
    }

    #[test]
    fn post_sanitizer_keeps_highlight_classes() {
        let sanitizer = build_post_sanitizer();
        let html = sanitizer
            .clean("<pre class=\"syntax-highlight\" data-language=\"rust\"><code class=\"language-rust\"><span class=\"syntax-keyword\">fn</span></code></pre>")
            .to_string();

        assert!(html.contains("class=\"syntax-highlight\""));
        assert!(html.contains("data-language=\"rust\""));
        assert!(html.contains("<span class=\"syntax-keyword\">fn</span>"));
    }

    #[test]
    fn post_sanitizer_rejects_javascript_links() {
        let sanitizer = build_post_sanitizer();
        let html = sanitizer
            .clean("<a href=\"javascript:alert(1)\">x</a>")
            .to_string();

        assert!(!html.contains("javascript:"));
    }
}
