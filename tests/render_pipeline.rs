use folio::application::render::{
    ComrakRenderService, RenderPipelineConfig, RenderRequest, RenderService, render_service,
};

fn load_markdown() -> String {
    include_str!("fixtures/render_sample.md").to_string()
}

fn request() -> RenderRequest {
    RenderRequest::new("render-sample", load_markdown())
}

#[test]
fn sample_renders_gfm_features() {
    let output = render_service().render(&request()).expect("render succeeds");

    assert!(output.html.contains("<del>old</del>"));
    assert!(output.html.contains("<table>"));
    assert!(output.html.contains("<th>Feature</th>"));
    assert!(output.html.contains("<code>inline code</code>"));
    assert!(!output.html.contains("slug: render-sample"));
}

#[test]
fn sample_code_blocks_are_highlighted() {
    let output = render_service().render(&request()).expect("render succeeds");

    assert!(output.contains_code);
    assert!(
        output
            .html
            .contains("<pre class=\"syntax-highlight syntax-lang-rust\" data-language=\"rust\">")
    );
    assert!(output.html.contains("data-meta=\"title=main.rs\""));
    assert!(output.html.contains("syntax-lang-text"));
    assert!(output.html.contains("<span class=\"syntax-"));
}

#[test]
fn sample_headings_get_unique_anchors() {
    let output = render_service().render(&request()).expect("render succeeds");

    let anchors: Vec<_> = output
        .headings
        .iter()
        .map(|heading| heading.anchor.as_str())
        .collect();
    assert_eq!(anchors, ["render-sample", "render-sample-2"]);
    assert!(
        output
            .html
            .contains("<h2 id=\"render-sample-2\">Render sample</h2>")
    );
}

#[test]
fn sample_is_sanitised() {
    let output = render_service().render(&request()).expect("render succeeds");

    assert!(!output.html.contains("<script"));
    assert!(!output.html.contains("javascript:"));
    assert!(!output.html.contains("onclick"));
    assert!(output.html.contains("bad link"));
}

#[test]
fn rendering_is_deterministic() {
    let first = render_service().render(&request()).expect("first render");
    let second = ComrakRenderService::new(RenderPipelineConfig::default())
        .render(&request())
        .expect("second render");

    assert_eq!(first, second);
}

#[test]
fn unsanitized_render_keeps_raw_markup() {
    let html = render_service()
        .render_unsanitized(&request())
        .expect("unsanitized render succeeds");

    assert!(html.contains("<script>"));
}
