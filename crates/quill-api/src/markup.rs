//! Read-time markup conversion: blog markdown to HTML, and comment plain
//! text to escaped paragraph HTML.

use pulldown_cmark::{Options, Parser, html};

/// Render blog markdown to HTML. pulldown-cmark generates its own markup
/// from the parsed structure, so the stored source never reaches the page
/// verbatim.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Wrap each non-blank line of comment text in a `<p>`, escaping `&`, `<`
/// and `>` so user input can never become executable markup.
pub fn text_to_html(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let escaped = line
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;");
            format!("<p>{escaped}</p>")
        })
        .collect()
}
