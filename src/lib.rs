// tidemark — incremental streaming Markdown to HTML converter.
//
// Architecture:
//   byte chunks → Parser::feed (line segmentation + one-line lookahead)
//     → line classifier (block stack) → inline tokenizer → ByteSink
//
// The parser consumes input in a single forward pass and emits output
// monotonically: bytes already in the sink are never rewritten, and any
// chunking of the same input produces the same output.

mod block;
mod error;
mod escape;
mod inline;
mod line;
mod parser;
mod sink;
mod table;

pub use error::RenderError;
pub use parser::Parser;
pub use sink::ByteSink;

/// Conversion options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Pass raw HTML tag spans in inline text through verbatim instead of
    /// entity-escaping them. Default: off.
    pub raw_html: bool,
}

impl Options {
    /// Create a new Options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether raw HTML tag spans pass through verbatim.
    pub fn with_raw_html(mut self, enabled: bool) -> Self {
        self.raw_html = enabled;
        self
    }
}

/// Convert a whole Markdown string to HTML using default options.
///
/// # Examples
///
/// ```
/// let html = tidemark::render("# Hello\n").unwrap();
/// assert_eq!(html, "<h1>Hello</h1>\n");
/// ```
pub fn render(markdown: &str) -> Result<String, RenderError> {
    render_with(markdown, &Options::default())
}

/// Convert a whole Markdown string to HTML with custom options.
///
/// # Examples
///
/// ```
/// use tidemark::{render_with, Options};
///
/// let options = Options::new().with_raw_html(true);
/// let html = render_with("a <b>b</b>\n", &options).unwrap();
/// assert_eq!(html, "<p>a <b>b</b></p>\n");
/// ```
pub fn render_with(markdown: &str, options: &Options) -> Result<String, RenderError> {
    let mut parser = Parser::new(options.raw_html);
    let mut sink = ByteSink::with_capacity(markdown.len() + markdown.len() / 2);
    parser.feed(markdown.as_bytes(), &mut sink);
    parser.finish(&mut sink);
    Ok(String::from_utf8(sink.into_bytes())?)
}
