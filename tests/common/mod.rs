// Shared test helpers for tidemark.

use std::fs;
use std::path::Path;

/// Load a test fixture's input Markdown and expected HTML output.
///
/// Fixture directories contain `input.md` and `expected.html`.
pub fn load_fixture(name: &str) -> (String, String) {
    let base = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-fixtures")
        .join(name);
    let md = fs::read_to_string(base.join("input.md"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/input.md", name));
    let html = fs::read_to_string(base.join("expected.html"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/expected.html", name));
    (md, html)
}
