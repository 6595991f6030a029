// End-to-end document semantics.
//
// Inputs go through the full streaming pipeline in one feed; expectations
// are the exact output bytes, final block closes included.

use pretty_assertions::assert_eq;
use tidemark::{render, render_with, Options};

fn html(input: &str) -> String {
    render(input).unwrap()
}

// ---------------------------------------------------------------------------
// Paragraphs and headings
// ---------------------------------------------------------------------------

#[test]
fn simple_paragraph() {
    assert_eq!(html("Hello, tidemark!"), "<p>Hello, tidemark!</p>\n");
}

#[test]
fn adjacent_lines_share_a_paragraph() {
    assert_eq!(html("Line 1\nLine 2"), "<p>Line 1\nLine 2</p>\n");
}

#[test]
fn blank_line_separates_paragraphs() {
    assert_eq!(html("one\n\ntwo\n"), "<p>one</p>\n<p>two</p>\n");
}

#[test]
fn heading_levels() {
    assert_eq!(html("# Welcome"), "<h1>Welcome</h1>\n");
    assert_eq!(html("## Subtitle"), "<h2>Subtitle</h2>\n");
    assert_eq!(html("###### Deep"), "<h6>Deep</h6>\n");
}

#[test]
fn seven_hashes_is_not_a_heading() {
    assert_eq!(html("####### Nope"), "<p>####### Nope</p>\n");
}

#[test]
fn hash_without_space_is_not_a_heading() {
    assert_eq!(html("#tag"), "<p>#tag</p>\n");
}

#[test]
fn horizontal_rules() {
    assert_eq!(html("---"), "<hr>\n");
    assert_eq!(html("***"), "<hr>\n");
    assert_eq!(html("___"), "<hr>\n");
}

#[test]
fn four_dashes_is_not_a_rule() {
    assert_eq!(html("----"), "<p>----</p>\n");
}

// ---------------------------------------------------------------------------
// Inline spans inside blocks
// ---------------------------------------------------------------------------

#[test]
fn strong_style() {
    assert_eq!(html("**Bold**"), "<p><strong>Bold</strong></p>\n");
}

#[test]
fn emphasis_style() {
    assert_eq!(html("*Italic*"), "<p><em>Italic</em></p>\n");
}

#[test]
fn triple_run_nests_strong_and_em() {
    assert_eq!(
        html("***Bold Italic***"),
        "<p><strong><em>Bold Italic</em></strong></p>\n"
    );
}

#[test]
fn inline_code() {
    assert_eq!(html("`code`"), "<p><code>code</code></p>\n");
}

#[test]
fn mixed_inline_styles() {
    assert_eq!(
        html("**Bold** and *Italic* and `Code`"),
        "<p><strong>Bold</strong> and <em>Italic</em> and <code>Code</code></p>\n"
    );
}

#[test]
fn strikethrough() {
    assert_eq!(html("~~Deleted text~~"), "<p><del>Deleted text</del></p>\n");
}

#[test]
fn backslash_escaping() {
    assert_eq!(html("\\*Not Bold\\*"), "<p>*Not Bold*</p>\n");
}

#[test]
fn link() {
    assert_eq!(
        html("[Search](https://example.com)"),
        "<p><a href=\"https://example.com\">Search</a></p>\n"
    );
}

#[test]
fn image() {
    assert_eq!(
        html("![Logo](https://example.com/logo.png)"),
        "<p><img src=\"https://example.com/logo.png\" alt=\"Logo\"></p>\n"
    );
}

#[test]
fn autolink() {
    assert_eq!(
        html("Search on https://example.com now"),
        "<p>Search on <a href=\"https://example.com\">https://example.com</a> now</p>\n"
    );
}

#[test]
fn inline_math() {
    assert_eq!(
        html("The formula $E=mc^2$ is famous."),
        "<p>The formula <span class=\"math\">E=mc^2</span> is famous.</p>\n"
    );
}

#[test]
fn unclosed_spans_stay_literal() {
    assert_eq!(html("a *b and `c"), "<p>a *b and `c</p>\n");
    assert_eq!(html("[text] without url"), "<p>[text] without url</p>\n");
}

// ---------------------------------------------------------------------------
// Hard breaks
// ---------------------------------------------------------------------------

#[test]
fn two_trailing_spaces_break() {
    assert_eq!(html("Line 1  \nLine 2"), "<p>Line 1<br>\nLine 2</p>\n");
}

#[test]
fn trailing_backslash_break() {
    assert_eq!(html("Line 1\\\nLine 2"), "<p>Line 1<br>\nLine 2</p>\n");
}

// ---------------------------------------------------------------------------
// Code and math blocks
// ---------------------------------------------------------------------------

#[test]
fn fenced_code_with_language() {
    assert_eq!(
        html("```js\nconst x = 1;\n```"),
        "<pre><code class=\"language-js\">const x = 1;\n</code></pre>\n"
    );
}

#[test]
fn fenced_code_without_language() {
    assert_eq!(html("```\nx\n```\n"), "<pre><code>x\n</code></pre>\n");
}

#[test]
fn code_block_content_is_escaped_verbatim() {
    assert_eq!(
        html("```\n# not a heading\n- not a list\n<b>\n```\n"),
        "<pre><code># not a heading\n- not a list\n&lt;b&gt;\n</code></pre>\n"
    );
}

#[test]
fn unclosed_code_block_closes_at_end_of_input() {
    assert_eq!(html("```\ndangling"), "<pre><code>dangling\n</code></pre>\n");
}

#[test]
fn math_block() {
    assert_eq!(html("$$E=mc^2$$"), "<div class=\"math\">\n</div>\n");
    assert_eq!(
        html("$$\nE = mc^2\n$$\n"),
        "<div class=\"math\">\nE = mc^2\n</div>\n"
    );
}

// ---------------------------------------------------------------------------
// Blockquotes
// ---------------------------------------------------------------------------

#[test]
fn nested_blockquotes() {
    assert_eq!(
        html("> > Double quote"),
        "<blockquote><blockquote><p>Double quote</p>\n</blockquote>\n</blockquote>\n"
    );
}

#[test]
fn lazy_blockquote_continuation() {
    assert_eq!(
        html("> Line 1\nLine 2"),
        "<blockquote><p>Line 1\nLine 2</p>\n</blockquote>\n"
    );
}

#[test]
fn block_marker_ends_lazy_continuation() {
    assert_eq!(
        html("> Line 1\n## Header"),
        "<blockquote><p>Line 1</p>\n</blockquote>\n<h2>Header</h2>\n"
    );
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[test]
fn unordered_list() {
    assert_eq!(
        html("- Item 1\n- Item 2"),
        "<ul>\n<li>Item 1</li>\n<li>Item 2</li>\n</ul>\n"
    );
}

#[test]
fn ordered_list() {
    assert_eq!(
        html("1. Item 1\n2. Item 2"),
        "<ol>\n<li>Item 1</li>\n<li>Item 2</li>\n</ol>\n"
    );
}

#[test]
fn task_list() {
    assert_eq!(
        html("- [ ] Todo\n- [x] Done"),
        "<ul>\n<li><input type=\"checkbox\" disabled> Todo</li>\n\
         <li><input type=\"checkbox\" checked disabled> Done</li>\n</ul>\n"
    );
}

#[test]
fn two_space_nested_list() {
    assert_eq!(
        html("- Level 1\n  - Level 2\n- Back to 1"),
        "<ul>\n<li>Level 1<ul>\n<li>Level 2</li>\n</ul>\n</li>\n<li>Back to 1</li>\n</ul>\n"
    );
}

#[test]
fn list_kind_switch_at_same_indent() {
    assert_eq!(
        html("- Bullet\n1. Numbered"),
        "<ul>\n<li>Bullet</li>\n</ul>\n<ol>\n<li>Numbered</li>\n</ol>\n"
    );
}

#[test]
fn lazy_list_continuation() {
    assert_eq!(
        html("- Item 1\nContinued"),
        "<ul>\n<li>Item 1\nContinued</li>\n</ul>\n"
    );
}

#[test]
fn indented_list_continuation() {
    assert_eq!(
        html("- Item 1\n  Continued"),
        "<ul>\n<li>Item 1\nContinued</li>\n</ul>\n"
    );
}

// ---------------------------------------------------------------------------
// Definition lists
// ---------------------------------------------------------------------------

#[test]
fn definition_list() {
    assert_eq!(
        html("Term\n: Def 1\n: Def 2"),
        "<dl>\n<dt>Term</dt>\n<dd>Def 1</dd>\n<dd>Def 2</dd>\n</dl>\n"
    );
}

#[test]
fn definition_description_holds_blocks() {
    assert_eq!(
        html("Term\n: # Def Heading\n: - Item 1\n: - Item 2"),
        "<dl>\n<dt>Term</dt>\n<dd><h1>Def Heading</h1>\n</dd>\n\
         <dd><ul>\n<li>Item 1</li>\n</ul>\n</dd>\n\
         <dd><ul>\n<li>Item 2</li>\n</ul>\n</dd>\n</dl>\n"
    );
}

#[test]
fn definition_description_continuation() {
    assert_eq!(
        html("Term\n: Def 1\n  Continued"),
        "<dl>\n<dt>Term</dt>\n<dd>Def 1\nContinued</dd>\n</dl>\n"
    );
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[test]
fn table_with_alignment() {
    assert_eq!(
        html("| Header | Value |\n|--|--:|\n| Data | 100 |"),
        "<table><thead><tr><th>Header</th>\
         <th style=\"text-align:right\">Value</th></tr></thead><tbody>\n\
         <tr><td>Data</td><td style=\"text-align:right\">100</td></tr>\n\
         </tbody></table>\n"
    );
}

#[test]
fn table_seed_scenario() {
    assert_eq!(
        html("| H |\n|---|\n| x |\n"),
        "<table><thead><tr><th>H</th></tr></thead><tbody>\n\
         <tr><td>x</td></tr>\n</tbody></table>\n"
    );
}

#[test]
fn center_alignment() {
    assert_eq!(
        html("| a |\n|:-:|\n| b |\n"),
        "<table><thead><tr><th style=\"text-align:center\">a</th></tr></thead><tbody>\n\
         <tr><td style=\"text-align:center\">b</td></tr>\n</tbody></table>\n"
    );
}

#[test]
fn pipe_line_without_separator_is_a_paragraph() {
    assert_eq!(html("| a |\nplain"), "<p>| a |\nplain</p>\n");
}

#[test]
fn invalid_separator_is_a_paragraph() {
    assert_eq!(html("| a |\n| b |"), "<p>| a |\n| b |</p>\n");
}

#[test]
fn row_cell_count_may_differ_from_header() {
    assert_eq!(
        html("| a | b |\n|---|---|\n| only |\n"),
        "<table><thead><tr><th>a</th><th>b</th></tr></thead><tbody>\n\
         <tr><td>only</td></tr>\n</tbody></table>\n"
    );
}

// ---------------------------------------------------------------------------
// Raw HTML pass-through
// ---------------------------------------------------------------------------

#[test]
fn raw_html_disabled_escapes_tags() {
    assert_eq!(
        html("<b>Bold</b>"),
        "<p>&lt;b&gt;Bold&lt;/b&gt;</p>\n"
    );
}

#[test]
fn raw_html_enabled_passes_tag_shapes_through() {
    let options = Options::new().with_raw_html(true);
    let input = "<b>Bold</b> <DIV>Mixed</DIV> <sPaN class=\"foo\">Span</sPaN> \
                 <br/> <!-- Comment --> <invalid\n\
                 Mixed with **Markdown**: <i>Italic</i> and `code`";
    let expected = "<p><b>Bold</b> <DIV>Mixed</DIV> <sPaN class=\"foo\">Span</sPaN> \
                    <br/> <!-- Comment --> &lt;invalid\n\
                    Mixed with <strong>Markdown</strong>: <i>Italic</i> and <code>code</code></p>\n";
    assert_eq!(render_with(input, &options).unwrap(), expected);
}

// ---------------------------------------------------------------------------
// Totality
// ---------------------------------------------------------------------------

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(html(""), "");
    assert_eq!(html("\n\n\n"), "");
}

#[test]
fn non_ascii_passes_through() {
    assert_eq!(html("# héllo → wörld\n"), "<h1>héllo → wörld</h1>\n");
}
