// Block-level line classifier.
//
// Classifies one complete logical line (no trailing newline) against the
// current block stack and renders it. `lookahead` is a read-only view of
// the bytes after the line's newline; its first line is consulted by the
// table-header and definition-term rules. The return value tells the
// driver the lookahead line was consumed and must be skipped.
//
// Decision order matters and is fixed: code/math continuation, blank line,
// blockquote prefix, definition description, list item, code fence, math
// fence, heading, thematic break, table, definition term, paragraph.

use crate::block::BlockKind;
use crate::escape;
use crate::inline;
use crate::parser::Parser;
use crate::sink::ByteSink;
use crate::table::{self, Alignment};

pub(crate) fn classify(
    state: &mut Parser,
    line: &[u8],
    lookahead: &[u8],
    out: &mut ByteSink,
) -> bool {
    if leaf_continuation(state, line, out) {
        return false;
    }

    let leading = count_spaces(line);
    let mut rest = &line[leading..];

    if rest.is_empty() {
        state.stack.close_leaf_blocks(out);
        while state.stack.top_kind().is_some_and(BlockKind::closes_on_blank) {
            state.stack.pop_and_close(out);
        }
        return false;
    }

    rest = blockquote_prefix(state, rest, out);

    let definition_rest = definition_description(state, rest, leading, out);
    let is_definition = definition_rest.is_some();
    if let Some(remainder) = definition_rest {
        rest = remainder;
    }
    let list_rest = list_item(state, rest, leading, out);
    let is_list_item = list_rest.is_some();
    if let Some(remainder) = list_rest {
        rest = remainder;
    }

    if code_fence(state, rest, out) {
        return false;
    }
    if math_fence(state, rest, out) {
        return false;
    }
    if heading(state, rest, out) {
        return false;
    }
    if thematic_break(state, rest, out) {
        return false;
    }
    match table_line(state, rest, lookahead, out) {
        TableOutcome::HeaderConsumedSeparator => return true,
        TableOutcome::Row => return false,
        TableOutcome::NotTable => {}
    }
    if !is_definition && !is_list_item && definition_term(state, rest, lookahead, out) {
        return false;
    }

    paragraph(state, rest, is_definition, is_list_item, out);
    false
}

/// Inside a code or math block every line is literal until the closing
/// fence; no other block rule applies.
fn leaf_continuation(state: &mut Parser, line: &[u8], out: &mut ByteSink) -> bool {
    match state.stack.top_kind() {
        Some(BlockKind::Code) => {
            let trimmed = trim(line);
            if trimmed.len() >= 3 && trimmed.iter().all(|&b| b == b'`') {
                state.stack.pop_and_close(out);
            } else {
                escape::append_escaped(line, out);
                out.append_byte(b'\n');
            }
            true
        }
        Some(BlockKind::Math) => {
            if trim_start(line).starts_with(b"$$") {
                state.stack.pop_and_close(out);
            } else {
                escape::append_escaped(line, out);
                out.append_byte(b'\n');
            }
            true
        }
        _ => false,
    }
}

/// Count `>` markers (each optionally followed by one space), then reconcile
/// the quote depth on the stack with the line's depth. A paragraph line that
/// lost its `>` prefix but starts no new block stays in the quote (lazy
/// continuation). Returns the line content after the prefix.
fn blockquote_prefix<'a>(state: &mut Parser, mut rest: &'a [u8], out: &mut ByteSink) -> &'a [u8] {
    let mut line_quote = 0;
    while rest.first() == Some(&b'>') {
        line_quote += 1;
        rest = &rest[1..];
        if rest.first() == Some(&b' ') {
            rest = &rest[1..];
        }
    }

    let mut open_quotes = state.stack.count(BlockKind::Blockquote);
    if line_quote < open_quotes
        && state.stack.top_kind() == Some(BlockKind::Paragraph)
        && !starts_block(trim_start(rest))
    {
        line_quote = open_quotes;
    }

    while open_quotes > line_quote {
        let was_quote = state.stack.top_kind() == Some(BlockKind::Blockquote);
        state.stack.pop_and_close(out);
        if was_quote {
            open_quotes -= 1;
        }
    }
    while state.stack.depth() < line_quote {
        state.stack.close_paragraph_if_open(out);
        if !state.stack.try_push(BlockKind::Blockquote, 0) {
            break;
        }
        out.append(b"<blockquote>");
    }

    rest
}

/// Whether a space-trimmed line starts a block construct on its own. Used
/// to decide when a quote-less line may lazily continue a quoted paragraph.
fn starts_block(s: &[u8]) -> bool {
    s.starts_with(b"```")
        || s.starts_with(b"$$")
        || matches!(s.first(), Some(b'#') | Some(b':'))
        || s.starts_with(b"- ")
        || (s.len() >= 3 && s[0].is_ascii_digit() && s[1] == b'.' && s[2] == b' ')
        || s.starts_with(b"---")
        || s.starts_with(b"***")
        || s.starts_with(b"___")
}

/// `: ` opens a definition description. A previous description (and anything
/// nested in it) closes first; the enclosing `<dl>` opens on demand.
/// Returns the content after the marker when one was consumed.
fn definition_description<'a>(
    state: &mut Parser,
    rest: &'a [u8],
    leading: usize,
    out: &mut ByteSink,
) -> Option<&'a [u8]> {
    if !(rest.first() == Some(&b':') && rest.get(1) == Some(&b' ')) {
        return None;
    }

    state.stack.close_leaf_blocks(out);
    if state.stack.contains(BlockKind::DefinitionDescription) {
        while state.stack.depth() > 0
            && state.stack.top_kind() != Some(BlockKind::DefinitionList)
        {
            state.stack.pop_and_close(out);
        }
    }
    if !state.stack.contains(BlockKind::DefinitionList) {
        if !state.stack.try_push(BlockKind::DefinitionList, leading) {
            return None;
        }
        out.append(b"<dl>\n");
    }
    if state.stack.try_push(BlockKind::DefinitionDescription, leading) {
        out.append(b"<dd>");
    }

    let mut content = &rest[2..];
    while content.first() == Some(&b' ') {
        content = &content[1..];
    }
    Some(content)
}

/// `- ` / `1. ` list items. Lists nest by marker indent: deeper markers open
/// nested lists, shallower ones close back out, equal indent of the same
/// kind continues with the next `<li>`. Returns the item body when a marker
/// was consumed.
fn list_item<'a>(
    state: &mut Parser,
    rest: &'a [u8],
    leading: usize,
    out: &mut ByteSink,
) -> Option<&'a [u8]> {
    let internal = count_spaces(rest);
    let content = &rest[internal..];
    let (kind, marker_len) = if content.starts_with(b"- ") {
        (BlockKind::UnorderedList, 2)
    } else if content.len() >= 3
        && content[0].is_ascii_digit()
        && content[1] == b'.'
        && content[2] == b' '
    {
        (BlockKind::OrderedList, 3)
    } else {
        return None;
    };
    let indent = leading + internal;

    while let Some(top) = state.stack.top() {
        if !top.kind.is_list() {
            break;
        }
        if top.indent > indent || (top.indent == indent && top.kind != kind) {
            state.stack.pop_and_close(out);
        } else {
            break;
        }
    }

    let continues = state
        .stack
        .top()
        .is_some_and(|top| top.kind == kind && top.indent == indent);
    state.stack.close_leaf_blocks(out);
    if continues {
        out.append(b"</li>\n<li>");
    } else if state.stack.try_push(kind, indent) {
        out.append(match kind {
            BlockKind::UnorderedList => b"<ul>\n<li>" as &[u8],
            _ => b"<ol>\n<li>",
        });
    }

    let mut body = &content[marker_len..];
    if kind == BlockKind::UnorderedList {
        if let Some(after) = task_marker(body, out) {
            body = after;
        }
    }
    Some(body)
}

/// `[ ] ` / `[x] ` right after an unordered bullet renders a disabled
/// checkbox. Returns the body after the marker when one was consumed.
fn task_marker<'a>(body: &'a [u8], out: &mut ByteSink) -> Option<&'a [u8]> {
    if body.len() < 4 || body[0] != b'[' || body[2] != b']' || body[3] != b' ' {
        return None;
    }
    match body[1] {
        b'x' => out.append(b"<input type=\"checkbox\" checked disabled> "),
        b' ' => out.append(b"<input type=\"checkbox\" disabled> "),
        _ => return None,
    }
    Some(&body[4..])
}

/// Three backticks open a fenced code block; the info string up to the
/// first whitespace becomes a `language-…` class.
fn code_fence(state: &mut Parser, rest: &[u8], out: &mut ByteSink) -> bool {
    if !rest.starts_with(b"```") {
        return false;
    }
    state.stack.close_leaf_blocks(out);
    if !state.stack.try_push(BlockKind::Code, 0) {
        return false;
    }
    out.append(b"<pre><code");
    let info = &rest[3..];
    let lang_len = info
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(info.len());
    if lang_len > 0 {
        out.append(b" class=\"language-");
        escape::append_escaped(&info[..lang_len], out);
        out.append(b"\"");
    }
    out.append(b">");
    true
}

/// `$$` opens a display math block; the rest of the fence line is dropped.
fn math_fence(state: &mut Parser, rest: &[u8], out: &mut ByteSink) -> bool {
    if !rest.starts_with(b"$$") {
        return false;
    }
    state.stack.close_leaf_blocks(out);
    if !state.stack.try_push(BlockKind::Math, 0) {
        return false;
    }
    out.append(b"<div class=\"math\">\n");
    true
}

/// ATX headings: 1–6 `#` followed by a space.
fn heading(state: &mut Parser, rest: &[u8], out: &mut ByteSink) -> bool {
    if rest.first() != Some(&b'#') {
        return false;
    }
    let level = rest.iter().take(6).take_while(|&&b| b == b'#').count();
    if rest.get(level) != Some(&b' ') {
        return false;
    }
    state.stack.close_leaf_blocks(out);
    let digit = b'0' + level as u8;
    out.append(&[b'<', b'h', digit, b'>']);
    inline::tokenize(&rest[level + 1..], state.raw_html, out);
    out.append(&[b'<', b'/', b'h', digit, b'>', b'\n']);
    true
}

/// Exactly `---`, `***`, or `___`.
fn thematic_break(state: &mut Parser, rest: &[u8], out: &mut ByteSink) -> bool {
    if !(rest == b"---" || rest == b"***" || rest == b"___") {
        return false;
    }
    state.stack.close_leaf_blocks(out);
    out.append(b"<hr>\n");
    true
}

enum TableOutcome {
    /// A header row was emitted and the separator in the lookahead consumed.
    HeaderConsumedSeparator,
    Row,
    NotTable,
}

/// `|` lines: a body row when a table is open; otherwise a header candidate
/// whose lookahead line must be a valid separator row.
fn table_line(
    state: &mut Parser,
    rest: &[u8],
    lookahead: &[u8],
    out: &mut ByteSink,
) -> TableOutcome {
    if rest.first() != Some(&b'|') {
        return TableOutcome::NotTable;
    }

    if state.stack.top_kind() == Some(BlockKind::Table) {
        out.append(b"<tr>");
        emit_cells(state, rest, b"td", out);
        out.append(b"</tr>\n");
        return TableOutcome::Row;
    }

    let Some(alignments) = table::separator_alignments(next_line(lookahead)) else {
        return TableOutcome::NotTable;
    };
    state.stack.close_leaf_blocks(out);
    if !state.stack.try_push(BlockKind::Table, 0) {
        return TableOutcome::NotTable;
    }
    state.alignments = alignments;
    out.append(b"<table><thead><tr>");
    emit_cells(state, rest, b"th", out);
    out.append(b"</tr></thead><tbody>\n");
    TableOutcome::HeaderConsumedSeparator
}

fn emit_cells(state: &mut Parser, row: &[u8], tag: &[u8], out: &mut ByteSink) {
    for (idx, cell) in table::split_row(row).into_iter().enumerate() {
        let alignment = state
            .alignments
            .get(idx)
            .copied()
            .unwrap_or(Alignment::None);
        out.append_byte(b'<');
        out.append(tag);
        if let Some(style) = alignment.style_attr() {
            out.append(style.as_bytes());
        }
        out.append_byte(b'>');
        inline::tokenize(cell, state.raw_html, out);
        out.append(b"</");
        out.append(tag);
        out.append_byte(b'>');
    }
}

/// A plain line followed by a `:`-led line is a definition term.
fn definition_term(
    state: &mut Parser,
    rest: &[u8],
    lookahead: &[u8],
    out: &mut ByteSink,
) -> bool {
    if lookahead.is_empty() {
        return false;
    }
    if trim_start(next_line(lookahead)).first() != Some(&b':') {
        return false;
    }
    state.stack.close_leaf_blocks(out);
    if state.stack.top_kind() != Some(BlockKind::DefinitionList) {
        if !state.stack.try_push(BlockKind::DefinitionList, 0) {
            return false;
        }
        out.append(b"<dl>\n");
    }
    out.append(b"<dt>");
    inline::tokenize(rest, state.raw_html, out);
    out.append(b"</dt>\n");
    true
}

/// Everything else is paragraph content. Inside a list item or definition
/// description the text flows directly into the open element; elsewhere a
/// `<p>` opens. A trailing double space is a hard break.
fn paragraph(
    state: &mut Parser,
    rest: &[u8],
    is_definition: bool,
    is_list_item: bool,
    out: &mut ByteSink,
) {
    let top = state.stack.top_kind();
    let in_container = matches!(
        top,
        Some(BlockKind::UnorderedList)
            | Some(BlockKind::OrderedList)
            | Some(BlockKind::DefinitionDescription)
    );
    if top != Some(BlockKind::Paragraph) && !in_container {
        // A stale table can still be on top here; only one leaf stays open.
        state.stack.close_leaf_blocks(out);
        if state.stack.try_push(BlockKind::Paragraph, 0) {
            out.append(b"<p>");
        }
    } else if top == Some(BlockKind::Paragraph) || (!is_list_item && !is_definition) {
        out.append_byte(b'\n');
    }

    let hard_break =
        rest.len() >= 2 && rest[rest.len() - 1] == b' ' && rest[rest.len() - 2] == b' ';
    let content = if hard_break {
        &rest[..rest.len() - 2]
    } else {
        rest
    };
    inline::tokenize(content, state.raw_html, out);
    if hard_break {
        out.append(b"<br>");
    }
}

fn count_spaces(s: &[u8]) -> usize {
    s.iter().take_while(|&&b| b == b' ').count()
}

fn trim_start(s: &[u8]) -> &[u8] {
    let start = s.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &s[start..]
}

fn trim(s: &[u8]) -> &[u8] {
    let s = trim_start(s);
    let end = s.len() - s.iter().rev().take_while(|b| b.is_ascii_whitespace()).count();
    &s[..end]
}

/// The lookahead's first line: everything up to its newline, or the whole
/// residual tail at end of input.
fn next_line(lookahead: &[u8]) -> &[u8] {
    match lookahead.iter().position(|&b| b == b'\n') {
        Some(nl) => &lookahead[..nl],
        None => lookahead,
    }
}
