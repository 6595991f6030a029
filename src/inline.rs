// Inline (span) tokenizer.
//
// Converts the inline-parsable content of one block — outer block markers
// already stripped — into HTML appended to the sink. The scanning loop
// copies plain bytes through in bulk and dispatches on the first
// significant byte; at each position the first matching construct wins.
// Every input is valid: a construct that fails to close inside the
// fragment degrades to literal text.

use crate::escape::{self, INLINE_SIGNIFICANT};
use crate::sink::ByteSink;

// Indexed by delimiter-run length (runs of 4+ clamp to 3).
const EMPHASIS_OPEN: [&str; 4] = ["", "<em>", "<strong>", "<strong><em>"];
const EMPHASIS_CLOSE: [&str; 4] = ["", "</em>", "</strong>", "</em></strong>"];

/// Bytes that end a bare `http(s)://` autolink, besides whitespace.
const URL_TERMINATORS: &[u8] = b"<>\"'[]()";

/// Render one fragment of span-level Markdown into `out`.
pub(crate) fn tokenize(text: &[u8], raw_html: bool, out: &mut ByteSink) {
    let mut i = 0;
    while i < text.len() {
        let start = i;
        // Fast path: take eight bytes per step while none is significant,
        // then locate the exact offset byte-by-byte.
        while i + 8 <= text.len() {
            let word = &text[i..i + 8];
            if word.iter().any(|&b| INLINE_SIGNIFICANT[b as usize]) {
                break;
            }
            i += 8;
        }
        while i < text.len() && !INLINE_SIGNIFICANT[text[i] as usize] {
            i += 1;
        }
        if i > start {
            out.append(&text[start..i]);
        }
        if i >= text.len() {
            break;
        }

        if text[i] == b'<' && raw_html {
            if let Some(tag_len) = raw_html_len(&text[i..]) {
                out.append(&text[i..i + tag_len]);
                i += tag_len;
                continue;
            }
        }

        i = match text[i] {
            b'\\' => backslash_escape(text, i, out),
            b'*' | b'_' => emphasis(text, i, raw_html, out),
            b'`' => code_span(text, i, out),
            b'~' if text.get(i + 1) == Some(&b'~') => strikethrough(text, i, raw_html, out),
            b'!' | b'[' => link_or_image(text, i, raw_html, out),
            b'h' => autolink(text, i, out),
            b'<' if !raw_html => angle_autolink(text, i, out),
            b'$' => math_span(text, i, out),
            b => {
                escape::append_escaped_byte(b, out);
                i + 1
            }
        };
    }
}

/// `\x` emits `x` (escaped); a backslash ending the fragment is a hard break.
fn backslash_escape(text: &[u8], i: usize, out: &mut ByteSink) -> usize {
    match text.get(i + 1) {
        Some(&b) => {
            escape::append_escaped_byte(b, out);
            i + 2
        }
        None => {
            out.append(b"<br>");
            i + 1
        }
    }
}

/// Length of the run of `delim` bytes starting at `i`.
fn run_len(text: &[u8], i: usize, delim: u8) -> usize {
    let mut n = 0;
    while text.get(i + n) == Some(&delim) {
        n += 1;
    }
    n
}

/// First position at or after `from` with at least `n` consecutive `delim` bytes.
fn find_closing_run(text: &[u8], from: usize, delim: u8, n: usize) -> Option<usize> {
    let mut j = from;
    while j < text.len() {
        if text[j] == delim {
            let m = run_len(text, j, delim);
            if m >= n {
                return Some(j);
            }
            j += m;
        } else {
            j += 1;
        }
    }
    None
}

/// `*`/`_` runs: 1 → em, 2 → strong, 3 → strong+em; longer runs clamp to 3.
/// An opener with no matching closer in the fragment is literal text.
fn emphasis(text: &[u8], i: usize, raw_html: bool, out: &mut ByteSink) -> usize {
    let delim = text[i];
    let n = run_len(text, i, delim).min(3);
    match find_closing_run(text, i + n, delim, n) {
        Some(close) => {
            out.append(EMPHASIS_OPEN[n].as_bytes());
            tokenize(&text[i + n..close], raw_html, out);
            out.append(EMPHASIS_CLOSE[n].as_bytes());
            close + n
        }
        None => {
            out.append(&text[i..i + n]);
            i + n
        }
    }
}

/// Backtick code span: an opening run of N backticks closes on the next run
/// of at least N. Content is entity-escaped, never re-tokenized.
fn code_span(text: &[u8], i: usize, out: &mut ByteSink) -> usize {
    let n = run_len(text, i, b'`');
    match find_closing_run(text, i + n, b'`', n) {
        Some(close) => {
            out.append(b"<code>");
            escape::append_escaped(&text[i + n..close], out);
            out.append(b"</code>");
            close + n
        }
        None => {
            out.append(&text[i..i + n]);
            i + n
        }
    }
}

fn strikethrough(text: &[u8], i: usize, raw_html: bool, out: &mut ByteSink) -> usize {
    match find_closing_run(text, i + 2, b'~', 2) {
        Some(close) => {
            out.append(b"<del>");
            tokenize(&text[i + 2..close], raw_html, out);
            out.append(b"</del>");
            close + 2
        }
        None => {
            out.append_byte(b'~');
            i + 1
        }
    }
}

/// `[text](url)` and `![alt](url)`. The label may contain nested brackets
/// (tracked by depth); the destination may not contain a space. On any
/// shape mismatch the trigger byte is emitted literally and scanning
/// resumes right after it.
fn link_or_image(text: &[u8], i: usize, raw_html: bool, out: &mut ByteSink) -> usize {
    let is_image = text[i] == b'!';
    let open = if is_image { i + 1 } else { i };
    let literal = |out: &mut ByteSink| {
        out.append_byte(text[i]);
        i + 1
    };
    if text.get(open) != Some(&b'[') {
        return literal(out);
    }

    let label_start = open + 1;
    let mut j = label_start;
    let mut depth = 1usize;
    while j < text.len() && depth > 0 {
        match text[j] {
            b'[' => depth += 1,
            b']' => depth -= 1,
            _ => {}
        }
        j += 1;
    }
    if depth != 0 || text.get(j) != Some(&b'(') {
        return literal(out);
    }
    let label = &text[label_start..j - 1];

    let url_start = j + 1;
    let Some(url_len) = text[url_start..].iter().position(|&b| b == b')') else {
        return literal(out);
    };
    let url = &text[url_start..url_start + url_len];
    if url.contains(&b' ') {
        return literal(out);
    }

    if is_image {
        out.append(b"<img src=\"");
        escape::append_escaped(url, out);
        out.append(b"\" alt=\"");
        escape::append_escaped(label, out);
        out.append(b"\">");
    } else {
        out.append(b"<a href=\"");
        escape::append_escaped(url, out);
        out.append(b"\">");
        tokenize(label, raw_html, out);
        out.append(b"</a>");
    }
    url_start + url_len + 1
}

/// Bare `http://` / `https://` autolink, ending at whitespace or a
/// bracket/quote byte. The scheme alone is not a link.
fn autolink(text: &[u8], i: usize, out: &mut ByteSink) -> usize {
    let rest = &text[i..];
    let scheme_len = if rest.starts_with(b"https://") {
        8
    } else if rest.starts_with(b"http://") {
        7
    } else {
        out.append_byte(b'h');
        return i + 1;
    };

    let mut k = i + scheme_len;
    while k < text.len() && !text[k].is_ascii_whitespace() && !URL_TERMINATORS.contains(&text[k]) {
        k += 1;
    }
    if k == i + scheme_len {
        out.append_byte(b'h');
        return i + 1;
    }

    let url = &text[i..k];
    out.append(b"<a href=\"");
    escape::append_escaped(url, out);
    out.append(b"\">");
    escape::append_escaped(url, out);
    out.append(b"</a>");
    k
}

/// `<http://…>` autolink, recognized only while raw HTML is off (with raw
/// HTML on, the same span parses as a tag shape and passes through).
fn angle_autolink(text: &[u8], i: usize, out: &mut ByteSink) -> usize {
    let inner = &text[i + 1..];
    if inner.starts_with(b"http://") || inner.starts_with(b"https://") {
        if let Some(close) = inner.iter().position(|&b| b == b'>') {
            let url = &inner[..close];
            let clean = url
                .iter()
                .all(|&b| !b.is_ascii_whitespace() && b != b'<' && b != b'"' && b != b'\'');
            if clean {
                out.append(b"<a href=\"");
                escape::append_escaped(url, out);
                out.append(b"\">");
                escape::append_escaped(url, out);
                out.append(b"</a>");
                return i + close + 2;
            }
        }
    }
    escape::append_escaped_byte(b'<', out);
    i + 1
}

/// `$…$` math span on a single fragment; content is entity-escaped literally.
fn math_span(text: &[u8], i: usize, out: &mut ByteSink) -> usize {
    match text[i + 1..].iter().position(|&b| b == b'$') {
        Some(rel) => {
            let close = i + 1 + rel;
            out.append(b"<span class=\"math\">");
            escape::append_escaped(&text[i + 1..close], out);
            out.append(b"</span>");
            close + 1
        }
        None => {
            out.append_byte(b'$');
            i + 1
        }
    }
}

/// Byte length of a raw HTML span starting at `<`, or None if the shape is
/// not recognized. Accepted shapes: comments, CDATA sections, processing
/// instructions, `<!…>` declarations, and open/close tags whose name starts
/// with an ASCII letter, with optionally quoted attribute values.
fn raw_html_len(text: &[u8]) -> Option<usize> {
    if text.len() < 3 || text[0] != b'<' {
        return None;
    }

    if text[1..].starts_with(b"!--") {
        return find_subslice(&text[4..], b"-->").map(|p| 4 + p + 3);
    }
    if text[1..].starts_with(b"![CDATA[") {
        return find_subslice(&text[9..], b"]]>").map(|p| 9 + p + 3);
    }
    if text[1] == b'?' {
        return find_subslice(&text[2..], b"?>").map(|p| 2 + p + 2);
    }
    if text[1] == b'!' {
        return text[2..].iter().position(|&b| b == b'>').map(|p| 2 + p + 1);
    }

    let mut i = 1;
    if text[i] == b'/' {
        i += 1;
    }
    if i >= text.len() || !text[i].is_ascii_alphabetic() {
        return None;
    }
    while i < text.len()
        && (text[i].is_ascii_alphanumeric() || text[i] == b'-' || text[i] == b':')
    {
        i += 1;
    }
    // Attributes: skip to `>`, honoring quoted values that may contain one.
    while i < text.len() && text[i] != b'>' {
        let c = text[i];
        if c == b'"' || c == b'\'' {
            i += 1;
            while i < text.len() && text[i] != c {
                i += 1;
            }
            if i >= text.len() {
                return None;
            }
        }
        i += 1;
    }
    if i < text.len() && text[i] == b'>' {
        Some(i + 1)
    } else {
        None
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
