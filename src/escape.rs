// HTML entity escaping and the inline-significance predicate.
//
// Two 256-entry tables, both built at compile time. ENTITY maps the five
// bytes with a reserved meaning in HTML to their entity spelling; every
// other entry is empty. INLINE_SIGNIFICANT marks the bytes the inline
// tokenizer has to stop at — everything else is copied through in bulk.

use crate::sink::ByteSink;

/// Bytes the inline tokenizer must inspect one at a time. `h` is included
/// because it may start a bare `http://` / `https://` autolink.
const SIGNIFICANT_BYTES: &[u8] = b"\\['*`&<>\"_~!$h";

/// `true` for bytes that can start an inline construct or need escaping.
pub(crate) static INLINE_SIGNIFICANT: [bool; 256] = build_significant();

/// Byte → HTML entity; the empty string for bytes emitted verbatim.
pub(crate) static ENTITY: [&str; 256] = build_entities();

const fn build_significant() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < SIGNIFICANT_BYTES.len() {
        table[SIGNIFICANT_BYTES[i] as usize] = true;
        i += 1;
    }
    table
}

const fn build_entities() -> [&'static str; 256] {
    let mut table = [""; 256];
    table[b'&' as usize] = "&amp;";
    table[b'<' as usize] = "&lt;";
    table[b'>' as usize] = "&gt;";
    table[b'"' as usize] = "&quot;";
    table[b'\'' as usize] = "&#39;";
    table
}

/// Append `text` to `out`, replacing reserved bytes with their entities.
pub(crate) fn append_escaped(text: &[u8], out: &mut ByteSink) {
    // Runs of plain bytes are appended in one call; only entity bytes break
    // the run.
    let mut start = 0;
    for (i, &b) in text.iter().enumerate() {
        let entity = ENTITY[b as usize];
        if !entity.is_empty() {
            out.append(&text[start..i]);
            out.append(entity.as_bytes());
            start = i + 1;
        }
    }
    out.append(&text[start..]);
}

/// Append a single byte, escaped if it has an entity.
pub(crate) fn append_escaped_byte(b: u8, out: &mut ByteSink) {
    let entity = ENTITY[b as usize];
    if entity.is_empty() {
        out.append_byte(b);
    } else {
        out.append(entity.as_bytes());
    }
}
