// Streaming driver.
//
// feed() accumulates bytes, slices complete lines off the front, and runs
// the classifier on each with a read-only view of what follows as
// lookahead. A line is only classified once the line after it is
// newline-terminated, so lookahead decisions (table headers, definition
// terms) see the same bytes no matter how the input was chunked; finish()
// then treats the unterminated tail as the final line. Already-emitted
// output is never rewritten.

use crate::block::BlockStack;
use crate::line;
use crate::sink::ByteSink;
use crate::table::Alignment;

/// Incremental Markdown→HTML parser.
///
/// Feed it byte chunks of any size in order, then call [`finish`] exactly
/// once; HTML accumulates in the caller's [`ByteSink`]. Every byte sequence
/// is valid input — there is no error path.
///
/// [`finish`]: Parser::finish
///
/// # Examples
///
/// ```
/// use tidemark::{ByteSink, Parser};
///
/// let mut parser = Parser::new(false);
/// let mut sink = ByteSink::new();
/// parser.feed(b"# Hi\n", &mut sink);
/// parser.finish(&mut sink);
/// assert_eq!(sink.as_bytes(), b"<h1>Hi</h1>\n");
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    pub(crate) stack: BlockStack,
    pub(crate) alignments: Vec<Alignment>,
    pub(crate) raw_html: bool,
    leftover: Vec<u8>,
}

impl Parser {
    /// Create a parser. With `enable_html`, raw HTML tag spans in inline
    /// text pass through verbatim instead of being entity-escaped.
    pub fn new(enable_html: bool) -> Self {
        Self {
            raw_html: enable_html,
            ..Self::default()
        }
    }

    /// Consume one chunk of input, appending any HTML it completes to
    /// `sink`. The unterminated tail (and a final line whose lookahead is
    /// still incomplete) is retained for the next call.
    pub fn feed(&mut self, chunk: &[u8], sink: &mut ByteSink) {
        #[cfg(feature = "tracing")]
        tracing::trace!(bytes = chunk.len(), pending = self.leftover.len(), "feed");

        self.leftover.extend_from_slice(chunk);
        let mut data = std::mem::take(&mut self.leftover);

        let mut pos = 0;
        while let Some(nl) = find_newline(&data[pos..]) {
            let line_end = pos + nl;
            let lookahead_start = line_end + 1;
            if find_newline(&data[lookahead_start..]).is_none() {
                // The lookahead line is incomplete; classify both later.
                break;
            }
            let consumed_next = line::classify(
                self,
                &data[pos..line_end],
                &data[lookahead_start..],
                sink,
            );
            pos = lookahead_start;
            if consumed_next {
                pos = skip_line(&data, pos);
            }
        }

        data.drain(..pos);
        self.leftover = data;
    }

    /// Flush the stream: process the residual tail as final lines, then
    /// close every open block in stack order.
    pub fn finish(&mut self, sink: &mut ByteSink) {
        #[cfg(feature = "tracing")]
        tracing::trace!(pending = self.leftover.len(), "finish");

        let data = std::mem::take(&mut self.leftover);
        let mut pos = 0;
        while pos < data.len() {
            let (line_end, next_pos) = match find_newline(&data[pos..]) {
                Some(nl) => (pos + nl, pos + nl + 1),
                None => (data.len(), data.len()),
            };
            let consumed_next =
                line::classify(self, &data[pos..line_end], &data[next_pos..], sink);
            pos = next_pos;
            if consumed_next {
                pos = skip_line(&data, pos);
            }
        }

        self.stack.close_all(sink);
    }
}

fn find_newline(data: &[u8]) -> Option<usize> {
    data.iter().position(|&b| b == b'\n')
}

/// Position just past the line starting at `pos` (end of data if it is
/// unterminated).
fn skip_line(data: &[u8], pos: usize) -> usize {
    match find_newline(&data[pos..]) {
        Some(nl) => pos + nl + 1,
        None => data.len(),
    }
}
