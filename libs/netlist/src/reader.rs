//! Physical-to-logical line reassembly.
//!
//! The grammars observe logical lines: physical lines joined across the
//! SPICE continuation conventions. A line starting with `+` continues its
//! predecessor with a space; a line ending in `\` continues onto the next
//! with a space; a line ending in `\\` continues with *no* separator (an
//! in-expression split); a stray line starting with `)` is folded into the
//! previous statement, which HSPICE and PSPICE tolerate in `.MODEL` bodies.
//!
//! Inline comments are stripped as continuations are joined, by invoking
//! the active grammar's inline-comment sub-rule on the accumulated
//! statement, so comment syntax always matches the dialect.
//!
//! Comment lines encountered in the middle of a continuation run are
//! emitted as their own logical lines, in encounter order, ahead of the
//! statement they interrupt.

use std::collections::VecDeque;
use std::io;

use arcstr::ArcStr;
use thiserror::Error;

use crate::grammar::Grammar;

/// One logical line: joined source text plus the physical lines that
/// contributed to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogicalLine {
    /// The source filename, as given to the reader.
    pub file_name: ArcStr,
    /// Contributing physical line numbers, 1-based, strictly ascending.
    pub line_numbers: Vec<u64>,
    /// The joined text after continuation resolution.
    pub source_line: String,
}

/// An error reading netlist source.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The underlying stream failed.
    #[error("failed to read netlist source: {0}")]
    Io(#[from] io::Error),
}

/// Produces [`LogicalLine`]s from a byte stream.
pub struct NetlistLineReader<R> {
    input: R,
    file_name: ArcStr,
    current_line_num: u64,
    pending: Option<(String, u64)>,
    queue: VecDeque<LogicalLine>,
    eof: bool,
}

impl<R: io::BufRead> NetlistLineReader<R> {
    /// Creates a reader over `input`; `file_name` is recorded as the
    /// provenance of every line produced.
    pub fn new(input: R, file_name: impl Into<ArcStr>) -> Self {
        Self {
            input,
            file_name: file_name.into(),
            current_line_num: 0,
            pending: None,
            queue: VecDeque::new(),
            eof: false,
        }
    }

    /// The next logical line, or `None` at end of input.
    pub fn next_line(
        &mut self,
        grammar: &dyn Grammar,
    ) -> Result<Option<LogicalLine>, ReaderError> {
        while self.queue.is_empty() && !self.eof {
            self.read_next_parsable_line(grammar)?;
        }
        Ok(self.queue.pop_front())
    }

    /// One trimmed physical line, with its 1-based number.
    fn next_physical(&mut self) -> Result<Option<(String, u64)>, ReaderError> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }
        if self.eof {
            return Ok(None);
        }
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            self.eof = true;
            return Ok(None);
        }
        self.current_line_num += 1;
        Ok(Some((buf.trim().to_string(), self.current_line_num)))
    }

    fn read_next_parsable_line(&mut self, grammar: &dyn Grammar) -> Result<(), ReaderError> {
        // Find the start of the next logical line.
        let (mut source, first_num) = loop {
            match self.next_physical()? {
                None => return Ok(()),
                Some((text, num)) if !text.is_empty() => break (text, num),
                Some(_) => continue,
            }
        };
        let mut line_numbers = vec![first_num];

        loop {
            let (next, num) = match self.next_physical()? {
                None => break,
                Some(x) => x,
            };
            if next.is_empty() {
                continue;
            }

            if next.starts_with('*') || next.starts_with("//") || next.starts_with('$') {
                // A whole-line comment inside a continuation run.
                self.queue.push_back(LogicalLine {
                    file_name: self.file_name.clone(),
                    line_numbers: vec![num],
                    source_line: next,
                });
                continue;
            }

            if next.starts_with(')') {
                // Dangling close paren from a .MODEL parameter list.
                let head = strip(grammar, &source);
                source = format!("{} {}", head, next);
                line_numbers.push(num);
                continue;
            }

            if next.starts_with('+') && !source.ends_with("\\\\") {
                let head = strip(grammar, &source);
                source = strip(grammar, &format!("{} {}", head, &next[1..]));
                line_numbers.push(num);
                continue;
            }

            if source.ends_with("\\\\") {
                // In-expression continuation: no separator, and inline
                // comments cannot occur mid-expression.
                source.truncate(source.len() - 2);
                source.push_str(&next);
                source = source.trim_end().to_string();
                line_numbers.push(num);
                continue;
            }

            let head = strip(grammar, &source);
            if let Some(prefix) = head.strip_suffix('\\') {
                source = strip(grammar, &format!("{} {}", prefix.trim_end(), next));
                line_numbers.push(num);
                continue;
            }

            // Not a continuation: buffer it for the next logical line.
            self.pending = Some((next, num));
            break;
        }

        self.queue.push_back(LogicalLine {
            file_name: self.file_name.clone(),
            line_numbers,
            source_line: source,
        });
        Ok(())
    }
}

fn strip(grammar: &dyn Grammar, line: &str) -> String {
    grammar.strip_inline_comment(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::xyce::XyceGrammar;

    fn read_all(input: &str) -> Vec<LogicalLine> {
        let mut reader = NetlistLineReader::new(io::Cursor::new(input.to_string()), "test.cir");
        let grammar = XyceGrammar;
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line(&grammar).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn plain_lines_pass_through() {
        let lines = read_all("R1 a b 1k\nC1 a b 1p\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].source_line, "R1 a b 1k");
        assert_eq!(lines[0].line_numbers, vec![1]);
        assert_eq!(lines[1].line_numbers, vec![2]);
    }

    #[test]
    fn empty_lines_advance_numbering() {
        let lines = read_all("R1 a b 1k\n\n\nC1 a b 1p\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line_numbers, vec![4]);
    }

    #[test]
    fn plus_continuation_joins_with_space() {
        let lines = read_all(".PARAM a=1\n+ b=2\n+ c=3\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source_line, ".PARAM a=1 b=2 c=3");
        assert_eq!(lines[0].line_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn single_backslash_joins_with_space() {
        let lines = read_all(".PARAM a=1 \\\nb=2\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source_line, ".PARAM a=1 b=2");
        assert_eq!(lines[0].line_numbers, vec![1, 2]);
    }

    #[test]
    fn double_backslash_joins_without_separator() {
        let lines = read_all(".PARAM x={1+\\\\\n2}\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source_line, ".PARAM x={1+2}");
        assert_eq!(lines[0].line_numbers, vec![1, 2]);
    }

    #[test]
    fn dangling_paren_is_folded_in() {
        let lines = read_all(".MODEL m nmos (level=1\n)\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source_line, ".MODEL m nmos (level=1 )");
        assert_eq!(lines[0].line_numbers, vec![1, 2]);
    }

    #[test]
    fn comment_lines_interleave_before_their_statement() {
        let lines = read_all("R1 a b\n* interrupting note\n+ 1k\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].source_line, "* interrupting note");
        assert_eq!(lines[0].line_numbers, vec![2]);
        assert_eq!(lines[1].source_line, "R1 a b 1k");
        assert_eq!(lines[1].line_numbers, vec![1, 3]);
    }

    #[test]
    fn inline_comments_are_stripped_when_joining() {
        let lines = read_all("R1 a b ; note\n+ 1k\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source_line, "R1 a b 1k");
    }

    #[test]
    fn continuation_at_eof_is_emitted() {
        let lines = read_all(".PARAM a=1\n+ b=2");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source_line, ".PARAM a=1 b=2");
    }

    #[test]
    fn line_numbers_strictly_ascend() {
        let lines = read_all("a\n+ b\n\nc\n+ d\n* e\n+ f\n");
        for line in &lines {
            assert!(!line.line_numbers.is_empty());
            assert!(line.line_numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
