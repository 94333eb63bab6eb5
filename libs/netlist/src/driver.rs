//! The pull-driven parser session.
//!
//! One [`Parser`] owns the reader, the active dialect grammar, the Spectre
//! statistics-block state, and a diagnostic issue set. Each call to
//! [`Parser::next_line`] yields one [`ParsedLine`].
//!
//! Parse failures never abort the session: the offending line is rewritten
//! as a dialect comment, re-parsed (which must succeed, yielding a single
//! `COMMENT` token), and reported through the issue set with
//! `error_kind = "warn"`.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use arcstr::ArcStr;
use diagnostics::{Diagnostic, IssueSet, Severity};
use itertools::Itertools;
use thiserror::Error;

use crate::grammar::Grammar;
use crate::reader::{LogicalLine, NetlistLineReader, ReaderError};
use crate::{Dialect, Substr, Token, TokenClass};

/// One parsed logical line: provenance, (possibly rewritten) source text,
/// the emitted token vector, and the recovery marker if parsing failed.
#[derive(Clone, Debug)]
pub struct ParsedLine {
    /// The source filename.
    pub file_name: ArcStr,
    /// Contributing physical line numbers, strictly ascending.
    pub line_numbers: Vec<u64>,
    /// The logical line text; rewritten to a comment on parse failure.
    pub source_line: String,
    /// The classified tokens, in left-to-right source order.
    pub tokens: Vec<Token>,
    /// `Some("warn")` when the line was retained as a comment.
    pub error_kind: Option<String>,
    /// The rewritten line, when `error_kind` is set.
    pub error_message: Option<String>,
}

impl ParsedLine {
    fn from_logical(line: LogicalLine) -> Self {
        Self {
            file_name: line.file_name,
            line_numbers: line.line_numbers,
            source_line: line.source_line,
            tokens: Vec::new(),
            error_kind: None,
            error_message: None,
        }
    }

    /// Renders the contributing line numbers as `[1,2,3]`.
    pub fn line_nums_string(&self) -> String {
        format!("[{}]", self.line_numbers.iter().join(","))
    }
}

/// A fatal error from a parsing session. Per-line parse failures are not
/// errors; they surface as comment-retained [`ParsedLine`]s.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Reading the input failed.
    #[error(transparent)]
    Reader(#[from] ReaderError),
    /// Opening the input file failed.
    #[error("failed to read netlist file `{path}`: {source}")]
    FailedToRead {
        /// The path that could not be opened.
        path: String,
        /// The underlying error.
        source: io::Error,
    },
}

/// A diagnostic recorded by the driver.
#[derive(Clone, Debug)]
pub struct LineIssue {
    /// The source filename.
    pub file_name: ArcStr,
    /// The line numbers involved, rendered as `[..]` in messages.
    pub line_numbers: Vec<u64>,
    /// What happened.
    pub message: String,
    severity: Severity,
}

impl LineIssue {
    fn retained(line: &ParsedLine) -> Self {
        Self {
            file_name: line.file_name.clone(),
            line_numbers: line.line_numbers.clone(),
            message: line
                .error_message
                .clone()
                .unwrap_or_else(|| line.source_line.clone()),
            severity: Severity::Warning,
        }
    }

    fn fallback_failed(line: &ParsedLine) -> Self {
        Self {
            file_name: line.file_name.clone(),
            line_numbers: line.line_numbers.clone(),
            message: format!(
                "parsing failed around line [{}] and line(s) could not be converted to comment",
                line.line_numbers.iter().join(",")
            ),
            severity: Severity::Error,
        }
    }
}

impl Display for LineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:[{}]: {}",
            self.file_name,
            self.line_numbers.iter().join(","),
            self.message
        )
    }
}

impl Diagnostic for LineIssue {
    fn severity(&self) -> Severity {
        self.severity
    }
}

/// The result of parsing a complete netlist source.
pub struct ParsedNetlist {
    /// All parsed lines, in file order.
    pub lines: Vec<ParsedLine>,
    /// Diagnostics accumulated while parsing.
    pub issues: IssueSet<LineIssue>,
}

/// A netlist parsing session.
pub struct Parser<R> {
    dialect: Dialect,
    grammar: Box<dyn Grammar>,
    reader: NetlistLineReader<R>,
    top_level: bool,
    /// Depth of `{}` nesting inside a Spectre statistics block.
    bracket_count: u32,
    issues: IssueSet<LineIssue>,
}

impl Parser<BufReader<File>> {
    /// Opens `path` and parses it to completion.
    pub fn parse_file(
        dialect: Dialect,
        path: impl AsRef<Path>,
    ) -> Result<ParsedNetlist, ParserError> {
        let path = path.as_ref();
        tracing::debug!(?dialect, ?path, "reading netlist file");
        let file = File::open(path).map_err(|source| ParserError::FailedToRead {
            path: path.display().to_string(),
            source,
        })?;
        let name = ArcStr::from(path.display().to_string());
        Parser::new(dialect, BufReader::new(file), name).run()
    }
}

impl Parser<io::Cursor<String>> {
    /// Parses in-memory netlist text to completion.
    pub fn parse(dialect: Dialect, data: impl Into<String>) -> Result<ParsedNetlist, ParserError> {
        Parser::new(dialect, io::Cursor::new(data.into()), "netlist").run()
    }
}

impl<R: io::BufRead> Parser<R> {
    /// Creates a session over `input`. The session is top-level: the first
    /// source line is treated as the netlist title.
    pub fn new(dialect: Dialect, input: R, file_name: impl Into<ArcStr>) -> Self {
        Self {
            dialect,
            grammar: dialect.grammar(),
            reader: NetlistLineReader::new(input, file_name),
            top_level: true,
            bracket_count: 0,
            issues: IssueSet::new(),
        }
    }

    /// Marks this session as parsing an included file: no title line.
    pub fn top_level(mut self, top_level: bool) -> Self {
        self.top_level = top_level;
        self
    }

    /// The active dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Diagnostics accumulated so far.
    pub fn issues(&self) -> &IssueSet<LineIssue> {
        &self.issues
    }

    /// Parses the next logical line, or returns `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<ParsedLine>, ParserError> {
        let line = match self.reader.next_line(self.grammar.as_ref())? {
            Some(line) => line,
            None => return Ok(None),
        };
        let mut parsed = ParsedLine::from_logical(line);

        // Spectre statistics blocks are commented out wholesale; nested
        // curly braces are tracked so the whole block is covered.
        if self.dialect == Dialect::Spectre
            && (self.bracket_count > 0 || parsed.source_line.trim().starts_with("statistics"))
        {
            parsed.source_line = format!("// {}", parsed.source_line);
            if self.bracket_count == 0 {
                parsed.source_line +=
                    "; Spectre statistics block Retained (as a comment). Continuing.";
                parsed.error_kind = Some("warn".to_string());
                parsed.error_message = Some(parsed.source_line.clone());
                self.issues.add(LineIssue::retained(&parsed));
            }
            self.parse_into(&mut parsed);
            for c in parsed.source_line.chars() {
                match c {
                    '{' => self.bracket_count += 1,
                    '}' => self.bracket_count = self.bracket_count.saturating_sub(1),
                    _ => {}
                }
            }
            return Ok(Some(parsed));
        }

        if self.top_level && parsed.line_numbers.first() == Some(&1) {
            let title = format!("*{}", parsed.source_line);
            parsed.tokens = vec![Token::new(title, TokenClass::Title)];
            return Ok(Some(parsed));
        }

        self.parse_into(&mut parsed);
        Ok(Some(parsed))
    }

    /// Collects every remaining line.
    pub fn run(mut self) -> Result<ParsedNetlist, ParserError> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }
        Ok(ParsedNetlist {
            lines,
            issues: self.issues,
        })
    }

    fn parse_into(&mut self, parsed: &mut ParsedLine) {
        let source = Substr::from(parsed.source_line.as_str());
        if let Some(tokens) = self.grammar.parse_line(&source) {
            parsed.tokens = tokens;
            return;
        }

        // Retain the line as a comment and re-parse the rewritten form.
        parsed.source_line = format!(
            "{} {}; {} Parser Retained (as a comment). Continuing.",
            self.grammar.comment_prefix(),
            parsed.source_line,
            self.grammar.dialect_name(),
        );
        parsed.error_kind = Some("warn".to_string());
        parsed.error_message = Some(parsed.source_line.clone());
        self.issues.add(LineIssue::retained(parsed));

        let fallback = Substr::from(parsed.source_line.as_str());
        match self.grammar.parse_line(&fallback) {
            Some(tokens) => parsed.tokens = tokens,
            None => {
                self.issues.add(LineIssue::fallback_failed(parsed));
                parsed.tokens = Vec::new();
            }
        }
    }
}

impl<R: io::BufRead> Iterator for Parser<R> {
    type Item = Result<ParsedLine, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenClass;

    const XYCE_NETLIST: &str = "\
simple test circuit
R1 a b 10k
.PARAM X = {2*Y+1}
??? unrecognizable garbage
.END
";

    #[test]
    fn title_line_is_not_parsed() {
        let parsed = Parser::parse(Dialect::Xyce, XYCE_NETLIST).unwrap();
        let title = &parsed.lines[0];
        assert_eq!(title.tokens.len(), 1);
        assert_eq!(title.tokens[0].value, "*simple test circuit");
        assert_eq!(title.tokens[0].classes, vec![TokenClass::Title]);
        assert!(title.error_kind.is_none());
    }

    #[test]
    fn include_files_have_no_title() {
        let mut parser = Parser::new(
            Dialect::Xyce,
            io::Cursor::new("R1 a b 10k\n".to_string()),
            "sub.cir",
        )
        .top_level(false);
        let first = parser.next_line().unwrap().unwrap();
        assert_eq!(first.tokens[0].classes, vec![TokenClass::DeviceId]);
    }

    #[test]
    fn failed_line_becomes_comment() {
        let parsed = Parser::parse(Dialect::Xyce, XYCE_NETLIST).unwrap();
        let bad = &parsed.lines[3];
        assert_eq!(bad.error_kind.as_deref(), Some("warn"));
        assert!(bad.source_line.starts_with('*'));
        assert!(bad.source_line.contains("??? unrecognizable garbage"));
        assert!(bad
            .source_line
            .contains("Xyce Parser Retained (as a comment). Continuing."));
        assert_eq!(bad.tokens.len(), 1);
        assert_eq!(bad.tokens[0].classes, vec![TokenClass::Comment]);
        assert_eq!(bad.error_message.as_deref(), Some(bad.source_line.as_str()));
        assert_eq!(parsed.issues.num_warnings(), 1);
    }

    #[test]
    fn successful_lines_reconstruct_their_source() {
        let parsed = Parser::parse(Dialect::Xyce, XYCE_NETLIST).unwrap();
        for line in &parsed.lines[1..3] {
            // Token values appear in source order; the line is recoverable
            // modulo whitespace and punctuation the grammar consumed.
            let mut from = 0;
            for token in &line.tokens {
                let idx = line.source_line[from..]
                    .find(token.value.as_str())
                    .unwrap_or_else(|| {
                        panic!("token `{}` out of order in `{}`", token.value, line.source_line)
                    });
                from += idx + token.value.len();
            }
            assert!(!line.tokens.is_empty());
        }
    }

    #[test]
    fn every_line_has_provenance() {
        let parsed = Parser::parse(Dialect::Xyce, XYCE_NETLIST).unwrap();
        assert_eq!(parsed.lines.len(), 5);
        for (i, line) in parsed.lines.iter().enumerate() {
            assert_eq!(line.line_numbers, vec![i as u64 + 1]);
            assert_eq!(line.file_name, "netlist");
        }
    }

    #[test]
    fn spectre_statistics_blocks_are_commented() {
        let netlist = "\
// spectre deck
r1 1 0 resistor r=1k
statistics {
  process {
    vary vth0 dist=gauss std=0.01
  }
}
c1 (1 0) capacitor c=1p
";
        let parsed = Parser::parse(Dialect::Spectre, netlist).unwrap();
        let stats_open = &parsed.lines[2];
        assert_eq!(stats_open.error_kind.as_deref(), Some("warn"));
        assert!(stats_open.source_line.starts_with("// statistics {"));
        assert!(stats_open
            .source_line
            .contains("Spectre statistics block Retained (as a comment). Continuing."));
        // Every line of the block is commented out, without further
        // warnings, until the braces rebalance.
        for line in &parsed.lines[3..7] {
            assert!(line.source_line.starts_with("// "), "{}", line.source_line);
            assert!(line.error_kind.is_none());
            assert_eq!(line.tokens[0].classes, vec![TokenClass::Comment]);
        }
        // The device after the block parses normally again.
        let cap = &parsed.lines[7];
        assert!(cap.error_kind.is_none());
        assert_eq!(cap.tokens[0].classes, vec![TokenClass::DeviceName]);
    }

    #[test]
    fn out_of_order_parameters_resolve_after_parsing() {
        let netlist = "\
param ordering test
.PARAM B = {A+1}
.PARAM A = 2
";
        let parsed = Parser::parse(Dialect::Xyce, netlist).unwrap();
        let mut pending = Vec::new();
        for line in &parsed.lines {
            let mut iter = line.tokens.iter();
            if !matches!(iter.next(), Some(t) if t.value.eq_ignore_ascii_case(".PARAM")) {
                continue;
            }
            while let (Some(name), Some(value)) = (iter.next(), iter.next()) {
                pending.push(netexpr::PendingParam::new(
                    name.value.as_str(),
                    value.value.as_str(),
                ));
            }
        }
        let mut table = netexpr::SymbolTable::new();
        let mut issues = diagnostics::IssueSet::new();
        let resolved = netexpr::resolve_params(
            &pending,
            Dialect::Xyce.expr_dialect(),
            &mut table,
            &mut issues,
        );
        assert_eq!(resolved, 2);
        assert_eq!(table.variables["A"], 2.0);
        assert_eq!(table.variables["B"], 3.0);
        assert!(issues.is_empty());
    }
}
