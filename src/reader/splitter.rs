//! Record splitting: raw bytes in, raw records out.
//!
//! The splitter works one physical line at a time and keeps reading lines
//! while a quoted field is open, so quoted delimiters and line breaks stay
//! inside their field. Field bytes are copied into one buffer per record with
//! the end offset of every field, the same index-list shape a byte-level CSV
//! scanner produces; UTF-8 decoding is left to the workers.

use crate::config::Config;
use crate::error::{ParseErrorKind, ReadError};
use std::io::BufRead;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A record before field decoding.
#[derive(Debug)]
pub(crate) struct RawRecord {
    /// Physical line the record starts on, 1-based.
    pub line: u64,
    /// Position among the file's records, 1-based.
    pub index: u64,
    bytes: Vec<u8>,
    ends: Vec<usize>,
}

impl RawRecord {
    fn new(line: u64, index: u64, capacity: usize) -> Self {
        Self {
            line,
            index,
            bytes: Vec::with_capacity(capacity),
            ends: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.ends.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let mut start = 0;
        self.ends.iter().map(move |&end| {
            let field = &self.bytes[start..end];
            start = end;
            field
        })
    }

    fn end_field(&mut self) {
        self.ends.push(self.bytes.len());
    }
}

/// Length of `line` without its line terminator (`\n`, `\r\n`, or a final `\r`).
fn content_len(line: &[u8]) -> usize {
    match line {
        [rest @ .., b'\r', b'\n'] => rest.len(),
        [rest @ .., b'\n'] | [rest @ .., b'\r'] => rest.len(),
        _ => line.len(),
    }
}

pub(crate) struct Splitter<R> {
    name: String,
    reader: R,
    delimiter: u8,
    quote: u8,
    comment: Option<u8>,
    lazy_quotes: bool,
    line: Vec<u8>,
    line_no: u64,
    records: u64,
    done: bool,
}

impl<R: BufRead> Splitter<R> {
    pub fn new(name: impl Into<String>, reader: R, config: &Config) -> Self {
        Self {
            name: name.into(),
            reader,
            delimiter: config.delimiter,
            quote: config.quote,
            comment: config.comment,
            lazy_quotes: config.lazy_quotes,
            line: Vec::with_capacity(1024),
            line_no: 0,
            records: 0,
            done: false,
        }
    }

    /// Next record, `Ok(None)` at end of input.
    ///
    /// After an error or the end of input every further call returns `Ok(None)`.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>, ReadError> {
        if self.done {
            return Ok(None);
        }
        let result = self.split_record();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result
    }

    fn read_line(&mut self) -> Result<bool, ReadError> {
        self.line.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.line)
            .map_err(|e| ReadError::io(&self.name, e))?;
        if n == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        if self.line_no == 1 && self.line.starts_with(UTF8_BOM) {
            self.line.drain(..UTF8_BOM.len());
        }
        Ok(true)
    }

    fn split_record(&mut self) -> Result<Option<RawRecord>, ReadError> {
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if self.comment.is_some() && self.line.first().copied() == self.comment {
                continue;
            }
            if content_len(&self.line) > 0 {
                break;
            }
        }

        self.records += 1;
        let mut rec = RawRecord::new(self.line_no, self.records, self.line.len());
        let mut pos = 0;
        loop {
            let eol = content_len(&self.line);
            if pos < eol && self.line[pos] == self.quote {
                match self.quoted_field(&mut rec, pos + 1)? {
                    Some(next) => pos = next,
                    None => break,
                }
            } else {
                let rest = &self.line[pos..eol];
                let cut = rest.iter().position(|&b| b == self.delimiter);
                let field = &rest[..cut.unwrap_or(rest.len())];
                if !self.lazy_quotes && field.contains(&self.quote) {
                    return Err(self.parse_error(&rec, self.line_no, ParseErrorKind::BareQuote));
                }
                rec.bytes.extend_from_slice(field);
                rec.end_field();
                match cut {
                    Some(i) => pos += i + 1,
                    None => break,
                }
            }
        }
        Ok(Some(rec))
    }

    /// Consume a quoted field whose content starts at `pos`.
    ///
    /// Returns the position after the following delimiter, or `None` when
    /// the field ends the record.
    fn quoted_field(&mut self, rec: &mut RawRecord, mut pos: usize) -> Result<Option<usize>, ReadError> {
        let quote = self.quote;
        loop {
            match self.line[pos..].iter().position(|&b| b == quote) {
                Some(i) => {
                    rec.bytes.extend_from_slice(&self.line[pos..pos + i]);
                    pos += i + 1;
                    let eol = content_len(&self.line);
                    match self.line.get(pos).copied() {
                        Some(b) if b == quote => {
                            rec.bytes.push(quote);
                            pos += 1;
                        }
                        Some(b) if b == self.delimiter => {
                            rec.end_field();
                            return Ok(Some(pos + 1));
                        }
                        _ if pos >= eol => {
                            rec.end_field();
                            return Ok(None);
                        }
                        _ if self.lazy_quotes => rec.bytes.push(quote),
                        _ => {
                            return Err(self.parse_error(
                                rec,
                                self.line_no,
                                ParseErrorKind::ExtraneousQuote,
                            ));
                        }
                    }
                }
                None => {
                    let rest = &self.line[pos..];
                    match rest.strip_suffix(b"\r\n") {
                        Some(body) => {
                            rec.bytes.extend_from_slice(body);
                            rec.bytes.push(b'\n');
                        }
                        None => rec.bytes.extend_from_slice(rest),
                    }
                    let more = self.line.ends_with(b"\n") && self.read_line()?;
                    if !more {
                        if self.lazy_quotes {
                            rec.end_field();
                            return Ok(None);
                        }
                        return Err(self.parse_error(
                            rec,
                            rec.line,
                            ParseErrorKind::UnterminatedQuote,
                        ));
                    }
                    pos = 0;
                }
            }
        }
    }

    fn parse_error(&self, rec: &RawRecord, line: u64, kind: ParseErrorKind) -> ReadError {
        ReadError::Parse {
            line,
            record: rec.index,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_with(input: &str, config: &Config) -> Result<Vec<Vec<String>>, ReadError> {
        let mut splitter = Splitter::new("test", input.as_bytes(), config);
        let mut out = Vec::new();
        while let Some(rec) = splitter.next_record()? {
            out.push(
                rec.fields()
                    .map(|f| String::from_utf8(f.to_vec()).unwrap())
                    .collect(),
            );
        }
        Ok(out)
    }

    fn split(input: &str) -> Vec<Vec<String>> {
        split_with(input, &Config::default()).unwrap()
    }

    #[test]
    fn plain_records() {
        assert_eq!(
            split("a,b,c\n1,2,3\n"),
            vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]
        );
    }

    #[test]
    fn crlf_inside_quotes_becomes_newline() {
        assert_eq!(
            split("\"x\r\ny\",z\r\n1,2\r\n"),
            vec![vec!["x\ny", "z"], vec!["1", "2"]]
        );
    }

    #[test]
    fn missing_final_newline_and_crlf() {
        assert_eq!(split("a,b\r\n1,2"), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn trailing_delimiter_yields_empty_field() {
        assert_eq!(split("a,b,\n"), vec![vec!["a", "b", ""]]);
        assert_eq!(split("\"a\",\n"), vec![vec!["a", ""]]);
    }

    #[test]
    fn quoted_delimiter_newline_and_escaped_quote() {
        let got = split("a,\"b,c\",d\n\"x\ny\",\"say \"\"hi\"\"\"\n");
        assert_eq!(
            got,
            vec![vec!["a", "b,c", "d"], vec!["x\ny", "say \"hi\""]]
        );
    }

    #[test]
    fn blank_lines_and_comments_are_not_records() {
        let config = Config::default().with_comment(Some(b'#'));
        let got = split_with("# note\na,b\n\n\r\n#x,y\n1,2\n", &config).unwrap();
        assert_eq!(got, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn comment_marker_inside_quotes_is_data() {
        let config = Config::default().with_comment(Some(b'#'));
        let got = split_with("\"a\n#b\",c\n", &config).unwrap();
        assert_eq!(got, vec![vec!["a\n#b", "c"]]);
    }

    #[test]
    fn leading_bom_is_dropped() {
        assert_eq!(split("\u{feff}id,name\n"), vec![vec!["id", "name"]]);
    }

    #[test]
    fn unterminated_quote_reports_record_start() {
        let err = split_with("a,b\n1,\"open\nstill open\n", &Config::default()).unwrap_err();
        match err {
            ReadError::Parse { line, record, kind } => {
                assert_eq!(line, 2);
                assert_eq!(record, 2);
                assert_eq!(kind, ParseErrorKind::UnterminatedQuote);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stray_quotes_need_lazy_mode() {
        let strict = Config::default();
        assert!(matches!(
            split_with("a\"b,c\n", &strict),
            Err(ReadError::Parse { kind: ParseErrorKind::BareQuote, .. })
        ));
        assert!(matches!(
            split_with("\"a\"b,c\n", &strict),
            Err(ReadError::Parse { kind: ParseErrorKind::ExtraneousQuote, .. })
        ));

        let lazy = Config::default().with_lazy_quotes(true);
        assert_eq!(
            split_with("a\"b,\"c\"d\",\"e\n", &lazy).unwrap(),
            vec![vec!["a\"b", "c\"d", "e\n"]]
        );
    }

    #[test]
    fn custom_delimiter_and_quote() {
        let config = Config::tsv().with_quote(b'\'');
        let got = split_with("a\t'b\tc'\n", &config).unwrap();
        assert_eq!(got, vec![vec!["a", "b\tc"]]);
    }

    #[test]
    fn stops_after_error() {
        let mut splitter = Splitter::new("t", "\"x\n".as_bytes(), &Config::default());
        assert!(splitter.next_record().is_err());
        assert!(splitter.next_record().unwrap().is_none());
    }
}
