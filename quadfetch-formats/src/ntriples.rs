//! N-Triples / N-Quads reference codec
//!
//! Line-based: one statement per line, `#` comments, UTF-8 with `\uXXXX`
//! and `\UXXXXXXXX` escapes. A line with a fourth term before the closing
//! `.` is an N-Quads statement; the codec accepts both under either media
//! type and always emits the graph label when a quad carries one.
//!
//! Decoding is incremental: quads are yielded as complete lines arrive,
//! without buffering the whole document. The first malformed line ends the
//! stream with a positioned parse error.

use crate::codec::{ByteStream, DecodeOptions, EncodeOptions, QuadDecoder, QuadEncoder, QuadStream};
use crate::error::{FormatError, Result};
use bytes::Bytes;
use futures::{stream, StreamExt};
use quadfetch_graph::{vocab, Quad, Term};

/// Media type for N-Triples
pub const MEDIA_TYPE_NTRIPLES: &str = "application/n-triples";

/// Media type for N-Quads
pub const MEDIA_TYPE_NQUADS: &str = "application/n-quads";

/// Codec for `application/n-triples` and `application/n-quads`
#[derive(Clone, Copy, Debug, Default)]
pub struct NTriplesCodec;

struct DecodeState {
    input: ByteStream,
    buf: Vec<u8>,
    line_no: usize,
    eof: bool,
    failed: bool,
}

impl DecodeState {
    /// Pop the next complete line out of the buffer, if one is there.
    fn take_line(&mut self) -> Option<Vec<u8>> {
        let idx = self.buf.iter().position(|&b| b == b'\n')?;
        Some(self.buf.drain(..=idx).collect())
    }
}

impl QuadDecoder for NTriplesCodec {
    fn decode(&self, input: ByteStream, _options: DecodeOptions) -> QuadStream {
        let state = DecodeState {
            input,
            buf: Vec::new(),
            line_no: 0,
            eof: false,
            failed: false,
        };

        Box::pin(stream::unfold(state, |mut st| async move {
            if st.failed {
                return None;
            }

            loop {
                let line_bytes: Vec<u8> = match st.take_line() {
                    Some(bytes) => bytes,
                    None if st.eof => {
                        if st.buf.iter().all(u8::is_ascii_whitespace) {
                            return None;
                        }
                        // final line without trailing newline
                        std::mem::take(&mut st.buf)
                    }
                    None => {
                        match st.input.next().await {
                            Some(Ok(chunk)) => st.buf.extend_from_slice(&chunk),
                            Some(Err(e)) => {
                                st.failed = true;
                                return Some((Err(FormatError::Io(e)), st));
                            }
                            None => st.eof = true,
                        }
                        continue;
                    }
                };

                st.line_no += 1;

                let line = match String::from_utf8(line_bytes) {
                    Ok(line) => line,
                    Err(_) => {
                        st.failed = true;
                        let err = FormatError::parse(st.line_no, "invalid UTF-8");
                        return Some((Err(err), st));
                    }
                };

                match parse_line(&line, st.line_no) {
                    Ok(Some(quad)) => return Some((Ok(quad), st)),
                    Ok(None) => continue,
                    Err(e) => {
                        st.failed = true;
                        return Some((Err(e), st));
                    }
                }
            }
        }))
    }
}

impl QuadEncoder for NTriplesCodec {
    fn encode(&self, input: QuadStream, _options: EncodeOptions) -> ByteStream {
        Box::pin(input.map(|item| {
            let quad =
                item.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            let line = serialize_quad(&quad)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            Ok(Bytes::from(line))
        }))
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse one statement line; comments and blank lines yield None.
fn parse_line(line: &str, line_no: usize) -> Result<Option<Quad>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut cursor = Cursor::new(trimmed, line_no);

    let subject = cursor.parse_subject_like("subject")?;
    cursor.skip_ws();
    let predicate = cursor.parse_predicate()?;
    cursor.skip_ws();
    let object = cursor.parse_object()?;
    cursor.skip_ws();

    let graph = match cursor.peek() {
        Some('<') | Some('_') => {
            let label = cursor.parse_subject_like("graph label")?;
            cursor.skip_ws();
            Some(label)
        }
        _ => None,
    };

    cursor.expect('.')?;
    cursor.skip_ws();
    match cursor.peek() {
        None | Some('#') => {}
        Some(c) => {
            return Err(cursor.error(format!("unexpected trailing character: {:?}", c)));
        }
    }

    let quad = match graph {
        Some(g) => Quad::with_graph(subject, predicate, object, g),
        None => Quad::new(subject, predicate, object),
    };
    Ok(Some(quad))
}

/// Character cursor over a single statement line
struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Cursor {
    fn new(input: &str, line: usize) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected {:?}, found {:?}", expected, c))),
            None => Err(self.error(format!("expected {:?}, found end of line", expected))),
        }
    }

    fn error(&self, message: impl Into<String>) -> FormatError {
        FormatError::parse(self.line, message)
    }

    /// Parse an IRI or blank node (valid in subject and graph positions).
    fn parse_subject_like(&mut self, position: &str) -> Result<Term> {
        match self.peek() {
            Some('<') => Ok(Term::iri(self.parse_iri()?)),
            Some('_') => Ok(Term::blank(self.parse_blank_label()?)),
            _ => Err(self.error(format!("expected IRI or blank node as {}", position))),
        }
    }

    fn parse_predicate(&mut self) -> Result<Term> {
        match self.peek() {
            Some('<') => Ok(Term::iri(self.parse_iri()?)),
            _ => Err(self.error("expected IRI as predicate")),
        }
    }

    fn parse_object(&mut self) -> Result<Term> {
        match self.peek() {
            Some('<') => Ok(Term::iri(self.parse_iri()?)),
            Some('_') => Ok(Term::blank(self.parse_blank_label()?)),
            Some('"') => self.parse_literal(),
            _ => Err(self.error("expected IRI, blank node, or literal as object")),
        }
    }

    /// Parse `<...>`, decoding \uXXXX / \UXXXXXXXX escapes.
    fn parse_iri(&mut self) -> Result<String> {
        self.expect('<')?;
        let mut iri = String::new();
        loop {
            match self.bump() {
                Some('>') => return Ok(iri),
                Some('\\') => iri.push(self.parse_unicode_escape()?),
                Some(c) => iri.push(c),
                None => return Err(self.error("unterminated IRI")),
            }
        }
    }

    /// Parse `_:label`, returning the label without the prefix.
    fn parse_blank_label(&mut self) -> Result<String> {
        self.expect('_')?;
        self.expect(':')?;
        let mut label = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                label.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if label.is_empty() {
            return Err(self.error("empty blank node label"));
        }
        Ok(label)
    }

    /// Parse `"..."` with an optional `@lang` or `^^<datatype>` suffix.
    fn parse_literal(&mut self) -> Result<Term> {
        self.expect('"')?;
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => value.push(self.parse_escape()?),
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }

        match self.peek() {
            Some('@') => {
                self.pos += 1;
                let mut lang = String::new();
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == '-' {
                        lang.push(c);
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                if lang.is_empty() {
                    return Err(self.error("empty language tag"));
                }
                Ok(Term::lang_string(value, lang))
            }
            Some('^') => {
                self.expect('^')?;
                self.expect('^')?;
                let datatype = self.parse_iri()?;
                Ok(Term::typed(value, datatype))
            }
            _ => Ok(Term::string(value)),
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        match self.bump() {
            Some('t') => Ok('\t'),
            Some('b') => Ok('\u{0008}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('f') => Ok('\u{000C}'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('\\') => Ok('\\'),
            Some('u') => self.parse_hex_escape(4),
            Some('U') => self.parse_hex_escape(8),
            Some(c) => Err(self.error(format!("invalid escape sequence: \\{}", c))),
            None => Err(self.error("truncated escape sequence")),
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        match self.bump() {
            Some('u') => self.parse_hex_escape(4),
            Some('U') => self.parse_hex_escape(8),
            Some(c) => Err(self.error(format!("invalid IRI escape sequence: \\{}", c))),
            None => Err(self.error("truncated escape sequence")),
        }
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            let c = self
                .bump()
                .ok_or_else(|| self.error("truncated escape sequence"))?;
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.error(format!("invalid hex digit in escape: {:?}", c)))?;
            code = code * 16 + digit;
        }
        char::from_u32(code)
            .ok_or_else(|| self.error(format!("invalid unicode code point: U+{:X}", code)))
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Serialize one quad as a terminated statement line.
fn serialize_quad(quad: &Quad) -> Result<String> {
    let mut line = String::new();

    write_subject_like(&mut line, &quad.s, "subject")?;
    line.push(' ');

    match &quad.p {
        Term::Iri(iri) => {
            line.push('<');
            line.push_str(iri);
            line.push('>');
        }
        other => {
            return Err(FormatError::serialize(format!(
                "predicate must be an IRI, got {}",
                other
            )))
        }
    }
    line.push(' ');

    write_object(&mut line, &quad.o);

    if let Some(g) = &quad.g {
        line.push(' ');
        write_subject_like(&mut line, g, "graph label")?;
    }

    line.push_str(" .\n");
    Ok(line)
}

fn write_subject_like(out: &mut String, term: &Term, position: &str) -> Result<()> {
    match term {
        Term::Iri(iri) => {
            out.push('<');
            out.push_str(iri);
            out.push('>');
            Ok(())
        }
        Term::BlankNode(id) => {
            out.push_str("_:");
            out.push_str(id.as_str());
            Ok(())
        }
        Term::Literal { .. } => Err(FormatError::serialize(format!(
            "{} must be an IRI or blank node, got a literal",
            position
        ))),
    }
}

fn write_object(out: &mut String, term: &Term) {
    match term {
        Term::Iri(iri) => {
            out.push('<');
            out.push_str(iri);
            out.push('>');
        }
        Term::BlankNode(id) => {
            out.push_str("_:");
            out.push_str(id.as_str());
        }
        Term::Literal {
            value,
            datatype,
            language,
        } => {
            out.push('"');
            out.push_str(&escape_literal(value));
            out.push('"');
            if let Some(lang) = language {
                out.push('@');
                out.push_str(lang);
            } else if datatype.as_ref() != vocab::xsd::STRING {
                out.push_str("^^<");
                out.push_str(datatype);
                out.push('>');
            }
        }
    }
}

fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
