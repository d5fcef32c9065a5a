//! Streaming strategy
//!
//! Reads the document as a forward-only event stream with quick-xml and
//! keeps state for at most one record at a time.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use roster_traits::{
    AnalysisStrategy, Criteria, Error, MissingName, Result, DEPARTMENT_ATTRIBUTE,
    FACULTY_ATTRIBUTE, NAME_ELEMENT, RECORD_ELEMENT,
};
use tracing::{debug, trace, warn};

/// Depth of record elements: children of the root element
const RECORD_DEPTH: usize = 2;

/// Streaming strategy with bounded working memory
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamStrategy {
    missing_name: MissingName,
}

impl StreamStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_name(missing_name: MissingName) -> Self {
        Self { missing_name }
    }

    /// Run the scan over any buffered reader
    pub fn analyze_reader<R: BufRead>(&self, reader: R, criteria: &Criteria) -> Result<Vec<String>> {
        let mut scanner = RecordScanner::new(criteria, self.missing_name);
        let mut reader = NsReader::from_reader(reader);
        let mut buf = Vec::new();
        let mut first_event = true;

        loop {
            let (resolved, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| Error::malformed(e.to_string()))?;
            if let ResolveResult::Unknown(prefix) = &resolved {
                return Err(Error::malformed(format!(
                    "undeclared namespace prefix '{}'",
                    String::from_utf8_lossy(prefix)
                )));
            }
            let unbound = matches!(resolved, ResolveResult::Unbound);

            match event {
                Event::Start(e) => scanner.open(&e, unbound)?,
                Event::Empty(e) => {
                    scanner.open(&e, unbound)?;
                    scanner.close();
                }
                Event::End(_) => scanner.close(),
                Event::Text(t) => {
                    let raw = utf8(&t)?;
                    let normalized = normalize_line_endings(raw);
                    let text = unescape_references(&normalized)?;
                    scanner.text(&text)?;
                }
                Event::CData(c) => {
                    let raw = utf8(&c)?;
                    scanner.text(&normalize_line_endings(raw))?;
                }
                Event::Decl(_) if !first_event => {
                    return Err(Error::malformed(
                        "XML declaration is only allowed at the start of the document",
                    ));
                }
                Event::DocType(_) => return Err(Error::malformed("DTD is not supported")),
                Event::Comment(c) => {
                    utf8(&c)?;
                }
                Event::PI(p) => {
                    utf8(&p)?;
                }
                Event::Eof => break,
                _ => {}
            }
            first_event = false;
            buf.clear();
        }

        scanner.finish()
    }
}

impl AnalysisStrategy for StreamStrategy {
    fn name(&self) -> &'static str {
        "stream"
    }

    fn missing_name(&self) -> MissingName {
        self.missing_name
    }

    fn analyze(&self, path: &Path, criteria: &Criteria) -> Result<Vec<String>> {
        debug!(strategy = self.name(), path = %path.display(), %criteria, "starting analysis");
        let file = File::open(path)?;
        let names = self
            .analyze_reader(BufReader::new(file), criteria)
            .inspect_err(|e| {
                warn!(strategy = self.name(), path = %path.display(), error = %e, "stream scan failed");
            })?;
        debug!(strategy = self.name(), matches = names.len(), "analysis finished");
        Ok(names)
    }
}

/// Capture state of a record's `Name` element
#[derive(Debug, Clone, PartialEq, Eq)]
enum NameCapture {
    /// No `Name` child has opened yet
    Missing,
    /// Inside the first `Name` child, collecting its text
    Reading { text: String, depth: usize },
    /// The first `Name` child has closed
    Captured(String),
}

impl NameCapture {
    fn into_name(self) -> Option<String> {
        match self {
            NameCapture::Missing => None,
            NameCapture::Reading { text, .. } | NameCapture::Captured(text) => Some(text),
        }
    }
}

/// Per-record scan state
#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordState {
    /// Waiting for a record start tag
    Outside,
    /// Between a record's start and end tags
    InsideRecord { matched: bool, name: NameCapture },
}

/// Event-driven record filter.
///
/// Besides the record state it tracks element depth so that only direct
/// children of the root element count as records, and so that a truncated
/// document is reported instead of silently yielding partial results.
struct RecordScanner<'a> {
    criteria: &'a Criteria,
    missing_name: MissingName,
    state: RecordState,
    depth: usize,
    root_seen: bool,
    names: Vec<String>,
}

impl<'a> RecordScanner<'a> {
    fn new(criteria: &'a Criteria, missing_name: MissingName) -> Self {
        Self {
            criteria,
            missing_name,
            state: RecordState::Outside,
            depth: 0,
            root_seen: false,
            names: Vec::new(),
        }
    }

    fn open(&mut self, start: &BytesStart<'_>, unbound: bool) -> Result<()> {
        if self.depth == 0 {
            if self.root_seen {
                return Err(Error::malformed("content after the root element"));
            }
            self.root_seen = true;
        }
        utf8(start.name().as_ref())?;
        let (faculty, department) = read_attributes(start)?;
        self.depth += 1;

        let local = start.local_name();
        let is_element = |expected: &str| unbound && local.as_ref() == expected.as_bytes();
        if self.state == RecordState::Outside {
            if self.depth == RECORD_DEPTH && is_element(RECORD_ELEMENT) {
                let matched = self.criteria.matches(faculty.as_deref(), department.as_deref());
                trace!(?faculty, ?department, matched, "record opened");
                self.state = RecordState::InsideRecord {
                    matched,
                    name: NameCapture::Missing,
                };
            }
        } else if let RecordState::InsideRecord { name, .. } = &mut self.state {
            if *name == NameCapture::Missing
                && self.depth == RECORD_DEPTH + 1
                && is_element(NAME_ELEMENT)
            {
                *name = NameCapture::Reading {
                    text: String::new(),
                    depth: self.depth,
                };
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if self.depth == 0 {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(Error::malformed("text outside the root element"));
        }
        if let RecordState::InsideRecord {
            name: NameCapture::Reading { text: captured, .. },
            ..
        } = &mut self.state
        {
            captured.push_str(text);
        }
        Ok(())
    }

    fn close(&mut self) {
        let state = std::mem::replace(&mut self.state, RecordState::Outside);
        self.state = match state {
            RecordState::InsideRecord {
                matched,
                name: NameCapture::Reading { text, depth },
            } if depth == self.depth => RecordState::InsideRecord {
                matched,
                name: NameCapture::Captured(text),
            },
            RecordState::InsideRecord { matched, name } if self.depth == RECORD_DEPTH => {
                trace!(matched, ?name, "record closed");
                if matched {
                    if let Some(entry) = self.missing_name.resolve(name.into_name()) {
                        self.names.push(entry);
                    }
                }
                RecordState::Outside
            }
            other => other,
        };
        self.depth = self.depth.saturating_sub(1);
    }

    fn finish(self) -> Result<Vec<String>> {
        if !self.root_seen {
            return Err(Error::malformed("document has no root element"));
        }
        if self.depth > 0 {
            return Err(Error::malformed("unexpected end of document"));
        }
        Ok(self.names)
    }
}

/// Validate every attribute of a start tag and pick out the record ones
fn read_attributes(start: &BytesStart<'_>) -> Result<(Option<String>, Option<String>)> {
    let mut faculty = None;
    let mut department = None;
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::malformed(e.to_string()))?;
        let value = attribute_value(utf8(&attr.value)?)?;
        let key = attr.key.as_ref();
        if key == FACULTY_ATTRIBUTE.as_bytes() {
            faculty = Some(value);
        } else if key == DEPARTMENT_ATTRIBUTE.as_bytes() {
            department = Some(value);
        }
    }
    Ok((faculty, department))
}

fn utf8(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw).map_err(|e| Error::malformed(e.to_string()))
}

/// Map `\r\n` and lone `\r` to `\n`, as an XML processor does on input
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Normalize and unescape a raw attribute value.
///
/// Literal line breaks and tabs become spaces; the same characters written
/// as character references survive.
fn attribute_value(raw: &str) -> Result<String> {
    if raw.contains('<') {
        return Err(Error::malformed("'<' is not allowed in attribute values"));
    }
    let spaced = raw
        .replace("\r\n", " ")
        .replace(|c: char| matches!(c, '\t' | '\r' | '\n'), " ");
    Ok(unescape_references(&spaced)?.into_owned())
}

/// Resolve the predefined entities and character references.
///
/// Character references decode to any Unicode scalar value, `&#0;`
/// included, matching what xot accepts.
fn unescape_references(raw: &str) -> Result<Cow<'_, str>> {
    if !raw.contains('&') {
        return Ok(Cow::Borrowed(raw));
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find(';')
            .ok_or_else(|| Error::malformed("unterminated entity reference"))?;
        out.push(resolve_reference(&after[..end])?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

fn resolve_reference(name: &str) -> Result<char> {
    let code = match name {
        "lt" => return Ok('<'),
        "gt" => return Ok('>'),
        "amp" => return Ok('&'),
        "apos" => return Ok('\''),
        "quot" => return Ok('"'),
        _ => {
            if let Some(hex) = name.strip_prefix("#x") {
                parse_digits(hex, 16)
            } else if let Some(dec) = name.strip_prefix('#') {
                parse_digits(dec, 10)
            } else {
                return Err(Error::malformed(format!("undefined entity '&{};'", name)));
            }
        }
    };
    code.and_then(char::from_u32)
        .ok_or_else(|| Error::malformed(format!("invalid character reference '&{};'", name)))
}

fn parse_digits(digits: &str, radix: u32) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}
