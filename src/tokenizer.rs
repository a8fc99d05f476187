//! Pull-style markup tokenizer seam.
//!
//! The walker only needs a cursor over start/end tag events with attribute
//! lookup by qualified name. [`XmlTokenizer`] provides one over quick-xml;
//! tests and other front ends can implement [`Tokenizer`] themselves.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event as XmlEvent};

use crate::errors::ParseError;

/// The kind of markup event the cursor currently rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    StartDocument,
    StartTag,
    EndTag,
    Text,
    EndDocument,
}

pub trait Tokenizer {
    /// Move to the next event and return its kind.
    fn advance(&mut self) -> Result<Event, ParseError>;

    fn event(&self) -> Event;

    /// Qualified name of the current start or end tag (`android:pathData`
    /// style prefixes are kept); empty for other events.
    fn tag_name(&self) -> &str;

    /// Attribute of the current start tag, by qualified name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Nesting depth of the current tag; the root element is at depth 1 on
    /// both its start and end tag.
    fn depth(&self) -> usize;

    fn is_at_document_end(&self) -> bool {
        match self.event() {
            Event::EndDocument => true,
            Event::EndTag => self.depth() == 1,
            _ => false,
        }
    }

    /// Advance until the cursor rests on a start tag.
    fn seek_to_start_tag(&mut self) -> Result<(), ParseError> {
        loop {
            match self.event() {
                Event::StartTag => return Ok(()),
                Event::EndDocument => {
                    return Err(ParseError::malformed_document("no start tag found"));
                }
                _ => {
                    self.advance()?;
                }
            }
        }
    }
}

/// [`Tokenizer`] over an in-memory document, backed by quick-xml.
///
/// Self-closing tags are reported as a start tag followed by an end tag.
pub struct XmlTokenizer<'a> {
    reader: Reader<&'a [u8]>,
    event: Event,
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    depth: usize,
    pending_end: bool,
}

impl<'a> XmlTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        XmlTokenizer {
            reader: Reader::from_str(text),
            event: Event::StartDocument,
            name: String::new(),
            attributes: Vec::new(),
            text: String::new(),
            depth: 0,
            pending_end: false,
        }
    }

    /// Character data of the current text event.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn open(&mut self, start: &BytesStart) -> Result<(), ParseError> {
        self.name = utf8(start.name().as_ref())?.to_string();
        self.attributes.clear();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| malformed(format!("invalid attribute: {e}")))?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value().map_err(malformed)?;
            self.attributes.push((key, value.into_owned()));
        }
        self.depth += 1;
        self.event = Event::StartTag;
        Ok(())
    }
}

impl Tokenizer for XmlTokenizer<'_> {
    fn advance(&mut self) -> Result<Event, ParseError> {
        if self.pending_end {
            self.pending_end = false;
            self.event = Event::EndTag;
            return Ok(self.event);
        }
        if self.event == Event::EndTag {
            self.depth = self.depth.saturating_sub(1);
        }

        loop {
            match self.reader.read_event().map_err(malformed)? {
                XmlEvent::Start(start) => {
                    self.open(&start)?;
                }
                XmlEvent::Empty(start) => {
                    self.open(&start)?;
                    self.pending_end = true;
                }
                XmlEvent::End(end) => {
                    self.name = utf8(end.name().as_ref())?.to_string();
                    self.attributes.clear();
                    self.event = Event::EndTag;
                }
                XmlEvent::Text(text) => {
                    let text = text.unescape().map_err(malformed)?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    self.text = text.into_owned();
                    self.name.clear();
                    self.attributes.clear();
                    self.event = Event::Text;
                }
                XmlEvent::Eof => {
                    if self.depth > 0 {
                        return Err(malformed("unexpected end of document"));
                    }
                    self.name.clear();
                    self.attributes.clear();
                    self.event = Event::EndDocument;
                }
                _ => continue,
            }
            return Ok(self.event);
        }
    }

    fn event(&self) -> Event {
        self.event
    }

    fn tag_name(&self) -> &str {
        match self.event {
            Event::StartTag | Event::EndTag => &self.name,
            _ => "",
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        if self.event != Event::StartTag {
            return None;
        }
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn depth(&self) -> usize {
        self.depth
    }
}

fn malformed(err: impl std::fmt::Display) -> ParseError {
    ParseError::malformed_document(err.to_string())
}

fn utf8(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(malformed)
}
