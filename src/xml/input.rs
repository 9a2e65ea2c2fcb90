use std::collections::VecDeque;

use log::debug;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::xml::attributes::XmlAttributes;
use crate::xml::namespaces::{XmlNamespaces, XML_NAMESPACE};
use crate::xml::node::XmlNode;

/// A malformed-XML failure reported by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line}, column {column})")]
pub struct XmlStreamError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// A start tag with its attributes and namespace context resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElementToken {
    /// Qualified name as written
    pub name: String,
    pub prefix: String,
    pub local_name: String,
    /// Namespace URI the prefix resolves to, empty when unbound
    pub uri: String,
    pub attributes: XmlAttributes,
    /// Declarations made on this very tag
    pub namespaces: XmlNamespaces,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlToken {
    Start(XmlElementToken),
    End {
        name: String,
        line: usize,
        column: usize,
    },
    Text {
        text: String,
        line: usize,
        column: usize,
    },
}

impl XmlToken {
    pub fn line(&self) -> usize {
        match self {
            XmlToken::Start(start) => start.line,
            XmlToken::End { line, .. } | XmlToken::Text { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            XmlToken::Start(start) => start.column,
            XmlToken::End { column, .. } | XmlToken::Text { column, .. } => *column,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, XmlToken::Text { .. })
    }
}

/// A tokenized XML document with peek/next access.
///
/// The whole input is tokenized up front. Empty elements are reported as a
/// start token directly followed by an end token. When the input is not
/// well-formed the tokens up to the failure stay available and
/// [`error`](Self::error) describes the problem.
#[derive(Debug, Clone)]
pub struct XmlInputStream {
    tokens: VecDeque<XmlToken>,
    encoding: Option<String>,
    xml_version: Option<String>,
    has_declaration: bool,
    error: Option<XmlStreamError>,
}

impl XmlInputStream {
    /// Tokenizes `text`.
    pub fn new(text: &str) -> Self {
        let mut stream = XmlInputStream {
            tokens: VecDeque::new(),
            encoding: None,
            xml_version: None,
            has_declaration: false,
            error: None,
        };
        stream.tokenize(text);
        stream
    }

    /// The next token, without consuming it.
    pub fn peek(&self) -> Option<&XmlToken> {
        self.tokens.front()
    }

    /// The next token if it is a start tag.
    pub fn peek_start(&self) -> Option<&XmlElementToken> {
        match self.tokens.front() {
            Some(XmlToken::Start(start)) => Some(start),
            _ => None,
        }
    }

    /// Local name of the next token if it is a start tag.
    pub fn peek_name(&self) -> Option<&str> {
        self.peek_start().map(|start| start.local_name.as_str())
    }

    /// Discards text tokens up to the next tag.
    pub fn skip_text(&mut self) {
        while self.tokens.front().is_some_and(XmlToken::is_text) {
            self.tokens.pop_front();
        }
    }

    /// Consumes the next start tag and everything up to its matching end tag.
    pub fn skip_past_end(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.tokens.pop_front() {
            match token {
                XmlToken::Start(_) => depth += 1,
                XmlToken::End { .. } => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                XmlToken::Text { .. } => {}
            }
        }
    }

    /// Consumes the next element as a free-form tree.
    ///
    /// Whitespace-only text between tags is dropped so that re-indented
    /// output reads back to the same tree. Returns `None` when the next
    /// token is not a start tag.
    pub fn read_node(&mut self) -> Option<XmlNode> {
        let start = match self.tokens.pop_front() {
            Some(XmlToken::Start(start)) => start,
            Some(other) => {
                self.tokens.push_front(other);
                return None;
            }
            None => return None,
        };

        let mut attributes: Vec<(String, String)> = start
            .namespaces
            .iter()
            .map(|(prefix, uri)| (XmlNamespaces::attribute_name(prefix), uri.to_string()))
            .collect();
        attributes.extend(
            start
                .attributes
                .iter()
                .map(|attr| (attr.qualified_name(), attr.value.clone())),
        );

        let mut children = Vec::new();
        loop {
            match self.tokens.front() {
                Some(XmlToken::Start(_)) => {
                    if let Some(child) = self.read_node() {
                        children.push(child);
                    }
                }
                Some(XmlToken::Text { text, .. }) => {
                    if !text.trim().is_empty() {
                        children.push(XmlNode::Text(text.clone()));
                    }
                    self.tokens.pop_front();
                }
                Some(XmlToken::End { .. }) => {
                    self.tokens.pop_front();
                    break;
                }
                None => break,
            }
        }

        Some(XmlNode::Element {
            name: start.name,
            attributes,
            children,
        })
    }

    /// Consumes the text content of the next element and the element itself.
    pub fn read_element_text(&mut self) -> Option<String> {
        self.peek_start()?;
        let node = self.read_node()?;
        Some(node.text_content())
    }

    /// The malformed-XML failure, if tokenizing stopped early.
    pub fn error(&self) -> Option<&XmlStreamError> {
        self.error.as_ref()
    }

    /// Whether the whole input was well-formed.
    pub fn is_good(&self) -> bool {
        self.error.is_none()
    }

    /// Encoding named by the XML declaration.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Version named by the XML declaration.
    pub fn xml_version(&self) -> Option<&str> {
        self.xml_version.as_deref()
    }

    pub fn has_declaration(&self) -> bool {
        self.has_declaration
    }

    fn tokenize(&mut self, text: &str) {
        let line_starts = line_starts(text);
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(false);

        let mut scopes: Vec<XmlNamespaces> = Vec::new();

        loop {
            let offset = reader.buffer_position() as usize;
            let (line, column) = locate(&line_starts, offset);

            match reader.read_event() {
                Ok(Event::Decl(decl)) => {
                    self.has_declaration = true;
                    if let Ok(version) = decl.version() {
                        self.xml_version = Some(String::from_utf8_lossy(&version).into_owned());
                    }
                    if let Some(Ok(encoding)) = decl.encoding() {
                        self.encoding = Some(String::from_utf8_lossy(&encoding).into_owned());
                    }
                }
                Ok(Event::Start(start)) => match element_token(&start, &scopes, line, column) {
                    Ok(token) => {
                        scopes.push(token.namespaces.clone());
                        self.tokens.push_back(XmlToken::Start(token));
                    }
                    Err(message) => {
                        self.fail(message, line, column);
                        break;
                    }
                },
                Ok(Event::Empty(start)) => match element_token(&start, &scopes, line, column) {
                    Ok(token) => {
                        let name = token.name.clone();
                        self.tokens.push_back(XmlToken::Start(token));
                        self.tokens.push_back(XmlToken::End { name, line, column });
                    }
                    Err(message) => {
                        self.fail(message, line, column);
                        break;
                    }
                },
                Ok(Event::End(end)) => {
                    scopes.pop();
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    self.tokens.push_back(XmlToken::End { name, line, column });
                }
                Ok(Event::Text(content)) => {
                    let raw = String::from_utf8_lossy(&content).into_owned();
                    let text = match unescape(&raw) {
                        Ok(unescaped) => unescaped.into_owned(),
                        Err(_) => raw,
                    };
                    self.push_text(text, line, column);
                }
                Ok(Event::CData(content)) => {
                    let text = String::from_utf8_lossy(&content).into_owned();
                    self.push_text(text, line, column);
                }
                Ok(Event::GeneralRef(reference)) => {
                    let raw = format!("&{};", String::from_utf8_lossy(&reference));
                    let text = match unescape(&raw) {
                        Ok(unescaped) => unescaped.into_owned(),
                        Err(_) => raw,
                    };
                    self.push_text(text, line, column);
                }
                Ok(Event::Eof) => {
                    if !scopes.is_empty() {
                        let (line, column) = locate(&line_starts, text.len());
                        self.fail("unexpected end of document".to_string(), line, column);
                    }
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    let (line, column) = locate(&line_starts, reader.buffer_position() as usize);
                    self.fail(err.to_string(), line, column);
                    break;
                }
            }
        }
    }

    fn push_text(&mut self, text: String, line: usize, column: usize) {
        if let Some(XmlToken::Text { text: previous, .. }) = self.tokens.back_mut() {
            previous.push_str(&text);
            return;
        }
        self.tokens.push_back(XmlToken::Text { text, line, column });
    }

    fn fail(&mut self, message: String, line: usize, column: usize) {
        debug!("Malformed XML at {line}:{column}: {message}");
        self.error = Some(XmlStreamError {
            message,
            line,
            column,
        });
    }
}

impl Iterator for XmlInputStream {
    type Item = XmlToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.pop_front()
    }
}

/// Builds the token of a start tag, resolving namespaces against the open scopes.
fn element_token(
    start: &BytesStart<'_>,
    scopes: &[XmlNamespaces],
    line: usize,
    column: usize,
) -> Result<XmlElementToken, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let (prefix, local_name) = split_name(&name);

    let mut namespaces = XmlNamespaces::new();
    let mut raw_attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value).into_owned();
        let value = match unescape(&raw) {
            Ok(unescaped) => unescaped.into_owned(),
            Err(_) => raw,
        };

        if key == "xmlns" {
            namespaces.add(&value, "");
        } else if let Some(declared) = key.strip_prefix("xmlns:") {
            namespaces.add(&value, declared);
        } else {
            raw_attributes.push((key, value));
        }
    }

    let resolve = |prefix: &str| -> String {
        if prefix == "xml" {
            return XML_NAMESPACE.to_string();
        }
        std::iter::once(&namespaces)
            .chain(scopes.iter().rev())
            .find_map(|scope| scope.uri(prefix))
            .unwrap_or_default()
            .to_string()
    };

    let mut attributes = XmlAttributes::new();
    for (key, value) in raw_attributes {
        let (attr_prefix, attr_name) = split_name(&key);
        let uri = if attr_prefix.is_empty() {
            String::new()
        } else {
            resolve(attr_prefix)
        };
        attributes.add_qualified(attr_prefix, attr_name, &uri, &value);
    }

    Ok(XmlElementToken {
        uri: resolve(prefix),
        prefix: prefix.to_string(),
        local_name: local_name.to_string(),
        name,
        attributes,
        namespaces,
        line,
        column,
    })
}

fn split_name(name: &str) -> (&str, &str) {
    name.split_once(':').unwrap_or(("", name))
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(index, _)| index + 1))
        .collect()
}

/// 1-based line and column of a byte offset.
fn locate(line_starts: &[usize], offset: usize) -> (usize, usize) {
    let line = line_starts.partition_point(|&start| start <= offset).max(1);
    let column = offset - line_starts[line - 1] + 1;
    (line, column)
}
