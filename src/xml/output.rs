use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::SedIoError;
use crate::xml::node::XmlNode;

/// Streaming XML writer used by the object model.
///
/// A start tag is held back until its first child or its end is written, so
/// attributes can be added after [`start_element`](Self::start_element) and
/// elements without content come out as empty tags (`<dataSet .../>`).
pub struct XmlOutputStream {
    writer: Writer<Vec<u8>>,
    pending: Option<BytesStart<'static>>,
}

impl XmlOutputStream {
    /// A writer indenting nested elements by `width` repetitions of `indent_char`.
    pub fn new(indent_char: u8, width: usize) -> Self {
        XmlOutputStream {
            writer: Writer::new_with_indent(Vec::new(), indent_char, width),
            pending: None,
        }
    }

    /// A writer without any indentation.
    pub fn compact() -> Self {
        XmlOutputStream {
            writer: Writer::new(Vec::new()),
            pending: None,
        }
    }

    /// Writes `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn write_declaration(&mut self) -> Result<(), SedIoError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    pub fn write_comment(&mut self, comment: &str) -> Result<(), SedIoError> {
        self.flush_pending()?;
        self.writer
            .write_event(Event::Comment(BytesText::new(comment)))?;
        Ok(())
    }

    pub fn start_element(&mut self, name: &str) -> Result<(), SedIoError> {
        self.flush_pending()?;
        self.pending = Some(BytesStart::new(name.to_string()));
        Ok(())
    }

    /// Adds an attribute to the element opened last.
    ///
    /// Ignored once the element has content, which only happens when callers
    /// write attributes after children.
    pub fn write_attribute(&mut self, name: &str, value: &str) {
        match self.pending.as_mut() {
            Some(start) => start.push_attribute((name, value)),
            None => log::warn!("Attribute '{name}' written outside of a start tag was dropped"),
        }
    }

    pub fn end_element(&mut self, name: &str) -> Result<(), SedIoError> {
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self
                .writer
                .write_event(Event::End(BytesEnd::new(name.to_string())))?,
        }
        Ok(())
    }

    pub fn write_text(&mut self, text: &str) -> Result<(), SedIoError> {
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Writes `<name>text</name>`.
    pub fn write_text_element(&mut self, name: &str, text: &str) -> Result<(), SedIoError> {
        self.start_element(name)?;
        self.write_text(text)?;
        self.end_element(name)
    }

    /// Writes a free-form tree as-is.
    pub fn write_node(&mut self, node: &XmlNode) -> Result<(), SedIoError> {
        match node {
            XmlNode::Text(text) => self.write_text(text),
            XmlNode::Element {
                name,
                attributes,
                children,
            } => {
                self.start_element(name)?;
                for (key, value) in attributes {
                    self.write_attribute(key, value);
                }
                for child in children {
                    self.write_node(child)?;
                }
                self.end_element(name)
            }
        }
    }

    /// Returns everything written so far as a string.
    pub fn finish(mut self) -> Result<String, SedIoError> {
        self.flush_pending()?;
        let bytes = self.writer.into_inner();
        Ok(String::from_utf8(bytes)?)
    }

    fn flush_pending(&mut self) -> Result<(), SedIoError> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_elements_collapse() {
        let mut stream = XmlOutputStream::new(b' ', 2);
        stream.start_element("a").expect("Failed to start");
        stream.write_attribute("x", "1");
        stream.start_element("b").expect("Failed to start");
        stream.end_element("b").expect("Failed to end");
        stream.end_element("a").expect("Failed to end");

        let xml = stream.finish().expect("Failed to finish");
        assert_eq!(xml, "<a x=\"1\">\n  <b/>\n</a>");
    }

    #[test]
    fn test_text_element() {
        let mut stream = XmlOutputStream::compact();
        stream
            .write_text_element("value", "1.5")
            .expect("Failed to write");
        assert_eq!(stream.finish().expect("Failed to finish"), "<value>1.5</value>");
    }
}
