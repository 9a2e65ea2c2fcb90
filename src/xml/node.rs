use crate::error::SedIoError;
use crate::xml::input::{XmlInputStream, XmlStreamError};
use crate::xml::output::XmlOutputStream;

/// A free-form XML tree.
///
/// Used for content the object model does not interpret: MathML, the
/// `newXML` payload of changes, notes and annotations. Names and attribute
/// keys are kept qualified (`prefix:name`), namespace declarations are
/// ordinary attributes, so a node written out reproduces what was read.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<XmlNode>,
    },
    Text(String),
}

impl XmlNode {
    /// An element without attributes or children.
    pub fn element(name: &str) -> Self {
        XmlNode::Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: &str) -> Self {
        XmlNode::Text(text.to_string())
    }

    /// Builder-style attribute setter. Has no effect on text nodes.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child append. Has no effect on text nodes.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.add_child(child);
        self
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) {
        if let XmlNode::Element { attributes, .. } = self {
            match attributes.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.to_string(),
                None => attributes.push((key.to_string(), value.to_string())),
            }
        }
    }

    pub fn add_child(&mut self, child: XmlNode) {
        if let XmlNode::Element { children, .. } = self {
            children.push(child);
        }
    }

    /// Qualified element name. Empty for text nodes.
    pub fn name(&self) -> &str {
        match self {
            XmlNode::Element { name, .. } => name,
            XmlNode::Text(_) => "",
        }
    }

    /// Element name without its prefix.
    pub fn local_name(&self) -> &str {
        let name = self.name();
        name.rsplit_once(':').map_or(name, |(_, local)| local)
    }

    pub fn is_element(&self) -> bool {
        matches!(self, XmlNode::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, XmlNode::Text(_))
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            XmlNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.as_str()),
            XmlNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[XmlNode] {
        match self {
            XmlNode::Element { children, .. } => children,
            XmlNode::Text(_) => &[],
        }
    }

    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        match self {
            XmlNode::Text(text) => text.clone(),
            XmlNode::Element { children, .. } => {
                children.iter().map(XmlNode::text_content).collect()
            }
        }
    }

    /// Parses a single element from a string.
    ///
    /// # Arguments
    ///
    /// * `xml` - Markup containing exactly one root element
    ///
    /// # Returns
    ///
    /// The root element, or the error of the underlying XML reader.
    pub fn parse(xml: &str) -> Result<XmlNode, XmlStreamError> {
        let mut stream = XmlInputStream::new(xml);
        if let Some(error) = stream.error() {
            return Err(error.clone());
        }

        stream.skip_text();
        stream.read_node().ok_or_else(|| XmlStreamError {
            message: "no element found".to_string(),
            line: 1,
            column: 1,
        })
    }

    /// Serializes the node without indentation.
    pub fn to_xml_string(&self) -> Result<String, SedIoError> {
        let mut stream = XmlOutputStream::compact();
        stream.write_node(self)?;
        stream.finish()
    }
}
