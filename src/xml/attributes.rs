use std::collections::BTreeSet;

/// A single attribute of an XML start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub prefix: String,
    pub name: String,
    pub uri: String,
    pub value: String,
}

impl XmlAttribute {
    /// `prefix:name`, or just `name` for unprefixed attributes.
    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.prefix, self.name)
        }
    }
}

/// The attributes of an XML start tag, in document order.
///
/// Namespace declarations are not attributes here; they are kept in
/// [`XmlNamespaces`](super::XmlNamespaces).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlAttributes {
    entries: Vec<XmlAttribute>,
}

impl XmlAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unprefixed attribute.
    pub fn add(&mut self, name: &str, value: &str) {
        self.add_qualified("", name, "", value);
    }

    /// Adds an attribute with a prefix and resolved namespace URI.
    pub fn add_qualified(&mut self, prefix: &str, name: &str, uri: &str, value: &str) {
        self.entries.push(XmlAttribute {
            prefix: prefix.to_string(),
            name: name.to_string(),
            uri: uri.to_string(),
            value: value.to_string(),
        });
    }

    /// Value of the unprefixed attribute `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|attr| attr.prefix.is_empty() && attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &XmlAttribute> {
        self.entries.iter()
    }
}

/// The attribute vocabulary an element declares before its attributes are read.
///
/// Attributes missing from this set are reported as unknown.
#[derive(Debug, Clone, Default)]
pub struct ExpectedAttributes {
    names: BTreeSet<String>,
}

impl ExpectedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    pub fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_prefixed_attributes() {
        let mut attributes = XmlAttributes::new();
        attributes.add_qualified("xsi", "type", "http://www.w3.org/2001/XMLSchema-instance", "x");
        attributes.add("type", "linear");

        assert_eq!(attributes.get("type"), Some("linear"));
        assert_eq!(attributes.len(), 2);
        assert_eq!(
            attributes.iter().next().map(XmlAttribute::qualified_name),
            Some("xsi:type".to_string())
        );
    }

    #[test]
    fn test_expected_attributes() {
        let mut expected = ExpectedAttributes::new();
        expected.add("id");
        expected.add("id");
        expected.add("label");

        assert_eq!(expected.len(), 2);
        assert!(expected.has("label"));
        assert!(!expected.has("name"));
    }
}
