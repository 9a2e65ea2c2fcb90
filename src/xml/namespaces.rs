use serde::Serialize;

/// URI bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An ordered set of namespace declarations (`xmlns` / `xmlns:prefix`).
///
/// The empty prefix stands for the default namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlNamespaces {
    declarations: Vec<(String, String)>,
}

impl XmlNamespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `uri` under `prefix`, replacing an earlier declaration of the same prefix.
    pub fn add(&mut self, uri: &str, prefix: &str) {
        match self.declarations.iter_mut().find(|(p, _)| p == prefix) {
            Some(entry) => entry.1 = uri.to_string(),
            None => self
                .declarations
                .push((prefix.to_string(), uri.to_string())),
        }
    }

    /// Removes the declaration of `prefix`. Returns `true` if it existed.
    pub fn remove_prefix(&mut self, prefix: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|(p, _)| p != prefix);
        before != self.declarations.len()
    }

    /// URI declared for `prefix`.
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// First prefix declared for `uri`.
    pub fn prefix(&self, uri: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(_, u)| u == uri)
            .map(|(prefix, _)| prefix.as_str())
    }

    pub fn has_uri(&self, uri: &str) -> bool {
        self.prefix(uri).is_some()
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.uri(prefix).is_some()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates `(prefix, uri)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Attribute name that declares `prefix`.
    pub(crate) fn attribute_name(prefix: &str) -> String {
        if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{prefix}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_prefix() {
        let mut ns = XmlNamespaces::new();
        ns.add("http://a", "");
        ns.add("http://b", "b");
        ns.add("http://c", "");

        assert_eq!(ns.len(), 2);
        assert_eq!(ns.uri(""), Some("http://c"));
        assert_eq!(ns.prefix("http://b"), Some("b"));
        assert!(!ns.has_uri("http://a"));
    }

    #[test]
    fn test_remove_prefix() {
        let mut ns = XmlNamespaces::new();
        ns.add("http://b", "b");
        assert!(ns.remove_prefix("b"));
        assert!(!ns.remove_prefix("b"));
        assert!(ns.is_empty());
    }
}
