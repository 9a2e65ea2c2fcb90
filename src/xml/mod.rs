//! XML plumbing over `quick-xml`.
//!
//! The object model never talks to `quick-xml` directly. Reading goes through
//! [`XmlInputStream`], a tokenized view of the document with line/column
//! positions and resolved namespaces. Writing goes through [`XmlOutputStream`].
//! Free-form content (MathML, `newXML`, notes and annotations) is kept as an
//! [`XmlNode`] tree.

pub mod attributes;
pub mod input;
pub mod namespaces;
pub mod node;
pub mod output;

pub use attributes::{ExpectedAttributes, XmlAttribute, XmlAttributes};
pub use input::{XmlElementToken, XmlInputStream, XmlStreamError, XmlToken};
pub use namespaces::XmlNamespaces;
pub use node::XmlNode;
pub use output::XmlOutputStream;
