//! SED-ML Rust Library
//!
//! This library reads, builds, checks and writes SED-ML (Simulation
//! Experiment Description Markup Language) documents, Level 1 Versions 1 to 5:
//! - An object model of every SED-ML element with typed accessors
//! - Generic `listOfX` containers with admission checks
//! - A reader that collects diagnostics instead of failing
//! - A writer with configurable formatting
//! - Document-wide consistency checks

#![warn(unused_imports)]

/// Macros generating the boilerplate of the element types
#[macro_use]
mod macros {
    /// Attribute accessor tables
    #[macro_use]
    pub mod attributes;
    /// `SedObject` plumbing, constructors and list items
    #[macro_use]
    pub mod object;
    /// Closed enums over related element kinds
    #[macro_use]
    pub mod variants;
}

#[doc(hidden)]
pub use paste;

/// Commonly used types and functionality re-exported for convenience
pub mod prelude {
    pub use crate::attribute::AttributeValue;
    pub use crate::base::{SedBase, SedObject};
    pub use crate::elements::*;
    pub use crate::error::{SedConstructorError, SedIoError, SedOperationError, SedResult};
    pub use crate::errorlog::{SedError, SedErrorCode, SedErrorLog};
    pub use crate::io::*;
    pub use crate::list::{ListItem, SedListOf};
    pub use crate::namespaces::SedNamespaces;
    pub use crate::typecode::TypeCode;
    pub use crate::validation::consistency::check_consistency;
    pub use crate::visitor::SedVisitor;
}

/// Error types and operation result codes
pub mod error;

/// Diagnostics of reading and checking
pub mod errorlog;

/// Syntax of identifiers
pub mod syntax;

/// Element kinds
pub mod typecode;

/// Levels, versions and namespaces
pub mod namespaces;

/// XML plumbing over quick-xml
pub mod xml;

/// Typed attribute values
pub mod attribute;

/// The object contract shared by every element
pub mod base;

/// Generic `listOfX` container
pub mod list;

/// Concrete SED-ML elements
pub mod elements;

/// Depth-first traversal
pub mod visitor;

/// IO functionality
pub mod io;

/// Table rendering of documents
pub mod info;

/// Validation of SED-ML documents
pub mod validation {
    /// Main consistency interface
    pub mod consistency;
    /// Uniqueness of identifiers
    mod identifiers;
    /// Resolution of references between elements
    mod references;
    /// Required attributes and children
    mod required;
}
