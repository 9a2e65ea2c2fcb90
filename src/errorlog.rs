//! Diagnostics collected while reading and checking documents.
//!
//! Parsing never fails on invalid content. Every problem becomes a
//! [`SedError`] in the [`SedErrorLog`] owned by the document, and reading
//! continues so that one pass reports as much as possible.

use std::fmt;

use colored::Colorize;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::typecode::TypeCode;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message
    Info,
    /// The document may have issues but can be used
    Warning,
    /// The document violates SED-ML
    Error,
    /// Reading could not continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
            Severity::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Which layer found the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Internal,
    System,
    Xml,
    Sedml,
    GeneralConsistency,
    IdentifierConsistency,
}

/// The catalogue of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SedErrorCode {
    XmlFileUnreadable,
    XmlFileUnwritable,
    MissingXmlEncoding,
    BadXmlDecl,
    BadlyFormedXml,
    XmlAttributeTypeMismatch,
    Unknown,
    NotUtf8,
    UnrecognizedElement,
    NotSchemaConformant,
    InvalidMathElement,
    DuplicateComponentId,
    IdSyntaxRule,
    InvalidMetaidSyntax,
    MultipleAnnotations,
    OnlyOneNotesElementAllowed,
    InvalidNamespaceOnSed,
    AllowedAttributesOnSed,
    EmptyListElement,
    DocumentLevelMustBeNonNegativeInteger,
    DocumentVersionMustBeNonNegativeInteger,
    UnknownCoreAttribute,
    /// Unknown core attribute on an element of the given kind
    AllowedCoreAttributes(TypeCode),
    /// Unknown or missing attribute on an element of the given kind
    AllowedAttributes(TypeCode),
}

impl SedErrorCode {
    /// The attribute diagnostic for an element kind, falling back to the
    /// generic unknown-attribute code for kinds without their own block.
    pub fn allowed_attributes(type_code: TypeCode) -> Self {
        match type_code.error_block() {
            Some(_) => SedErrorCode::AllowedAttributes(type_code),
            None => SedErrorCode::UnknownCoreAttribute,
        }
    }

    /// Numeric identifier of the diagnostic.
    pub fn id(&self) -> u32 {
        match self {
            SedErrorCode::XmlFileUnreadable => 2,
            SedErrorCode::XmlFileUnwritable => 3,
            SedErrorCode::MissingXmlEncoding => 1005,
            SedErrorCode::BadXmlDecl => 1006,
            SedErrorCode::BadlyFormedXml => 1009,
            SedErrorCode::XmlAttributeTypeMismatch => 1019,
            SedErrorCode::Unknown => 10000,
            SedErrorCode::NotUtf8 => 10001,
            SedErrorCode::UnrecognizedElement => 10002,
            SedErrorCode::NotSchemaConformant => 10003,
            SedErrorCode::InvalidMathElement => 10201,
            SedErrorCode::DuplicateComponentId => 10301,
            SedErrorCode::IdSyntaxRule => 10302,
            SedErrorCode::InvalidMetaidSyntax => 10303,
            SedErrorCode::MultipleAnnotations => 10404,
            SedErrorCode::OnlyOneNotesElementAllowed => 10805,
            SedErrorCode::InvalidNamespaceOnSed => 20101,
            SedErrorCode::AllowedAttributesOnSed => 20102,
            SedErrorCode::EmptyListElement => 20103,
            SedErrorCode::DocumentLevelMustBeNonNegativeInteger => 20205,
            SedErrorCode::DocumentVersionMustBeNonNegativeInteger => 20206,
            SedErrorCode::UnknownCoreAttribute => 99994,
            SedErrorCode::AllowedCoreAttributes(type_code) => {
                type_code.error_block().unwrap_or(99994)
            }
            SedErrorCode::AllowedAttributes(type_code) => type_code
                .error_block()
                .map_or(99994, |block| block + 2),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SedErrorCode::XmlFileUnreadable
            | SedErrorCode::XmlFileUnwritable
            | SedErrorCode::BadXmlDecl
            | SedErrorCode::BadlyFormedXml => Severity::Fatal,
            SedErrorCode::MissingXmlEncoding => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            SedErrorCode::XmlFileUnreadable | SedErrorCode::XmlFileUnwritable => Category::System,
            SedErrorCode::MissingXmlEncoding
            | SedErrorCode::BadXmlDecl
            | SedErrorCode::BadlyFormedXml
            | SedErrorCode::XmlAttributeTypeMismatch => Category::Xml,
            SedErrorCode::Unknown => Category::Internal,
            SedErrorCode::DuplicateComponentId | SedErrorCode::IdSyntaxRule => {
                Category::IdentifierConsistency
            }
            _ => Category::Sedml,
        }
    }

    /// One-line summary of the rule behind the diagnostic.
    pub fn short_message(&self) -> String {
        match self {
            SedErrorCode::XmlFileUnreadable => "File unreadable".into(),
            SedErrorCode::XmlFileUnwritable => "File unwritable".into(),
            SedErrorCode::MissingXmlEncoding => "Missing XML encoding attribute".into(),
            SedErrorCode::BadXmlDecl => "Invalid XML declaration".into(),
            SedErrorCode::BadlyFormedXml => "Badly formed XML".into(),
            SedErrorCode::XmlAttributeTypeMismatch => "Attribute value of the wrong type".into(),
            SedErrorCode::Unknown => "Encountered unknown internal libSEDML error".into(),
            SedErrorCode::NotUtf8 => "File does not use UTF-8 encoding".into(),
            SedErrorCode::UnrecognizedElement => "Encountered unrecognized element".into(),
            SedErrorCode::NotSchemaConformant => "Document does not conform to the SED-ML XML schema".into(),
            SedErrorCode::InvalidMathElement => "Invalid MathML".into(),
            SedErrorCode::DuplicateComponentId => "Duplicate 'id' attribute value".into(),
            SedErrorCode::IdSyntaxRule => "Invalid syntax for an 'id' attribute value".into(),
            SedErrorCode::InvalidMetaidSyntax => "Invalid syntax for a 'metaid' attribute value".into(),
            SedErrorCode::MultipleAnnotations => "Only one <annotation> element is permitted inside any given SED-ML object".into(),
            SedErrorCode::OnlyOneNotesElementAllowed => "Only one <notes> element is permitted inside any given SED-ML object".into(),
            SedErrorCode::InvalidNamespaceOnSed => "Invalid namespace on the <sedML> element".into(),
            SedErrorCode::AllowedAttributesOnSed => "Allowed attributes on the <sedML> element".into(),
            SedErrorCode::EmptyListElement => "No empty listOf elements are allowed".into(),
            SedErrorCode::DocumentLevelMustBeNonNegativeInteger => "The 'level' attribute must be a non-negative integer".into(),
            SedErrorCode::DocumentVersionMustBeNonNegativeInteger => "The 'version' attribute must be a non-negative integer".into(),
            SedErrorCode::UnknownCoreAttribute => "Unknown attribute".into(),
            SedErrorCode::AllowedCoreAttributes(type_code) => {
                format!("Core attributes allowed on <{}>", type_code.name())
            }
            SedErrorCode::AllowedAttributes(type_code) => {
                format!("Attributes allowed on <{}>", type_code.name())
            }
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SedError {
    error_id: u32,
    code: SedErrorCode,
    severity: Severity,
    category: Category,
    message: String,
    line: usize,
    column: usize,
    level: u32,
    version: u32,
}

impl SedError {
    /// Creates a diagnostic of the given kind.
    ///
    /// # Arguments
    ///
    /// * `code` - The kind of problem
    /// * `details` - Message specific to this occurrence; the generic summary is used when empty
    /// * `line`, `column` - Position in the source document, 0 when unknown
    /// * `level`, `version` - SED-ML release the document was read as
    pub fn new(
        code: SedErrorCode,
        details: &str,
        line: usize,
        column: usize,
        level: u32,
        version: u32,
    ) -> Self {
        let message = if details.is_empty() {
            code.short_message()
        } else {
            details.to_string()
        };

        SedError {
            error_id: code.id(),
            code,
            severity: code.severity(),
            category: code.category(),
            message,
            line,
            column,
            level,
            version,
        }
    }

    pub fn error_id(&self) -> u32 {
        self.error_id
    }

    pub fn code(&self) -> SedErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Errors and fatal errors make a document unusable.
    pub fn is_critical(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for SedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (severity, message) = match self.severity {
            Severity::Fatal | Severity::Error => (
                self.severity.to_string().bold().red(),
                self.message.bold().red(),
            ),
            Severity::Warning => (
                self.severity.to_string().bold().yellow(),
                self.message.bold().yellow(),
            ),
            Severity::Info => (
                self.severity.to_string().bold().green(),
                self.message.bold().green(),
            ),
        };

        write!(
            f,
            "[{}] {} {}:\n\t└── {}",
            format!("line {}:{}", self.line, self.column).bold(),
            severity,
            self.error_id,
            message
        )
    }
}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SedErrorLog {
    errors: Vec<SedError>,
}

impl SedErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic and reports it through the `log` facade.
    pub fn log_error(
        &mut self,
        code: SedErrorCode,
        details: &str,
        line: usize,
        column: usize,
        level: u32,
        version: u32,
    ) {
        let error = SedError::new(code, details, line, column, level, version);
        warn!(
            "SED-ML {} {} at {}:{}: {}",
            error.severity, error.error_id, line, column, error.message
        );
        self.errors.push(error);
    }

    pub fn add(&mut self, error: SedError) {
        self.errors.push(error);
    }

    pub fn num_errors(&self) -> usize {
        self.errors.len()
    }

    /// Number of diagnostics of exactly `severity`.
    pub fn num_errors_with_severity(&self, severity: Severity) -> usize {
        self.errors
            .iter()
            .filter(|error| error.severity == severity)
            .count()
    }

    pub fn error(&self, n: usize) -> Option<&SedError> {
        self.errors.get(n)
    }

    pub fn errors(&self) -> &[SedError] {
        &self.errors
    }

    pub fn errors_with_severity(&self, severity: Severity) -> Vec<&SedError> {
        self.errors
            .iter()
            .filter(|error| error.severity == severity)
            .collect()
    }

    pub fn contains(&self, code: SedErrorCode) -> bool {
        self.errors.iter().any(|error| error.code == code)
    }

    pub fn contains_id(&self, error_id: u32) -> bool {
        self.errors.iter().any(|error| error.error_id == error_id)
    }

    /// Removes the first diagnostic of the given kind.
    pub fn remove(&mut self, code: SedErrorCode) -> Option<SedError> {
        let index = self.errors.iter().position(|error| error.code == code)?;
        Some(self.errors.remove(index))
    }

    /// Drops every diagnostic that is not critical.
    pub fn retain_critical(&mut self) {
        self.errors.retain(SedError::is_critical);
    }

    pub fn has_critical_errors(&self) -> bool {
        self.errors.iter().any(SedError::is_critical)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SedError> {
        self.errors.iter()
    }
}

impl fmt::Display for SedErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_specific_codes() {
        assert_eq!(SedErrorCode::AllowedAttributes(TypeCode::DataSet).id(), 22203);
        assert_eq!(SedErrorCode::AllowedAttributes(TypeCode::Document).id(), 20203);
        assert_eq!(SedErrorCode::AllowedCoreAttributes(TypeCode::Model).id(), 20301);
        assert_eq!(
            SedErrorCode::allowed_attributes(TypeCode::ListOf),
            SedErrorCode::UnknownCoreAttribute
        );
    }

    #[test]
    fn test_log_counts_and_removal() {
        let mut log = SedErrorLog::new();
        log.log_error(SedErrorCode::UnknownCoreAttribute, "", 1, 2, 1, 4);
        log.log_error(SedErrorCode::MissingXmlEncoding, "", 1, 1, 1, 4);
        log.log_error(SedErrorCode::BadlyFormedXml, "boom", 3, 1, 1, 4);

        assert_eq!(log.num_errors(), 3);
        assert_eq!(log.num_errors_with_severity(Severity::Fatal), 1);
        assert!(log.contains(SedErrorCode::MissingXmlEncoding));
        assert_eq!(log.error(0).map(SedError::error_id), Some(99994));
        assert_eq!(log.error(2).map(SedError::message), Some("boom"));

        log.retain_critical();
        assert_eq!(log.num_errors(), 2);
        assert!(!log.contains(SedErrorCode::MissingXmlEncoding));

        assert!(log.remove(SedErrorCode::UnknownCoreAttribute).is_some());
        assert_eq!(log.num_errors(), 1);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut log = SedErrorLog::new();
        log.log_error(SedErrorCode::IdSyntaxRule, "bad id", 4, 7, 1, 3);

        let json = serde_json::to_value(&log).expect("Failed to serialize log");
        assert_eq!(json["errors"][0]["error_id"], 10302);
        assert_eq!(json["errors"][0]["line"], 4);
        assert_eq!(json["errors"][0]["severity"], "Error");
    }
}
