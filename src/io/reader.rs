use std::path::Path;

use log::{debug, info};

use crate::base::{read_object, ReadContext, SedObject};
use crate::elements::SedDocument;
use crate::errorlog::{SedErrorCode, SedErrorLog};
use crate::namespaces::{SedNamespaces, DEFAULT_LEVEL, DEFAULT_VERSION};
use crate::xml::XmlInputStream;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Parses SED-ML documents from files and strings.
///
/// Both entry points always hand back a [`SedDocument`]. Anything that went
/// wrong on the way is recorded in its error log, so callers check
/// [`SedDocument::num_errors`] instead of a `Result`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SedReader;

impl SedReader {
    pub fn new() -> Self {
        SedReader
    }

    /// Reads the SED-ML document stored at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the SED-ML file
    ///
    /// # Returns
    ///
    /// The parsed document. An unreadable file yields an empty document
    /// whose log holds a single `XmlFileUnreadable` entry; content that is
    /// not UTF-8 is reported as `NotUtf8`.
    pub fn read_from_file(&self, path: impl AsRef<Path>) -> SedDocument {
        let path = path.as_ref();
        info!("Reading SED-ML file {}", path.display());

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                return Self::failed_document(
                    SedErrorCode::XmlFileUnreadable,
                    &format!("Cannot read '{}': {err}", path.display()),
                );
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => self.read_text(&text),
            Err(err) => Self::failed_document(
                SedErrorCode::NotUtf8,
                &format!("'{}' is not UTF-8 encoded: {err}", path.display()),
            ),
        }
    }

    /// Reads a SED-ML document held in memory.
    ///
    /// # Arguments
    ///
    /// * `xml` - The document text. An XML declaration is prepended if the
    ///   text does not start with one.
    ///
    /// # Returns
    ///
    /// The parsed document with its diagnostics.
    pub fn read_from_string(&self, xml: &str) -> SedDocument {
        if xml.trim_start().starts_with("<?xml") {
            self.read_text(xml)
        } else {
            debug!("Prepending an XML declaration to the input");
            self.read_text(&format!("{XML_DECLARATION}\n{xml}"))
        }
    }

    fn read_text(&self, text: &str) -> SedDocument {
        let mut stream = XmlInputStream::new(text);
        let mut log = SedErrorLog::new();

        check_declaration(&stream, &mut log);

        stream.skip_text();
        let root = stream
            .peek_start()
            .map(|root| (root.local_name.clone(), root.namespaces.clone(), root.line, root.column));

        let mut document = match root {
            Some((name, declarations, line, column)) if name == "sedML" => {
                let declared = SedNamespaces::from_declarations(&declarations);
                let mut document = match &declared {
                    Some(namespaces) => SedDocument::with_namespaces(namespaces.clone()),
                    None => SedDocument::default(),
                };

                let mut ctx = ReadContext::new(&mut log, document.level(), document.version());
                read_object(&mut document, &mut stream, &mut ctx);

                check_document_namespace(&document, declared.as_ref(), &mut log, line, column);
                document
            }
            Some((name, _, line, column)) => {
                log.log_error(
                    SedErrorCode::NotSchemaConformant,
                    &format!("The root element must be <sedML>, found <{name}>."),
                    line,
                    column,
                    DEFAULT_LEVEL,
                    DEFAULT_VERSION,
                );
                SedDocument::default()
            }
            None => {
                if stream.error().is_none() {
                    log.log_error(
                        SedErrorCode::NotSchemaConformant,
                        "The document has no <sedML> element.",
                        1,
                        1,
                        DEFAULT_LEVEL,
                        DEFAULT_VERSION,
                    );
                }
                SedDocument::default()
            }
        };

        if let Some(err) = stream.error() {
            log.clear();
            log.log_error(
                SedErrorCode::BadlyFormedXml,
                &err.message,
                err.line,
                err.column,
                document.level(),
                document.version(),
            );
        }

        document.connect_to_child();
        info!(
            "Read SED-ML Level {} Version {} with {} diagnostic(s)",
            document.level(),
            document.version(),
            log.num_errors()
        );
        document.set_error_log(log);
        document
    }

    fn failed_document(code: SedErrorCode, details: &str) -> SedDocument {
        let mut log = SedErrorLog::new();
        log.log_error(code, details, 0, 0, DEFAULT_LEVEL, DEFAULT_VERSION);

        let mut document = SedDocument::default();
        document.set_error_log(log);
        document
    }
}

/// Checks encoding and XML version named by the declaration, if any.
fn check_declaration(stream: &XmlInputStream, log: &mut SedErrorLog) {
    if !stream.has_declaration() {
        return;
    }

    match stream.encoding() {
        None => log.log_error(
            SedErrorCode::MissingXmlEncoding,
            "The XML declaration does not name an encoding.",
            1,
            1,
            DEFAULT_LEVEL,
            DEFAULT_VERSION,
        ),
        Some(encoding) if !encoding.eq_ignore_ascii_case("UTF-8") => log.log_error(
            SedErrorCode::NotUtf8,
            &format!("The document is declared as '{encoding}'; SED-ML requires UTF-8."),
            1,
            1,
            DEFAULT_LEVEL,
            DEFAULT_VERSION,
        ),
        Some(_) => {}
    }

    if let Some(version) = stream.xml_version() {
        if version != "1.0" {
            log.log_error(
                SedErrorCode::BadXmlDecl,
                &format!("XML version '{version}' is not supported; expected '1.0'."),
                1,
                1,
                DEFAULT_LEVEL,
                DEFAULT_VERSION,
            );
        }
    }
}

/// The namespace declared on `<sedML>` has to match its level and version.
fn check_document_namespace(
    document: &SedDocument,
    declared: Option<&SedNamespaces>,
    log: &mut SedErrorLog,
    line: usize,
    column: usize,
) {
    let (level, version) = (document.level(), document.version());
    let details = match declared {
        None => "The <sedML> element does not declare a SED-ML namespace.".to_string(),
        Some(namespaces) if (namespaces.level(), namespaces.version()) != (level, version) => {
            format!(
                "The namespace '{}' does not match Level {level} Version {version}.",
                namespaces.uri()
            )
        }
        Some(_) => return,
    };
    log.log_error(
        SedErrorCode::InvalidNamespaceOnSed,
        &details,
        line,
        column,
        level,
        version,
    );
}

/// Reads the SED-ML document stored at `path`. See [`SedReader::read_from_file`].
pub fn read_sedml_from_file(path: impl AsRef<Path>) -> SedDocument {
    SedReader::new().read_from_file(path)
}

/// Reads a SED-ML document from `xml`. See [`SedReader::read_from_string`].
pub fn read_sedml_from_string(xml: &str) -> SedDocument {
    SedReader::new().read_from_string(xml)
}
