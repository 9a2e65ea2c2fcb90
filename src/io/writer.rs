use std::path::Path;

use derive_builder::Builder;
use log::info;
use serde::{Deserialize, Serialize};

use crate::base::{write_object, SedObject};
use crate::elements::SedDocument;
use crate::error::SedIoError;
use crate::xml::XmlOutputStream;

/// Formatting options of [`SedWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct WriterOptions {
    /// Repetitions of `indent_char` per nesting level. 0 writes a single line.
    #[builder(default = "2")]
    pub indent_width: usize,
    #[builder(default = "b' '")]
    pub indent_char: u8,
    /// Whether to start with `<?xml version="1.0" encoding="UTF-8"?>`
    #[builder(default = "true")]
    pub declaration: bool,
    /// Program named in a `Created by` comment after the declaration
    #[builder(default, setter(into, strip_option))]
    pub program_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub program_version: Option<String>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            indent_width: 2,
            indent_char: b' ',
            declaration: true,
            program_name: None,
            program_version: None,
        }
    }
}

/// Serializes a [`SedDocument`] to SED-ML.
#[derive(Debug, Clone, Default)]
pub struct SedWriter {
    options: WriterOptions,
}

impl SedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: WriterOptions) -> Self {
        SedWriter { options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    pub fn set_program_name(&mut self, name: &str) {
        self.options.program_name = Some(name.to_string());
    }

    pub fn set_program_version(&mut self, version: &str) {
        self.options.program_version = Some(version.to_string());
    }

    /// Serializes a document to a string.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to serialize
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing either:
    /// * `Ok(String)` - The SED-ML text: declaration, optional program
    ///   comment, then the `<sedML>` element with its children in schema order
    /// * `Err(SedIoError)` - The XML writer failed
    pub fn write_to_string(&self, document: &SedDocument) -> Result<String, SedIoError> {
        let mut stream = if self.options.indent_width == 0 {
            XmlOutputStream::compact()
        } else {
            XmlOutputStream::new(self.options.indent_char, self.options.indent_width)
        };

        if self.options.declaration {
            stream.write_declaration()?;
        }
        if let Some(comment) = self.program_comment() {
            stream.write_comment(&comment)?;
        }
        write_object(document, &mut stream)?;
        stream.finish()
    }

    /// Writes a document to a file, replacing any existing content.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to serialize
    /// * `path` - Destination of the SED-ML file
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing either:
    /// * `Ok(())` - The file was written
    /// * `Err(SedIoError)` - Serialization failed or the file could not be written
    pub fn write_to_file(
        &self,
        document: &SedDocument,
        path: impl AsRef<Path>,
    ) -> Result<(), SedIoError> {
        let path = path.as_ref();
        let xml = self.write_to_string(document)?;
        std::fs::write(path, format!("{xml}\n"))?;
        info!(
            "Wrote SED-ML Level {} Version {} to {}",
            document.level(),
            document.version(),
            path.display()
        );
        Ok(())
    }

    fn program_comment(&self) -> Option<String> {
        let name = self.options.program_name.as_deref()?;
        Some(match self.options.program_version.as_deref() {
            Some(version) => format!(" Created by {name} version {version} "),
            None => format!(" Created by {name} "),
        })
    }
}

/// Serializes `document` with default options. See [`SedWriter::write_to_string`].
pub fn write_sedml_to_string(document: &SedDocument) -> Result<String, SedIoError> {
    SedWriter::new().write_to_string(document)
}

/// Writes `document` to `path` with default options. See [`SedWriter::write_to_file`].
pub fn write_sedml_to_file(document: &SedDocument, path: impl AsRef<Path>) -> Result<(), SedIoError> {
    SedWriter::new().write_to_file(document, path)
}
