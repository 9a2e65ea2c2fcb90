//! Consistency checks of SED-ML documents.
//!
//! Reading a document only checks what a single element can check on its
//! own. This module looks at the document as a whole:
//! - Identifiers must be unique across the document
//! - Every element must carry its required attributes and children
//! - References must point at an element of the right kind
//!
//! The main entry point is the `check_consistency` function which runs all
//! checks and returns a `Report` with the results.

use std::fmt;

use colored::Colorize;

use crate::base::SedObject;
use crate::elements::SedDocument;
pub use crate::errorlog::Severity;
use crate::validation::identifiers::check_identifiers;
use crate::validation::references::check_references;
use crate::validation::required::check_required;

/// Runs every consistency check on a document.
///
/// # Arguments
///
/// * `document` - A reference to the `SedDocument` to be checked.
///
/// # Returns
///
/// Returns a `Report` containing the results of the consistency checks.
pub fn check_consistency(document: &SedDocument) -> Report {
    let mut report = Report::new();
    let elements = located_elements(document);

    check_identifiers(&elements, &mut report);
    check_required(&elements, &mut report);
    check_references(&elements, &mut report);

    report
}

/// Outcome of [`check_consistency`].
///
/// Results share the [`Severity`] scale of the reader's diagnostics. The
/// document is consistent while no result reaches `Error`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub is_valid: bool,
    /// Findings in document order
    pub results: Vec<ValidationResult>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: ValidationResult) {
        self.is_valid &= result.severity < Severity::Error;
        self.results.push(result);
    }

    /// Results about the element with the given `id`.
    pub fn filter_results(&self, identifier: &str) -> Vec<&ValidationResult> {
        self.results
            .iter()
            .filter(|result| result.identifier.as_deref() == Some(identifier))
            .collect()
    }

    pub fn num_with_severity(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|result| result.severity == severity)
            .count()
    }
}

/// One finding of a consistency check, addressed by the element's path
/// such as `/sedML/listOfTasks/task[2]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    location: String,
    message: String,
    severity: Severity,
    /// `id` of the element, when it has one
    identifier: Option<String>,
}

impl ValidationResult {
    pub fn new(
        location: String,
        message: String,
        severity: Severity,
        identifier: Option<String>,
    ) -> Self {
        ValidationResult {
            location,
            message,
            severity,
            identifier,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paint = |text: &str| match self.severity {
            Severity::Fatal | Severity::Error => text.bold().red(),
            Severity::Warning => text.bold().yellow(),
            Severity::Info => text.bold().green(),
        };

        let subject = match &self.identifier {
            Some(id) => format!("{} ({id})", self.location),
            None => self.location.clone(),
        };
        write!(
            f,
            "[{}] {}:\n\t└── {}",
            subject.bold(),
            paint(&self.severity.to_string()),
            paint(&self.message)
        )
    }
}

/// An element of the document together with its path.
pub(crate) struct Located<'a> {
    pub(crate) location: String,
    pub(crate) object: &'a dyn SedObject,
}

impl Located<'_> {
    /// `id` of the element, `None` when unset.
    pub(crate) fn identifier(&self) -> Option<String> {
        let id = self.object.id();
        (!id.is_empty()).then(|| id.to_string())
    }
}

/// Every element below the document, lists excluded, in document order.
///
/// Items of a list are addressed with a 1-based position, for instance
/// `/sedML/listOfModels/model[1]`.
pub(crate) fn located_elements(document: &SedDocument) -> Vec<Located<'_>> {
    let mut elements = Vec::new();
    collect(document, "/sedML".to_string(), &mut elements);
    elements
}

fn collect<'a>(object: &'a dyn SedObject, path: String, elements: &mut Vec<Located<'a>>) {
    let in_list = object.list_item_type().is_some();
    for (index, child) in object.children().into_iter().enumerate() {
        let location = if in_list {
            format!("{path}/{}[{}]", child.element_name(), index + 1)
        } else {
            format!("{path}/{}", child.element_name())
        };

        if child.list_item_type().is_none() {
            elements.push(Located {
                location: location.clone(),
                object: child,
            });
        }
        collect(child, location, elements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_sedml_from_string;

    const CONSISTENT: &str = r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3">
  <listOfModels>
    <model id="model1" language="urn:sedml:language:sbml" source="model.xml"/>
  </listOfModels>
  <listOfSimulations>
    <uniformTimeCourse id="sim1" initialTime="0" outputStartTime="0" outputEndTime="10" numberOfPoints="100">
      <algorithm kisaoID="KISAO:0000019"/>
    </uniformTimeCourse>
  </listOfSimulations>
  <listOfTasks>
    <task id="task1" modelReference="model1" simulationReference="sim1"/>
  </listOfTasks>
  <listOfDataGenerators>
    <dataGenerator id="dg_time">
      <listOfVariables>
        <variable id="time" symbol="urn:sedml:symbol:time" taskReference="task1"/>
      </listOfVariables>
      <math xmlns="http://www.w3.org/1998/Math/MathML"><ci>time</ci></math>
    </dataGenerator>
  </listOfDataGenerators>
  <listOfOutputs>
    <report id="report1">
      <listOfDataSets>
        <dataSet id="ds_time" label="time" dataReference="dg_time"/>
      </listOfDataSets>
    </report>
  </listOfOutputs>
</sedML>"#;

    #[test]
    fn test_consistent_document() {
        let document = read_sedml_from_string(CONSISTENT);
        assert_eq!(document.num_errors(), 0, "{}", document.error_log());

        let report = check_consistency(&document);
        assert!(report.is_valid, "{:?}", report.results);
        assert!(report.results.is_empty());
    }

    #[test]
    fn test_locations_are_positional() {
        let document = read_sedml_from_string(CONSISTENT);
        let locations: Vec<String> = located_elements(&document)
            .into_iter()
            .map(|located| located.location)
            .collect();

        assert!(locations.contains(&"/sedML/listOfModels/model[1]".to_string()));
        assert!(locations.contains(
            &"/sedML/listOfSimulations/uniformTimeCourse[1]/algorithm".to_string()
        ));
        assert!(locations.contains(
            &"/sedML/listOfDataGenerators/dataGenerator[1]/listOfVariables/variable[1]".to_string()
        ));
    }

    #[test]
    fn test_dangling_reference_invalidates() {
        let broken = CONSISTENT.replace(r#"dataReference="dg_time""#, r#"dataReference="dg_missing""#);
        let document = read_sedml_from_string(&broken);
        let report = check_consistency(&document);

        assert!(!report.is_valid);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.filter_results("ds_time").len(), 1);
        assert_eq!(
            report.results[0].location(),
            "/sedML/listOfOutputs/report[1]/listOfDataSets/dataSet[1]"
        );
    }
}
