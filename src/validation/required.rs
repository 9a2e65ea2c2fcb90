use crate::validation::consistency::{Located, Report, Severity, ValidationResult};

/// Validates that every element carries what its release requires
///
/// # Arguments
/// * `elements` - Elements of the document in document order
/// * `report` - Validation report to add any errors to
///
/// # Details
/// Missing attributes (an `id`, a `taskReference`, ...) and missing children
/// (the `math` of a data generator, the ranges of a repeated task) are both
/// reported as errors.
pub(crate) fn check_required(elements: &[Located<'_>], report: &mut Report) {
    for element in elements {
        let object = element.object;

        if !object.has_required_attributes() {
            report.add_result(ValidationResult::new(
                element.location.clone(),
                format!(
                    "The <{}> element is missing required attributes.",
                    object.element_name()
                ),
                Severity::Error,
                element.identifier(),
            ));
        }

        if !object.has_required_elements() {
            report.add_result(ValidationResult::new(
                element.location.clone(),
                format!(
                    "The <{}> element is missing required child elements.",
                    object.element_name()
                ),
                Severity::Error,
                element.identifier(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SedObject;
    use crate::elements::SedDocument;
    use crate::validation::consistency::located_elements;

    #[test]
    fn test_generator_without_math() {
        let mut document = SedDocument::default();
        document
            .create_data_generator()
            .expect("Failed to create data generator")
            .set_id("dg1")
            .expect("Invalid id");

        let mut report = Report::new();
        check_required(&located_elements(&document), &mut report);

        assert!(!report.is_valid);
        assert_eq!(report.filter_results("dg1").len(), 1);
        assert!(report.results[0].message().contains("child elements"));
    }

    #[test]
    fn test_model_without_source() {
        let mut document = SedDocument::default();
        let model = document.create_model().expect("Failed to create model");
        model.set_id("m1").expect("Invalid id");
        model
            .set_language("urn:sedml:language:sbml")
            .expect("Failed to set language");

        let mut report = Report::new();
        check_required(&located_elements(&document), &mut report);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].identifier(), Some("m1"));
    }
}
