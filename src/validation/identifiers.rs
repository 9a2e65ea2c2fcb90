use std::collections::HashMap;

use crate::errorlog::SedErrorCode;
use crate::validation::consistency::{Located, Report, Severity, ValidationResult};

/// Reports every element whose `id` was already used earlier in the document.
///
/// # Arguments
/// * `elements` - Elements of the document in document order
/// * `report` - Validation report to add the duplicates to
///
/// # Details
/// Identifiers share one namespace across the whole document, so a variable
/// may not reuse the id of a model. The first occurrence is kept as the
/// owner of the id and each later one is reported as an error.
pub(crate) fn check_identifiers(elements: &[Located<'_>], report: &mut Report) {
    let mut first_seen: HashMap<String, &str> = HashMap::new();

    for element in elements {
        let Some(id) = element.identifier() else {
            continue;
        };

        match first_seen.get(id.as_str()) {
            Some(owner) => report.add_result(ValidationResult::new(
                element.location.clone(),
                format!(
                    "[{}] The id '{id}' is already used by {owner}.",
                    SedErrorCode::DuplicateComponentId.id()
                ),
                Severity::Error,
                Some(id),
            )),
            None => {
                first_seen.insert(id, element.location.as_str());
            }
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
    fn test_duplicates_across_lists() {
        let mut document = SedDocument::default();
        document
            .create_model()
            .expect("Failed to create model")
            .set_id("shared")
            .expect("Invalid id");
        document
            .create_data_generator()
            .expect("Failed to create data generator")
            .set_id("shared")
            .expect("Invalid id");

        let mut report = Report::new();
        check_identifiers(&located_elements(&document), &mut report);

        assert!(!report.is_valid);
        assert_eq!(report.results.len(), 1);
        assert_eq!(
            report.results[0].location(),
            "/sedML/listOfDataGenerators/dataGenerator[1]"
        );
        assert!(report.results[0].message().contains("/sedML/listOfModels/model[1]"));
    }

    #[test]
    fn test_unset_ids_are_ignored() {
        let mut document = SedDocument::default();
        document.create_model().expect("Failed to create model");
        document.create_model().expect("Failed to create model");

        let mut report = Report::new();
        check_identifiers(&located_elements(&document), &mut report);
        assert!(report.is_valid);
    }
}
