#[cfg(test)]
mod test_validation {
    use std::path::PathBuf;

    use sedml::prelude::*;
    use sedml::errorlog::Severity;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join(name)
    }

    /// Every complete fixture is internally consistent.
    #[test]
    fn test_fixtures_are_consistent() {
        for name in [
            "repressilator_l1v3.sedml",
            "parameter_scan_l1v4.sedml",
            "data_description_l1v4.sedml",
            "parameter_estimation_l1v5.sedml",
        ] {
            // ARRANGE
            let document = read_sedml_from_file(fixture(name));

            // ACT
            let report = check_consistency(&document);

            // ASSERT
            assert!(report.is_valid, "{name}: {:?}", report.results);
            assert!(report.results.is_empty(), "{name}: {:?}", report.results);
        }
    }

    /// A document that reads cleanly may still be inconsistent: duplicate
    /// identifiers across lists and references to missing or wrongly typed
    /// elements are only found by the consistency check.
    #[test]
    fn test_inconsistent_document() {
        // ARRANGE
        let document = read_sedml_from_file(fixture("inconsistent_l1v3.sedml"));
        assert!(!document.error_log().has_critical_errors(), "{}", document.error_log());

        // ACT
        let report = check_consistency(&document);

        // ASSERT
        assert!(!report.is_valid);
        assert_eq!(report.num_with_severity(Severity::Error), 3, "{:?}", report.results);

        let duplicates = report.filter_results("model1");
        assert_eq!(duplicates.len(), 1);
        assert_eq!(
            duplicates[0].location(),
            "/sedML/listOfSimulations/steadyState[1]"
        );
        assert!(duplicates[0].message().contains("/sedML/listOfModels/model[1]"));

        let task = report.filter_results("task1");
        assert_eq!(task.len(), 1);
        assert!(task[0].message().contains("missing_sim"));

        let data_set = report.filter_results("ds1");
        assert_eq!(data_set.len(), 1);
        assert!(data_set[0].message().contains("data generator"));
    }

    /// Removing the offending elements through the API repairs the document.
    #[test]
    fn test_repairing_inconsistent_document() {
        // ARRANGE
        let mut document = read_sedml_from_file(fixture("inconsistent_l1v3.sedml"));

        // ACT
        document
            .simulations_mut()
            .get_mut(0)
            .expect("Missing simulation")
            .as_object()
            .set_id("steady")
            .expect("Invalid id");
        match document.tasks_mut().get_by_id_mut("task1") {
            Some(SedAbstractTaskMut::Task(task)) => task
                .set_simulation_reference("steady")
                .expect("Invalid reference"),
            other => panic!("Expected a task, got {other:?}"),
        }
        match document.outputs_mut().get_mut(0) {
            Some(SedOutputMut::Report(report)) => report
                .data_sets_mut()
                .get_mut(0)
                .expect("Missing data set")
                .set_data_reference("dg1")
                .expect("Invalid reference"),
            other => panic!("Expected a report, got {other:?}"),
        }

        // ASSERT
        let report = check_consistency(&document);
        assert!(report.is_valid, "{:?}", report.results);
    }

    /// A declared encoding other than UTF-8 is an error of the reader, not
    /// of the consistency check.
    #[test]
    fn test_latin1_declaration() {
        // ACT
        let document = read_sedml_from_file(fixture("latin1.sedml"));

        // ASSERT
        assert!(document.error_log().contains(SedErrorCode::NotUtf8));
        assert!(document.error_log().has_critical_errors());
        assert_eq!(
            document
                .error_log()
                .num_errors_with_severity(Severity::Fatal),
            0
        );
    }

    /// A missing file yields an empty document and one diagnostic.
    #[test]
    fn test_missing_file() {
        // ACT
        let document = read_sedml_from_file(fixture("does_not_exist.sedml"));

        // ASSERT
        assert_eq!(document.num_errors(), 1);
        assert!(document.error_log().contains(SedErrorCode::XmlFileUnreadable));
        assert_eq!(document.num_models(), 0);
    }

    /// The diagnostics and the report serialize for the `--json` output.
    #[test]
    fn test_report_serializes() {
        // ARRANGE
        let document = read_sedml_from_file(fixture("inconsistent_l1v3.sedml"));
        let report = check_consistency(&document);

        // ACT
        let json = serde_json::to_value(&report).expect("Failed to serialize");

        // ASSERT
        assert_eq!(json["is_valid"], serde_json::Value::Bool(false));
        assert_eq!(json["results"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["results"][0]["severity"], "Error");
    }
}
