//! Information display module for SED-ML documents
//!
//! This module renders a document and its components as tables. It
//! implements the `Display` trait for `SedDocument` and provides a compact
//! summary of element counts used by the command-line `info` command.

use std::fmt::{self, Display};

use tabled::{builder::Builder, settings::Style};

use crate::base::SedObject;
use crate::elements::{
    SedAbstractTask, SedDataDescription, SedDataGenerator, SedDocument, SedModel, SedOutput,
    SedSimulation,
};
use crate::errorlog::SedError;

/// Trait for converting document components to table records
///
/// Implementors provide column headers and the values of one row.
trait TableRecord {
    fn columns() -> Vec<String>;

    fn to_record(&self) -> Vec<String>;
}

impl Display for SedDocument {
    /// Formats a SED-ML document as nested tables
    ///
    /// Every non-empty top-level list gets its own table, followed by the
    /// diagnostics of the last read if there are any.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(vec![format!(
            "SED-ML Level {} Version {}",
            self.level(),
            self.version()
        )]);

        if !self.data_descriptions().is_empty() {
            builder.push_record(vec!["Data Descriptions".to_string()]);
            builder.push_record(vec![to_table(self.data_descriptions().iter())]);
        }

        if !self.models().is_empty() {
            builder.push_record(vec!["Models".to_string()]);
            builder.push_record(vec![to_table(self.models().iter())]);
        }

        if !self.simulations().is_empty() {
            builder.push_record(vec!["Simulations".to_string()]);
            builder.push_record(vec![to_table(self.simulations().iter())]);
        }

        if !self.tasks().is_empty() {
            builder.push_record(vec!["Tasks".to_string()]);
            builder.push_record(vec![to_table(self.tasks().iter())]);
        }

        if !self.data_generators().is_empty() {
            builder.push_record(vec!["Data Generators".to_string()]);
            builder.push_record(vec![to_table(self.data_generators().iter())]);
        }

        if !self.outputs().is_empty() {
            builder.push_record(vec!["Outputs".to_string()]);
            builder.push_record(vec![to_table(self.outputs().iter())]);
        }

        if !self.error_log().is_empty() {
            builder.push_record(vec!["Diagnostics".to_string()]);
            builder.push_record(vec![to_table(self.error_log().iter())]);
        }

        let mut table = builder.build();
        table.with(Style::sharp());
        write!(f, "{table}")
    }
}

/// Counts of the document's elements as a two-column table.
///
/// # Arguments
/// * `document` - The document to summarize
///
/// # Returns
/// * A formatted string with one row per element kind and the number of
///   diagnostics in the last row
pub fn summary_table(document: &SedDocument) -> String {
    let changes: usize = document.models().iter().map(SedModel::num_changes).sum();

    let mut builder = Builder::default();
    builder.push_record(vec!["Element", "Count"]);
    for (element, count) in [
        ("Data Descriptions", document.num_data_descriptions()),
        ("Models", document.num_models()),
        ("Changes", changes),
        ("Simulations", document.num_simulations()),
        ("Tasks", document.num_tasks()),
        ("Data Generators", document.num_data_generators()),
        ("Outputs", document.num_outputs()),
        ("Styles", document.num_styles()),
        ("Diagnostics", document.num_errors()),
    ] {
        builder.push_record(vec![element.to_string(), count.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Converts records to a formatted table string
fn to_table<'a, T: TableRecord + 'a>(records: impl Iterator<Item = &'a T>) -> String {
    let mut builder = Builder::default();
    builder.push_record(T::columns());

    for record in records {
        builder.push_record(record.to_record());
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

impl TableRecord for SedDataDescription {
    fn columns() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Format".to_string(),
            "Source".to_string(),
            "Data Sources".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            or_dash(self.id()),
            or_dash(self.format()),
            or_dash(self.source()),
            self.num_data_sources().to_string(),
        ]
    }
}

impl TableRecord for SedModel {
    fn columns() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Language".to_string(),
            "Source".to_string(),
            "Changes".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            or_dash(self.id()),
            or_dash(self.language()),
            or_dash(self.source()),
            self.num_changes().to_string(),
        ]
    }
}

impl TableRecord for SedSimulation {
    fn columns() -> Vec<String> {
        vec!["ID".to_string(), "Kind".to_string(), "Algorithm".to_string()]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            or_dash(self.id()),
            self.element_name().to_string(),
            or_dash(self.algorithm().map_or("", |algorithm| algorithm.kisao_id())),
        ]
    }
}

impl TableRecord for SedAbstractTask {
    /// A plain task shows its model and simulation, a repeated task the
    /// range it iterates and its number of sub-tasks. A parameter estimation
    /// shows its numbers of adjustable parameters and fit experiments.
    fn columns() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Kind".to_string(),
            "Model / Range".to_string(),
            "Simulation / Sub-tasks".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        let (first, second) = match self {
            SedAbstractTask::Task(task) => (
                or_dash(task.model_reference()),
                or_dash(task.simulation_reference()),
            ),
            SedAbstractTask::RepeatedTask(task) => {
                (or_dash(task.range()), task.num_sub_tasks().to_string())
            }
            SedAbstractTask::SimpleRepeatedTask(task) => (
                or_dash(task.model_reference()),
                or_dash(task.simulation_reference()),
            ),
            SedAbstractTask::ParameterEstimationTask(task) => (
                task.num_adjustable_parameters().to_string(),
                task.num_fit_experiments().to_string(),
            ),
        };
        vec![
            or_dash(self.id()),
            self.element_name().to_string(),
            first,
            second,
        ]
    }
}

impl TableRecord for SedDataGenerator {
    fn columns() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Name".to_string(),
            "Variables".to_string(),
            "Parameters".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            or_dash(self.id()),
            or_dash(self.name()),
            self.num_variables().to_string(),
            self.num_parameters().to_string(),
        ]
    }
}

impl TableRecord for SedOutput {
    fn columns() -> Vec<String> {
        vec!["ID".to_string(), "Kind".to_string(), "Items".to_string()]
    }

    fn to_record(&self) -> Vec<String> {
        let items = match self {
            SedOutput::Report(report) => report.num_data_sets(),
            SedOutput::Plot2D(plot) => plot.num_curves(),
            SedOutput::Plot3D(plot) => plot.num_surfaces(),
            SedOutput::Figure(figure) => figure.num_sub_plots(),
            SedOutput::WaterfallPlot(_)
            | SedOutput::ParameterEstimationReport(_)
            | SedOutput::ParameterEstimationResultPlot(_) => 0,
        };
        vec![
            or_dash(self.id()),
            self.element_name().to_string(),
            items.to_string(),
        ]
    }
}

impl TableRecord for SedError {
    fn columns() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Severity".to_string(),
            "Position".to_string(),
            "Message".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            self.error_id().to_string(),
            self.severity().to_string(),
            format!("{}:{}", self.line(), self.column()),
            self.message().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut document = SedDocument::default();
        document
            .create_model()
            .expect("Failed to create model")
            .create_change_attribute()
            .expect("Failed to create change");
        document.create_steady_state().expect("Failed to create simulation");

        let summary = summary_table(&document);
        let changes = summary
            .lines()
            .find(|line| line.contains("Changes"))
            .expect("Missing row");
        assert!(changes.contains('1'));
        assert!(summary.contains("Diagnostics"));
    }

    #[test]
    fn test_document_display_lists_sections() {
        let mut document = SedDocument::default();
        let model = document.create_model().expect("Failed to create model");
        model.set_id("model1").expect("Invalid id");
        model
            .set_language("urn:sedml:language:sbml")
            .expect("Failed to set language");

        let rendered = document.to_string();
        assert!(rendered.contains("SED-ML Level 1 Version 4"));
        assert!(rendered.contains("Models"));
        assert!(rendered.contains("model1"));
        assert!(!rendered.contains("Simulations"));
        assert!(!rendered.contains("Data Descriptions"));
    }

    #[test]
    fn test_parameter_estimation_row() {
        let mut document = SedDocument::default();
        let task = document
            .create_parameter_estimation_task()
            .expect("Failed to create task");
        task.set_id("fit").expect("Invalid id");
        task.create_fit_experiment().expect("Failed to create experiment");

        let record = document.get_task(0).expect("Missing task").to_record();
        assert_eq!(record, ["fit", "parameterEstimationTask", "0", "1"]);
    }
}
