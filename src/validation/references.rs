use std::collections::HashSet;

use crate::typecode::TypeCode;
use crate::validation::consistency::{Located, Report, Severity, ValidationResult};

/// Kinds of elements a reference attribute may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Model,
    Simulation,
    Task,
    DataGenerator,
    Range,
    Output,
    Style,
    DataSource,
    FitExperiment,
}

impl Target {
    fn of(type_code: TypeCode) -> Option<Self> {
        match type_code {
            TypeCode::Model => Some(Target::Model),
            TypeCode::DataGenerator => Some(Target::DataGenerator),
            TypeCode::Style => Some(Target::Style),
            TypeCode::DataSource => Some(Target::DataSource),
            TypeCode::FitExperiment => Some(Target::FitExperiment),
            code if TypeCode::Simulation.accepts(code) => Some(Target::Simulation),
            code if TypeCode::AbstractTask.accepts(code) => Some(Target::Task),
            code if TypeCode::Range.accepts(code) => Some(Target::Range),
            code if TypeCode::Output.accepts(code) => Some(Target::Output),
            _ => None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Target::Model => "model",
            Target::Simulation => "simulation",
            Target::Task => "task",
            Target::DataGenerator => "data generator",
            Target::Range => "range",
            Target::Output => "output",
            Target::Style => "style",
            Target::DataSource => "data source",
            Target::FitExperiment => "fit experiment",
        }
    }
}

/// Reference attributes and what they point at.
///
/// `task` is only a reference on `<subTask>`, `plot` only on `<subPlot>`
/// and `target` only on `<fitMapping>`.
const REFERENCES: [(&str, Option<TypeCode>, Target); 24] = [
    ("modelReference", None, Target::Model),
    ("simulationReference", None, Target::Simulation),
    ("taskReference", None, Target::Task),
    ("task", Some(TypeCode::SubTask), Target::Task),
    ("dataReference", None, Target::DataGenerator),
    ("xDataReference", None, Target::DataGenerator),
    ("yDataReference", None, Target::DataGenerator),
    ("zDataReference", None, Target::DataGenerator),
    ("range", None, Target::Range),
    ("taskRef", None, Target::Task),
    ("yDataReferenceFrom", None, Target::DataGenerator),
    ("yDataReferenceTo", None, Target::DataGenerator),
    ("xErrorUpper", None, Target::DataGenerator),
    ("xErrorLower", None, Target::DataGenerator),
    ("yErrorUpper", None, Target::DataGenerator),
    ("yErrorLower", None, Target::DataGenerator),
    ("target", Some(TypeCode::FitMapping), Target::DataGenerator),
    ("pointWeight", None, Target::DataGenerator),
    ("plot", Some(TypeCode::SubPlot), Target::Output),
    ("style", None, Target::Style),
    ("baseStyle", None, Target::Style),
    ("dataSource", None, Target::DataSource),
    ("sourceReference", None, Target::DataSource),
    ("experimentId", None, Target::FitExperiment),
];

/// Validates that references resolve to an element of the right kind
///
/// # Arguments
/// * `elements` - Elements of the document in document order
/// * `report` - Validation report to add any errors to
///
/// # Details
/// Covers tasks referencing models and simulations, variables referencing
/// tasks and models, data sets, curves and surfaces referencing data
/// generators, sub-tasks referencing tasks and repeated tasks, set-values
/// and functional ranges referencing ranges, as well as the later additions
/// pointing at outputs, styles, data sources and fit experiments. Unset references are left to
/// the required-attribute check.
pub(crate) fn check_references(elements: &[Located<'_>], report: &mut Report) {
    let mut known: HashSet<(Target, String)> = HashSet::new();
    for element in elements {
        if let (Some(target), Some(id)) = (Target::of(element.object.type_code()), element.identifier()) {
            known.insert((target, id));
        }
    }

    for element in elements {
        let type_code = element.object.type_code();
        for (attribute, only_on, target) in REFERENCES {
            if only_on.is_some_and(|only_on| only_on != type_code) {
                continue;
            }
            let Some(value) = element.object.get_attribute(attribute) else {
                continue;
            };

            let value = value.to_string();
            if !known.contains(&(target, value.clone())) {
                report.add_result(ValidationResult::new(
                    element.location.clone(),
                    format!(
                        "The '{attribute}' attribute of <{}> refers to '{value}', which is not a {} of this document.",
                        element.object.element_name(),
                        target.describe()
                    ),
                    Severity::Error,
                    element.identifier(),
                ));
            }
        }
    }
}
