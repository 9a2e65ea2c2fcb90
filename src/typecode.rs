//! Type codes identifying the concrete kind of a SED-ML object.

use std::fmt;

use serde::Serialize;

/// Discriminant of every concrete SED-ML element kind.
///
/// The abstract codes (`Change`, `Simulation`, `AbstractTask`, `Range`,
/// `Output`, `AbstractCurve`) never belong to an object. They are used as the item type of
/// lists that hold a closed set of related kinds. `Unknown` as a list item
/// type accepts anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeCode {
    Unknown,
    ListOf,
    Document,
    Model,
    Change,
    AddXml,
    ChangeXml,
    RemoveXml,
    ChangeAttribute,
    ComputeChange,
    Variable,
    Parameter,
    Simulation,
    UniformTimeCourse,
    OneStep,
    SteadyState,
    Algorithm,
    AlgorithmParameter,
    AbstractTask,
    Task,
    RepeatedTask,
    SubTask,
    SetValue,
    Range,
    UniformRange,
    VectorRange,
    FunctionalRange,
    DataGenerator,
    Output,
    Report,
    Plot2D,
    Plot3D,
    DataSet,
    Curve,
    Surface,
    Analysis,
    SimpleRepeatedTask,
    DataRange,
    AppliedDimension,
    RemainingDimension,
    DataDescription,
    DataSource,
    Slice,
    ParameterEstimationTask,
    LeastSquareObjectiveFunction,
    AdjustableParameter,
    Bounds,
    ExperimentReference,
    FitExperiment,
    FitMapping,
    Figure,
    SubPlot,
    Axis,
    AbstractCurve,
    ShadedArea,
    WaterfallPlot,
    ParameterEstimationReport,
    ParameterEstimationResultPlot,
    Style,
    Line,
    Marker,
    Fill,
}

impl TypeCode {
    /// Name of the type code, as printed in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Unknown => "(Unknown SED-ML Type)",
            TypeCode::ListOf => "ListOf",
            TypeCode::Document => "Document",
            TypeCode::Model => "Model",
            TypeCode::Change => "Change",
            TypeCode::AddXml => "AddXML",
            TypeCode::ChangeXml => "ChangeXML",
            TypeCode::RemoveXml => "RemoveXML",
            TypeCode::ChangeAttribute => "ChangeAttribute",
            TypeCode::ComputeChange => "ComputeChange",
            TypeCode::Variable => "Variable",
            TypeCode::Parameter => "Parameter",
            TypeCode::Simulation => "Simulation",
            TypeCode::UniformTimeCourse => "UniformTimeCourse",
            TypeCode::OneStep => "OneStep",
            TypeCode::SteadyState => "SteadyState",
            TypeCode::Algorithm => "Algorithm",
            TypeCode::AlgorithmParameter => "AlgorithmParameter",
            TypeCode::AbstractTask => "AbstractTask",
            TypeCode::Task => "Task",
            TypeCode::RepeatedTask => "RepeatedTask",
            TypeCode::SubTask => "SubTask",
            TypeCode::SetValue => "SetValue",
            TypeCode::Range => "Range",
            TypeCode::UniformRange => "UniformRange",
            TypeCode::VectorRange => "VectorRange",
            TypeCode::FunctionalRange => "FunctionalRange",
            TypeCode::DataGenerator => "DataGenerator",
            TypeCode::Output => "Output",
            TypeCode::Report => "Report",
            TypeCode::Plot2D => "Plot2D",
            TypeCode::Plot3D => "Plot3D",
            TypeCode::DataSet => "DataSet",
            TypeCode::Curve => "Curve",
            TypeCode::Surface => "Surface",
            TypeCode::Analysis => "Analysis",
            TypeCode::SimpleRepeatedTask => "SimpleRepeatedTask",
            TypeCode::DataRange => "DataRange",
            TypeCode::AppliedDimension => "AppliedDimension",
            TypeCode::RemainingDimension => "RemainingDimension",
            TypeCode::DataDescription => "DataDescription",
            TypeCode::DataSource => "DataSource",
            TypeCode::Slice => "Slice",
            TypeCode::ParameterEstimationTask => "ParameterEstimationTask",
            TypeCode::LeastSquareObjectiveFunction => "LeastSquareObjectiveFunction",
            TypeCode::AdjustableParameter => "AdjustableParameter",
            TypeCode::Bounds => "Bounds",
            TypeCode::ExperimentReference => "ExperimentReference",
            TypeCode::FitExperiment => "FitExperiment",
            TypeCode::FitMapping => "FitMapping",
            TypeCode::Figure => "Figure",
            TypeCode::SubPlot => "SubPlot",
            TypeCode::Axis => "Axis",
            TypeCode::AbstractCurve => "AbstractCurve",
            TypeCode::ShadedArea => "ShadedArea",
            TypeCode::WaterfallPlot => "WaterfallPlot",
            TypeCode::ParameterEstimationReport => "ParameterEstimationReport",
            TypeCode::ParameterEstimationResultPlot => "ParameterEstimationResultPlot",
            TypeCode::Style => "Style",
            TypeCode::Line => "Line",
            TypeCode::Marker => "Marker",
            TypeCode::Fill => "Fill",
        }
    }

    /// Whether a list declared with this item type may hold an item of kind `other`.
    pub fn accepts(&self, other: TypeCode) -> bool {
        if *self == TypeCode::Unknown || *self == other {
            return true;
        }

        match self {
            TypeCode::Change => matches!(
                other,
                TypeCode::AddXml
                    | TypeCode::ChangeXml
                    | TypeCode::RemoveXml
                    | TypeCode::ChangeAttribute
                    | TypeCode::ComputeChange
            ),
            TypeCode::Simulation => matches!(
                other,
                TypeCode::UniformTimeCourse
                    | TypeCode::OneStep
                    | TypeCode::SteadyState
                    | TypeCode::Analysis
            ),
            TypeCode::AbstractTask => matches!(
                other,
                TypeCode::Task
                    | TypeCode::RepeatedTask
                    | TypeCode::SimpleRepeatedTask
                    | TypeCode::ParameterEstimationTask
            ),
            TypeCode::Range => matches!(
                other,
                TypeCode::UniformRange
                    | TypeCode::VectorRange
                    | TypeCode::FunctionalRange
                    | TypeCode::DataRange
            ),
            TypeCode::Output => matches!(
                other,
                TypeCode::Report
                    | TypeCode::Plot2D
                    | TypeCode::Plot3D
                    | TypeCode::Figure
                    | TypeCode::WaterfallPlot
                    | TypeCode::ParameterEstimationReport
                    | TypeCode::ParameterEstimationResultPlot
            ),
            TypeCode::AbstractCurve => matches!(other, TypeCode::Curve | TypeCode::ShadedArea),
            _ => false,
        }
    }

    /// First number of the diagnostic block reserved for this kind.
    ///
    /// `<block>` reports unknown core attributes and `<block> + 2` the
    /// element's allowed attributes. Kinds without a block return `None`.
    pub(crate) fn error_block(&self) -> Option<u32> {
        let block = match self {
            TypeCode::Document => 20201,
            TypeCode::Model => 20301,
            TypeCode::Change => 20401,
            TypeCode::AddXml => 20501,
            TypeCode::ChangeAttribute => 20601,
            TypeCode::Variable => 20701,
            TypeCode::Parameter => 20801,
            TypeCode::Simulation => 20901,
            TypeCode::UniformTimeCourse => 21001,
            TypeCode::Algorithm => 21101,
            TypeCode::AbstractTask => 21201,
            TypeCode::Task => 21301,
            TypeCode::DataGenerator => 21401,
            TypeCode::Output => 21501,
            TypeCode::Plot2D => 21701,
            TypeCode::Plot3D => 21801,
            TypeCode::Curve => 22001,
            TypeCode::Surface => 22101,
            TypeCode::DataSet => 22201,
            TypeCode::Report => 22301,
            TypeCode::AlgorithmParameter => 22401,
            TypeCode::Range => 22501,
            TypeCode::ChangeXml => 22601,
            TypeCode::RemoveXml => 22701,
            TypeCode::SetValue => 22801,
            TypeCode::UniformRange => 22901,
            TypeCode::VectorRange => 23001,
            TypeCode::FunctionalRange => 23101,
            TypeCode::SubTask => 23201,
            TypeCode::OneStep => 23301,
            TypeCode::SteadyState => 23401,
            TypeCode::RepeatedTask => 23501,
            TypeCode::ComputeChange => 23601,
            TypeCode::DataDescription => 23701,
            TypeCode::DataSource => 23801,
            TypeCode::Slice => 23901,
            TypeCode::ParameterEstimationTask => 24001,
            TypeCode::LeastSquareObjectiveFunction => 24201,
            TypeCode::AdjustableParameter => 24301,
            TypeCode::ExperimentReference => 24401,
            TypeCode::FitExperiment => 24501,
            TypeCode::FitMapping => 24601,
            TypeCode::Bounds => 24701,
            TypeCode::Figure => 24801,
            TypeCode::SubPlot => 24901,
            TypeCode::Axis => 25001,
            TypeCode::Style => 25101,
            TypeCode::Line => 25201,
            TypeCode::Marker => 25301,
            TypeCode::Fill => 25401,
            TypeCode::AppliedDimension => 25601,
            TypeCode::DataRange => 25701,
            TypeCode::ShadedArea => 25901,
            TypeCode::ParameterEstimationResultPlot => 26001,
            TypeCode::WaterfallPlot => 26101,
            TypeCode::ParameterEstimationReport => 26201,
            TypeCode::AbstractCurve => 21901,
            TypeCode::Analysis
            | TypeCode::SimpleRepeatedTask
            | TypeCode::RemainingDimension
            | TypeCode::Unknown
            | TypeCode::ListOf => return None,
        };

        Some(block)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
