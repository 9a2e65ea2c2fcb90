//! Concrete SED-ML Level 1 elements.
//!
//! Every element is a plain struct owning its attributes (as `Option`s) and
//! its children (as [`SedListOf`](crate::list::SedListOf)s or nested
//! elements). Related kinds that may share a list are grouped into closed
//! enums: [`SedChange`], [`SedSimulation`], [`SedAbstractTask`],
//! [`SedRange`], [`SedOutput`] and [`SedAbstractCurve`].

mod algorithm;
mod axis;
mod change;
mod curve;
mod data_description;
mod data_generator;
mod document;
mod figure;
mod model;
mod output;
mod parameter;
mod parameter_estimation;
mod range;
mod simulation;
mod style;
mod task;
mod variable;

pub use algorithm::{SedAlgorithm, SedAlgorithmParameter};
pub use axis::SedAxis;
pub use change::{
    SedAddXml, SedChange, SedChangeAttribute, SedChangeMut, SedChangeXml, SedComputeChange,
    SedRemoveXml,
};
pub use curve::{SedAbstractCurve, SedAbstractCurveMut, SedCurve, SedShadedArea, SedSurface};
pub use data_description::{SedDataDescription, SedDataSource, SedSlice};
pub use data_generator::SedDataGenerator;
pub use document::SedDocument;
pub use figure::{SedFigure, SedSubPlot};
pub use model::SedModel;
pub use output::{
    SedDataSet, SedOutput, SedOutputMut, SedParameterEstimationReport,
    SedParameterEstimationResultPlot, SedPlot2D, SedPlot3D, SedReport, SedWaterfallPlot,
};
pub use parameter::SedParameter;
pub use parameter_estimation::{
    SedAdjustableParameter, SedBounds, SedExperimentReference, SedFitExperiment, SedFitMapping,
    SedLeastSquareObjectiveFunction, SedParameterEstimationTask,
};
pub use range::{
    SedDataRange, SedFunctionalRange, SedRange, SedRangeMut, SedUniformRange, SedVectorRange,
};
pub use simulation::{
    SedAnalysis, SedOneStep, SedSimulation, SedSimulationMut, SedSteadyState,
    SedUniformTimeCourse,
};
pub use style::{SedFill, SedLine, SedMarker, SedStyle};
pub use task::{
    SedAbstractTask, SedAbstractTaskMut, SedRepeatedTask, SedSetValue, SedSimpleRepeatedTask,
    SedSubTask, SedTask,
};
pub use variable::{SedAppliedDimension, SedRemainingDimension, SedVariable};

use crate::base::ReadContext;
use crate::error::SedOperationError;
use crate::errorlog::SedErrorCode;
use crate::namespaces::MATHML_XMLNS;
use crate::xml::{XmlInputStream, XmlNode};

/// Checks that `math` is a `math` element and binds it to the MathML namespace.
pub(crate) fn math_node(math: XmlNode) -> Result<XmlNode, SedOperationError> {
    if !math.is_element() || math.local_name() != "math" {
        return Err(SedOperationError::InvalidObject);
    }
    Ok(declare_namespace(math, MATHML_XMLNS))
}

/// Adds the declaration of the node's own prefix when it is missing.
///
/// Free-form content may rely on declarations made on an ancestor, which
/// would be lost once the node is written on its own.
fn declare_namespace(mut node: XmlNode, uri: &str) -> XmlNode {
    let key = match node.name().split_once(':') {
        Some((prefix, _)) => format!("xmlns:{prefix}"),
        None => "xmlns".to_string(),
    };
    if node.attribute(&key).is_none() {
        if let XmlNode::Element { attributes, .. } = &mut node {
            attributes.insert(0, (key, uri.to_string()));
        }
    }
    node
}

/// Reads a `math` element at the front of `stream` into `slot`.
///
/// Returns `false`, consuming nothing, when the next element is not `math`.
pub(crate) fn read_math(
    stream: &mut XmlInputStream,
    slot: &mut Option<XmlNode>,
    ctx: &mut ReadContext<'_>,
) -> bool {
    let (uri, line, column) = match stream.peek_start() {
        Some(start) if start.local_name == "math" => (start.uri.clone(), start.line, start.column),
        _ => return false,
    };

    if uri != MATHML_XMLNS {
        ctx.log_error(
            SedErrorCode::InvalidMathElement,
            &format!("The <math> element must be in the MathML namespace, found '{uri}'."),
            line,
            column,
        );
    }

    let uri = if uri.is_empty() { MATHML_XMLNS } else { uri.as_str() };
    *slot = stream.read_node().map(|math| declare_namespace(math, uri));
    true
}

/// Reads a `newXML` element at the front of `stream` into `slot`.
pub(crate) fn read_new_xml(stream: &mut XmlInputStream, slot: &mut Option<XmlNode>) -> bool {
    if stream.peek_name() != Some("newXML") {
        return false;
    }
    *slot = stream.read_node();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_node_declares_namespace() {
        let math = math_node(XmlNode::element("math").with_child(XmlNode::element("ci")))
            .expect("Rejected math");
        assert_eq!(math.attribute("xmlns"), Some(MATHML_XMLNS));

        let prefixed = math_node(XmlNode::element("m:math")).expect("Rejected math");
        assert_eq!(prefixed.attribute("xmlns:m"), Some(MATHML_XMLNS));

        assert_eq!(
            math_node(XmlNode::element("apply")),
            Err(SedOperationError::InvalidObject)
        );
    }

    #[test]
    fn test_read_math_skips_other_elements() {
        let mut stream = XmlInputStream::new("<other/>");
        let mut log = crate::errorlog::SedErrorLog::new();
        let mut ctx = ReadContext::new(&mut log, 1, 4);
        let mut slot = None;

        assert!(!read_math(&mut stream, &mut slot, &mut ctx));
        assert!(slot.is_none());
        assert_eq!(stream.peek_name(), Some("other"));
    }
}
