//! Simulation settings: what kind of run, and with which algorithm.

use crate::base::{optional_child, optional_child_mut, ReadContext, SedBase, SedObject};
use crate::elements::SedAlgorithm;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// Accessors and child handling for the optional `algorithm` of a simulation.
macro_rules! algorithm_child {
    ($owner:ident) => {
        sed_child!($owner {
            algorithm: SedAlgorithm => SedAlgorithm::with_namespaces,
        });

        impl $owner {
            fn create_algorithm_object(&mut self, name: &str) -> Option<&mut dyn SedObject> {
                if name != "algorithm" {
                    return None;
                }
                let algorithm = SedAlgorithm::with_namespaces(self.base.namespaces().clone());
                Some(self.algorithm.insert(algorithm) as &mut dyn SedObject)
            }

            fn algorithm_children(&self) -> Vec<&dyn SedObject> {
                optional_child(&self.algorithm).into_iter().collect()
            }

            fn algorithm_children_mut(&mut self) -> Vec<&mut dyn SedObject> {
                optional_child_mut(&mut self.algorithm).into_iter().collect()
            }
        }
    };
}

/// A time course sampled at uniformly spaced time points.
///
/// The number of intervals is called `numberOfSteps` from Version 4 on and
/// `numberOfPoints` before; both spellings are read and the one matching the
/// element's version is written.
#[derive(Debug, Clone, PartialEq)]
pub struct SedUniformTimeCourse {
    base: SedBase,
    initial_time: Option<f64>,
    output_start_time: Option<f64>,
    output_end_time: Option<f64>,
    number_of_steps: Option<i32>,
    algorithm: Option<SedAlgorithm>,
}

impl SedUniformTimeCourse {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedUniformTimeCourse {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            initial_time: None,
            output_start_time: None,
            output_end_time: None,
            number_of_steps: None,
            algorithm: None,
        }
    }
}

sed_constructors!(SedUniformTimeCourse);

sed_attributes!(SedUniformTimeCourse {
    initial_time: double("initialTime"),
    output_start_time: double("outputStartTime"),
    output_end_time: double("outputEndTime"),
    number_of_steps: steps("numberOfSteps"),
});

algorithm_child!(SedUniformTimeCourse);

impl SedObject for SedUniformTimeCourse {
    sed_object_common!(
        TypeCode::UniformTimeCourse,
        "uniformTimeCourse",
        required: [
            "id",
            "initialTime",
            "outputStartTime",
            "outputEndTime",
            "numberOfSteps",
        ]
    );

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        self.create_algorithm_object(name)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        self.algorithm_children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        self.algorithm_children_mut()
    }
}

/// A single step of the given length from the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct SedOneStep {
    base: SedBase,
    step: Option<f64>,
    algorithm: Option<SedAlgorithm>,
}

impl SedOneStep {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedOneStep {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            step: None,
            algorithm: None,
        }
    }
}

sed_constructors!(SedOneStep);

sed_attributes!(SedOneStep {
    step: double("step"),
});

algorithm_child!(SedOneStep);

impl SedObject for SedOneStep {
    sed_object_common!(TypeCode::OneStep, "oneStep", required: ["id", "step"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        self.create_algorithm_object(name)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        self.algorithm_children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        self.algorithm_children_mut()
    }
}

/// A run to the model's steady state.
#[derive(Debug, Clone, PartialEq)]
pub struct SedSteadyState {
    base: SedBase,
    algorithm: Option<SedAlgorithm>,
}

impl SedSteadyState {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedSteadyState {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            algorithm: None,
        }
    }
}

sed_constructors!(SedSteadyState);

sed_attributes!(SedSteadyState {});

algorithm_child!(SedSteadyState);

impl SedObject for SedSteadyState {
    sed_object_common!(TypeCode::SteadyState, "steadyState", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        self.create_algorithm_object(name)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        self.algorithm_children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        self.algorithm_children_mut()
    }
}

/// A simulation whose kind is given entirely by its algorithm, such as a
/// bifurcation or sensitivity analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SedAnalysis {
    base: SedBase,
    algorithm: Option<SedAlgorithm>,
}

impl SedAnalysis {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedAnalysis {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            algorithm: None,
        }
    }
}

sed_constructors!(SedAnalysis);

sed_attributes!(SedAnalysis {});

algorithm_child!(SedAnalysis);

impl SedObject for SedAnalysis {
    sed_object_common!(TypeCode::Analysis, "analysis", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        self.create_algorithm_object(name)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        self.algorithm_children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        self.algorithm_children_mut()
    }
}

sed_variants! {
    /// Any of the simulation kinds of `listOfSimulations`.
    SedSimulation, SedSimulationMut, TypeCode::Simulation, "listOfSimulations" {
        UniformTimeCourse(SedUniformTimeCourse) = "uniformTimeCourse",
        OneStep(SedOneStep) = "oneStep",
        SteadyState(SedSteadyState) = "steadyState",
        Analysis(SedAnalysis) = "analysis",
    }
}

impl SedSimulation {
    pub fn algorithm(&self) -> Option<&SedAlgorithm> {
        match self {
            SedSimulation::UniformTimeCourse(simulation) => simulation.algorithm(),
            SedSimulation::OneStep(simulation) => simulation.algorithm(),
            SedSimulation::SteadyState(simulation) => simulation.algorithm(),
            SedSimulation::Analysis(simulation) => simulation.algorithm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeValue;
    use crate::list::ListItem;
    use crate::xml::XmlOutputStream;

    fn time_course(version: u32) -> SedUniformTimeCourse {
        let mut simulation = SedUniformTimeCourse::new(1, version).expect("Invalid namespaces");
        simulation.set_id("sim").expect("Invalid id");
        simulation.set_initial_time(0.0).expect("Failed to set time");
        simulation.set_output_start_time(0.0).expect("Failed to set time");
        simulation.set_output_end_time(10.0).expect("Failed to set time");
        simulation.set_number_of_points(100).expect("Failed to set steps");
        simulation
    }

    fn attributes_of(simulation: &SedUniformTimeCourse) -> String {
        let mut stream = XmlOutputStream::compact();
        crate::base::write_object(simulation, &mut stream).expect("Failed to write");
        stream.finish().expect("Failed to finish")
    }

    #[test]
    fn test_steps_spelling_follows_version() {
        let v3 = attributes_of(&time_course(3));
        assert!(v3.contains(r#"numberOfPoints="100""#));
        assert!(!v3.contains("numberOfSteps"));

        let v4 = attributes_of(&time_course(4));
        assert!(v4.contains(r#"numberOfSteps="100""#));
        assert!(time_course(4).has_required_attributes());
    }

    #[test]
    fn test_reflective_steps() {
        let mut simulation = time_course(4);
        assert_eq!(
            simulation.get_attribute("numberOfPoints"),
            Some(AttributeValue::Int(100))
        );
        simulation
            .unset_attribute("numberOfSteps")
            .expect("Failed to unset");
        assert!(!simulation.has_required_attributes());
    }

    #[test]
    fn test_algorithm_is_linked() {
        let mut simulation = SedSimulation::from(time_course(4));
        if let SedSimulation::UniformTimeCourse(inner) = &mut simulation {
            inner
                .create_algorithm()
                .set_kisao_id("KISAO:0000019")
                .expect("Failed to set KiSAO id");
        }

        let algorithm = simulation.algorithm().expect("Missing algorithm");
        assert_eq!(algorithm.kisao_id(), "KISAO:0000019");
        assert!(algorithm
            .base()
            .parent_link()
            .has_ancestor(TypeCode::UniformTimeCourse));
        assert_eq!(simulation.children().len(), 1);
    }

    #[test]
    fn test_analysis_is_a_simulation() {
        let namespaces = SedNamespaces::default();
        let mut simulation = SedSimulation::create_item("analysis", &namespaces)
            .expect("Unknown simulation kind");
        let xml = r#"<analysis id="bifurcation"><algorithm kisaoID="KISAO:0000569"/></analysis>"#;
        let mut log = crate::errorlog::SedErrorLog::new();
        let mut stream = crate::xml::XmlInputStream::new(xml);
        crate::base::read_object(
            &mut simulation,
            &mut stream,
            &mut ReadContext::new(&mut log, 1, 4),
        );

        assert!(log.is_empty(), "{log}");
        assert!(simulation.is_analysis());
        assert_eq!(
            simulation.algorithm().map(SedAlgorithm::kisao_id),
            Some("KISAO:0000569")
        );
        assert_eq!(simulation.type_code(), TypeCode::Analysis);
    }
}
