//! Parameter estimation: fitting model parameters to experimental data.

use crate::base::{optional_child, optional_child_mut, ReadContext, SedBase, SedObject};
use crate::elements::SedAlgorithm;
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// Fits adjustable parameters against one or more experiments.
///
/// Complete only with an algorithm, an objective function, at least one
/// adjustable parameter and at least one fit experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct SedParameterEstimationTask {
    base: SedBase,
    algorithm: Option<SedAlgorithm>,
    objective: Option<SedLeastSquareObjectiveFunction>,
    adjustable_parameters: SedListOf<SedAdjustableParameter>,
    fit_experiments: SedListOf<SedFitExperiment>,
}

impl SedParameterEstimationTask {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut task = SedParameterEstimationTask {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            algorithm: None,
            objective: None,
            adjustable_parameters: SedListOf::with_namespaces(namespaces.clone()),
            fit_experiments: SedListOf::with_namespaces(namespaces),
        };
        task.connect_to_child();
        task
    }
}

sed_constructors!(SedParameterEstimationTask);

sed_attributes!(SedParameterEstimationTask {});

sed_child!(SedParameterEstimationTask {
    algorithm: SedAlgorithm => SedAlgorithm::with_namespaces,
    objective: SedLeastSquareObjectiveFunction => SedLeastSquareObjectiveFunction::with_namespaces,
});

sed_child_lists!(SedParameterEstimationTask {
    adjustable_parameters: SedAdjustableParameter => adjustable_parameter [create],
    fit_experiments: SedFitExperiment => fit_experiment [create],
});

impl SedObject for SedParameterEstimationTask {
    sed_object_common!(
        TypeCode::ParameterEstimationTask,
        "parameterEstimationTask",
        required: ["id"]
    );

    fn has_required_elements(&self) -> bool {
        self.algorithm.is_some()
            && self.objective.is_some()
            && !self.adjustable_parameters.is_empty()
            && !self.fit_experiments.is_empty()
    }

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        let namespaces = self.base.namespaces().clone();
        match name {
            "algorithm" => Some(self.algorithm.insert(SedAlgorithm::with_namespaces(namespaces))),
            "leastSquareObjectiveFunction" => Some(
                self.objective
                    .insert(SedLeastSquareObjectiveFunction::with_namespaces(namespaces)),
            ),
            "listOfAdjustableParameters" => Some(&mut self.adjustable_parameters),
            "listOfFitExperiments" => Some(&mut self.fit_experiments),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        [
            optional_child(&self.algorithm),
            optional_child(&self.objective),
            Some(&self.adjustable_parameters as &dyn SedObject),
            Some(&self.fit_experiments as &dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        [
            optional_child_mut(&mut self.algorithm),
            optional_child_mut(&mut self.objective),
            Some(&mut self.adjustable_parameters as &mut dyn SedObject),
            Some(&mut self.fit_experiments as &mut dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Sum of squared residuals between model and data.
#[derive(Debug, Clone, PartialEq)]
pub struct SedLeastSquareObjectiveFunction {
    base: SedBase,
}

impl SedLeastSquareObjectiveFunction {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedLeastSquareObjectiveFunction {
            base: SedBase::new(namespaces),
        }
    }
}

sed_constructors!(SedLeastSquareObjectiveFunction);

sed_attributes!(SedLeastSquareObjectiveFunction {});

impl SedObject for SedLeastSquareObjectiveFunction {
    sed_object_common!(
        TypeCode::LeastSquareObjectiveFunction,
        "leastSquareObjectiveFunction",
        required: []
    );
}

/// A model quantity the estimation may change, within its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SedAdjustableParameter {
    base: SedBase,
    initial_value: Option<f64>,
    model_reference: Option<String>,
    target: Option<String>,
    bounds: Option<SedBounds>,
    experiment_references: SedListOf<SedExperimentReference>,
}

impl SedAdjustableParameter {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut parameter = SedAdjustableParameter {
            base: SedBase::new(namespaces.clone()),
            initial_value: None,
            model_reference: None,
            target: None,
            bounds: None,
            experiment_references: SedListOf::with_namespaces(namespaces),
        };
        parameter.connect_to_child();
        parameter
    }
}

sed_constructors!(SedAdjustableParameter);

sed_attributes!(SedAdjustableParameter {
    initial_value: double("initialValue"),
    model_reference: sidref("modelReference"),
    target: string("target"),
});

sed_child!(SedAdjustableParameter {
    bounds: SedBounds => SedBounds::with_namespaces,
});

sed_child_lists!(SedAdjustableParameter {
    experiment_references: SedExperimentReference => experiment_reference [create],
});

sed_list_item!(
    SedAdjustableParameter,
    "listOfAdjustableParameters",
    TypeCode::AdjustableParameter,
    "adjustableParameter"
);

impl SedObject for SedAdjustableParameter {
    sed_object_common!(
        TypeCode::AdjustableParameter,
        "adjustableParameter",
        required: []
    );

    fn has_required_elements(&self) -> bool {
        self.bounds.is_some()
    }

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        match name {
            "bounds" => {
                let bounds = SedBounds::with_namespaces(self.base.namespaces().clone());
                Some(self.bounds.insert(bounds))
            }
            "listOfExperimentReferences" => Some(&mut self.experiment_references),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        [
            optional_child(&self.bounds),
            Some(&self.experiment_references as &dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        [
            optional_child_mut(&mut self.bounds),
            Some(&mut self.experiment_references as &mut dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Search interval of an adjustable parameter, with the scale to search on.
#[derive(Debug, Clone, PartialEq)]
pub struct SedBounds {
    base: SedBase,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    scale: Option<String>,
}

impl SedBounds {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedBounds {
            base: SedBase::new(namespaces),
            lower_bound: None,
            upper_bound: None,
            scale: None,
        }
    }
}

sed_constructors!(SedBounds);

sed_attributes!(SedBounds {
    lower_bound: double("lowerBound"),
    upper_bound: double("upperBound"),
    scale: string("scale"),
});

impl SedObject for SedBounds {
    sed_object_common!(TypeCode::Bounds, "bounds", required: []);
}

/// Restricts an adjustable parameter to the named fit experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct SedExperimentReference {
    base: SedBase,
    experiment_id: Option<String>,
}

impl SedExperimentReference {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedExperimentReference {
            base: SedBase::new(namespaces),
            experiment_id: None,
        }
    }
}

sed_constructors!(SedExperimentReference);

sed_attributes!(SedExperimentReference {
    experiment_id: sidref("experimentId"),
});

sed_list_item!(
    SedExperimentReference,
    "listOfExperimentReferences",
    TypeCode::ExperimentReference,
    "experimentReference"
);

impl SedObject for SedExperimentReference {
    sed_object_common!(
        TypeCode::ExperimentReference,
        "experimentReference",
        required: []
    );
}

/// One experiment: how its data map onto the model, and how to simulate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SedFitExperiment {
    base: SedBase,
    experiment_type: Option<String>,
    algorithm: Option<SedAlgorithm>,
    fit_mappings: SedListOf<SedFitMapping>,
}

impl SedFitExperiment {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut experiment = SedFitExperiment {
            base: SedBase::new(namespaces.clone()),
            experiment_type: None,
            algorithm: None,
            fit_mappings: SedListOf::with_namespaces(namespaces),
        };
        experiment.connect_to_child();
        experiment
    }
}

sed_constructors!(SedFitExperiment);

sed_attributes!(SedFitExperiment {
    experiment_type: string("type"),
});

sed_child!(SedFitExperiment {
    algorithm: SedAlgorithm => SedAlgorithm::with_namespaces,
});

sed_child_lists!(SedFitExperiment {
    fit_mappings: SedFitMapping => fit_mapping [create],
});

sed_list_item!(
    SedFitExperiment,
    "listOfFitExperiments",
    TypeCode::FitExperiment,
    "fitExperiment"
);

impl SedObject for SedFitExperiment {
    sed_object_common!(TypeCode::FitExperiment, "fitExperiment", required: []);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        match name {
            "algorithm" => {
                let algorithm = SedAlgorithm::with_namespaces(self.base.namespaces().clone());
                Some(self.algorithm.insert(algorithm))
            }
            "listOfFitMappings" => Some(&mut self.fit_mappings),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        [
            optional_child(&self.algorithm),
            Some(&self.fit_mappings as &dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        [
            optional_child_mut(&mut self.algorithm),
            Some(&mut self.fit_mappings as &mut dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Pairs a data source with the model quantity or time it is compared to.
#[derive(Debug, Clone, PartialEq)]
pub struct SedFitMapping {
    base: SedBase,
    data_source: Option<String>,
    target: Option<String>,
    mapping_type: Option<String>,
    weight: Option<f64>,
    point_weight: Option<String>,
}

impl SedFitMapping {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedFitMapping {
            base: SedBase::new(namespaces),
            data_source: None,
            target: None,
            mapping_type: None,
            weight: None,
            point_weight: None,
        }
    }
}

sed_constructors!(SedFitMapping);

sed_attributes!(SedFitMapping {
    data_source: sidref("dataSource"),
    target: sidref("target"),
    mapping_type: string("type"),
    weight: double("weight"),
    point_weight: sidref("pointWeight"),
});

sed_list_item!(SedFitMapping, "listOfFitMappings", TypeCode::FitMapping, "fitMapping");

impl SedObject for SedFitMapping {
    sed_object_common!(
        TypeCode::FitMapping,
        "fitMapping",
        required: ["dataSource", "target", "type"]
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{read_object, write_object};
    use crate::errorlog::SedErrorLog;
    use crate::xml::{XmlInputStream, XmlOutputStream};

    const TASK: &str = concat!(
        r#"<parameterEstimationTask id="fit">"#,
        r#"<algorithm kisaoID="KISAO:0000514"/>"#,
        r#"<leastSquareObjectiveFunction/>"#,
        r#"<listOfAdjustableParameters>"#,
        r#"<adjustableParameter initialValue="1" modelReference="model1" target="/sbml:sbml/sbml:model/sbml:listOfParameters/sbml:parameter[1]">"#,
        r#"<bounds lowerBound="0.01" upperBound="100" scale="log10"/>"#,
        r#"<listOfExperimentReferences><experimentReference experimentId="exp1"/></listOfExperimentReferences>"#,
        r#"</adjustableParameter>"#,
        r#"</listOfAdjustableParameters>"#,
        r#"<listOfFitExperiments>"#,
        r#"<fitExperiment id="exp1" type="timeCourse">"#,
        r#"<algorithm kisaoID="KISAO:0000019"/>"#,
        r#"<listOfFitMappings>"#,
        r#"<fitMapping dataSource="time_source" target="time" type="time"/>"#,
        r#"<fitMapping dataSource="S1_source" target="dg_S1" type="experimentalCondition" weight="0.5"/>"#,
        r#"</listOfFitMappings>"#,
        r#"</fitExperiment>"#,
        r#"</listOfFitExperiments>"#,
        r#"</parameterEstimationTask>"#
    );

    #[test]
    fn test_read_and_write_parameter_estimation_task() {
        let mut task = SedParameterEstimationTask::default();
        let mut log = SedErrorLog::new();
        let mut stream = XmlInputStream::new(TASK);
        read_object(&mut task, &mut stream, &mut ReadContext::new(&mut log, 1, 4));

        assert!(log.is_empty(), "{log}");
        assert!(task.has_required_elements());
        assert_eq!(task.algorithm().map(SedAlgorithm::kisao_id), Some("KISAO:0000514"));

        let parameter = task.get_adjustable_parameter(0).expect("Missing parameter");
        let bounds = parameter.bounds().expect("Missing bounds");
        assert_eq!(bounds.scale(), "log10");
        assert_eq!(parameter.num_experiment_references(), 1);

        let experiment = task.get_fit_experiment_by_id("exp1").expect("Missing experiment");
        assert_eq!(experiment.num_fit_mappings(), 2);
        assert!(experiment
            .fit_mappings()
            .iter()
            .all(SedObject::has_required_attributes));

        let mut output = XmlOutputStream::compact();
        write_object(&task, &mut output).expect("Failed to write");
        assert_eq!(output.finish().expect("Failed to finish"), TASK);
    }

    #[test]
    fn test_required_elements() {
        let mut task = SedParameterEstimationTask::default();
        task.create_algorithm()
            .set_kisao_id("KISAO:0000514")
            .expect("Invalid KiSAO id");
        task.create_objective();
        assert!(!task.has_required_elements());

        let parameter = task
            .create_adjustable_parameter()
            .expect("Failed to create parameter");
        assert!(!parameter.has_required_elements());
        parameter.create_bounds();
        assert!(parameter.has_required_elements());

        task.create_fit_experiment().expect("Failed to create experiment");
        assert!(task.has_required_elements());
        let objective = task.objective().expect("Missing objective");
        assert!(objective
            .base()
            .parent_link()
            .has_ancestor(TypeCode::ParameterEstimationTask));
    }
}
