//! The `<sedML>` root element.

use crate::attribute::AttributeValue;
use crate::base::{
    apply_namespaces, write_child_objects, ParentLink, ReadContext, SedBase, SedObject,
};
use crate::elements::{
    SedAbstractTask, SedAlgorithmParameter, SedAnalysis, SedDataDescription, SedDataGenerator,
    SedFigure, SedModel, SedOneStep, SedOutput, SedParameterEstimationReport,
    SedParameterEstimationResultPlot, SedParameterEstimationTask, SedPlot2D, SedPlot3D,
    SedRepeatedTask, SedReport, SedSimpleRepeatedTask, SedSimulation, SedSteadyState, SedStyle,
    SedTask, SedUniformTimeCourse, SedWaterfallPlot,
};
use crate::error::{SedIoError, SedOperationError, SedResult};
use crate::errorlog::{SedErrorCode, SedErrorLog};
use crate::list::SedListOf;
use crate::namespaces::{is_valid_combination, SedNamespaces};
use crate::typecode::TypeCode;
use crate::xml::{ExpectedAttributes, XmlAttributes, XmlNamespaces, XmlOutputStream};

/// Accessors of the document's top-level lists.
///
/// `add_x` runs the document's admission checks before copying the item.
macro_rules! document_lists {
    ($( $field:ident : $item:ty => $singular:ident ),* $(,)?) => {
        paste::paste! {
            impl SedDocument {
                $(
                    pub fn $field(&self) -> &SedListOf<$item> {
                        &self.$field
                    }

                    pub fn [<$field _mut>](&mut self) -> &mut SedListOf<$item> {
                        &mut self.$field
                    }

                    pub fn [<num_ $field>](&self) -> usize {
                        self.$field.size()
                    }

                    pub fn [<get_ $singular>](&self, index: usize) -> Option<&$item> {
                        self.$field.get(index)
                    }

                    pub fn [<get_ $singular _by_id>](&self, id: &str) -> Option<&$item> {
                        self.$field.get_by_id(id)
                    }

                    /// Appends a copy of the item.
                    ///
                    /// # Returns
                    ///
                    /// `InvalidObject` when the item misses required attributes or
                    /// elements, `LevelMismatch`/`VersionMismatch`/`NamespacesMismatch`
                    /// when it belongs to another release, and `DuplicateObjectId`
                    /// when the list already has an item with the same id.
                    pub fn [<add_ $singular>](&mut self, item: &$item) -> SedResult {
                        self.check_addition(item)?;
                        if item.is_set_id() && self.$field.get_by_id(item.id()).is_some() {
                            return Err(SedOperationError::DuplicateObjectId);
                        }
                        self.$field.append(item)
                    }

                    pub fn [<remove_ $singular>](&mut self, index: usize) -> Option<$item> {
                        self.$field.remove(index)
                    }

                    pub fn [<remove_ $singular _by_id>](&mut self, id: &str) -> Option<$item> {
                        self.$field.remove_by_id(id)
                    }
                )*
            }
        }
    };
}

/// Creates an element of one kind of a variant list and returns it.
macro_rules! create_variant {
    ($self:ident, $field:ident, $enum:ident :: $variant:ident ( $inner:ty )) => {{
        let item = <$inner>::with_namespaces($self.base.namespaces().clone());
        match $self.$field.push_and_get(item.into())? {
            $enum::$variant(item) => Some(item),
            _ => None,
        }
    }};
}

/// A SED-ML document.
///
/// Owns the top-level lists and the error log of the last read. Document
/// wide algorithm parameters are only written from Version 4 on.
#[derive(Debug, Clone, PartialEq)]
pub struct SedDocument {
    base: SedBase,
    algorithm_parameters: SedListOf<SedAlgorithmParameter>,
    data_descriptions: SedListOf<SedDataDescription>,
    models: SedListOf<SedModel>,
    simulations: SedListOf<SedSimulation>,
    tasks: SedListOf<SedAbstractTask>,
    data_generators: SedListOf<SedDataGenerator>,
    outputs: SedListOf<SedOutput>,
    styles: SedListOf<SedStyle>,
    error_log: SedErrorLog,
}

impl SedDocument {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut document = SedDocument {
            base: SedBase::new(namespaces.clone()),
            algorithm_parameters: SedListOf::with_namespaces(namespaces.clone()),
            data_descriptions: SedListOf::with_namespaces(namespaces.clone()),
            models: SedListOf::with_namespaces(namespaces.clone()),
            simulations: SedListOf::with_namespaces(namespaces.clone()),
            tasks: SedListOf::with_namespaces(namespaces.clone()),
            data_generators: SedListOf::with_namespaces(namespaces.clone()),
            outputs: SedListOf::with_namespaces(namespaces.clone()),
            styles: SedListOf::with_namespaces(namespaces),
            error_log: SedErrorLog::new(),
        };
        document.connect_to_child();
        document
    }

    /// Moves the document and every element in it to another release.
    ///
    /// Extra namespace declarations are kept. Fails with
    /// `InvalidAttributeValue` for an unknown level/version combination.
    pub fn set_level_and_version(&mut self, level: u32, version: u32) -> SedResult {
        let mut namespaces = self.base.namespaces().clone();
        namespaces.set_level_version(level, version)?;
        apply_namespaces(self, &namespaces);
        self.connect_to_child();
        Ok(())
    }

    /// Declares an extra namespace on the document element.
    pub fn add_namespace(&mut self, uri: &str, prefix: &str) -> SedResult {
        self.base.namespaces_mut().add_namespace(uri, prefix)
    }

    /// Diagnostics collected while reading this document.
    pub fn error_log(&self) -> &SedErrorLog {
        &self.error_log
    }

    pub fn error_log_mut(&mut self) -> &mut SedErrorLog {
        &mut self.error_log
    }

    pub(crate) fn set_error_log(&mut self, log: SedErrorLog) {
        self.error_log = log;
    }

    pub fn num_errors(&self) -> usize {
        self.error_log.num_errors()
    }

    /// A default setting applying to every algorithm in the document.
    pub fn create_algorithm_parameter(&mut self) -> Option<&mut SedAlgorithmParameter> {
        let parameter = SedAlgorithmParameter::with_namespaces(self.base.namespaces().clone());
        self.algorithm_parameters.push_and_get(parameter)
    }

    pub fn create_data_description(&mut self) -> Option<&mut SedDataDescription> {
        let description = SedDataDescription::with_namespaces(self.base.namespaces().clone());
        self.data_descriptions.push_and_get(description)
    }

    pub fn create_model(&mut self) -> Option<&mut SedModel> {
        let model = SedModel::with_namespaces(self.base.namespaces().clone());
        self.models.push_and_get(model)
    }

    pub fn create_uniform_time_course(&mut self) -> Option<&mut SedUniformTimeCourse> {
        create_variant!(self, simulations, SedSimulation::UniformTimeCourse(SedUniformTimeCourse))
    }

    pub fn create_one_step(&mut self) -> Option<&mut SedOneStep> {
        create_variant!(self, simulations, SedSimulation::OneStep(SedOneStep))
    }

    pub fn create_steady_state(&mut self) -> Option<&mut SedSteadyState> {
        create_variant!(self, simulations, SedSimulation::SteadyState(SedSteadyState))
    }

    pub fn create_analysis(&mut self) -> Option<&mut SedAnalysis> {
        create_variant!(self, simulations, SedSimulation::Analysis(SedAnalysis))
    }

    pub fn create_task(&mut self) -> Option<&mut SedTask> {
        create_variant!(self, tasks, SedAbstractTask::Task(SedTask))
    }

    pub fn create_repeated_task(&mut self) -> Option<&mut SedRepeatedTask> {
        create_variant!(self, tasks, SedAbstractTask::RepeatedTask(SedRepeatedTask))
    }

    pub fn create_simple_repeated_task(&mut self) -> Option<&mut SedSimpleRepeatedTask> {
        create_variant!(self, tasks, SedAbstractTask::SimpleRepeatedTask(SedSimpleRepeatedTask))
    }

    pub fn create_parameter_estimation_task(&mut self) -> Option<&mut SedParameterEstimationTask> {
        create_variant!(
            self,
            tasks,
            SedAbstractTask::ParameterEstimationTask(SedParameterEstimationTask)
        )
    }

    pub fn create_data_generator(&mut self) -> Option<&mut SedDataGenerator> {
        let generator = SedDataGenerator::with_namespaces(self.base.namespaces().clone());
        self.data_generators.push_and_get(generator)
    }

    pub fn create_report(&mut self) -> Option<&mut SedReport> {
        create_variant!(self, outputs, SedOutput::Report(SedReport))
    }

    pub fn create_plot2d(&mut self) -> Option<&mut SedPlot2D> {
        create_variant!(self, outputs, SedOutput::Plot2D(SedPlot2D))
    }

    pub fn create_plot3d(&mut self) -> Option<&mut SedPlot3D> {
        create_variant!(self, outputs, SedOutput::Plot3D(SedPlot3D))
    }

    pub fn create_figure(&mut self) -> Option<&mut SedFigure> {
        create_variant!(self, outputs, SedOutput::Figure(SedFigure))
    }

    pub fn create_waterfall_plot(&mut self) -> Option<&mut SedWaterfallPlot> {
        create_variant!(self, outputs, SedOutput::WaterfallPlot(SedWaterfallPlot))
    }

    pub fn create_parameter_estimation_report(
        &mut self,
    ) -> Option<&mut SedParameterEstimationReport> {
        create_variant!(
            self,
            outputs,
            SedOutput::ParameterEstimationReport(SedParameterEstimationReport)
        )
    }

    pub fn create_parameter_estimation_result_plot(
        &mut self,
    ) -> Option<&mut SedParameterEstimationResultPlot> {
        create_variant!(
            self,
            outputs,
            SedOutput::ParameterEstimationResultPlot(SedParameterEstimationResultPlot)
        )
    }

    pub fn create_style(&mut self) -> Option<&mut SedStyle> {
        let style = SedStyle::with_namespaces(self.base.namespaces().clone());
        self.styles.push_and_get(style)
    }

    fn check_addition(&self, item: &dyn SedObject) -> SedResult {
        if !item.has_required_attributes() || !item.has_required_elements() {
            return Err(SedOperationError::InvalidObject);
        }
        if item.level() != self.level() {
            return Err(SedOperationError::LevelMismatch);
        }
        if item.version() != self.version() {
            return Err(SedOperationError::VersionMismatch);
        }

        let declared = self.base.namespaces().namespaces();
        let conflicting = item
            .base()
            .namespaces()
            .namespaces()
            .iter()
            .any(|(prefix, uri)| declared.uri(prefix).is_some_and(|known| known != uri));
        if conflicting {
            return Err(SedOperationError::NamespacesMismatch);
        }
        Ok(())
    }

    fn read_release_number(
        attributes: &XmlAttributes,
        name: &str,
        not_integer: SedErrorCode,
        ctx: &mut ReadContext<'_>,
        line: usize,
        column: usize,
    ) -> Option<u32> {
        let Some(value) = attributes.get(name) else {
            ctx.log_error(
                SedErrorCode::allowed_attributes(TypeCode::Document),
                &format!("Sedml attribute '{name}' is missing from the <SedDocument> element."),
                line,
                column,
            );
            return None;
        };

        match value.trim().parse::<u32>() {
            Ok(number) => Some(number),
            Err(_) => {
                ctx.log_error(
                    not_integer,
                    &format!("The '{name}' attribute of the <sedML> element is '{value}', which is not a non-negative integer."),
                    line,
                    column,
                );
                None
            }
        }
    }
}

sed_constructors!(SedDocument);

document_lists!(
    algorithm_parameters: SedAlgorithmParameter => algorithm_parameter,
    data_descriptions: SedDataDescription => data_description,
    models: SedModel => model,
    simulations: SedSimulation => simulation,
    tasks: SedAbstractTask => task,
    data_generators: SedDataGenerator => data_generator,
    outputs: SedOutput => output,
    styles: SedStyle => style,
);

impl SedObject for SedDocument {
    fn base(&self) -> &SedBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SedBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Document
    }

    fn element_name(&self) -> &str {
        "sedML"
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        self.base.add_expected_attributes(expected);
        expected.add("level");
        expected.add("version");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        ctx: &mut ReadContext<'_>,
    ) {
        let (line, column) = (self.base.line(), self.base.column());
        self.base
            .read_attributes(attributes, expected, ctx, "sedML", TypeCode::Document);

        let level = Self::read_release_number(
            attributes,
            "level",
            SedErrorCode::DocumentLevelMustBeNonNegativeInteger,
            ctx,
            line,
            column,
        );
        let version = Self::read_release_number(
            attributes,
            "version",
            SedErrorCode::DocumentVersionMustBeNonNegativeInteger,
            ctx,
            line,
            column,
        );

        let (Some(level), Some(version)) = (level, version) else {
            return;
        };
        if !is_valid_combination(level, version) {
            ctx.log_error(
                SedErrorCode::InvalidNamespaceOnSed,
                &format!("Level {level} Version {version} is not a SED-ML release."),
                line,
                column,
            );
            return;
        }

        let mut namespaces = self.base.namespaces().clone();
        if namespaces.set_level_version(level, version).is_ok() {
            apply_namespaces(self, &namespaces);
        }
    }

    fn write_attributes(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        for (prefix, uri) in self.base.namespaces().namespaces().iter() {
            stream.write_attribute(&XmlNamespaces::attribute_name(prefix), uri);
        }
        self.base.write_attributes(stream)?;
        stream.write_attribute("level", &self.level().to_string());
        stream.write_attribute("version", &self.version().to_string());
        Ok(())
    }

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        match name {
            "listOfAlgorithmParameters" => Some(&mut self.algorithm_parameters),
            "listOfDataDescriptions" => Some(&mut self.data_descriptions),
            "listOfModels" => Some(&mut self.models),
            "listOfSimulations" => Some(&mut self.simulations),
            "listOfTasks" => Some(&mut self.tasks),
            "listOfDataGenerators" => Some(&mut self.data_generators),
            "listOfOutputs" => Some(&mut self.outputs),
            "listOfStyles" => Some(&mut self.styles),
            _ => None,
        }
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        let skip = usize::from(self.level() == 1 && self.version() < 4);
        write_child_objects(&self.base, &self.children()[skip..], stream)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![
            &self.algorithm_parameters as &dyn SedObject,
            &self.data_descriptions,
            &self.models,
            &self.simulations,
            &self.tasks,
            &self.data_generators,
            &self.outputs,
            &self.styles,
        ]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![
            &mut self.algorithm_parameters as &mut dyn SedObject,
            &mut self.data_descriptions,
            &mut self.models,
            &mut self.simulations,
            &mut self.tasks,
            &mut self.data_generators,
            &mut self.outputs,
            &mut self.styles,
        ]
    }

    fn child_link(&self) -> ParentLink {
        ParentLink::document_root(self.level(), self.version())
    }

    fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "level" => i32::try_from(self.level()).ok().map(AttributeValue::from),
            "version" => i32::try_from(self.version()).ok().map(AttributeValue::from),
            _ => self.base.get_attribute(name),
        }
    }

    fn is_set_attribute(&self, name: &str) -> bool {
        match name {
            "level" | "version" => true,
            _ => self.base.is_set_attribute(name),
        }
    }

    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> SedResult {
        match name {
            "level" | "version" => {
                let number = crate::attribute::as_int(value)?;
                let number =
                    u32::try_from(number).map_err(|_| SedOperationError::InvalidAttributeValue)?;
                if name == "level" {
                    self.set_level_and_version(number, self.version())
                } else {
                    self.set_level_and_version(self.level(), number)
                }
            }
            _ => self.base.set_attribute(name, value),
        }
    }

    fn unset_attribute(&mut self, name: &str) -> SedResult {
        match name {
            "level" | "version" => Err(SedOperationError::OperationFailed),
            _ => self.base.unset_attribute(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::SedVariable;

    fn complete_model(id: &str, level: u32, version: u32) -> SedModel {
        let mut model = SedModel::new(level, version).expect("Invalid namespaces");
        model.set_id(id).expect("Invalid id");
        model
            .set_language("urn:sedml:language:sbml")
            .expect("Failed to set language");
        model.set_source("model.xml").expect("Failed to set source");
        model
    }

    #[test]
    fn test_add_model_checks_in_order() {
        let mut document = SedDocument::new(1, 4).expect("Invalid namespaces");

        let mut incomplete = complete_model("m1", 1, 3);
        incomplete.unset_source().expect("Failed to unset source");
        assert_eq!(
            document.add_model(&incomplete),
            Err(SedOperationError::InvalidObject)
        );
        assert_eq!(
            document.add_model(&complete_model("m1", 1, 3)),
            Err(SedOperationError::VersionMismatch)
        );

        assert_eq!(document.add_model(&complete_model("m1", 1, 4)), Ok(()));
        assert_eq!(
            document.add_model(&complete_model("m1", 1, 4)),
            Err(SedOperationError::DuplicateObjectId)
        );
        assert_eq!(document.num_models(), 1);

        let stored = document.get_model_by_id("m1").expect("Missing model");
        assert!(stored.base().parent_link().is_in_document());
    }

    #[test]
    fn test_conflicting_prefix_is_rejected() {
        let mut document = SedDocument::default();
        document
            .add_namespace("http://www.sbml.org/sbml/level3/version1/core", "sbml")
            .expect("Failed to declare namespace");

        let mut model = complete_model("m1", 1, 4);
        model
            .base_mut()
            .namespaces_mut()
            .add_namespace("http://www.sbml.org/sbml/level2/version4", "sbml")
            .expect("Failed to declare namespace");
        assert_eq!(
            document.add_model(&model),
            Err(SedOperationError::NamespacesMismatch)
        );
    }

    #[test]
    fn test_set_level_and_version_moves_the_tree() {
        let mut document = SedDocument::default();
        document
            .create_data_generator()
            .expect("Failed to create data generator")
            .create_variable()
            .expect("Failed to create variable")
            .set_id("time")
            .expect("Invalid id");

        document
            .set_level_and_version(1, 2)
            .expect("Failed to change version");
        assert_eq!(document.version(), 2);

        let generator = document.get_data_generator(0).expect("Missing data generator");
        let variable: &SedVariable = generator.get_variable(0).expect("Missing variable");
        assert_eq!(variable.version(), 2);
        assert_eq!(
            variable.base().parent_link().document().map(|link| link.version),
            Some(2)
        );

        assert_eq!(
            document.set_level_and_version(2, 1),
            Err(SedOperationError::InvalidAttributeValue)
        );
    }

    #[test]
    fn test_create_helpers_keep_variant_kinds() {
        let mut document = SedDocument::default();
        document
            .create_uniform_time_course()
            .expect("Failed to create simulation")
            .set_id("sim1")
            .expect("Invalid id");
        document.create_plot2d().expect("Failed to create plot");
        document.create_repeated_task().expect("Failed to create task");

        assert!(document
            .get_simulation_by_id("sim1")
            .is_some_and(SedSimulation::is_uniform_time_course));
        assert!(matches!(document.get_output(0), Some(SedOutput::Plot2D(_))));
        assert!(document.get_task(0).is_some_and(SedAbstractTask::is_repeated_task));
    }

    #[test]
    fn test_top_level_lists_in_schema_order() {
        let mut document = SedDocument::default();
        document
            .create_style()
            .expect("Failed to create style")
            .set_id("s1")
            .expect("Invalid id");
        document.create_figure().expect("Failed to create figure");
        document
            .create_data_description()
            .expect("Failed to create data description")
            .set_id("data1")
            .expect("Invalid id");
        document
            .create_algorithm_parameter()
            .expect("Failed to create parameter")
            .set_kisao_id("KISAO:0000211")
            .expect("Invalid KiSAO id");
        document
            .create_parameter_estimation_task()
            .expect("Failed to create task");

        let mut output = XmlOutputStream::compact();
        document.write_elements(&mut output).expect("Failed to write");
        let xml = output.finish().expect("Failed to finish");
        let positions: Vec<usize> = [
            "<listOfAlgorithmParameters>",
            "<listOfDataDescriptions>",
            "<listOfTasks>",
            "<listOfOutputs>",
            "<listOfStyles>",
        ]
        .iter()
        .map(|tag| xml.find(tag).expect("Missing list"))
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{xml}");
        assert!(document.get_task(0).is_some_and(SedAbstractTask::is_parameter_estimation_task));
    }

    #[test]
    fn test_algorithm_parameters_need_version_4() {
        let mut document = SedDocument::new(1, 3).expect("Invalid namespaces");
        document
            .create_algorithm_parameter()
            .expect("Failed to create parameter")
            .set_kisao_id("KISAO:0000211")
            .expect("Invalid KiSAO id");
        document
            .create_data_description()
            .expect("Failed to create data description")
            .set_id("data1")
            .expect("Invalid id");

        let mut output = XmlOutputStream::compact();
        document.write_elements(&mut output).expect("Failed to write");
        let xml = output.finish().expect("Failed to finish");
        assert!(!xml.contains("listOfAlgorithmParameters"));
        assert!(xml.contains("<listOfDataDescriptions>"));
        assert_eq!(document.num_algorithm_parameters(), 1);
    }
}
