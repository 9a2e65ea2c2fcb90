//! Tasks pair a model with a simulation; repeated tasks run sub-tasks over ranges.

use crate::base::{write_child_objects, write_object, ReadContext, SedBase, SedObject};
use crate::elements::{
    read_math, SedDataRange, SedFunctionalRange, SedParameter, SedParameterEstimationTask,
    SedRange, SedUniformRange, SedVariable, SedVectorRange,
};
use crate::error::SedIoError;
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;
use crate::xml::{XmlInputStream, XmlNode, XmlOutputStream};

/// Runs one simulation on one model.
#[derive(Debug, Clone, PartialEq)]
pub struct SedTask {
    base: SedBase,
    model_reference: Option<String>,
    simulation_reference: Option<String>,
}

impl SedTask {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedTask {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            model_reference: None,
            simulation_reference: None,
        }
    }
}

sed_constructors!(SedTask);

sed_attributes!(SedTask {
    model_reference: sidref("modelReference"),
    simulation_reference: sidref("simulationReference"),
});

impl SedObject for SedTask {
    sed_object_common!(TypeCode::Task, "task", required: ["id"]);
}

/// A task executed once per point of the master range.
#[derive(Debug, Clone, PartialEq)]
pub struct SedRepeatedTask {
    base: SedBase,
    range: Option<String>,
    reset_model: Option<bool>,
    concatenate: Option<bool>,
    ranges: SedListOf<SedRange>,
    task_changes: SedListOf<SedSetValue>,
    sub_tasks: SedListOf<SedSubTask>,
}

impl SedRepeatedTask {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut task = SedRepeatedTask {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            range: None,
            reset_model: None,
            concatenate: None,
            ranges: SedListOf::with_namespaces(namespaces.clone()),
            task_changes: SedListOf::with_namespaces(namespaces.clone()),
            sub_tasks: SedListOf::with_namespaces(namespaces),
        };
        task.connect_to_child();
        task
    }

    pub fn create_uniform_range(&mut self) -> Option<&mut SedUniformRange> {
        let range = SedUniformRange::with_namespaces(self.base.namespaces().clone());
        match self.ranges.push_and_get(range.into())? {
            SedRange::UniformRange(range) => Some(range),
            _ => None,
        }
    }

    pub fn create_vector_range(&mut self) -> Option<&mut SedVectorRange> {
        let range = SedVectorRange::with_namespaces(self.base.namespaces().clone());
        match self.ranges.push_and_get(range.into())? {
            SedRange::VectorRange(range) => Some(range),
            _ => None,
        }
    }

    pub fn create_functional_range(&mut self) -> Option<&mut SedFunctionalRange> {
        let range = SedFunctionalRange::with_namespaces(self.base.namespaces().clone());
        match self.ranges.push_and_get(range.into())? {
            SedRange::FunctionalRange(range) => Some(range),
            _ => None,
        }
    }

    pub fn create_data_range(&mut self) -> Option<&mut SedDataRange> {
        let range = SedDataRange::with_namespaces(self.base.namespaces().clone());
        match self.ranges.push_and_get(range.into())? {
            SedRange::DataRange(range) => Some(range),
            _ => None,
        }
    }
}

sed_constructors!(SedRepeatedTask);

sed_attributes!(SedRepeatedTask {
    range: sidref("range"),
    reset_model: bool("resetModel"),
    concatenate: bool("concatenate"),
});

sed_child_lists!(SedRepeatedTask {
    ranges: SedRange => range,
    task_changes: SedSetValue => task_change [create],
    sub_tasks: SedSubTask => sub_task [create],
});

impl SedObject for SedRepeatedTask {
    sed_object_common!(TypeCode::RepeatedTask, "repeatedTask", required: ["id"]);

    fn has_required_elements(&self) -> bool {
        !self.ranges.is_empty()
    }

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        match name {
            "listOfRanges" => Some(&mut self.ranges),
            "listOfChanges" => Some(&mut self.task_changes),
            "listOfSubTasks" => Some(&mut self.sub_tasks),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![
            &self.ranges as &dyn SedObject,
            &self.task_changes,
            &self.sub_tasks,
        ]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![
            &mut self.ranges as &mut dyn SedObject,
            &mut self.task_changes,
            &mut self.sub_tasks,
        ]
    }
}

/// One task run inside a repeated task, ordered by `order`.
///
/// From Version 4 on a sub-task may carry its own changes, applied before
/// each of its runs. They are not written for earlier releases.
#[derive(Debug, Clone, PartialEq)]
pub struct SedSubTask {
    base: SedBase,
    task: Option<String>,
    order: Option<i32>,
    task_changes: SedListOf<SedSetValue>,
}

impl SedSubTask {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut sub_task = SedSubTask {
            base: SedBase::new(namespaces.clone()),
            task: None,
            order: None,
            task_changes: SedListOf::with_namespaces(namespaces),
        };
        sub_task.connect_to_child();
        sub_task
    }
}

sed_constructors!(SedSubTask);

sed_attributes!(SedSubTask {
    task: sidref("task"),
    order: int("order"),
});

sed_child_lists!(SedSubTask {
    task_changes: SedSetValue => task_change [create],
});

sed_list_item!(SedSubTask, "listOfSubTasks", TypeCode::SubTask, "subTask");

impl SedObject for SedSubTask {
    sed_object_common!(TypeCode::SubTask, "subTask", required: ["order", "task"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        (name == "listOfChanges").then_some(&mut self.task_changes as &mut dyn SedObject)
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        self.base.write_elements(stream)?;
        if self.level() > 1 || self.version() >= 4 {
            write_object(&self.task_changes, stream)?;
        }
        Ok(())
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.task_changes as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.task_changes as &mut dyn SedObject]
    }
}

/// Sets a model quantity to a value computed from the current range point.
#[derive(Debug, Clone, PartialEq)]
pub struct SedSetValue {
    base: SedBase,
    model_reference: Option<String>,
    symbol: Option<String>,
    target: Option<String>,
    range: Option<String>,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
    math: Option<XmlNode>,
}

impl SedSetValue {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut set_value = SedSetValue {
            base: SedBase::new(namespaces.clone()),
            model_reference: None,
            symbol: None,
            target: None,
            range: None,
            variables: SedListOf::with_namespaces(namespaces.clone()),
            parameters: SedListOf::with_namespaces(namespaces),
            math: None,
        };
        set_value.connect_to_child();
        set_value
    }
}

sed_constructors!(SedSetValue);

sed_attributes!(SedSetValue {
    model_reference: sidref("modelReference"),
    symbol: string("symbol"),
    target: string("target"),
    range: sidref("range"),
});

sed_child_lists!(SedSetValue {
    variables: SedVariable => variable [create],
    parameters: SedParameter => parameter [create],
});

sed_math!(SedSetValue);

sed_list_item!(SedSetValue, "listOfChanges", TypeCode::SetValue, "setValue");

impl SedObject for SedSetValue {
    sed_object_common!(TypeCode::SetValue, "setValue", required: ["modelReference"]);

    fn has_required_elements(&self) -> bool {
        self.math.is_some()
    }

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        match name {
            "listOfVariables" => Some(&mut self.variables),
            "listOfParameters" => Some(&mut self.parameters),
            _ => None,
        }
    }

    fn read_other_xml(&mut self, stream: &mut XmlInputStream, ctx: &mut ReadContext<'_>) -> bool {
        read_math(stream, &mut self.math, ctx)
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        write_child_objects(&self.base, &self.children(), stream)?;
        if let Some(math) = &self.math {
            stream.write_node(math)?;
        }
        Ok(())
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.variables as &dyn SedObject, &self.parameters]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.variables as &mut dyn SedObject, &mut self.parameters]
    }
}

/// Runs a simulation on a model `numRepeats` times in a row.
#[derive(Debug, Clone, PartialEq)]
pub struct SedSimpleRepeatedTask {
    base: SedBase,
    model_reference: Option<String>,
    simulation_reference: Option<String>,
    reset_model: Option<bool>,
    num_repeats: Option<i32>,
}

impl SedSimpleRepeatedTask {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedSimpleRepeatedTask {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            model_reference: None,
            simulation_reference: None,
            reset_model: None,
            num_repeats: None,
        }
    }
}

sed_constructors!(SedSimpleRepeatedTask);

sed_attributes!(SedSimpleRepeatedTask {
    model_reference: sidref("modelReference"),
    simulation_reference: sidref("simulationReference"),
    reset_model: bool("resetModel"),
    num_repeats: int("numRepeats"),
});

impl SedObject for SedSimpleRepeatedTask {
    sed_object_common!(
        TypeCode::SimpleRepeatedTask,
        "simpleRepeatedTask",
        required: ["id", "resetModel", "numRepeats"]
    );
}

sed_variants! {
    /// Any of the task kinds of `listOfTasks`.
    SedAbstractTask, SedAbstractTaskMut, TypeCode::AbstractTask, "listOfTasks" {
        Task(SedTask) = "task",
        RepeatedTask(SedRepeatedTask) = "repeatedTask",
        SimpleRepeatedTask(SedSimpleRepeatedTask) = "simpleRepeatedTask",
        ParameterEstimationTask(SedParameterEstimationTask) = "parameterEstimationTask",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListItem;

    #[test]
    fn test_repeated_task_requires_a_range() {
        let mut task = SedRepeatedTask::default();
        task.set_id("repeat").expect("Invalid id");
        task.set_range("r1").expect("Invalid range reference");
        assert!(task.has_required_attributes());
        assert!(!task.has_required_elements());

        let range = task.create_uniform_range().expect("Failed to create range");
        range.set_id("r1").expect("Invalid id");
        assert!(task.has_required_elements());
        assert!(task.get_range_by_id("r1").is_some_and(SedRange::is_uniform_range));
    }

    #[test]
    fn test_children_are_in_schema_order() {
        let mut task = SedRepeatedTask::default();
        task.create_sub_task()
            .expect("Failed to create sub-task")
            .set_task("t1")
            .expect("Invalid task reference");
        task.create_vector_range().expect("Failed to create range");
        task.create_task_change().expect("Failed to create change");

        let names: Vec<_> = task
            .children()
            .iter()
            .map(|child| child.element_name().to_string())
            .collect();
        assert_eq!(names, ["listOfRanges", "listOfChanges", "listOfSubTasks"]);

        let sub_task = task.get_sub_task(0).expect("Missing sub-task");
        assert!(sub_task
            .base()
            .parent_link()
            .has_ancestor(TypeCode::RepeatedTask));
        assert!(!sub_task.has_required_attributes());
    }

    #[test]
    fn test_set_value_needs_math() {
        let mut set_value = SedSetValue::default();
        set_value
            .set_model_reference("model1")
            .expect("Invalid model reference");
        assert!(set_value.has_required_attributes());
        assert!(!set_value.has_required_elements());

        set_value
            .set_math_string(r#"<math xmlns="http://www.w3.org/1998/Math/MathML"><ci>x</ci></math>"#)
            .expect("Failed to set math");
        assert!(set_value.has_required_elements());
    }

    #[test]
    fn test_abstract_task_items() {
        let namespaces = SedNamespaces::default();
        let task = SedAbstractTask::create_item("repeatedTask", &namespaces).expect("Unknown kind");
        assert!(task.is_repeated_task());
        assert_eq!(task.type_code(), TypeCode::RepeatedTask);
        assert!(SedAbstractTask::create_item("subTask", &namespaces).is_none());
    }

    #[test]
    fn test_sub_task_changes_follow_version() {
        let change = concat!(
            r#"<subTask task="t1" order="1"><listOfChanges>"#,
            r#"<setValue modelReference="model1" target="/sbml:sbml"><math xmlns="http://www.w3.org/1998/Math/MathML"><cn>1</cn></math></setValue>"#,
            r#"</listOfChanges></subTask>"#
        );
        for (version, expected) in [(4, change), (3, r#"<subTask task="t1" order="1"/>"#)] {
            let mut sub_task = SedSubTask::new(1, version).expect("Invalid namespaces");
            let mut log = crate::errorlog::SedErrorLog::new();
            let mut stream = XmlInputStream::new(change);
            crate::base::read_object(
                &mut sub_task,
                &mut stream,
                &mut ReadContext::new(&mut log, 1, version),
            );
            assert_eq!(sub_task.num_task_changes(), 1);

            let mut output = XmlOutputStream::compact();
            write_object(&sub_task, &mut output).expect("Failed to write");
            assert_eq!(output.finish().expect("Failed to finish"), expected);
        }
    }

    #[test]
    fn test_simple_repeated_task() {
        let namespaces = SedNamespaces::default();
        let mut task = match SedAbstractTask::create_item("simpleRepeatedTask", &namespaces) {
            Some(SedAbstractTask::SimpleRepeatedTask(task)) => task,
            other => panic!("Expected a simple repeated task, got {other:?}"),
        };
        task.set_id("repeat").expect("Invalid id");
        task.set_reset_model(false).expect("Failed to set reset");
        assert!(!task.has_required_attributes());
        task.set_num_repeats(5).expect("Failed to set repeats");
        assert!(task.has_required_attributes());
        assert!(SedAbstractTask::create_item("parameterEstimationTask", &namespaces)
            .is_some_and(|task| task.is_parameter_estimation_task()));
    }
}
