use crate::base::{write_child_objects, ReadContext, SedBase, SedObject};
use crate::elements::{read_math, SedParameter, SedVariable};
use crate::error::SedIoError;
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;
use crate::xml::{XmlInputStream, XmlNode, XmlOutputStream};

/// Post-processes task results with a math expression over its variables.
#[derive(Debug, Clone, PartialEq)]
pub struct SedDataGenerator {
    base: SedBase,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
    math: Option<XmlNode>,
}

impl SedDataGenerator {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut generator = SedDataGenerator {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            variables: SedListOf::with_namespaces(namespaces.clone()),
            parameters: SedListOf::with_namespaces(namespaces),
            math: None,
        };
        generator.connect_to_child();
        generator
    }
}

sed_constructors!(SedDataGenerator);

sed_attributes!(SedDataGenerator {});

sed_child_lists!(SedDataGenerator {
    variables: SedVariable => variable [create],
    parameters: SedParameter => parameter [create],
});

sed_math!(SedDataGenerator);

sed_list_item!(
    SedDataGenerator,
    "listOfDataGenerators",
    TypeCode::DataGenerator,
    "dataGenerator"
);

impl SedObject for SedDataGenerator {
    sed_object_common!(TypeCode::DataGenerator, "dataGenerator", required: ["id"]);

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{read_object, write_object};
    use crate::errorlog::{SedErrorCode, SedErrorLog};

    const GENERATOR: &str = r#"<dataGenerator id="dg_S1" name="S1"><listOfVariables><variable id="S1" target="/sbml:sbml/sbml:model/sbml:listOfSpecies/sbml:species[1]" taskReference="task1"/></listOfVariables><math xmlns="http://www.w3.org/1998/Math/MathML"><ci>S1</ci></math></dataGenerator>"#;

    #[test]
    fn test_read_and_write_back() {
        let mut generator = SedDataGenerator::default();
        let mut log = SedErrorLog::new();
        let mut stream = XmlInputStream::new(GENERATOR);
        read_object(&mut generator, &mut stream, &mut ReadContext::new(&mut log, 1, 4));

        assert!(log.is_empty(), "{log}");
        assert_eq!(generator.num_variables(), 1);
        assert_eq!(generator.get_variable(0).map(SedVariable::task_reference), Some("task1"));
        assert!(generator.has_required_elements());

        let mut output = XmlOutputStream::compact();
        write_object(&generator, &mut output).expect("Failed to write");
        assert_eq!(output.finish().expect("Failed to finish"), GENERATOR);
    }

    #[test]
    fn test_empty_variable_list_is_reported() {
        let mut generator = SedDataGenerator::default();
        let mut log = SedErrorLog::new();
        let mut stream = XmlInputStream::new(r#"<dataGenerator id="dg"><listOfVariables/></dataGenerator>"#);
        read_object(&mut generator, &mut stream, &mut ReadContext::new(&mut log, 1, 4));

        assert!(log.contains(SedErrorCode::EmptyListElement));
        assert!(!generator.has_required_elements());
    }

    #[test]
    fn test_element_lookup() {
        let mut generator = SedDataGenerator::default();
        generator
            .create_variable()
            .expect("Failed to create variable")
            .set_id("v1")
            .expect("Invalid id");
        generator
            .create_parameter()
            .expect("Failed to create parameter")
            .set_id("p1")
            .expect("Invalid id");

        let found = generator.element_by_sid("p1").expect("Missing parameter");
        assert_eq!(found.type_code(), TypeCode::Parameter);
        assert_eq!(generator.all_elements().len(), 4);
    }
}
