use crate::base::{ReadContext, SedBase, SedObject};
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// A reference to a model quantity, read from a task or a model.
///
/// From Version 4 on a variable may instead name a KiSAO `term` computed
/// from one or two targets or symbols, reduced over the dimensions listed
/// in its applied dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SedVariable {
    base: SedBase,
    symbol: Option<String>,
    target: Option<String>,
    task_reference: Option<String>,
    model_reference: Option<String>,
    term: Option<String>,
    symbol2: Option<String>,
    target2: Option<String>,
    dimension_term: Option<String>,
    applied_dimensions: SedListOf<SedAppliedDimension>,
}

impl SedVariable {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut variable = SedVariable {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            symbol: None,
            target: None,
            task_reference: None,
            model_reference: None,
            term: None,
            symbol2: None,
            target2: None,
            dimension_term: None,
            applied_dimensions: SedListOf::with_namespaces(namespaces),
        };
        variable.connect_to_child();
        variable
    }
}

sed_constructors!(SedVariable);

sed_attributes!(SedVariable {
    symbol: string("symbol"),
    target: string("target"),
    task_reference: sidref("taskReference"),
    model_reference: sidref("modelReference"),
    term: string("term"),
    symbol2: string("symbol2"),
    target2: string("target2"),
    dimension_term: string("dimensionTerm"),
});

sed_child_lists!(SedVariable {
    applied_dimensions: SedAppliedDimension => applied_dimension [create],
});

sed_list_item!(SedVariable, "listOfVariables", TypeCode::Variable, "variable");

impl SedObject for SedVariable {
    sed_object_common!(TypeCode::Variable, "variable", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        (name == "listOfAppliedDimensions").then_some(&mut self.applied_dimensions as &mut dyn SedObject)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.applied_dimensions as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.applied_dimensions as &mut dyn SedObject]
    }
}

/// Defines a structure shared by the applied and remaining dimensions: the
/// task or data source (`target`) and the dimension within it.
macro_rules! dimension {
    ($(#[$meta:meta])* $owner:ident, $type_code:expr, $list:literal, $element:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $owner {
            base: SedBase,
            target: Option<String>,
            dimension_target: Option<String>,
        }

        impl $owner {
            pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
                $owner {
                    base: SedBase::new(namespaces),
                    target: None,
                    dimension_target: None,
                }
            }
        }

        sed_constructors!($owner);

        sed_attributes!($owner {
            target: sidref("target"),
            dimension_target: sidref("dimensionTarget"),
        });

        sed_list_item!($owner, $list, $type_code, $element);

        impl SedObject for $owner {
            sed_object_common!($type_code, $element, required: []);
        }
    };
}

dimension!(
    /// A dimension the variable's `dimensionTerm` is applied over.
    SedAppliedDimension,
    TypeCode::AppliedDimension,
    "listOfAppliedDimensions",
    "appliedDimension"
);

dimension!(
    /// A dimension left in a result after the others have been reduced.
    SedRemainingDimension,
    TypeCode::RemainingDimension,
    "listOfRemainingDimensions",
    "remainingDimension"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeValue;
    use crate::error::SedOperationError;

    #[test]
    fn test_accessors_and_reflection() {
        let mut variable = SedVariable::default();
        assert!(!variable.has_required_attributes());
        variable.set_id("time").expect("Invalid id");
        variable
            .set_symbol("urn:sedml:symbol:time")
            .expect("Failed to set symbol");
        assert!(variable.has_required_attributes());

        assert_eq!(
            variable.get_attribute("symbol"),
            Some(AttributeValue::from("urn:sedml:symbol:time"))
        );
        assert_eq!(
            variable.set_attribute("taskReference", &AttributeValue::from("task 1")),
            Err(SedOperationError::InvalidAttributeValue)
        );
        variable
            .set_attribute("taskReference", &AttributeValue::from("task1"))
            .expect("Failed to set reference");
        assert_eq!(variable.task_reference(), "task1");

        variable
            .unset_attribute("taskReference")
            .expect("Failed to unset");
        assert!(!variable.is_set_task_reference());
        assert_eq!(
            variable.set_attribute("unknown", &AttributeValue::from("x")),
            Err(SedOperationError::OperationFailed)
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = SedVariable::default();
        original.set_id("v").expect("Invalid id");
        original.set_target("/sbml:sbml").expect("Failed to set target");

        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.set_target("/other").expect("Failed to set target");
        assert_eq!(original.target(), "/sbml:sbml");
    }

    #[test]
    fn test_term_and_applied_dimensions_are_kept() {
        let xml = concat!(
            r#"<variable id="max_S1" target="/sbml:sbml/sbml:model" taskReference="task1" term="KISAO:0000812" dimensionTerm="KISAO:0000828">"#,
            r#"<listOfAppliedDimensions><appliedDimension target="task1"/></listOfAppliedDimensions>"#,
            r#"</variable>"#
        );
        let mut variable = SedVariable::default();
        let mut log = crate::errorlog::SedErrorLog::new();
        let mut stream = crate::xml::XmlInputStream::new(xml);
        crate::base::read_object(&mut variable, &mut stream, &mut ReadContext::new(&mut log, 1, 4));

        assert!(log.is_empty(), "{log}");
        assert_eq!(variable.term(), "KISAO:0000812");
        assert_eq!(variable.dimension_term(), "KISAO:0000828");
        assert_eq!(variable.num_applied_dimensions(), 1);

        let mut output = crate::xml::XmlOutputStream::compact();
        crate::base::write_object(&variable, &mut output).expect("Failed to write");
        assert_eq!(output.finish().expect("Failed to finish"), xml);
    }

    #[test]
    fn test_remaining_dimension() {
        let mut dimension = SedRemainingDimension::default();
        dimension.set_target("task1").expect("Invalid reference");
        dimension
            .set_attribute("dimensionTarget", &AttributeValue::from("time"))
            .expect("Invalid reference");
        assert_eq!(dimension.dimension_target(), "time");
        assert_eq!(dimension.element_name(), "remainingDimension");
    }
}
