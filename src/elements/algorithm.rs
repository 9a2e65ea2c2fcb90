use crate::base::{SedBase, SedObject};
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// The KiSAO-identified algorithm of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SedAlgorithm {
    base: SedBase,
    kisao_id: Option<String>,
    algorithm_parameters: SedListOf<SedAlgorithmParameter>,
}

impl SedAlgorithm {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut algorithm = SedAlgorithm {
            base: SedBase::new(namespaces.clone()),
            kisao_id: None,
            algorithm_parameters: SedListOf::with_namespaces(namespaces),
        };
        algorithm.connect_to_child();
        algorithm
    }
}

sed_constructors!(SedAlgorithm);

sed_attributes!(SedAlgorithm {
    kisao_id: string("kisaoID"),
});

sed_child_lists!(SedAlgorithm {
    algorithm_parameters: SedAlgorithmParameter => algorithm_parameter [create],
});

impl SedObject for SedAlgorithm {
    sed_object_common!(TypeCode::Algorithm, "algorithm", required: ["kisaoID"]);

    fn create_object(
        &mut self,
        name: &str,
        _ctx: &mut crate::base::ReadContext<'_>,
    ) -> Option<&mut dyn SedObject> {
        match name {
            "listOfAlgorithmParameters" => Some(&mut self.algorithm_parameters),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.algorithm_parameters as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.algorithm_parameters as &mut dyn SedObject]
    }
}

/// A setting of an algorithm, identified by its KiSAO term.
#[derive(Debug, Clone, PartialEq)]
pub struct SedAlgorithmParameter {
    base: SedBase,
    kisao_id: Option<String>,
    value: Option<String>,
}

impl SedAlgorithmParameter {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedAlgorithmParameter {
            base: SedBase::new(namespaces),
            kisao_id: None,
            value: None,
        }
    }
}

sed_constructors!(SedAlgorithmParameter);

sed_attributes!(SedAlgorithmParameter {
    kisao_id: string("kisaoID"),
    value: string("value"),
});

sed_list_item!(
    SedAlgorithmParameter,
    "listOfAlgorithmParameters",
    TypeCode::AlgorithmParameter,
    "algorithmParameter"
);

impl SedObject for SedAlgorithmParameter {
    sed_object_common!(
        TypeCode::AlgorithmParameter,
        "algorithmParameter",
        required: ["kisaoID", "value"]
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SedOperationError;

    #[test]
    fn test_parameters_are_owned() {
        let mut algorithm = SedAlgorithm::default();
        algorithm
            .set_kisao_id("KISAO:0000019")
            .expect("Failed to set KiSAO id");

        let parameter = algorithm
            .create_algorithm_parameter()
            .expect("Failed to create parameter");
        parameter
            .set_kisao_id("KISAO:0000211")
            .expect("Failed to set KiSAO id");
        parameter.set_value("1e-6").expect("Failed to set value");

        assert_eq!(algorithm.num_algorithm_parameters(), 1);
        let stored = algorithm.get_algorithm_parameter(0).expect("Missing parameter");
        assert!(stored.has_required_attributes());
        assert!(stored.base().parent_link().has_ancestor(TypeCode::Algorithm));
    }

    #[test]
    fn test_identity_is_rejected_before_version_4() {
        let mut parameter = SedAlgorithmParameter::new(1, 3).expect("Invalid namespaces");
        assert_eq!(
            parameter.set_id("p"),
            Err(SedOperationError::UnexpectedAttribute)
        );

        let mut parameter = SedAlgorithmParameter::new(1, 4).expect("Invalid namespaces");
        assert_eq!(parameter.set_id("p"), Ok(()));
    }
}
