use crate::base::{SedBase, SedObject};
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// A named constant used in a math expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SedParameter {
    base: SedBase,
    value: Option<f64>,
}

impl SedParameter {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedParameter {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            value: None,
        }
    }
}

sed_constructors!(SedParameter);

sed_attributes!(SedParameter {
    value: double("value"),
});

sed_list_item!(SedParameter, "listOfParameters", TypeCode::Parameter, "parameter");

impl SedObject for SedParameter {
    sed_object_common!(TypeCode::Parameter, "parameter", required: ["id", "value"]);
}
