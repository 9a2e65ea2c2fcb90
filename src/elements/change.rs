//! Changes applied to a model before it is simulated.
//!
//! Every change addresses its `target` with an XPath expression. The five
//! kinds share `listOfChanges` through [`SedChange`].

use crate::base::{wrap, write_child_objects, ReadContext, SedBase, SedObject};
use crate::elements::{read_math, read_new_xml, SedParameter, SedVariable};
use crate::error::{SedIoError, SedResult};
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;
use crate::xml::{XmlInputStream, XmlNode, XmlOutputStream};

/// Sets an XML attribute of the model to `newValue`.
#[derive(Debug, Clone, PartialEq)]
pub struct SedChangeAttribute {
    base: SedBase,
    target: Option<String>,
    new_value: Option<String>,
}

impl SedChangeAttribute {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedChangeAttribute {
            base: SedBase::new(namespaces),
            target: None,
            new_value: None,
        }
    }
}

sed_constructors!(SedChangeAttribute);

sed_attributes!(SedChangeAttribute {
    target: string("target"),
    new_value: string("newValue"),
});

impl SedObject for SedChangeAttribute {
    sed_object_common!(
        TypeCode::ChangeAttribute,
        "changeAttribute",
        required: ["target", "newValue"]
    );
}

/// Accessors for the `newXML` payload of a change.
macro_rules! new_xml_accessors {
    ($owner:ident) => {
        impl $owner {
            /// The `<newXML>` element holding the inserted content.
            pub fn new_xml(&self) -> Option<&XmlNode> {
                self.new_xml.as_ref()
            }

            pub fn is_set_new_xml(&self) -> bool {
                self.new_xml.is_some()
            }

            /// Sets the content; anything but a `newXML` element is wrapped in one.
            pub fn set_new_xml(&mut self, new_xml: XmlNode) -> SedResult {
                self.new_xml = Some(wrap(new_xml, "newXML")?);
                Ok(())
            }

            pub fn unset_new_xml(&mut self) -> SedResult {
                self.new_xml = None;
                Ok(())
            }
        }
    };
}

/// Inserts `newXML` as children of the target.
#[derive(Debug, Clone, PartialEq)]
pub struct SedAddXml {
    base: SedBase,
    target: Option<String>,
    new_xml: Option<XmlNode>,
}

impl SedAddXml {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedAddXml {
            base: SedBase::new(namespaces),
            target: None,
            new_xml: None,
        }
    }
}

sed_constructors!(SedAddXml);

sed_attributes!(SedAddXml {
    target: string("target"),
});

new_xml_accessors!(SedAddXml);

impl SedObject for SedAddXml {
    sed_object_common!(TypeCode::AddXml, "addXML", required: ["target"]);

    fn has_required_elements(&self) -> bool {
        self.new_xml.is_some()
    }

    fn read_other_xml(&mut self, stream: &mut XmlInputStream, _ctx: &mut ReadContext<'_>) -> bool {
        read_new_xml(stream, &mut self.new_xml)
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        self.base.write_elements(stream)?;
        if let Some(new_xml) = &self.new_xml {
            stream.write_node(new_xml)?;
        }
        Ok(())
    }
}

/// Replaces the target with `newXML`.
#[derive(Debug, Clone, PartialEq)]
pub struct SedChangeXml {
    base: SedBase,
    target: Option<String>,
    new_xml: Option<XmlNode>,
}

impl SedChangeXml {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedChangeXml {
            base: SedBase::new(namespaces),
            target: None,
            new_xml: None,
        }
    }
}

sed_constructors!(SedChangeXml);

sed_attributes!(SedChangeXml {
    target: string("target"),
});

new_xml_accessors!(SedChangeXml);

impl SedObject for SedChangeXml {
    sed_object_common!(TypeCode::ChangeXml, "changeXML", required: ["target"]);

    fn has_required_elements(&self) -> bool {
        self.new_xml.is_some()
    }

    fn read_other_xml(&mut self, stream: &mut XmlInputStream, _ctx: &mut ReadContext<'_>) -> bool {
        read_new_xml(stream, &mut self.new_xml)
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        self.base.write_elements(stream)?;
        if let Some(new_xml) = &self.new_xml {
            stream.write_node(new_xml)?;
        }
        Ok(())
    }
}

/// Removes the target from the model.
#[derive(Debug, Clone, PartialEq)]
pub struct SedRemoveXml {
    base: SedBase,
    target: Option<String>,
}

impl SedRemoveXml {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedRemoveXml {
            base: SedBase::new(namespaces),
            target: None,
        }
    }
}

sed_constructors!(SedRemoveXml);

sed_attributes!(SedRemoveXml {
    target: string("target"),
});

impl SedObject for SedRemoveXml {
    sed_object_common!(TypeCode::RemoveXml, "removeXML", required: ["target"]);
}

/// Sets the target to the value of a math expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SedComputeChange {
    base: SedBase,
    target: Option<String>,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
    math: Option<XmlNode>,
}

impl SedComputeChange {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut change = SedComputeChange {
            base: SedBase::new(namespaces.clone()),
            target: None,
            variables: SedListOf::with_namespaces(namespaces.clone()),
            parameters: SedListOf::with_namespaces(namespaces),
            math: None,
        };
        change.connect_to_child();
        change
    }
}

sed_constructors!(SedComputeChange);

sed_attributes!(SedComputeChange {
    target: string("target"),
});

sed_child_lists!(SedComputeChange {
    variables: SedVariable => variable [create],
    parameters: SedParameter => parameter [create],
});

sed_math!(SedComputeChange);

impl SedObject for SedComputeChange {
    sed_object_common!(TypeCode::ComputeChange, "computeChange", required: ["target"]);

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

sed_variants! {
    /// Any of the change kinds a model or a repeated task may hold.
    SedChange, SedChangeMut, TypeCode::Change, "listOfChanges" {
        ChangeAttribute(SedChangeAttribute) = "changeAttribute",
        AddXml(SedAddXml) = "addXML",
        ChangeXml(SedChangeXml) = "changeXML",
        RemoveXml(SedRemoveXml) = "removeXML",
        ComputeChange(SedComputeChange) = "computeChange",
    }
}

impl SedChange {
    /// The XPath target shared by every change kind.
    pub fn target(&self) -> &str {
        match self {
            SedChange::ChangeAttribute(change) => change.target(),
            SedChange::AddXml(change) => change.target(),
            SedChange::ChangeXml(change) => change.target(),
            SedChange::RemoveXml(change) => change.target(),
            SedChange::ComputeChange(change) => change.target(),
        }
    }
}
