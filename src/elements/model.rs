use crate::base::{ReadContext, SedBase, SedObject};
use crate::elements::{SedAddXml, SedChange, SedChangeAttribute, SedChangeXml, SedComputeChange, SedRemoveXml};
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// A model to simulate, given by its language URN and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct SedModel {
    base: SedBase,
    language: Option<String>,
    source: Option<String>,
    changes: SedListOf<SedChange>,
}

impl SedModel {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut model = SedModel {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            language: None,
            source: None,
            changes: SedListOf::with_namespaces(namespaces),
        };
        model.connect_to_child();
        model
    }

    pub fn create_change_attribute(&mut self) -> Option<&mut SedChangeAttribute> {
        let change = SedChangeAttribute::with_namespaces(self.base.namespaces().clone());
        match self.changes.push_and_get(change.into())? {
            SedChange::ChangeAttribute(change) => Some(change),
            _ => None,
        }
    }

    pub fn create_add_xml(&mut self) -> Option<&mut SedAddXml> {
        let change = SedAddXml::with_namespaces(self.base.namespaces().clone());
        match self.changes.push_and_get(change.into())? {
            SedChange::AddXml(change) => Some(change),
            _ => None,
        }
    }

    pub fn create_change_xml(&mut self) -> Option<&mut SedChangeXml> {
        let change = SedChangeXml::with_namespaces(self.base.namespaces().clone());
        match self.changes.push_and_get(change.into())? {
            SedChange::ChangeXml(change) => Some(change),
            _ => None,
        }
    }

    pub fn create_remove_xml(&mut self) -> Option<&mut SedRemoveXml> {
        let change = SedRemoveXml::with_namespaces(self.base.namespaces().clone());
        match self.changes.push_and_get(change.into())? {
            SedChange::RemoveXml(change) => Some(change),
            _ => None,
        }
    }

    pub fn create_compute_change(&mut self) -> Option<&mut SedComputeChange> {
        let change = SedComputeChange::with_namespaces(self.base.namespaces().clone());
        match self.changes.push_and_get(change.into())? {
            SedChange::ComputeChange(change) => Some(change),
            _ => None,
        }
    }
}

sed_constructors!(SedModel);

sed_attributes!(SedModel {
    language: string("language"),
    source: string("source"),
});

sed_child_lists!(SedModel {
    changes: SedChange => change,
});

sed_list_item!(SedModel, "listOfModels", TypeCode::Model, "model");

impl SedObject for SedModel {
    sed_object_common!(TypeCode::Model, "model", required: ["id", "language", "source"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        match name {
            "listOfChanges" => Some(&mut self.changes),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.changes as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.changes as &mut dyn SedObject]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_keep_insertion_order() {
        let mut model = SedModel::default();
        model
            .create_change_attribute()
            .expect("Failed to create change")
            .set_target("/a")
            .expect("Failed to set target");
        model
            .create_remove_xml()
            .expect("Failed to create change")
            .set_target("/b")
            .expect("Failed to set target");

        let targets: Vec<_> = model.changes().iter().map(SedChange::target).collect();
        assert_eq!(targets, ["/a", "/b"]);
        assert!(model.get_change(1).is_some_and(SedChange::is_remove_xml));
    }

    #[test]
    fn test_required_attributes() {
        let mut model = SedModel::new(1, 2).expect("Invalid namespaces");
        model.set_id("m1").expect("Invalid id");
        model
            .set_language("urn:sedml:language:sbml")
            .expect("Failed to set language");
        assert!(!model.has_required_attributes());
        model.set_source("model.xml").expect("Failed to set source");
        assert!(model.has_required_attributes());
    }
}
